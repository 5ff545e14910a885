//! Map viewer overlay: shows the marker for one map and lets the user pick
//! a new drop point with the cursor keys.

use bosswatch::markers::MarkerPosition;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const CURSOR_STEP_PX: f64 = 8.0;
const MARKER_GLYPH: &str = "✝";
const CURSOR_GLYPH: &str = "+";

pub struct MapView {
    pub map_id: String,
    pub monster: String,
    pub marker: MarkerPosition,
    pub cursor_x: f64,
    pub cursor_y: f64,
    map_width: f64,
    map_height: f64,
    marker_width: f64,
    marker_height: f64,
}

impl MapView {
    /// Opens the viewer with the cursor on the marker's center.
    pub fn new(
        map_id: &str,
        monster: &str,
        marker: MarkerPosition,
        map_size: (f64, f64),
        marker_size: (f64, f64),
    ) -> Self {
        let (map_width, map_height) = map_size;
        let (marker_width, marker_height) = marker_size;
        let (left, top) = marker.to_pixels(map_width, map_height);
        let mut view = Self {
            map_id: map_id.to_string(),
            monster: monster.to_string(),
            marker,
            cursor_x: left + marker_width / 2.0,
            cursor_y: top + marker_height / 2.0,
            map_width,
            map_height,
            marker_width,
            marker_height,
        };
        view.clamp_cursor();
        view
    }

    pub fn move_cursor(&mut self, dx: f64, dy: f64) {
        self.cursor_x += dx * CURSOR_STEP_PX;
        self.cursor_y += dy * CURSOR_STEP_PX;
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        self.cursor_x = self.cursor_x.clamp(0.0, self.map_width);
        self.cursor_y = self.cursor_y.clamp(0.0, self.map_height);
    }

    /// Map pixel to a cell inside a `cols` x `rows` grid.
    fn cell_for(&self, x: f64, y: f64, cols: u16, rows: u16) -> (u16, u16) {
        let col = (x / self.map_width * f64::from(cols)).floor() as i64;
        let row = (y / self.map_height * f64::from(rows)).floor() as i64;
        (
            col.clamp(0, i64::from(cols.saturating_sub(1))) as u16,
            row.clamp(0, i64::from(rows.saturating_sub(1))) as u16,
        )
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = super::centered_rect(70, 70, frame.size());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} - {} ", self.monster, self.map_id));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height < 2 || inner.width == 0 {
            return;
        }
        let grid = Rect {
            height: inner.height - 1,
            ..inner
        };
        let help = Rect {
            y: inner.y + inner.height - 1,
            height: 1,
            ..inner
        };

        let (left, top) = self.marker.to_pixels(self.map_width, self.map_height);
        let marker_cell = self.cell_for(
            left + self.marker_width / 2.0,
            top + self.marker_height / 2.0,
            grid.width,
            grid.height,
        );
        let cursor_cell = self.cell_for(self.cursor_x, self.cursor_y, grid.width, grid.height);

        let lines: Vec<Line> = (0..grid.height)
            .map(|row| {
                let spans: Vec<Span> = (0..grid.width)
                    .map(|col| {
                        if (col, row) == marker_cell {
                            Span::styled(
                                MARKER_GLYPH,
                                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                            )
                        } else if (col, row) == cursor_cell {
                            Span::styled(CURSOR_GLYPH, Style::default().fg(Color::Yellow))
                        } else {
                            Span::styled("·", Style::default().fg(Color::DarkGray))
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), grid);

        let help_text = format!(
            "[←↑↓→] Move  [Enter] Drop marker  [Esc] Close   marker {} / {}",
            self.marker.left, self.marker.top
        );
        frame.render_widget(
            Paragraph::new(help_text).style(Style::default().fg(Color::Gray)),
            help,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(marker: MarkerPosition) -> MapView {
        MapView::new("map-gtb.png", "Golden Thief Bug", marker, (512.0, 512.0), (24.0, 24.0))
    }

    #[test]
    fn test_cursor_starts_on_marker_center() {
        let v = view(MarkerPosition::px(100.0, 40.0));
        assert_eq!((v.cursor_x, v.cursor_y), (112.0, 52.0));
    }

    #[test]
    fn test_cursor_is_clamped_to_map() {
        let mut v = view(MarkerPosition::px(0.0, 0.0));
        v.move_cursor(-10.0, -10.0);
        assert_eq!((v.cursor_x, v.cursor_y), (0.0, 0.0));
        v.move_cursor(1000.0, 1000.0);
        assert_eq!((v.cursor_x, v.cursor_y), (512.0, 512.0));
    }

    #[test]
    fn test_cell_mapping() {
        let v = view(MarkerPosition::default());
        assert_eq!(v.cell_for(0.0, 0.0, 64, 32), (0, 0));
        assert_eq!(v.cell_for(256.0, 256.0, 64, 32), (32, 16));
        assert_eq!(v.cell_for(512.0, 512.0, 64, 32), (63, 31));
    }
}
