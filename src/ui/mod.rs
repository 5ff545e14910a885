pub mod edit_field;
pub mod map_view;
mod monster_table;

use bosswatch::tracker::RowView;
use edit_field::EditField;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Main tracker screen: title, boss table, input/status panel, controls.
pub fn draw_ui(
    frame: &mut Frame,
    rows: &[RowView],
    selected_row: usize,
    editing: Option<&EditField>,
    status: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Input or status
            Constraint::Length(1), // Controls
        ])
        .split(frame.size());

    let title = Paragraph::new("Bosswatch - World Boss Respawn Tracker")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    monster_table::draw_monster_table(frame, chunks[1], rows, selected_row);

    match editing {
        Some(field) => field.draw(frame, chunks[2]),
        None => draw_status(frame, chunks[2], status),
    }

    draw_controls(frame, chunks[3], editing.is_some());
}

fn draw_status(frame: &mut Frame, area: Rect, status: Option<&str>) {
    let line = match status {
        Some(message) => Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(""),
    };
    let widget = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(widget, area);
}

fn draw_controls(frame: &mut Frame, area: Rect, editing: bool) {
    let text = if editing {
        "[Enter] Save    [Esc] Cancel    [←/→] Move cursor"
    } else {
        "[↑/↓] Select  [e] Death time  [n] Killed now  [c] Clear  [x/y] Coords  [m] Map  [q] Quit"
    };
    let controls = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(controls, area);
}

/// Rect of `percent_x` x `percent_y` centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
