use bosswatch::registry::CoordinateField;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Which input of a row is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    DeathTime,
    Coordinate(CoordinateField),
}

impl EditTarget {
    pub fn label(&self) -> &'static str {
        match self {
            EditTarget::DeathTime => "Death time (YYYY-MM-DDTHH:MM, blank to clear)",
            EditTarget::Coordinate(CoordinateField::X) => "X coordinate",
            EditTarget::Coordinate(CoordinateField::Y) => "Y coordinate",
        }
    }
}

/// Single-line text input for one row's field.
pub struct EditField {
    pub row: usize,
    pub monster: String,
    pub target: EditTarget,
    pub input: String,
    pub cursor_position: usize,
    pub validation_error: Option<String>,
}

impl EditField {
    pub fn new(row: usize, monster: &str, target: EditTarget, current: &str) -> Self {
        Self {
            row,
            monster: monster.to_string(),
            target,
            input: current.to_string(),
            cursor_position: current.chars().count(),
            validation_error: None,
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let chars: Vec<char> = self.input.chars().collect();
        let before: String = chars[..self.cursor_position].iter().collect();
        let after: String = chars[self.cursor_position..].iter().collect();

        let mut spans = vec![
            Span::raw(before),
            Span::styled("_", Style::default().fg(Color::Yellow)),
            Span::raw(after),
        ];
        if let Some(error) = &self.validation_error {
            spans.push(Span::styled(
                format!("   ✗ {}", error),
                Style::default().fg(Color::Red),
            ));
        }

        let title = format!("{} - {}", self.monster, self.target.label());
        let widget = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(Style::default().fg(Color::White));
        f.render_widget(widget, area);
    }

    pub fn handle_char_input(&mut self, c: char) {
        let chars: Vec<char> = self.input.chars().collect();
        let before: String = chars[..self.cursor_position].iter().collect();
        let after: String = chars[self.cursor_position..].iter().collect();
        self.input = format!("{}{}{}", before, c, after);
        self.cursor_position += 1;
        self.validation_error = None;
    }

    pub fn handle_backspace(&mut self) {
        if self.cursor_position > 0 {
            let chars: Vec<char> = self.input.chars().collect();
            let before: String = chars[..self.cursor_position - 1].iter().collect();
            let after: String = chars[self.cursor_position..].iter().collect();
            self.input = format!("{}{}", before, after);
            self.cursor_position -= 1;
            self.validation_error = None;
        }
    }

    pub fn move_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_backspace() {
        let mut field = EditField::new(0, "Ifrit", EditTarget::DeathTime, "2024");
        assert_eq!(field.cursor_position, 4);
        field.handle_char_input('-');
        field.handle_char_input('0');
        assert_eq!(field.input, "2024-0");
        field.handle_backspace();
        assert_eq!(field.input, "2024-");
    }

    #[test]
    fn test_insert_mid_string() {
        let mut field = EditField::new(0, "LHZ3", EditTarget::Coordinate(CoordinateField::X), "15");
        field.move_left();
        field.handle_char_input('2');
        assert_eq!(field.input, "125");
        field.move_right();
        field.move_right();
        assert_eq!(field.cursor_position, 3);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut field = EditField::new(0, "LHZ3", EditTarget::DeathTime, "");
        field.handle_backspace();
        assert_eq!(field.input, "");
        assert_eq!(field.cursor_position, 0);
    }
}
