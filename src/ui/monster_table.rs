use bosswatch::countdown::CountdownStatus;
use bosswatch::tracker::RowView;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

const HEADERS: [&str; 8] = [
    "Monster",
    "Respawn",
    "Death Time",
    "X",
    "Y",
    "Window",
    "Remaining",
    "Map",
];

pub fn draw_monster_table(frame: &mut Frame, area: Rect, rows: &[RowView], selected_row: usize) {
    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h))).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let body: Vec<Row> = rows
        .iter()
        .map(|view| {
            let remaining_style = match view.status {
                CountdownStatus::Respawned => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                CountdownStatus::Counting(left) if left.num_minutes() < 10 => {
                    Style::default().fg(Color::Yellow)
                }
                _ => Style::default(),
            };
            Row::new(vec![
                Cell::from(view.name.clone()),
                Cell::from(view.delay_label.clone()),
                Cell::from(view.death_time.clone()),
                Cell::from(view.x_coordinate.clone()),
                Cell::from(view.y_coordinate.clone()),
                Cell::from(view.window_label.clone()),
                Cell::from(view.remaining_label.clone()).style(remaining_style),
                Cell::from(view.map_id.clone()).style(Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(22),
        Constraint::Length(18),
        Constraint::Length(17),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(19),
        Constraint::Length(10),
        Constraint::Min(10),
    ];

    let table = Table::new(body, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Bosses"))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select(rows.iter().position(|view| view.row == selected_row));
    frame.render_stateful_widget(table, area, &mut state);
}
