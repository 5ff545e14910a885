mod ui;

use bosswatch::countdown::CountdownEvent;
use bosswatch::registry::CoordinateField;
use bosswatch::store::JsonFileStore;
use bosswatch::time_math::format_death_time;
use bosswatch::build_info;
use bosswatch::utils::persistence::data_dir;
use bosswatch::{logging, Catalog, Tracker, TrackerConfig};
use chrono::{Local, NaiveDateTime};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use ui::edit_field::{EditField, EditTarget};
use ui::map_view::MapView;

enum Mode {
    Browse,
    Editing(EditField),
    Map(MapView),
}

struct App {
    tracker: Tracker<JsonFileStore>,
    /// Catalog index of the highlighted row
    selected_row: usize,
    mode: Mode,
    status: Option<String>,
    quit: bool,
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Bosswatch - World Boss Respawn Tracker\n");
                println!("Usage: bosswatch [option]\n");
                println!("Options:");
                println!("  --version  Show version information");
                println!("  --help     Show this help message\n");
                println!("Data is stored in ~/.bosswatch/ (override with BOSSWATCH_HOME).");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'bosswatch --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let dir = data_dir()?;
    let _log_guard = logging::init(&dir);
    let config = TrackerConfig::load(&dir);
    let store = JsonFileStore::new(&dir)?;
    let tracker = Tracker::load(Catalog::default(), store, config, now());

    let mut app = App {
        selected_row: tracker.row_at(0).unwrap_or(0),
        tracker,
        mode: Mode::Browse,
        status: None,
        quit: false,
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    let tick_interval = app.tracker.config().tick_interval();
    let mut last_tick = Instant::now();

    while !app.quit {
        let rows = app.tracker.rows();
        terminal.draw(|frame| {
            let editing = match &app.mode {
                Mode::Editing(field) => Some(field),
                _ => None,
            };
            ui::draw_ui(frame, &rows, app.selected_row, editing, app.status.as_deref());
            // Draw map overlay if open
            if let Mode::Map(view) = &app.mode {
                view.draw(frame);
            }
        })?;

        // Poll for input (50ms non-blocking)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    handle_key(app, key_event);
                }
            }
        }

        if last_tick.elapsed() >= tick_interval {
            for event in app.tracker.tick(now()) {
                let CountdownEvent::Respawned { row } = event;
                if let Some(view) = app.tracker.row_view(row) {
                    app.status = Some(format!("{} respawn window is open", view.name));
                }
            }
            last_tick = Instant::now();
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    let mode = std::mem::replace(&mut app.mode, Mode::Browse);
    app.mode = match mode {
        Mode::Browse => {
            handle_browse_key(app, key.code);
            // handle_browse_key may have switched modes already
            std::mem::replace(&mut app.mode, Mode::Browse)
        }
        Mode::Editing(field) => handle_edit_key(app, field, key.code),
        Mode::Map(view) => handle_map_key(app, view, key.code),
    };
}

fn move_selection(app: &mut App, delta: isize) {
    let order = app.tracker.order();
    let Some(position) = order.iter().position(|&row| row == app.selected_row) else {
        return;
    };
    let target = position.saturating_add_signed(delta).min(order.len().saturating_sub(1));
    app.selected_row = order[target];
}

fn handle_browse_key(app: &mut App, code: KeyCode) {
    let Some(view) = app.tracker.row_view(app.selected_row) else {
        return;
    };
    match code {
        KeyCode::Up | KeyCode::Char('k') => move_selection(app, -1),
        KeyCode::Down | KeyCode::Char('j') => move_selection(app, 1),
        KeyCode::Enter | KeyCode::Char('e') => {
            app.mode = Mode::Editing(EditField::new(
                view.row,
                &view.name,
                EditTarget::DeathTime,
                &view.death_time,
            ));
        }
        KeyCode::Char('x') | KeyCode::Char('y') => {
            let (field, current) = if code == KeyCode::Char('x') {
                (CoordinateField::X, &view.x_coordinate)
            } else {
                (CoordinateField::Y, &view.y_coordinate)
            };
            app.mode = Mode::Editing(EditField::new(
                view.row,
                &view.name,
                EditTarget::Coordinate(field),
                current,
            ));
        }
        KeyCode::Char('n') => {
            let at = now();
            let raw = format_death_time(at);
            apply_death_time(app, view.row, &raw, at);
        }
        KeyCode::Char('c') | KeyCode::Delete => {
            apply_death_time(app, view.row, "", now());
        }
        KeyCode::Char('m') => {
            let config = app.tracker.config();
            let map_view = MapView::new(
                &view.map_id,
                &view.name,
                app.tracker.on_map_opened(&view.map_id),
                (config.map_width_px, config.map_height_px),
                (config.marker_width_px, config.marker_height_px),
            );
            app.mode = Mode::Map(map_view);
        }
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        _ => {}
    }
}

fn apply_death_time(app: &mut App, row: usize, raw: &str, at: NaiveDateTime) {
    app.status = app
        .tracker
        .on_death_time_changed(row, raw, at)
        .err()
        .map(|e| e.to_string());
}

fn handle_edit_key(app: &mut App, mut field: EditField, code: KeyCode) -> Mode {
    match code {
        KeyCode::Char(c) => field.handle_char_input(c),
        KeyCode::Backspace => field.handle_backspace(),
        KeyCode::Left => field.move_left(),
        KeyCode::Right => field.move_right(),
        KeyCode::Esc => return Mode::Browse,
        KeyCode::Enter => {
            let result = match field.target {
                EditTarget::DeathTime => app
                    .tracker
                    .on_death_time_changed(field.row, &field.input, now())
                    .map(|_| ()),
                EditTarget::Coordinate(axis) => app
                    .tracker
                    .on_coordinate_changed(field.row, axis, &field.input)
                    .map(|_| ()),
            };
            match result {
                Ok(()) => {
                    app.status = None;
                    return Mode::Browse;
                }
                // Keep the editor open; the row keeps its previous value
                Err(e) => field.validation_error = Some(e.to_string()),
            }
        }
        _ => {}
    }
    Mode::Editing(field)
}

fn handle_map_key(app: &mut App, mut view: MapView, code: KeyCode) -> Mode {
    match code {
        KeyCode::Left | KeyCode::Char('h') => view.move_cursor(-1.0, 0.0),
        KeyCode::Right | KeyCode::Char('l') => view.move_cursor(1.0, 0.0),
        KeyCode::Up | KeyCode::Char('k') => view.move_cursor(0.0, -1.0),
        KeyCode::Down | KeyCode::Char('j') => view.move_cursor(0.0, 1.0),
        KeyCode::Enter => match app
            .tracker
            .on_marker_dropped(&view.map_id, view.cursor_x, view.cursor_y)
        {
            Ok(position) => view.marker = position,
            Err(e) => app.status = Some(e.to_string()),
        },
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('m') => return Mode::Browse,
        _ => {}
    }
    Mode::Map(view)
}
