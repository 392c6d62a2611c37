use std::error::Error;
use std::time::Duration;
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use log::{debug, error, info};
use ratatui::{backend::Backend, layout::Rect, Terminal};

use dipeptide_explorer::{
    analysis::AnalysisClient,
    app::ANALYSIS_SCROLL_STEP,
    config::AppConfig,
    logging::{init_logging, log_critical_error, log_shutdown, log_system_info, set_log_level},
    terminal::{install_panic_hook, restore_terminal, setup_terminal},
    ui::{cell_at, render_ui},
    App,
};

const TICK_RATE: Duration = Duration::from_millis(100);
const WHEEL_SCROLL_ROWS: u16 = 3;

fn main() -> Result<(), Box<dyn Error>> {
    human_panic::setup_panic!();
    install_panic_hook();

    set_log_level();
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {e}");
    }
    log_system_info();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log_critical_error(&e.to_string(), Some("configuration"));
            return Err(e.into());
        }
    };
    let client = AnalysisClient::new(config.analysis)?;

    let mut terminal = setup_terminal()?;

    let mut app = App::new();
    let result = run_app(&mut terminal, &mut app, &client);

    restore_terminal()?;

    if let Err(ref e) = result {
        error!("Application error: {e}");
    }
    log_shutdown();

    result
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: &AnalysisClient,
) -> Result<(), Box<dyn Error>> {
    info!("Entering event loop");

    loop {
        app.check_analysis_progress();
        terminal.draw(|f| render_ui(f, app))?;

        if !event::poll(TICK_RATE)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                match key.code {
                    KeyCode::Char('c') if ctrl => break,
                    KeyCode::Char('a') if ctrl => app.start_analysis(client),
                    KeyCode::Char(c) if !ctrl => app.on_key(c),
                    KeyCode::Backspace => app.on_backspace(),
                    KeyCode::Tab => app.toggle_peptide_type(),
                    KeyCode::Up => app.move_cursor_up(),
                    KeyCode::Down => app.move_cursor_down(),
                    KeyCode::Left => app.move_cursor_left(),
                    KeyCode::Right => app.move_cursor_right(),
                    KeyCode::PageDown => app.scroll_analysis_down(ANALYSIS_SCROLL_STEP),
                    KeyCode::PageUp => app.scroll_analysis_up(ANALYSIS_SCROLL_STEP),
                    KeyCode::Enter => app.select_current(),
                    KeyCode::Esc => {
                        if app.has_selection() {
                            app.close_detail();
                        } else {
                            app.clear_query();
                        }
                    }
                    _ => {}
                }
            }
            Event::Mouse(mouse) => {
                let size = terminal.size()?;
                handle_mouse(app, mouse, Rect::new(0, 0, size.width, size.height));
            }
            _ => {}
        }
    }

    Ok(())
}

fn handle_mouse(app: &mut App, mouse: MouseEvent, area: Rect) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some((row, col)) = cell_at(app, area, mouse.column, mouse.row) {
                debug!("Click at ({}, {}) selects cell ({row}, {col})", mouse.column, mouse.row);
                app.select_cell(row, col);
            }
        }
        MouseEventKind::ScrollDown => app.scroll_analysis_down(WHEEL_SCROLL_ROWS),
        MouseEventKind::ScrollUp => app.scroll_analysis_up(WHEEL_SCROLL_ROWS),
        _ => {}
    }
}
