//! Import Wizard TUI
//!
//! Terminal front end of the Cesium wallet import wizard.

pub mod app;
pub mod events;
pub mod ui;

pub use app::App;
pub use events::EventHandler;
pub use ui::render_ui;

use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::error::Error;
use crate::import::{ImportSession, Navigation};

pub type TuiTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Global flag to track if terminal cleanup is needed
static TERMINAL_NEEDS_CLEANUP: AtomicBool = AtomicBool::new(false);

/// Interval between redraws without input
const TICK_RATE: Duration = Duration::from_millis(100);

/// Initialize the terminal with alternate screen and raw mode
pub fn init_terminal() -> Result<TuiTerminal, Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    TERMINAL_NEEDS_CLEANUP.store(true, Ordering::SeqCst);

    Ok(terminal)
}

/// Restore the terminal to normal mode; safe to call multiple times
pub fn restore_terminal(terminal: &mut TuiTerminal) -> Result<(), Error> {
    if TERMINAL_NEEDS_CLEANUP.load(Ordering::SeqCst) {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        TERMINAL_NEEDS_CLEANUP.store(false, Ordering::SeqCst);
    }
    Ok(())
}

/// Basic terminal restoration for panics, errors ignored
fn emergency_terminal_cleanup() {
    if TERMINAL_NEEDS_CLEANUP.load(Ordering::SeqCst) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = execute!(io::stdout(), cursor::Show);
        TERMINAL_NEEDS_CLEANUP.store(false, Ordering::SeqCst);
    }
}

/// Restore the terminal before the default panic output
pub fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        emergency_terminal_cleanup();
        original_hook(panic_info);
    }));
}

/// Run the import wizard until it navigates away or the user quits
///
/// Returns the navigation requested by the wizard, `None` when the user quit.
pub async fn run_tui(session: ImportSession) -> Result<Option<Navigation>, Error> {
    setup_panic_handler();

    let mut terminal = init_terminal().inspect_err(|_| emergency_terminal_cleanup())?;

    let _event_handler = EventHandler::spawn(session.event_sender());
    let mut app = App::new(session);

    let app_result = run_app_loop(&mut terminal, &mut app).await;

    if let Err(restore_error) = restore_terminal(&mut terminal) {
        if app_result.is_ok() {
            return Err(restore_error);
        }
        tracing::warn!(error = %restore_error, "Failed to restore terminal");
    }

    app_result.map(|()| app.session.navigation().cloned())
}

async fn run_app_loop(terminal: &mut TuiTerminal, app: &mut App) -> Result<(), Error> {
    while !app.should_quit() {
        terminal.draw(|frame| render_ui(frame, &mut *app))?;

        // time out to redraw while background work is pending
        match tokio::time::timeout(TICK_RATE, app.session.next_event()).await {
            Ok(Some(event)) => app.handle_event(event),
            Ok(None) => return Err(Error::Other("Event channel closed".to_string())),
            Err(_) => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emergency_cleanup_resets_flag() {
        TERMINAL_NEEDS_CLEANUP.store(false, Ordering::SeqCst);
        emergency_terminal_cleanup();
        assert!(!TERMINAL_NEEDS_CLEANUP.load(Ordering::SeqCst));
    }
}
