//! Terminal User Interface Module
//!
//! Interactive front end for the analyze controller, built with Ratatui.
//!
//! # Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                       🖼️ Image Analyzer                           │
//! │            Upload an image to get AI-powered analysis             │
//! ├─ 📁 Choose Image ──────────┬─ Preview ───────────────────────────┤
//! │ /home/me/pictures          │ cat.png  image/png  12.4 KiB         │
//! │ ▶ ↩ ..                     │ preview:1/cat.png                    │
//! │   📁 holidays              │ 00000000  89 50 4e 47 ...            │
//! │   ▣ cat.png                ├──────────────────────────────────────┤
//! │                            │       🔍 Analyze Image  [a]          │
//! │                            ├─ Analysis Result ────────────────────┤
//! │                            │ a cat sitting on a mat               │
//! └────────────────────────────┴──────────────────────────────────────┘
//!  Ready │ [Enter] Open [a] Analyze [q] Quit [?] Help
//! ```

pub mod app;
pub mod event;
pub mod picker;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::{App, AppEvent, View};
pub use event::{AppAction, EventHandler};
pub use picker::FilePicker;

use crate::analyzer::ImageAnalyzer;
use crate::controller::Controller;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Type alias for our terminal backend
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Startup options for the interactive mode
#[derive(Debug, Clone)]
pub struct TuiOptions {
    /// Directory the picker opens in
    pub start_dir: PathBuf,
    /// File to select before the first frame
    pub initial_image: Option<PathBuf>,
}

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI application
pub async fn run(options: TuiOptions, analyzer: Arc<dyn ImageAnalyzer>) -> anyhow::Result<()> {
    info!(dir = %options.start_dir.display(), "Starting TUI mode");

    let picker = FilePicker::open(&options.start_dir)?;
    let mut app = App::new(Controller::default(), picker, analyzer);
    if let Some(path) = &options.initial_image {
        app.select_path(path).await;
    }

    let mut terminal = init_terminal()?;
    let mut events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &mut events).await;

    if let Err(e) = restore_terminal(&mut terminal) {
        error!("Failed to restore terminal: {}", e);
    }

    result
}

/// Main application loop
async fn run_app(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Completed analyses
        app.poll_events();

        // Ticks arrive every 100ms, so this never blocks for long
        let Some(action) = events.next().await else {
            break;
        };
        app.handle_action(action).await;

        if app.should_quit {
            break;
        }
    }

    info!("TUI exited normally");
    Ok(())
}
