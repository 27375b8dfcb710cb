//! Application State
//!
//! Wraps the controller with the picker and view state, and runs analyses on
//! background tasks whose completions come back over a channel.

use crate::analyzer::ImageAnalyzer;
use crate::controller::{AnalysisCompletion, Controller, SelectedFile};
use crate::tui::event::AppAction;
use crate::tui::picker::FilePicker;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

const PAGE_SIZE: isize = 10;

/// Current view/screen
#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    #[default]
    Main,
    Help,
}

/// Events from background tasks
#[derive(Debug)]
pub enum AppEvent {
    /// An analysis settled, successfully or not
    AnalysisSettled(AnalysisCompletion),
}

/// Main application state
pub struct App {
    pub controller: Controller,
    pub picker: FilePicker,

    // UI State
    pub view: View,
    pub should_quit: bool,
    pub spinner_frame: usize,
    /// One-line status message (file read failures and similar)
    pub notice: Option<String>,

    analyzer: Arc<dyn ImageAnalyzer>,
    event_rx: mpsc::Receiver<AppEvent>,
    event_tx: mpsc::Sender<AppEvent>,
}

impl App {
    pub fn new(controller: Controller, picker: FilePicker, analyzer: Arc<dyn ImageAnalyzer>) -> Self {
        let (event_tx, event_rx) = mpsc::channel(16);

        Self {
            controller,
            picker,
            view: View::Main,
            should_quit: false,
            spinner_frame: 0,
            notice: None,
            analyzer,
            event_rx,
            event_tx,
        }
    }

    /// Drain pending background events
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
    }

    /// Wait for the next background event and apply it
    pub async fn wait_for_event(&mut self) -> bool {
        match self.event_rx.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::AnalysisSettled(completion) => {
                self.controller.finish_analysis(completion);
            }
        }
    }

    /// Handle a user action
    pub async fn handle_action(&mut self, action: AppAction) {
        if self.view == View::Help {
            // Any key closes help
            if !matches!(action, AppAction::Tick | AppAction::ForceQuit) {
                self.view = View::Main;
                return;
            }
        }

        match action {
            AppAction::Quit | AppAction::ForceQuit => {
                self.should_quit = true;
            }
            AppAction::Select => self.activate_entry().await,
            AppAction::ParentDir => {
                if let Err(e) = self.picker.parent() {
                    self.set_notice(format!("Cannot open parent directory: {}", e));
                }
            }
            AppAction::Analyze => self.start_analysis(),
            AppAction::ToggleHidden => {
                if let Err(e) = self.picker.toggle_hidden() {
                    self.set_notice(format!("Cannot refresh directory: {}", e));
                }
            }
            AppAction::ToggleHelp => {
                self.view = View::Help;
            }
            AppAction::Escape => {
                self.notice = None;
            }
            AppAction::MoveUp => self.picker.move_by(-1),
            AppAction::MoveDown => self.picker.move_by(1),
            AppAction::PageUp => self.picker.move_by(-PAGE_SIZE),
            AppAction::PageDown => self.picker.move_by(PAGE_SIZE),
            AppAction::First => self.picker.first(),
            AppAction::Last => self.picker.last(),
            AppAction::Tick => {
                if self.controller.is_busy() {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                }
            }
        }
    }

    async fn activate_entry(&mut self) {
        match self.picker.activate() {
            Ok(Some(path)) => self.select_path(&path).await,
            Ok(None) => {}
            Err(e) => self.set_notice(format!("Cannot open directory: {}", e)),
        }
    }

    /// Load a file from disk and hand it to the controller.
    ///
    /// A file that cannot be read is treated as an empty selection.
    pub async fn select_path(&mut self, path: &Path) {
        match SelectedFile::open(path).await {
            Ok(file) => {
                self.notice = None;
                self.controller.select_file(Some(file));
            }
            Err(e) => {
                self.set_notice(e.to_string());
                self.controller.select_file(None);
            }
        }
    }

    /// Start an analysis on a background task. No-op when the action is disabled.
    fn start_analysis(&mut self) {
        let Some(request) = self.controller.begin_analysis() else {
            return;
        };
        self.spinner_frame = 0;

        let analyzer = Arc::clone(&self.analyzer);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let completion = request.run(analyzer.as_ref()).await;
            if tx.send(AppEvent::AnalysisSettled(completion)).await.is_err() {
                info!("Application closed before analysis settled");
            }
        });
    }

    fn set_notice(&mut self, notice: String) {
        warn!("{}", notice);
        self.notice = Some(notice);
    }
}
