//! Upload-Preview-Analyze Controller
//!
//! Owns the four pieces of per-session state (selected file, preview
//! reference, result text, busy flag) and the transitions between them.
//!
//! ```text
//!   Idle ──select──▶ Ready ──trigger──▶ Analyzing ──completion──▶ Ready
//!                     ▲ │                  │ ▲
//!                     └─┘ select           └─┘ select (request keeps running)
//! ```
//!
//! Event-loop hosts use the split form: [`Controller::begin_analysis`] hands
//! out an [`AnalysisRequest`] that can be run on another task, and the
//! resulting [`AnalysisCompletion`] is fed back through
//! [`Controller::finish_analysis`]. Callers that can simply await use
//! [`Controller::trigger_analysis`].

pub mod diagnostics;
pub mod file;
pub mod preview;

pub use diagnostics::{DiagnosticSink, TracingDiagnostics};
pub use file::{is_image_path, SelectedFile};
pub use preview::{PreviewRegistry, PreviewUrl};

use crate::analyzer::ImageAnalyzer;
use crate::types::{AnalysisError, AnalysisResult};
use futures::FutureExt;
use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Text shown to the user for every kind of analysis failure
pub const ANALYSIS_ERROR_MESSAGE: &str = "❌ Error analyzing image.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No file selected yet
    Idle,
    /// File selected, nothing in flight
    Ready,
    /// Request in flight
    Analyzing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A started analysis, detached from the controller so it can run elsewhere
#[derive(Debug)]
pub struct AnalysisRequest {
    id: RequestId,
    file: SelectedFile,
}

impl AnalysisRequest {
    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn file(&self) -> &SelectedFile {
        &self.file
    }

    /// Run the request to completion. Always yields a completion, even if the
    /// analyzer panics.
    pub async fn run<A>(self, analyzer: &A) -> AnalysisCompletion
    where
        A: ImageAnalyzer + ?Sized,
    {
        let outcome = match AssertUnwindSafe(analyzer.describe(&self.file))
            .catch_unwind()
            .await
        {
            Ok(outcome) => outcome,
            Err(panic) => Err(AnalysisError::Aborted(panic_message(panic.as_ref()))),
        };

        AnalysisCompletion {
            id: self.id,
            outcome,
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "analyzer panicked".to_string()
    }
}

/// The settled outcome of an [`AnalysisRequest`]
#[derive(Debug)]
pub struct AnalysisCompletion {
    pub id: RequestId,
    pub outcome: AnalysisResult<String>,
}

pub struct Controller {
    selected: Option<SelectedFile>,
    preview: Option<PreviewUrl>,
    result: Option<String>,
    busy: bool,
    in_flight: Option<RequestId>,
    next_request: u64,
    previews: PreviewRegistry,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl Controller {
    pub fn new(previews: PreviewRegistry, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            selected: None,
            preview: None,
            result: None,
            busy: false,
            in_flight: None,
            next_request: 0,
            previews,
            diagnostics,
        }
    }

    /// Store a newly chosen file and derive its preview reference.
    ///
    /// `None` (an empty selection event) is a no-op. Never touches the busy
    /// flag or an in-flight request.
    pub fn select_file(&mut self, file: Option<SelectedFile>) {
        let Some(file) = file else {
            debug!("Empty file selection ignored");
            return;
        };

        // Release the superseded reference before creating the new one
        self.preview = None;
        self.preview = Some(self.previews.create(&file));

        info!(
            file = %file.name(),
            mime = %file.mime(),
            size = file.len(),
            busy = self.busy,
            "File selected"
        );
        self.selected = Some(file);
    }

    /// Start an analysis if a file is selected and nothing is in flight.
    pub fn begin_analysis(&mut self) -> Option<AnalysisRequest> {
        if self.busy {
            debug!("Analysis already in flight, trigger ignored");
            return None;
        }
        let file = self.selected.clone()?;

        self.next_request += 1;
        let id = RequestId(self.next_request);
        self.busy = true;
        self.in_flight = Some(id);

        info!(request = %id, file = %file.name(), "Analysis started");
        Some(AnalysisRequest { id, file })
    }

    /// Settle the in-flight request. Returns `false` if the completion does
    /// not belong to it, in which case nothing changes.
    pub fn finish_analysis(&mut self, completion: AnalysisCompletion) -> bool {
        if self.in_flight != Some(completion.id) {
            warn!(request = %completion.id, "Ignoring completion for a request that is not in flight");
            return false;
        }

        self.in_flight = None;
        self.busy = false;

        match completion.outcome {
            Ok(description) => {
                info!(request = %completion.id, chars = description.len(), "Analysis completed");
                self.result = Some(description);
            }
            Err(e) => {
                self.diagnostics.report(&e);
                self.result = Some(ANALYSIS_ERROR_MESSAGE.to_string());
            }
        }
        true
    }

    /// Begin, run and settle an analysis in one call. No-op without a file or
    /// while another request is in flight.
    pub async fn trigger_analysis<A>(&mut self, analyzer: &A)
    where
        A: ImageAnalyzer + ?Sized,
    {
        let Some(request) = self.begin_analysis() else {
            return;
        };
        let completion = request.run(analyzer).await;
        self.finish_analysis(completion);
    }

    pub fn phase(&self) -> Phase {
        match (&self.selected, self.busy) {
            (_, true) => Phase::Analyzing,
            (Some(_), false) => Phase::Ready,
            (None, false) => Phase::Idle,
        }
    }

    /// Whether the analyze action is enabled
    pub fn can_analyze(&self) -> bool {
        self.selected.is_some() && !self.busy
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> Option<&PreviewUrl> {
        self.preview.as_ref()
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    /// The raw result text, including an empty description
    pub fn result_text(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// The result text when it should be rendered (non-empty)
    pub fn visible_result(&self) -> Option<&str> {
        self.result.as_deref().filter(|r| !r.is_empty())
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(PreviewRegistry::new(), Arc::new(TracingDiagnostics))
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("selected", &self.selected.as_ref().map(|s| s.name()))
            .field("preview", &self.preview)
            .field("result", &self.result)
            .field("busy", &self.busy)
            .field("in_flight", &self.in_flight)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::HttpAnalyzer;
    use crate::config::AnalyzerConfig;
    use async_trait::async_trait;
    use reqwest::{StatusCode, Url};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingDiagnostics {
        reports: Mutex<Vec<String>>,
    }

    impl RecordingDiagnostics {
        fn reports(&self) -> Vec<String> {
            self.reports.lock().unwrap().clone()
        }
    }

    impl DiagnosticSink for RecordingDiagnostics {
        fn report(&self, error: &AnalysisError) {
            self.reports.lock().unwrap().push(error.to_string());
        }
    }

    enum Reply {
        Describe(&'static str),
        Status(u16),
        Panic,
    }

    struct StubAnalyzer {
        reply: Reply,
        calls: AtomicUsize,
        seen: Mutex<Vec<String>>,
    }

    impl StubAnalyzer {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ImageAnalyzer for StubAnalyzer {
        async fn describe(&self, file: &SelectedFile) -> AnalysisResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(file.name().to_string());
            match self.reply {
                Reply::Describe(text) => Ok(text.to_string()),
                Reply::Status(code) => Err(AnalysisError::Status {
                    status: StatusCode::from_u16(code).unwrap(),
                    body: String::new(),
                }),
                Reply::Panic => panic!("model crashed"),
            }
        }
    }

    fn controller() -> (Controller, Arc<RecordingDiagnostics>) {
        let diagnostics = Arc::new(RecordingDiagnostics::default());
        let controller = Controller::new(PreviewRegistry::new(), diagnostics.clone());
        (controller, diagnostics)
    }

    fn image(name: &str, contents: &[u8]) -> SelectedFile {
        SelectedFile::from_bytes(name, contents.to_vec())
    }

    #[test]
    fn test_initial_state_is_idle() {
        let (controller, _) = controller();
        assert_eq!(controller.phase(), Phase::Idle);
        assert!(!controller.can_analyze());
        assert!(controller.preview().is_none());
        assert!(controller.visible_result().is_none());
    }

    #[test]
    fn test_select_file_derives_preview_from_that_file() {
        let (mut controller, _) = controller();
        controller.select_file(Some(image("cat.png", b"cat-bytes")));

        let preview = controller.preview().unwrap();
        let resolved = controller.previews().resolve(preview.as_str()).unwrap();
        assert_eq!(resolved.as_ref(), b"cat-bytes");
        assert_eq!(controller.selected_file().unwrap().name(), "cat.png");
        assert_eq!(controller.phase(), Phase::Ready);
        assert!(controller.can_analyze());
    }

    #[test]
    fn test_empty_selection_is_noop() {
        let (mut controller, _) = controller();
        controller.select_file(None);
        assert_eq!(controller.phase(), Phase::Idle);

        controller.select_file(Some(image("cat.png", b"cat")));
        controller.select_file(None);
        assert_eq!(controller.selected_file().unwrap().name(), "cat.png");
        assert!(controller.preview().is_some());
    }

    #[test]
    fn test_reselect_releases_previous_preview() {
        let (mut controller, _) = controller();
        controller.select_file(Some(image("one.png", b"1")));
        let first = controller.preview().unwrap().as_str().to_string();

        controller.select_file(Some(image("two.png", b"2")));
        let second = controller.preview().unwrap().as_str().to_string();

        assert_eq!(controller.previews().live_count(), 1);
        assert!(controller.previews().resolve(&first).is_none());
        assert_eq!(controller.previews().resolve(&second).unwrap().as_ref(), b"2");
    }

    #[test]
    fn test_teardown_releases_preview() {
        let registry = PreviewRegistry::new();
        let mut controller = Controller::new(registry.clone(), Arc::new(TracingDiagnostics));
        controller.select_file(Some(image("one.png", b"1")));
        assert_eq!(registry.live_count(), 1);

        drop(controller);
        assert_eq!(registry.live_count(), 0);
    }

    #[tokio::test]
    async fn test_trigger_without_file_issues_no_request() {
        let (mut controller, diagnostics) = controller();
        let analyzer = StubAnalyzer::new(Reply::Describe("unused"));

        controller.trigger_analysis(&analyzer).await;

        assert_eq!(analyzer.calls(), 0);
        assert!(!controller.is_busy());
        assert!(controller.result_text().is_none());
        assert!(diagnostics.reports().is_empty());
    }

    #[tokio::test]
    async fn test_successful_analysis_sets_description() {
        let (mut controller, diagnostics) = controller();
        let analyzer = StubAnalyzer::new(Reply::Describe("A cat on a mat"));
        controller.select_file(Some(image("cat.png", b"cat")));

        controller.trigger_analysis(&analyzer).await;

        assert_eq!(controller.result_text(), Some("A cat on a mat"));
        assert_eq!(controller.visible_result(), Some("A cat on a mat"));
        assert!(!controller.is_busy());
        assert_eq!(controller.phase(), Phase::Ready);
        assert!(diagnostics.reports().is_empty());
    }

    #[tokio::test]
    async fn test_failed_analysis_sets_fixed_error_and_reports() {
        let (mut controller, diagnostics) = controller();
        let analyzer = StubAnalyzer::new(Reply::Status(503));
        controller.select_file(Some(image("cat.png", b"cat")));

        controller.trigger_analysis(&analyzer).await;

        assert_eq!(controller.result_text(), Some("❌ Error analyzing image."));
        assert!(!controller.is_busy());
        let reports = diagnostics.reports();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].contains("503"));
    }

    #[tokio::test]
    async fn test_panicking_analyzer_still_settles() {
        let (mut controller, diagnostics) = controller();
        let analyzer = StubAnalyzer::new(Reply::Panic);
        controller.select_file(Some(image("cat.png", b"cat")));

        controller.trigger_analysis(&analyzer).await;

        assert!(!controller.is_busy());
        assert_eq!(controller.result_text(), Some(ANALYSIS_ERROR_MESSAGE));
        assert!(diagnostics.reports()[0].contains("model crashed"));
    }

    #[tokio::test]
    async fn test_empty_description_is_stored_but_not_visible() {
        let (mut controller, _) = controller();
        let analyzer = StubAnalyzer::new(Reply::Describe(""));
        controller.select_file(Some(image("cat.png", b"cat")));

        controller.trigger_analysis(&analyzer).await;

        assert_eq!(controller.result_text(), Some(""));
        assert!(controller.visible_result().is_none());
    }

    #[test]
    fn test_busy_gates_the_action() {
        let (mut controller, _) = controller();
        controller.select_file(Some(image("cat.png", b"cat")));

        let request = controller.begin_analysis().unwrap();
        assert!(controller.is_busy());
        assert!(!controller.can_analyze());
        assert_eq!(controller.phase(), Phase::Analyzing);
        assert!(controller.begin_analysis().is_none());
        assert_eq!(controller.in_flight(), Some(request.id()));
    }

    #[test]
    fn test_busy_clears_exactly_once_per_request() {
        let (mut controller, _) = controller();
        controller.select_file(Some(image("cat.png", b"cat")));

        let request = controller.begin_analysis().unwrap();
        let id = request.id();
        assert!(controller.finish_analysis(AnalysisCompletion {
            id,
            outcome: Ok("first".to_string()),
        }));
        assert!(!controller.is_busy());

        // A duplicate completion for the same request changes nothing
        assert!(!controller.finish_analysis(AnalysisCompletion {
            id,
            outcome: Ok("duplicate".to_string()),
        }));
        assert_eq!(controller.result_text(), Some("first"));
    }

    #[tokio::test]
    async fn test_selecting_while_busy_keeps_request_running() {
        let (mut controller, _) = controller();
        let analyzer = StubAnalyzer::new(Reply::Describe("first file described"));
        controller.select_file(Some(image("first.png", b"first")));

        let request = controller.begin_analysis().unwrap();
        controller.select_file(Some(image("second.png", b"second")));

        assert!(controller.is_busy());
        assert_eq!(controller.phase(), Phase::Analyzing);
        assert_eq!(controller.selected_file().unwrap().name(), "second.png");
        let preview = controller.preview().unwrap().as_str().to_string();
        assert_eq!(controller.previews().resolve(&preview).unwrap().as_ref(), b"second");

        // The in-flight request still carries the file it started with
        assert_eq!(request.file().name(), "first.png");
        let completion = request.run(&analyzer).await;
        assert!(controller.finish_analysis(completion));

        assert_eq!(*analyzer.seen.lock().unwrap(), vec!["first.png".to_string()]);
        assert_eq!(controller.result_text(), Some("first file described"));
        assert_eq!(controller.phase(), Phase::Ready);
    }

    #[tokio::test]
    async fn test_result_reflects_latest_completion() {
        let (mut controller, _) = controller();
        controller.select_file(Some(image("cat.png", b"cat")));

        controller
            .trigger_analysis(&StubAnalyzer::new(Reply::Status(500)))
            .await;
        assert_eq!(controller.result_text(), Some(ANALYSIS_ERROR_MESSAGE));

        controller
            .trigger_analysis(&StubAnalyzer::new(Reply::Describe("second try")))
            .await;
        assert_eq!(controller.result_text(), Some("second try"));
    }

    #[tokio::test]
    async fn test_end_to_end_against_http_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/describe")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"description": "A cat on a mat"}"#)
            .create_async()
            .await;

        let analyzer = HttpAnalyzer::new(&AnalyzerConfig {
            endpoint: Url::parse(&format!("{}/describe", server.url())).unwrap(),
            field: "image".to_string(),
        });

        let (mut controller, _) = controller();
        controller.select_file(Some(image("cat.png", b"cat")));
        controller.trigger_analysis(&analyzer).await;

        assert_eq!(controller.result_text(), Some("A cat on a mat"));
    }

    #[tokio::test]
    async fn test_network_failure_reports_transport_error() {
        let analyzer = HttpAnalyzer::new(&AnalyzerConfig {
            endpoint: Url::parse("http://127.0.0.1:1/describe").unwrap(),
            field: "image".to_string(),
        });

        let (mut controller, diagnostics) = controller();
        controller.select_file(Some(image("cat.png", b"cat")));
        controller.trigger_analysis(&analyzer).await;

        assert_eq!(controller.result_text(), Some("❌ Error analyzing image."));
        assert!(!controller.is_busy());
        let reports = diagnostics.reports();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].starts_with("analysis request failed"));
    }
}
