// Boundary to the external image description service

pub mod http;

pub use http::HttpAnalyzer;

use crate::controller::SelectedFile;
use crate::types::AnalysisResult;
use async_trait::async_trait;

/// Something that turns an image into a textual description.
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    async fn describe(&self, file: &SelectedFile) -> AnalysisResult<String>;
}
