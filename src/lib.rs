// Image Analyzer - pick an image, preview it locally, ask a remote service to describe it

pub mod analyzer;
pub mod config;
pub mod controller;
pub mod describe;
pub mod tui;
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use controller::{Controller, Phase, SelectedFile, ANALYSIS_ERROR_MESSAGE};
pub use types::{AnalysisError, AnalysisResult};
