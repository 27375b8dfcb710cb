// HTTP adapter for the description endpoint
// Sends the image as multipart/form-data and expects {"description": "..."} back.

use crate::analyzer::ImageAnalyzer;
use crate::config::AnalyzerConfig;
use crate::controller::SelectedFile;
use crate::types::{AnalysisError, AnalysisResult};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, info};

#[derive(Deserialize)]
struct DescribeResponse {
    description: String,
}

pub struct HttpAnalyzer {
    client: Client,
    endpoint: Url,
    field: String,
}

impl HttpAnalyzer {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Reuse an existing client (connection pool, proxy settings, ...)
    pub fn with_client(client: Client, config: &AnalyzerConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            field: config.field.clone(),
        }
    }

    fn build_form(&self, file: &SelectedFile) -> AnalysisResult<Form> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime().as_ref())
            .map_err(|e| AnalysisError::InvalidPart(e.to_string()))?;

        Ok(Form::new().part(self.field.clone(), part))
    }
}

#[async_trait]
impl ImageAnalyzer for HttpAnalyzer {
    async fn describe(&self, file: &SelectedFile) -> AnalysisResult<String> {
        let form = self.build_form(file)?;

        info!(
            endpoint = %self.endpoint,
            file = %file.name(),
            size = file.len(),
            "Submitting image for analysis"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(AnalysisError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Status { status, body });
        }

        let body = response.text().await.map_err(AnalysisError::Transport)?;
        debug!(bytes = body.len(), "Analysis response received");

        let parsed: DescribeResponse =
            serde_json::from_str(&body).map_err(|e| AnalysisError::Decode(e.to_string()))?;

        Ok(parsed.description)
    }
}
