use async_trait::async_trait;
use reqwest::multipart;
use std::time::Duration;

use crate::config::Config;
use crate::error::AppError;
use crate::models::{FileUpload, QueryRequest, QueryResponse, UploadResult};

/// Transport seam between the session machine and the analysis service.
/// Tests substitute a scripted implementation.
#[async_trait]
pub trait SheetApi: Send + Sync {
    async fn upload(&self, file: &FileUpload) -> Result<UploadResult, AppError>;
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, AppError>;
}

pub struct HttpSheetApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSheetApi {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SheetApi for HttpSheetApi {
    async fn upload(&self, file: &FileUpload) -> Result<UploadResult, AppError> {
        let part = multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.filename.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| AppError::InvalidInput(format!("Bad MIME type: {}", e)))?;
        let form = multipart::Form::new().part("file", part);

        tracing::info!(
            "Uploading {} ({}KB) to {}/upload",
            file.filename,
            file.bytes.len() / 1024,
            self.base_url
        );

        // Failure bodies arrive with 4xx/5xx statuses but still carry the
        // UploadResult shape, so the status is not checked here.
        let response = self
            .client
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let body = response.text().await?;
        let result: UploadResult = serde_json::from_str(&body)?;
        Ok(result)
    }

    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, AppError> {
        tracing::info!("Submitting query against {}", request.file_path);

        let response = self
            .client
            .post(format!("{}/query", self.base_url))
            .json(request)
            .send()
            .await?;

        let body = response.text().await?;
        let result: QueryResponse = serde_json::from_str(&body)?;
        Ok(result)
    }
}
