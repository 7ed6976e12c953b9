//! Hands the original file to the remote processing endpoint and
//! classifies what came back.

use crate::domain::error::{AppError, Result};
use crate::domain::session::SessionContext;
use crate::infrastructure::http::response_message;
use chrono::Utc;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

/// Response fields that may carry the processed-file URL, in resolution
/// order. The first one present wins.
const URL_FIELD_PRIORITY: [&str; 3] = ["editedFileUrl", "downloadUrl", "fileUrl"];

/// Pick the canonical result URL out of a response body.
pub fn resolve_file_url(body: &Value) -> Option<String> {
    URL_FIELD_PRIORITY
        .iter()
        .find_map(|field| body.get(field).and_then(Value::as_str))
        .map(str::to_string)
}

pub type ProgressFn = dyn Fn(u8) + Send + Sync;

pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// A successful upload. `resolved_url` is `None` when the endpoint
/// answered without any known URL field; the raw body is kept so the
/// caller can show it for diagnostics.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub resolved_url: Option<String>,
    pub body: Value,
}

/// Sends the file plus metadata as multipart form data, with a bounded
/// timeout measured from request start. At most one upload is in flight
/// per coordinator; the guard is the only shared mutable state.
pub struct RemoteUploadCoordinator {
    client: reqwest::Client,
    endpoint: Url,
    session: SessionContext,
    in_flight: AtomicBool,
}

impl RemoteUploadCoordinator {
    pub fn new(endpoint: Url, session: SessionContext, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            endpoint,
            session,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub async fn upload(
        &self,
        file: UploadFile,
        progress: Option<&ProgressFn>,
    ) -> Result<UploadOutcome> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(AppError::Validation(
                "an upload is already in progress".to_string(),
            ));
        }

        let result = self.perform(file, progress).await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn perform(
        &self,
        file: UploadFile,
        progress: Option<&ProgressFn>,
    ) -> Result<UploadOutcome> {
        if let Some(report) = progress {
            report(0);
        }

        let file_name = file.name.clone();
        let file_size = file.bytes.len();
        let form = Form::new()
            .part("data", Part::bytes(file.bytes).file_name(file_name.clone()))
            .text("fileName", file_name.clone())
            .text("fileSize", file_size.to_string())
            .text("timestamp", Utc::now().to_rfc3339());

        info!(file_name = %file_name, file_size, "uploading spreadsheet");

        let request = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .multipart(form);

        let response = self
            .session
            .apply(request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UploadHttp {
                status: status.as_u16(),
                message: response_message(status, &body),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.contains("application/json") {
            return Err(AppError::UploadProtocol(format!(
                "expected a JSON response, got '{}'",
                content_type
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AppError::UploadTimeout
            } else {
                AppError::UploadProtocol(format!("invalid JSON body: {}", e))
            }
        })?;

        if let Some(report) = progress {
            report(100);
        }

        let resolved_url = resolve_file_url(&body);
        match &resolved_url {
            Some(url) => info!(url = %url, "upload resolved"),
            None => warn!("upload succeeded but the response carries no file URL"),
        }

        Ok(UploadOutcome { resolved_url, body })
    }
}

fn classify_transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::UploadTimeout
    } else {
        AppError::UploadConnection(err.to_string())
    }
}
