//! The record-fetch boundary: a GET that must return a JSON array of
//! uniformly-shaped records. Anything else surfaces as a data error, with
//! no recovery attempted here.

use crate::domain::error::{AppError, Result};
use crate::domain::record::RecordSet;
use crate::domain::session::SessionContext;
use crate::infrastructure::http::response_message;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::info;
use url::Url;

#[async_trait]
pub trait DataFetchClient: Send + Sync {
    async fn fetch_records(&self) -> Result<RecordSet>;
}

pub struct HttpDataFetchClient {
    client: reqwest::Client,
    endpoint: Url,
    session: SessionContext,
}

impl HttpDataFetchClient {
    pub fn new(endpoint: Url, session: SessionContext) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            endpoint,
            session,
        }
    }
}

#[async_trait]
impl DataFetchClient for HttpDataFetchClient {
    async fn fetch_records(&self) -> Result<RecordSet> {
        let request = self
            .client
            .get(self.endpoint.clone())
            .header(ACCEPT, "application/json");

        let response = self
            .session
            .apply(request)
            .send()
            .await
            .map_err(|e| AppError::Data(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Data(response_message(status, &body)));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| AppError::Data(format!("invalid JSON body: {}", e)))?;

        let items = match value {
            Value::Array(items) => items,
            _ => {
                return Err(AppError::Data(
                    "expected a JSON array of records".to_string(),
                ))
            }
        };

        let records = RecordSet::from_values(items)?;
        info!(records = records.len(), "fetched record set");
        Ok(records)
    }
}
