use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::record::SummaryRecord;
use crate::models::request::SummaryRequest;
use super::traits::SummaryFetcher;

/// Path of the management summary endpoint, relative to the API base URL.
pub const SUMMARY_PATH: &str = "/api/managementDB/getMgmtSummaryData";

const PROVIDER_NAME: &str = "Management summary API";

/// Fetches summary batches from the management dashboard API.
///
/// - **Method**: `POST` with the [`SummaryRequest`] as a JSON body.
/// - **Response**: a JSON array of records, or `null` when there is no data.
pub struct HttpSummaryFetcher {
    client: Client,
    base_url: String,
}

impl HttpSummaryFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self::with_client(client, base_url)
    }

    /// Use a preconfigured client (proxies, auth headers, custom timeouts).
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Full endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("{}{SUMMARY_PATH}", self.base_url)
    }
}

/// Decode a response body into a record batch. `null` and `[]` both mean no data.
pub fn parse_summary_response(body: &str) -> Result<Vec<SummaryRecord>, CoreError> {
    let records: Option<Vec<SummaryRecord>> =
        serde_json::from_str(body).map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Failed to parse summary response: {e}"),
        })?;
    Ok(records.unwrap_or_default())
}

/// Map a non-2xx status to an `Api` error naming the widget and date.
pub fn check_status(status: StatusCode, request: &SummaryRequest) -> Result<(), CoreError> {
    if status.is_success() {
        return Ok(());
    }
    Err(CoreError::Api {
        provider: PROVIDER_NAME.into(),
        message: format!(
            "HTTP {status} for widget {} on {}",
            request.widget_id, request.report_date
        ),
    })
}

#[async_trait]
impl SummaryFetcher for HttpSummaryFetcher {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch_summary(
        &self,
        request: &SummaryRequest,
    ) -> Result<Vec<SummaryRecord>, CoreError> {
        let url = self.endpoint();
        debug!(%url, widget_id = %request.widget_id, "posting summary request");

        let resp = self.client.post(&url).json(request).send().await?;

        check_status(resp.status(), request)?;

        let body = resp.text().await?;
        parse_summary_response(&body)
    }
}
