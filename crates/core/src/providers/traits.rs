use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::record::SummaryRecord;
use crate::models::request::SummaryRequest;

/// Source of management summary batches.
///
/// The core only needs "request parameters in, record batch out,
/// asynchronously"; transport and endpoint belong to the implementation.
/// An empty `Vec` means the endpoint had no data for the request.
#[async_trait]
pub trait SummaryFetcher: Send + Sync {
    /// Human-readable name of this fetcher (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch one batch of summary records.
    async fn fetch_summary(
        &self,
        request: &SummaryRequest,
    ) -> Result<Vec<SummaryRecord>, CoreError>;
}
