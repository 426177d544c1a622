use serde_json::Value;

use crate::errors::CoreError;
use crate::models::chart::ChartConfig;

/// Opaque renderable chart object produced by a [`ChartRenderer`].
pub type RenderedChart = Value;

/// Adapter between the chart configuration and a charting backend.
///
/// The core never inspects what the backend returns; it only stores it and
/// hands it to the host for display.
pub trait ChartRenderer: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    fn render(&self, config: &ChartConfig) -> Result<RenderedChart, CoreError>;
}
