pub mod controller;
pub mod errors;
pub mod models;
pub mod providers;
pub mod render;
pub mod services;

pub use controller::events::{EventSenders, EventSources, FilterCommand, Teardown, TeardownSignal};
pub use controller::state::{FetchOutcome, FetchTicket, WidgetPhase};
pub use controller::TriggerController;
pub use errors::CoreError;

use models::chart::ChartConfig;
use models::record::SummaryRecord;
use models::settings::WidgetSettings;
use models::summary::AggregatedSummary;
use services::{aggregation_service::AggregationService, chart_service::ChartService};

/// Result of one pass of the aggregation and chart pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub summary: AggregatedSummary,
    pub chart: ChartConfig,
}

/// Aggregate a batch and build its chart configuration in one go.
///
/// Returns `Ok(None)` for an empty batch. Pure: the same input always
/// yields the same output.
pub fn run_pipeline(
    records: &[SummaryRecord],
    settings: &WidgetSettings,
    width: u32,
) -> Result<Option<PipelineOutput>, CoreError> {
    let Some(summary) = AggregationService::new().aggregate(records) else {
        return Ok(None);
    };
    let chart = ChartService::new().build_config(records, settings, summary.fiscal_year, width)?;
    Ok(Some(PipelineOutput { summary, chart }))
}
