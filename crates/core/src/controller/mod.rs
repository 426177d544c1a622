pub mod events;
pub mod state;

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::errors::CoreError;
use crate::models::chart::{ChartConfig, ChartVariant, Series};
use crate::models::record::SummaryRecord;
use crate::models::request::SummaryRequest;
use crate::models::settings::WidgetSettings;
use crate::models::summary::{AggregatedSummary, Headline};
use crate::providers::traits::SummaryFetcher;
use crate::render::traits::{ChartRenderer, RenderedChart};
use crate::services::aggregation_service::AggregationService;
use crate::services::chart_service::ChartService;

use events::{EventSources, FilterCommand, TeardownSignal};
use state::{FetchOutcome, FetchTicket, WidgetPhase};

type FetchResult = (u64, Result<Vec<SummaryRecord>, CoreError>);

/// Drives one summary widget: fetch → aggregate → build chart.
///
/// All transitions happen on one logical thread. Each fetch carries a
/// sequence number and only the response to the most recently issued
/// fetch is applied, so a slow earlier response can never overwrite newer
/// data. After [`teardown`](Self::teardown) every event and every late
/// response is ignored.
#[must_use]
pub struct TriggerController {
    settings: WidgetSettings,
    aggregation_service: AggregationService,
    chart_service: ChartService,
    renderer: Box<dyn ChartRenderer>,

    phase: WidgetPhase,
    variant: ChartVariant,
    /// Last measured container width
    width: u32,
    /// Sequence number of the most recently issued fetch (0 = none yet)
    issued: u64,
    last_request: Option<SummaryRequest>,
    /// Set once any response (success, empty or failure) has arrived.
    has_response: bool,

    records: Vec<SummaryRecord>,
    summary: Option<AggregatedSummary>,
    chart: Option<ChartConfig>,
    rendered: Option<RenderedChart>,
    legend: Vec<Series>,
    last_error: Option<String>,
}

impl std::fmt::Debug for TriggerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerController")
            .field("widget_id", &self.settings.widget_id)
            .field("phase", &self.phase)
            .field("issued", &self.issued)
            .field("records", &self.records.len())
            .field("renderer", &self.renderer.name())
            .finish()
    }
}

impl TriggerController {
    pub fn new(settings: WidgetSettings, renderer: Box<dyn ChartRenderer>) -> Self {
        let width = settings.default_width;
        Self {
            settings,
            aggregation_service: AggregationService::new(),
            chart_service: ChartService::new(),
            renderer,
            phase: WidgetPhase::Idle,
            variant: ChartVariant::default(),
            width,
            issued: 0,
            last_request: None,
            has_response: false,
            records: Vec::new(),
            summary: None,
            chart: None,
            rendered: None,
            legend: Vec::new(),
            last_error: None,
        }
    }

    // ── Events ──────────────────────────────────────────────────────

    /// A filter was applied (or the widget loads for the first time).
    ///
    /// Enters `Loading` and returns the fetch to perform. Any fetch issued
    /// earlier becomes stale. Returns `None` after teardown.
    pub fn filter_applied(&mut self, report_date: impl Into<String>) -> Option<FetchTicket> {
        if self.phase == WidgetPhase::TornDown {
            debug!("filter event after teardown ignored");
            return None;
        }
        let request = SummaryRequest::for_widget(&self.settings, report_date);
        Some(self.issue(request))
    }

    /// Re-issue the last request. Only valid in the `Failed` phase.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if self.phase != WidgetPhase::Failed {
            debug!(phase = %self.phase, "retry ignored");
            return None;
        }
        let request = self.last_request.clone()?;
        Some(self.issue(request))
    }

    /// Deliver the response of a fetch issued by this controller.
    pub fn fetch_completed(
        &mut self,
        seq: u64,
        result: Result<Vec<SummaryRecord>, CoreError>,
    ) -> FetchOutcome {
        if self.phase == WidgetPhase::TornDown {
            debug!(seq, "response after teardown dropped");
            return FetchOutcome::Ignored;
        }
        if seq != self.issued {
            debug!(seq, latest = self.issued, "stale response dropped");
            return FetchOutcome::Stale;
        }
        if self.phase != WidgetPhase::Loading {
            debug!(seq, phase = %self.phase, "duplicate response dropped");
            return FetchOutcome::Ignored;
        }
        self.has_response = true;

        let records = match result {
            Ok(records) => records,
            Err(e) => {
                error!(seq, widget_id = %self.settings.widget_id, error = %e, "summary fetch failed");
                self.last_error = Some(e.to_string());
                self.phase = WidgetPhase::Failed;
                return FetchOutcome::Failed;
            }
        };

        // Empty batch: keep whatever is displayed.
        let Some(summary) = self.aggregation_service.aggregate(&records) else {
            info!(seq, widget_id = %self.settings.widget_id, "no summary data");
            self.phase = WidgetPhase::NoData;
            return FetchOutcome::NoData;
        };

        info!(
            seq,
            records = records.len(),
            qtr_variance_pct = summary.qtr_variance_pct,
            ytd_variance_pct = summary.ytd_variance_pct,
            "summary applied"
        );
        self.records = records;
        self.summary = Some(summary);
        self.last_error = None;
        self.phase = WidgetPhase::Ready;
        self.rebuild_chart();
        FetchOutcome::Applied
    }

    /// The container was resized to `width` pixels.
    ///
    /// Rebuilds the displayed chart from the retained records, including a
    /// chart kept through `Loading`, `NoData` or `Failed`; never re-fetches.
    /// Returns whether a rebuild happened.
    pub fn resize(&mut self, width: u32) -> bool {
        if self.phase == WidgetPhase::TornDown {
            return false;
        }
        self.width = width;
        if self.chart.is_none() {
            return false;
        }
        self.rebuild_chart();
        self.chart.is_some()
    }

    /// Switch the display mode. Never triggers a fetch.
    pub fn select_variant(&mut self, variant: ChartVariant) {
        if self.phase == WidgetPhase::TornDown {
            return;
        }
        self.variant = variant;
    }

    /// Terminal transition. Everything that arrives afterwards is dropped.
    pub fn teardown(&mut self) {
        if self.phase != WidgetPhase::TornDown {
            info!(widget_id = %self.settings.widget_id, "widget torn down");
            self.phase = WidgetPhase::TornDown;
        }
    }

    // ── Event loop ──────────────────────────────────────────────────

    /// Consume host events until teardown fires.
    ///
    /// Fetches run concurrently on the current task and their responses are
    /// applied in arrival order, subject to the sequence guard. On teardown
    /// all three subscriptions are dropped together, outstanding fetches are
    /// abandoned, and the final controller is returned.
    pub async fn run(
        mut self,
        fetcher: Arc<dyn SummaryFetcher>,
        sources: EventSources,
        mut teardown: TeardownSignal,
    ) -> Self {
        let EventSources {
            mut filters,
            mut variants,
            mut resizes,
        } = sources;
        let mut in_flight: FuturesUnordered<BoxFuture<'static, FetchResult>> =
            FuturesUnordered::new();

        loop {
            tokio::select! {
                biased;

                _ = teardown.fired() => break,

                Some((seq, result)) = in_flight.next(), if !in_flight.is_empty() => {
                    self.fetch_completed(seq, result);
                }

                Some(command) = filters.recv() => {
                    let ticket = match command {
                        FilterCommand::Apply { report_date } => self.filter_applied(report_date),
                        FilterCommand::Retry => self.retry(),
                    };
                    if let Some(ticket) = ticket {
                        in_flight.push(fetch(&fetcher, ticket));
                    }
                }

                Some(variant) = variants.recv() => self.select_variant(variant),

                Some(width) = resizes.recv() => {
                    self.resize(width);
                }

                else => break,
            }
        }

        drop((filters, variants, resizes));
        drop(in_flight);
        self.teardown();
        self
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub fn phase(&self) -> WidgetPhase {
        self.phase
    }

    #[must_use]
    pub fn settings(&self) -> &WidgetSettings {
        &self.settings
    }

    #[must_use]
    pub fn summary(&self) -> Option<&AggregatedSummary> {
        self.summary.as_ref()
    }

    /// Headline figures for the configured period.
    #[must_use]
    pub fn headline(&self) -> Option<Headline> {
        self.summary
            .as_ref()
            .map(|s| s.headline(self.settings.headline_period))
    }

    #[must_use]
    pub fn chart(&self) -> Option<&ChartConfig> {
        self.chart.as_ref()
    }

    /// Whatever the render collaborator returned for the current chart.
    #[must_use]
    pub fn rendered(&self) -> Option<&RenderedChart> {
        self.rendered.as_ref()
    }

    #[must_use]
    pub fn legend(&self) -> &[Series] {
        &self.legend
    }

    /// The last applied batch, kept for the detail popover.
    #[must_use]
    pub fn records(&self) -> &[SummaryRecord] {
        &self.records
    }

    #[must_use]
    pub fn variant(&self) -> ChartVariant {
        self.variant
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn has_response(&self) -> bool {
        self.has_response
    }

    /// Sequence number of the most recently issued fetch.
    #[must_use]
    pub fn latest_seq(&self) -> u64 {
        self.issued
    }

    // ── Internal ────────────────────────────────────────────────────

    fn issue(&mut self, request: SummaryRequest) -> FetchTicket {
        self.issued += 1;
        self.phase = WidgetPhase::Loading;
        self.last_request = Some(request.clone());
        info!(
            seq = self.issued,
            widget_id = %request.widget_id,
            report_date = %request.report_date,
            "summary fetch issued"
        );
        FetchTicket {
            seq: self.issued,
            request,
        }
    }

    /// Rebuild chart, rendered object and legend from the retained records.
    ///
    /// On failure the chart is cleared rather than left describing older data.
    fn rebuild_chart(&mut self) {
        let fiscal_year = self.summary.as_ref().and_then(|s| s.fiscal_year);
        let built = self
            .chart_service
            .build_config(&self.records, &self.settings, fiscal_year, self.width)
            .and_then(|config| {
                let rendered = self.renderer.render(&config)?;
                Ok((config, rendered))
            });

        match built {
            Ok((config, rendered)) => {
                self.legend = config.data.series.clone();
                self.chart = Some(config);
                self.rendered = Some(rendered);
            }
            Err(e) => {
                error!(widget_id = %self.settings.widget_id, error = %e, "chart build failed");
                self.last_error = Some(e.to_string());
                self.chart = None;
                self.rendered = None;
                self.legend.clear();
            }
        }
    }
}

fn fetch(fetcher: &Arc<dyn SummaryFetcher>, ticket: FetchTicket) -> BoxFuture<'static, FetchResult> {
    let fetcher = Arc::clone(fetcher);
    async move {
        let result = fetcher.fetch_summary(&ticket.request).await;
        (ticket.seq, result)
    }
    .boxed()
}
