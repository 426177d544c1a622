use serde::{Deserialize, Serialize};

use crate::models::request::SummaryRequest;

/// Lifecycle phase of a summary widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidgetPhase {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A fetch is outstanding
    Loading,
    /// The latest fetch produced a summary
    Ready,
    /// The latest fetch returned an empty batch; earlier results stay displayed
    NoData,
    /// The latest fetch failed; earlier results stay displayed
    Failed,
    /// Terminal: no further transitions are accepted
    TornDown,
}

impl std::fmt::Display for WidgetPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WidgetPhase::Idle => write!(f, "Idle"),
            WidgetPhase::Loading => write!(f, "Loading"),
            WidgetPhase::Ready => write!(f, "Ready"),
            WidgetPhase::NoData => write!(f, "NoData"),
            WidgetPhase::Failed => write!(f, "Failed"),
            WidgetPhase::TornDown => write!(f, "TornDown"),
        }
    }
}

/// A fetch the host (or the run loop) must perform on the controller's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Monotonic sequence number; only the latest issued one is applied.
    pub seq: u64,
    pub request: SummaryRequest,
}

/// What the controller did with a fetch response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A new summary was computed
    Applied,
    /// Empty batch; previous summary and chart kept
    NoData,
    /// The fetch failed; previous summary and chart kept
    Failed,
    /// A newer fetch has been issued since; response dropped
    Stale,
    /// The widget is torn down or not waiting for this response
    Ignored,
}
