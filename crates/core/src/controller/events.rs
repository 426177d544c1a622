use tokio::sync::{mpsc, watch};

use crate::errors::CoreError;
use crate::models::chart::ChartVariant;

/// Commands carried by the host's filter stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterCommand {
    /// The user applied a filter; fetch data for this report date.
    Apply { report_date: String },
    /// Re-issue the last request after a failure.
    Retry,
}

/// Receiving ends of the three host event streams.
///
/// The run loop owns this value; dropping it unsubscribes from every
/// stream at once.
pub struct EventSources {
    pub filters: mpsc::UnboundedReceiver<FilterCommand>,
    pub variants: mpsc::UnboundedReceiver<ChartVariant>,
    pub resizes: mpsc::UnboundedReceiver<u32>,
}

/// Sending ends of the three host event streams.
#[derive(Debug, Clone)]
pub struct EventSenders {
    filters: mpsc::UnboundedSender<FilterCommand>,
    variants: mpsc::UnboundedSender<ChartVariant>,
    resizes: mpsc::UnboundedSender<u32>,
}

impl EventSources {
    /// Create connected sender/receiver sets.
    pub fn channel() -> (EventSenders, EventSources) {
        let (filters_tx, filters) = mpsc::unbounded_channel();
        let (variants_tx, variants) = mpsc::unbounded_channel();
        let (resizes_tx, resizes) = mpsc::unbounded_channel();
        (
            EventSenders {
                filters: filters_tx,
                variants: variants_tx,
                resizes: resizes_tx,
            },
            EventSources {
                filters,
                variants,
                resizes,
            },
        )
    }
}

impl EventSenders {
    pub fn apply_filter(&self, report_date: impl Into<String>) -> Result<(), CoreError> {
        self.filters
            .send(FilterCommand::Apply {
                report_date: report_date.into(),
            })
            .map_err(|_| CoreError::TornDown)
    }

    pub fn retry(&self) -> Result<(), CoreError> {
        self.filters
            .send(FilterCommand::Retry)
            .map_err(|_| CoreError::TornDown)
    }

    pub fn select_variant(&self, variant: ChartVariant) -> Result<(), CoreError> {
        self.variants.send(variant).map_err(|_| CoreError::TornDown)
    }

    /// Report a new container width in pixels.
    pub fn resize(&self, width: u32) -> Result<(), CoreError> {
        self.resizes.send(width).map_err(|_| CoreError::TornDown)
    }
}

/// Composite cancellation token covering every subscription of a widget.
#[derive(Debug)]
pub struct Teardown {
    tx: watch::Sender<bool>,
}

/// Listening side of a [`Teardown`].
#[derive(Debug, Clone)]
pub struct TeardownSignal {
    rx: watch::Receiver<bool>,
}

impl Teardown {
    pub fn channel() -> (Teardown, TeardownSignal) {
        let (tx, rx) = watch::channel(false);
        (Teardown { tx }, TeardownSignal { rx })
    }

    /// Tear the widget down. Idempotent.
    pub fn fire(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_fired(&self) -> bool {
        *self.tx.borrow()
    }
}

impl TeardownSignal {
    /// Resolves once teardown fires, or once the [`Teardown`] handle is dropped.
    pub async fn fired(&mut self) {
        let _ = self.rx.wait_for(|torn_down| *torn_down).await;
    }
}
