use tracing::debug;

use crate::errors::CoreError;
use crate::models::chart::{
    AxisConfig, ChartConfig, ChartSeries, Series, SeriesStyle, ValueFormat,
};
use crate::models::record::{SummaryField, SummaryRecord};
use crate::models::settings::WidgetSettings;
use crate::models::summary::FiscalYear;

const CURRENT_FALLBACK_LABEL: &str = "Current FY";
const PRIOR_FALLBACK_LABEL: &str = "Prior FY";

/// Maps a record batch onto the widget's category axis as two comparison series.
///
/// The core computes all the numbers; the render collaborator only draws.
/// Records map to categories by position, so the batch must hold exactly
/// one record per category.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Build the category axis and the current/prior series.
    ///
    /// 1. Check that the batch has one record per configured category
    /// 2. Read the current-period field of each record into the first series
    /// 3. Read the prior-period field into the second series
    ///
    /// Absent or malformed values plot as 0. Series are labeled with the
    /// current and prior fiscal year when one is known.
    pub fn build_series(
        &self,
        records: &[SummaryRecord],
        settings: &WidgetSettings,
        fiscal_year: Option<FiscalYear>,
    ) -> Result<ChartSeries, CoreError> {
        if records.len() != settings.categories.len() {
            return Err(CoreError::ValidationError(format!(
                "{} records cannot be plotted against {} categories",
                records.len(),
                settings.categories.len()
            )));
        }

        let (current_label, prior_label) = match fiscal_year {
            Some(fy) => (fy.label(), fy.previous().label()),
            None => (
                CURRENT_FALLBACK_LABEL.to_string(),
                PRIOR_FALLBACK_LABEL.to_string(),
            ),
        };

        let style = SeriesStyle {
            bar_width: settings.bar_width,
            border_radius: settings.border_radius,
        };

        let series = vec![
            Series {
                label: current_label,
                values: column(records, settings.current_series_field),
                color: settings.current_color.clone(),
                style: style.clone(),
            },
            Series {
                label: prior_label,
                values: column(records, settings.prior_series_field),
                color: settings.prior_color.clone(),
                style,
            },
        ];

        Ok(ChartSeries {
            categories: settings.categories.clone(),
            series,
        })
    }

    /// Package the series into a full chart configuration for a container
    /// measured at `width` pixels. Height is fixed by the settings.
    pub fn build_config(
        &self,
        records: &[SummaryRecord],
        settings: &WidgetSettings,
        fiscal_year: Option<FiscalYear>,
        width: u32,
    ) -> Result<ChartConfig, CoreError> {
        let data = self.build_series(records, settings, fiscal_year)?;
        debug!(width, categories = data.categories.len(), "built chart configuration");

        Ok(ChartConfig {
            title: settings.title.clone(),
            width,
            height: settings.chart_height,
            data,
            x_axis: AxisConfig {
                visible: settings.show_x_axis,
                title: settings.x_axis_title.clone(),
            },
            y_axis: AxisConfig {
                visible: settings.show_y_axis,
                title: settings.y_axis_title.clone(),
            },
            data_labels_enabled: settings.data_labels,
            value_format: ValueFormat {
                decimals: 1,
                suffix: settings.value_suffix.clone(),
            },
        })
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

fn column(records: &[SummaryRecord], field: SummaryField) -> Vec<f64> {
    records.iter().map(|r| r.value(field).or_zero()).collect()
}
