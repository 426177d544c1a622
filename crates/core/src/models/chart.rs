use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Category axis plus the comparison series plotted against it.
///
/// Every series holds exactly one value per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

/// One named, colored sequence of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Legend label, e.g. `FY25`
    pub label: String,

    /// One value per category, in category order
    pub values: Vec<f64>,

    /// CSS color string
    pub color: String,

    pub style: SeriesStyle,
}

/// Per-series bar styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    /// Bar width in pixels
    pub bar_width: u32,

    /// Corner rounding in pixels
    pub border_radius: u32,
}

/// Axis visibility and title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub visible: bool,
    pub title: Option<String>,
}

/// Value formatting shared by tooltips and data labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueFormat {
    /// Digits after the decimal point
    pub decimals: u8,

    /// Unit appended to the number, e.g. `M` or `%`
    pub suffix: String,
}

impl ValueFormat {
    /// Format string in the `{point.y:.1f}M` style understood by chart backends.
    pub fn format_string(&self) -> String {
        format!("{{point.y:.{}f}}{}", self.decimals, self.suffix)
    }
}

/// Complete chart configuration handed to the render collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub title: String,

    /// Measured container width in pixels
    pub width: u32,

    /// Fixed chart height in pixels
    pub height: u32,

    pub data: ChartSeries,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    pub data_labels_enabled: bool,
    pub value_format: ValueFormat,
}

/// Display mode picked by the host's chart-variant selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartVariant {
    #[default]
    Charts,
    Table,
}

impl std::fmt::Display for ChartVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartVariant::Charts => write!(f, "charts"),
            ChartVariant::Table => write!(f, "table"),
        }
    }
}

impl std::str::FromStr for ChartVariant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "charts" | "chart" => Ok(ChartVariant::Charts),
            "table" | "tables" => Ok(ChartVariant::Table),
            other => Err(CoreError::ValidationError(format!(
                "Unknown chart variant '{other}'"
            ))),
        }
    }
}
