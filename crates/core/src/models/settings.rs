use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::CoreError;

use super::record::SummaryField;
use super::summary::PeriodKind;

/// Per-variant widget configuration.
///
/// One engine serves every summary widget; what differs between variants
/// (request identity, category axis, which fields feed the chart, colors)
/// lives here. Every field has a default, so a config file only needs the
/// keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSettings {
    // ── Request identity ────────────────────────────────────────────
    #[serde(default = "default_widget_id")]
    pub widget_id: String,

    #[serde(default = "default_org_code")]
    pub org_code: String,

    #[serde(default = "default_module")]
    pub module: String,

    #[serde(default = "default_display_type")]
    pub display_type: String,

    // ── Chart data ──────────────────────────────────────────────────
    /// Ordered category axis. One record per category is expected.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    #[serde(default = "default_current_field")]
    pub current_series_field: SummaryField,

    #[serde(default = "default_prior_field")]
    pub prior_series_field: SummaryField,

    #[serde(default)]
    pub headline_period: PeriodKind,

    // ── Chart presentation ──────────────────────────────────────────
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_chart_height")]
    pub chart_height: u32,

    /// Width used until the host reports a container measurement.
    #[serde(default = "default_width")]
    pub default_width: u32,

    #[serde(default = "default_current_color")]
    pub current_color: String,

    #[serde(default = "default_prior_color")]
    pub prior_color: String,

    #[serde(default = "default_bar_width")]
    pub bar_width: u32,

    #[serde(default = "default_border_radius")]
    pub border_radius: u32,

    /// Unit appended to tooltip and data-label values.
    #[serde(default = "default_value_suffix")]
    pub value_suffix: String,

    #[serde(default = "default_true")]
    pub show_x_axis: bool,

    #[serde(default)]
    pub show_y_axis: bool,

    #[serde(default)]
    pub x_axis_title: Option<String>,

    #[serde(default)]
    pub y_axis_title: Option<String>,

    #[serde(default = "default_true")]
    pub data_labels: bool,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            widget_id: default_widget_id(),
            org_code: default_org_code(),
            module: default_module(),
            display_type: default_display_type(),
            categories: default_categories(),
            current_series_field: default_current_field(),
            prior_series_field: default_prior_field(),
            headline_period: PeriodKind::default(),
            title: default_title(),
            chart_height: default_chart_height(),
            default_width: default_width(),
            current_color: default_current_color(),
            prior_color: default_prior_color(),
            bar_width: default_bar_width(),
            border_radius: default_border_radius(),
            value_suffix: default_value_suffix(),
            show_x_axis: true,
            show_y_axis: false,
            x_axis_title: None,
            y_axis_title: None,
            data_labels: true,
        }
    }
}

fn default_widget_id() -> String {
    "THM_12%".to_string()
}

fn default_org_code() -> String {
    "WB".to_string()
}

fn default_module() -> String {
    "thema5c".to_string()
}

fn default_display_type() -> String {
    "widget".to_string()
}

fn default_categories() -> Vec<String> {
    ["Pillar I", "Pillar II", "Pillar III", "Pillar IV", "Pillar V"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_current_field() -> SummaryField {
    SummaryField::CurrFyYtd
}

fn default_prior_field() -> SummaryField {
    SummaryField::PrevFyYtd
}

fn default_title() -> String {
    "Portfolio Management".to_string()
}

fn default_chart_height() -> u32 {
    300
}

fn default_width() -> u32 {
    400
}

fn default_current_color() -> String {
    "#0071bc".to_string()
}

fn default_prior_color() -> String {
    "#9ecae1".to_string()
}

fn default_bar_width() -> u32 {
    12
}

fn default_border_radius() -> u32 {
    3
}

fn default_value_suffix() -> String {
    "M".to_string()
}

fn default_true() -> bool {
    true
}

impl WidgetSettings {
    /// Parse settings from JSON text and validate them.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| CoreError::Config(format!("Failed to parse JSON settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from TOML text and validate them.
    pub fn from_toml_str(text: &str) -> Result<Self, CoreError> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a `.json` or `.toml` file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            other => Err(CoreError::Config(format!(
                "Unsupported settings file extension: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }

    /// Reject configurations the pipeline cannot render.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.categories.is_empty() {
            return Err(CoreError::Config("categories must not be empty".into()));
        }
        if self.categories.iter().any(|c| c.trim().is_empty()) {
            return Err(CoreError::Config("category labels must not be blank".into()));
        }
        if self.chart_height == 0 {
            return Err(CoreError::Config("chart_height must be greater than 0".into()));
        }
        if self.current_series_field == self.prior_series_field {
            return Err(CoreError::Config(format!(
                "current and prior series both read {}",
                self.current_series_field
            )));
        }
        if self.widget_id.trim().is_empty() {
            return Err(CoreError::Config("widget_id must not be empty".into()));
        }
        Ok(())
    }
}
