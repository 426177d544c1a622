use serde::{Deserialize, Serialize};

use super::settings::WidgetSettings;

/// Parameters of one summary fetch, serialized exactly as the endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub widget_id: String,
    pub report_date: String,
    pub org_code: String,
    pub module: String,
    #[serde(rename = "displaytype")]
    pub display_type: String,
}

impl SummaryRequest {
    /// Build the request for a widget variant and the report date picked by the filter.
    pub fn for_widget(settings: &WidgetSettings, report_date: impl Into<String>) -> Self {
        Self {
            widget_id: settings.widget_id.clone(),
            report_date: report_date.into(),
            org_code: settings.org_code.clone(),
            module: settings.module.clone(),
            display_type: settings.display_type.clone(),
        }
    }
}
