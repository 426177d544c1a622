use serde_json::{json, Value};

use crate::errors::CoreError;
use crate::models::chart::{AxisConfig, ChartConfig};
use super::traits::{ChartRenderer, RenderedChart};

/// Produces a Highcharts options document for a grouped column chart.
///
/// The host passes the document straight to `Highcharts.chart(...)`.
#[derive(Debug, Default, Clone)]
pub struct HighchartsRenderer;

impl HighchartsRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn axis(axis: &AxisConfig) -> Value {
    json!({
        "visible": axis.visible,
        "title": { "text": axis.title },
    })
}

impl ChartRenderer for HighchartsRenderer {
    fn name(&self) -> &str {
        "Highcharts"
    }

    fn render(&self, config: &ChartConfig) -> Result<RenderedChart, CoreError> {
        let categories = &config.data.categories;
        if let Some(bad) = config
            .data
            .series
            .iter()
            .find(|s| s.values.len() != categories.len())
        {
            return Err(CoreError::Render(format!(
                "series '{}' has {} values for {} categories",
                bad.label,
                bad.values.len(),
                categories.len()
            )));
        }

        let format = config.value_format.format_string();
        let mut x_axis = axis(&config.x_axis);
        x_axis["categories"] = json!(categories);
        let series: Vec<Value> = config
            .data
            .series
            .iter()
            .map(|s| {
                json!({
                    "type": "column",
                    "name": s.label,
                    "data": s.values,
                    "color": s.color,
                    "pointWidth": s.style.bar_width,
                    "borderRadius": s.style.border_radius,
                    "dataLabels": {
                        "enabled": config.data_labels_enabled,
                        "format": format,
                    },
                })
            })
            .collect();

        Ok(json!({
            "chart": {
                "type": "column",
                "width": config.width,
                "height": config.height,
            },
            "title": { "text": config.title },
            "credits": { "enabled": false },
            "legend": { "enabled": false },
            "xAxis": x_axis,
            "yAxis": axis(&config.y_axis),
            "tooltip": {
                "pointFormat": format!("{{series.name}}: <b>{format}</b>"),
            },
            "series": series,
        }))
    }
}
