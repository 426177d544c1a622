use tracing::warn;

use crate::models::record::{FieldValue, SummaryField, SummaryRecord};
use crate::models::summary::{AggregatedSummary, Diagnostic, FiscalYear};

/// Reduces a summary batch into period totals and percentage variance.
///
/// Absent numeric fields contribute zero. Malformed ones also contribute
/// zero, and are reported as [`Diagnostic::MalformedNumericField`] so the
/// totals are never NaN.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate a batch.
    ///
    /// Returns `None` for an empty batch: there is no partial aggregate,
    /// and callers must not go on to build a chart.
    pub fn aggregate(&self, records: &[SummaryRecord]) -> Option<AggregatedSummary> {
        let first = records.first()?;

        let mut diagnostics = Vec::new();
        let fiscal_year = match first.report_date() {
            Some(date) => {
                let fy = FiscalYear::from_report_date(date);
                if fy.is_none() {
                    diagnostics.push(Diagnostic::UnparseableReportDate(date.to_string()));
                }
                fy
            }
            None => {
                diagnostics.push(Diagnostic::MissingReportDate);
                None
            }
        };

        // [curr_qtr, prev_qtr, curr_ytd, prev_ytd, three_yr_avg]
        let mut totals = [0.0_f64; 5];
        for (index, record) in records.iter().enumerate() {
            for (slot, field) in SummaryField::ALL.iter().enumerate() {
                match record.value(*field) {
                    FieldValue::Present(v) => totals[slot] += v,
                    FieldValue::Absent => {}
                    FieldValue::Malformed(raw) => {
                        diagnostics.push(Diagnostic::MalformedNumericField {
                            record: index,
                            field: *field,
                            raw,
                        });
                    }
                }
            }
        }

        for diagnostic in &diagnostics {
            warn!(%diagnostic, "summary data quality");
        }

        let [curr_qtr_total, prev_qtr_total, curr_ytd_total, prev_ytd_total, three_yr_avg_total] =
            totals;

        Some(AggregatedSummary {
            curr_qtr_total,
            prev_qtr_total,
            curr_ytd_total,
            prev_ytd_total,
            three_yr_avg_total,
            qtr_variance_pct: variance_pct(curr_qtr_total, prev_qtr_total),
            ytd_variance_pct: variance_pct(curr_ytd_total, prev_ytd_total),
            fiscal_year,
            diagnostics,
        })
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Percentage change from `previous` to `current`, rounded to one decimal.
///
/// Exactly `0.0` when `previous` is zero.
pub fn variance_pct(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    round_one_decimal((current - previous) / previous * 100.0)
}

/// Round half away from zero to one decimal place. Never returns `-0.0`.
pub fn round_one_decimal(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_denominator_is_zero() {
        assert_eq!(variance_pct(123.0, 0.0), 0.0);
        assert_eq!(variance_pct(0.0, 0.0), 0.0);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_one_decimal(12.25), 12.3);
        assert_eq!(round_one_decimal(-12.25), -12.3);
        assert_eq!(round_one_decimal(0.04), 0.0);
    }

    #[test]
    fn negative_zero_is_normalized() {
        assert!(round_one_decimal(-0.01).is_sign_positive());
    }

    #[test]
    fn decline_is_negative() {
        assert_eq!(variance_pct(50.0, 200.0), -75.0);
    }
}
