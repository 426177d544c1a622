use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::record::SummaryField;

/// Period totals and variance derived from one fetched batch.
///
/// Recomputed from scratch on every fetch; never cached across fetch cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedSummary {
    /// Sum of `curr_fyqtr_value` over all records
    pub curr_qtr_total: f64,

    /// Sum of `prev_fyqtr_value` over all records
    pub prev_qtr_total: f64,

    /// Sum of `curr_fyytd_value` over all records
    pub curr_ytd_total: f64,

    /// Sum of `prev_fyytd_value` over all records
    pub prev_ytd_total: f64,

    /// Sum of `prev_three_fy_avg_value` over all records
    pub three_yr_avg_total: f64,

    /// Quarter-over-quarter change in percent, one decimal. 0 when the prior total is 0.
    pub qtr_variance_pct: f64,

    /// Year-to-date change in percent, one decimal. 0 when the prior total is 0.
    pub ytd_variance_pct: f64,

    /// Fiscal year of the first record's report date, if it had a usable one.
    pub fiscal_year: Option<FiscalYear>,

    /// Non-fatal conditions met while aggregating, in record order.
    pub diagnostics: Vec<Diagnostic>,
}

impl AggregatedSummary {
    /// Two-digit fiscal-year suffix, e.g. `"25"` for a 2025 report date.
    pub fn fiscal_year_label(&self) -> Option<String> {
        self.fiscal_year.map(|fy| fy.suffix())
    }

    /// Current/previous/variance triple for the selected period.
    pub fn headline(&self, period: PeriodKind) -> Headline {
        match period {
            PeriodKind::Qtr => Headline {
                period,
                current: self.curr_qtr_total,
                previous: self.prev_qtr_total,
                variance_pct: self.qtr_variance_pct,
            },
            PeriodKind::Ytd => Headline {
                period,
                current: self.curr_ytd_total,
                previous: self.prev_ytd_total,
                variance_pct: self.ytd_variance_pct,
            },
        }
    }
}

/// A fiscal year, identified by its calendar year number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FiscalYear {
    pub year: i32,
}

impl FiscalYear {
    pub fn new(year: i32) -> Self {
        Self { year }
    }

    /// Derive the fiscal year from a report date.
    ///
    /// Accepts a full `YYYY-MM-DD` date or anything starting with a
    /// four-digit year followed by `-` (or nothing).
    pub fn from_report_date(date: &str) -> Option<Self> {
        let date = date.trim();
        if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            return Some(Self::new(parsed.year()));
        }
        let prefix = date.split('-').next()?;
        if prefix.len() != 4 || !prefix.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        prefix.parse().ok().map(Self::new)
    }

    /// Last two digits of the year, zero padded.
    pub fn suffix(&self) -> String {
        format!("{:02}", self.year.rem_euclid(100))
    }

    /// Display label, e.g. `FY25`.
    pub fn label(&self) -> String {
        format!("FY{}", self.suffix())
    }

    pub fn previous(&self) -> Self {
        Self::new(self.year - 1)
    }
}

impl std::fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A non-fatal data-quality finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// The first record has no report date; the fiscal year is left unset.
    MissingReportDate,

    /// The first record's report date has no recognizable year prefix.
    UnparseableReportDate(String),

    /// A numeric field could not be parsed and contributed zero.
    MalformedNumericField {
        record: usize,
        field: SummaryField,
        raw: String,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::MissingReportDate => write!(f, "report date is missing on the first record"),
            Diagnostic::UnparseableReportDate(date) => {
                write!(f, "report date '{date}' has no recognizable year")
            }
            Diagnostic::MalformedNumericField { record, field, raw } => {
                write!(f, "record {record}: {field} value '{raw}' is not numeric, counted as 0")
            }
        }
    }
}

/// Which period the headline figures describe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    #[default]
    Qtr,
    Ytd,
}

/// Headline figures shown above the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub period: PeriodKind,
    pub current: f64,
    pub previous: f64,
    pub variance_pct: f64,
}
