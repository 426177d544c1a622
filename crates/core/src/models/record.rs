use serde::{Deserialize, Serialize};

/// One row of the management summary batch returned by the fetch endpoint.
///
/// Numeric fields are kept as they arrived on the wire. The endpoint sends
/// numbers, numeric strings, empty strings or `null` interchangeably, so
/// interpretation is deferred to [`SummaryRecord::value`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Reporting date, `YYYY-MM-DD` or similar. Only the year prefix is used.
    #[serde(default)]
    pub report_date: Option<String>,

    #[serde(default, rename = "curr_fyqtr_value")]
    pub curr_fy_qtr_value: Option<RawAmount>,

    #[serde(default, rename = "prev_fyqtr_value")]
    pub prev_fy_qtr_value: Option<RawAmount>,

    #[serde(default, rename = "curr_fyytd_value")]
    pub curr_fy_ytd_value: Option<RawAmount>,

    #[serde(default, rename = "prev_fyytd_value")]
    pub prev_fy_ytd_value: Option<RawAmount>,

    #[serde(default)]
    pub prev_three_fy_avg_value: Option<RawAmount>,
}

/// A numeric field exactly as it was decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
    /// Booleans, arrays, objects: anything the endpoint should not send.
    Other(serde_json::Value),
}

impl From<f64> for RawAmount {
    fn from(v: f64) -> Self {
        RawAmount::Number(v)
    }
}

impl From<&str> for RawAmount {
    fn from(v: &str) -> Self {
        RawAmount::Text(v.to_string())
    }
}

/// Interpretation of a single numeric field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Present(f64),
    Absent,
    /// Carries the offending raw text for diagnostics.
    Malformed(String),
}

impl FieldValue {
    /// Contribution to a running total: malformed and absent both count as zero.
    pub fn or_zero(&self) -> f64 {
        match self {
            FieldValue::Present(v) => *v,
            FieldValue::Absent | FieldValue::Malformed(_) => 0.0,
        }
    }
}

impl RawAmount {
    pub fn interpret(&self) -> FieldValue {
        match self {
            RawAmount::Number(v) if v.is_finite() => FieldValue::Present(*v),
            RawAmount::Number(v) => FieldValue::Malformed(v.to_string()),
            RawAmount::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return FieldValue::Absent;
                }
                match trimmed.parse::<f64>() {
                    Ok(v) if v.is_finite() => FieldValue::Present(v),
                    _ => FieldValue::Malformed(s.clone()),
                }
            }
            RawAmount::Other(serde_json::Value::Bool(false)) => FieldValue::Absent,
            RawAmount::Other(v) => FieldValue::Malformed(v.to_string()),
        }
    }
}

/// The five numeric columns of a [`SummaryRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SummaryField {
    CurrFyQtr,
    PrevFyQtr,
    CurrFyYtd,
    PrevFyYtd,
    PrevThreeFyAvg,
}

impl SummaryField {
    pub const ALL: [SummaryField; 5] = [
        SummaryField::CurrFyQtr,
        SummaryField::PrevFyQtr,
        SummaryField::CurrFyYtd,
        SummaryField::PrevFyYtd,
        SummaryField::PrevThreeFyAvg,
    ];

    /// Wire name of the field.
    pub fn wire_name(&self) -> &'static str {
        match self {
            SummaryField::CurrFyQtr => "curr_fyqtr_value",
            SummaryField::PrevFyQtr => "prev_fyqtr_value",
            SummaryField::CurrFyYtd => "curr_fyytd_value",
            SummaryField::PrevFyYtd => "prev_fyytd_value",
            SummaryField::PrevThreeFyAvg => "prev_three_fy_avg_value",
        }
    }
}

impl std::fmt::Display for SummaryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl SummaryRecord {
    /// Raw wire value of a field, if one was sent.
    pub fn raw(&self, field: SummaryField) -> Option<&RawAmount> {
        match field {
            SummaryField::CurrFyQtr => self.curr_fy_qtr_value.as_ref(),
            SummaryField::PrevFyQtr => self.prev_fy_qtr_value.as_ref(),
            SummaryField::CurrFyYtd => self.curr_fy_ytd_value.as_ref(),
            SummaryField::PrevFyYtd => self.prev_fy_ytd_value.as_ref(),
            SummaryField::PrevThreeFyAvg => self.prev_three_fy_avg_value.as_ref(),
        }
    }

    pub fn value(&self, field: SummaryField) -> FieldValue {
        self.raw(field)
            .map(RawAmount::interpret)
            .unwrap_or(FieldValue::Absent)
    }

    /// Set a field. Used by hosts that build batches in memory and by tests.
    pub fn with(mut self, field: SummaryField, amount: impl Into<RawAmount>) -> Self {
        let slot = match field {
            SummaryField::CurrFyQtr => &mut self.curr_fy_qtr_value,
            SummaryField::PrevFyQtr => &mut self.prev_fy_qtr_value,
            SummaryField::CurrFyYtd => &mut self.curr_fy_ytd_value,
            SummaryField::PrevFyYtd => &mut self.prev_fy_ytd_value,
            SummaryField::PrevThreeFyAvg => &mut self.prev_three_fy_avg_value,
        };
        *slot = Some(amount.into());
        self
    }

    pub fn with_report_date(mut self, date: impl Into<String>) -> Self {
        self.report_date = Some(date.into());
        self
    }

    /// Report date, treating an empty string as missing.
    pub fn report_date(&self) -> Option<&str> {
        self.report_date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}
