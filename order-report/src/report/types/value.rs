//! Cell value representation for the working order table

use chrono::NaiveDateTime;

/// Display format for calendar dates rendered as text (day/month/year)
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// A single cell of the working table
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing value (empty cell, unparseable date, absent field)
    Null,
    /// Free text
    Text(String),
    /// Whole number
    Int(i64),
    /// Decimal number
    Float(f64),
    /// Calendar date and time (no timezone)
    DateTime(NaiveDateTime),
}

impl Value {
    /// Check if this value is missing
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get as integer
    #[cfg(test)]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as datetime
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// True when this is text exactly equal to `expected`
    ///
    /// Missing values never match, so `!value.is_text("Completed")` holds for
    /// a missing status.
    pub fn is_text(&self, expected: &str) -> bool {
        matches!(self, Value::Text(s) if s == expected)
    }

    /// Label used when grouping by this value; `None` for missing values
    pub fn label(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Text(s) => Some(s.clone()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::DateTime(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }

    /// Key used for duplicate detection
    ///
    /// Unlike [`Value::label`], missing values produce a key of their own so
    /// two missing cells compare equal.
    pub fn dedup_key(&self) -> String {
        match self {
            Value::Null => "\u{0}null".to_string(),
            Value::Text(s) => format!("t:{}", s),
            Value::Int(i) => format!("n:{}", i),
            Value::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                    format!("n:{}", *f as i64)
                } else {
                    format!("n:{}", f)
                }
            }
            Value::DateTime(dt) => format!("d:{}", dt),
        }
    }

    /// Parse a raw text cell with best-effort numeric coercion
    pub fn from_cell(raw: &str) -> Self {
        let s = raw.trim();

        if s.is_empty() {
            return Value::Null;
        }

        if let Ok(i) = s.parse::<i64>() {
            return Value::Int(i);
        }

        // Reject things like "inf" or "NaN" that f64 accepts
        if s.bytes().any(|b| b.is_ascii_digit()) {
            if let Ok(f) = s.parse::<f64>() {
                if f.is_finite() {
                    return Value::Float(f);
                }
            }
        }

        Value::Text(raw.to_string())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}
