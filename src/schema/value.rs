use serde::Serialize;
use std::fmt::Display;

/// A single cell value as seen by the schema pipeline.
///
/// Cells are either text or numbers. An empty cell is never a `Value`; it is
/// represented by the absence of the entry altogether.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Number(f64),
}

impl Value {
    /// True for the text `"1"` or the number `1`.
    pub fn is_one(&self) -> bool {
        match self {
            Value::Text(text) => text == "1",
            Value::Number(number) => *number == 1.0,
        }
    }

    /// Non-empty text or a non-zero number.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Text(text) => !text.is_empty(),
            Value::Number(number) => *number != 0.0 && !number.is_nan(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            // Whole numbers print without a fractional part, as spreadsheets show them
            Value::Number(number) if number.fract() == 0.0 && number.abs() < 1e15 => {
                write!(f, "{}", *number as i64)
            }
            Value::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}
