use crate::error::DdlError;
use crate::schema::value::Value;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::SpreadsheetError;
use chrono::NaiveDate;
use chrono::TimeDelta;

/// Types of cell data in workbook files.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) enum CellType {
    #[default]
    Empty,
    /// Boolean values stored as 0/1
    Boolean,
    /// Numeric values
    Number,
    /// Date/time values stored as numbers from 1900 epoch
    NumberDateTime1900,
    /// Date values stored as numbers from 1900 epoch
    NumberDate1900,
    /// Time values stored as numbers from 1900 epoch
    NumberTime1900,
    /// Date/time values stored as numbers from 1904 epoch
    NumberDateTime1904,
    /// Date values stored as numbers from 1904 epoch
    NumberDate1904,
    /// Time values stored as numbers from 1904 epoch
    NumberTime1904,
    /// ISO 8601 date/time strings
    IsoDateTime,
    /// Inline string values
    InlineString,
    /// Shared string table references
    SharedString,
    /// Error values
    Error,
}

impl CellType {
    /// Parses built-in Excel number format IDs to determine cell type.
    pub(crate) fn parse_builtin_number_format_id(id: &str, is_1904: bool) -> Option<Self> {
        match id {
            "22" => Some(if is_1904 { Self::NumberDateTime1904 } else { Self::NumberDateTime1900 }),
            "14" | "15" | "16" | "17" => Some(if is_1904 { Self::NumberDate1904 } else { Self::NumberDate1900 }),
            "18" | "19" | "20" | "21" | "45" | "46" | "47" => Some(if is_1904 { Self::NumberTime1904 } else { Self::NumberTime1900 }),
            _ => None,
        }
    }

    /// Parses custom number format strings to determine cell type.
    /// Escaped characters, quoted literals and bracketed sections are ignored.
    pub(crate) fn parse_custom_number_format(format: &str, is_1904: bool) -> Self {
        let mut is_escaped = false;
        let mut is_literal = false;
        let mut is_date = false;
        let mut is_time = false;
        let mut is_color = false;
        for character in format.chars() {
            match character {
                _ if is_escaped => is_escaped = false,
                '_' | '\\' => is_escaped = true,

                '"' if is_literal => is_literal = false,
                '"' if !is_color => is_literal = true,

                ']' if is_color => is_color = false,
                '[' if !is_literal => is_color = true,
                _ if is_literal || is_color => (),

                'Y' | 'y' | 'D' | 'd' => is_date = true,
                'H' | 'h' | 'S' | 's' => is_time = true,
                _ => (),
            }
        }

        match (is_date, is_time, is_1904) {
            (true, true, false) => Self::NumberDateTime1900,
            (true, true, true) => Self::NumberDateTime1904,
            (true, false, false) => Self::NumberDate1900,
            (true, false, true) => Self::NumberDate1904,
            (false, true, false) => Self::NumberTime1900,
            (false, true, true) => Self::NumberTime1904,
            (false, false, _) => Self::Number,
        }
    }
}

/// A single occupied cell of a sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based)
    pub col: usize,
    pub value: Value,
}

impl Cell {
    /// Builds a cell from its raw XML text, converting by cell type.
    /// Shared strings must already be resolved to their text.
    pub(crate) fn parse(row: usize, col: usize, kind: CellType, raw: &str) -> Result<Cell, DdlError> {
        let value = match kind {
            CellType::Boolean => Value::Number(if raw == "1" { 1.0 } else { 0.0 }),
            CellType::Number => match raw.parse::<f64>() {
                Ok(number) => Value::Number(number),
                Err(_) => Value::Text(raw.to_owned()),
            },
            CellType::NumberDateTime1900 => Value::Text(to_datetime_string(raw, false)?),
            CellType::NumberDateTime1904 => Value::Text(to_datetime_string(raw, true)?),
            CellType::NumberDate1900 => Value::Text(to_date_string(raw, false)?),
            CellType::NumberDate1904 => Value::Text(to_date_string(raw, true)?),
            CellType::NumberTime1900 | CellType::NumberTime1904 => Value::Text(to_time_string(raw)?),
            CellType::IsoDateTime => Value::Text(raw.replace('T', " ")),
            CellType::Empty | CellType::InlineString | CellType::SharedString | CellType::Error => {
                Value::Text(raw.to_owned())
            }
        };
        Ok(Cell { row, col, value })
    }

    /// Returns the Excel-style cell reference (e.g., "A1", "B2").
    pub fn reference(&self) -> String {
        index_to_reference(self.row, self.col)
    }
}

/// Converts Excel numeric date to ISO date string.
/// Handles the Lotus 1-2-3 leap year bug for the 1900 epoch.
fn to_date_string(value: &str, is_1904: bool) -> Result<String, DdlError> {
    let days = value.parse::<f64>()?.trunc() as i64;
    let offset = if is_1904 {
        1462
    } else if days < 60 {
        1
    } else {
        0
    };
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30).expect("NaiveDate Literal");
    let date = days
        .checked_add(offset)
        .and_then(TimeDelta::try_days)
        .and_then(|duration| epoch.checked_add_signed(duration))
        .ok_or_else(|| SpreadsheetError::DateOutOfRange(value.to_owned()))?;
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Converts the fractional day of an Excel number to an ISO time string.
fn to_time_string(value: &str) -> Result<String, DdlError> {
    let factor = value.parse::<f64>()?.fract();
    let mut hours = (factor * 86_400_000f64).round() as i64;
    let milliseconds = hours % 1_000; hours /= 1_000;
    let seconds = hours % 60; hours /= 60;
    let minutes = hours % 60; hours /= 60;
    let timestamp = if milliseconds > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}.{milliseconds:03}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    };
    Ok(timestamp)
}

/// Converts Excel numeric datetime to ISO datetime string.
fn to_datetime_string(value: &str, is_1904: bool) -> Result<String, DdlError> {
    let date = to_date_string(value, is_1904)?;
    let time = to_time_string(value)?;
    Ok(format!("{date} {time}"))
}
