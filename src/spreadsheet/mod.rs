//! # Spreadsheet Module
//!
//! Reads a worksheet into a rectangular grid of cell values.
//! Only Office Open XML workbooks (`.xlsx`, `.xlsm`, `.xlam`) are supported.
pub(crate) mod cell;
pub(crate) mod excel;
pub mod reference;
pub mod sheet;
pub mod xlsx;

use crate::error::DdlError;
use crate::schema::value::Value;
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::xlsx::XlsxSpreadsheet;
use std::ffi::OsStr;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpreadsheetError {
    #[error("Cannot detect file format for '{0}'")]
    InvalidFileFormat(String),

    #[error("Spreadsheet '{0}' is password protected")]
    SpreadsheetPasswordProtectedError(String),

    #[error("Spreadsheet '{0}' contains no sheets")]
    SpreadsheetEmptyError(String),

    #[error("Missing '{0}' in the spreadsheet archive")]
    FileError(String),

    #[error("Sheet '{1}' not found in '{0}'")]
    SheetNotFound(String, String),

    #[error("Date serial '{0}' is out of range")]
    DateOutOfRange(String),

    #[error("Invalid cell value in '{0}' sheet '{1}' at {2}: {3}")]
    CellValueError(String, String, String, String),
}

/// Inclusive 0-based bounds of the occupied cells of a grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Extent {
    pub row_lower_bound: usize,
    pub row_upper_bound: usize,
    pub col_lower_bound: usize,
    pub col_upper_bound: usize,
}

/// A rectangular grid of cells addressed by absolute 0-based coordinates.
pub trait Grid {
    /// Bounds of the grid, `None` when it holds no cells.
    fn extent(&self) -> Option<Extent>;

    /// Value at a coordinate, `None` when no cell exists there.
    fn value(&self, row: usize, col: usize) -> Option<Value>;
}

/// In-memory grid, row-major. Missing trailing cells count as absent.
impl Grid for Vec<Vec<Option<Value>>> {
    fn extent(&self) -> Option<Extent> {
        let width = self.iter().map(Vec::len).max()?;
        if width == 0 {
            return None;
        }
        Some(Extent {
            row_lower_bound: 0,
            row_upper_bound: self.len() - 1,
            col_lower_bound: 0,
            col_upper_bound: width - 1,
        })
    }

    fn value(&self, row: usize, col: usize) -> Option<Value> {
        self.get(row)?.get(col)?.clone()
    }
}

/// A workbook that can produce sheets by name.
pub trait Spreadsheet {
    /// File name of the workbook
    fn name(&self) -> String;

    /// Sheet names in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Reads all cells of the named sheet
    fn read_sheet(&mut self, sheet_name: &str) -> Result<Sheet, DdlError>;
}

/// Opens a workbook, picking the reader from the file extension.
pub fn open_spreadsheet<P: AsRef<Path>>(path: P) -> Result<Box<dyn Spreadsheet>, DdlError> {
    let path = path.as_ref();
    match path.extension().and_then(OsStr::to_str).map(str::to_ascii_lowercase).as_deref() {
        Some("xlsx") | Some("xlsm") | Some("xlam") => Ok(Box::new(XlsxSpreadsheet::open(path)?)),
        _ => Err(SpreadsheetError::InvalidFileFormat(path.to_string_lossy().to_string()))?,
    }
}
