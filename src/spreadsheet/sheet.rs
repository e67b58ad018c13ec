use crate::schema::value::Value;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::Extent;
use crate::spreadsheet::Grid;
use std::collections::HashMap;

/// A worksheet read from a workbook, holding only its occupied cells.
#[derive(Debug)]
pub struct Sheet {
    /// Source file name
    pub file_name: String,
    /// Sheet name
    pub name: String,
    /// All cells in the sheet, in reading order
    cells: Vec<Cell>,
    /// Index mapping from (row, col) to cell vector position
    indexes: HashMap<(usize, usize), usize>,
    /// Actual data range (determined from cell data)
    row_lower_bound: Option<usize>,
    row_upper_bound: Option<usize>,
    col_lower_bound: Option<usize>,
    col_upper_bound: Option<usize>,
}

impl Sheet {
    pub(crate) fn new(file_name: &str, name: &str) -> Self {
        Self {
            file_name: file_name.to_owned(),
            name: name.to_owned(),
            cells: Vec::new(),
            indexes: HashMap::new(),
            row_lower_bound: None,
            row_upper_bound: None,
            col_lower_bound: None,
            col_upper_bound: None,
        }
    }

    /// Returns true if the sheet contains no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Adds a cell, replacing any earlier cell at the same position.
    pub(crate) fn push(&mut self, cell: Cell) {
        self.update_bound(cell.row, cell.col);
        match self.indexes.get(&(cell.row, cell.col)) {
            Some(index) => self.cells[*index] = cell,
            None => {
                self.indexes.insert((cell.row, cell.col), self.cells.len());
                self.cells.push(cell);
            }
        }
    }

    /// Widens the data range to cover a cell position.
    fn update_bound(&mut self, row: usize, col: usize) {
        let lower = |bound: Option<usize>, value: usize| Some(bound.map_or(value, |bound| bound.min(value)));
        let upper = |bound: Option<usize>, value: usize| Some(bound.map_or(value, |bound| bound.max(value)));
        self.row_lower_bound = lower(self.row_lower_bound, row);
        self.row_upper_bound = upper(self.row_upper_bound, row);
        self.col_lower_bound = lower(self.col_lower_bound, col);
        self.col_upper_bound = upper(self.col_upper_bound, col);
    }

    /// Gets the cell at a position, if one exists.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.indexes
            .get(&(row, col))
            .and_then(|index| self.cells.get(*index))
    }
}

impl Grid for Sheet {
    fn extent(&self) -> Option<Extent> {
        Some(Extent {
            row_lower_bound: self.row_lower_bound?,
            row_upper_bound: self.row_upper_bound?,
            col_lower_bound: self.col_lower_bound?,
            col_upper_bound: self.col_upper_bound?,
        })
    }

    fn value(&self, row: usize, col: usize) -> Option<Value> {
        self.get(row, col).map(|cell| cell.value.clone())
    }
}
