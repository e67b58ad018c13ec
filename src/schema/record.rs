use crate::schema::layout::Layout;
use crate::schema::value::Value;
use crate::spreadsheet::Grid;
use std::collections::HashMap;
use tracing::debug;

/// Flat mapping from field name to cell value for one data row.
///
/// A field whose cell is absent has no entry at all.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawRecord {
    values: HashMap<String, Value>,
}

impl RawRecord {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Value of a field rendered as text.
    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name).map(Value::to_string)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Value)> for RawRecord {
    fn from_iter<T: IntoIterator<Item = (S, Value)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(name, value)| (name.into(), value)).collect(),
        }
    }
}

/// Reads every row below the header into a [`RawRecord`].
///
/// Row index 0 is the header and is skipped. Cells map to field names by
/// column position; columns past the end of the layout are ignored.
pub fn extract_records<G: Grid + ?Sized>(grid: &G, layout: &Layout) -> Vec<RawRecord> {
    let Some(extent) = grid.extent() else {
        return Vec::new();
    };

    let records: Vec<RawRecord> = (extent.row_lower_bound..=extent.row_upper_bound)
        .filter(|row| *row != 0)
        .map(|row| {
            (extent.col_lower_bound..=extent.col_upper_bound)
                .filter_map(|col| {
                    let name = layout.name_at(col)?;
                    let value = grid.value(row, col)?;
                    Some((name, value))
                })
                .collect::<RawRecord>()
        })
        .collect();
    debug!(rows = records.len(), "extracted raw records");
    records
}
