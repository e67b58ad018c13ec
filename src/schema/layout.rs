//! Column layout of the design sheet.
//!
//! A [`Layout`] maps each spreadsheet column position to the field name the
//! rest of the pipeline reads. Positions are never hard-coded elsewhere.

/// Localized table label
pub const TABLE_COMMENT: &str = "tableComment";
/// Optional localized table detail, appended to the label
pub const TABLE_COMMENT_DETAIL: &str = "tableCommentDetail";
/// Localized column label
pub const COLUMN_COMMENT: &str = "columnComment";
/// Optional localized column detail, appended to the label
pub const COLUMN_COMMENT_DETAIL: &str = "columnCommentDetail";
pub const TABLE_NAME: &str = "tableName";
pub const COLUMN_NAME: &str = "columnName";
pub const COLUMN_TYPE: &str = "columnType";
pub const COLUMN_PRECISION: &str = "columnPrecision";
pub const COLUMN_NOT_NULL: &str = "columnNN";
pub const COLUMN_PRIMARY_KEY: &str = "columnPK";
pub const COLUMN_FOREIGN_KEY: &str = "columnFK";
pub const COLUMN_UNIQUE_KEY_1: &str = "columnUK1";
pub const COLUMN_UNIQUE_KEY_2: &str = "columnUK2";
pub const COLUMN_UNIQUE_KEY_3: &str = "columnUK3";
pub const COLUMN_INDEX_1: &str = "columnIdx1";
pub const COLUMN_DEFAULT: &str = "columnDefault";
pub const COLUMN_CHECK: &str = "columnCheck";

/// Number of seed value columns carried per field (`data1` to `data10`).
pub const SEED_SLOT_COUNT: usize = 10;

/// Field name of the seed value column for a 1-based slot.
pub fn seed_name(slot: usize) -> String {
    format!("data{slot}")
}

/// Ordered list of field names, one per spreadsheet column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    names: Vec<String>,
}

impl Layout {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The design sheet layout: metadata columns followed by the seed value slots.
    pub fn standard() -> Self {
        let metadata = [
            TABLE_COMMENT,
            TABLE_COMMENT_DETAIL,
            COLUMN_COMMENT,
            COLUMN_COMMENT_DETAIL,
            TABLE_NAME,
            COLUMN_NAME,
            COLUMN_TYPE,
            COLUMN_PRECISION,
            COLUMN_NOT_NULL,
            COLUMN_PRIMARY_KEY,
            COLUMN_FOREIGN_KEY,
            COLUMN_UNIQUE_KEY_1,
            COLUMN_UNIQUE_KEY_2,
            COLUMN_UNIQUE_KEY_3,
            COLUMN_INDEX_1,
            COLUMN_DEFAULT,
            COLUMN_CHECK,
        ];
        let names = metadata
            .into_iter()
            .map(str::to_owned)
            .chain((1..=SEED_SLOT_COUNT).map(seed_name));
        Self::new(names)
    }

    /// Field name for a 0-based column position, if the layout covers it.
    pub fn name_at(&self, column: usize) -> Option<&str> {
        self.names.get(column).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::standard()
    }
}
