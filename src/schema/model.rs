//! Table and field model built from raw records.
use crate::schema::keys::{KeyMembers, KeySlot};
use crate::schema::layout::*;
use crate::schema::record::RawRecord;
use crate::schema::value::Value;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// One seed data row: field name to seed value, in field order.
pub type DataRow = IndexMap<String, Value>;

/// A column definition taken from one spreadsheet row.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Declared type token as authored
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<String>,
    /// Effective database type, see [`derive_db_type`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_type: Option<String>,
    pub precision: String,
    pub not_null: bool,
    pub primary_key: bool,
    /// Opaque reference token, never validated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uk1: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uk2: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uk3: Option<Value>,
    /// Empty text means "not indexed"
    pub idx1: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<String>,
    /// Seed values by 1-based slot
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<usize, Value>,
}

impl Field {
    pub fn from_record(record: &RawRecord) -> Self {
        let declared_type = record.text(COLUMN_TYPE);
        let precision = record.text(COLUMN_PRECISION).unwrap_or_default();
        let data = (1..=SEED_SLOT_COUNT)
            .filter_map(|slot| Some((slot, record.get(&seed_name(slot))?.clone())))
            .collect();
        Self {
            name: record.text(COLUMN_NAME),
            comment: join_comment(record.get(COLUMN_COMMENT), record.get(COLUMN_COMMENT_DETAIL)),
            db_type: derive_db_type(declared_type.as_deref(), &precision),
            declared_type,
            precision,
            not_null: record.get(COLUMN_NOT_NULL).is_some_and(Value::is_one),
            primary_key: record.get(COLUMN_PRIMARY_KEY).is_some_and(Value::is_one),
            foreign_key: record.text(COLUMN_FOREIGN_KEY),
            uk1: record.get(COLUMN_UNIQUE_KEY_1).cloned(),
            uk2: record.get(COLUMN_UNIQUE_KEY_2).cloned(),
            uk3: record.get(COLUMN_UNIQUE_KEY_3).cloned(),
            idx1: record.get(COLUMN_INDEX_1).cloned().unwrap_or_else(|| Value::from("")),
            default: record.text(COLUMN_DEFAULT),
            check: record.text(COLUMN_CHECK),
            data,
        }
    }

    /// Raw ordinal authored for a key slot.
    pub fn key_value(&self, slot: KeySlot) -> Option<&Value> {
        match slot {
            KeySlot::Uk1 => self.uk1.as_ref(),
            KeySlot::Uk2 => self.uk2.as_ref(),
            KeySlot::Uk3 => self.uk3.as_ref(),
            KeySlot::Idx1 => Some(&self.idx1),
        }
    }
}

/// A table and everything hanging off it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub name: Option<String>,
    pub comment: Option<String>,
    pub fields: Vec<Field>,
    pub uk1: Option<KeyMembers>,
    pub uk2: Option<KeyMembers>,
    pub uk3: Option<KeyMembers>,
    pub idx1: Option<KeyMembers>,
    pub data_list: Option<Vec<DataRow>>,
}

impl Table {
    pub fn new(name: Option<String>, comment: Option<String>) -> Self {
        Self {
            name,
            comment,
            ..Self::default()
        }
    }

    pub fn key(&self, slot: KeySlot) -> Option<&KeyMembers> {
        match slot {
            KeySlot::Uk1 => self.uk1.as_ref(),
            KeySlot::Uk2 => self.uk2.as_ref(),
            KeySlot::Uk3 => self.uk3.as_ref(),
            KeySlot::Idx1 => self.idx1.as_ref(),
        }
    }

    pub(crate) fn key_mut(&mut self, slot: KeySlot) -> &mut Option<KeyMembers> {
        match slot {
            KeySlot::Uk1 => &mut self.uk1,
            KeySlot::Uk2 => &mut self.uk2,
            KeySlot::Uk3 => &mut self.uk3,
            KeySlot::Idx1 => &mut self.idx1,
        }
    }

    /// Member fields of a key slot in ordinal order; `None` marks a hole.
    pub fn members(&self, slot: KeySlot) -> Option<Vec<Option<&Field>>> {
        self.key(slot).map(|members| {
            members
                .iter()
                .map(|index| index.and_then(|index| self.fields.get(index)))
                .collect()
        })
    }

    /// Human-readable name for messages.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// Tables keyed by name, in the order the sheet first mentions them.
///
/// Rows without a table name are grouped under the `None` key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    tables: IndexMap<Option<String>, Table>,
}

impl Model {
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub(crate) fn tables_mut(&mut self) -> impl Iterator<Item = &mut Table> {
        self.tables.values_mut()
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(&Some(name.to_owned()))
    }

    /// The group collecting rows that named no table.
    pub fn unnamed(&self) -> Option<&Table> {
        self.tables.get(&None)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Groups raw records into tables and fields.
///
/// Table-level attributes come from the first record naming the table;
/// later records only contribute fields. An empty table name counts as none.
pub fn build_model(records: &[RawRecord]) -> Model {
    let mut model = Model::default();
    for record in records {
        let name = record.text(TABLE_NAME).filter(|name| !name.is_empty());
        let table = model.tables.entry(name.clone()).or_insert_with(|| {
            let comment = join_comment(record.get(TABLE_COMMENT), record.get(TABLE_COMMENT_DETAIL));
            Table::new(name, comment)
        });
        table.fields.push(Field::from_record(record));
    }
    debug!(tables = model.len(), records = records.len(), "built table model");
    model
}

/// `varchar` takes its precision; every other type passes through.
pub fn derive_db_type(declared_type: Option<&str>, precision: &str) -> Option<String> {
    match declared_type {
        Some("varchar") => Some(format!("varchar({precision})")),
        other => other.map(str::to_owned),
    }
}

/// Label, then the detail after a blank line when the detail is non-empty.
fn join_comment(label: Option<&Value>, detail: Option<&Value>) -> Option<String> {
    let detail = detail.map(Value::to_string).filter(|detail| !detail.is_empty());
    if label.is_none() && detail.is_none() {
        return None;
    }
    let mut comment = label.map(Value::to_string).unwrap_or_default();
    if let Some(detail) = detail {
        comment.push_str("\n\n");
        comment.push_str(&detail);
    }
    Some(comment)
}
