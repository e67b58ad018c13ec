//! The rendering context handed to a [`Renderer`](super::Renderer).
//!
//! Serializes as `{ "table": {...}, "schema": "..." }`, with key slots
//! expanded to the member field objects and `null` for unclaimed ordinals.
use crate::schema::keys::KeySlot;
use crate::schema::model::Table;
use serde::ser::SerializeStruct;
use serde::Serialize;
use serde::Serializer;

#[derive(Clone, Copy, Debug, Serialize)]
pub struct TableContext<'a> {
    #[serde(serialize_with = "serialize_table")]
    pub table: &'a Table,
    pub schema: &'a str,
}

impl<'a> TableContext<'a> {
    pub fn new(table: &'a Table, schema: &'a str) -> Self {
        Self { table, schema }
    }
}

fn serialize_table<S: Serializer>(table: &&Table, serializer: S) -> Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct("Table", 8)?;
    state.serialize_field("name", &table.name)?;
    state.serialize_field("comment", &table.comment)?;
    state.serialize_field("fields", &table.fields)?;
    for slot in KeySlot::ALL {
        match table.members(slot) {
            Some(members) => state.serialize_field(slot.as_str(), &members)?,
            None => state.skip_field(slot.as_str())?,
        }
    }
    match table.data_list.as_ref().filter(|rows| !rows.is_empty()) {
        Some(rows) => state.serialize_field("dataList", rows)?,
        None => state.skip_field("dataList")?,
    }
    state.end()
}
