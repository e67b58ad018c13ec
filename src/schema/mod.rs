//! # Schema Model
//!
//! Turns spreadsheet rows into a table model, one stage at a time:
//!
//! 1. [`record::extract_records`] reads raw records below the header row
//! 2. [`model::build_model`] groups them into tables and fields
//! 3. [`keys::resolve_keys`] orders unique-key and index members by ordinal
//! 4. [`data::extract_data`] rebuilds seed data rows, when enabled
pub mod data;
pub mod keys;
pub mod layout;
pub mod model;
pub mod record;
pub mod value;

pub use keys::KeySlot;
pub use layout::Layout;
pub use model::{DataRow, Field, Model, Table};
pub use record::RawRecord;
pub use value::Value;
