//! Composite unique-key and index resolution.
//!
//! Every field may carry a 1-based ordinal for each key slot. The resolver
//! places the field at `ordinal - 1` in the slot's member list.
use crate::schema::model::{Model, Table};
use crate::schema::value::Value;
use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;
use tracing::{debug, warn};

/// Largest ordinal accepted in a key slot.
pub const MAX_ORDINAL: usize = 1024;

#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Malformed {slot} ordinal '{value}' for column '{field}' of table '{table}'")]
    MalformedOrdinal {
        table: String,
        field: String,
        slot: KeySlot,
        value: String,
    },

    #[error("{slot} ordinal {ordinal} for column '{field}' of table '{table}' exceeds {MAX_ORDINAL}")]
    OrdinalOutOfRange {
        table: String,
        field: String,
        slot: KeySlot,
        ordinal: usize,
    },
}

/// The composite key slots a field can take part in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeySlot {
    Uk1,
    Uk2,
    Uk3,
    Idx1,
}

impl KeySlot {
    pub const ALL: [KeySlot; 4] = [KeySlot::Uk1, KeySlot::Uk2, KeySlot::Uk3, KeySlot::Idx1];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Uk1 => "uk1",
            Self::Uk2 => "uk2",
            Self::Uk3 => "uk3",
            Self::Idx1 => "idx1",
        }
    }

    pub const fn is_unique(&self) -> bool {
        !matches!(self, Self::Idx1)
    }
}

impl Display for KeySlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Positions of member fields within their table, indexed by `ordinal - 1`.
/// `None` marks an ordinal no field claimed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyMembers(Vec<Option<usize>>);

impl KeyMembers {
    pub fn iter(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_holes(&self) -> bool {
        self.0.iter().any(Option::is_none)
    }
}

impl From<Vec<Option<usize>>> for KeyMembers {
    fn from(value: Vec<Option<usize>>) -> Self {
        Self(value)
    }
}

/// Attaches the member lists of every key slot to every table.
///
/// Slots no field belongs to are left unset. A malformed ordinal aborts the
/// whole resolution.
pub fn resolve_keys(model: &mut Model) -> Result<(), KeyError> {
    for table in model.tables_mut() {
        for slot in KeySlot::ALL {
            let members = resolve_slot(table, slot)?;
            if let Some(members) = &members {
                debug!(table = table.display_name(), %slot, members = members.len(), "resolved key");
            }
            *table.key_mut(slot) = members;
        }
    }
    Ok(())
}

fn resolve_slot(table: &Table, slot: KeySlot) -> Result<Option<KeyMembers>, KeyError> {
    let mut members: Vec<Option<usize>> = Vec::new();
    for (index, field) in table.fields.iter().enumerate() {
        let Some(value) = field.key_value(slot).filter(|value| value.is_truthy()) else {
            continue;
        };
        let field_name = || field.name.clone().unwrap_or_else(|| format!("#{}", index + 1));
        let ordinal = parse_ordinal(value).ok_or_else(|| KeyError::MalformedOrdinal {
            table: table.display_name().to_owned(),
            field: field_name(),
            slot,
            value: value.to_string(),
        })?;
        if ordinal == 0 {
            continue;
        }
        if ordinal > MAX_ORDINAL {
            Err(KeyError::OrdinalOutOfRange {
                table: table.display_name().to_owned(),
                field: field_name(),
                slot,
                ordinal,
            })?
        }

        let position = ordinal - 1;
        if members.len() <= position {
            members.resize(position + 1, None);
        }
        if let Some(previous) = members[position].replace(index) {
            warn!(
                table = table.display_name(),
                %slot,
                ordinal,
                replaced = table.fields[previous].name.as_deref().unwrap_or_default(),
                "duplicate key ordinal, later column wins"
            );
        }
    }

    if members.iter().any(Option::is_none) {
        warn!(table = table.display_name(), %slot, "key ordinals leave a gap");
    }
    Ok((!members.is_empty()).then(|| KeyMembers(members)))
}

/// Base-10, non-negative, whole ordinal.
fn parse_ordinal(value: &Value) -> Option<usize> {
    match value {
        Value::Number(number) if number.fract() == 0.0 && *number >= 0.0 => Some(*number as usize),
        Value::Number(_) => None,
        Value::Text(text) => text.trim().parse::<usize>().ok(),
    }
}
