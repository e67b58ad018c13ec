use crate::schema::layout::SEED_SLOT_COUNT;
use crate::schema::model::{DataRow, Model, Table};
use tracing::debug;

/// Field name every seed data row must supply.
pub const ID_FIELD: &str = "id";

/// Rebuilds the seed data rows of every table from the per-field seed slots.
///
/// A slot only yields a row when it has a value for the `id` field; slots
/// are independent and need not be contiguous.
pub fn extract_data(model: &mut Model) {
    for table in model.tables_mut() {
        let rows: Vec<DataRow> = (1..=SEED_SLOT_COUNT)
            .filter_map(|slot| seed_row(table, slot))
            .collect();
        debug!(table = table.display_name(), rows = rows.len(), "extracted seed data");
        table.data_list = Some(rows);
    }
}

fn seed_row(table: &Table, slot: usize) -> Option<DataRow> {
    let row: DataRow = table
        .fields
        .iter()
        .filter_map(|field| {
            let name = field.name.as_ref()?;
            let value = field.data.get(&slot)?;
            Some((name.to_owned(), value.to_owned()))
        })
        .collect();
    row.contains_key(ID_FIELD).then_some(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::layout::*;
    use crate::schema::model::build_model;
    use crate::schema::record::RawRecord;
    use crate::schema::value::Value;

    fn column(name: &str, seeds: &[(usize, Value)]) -> RawRecord {
        let mut values = vec![
            (TABLE_NAME.to_owned(), Value::from("users")),
            (COLUMN_NAME.to_owned(), Value::from(name)),
        ];
        values.extend(seeds.iter().map(|(slot, value)| (seed_name(*slot), value.clone())));
        values.into_iter().collect()
    }

    #[test]
    fn rows_without_id_are_dropped() {
        let mut model = build_model(&[
            column("id", &[(1, Value::from(1i64))]),
            column("name", &[(1, Value::from("alice")), (2, Value::from("bob"))]),
        ]);
        extract_data(&mut model);

        let rows = model.table("users").unwrap().data_list.as_ref().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("id"), Some(&Value::from(1i64)));
        assert_eq!(rows[0].get("name"), Some(&Value::from("alice")));
    }

    #[test]
    fn slots_need_not_be_contiguous() {
        let mut model = build_model(&[
            column("id", &[(2, Value::from(2i64)), (10, Value::from(10i64))]),
            column("name", &[(10, Value::from("last"))]),
        ]);
        extract_data(&mut model);

        let rows = model.table("users").unwrap().data_list.as_ref().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[1].get("name"), Some(&Value::from("last")));
    }

    #[test]
    fn rows_follow_field_order() {
        let mut model = build_model(&[
            column("code", &[(1, Value::from("A"))]),
            column("id", &[(1, Value::from(1i64))]),
        ]);
        extract_data(&mut model);

        let rows = model.table("users").unwrap().data_list.as_ref().unwrap();
        let keys: Vec<_> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["code", "id"]);
    }

    #[test]
    fn tables_without_seed_values_get_empty_lists() {
        let mut model = build_model(&[column("id", &[])]);
        extract_data(&mut model);

        assert_eq!(model.table("users").unwrap().data_list, Some(Vec::new()));
    }
}
