//! # xlsx2ddl
//!
//! Generates PostgreSQL DDL from a table design kept in an Excel workbook.
//!
//! Each row of the design sheet (below the header row) describes one column
//! of one table: its name, type, precision, constraints, composite key
//! ordinals, comments and up to ten seed values. The pipeline runs in stages:
//!
//! - **Extract**: read the sheet into raw records ([`schema::record`])
//! - **Model**: group records into tables and fields ([`schema::model`])
//! - **Keys**: order unique-key and index members ([`schema::keys`])
//! - **Data**: rebuild seed rows, when enabled ([`schema::data`])
//! - **Emit**: render every named table through a [`ddl::Renderer`] ([`ddl`])
//!
//! Only `.xlsx`, `.xlsm` and `.xlam` workbooks are read.
pub mod config;
pub mod ddl;
pub mod error;
pub(crate) mod helpers;
pub mod schema;
pub mod spreadsheet;

pub use config::Config;
pub use ddl::{emit, PostgresRenderer, Renderer, TableContext};
pub use error::{DdlError, ResultMessage};

use crate::schema::data::extract_data;
use crate::schema::keys::resolve_keys;
use crate::schema::layout::Layout;
use crate::schema::model::{build_model, Model};
use crate::schema::record::extract_records;
use crate::spreadsheet::{open_spreadsheet, Grid};
use tracing::debug;

/// Runs every model stage over a grid: records, tables, keys and, with
/// `seed_data`, seed rows.
pub fn model_from_grid<G: Grid + ?Sized>(grid: &G, layout: &Layout, seed_data: bool) -> Result<Model, DdlError> {
    let records = extract_records(grid, layout);
    debug!(records = records.len(), "extracted records");
    let mut model = build_model(&records);
    resolve_keys(&mut model)?;
    if seed_data {
        extract_data(&mut model);
    }
    Ok(model)
}

/// Builds the model from a grid and renders it.
pub fn generate<G, R>(grid: &G, config: &Config, renderer: &R) -> Result<String, DdlError>
where
    G: Grid + ?Sized,
    R: Renderer + ?Sized,
{
    let model = model_from_grid(grid, &config.layout, config.seed_data)?;
    emit(&model, &config.schema, renderer, config.seed_data)
}

/// Reads the configured sheet and renders it as PostgreSQL DDL.
pub fn run(config: &Config) -> Result<String, DdlError> {
    let input = config.input.to_string_lossy().to_string();
    let mut spreadsheet = open_spreadsheet(&config.input).with_prefix(&format!("Open '{input}'"))?;
    let sheet = spreadsheet
        .read_sheet(&config.sheet)
        .with_prefix(&format!("Read sheet '{}'", config.sheet))?;
    debug!(file = %input, sheet = %config.sheet, cells = sheet.len(), "loaded sheet");
    generate(&sheet, config, &PostgresRenderer::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::value::Value;

    /// Standard layout row: table label, table name, column name, type,
    /// precision, PK flag and uk1 ordinal.
    fn row(table: &str, column: &str, kind: &str, precision: &str, pk: &str, uk1: &str) -> Vec<Option<Value>> {
        let text = |value: &str| (!value.is_empty()).then(|| Value::from(value));
        let mut cells = vec![None; 17];
        cells[0] = text("Users");
        cells[4] = text(table);
        cells[5] = text(column);
        cells[6] = text(kind);
        cells[7] = text(precision);
        cells[9] = text(pk);
        cells[11] = text(uk1);
        cells
    }

    fn header() -> Vec<Option<Value>> {
        vec![Some(Value::from("header")); 17]
    }

    #[test]
    fn users_table_end_to_end() {
        let grid = vec![
            header(),
            row("users", "id", "integer", "", "1", ""),
            row("users", "name", "varchar", "255", "", "1"),
        ];
        let config = Config::new("design.xlsx", "Sheet1", "app");

        let model = model_from_grid(&grid, &config.layout, false).unwrap();
        let users = model.table("users").unwrap();
        assert_eq!(users.fields.len(), 2);
        assert_eq!(users.fields[1].db_type.as_deref(), Some("varchar(255)"));
        let uk1: Vec<_> = users
            .members(schema::KeySlot::Uk1)
            .unwrap()
            .into_iter()
            .map(|field| field.and_then(|field| field.name.as_deref()))
            .collect();
        assert_eq!(uk1, vec![Some("name")]);
        assert!(users.idx1.is_none());

        let sql = generate(&grid, &config, &PostgresRenderer::new()).unwrap();
        assert!(sql.starts_with("create table app.users (\n  id integer,\n  name varchar(255),\n"));
        assert!(sql.contains("  primary key (id),\n  constraint users_uk1 unique (name)\n);\n"));
        assert!(sql.contains("comment on table app.users is E'Users';\n"));
        assert!(!sql.contains("begin;"));
    }

    #[test]
    fn header_only_sheet_renders_nothing() {
        let grid = vec![header()];
        let config = Config::new("design.xlsx", "Sheet1", "app").with_seed_data(true);
        let sql = generate(&grid, &config, &PostgresRenderer::new()).unwrap();
        assert_eq!(sql, "begin;\ncommit;\n");
    }

    #[test]
    fn empty_table_name_is_not_rendered() {
        let mut cells = vec![None; 17];
        cells[4] = Some(Value::from(""));
        cells[5] = Some(Value::from("id"));
        cells[6] = Some(Value::from("integer"));
        let grid = vec![header(), cells];
        let config = Config::new("design.xlsx", "Sheet1", "app");
        let sql = generate(&grid, &config, &PostgresRenderer::new()).unwrap();
        assert_eq!(sql, "");
    }

    #[test]
    fn malformed_ordinal_stops_the_run() {
        let grid = vec![header(), row("users", "id", "integer", "", "", "first")];
        let config = Config::new("design.xlsx", "Sheet1", "app");
        let error = generate(&grid, &config, &PostgresRenderer::new()).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Malformed uk1 ordinal 'first' for column 'id' of table 'users'"
        );
    }

    #[test]
    fn missing_workbook_is_reported_with_path() {
        let config = Config::new("/nonexistent/design.xlsx", "Sheet1", "app");
        let error = run(&config).unwrap_err();
        assert!(error.to_string().starts_with("Open '/nonexistent/design.xlsx': "));
    }
}
