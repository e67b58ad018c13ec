//! # DDL Module
//!
//! Renders a resolved [`Model`] into SQL text. Each named table is handed to
//! a [`Renderer`] as a [`TableContext`]; the outputs are concatenated in
//! table order.
pub mod context;
pub mod postgres;

pub use context::TableContext;
pub use postgres::PostgresRenderer;

use crate::error::DdlError;
use crate::schema::model::Model;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Table has no name")]
    MissingTableName,

    #[error("Column #{position} of table '{table}' has no name")]
    MissingFieldName { table: String, position: usize },

    #[error("Column '{field}' of table '{table}' has no type")]
    MissingFieldType { table: String, field: String },
}

/// Turns one table context into SQL text.
pub trait Renderer {
    fn render(&self, context: &TableContext) -> Result<String, RenderError>;
}

/// Renders every named table of the model under `schema`.
///
/// Rows that named no table are skipped with a warning. With `seed_data`
/// the output is wrapped in a single transaction.
pub fn emit<R: Renderer + ?Sized>(
    model: &Model,
    schema: &str,
    renderer: &R,
    seed_data: bool,
) -> Result<String, DdlError> {
    let mut output = String::new();
    if seed_data {
        output.push_str("begin;\n");
    }

    let mut rendered = 0usize;
    for table in model.tables() {
        if table.name.is_none() {
            warn!(fields = table.fields.len(), "skipping rows without a table name");
            continue;
        }
        let context = TableContext::new(table, schema);
        output.push_str(&renderer.render(&context)?);
        debug!(table = table.display_name(), "rendered table");
        rendered += 1;
    }

    if seed_data {
        output.push_str("commit;\n");
    }
    info!(tables = rendered, schema, "emitted DDL");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::layout::{COLUMN_NAME, TABLE_NAME};
    use crate::schema::model::build_model;
    use crate::schema::record::RawRecord;
    use crate::schema::value::Value;

    /// Writes `schema.table;` per table, failing on a configured name.
    struct NameRenderer {
        fail_on: Option<&'static str>,
    }

    impl Renderer for NameRenderer {
        fn render(&self, context: &TableContext) -> Result<String, RenderError> {
            let name = context.table.name.as_deref().ok_or(RenderError::MissingTableName)?;
            if self.fail_on == Some(name) {
                return Err(RenderError::MissingFieldType {
                    table: name.to_owned(),
                    field: "broken".to_owned(),
                });
            }
            Ok(format!("{}.{name};\n", context.schema))
        }
    }

    fn model(tables: &[Option<&str>]) -> Model {
        let records: Vec<RawRecord> = tables
            .iter()
            .map(|table| {
                let mut values = vec![(COLUMN_NAME, Value::from("id"))];
                if let Some(table) = table {
                    values.push((TABLE_NAME, Value::from(*table)));
                }
                values.into_iter().collect()
            })
            .collect();
        build_model(&records)
    }

    #[test]
    fn tables_render_in_order() {
        let renderer = NameRenderer { fail_on: None };
        let output = emit(&model(&[Some("users"), Some("posts")]), "app", &renderer, false).unwrap();
        assert_eq!(output, "app.users;\napp.posts;\n");
    }

    #[test]
    fn unnamed_group_is_skipped() {
        let renderer = NameRenderer { fail_on: None };
        let output = emit(&model(&[None, Some("users"), None]), "app", &renderer, false).unwrap();
        assert_eq!(output, "app.users;\n");
    }

    #[test]
    fn seed_data_wraps_in_transaction() {
        let renderer = NameRenderer { fail_on: None };
        let output = emit(&model(&[Some("users")]), "app", &renderer, true).unwrap();
        assert_eq!(output, "begin;\napp.users;\ncommit;\n");

        let empty = emit(&Model::default(), "app", &renderer, true).unwrap();
        assert_eq!(empty, "begin;\ncommit;\n");
    }

    #[test]
    fn render_error_aborts() {
        let renderer = NameRenderer { fail_on: Some("posts") };
        let error = emit(&model(&[Some("users"), Some("posts")]), "app", &renderer, false).unwrap_err();
        assert_eq!(error.to_string(), "Column 'broken' of table 'posts' has no type");
        assert!(matches!(error, DdlError::RenderError(RenderError::MissingFieldType { .. })));
    }
}
