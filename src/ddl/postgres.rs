//! PostgreSQL renderer.

use super::RenderError;
use super::Renderer;
use super::TableContext;
use crate::schema::keys::KeySlot;
use crate::schema::model::{DataRow, Field, Table};
use crate::schema::value::Value;

/// Renders a table as PostgreSQL `create table`, `create index`,
/// `comment on` and `insert` statements.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresRenderer;

impl PostgresRenderer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn column_definition(&self, table: &str, position: usize, field: &Field) -> Result<String, RenderError> {
        let name = field_name(table, position, field)?;
        let db_type = field.db_type.as_deref().ok_or_else(|| RenderError::MissingFieldType {
            table: table.to_owned(),
            field: name.to_owned(),
        })?;

        let mut sql = format!("{name} {db_type}");
        if field.not_null {
            sql.push_str(" not null");
        }
        if let Some(default) = &field.default {
            sql.push_str(&format!(" default {default}"));
        }
        if let Some(check) = &field.check {
            sql.push_str(&format!(" check ({check})"));
        }
        if let Some(foreign_key) = &field.foreign_key {
            sql.push_str(&format!(" references {foreign_key}"));
        }
        Ok(sql)
    }

    fn create_table(&self, qualified: &str, name: &str, table: &Table) -> Result<String, RenderError> {
        let mut clauses = table
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| self.column_definition(name, index + 1, field))
            .collect::<Result<Vec<_>, _>>()?;

        let primary_key: Vec<&str> = table
            .fields
            .iter()
            .filter(|field| field.primary_key)
            .filter_map(|field| field.name.as_deref())
            .collect();
        if !primary_key.is_empty() {
            clauses.push(format!("primary key ({})", primary_key.join(", ")));
        }

        for slot in KeySlot::ALL.into_iter().filter(KeySlot::is_unique) {
            if let Some(columns) = key_columns(table, slot) {
                clauses.push(format!("constraint {name}_{slot} unique ({columns})"));
            }
        }

        let body = clauses
            .iter()
            .map(|clause| format!("  {clause}"))
            .collect::<Vec<_>>()
            .join(",\n");
        Ok(format!("create table {qualified} (\n{body}\n);\n"))
    }

    fn comments(&self, qualified: &str, table: &Table) -> String {
        let mut sql = String::new();
        if let Some(comment) = &table.comment {
            sql.push_str(&format!("comment on table {qualified} is {};\n", escape_literal(comment)));
        }
        for field in &table.fields {
            if let Some((name, comment)) = field.name.as_ref().zip(field.comment.as_ref()) {
                sql.push_str(&format!(
                    "comment on column {qualified}.{name} is {};\n",
                    escape_literal(comment)
                ));
            }
        }
        sql
    }

    fn insert(&self, qualified: &str, row: &DataRow) -> String {
        let columns = row.keys().map(String::as_str).collect::<Vec<_>>().join(", ");
        let values = row.values().map(sql_value).collect::<Vec<_>>().join(", ");
        format!("insert into {qualified} ({columns}) values ({values});\n")
    }
}

impl Renderer for PostgresRenderer {
    fn render(&self, context: &TableContext) -> Result<String, RenderError> {
        let table = context.table;
        let name = table.name.as_deref().ok_or(RenderError::MissingTableName)?;
        let qualified = format!("{}.{name}", context.schema);

        let mut sql = self.create_table(&qualified, name, table)?;
        if let Some(columns) = key_columns(table, KeySlot::Idx1) {
            sql.push_str(&format!("create index {name}_idx1 on {qualified} ({columns});\n"));
        }
        sql.push_str(&self.comments(&qualified, table));
        for row in table.data_list.iter().flatten() {
            sql.push_str(&self.insert(&qualified, row));
        }
        sql.push('\n');
        Ok(sql)
    }
}

fn field_name<'f>(table: &str, position: usize, field: &'f Field) -> Result<&'f str, RenderError> {
    field.name.as_deref().ok_or_else(|| RenderError::MissingFieldName {
        table: table.to_owned(),
        position,
    })
}

/// Member column names of a key slot, holes left out.
fn key_columns(table: &Table, slot: KeySlot) -> Option<String> {
    let columns: Vec<&str> = table
        .members(slot)?
        .into_iter()
        .flatten()
        .filter_map(|field| field.name.as_deref())
        .collect();
    (!columns.is_empty()).then(|| columns.join(", "))
}

/// Escape string literal, `E'...'` form so line breaks survive.
fn escape_literal(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('\'', "''")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n");
    format!("E'{escaped}'")
}

fn sql_value(value: &Value) -> String {
    match value {
        Value::Number(_) => value.to_string(),
        Value::Text(text) => format!("'{}'", text.replace('\'', "''")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::keys::KeyMembers;

    fn field(name: &str, db_type: &str) -> Field {
        Field {
            name: Some(name.to_owned()),
            comment: None,
            declared_type: Some(db_type.to_owned()),
            db_type: Some(db_type.to_owned()),
            precision: String::new(),
            not_null: false,
            primary_key: false,
            foreign_key: None,
            uk1: None,
            uk2: None,
            uk3: None,
            idx1: Value::from(""),
            default: None,
            check: None,
            data: Default::default(),
        }
    }

    fn render(table: &Table) -> Result<String, RenderError> {
        PostgresRenderer::new().render(&TableContext::new(table, "app"))
    }

    #[test]
    fn create_table_with_keys_and_comments() {
        let mut id = field("id", "integer");
        id.not_null = true;
        id.primary_key = true;
        id.comment = Some("Identifier".to_owned());
        let mut name = field("name", "varchar(255)");
        name.default = Some("''".to_owned());
        let mut owner = field("owner_id", "integer");
        owner.foreign_key = Some("app.owners(id)".to_owned());
        owner.check = Some("owner_id > 0".to_owned());

        let mut table = Table::new(Some("users".to_owned()), Some("Users\n\nAll accounts".to_owned()));
        table.fields = vec![id, name, owner];
        table.uk1 = Some(KeyMembers::from(vec![Some(1), Some(2)]));
        table.idx1 = Some(KeyMembers::from(vec![Some(2)]));

        let expected = "\
create table app.users (
  id integer not null,
  name varchar(255) default '',
  owner_id integer check (owner_id > 0) references app.owners(id),
  primary key (id),
  constraint users_uk1 unique (name, owner_id)
);
create index users_idx1 on app.users (owner_id);
comment on table app.users is E'Users\\n\\nAll accounts';
comment on column app.users.id is E'Identifier';

";
        assert_eq!(render(&table).unwrap(), expected);
    }

    #[test]
    fn key_holes_are_skipped() {
        let mut table = Table::new(Some("t".to_owned()), None);
        table.fields = vec![field("a", "text"), field("b", "text")];
        table.uk2 = Some(KeyMembers::from(vec![Some(1), None, Some(0)]));
        table.uk3 = Some(KeyMembers::from(vec![None]));

        let sql = render(&table).unwrap();
        assert!(sql.contains("  constraint t_uk2 unique (b, a)\n"));
        assert!(!sql.contains("t_uk3"));
    }

    #[test]
    fn seed_rows_become_inserts() {
        let mut table = Table::new(Some("users".to_owned()), None);
        table.fields = vec![field("id", "integer"), field("name", "text")];
        let mut row = DataRow::new();
        row.insert("id".to_owned(), Value::from(1i64));
        row.insert("name".to_owned(), Value::from("O'Brien"));
        table.data_list = Some(vec![row]);

        let sql = render(&table).unwrap();
        assert!(sql.contains("insert into app.users (id, name) values (1, 'O''Brien');\n"));
    }

    #[test]
    fn literal_escaping() {
        assert_eq!(escape_literal("it's"), "E'it''s'");
        assert_eq!(escape_literal("a\\b"), "E'a\\\\b'");
        assert_eq!(escape_literal("one\r\ntwo\nthree"), "E'one\\ntwo\\nthree'");
        assert_eq!(sql_value(&Value::from(1.5)), "1.5");
    }

    #[test]
    fn missing_name_or_type_fails() {
        let mut unnamed = field("x", "text");
        unnamed.name = None;
        let mut table = Table::new(Some("t".to_owned()), None);
        table.fields = vec![field("a", "text"), unnamed];
        let error = render(&table).unwrap_err();
        assert_eq!(error.to_string(), "Column #2 of table 't' has no name");

        let mut untyped = field("b", "text");
        untyped.db_type = None;
        table.fields = vec![untyped];
        let error = render(&table).unwrap_err();
        assert_eq!(error.to_string(), "Column 'b' of table 't' has no type");

        let error = render(&Table::default()).unwrap_err();
        assert!(matches!(error, RenderError::MissingTableName));
    }
}
