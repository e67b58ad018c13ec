#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use xlsx2ddl::spreadsheet::reference::index_to_reference;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

// Column positions of the standard design layout
pub const TABLE_COMMENT: usize = 0;
pub const TABLE_COMMENT_DETAIL: usize = 1;
pub const COLUMN_COMMENT: usize = 2;
pub const COLUMN_COMMENT_DETAIL: usize = 3;
pub const TABLE_NAME: usize = 4;
pub const COLUMN_NAME: usize = 5;
pub const COLUMN_TYPE: usize = 6;
pub const COLUMN_PRECISION: usize = 7;
pub const COLUMN_NOT_NULL: usize = 8;
pub const COLUMN_PRIMARY_KEY: usize = 9;
pub const COLUMN_FOREIGN_KEY: usize = 10;
pub const COLUMN_UNIQUE_KEY_1: usize = 11;
pub const COLUMN_INDEX_1: usize = 14;
pub const COLUMN_DEFAULT: usize = 15;
pub const COLUMN_CHECK: usize = 16;
pub const DATA_1: usize = 17;

/// One sheet row given as (column, text) pairs; numeric text becomes a number cell.
pub type Row<'a> = &'a [(usize, &'a str)];

pub fn header() -> Vec<(usize, &'static str)> {
    (0..DATA_1 + 10).map(|col| (col, "header")).collect()
}

fn sheet_xml(rows: &[Row]) -> String {
    let mut xml = String::from("<worksheet><sheetData>");
    for (row, cells) in rows.iter().enumerate() {
        xml.push_str(&format!("<row r=\"{}\">", row + 1));
        for (col, text) in cells.iter() {
            let reference = index_to_reference(row, *col);
            if text.parse::<f64>().is_ok() {
                xml.push_str(&format!("<c r=\"{reference}\"><v>{text}</v></c>"));
            } else {
                let text = text.replace('&', "&amp;").replace('<', "&lt;");
                xml.push_str(&format!("<c r=\"{reference}\" t=\"inlineStr\"><is><t>{text}</t></is></c>"));
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Writes a single-sheet workbook into `dir` and returns its path.
pub fn write_workbook(dir: &Path, file_name: &str, sheet_name: &str, rows: &[Row]) -> PathBuf {
    let workbook = format!(
        r#"<workbook xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{sheet_name}" sheetId="1" r:id="rId1"/></sheets></workbook>"#
    );
    let relationships = r#"<Relationships><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;
    let entries = [
        ("xl/workbook.xml", workbook),
        ("xl/_rels/workbook.xml.rels", relationships.to_owned()),
        ("xl/worksheets/sheet1.xml", sheet_xml(rows)),
    ];

    let path = dir.join(file_name);
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, content) in entries {
        writer.start_file(name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
    path
}

/// Users and posts tables with keys, an index, a reference and seed values.
pub fn blog_design() -> Vec<Vec<(usize, &'static str)>> {
    vec![
        header(),
        vec![
            (TABLE_COMMENT, "Users"),
            (TABLE_COMMENT_DETAIL, "Registered accounts"),
            (COLUMN_COMMENT, "Identifier"),
            (TABLE_NAME, "users"),
            (COLUMN_NAME, "id"),
            (COLUMN_TYPE, "integer"),
            (COLUMN_NOT_NULL, "1"),
            (COLUMN_PRIMARY_KEY, "1"),
            (DATA_1, "1"),
            (DATA_1 + 1, "2"),
        ],
        vec![
            (TABLE_COMMENT, "Users"),
            (COLUMN_COMMENT, "Name"),
            (COLUMN_COMMENT_DETAIL, "Display name"),
            (TABLE_NAME, "users"),
            (COLUMN_NAME, "name"),
            (COLUMN_TYPE, "varchar"),
            (COLUMN_PRECISION, "255"),
            (COLUMN_NOT_NULL, "1"),
            (COLUMN_UNIQUE_KEY_1, "1"),
            (DATA_1, "alice"),
            (DATA_1 + 1, "bob"),
        ],
        vec![
            (TABLE_COMMENT, "Users"),
            (COLUMN_COMMENT, "Email"),
            (TABLE_NAME, "users"),
            (COLUMN_NAME, "email"),
            (COLUMN_TYPE, "varchar"),
            (COLUMN_PRECISION, "320"),
            (COLUMN_UNIQUE_KEY_1, "2"),
            (COLUMN_INDEX_1, "1"),
            (DATA_1, "alice@example.com"),
        ],
        vec![
            (TABLE_COMMENT, "Posts"),
            (COLUMN_COMMENT, "Identifier"),
            (TABLE_NAME, "posts"),
            (COLUMN_NAME, "id"),
            (COLUMN_TYPE, "bigint"),
            (COLUMN_NOT_NULL, "1"),
            (COLUMN_PRIMARY_KEY, "1"),
        ],
        vec![
            (TABLE_COMMENT, "Posts"),
            (COLUMN_COMMENT, "Author"),
            (TABLE_NAME, "posts"),
            (COLUMN_NAME, "user_id"),
            (COLUMN_TYPE, "integer"),
            (COLUMN_FOREIGN_KEY, "app.users(id)"),
            (COLUMN_INDEX_1, "1"),
        ],
    ]
}

pub fn as_rows<'a>(rows: &'a [Vec<(usize, &'a str)>]) -> Vec<Row<'a>> {
    rows.iter().map(Vec::as_slice).collect()
}
