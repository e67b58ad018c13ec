use crate::schema::layout::Layout;
use std::path::PathBuf;

/// Settings for one conversion run.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Workbook to read
    pub input: PathBuf,
    /// Sheet holding the table design
    pub sheet: String,
    /// Schema qualifying every table name
    pub schema: String,
    /// Extract seed rows and wrap the output in a transaction
    pub seed_data: bool,
    pub layout: Layout,
}

impl Config {
    pub fn new(input: impl Into<PathBuf>, sheet: &str, schema: &str) -> Self {
        Self {
            input: input.into(),
            sheet: sheet.to_owned(),
            schema: schema.to_owned(),
            seed_data: false,
            layout: Layout::standard(),
        }
    }

    pub fn with_seed_data(mut self, seed_data: bool) -> Self {
        self.seed_data = seed_data;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}
