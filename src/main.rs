use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use xlsx2ddl::Config;

#[derive(Parser)]
#[command(name = "xlsx2ddl")]
#[command(author, version, about = "Generate PostgreSQL DDL from a table design workbook", long_about = None)]
struct Cli {
    /// Workbook holding the table design (.xlsx, .xlsm or .xlam).
    input: PathBuf,

    /// Name of the design sheet.
    sheet: String,

    /// Schema that qualifies every table.
    schema: String,

    /// Emit seed data inserts inside a transaction.
    #[arg(long, env = "XLSX2DDL_SEED_DATA")]
    seed_data: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::new(cli.input, &cli.sheet, &cli.schema).with_seed_data(cli.seed_data);

    let sql = xlsx2ddl::run(&config)
        .with_context(|| format!("Failed to generate DDL from '{}'", config.input.display()))?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(sql.as_bytes()).context("Failed to write DDL")?;
    stdout.flush().context("Failed to write DDL")?;
    Ok(())
}
