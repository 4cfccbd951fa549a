// Main entry point for the DbDescribe CLI
// Reads the connection parameters from the environment, runs one read
// query, and prints the descriptive-statistics summary on standard output.
// Diagnostics go to standard error so stdout carries nothing but the report.

use anyhow::Result;
use clap::{Parser as ClapParser, ValueEnum};
use dbdescribe::config::ConnectionParams;
use dbdescribe::query::{SummaryQuery, DEFAULT_TABLE};
use dbdescribe::{db, report};
use std::io::{self, Write};

/// DbDescribe - print column-wise descriptive statistics of the
/// review_count and stars columns of a MySQL table, as CSV
#[derive(ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Table to summarize
    #[arg(short, long, default_value = DEFAULT_TABLE)]
    table: String,

    /// Run a custom read query instead of the built-in one
    /// (must be a single SELECT; overrides --table)
    #[arg(short, long)]
    query: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    format: Format,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Diagnostics are opt-in via RUST_LOG and never touch stdout
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    // Fail on bad configuration before anything else happens
    let params = ConnectionParams::from_env()?;

    let query = match &args.query {
        Some(sql) => SummaryQuery::custom(sql)?,
        None => SummaryQuery::for_table(&args.table)?,
    };

    let pool = db::connect(&params).await?;
    let rows = db::fetch_rows(&pool, &query).await?;
    let summary = report::summarize(&rows)?;

    // Render only after the full computation succeeded - no partial output
    let rendered = match args.format {
        Format::Csv => summary.to_csv(),
        Format::Json => summary.to_json()?,
    };

    io::stdout().write_all(rendered.as_bytes())?;

    Ok(())
}
