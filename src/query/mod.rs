// Query construction and validation
// The reporter sends exactly one read query per run. Queries are parsed
// locally with the sqlparser crate before anything goes out on the wire,
// so a statement that is not a single SELECT never reaches the server.

use crate::error::ReportError;
use sqlparser::ast::Statement;
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;

/// The table the built-in query reads from.
pub const DEFAULT_TABLE: &str = "businesses";

/// A validated read query, ready to be executed.
#[derive(Debug, Clone)]
pub struct SummaryQuery {
    sql: String,
}

impl SummaryQuery {
    /// The built-in query: both numeric columns of one table.
    pub fn for_table(table: &str) -> Result<Self, ReportError> {
        // Validation doubles as a guard against table names that would
        // change the statement's shape once substituted.
        Self::custom(&format!("SELECT review_count, stars FROM {table}"))
    }

    /// Validate an arbitrary query string.
    /// Accepts exactly one SELECT statement; everything else is rejected
    /// before any network traffic happens. The result must still expose
    /// `review_count` and `stars` columns for the reporter to summarize.
    pub fn custom(sql: &str) -> Result<Self, ReportError> {
        let dialect = MySqlDialect {};
        let statements = Parser::parse_sql(&dialect, sql)
            .map_err(|e| ReportError::Query(format!("SQL parsing error: {e}")))?;

        if statements.len() != 1 {
            return Err(ReportError::Query(
                "only a single statement is supported".to_string(),
            ));
        }

        match &statements[0] {
            Statement::Query(_) => Ok(Self {
                sql: sql.to_string(),
            }),
            other => Err(ReportError::Query(format!(
                "only SELECT statements are supported, got: {other}"
            ))),
        }
    }

    /// The SQL text to send to the server.
    pub fn sql(&self) -> &str {
        &self.sql
    }
}
