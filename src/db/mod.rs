// Database access
// A thin wrapper over the sqlx MySQL client: one pooled connection, one
// query, all rows fetched eagerly. The two failure points map to the two
// externally visible error classes: failing to get a connection, and
// failing to run the query.

use crate::config::ConnectionParams;
use crate::error::ReportError;
use crate::query::SummaryQuery;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use tracing::debug;

/// One row of the result table.
/// Both fields are nullable; a NULL cell is simply missing from the
/// statistics, it does not fail the run.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct BusinessRow {
    pub review_count: Option<i64>,
    pub stars: Option<f64>,
}

/// Open the database connection described by the parameters.
///
/// The pool is capped at a single connection: the reporter runs one query
/// and exits, there is nothing to parallelize.
pub async fn connect(params: &ConnectionParams) -> Result<MySqlPool, ReportError> {
    let options = MySqlConnectOptions::new()
        .host(&params.host)
        .port(params.port)
        .username(&params.user)
        .password(&params.password)
        .database(&params.database);

    debug!(
        "connecting to mysql at {}:{} as {}",
        params.host, params.port, params.user
    );

    MySqlPoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(|e| ReportError::Connection(e.to_string()))
}

/// Execute the query and fetch the whole result table into memory.
pub async fn fetch_rows(
    pool: &MySqlPool,
    query: &SummaryQuery,
) -> Result<Vec<BusinessRow>, ReportError> {
    let rows = sqlx::query_as::<_, BusinessRow>(query.sql())
        .fetch_all(pool)
        .await
        .map_err(|e| ReportError::Query(e.to_string()))?;

    debug!("fetched {} rows", rows.len());
    Ok(rows)
}
