// Error types for the summary reporter
// Every failure class terminates the process: nothing here is recovered,
// the message just has to say what went wrong and at which stage.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    /// A required environment variable is missing or unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The database could not be reached or rejected the credentials.
    #[error("connection error: {0}")]
    Connection(String),

    /// The query was rejected, either locally during validation or by
    /// the server (bad SQL, missing table or column).
    #[error("query error: {0}")]
    Query(String),

    /// The result contained data the reporter cannot format.
    #[error("formatting error: {0}")]
    Formatting(String),
}
