/// Errors surfaced to the presentation layer.
///
/// Every variant's `Display` is a single human-readable message suitable for
/// showing as-is.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The requested project does not exist.
    #[error("Project not found")]
    NotFound,

    /// A read request failed (non-success status or transport error).
    #[error("{0}")]
    FetchFailed(String),

    /// A mutation was refused by the server.
    ///
    /// `message` is the server's `error` field, or a generic fallback when the
    /// response carried none.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The configured base URL cannot carry a project path.
    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
}
