//! Error taxonomy for marketplace operations.

/// Terminal failure categories surfaced by the search and download clients.
///
/// Wrapped into `anyhow::Error` at the point of failure so callers can
/// downcast to the category while the CLI prints a single readable message.
#[derive(Debug)]
pub enum ClientError {
    /// Transport failure or non-success HTTP status on either endpoint.
    Network(String),
    /// Unexpected or missing JSON shape in the search response.
    Parsing(String),
    /// Required fields missing when building a download target.
    Precondition(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Network(msg) => {
                write!(f, "Network error: {}", msg)
            }
            ClientError::Parsing(msg) => {
                write!(f, "Unexpected marketplace response: {}", msg)
            }
            ClientError::Precondition(msg) => {
                write!(f, "Incomplete extension record: {}", msg)
            }
        }
    }
}

impl std::error::Error for ClientError {}
