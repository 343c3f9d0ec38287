use std::fmt;

/// Failure to obtain a directory listing.
///
/// Every variant is handled the same way by the store (logged, tree left as
/// it was); the variants exist so the log line says what actually went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    /// Connection, DNS or body read failure
    Network(String),
    /// Server answered with a non-success status
    Status { status: u16, body: String },
    /// Body was not a valid listing
    Parse(String),
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsError::Network(msg) => write!(f, "Network error: {}", msg),
            FsError::Status { status, body } => write!(f, "HTTP {} error: {}", status, body),
            FsError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for FsError {}

impl From<reqwest::Error> for FsError {
    fn from(e: reqwest::Error) -> Self {
        FsError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for FsError {
    fn from(e: serde_json::Error) -> Self {
        FsError::Parse(e.to_string())
    }
}
