/// Rejected calls. The aggregate state is left untouched whenever one of these is returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("Resource key must not be blank")]
    BlankResourceKey,
    #[error("Page size must be greater than zero")]
    ZeroPageSize,
    #[error("Page size changed from {locked} to {requested} without a reset")]
    PageSizeChanged { locked: usize, requested: usize },
    #[error("No query is set, call `reset` first")]
    NoQuery,
}

/// Failure of a single page request against the upstream provider.
#[derive(thiserror::Error, Debug)]
pub enum PageFetchError {
    #[error("Request to upstream failed: {0}")]
    Transport(String),
    #[error("Upstream responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Malformed upstream response: {0}")]
    MalformedBody(String),
}

impl PageFetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PageFetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::MalformedBody(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PageFetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedBody(err.to_string())
    }
}
