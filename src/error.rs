use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

/// Coarse failure categories. The harvest loop consults these to decide,
/// per category, whether a failed item skips forward or ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Parse,
    Database,
    Other,
}

impl FailureKind {
    /// Label used on the single top-level error line of a failed run.
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::Network => "request error",
            FailureKind::Parse => "parse error",
            FailureKind::Database => "database error",
            FailureKind::Other => "unexpected error",
        }
    }
}

#[derive(Debug, ThisError)]
pub enum VaultError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document has no integer `id` field that fits an INTEGER column")]
    MissingId,

    #[error("database error: {0}")]
    Database(#[from] SqlxError),

    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),
}

impl VaultError {
    pub fn kind(&self) -> FailureKind {
        match self {
            VaultError::Http(_) => FailureKind::Network,
            VaultError::Json(_) | VaultError::MissingId => FailureKind::Parse,
            VaultError::Database(_) => FailureKind::Database,
            VaultError::UrlParse(_) | VaultError::Config(_) => FailureKind::Other,
        }
    }
}
