use thiserror::Error;

/// Errors surfaced to callers. The engine itself is total (malformed
/// catalog or playlist fragments degrade to dropped records or fallback
/// identifiers), so only configuration handling is fallible.
#[derive(Debug, Error)]
pub enum DenpaError {
    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
