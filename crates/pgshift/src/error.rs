use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors from the I/O edges around the engine. Comparing two snapshots
/// never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot {path}: {message}")]
    Snapshot { path: Utf8PathBuf, message: String },

    #[error("invalid config {path}: {message}")]
    Config { path: Utf8PathBuf, message: String },

    #[error("no .config/pgshift.json found in {start} or any parent directory")]
    ConfigNotFound { start: Utf8PathBuf },

    #[error("path is not valid UTF-8: {}", path.display())]
    NonUtf8Path { path: std::path::PathBuf },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
