use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the launcher.
/// Every module returns `Result<T, LauncherError>`; all variants are fatal.
#[derive(Debug, Error)]
pub enum LauncherError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Runtime version ─────────────────────────────────
    #[error("Could not determine version from java.version={0}")]
    UnparsableRuntimeVersion(String),

    #[error("Unsupported JRE version: {0}")]
    UnsupportedRuntimeVersion(String),

    // ── Support files ───────────────────────────────────
    #[error("The following files could not be located: {}", .0.join(", "))]
    MissingFiles(Vec<String>),

    #[error("Cannot build a file path from an empty set of files")]
    EmptyPathSet,

    // ── Self location ───────────────────────────────────
    #[error("The launcher archive was loaded from a directory and not from a jar file.")]
    LoadedFromDirectory,

    #[error(
        "The launcher archive has been loaded remotely via the {scheme} protocol. \
         Only loading from a jar on the local file system is supported."
    )]
    LoadedRemotely { scheme: String },

    #[error("Cannot make sense of the launcher archive location: {0:?}")]
    UnrecognizedLocation(String),

    // ── Configuration ───────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    // ── Java ────────────────────────────────────────────
    #[error("Java execution failed: {0}")]
    JavaExecution(String),
}

/// Convenience alias used throughout the crate.
pub type LauncherResult<T> = Result<T, LauncherError>;

impl From<std::io::Error> for LauncherError {
    fn from(source: std::io::Error) -> Self {
        LauncherError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}
