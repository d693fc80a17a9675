//! Error types emitted by the parks CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use parks_core::SqliteParkStoreError;
use parks_data::{ProjectionError, SourceError};
use thiserror::Error;

/// Errors emitted by the parks CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A source layer could not be read or parsed.
    #[error(transparent)]
    ReadSource(#[from] SourceError),
    /// The coordinate projector could not be constructed.
    #[error("failed to build coordinate projector: {0}")]
    BuildProjector(#[source] ProjectionError),
    /// Opening the park database failed.
    #[error("failed to open park database at {path:?}: {source}")]
    OpenStore {
        path: Utf8PathBuf,
        #[source]
        source: SqliteParkStoreError,
    },
    /// Removing existing parks before a reload failed.
    #[error("failed to clear park database at {path:?}: {source}")]
    ClearStore {
        path: Utf8PathBuf,
        #[source]
        source: SqliteParkStoreError,
    },
    /// Writing the run summary failed.
    #[error("failed to write load summary: {0}")]
    WriteSummary(#[source] std::io::Error),
}
