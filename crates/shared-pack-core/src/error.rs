use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SharedPackError {
    #[error("Not a Git repository: {path}. Please run this command in a Git repository.")]
    NotARepository { path: PathBuf },

    #[error("Shared package path not found (tried: {}). Please check your setup.", display_candidates(.candidates))]
    DestinationNotFound { candidates: Vec<PathBuf> },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Path must be relative to the project root: {path}")]
    PathOutsideProject { path: String },

    #[error("Failed to move {path}: {source}")]
    MoveFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SharedPackError>;

impl SharedPackError {
    /// Process exit code when this error aborts the run.
    ///
    /// `MoveFailed` never reaches the top level; the executor reports it per file.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

fn display_candidates(candidates: &[PathBuf]) -> String {
    if candidates.is_empty() {
        return "no candidates".to_string();
    }
    candidates
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
