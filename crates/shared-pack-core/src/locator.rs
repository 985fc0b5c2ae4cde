use std::path::{Path, PathBuf};

use crate::config::{DestinationConfig, DESTINATION_ENV};
use crate::error::{Result, SharedPackError};
use crate::fs::FileSystem;

/// Finds the shared package root among an ordered list of candidates.
#[derive(Debug, Clone)]
pub struct DestinationLocator {
    candidates: Vec<PathBuf>,
    marker: String,
}

impl DestinationLocator {
    pub fn new(candidates: Vec<PathBuf>, marker: impl Into<String>) -> Self {
        Self {
            candidates,
            marker: marker.into(),
        }
    }

    /// Configured candidates followed by `SHARED_PACKAGE_PATH`, if set.
    pub fn from_config(project_root: &Path, config: &DestinationConfig) -> Self {
        let env_override = std::env::var(DESTINATION_ENV).ok();
        Self::with_override(project_root, config, env_override.as_deref())
    }

    pub fn with_override(
        project_root: &Path,
        config: &DestinationConfig,
        env_override: Option<&str>,
    ) -> Self {
        let mut candidates: Vec<PathBuf> = config
            .candidates
            .iter()
            .map(|c| resolve_candidate(project_root, c))
            .collect();

        if let Some(value) = env_override.map(str::trim).filter(|v| !v.is_empty()) {
            candidates.push(resolve_candidate(project_root, value));
        }

        Self::new(candidates, config.marker.clone())
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// First candidate that is a directory containing the marker file.
    pub fn resolve(&self, fs: &dyn FileSystem) -> Result<PathBuf> {
        for candidate in &self.candidates {
            if !fs.is_dir(candidate) {
                tracing::debug!(path = %candidate.display(), "destination candidate missing");
                continue;
            }
            if !fs.exists(&candidate.join(&self.marker)) {
                tracing::debug!(
                    path = %candidate.display(),
                    marker = %self.marker,
                    "destination candidate has no marker"
                );
                continue;
            }
            tracing::debug!(path = %candidate.display(), "destination resolved");
            return Ok(candidate.clone());
        }

        Err(SharedPackError::DestinationNotFound {
            candidates: self.candidates.clone(),
        })
    }
}

fn resolve_candidate(project_root: &Path, candidate: &str) -> PathBuf {
    if let Some(rest) = candidate.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    project_root.join(candidate)
}
