//! Candidate selection
//!
//! Turns either one explicitly named file or the working tree's changed
//! paths into classified [`TrackedFile`]s, in discovery order.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use crate::category::{CategoryClassifier, UNKNOWN_CATEGORY};
use crate::config::DiscoveryConfig;
use crate::error::{Result, SharedPackError};
use crate::fs::FileSystem;
use crate::vcs::ChangeSource;

/// A file considered for relocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedFile {
    /// Project-root relative, forward-slash separated.
    pub relative_path: String,
    /// Category name, or `unknown`.
    pub category: String,
    /// `project_root/relative_path`
    pub source: PathBuf,
}

/// Candidates keyed by relative path, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    files: Vec<TrackedFile>,
    seen: HashSet<String>,
}

impl Candidates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file; a path that is already present is ignored.
    pub fn insert(&mut self, file: TrackedFile) -> bool {
        if !self.seen.insert(file.relative_path.clone()) {
            return false;
        }
        self.files.push(file);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Keep only files of `category`.
    pub fn retain_category(&mut self, category: &str) {
        self.files.retain(|f| f.category == category);
        self.seen = self.files.iter().map(|f| f.relative_path.clone()).collect();
    }

    pub fn into_files(self) -> Vec<TrackedFile> {
        self.files
    }
}

impl FromIterator<TrackedFile> for Candidates {
    fn from_iter<I: IntoIterator<Item = TrackedFile>>(iter: I) -> Self {
        let mut candidates = Candidates::new();
        for file in iter {
            candidates.insert(file);
        }
        candidates
    }
}

/// Builds the candidate set for one run.
pub struct Selector<'a> {
    project_root: &'a Path,
    classifier: &'a CategoryClassifier,
    discovery: &'a DiscoveryConfig,
}

impl<'a> Selector<'a> {
    pub fn new(
        project_root: &'a Path,
        classifier: &'a CategoryClassifier,
        discovery: &'a DiscoveryConfig,
    ) -> Self {
        Self {
            project_root,
            classifier,
            discovery,
        }
    }

    /// Select candidates.
    ///
    /// An explicit file wins over discovery and ignores `category_filter`.
    pub fn select(
        &self,
        source: &dyn ChangeSource,
        fs: &dyn FileSystem,
        explicit_file: Option<&str>,
        category_filter: Option<&str>,
    ) -> Result<Candidates> {
        if let Some(path) = explicit_file {
            return self.select_file(path, fs);
        }

        let mut candidates = self.discover(source);
        if let Some(category) = category_filter {
            let known = category == UNKNOWN_CATEGORY
                || self.classifier.category_names().contains(&category);
            if !known {
                tracing::warn!(category, "no such category, nothing will match");
            }
            candidates.retain_category(category);
        }
        Ok(candidates)
    }

    /// Single named file, any category including `unknown`.
    pub fn select_file(&self, path: &str, fs: &dyn FileSystem) -> Result<Candidates> {
        let relative_path = normalize_relative(path)?;
        let source = self.project_root.join(&relative_path);

        if !fs.exists(&source) || fs.is_dir(&source) {
            return Err(SharedPackError::FileNotFound {
                path: path.to_string(),
            });
        }

        let mut candidates = Candidates::new();
        candidates.insert(self.track(relative_path));
        Ok(candidates)
    }

    /// Changed paths under a relevant root with the recognized extension.
    pub fn discover(&self, source: &dyn ChangeSource) -> Candidates {
        source
            .changed_paths()
            .into_iter()
            .filter(|p| self.is_relevant(p))
            .map(|p| self.track(p))
            .collect()
    }

    fn is_relevant(&self, relative_path: &str) -> bool {
        let under_root = self.discovery.roots.iter().any(|root| {
            let root = root.trim_end_matches('/');
            relative_path
                .strip_prefix(root)
                .map(|rest| rest.starts_with('/'))
                .unwrap_or(false)
        });
        if !under_root {
            return false;
        }

        let path = Path::new(relative_path);
        let escapes = path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes {
            tracing::debug!(path = relative_path, "skipping path outside project");
            return false;
        }

        let extension = self.discovery.extension.trim_start_matches('.');
        path.extension().map(|e| e == extension).unwrap_or(false)
    }

    fn track(&self, relative_path: String) -> TrackedFile {
        let category = self.classifier.classify(&relative_path).to_string();
        let source = self.project_root.join(&relative_path);
        TrackedFile {
            relative_path,
            category,
            source,
        }
    }
}

/// Normalize a user supplied path to `a/b/c.php`.
fn normalize_relative(path: &str) -> Result<String> {
    let slashed = path.trim().replace('\\', "/");
    let mut parts: Vec<&str> = Vec::new();

    for component in Path::new(&slashed).components() {
        match component {
            Component::Normal(part) => match part.to_str() {
                Some(part) => parts.push(part),
                None => return Err(outside(path)),
            },
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(outside(path))
            }
        }
    }

    if parts.is_empty() {
        return Err(SharedPackError::FileNotFound {
            path: path.to_string(),
        });
    }
    Ok(parts.join("/"))
}

fn outside(path: &str) -> SharedPackError {
    SharedPackError::PathOutsideProject {
        path: path.to_string(),
    }
}
