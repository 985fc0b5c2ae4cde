use std::path::Path;

use crate::fs::FileSystem;
use crate::selection::TrackedFile;
use crate::target::{resolve_target, ResolvedTarget};

pub const TARGET_EXISTS_REASON: &str = "target already exists";

/// A candidate whose target is already occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictRecord {
    pub source: String,
    pub target: String,
    pub reason: String,
}

/// Whether a candidate must be skipped instead of moved.
///
/// Preview and execution both go through this predicate.
pub fn is_blocked(fs: &dyn FileSystem, target: &ResolvedTarget) -> bool {
    fs.exists(&target.absolute)
}

/// Candidates whose target already exists. Advisory only.
pub fn detect_conflicts<'a>(
    candidates: impl IntoIterator<Item = &'a TrackedFile>,
    project_root: &Path,
    destination_root: &Path,
    fs: &dyn FileSystem,
) -> Vec<ConflictRecord> {
    candidates
        .into_iter()
        .filter_map(|file| {
            let target = resolve_target(&file.relative_path, project_root, destination_root);
            is_blocked(fs, &target).then(|| ConflictRecord {
                source: file.relative_path.clone(),
                target: target.display,
                reason: TARGET_EXISTS_REASON.to_string(),
            })
        })
        .collect()
}
