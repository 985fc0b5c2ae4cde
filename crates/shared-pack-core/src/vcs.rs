//! Version control integration
//!
//! Repository detection and the list of added / modified paths in the
//! working tree. The status query is best-effort: if git is missing or
//! fails, the working tree is treated as having no changes.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

const GIT_DIR: &str = ".git";

/// Whether `project_root` has a `.git` directory.
pub fn is_repository(project_root: &Path) -> bool {
    project_root.join(GIT_DIR).is_dir()
}

/// Source of changed paths, relative to the project root.
pub trait ChangeSource {
    fn changed_paths(&self) -> Vec<String>;
}

/// `git status --porcelain -z` in a project root.
#[derive(Debug, Clone)]
pub struct GitStatus {
    project_root: PathBuf,
}

impl GitStatus {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }
}

impl ChangeSource for GitStatus {
    fn changed_paths(&self) -> Vec<String> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.project_root)
            .args(["status", "--porcelain", "-z", "--untracked-files=all"])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output();

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!("git status could not be run: {}", e);
                return Vec::new();
            }
        };

        if !output.status.success() {
            tracing::warn!("git status exited with {}", output.status);
            return Vec::new();
        }

        match String::from_utf8(output.stdout) {
            Ok(stdout) => {
                let paths = parse_porcelain(&stdout);
                tracing::debug!(count = paths.len(), "changed paths from git status");
                paths
            }
            Err(_) => {
                tracing::warn!("git status output is not valid UTF-8");
                Vec::new()
            }
        }
    }
}

/// Fixed list of changed paths.
impl ChangeSource for Vec<String> {
    fn changed_paths(&self) -> Vec<String> {
        self.clone()
    }
}

/// Extract untracked, added and modified paths from `--porcelain -z` output.
///
/// Records are NUL-terminated `XY path` entries with no quoting. A rename or
/// copy record is followed by its original path as an extra field. Deleted,
/// renamed and copied entries are ignored.
pub fn parse_porcelain(output: &str) -> Vec<String> {
    let mut fields = output.split('\0');
    let mut paths = Vec::new();

    while let Some(record) = fields.next() {
        let Some((code, path)) = split_record(record) else {
            continue;
        };
        if code.contains(['R', 'C']) {
            fields.next();
            continue;
        }
        if !is_included_status(code) {
            continue;
        }

        let path = path.trim();
        if !path.is_empty() {
            paths.push(path.to_string());
        }
    }

    paths
}

fn split_record(record: &str) -> Option<(&str, &str)> {
    let code = record.get(..2)?;
    let path = record.get(2..)?.strip_prefix(' ')?;
    Some((code, path))
}

fn is_included_status(code: &str) -> bool {
    if code == "??" {
        return true;
    }
    let has = |c: char| code.contains(c);
    (has('A') || has('M')) && !has('D') && !has('R') && !has('C')
}
