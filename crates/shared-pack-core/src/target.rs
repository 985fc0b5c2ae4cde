use std::path::{Component, Path, PathBuf};

/// Where a source file lands inside the shared package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Destination root relative to the project root, joined with the
    /// source's relative path. Only used for display.
    pub display: String,
    /// `destination_root/relative_path`; checked for existence and written to.
    pub absolute: PathBuf,
}

/// Compute the target for `relative_path`, keeping its directory structure.
pub fn resolve_target(
    relative_path: &str,
    project_root: &Path,
    destination_root: &Path,
) -> ResolvedTarget {
    let root_display = relative_display(destination_root, project_root);
    let display = if root_display.is_empty() {
        relative_path.to_string()
    } else {
        format!("{}/{}", root_display, relative_path)
    };

    ResolvedTarget {
        display,
        absolute: destination_root.join(relative_path),
    }
}

/// `path` expressed relative to `base`, compared lexically.
///
/// `/work/app/../do-shared` against `/work/app` gives `../do-shared`.
/// When the two share no directory the normalized `path` is returned as is.
fn relative_display(path: &Path, base: &Path) -> String {
    let path = normalize(path);
    let base = normalize(base);

    let path_parts: Vec<_> = path.components().collect();
    let base_parts: Vec<_> = base.components().collect();

    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let common_dirs = path_parts[..common]
        .iter()
        .filter(|c| matches!(c, Component::Normal(_)))
        .count();
    let related = common_dirs > 0 || (path.is_relative() && base.is_relative());
    if !related {
        return to_slash(&path);
    }

    let mut parts: Vec<String> = Vec::new();
    for _ in common..base_parts.len() {
        parts.push("..".to_string());
    }
    for part in &path_parts[common..] {
        parts.push(part.as_os_str().to_string_lossy().to_string());
    }
    parts.join("/")
}

/// Resolve `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
