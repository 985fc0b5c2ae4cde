//! Filesystem capability used by discovery, conflict detection and moves.

use std::fs;
use std::io;
use std::path::Path;

/// The filesystem operations the packer needs.
pub trait FileSystem {
    /// Whether anything occupies `path`, including a dangling symlink.
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Move `from` to `to` as a single operation.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// `std::fs` backed implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl FileSystem for RealFs {
    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }
}
