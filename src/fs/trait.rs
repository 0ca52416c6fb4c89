//! FileSystem trait definition

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
    Symlink,
}

/// A directory entry returned by `read_dir` and `walk`
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub file_type: FileType,
}

impl DirEntry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.name
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }

    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }
}

/// Abstraction over file system operations for testability
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// List directory contents, sorted by name
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    /// Recursively list everything below `root`, sorted by path.
    ///
    /// Entries whose name starts with `.` are skipped and never descended
    /// into. `root` itself is not part of the result.
    fn walk(&self, root: &Path) -> Result<Vec<DirEntry>>;
}
