use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A project location relative to the application root
///
/// Only plain path segments are kept: `./` prefixes and trailing slashes
/// vanish, and anything absolute or containing `..` is rejected, so two
/// spellings of the same location always compare equal. The application root
/// itself is the empty path and displays as `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectPath(PathBuf);

impl ProjectPath {
    /// Parse a user-supplied path such as a `.deployment` pin
    pub fn parse(raw: &str) -> Option<Self> {
        let unified = raw.trim().replace('\\', "/");
        Self::from_relative(Path::new(&unified))
    }

    pub fn from_relative(path: &Path) -> Option<Self> {
        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::Normal(segment) => normalized.push(segment),
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }
        Some(Self(normalized))
    }

    pub fn root() -> Self {
        Self(PathBuf::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.as_os_str().is_empty()
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Absolute location under `app_root`
    pub fn under(&self, app_root: &Path) -> PathBuf {
        app_root.join(&self.0)
    }

    pub fn parent(&self) -> Self {
        Self(self.0.parent().map(Path::to_path_buf).unwrap_or_default())
    }

    pub fn file_name(&self) -> Option<&str> {
        self.0.file_name().and_then(|n| n.to_str())
    }

    pub fn file_stem(&self) -> Option<&str> {
        self.0.file_stem().and_then(|n| n.to_str())
    }

    pub fn extension(&self) -> Option<&str> {
        self.0.extension().and_then(|e| e.to_str())
    }
}

impl fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str(".")
        } else {
            write!(f, "{}", self.0.display())
        }
    }
}

impl Serialize for ProjectPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
