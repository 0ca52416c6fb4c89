use super::{is_hidden_name, DirEntry, FileSystem, FileType};
use anyhow::{anyhow, Context, Result};
use ignore::WalkBuilder;
use std::fs;
use std::path::Path;
use tracing::warn;

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Kind of the entry a path resolves to; only dangling links stay `Symlink`
fn file_type_of(path: &Path) -> FileType {
    if path.is_file() {
        FileType::File
    } else if path.is_dir() {
        FileType::Directory
    } else {
        FileType::Symlink
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).context(format!("Failed to read file {:?}", path))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let entries = fs::read_dir(path).context(format!("Failed to read directory {:?}", path))?;

        let mut result = Vec::new();
        for entry in entries {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            let file_type = file_type_of(&path);

            result.push(DirEntry {
                path,
                name,
                file_type,
            });
        }

        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    fn walk(&self, root: &Path) -> Result<Vec<DirEntry>> {
        if !root.is_dir() {
            return Err(anyhow!("Not a directory: {:?}", root));
        }

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(|entry| {
                entry.depth() == 0 || !is_hidden_name(&entry.file_name().to_string_lossy())
            })
            .build();

        let mut result = Vec::new();
        for item in walker {
            let entry = match item {
                Ok(e) => e,
                Err(err) => {
                    warn!(error = %err, "Failed to read directory entry");
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }

            result.push(DirEntry {
                path: entry.path().to_path_buf(),
                name: entry.file_name().to_string_lossy().to_string(),
                file_type: file_type_of(entry.path()),
            });
        }

        result.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::create_dir_all(base.join("src/app")).unwrap();
        fs::create_dir_all(base.join(".git/objects")).unwrap();
        fs::write(base.join("src/app/app.csproj"), "<Project />").unwrap();
        fs::write(base.join(".git/objects/app.csproj"), "<Project />").unwrap();
        fs::write(base.join("global.json"), "{}").unwrap();

        dir
    }

    #[test]
    fn test_exists_and_kinds() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.exists(&temp.path().join("global.json")));
        assert!(fs.is_file(&temp.path().join("global.json")));
        assert!(fs.is_dir(&temp.path().join("src")));
        assert!(!fs.exists(&temp.path().join("missing")));
    }

    #[test]
    fn test_read_to_string() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let content = fs.read_to_string(&temp.path().join("global.json")).unwrap();
        assert_eq!(content, "{}");
    }

    #[test]
    fn test_read_dir_sorted_and_includes_hidden() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let entries = fs.read_dir(temp.path()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.file_name()).collect();

        assert_eq!(names, vec![".git", "global.json", "src"]);
    }

    #[test]
    fn test_walk_skips_hidden_directories() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let entries = fs.walk(temp.path()).unwrap();
        let rel: Vec<String> = entries
            .iter()
            .map(|e| {
                e.path()
                    .strip_prefix(temp.path())
                    .unwrap()
                    .to_string_lossy()
                    .to_string()
            })
            .collect();

        assert_eq!(rel, vec!["global.json", "src", "src/app", "src/app/app.csproj"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_resolves_symlinked_files() {
        let temp = create_test_dir();
        std::os::unix::fs::symlink(
            temp.path().join("src/app/app.csproj"),
            temp.path().join("src/link.csproj"),
        )
        .unwrap();
        let fs = RealFileSystem::new();

        let entries = fs.walk(temp.path()).unwrap();
        let link = entries
            .iter()
            .find(|e| e.file_name() == "link.csproj")
            .unwrap();
        assert!(link.is_file());
    }

    #[test]
    fn test_walk_missing_root() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.walk(&temp.path().join("missing")).is_err());
    }
}
