use super::{is_hidden_name, DirEntry, FileSystem, FileType};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct MockEntry {
    pub content: Option<String>,
    pub file_type: FileType,
}

/// In-memory file tree rooted at `/mock` (or a custom root)
pub struct MockFileSystem {
    files: RwLock<HashMap<PathBuf, MockEntry>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        let fs = Self {
            files: RwLock::new(HashMap::new()),
            root: root.clone(),
        };
        fs.add_dir(&root);
        fs
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.files.write().unwrap();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut files, parent);
        }

        files.insert(
            path,
            MockEntry {
                content: Some(content.to_string()),
                file_type: FileType::File,
            },
        );
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.files.write().unwrap();

        Self::ensure_parents(&mut files, &path);
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn ensure_parents(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            files.entry(current.clone()).or_insert(MockEntry {
                content: None,
                file_type: FileType::Directory,
            });
        }
    }

    fn entry_of(path: &Path, entry: &MockEntry) -> DirEntry {
        DirEntry {
            path: path.to_path_buf(),
            name: path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("")
                .to_string(),
            file_type: entry.file_type,
        }
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.files.read().unwrap().contains_key(&path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.files
            .read()
            .unwrap()
            .get(&path)
            .map(|e| e.file_type == FileType::Directory)
            .unwrap_or(false)
    }

    fn is_file(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.files
            .read()
            .unwrap()
            .get(&path)
            .map(|e| e.file_type == FileType::File)
            .unwrap_or(false)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = self.normalize_path(path);
        let files = self.files.read().unwrap();
        let entry = files
            .get(&path)
            .ok_or_else(|| anyhow!("File not found: {:?}", path))?;

        entry
            .content
            .clone()
            .ok_or_else(|| anyhow!("Not a file: {:?}", path))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let path = self.normalize_path(path);
        let files = self.files.read().unwrap();

        match files.get(&path) {
            Some(entry) if entry.file_type == FileType::Directory => {}
            _ => return Err(anyhow!("Directory not found: {:?}", path)),
        }

        let mut entries: Vec<DirEntry> = files
            .iter()
            .filter(|(file_path, _)| file_path.parent() == Some(path.as_path()))
            .map(|(file_path, entry)| Self::entry_of(file_path, entry))
            .collect();

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn walk(&self, root: &Path) -> Result<Vec<DirEntry>> {
        let root = self.normalize_path(root);
        if !self.is_dir(&root) {
            return Err(anyhow!("Not a directory: {:?}", root));
        }

        let files = self.files.read().unwrap();
        let mut entries: Vec<DirEntry> = files
            .iter()
            .filter(|(file_path, _)| {
                let Ok(rel) = file_path.strip_prefix(&root) else {
                    return false;
                };
                let mut components = rel.components().peekable();
                if components.peek().is_none() {
                    return false;
                }
                components.all(|c| match c {
                    Component::Normal(name) => !is_hidden_name(&name.to_string_lossy()),
                    _ => false,
                })
            })
            .map(|(file_path, entry)| Self::entry_of(file_path, entry))
            .collect();

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_file() {
        let fs = MockFileSystem::new();
        fs.add_file("test.txt", "hello");

        assert!(fs.exists(Path::new("/mock/test.txt")));
        assert!(fs.is_file(Path::new("/mock/test.txt")));
    }

    #[test]
    fn test_add_dir() {
        let fs = MockFileSystem::new();
        fs.add_dir("subdir");

        assert!(fs.exists(Path::new("/mock/subdir")));
        assert!(fs.is_dir(Path::new("/mock/subdir")));
    }

    #[test]
    fn test_read_to_string() {
        let fs = MockFileSystem::new();
        fs.add_file("test.txt", "hello world");

        let content = fs.read_to_string(Path::new("/mock/test.txt")).unwrap();
        assert_eq!(content, "hello world");
        assert!(fs.read_to_string(Path::new("/mock")).is_err());
    }

    #[test]
    fn test_read_dir() {
        let fs = MockFileSystem::new();
        fs.add_dir("subdir");
        fs.add_file("test.txt", "content");
        fs.add_file("subdir/nested.txt", "nested");

        let entries = fs.read_dir(Path::new("/mock")).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.file_name()).collect();

        assert_eq!(names, vec!["subdir", "test.txt"]);
    }

    #[test]
    fn test_read_dir_on_file_fails() {
        let fs = MockFileSystem::new();
        fs.add_file("test.txt", "content");

        assert!(fs.read_dir(Path::new("/mock/test.txt")).is_err());
    }

    #[test]
    fn test_walk_skips_hidden() {
        let fs = MockFileSystem::new();
        fs.add_file("src/app/app.csproj", "<Project />");
        fs.add_file(".git/app.csproj", "<Project />");
        fs.add_file("src/.vs/other.csproj", "<Project />");

        let entries = fs.walk(Path::new("/mock")).unwrap();
        let paths: Vec<&Path> = entries.iter().map(|e| e.path()).collect();

        assert_eq!(
            paths,
            vec![
                Path::new("/mock/src"),
                Path::new("/mock/src/app"),
                Path::new("/mock/src/app/app.csproj"),
            ]
        );
    }

    #[test]
    fn test_walk_root_under_hidden_parent() {
        let fs = MockFileSystem::with_root(PathBuf::from("/tmp/.tmpA1b2"));
        fs.add_file("project.json", "{}");

        let entries = fs.walk(Path::new("/tmp/.tmpA1b2")).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].file_name(), "project.json");
    }

    #[test]
    fn test_with_root() {
        let fs = MockFileSystem::with_root(PathBuf::from("/app"));
        fs.add_file("src/Program.cs", "class Program {}");

        assert_eq!(fs.root(), Path::new("/app"));
        assert!(fs.exists(Path::new("/app/src/Program.cs")));
    }

    #[test]
    fn test_parent_directories_created() {
        let fs = MockFileSystem::new();
        fs.add_file("a/b/c/file.txt", "content");

        assert!(fs.is_dir(Path::new("/mock/a")));
        assert!(fs.is_dir(Path::new("/mock/a/b")));
        assert!(fs.is_dir(Path::new("/mock/a/b/c")));
        assert!(fs.is_file(Path::new("/mock/a/b/c/file.txt")));
    }
}
