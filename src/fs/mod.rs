//! FileSystem abstraction for testable file operations
//!
//! Every resolver in this crate reads the application tree through
//! [`FileSystem`], so unit tests can run against [`MockFileSystem`] while the
//! buildpack itself uses [`RealFileSystem`].

mod mock;
mod real;
mod r#trait;

pub use mock::MockFileSystem;
pub use r#trait::{DirEntry, FileSystem, FileType};
pub use real::RealFileSystem;

const UTF8_BOM: char = '\u{feff}';

/// Removes a leading UTF-8 byte-order mark, if present.
pub fn strip_bom(content: &str) -> &str {
    content.strip_prefix(UTF8_BOM).unwrap_or(content)
}

/// Hidden entries (name starting with `.`) are never scanned.
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}
