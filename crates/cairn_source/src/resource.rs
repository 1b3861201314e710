//! Text resources: the content behind a script source.

use std::borrow::Cow;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// A readable unit of text.
///
/// When [`file`](TextResource::file) returns a path, that path is the
/// authoritative location of the content and consumers should read from it
/// directly rather than going through [`text`](TextResource::text).
pub trait TextResource: fmt::Debug + Send + Sync {
    /// A human-readable name for diagnostics.
    fn display_name(&self) -> &str;

    /// The backing file, if this resource lives on the local filesystem.
    fn file(&self) -> Option<&Path>;

    /// Returns the full text of the resource.
    fn text(&self) -> io::Result<Cow<'_, str>>;
}

/// A resource whose content lives only in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringTextResource {
    display_name: String,
    content: String,
}

impl StringTextResource {
    /// Creates an in-memory resource with the given name and content.
    pub fn new(display_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            content: content.into(),
        }
    }
}

impl TextResource for StringTextResource {
    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn file(&self) -> Option<&Path> {
        None
    }

    fn text(&self) -> io::Result<Cow<'_, str>> {
        Ok(Cow::Borrowed(&self.content))
    }
}

/// A resource backed by a file on the local filesystem.
///
/// The file is read on every call to [`text`](TextResource::text); nothing is
/// cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTextResource {
    path: PathBuf,
    display_name: String,
}

impl FileTextResource {
    /// Creates a resource for `path`. The display name is the path itself.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display_name = path.display().to_string();
        Self { path, display_name }
    }

    /// Returns the backing path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextResource for FileTextResource {
    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn file(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn text(&self) -> io::Result<Cow<'_, str>> {
        std::fs::read_to_string(&self.path).map(Cow::Owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_resource_has_no_file() {
        let r = StringTextResource::new("inline script", "println 'hi'");
        assert!(r.file().is_none());
        assert_eq!(r.display_name(), "inline script");
        assert_eq!(r.text().unwrap(), "println 'hi'");
    }

    #[test]
    fn file_resource_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build.gradle");
        std::fs::write(&path, "apply plugin: 'java'").unwrap();

        let r = FileTextResource::new(&path);
        assert_eq!(r.file(), Some(path.as_path()));
        assert_eq!(r.text().unwrap(), "apply plugin: 'java'");
    }

    #[test]
    fn file_resource_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let r = FileTextResource::new(dir.path().join("missing.gradle"));
        let err = r.text().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn file_resource_display_name_is_path() {
        let r = FileTextResource::new("scripts/init.gradle");
        let expected = Path::new("scripts/init.gradle").display().to_string();
        assert_eq!(r.display_name(), expected);
    }
}
