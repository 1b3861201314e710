//! The script source handed to the content hasher.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::resource::{FileTextResource, StringTextResource, TextResource};

/// A logical unit of script text, optionally backed by a file.
///
/// Cloning is cheap: the underlying resource is shared. Sources are immutable
/// and may be hashed from several threads at once.
#[derive(Debug, Clone)]
pub struct ScriptSource {
    resource: Arc<dyn TextResource>,
}

impl ScriptSource {
    /// Wraps an arbitrary text resource.
    pub fn new(resource: impl TextResource + 'static) -> Self {
        Self {
            resource: Arc::new(resource),
        }
    }

    /// Creates a source backed by a file on disk.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::new(FileTextResource::new(path))
    }

    /// Creates a source that exists only in memory.
    pub fn from_text(display_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(StringTextResource::new(display_name, content))
    }

    /// Returns the resource holding this source's text.
    pub fn resource(&self) -> &dyn TextResource {
        self.resource.as_ref()
    }

    /// Returns the backing file, if any.
    pub fn file(&self) -> Option<&Path> {
        self.resource.file()
    }

    /// A human-readable description such as `build file 'app/build.gradle'`.
    pub fn display_name(&self) -> &str {
        self.resource.display_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_source_has_no_file() {
        let s = ScriptSource::from_text("inline", "println 'hello world'");
        assert!(s.file().is_none());
        assert_eq!(s.display_name(), "inline");
        assert_eq!(s.resource().text().unwrap(), "println 'hello world'");
    }

    #[test]
    fn file_source_exposes_path() {
        let s = ScriptSource::from_file("settings.gradle");
        assert_eq!(s.file(), Some(Path::new("settings.gradle")));
    }

    #[test]
    fn clones_share_resource() {
        let a = ScriptSource::from_text("a", "content");
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.resource, &b.resource));
    }
}
