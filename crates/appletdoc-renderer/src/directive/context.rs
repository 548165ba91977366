//! Directive processing context.
//!
//! Provides file system access and source location information to directive handlers.

use std::path::{Path, PathBuf};

/// Context provided to directive handlers for file system access and source location.
///
/// The context is created by [`DirectiveProcessor`](super::DirectiveProcessor) for each
/// directive and provides:
///
/// - Source file information for error messages
/// - Base directory for resolving relative paths
/// - File existence callback for directives that reference assets
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use appletdoc_renderer::directive::DirectiveContext;
///
/// let ctx = DirectiveContext {
///     source_path: Some(Path::new("docs/guide.md")),
///     base_dir: Path::new("docs"),
///     line: 42,
///     file_exists: &|path| path.exists(),
/// };
///
/// let resolved = ctx.resolve_path("img/scene.png");
/// assert_eq!(resolved, Path::new("docs/img/scene.png"));
/// assert_eq!(ctx.location(), "docs/guide.md:42");
/// ```
pub struct DirectiveContext<'a> {
    /// Path to the source file being rendered (if known).
    pub source_path: Option<&'a Path>,
    /// Base directory for resolving relative paths.
    pub base_dir: &'a Path,
    /// Line number where the directive appears (1-indexed).
    pub line: usize,
    /// Callback to check whether a file exists.
    pub file_exists: &'a dyn Fn(&Path) -> bool,
}

impl DirectiveContext<'_> {
    /// Resolve a relative path against the base directory.
    #[must_use]
    pub fn resolve_path(&self, relative: &str) -> PathBuf {
        self.base_dir.join(relative)
    }

    /// Check whether a path relative to the base directory exists.
    #[must_use]
    pub fn exists(&self, relative: &str) -> bool {
        (self.file_exists)(&self.resolve_path(relative))
    }

    /// Human-readable source location: `path:line`, or `line N` without a path.
    #[must_use]
    pub fn location(&self) -> String {
        match self.source_path {
            Some(path) => format!("{}:{}", path.display(), self.line),
            None => format!("line {}", self.line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path() {
        let ctx = DirectiveContext {
            source_path: Some(Path::new("docs/guide.md")),
            base_dir: Path::new("docs"),
            line: 10,
            file_exists: &|_| false,
        };

        assert_eq!(
            ctx.resolve_path("img/code.png"),
            PathBuf::from("docs/img/code.png")
        );
    }

    #[test]
    fn test_exists_uses_callback_with_resolved_path() {
        let ctx = DirectiveContext {
            source_path: None,
            base_dir: Path::new("docs"),
            line: 1,
            file_exists: &|path| path == Path::new("docs/present.png"),
        };

        assert!(ctx.exists("present.png"));
        assert!(!ctx.exists("missing.png"));
    }

    #[test]
    fn test_exists_on_real_filesystem() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("fig.png"), b"png").unwrap();

        let ctx = DirectiveContext {
            source_path: None,
            base_dir: temp_dir.path(),
            line: 1,
            file_exists: &|path| path.is_file(),
        };

        assert!(ctx.exists("fig.png"));
        assert!(!ctx.exists("other.png"));
    }

    #[test]
    fn test_location_without_source_path() {
        let ctx = DirectiveContext {
            source_path: None,
            base_dir: Path::new("."),
            line: 7,
            file_exists: &|_| false,
        };

        assert_eq!(ctx.location(), "line 7");
    }
}
