//! Rendering of single markdown pages.
//!
//! Provides [`PageRenderer`] for rendering a markdown file to HTML with the
//! `applet` directive registered.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use appletdoc_applet::{AppletDirective, AppletSettings};
use appletdoc_renderer::directive::{DirectiveError, DirectiveProcessor, DirectiveProcessorConfig};
use appletdoc_renderer::{MarkdownRenderer, RenderError};

/// Result of rendering a markdown page.
#[derive(Clone, Debug)]
pub struct PageRenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Title extracted from first H1 heading (if enabled).
    pub title: Option<String>,
    /// Warnings generated during conversion (e.g., missing figure images).
    pub warnings: Vec<String>,
}

/// Error returned when page rendering fails.
#[derive(Debug, thiserror::Error)]
pub enum PageRenderError {
    /// Source file not found.
    #[error("Source file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    /// I/O error reading source file.
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),
    /// One or more directives failed; each error names its source line.
    #[error("{}", join_errors(.0))]
    Directive(Vec<DirectiveError>),
}

fn join_errors(errors: &[DirectiveError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration for [`PageRenderer`].
#[derive(Clone, Debug)]
pub struct PageRendererConfig {
    /// Applet settings shared by every page.
    pub applet: AppletSettings,
    /// Extract title from first H1 heading.
    pub extract_title: bool,
}

impl Default for PageRendererConfig {
    fn default() -> Self {
        Self {
            applet: AppletSettings::default(),
            extract_title: true,
        }
    }
}

/// Markdown page renderer.
///
/// Every call creates its own directive processor, so a renderer can be
/// shared between threads rendering different pages.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use appletdoc_site::{PageRenderer, PageRendererConfig};
///
/// let renderer = PageRenderer::new(PageRendererConfig::default());
/// let result = renderer.render(Path::new("docs/rotation.md"))?;
/// println!("{}", result.html);
/// # Ok::<(), appletdoc_site::PageRenderError>(())
/// ```
#[derive(Clone, Debug)]
pub struct PageRenderer {
    config: PageRendererConfig,
}

impl PageRenderer {
    /// Create a new page renderer.
    #[must_use]
    pub fn new(config: PageRendererConfig) -> Self {
        Self { config }
    }

    /// Applet settings used for every page.
    #[must_use]
    pub fn applet_settings(&self) -> &AppletSettings {
        &self.config.applet
    }

    /// Render a markdown file.
    ///
    /// Figure images are resolved relative to the file's directory.
    ///
    /// # Errors
    ///
    /// Returns `PageRenderError::FileNotFound` if the file doesn't exist,
    /// `PageRenderError::Io` if it cannot be read, and
    /// `PageRenderError::Directive` if a directive on the page failed.
    pub fn render(&self, source_path: &Path) -> Result<PageRenderResult, PageRenderError> {
        let markdown = std::fs::read_to_string(source_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PageRenderError::FileNotFound(source_path.to_path_buf()),
            _ => PageRenderError::Io(e),
        })?;

        let base_dir = source_path.parent().unwrap_or(Path::new("."));
        let config = DirectiveProcessorConfig::new()
            .with_base_dir(base_dir)
            .with_source_path(source_path);

        tracing::debug!(path = %source_path.display(), "Rendering page");
        self.render_with(&markdown, config)
    }

    /// Render markdown text with a custom directive processor configuration.
    ///
    /// # Errors
    ///
    /// Returns `PageRenderError::Directive` if a directive failed.
    pub fn render_with(
        &self,
        markdown: &str,
        config: DirectiveProcessorConfig,
    ) -> Result<PageRenderResult, PageRenderError> {
        let processor = DirectiveProcessor::with_config(config)
            .with_leaf(AppletDirective::new(self.config.applet.clone()))
            .with_container(AppletDirective::new(self.config.applet.clone()));

        let mut renderer = MarkdownRenderer::new().with_gfm(true);
        if self.config.extract_title {
            renderer = renderer.with_title_extraction();
        }

        let result = renderer
            .render(markdown, processor)
            .map_err(|RenderError::Directive(errors)| PageRenderError::Directive(errors))?;

        Ok(PageRenderResult {
            html: result.html,
            title: result.title,
            warnings: result.warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn renderer() -> PageRenderer {
        PageRenderer::new(PageRendererConfig::default())
    }

    #[test]
    fn test_render_simple_markdown() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("test.md");
        fs::write(&path, "# Hello\n\nWorld").unwrap();

        let result = renderer().render(&path).unwrap();
        assert!(result.html.contains("<p>World</p>"));
        assert_eq!(result.title, Some("Hello".to_owned()));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_render_file_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = renderer().render(&temp_dir.path().join("nonexistent.md"));
        assert!(matches!(result, Err(PageRenderError::FileNotFound(_))));
    }

    #[test]
    fn test_render_applet_resolves_image_next_to_page() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("geometry");
        fs::create_dir_all(dir.join("img")).unwrap();
        fs::write(dir.join("img/cube.png"), b"png").unwrap();
        let path = dir.join("cube.md");
        fs::write(
            &path,
            "# Cube\n\n::applet[A cube]{url=\"cube\" fig=\"img/cube.png\" status=\"reviewed\"}\n",
        )
        .unwrap();

        let result = renderer().render(&path).unwrap();
        assert!(result.html.contains("<iframe src=\"cube\" "));
        assert!(result.html.contains("<img src=\"img/cube.png\" alt=\"A cube\">"));
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_render_missing_image_warns() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("page.md");
        fs::write(&path, "::applet{url=\"s\" fig=\"missing.png\"}\n").unwrap();

        let result = renderer().render(&path).unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("page.md:1"));
        assert!(result.warnings[0].contains("missing.png"));
    }

    #[test]
    fn test_render_failing_applet() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("broken.md");
        fs::write(&path, "# Broken\n\n::applet{url=\"scene1\"}\n").unwrap();

        let err = renderer().render(&path).unwrap_err();
        let PageRenderError::Directive(errors) = &err else {
            panic!("expected directive error, got {err:?}");
        };
        assert_eq!(errors.len(), 1);
        let message = err.to_string();
        assert!(message.contains("requires option 'fig'"));
        assert!(message.contains("broken.md:3"));
    }

    #[test]
    fn test_render_with_explicit_base_url() {
        let config = PageRendererConfig {
            applet: AppletSettings::resolve_with(Some("https://host/applet/"), |_| None),
            extract_title: false,
        };
        let processor_config = DirectiveProcessorConfig::new().with_file_exists(|_| true);

        let result = PageRenderer::new(config)
            .render_with(
                "::applet{url=\"scene1\" fig=\"a.png\" zoom=\"2\"}\n",
                processor_config,
            )
            .unwrap();
        assert!(result.html.contains("src=\"https://host/applet/scene1?zoom=2\""));
        assert_eq!(result.title, None);
    }
}
