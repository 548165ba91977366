//! Static site builder.
//!
//! Walks a source directory, renders every markdown file to a standalone HTML
//! page and copies everything else (figure images) unchanged.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use rayon::prelude::*;

use crate::renderer::{PageRenderError, PageRenderer};
use crate::template::{PageData, STYLESHEET_NAME, Stylesheet, render_page, stylesheet};

/// Summary of a successful build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Number of pages rendered.
    pub pages: usize,
    /// Number of files copied unchanged.
    pub assets: usize,
    /// Warnings from all pages, each prefixed with its source location.
    pub warnings: Vec<String>,
}

/// A page that failed to render or write.
#[derive(Debug)]
pub struct PageFailure {
    /// Source file path.
    pub path: PathBuf,
    /// What went wrong.
    pub error: PageRenderError,
}

impl fmt::Display for PageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.error)
    }
}

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Source directory does not exist.
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// I/O error writing the site.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Directory walk failed.
    #[error("Failed to scan source directory: {0}")]
    Walk(#[from] ignore::Error),
    /// Some pages failed; the others were written.
    #[error("{} page(s) failed:\n{}", .0.len(), format_failures(.0))]
    Pages(Vec<PageFailure>),
}

fn format_failures(failures: &[PageFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("  {f}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds a static site from a directory of markdown files.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use appletdoc_site::{PageRenderer, PageRendererConfig, SiteBuilder};
///
/// let renderer = PageRenderer::new(PageRendererConfig::default());
/// let report = SiteBuilder::new("docs", renderer)
///     .with_site_name("Geometry")
///     .build(Path::new("build"))?;
/// assert!(report.pages > 0);
/// # Ok::<(), appletdoc_site::BuildError>(())
/// ```
pub struct SiteBuilder {
    source_dir: PathBuf,
    renderer: PageRenderer,
    site_name: String,
}

/// Files found in the source directory.
#[derive(Default)]
struct SourceFiles {
    pages: Vec<PathBuf>,
    assets: Vec<PathBuf>,
}

/// Outcome of building one page.
struct BuiltPage {
    warnings: Vec<String>,
}

impl SiteBuilder {
    /// Create a builder for `source_dir`.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>, renderer: PageRenderer) -> Self {
        Self {
            source_dir: source_dir.into(),
            renderer,
            site_name: String::new(),
        }
    }

    /// Set the site name shown in page titles.
    #[must_use]
    pub fn with_site_name(mut self, name: impl Into<String>) -> Self {
        self.site_name = name.into();
        self
    }

    /// Build the site into `output_dir`.
    ///
    /// Pages are rendered in parallel. A failed page does not stop the
    /// others from being written.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::Pages` listing every failed page, or an I/O or
    /// walk error if the site cannot be written at all.
    pub fn build(&self, output_dir: &Path) -> Result<BuildReport, BuildError> {
        if !self.source_dir.is_dir() {
            return Err(BuildError::SourceNotFound(self.source_dir.clone()));
        }

        let files = self.scan(output_dir)?;
        tracing::debug!(
            pages = files.pages.len(),
            assets = files.assets.len(),
            "Scanned source directory"
        );

        fs::create_dir_all(output_dir)?;

        let results: Vec<Result<BuiltPage, PageFailure>> = files
            .pages
            .par_iter()
            .map(|path| {
                self.build_page(path, output_dir)
                    .map_err(|error| PageFailure {
                        path: path.clone(),
                        error,
                    })
            })
            .collect();

        for asset in &files.assets {
            let target = output_dir.join(self.relative(asset));
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(asset, &target)?;
        }

        let print_class = &self.renderer.applet_settings().print_class;
        fs::write(output_dir.join(STYLESHEET_NAME), stylesheet(print_class))?;

        let mut report = BuildReport {
            assets: files.assets.len(),
            ..BuildReport::default()
        };
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(page) => {
                    report.pages += 1;
                    report.warnings.extend(page.warnings);
                }
                Err(failure) => {
                    tracing::warn!(path = %failure.path.display(), error = %failure.error, "Page failed");
                    failures.push(failure);
                }
            }
        }

        tracing::info!(
            pages = report.pages,
            assets = report.assets,
            warnings = report.warnings.len(),
            failed = failures.len(),
            output = %output_dir.display(),
            "Site built"
        );

        if failures.is_empty() {
            Ok(report)
        } else {
            Err(BuildError::Pages(failures))
        }
    }

    /// Collect markdown pages and other files, skipping hidden and ignored
    /// entries and the output directory.
    fn scan(&self, output_dir: &Path) -> Result<SourceFiles, BuildError> {
        let output_dir = output_dir
            .canonicalize()
            .unwrap_or_else(|_| output_dir.to_path_buf());

        let walker = WalkBuilder::new(&self.source_dir)
            .hidden(true)
            .require_git(false)
            .sort_by_file_path(Path::cmp)
            .filter_entry(move |entry| {
                !entry
                    .path()
                    .canonicalize()
                    .is_ok_and(|canonical| canonical == output_dir)
            })
            .build();

        let mut files = SourceFiles::default();
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let path = entry.into_path();
            if path.extension().is_some_and(|ext| ext == "md") {
                files.pages.push(path);
            } else {
                files.assets.push(path);
            }
        }
        Ok(files)
    }

    fn build_page(&self, path: &Path, output_dir: &Path) -> Result<BuiltPage, PageRenderError> {
        let result = self.renderer.render(path)?;

        let relative = self.relative(path);
        let depth = relative.components().count().saturating_sub(1);
        let css_path = format!("{}{STYLESHEET_NAME}", "../".repeat(depth));
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let html = render_page(&PageData {
            title: result.title.as_deref().unwrap_or(&stem),
            site_name: &self.site_name,
            html_content: &result.html,
            stylesheet: Stylesheet::Link(&css_path),
        });

        let target = output_dir.join(relative).with_extension("html");
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(PageRenderError::Io)?;
        }
        fs::write(&target, html).map_err(PageRenderError::Io)?;

        let location = path.display().to_string();
        let warnings = result
            .warnings
            .into_iter()
            .map(|warning| {
                if warning.starts_with(&location) {
                    warning
                } else {
                    format!("{location}: {warning}")
                }
            })
            .collect();

        Ok(BuiltPage { warnings })
    }

    /// Path of `path` relative to the source directory.
    fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.source_dir).unwrap_or(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::PageRendererConfig;
    use appletdoc_applet::AppletSettings;
    use pretty_assertions::assert_eq;

    fn builder(source_dir: &Path) -> SiteBuilder {
        let config = PageRendererConfig {
            applet: AppletSettings::resolve_with(Some("https://host/applet/"), |_| None),
            extract_title: true,
        };
        SiteBuilder::new(source_dir, PageRenderer::new(config)).with_site_name("Geometry")
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_build_site() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join("docs");
        let output = temp_dir.path().join("build");
        write(&source.join("index.md"), "# Home\n\nWelcome.\n");
        write(
            &source.join("shapes/cube.md"),
            "# Cube\n\n::applet[Cube]{url=\"scene1\" fig=\"cube.png\" title=\"Demo\"}\n",
        );
        write(&source.join("shapes/cube.png"), "png");
        write(&source.join(".hidden/notes.md"), "# Hidden\n");

        let report = builder(&source).build(&output).unwrap();

        assert_eq!(report.pages, 2);
        assert_eq!(report.assets, 1);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);

        let cube = fs::read_to_string(output.join("shapes/cube.html")).unwrap();
        assert!(cube.contains("<title>Cube - Geometry</title>"));
        assert!(cube.contains("href=\"../applet.css\""));
        assert!(cube.contains("src=\"https://host/applet/scene1?title=Demo\""));

        let index = fs::read_to_string(output.join("index.html")).unwrap();
        assert!(index.contains("href=\"applet.css\""));

        assert_eq!(
            fs::read_to_string(output.join("shapes/cube.png")).unwrap(),
            "png"
        );
        assert!(output.join(STYLESHEET_NAME).is_file());
        assert!(!output.join(".hidden").exists());
    }

    #[test]
    fn test_build_collects_warnings_with_location() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join("docs");
        write(
            &source.join("page.md"),
            "::applet{url=\"s\" fig=\"missing.png\"}\n\n:::\n",
        );

        let report = builder(&source)
            .build(&temp_dir.path().join("out"))
            .unwrap();

        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings.iter().all(|w| w.contains("page.md")));
    }

    #[test]
    fn test_build_reports_failed_pages_and_writes_others() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join("docs");
        let output = temp_dir.path().join("build");
        write(&source.join("good.md"), "# Good\n");
        write(&source.join("bad.md"), "# Bad\n\n::applet{fig=\"x.png\"}\n");

        let err = builder(&source).build(&output).unwrap_err();

        let BuildError::Pages(failures) = &err else {
            panic!("expected page failures, got {err:?}");
        };
        assert_eq!(failures.len(), 1);
        assert!(failures[0].path.ends_with("bad.md"));
        assert!(err.to_string().contains("requires option 'url'"));
        assert!(output.join("good.html").is_file());
        assert!(!output.join("bad.html").exists());
    }

    #[test]
    fn test_build_skips_output_inside_source() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().to_path_buf();
        let output = source.join("build");
        write(&source.join("a.md"), "# A\n");
        write(&output.join("stale.md"), "# Stale\n");

        let report = builder(&source).build(&output).unwrap();
        assert_eq!(report.pages, 1);
    }

    #[test]
    fn test_build_missing_source() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = builder(&temp_dir.path().join("nope"))
            .build(&temp_dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, BuildError::SourceNotFound(_)));
    }
}
