//! `appletdoc render` command implementation.

use std::io::Write;
use std::path::PathBuf;

use appletdoc_config::{CliSettings, Config};
use appletdoc_site::{PageData, Stylesheet, render_page, stylesheet};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    file: PathBuf,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Base URL prepended to applet URLs (overrides config and BASE_URL).
    #[arg(long)]
    base_url: Option<String>,

    /// Emit only the rendered body, without the page template.
    #[arg(long)]
    fragment: bool,

    /// Path to configuration file (default: auto-discover appletdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RenderArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            base_url: self.base_url,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let result = super::page_renderer(&config).render(&self.file)?;
        output.warnings(&result.warnings);

        let html = if self.fragment {
            result.html
        } else {
            let stem = self
                .file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let css = stylesheet(&config.applet.print_class);
            render_page(&PageData {
                title: result.title.as_deref().unwrap_or(&stem),
                site_name: &config.site.name,
                html_content: &result.html,
                stylesheet: Stylesheet::Inline(&css),
            })
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, html)?;
                output.success(&format!("Rendered {}", path.display()));
            }
            None => std::io::stdout().lock().write_all(html.as_bytes())?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args(dir: &std::path::Path, file: &str, fragment: bool) -> RenderArgs {
        RenderArgs {
            file: dir.join(file),
            output: Some(dir.join("out.html")),
            base_url: Some("https://host/applet/".to_owned()),
            fragment,
            config: Some(dir.join("appletdoc.toml")),
        }
    }

    #[test]
    fn test_render_fragment_to_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("appletdoc.toml"), "").unwrap();
        fs::write(dir.path().join("fig.png"), "png").unwrap();
        fs::write(
            dir.path().join("page.md"),
            "::applet{url=\"scene1\" fig=\"fig.png\" title=\"Demo\"}\n",
        )
        .unwrap();

        args(dir.path(), "page.md", true)
            .execute(&Output::new())
            .unwrap();

        let html = fs::read_to_string(dir.path().join("out.html")).unwrap();
        assert!(html.starts_with("<figure"));
        assert!(html.contains("src=\"https://host/applet/scene1?title=Demo\""));
    }

    #[test]
    fn test_render_full_page() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("appletdoc.toml"), "[site]\nname = \"Geometry\"\n").unwrap();
        fs::write(dir.path().join("page.md"), "# Rotation\n").unwrap();

        args(dir.path(), "page.md", false)
            .execute(&Output::new())
            .unwrap();

        let html = fs::read_to_string(dir.path().join("out.html")).unwrap();
        assert!(html.contains("<title>Rotation - Geometry</title>"));
        assert!(html.contains("<style>\n"));
        assert!(html.contains("figure.applet-print-figure > img"));
        assert!(!html.contains("applet.css"));
    }

    #[test]
    fn test_render_failing_applet() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("appletdoc.toml"), "").unwrap();
        fs::write(dir.path().join("page.md"), "::applet{fig=\"fig.png\"}\n").unwrap();

        let err = args(dir.path(), "page.md", true)
            .execute(&Output::new())
            .unwrap_err();
        assert!(matches!(err, CliError::Render(_)));
        assert!(!dir.path().join("out.html").exists());
    }
}
