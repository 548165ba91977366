//! `appletdoc build` command implementation.

use std::path::PathBuf;

use appletdoc_config::{CliSettings, Config};
use appletdoc_site::SiteBuilder;
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Base URL prepended to applet URLs (overrides config and BASE_URL).
    #[arg(long)]
    base_url: Option<String>,

    /// Path to configuration file (default: auto-discover appletdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl BuildArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            base_url: self.base_url,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let docs = &config.docs_resolved;

        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }

        output.info(&format!("Source: {}", docs.source_dir.display()));
        output.info(&format!("Output: {}", docs.output_dir.display()));

        let report = SiteBuilder::new(docs.source_dir.clone(), super::page_renderer(&config))
            .with_site_name(config.site.name.clone())
            .build(&docs.output_dir)?;

        output.warnings(&report.warnings);
        output.success(&format!(
            "Built {} page(s) and copied {} file(s) to {}",
            report.pages,
            report.assets,
            docs.output_dir.display()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_build_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("appletdoc.toml"),
            "[docs]\nsource_dir = \"content\"\noutput_dir = \"public\"\n\n[applet]\nbase_url = \"/applets/\"\n",
        )
        .unwrap();
        fs::create_dir_all(root.join("content")).unwrap();
        fs::write(root.join("content/fig.png"), "png").unwrap();
        fs::write(
            root.join("content/index.md"),
            ":::applet{url=\"scene1\" fig=\"fig.png\"}\nA **scene**.\n:::\n",
        )
        .unwrap();

        let args = BuildArgs {
            source_dir: None,
            output_dir: None,
            base_url: None,
            config: Some(root.join("appletdoc.toml")),
        };
        args.execute(&Output::new()).unwrap();

        let html = fs::read_to_string(root.join("public/index.html")).unwrap();
        assert!(html.contains("src=\"/applets/scene1\""));
        assert!(html.contains("<p>A <strong>scene</strong>.</p>"));
        assert!(root.join("public/fig.png").is_file());
    }
}
