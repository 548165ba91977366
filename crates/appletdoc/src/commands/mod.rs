//! CLI command implementations.

mod build;
mod render;

pub(crate) use build::BuildArgs;
pub(crate) use render::RenderArgs;

use appletdoc_applet::AppletSettings;
use appletdoc_config::Config;
use appletdoc_site::{PageRenderer, PageRendererConfig};

/// Page renderer for the applet settings in `config`.
///
/// A configured base URL takes precedence over the `BASE_URL` environment variable.
fn page_renderer(config: &Config) -> PageRenderer {
    let applet = AppletSettings::resolve(Some(config.applet.base_url.as_str()))
        .with_print_class(config.applet.print_class.clone());
    tracing::debug!(base_url = %applet.base_url, print_class = %applet.print_class, "Applet settings");

    PageRenderer::new(PageRendererConfig {
        applet,
        extract_title: true,
    })
}
