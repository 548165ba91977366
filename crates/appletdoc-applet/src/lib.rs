//! Interactive applet embedding for appletdoc pages.
//!
//! The [`AppletDirective`] renders a figure holding the applet's print image
//! and caption, with the live applet as a lazily loaded `<iframe>` in front
//! of it. Review status is shown as a dotted border until the applet is
//! reviewed.
//!
//! # Example
//!
//! ```
//! use appletdoc_applet::{AppletDirective, AppletSettings};
//! use appletdoc_renderer::MarkdownRenderer;
//! use appletdoc_renderer::directive::{DirectiveProcessor, DirectiveProcessorConfig};
//!
//! let settings = AppletSettings::resolve_with(Some("https://applets.example.com/"), |_| None);
//! let config = DirectiveProcessorConfig::new().with_file_exists(|_| true);
//! let processor = DirectiveProcessor::with_config(config)
//!     .with_leaf(AppletDirective::new(settings.clone()))
//!     .with_container(AppletDirective::new(settings));
//!
//! let markdown = "::applet[Demo]{url=\"scene1\" fig=\"img.png\" title=\"Demo\" status=\"in-review\"}\n";
//! let html = MarkdownRenderer::new().render(markdown, processor).unwrap().html;
//!
//! assert!(html.contains(r#"src="https://applets.example.com/scene1?title=Demo""#));
//! assert!(html.contains("border: dotted yellow;"));
//! ```

mod directive;
mod options;
mod status;

pub use directive::{
    AppletDirective, AppletSettings, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_PRINT_CLASS,
};
pub use options::{
    FORWARDED_KEYS, build_style, encode_query, filter_and_encode_options, normalize_booleanish,
};
pub use status::ReviewStatus;
