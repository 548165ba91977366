//! Page rendering and static site building.
//!
//! [`PageRenderer`] renders a single markdown file with the applet directive
//! enabled. [`SiteBuilder`] renders a whole source directory in parallel and
//! writes a static HTML site next to the copied figure images.

mod builder;
mod renderer;
mod template;

pub use builder::{BuildError, BuildReport, PageFailure, SiteBuilder};
pub use renderer::{PageRenderError, PageRenderResult, PageRenderer, PageRendererConfig};
pub use template::{PageData, STYLESHEET_NAME, Stylesheet, render_page, stylesheet};
