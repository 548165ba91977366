//! Markdown renderer with pluggable CommonMark directives.
//!
//! This crate provides a [`MarkdownRenderer`] that runs markdown through a
//! [`DirectiveProcessor`](directive::DirectiveProcessor) before and after
//! pulldown-cmark renders it to HTML, plus the [`FigureRenderer`] capability
//! directives use to emit captioned `<figure>` elements.
//!
//! # Example
//!
//! ```
//! use appletdoc_renderer::MarkdownRenderer;
//! use appletdoc_renderer::directive::DirectiveProcessor;
//!
//! let result = MarkdownRenderer::new()
//!     .with_title_extraction()
//!     .render("# Hello\n\n**Bold** text", DirectiveProcessor::new())
//!     .unwrap();
//!
//! assert_eq!(result.title.as_deref(), Some("Hello"));
//! assert!(result.html.contains("<strong>Bold</strong>"));
//! ```

pub mod directive;
mod fence;
mod figure;
mod renderer;
mod util;

pub use figure::{
    Caption, FigureAlign, FigureChild, FigureNode, FigureRenderer, FigureSpec,
    HtmlFigureRenderer, ImageNode, RenderedFigure, UnknownAlign,
};
pub use renderer::{MarkdownRenderer, RenderError, RenderResult};
pub use util::escape_html;
