//! Pluggable directives API for CommonMark directive syntax.
//!
//! This module provides a trait-based extensibility system for handling CommonMark
//! directives: leaf `::name[content]{attrs}` and container `:::name` ... `:::`.
//! Inline `:name[...]` syntax is recognized and passed through unchanged.
//!
//! # Architecture
//!
//! The directive system uses a two-phase processing model:
//!
//! 1. **Preprocessing** ([`DirectiveProcessor::process`]): Converts directive syntax
//!    to HTML that passes through pulldown-cmark unchanged.
//!
//! 2. **Post-processing** ([`DirectiveProcessor::post_process`]): Applies string
//!    replacements registered by handlers through the [`Replacements`] collector.
//!
//! A handler that cannot render an invocation returns a [`DirectiveError`]. The
//! processor drops that invocation's output and collects the error so the caller
//! can fail the document.
//!
//! # Example
//!
//! ```
//! use appletdoc_renderer::directive::{
//!     DirectiveArgs, DirectiveContext, DirectiveError, DirectiveOutput, DirectiveProcessor,
//!     LeafDirective,
//! };
//!
//! struct YoutubeDirective;
//!
//! impl LeafDirective for YoutubeDirective {
//!     fn name(&self) -> &str { "youtube" }
//!
//!     fn process(
//!         &mut self,
//!         args: DirectiveArgs,
//!         _ctx: &DirectiveContext,
//!     ) -> Result<DirectiveOutput, DirectiveError> {
//!         Ok(DirectiveOutput::html(format!(
//!             r#"<iframe src="https://www.youtube.com/embed/{}"></iframe>"#,
//!             args.content
//!         )))
//!     }
//! }
//!
//! let mut processor = DirectiveProcessor::new().with_leaf(YoutubeDirective);
//! let output = processor.process("::youtube[dQw4w9WgXcQ]");
//! assert!(output.contains("embed/dQw4w9WgXcQ"));
//! ```

mod args;
mod container;
mod context;
mod error;
mod leaf;
mod output;
mod parser;
mod processor;
mod replacements;

pub use args::DirectiveArgs;
pub use container::ContainerDirective;
pub use context::DirectiveContext;
pub use error::DirectiveError;
pub use leaf::LeafDirective;
pub use output::DirectiveOutput;
pub use processor::{DirectiveProcessor, DirectiveProcessorConfig, FileExistsFn};
pub use replacements::Replacements;
