//! Leaf directive trait.
//!
//! Leaf directives use double-colon syntax: `::name[content]{attrs}`

use super::{DirectiveArgs, DirectiveContext, DirectiveError, DirectiveOutput, Replacements};

/// Handler for leaf directives: `::name[content]{attrs}`
///
/// Leaf directives are self-contained blocks (like void HTML elements).
///
/// # Thread Safety
///
/// Handlers implement `Send` only (not `Sync`) since each document gets its own
/// processor instance. For parallel builds, create one handler per document.
///
/// # Example
///
/// ```
/// use appletdoc_renderer::directive::{
///     DirectiveArgs, DirectiveContext, DirectiveError, DirectiveOutput, LeafDirective,
/// };
///
/// struct VideoDirective;
///
/// impl LeafDirective for VideoDirective {
///     fn name(&self) -> &str { "video" }
///
///     fn process(
///         &mut self,
///         args: DirectiveArgs,
///         ctx: &DirectiveContext,
///     ) -> Result<DirectiveOutput, DirectiveError> {
///         let src = args.get_non_empty("src").ok_or_else(|| DirectiveError::MissingOption {
///             directive: "video".to_owned(),
///             option: "src",
///             location: ctx.location(),
///         })?;
///         Ok(DirectiveOutput::html(format!(r#"<video src="{src}" controls></video>"#)))
///     }
/// }
/// ```
pub trait LeafDirective: Send {
    /// Directive name matched against `::name[...]`.
    fn name(&self) -> &str;

    /// Process the leaf directive.
    ///
    /// Returns:
    /// - [`DirectiveOutput::Html`] for HTML output that passes through pulldown-cmark
    /// - [`DirectiveOutput::Markdown`] for content that needs full pipeline processing
    /// - [`DirectiveOutput::Skip`] to pass through unchanged
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError`] when the invocation cannot be rendered. The
    /// directive line then produces no output.
    fn process(
        &mut self,
        args: DirectiveArgs,
        ctx: &DirectiveContext,
    ) -> Result<DirectiveOutput, DirectiveError>;

    /// Register string replacements to apply after rendering.
    fn post_process(&mut self, _replacements: &mut Replacements) {}

    /// Get warnings generated during processing.
    fn warnings(&self) -> &[String] {
        &[]
    }
}
