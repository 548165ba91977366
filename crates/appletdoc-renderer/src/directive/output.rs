//! Directive output types.

/// Output from directive processing.
///
/// - [`Html`](Self::Html): HTML that passes through pulldown-cmark unchanged
/// - [`Markdown`](Self::Markdown): Markdown that is expanded again by the processor
/// - [`Skip`](Self::Skip): Pass through the directive unchanged
///
/// Failures are reported separately through
/// [`DirectiveError`](super::DirectiveError).
///
/// # Example
///
/// ```
/// use appletdoc_renderer::directive::DirectiveOutput;
///
/// let output = DirectiveOutput::html("<figure></figure>");
/// assert!(matches!(output, DirectiveOutput::Html(_)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveOutput {
    /// HTML that passes through pulldown-cmark unchanged.
    Html(String),
    /// Markdown that needs to be processed through the full pipeline.
    Markdown(String),
    /// Don't handle this directive (pass through unchanged).
    Skip,
}

impl DirectiveOutput {
    /// Create an HTML output.
    #[must_use]
    pub fn html(s: impl Into<String>) -> Self {
        Self::Html(s.into())
    }

    /// Create a markdown output.
    #[must_use]
    pub fn markdown(s: impl Into<String>) -> Self {
        Self::Markdown(s.into())
    }
}
