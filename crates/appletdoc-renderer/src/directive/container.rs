//! Container directive trait.
//!
//! Container directives use triple-colon syntax: `:::name` ... `:::`

use super::{DirectiveArgs, DirectiveContext, DirectiveError, DirectiveOutput, Replacements};

/// Handler for container directives: `:::name` ... `:::`
///
/// Container directives wrap arbitrary markdown and have start/end phases.
/// Handlers manage their own nesting state internally (e.g., via a stack).
///
/// HTML returned from [`start`](Self::start) should end with a newline so the
/// body starts after a blank line and is parsed as markdown rather than as
/// part of the HTML block.
///
/// # Example
///
/// ```
/// use appletdoc_renderer::directive::{
///     ContainerDirective, DirectiveArgs, DirectiveContext, DirectiveError, DirectiveOutput,
/// };
///
/// struct AsideDirective;
///
/// impl ContainerDirective for AsideDirective {
///     fn name(&self) -> &str { "aside" }
///
///     fn start(
///         &mut self,
///         _args: DirectiveArgs,
///         _ctx: &DirectiveContext,
///     ) -> Result<DirectiveOutput, DirectiveError> {
///         Ok(DirectiveOutput::html("<aside>\n"))
///     }
///
///     fn end(&mut self, _line: usize) -> Option<String> {
///         Some("\n</aside>".to_owned())
///     }
/// }
/// ```
pub trait ContainerDirective: Send {
    /// Directive name matched against `:::name`.
    fn name(&self) -> &str;

    /// Handle opening `:::name[content]{attrs}`.
    ///
    /// Returns [`DirectiveOutput::Html`] to emit opening HTML, or
    /// [`DirectiveOutput::Skip`] to leave the container unhandled.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError`] when the invocation cannot be rendered. The
    /// processor then drops the whole container, body included, and does not
    /// call [`end`](Self::end) for it.
    fn start(
        &mut self,
        args: DirectiveArgs,
        ctx: &DirectiveContext,
    ) -> Result<DirectiveOutput, DirectiveError>;

    /// Handle closing `:::`.
    ///
    /// Returns closing HTML, or `None` to emit nothing. Only called for a
    /// container whose `start()` succeeded.
    fn end(&mut self, line: usize) -> Option<String>;

    /// Register string replacements to apply after rendering.
    fn post_process(&mut self, _replacements: &mut Replacements) {}

    /// Get warnings generated during processing.
    fn warnings(&self) -> &[String] {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    struct TestAside {
        open: Vec<usize>,
    }

    impl ContainerDirective for TestAside {
        fn name(&self) -> &'static str {
            "aside"
        }

        fn start(
            &mut self,
            args: DirectiveArgs,
            ctx: &DirectiveContext,
        ) -> Result<DirectiveOutput, DirectiveError> {
            self.open.push(ctx.line);
            Ok(DirectiveOutput::html(format!(
                "<aside data-title=\"{}\">\n",
                args.content
            )))
        }

        fn end(&mut self, _line: usize) -> Option<String> {
            self.open.pop()?;
            Some("\n</aside>".to_owned())
        }
    }

    #[test]
    fn test_container_start_and_end() {
        let mut aside = TestAside { open: Vec::new() };
        let ctx = DirectiveContext {
            source_path: None,
            base_dir: Path::new("."),
            line: 5,
            file_exists: &|_| false,
        };

        let output = aside.start(DirectiveArgs::parse("Tip", ""), &ctx).unwrap();
        assert!(matches!(output, DirectiveOutput::Html(s) if s.contains(r#"data-title="Tip""#)));
        assert_eq!(aside.open, vec![5]);

        assert_eq!(aside.end(9), Some("\n</aside>".to_owned()));
        assert!(aside.open.is_empty());
    }

    #[test]
    fn test_default_hooks() {
        let mut aside = TestAside { open: Vec::new() };
        let mut replacements = Replacements::new();
        aside.post_process(&mut replacements);
        assert!(replacements.is_empty());
        assert!(aside.warnings().is_empty());
    }
}
