//! Directive error types.

/// Error returned by a directive handler that cannot process an invocation.
///
/// A failed invocation emits no output. The processor collects the error and
/// keeps going so that every failure in a document is reported at once.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    /// A required option was absent or empty.
    #[error("{location}: directive '{directive}' requires option '{option}'")]
    MissingOption {
        /// Directive name (e.g. `applet`).
        directive: String,
        /// Missing option key.
        option: &'static str,
        /// Source location (`path:line` or `line N`).
        location: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_option_message() {
        let err = DirectiveError::MissingOption {
            directive: "applet".to_owned(),
            option: "fig",
            location: "guide.md:3".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "guide.md:3: directive 'applet' requires option 'fig'"
        );
    }
}
