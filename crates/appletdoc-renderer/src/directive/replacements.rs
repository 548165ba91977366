//! Single-pass string replacement for post-processing.

/// Collects string replacements registered by directive handlers.
///
/// Handlers register `(from, to)` pairs during post-processing and the
/// processor applies them once over the rendered HTML, instead of every
/// handler rewriting the whole document.
///
/// # Example
///
/// ```
/// use appletdoc_renderer::directive::Replacements;
///
/// let mut html = "<p>APPLET_0</p>".to_string();
/// let mut replacements = Replacements::new();
/// replacements.add("<p>APPLET_0</p>", "<figure></figure>");
/// replacements.apply(&mut html);
///
/// assert_eq!(html, "<figure></figure>");
/// ```
#[derive(Debug, Default)]
pub struct Replacements {
    items: Vec<(String, String)>,
}

impl Replacements {
    /// Create a new empty replacements collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new replacements collector with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Register a replacement: all occurrences of `from` will be replaced with `to`.
    ///
    /// Replacements are applied in the order they are added.
    pub fn add(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.items.push((from.into(), to.into()));
    }

    /// Apply all registered replacements, consuming the collector.
    pub fn apply(self, html: &mut String) {
        for (from, to) in self.items {
            if html.contains(&from) {
                *html = html.replace(&from, &to);
            }
        }
    }

    /// Check if there are any replacements registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of registered replacements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_replacements() {
        let mut html = "unchanged".to_owned();
        Replacements::new().apply(&mut html);
        assert_eq!(html, "unchanged");
    }

    #[test]
    fn test_multiple_replacements_in_order() {
        let mut html = "<p></p>\n<p>x</p>".to_owned();
        let mut replacements = Replacements::with_capacity(2);
        replacements.add("<p></p>\n", "");
        replacements.add("<p>x</p>", "<p>y</p>");
        assert_eq!(replacements.len(), 2);
        replacements.apply(&mut html);
        assert_eq!(html, "<p>y</p>");
    }

    #[test]
    fn test_replacement_not_found() {
        let mut html = "hello".to_owned();
        let mut replacements = Replacements::new();
        replacements.add("foo", "bar");
        assert!(!replacements.is_empty());
        replacements.apply(&mut html);
        assert_eq!(html, "hello");
    }
}
