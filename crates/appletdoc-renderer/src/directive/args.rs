//! Directive argument parsing.
//!
//! Parses the `[content]{#id .class key="value"}` syntax from directives.

use indexmap::IndexMap;

/// Parsed arguments from directive syntax.
///
/// Represents the content and attributes extracted from a directive:
/// `::name[content]{#id .class key="value"}`
///
/// Key-value attributes keep the order in which they were written, so
/// handlers that forward options (e.g. as URL query parameters) produce
/// stable output.
///
/// # Example
///
/// ```
/// use appletdoc_renderer::directive::DirectiveArgs;
///
/// let args = DirectiveArgs::parse("hello", r#"#my-id .foo .bar url="scene1""#);
/// assert_eq!(args.content, "hello");
/// assert_eq!(args.id, Some("my-id".to_string()));
/// assert_eq!(args.classes, vec!["foo", "bar"]);
/// assert_eq!(args.get("url"), Some("scene1"));
/// ```
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct DirectiveArgs {
    /// Content from brackets: `[content]` (empty string if not provided).
    pub content: String,
    /// ID from attributes: `{#id}`.
    pub id: Option<String>,
    /// Classes from attributes: `{.class1 .class2}`.
    pub classes: Vec<String>,
    /// Key-value attributes in source order: `{key="value"}`.
    pub attrs: IndexMap<String, String>,
}

impl DirectiveArgs {
    /// Parse content and attributes string into structured arguments.
    ///
    /// # Arguments
    ///
    /// * `content` - The content from brackets `[content]`
    /// * `attrs_str` - The attributes string from braces `{...}` (without braces)
    #[must_use]
    pub fn parse(content: &str, attrs_str: &str) -> Self {
        let mut args = Self {
            content: content.to_owned(),
            ..Default::default()
        };

        if attrs_str.is_empty() {
            return args;
        }

        // Parse attributes: #id, .class, key="value", key='value', or key=value
        let mut remaining = attrs_str.trim();

        while !remaining.is_empty() {
            remaining = remaining.trim_start();

            if let Some(rest) = remaining.strip_prefix('#') {
                let end = selector_end(rest);
                args.id = Some(rest[..end].to_owned());
                remaining = &rest[end..];
            } else if let Some(rest) = remaining.strip_prefix('.') {
                let end = selector_end(rest);
                args.classes.push(rest[..end].to_owned());
                remaining = &rest[end..];
            } else if let Some((key, value, rest)) = parse_key_value(remaining) {
                args.attrs.insert(key.to_owned(), value.to_owned());
                remaining = rest;
            } else {
                // Skip unrecognized character
                let skip = remaining.chars().next().map_or(1, char::len_utf8);
                remaining = &remaining[skip..];
            }
        }

        args
    }

    /// Get an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Get an attribute value by key, treating an empty value as absent.
    #[must_use]
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Reconstruct the original syntax string `[content]{attrs}`.
    ///
    /// Used for pass-through when a directive is not handled.
    ///
    /// # Example
    ///
    /// ```
    /// use appletdoc_renderer::directive::DirectiveArgs;
    ///
    /// let args = DirectiveArgs::parse("hello", r#"#my-id .foo fig="a.png""#);
    /// assert_eq!(args.to_syntax(), r#"[hello]{#my-id .foo fig="a.png"}"#);
    /// ```
    #[must_use]
    pub fn to_syntax(&self) -> String {
        let mut result = String::new();

        if !self.content.is_empty() {
            result.push('[');
            result.push_str(&self.content);
            result.push(']');
        }

        let mut attrs_parts = Vec::new();

        if let Some(id) = &self.id {
            attrs_parts.push(format!("#{id}"));
        }

        for class in &self.classes {
            attrs_parts.push(format!(".{class}"));
        }

        for (key, value) in &self.attrs {
            let escaped = value.replace('"', r#"\""#);
            attrs_parts.push(format!(r#"{key}="{escaped}""#));
        }

        if !attrs_parts.is_empty() {
            result.push('{');
            result.push_str(&attrs_parts.join(" "));
            result.push('}');
        }

        result
    }
}

/// Byte length of an `#id` or `.class` selector body.
fn selector_end(s: &str) -> usize {
    s.find(|c: char| c.is_whitespace() || c == '.' || c == '#')
        .unwrap_or(s.len())
}

/// Parse a key-value pair from the attributes string.
///
/// Supports: `key="value"`, `key='value'`, `key=value`
fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let eq_pos = s.find('=')?;
    let key = s[..eq_pos].trim();

    if key.is_empty() || key.starts_with('#') || key.starts_with('.') || key.contains(' ') {
        return None;
    }

    let after_eq = &s[eq_pos + 1..];

    if let Some(stripped) = after_eq.strip_prefix('"') {
        let end_quote = stripped.find('"')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else if let Some(stripped) = after_eq.strip_prefix('\'') {
        let end_quote = stripped.find('\'')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else {
        // Unquoted value (until whitespace)
        let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
        Some((key, &after_eq[..end], &after_eq[end..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_args() {
        let args = DirectiveArgs::parse("", "");
        assert_eq!(args.content, "");
        assert_eq!(args.id, None);
        assert!(args.classes.is_empty());
        assert!(args.attrs.is_empty());
    }

    #[test]
    fn test_id_and_classes() {
        let args = DirectiveArgs::parse("", "#my-id .foo .bar");
        assert_eq!(args.id, Some("my-id".to_owned()));
        assert_eq!(args.classes, vec!["foo", "bar"]);
    }

    #[test]
    fn test_compact_selectors() {
        let args = DirectiveArgs::parse("", "#id.foo.bar");
        assert_eq!(args.id, Some("id".to_owned()));
        assert_eq!(args.classes, vec!["foo", "bar"]);
    }

    #[test]
    fn test_quoted_and_unquoted_values() {
        let args = DirectiveArgs::parse("", r#"title="Hello World" bg='blue' zoom=2"#);
        assert_eq!(args.get("title"), Some("Hello World"));
        assert_eq!(args.get("bg"), Some("blue"));
        assert_eq!(args.get("zoom"), Some("2"));
    }

    #[test]
    fn test_case_sensitive_keys() {
        let args = DirectiveArgs::parse("", "autoPlay=enabled isPerspectiveCamera=disabled");
        assert_eq!(args.get("autoPlay"), Some("enabled"));
        assert_eq!(args.get("autoplay"), None);
        assert_eq!(args.get("isPerspectiveCamera"), Some("disabled"));
    }

    #[test]
    fn test_attrs_keep_source_order() {
        let args = DirectiveArgs::parse("", "zoom=2 title=A background=blue");
        let keys: Vec<&str> = args.attrs.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zoom", "title", "background"]);
    }

    #[test]
    fn test_empty_quoted_value() {
        let args = DirectiveArgs::parse("", r#"zoom="""#);
        assert_eq!(args.get("zoom"), Some(""));
        assert_eq!(args.get_non_empty("zoom"), None);
    }

    #[test]
    fn test_url_value_with_equals_and_slashes() {
        let args = DirectiveArgs::parse("", r#"url="lin-alg/scene?x=1""#);
        assert_eq!(args.get("url"), Some("lin-alg/scene?x=1"));
    }

    #[test]
    fn test_unrecognized_multibyte_character_is_skipped() {
        let args = DirectiveArgs::parse("", "→ zoom=2");
        assert_eq!(args.get("zoom"), Some("2"));
    }

    #[test]
    fn test_to_syntax_empty() {
        assert_eq!(DirectiveArgs::default().to_syntax(), "");
    }

    #[test]
    fn test_to_syntax_content_only() {
        let args = DirectiveArgs::parse("hello", "");
        assert_eq!(args.to_syntax(), "[hello]");
    }

    #[test]
    fn test_to_syntax_preserves_attr_order() {
        let args = DirectiveArgs::parse("cap", r#"url="s" fig="f.png" .wide"#);
        assert_eq!(args.to_syntax(), r#"[cap]{.wide url="s" fig="f.png"}"#);
    }

    #[test]
    fn test_to_syntax_escapes_quotes() {
        let args = DirectiveArgs::parse("", r#"title='say "hi"'"#);
        assert_eq!(args.to_syntax(), r#"{title="say \"hi\""}"#);
    }
}
