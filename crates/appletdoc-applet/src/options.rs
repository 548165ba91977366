//! Translation of applet options into query parameters and inline styles.

use std::fmt::Write;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::ReviewStatus;

/// Options forwarded to the embedded applet as query parameters.
pub const FORWARDED_KEYS: [&str; 8] = [
    "title",
    "background",
    "autoPlay",
    "position",
    "isPerspectiveCamera",
    "enablePan",
    "distance",
    "zoom",
];

/// Everything except unreserved characters and `/`.
const QUERY_VALUE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Map `enabled`/`disabled` to `true`/`false`.
///
/// Directive attributes have no boolean literals, so authors write
/// `enablePan=enabled`. Every other value is returned unchanged.
#[must_use]
pub fn normalize_booleanish(value: &str) -> &str {
    match value {
        "enabled" => "true",
        "disabled" => "false",
        other => other,
    }
}

/// Select the options forwarded to the applet.
///
/// Keeps [`FORWARDED_KEYS`] with non-empty values, in input order, with each
/// value passed through [`normalize_booleanish`].
///
/// ```
/// use appletdoc_applet::filter_and_encode_options;
///
/// let params = filter_and_encode_options([
///     ("title", "A"),
///     ("url", "x"),
///     ("zoom", ""),
///     ("background", "blue"),
/// ]);
/// assert_eq!(params, vec![("title", "A"), ("background", "blue")]);
/// ```
pub fn filter_and_encode_options<'a>(
    options: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Vec<(&'a str, &'a str)> {
    options
        .into_iter()
        .filter(|(key, value)| !value.is_empty() && FORWARDED_KEYS.contains(key))
        .map(|(key, value)| (key, normalize_booleanish(value)))
        .collect()
}

/// Build a query string from `key=value` pairs joined with `&`.
///
/// Values are percent-encoded; keys are emitted as-is.
#[must_use]
pub fn encode_query(params: &[(&str, &str)]) -> String {
    let mut query = String::new();
    for (i, (key, value)) in params.iter().enumerate() {
        if i > 0 {
            query.push('&');
        }
        let _ = write!(query, "{key}={}", utf8_percent_encode(value, QUERY_VALUE_SET));
    }
    query
}

/// Build the inline style of the applet container.
///
/// Height and width declarations appear only when non-empty, followed by the
/// border flagging `status`. Values are inserted verbatim.
#[must_use]
pub fn build_style(height: Option<&str>, width: Option<&str>, status: ReviewStatus) -> String {
    let mut style = String::new();
    if let Some(height) = height.filter(|h| !h.is_empty()) {
        let _ = write!(style, "height:{height};");
    }
    if let Some(width) = width.filter(|w| !w.is_empty()) {
        let _ = write!(style, "width:{width};");
    }
    if let Some(border) = status.border() {
        let _ = write!(style, "border: {border};");
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_booleanish() {
        assert_eq!(normalize_booleanish("enabled"), "true");
        assert_eq!(normalize_booleanish("disabled"), "false");
        assert_eq!(normalize_booleanish("other"), "other");
        assert_eq!(normalize_booleanish("Enabled"), "Enabled");
    }

    #[test]
    fn test_filter_drops_unknown_and_empty() {
        let params = filter_and_encode_options([
            ("title", "A"),
            ("url", "x"),
            ("zoom", ""),
            ("background", "blue"),
        ]);
        assert_eq!(params, vec![("title", "A"), ("background", "blue")]);
    }

    #[test]
    fn test_filter_normalizes_and_keeps_order() {
        let params = filter_and_encode_options([
            ("enablePan", "disabled"),
            ("fig", "a.png"),
            ("autoPlay", "enabled"),
            ("status", "reviewed"),
            ("height", "10px"),
            ("distance", "5"),
        ]);
        assert_eq!(
            params,
            vec![("enablePan", "false"), ("autoPlay", "true"), ("distance", "5")]
        );
    }

    #[test]
    fn test_filter_all_forwarded_keys() {
        let options: Vec<(&str, &str)> = FORWARDED_KEYS.iter().map(|k| (*k, "1")).collect();
        assert_eq!(filter_and_encode_options(options).len(), FORWARDED_KEYS.len());
    }

    #[test]
    fn test_encode_query() {
        assert_eq!(encode_query(&[]), "");
        assert_eq!(encode_query(&[("title", "Demo")]), "title=Demo");
        assert_eq!(
            encode_query(&[("title", "A B"), ("position", "1,2/3"), ("zoom", "a&b=c")]),
            "title=A%20B&position=1%2C2/3&zoom=a%26b%3Dc"
        );
    }

    #[test]
    fn test_encode_query_unreserved_and_unicode() {
        assert_eq!(encode_query(&[("title", "a-b.c_d~e")]), "title=a-b.c_d~e");
        assert_eq!(encode_query(&[("title", "é")]), "title=%C3%A9");
    }

    #[test]
    fn test_build_style_height_only() {
        assert_eq!(
            build_style(Some("10px"), None, ReviewStatus::Unreviewed),
            "height:10px;border: dotted red;"
        );
    }

    #[test]
    fn test_build_style_by_status() {
        assert_eq!(
            build_style(None, Some("50%"), ReviewStatus::InReview),
            "width:50%;border: dotted yellow;"
        );
        assert_eq!(
            build_style(Some("1em"), Some("2em"), ReviewStatus::Reviewed),
            "height:1em;width:2em;"
        );
        assert_eq!(build_style(None, None, ReviewStatus::Reviewed), "");
    }

    #[test]
    fn test_build_style_empty_values_are_absent() {
        assert_eq!(
            build_style(Some(""), Some(""), ReviewStatus::Unreviewed),
            "border: dotted red;"
        );
    }
}
