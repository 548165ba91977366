//! Directive syntax parsing.
//!
//! Parses `CommonMark` directive syntax: `:name`, `::name`, `:::name`

use super::DirectiveArgs;

/// Parsed directive from a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParsedDirective {
    /// Inline directive: `:name[content]{attrs}`
    Inline { name: String, args: DirectiveArgs },
    /// Leaf directive: `::name[content]{attrs}`
    Leaf { name: String, args: DirectiveArgs },
    /// Container opening: `:::name[content]{attrs}`
    ContainerStart {
        name: String,
        args: DirectiveArgs,
        colon_count: usize,
    },
    /// Container closing: `:::`
    ContainerEnd { colon_count: usize },
}

/// Parse a line for directive syntax.
///
/// Returns the directive with its byte range in `line`, or `None` if the
/// first colon on the line does not start a directive.
pub(crate) fn parse_line(line: &str) -> Option<(ParsedDirective, usize, usize)> {
    let start = line.find(':')?;
    let colon_count = count_colons(&line[start..]);
    let after_colons = &line[start + colon_count..];

    if colon_count >= 3 && after_colons.trim().is_empty() {
        return Some((
            ParsedDirective::ContainerEnd { colon_count },
            start,
            line.len(),
        ));
    }

    let (name, args, consumed) = parse_name_and_args(after_colons)?;
    let end = start + colon_count + consumed;

    let directive = match colon_count {
        1 => ParsedDirective::Inline { name, args },
        2 => ParsedDirective::Leaf { name, args },
        _ => ParsedDirective::ContainerStart {
            name,
            args,
            colon_count,
        },
    };

    Some((directive, start, end))
}

/// Parse a whole line for a container directive.
///
/// Container directives take the entire line (leading/trailing whitespace
/// allowed). Returns `None` if the line is not a container directive.
pub(crate) fn parse_container_line(line: &str) -> Option<ParsedDirective> {
    let trimmed = line.trim();
    if !trimmed.starts_with(":::") {
        return None;
    }

    let colon_count = count_colons(trimmed);
    let after_colons = trimmed[colon_count..].trim();

    if after_colons.is_empty() {
        return Some(ParsedDirective::ContainerEnd { colon_count });
    }

    let (name, args, _) = parse_name_and_args(after_colons)?;
    Some(ParsedDirective::ContainerStart {
        name,
        args,
        colon_count,
    })
}

fn count_colons(s: &str) -> usize {
    s.bytes().take_while(|&b| b == b':').count()
}

/// Parse `name[content]{attrs}` and return the bytes consumed.
fn parse_name_and_args(s: &str) -> Option<(String, DirectiveArgs, usize)> {
    let name_end = s
        .find(|c: char| c == '[' || c == '{' || c.is_whitespace())
        .unwrap_or(s.len());
    let name = &s[..name_end];
    if !is_valid_directive_name(name) {
        return None;
    }

    let mut pos = name_end;
    let (content, consumed) = parse_delimited(&s[pos..], '[', ']');
    pos += consumed;
    let (attrs, consumed) = parse_delimited(&s[pos..], '{', '}');
    pos += consumed;

    Some((name.to_owned(), DirectiveArgs::parse(content, attrs), pos))
}

/// Check if a name is a valid directive name.
///
/// Valid names contain only alphanumeric characters, hyphens, and underscores.
fn is_valid_directive_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Parse a balanced `open ... close` group at the start of `s`.
///
/// Returns (inner text, bytes consumed). An absent or unclosed group
/// consumes nothing.
fn parse_delimited(s: &str, open: char, close: char) -> (&str, usize) {
    if !s.starts_with(open) {
        return ("", 0);
    }

    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return (&s[open.len_utf8()..i], i + close.len_utf8());
            }
        }
    }

    ("", 0)
}
