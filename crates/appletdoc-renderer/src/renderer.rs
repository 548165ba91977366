//! Markdown to HTML rendering with directive pre- and post-processing.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use crate::directive::{DirectiveError, DirectiveProcessor};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Title extracted from first H1 heading (if `extract_title` was enabled).
    pub title: Option<String>,
    /// Warnings generated during conversion (e.g., missing figure images).
    pub warnings: Vec<String>,
}

/// Error returned when a document cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// One or more directive invocations failed.
    #[error("{}", join_errors(.0))]
    Directive(Vec<DirectiveError>),
}

fn join_errors(errors: &[DirectiveError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Markdown renderer producing HTML5.
///
/// Directive syntax is expanded by a [`DirectiveProcessor`] before parsing,
/// and the processor's replacements are applied to the rendered HTML.
#[derive(Clone, Copy, Debug)]
pub struct MarkdownRenderer {
    gfm: bool,
    extract_title: bool,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Create a new renderer with GFM enabled by default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gfm: true,
            extract_title: false,
        }
    }

    /// Enable title extraction from first H1 heading.
    ///
    /// The heading is still rendered.
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.extract_title = true;
        self
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render markdown, expanding directives with `directives`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Directive`] if any directive invocation failed.
    /// Nothing is rendered in that case.
    pub fn render(
        &self,
        markdown: &str,
        mut directives: DirectiveProcessor,
    ) -> Result<RenderResult, RenderError> {
        let preprocessed = directives.process(markdown);
        if !directives.errors().is_empty() {
            return Err(RenderError::Directive(directives.into_errors()));
        }

        let parser = Parser::new_ext(&preprocessed, self.parser_options());
        let mut output = String::with_capacity(preprocessed.len() + preprocessed.len() / 2);
        let title = if self.extract_title {
            let events: Vec<Event<'_>> = parser.collect();
            let title = first_h1_text(&events);
            html::push_html(&mut output, events.into_iter());
            title
        } else {
            html::push_html(&mut output, parser);
            None
        };

        directives.post_process(&mut output);

        Ok(RenderResult {
            html: output,
            title,
            warnings: directives.warnings(),
        })
    }
}

/// Plain text of the first level-one heading, if any.
fn first_h1_text(events: &[Event<'_>]) -> Option<String> {
    let start = events.iter().position(|event| {
        matches!(
            event,
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            })
        )
    })?;

    let mut text = String::new();
    for event in &events[start + 1..] {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }

    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}
