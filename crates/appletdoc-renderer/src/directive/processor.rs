//! Directive processor for `CommonMark` directives.
//!
//! Handles preprocessing (before pulldown-cmark) and post-processing (after rendering).

use std::path::{Path, PathBuf};

use crate::fence::FenceTracker;

use super::parser::{ParsedDirective, parse_container_line, parse_line};
use super::{
    ContainerDirective, DirectiveContext, DirectiveError, DirectiveOutput, LeafDirective,
    Replacements,
};

/// Type alias for the file existence callback.
pub type FileExistsFn = dyn Fn(&Path) -> bool + Send;

/// Configuration for the directive processor.
pub struct DirectiveProcessorConfig {
    /// Base directory for resolving relative paths (e.g., figure images).
    pub base_dir: PathBuf,
    /// Path to the source file being rendered (if known).
    pub source_path: Option<PathBuf>,
    /// Callback to check whether a file exists.
    ///
    /// Default: [`Path::is_file`]
    pub file_exists: Option<Box<FileExistsFn>>,
    /// Maximum markdown expansion depth to prevent infinite recursion.
    ///
    /// Default: 10
    pub max_depth: usize,
}

impl Default for DirectiveProcessorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectiveProcessorConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            source_path: None,
            file_exists: None,
            max_depth: 10,
        }
    }

    /// Set the base directory for resolving relative paths.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Set the source file path.
    #[must_use]
    pub fn with_source_path(mut self, source_path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }

    /// Set the file existence callback.
    #[must_use]
    pub fn with_file_exists<F>(mut self, file_exists: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + 'static,
    {
        self.file_exists = Some(Box::new(file_exists));
        self
    }

    /// Set the maximum markdown expansion depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    fn create_context(&self, line: usize) -> DirectiveContext<'_> {
        DirectiveContext {
            source_path: self.source_path.as_deref(),
            base_dir: &self.base_dir,
            line,
            file_exists: self.file_exists.as_ref().map_or_else(
                || &default_file_exists as &dyn Fn(&Path) -> bool,
                |f| f.as_ref(),
            ),
        }
    }
}

fn default_file_exists(path: &Path) -> bool {
    path.is_file()
}

/// An open container directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OpenContainer {
    /// Handled by `container_handlers[idx]`.
    Handled(usize),
    /// No handler took it; the opening line was kept as text, and so is the
    /// matching `:::`.
    Passthrough,
    /// The handler failed; the body is dropped up to the matching `:::`.
    Failed,
}

/// Processor for `CommonMark` directives.
///
/// Handles both preprocessing (before pulldown-cmark) and post-processing
/// (after rendering) of directive syntax. Handler failures are collected as
/// [`DirectiveError`]s; the failing directive produces no output.
///
/// # Example
///
/// ```
/// use appletdoc_renderer::directive::{
///     DirectiveArgs, DirectiveContext, DirectiveError, DirectiveOutput, DirectiveProcessor,
///     LeafDirective,
/// };
///
/// struct HrDirective;
///
/// impl LeafDirective for HrDirective {
///     fn name(&self) -> &str { "hr" }
///     fn process(
///         &mut self,
///         _args: DirectiveArgs,
///         _ctx: &DirectiveContext,
///     ) -> Result<DirectiveOutput, DirectiveError> {
///         Ok(DirectiveOutput::html("<hr class=\"fancy\">"))
///     }
/// }
///
/// let mut processor = DirectiveProcessor::new().with_leaf(HrDirective);
/// let output = processor.process("::hr");
/// assert_eq!(output, "<hr class=\"fancy\">");
/// assert!(processor.errors().is_empty());
/// ```
pub struct DirectiveProcessor {
    config: DirectiveProcessorConfig,
    leaf_handlers: Vec<Box<dyn LeafDirective>>,
    container_handlers: Vec<Box<dyn ContainerDirective>>,
    fence: FenceTracker,
    open_containers: Vec<OpenContainer>,
    warnings: Vec<String>,
    errors: Vec<DirectiveError>,
}

impl Default for DirectiveProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectiveProcessor {
    /// Create a new directive processor with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DirectiveProcessorConfig::default())
    }

    /// Create a new directive processor with custom configuration.
    #[must_use]
    pub fn with_config(config: DirectiveProcessorConfig) -> Self {
        Self {
            config,
            leaf_handlers: Vec::new(),
            container_handlers: Vec::new(),
            fence: FenceTracker::new(),
            open_containers: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Register a leaf directive handler.
    #[must_use]
    pub fn with_leaf<D: LeafDirective + 'static>(mut self, handler: D) -> Self {
        self.leaf_handlers.push(Box::new(handler));
        self
    }

    /// Register a container directive handler.
    #[must_use]
    pub fn with_container<D: ContainerDirective + 'static>(mut self, handler: D) -> Self {
        self.container_handlers.push(Box::new(handler));
        self
    }

    /// Preprocess markdown, converting directives to HTML.
    ///
    /// When a directive returns [`DirectiveOutput::Markdown`], the returned content
    /// is processed again (up to `max_depth` levels).
    #[must_use]
    pub fn process(&mut self, input: &str) -> String {
        let output = self.process_with_depth(input, 0);
        self.finalize();
        output
    }

    fn process_with_depth(&mut self, input: &str, depth: usize) -> String {
        if depth > self.config.max_depth {
            self.warnings.push(format!(
                "Maximum directive expansion depth ({}) exceeded",
                self.config.max_depth
            ));
            return input.to_owned();
        }

        let mut output = String::with_capacity(input.len());
        let line_count = input.lines().count();

        for (idx, line) in input.lines().enumerate() {
            let Some(processed) = self.process_line(line, idx + 1, depth) else {
                continue;
            };
            output.push_str(&processed);

            if idx + 1 < line_count || input.ends_with('\n') {
                output.push('\n');
            }
        }

        output
    }

    /// Process one line. Returns `None` when the line is dropped entirely.
    fn process_line(&mut self, line: &str, line_num: usize, depth: usize) -> Option<String> {
        self.fence.update(line);
        let suppressed = self.is_suppressed();

        if self.fence.in_fence() {
            return (!suppressed).then(|| line.to_owned());
        }

        if let Some(directive) = parse_container_line(line) {
            return self.dispatch_container(directive, line, line_num, depth, suppressed);
        }

        if suppressed {
            return None;
        }

        let indent = line.len() - line.trim_start().len();
        if indent >= 4 {
            return Some(line.to_owned());
        }

        let trimmed = line.trim();
        if let Some((directive @ ParsedDirective::Leaf { .. }, 0, end)) = parse_line(trimmed)
            && end == trimmed.len()
        {
            return Some(self.expand_leaf(directive, line, line_num, depth));
        }

        self.warn_mid_line_leaves(line, line_num);
        Some(line.to_owned())
    }

    /// Whether an enclosing container failed and its body is dropped.
    fn is_suppressed(&self) -> bool {
        self.open_containers.contains(&OpenContainer::Failed)
    }

    fn expand_leaf(
        &mut self,
        directive: ParsedDirective,
        line: &str,
        line_num: usize,
        depth: usize,
    ) -> String {
        match self.dispatch_leaf(directive, line_num) {
            Ok(DirectiveOutput::Html(html)) => html,
            Ok(DirectiveOutput::Markdown(md)) => self.process_with_depth(&md, depth + 1),
            Ok(DirectiveOutput::Skip) => line.to_owned(),
            Err(err) => {
                self.errors.push(err);
                String::new()
            }
        }
    }

    /// Leaf directives are block-level. One sharing its line with other text
    /// is left as text, with a warning when a handler is registered for it.
    fn warn_mid_line_leaves(&mut self, line: &str, line_num: usize) {
        let mut remaining = line;
        while let Some(colon) = remaining.find(':') {
            match parse_line(remaining) {
                Some((ParsedDirective::Leaf { name, .. }, _, end)) => {
                    if self.leaf_handlers.iter().any(|h| h.name() == name) {
                        let location = self.config.create_context(line_num).location();
                        self.warnings.push(format!(
                            "{location}: ::{name} must be on its own line, left as text"
                        ));
                    }
                    remaining = &remaining[end..];
                }
                Some((_, _, end)) => remaining = &remaining[end..],
                None => {
                    let run = remaining[colon..]
                        .bytes()
                        .take_while(|&b| b == b':')
                        .count();
                    remaining = &remaining[colon + run..];
                }
            }
        }
    }

    fn dispatch_container(
        &mut self,
        directive: ParsedDirective,
        line: &str,
        line_num: usize,
        depth: usize,
        suppressed: bool,
    ) -> Option<String> {
        match directive {
            ParsedDirective::ContainerStart { name, args, .. } => {
                if suppressed {
                    self.open_containers.push(OpenContainer::Failed);
                    return None;
                }

                let Some(idx) = self
                    .container_handlers
                    .iter()
                    .position(|h| h.name() == name)
                else {
                    self.open_containers.push(OpenContainer::Passthrough);
                    return Some(line.to_owned());
                };

                tracing::debug!(name = %name, line = line_num, "Opening container directive");
                let ctx = self.config.create_context(line_num);
                match self.container_handlers[idx].start(args, &ctx) {
                    Ok(DirectiveOutput::Html(html)) => {
                        self.open_containers.push(OpenContainer::Handled(idx));
                        Some(html)
                    }
                    Ok(DirectiveOutput::Markdown(md)) => {
                        self.open_containers.push(OpenContainer::Handled(idx));
                        Some(self.process_with_depth(&md, depth + 1))
                    }
                    Ok(DirectiveOutput::Skip) => {
                        self.open_containers.push(OpenContainer::Passthrough);
                        Some(line.to_owned())
                    }
                    Err(err) => {
                        self.errors.push(err);
                        self.open_containers.push(OpenContainer::Failed);
                        None
                    }
                }
            }
            ParsedDirective::ContainerEnd { .. } => {
                let Some(open) = self.open_containers.pop() else {
                    self.warnings.push(format!(
                        "line {line_num}: stray ::: with no opening directive"
                    ));
                    return Some(line.to_owned());
                };

                match open {
                    OpenContainer::Handled(idx) => Some(
                        self.container_handlers[idx]
                            .end(line_num)
                            .unwrap_or_default(),
                    ),
                    OpenContainer::Passthrough => Some(line.to_owned()),
                    OpenContainer::Failed => None,
                }
            }
            _ => unreachable!("dispatch_container only handles container directives"),
        }
    }

    fn dispatch_leaf(
        &mut self,
        directive: ParsedDirective,
        line_num: usize,
    ) -> Result<DirectiveOutput, DirectiveError> {
        let ParsedDirective::Leaf { name, args } = directive else {
            return Ok(DirectiveOutput::Skip);
        };

        match self.leaf_handlers.iter().position(|h| h.name() == name) {
            Some(idx) => {
                tracing::debug!(name = %name, line = line_num, "Dispatching leaf directive");
                let ctx = self.config.create_context(line_num);
                self.leaf_handlers[idx].process(args, &ctx)
            }
            None => Ok(DirectiveOutput::Skip),
        }
    }

    fn finalize(&mut self) {
        let unclosed = self.open_containers.len();
        self.open_containers.clear();
        if unclosed > 0 {
            self.warnings.push(format!(
                "{unclosed} unclosed container directive(s) (missing closing :::)"
            ));
        }
    }

    /// Post-process rendered HTML.
    ///
    /// Collects all replacements from handlers and applies them in a single pass.
    pub fn post_process(&mut self, html: &mut String) {
        let capacity = self.leaf_handlers.len() + self.container_handlers.len();
        let mut replacements = Replacements::with_capacity(capacity);

        for handler in &mut self.leaf_handlers {
            handler.post_process(&mut replacements);
        }
        for handler in &mut self.container_handlers {
            handler.post_process(&mut replacements);
        }

        replacements.apply(html);
    }

    /// Get all warnings generated during processing.
    ///
    /// Includes warnings from the processor itself and from all handlers.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut all_warnings = self.warnings.clone();

        for handler in &self.leaf_handlers {
            all_warnings.extend(handler.warnings().iter().cloned());
        }
        for handler in &self.container_handlers {
            all_warnings.extend(handler.warnings().iter().cloned());
        }

        all_warnings
    }

    /// Errors from directive invocations that failed.
    #[must_use]
    pub fn errors(&self) -> &[DirectiveError] {
        &self.errors
    }

    /// Consume the processor and return the collected errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<DirectiveError> {
        self.errors
    }
}
