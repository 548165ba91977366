//! The `applet` directive.
//!
//! Renders a captioned figure of the applet's print image and inserts a
//! lazily loaded `<iframe>` of the live applet as its first child.
//!
//! # Syntax
//!
//! Leaf form, with the bracketed content as caption:
//!
//! ```markdown
//! ::applet[Rotation of a cube]{url="cube/rotate" fig="img/cube.png" status="in-review"}
//! ```
//!
//! Container form, with the markdown body as caption:
//!
//! ```markdown
//! :::applet{url="cube/rotate" fig="img/cube.png" height="400px"}
//! Rotation of a **cube**.
//! :::
//! ```

use appletdoc_renderer::directive::{
    ContainerDirective, DirectiveArgs, DirectiveContext, DirectiveError, DirectiveOutput,
    LeafDirective, Replacements,
};
use appletdoc_renderer::{
    Caption, FigureAlign, FigureChild, FigureRenderer, FigureSpec, HtmlFigureRenderer,
    RenderedFigure,
};

use crate::{ReviewStatus, build_style, encode_query, filter_and_encode_options};
use crate::options::FORWARDED_KEYS;

/// Base URL used when neither settings nor environment provide one.
pub const DEFAULT_BASE_URL: &str = "";

/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "BASE_URL";

/// Class marking the figure as the printable stand-in for the applet.
pub const DEFAULT_PRINT_CLASS: &str = "applet-print-figure";

const DIRECTIVE_NAME: &str = "applet";

/// Options consumed by the directive itself rather than forwarded.
const LOCAL_KEYS: [&str; 9] = [
    "url", "fig", "status", "height", "width", "alt", "align", "figwidth", "figclass",
];

const EMPTY_CAPTION: &str = "<figcaption>\n</figcaption>\n";

/// Settings shared by every applet on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppletSettings {
    /// Prefix prepended to every applet `url`.
    pub base_url: String,
    /// Class added to the figure for print styling.
    pub print_class: String,
}

impl Default for AppletSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            print_class: DEFAULT_PRINT_CLASS.to_owned(),
        }
    }
}

impl AppletSettings {
    /// Resolve settings from an explicit base URL and the process environment.
    ///
    /// A non-empty `explicit` base URL wins, then the `BASE_URL` environment
    /// variable, then [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn resolve(explicit: Option<&str>) -> Self {
        Self::resolve_with(explicit, |key| std::env::var(key).ok())
    }

    /// Like [`resolve`](Self::resolve) with a custom environment lookup.
    ///
    /// ```
    /// use appletdoc_applet::AppletSettings;
    ///
    /// let env = |key: &str| (key == "BASE_URL").then(|| "https://host/".to_owned());
    /// assert_eq!(AppletSettings::resolve_with(None, env).base_url, "https://host/");
    /// assert_eq!(AppletSettings::resolve_with(Some("/a/"), env).base_url, "/a/");
    /// ```
    #[must_use]
    pub fn resolve_with(explicit: Option<&str>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = match explicit.filter(|url| !url.is_empty()) {
            Some(url) => url.to_owned(),
            None => lookup(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
        };
        Self {
            base_url,
            ..Self::default()
        }
    }

    /// Set the print class.
    #[must_use]
    pub fn with_print_class(mut self, print_class: impl Into<String>) -> Self {
        self.print_class = print_class.into();
        self
    }
}

/// Handler for `::applet` and `:::applet`.
///
/// Register one instance as a leaf directive and another as a container
/// directive. Figures are built through `F`.
pub struct AppletDirective<F: FigureRenderer = HtmlFigureRenderer> {
    settings: AppletSettings,
    figures: F,
    warnings: Vec<String>,
    /// Closing HTML of open container figures, innermost last.
    open_figures: Vec<String>,
    used_body_caption: bool,
}

impl AppletDirective {
    /// Create a directive rendering HTML5 figures.
    #[must_use]
    pub fn new(settings: AppletSettings) -> Self {
        Self::with_figure_renderer(settings, HtmlFigureRenderer)
    }
}

impl<F: FigureRenderer> AppletDirective<F> {
    /// Create a directive building figures with `figures`.
    #[must_use]
    pub fn with_figure_renderer(settings: AppletSettings, figures: F) -> Self {
        Self {
            settings,
            figures,
            warnings: Vec::new(),
            open_figures: Vec::new(),
            used_body_caption: false,
        }
    }

    fn render_figure(
        &mut self,
        args: &DirectiveArgs,
        ctx: &DirectiveContext,
        caption: Caption<'_>,
    ) -> Result<RenderedFigure, DirectiveError> {
        let url = required(args, "url", ctx)?;
        let fig = required(args, "fig", ctx)?;

        self.check_image(fig, ctx);
        let align = self.parse_align(args, ctx);

        for key in args.attrs.keys() {
            if !FORWARDED_KEYS.contains(&key.as_str()) && !LOCAL_KEYS.contains(&key.as_str()) {
                tracing::debug!(key = %key, location = %ctx.location(), "Ignoring applet option");
            }
        }

        let mut classes = vec![self.settings.print_class.as_str()];
        classes.extend(args.classes.iter().map(String::as_str));
        if let Some(figclass) = args.get("figclass") {
            classes.extend(figclass.split_whitespace());
        }

        let label = Some(args.content.as_str()).filter(|c| !c.trim().is_empty());
        let spec = FigureSpec {
            image: fig,
            alt: args.get("alt").or(label),
            caption,
            id: args.id.as_deref(),
            classes,
            align,
            width: args.get_non_empty("figwidth"),
        };
        let mut node = self.figures.build(&spec);

        let params = filter_and_encode_options(
            args.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        );
        let full_url = full_url(&self.settings.base_url, url, &encode_query(&params));
        let status = ReviewStatus::parse(args.get("status").unwrap_or_default());
        let style = build_style(args.get("height"), args.get("width"), status);

        node.insert(0, FigureChild::Raw(applet_fragment(&style, &full_url)));
        Ok(self.figures.render(&node))
    }

    fn check_image(&mut self, fig: &str, ctx: &DirectiveContext) {
        let remote = fig.starts_with("http://") || fig.starts_with("https://");
        if remote || fig.starts_with('/') || ctx.exists(fig) {
            return;
        }

        let path = ctx.resolve_path(fig);
        tracing::debug!(path = %path.display(), location = %ctx.location(), "Applet figure image not found");
        self.warnings.push(format!(
            "{}: applet figure image not found: {}",
            ctx.location(),
            path.display()
        ));
    }

    fn parse_align(&mut self, args: &DirectiveArgs, ctx: &DirectiveContext) -> Option<FigureAlign> {
        match args.get_non_empty("align")?.parse() {
            Ok(align) => Some(align),
            Err(err) => {
                self.warnings.push(format!("{}: {err}", ctx.location()));
                None
            }
        }
    }
}

fn required<'a>(
    args: &'a DirectiveArgs,
    option: &'static str,
    ctx: &DirectiveContext,
) -> Result<&'a str, DirectiveError> {
    args.get_non_empty(option)
        .ok_or_else(|| DirectiveError::MissingOption {
            directive: DIRECTIVE_NAME.to_owned(),
            option,
            location: ctx.location(),
        })
}

/// Join base URL, applet path and query.
fn full_url(base_url: &str, url: &str, query: &str) -> String {
    if query.is_empty() {
        format!("{base_url}{url}")
    } else {
        format!("{base_url}{url}?{query}")
    }
}

/// Live applet markup. Inputs are inserted verbatim.
fn applet_fragment(style: &str, src: &str) -> String {
    format!(
        "<div class=\"applet\" style=\"{style}\">\n\
         <noscript class=\"loading-lazy\">\n\
         <iframe src=\"{src}\" allow=\"fullscreen\" loading=\"lazy\" frameborder=\"0\"></iframe>\n\
         </noscript>\n\
         </div>"
    )
}

impl<F: FigureRenderer> LeafDirective for AppletDirective<F> {
    fn name(&self) -> &str {
        DIRECTIVE_NAME
    }

    fn process(
        &mut self,
        args: DirectiveArgs,
        ctx: &DirectiveContext,
    ) -> Result<DirectiveOutput, DirectiveError> {
        let caption = Caption::Text(&args.content);
        let figure = self.render_figure(&args, ctx, caption)?;
        Ok(DirectiveOutput::html(figure.into_html()))
    }

    fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

impl<F: FigureRenderer> ContainerDirective for AppletDirective<F> {
    fn name(&self) -> &str {
        DIRECTIVE_NAME
    }

    fn start(
        &mut self,
        args: DirectiveArgs,
        ctx: &DirectiveContext,
    ) -> Result<DirectiveOutput, DirectiveError> {
        let figure = self.render_figure(&args, ctx, Caption::Body)?;
        self.open_figures.push(figure.close);
        self.used_body_caption = true;
        Ok(DirectiveOutput::html(figure.open))
    }

    fn end(&mut self, _line: usize) -> Option<String> {
        self.open_figures.pop()
    }

    fn post_process(&mut self, replacements: &mut Replacements) {
        if self.used_body_caption {
            replacements.add(EMPTY_CAPTION, "");
        }
    }

    fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
