//! Captioned figures.
//!
//! Directives that show an image with a caption build a [`FigureNode`]
//! through a [`FigureRenderer`], may add their own children to it, and then
//! have the renderer turn it into HTML.

use std::fmt::{self, Write};
use std::str::FromStr;

use crate::util::escape_html;

/// Horizontal alignment of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureAlign {
    Left,
    Center,
    Right,
}

impl FigureAlign {
    /// CSS class applied to the `<figure>` element.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Left => "align-left",
            Self::Center => "align-center",
            Self::Right => "align-right",
        }
    }
}

/// Error returned when parsing an unknown alignment keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlign(pub String);

impl fmt::Display for UnknownAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown figure alignment '{}' (expected left, center or right)",
            self.0
        )
    }
}

impl std::error::Error for UnknownAlign {}

impl FromStr for FigureAlign {
    type Err = UnknownAlign;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            other => Err(UnknownAlign(other.to_owned())),
        }
    }
}

/// Image shown inside a figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageNode {
    pub src: String,
    pub alt: String,
}

/// A child element of a figure, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FigureChild {
    /// Raw HTML inserted as-is.
    Raw(String),
    /// The figure image.
    Image(ImageNode),
    /// Caption from already-rendered inline HTML.
    Caption(String),
    /// Caption whose content is the markdown body of a container directive.
    ///
    /// Rendering splits the figure here: everything before goes into
    /// [`RenderedFigure::open`], the closing tags into [`RenderedFigure::close`].
    CaptionBody,
}

/// Figure element tree built by a [`FigureRenderer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FigureNode {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub align: Option<FigureAlign>,
    /// CSS width of the figure element (e.g. `50%`).
    pub width: Option<String>,
    pub children: Vec<FigureChild>,
}

impl FigureNode {
    /// Insert a child at `index`, shifting later children.
    ///
    /// # Panics
    ///
    /// Panics if `index > children.len()`.
    pub fn insert(&mut self, index: usize, child: FigureChild) {
        self.children.insert(index, child);
    }
}

/// What a figure is built from.
#[derive(Debug, Clone, Default)]
pub struct FigureSpec<'a> {
    /// Image path or URL.
    pub image: &'a str,
    /// Alternative text; defaults to empty.
    pub alt: Option<&'a str>,
    /// Caption source.
    pub caption: Caption<'a>,
    pub id: Option<&'a str>,
    pub classes: Vec<&'a str>,
    pub align: Option<FigureAlign>,
    pub width: Option<&'a str>,
}

/// Caption source for a figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Caption<'a> {
    /// No caption.
    #[default]
    None,
    /// Plain caption text (escaped when rendered).
    Text(&'a str),
    /// Caption supplied later as a markdown body.
    Body,
}

/// HTML for a figure, split around a [`FigureChild::CaptionBody`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFigure {
    /// Opening HTML. Ends with a newline when a caption body follows.
    pub open: String,
    /// Closing HTML emitted after the caption body.
    pub close: String,
}

impl RenderedFigure {
    /// The whole figure with nothing between `open` and `close`.
    #[must_use]
    pub fn into_html(self) -> String {
        self.open + &self.close
    }
}

/// Capability to build and render a captioned figure from an image path.
pub trait FigureRenderer: Send {
    /// Build the figure element tree.
    fn build(&self, spec: &FigureSpec<'_>) -> FigureNode;

    /// Render a figure element tree to HTML.
    fn render(&self, node: &FigureNode) -> RenderedFigure;
}

/// Renders figures as HTML5 `<figure>` elements.
///
/// # Example
///
/// ```
/// use appletdoc_renderer::{Caption, FigureChild, FigureRenderer, FigureSpec, HtmlFigureRenderer};
///
/// let renderer = HtmlFigureRenderer;
/// let mut node = renderer.build(&FigureSpec {
///     image: "img/cube.png",
///     caption: Caption::Text("A cube"),
///     ..FigureSpec::default()
/// });
/// node.insert(0, FigureChild::Raw("<div class=\"live\"></div>".to_owned()));
///
/// let html = renderer.render(&node).into_html();
/// assert!(html.starts_with("<figure>\n<div class=\"live\"></div>\n<img"));
/// assert!(html.contains("<figcaption><p>A cube</p></figcaption>"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFigureRenderer;

impl FigureRenderer for HtmlFigureRenderer {
    fn build(&self, spec: &FigureSpec<'_>) -> FigureNode {
        let mut children = vec![FigureChild::Image(ImageNode {
            src: spec.image.to_owned(),
            alt: spec.alt.unwrap_or_default().to_owned(),
        })];

        match spec.caption {
            Caption::None => {}
            Caption::Text(text) if text.trim().is_empty() => {}
            Caption::Text(text) => children.push(FigureChild::Caption(escape_html(text))),
            Caption::Body => children.push(FigureChild::CaptionBody),
        }

        FigureNode {
            id: spec.id.map(str::to_owned),
            classes: spec.classes.iter().map(|c| (*c).to_owned()).collect(),
            align: spec.align,
            width: spec.width.map(str::to_owned),
            children,
        }
    }

    fn render(&self, node: &FigureNode) -> RenderedFigure {
        let mut open = String::from("<figure");
        if let Some(id) = &node.id {
            let _ = write!(open, " id=\"{}\"", escape_html(id));
        }

        let mut classes: Vec<&str> = node.classes.iter().map(String::as_str).collect();
        if let Some(align) = node.align {
            classes.push(align.class());
        }
        if !classes.is_empty() {
            let _ = write!(open, " class=\"{}\"", escape_html(&classes.join(" ")));
        }
        if let Some(width) = &node.width {
            let _ = write!(open, " style=\"width: {}\"", escape_html(width));
        }
        open.push_str(">\n");

        let mut split = None;
        for child in &node.children {
            match child {
                FigureChild::Raw(html) => {
                    open.push_str(html.trim_end());
                    open.push('\n');
                }
                FigureChild::Image(image) => {
                    let _ = writeln!(
                        open,
                        "<img src=\"{}\" alt=\"{}\">",
                        escape_html(&image.src),
                        escape_html(&image.alt)
                    );
                }
                FigureChild::Caption(html) => {
                    let _ = writeln!(open, "<figcaption><p>{html}</p></figcaption>");
                }
                FigureChild::CaptionBody => {
                    open.push_str("<figcaption>\n");
                    split = Some(open.len());
                    open.push_str("\n</figcaption>\n");
                }
            }
        }
        open.push_str("</figure>");

        let close = split.map(|at| open.split_off(at)).unwrap_or_default();
        RenderedFigure { open, close }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_defaults() {
        let node = HtmlFigureRenderer.build(&FigureSpec {
            image: "a.png",
            ..FigureSpec::default()
        });

        assert_eq!(
            node.children,
            vec![FigureChild::Image(ImageNode {
                src: "a.png".to_owned(),
                alt: String::new(),
            })]
        );
        assert!(node.classes.is_empty());
    }

    #[test]
    fn test_render_full_figure() {
        let renderer = HtmlFigureRenderer;
        let node = renderer.build(&FigureSpec {
            image: "img/a b.png",
            alt: Some("Plot"),
            caption: Caption::Text("x < y"),
            id: Some("fig-1"),
            classes: vec!["applet-print-figure", "wide"],
            align: Some(FigureAlign::Center),
            width: Some("50%"),
        });

        let rendered = renderer.render(&node);
        assert_eq!(
            rendered.open,
            "<figure id=\"fig-1\" class=\"applet-print-figure wide align-center\" style=\"width: 50%\">\n\
             <img src=\"img/a b.png\" alt=\"Plot\">\n\
             <figcaption><p>x &lt; y</p></figcaption>\n\
             </figure>"
        );
        assert_eq!(rendered.close, "");
    }

    #[test]
    fn test_blank_text_caption_is_omitted() {
        let renderer = HtmlFigureRenderer;
        let node = renderer.build(&FigureSpec {
            image: "a.png",
            caption: Caption::Text("  "),
            ..FigureSpec::default()
        });
        assert!(!renderer.render(&node).into_html().contains("figcaption"));
    }

    #[test]
    fn test_caption_body_splits_output() {
        let renderer = HtmlFigureRenderer;
        let mut node = renderer.build(&FigureSpec {
            image: "a.png",
            caption: Caption::Body,
            ..FigureSpec::default()
        });
        node.insert(0, FigureChild::Raw("<div>live</div>\n".to_owned()));

        let rendered = renderer.render(&node);
        assert_eq!(
            rendered.open,
            "<figure>\n<div>live</div>\n<img src=\"a.png\" alt=\"\">\n<figcaption>\n"
        );
        assert_eq!(rendered.close, "\n</figcaption>\n</figure>");
    }

    #[test]
    fn test_align_parsing() {
        assert_eq!("left".parse(), Ok(FigureAlign::Left));
        assert_eq!("right".parse(), Ok(FigureAlign::Right));
        let err = "middle".parse::<FigureAlign>().unwrap_err();
        assert_eq!(err, UnknownAlign("middle".to_owned()));
        assert!(err.to_string().contains("middle"));
    }
}
