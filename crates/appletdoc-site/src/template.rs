//! HTML page shell and stylesheet for generated sites.

use std::fmt::Write;

use appletdoc_renderer::escape_html;

/// File name of the stylesheet written to the site root.
pub const STYLESHEET_NAME: &str = "applet.css";

/// Replaces each `<noscript class="loading-lazy">` with its markup once the
/// page has loaded, so iframes are only fetched by script-enabled browsers.
const LAZY_LOADER: &str = r#"<script>
window.addEventListener("load", function () {
  document.querySelectorAll("noscript.loading-lazy").forEach(function (el) {
    el.insertAdjacentHTML("afterend", el.textContent);
    el.remove();
  });
});
</script>
"#;

/// How a page gets its stylesheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stylesheet<'a> {
    /// Relative link to a stylesheet file (e.g. `../applet.css`).
    Link(&'a str),
    /// CSS embedded in a `<style>` element.
    Inline(&'a str),
}

/// Data for rendering one page.
pub struct PageData<'a> {
    /// Page title (first H1 or file stem).
    pub title: &'a str,
    /// Site name appended to the document title.
    pub site_name: &'a str,
    /// Rendered page body.
    pub html_content: &'a str,
    /// Stylesheet linked from or embedded in the page.
    pub stylesheet: Stylesheet<'a>,
}

/// Render a complete HTML page.
///
/// ```
/// use appletdoc_site::{PageData, Stylesheet, render_page};
///
/// let html = render_page(&PageData {
///     title: "Rotation",
///     site_name: "Geometry",
///     html_content: "<p>Hi</p>",
///     stylesheet: Stylesheet::Link("applet.css"),
/// });
/// assert!(html.contains("<title>Rotation - Geometry</title>"));
/// ```
#[must_use]
pub fn render_page(page: &PageData<'_>) -> String {
    let mut html = String::with_capacity(page.html_content.len() + 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    if page.site_name.is_empty() || page.site_name == page.title {
        let _ = writeln!(html, "<title>{}</title>", escape_html(page.title));
    } else {
        let _ = writeln!(
            html,
            "<title>{} - {}</title>",
            escape_html(page.title),
            escape_html(page.site_name)
        );
    }
    match page.stylesheet {
        Stylesheet::Link(path) => {
            let _ = writeln!(
                html,
                "<link rel=\"stylesheet\" href=\"{}\">",
                escape_html(path)
            );
        }
        Stylesheet::Inline(css) => {
            let _ = writeln!(html, "<style>\n{css}</style>");
        }
    }
    html.push_str(LAZY_LOADER);
    html.push_str("</head>\n<body>\n<main>\n<article>\n");
    html.push_str(page.html_content);
    if !page.html_content.ends_with('\n') {
        html.push('\n');
    }
    html.push_str("</article>\n</main>\n</body>\n</html>\n");
    html
}

/// Stylesheet showing the live applet on screen and its figure image in print.
#[must_use]
pub fn stylesheet(print_class: &str) -> String {
    format!(
        "\
.applet {{
  position: relative;
  width: 100%;
  min-height: 400px;
  margin-bottom: 0.5rem;
}}

.applet iframe {{
  position: absolute;
  inset: 0;
  width: 100%;
  height: 100%;
  border: 0;
}}

figure.align-left {{ margin-right: auto; }}
figure.align-center {{ margin-left: auto; margin-right: auto; }}
figure.align-right {{ margin-left: auto; }}

@media screen {{
  figure.{print_class} > img {{
    display: none;
  }}
}}

@media print {{
  .applet {{
    display: none;
  }}
}}
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_page_escapes_title() {
        let html = render_page(&PageData {
            title: "a < b",
            site_name: "",
            html_content: "<p>x</p>",
            stylesheet: Stylesheet::Link("../applet.css"),
        });

        assert!(html.starts_with("<!DOCTYPE html>\n"));
        assert!(html.contains("<title>a &lt; b</title>"));
        assert!(html.contains("<link rel=\"stylesheet\" href=\"../applet.css\">"));
        assert!(html.contains("<article>\n<p>x</p>\n</article>"));
        assert!(html.contains("noscript.loading-lazy"));
    }

    #[test]
    fn test_render_page_inline_stylesheet() {
        let css = stylesheet("applet-print-figure");
        let html = render_page(&PageData {
            title: "Cube",
            site_name: "",
            html_content: "<p>x</p>",
            stylesheet: Stylesheet::Inline(&css),
        });

        assert!(html.contains("<style>\n.applet {"));
        assert!(html.contains("figure.applet-print-figure > img"));
        assert!(!html.contains("<link rel=\"stylesheet\""));
    }

    #[test]
    fn test_stylesheet_uses_print_class() {
        let css = stylesheet("print-only");
        assert!(css.contains("figure.print-only > img"));
        assert!(css.contains("@media print {\n  .applet {\n    display: none;"));
    }
}
