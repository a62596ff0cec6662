//! README rendering with the GitHub-flavoured extension set.

use comrak::{markdown_to_html, Options};

/// Render markdown to HTML inside a `markdown-body` container.
///
/// Raw HTML in the source is omitted and unsafe link schemes are dropped.
pub fn render_readme(markdown: &str) -> String {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.tagfilter = true;

    format!(
        "<div class=\"markdown-body\">{}</div>",
        markdown_to_html(markdown, &options)
    )
}
