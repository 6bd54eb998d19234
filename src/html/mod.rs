//! Server-rendered pages for the microsite.
//!
//! Markup, styles and widget scripts are kept as `&'static str` templates
//! bundled into the binary; dynamic parts are substituted at render time.

mod livestream;
mod navigation;
mod page;

pub use page::{render_index, IndexView};

pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

#[test]
fn escapes_markup() {
    assert_eq!(
        escape(r#"<b>"Victor" & 'Joy'</b>"#),
        "&lt;b&gt;&quot;Victor&quot; &amp; &#39;Joy&#39;&lt;/b&gt;"
    );
}
