//! Escaped HTML fragments
//!
//! `Markup` can only grow through escaped text or elements whose tag and class
//! are compile-time literals, so no string from the network ends up in the
//! output unescaped.

use std::fmt::{self, Display};

/// Escape text for insertion into HTML. `None` yields an empty string.
pub fn escape_html<'a>(s: impl Into<Option<&'a str>>) -> String {
    let Some(s) = s.into() else {
        return String::new();
    };

    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
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

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Escaped text node.
    pub fn text<'a>(s: impl Into<Option<&'a str>>) -> Self {
        Self(escape_html(s))
    }

    /// `<tag class="...">children</tag>`; the class attribute is omitted when `None`.
    pub fn element(tag: &'static str, class: Option<&'static str>, children: Markup) -> Self {
        let mut html = String::with_capacity(children.0.len() + 32);
        html.push('<');
        html.push_str(tag);
        if let Some(class) = class {
            html.push_str(" class=\"");
            html.push_str(class);
            html.push('"');
        }
        html.push('>');
        html.push_str(&children.0);
        html.push_str("</");
        html.push_str(tag);
        html.push('>');
        Self(html)
    }

    pub fn push(&mut self, other: Markup) -> &mut Self {
        self.0.push_str(&other.0);
        self
    }

    pub fn push_text<'a>(&mut self, s: impl Into<Option<&'a str>>) -> &mut Self {
        self.0.push_str(&escape_html(s));
        self
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Markup> for Markup {
    fn from_iter<I: IntoIterator<Item = Markup>>(iter: I) -> Self {
        let mut markup = Markup::new();
        for item in iter {
            markup.push(item);
        }
        markup
    }
}

impl Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
