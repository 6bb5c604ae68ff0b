//! HTML markup
//!
//!     Each styled span becomes `<span class="{prefix}{kind}">text</span>`; unstyled text is
//!     written bare. Adjacent spans with the same style are merged into one element, which
//!     keeps the markup small for runs like multi-token strings or comments. All text is
//!     escaped. With `wrap_pre` the whole output is wrapped in `<pre class="{prefix}code">`.
//!
//!     The markup carries no colors; a stylesheet targeting the class names decides those.

use super::error::FormatError;
use super::format::Format;
use super::render::StyledSpan;

pub const DEFAULT_CLASS_PREFIX: &str = "hl-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlFormat {
    pub class_prefix: String,
    pub wrap_pre: bool,
}

impl Default for HtmlFormat {
    fn default() -> Self {
        Self {
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
            wrap_pre: true,
        }
    }
}

impl HtmlFormat {
    pub fn new(class_prefix: impl Into<String>, wrap_pre: bool) -> Self {
        Self {
            class_prefix: class_prefix.into(),
            wrap_pre,
        }
    }

    pub fn to_html(&self, spans: &[StyledSpan]) -> String {
        let mut out = String::new();
        if self.wrap_pre {
            out.push_str(&format!(
                "<pre class=\"{}code\">",
                escape_html(&self.class_prefix)
            ));
        }

        let mut index = 0;
        while index < spans.len() {
            let kind = spans[index].kind;
            let run = spans[index..]
                .iter()
                .take_while(|span| span.kind == kind)
                .count();
            let text: String = spans[index..index + run]
                .iter()
                .map(|span| span.text.as_str())
                .collect();
            match spans[index].class_name(&self.class_prefix) {
                Some(class) => {
                    out.push_str(&format!(
                        "<span class=\"{}\">{}</span>",
                        escape_html(&class),
                        escape_html(&text)
                    ));
                }
                None => out.push_str(&escape_html(&text)),
            }
            index += run;
        }

        if self.wrap_pre {
            out.push_str("</pre>");
        }
        out
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML markup with one class per token kind"
    }

    fn serialize(&self, spans: &[StyledSpan]) -> Result<String, FormatError> {
        Ok(self.to_html(spans))
    }
}

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
