//! ANSI terminal output
//!
//!     Wraps styled text in SGR escape sequences. Styles are reset before every line break so
//!     that pagers and partial output never bleed color into the next line.
//!
//!     Control characters from the source (other than tab and line breaks) are shown in caret
//!     notation, `^[` for ESC, so the highlighted text cannot drive the terminal itself.

use super::error::FormatError;
use super::format::Format;
use super::render::StyledSpan;
use crate::hilite::token::{LiteralKind, TokenKind};
use std::borrow::Cow;

const RESET: &str = "\x1b[0m";

/// SGR parameters for a token kind, `None` for the terminal's default style.
pub fn sgr_for(kind: TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::Keyword => Some("1;35"),
        TokenKind::Type => Some("36"),
        TokenKind::Literal(LiteralKind::String | LiteralKind::Char) => Some("32"),
        TokenKind::Literal(LiteralKind::Number | LiteralKind::Bool) => Some("33"),
        TokenKind::Comment => Some("2;37"),
        TokenKind::Operator => Some("31"),
        TokenKind::Annotation => Some("34"),
        TokenKind::Unterminated => Some("4;31"),
        TokenKind::Identifier
        | TokenKind::Punctuation
        | TokenKind::Whitespace
        | TokenKind::Unknown => None,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnsiFormat;

impl AnsiFormat {
    pub fn to_ansi(&self, spans: &[StyledSpan]) -> String {
        let mut out = String::new();
        for span in spans {
            let text = escape_controls(&span.text);
            let Some(sgr) = span.kind.and_then(sgr_for) else {
                out.push_str(&text);
                continue;
            };
            for line in text.split_inclusive('\n') {
                let body = line.trim_end_matches(['\r', '\n']);
                if !body.is_empty() {
                    out.push_str(&format!("\x1b[{}m{}{}", sgr, body, RESET));
                }
                out.push_str(&line[body.len()..]);
            }
        }
        out
    }
}

/// Replace C0 controls (except `\t`, `\n`, `\r`) and DEL with caret notation, and C1
/// controls with U+FFFD.
pub fn escape_controls(text: &str) -> Cow<'_, str> {
    let is_unsafe = |c: char| c.is_control() && !matches!(c, '\t' | '\n' | '\r');
    if !text.chars().any(is_unsafe) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '\t' | '\n' | '\r' => out.push(c),
            '\u{0}'..='\u{1f}' => {
                out.push('^');
                out.push(char::from(c as u8 + 0x40));
            }
            '\u{7f}' => out.push_str("^?"),
            c if c.is_control() => out.push(char::REPLACEMENT_CHARACTER),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

impl Format for AnsiFormat {
    fn name(&self) -> &str {
        "ansi"
    }

    fn description(&self) -> &str {
        "Terminal text colored with ANSI escape codes"
    }

    fn serialize(&self, spans: &[StyledSpan]) -> Result<String, FormatError> {
        Ok(self.to_ansi(spans))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_styled_spans_only() {
        let spans = vec![
            StyledSpan::new(Some(TokenKind::Keyword), "if"),
            StyledSpan::new(None, " "),
            StyledSpan::new(Some(TokenKind::Identifier), "x"),
        ];
        assert_eq!(AnsiFormat.to_ansi(&spans), "\x1b[1;35mif\x1b[0m x");
    }

    #[test]
    fn resets_before_line_breaks() {
        let spans = vec![StyledSpan::new(
            Some(TokenKind::Literal(LiteralKind::String)),
            "a\r\nb",
        )];
        assert_eq!(
            AnsiFormat.to_ansi(&spans),
            "\x1b[32ma\x1b[0m\r\n\x1b[32mb\x1b[0m"
        );
    }

    #[test]
    fn source_escape_sequences_are_neutralized() {
        let spans = vec![
            StyledSpan::new(None, "\x1b]0;pwned\x07"),
            StyledSpan::new(Some(TokenKind::Comment), "// \x1b[2J\tok\u{9b}"),
            StyledSpan::new(None, "\x7f"),
        ];
        let out = AnsiFormat.to_ansi(&spans);
        assert_eq!(
            out,
            "^[]0;pwned^G\x1b[2;37m// ^[[2J\tok\u{fffd}\x1b[0m^?"
        );
    }

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(escape_controls("a\tb\r\n"), Cow::Borrowed(_)));
    }

    #[test]
    fn bare_line_break_is_not_wrapped() {
        let spans = vec![StyledSpan::new(Some(TokenKind::Comment), "\n")];
        assert_eq!(AnsiFormat.to_ansi(&spans), "\n");
    }
}
