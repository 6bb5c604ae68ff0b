//! Renderer adapter
//!
//!     Maps tokens to display spans. This is the seam between the lexer and whatever shows
//!     the result: a span only keeps the text and the style it should get. Whitespace and
//!     unknown text carry no style, so renderers emit them as-is.

use crate::hilite::token::{Token, TokenKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledSpan {
    /// `None` for text that is displayed unstyled.
    pub kind: Option<TokenKind>,
    pub text: String,
}

impl StyledSpan {
    pub fn new(kind: Option<TokenKind>, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn is_styled(&self) -> bool {
        self.kind.is_some()
    }

    /// Style class for this span, e.g. `hl-keyword` for prefix `hl-`.
    pub fn class_name(&self, prefix: &str) -> Option<String> {
        self.kind.map(|kind| format!("{}{}", prefix, kind.name()))
    }
}

impl From<&Token> for StyledSpan {
    fn from(token: &Token) -> Self {
        let kind = (!token.kind.is_unstyled()).then_some(token.kind);
        StyledSpan::new(kind, token.text.clone())
    }
}

/// One span per token, in order.
pub fn render(tokens: &[Token]) -> Vec<StyledSpan> {
    tokens.iter().map(StyledSpan::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hilite::testing::mk_tokens;
    use crate::hilite::token::LiteralKind;

    #[test]
    fn one_span_per_token() {
        let tokens = mk_tokens(&[
            (TokenKind::Keyword, "if"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Unknown, "@"),
            (TokenKind::Literal(LiteralKind::String), "\"s\""),
        ]);
        let spans = render(&tokens);
        assert_eq!(
            spans,
            vec![
                StyledSpan::new(Some(TokenKind::Keyword), "if"),
                StyledSpan::new(None, " "),
                StyledSpan::new(None, "@"),
                StyledSpan::new(Some(TokenKind::Literal(LiteralKind::String)), "\"s\""),
            ]
        );
    }

    #[test]
    fn empty_tokens_give_no_spans() {
        assert!(render(&[]).is_empty());
    }

    #[test]
    fn class_names_use_kind_names() {
        let span = StyledSpan::new(Some(TokenKind::Literal(LiteralKind::Number)), "1");
        assert_eq!(span.class_name("hl-").as_deref(), Some("hl-number"));
        assert_eq!(StyledSpan::new(None, " ").class_name("hl-"), None);
    }

    #[test]
    fn unterminated_stays_styled() {
        let spans = render(&mk_tokens(&[(TokenKind::Unterminated, "\"ab")]));
        assert_eq!(spans[0].class_name("").as_deref(), Some("unterminated"));
    }
}
