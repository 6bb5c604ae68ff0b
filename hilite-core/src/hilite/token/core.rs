//! Core token types
//!
//!     A token is a classified slice of the source. The lexer guarantees that the tokens of a
//!     text are contiguous, never overlap, and never cross a line terminator, so the text of a
//!     document can always be recovered by concatenating its tokens. See
//!     [detokenize](super::formatting::detokenize).
//!
//!     Token kinds form a closed set. Grammars refer to kinds by their stable name (see
//!     [TokenKind::name]) and the renderer reuses that name as the style class.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Literal sub-categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Number,
    String,
    Char,
    Bool,
}

/// The category a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TokenKind {
    Keyword,
    Identifier,
    Type,
    Literal(LiteralKind),
    Comment,
    Operator,
    Punctuation,
    Annotation,
    Whitespace,
    /// Text inside a construct that was still open at the end of its line or of the input.
    Unterminated,
    /// A character no rule matched.
    Unknown,
}

/// Every kind, in declaration order.
pub const TOKEN_KINDS: &[TokenKind] = &[
    TokenKind::Keyword,
    TokenKind::Identifier,
    TokenKind::Type,
    TokenKind::Literal(LiteralKind::Number),
    TokenKind::Literal(LiteralKind::String),
    TokenKind::Literal(LiteralKind::Char),
    TokenKind::Literal(LiteralKind::Bool),
    TokenKind::Comment,
    TokenKind::Operator,
    TokenKind::Punctuation,
    TokenKind::Annotation,
    TokenKind::Whitespace,
    TokenKind::Unterminated,
    TokenKind::Unknown,
];

impl TokenKind {
    /// Stable name used in grammar files and as the style class.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::Type => "type",
            TokenKind::Literal(LiteralKind::Number) => "number",
            TokenKind::Literal(LiteralKind::String) => "string",
            TokenKind::Literal(LiteralKind::Char) => "char",
            TokenKind::Literal(LiteralKind::Bool) => "bool",
            TokenKind::Comment => "comment",
            TokenKind::Operator => "operator",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Annotation => "annotation",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Unterminated => "unterminated",
            TokenKind::Unknown => "unknown",
        }
    }

    /// Inverse of [TokenKind::name].
    pub fn from_name(name: &str) -> Option<TokenKind> {
        TOKEN_KINDS.iter().copied().find(|kind| kind.name() == name)
    }

    /// Kinds only the lexer itself may produce; grammars cannot tag rules with them.
    pub fn is_reserved(self) -> bool {
        matches!(self, TokenKind::Unterminated)
    }

    /// Kinds the renderer passes through without a style.
    pub fn is_unstyled(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Unknown)
    }

    pub fn is_literal(self) -> bool {
        matches!(self, TokenKind::Literal(_))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<TokenKind> for String {
    fn from(kind: TokenKind) -> Self {
        kind.name().to_string()
    }
}

impl TryFrom<String> for TokenKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TokenKind::from_name(&value).ok_or_else(|| format!("unknown token kind '{}'", value))
    }
}

/// A classified slice of the source text.
///
/// `start` and `end` are byte offsets into the full text, and `text` is exactly
/// `&source[start..end]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, start: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        Token {
            kind,
            start,
            end: start + text.len(),
            text,
        }
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The same token moved by `delta` bytes.
    pub(crate) fn shifted(mut self, delta: isize) -> Self {
        self.start = self.start.wrapping_add_signed(delta);
        self.end = self.end.wrapping_add_signed(delta);
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", self.kind, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in TOKEN_KINDS {
            assert_eq!(TokenKind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(TokenKind::from_name("keywords"), None);
    }

    #[test]
    fn serializes_kind_as_name() {
        let token = Token::new(TokenKind::Literal(LiteralKind::Number), 3, "42");
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, r#"{"kind":"number","start":3,"end":5,"text":"42"}"#);
        let back: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);
    }

    #[test]
    fn rejects_unknown_kind_name() {
        let result: Result<Token, _> =
            serde_json::from_str(r#"{"kind":"nope","start":0,"end":1,"text":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn shifting_moves_both_ends() {
        let token = Token::new(TokenKind::Identifier, 10, "abc");
        assert_eq!(token.clone().shifted(-4).span(), 6..9);
        assert_eq!(token.shifted(5).span(), 15..18);
    }
}
