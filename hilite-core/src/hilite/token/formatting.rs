//! Detokenizer
//!
//!     Converts a token stream back into source text. Since tokens cover the source with no
//!     gaps, this is a plain concatenation, and it is what the incremental re-lexer uses to
//!     recover the text an old tokenization describes.
//!
//!     It is also the round-trip check used throughout the tests:
//!     source -> tokens -> source must be the identity.

use super::core::Token;

/// Trait for converting tokens back to the text they were lexed from
pub trait ToSourceString {
    fn to_source_string(&self) -> String;
}

impl ToSourceString for Token {
    fn to_source_string(&self) -> String {
        self.text.clone()
    }
}

impl ToSourceString for [Token] {
    fn to_source_string(&self) -> String {
        detokenize(self)
    }
}

/// Concatenate token texts in order.
pub fn detokenize(tokens: &[Token]) -> String {
    let mut out = String::with_capacity(tokens.iter().map(Token::len).sum());
    for token in tokens {
        out.push_str(&token.text);
    }
    out
}

/// One `kind "text"` line per token, used by the CLI's plain token dump.
pub fn to_simple_string(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| format!("{} {:?}\n", token.kind, token.text))
        .collect()
}
