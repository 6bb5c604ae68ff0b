//! Core token types and helpers shared across the lexer, renderer, and tooling.

pub mod core;
pub mod formatting;

pub use core::{LiteralKind, Token, TokenKind, TOKEN_KINDS};
pub use formatting::{detokenize, to_simple_string, ToSourceString};
