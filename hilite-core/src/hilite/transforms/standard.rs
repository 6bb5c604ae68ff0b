//! Standard transform definitions
//!
//! Grammar-independent pipelines are `once_cell::sync::Lazy` statics. Pipelines that need a
//! grammar or a format are built by the functions below; they are cheap to build and can be
//! kept around and run any number of times.

use crate::hilite::formats::{Format, StyledSpan};
use crate::hilite::grammar::GrammarDefinition;
use crate::hilite::token::Token;
use crate::hilite::transforms::stages::{Rendering, Serialization, Tokenization};
use crate::hilite::transforms::Transform;
use once_cell::sync::Lazy;
use std::sync::Arc;

pub type TokenizeTransform = Transform<String, Vec<Token>>;
pub type RenderTransform = Transform<Vec<Token>, Vec<StyledSpan>>;
pub type HighlightTransform = Transform<String, Vec<StyledSpan>>;
pub type MarkupTransform = Transform<String, String>;

/// Tokens → styled spans
pub static RENDERING: Lazy<RenderTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then(Rendering));

/// String → tokens
pub fn tokenizer(grammar: Arc<GrammarDefinition>) -> TokenizeTransform {
    Transform::from_fn(Ok).then(Tokenization::new(grammar))
}

/// String → styled spans
///
/// # Example
///
/// ```rust,ignore
/// let registry = GrammarRegistry::with_builtins()?;
/// let spans = highlight(registry.get("go").unwrap()).run("package main\n".to_string())?;
/// ```
pub fn highlight(grammar: Arc<GrammarDefinition>) -> HighlightTransform {
    tokenizer(grammar).then_transform(&RENDERING)
}

/// String → serialized output in `format`
pub fn to_markup<F: Format + 'static>(grammar: Arc<GrammarDefinition>, format: F) -> MarkupTransform {
    to_markup_with(Tokenization::new(grammar), Serialization::new(format))
}

/// String → serialized output, with configured tokenization and serialization stages
pub fn to_markup_with(tokenization: Tokenization, serialization: Serialization) -> MarkupTransform {
    Transform::from_fn(Ok)
        .then(tokenization)
        .then_transform(&RENDERING)
        .then(serialization)
}
