//! Tokenization stage
//!
//! Converts source text into tokens with a fixed grammar, in one pass or in chunks of lines.

use crate::hilite::grammar::GrammarDefinition;
use crate::hilite::lexing::{tokenize, ChunkedLexer, LexState};
use crate::hilite::token::Token;
use crate::hilite::transforms::{Runnable, TransformError};
use std::sync::Arc;
use tracing::trace;

/// # Input
/// - `String` - source text
///
/// # Output
/// - `Vec<Token>` - tokens covering the whole text
pub struct Tokenization {
    grammar: Arc<GrammarDefinition>,
    chunk_lines: Option<usize>,
}

impl Tokenization {
    pub fn new(grammar: Arc<GrammarDefinition>) -> Self {
        Tokenization {
            grammar,
            chunk_lines: None,
        }
    }

    /// Lex `lines` lines at a time. The tokens are the same as in one pass.
    pub fn chunked(mut self, lines: usize) -> Self {
        self.chunk_lines = Some(lines);
        self
    }

    fn tokens(&self, input: &str) -> Vec<Token> {
        let Some(lines) = self.chunk_lines else {
            return tokenize(input, &self.grammar, &LexState::new()).tokens;
        };
        let mut tokens = Vec::new();
        for chunk in ChunkedLexer::new(&self.grammar, input).chunk_lines(lines) {
            trace!(
                first_line = chunk.first_line,
                lines = chunk.line_count,
                "lexed chunk"
            );
            tokens.extend(chunk.tokens);
        }
        tokens
    }
}

impl Runnable<String, Vec<Token>> for Tokenization {
    fn run(&self, input: String) -> Result<Vec<Token>, TransformError> {
        Ok(self.tokens(&input))
    }
}

impl Runnable<&str, Vec<Token>> for Tokenization {
    fn run(&self, input: &str) -> Result<Vec<Token>, TransformError> {
        Ok(self.tokens(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hilite::testing::demo_grammar;
    use crate::hilite::token::detokenize;

    #[test]
    fn tokenizes_owned_and_borrowed_input() {
        let stage = Tokenization::new(Arc::new(demo_grammar()));
        let owned = stage.run("if x".to_string()).unwrap();
        let borrowed = stage.run("if x").unwrap();
        assert_eq!(owned, borrowed);
        assert_eq!(detokenize(&owned), "if x");
    }

    #[test]
    fn chunked_matches_one_pass() {
        let grammar = Arc::new(demo_grammar());
        let text = "if x /* a\nb */ \"c\nd\" 1\n'e\n";
        let whole = Tokenization::new(Arc::clone(&grammar)).run(text).unwrap();
        let chunked = Tokenization::new(grammar).chunked(1).run(text).unwrap();
        assert_eq!(chunked, whole);
    }

    #[test]
    fn empty_input() {
        let stage = Tokenization::new(Arc::new(demo_grammar()));
        assert!(stage.run(String::new()).unwrap().is_empty());
    }
}
