//! A text kept in sync with its tokens

use super::edit::{EditError, TextEdit};
use super::relex::{relex, RelexStats};
use crate::hilite::grammar::GrammarDefinition;
use crate::hilite::lexing::lines::line_spans;
use crate::hilite::lexing::{LexState, Lexer};
use crate::hilite::token::Token;

/// Owns a text together with its tokens and per-line start states.
///
/// Edits must always be applied with the grammar the text was first lexed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexedText {
    text: String,
    tokens: Vec<Token>,
    line_states: Vec<LexState>,
}

impl LexedText {
    pub fn new(grammar: &GrammarDefinition, text: impl Into<String>) -> Self {
        let text = text.into();
        let output = Lexer::new(grammar).tokenize_lines(&text, &LexState::new());
        Self {
            text,
            tokens: output.tokens,
            line_states: output.line_states,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn line_states(&self) -> &[LexState] {
        &self.line_states
    }

    pub fn line_count(&self) -> usize {
        self.line_states.len()
    }

    /// Tokens of one line, terminator included.
    pub fn line_tokens(&self, line: usize) -> &[Token] {
        let spans = line_spans(&self.text);
        let Some(span) = spans.get(line) else {
            return &[];
        };
        let from = self.tokens.partition_point(|token| token.start < span.start);
        let to = self.tokens.partition_point(|token| token.start < span.end);
        &self.tokens[from..to]
    }

    /// Apply an edit and re-lex what it affects. On error nothing changes.
    pub fn apply(
        &mut self,
        grammar: &GrammarDefinition,
        edit: &TextEdit,
    ) -> Result<RelexStats, EditError> {
        let (text, update) = relex(grammar, &self.text, &self.tokens, &self.line_states, edit)?;
        self.text = text;
        self.tokens = update.tokens;
        self.line_states = update.line_states;
        Ok(update.stats)
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}
