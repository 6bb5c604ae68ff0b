//! Chunked lexing
//!
//!     Lexes a document a bounded number of lines at a time, so a caller can spread the work
//!     of a large file or stop early. The state at the end of one chunk is moved into the
//!     next one; nothing else is shared, and concatenating the tokens of all chunks gives
//!     exactly what [tokenize](super::tokenize) returns for the whole text.

use super::lexer::Lexer;
use super::lines::{line_spans, LineSpan};
use super::state::LexState;
use crate::hilite::grammar::GrammarDefinition;
use crate::hilite::token::Token;

pub const DEFAULT_CHUNK_LINES: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub tokens: Vec<Token>,
    /// Index of the first line in this chunk.
    pub first_line: usize,
    pub line_count: usize,
    /// State at the start of the line following this chunk.
    pub end_state: LexState,
}

#[derive(Debug, Clone)]
pub struct ChunkedLexer<'g, 't> {
    lexer: Lexer<'g>,
    text: &'t str,
    spans: Vec<LineSpan>,
    next_line: usize,
    state: LexState,
    chunk_lines: usize,
}

impl<'g, 't> ChunkedLexer<'g, 't> {
    pub fn new(grammar: &'g GrammarDefinition, text: &'t str) -> Self {
        Self::with_state(grammar, text, LexState::new())
    }

    pub fn with_state(grammar: &'g GrammarDefinition, text: &'t str, mut state: LexState) -> Self {
        state.retain_valid(grammar);
        Self {
            lexer: Lexer::new(grammar),
            text,
            spans: line_spans(text),
            next_line: 0,
            state,
            chunk_lines: DEFAULT_CHUNK_LINES,
        }
    }

    /// Chunk size used when iterating. Zero is treated as one.
    pub fn chunk_lines(mut self, lines: usize) -> Self {
        self.chunk_lines = lines.max(1);
        self
    }

    pub fn is_done(&self) -> bool {
        self.next_line >= self.spans.len()
    }

    pub fn state(&self) -> &LexState {
        &self.state
    }

    /// Lex up to `max_lines` more lines. Returns `None` once every line has been lexed.
    pub fn next_chunk(&mut self, max_lines: usize) -> Option<Chunk> {
        if self.is_done() {
            return None;
        }
        let first_line = self.next_line;
        let end_line = (first_line + max_lines.max(1)).min(self.spans.len());
        let last = self.spans.len() - 1;

        let mut state = std::mem::take(&mut self.state);
        let mut tokens = Vec::new();
        for index in first_line..end_line {
            let span = self.spans[index];
            self.lexer.lex_line(
                &self.text[span.range()],
                span.start,
                &mut state,
                index == last,
                &mut tokens,
            );
        }

        self.next_line = end_line;
        self.state = state.clone();
        Some(Chunk {
            tokens,
            first_line,
            line_count: end_line - first_line,
            end_state: state,
        })
    }
}

impl Iterator for ChunkedLexer<'_, '_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        let lines = self.chunk_lines;
        self.next_chunk(lines)
    }
}
