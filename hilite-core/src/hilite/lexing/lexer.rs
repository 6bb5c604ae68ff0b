//! Grammar-driven lexer
//!
//!     The lexer walks a text one line at a time. Inside a line it repeatedly asks the rules
//!     of the current context, in order, for a match at the current offset; the first
//!     non-empty match becomes a token and the rule's action (push or pop) is applied after
//!     the token is emitted. When nothing matches, one character becomes an `Unknown` token.
//!     Every step consumes at least one character, so lexing always terminates, and the
//!     tokens tile the input exactly.
//!
//! Unterminated constructs
//!
//!     Each open frame remembers the index of the token that opened it, or of the first token
//!     of the line for frames opened on an earlier line. At the end of a line body, the
//!     lowest frame whose context is not `multiline` is closed: its tokens on this line are
//!     re-tagged `Unterminated` and it is popped together with everything above it. At the
//!     end of the input, tokens of the last line from the outermost open frame onwards are
//!     re-tagged the same way, but the frames stay on the reported end state.
//!
//!     Both rules only ever touch the current line, so the tokens of a line depend on nothing
//!     but its text and the state at its start. The incremental re-lexer relies on that.

use super::lines::{line_spans, split_terminator};
use super::state::LexState;
use crate::hilite::grammar::{Action, GrammarDefinition};
use crate::hilite::token::{Token, TokenKind};

/// Result of a tokenization pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerOutput {
    pub tokens: Vec<Token>,
    pub end_state: LexState,
}

/// Result of a tokenization pass that also records the state at every line start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinesOutput {
    pub tokens: Vec<Token>,
    /// One entry per line, see [line_spans].
    pub line_states: Vec<LexState>,
    pub end_state: LexState,
}

#[derive(Debug, Clone, Copy)]
pub struct Lexer<'g> {
    grammar: &'g GrammarDefinition,
}

impl<'g> Lexer<'g> {
    pub fn new(grammar: &'g GrammarDefinition) -> Self {
        Self { grammar }
    }

    pub fn grammar(&self) -> &'g GrammarDefinition {
        self.grammar
    }

    /// Tokenize a whole text starting from `start_state`.
    pub fn tokenize(&self, text: &str, start_state: &LexState) -> LexerOutput {
        let output = self.tokenize_lines(text, start_state);
        LexerOutput {
            tokens: output.tokens,
            end_state: output.end_state,
        }
    }

    pub fn tokenize_lines(&self, text: &str, start_state: &LexState) -> LinesOutput {
        let spans = line_spans(text);
        let mut tokens = Vec::new();
        let mut line_states = Vec::with_capacity(spans.len());
        let mut state = start_state.clone();
        state.retain_valid(self.grammar);
        let last = spans.len() - 1;
        for (index, span) in spans.iter().enumerate() {
            line_states.push(state.clone());
            self.lex_line(
                &text[span.range()],
                span.start,
                &mut state,
                index == last,
                &mut tokens,
            );
        }
        LinesOutput {
            tokens,
            line_states,
            end_state: state,
        }
    }

    /// Lex one line, terminator included, appending its tokens to `out`.
    ///
    /// `offset` is the byte offset of the line in the whole text and `state` is the state at
    /// the line start; on return it holds the state at the start of the next line. Pass
    /// `is_last` for the final line of the input so unclosed constructs get flagged.
    /// Frames that are not contexts of this grammar are dropped first.
    pub fn lex_line(
        &self,
        line: &str,
        offset: usize,
        state: &mut LexState,
        is_last: bool,
        out: &mut Vec<Token>,
    ) {
        state.retain_valid(self.grammar);
        let (body, terminator) = split_terminator(line);
        let line_first = out.len();
        let mut marks = vec![line_first; state.depth()];

        self.lex_segment(body, offset, state, &mut marks, out);
        self.close_single_line_frames(state, &mut marks, out);
        self.lex_segment(terminator, offset + body.len(), state, &mut marks, out);

        if is_last {
            if let Some(&outermost) = marks.first() {
                mark_unterminated(&mut out[outermost..]);
            }
        }
    }

    fn lex_segment(
        &self,
        segment: &str,
        offset: usize,
        state: &mut LexState,
        marks: &mut Vec<usize>,
        out: &mut Vec<Token>,
    ) {
        let mut pos = 0;
        while pos < segment.len() {
            let context = self.grammar.context(state.current(self.grammar));
            let matched = context.rules.iter().find_map(|rule| {
                rule.pattern
                    .match_len(segment, pos)
                    .map(|len| (rule.kind, rule.action, len))
            });
            let (kind, action, len) = match matched {
                Some(found) => found,
                None => {
                    let len = segment[pos..].chars().next().map_or(1, char::len_utf8);
                    (TokenKind::Unknown, Action::None, len)
                }
            };

            let mark = out.len();
            out.push(Token::new(kind, offset + pos, &segment[pos..pos + len]));
            match action {
                Action::Push(target) => {
                    if state.push(target) {
                        marks.push(mark);
                    }
                }
                Action::Pop => {
                    if state.pop().is_some() {
                        marks.pop();
                    }
                }
                Action::None => {}
            }
            pos += len;
        }
    }

    fn close_single_line_frames(
        &self,
        state: &mut LexState,
        marks: &mut Vec<usize>,
        out: &mut [Token],
    ) {
        let lowest = state
            .stack()
            .iter()
            .position(|id| !self.grammar.context(*id).multiline);
        if let Some(depth) = lowest {
            mark_unterminated(&mut out[marks[depth]..]);
            state.truncate(depth);
            marks.truncate(depth);
        }
    }
}

fn mark_unterminated(tokens: &mut [Token]) {
    for token in tokens {
        token.kind = TokenKind::Unterminated;
    }
}

/// Tokenize `text` with `grammar`, starting from `start_state`.
pub fn tokenize(text: &str, grammar: &GrammarDefinition, start_state: &LexState) -> LexerOutput {
    Lexer::new(grammar).tokenize(text, start_state)
}
