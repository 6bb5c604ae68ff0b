//! Re-lexing after an edit

use super::edit::{EditError, TextEdit};
use crate::hilite::grammar::GrammarDefinition;
use crate::hilite::lexing::lines::{line_index, line_spans};
use crate::hilite::lexing::{LexState, Lexer};
use crate::hilite::token::{detokenize, Token};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// How much work an update did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelexStats {
    /// First line that was lexed again.
    pub first_line: usize,
    pub lines_relexed: usize,
    /// Whether the old tail was reused. False means lexing ran to the end of the text.
    pub converged: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub tokens: Vec<Token>,
    pub line_states: Vec<LexState>,
    pub stats: RelexStats,
}

/// Re-lex the part of a tokenization affected by `edit`.
///
/// `old_tokens` and `old_line_states` must come from lexing the old text with `grammar`,
/// for instance through [Lexer::tokenize_lines]. The old text itself is rebuilt from the
/// tokens. The result is the same as tokenizing the edited text from scratch.
pub fn update(
    grammar: &GrammarDefinition,
    old_tokens: &[Token],
    old_line_states: &[LexState],
    edit: &TextEdit,
) -> Result<Update, EditError> {
    let old_text = detokenize(old_tokens);
    relex(grammar, &old_text, old_tokens, old_line_states, edit).map(|(_, update)| update)
}

/// Same as [update] with the old text at hand; also returns the edited text.
pub(crate) fn relex(
    grammar: &GrammarDefinition,
    old_text: &str,
    old_tokens: &[Token],
    old_line_states: &[LexState],
    edit: &TextEdit,
) -> Result<(String, Update), EditError> {
    let new_text = edit.apply_to(old_text)?;
    let old_spans = line_spans(old_text);
    if old_line_states.len() != old_spans.len() {
        return Err(EditError::LineStateMismatch {
            expected: old_spans.len(),
            found: old_line_states.len(),
        });
    }
    let new_spans = line_spans(&new_text);

    // Everything before the edited line is untouched, including its start state.
    let first_line = line_index(&old_spans, edit.range.start);
    let restart = old_spans[first_line].start;
    let kept = old_tokens.partition_point(|token| token.start < restart);
    let mut tokens = old_tokens[..kept].to_vec();
    let mut line_states = old_line_states[..first_line].to_vec();
    let mut state = old_line_states[first_line].clone();
    state.retain_valid(grammar);

    let lexer = Lexer::new(grammar);
    let edit_end = edit.new_end();
    let last = new_spans.len() - 1;
    let mut stats = RelexStats {
        first_line,
        ..RelexStats::default()
    };

    for index in first_line..new_spans.len() {
        let span = new_spans[index];
        line_states.push(state.clone());
        lexer.lex_line(
            &new_text[span.range()],
            span.start,
            &mut state,
            index == last,
            &mut tokens,
        );
        stats.lines_relexed += 1;

        let next = index + 1;
        // A line starting past the replacement is preceded by a `\n` from the unchanged
        // tail, so it lines up with an old line counted from the end.
        if next > last || new_spans[next].start <= edit_end {
            continue;
        }
        let Some(old_next) = old_spans.len().checked_sub(new_spans.len() - next) else {
            continue;
        };
        if old_line_states[old_next] != state {
            trace!(line = next, "state differs from old line, continuing");
            continue;
        }

        let reuse_from =
            old_tokens.partition_point(|token| token.start < old_spans[old_next].start);
        let delta = edit.delta();
        tokens.extend(
            old_tokens[reuse_from..]
                .iter()
                .cloned()
                .map(|token| token.shifted(delta)),
        );
        line_states.extend_from_slice(&old_line_states[old_next..]);
        stats.converged = true;
        break;
    }

    debug!(
        first_line = stats.first_line,
        lines_relexed = stats.lines_relexed,
        converged = stats.converged,
        total_lines = new_spans.len(),
        "incremental update"
    );
    Ok((
        new_text,
        Update {
            tokens,
            line_states,
            stats,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hilite::testing::demo_grammar;
    use crate::hilite::token::TokenKind;

    fn lex(grammar: &GrammarDefinition, text: &str) -> (Vec<Token>, Vec<LexState>) {
        let output = Lexer::new(grammar).tokenize_lines(text, &LexState::new());
        (output.tokens, output.line_states)
    }

    fn check(old: &str, edit: TextEdit) -> RelexStats {
        let grammar = demo_grammar();
        let (tokens, states) = lex(&grammar, old);
        let result = update(&grammar, &tokens, &states, &edit).unwrap();
        let new_text = edit.apply_to(old).unwrap();
        let (expected_tokens, expected_states) = lex(&grammar, &new_text);
        assert_eq!(result.tokens, expected_tokens, "tokens after {:?}", edit);
        assert_eq!(result.line_states, expected_states, "states after {:?}", edit);
        result.stats
    }

    #[test]
    fn local_edit_relexes_one_line() {
        let stats = check("a\nb\nc\nd", TextEdit::new(2..3, "if"));
        assert_eq!(stats.first_line, 1);
        assert_eq!(stats.lines_relexed, 1);
        assert!(stats.converged);
    }

    #[test]
    fn opening_quote_propagates_to_the_end() {
        let stats = check("x = 1\ny\nz\n", TextEdit::insert(2, "\""));
        assert_eq!(stats.lines_relexed, 4);
        assert!(!stats.converged);
    }

    #[test]
    fn opening_quote_stops_at_the_closing_one() {
        let old = "a 1\nb 2\n/* \" */ c\nd 4\ne 5";
        let stats = check(old, TextEdit::insert(2, "\""));
        // The quote inside the old comment closes the new string, so line 3 starts in root
        // just like before.
        assert_eq!(stats.lines_relexed, 3);
        assert!(stats.converged);
    }

    #[test]
    fn closing_a_comment_converges() {
        check("/* a\nb\nc */ d\ne", TextEdit::delete(0..2));
        check("x\n/* a\nb\nc", TextEdit::insert(7, "*/"));
    }

    #[test]
    fn inserting_and_removing_lines() {
        check("a\nb\nc", TextEdit::insert(1, "\n\n"));
        check("a\nb\nc", TextEdit::delete(1..4));
        check("a\r\nb\r\nc", TextEdit::insert(2, "x"));
        check("abcd", TextEdit::insert(2, "\n"));
        check("ab\ncd", TextEdit::delete(2..3));
    }

    #[test]
    fn edits_at_the_edges() {
        check("", TextEdit::insert(0, "if x"));
        check("if x", TextEdit::delete(0..4));
        check("a\nb", TextEdit::insert(3, "\n"));
        check("a\nb\n", TextEdit::insert(4, "'c"));
    }

    #[test]
    fn no_op_edit_converges_immediately() {
        let stats = check("a\nb\nc", TextEdit::insert(2, ""));
        assert_eq!(stats.lines_relexed, 1);
        assert!(stats.converged);
    }

    #[test]
    fn unterminated_tail_is_recomputed() {
        let grammar = demo_grammar();
        let (tokens, states) = lex(&grammar, "x \"ab");
        let result = update(&grammar, &tokens, &states, &TextEdit::insert(5, "\"")).unwrap();
        assert!(result.tokens.iter().all(|t| t.kind != TokenKind::Unterminated));
    }

    #[test]
    fn rejects_mismatched_line_states() {
        let grammar = demo_grammar();
        let (tokens, _) = lex(&grammar, "a\nb");
        let err = update(&grammar, &tokens, &[LexState::new()], &TextEdit::insert(0, "x"))
            .unwrap_err();
        assert_eq!(
            err,
            EditError::LineStateMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn rejects_out_of_range_edit() {
        let grammar = demo_grammar();
        let (tokens, states) = lex(&grammar, "ab");
        let err = update(&grammar, &tokens, &states, &TextEdit::delete(1..9)).unwrap_err();
        assert!(matches!(err, EditError::OutOfBounds { .. }));
    }
}
