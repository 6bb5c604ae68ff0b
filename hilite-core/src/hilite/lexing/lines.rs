//! Line splitting
//!
//!     The lexer works one line at a time. A line is the text up to and including a `\n`,
//!     and a text that is empty or ends in `\n` has a final empty line, so a text always has
//!     one more line than it has `\n` characters. Each line is split into a body and a
//!     terminator (`\n` or `\r\n`, empty on the last line), which are lexed separately so
//!     that no token ever crosses a line break.

use std::ops::Range;

/// Byte layout of one line inside its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    /// End of the body and start of the terminator.
    pub body_end: usize,
    pub end: usize,
}

impl LineSpan {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn body(&self) -> Range<usize> {
        self.start..self.body_end
    }

    pub fn terminator(&self) -> Range<usize> {
        self.body_end..self.end
    }
}

/// Split a text into lines.
pub fn line_spans(text: &str) -> Vec<LineSpan> {
    let mut spans = Vec::new();
    let mut start = 0;
    for line in text.split_inclusive('\n') {
        let end = start + line.len();
        let terminator = terminator_len(line);
        spans.push(LineSpan {
            start,
            body_end: end - terminator,
            end,
        });
        start = end;
    }
    if text.is_empty() || text.ends_with('\n') {
        spans.push(LineSpan {
            start,
            body_end: start,
            end: start,
        });
    }
    spans
}

/// Number of lines `text` splits into; never zero.
pub fn line_count(text: &str) -> usize {
    text.bytes().filter(|b| *b == b'\n').count() + 1
}

/// Split a single line into body and terminator.
pub fn split_terminator(line: &str) -> (&str, &str) {
    line.split_at(line.len() - terminator_len(line))
}

fn terminator_len(line: &str) -> usize {
    if line.ends_with("\r\n") {
        2
    } else if line.ends_with('\n') {
        1
    } else {
        0
    }
}

/// Index of the line containing `offset`. An offset on a line start belongs to that line.
pub fn line_index(spans: &[LineSpan], offset: usize) -> usize {
    spans
        .partition_point(|span| span.start <= offset)
        .saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", 1)]
    #[case("a", 1)]
    #[case("a\n", 2)]
    #[case("a\nb", 2)]
    #[case("\n\n", 3)]
    #[case("a\r\nb\r\n", 3)]
    fn counts_lines(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(line_spans(text).len(), expected);
        assert_eq!(line_count(text), expected);
    }

    #[test]
    fn spans_separate_body_and_terminator() {
        let text = "ab\r\ncd\nef";
        let spans = line_spans(text);
        assert_eq!(&text[spans[0].body()], "ab");
        assert_eq!(&text[spans[0].terminator()], "\r\n");
        assert_eq!(&text[spans[1].body()], "cd");
        assert_eq!(&text[spans[1].terminator()], "\n");
        assert_eq!(&text[spans[2].range()], "ef");
        assert!(spans[2].terminator().is_empty());
    }

    #[test]
    fn lone_carriage_return_stays_in_body() {
        assert_eq!(split_terminator("a\r"), ("a\r", ""));
        assert_eq!(split_terminator("a\r\n"), ("a", "\r\n"));
        assert_eq!(split_terminator("\n"), ("", "\n"));
    }

    #[test]
    fn finds_line_of_offset() {
        let spans = line_spans("ab\ncd\n");
        assert_eq!(line_index(&spans, 0), 0);
        assert_eq!(line_index(&spans, 2), 0);
        assert_eq!(line_index(&spans, 3), 1);
        assert_eq!(line_index(&spans, 6), 2);
    }
}
