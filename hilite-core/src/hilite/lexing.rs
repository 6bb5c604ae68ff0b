//! Lexing
//!
//!     Turns text into a flat, gap-free token stream using a [GrammarDefinition]. The only
//!     state carried between lines is the [LexState] context stack, which makes it possible
//!     to resume lexing at any line start. Three entry points build on that:
//!
//!         - [tokenize] / [Lexer::tokenize]: a whole text in one pass.
//!         - [Lexer::tokenize_lines]: the same, also recording the state at each line start
//!           for the incremental re-lexer.
//!         - [ChunkedLexer]: a bounded number of lines per call, handing the state from one
//!           chunk to the next by value.
//!
//!     Lexing never fails. Text no rule matches becomes `Unknown` tokens, and constructs left
//!     open become `Unterminated` tokens; see [lexer] for the exact rules.
//!
//! [GrammarDefinition]: crate::hilite::grammar::GrammarDefinition

pub mod chunked;
pub mod lexer;
pub mod lines;
pub mod state;

pub use chunked::{Chunk, ChunkedLexer, DEFAULT_CHUNK_LINES};
pub use lexer::{tokenize, Lexer, LexerOutput, LinesOutput};
pub use lines::{line_count, line_spans, LineSpan};
pub use state::{LexState, MAX_STACK_DEPTH};
