//! # hilite
//!
//! A grammar driven tokenizer and highlighter core.
//!
//! File Layout
//!
//!     Everything lives under [hilite](crate::hilite), split by stage:
//!
//!     src/hilite
//!       ├── token         Token kinds and the token type shared by every stage
//!       ├── grammar       Declarative grammars: persisted form, compilation, registry
//!       ├── lexing        The lexer, its resumable state and chunked driver
//!       ├── incremental   Re-lexing after edits, reusing the untouched lines
//!       ├── formats       Rendering tokens to styled spans and serializing them
//!       ├── transforms    Composable pipelines over the stages above
//!       ├── loader        Source loading shortcuts used by the CLI and tests
//!       └── testing       Factories and sample sources for tests
//!
//!     The contract across stages is simple: source text goes in, a token stream that covers
//!     the text exactly comes out, and everything after lexing is a pure function of that
//!     stream.

pub mod hilite;
