//! Testing utilities
//!
//!     Helpers shared by unit and integration tests:
//!
//!         - [factories]: `mk_tokens` for building expected token streams, and a compact demo
//!           grammar that touches every lexer feature.
//!         - [samples]: access to the sample programs under `samples/`.
//!
//!     Lexer tests compare whole token streams rather than probing single tokens, so a
//!     regression anywhere in a line shows up. Anything touching the incremental re-lexer
//!     should compare against a fresh `tokenize` of the edited text, which is the one
//!     property that matters there.

pub mod factories;
pub mod samples;

pub use factories::{demo_grammar, mk_tokens, DEMO_GRAMMAR};
pub use samples::{all_samples, samples_for, Sample};
