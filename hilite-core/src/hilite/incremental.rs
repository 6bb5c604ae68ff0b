//! Incremental re-lexing
//!
//!     Editors re-highlight after every keystroke, and most keystrokes only change the
//!     meaning of one line. The re-lexer takes the previous tokens, the lexer state recorded
//!     at each line start, and one [TextEdit], and lexes again only from the line the edit
//!     starts on.
//!
//! Convergence
//!
//!     After each re-lexed line that lies past the replaced text, the state at the start of
//!     the next line is compared with the state the old text had at the same line. Lines
//!     only depend on their own text and their start state, so once the two agree every
//!     following old line is still valid: its tokens are reused, shifted by the change in
//!     length, and re-lexing stops. An edit that changes the context (opening a string,
//!     closing a comment) keeps going until the states agree again or the text ends; there
//!     is no other limit.
//!
//!     The result is always identical to tokenizing the edited text from scratch.
//!
//! Entry points
//!
//!     - [update]: stateless, works on token and state slices.
//!     - [LexedText]: owns text, tokens and states and applies edits in place.

pub mod document;
pub mod edit;
pub mod relex;

pub use document::LexedText;
pub use edit::{EditError, TextEdit};
pub use relex::{update, RelexStats, Update};
