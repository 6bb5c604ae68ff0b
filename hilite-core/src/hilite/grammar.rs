//! Grammar definitions
//!
//!     A grammar describes how the text of one language maps to tokens. It is pure data: a
//!     list of named contexts, each an ordered list of rules. Lexing starts in the `root`
//!     context; rules can enter another context (`push`) and leave the current one (`pop`),
//!     which is how nested constructs like block comments or string interpolation are
//!     expressed without any code.
//!
//! Lifecycle
//!
//!     1. A [GrammarSource] is deserialized from YAML or JSON. See [source].
//!     2. It is compiled into a [GrammarDefinition]. All validation happens here and this
//!        is the only step in the whole library that can fail on bad input. See [definition].
//!     3. The definition is registered in a [GrammarRegistry] and shared from there as an
//!        `Arc<GrammarDefinition>`; it is never mutated again. See [registry].
//!
//! Priority
//!
//!     At each position the rules of the current context are tried in declaration order and
//!     the first one that matches wins, regardless of match length. So keyword lists go before
//!     identifiers, `"""` before `"`, and comment openers before operators.

pub mod builtin;
pub mod definition;
pub mod error;
pub mod registry;
pub mod source;

pub use definition::{
    compile, Action, Context, ContextId, GrammarDefinition, Pattern, Rule, ROOT_CONTEXT,
};
pub use error::{GrammarError, RuleLocation};
pub use registry::{load_grammar_file, GrammarRegistry};
pub use source::{ContextSource, GrammarSource, RuleSource};
