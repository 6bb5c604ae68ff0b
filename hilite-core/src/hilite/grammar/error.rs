//! Grammar loading errors
//!
//!     Loading is the only stage allowed to fail. Everything that can be wrong with a rule set
//!     is detected here, so the lexer never has to deal with a malformed grammar.

use std::fmt;
use thiserror::Error;

/// Where in a grammar a faulty rule sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleLocation {
    pub grammar: String,
    pub context: String,
    pub index: usize,
}

impl RuleLocation {
    pub fn new(grammar: &str, context: &str, index: usize) -> Self {
        RuleLocation {
            grammar: grammar.to_string(),
            context: context.to_string(),
            index,
        }
    }
}

impl fmt::Display for RuleLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "grammar '{}', context '{}', rule #{}",
            self.grammar, self.context, self.index
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("failed to parse grammar: {0}")]
    Parse(String),

    #[error("failed to read grammar file {path}: {message}")]
    Io { path: String, message: String },

    #[error("grammar has an empty name")]
    EmptyName,

    #[error("grammar '{grammar}' has no 'root' context")]
    MissingRoot { grammar: String },

    #[error("grammar '{grammar}' defines context '{context}' more than once")]
    DuplicateContext { grammar: String, context: String },

    #[error("{location}: unknown context '{target}'")]
    UnknownContext {
        location: RuleLocation,
        target: String,
    },

    #[error("grammar '{grammar}': include cycle through context '{context}'")]
    IncludeCycle { grammar: String, context: String },

    #[error("{location}: invalid pattern: {message}")]
    InvalidPattern {
        location: RuleLocation,
        message: String,
    },

    #[error("{location}: pattern can match the empty string")]
    EmptyMatch { location: RuleLocation },

    #[error("{location}: unknown token kind '{kind}'")]
    UnknownKind { location: RuleLocation, kind: String },

    #[error("{location}: token kind '{kind}' is produced by the lexer only")]
    ReservedKind { location: RuleLocation, kind: String },

    #[error("{location}: {message}")]
    InvalidRule {
        location: RuleLocation,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_rule() {
        let err = GrammarError::EmptyMatch {
            location: RuleLocation::new("go", "root", 3),
        };
        assert_eq!(
            err.to_string(),
            "grammar 'go', context 'root', rule #3: pattern can match the empty string"
        );
    }
}
