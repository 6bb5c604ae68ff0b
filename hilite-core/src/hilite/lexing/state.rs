//! Lexer state
//!
//!     The only thing the lexer carries from one line to the next is the stack of open
//!     contexts. It is small, comparable and serializable, which is what lets the
//!     incremental re-lexer store one per line and detect convergence with a plain `==`.

use crate::hilite::grammar::{ContextId, GrammarDefinition};
use serde::{Deserialize, Serialize};

/// Pushes beyond this depth are ignored.
pub const MAX_STACK_DEPTH: usize = 256;

/// Stack of open contexts. Empty means the grammar's root context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LexState {
    stack: Vec<ContextId>,
}

impl LexState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn stack(&self) -> &[ContextId] {
        &self.stack
    }

    /// The context rules are currently taken from
    pub fn current(&self, grammar: &GrammarDefinition) -> ContextId {
        self.stack.last().copied().unwrap_or_else(|| grammar.root())
    }

    /// Returns false when the stack is full and the push was dropped.
    pub fn push(&mut self, context: ContextId) -> bool {
        if self.stack.len() >= MAX_STACK_DEPTH {
            return false;
        }
        self.stack.push(context);
        true
    }

    /// Popping the root is a no-op.
    pub fn pop(&mut self) -> Option<ContextId> {
        self.stack.pop()
    }

    pub(crate) fn truncate(&mut self, depth: usize) {
        self.stack.truncate(depth);
    }

    /// Cut the stack at the first id that is not a context of `grammar`, and at the depth
    /// cap. States read back from storage or made with another grammar can hold such ids.
    pub fn retain_valid(&mut self, grammar: &GrammarDefinition) {
        let contexts = grammar.contexts().len();
        let valid = self
            .stack
            .iter()
            .take(MAX_STACK_DEPTH)
            .take_while(|id| id.index() < contexts)
            .count();
        self.stack.truncate(valid);
    }

    /// Context names from the bottom of the stack up, for diagnostics.
    pub fn describe(&self, grammar: &GrammarDefinition) -> Vec<String> {
        self.stack
            .iter()
            .filter_map(|id| grammar.contexts().get(id.index()))
            .map(|context| context.name.clone())
            .collect()
    }
}
