//! Grammars shipped with the crate
//!
//!     The grammar files under `grammars/` are embedded at compile time and compiled on
//!     demand, exactly like user grammars are: they go through the same
//!     [GrammarSource](super::GrammarSource) path and the same validation.

use super::definition::GrammarDefinition;
use super::error::GrammarError;
use super::source::GrammarSource;

/// `(name, yaml)` pairs of the embedded grammars.
pub const BUILTIN_GRAMMARS: &[(&str, &str)] = &[
    ("go", include_str!("../../../grammars/go.yaml")),
    ("kotlin", include_str!("../../../grammars/kotlin.yaml")),
    ("swift", include_str!("../../../grammars/swift.yaml")),
    ("typescript", include_str!("../../../grammars/typescript.yaml")),
];

/// Compile one embedded grammar by name.
pub fn load(name: &str) -> Option<Result<GrammarDefinition, GrammarError>> {
    BUILTIN_GRAMMARS
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, yaml)| GrammarSource::from_yaml_str(yaml).and_then(|source| source.compile()))
}

/// Compile every embedded grammar.
pub fn load_all() -> Result<Vec<GrammarDefinition>, GrammarError> {
    BUILTIN_GRAMMARS
        .iter()
        .map(|(_, yaml)| GrammarSource::from_yaml_str(yaml)?.compile())
        .collect()
}
