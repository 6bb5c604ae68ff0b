//! Grammar registry
//!
//!     Maps language names, aliases and file extensions to compiled grammars. Grammars are
//!     stored behind `Arc` so a lookup hands out a cheap shared handle that can travel to
//!     other threads. There is no global registry: callers build one (usually with
//!     [GrammarRegistry::with_builtins]) and pass it where it is needed.

use super::builtin;
use super::definition::GrammarDefinition;
use super::error::GrammarError;
use super::source::GrammarSource;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default, Clone)]
pub struct GrammarRegistry {
    grammars: Vec<Arc<GrammarDefinition>>,
    by_name: HashMap<String, usize>,
    by_extension: HashMap<String, usize>,
}

impl GrammarRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the grammars shipped with the crate
    pub fn with_builtins() -> Result<Self, GrammarError> {
        let mut registry = Self::new();
        for grammar in builtin::load_all()? {
            registry.register(grammar);
        }
        Ok(registry)
    }

    /// Register a grammar.
    ///
    /// A grammar with the same name replaces the previous one. Names take precedence over
    /// aliases: an alias equal to another registered grammar's name is ignored, and a name
    /// takes over any alias it collides with. Among aliases and extensions, later
    /// registrations win.
    pub fn register(&mut self, grammar: GrammarDefinition) -> Arc<GrammarDefinition> {
        self.register_shared(Arc::new(grammar))
    }

    pub fn register_shared(&mut self, grammar: Arc<GrammarDefinition>) -> Arc<GrammarDefinition> {
        let key = grammar.name().to_ascii_lowercase();
        let index = match self.position_of(&key) {
            Some(index) => {
                self.by_name.retain(|_, i| *i != index);
                self.by_extension.retain(|_, i| *i != index);
                self.grammars[index] = Arc::clone(&grammar);
                index
            }
            None => {
                self.grammars.push(Arc::clone(&grammar));
                self.grammars.len() - 1
            }
        };

        self.by_name.insert(key, index);
        for alias in grammar.aliases() {
            let alias = alias.to_ascii_lowercase();
            match self.position_of(&alias) {
                Some(owner) if owner != index => {
                    debug!(
                        grammar = grammar.name(),
                        %alias,
                        "alias shadows another grammar's name, ignored"
                    );
                }
                _ => {
                    self.by_name.insert(alias, index);
                }
            }
        }
        for ext in grammar.extensions() {
            self.by_extension.insert(ext.to_ascii_lowercase(), index);
        }
        debug!(grammar = grammar.name(), "registered grammar");
        grammar
    }

    /// Slot of the grammar named `key` (lowercase), ignoring aliases
    fn position_of(&self, key: &str) -> Option<usize> {
        self.grammars
            .iter()
            .position(|grammar| grammar.name().eq_ignore_ascii_case(key))
    }

    /// Look up a grammar by name or alias (case-insensitive)
    pub fn get(&self, name: &str) -> Option<Arc<GrammarDefinition>> {
        self.by_name
            .get(&name.to_ascii_lowercase())
            .map(|&index| Arc::clone(&self.grammars[index]))
    }

    /// Look up a grammar by file extension (case-insensitive, leading dot optional)
    pub fn for_extension(&self, ext: &str) -> Option<Arc<GrammarDefinition>> {
        let key = ext.trim_start_matches('.').to_ascii_lowercase();
        self.by_extension
            .get(&key)
            .map(|&index| Arc::clone(&self.grammars[index]))
    }

    pub fn for_path(&self, path: impl AsRef<Path>) -> Option<Arc<GrammarDefinition>> {
        let ext = path.as_ref().extension()?.to_str()?;
        self.for_extension(ext)
    }

    /// Look up by name or alias first, then by extension
    pub fn resolve(&self, language: &str) -> Option<Arc<GrammarDefinition>> {
        self.get(language).or_else(|| self.for_extension(language))
    }

    pub fn has(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.to_ascii_lowercase())
    }

    /// Registered grammar names (sorted)
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .grammars
            .iter()
            .map(|grammar| grammar.name().to_string())
            .collect();
        names.sort();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<GrammarDefinition>> {
        self.grammars.iter()
    }

    pub fn len(&self) -> usize {
        self.grammars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grammars.is_empty()
    }

    /// Compile and register a grammar file (`.json` as JSON, anything else as YAML)
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<Arc<GrammarDefinition>, GrammarError> {
        let grammar = load_grammar_file(path.as_ref())?;
        Ok(self.register(grammar))
    }

    /// Compile and register every `*.yaml`, `*.yml` and `*.json` file in a directory, in file
    /// name order
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<Vec<Arc<GrammarDefinition>>, GrammarError> {
        let dir = dir.as_ref();
        let io_error = |e: std::io::Error| GrammarError::Io {
            path: dir.display().to_string(),
            message: e.to_string(),
        };
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            let is_grammar = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| matches!(ext, "yaml" | "yml" | "json"));
            if path.is_file() && is_grammar {
                paths.push(path);
            }
        }
        paths.sort();
        debug!(dir = %dir.display(), files = paths.len(), "loading grammar directory");
        paths.iter().map(|path| self.load_file(path)).collect()
    }
}

/// Read and compile a grammar file without registering it
pub fn load_grammar_file(path: &Path) -> Result<GrammarDefinition, GrammarError> {
    let text = fs::read_to_string(path).map_err(|e| GrammarError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let source = if is_json {
        GrammarSource::from_json_str(&text)?
    } else {
        GrammarSource::from_yaml_str(&text)?
    };
    source.compile()
}
