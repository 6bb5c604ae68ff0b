//! Source loading utilities
//!
//! `SourceLoader` reads source text from a file or a string, picks the grammar for it and
//! runs transforms on it. It is what the CLI and the integration tests go through.
//!
//! # Example
//!
//! ```rust,ignore
//! use hilite_core::hilite::grammar::GrammarRegistry;
//! use hilite_core::hilite::loader::SourceLoader;
//!
//! let registry = GrammarRegistry::with_builtins()?;
//! let loader = SourceLoader::from_path("main.go")?;
//! let grammar = loader.grammar(&registry, None)?;   // inferred from the extension
//! let spans = loader.highlight(grammar)?;
//! ```

use crate::hilite::formats::{Format, StyledSpan};
use crate::hilite::grammar::{GrammarDefinition, GrammarRegistry};
use crate::hilite::incremental::LexedText;
use crate::hilite::token::Token;
use crate::hilite::transforms::standard::{highlight, to_markup, tokenizer};
use crate::hilite::transforms::{Transform, TransformError};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoaderError {
    #[error("cannot read {path}: {message}")]
    Io { path: String, message: String },
    #[error("unknown language '{0}'")]
    UnknownLanguage(String),
    #[error("cannot infer the language of {0}; pass one explicitly")]
    NoLanguage(String),
    #[error("transform error: {0}")]
    Transform(#[from] TransformError),
}

pub struct SourceLoader {
    source: String,
    path: Option<PathBuf>,
}

impl SourceLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| LoaderError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(SourceLoader {
            source,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        SourceLoader {
            source: source.into(),
            path: None,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Pick the grammar: `language` (name, alias or extension) if given, otherwise the file
    /// extension of the source path.
    pub fn grammar(
        &self,
        registry: &GrammarRegistry,
        language: Option<&str>,
    ) -> Result<Arc<GrammarDefinition>, LoaderError> {
        if let Some(language) = language {
            return registry
                .resolve(language)
                .ok_or_else(|| LoaderError::UnknownLanguage(language.to_string()));
        }
        let path = self
            .path
            .as_deref()
            .ok_or_else(|| LoaderError::NoLanguage("<string>".to_string()))?;
        registry
            .for_path(path)
            .ok_or_else(|| LoaderError::NoLanguage(path.display().to_string()))
    }

    /// Run a custom transform on the source
    pub fn with<O: 'static>(&self, transform: &Transform<String, O>) -> Result<O, LoaderError> {
        Ok(transform.run(self.source.clone())?)
    }

    pub fn tokenize(&self, grammar: Arc<GrammarDefinition>) -> Result<Vec<Token>, LoaderError> {
        self.with(&tokenizer(grammar))
    }

    pub fn highlight(&self, grammar: Arc<GrammarDefinition>) -> Result<Vec<StyledSpan>, LoaderError> {
        self.with(&highlight(grammar))
    }

    pub fn markup<F: Format + 'static>(
        &self,
        grammar: Arc<GrammarDefinition>,
        format: F,
    ) -> Result<String, LoaderError> {
        self.with(&to_markup(grammar, format))
    }

    /// Lex the source into an editable [LexedText]
    pub fn lexed(&self, grammar: &GrammarDefinition) -> LexedText {
        LexedText::new(grammar, self.source.clone())
    }
}
