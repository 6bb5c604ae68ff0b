//! Highlighting session for the CLI
//!
//! A [Session] holds everything resolved from configuration and flags: the grammar registry
//! (built-ins, configured directories, then `--grammar` files) and the format registry with the
//! configured HTML options. Highlighting runs the loaded source through a markup transform
//! built from those. Errors come back as display strings ready for stderr.

use hilite_config::HiliteConfig;
use hilite_core::hilite::formats::{AnsiFormat, FormatRegistry, HtmlFormat, JsonFormat};
use hilite_core::hilite::grammar::{GrammarDefinition, GrammarRegistry};
use hilite_core::hilite::loader::{LoaderError, SourceLoader};
use hilite_core::hilite::transforms::standard::{to_markup_with, MarkupTransform};
use hilite_core::hilite::transforms::stages::{Serialization, Tokenization};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

pub struct Session {
    config: HiliteConfig,
    grammars: GrammarRegistry,
    formats: FormatRegistry,
}

impl Session {
    pub fn new(config: HiliteConfig, grammar_files: &[PathBuf]) -> Result<Self, String> {
        let mut grammars = GrammarRegistry::with_builtins()
            .map_err(|e| format!("Built-in grammar error: {}", e))?;
        for dir in &config.grammars.paths {
            grammars
                .load_dir(dir)
                .map_err(|e| format!("Grammar error: {}", e))?;
        }
        for file in grammar_files {
            grammars
                .load_file(file)
                .map_err(|e| format!("Grammar error: {}", e))?;
        }

        let mut formats = FormatRegistry::new();
        formats.register(HtmlFormat::new(
            config.render.class_prefix.clone(),
            config.render.wrap_pre,
        ));
        formats.register(JsonFormat { pretty: true });
        formats.register(AnsiFormat);

        Ok(Session {
            config,
            grammars,
            formats,
        })
    }

    pub fn list_languages(&self) -> String {
        let mut out = String::from("Available languages:\n\n");
        for name in self.grammars.names() {
            let Some(grammar) = self.grammars.get(&name) else {
                continue;
            };
            let extensions: Vec<String> = grammar
                .extensions()
                .iter()
                .map(|ext| format!(".{}", ext))
                .collect();
            out.push_str(&format!("  {:<12} {}\n", name, extensions.join(" ")));
        }
        out
    }

    pub fn list_formats(&self) -> String {
        let mut out = String::from("Available formats:\n\n");
        for (name, description) in self.formats.describe() {
            out.push_str(&format!("  {:<6} {}\n", name, description));
        }
        out
    }

    /// Highlight the loaded source into `format`, or the configured default format
    pub fn highlight(
        &self,
        loader: &SourceLoader,
        language: Option<&str>,
        format: Option<&str>,
    ) -> Result<String, String> {
        let format_name = format.unwrap_or(self.config.highlight.default_format.as_str());
        let pipeline = self.pipeline(loader, language, format_name)?;
        loader.with(&pipeline).map_err(|e| e.to_string())
    }

    /// Chunked tokenization, rendering, then serialization into the named format
    fn pipeline(
        &self,
        loader: &SourceLoader,
        language: Option<&str>,
        format_name: &str,
    ) -> Result<MarkupTransform, String> {
        let format = self.formats.get_shared(format_name).map_err(|e| {
            format!(
                "{} (available: {})",
                e,
                self.formats.list_formats().join(", ")
            )
        })?;
        let grammar = self.grammar_for(loader, language)?;
        debug!(
            language = grammar.name(),
            format = format_name,
            chunk_lines = self.config.lexing.chunk_lines,
            "building markup pipeline"
        );
        Ok(to_markup_with(
            Tokenization::new(grammar).chunked(self.config.lexing.chunk_lines),
            Serialization::shared(format),
        ))
    }

    /// Explicit language first, then the file extension, then the configured fallback
    fn grammar_for(
        &self,
        loader: &SourceLoader,
        language: Option<&str>,
    ) -> Result<Arc<GrammarDefinition>, String> {
        match loader.grammar(&self.grammars, language) {
            Ok(grammar) => Ok(grammar),
            Err(LoaderError::NoLanguage(source)) => {
                let Some(fallback) = self.config.highlight.fallback_language.as_deref() else {
                    return Err(LoaderError::NoLanguage(source).to_string());
                };
                debug!(%source, fallback, "using fallback language");
                loader
                    .grammar(&self.grammars, Some(fallback))
                    .map_err(|e| e.to_string())
            }
            Err(e) => Err(e.to_string()),
        }
    }
}
