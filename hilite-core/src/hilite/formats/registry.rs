//! Format registry
//!
//!     Formats are looked up by name. The registry is a plain value: build one with
//!     [FormatRegistry::with_defaults] (or configured formats) and pass it around.

use super::ansi::AnsiFormat;
use super::error::FormatError;
use super::format::Format;
use super::html::HtmlFormat;
use super::json::JsonFormat;
use super::render::StyledSpan;
use std::collections::HashMap;
use std::sync::Arc;

pub struct FormatRegistry {
    formats: HashMap<String, Arc<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format, replacing any format with the same name
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Arc::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Shared handle to a format, for pipelines that outlive the borrow
    pub fn get_shared(&self, name: &str) -> Result<Arc<dyn Format>, FormatError> {
        self.formats
            .get(name)
            .cloned()
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// `(name, description)` pairs, sorted by name
    pub fn describe(&self) -> Vec<(String, String)> {
        self.list_formats()
            .into_iter()
            .filter_map(|name| {
                let description = self.formats.get(&name)?.description().to_string();
                Some((name, description))
            })
            .collect()
    }

    pub fn serialize(&self, spans: &[StyledSpan], format: &str) -> Result<String, FormatError> {
        self.get(format)?.serialize(spans)
    }

    /// Create a registry with the built-in formats and their default options
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(HtmlFormat::default());
        registry.register(JsonFormat::default());
        registry.register(AnsiFormat);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hilite::token::TokenKind;

    struct Plain;
    impl Format for Plain {
        fn name(&self) -> &str {
            "plain"
        }
        fn serialize(&self, spans: &[StyledSpan]) -> Result<String, FormatError> {
            Ok(spans.iter().map(|span| span.text.as_str()).collect())
        }
    }

    #[test]
    fn defaults_are_registered() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(registry.list_formats(), vec!["ansi", "html", "json"]);
        assert!(registry
            .describe()
            .iter()
            .all(|(_, description)| !description.is_empty()));
    }

    #[test]
    fn custom_format_round_trip() {
        let mut registry = FormatRegistry::new();
        registry.register(Plain);
        let spans = vec![
            StyledSpan::new(Some(TokenKind::Keyword), "if"),
            StyledSpan::new(None, " x"),
        ];
        assert_eq!(registry.serialize(&spans, "plain").unwrap(), "if x");
    }

    #[test]
    fn shared_handles_outlive_the_registry() {
        let format = {
            let registry = FormatRegistry::with_defaults();
            registry.get_shared("json").unwrap()
        };
        assert_eq!(format.name(), "json");
        assert!(matches!(
            FormatRegistry::new().get_shared("json"),
            Err(FormatError::FormatNotFound(_))
        ));
    }

    #[test]
    fn unknown_format() {
        let registry = FormatRegistry::new();
        match registry.serialize(&[], "nonexistent") {
            Err(FormatError::FormatNotFound(name)) => assert_eq!(name, "nonexistent"),
            other => panic!("Expected FormatNotFound error, got {:?}", other),
        }
    }
}
