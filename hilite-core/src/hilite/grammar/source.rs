//! Persisted grammar form
//!
//!     Grammars are data. A grammar file is a YAML (or JSON) document with a name, optional
//!     aliases and file extensions, and a list of contexts. Each context is an ordered list of
//!     rules; the order is the matching priority, which is why contexts and rules are lists
//!     and never maps.
//!
//!     ```yaml
//!     name: demo
//!     extensions: [demo]
//!     contexts:
//!       - name: root
//!         rules:
//!           - { words: [if, else], kind: keyword }
//!           - { regex: '[A-Za-z_][A-Za-z0-9_]*', kind: identifier }
//!           - { token: '"', kind: string, push: string }
//!           - { regex: '\s+', kind: whitespace }
//!       - name: string
//!         multiline: false
//!         rules:
//!           - { token: '"', kind: string, pop: true }
//!           - { regex: '[^"]+', kind: string }
//!     ```
//!
//!     A rule carries exactly one of `token` (literal text), `words` (keywords, matched on
//!     word boundaries), `chars` (a character class, matched one or more times), `regex`, or
//!     `include` (splice the rules of another context here). Pattern rules need a `kind` and
//!     may `push` a context or `pop` the current one.
//!
//!     These types only describe the document. [compile](super::definition::compile) turns a
//!     source into a [GrammarDefinition](super::GrammarDefinition), which is where validation
//!     happens.

use super::definition::{compile, GrammarDefinition};
use super::error::GrammarError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrammarSource {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,
    pub contexts: Vec<ContextSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContextSource {
    pub name: String,
    /// Whether constructs in this context may continue past a line break.
    #[serde(default = "default_multiline")]
    pub multiline: bool,
    pub rules: Vec<RuleSource>,
}

fn default_multiline() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chars: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub pop: bool,
}

impl GrammarSource {
    pub fn from_yaml_str(source: &str) -> Result<Self, GrammarError> {
        serde_yaml::from_str(source).map_err(|e| GrammarError::Parse(e.to_string()))
    }

    pub fn from_json_str(source: &str) -> Result<Self, GrammarError> {
        serde_json::from_str(source).map_err(|e| GrammarError::Parse(e.to_string()))
    }

    pub fn to_yaml_string(&self) -> Result<String, GrammarError> {
        serde_yaml::to_string(self).map_err(|e| GrammarError::Parse(e.to_string()))
    }

    /// Validate and compile into a ready-to-use grammar.
    pub fn compile(&self) -> Result<GrammarDefinition, GrammarError> {
        compile(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: &str = r#"
name: demo
aliases: [dm]
contexts:
  - name: root
    rules:
      - { words: [if, else], kind: keyword }
      - { token: '"', kind: string, push: string }
  - name: string
    multiline: false
    rules:
      - { token: '"', kind: string, pop: true }
"#;

    #[test]
    fn parses_yaml() {
        let source = GrammarSource::from_yaml_str(DEMO).unwrap();
        assert_eq!(source.name, "demo");
        assert_eq!(source.aliases, vec!["dm".to_string()]);
        assert!(source.extensions.is_empty());
        assert_eq!(source.contexts.len(), 2);
        assert!(source.contexts[0].multiline);
        assert!(!source.contexts[1].multiline);
        assert_eq!(
            source.contexts[0].rules[0].words,
            Some(vec!["if".to_string(), "else".to_string()])
        );
        assert!(source.contexts[1].rules[0].pop);
    }

    #[test]
    fn parses_json() {
        let json = r#"{"name": "j", "contexts": [{"name": "root", "rules": [{"chars": "a-z", "kind": "identifier"}]}]}"#;
        let source = GrammarSource::from_json_str(json).unwrap();
        assert_eq!(source.contexts[0].rules[0].chars.as_deref(), Some("a-z"));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = GrammarSource::from_yaml_str(
            "name: x\ncontexts:\n  - name: root\n    rules:\n      - { regexp: 'a', kind: keyword }\n",
        )
        .unwrap_err();
        assert!(matches!(err, GrammarError::Parse(_)));
    }

    #[test]
    fn yaml_round_trip() {
        let source = GrammarSource::from_yaml_str(DEMO).unwrap();
        let yaml = source.to_yaml_string().unwrap();
        assert_eq!(GrammarSource::from_yaml_str(&yaml).unwrap(), source);
    }
}
