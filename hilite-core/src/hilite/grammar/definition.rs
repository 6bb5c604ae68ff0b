//! Compiled grammars
//!
//!     A [GrammarDefinition] is the validated, ready-to-match form of a
//!     [GrammarSource](super::GrammarSource). Compilation resolves context names to ids,
//!     splices `include` rules in place, and compiles every pattern once. After that the
//!     grammar is immutable, and since it only holds plain data and compiled regexes it can be
//!     shared across threads behind an `Arc`.
//!
//! Matching
//!
//!     Patterns always match at a given offset of a line and report the match length. Most
//!     regex patterns are anchored by wrapping them as `\A(?:...)` and running them on the
//!     rest of the line. Patterns with assertions that look at surrounding text (`^`, `$`,
//!     `\b`, `\B`, `\A`, `\<`, `\>`) are instead searched in the whole line from the offset
//!     and only accepted when the match starts right there, so `^` still means the start of
//!     the line and `\b` sees the character before the offset. `words` patterns check both
//!     word boundaries against the full line.
//!
//!     A pattern that could match the empty string is rejected at compile time, and an empty
//!     match is treated as no match at runtime, so every applied rule advances the lexer.

use super::error::{GrammarError, RuleLocation};
use super::source::{GrammarSource, RuleSource};
use crate::hilite::token::TokenKind;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Name of the context lexing starts in.
pub const ROOT_CONTEXT: &str = "root";

/// Index of a context inside its grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextId(pub(crate) u32);

impl ContextId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(String),
    /// Sorted longest first so that `else if` wins over `else`.
    Words(Vec<String>),
    /// `\A(?:...)`, run on the rest of the line.
    Regex(Regex),
    /// `(?:...)`, searched in the whole line from the offset.
    LineRegex(Regex),
}

impl Pattern {
    /// Length in bytes of the match starting at `pos`, if any.
    pub fn match_len(&self, line: &str, pos: usize) -> Option<usize> {
        let rest = &line[pos..];
        match self {
            Pattern::Literal(literal) => rest.starts_with(literal.as_str()).then(|| literal.len()),
            Pattern::Words(words) => words
                .iter()
                .find(|word| rest.starts_with(word.as_str()) && on_word_boundaries(line, pos, word))
                .map(|word| word.len()),
            Pattern::Regex(regex) => regex
                .find(rest)
                .map(|found| found.end())
                .filter(|len| *len > 0),
            Pattern::LineRegex(regex) => regex
                .find_at(line, pos)
                .filter(|found| found.start() == pos)
                .map(|found| found.end() - pos)
                .filter(|len| *len > 0),
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn on_word_boundaries(line: &str, pos: usize, word: &str) -> bool {
    let starts_with_word_char = word.chars().next().is_some_and(is_word_char);
    let ends_with_word_char = word.chars().next_back().is_some_and(is_word_char);
    let before_ok =
        !starts_with_word_char || !line[..pos].chars().next_back().is_some_and(is_word_char);
    let after_ok = !ends_with_word_char
        || !line[pos + word.len()..]
            .chars()
            .next()
            .is_some_and(is_word_char);
    before_ok && after_ok
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Push(ContextId),
    Pop,
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: Pattern,
    pub kind: TokenKind,
    pub action: Action,
}

#[derive(Debug, Clone)]
pub struct Context {
    pub name: String,
    pub multiline: bool,
    /// Rules with includes already spliced in, in matching order.
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone)]
pub struct GrammarDefinition {
    name: String,
    aliases: Vec<String>,
    extensions: Vec<String>,
    contexts: Vec<Context>,
    root: ContextId,
}

impl GrammarDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn root(&self) -> ContextId {
        self.root
    }

    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    /// Panics if `id` does not come from this grammar.
    pub fn context(&self, id: ContextId) -> &Context {
        &self.contexts[id.index()]
    }

    pub fn context_id(&self, name: &str) -> Option<ContextId> {
        self.contexts
            .iter()
            .position(|context| context.name == name)
            .map(|index| ContextId(index as u32))
    }
}

/// A rule after per-rule validation, before includes are spliced.
enum Entry {
    Rule(Rule),
    Include(ContextId),
}

/// Validate a grammar source and compile it.
pub fn compile(source: &GrammarSource) -> Result<GrammarDefinition, GrammarError> {
    let grammar = source.name.trim();
    if grammar.is_empty() {
        return Err(GrammarError::EmptyName);
    }

    let mut ids: HashMap<&str, ContextId> = HashMap::new();
    for (index, context) in source.contexts.iter().enumerate() {
        if ids
            .insert(context.name.as_str(), ContextId(index as u32))
            .is_some()
        {
            return Err(GrammarError::DuplicateContext {
                grammar: grammar.to_string(),
                context: context.name.clone(),
            });
        }
    }
    let root = *ids
        .get(ROOT_CONTEXT)
        .ok_or_else(|| GrammarError::MissingRoot {
            grammar: grammar.to_string(),
        })?;

    let mut entries: Vec<Vec<Entry>> = Vec::with_capacity(source.contexts.len());
    for context in &source.contexts {
        let mut compiled = Vec::with_capacity(context.rules.len());
        for (index, rule) in context.rules.iter().enumerate() {
            let location = RuleLocation::new(grammar, &context.name, index);
            compiled.push(compile_rule(rule, &ids, location)?);
        }
        entries.push(compiled);
    }

    let mut contexts = Vec::with_capacity(source.contexts.len());
    for (index, context) in source.contexts.iter().enumerate() {
        let mut rules = Vec::new();
        let mut visiting = vec![index];
        splice(&entries, index, &mut visiting, &mut rules, grammar, source)?;
        contexts.push(Context {
            name: context.name.clone(),
            multiline: context.multiline,
            rules,
        });
    }

    let definition = GrammarDefinition {
        name: grammar.to_string(),
        aliases: source.aliases.clone(),
        extensions: source
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .collect(),
        contexts,
        root,
    };
    debug!(
        grammar = definition.name(),
        contexts = definition.contexts.len(),
        rules = definition
            .contexts
            .iter()
            .map(|context| context.rules.len())
            .sum::<usize>(),
        "compiled grammar"
    );
    Ok(definition)
}

fn splice(
    entries: &[Vec<Entry>],
    index: usize,
    visiting: &mut Vec<usize>,
    out: &mut Vec<Rule>,
    grammar: &str,
    source: &GrammarSource,
) -> Result<(), GrammarError> {
    for entry in &entries[index] {
        match entry {
            Entry::Rule(rule) => out.push(rule.clone()),
            Entry::Include(target) => {
                let target = target.index();
                if visiting.contains(&target) {
                    return Err(GrammarError::IncludeCycle {
                        grammar: grammar.to_string(),
                        context: source.contexts[target].name.clone(),
                    });
                }
                visiting.push(target);
                splice(entries, target, visiting, out, grammar, source)?;
                visiting.pop();
            }
        }
    }
    Ok(())
}

fn compile_rule(
    rule: &RuleSource,
    ids: &HashMap<&str, ContextId>,
    location: RuleLocation,
) -> Result<Entry, GrammarError> {
    let pattern_fields = [
        rule.token.is_some(),
        rule.words.is_some(),
        rule.chars.is_some(),
        rule.regex.is_some(),
        rule.include.is_some(),
    ]
    .iter()
    .filter(|set| **set)
    .count();
    match pattern_fields {
        0 => {
            return Err(GrammarError::InvalidRule {
                location,
                message: "rule needs one of token, words, chars, regex or include".to_string(),
            })
        }
        1 => {}
        _ => {
            return Err(GrammarError::InvalidRule {
                location,
                message: "rule has more than one pattern".to_string(),
            })
        }
    }

    let resolve = |target: &str, location: &RuleLocation| {
        ids.get(target)
            .copied()
            .ok_or_else(|| GrammarError::UnknownContext {
                location: location.clone(),
                target: target.to_string(),
            })
    };

    if let Some(target) = &rule.include {
        if rule.kind.is_some() || rule.push.is_some() || rule.pop {
            return Err(GrammarError::InvalidRule {
                location,
                message: "include rules cannot carry kind, push or pop".to_string(),
            });
        }
        return Ok(Entry::Include(resolve(target, &location)?));
    }

    let kind_name = rule
        .kind
        .as_deref()
        .ok_or_else(|| GrammarError::InvalidRule {
            location: location.clone(),
            message: "rule has no kind".to_string(),
        })?;
    let kind = TokenKind::from_name(kind_name).ok_or_else(|| GrammarError::UnknownKind {
        location: location.clone(),
        kind: kind_name.to_string(),
    })?;
    if kind.is_reserved() {
        return Err(GrammarError::ReservedKind {
            location,
            kind: kind_name.to_string(),
        });
    }

    let action = match (&rule.push, rule.pop) {
        (Some(_), true) => {
            return Err(GrammarError::InvalidRule {
                location,
                message: "rule cannot both push and pop".to_string(),
            })
        }
        (Some(target), false) => Action::Push(resolve(target, &location)?),
        (None, true) => Action::Pop,
        (None, false) => Action::None,
    };

    let pattern = compile_pattern(rule, &location)?;
    Ok(Entry::Rule(Rule {
        pattern,
        kind,
        action,
    }))
}

fn compile_pattern(rule: &RuleSource, location: &RuleLocation) -> Result<Pattern, GrammarError> {
    let invalid = |message: &str| GrammarError::InvalidPattern {
        location: location.clone(),
        message: message.to_string(),
    };

    if let Some(literal) = &rule.token {
        if literal.is_empty() {
            return Err(invalid("empty literal"));
        }
        return Ok(Pattern::Literal(literal.clone()));
    }
    if let Some(words) = &rule.words {
        if words.is_empty() || words.iter().any(String::is_empty) {
            return Err(invalid("word lists cannot be empty or contain empty words"));
        }
        let mut words = words.clone();
        words.sort_by(|a, b| b.len().cmp(&a.len()));
        return Ok(Pattern::Words(words));
    }
    if let Some(chars) = &rule.chars {
        if chars.is_empty() {
            return Err(invalid("empty character class"));
        }
        return anchored(&format!("[{}]+", chars), location).map(Pattern::Regex);
    }
    if let Some(regex) = &rule.regex {
        let anchored = anchored(regex, location)?;
        if !looks_around(regex) {
            return Ok(Pattern::Regex(anchored));
        }
        return Regex::new(&format!("(?:{})", regex))
            .map(Pattern::LineRegex)
            .map_err(|e| invalid(&e.to_string()));
    }
    Err(invalid("missing pattern"))
}

/// Whether a regex asserts on text outside its own match: `^` or `$` outside a character
/// class, or one of `\b`, `\B`, `\A`, `\<`, `\>`.
fn looks_around(pattern: &str) -> bool {
    let mut chars = pattern.chars().peekable();
    let mut class_depth = 0usize;
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let escaped = chars.next();
                if class_depth == 0 && matches!(escaped, Some('b' | 'B' | 'A' | '<' | '>')) {
                    return true;
                }
            }
            '[' => {
                class_depth += 1;
                // `[^]...]` and `[]...]` start with a literal `]`
                chars.next_if_eq(&'^');
                chars.next_if_eq(&']');
            }
            ']' if class_depth > 0 => class_depth -= 1,
            '^' | '$' if class_depth == 0 => return true,
            _ => {}
        }
    }
    false
}

fn anchored(pattern: &str, location: &RuleLocation) -> Result<Regex, GrammarError> {
    let regex =
        Regex::new(&format!(r"\A(?:{})", pattern)).map_err(|e| GrammarError::InvalidPattern {
            location: location.clone(),
            message: e.to_string(),
        })?;
    if regex.is_match("") {
        return Err(GrammarError::EmptyMatch {
            location: location.clone(),
        });
    }
    Ok(regex)
}
