//! Test factories for creating tokens and grammars succinctly

use crate::hilite::grammar::{GrammarDefinition, GrammarSource};
use crate::hilite::token::{Token, TokenKind};

/// A small grammar covering every lexer feature: keywords, a multi-line string with
/// escapes, a nestable block comment and a single-line char literal.
///
/// Context ids are stable: `root` is 0, `string` 1, `comment` 2, `quote` 3.
pub const DEMO_GRAMMAR: &str = r#"
name: demo
aliases: [dm]
extensions: [demo]
contexts:
  - name: root
    rules:
      - { words: [if, else], kind: keyword }
      - { regex: '[A-Za-z_][A-Za-z0-9_]*', kind: identifier }
      - { regex: '[0-9]+(\.[0-9]+)?', kind: number }
      - { regex: '[(){}]', kind: punctuation }
      - { regex: '\s+', kind: whitespace }
      - { token: '"', kind: string, push: string }
      - { token: '/*', kind: comment, push: comment }
      - { token: '*/', kind: comment, pop: true }
      - { token: "'", kind: char, push: quote }
  - name: string
    rules:
      - { regex: '\\.', kind: string }
      - { token: '"', kind: string, pop: true }
      - { regex: '[^"\\]+', kind: string }
  - name: comment
    rules:
      - { token: '/*', kind: comment, push: comment }
      - { token: '*/', kind: comment, pop: true }
      - { regex: '[^*/]+', kind: comment }
      - { regex: '[*/]', kind: comment }
  - name: quote
    multiline: false
    rules:
      - { token: "'", kind: char, pop: true }
      - { regex: "[^']+", kind: char }
"#;

/// Compile [DEMO_GRAMMAR]
pub fn demo_grammar() -> GrammarDefinition {
    GrammarSource::from_yaml_str(DEMO_GRAMMAR)
        .and_then(|source| source.compile())
        .unwrap_or_else(|e| panic!("demo grammar does not compile: {}", e))
}

/// Make a vector of contiguous tokens from `(kind, text)` pairs, starting at offset 0
pub fn mk_tokens(specs: &[(TokenKind, &str)]) -> Vec<Token> {
    let mut offset = 0;
    specs
        .iter()
        .map(|(kind, text)| {
            let token = Token::new(*kind, offset, *text);
            offset = token.end;
            token
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_contiguous() {
        let tokens = mk_tokens(&[(TokenKind::Keyword, "if"), (TokenKind::Whitespace, " ")]);
        assert_eq!(tokens[0].span(), 0..2);
        assert_eq!(tokens[1].span(), 2..3);
    }

    #[test]
    fn demo_context_ids_are_stable() {
        let grammar = demo_grammar();
        let ids: Vec<_> = ["root", "string", "comment", "quote"]
            .iter()
            .map(|name| grammar.context_id(name).unwrap().index())
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }
}
