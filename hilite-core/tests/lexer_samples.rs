//! Integration tests for the built-in grammars
//!
//! Every sample program must lex without unknown or unterminated tokens and end back in the
//! root context; short snippets pin down the constructs that need context switches.

use hilite_core::hilite::grammar::GrammarRegistry;
use hilite_core::hilite::lexing::{tokenize, LexState};
use hilite_core::hilite::loader::SourceLoader;
use hilite_core::hilite::testing::all_samples;
use hilite_core::hilite::token::{detokenize, Token, TokenKind};
use rstest::rstest;

/// `kind:text` for every token that is not whitespace
fn summary(tokens: &[Token]) -> Vec<String> {
    tokens
        .iter()
        .filter(|token| token.kind != TokenKind::Whitespace)
        .map(|token| format!("{}:{}", token.kind, token.text))
        .collect()
}

#[test]
fn samples_lex_cleanly() {
    let registry = GrammarRegistry::with_builtins().unwrap();
    let samples = all_samples();
    assert!(samples.len() >= 4);
    for sample in samples {
        let loader = SourceLoader::from_path(&sample.path).unwrap();
        let grammar = loader.grammar(&registry, None).unwrap();
        assert_eq!(grammar.name(), sample.language);

        let output = tokenize(loader.source(), &grammar, &LexState::new());
        assert_eq!(detokenize(&output.tokens), loader.source());
        let suspicious: Vec<&Token> = output
            .tokens
            .iter()
            .filter(|t| matches!(t.kind, TokenKind::Unknown | TokenKind::Unterminated))
            .collect();
        assert!(
            suspicious.is_empty(),
            "{}: unexpected tokens {:?}",
            sample.file_name(),
            suspicious
        );
        assert!(output.end_state.is_root(), "{} ends inside a context", sample.file_name());
    }
}

#[rstest]
#[case::swift_interpolation(
    "swift",
    r#"let s = "a\(b + 1)c""#,
    &["keyword:let", "identifier:s", "operator:=", "string:\"", "string:a", "punctuation:\\(",
      "identifier:b", "operator:+", "number:1", "punctuation:)", "string:c", "string:\""]
)]
#[case::swift_string_cannot_span_lines(
    "swift",
    "let t = \"open\nx",
    &["keyword:let", "identifier:t", "operator:=", "unterminated:\"", "unterminated:open",
      "identifier:x"]
)]
#[case::swift_annotation_and_types(
    "swift",
    "@objc func f() -> Int { return 0x1F }",
    &["annotation:@objc", "keyword:func", "identifier:f", "punctuation:(", "punctuation:)",
      "operator:->", "type:Int", "punctuation:{", "keyword:return", "number:0x1F", "punctuation:}"]
)]
#[case::kotlin_templates(
    "kotlin",
    r#"val s = "hi ${name.length} $x""#,
    &["keyword:val", "identifier:s", "operator:=", "string:\"", "string:hi ", "punctuation:${",
      "identifier:name", "operator:.", "identifier:length", "punctuation:}", "string: ",
      "identifier:$x", "string:\""]
)]
#[case::kotlin_char_and_comment(
    "kotlin",
    r"val c = '\n' // done",
    &["keyword:val", "identifier:c", "operator:=", r"char:'\n'", "comment:// done"]
)]
#[case::go_raw_string_spans_lines(
    "go",
    "r := `a\nb` + \"q\"",
    &["identifier:r", "operator::=", "string:`", "string:a", "string:\n", "string:b", "string:`",
      "operator:+", "string:\"", "string:q", "string:\""]
)]
#[case::go_builtin_types(
    "go",
    "var x int = 3 /* c */",
    &["keyword:var", "identifier:x", "type:int", "operator:=", "number:3", "comment:/*",
      "comment: c ", "comment:*/"]
)]
#[case::typescript_template_with_nested_braces(
    "typescript",
    "const m = `v=${a + {b: 1}.b}`;",
    &["keyword:const", "identifier:m", "operator:=", "string:`", "string:v=", "punctuation:${",
      "identifier:a", "operator:+", "punctuation:{", "identifier:b", "operator::", "number:1",
      "punctuation:}", "operator:.", "identifier:b", "punctuation:}", "string:`", "punctuation:;"]
)]
#[case::typescript_operators_and_division(
    "typescript",
    "x?.y ?? z / 2",
    &["identifier:x", "operator:?.", "identifier:y", "operator:??", "identifier:z", "operator:/",
      "number:2"]
)]
#[case::typescript_unterminated_quote(
    "typescript",
    "let s = 'unterminated\nok",
    &["keyword:let", "identifier:s", "operator:=", "unterminated:'", "unterminated:unterminated",
      "identifier:ok"]
)]
fn snippets(#[case] language: &str, #[case] source: &str, #[case] expected: &[&str]) {
    let registry = GrammarRegistry::with_builtins().unwrap();
    let grammar = registry.get(language).unwrap();
    let output = tokenize(source, &grammar, &LexState::new());
    assert_eq!(summary(&output.tokens), expected);
    assert!(output.end_state.is_root());
}
