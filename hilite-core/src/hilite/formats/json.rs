//! JSON output
//!
//!     The span list as a JSON array: `[{"kind": "keyword", "text": "if"}, ...]`, with a null
//!     `kind` for unstyled text. Handy for feeding another renderer.

use super::error::FormatError;
use super::format::Format;
use super::render::StyledSpan;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonFormat {
    pub pretty: bool,
}

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "JSON array of styled spans"
    }

    fn serialize(&self, spans: &[StyledSpan]) -> Result<String, FormatError> {
        let result = if self.pretty {
            serde_json::to_string_pretty(spans)
        } else {
            serde_json::to_string(spans)
        };
        result.map_err(|e| FormatError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hilite::token::{LiteralKind, TokenKind};

    #[test]
    fn serializes_kind_names_and_nulls() {
        let spans = vec![
            StyledSpan::new(Some(TokenKind::Literal(LiteralKind::Bool)), "true"),
            StyledSpan::new(None, " "),
        ];
        let json = JsonFormat::default().serialize(&spans).unwrap();
        assert_eq!(
            json,
            r#"[{"kind":"bool","text":"true"},{"kind":null,"text":" "}]"#
        );
        let back: Vec<StyledSpan> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spans);
    }

    #[test]
    fn pretty_output_is_indented() {
        let spans = vec![StyledSpan::new(Some(TokenKind::Comment), "// c")];
        let json = JsonFormat { pretty: true }.serialize(&spans).unwrap();
        insta::assert_snapshot!(json, @r###"
        [
          {
            "kind": "comment",
            "text": "// c"
          }
        ]
        "###);
    }
}
