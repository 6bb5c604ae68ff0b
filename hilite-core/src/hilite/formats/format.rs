//! Format trait definition

use super::error::FormatError;
use super::render::StyledSpan;

/// Trait for output formats
///
/// A format turns rendered spans into a string. Formats are stateless apart from their
/// options, so one instance can serialize any number of documents, from any thread.
///
/// # Examples
///
/// ```ignore
/// struct Plain;
///
/// impl Format for Plain {
///     fn name(&self) -> &str {
///         "plain"
///     }
///
///     fn serialize(&self, spans: &[StyledSpan]) -> Result<String, FormatError> {
///         Ok(spans.iter().map(|span| span.text.as_str()).collect())
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "html", "json")
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    fn serialize(&self, spans: &[StyledSpan]) -> Result<String, FormatError>;
}
