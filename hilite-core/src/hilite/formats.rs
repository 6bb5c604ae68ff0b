//! Rendering and output formats
//!
//!     Tokens are first mapped to [StyledSpan]s by [render], which only decides which text is
//!     styled and with which kind. A [Format] then turns spans into output:
//!
//!         - html: `<span class="hl-keyword">` markup for a stylesheet to color.
//!         - json: the span list itself, for other renderers.
//!         - ansi: colored terminal text.
//!
//!     Formats are registered by name in a [FormatRegistry]. Adding a format means
//!     implementing the trait and registering an instance; nothing else has to change.

pub mod ansi;
pub mod error;
pub mod format;
pub mod html;
pub mod json;
pub mod registry;
pub mod render;

pub use ansi::{escape_controls, AnsiFormat};
pub use error::FormatError;
pub use format::Format;
pub use html::{escape_html, HtmlFormat, DEFAULT_CLASS_PREFIX};
pub use json::JsonFormat;
pub use registry::FormatRegistry;
pub use render::{render, StyledSpan};
