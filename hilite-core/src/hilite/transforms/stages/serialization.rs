//! Serialization stage
//!
//! Turns styled spans into output text with a [Format].

use crate::hilite::formats::{Format, StyledSpan};
use crate::hilite::transforms::{Runnable, TransformError};
use std::sync::Arc;

pub struct Serialization {
    format: Arc<dyn Format>,
}

impl Serialization {
    pub fn new<F: Format + 'static>(format: F) -> Self {
        Serialization {
            format: Arc::new(format),
        }
    }

    /// Use a format handed out by a [FormatRegistry](crate::hilite::formats::FormatRegistry)
    pub fn shared(format: Arc<dyn Format>) -> Self {
        Serialization { format }
    }

    pub fn format_name(&self) -> &str {
        self.format.name()
    }
}

impl Runnable<Vec<StyledSpan>, String> for Serialization {
    fn run(&self, input: Vec<StyledSpan>) -> Result<String, TransformError> {
        Ok(self.format.serialize(&input)?)
    }
}
