//! Rendering stage
//!
//! Maps tokens to styled spans, see [render](crate::hilite::formats::render).

use crate::hilite::formats::{render, StyledSpan};
use crate::hilite::token::Token;
use crate::hilite::transforms::{Runnable, TransformError};

pub struct Rendering;

impl Runnable<Vec<Token>, Vec<StyledSpan>> for Rendering {
    fn run(&self, input: Vec<Token>) -> Result<Vec<StyledSpan>, TransformError> {
        Ok(render(&input))
    }
}
