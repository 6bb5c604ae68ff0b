//! Transform pipeline
//!
//!     Highlighting is a short chain of typed stages: text to tokens, tokens to styled spans,
//!     spans to output. Each stage implements [Runnable], and [Transform] glues stages
//!     together with `.then()`, with the compiler checking that each stage's input matches
//!     the previous stage's output:
//!
//!     ```rust,ignore
//!     let pipeline = Transform::from_fn(Ok)
//!         .then(Tokenization::new(grammar))   // String → Vec<Token>
//!         .then(Rendering)                    // Vec<Token> → Vec<StyledSpan>
//!         .then(Serialization::new(HtmlFormat::default())); // → String
//!     ```
//!
//!     Pipelines that do not depend on a grammar are pre-built as `once_cell::sync::Lazy`
//!     statics; the others are built by the functions in [standard].
//!
//! Module Organization
//!
//!     - [stages]: the individual stages.
//!     - [standard]: pre-built pipelines.

pub mod stages;
pub mod standard;

use crate::hilite::formats::FormatError;
use thiserror::Error;

/// Error that can occur during transformation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("{0}")]
    Error(String),
    #[error("Stage '{stage}' failed: {message}")]
    StageFailed { stage: String, message: String },
}

impl From<String> for TransformError {
    fn from(s: String) -> Self {
        TransformError::Error(s)
    }
}

impl From<&str> for TransformError {
    fn from(s: &str) -> Self {
        TransformError::Error(s.to_string())
    }
}

impl From<FormatError> for TransformError {
    fn from(err: FormatError) -> Self {
        TransformError::StageFailed {
            stage: "serialization".to_string(),
            message: err.to_string(),
        }
    }
}

/// Trait for anything that can transform an input to an output
pub trait Runnable<I, O> {
    fn run(&self, input: I) -> Result<O, TransformError>;
}

/// A composable transformation pipeline from `I` to `O`
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, TransformError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, TransformError> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Chain a stage after this transform
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    /// Chain a pre-built static transform after this one
    pub fn then_transform<O2>(self, next: &'static Transform<O, O2>) -> Transform<I, O2>
    where
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                next.run(intermediate)
            }),
        }
    }

    pub fn run(&self, input: I) -> Result<O, TransformError> {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, TransformError> {
        Transform::run(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Double;
    impl Runnable<i32, i32> for Double {
        fn run(&self, input: i32) -> Result<i32, TransformError> {
            Ok(input * 2)
        }
    }

    struct Show;
    impl Runnable<i32, String> for Show {
        fn run(&self, input: i32) -> Result<String, TransformError> {
            Ok(input.to_string())
        }
    }

    struct Fail;
    impl Runnable<i32, i32> for Fail {
        fn run(&self, _input: i32) -> Result<i32, TransformError> {
            Err("intentional failure".into())
        }
    }

    #[test]
    fn stages_chain_in_order() {
        let transform = Transform::from_fn(|x: i32| Ok(x + 1)).then(Double).then(Show);
        assert_eq!(transform.run(4).unwrap(), "10");
    }

    #[test]
    fn errors_stop_the_chain() {
        let transform = Transform::from_fn(|x: i32| Ok(x)).then(Fail).then(Double);
        assert_eq!(
            transform.run(1).unwrap_err(),
            TransformError::Error("intentional failure".to_string())
        );
    }

    #[test]
    fn format_errors_name_the_stage() {
        let err: TransformError = FormatError::FormatNotFound("svg".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Stage 'serialization' failed: format 'svg' not found"
        );
    }
}
