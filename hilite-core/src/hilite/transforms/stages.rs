//! Individual transformation stages
//!
//! Each stage implements the `Runnable` trait.

pub mod rendering;
pub mod serialization;
pub mod tokenization;

pub use rendering::Rendering;
pub use serialization::Serialization;
pub use tokenization::Tokenization;
