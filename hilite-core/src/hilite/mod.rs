//! Main module for hilite library functionality

pub mod formats;
pub mod grammar;
pub mod incremental;
pub mod lexing;
pub mod loader;
pub mod testing;
pub mod token;
pub mod transforms;
