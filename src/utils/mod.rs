// Utility functions
pub mod error;
pub mod parse;

pub use error::*;
pub use parse::*;
