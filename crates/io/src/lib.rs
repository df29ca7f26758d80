// Expected inventory loading

pub mod csv;
pub mod error;

pub use crate::csv::{load_expected, load_expected_from_reader, load_expected_from_str};
pub use error::LoadError;
