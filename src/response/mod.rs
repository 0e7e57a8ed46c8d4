//! Shaping of raw model output into response fields

pub mod extract;
pub mod stats;

pub use extract::{extract_object, first_json_object, ExtractError};
pub use stats::{compression_ratio, word_count};
