//! Locating a JSON object inside free-form model output
//!
//! Model answers may be wrapped in Markdown fences or surrounded by prose.
//! The first `{` that starts a complete, well-formed object wins.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

/// Why no usable object could be pulled out of the output
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no JSON object found in model output")]
    NoObject,

    #[error("JSON object does not match the expected shape: {0}")]
    Shape(String),
}

/// Return the first well-formed JSON object embedded anywhere in `raw`
pub fn first_json_object(raw: &str) -> Result<Map<String, Value>, ExtractError> {
    for (start, _) in raw.match_indices('{') {
        let mut stream = serde_json::Deserializer::from_str(&raw[start..]).into_iter::<Value>();
        if let Some(Ok(Value::Object(map))) = stream.next() {
            return Ok(map);
        }
    }
    Err(ExtractError::NoObject)
}

/// Extract the first JSON object in `raw` and deserialize it as `T`
pub fn extract_object<T: DeserializeOwned>(raw: &str) -> Result<T, ExtractError> {
    let object = first_json_object(raw)?;
    serde_json::from_value(Value::Object(object)).map_err(|e| ExtractError::Shape(e.to_string()))
}
