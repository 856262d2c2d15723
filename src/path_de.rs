use serde::de::DeserializeOwned;

use crate::document::DocumentError;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, DocumentError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(located)
}

pub fn from_value_with_path<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, DocumentError> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(located)
}

fn located(err: serde_path_to_error::Error<serde_json::Error>) -> DocumentError {
    DocumentError::Deserialize {
        path: err.path().to_string(),
        source: err.into_inner(),
    }
}
