pub mod health;
pub mod ingredient;
pub mod recipe;
pub mod relation;
pub mod shopping_list;
pub mod tag;
pub mod user;

use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Parse a raw query string with `serde_qs`. An absent query yields `T::default()`.
pub(crate) fn parse_query<T: DeserializeOwned + Default>(raw: Option<&str>) -> Result<T, ApiError> {
    Ok(raw
        .map(serde_qs::from_str::<T>)
        .transpose()
        .map_err(|e| ApiError::validation(format!("invalid query string: {e}")))?
        .unwrap_or_default())
}

/// Parse a `1|true|0|false` query flag.
pub(crate) fn parse_flag(name: &str, value: &str) -> Result<bool, ApiError> {
    match value {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(ApiError::validation(format!(
            "{name} must be one of 1, true, 0, false"
        ))),
    }
}
