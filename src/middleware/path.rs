use std::collections::HashMap;

use uuid::Uuid;

use crate::error::ApiError;

/// Parse an id taken from the URL. Malformed ids are a validation failure;
/// well-formed ids that match nothing surface later as not found.
pub fn parse_id(field: &str, raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| {
        let mut field_errors = HashMap::new();
        field_errors.insert(field.to_string(), format!("'{}' is not a valid id", raw));
        ApiError::validation_error("Invalid ID format", Some(field_errors))
    })
}
