use uuid::Uuid;

use crate::errors::AppError;

/// Parses a record id taken from the path. Anything that is not a UUID is a
/// client error and never reaches a store.
pub fn valid_uuid(id: &str) -> Result<Uuid, AppError> {
    Uuid::try_parse(id.trim())
        .map_err(|_| AppError::InvalidInput(format!("Invalid id format: {}", id.trim())))
}
