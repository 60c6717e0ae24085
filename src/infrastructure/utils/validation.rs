use validator::ValidationError;

/// Rejects values that are empty once surrounding whitespace is trimmed.
/// Forms are trimmed when normalized, so a whitespace-only value would
/// otherwise be stored empty.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
