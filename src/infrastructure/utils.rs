pub mod image;
pub mod valid_uuid;
pub mod validation;
