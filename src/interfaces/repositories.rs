pub mod collection;
pub mod image;
pub mod json_file;
pub mod memory;
pub mod sqlx_repo;
pub mod token;
