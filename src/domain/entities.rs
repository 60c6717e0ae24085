pub mod admin;
pub mod categories;
pub mod contact_me;
pub mod entity;
pub mod image;
pub mod project;
pub mod token;
