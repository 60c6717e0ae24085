pub mod auth;
pub mod contact;
pub mod crud;
pub mod extractors;
pub mod project;
pub mod upload;
