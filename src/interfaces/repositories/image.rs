use async_trait::async_trait;

use crate::{entities::image::ValidatedImage, errors::StoreError};

/// Destination for uploaded images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores the image under `file_name` and returns the URL it is served from.
    async fn store(&self, image: &ValidatedImage<'_>, file_name: &str) -> Result<String, StoreError>;

    async fn check_connection(&self) -> Result<(), StoreError>;
}
