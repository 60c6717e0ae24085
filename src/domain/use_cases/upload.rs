use std::sync::Arc;

use uuid::Uuid;

use crate::{
    entities::image::{ImageUploadForm, ImageUploadResponse},
    errors::AppError,
    repositories::image::ImageStore,
    utils::image::validate_image,
};

pub struct UploadHandler {
    pub image_store: Arc<dyn ImageStore>,
    pub max_bytes: usize,
}

impl UploadHandler {
    pub fn new(image_store: Arc<dyn ImageStore>, max_bytes: usize) -> Self {
        UploadHandler { image_store, max_bytes }
    }

    /// Validates the uploaded image and stores it under a fresh unique name.
    /// Nothing is stored when validation fails.
    pub async fn upload_image(&self, form: ImageUploadForm) -> Result<ImageUploadResponse, AppError> {
        let file = form.image
            .ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

        let image = validate_image(
            file.file_name.as_deref(),
            file.content_type.as_ref().map(|m| m.essence_str()),
            file.file.path(),
            file.size,
            self.max_bytes,
        ).await?;

        let file_name = format!("{}.{}", Uuid::new_v4(), image.extension);
        let url = self.image_store.store(&image, &file_name).await?;

        tracing::info!(file_name = %file_name, mime = %image.mime_type, bytes = image.size, "Image uploaded");
        Ok(ImageUploadResponse::new(url, file_name))
    }
}
