use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::{
    constants::UPLOADS_ROUTE,
    entities::image::ValidatedImage,
    errors::StoreError,
    repositories::image::ImageStore,
};

/// Stores images on local disk; they are served back under `/uploads`.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> std::io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;

        Ok(LocalImageStore {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn public_url(&self, file_name: &str) -> String {
        format!("{}{}/{}", self.public_base_url, UPLOADS_ROUTE, file_name)
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, image: &ValidatedImage<'_>, file_name: &str) -> Result<String, StoreError> {
        let destination = self.root.join(file_name);
        fs::copy(image.source, &destination).await?;

        tracing::debug!(path = %destination.display(), bytes = image.size, "Stored uploaded image");
        Ok(self.public_url(file_name))
    }

    async fn check_connection(&self) -> Result<(), StoreError> {
        fs::metadata(&self.root).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[actix_rt::test]
    async fn copies_file_and_builds_public_url() {
        let dir = std::env::temp_dir().join(format!("image-store-{}", Uuid::new_v4()));
        let source = std::env::temp_dir().join(format!("image-src-{}", Uuid::new_v4()));
        std::fs::write(&source, b"pixels").unwrap();
        let store = LocalImageStore::new(&dir, "https://cdn.example.com/").unwrap();
        let image = ValidatedImage {
            source: &source,
            extension: "png".into(),
            mime_type: "image/png".into(),
            size: 6,
        };

        let url = store.store(&image, "abc.png").await.unwrap();

        assert_eq!(url, "https://cdn.example.com/uploads/abc.png");
        assert_eq!(std::fs::read(dir.join("abc.png")).unwrap(), b"pixels");
        std::fs::remove_dir_all(dir).ok();
        std::fs::remove_file(source).ok();
    }

    #[test]
    fn relative_url_without_base() {
        let dir = std::env::temp_dir().join(format!("image-store-{}", Uuid::new_v4()));
        let store = LocalImageStore::new(&dir, "").unwrap();

        assert_eq!(store.public_url("x.gif"), "/uploads/x.gif");
        std::fs::remove_dir_all(dir).ok();
    }
}
