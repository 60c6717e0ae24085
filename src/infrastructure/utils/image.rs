use std::{io, path::Path};

use derive_more::Display;
use tokio::{fs::File, io::AsyncReadExt};

use crate::{
    constants::ALLOWED_IMAGE_EXTENSIONS,
    entities::image::ValidatedImage,
    errors::AppError,
};

/// Bytes inspected for magic-number detection.
const SNIFF_LEN: u64 = 8192;

const ALLOWED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Checks an uploaded file before anything is stored:
///
/// 1. the original file name has an allowed image extension;
/// 2. the declared content type, when sent, is `image/*`;
/// 3. the size is within `max_size`;
/// 4. the content itself sniffs as one of the allowed image formats.
///
/// The returned extension is the sniffed one, so a PNG uploaded as
/// `photo.jpg` is stored as `.png`.
pub async fn validate_image<'a>(
    original_filename: Option<&str>,
    declared_type: Option<&str>,
    file_path: &'a Path,
    size: usize,
    max_size: usize,
) -> Result<ValidatedImage<'a>, ImageError> {
    let ext = original_filename
        .and_then(|name| Path::new(name).extension())
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase());
    if ext.as_deref().is_none_or(|e| !ALLOWED_IMAGE_EXTENSIONS.contains(&e)) {
        return Err(ImageError::InvalidExtension);
    }

    if let Some(declared) = declared_type {
        if !declared.starts_with("image/") {
            return Err(ImageError::InvalidType(declared.to_string()));
        }
    }

    if size > max_size {
        return Err(ImageError::FileTooLarge(max_size));
    }
    if size == 0 {
        return Err(ImageError::EmptyFile);
    }

    let head = read_head(file_path).await.map_err(ImageError::IoError)?;
    let kind = infer::get(&head).ok_or(ImageError::UnrecognizedContent)?;
    if !ALLOWED_MIME_TYPES.contains(&kind.mime_type()) {
        return Err(ImageError::InvalidType(kind.mime_type().to_string()));
    }

    Ok(ValidatedImage {
        source: file_path,
        extension: kind.extension().to_string(),
        mime_type: kind.mime_type().to_string(),
        size,
    })
}

async fn read_head(path: &Path) -> io::Result<Vec<u8>> {
    let file = File::open(path).await?;
    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    file.take(SNIFF_LEN).read_to_end(&mut head).await?;
    Ok(head)
}

#[derive(Debug, Display)]
pub enum ImageError {
    #[display("Invalid file extension. Only jpg, jpeg, png, gif and webp images are allowed.")]
    InvalidExtension,

    #[display("Invalid content type: {_0}. Only images are allowed.")]
    InvalidType(String),

    #[display("File content is not a recognized image.")]
    UnrecognizedContent,

    #[display("File is empty.")]
    EmptyFile,

    #[display("File size exceeds the maximum of {_0} bytes.")]
    FileTooLarge(usize),

    #[display("Failed to read file: {_0}")]
    IoError(io::Error),
}

impl From<ImageError> for AppError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::FileTooLarge(_) => AppError::PayloadTooLarge(err.to_string()),
            ImageError::IoError(_) => AppError::InternalError(err.to_string()),
            _ => AppError::BadRequest(err.to_string()),
        }
    }
}

#[cfg(test)]
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&0u32.to_be_bytes());
    bytes.extend_from_slice(b"IEND");
    bytes.extend_from_slice(&[0xAE, 0x42, 0x60, 0x82]);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use uuid::Uuid;

    const MAX: usize = 1024 * 1024;

    fn write_temp(bytes: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("upload-test-{}", Uuid::new_v4()));
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[actix_rt::test]
    async fn accepts_png_and_reports_sniffed_type() {
        let bytes = png_bytes(400, 250);
        let path = write_temp(&bytes);

        let image = validate_image(Some("Shot.PNG"), Some("image/png"), &path, bytes.len(), MAX)
            .await
            .unwrap();

        assert_eq!(image.extension, "png");
        assert_eq!(image.mime_type, "image/png");
        std::fs::remove_file(path).ok();
    }

    #[actix_rt::test]
    async fn rejects_txt_extension() {
        let path = write_temp(b"hello");

        let err = validate_image(Some("notes.txt"), Some("text/plain"), &path, 5, MAX).await.unwrap_err();

        assert!(matches!(err, ImageError::InvalidExtension));
        std::fs::remove_file(path).ok();
    }

    #[actix_rt::test]
    async fn rejects_missing_file_name() {
        let path = write_temp(&png_bytes(1, 1));

        let err = validate_image(None, None, &path, 10, MAX).await.unwrap_err();

        assert!(matches!(err, ImageError::InvalidExtension));
        std::fs::remove_file(path).ok();
    }

    #[actix_rt::test]
    async fn rejects_non_image_declared_type() {
        let bytes = png_bytes(4, 4);
        let path = write_temp(&bytes);

        let err = validate_image(Some("a.png"), Some("application/pdf"), &path, bytes.len(), MAX)
            .await
            .unwrap_err();

        assert!(matches!(err, ImageError::InvalidType(_)));
        std::fs::remove_file(path).ok();
    }

    #[actix_rt::test]
    async fn rejects_renamed_text_file() {
        let path = write_temp(b"definitely not an image, just words");

        let err = validate_image(Some("fake.png"), Some("image/png"), &path, 35, MAX).await.unwrap_err();

        assert!(matches!(err, ImageError::UnrecognizedContent));
        std::fs::remove_file(path).ok();
    }

    #[actix_rt::test]
    async fn rejects_oversized_file_as_payload_too_large() {
        let bytes = png_bytes(4, 4);
        let path = write_temp(&bytes);

        let err = validate_image(Some("a.png"), None, &path, bytes.len(), 8).await.unwrap_err();

        assert!(matches!(err, ImageError::FileTooLarge(8)));
        assert!(matches!(AppError::from(err), AppError::PayloadTooLarge(_)));
        std::fs::remove_file(path).ok();
    }
}
