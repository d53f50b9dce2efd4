//! Upload parsing and blob responses.
//!
//! Multipart bodies are buffered in memory. Every file part must be an image
//! (jpeg, jpg, png, svg) by both declared MIME type and extension, and no file
//! may exceed the configured cap.

use std::collections::HashMap;

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;
use crate::models::StoredImage;
use crate::AppState;

/// Accepted file extensions.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["jpeg", "jpg", "png", "svg"];

/// Accepted declared content types.
pub const ALLOWED_CONTENT_TYPES: [&str; 4] =
    ["image/jpeg", "image/jpg", "image/png", "image/svg+xml"];

/// Placeholder served for admins without a photo.
pub const DEFAULT_AVATAR: &[u8] = include_bytes!("../../assets/default-avatar.svg");
pub const DEFAULT_AVATAR_CONTENT_TYPE: &str = "image/svg+xml";

/// Check that an upload is an accepted image by type and extension.
pub fn check_image(file_name: &str, content_type: &str) -> Result<(), AppError> {
    let content_type = content_type.to_ascii_lowercase();
    let type_ok = ALLOWED_CONTENT_TYPES.contains(&content_type.as_str());

    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let ext_ok = extension
        .as_deref()
        .is_some_and(|e| ALLOWED_EXTENSIONS.contains(&e));

    if type_ok && ext_ok {
        Ok(())
    } else {
        Err(AppError::UnsupportedMedia(
            "Only images are allowed (jpeg, jpg, png, svg)".to_string(),
        ))
    }
}

/// A fully buffered multipart form: text fields plus image files.
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    files: HashMap<String, StoredImage>,
}

impl FromRequest<AppState> for UploadForm {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state).await?;
        UploadForm::parse(multipart, state.config.max_upload_bytes).await
    }
}

impl UploadForm {
    /// Drain a multipart body, validating each file part as it arrives.
    pub async fn parse(mut multipart: Multipart, max_file_bytes: usize) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(mut field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            let Some(file_name) = field.file_name().map(str::to_string) else {
                let value = field.text().await?;
                form.fields.insert(name, value);
                continue;
            };

            // Browsers send an empty part for a file input left blank.
            if file_name.is_empty() {
                continue;
            }

            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            check_image(&file_name, &content_type)?;

            let mut data = Vec::new();
            while let Some(chunk) = field.chunk().await? {
                if data.len() + chunk.len() > max_file_bytes {
                    return Err(AppError::PayloadTooLarge(format!(
                        "File '{}' exceeds the {} byte limit",
                        name, max_file_bytes
                    )));
                }
                data.extend_from_slice(&chunk);
            }

            tracing::debug!(
                "Received upload {} ({} bytes, {})",
                name,
                data.len(),
                content_type
            );
            form.files.insert(
                name,
                StoredImage {
                    data,
                    content_type,
                    original_name: Some(file_name),
                },
            );
        }

        Ok(form)
    }

    /// Raw value of a text field, if it was sent.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Trimmed value of a text field, `None` when absent or blank.
    pub fn non_empty(&self, name: &str) -> Option<String> {
        self.text(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Names from `required` whose fields are absent or blank.
    pub fn missing(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| self.non_empty(name).is_none())
            .map(|name| name.to_string())
            .collect()
    }

    /// Remove and return an uploaded file.
    pub fn take_file(&mut self, name: &str) -> Option<StoredImage> {
        self.files.remove(name)
    }

    pub fn has_file(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        fields: &[(&str, &str)],
        files: Vec<(&str, StoredImage)>,
    ) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            files: files
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }
}

/// Raw image bytes served with their stored content type.
#[derive(Debug)]
pub struct BlobResponse {
    pub content_type: String,
    pub data: Vec<u8>,
}

impl From<StoredImage> for BlobResponse {
    fn from(image: StoredImage) -> Self {
        Self {
            content_type: image.content_type,
            data: image.data,
        }
    }
}

impl BlobResponse {
    pub fn default_avatar() -> Self {
        Self {
            content_type: DEFAULT_AVATAR_CONTENT_TYPE.to_string(),
            data: DEFAULT_AVATAR.to_vec(),
        }
    }
}

impl IntoResponse for BlobResponse {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, self.content_type)], self.data).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> StoredImage {
        StoredImage {
            data: vec![1, 2, 3],
            content_type: "image/png".to_string(),
            original_name: Some(name.to_string()),
        }
    }

    #[test]
    fn test_accepts_supported_images() {
        assert!(check_image("logo.png", "image/png").is_ok());
        assert!(check_image("PHOTO.JPG", "image/jpeg").is_ok());
        assert!(check_image("photo.jpeg", "image/jpeg").is_ok());
        assert!(check_image("icon.svg", "image/svg+xml").is_ok());
    }

    #[test]
    fn test_rejects_wrong_type_or_extension() {
        assert!(matches!(
            check_image("anim.gif", "image/gif"),
            Err(AppError::UnsupportedMedia(_))
        ));
        // Extension alone is not enough
        assert!(check_image("fake.png", "text/plain").is_err());
        // Nor is the declared type alone
        assert!(check_image("script.sh", "image/png").is_err());
        assert!(check_image("noextension", "image/png").is_err());
    }

    #[test]
    fn test_missing_reports_blank_fields() {
        let form = UploadForm::from_parts(&[("nome", "Ana"), ("titulo", "  ")], vec![]);
        assert_eq!(form.missing(&["nome", "titulo", "descricao"]), vec!["titulo", "descricao"]);
        assert_eq!(form.non_empty("nome").as_deref(), Some("Ana"));
        assert_eq!(form.text("titulo"), Some("  "));
    }

    #[test]
    fn test_take_file_removes_it() {
        let mut form = UploadForm::from_parts(&[], vec![("foto", image("a.png"))]);
        assert!(form.has_file("foto"));
        assert_eq!(form.take_file("foto").unwrap().data, vec![1, 2, 3]);
        assert!(!form.has_file("foto"));
    }

    #[test]
    fn test_default_avatar_is_svg() {
        let blob = BlobResponse::default_avatar();
        assert_eq!(blob.content_type, "image/svg+xml");
        assert!(String::from_utf8_lossy(&blob.data).contains("<svg"));
    }
}
