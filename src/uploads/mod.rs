//! Multipart file intake: validation and disk persistence.
//!
//! Uploaded files live under the configured upload directory and are served
//! statically at `/uploads/...`.

use std::collections::HashMap;
use std::path::Path;

use axum::body::Bytes;
use axum::extract::Multipart;

use crate::errors::AppError;

/// Maximum accepted upload size.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// What kind of file an endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Document,
    Image,
}

const IMAGE_MIMES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

const DOCUMENT_MIMES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

impl UploadKind {
    fn allowed_mimes(&self) -> &'static [&'static str] {
        match self {
            UploadKind::Document => DOCUMENT_MIMES,
            UploadKind::Image => IMAGE_MIMES,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            UploadKind::Document => "document",
            UploadKind::Image => "image",
        }
    }
}

/// A parsed multipart request: one file plus its accompanying form fields.
#[derive(Debug)]
pub struct MultipartUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
    pub fields: HashMap<String, String>,
}

impl MultipartUpload {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|s| s.as_str())
    }

    /// Read a form field holding a JSON string array (how the frontend sends tags).
    pub fn string_array_field(&self, name: &str) -> Result<Option<Vec<String>>, AppError> {
        match self.field(name) {
            None | Some("") => Ok(None),
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|_| AppError::Validation(format!("Field '{}' must be a JSON string array", name))),
        }
    }

    pub fn bool_field(&self, name: &str) -> Result<bool, AppError> {
        match self.field(name) {
            None | Some("") => Ok(false),
            Some("true") | Some("1") => Ok(true),
            Some("false") | Some("0") => Ok(false),
            Some(other) => Err(AppError::Validation(format!(
                "Field '{}' must be a boolean, got '{}'",
                name, other
            ))),
        }
    }

    pub fn int_field(&self, name: &str) -> Result<Option<i64>, AppError> {
        match self.field(name) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| AppError::Validation(format!("Field '{}' must be an integer", name))),
        }
    }
}

/// Drain a multipart request into a file part and plain text fields.
pub async fn read_multipart(mut multipart: Multipart) -> Result<MultipartUpload, AppError> {
    let mut file: Option<(String, Option<String>, Bytes)> = None;
    let mut fields = HashMap::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "file" {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().map(|s| s.to_string());
            let bytes = field.bytes().await?;
            file = Some((file_name, content_type, bytes));
        } else {
            fields.insert(name, field.text().await?);
        }
    }

    let (file_name, content_type, bytes) =
        file.ok_or_else(|| AppError::Validation("A 'file' part is required".to_string()))?;

    Ok(MultipartUpload {
        file_name,
        content_type,
        bytes,
        fields,
    })
}

/// Check an upload's declared content type and size against the allowlist.
pub fn validate(kind: UploadKind, upload: &MultipartUpload) -> Result<(), AppError> {
    let content_type = upload.content_type.as_deref().unwrap_or("");

    if !kind.allowed_mimes().contains(&content_type) {
        return Err(AppError::Validation(format!(
            "'{}' is not an accepted {} type",
            content_type,
            kind.label()
        )));
    }

    if upload.bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    if upload.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(format!(
            "File exceeds the {} MB upload limit",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }

    Ok(())
}

/// A file persisted to the upload directory.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Original (sanitized) file name shown to users
    pub file_name: String,
    /// Public URL the frontend links to
    pub file_url: String,
    pub file_size: i64,
}

/// Write upload bytes to the upload directory under a collision-free name.
pub async fn store(
    upload_dir: &Path,
    original_name: &str,
    bytes: &Bytes,
) -> Result<StoredFile, AppError> {
    tokio::fs::create_dir_all(upload_dir).await?;

    let safe_name = sanitize_file_name(original_name);
    let stored_name = format!("{}-{}", uuid::Uuid::new_v4(), safe_name);
    let path = upload_dir.join(&stored_name);

    tokio::fs::write(&path, bytes).await?;

    Ok(StoredFile {
        file_name: safe_name,
        file_url: format!("/uploads/{}", stored_name),
        file_size: bytes.len() as i64,
    })
}

/// Keep only characters that are safe in file names and URLs.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    // A name of only separators would vanish into the UUID prefix
    if cleaned.trim_matches(|c| c == '.' || c == '_' || c == '-').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
