//! Document API endpoints.

use axum::{
    extract::{Multipart, Path, Query, State},
    response::Redirect,
    Json,
};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{Document, DocumentCategory, NewDocument, UpdateDocumentRequest};
use crate::policies::{self, PolicyStatus};
use crate::uploads::{self, UploadKind};
use crate::AppState;

/// Query parameters for document listings.
#[derive(Debug, Deserialize)]
pub struct DocumentListQuery {
    #[serde(default)]
    pub category: Option<String>,
}

fn parse_category(raw: Option<&str>) -> Result<Option<DocumentCategory>, AppError> {
    match raw {
        None => Ok(None),
        Some(s) => DocumentCategory::from_str(s)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("Unknown document category '{}'", s))),
    }
}

/// GET /api/documents - List published documents, optionally by category.
pub async fn list_documents(
    State(state): State<AppState>,
    Query(params): Query<DocumentListQuery>,
) -> ApiResult<Vec<Document>> {
    let category = parse_category(params.category.as_deref())?;
    let documents = state.repo.list_documents(category, false).await?;
    success(documents)
}

/// GET /api/documents/policies - Policy catalog with resolved documents.
pub async fn list_policies(State(state): State<AppState>) -> ApiResult<Vec<PolicyStatus>> {
    let documents = state.repo.list_documents(None, false).await?;
    success(policies::resolve_catalog(&documents))
}

/// GET /api/documents/:id - Get a single published document.
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Document> {
    match state.repo.get_document(&id).await? {
        Some(document) if document.is_published => success(document),
        _ => Err(AppError::NotFound(format!("Document {} not found", id))),
    }
}

/// GET /api/documents/:id/download - Redirect to the stored file.
pub async fn download_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    match state.repo.get_document(&id).await? {
        Some(document) if document.is_published => Ok(Redirect::to(&document.file_url)),
        _ => Err(AppError::NotFound(format!("Document {} not found", id))),
    }
}

/// GET /api/admin/documents - List all documents, drafts included.
pub async fn admin_list_documents(State(state): State<AppState>) -> ApiResult<Vec<Document>> {
    let documents = state.repo.list_documents(None, true).await?;
    success(documents)
}

/// POST /api/admin/documents - Upload a new document (multipart).
pub async fn upload_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Document> {
    let upload = uploads::read_multipart(multipart).await?;
    uploads::validate(UploadKind::Document, &upload)?;

    let title = upload.field("title").unwrap_or_default().trim().to_string();
    if title.is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }

    let category = match upload.field("category") {
        None | Some("") => DocumentCategory::Other,
        Some(raw) => DocumentCategory::from_str(raw)
            .ok_or_else(|| AppError::Validation(format!("Unknown document category '{}'", raw)))?,
    };

    let tags = upload.string_array_field("tags")?;
    let is_published = upload.bool_field("isPublished")?;
    let description = upload.field("description").map(|s| s.to_string());
    let policy_slug = upload
        .field("policySlug")
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    let stored = uploads::store(&state.config.upload_dir, &upload.file_name, &upload.bytes).await?;

    let document = state
        .repo
        .create_document(&NewDocument {
            title,
            description,
            category,
            policy_slug,
            file_url: stored.file_url,
            file_name: stored.file_name,
            file_size: stored.file_size,
            tags,
            is_published,
        })
        .await?;

    success(document)
}

/// PUT /api/admin/documents/:id - Update a document's metadata.
pub async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateDocumentRequest>,
) -> ApiResult<Document> {
    if let Some(title) = &request.title {
        if title.trim().is_empty() {
            return Err(AppError::Validation("Title cannot be empty".to_string()));
        }
    }

    let document = state.repo.update_document(&id, &request).await?;
    success(document)
}

/// DELETE /api/admin/documents/:id - Delete a document.
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_document(&id).await?;
    success(())
}
