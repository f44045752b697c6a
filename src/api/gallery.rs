//! Gallery API endpoints.

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{
    GalleryCategory, GalleryImage, GalleryStats, NewGalleryImage, PublishRequest,
    UpdateImageRequest,
};
use crate::uploads::{self, UploadKind};
use crate::AppState;

/// Query parameters for gallery listings.
#[derive(Debug, Deserialize)]
pub struct GalleryListQuery {
    #[serde(default)]
    pub category: Option<String>,
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Search query string.
    pub q: String,
    /// Maximum number of results (default: 20).
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Offset for pagination (default: 0).
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    20
}

/// Search result with images and metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<SearchResultItem>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

/// Single search result item.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    pub image: GalleryImage,
    pub score: f32,
}

/// Maximum number of search results allowed.
const MAX_SEARCH_LIMIT: usize = 100;

fn parse_category(raw: Option<&str>) -> Result<Option<GalleryCategory>, AppError> {
    match raw {
        None => Ok(None),
        Some(s) => GalleryCategory::from_str(s)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("Unknown gallery category '{}'", s))),
    }
}

/// GET /api/gallery - List published images, optionally by category.
pub async fn list_images(
    State(state): State<AppState>,
    Query(params): Query<GalleryListQuery>,
) -> ApiResult<Vec<GalleryImage>> {
    let category = parse_category(params.category.as_deref())?;
    let images = state.repo.list_images(category, false).await?;
    success(images)
}

/// GET /api/gallery/category/:category - List published images in one category.
pub async fn images_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<Vec<GalleryImage>> {
    let category = GalleryCategory::from_str(&category)
        .ok_or_else(|| AppError::Validation(format!("Unknown gallery category '{}'", category)))?;

    let images = state.repo.list_images(Some(category), false).await?;
    success(images)
}

/// GET /api/gallery/search - Search published images.
pub async fn search_images(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<SearchResponse> {
    // Limit the maximum number of results
    let limit = params.limit.min(MAX_SEARCH_LIMIT);

    let search_results = state.search.search(&params.q, limit, params.offset)?;

    // Fetch full image data for each result
    let mut results = Vec::new();
    for sr in search_results {
        if let Ok(Some(image)) = state.repo.get_image(&sr.image_id).await {
            if image.is_published {
                results.push(SearchResultItem {
                    image,
                    score: sr.score,
                });
            }
        }
    }

    let total = results.len();

    success(SearchResponse {
        results,
        total,
        limit,
        offset: params.offset,
    })
}

/// GET /api/gallery/stats - Aggregate image counts.
pub async fn gallery_stats(State(state): State<AppState>) -> ApiResult<GalleryStats> {
    let stats = state.repo.gallery_stats().await?;
    success(stats)
}

/// GET /api/gallery/:id - Get a single published image.
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<GalleryImage> {
    match state.repo.get_image(&id).await? {
        Some(image) if image.is_published => success(image),
        _ => Err(AppError::NotFound(format!("Image {} not found", id))),
    }
}

/// GET /api/admin/gallery - List all images, drafts included.
pub async fn admin_list_images(State(state): State<AppState>) -> ApiResult<Vec<GalleryImage>> {
    let images = state.repo.list_images(None, true).await?;
    success(images)
}

/// POST /api/admin/gallery - Upload a new image (multipart).
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<GalleryImage> {
    let upload = uploads::read_multipart(multipart).await?;
    uploads::validate(UploadKind::Image, &upload)?;

    let title = upload.field("title").unwrap_or_default().trim().to_string();
    if title.is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }

    let category = match upload.field("category") {
        None | Some("") => GalleryCategory::Gallery,
        Some(raw) => GalleryCategory::from_str(raw)
            .ok_or_else(|| AppError::Validation(format!("Unknown gallery category '{}'", raw)))?,
    };

    let tags = upload.string_array_field("tags")?;
    let is_published = upload.bool_field("isPublished")?;
    let width = upload.int_field("width")?;
    let height = upload.int_field("height")?;
    let description = upload.field("description").map(|s| s.to_string());
    let author = upload.field("author").map(|s| s.to_string());
    let thumbnail_url = upload
        .field("thumbnailUrl")
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    let stored = uploads::store(&state.config.upload_dir, &upload.file_name, &upload.bytes).await?;

    let image = state
        .repo
        .create_image(&NewGalleryImage {
            title,
            description,
            category,
            file_url: stored.file_url,
            thumbnail_url,
            width,
            height,
            file_size: stored.file_size,
            tags,
            author,
            is_published,
        })
        .await?;

    // Index the new image
    if let Err(e) = state.search.index_image(&image).await {
        tracing::warn!("Failed to index image: {}", e);
    }

    success(image)
}

/// PUT /api/admin/gallery/:id - Update an image's metadata.
pub async fn update_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateImageRequest>,
) -> ApiResult<GalleryImage> {
    if let Some(title) = &request.title {
        if title.trim().is_empty() {
            return Err(AppError::Validation("Title cannot be empty".to_string()));
        }
    }

    let image = state.repo.update_image(&id, &request).await?;

    // Re-index the updated image
    if let Err(e) = state.search.index_image(&image).await {
        tracing::warn!("Failed to re-index image: {}", e);
    }

    success(image)
}

/// PATCH /api/admin/gallery/:id/publish - Toggle publication.
pub async fn set_image_published(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<PublishRequest>,
) -> ApiResult<GalleryImage> {
    let image = state
        .repo
        .set_image_published(&id, request.is_published)
        .await?;

    // Publication change moves the image in or out of the index
    if let Err(e) = state.search.index_image(&image).await {
        tracing::warn!("Failed to re-index image: {}", e);
    }

    success(image)
}

/// DELETE /api/admin/gallery/:id - Delete an image.
pub async fn delete_image(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.repo.delete_image(&id).await?;

    // Remove from search index
    if let Err(e) = state.search.remove_image(&id).await {
        tracing::warn!("Failed to remove image from index: {}", e);
    }

    success(())
}
