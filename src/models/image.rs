//! Gallery image model matching the frontend GalleryImage interface.

use serde::{Deserialize, Serialize};

/// Category a gallery image belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GalleryCategory {
    Gallery,
    Staff,
    News,
    Events,
    Other,
}

impl GalleryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            GalleryCategory::Gallery => "gallery",
            GalleryCategory::Staff => "staff",
            GalleryCategory::News => "news",
            GalleryCategory::Events => "events",
            GalleryCategory::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "gallery" => Some(GalleryCategory::Gallery),
            "staff" => Some(GalleryCategory::Staff),
            "news" => Some(GalleryCategory::News),
            "events" => Some(GalleryCategory::Events),
            "other" => Some(GalleryCategory::Other),
            _ => None,
        }
    }
}

/// An image in the school gallery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: GalleryCategory,
    pub file_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Pixel dimensions, measured client-side during upload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    pub file_size: i64,
    /// Human-readable rendering of `file_size`, derived, not stored
    #[serde(default)]
    pub file_size_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub is_published: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Metadata for a freshly uploaded image, before it has an ID.
#[derive(Debug, Clone)]
pub struct NewGalleryImage {
    pub title: String,
    pub description: Option<String>,
    pub category: GalleryCategory,
    pub file_url: String,
    pub thumbnail_url: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub file_size: i64,
    pub tags: Option<Vec<String>>,
    pub author: Option<String>,
    pub is_published: bool,
}

/// Request body for updating an existing gallery image.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateImageRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<GalleryCategory>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub height: Option<i64>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub is_published: Option<bool>,
}

/// Request body for toggling publication of a gallery image.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub is_published: bool,
}

/// Aggregate gallery counts for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryStats {
    pub total: i64,
    pub published: i64,
    pub by_category: Vec<CategoryCount>,
}

/// Image counts for a single category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: GalleryCategory,
    pub total: i64,
    pub published: i64,
}
