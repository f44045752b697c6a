//! Document model matching the frontend Document interface.

use serde::{Deserialize, Serialize};

/// Category a document is filed under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentCategory {
    Policy,
    Form,
    Fees,
    Newsletter,
    Other,
}

impl DocumentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentCategory::Policy => "policy",
            DocumentCategory::Form => "form",
            DocumentCategory::Fees => "fees",
            DocumentCategory::Newsletter => "newsletter",
            DocumentCategory::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "policy" => Some(DocumentCategory::Policy),
            "form" => Some(DocumentCategory::Form),
            "fees" => Some(DocumentCategory::Fees),
            "newsletter" => Some(DocumentCategory::Newsletter),
            "other" => Some(DocumentCategory::Other),
            _ => None,
        }
    }
}

/// A downloadable document (policy, form, newsletter, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: DocumentCategory,
    /// Stable link to a policy catalog slot, when this document is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_slug: Option<String>,
    pub file_url: String,
    pub file_name: String,
    pub file_size: i64,
    /// Human-readable rendering of `file_size`, derived, not stored
    #[serde(default)]
    pub file_size_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub is_published: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Metadata for a freshly uploaded document, before it has an ID.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub title: String,
    pub description: Option<String>,
    pub category: DocumentCategory,
    pub policy_slug: Option<String>,
    pub file_url: String,
    pub file_name: String,
    pub file_size: i64,
    pub tags: Option<Vec<String>>,
    pub is_published: bool,
}

/// Request body for updating an existing document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<DocumentCategory>,
    #[serde(default)]
    pub policy_slug: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub is_published: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for category in [
            DocumentCategory::Policy,
            DocumentCategory::Form,
            DocumentCategory::Fees,
            DocumentCategory::Newsletter,
            DocumentCategory::Other,
        ] {
            assert_eq!(DocumentCategory::from_str(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_category_unknown() {
        assert_eq!(DocumentCategory::from_str("banana"), None);
        assert_eq!(DocumentCategory::from_str("Policy"), None);
    }
}
