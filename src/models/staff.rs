//! Staff member model matching the frontend StaffMember interface.

use serde::{Deserialize, Serialize};

/// A teaching or administrative staff member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating a new staff member.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaffMemberRequest {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub grade: Option<String>,
}

/// Request body for updating an existing staff member.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStaffMemberRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub grade: Option<String>,
}

/// Request body for bulk role reassignment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRoleUpdateRequest {
    pub updates: Vec<RoleReassignment>,
}

/// One bulk rule: every staff member whose name contains the substring gets the role.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleReassignment {
    pub name_contains: String,
    pub role: String,
    #[serde(default)]
    pub grade: Option<String>,
}

/// Per-rule outcome of a bulk role update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleUpdateResult {
    pub name_contains: String,
    pub matched: u64,
}
