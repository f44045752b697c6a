//! Staff API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{
    BulkRoleUpdateRequest, CreateStaffMemberRequest, RoleUpdateResult, StaffMember,
    UpdateStaffMemberRequest,
};
use crate::AppState;

/// GET /api/staff - List all staff members.
pub async fn list_staff(State(state): State<AppState>) -> ApiResult<Vec<StaffMember>> {
    let staff = state.repo.list_staff().await?;
    success(staff)
}

/// POST /api/admin/staff - Create a new staff member.
pub async fn create_staff_member(
    State(state): State<AppState>,
    Json(request): Json<CreateStaffMemberRequest>,
) -> ApiResult<StaffMember> {
    // Validate required fields
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if request.role.trim().is_empty() {
        return Err(AppError::Validation("Role is required".to_string()));
    }

    let member = state.repo.create_staff_member(&request).await?;
    success(member)
}

/// PUT /api/admin/staff/:id - Update a staff member.
pub async fn update_staff_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStaffMemberRequest>,
) -> ApiResult<StaffMember> {
    if let Some(name) = &request.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Name cannot be empty".to_string()));
        }
    }

    let member = state.repo.update_staff_member(&id, &request).await?;
    success(member)
}

/// DELETE /api/admin/staff/:id - Delete a staff member.
pub async fn delete_staff_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_staff_member(&id).await?;
    success(())
}

/// PUT /api/admin/staff/roles - Bulk role reassignment by name substring.
pub async fn bulk_update_staff_roles(
    State(state): State<AppState>,
    Json(request): Json<BulkRoleUpdateRequest>,
) -> ApiResult<Vec<RoleUpdateResult>> {
    if request.updates.is_empty() {
        return Err(AppError::Validation("No updates provided".to_string()));
    }
    for rule in &request.updates {
        if rule.name_contains.trim().is_empty() {
            return Err(AppError::Validation(
                "nameContains cannot be empty".to_string(),
            ));
        }
        if rule.role.trim().is_empty() {
            return Err(AppError::Validation("Role cannot be empty".to_string()));
        }
    }

    let results = state.repo.bulk_update_staff_roles(&request.updates).await?;
    success(results)
}
