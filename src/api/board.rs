//! Board member API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{BoardMember, CreateBoardMemberRequest, UpdateBoardMemberRequest};
use crate::AppState;

/// GET /api/board - List all board members in display order.
pub async fn list_board_members(State(state): State<AppState>) -> ApiResult<Vec<BoardMember>> {
    let members = state.repo.list_board_members().await?;
    success(members)
}

/// POST /api/admin/board - Create a new board member.
pub async fn create_board_member(
    State(state): State<AppState>,
    Json(request): Json<CreateBoardMemberRequest>,
) -> ApiResult<BoardMember> {
    // Validate required fields
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if request.role.trim().is_empty() {
        return Err(AppError::Validation("Role is required".to_string()));
    }

    let member = state.repo.create_board_member(&request).await?;
    success(member)
}

/// PUT /api/admin/board/:id - Update a board member.
pub async fn update_board_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateBoardMemberRequest>,
) -> ApiResult<BoardMember> {
    if let Some(name) = &request.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Name cannot be empty".to_string()));
        }
    }

    let member = state.repo.update_board_member(&id, &request).await?;
    success(member)
}

/// DELETE /api/admin/board/:id - Delete a board member.
pub async fn delete_board_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_board_member(&id).await?;
    success(())
}
