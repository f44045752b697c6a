//! Vacancy API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateVacancyRequest, UpdateVacancyRequest, Vacancy};
use crate::AppState;

/// Query parameters for the public vacancy listing.
#[derive(Debug, Deserialize)]
pub struct VacancyListQuery {
    /// Also return published vacancies whose closing date has passed.
    #[serde(default)]
    pub include_closed: bool,
}

/// GET /api/vacancies - List published, open vacancies.
pub async fn list_vacancies(
    State(state): State<AppState>,
    Query(params): Query<VacancyListQuery>,
) -> ApiResult<Vec<Vacancy>> {
    let mut vacancies = state.repo.list_vacancies(false).await?;

    if !params.include_closed {
        let now = chrono::Utc::now();
        vacancies.retain(|v| v.is_open_at(now));
    }

    success(vacancies)
}

/// GET /api/vacancies/:id - Get a single published vacancy.
pub async fn get_vacancy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vacancy> {
    match state.repo.get_vacancy(&id).await? {
        Some(vacancy) if vacancy.is_published => success(vacancy),
        _ => Err(AppError::NotFound(format!("Vacancy {} not found", id))),
    }
}

/// GET /api/admin/vacancies - List all vacancies, drafts included.
pub async fn admin_list_vacancies(State(state): State<AppState>) -> ApiResult<Vec<Vacancy>> {
    let vacancies = state.repo.list_vacancies(true).await?;
    success(vacancies)
}

/// POST /api/admin/vacancies - Create a new vacancy.
pub async fn create_vacancy(
    State(state): State<AppState>,
    Json(request): Json<CreateVacancyRequest>,
) -> ApiResult<Vacancy> {
    // Validate required fields
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if request.department.trim().is_empty() {
        return Err(AppError::Validation("Department is required".to_string()));
    }
    if request.description.trim().is_empty() {
        return Err(AppError::Validation("Description is required".to_string()));
    }

    let vacancy = state.repo.create_vacancy(&request).await?;
    success(vacancy)
}

/// PUT /api/admin/vacancies/:id - Update a vacancy.
pub async fn update_vacancy(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateVacancyRequest>,
) -> ApiResult<Vacancy> {
    if let Some(title) = &request.title {
        if title.trim().is_empty() {
            return Err(AppError::Validation("Title cannot be empty".to_string()));
        }
    }

    let vacancy = state.repo.update_vacancy(&id, &request).await?;
    success(vacancy)
}

/// DELETE /api/admin/vacancies/:id - Delete a vacancy.
pub async fn delete_vacancy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_vacancy(&id).await?;
    success(())
}
