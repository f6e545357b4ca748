use crate::api::models::*;
use crate::storage::Archaeologist;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;

pub async fn list_archaeologists_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Archaeologist>>, AppError> {
    let rows = state.store.list_archaeologists()?;
    info!(count = rows.len(), "Listed archaeologists");
    Ok(Json(rows))
}

pub async fn create_archaeologist_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateArchaeologistRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let Json(request) = payload?;
    // Validate
    let fields = request.validate().map_err(AppError::BadRequest)?;

    let id = state.store.insert_archaeologist(&fields)?;
    info!(id, full_name = %fields.full_name, "Archaeologist added");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id,
            status: "success".to_string(),
            message: format!("Archaeologist added with ID {}", id),
        }),
    ))
}

pub async fn get_archaeologist_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Archaeologist>, AppError> {
    let Path(id) = id?;
    state
        .store
        .get_archaeologist(id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Archaeologist {} not found", id)))
}

pub async fn update_archaeologist_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateArchaeologistRequest>, JsonRejection>,
) -> Result<Json<UpdatedResponse>, AppError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let fields = request.validate().map_err(AppError::BadRequest)?;

    let updated = state.store.update_archaeologist(id, &fields)?;
    info!(id, updated, "Archaeologist update applied");

    Ok(Json(UpdatedResponse {
        status: "success".to_string(),
        message: format!("Archaeologist {} updated", id),
        updated,
    }))
}

pub async fn delete_archaeologist_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeletedResponse>, AppError> {
    let Path(id) = id?;
    let deleted = state.store.delete_archaeologist(id)?;
    info!(id, deleted, "Archaeologist delete applied");

    Ok(Json(DeletedResponse {
        status: "success".to_string(),
        message: format!("Archaeologist {} deleted", id),
        deleted,
    }))
}

pub async fn filter_archaeologists_handler(
    State(state): State<AppState>,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Json<Vec<Archaeologist>>, AppError> {
    let Query(params) = params?;
    if !params.min_salary.is_finite() {
        return Err(AppError::BadRequest("minSalary must be a finite number".to_string()));
    }

    let rows = state
        .store
        .filter_archaeologists(params.min_salary, &params.specialization)?;
    info!(
        min_salary = params.min_salary,
        specialization = %params.specialization,
        found = rows.len(),
        "Filtered archaeologists"
    );
    Ok(Json(rows))
}
