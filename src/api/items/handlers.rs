use crate::api::models::*;
use crate::storage::{Artifact, SortField, SortOrder};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;

pub async fn list_items_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Artifact>>, AppError> {
    let rows = state.store.list_artifacts()?;
    info!(count = rows.len(), "Listed items");
    Ok(Json(rows))
}

pub async fn create_item_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateArtifactRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let Json(request) = payload?;
    let fields = request.validate().map_err(AppError::BadRequest)?;

    let id = state.store.insert_artifact(&fields)?;
    info!(id, name = %fields.name, "Item added");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id,
            status: "success".to_string(),
            message: format!("Item added with ID {}", id),
        }),
    ))
}

pub async fn get_item_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Artifact>, AppError> {
    let Path(id) = id?;
    state
        .store
        .get_artifact(id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Item {} not found", id)))
}

pub async fn sorted_items_handler(
    State(state): State<AppState>,
    params: Result<Query<SortParams>, QueryRejection>,
) -> Result<Json<Vec<Artifact>>, AppError> {
    let Query(params) = params?;
    let field = match params.sort_by.as_deref() {
        Some(raw) => raw.parse::<SortField>().map_err(AppError::BadRequest)?,
        None => SortField::default(),
    };
    let order = match params.order.as_deref() {
        Some(raw) => raw.parse::<SortOrder>().map_err(AppError::BadRequest)?,
        None => SortOrder::default(),
    };

    let rows = state.store.list_artifacts_sorted(field, order)?;
    info!(
        sort_by = field.column(),
        order = order.keyword(),
        count = rows.len(),
        "Sorted items"
    );
    Ok(Json(rows))
}
