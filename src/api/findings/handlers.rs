use crate::api::models::*;
use crate::storage::{Finding, FindingCount, FindingDetail};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use chrono::{Months, NaiveDate, Utc};
use tracing::info;

/// How far back a finding must date before it gets archived
const ARCHIVE_AFTER_YEARS: u32 = 5;

/// ISO date strictly before which findings are archived, relative to `today`
pub fn archive_cutoff(today: NaiveDate) -> String {
    today
        .checked_sub_months(Months::new(ARCHIVE_AFTER_YEARS * 12))
        .unwrap_or(NaiveDate::MIN)
        .format("%Y-%m-%d")
        .to_string()
}

pub async fn list_findings_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Finding>>, AppError> {
    let rows = state.store.list_findings()?;
    info!(count = rows.len(), "Listed findings");
    Ok(Json(rows))
}

pub async fn create_finding_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateFindingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let Json(request) = payload?;
    let fields = request.validate().map_err(AppError::BadRequest)?;

    let id = state.store.insert_finding(&fields)?;
    info!(
        id,
        archaeologist_id = fields.archaeologist_id,
        artifact_id = fields.artifact_id,
        "Finding added"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id,
            status: "success".to_string(),
            message: format!("Finding added with ID {}", id),
        }),
    ))
}

pub async fn get_finding_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Finding>, AppError> {
    let Path(id) = id?;
    state
        .store
        .get_finding(id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Finding {} not found", id)))
}

pub async fn finding_details_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<FindingDetail>>, AppError> {
    let rows = state.store.finding_details()?;
    info!(count = rows.len(), "Joined finding details");
    Ok(Json(rows))
}

pub async fn update_condition_handler(
    State(state): State<AppState>,
) -> Result<Json<UpdateConditionResponse>, AppError> {
    let cutoff = archive_cutoff(Utc::now().date_naive());
    let updated_count = state.store.archive_findings_before(&cutoff)?;
    info!(%cutoff, updated_count, "Archived old findings");
    Ok(Json(UpdateConditionResponse { updated_count }))
}

pub async fn group_by_archaeologist_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<FindingCount>>, AppError> {
    let rows = state.store.finding_counts_by_archaeologist()?;
    info!(groups = rows.len(), "Grouped findings by archaeologist");
    Ok(Json(rows))
}
