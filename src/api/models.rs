use crate::storage::{ArchaeologistFields, ArtifactFields, FindingFields, Store, StoreError};
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

/// Request to add an archaeologist
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArchaeologistRequest {
    pub full_name: Option<String>,
    pub salary: Option<f64>,
    pub specialization: Option<String>,
    pub qualification: Option<String>,
}

/// Full replacement of an archaeologist; every field is required
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArchaeologistRequest {
    pub full_name: Option<String>,
    pub salary: Option<f64>,
    pub specialization: Option<String>,
    pub qualification: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    #[serde(default)]
    pub min_salary: f64,
    #[serde(default)]
    pub specialization: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArtifactRequest {
    pub name: Option<String>,
    pub cost: Option<f64>,
    pub era: Option<String>,
    pub prior_owner: Option<String>,
}

/// Raw sort parameters; checked against the allow-list in the handler
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFindingRequest {
    pub archaeologist_id: Option<i64>,
    pub artifact_id: Option<i64>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub condition: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Response after inserting a row
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct UpdatedResponse {
    pub status: String,
    pub message: String,
    pub updated: usize,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub status: String,
    pub message: String,
    pub deleted: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConditionResponse {
    pub updated_count: usize,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

fn require_text(value: Option<String>, field: &str) -> Result<String, String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(format!("{} cannot be empty", field)),
        None => Err(format!("{} is required", field)),
    }
}

fn require_number(value: Option<f64>, field: &str) -> Result<f64, String> {
    match value {
        Some(n) if n.is_finite() => Ok(n),
        Some(_) => Err(format!("{} must be a finite number", field)),
        None => Err(format!("{} is required", field)),
    }
}

impl CreateArchaeologistRequest {
    /// Validate the request
    pub fn validate(self) -> Result<ArchaeologistFields, String> {
        Ok(ArchaeologistFields {
            full_name: require_text(self.full_name, "fullName")?,
            salary: require_number(self.salary, "salary")?,
            specialization: self.specialization,
            qualification: self.qualification,
        })
    }
}

impl UpdateArchaeologistRequest {
    /// Validate the request
    pub fn validate(self) -> Result<ArchaeologistFields, String> {
        let full_name = require_text(self.full_name, "fullName")?;
        let salary = require_number(self.salary, "salary")?;
        let specialization = self.specialization.ok_or("specialization is required")?;
        let qualification = self.qualification.ok_or("qualification is required")?;
        Ok(ArchaeologistFields {
            full_name,
            salary,
            specialization: Some(specialization),
            qualification: Some(qualification),
        })
    }
}

impl CreateArtifactRequest {
    /// Validate the request
    pub fn validate(self) -> Result<ArtifactFields, String> {
        Ok(ArtifactFields {
            name: require_text(self.name, "name")?,
            cost: require_number(self.cost, "cost")?,
            era: self.era,
            prior_owner: self.prior_owner,
        })
    }
}

impl CreateFindingRequest {
    /// Validate the request
    pub fn validate(self) -> Result<FindingFields, String> {
        Ok(FindingFields {
            archaeologist_id: self.archaeologist_id.ok_or("archaeologistId is required")?,
            artifact_id: self.artifact_id.ok_or("artifactId is required")?,
            location: self.location,
            date: self.date,
            condition: self.condition,
            kind: self.kind,
        })
    }
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse {
            error: status.to_string(),
            message,
        }))
        .into_response()
    }
}
