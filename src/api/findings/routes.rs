use crate::api::findings::handlers::*;
use crate::api::models::AppState;
use axum::{
    routing::{get, put},
    Router,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/findings", get(list_findings_handler).post(create_finding_handler))
        .route("/findings/details", get(finding_details_handler))
        .route("/findings/update-condition", put(update_condition_handler))
        .route(
            "/findings/group-by-archaeologist",
            get(group_by_archaeologist_handler),
        )
        .route("/findings/{id}", get(get_finding_handler))
}
