use crate::api::archaeologists::handlers::*;
use crate::api::models::AppState;
use axum::{routing::get, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/archaeologists",
            get(list_archaeologists_handler).post(create_archaeologist_handler),
        )
        .route("/archaeologists/filter", get(filter_archaeologists_handler))
        .route(
            "/archaeologists/{id}",
            get(get_archaeologist_handler)
                .put(update_archaeologist_handler)
                .delete(delete_archaeologist_handler),
        )
}
