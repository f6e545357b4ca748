use crate::api::items::handlers::*;
use crate::api::models::AppState;
use axum::{routing::get, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items_handler).post(create_item_handler))
        .route("/items/sorted", get(sorted_items_handler))
        .route("/items/{id}", get(get_item_handler))
}
