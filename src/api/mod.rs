pub mod archaeologists;
pub mod findings;
pub mod items;
pub mod models;

// Re-exports
pub use models::*;

use axum::{extract::State, routing::get, Json, Router};
use tower_http::trace::TraceLayer;

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: state.store.path().display().to_string(),
    })
}

/// Build the full router with every catalog route
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(archaeologists::routes())
        .merge(items::routes())
        .merge(findings::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{initialize, InitMode, Store};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_app() -> (TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.db");
        initialize(&path, "tests", InitMode::Reset).unwrap();
        let app = router(AppState {
            store: Store::new(path),
        });
        (dir, app)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn add_archaeologist(app: &Router, name: &str, salary: f64, specialization: &str) -> i64 {
        let (status, body) = send(
            app,
            "POST",
            "/archaeologists",
            Some(json!({"fullName": name, "salary": salary, "specialization": specialization})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_i64().unwrap()
    }

    async fn add_item(app: &Router, name: &str, cost: f64) -> i64 {
        let payload = json!({"name": name, "cost": cost});
        let (status, body) = send(app, "POST", "/items", Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_i64().unwrap()
    }

    async fn add_finding(app: &Router, who: i64, what: i64, date: &str, condition: &str) -> i64 {
        let (status, body) = send(
            app,
            "POST",
            "/findings",
            Some(json!({
                "archaeologistId": who,
                "artifactId": what,
                "location": "Luxor",
                "date": date,
                "condition": condition,
                "type": "whole"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (_dir, app) = test_app();
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_create_archaeologist_rejects_incomplete_payloads() {
        let (_dir, app) = test_app();

        let (status, body) =
            send(&app, "POST", "/archaeologists", Some(json!({"salary": 1000}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "fullName is required");

        let (status, _) =
            send(&app, "POST", "/archaeologists", Some(json!({"fullName": "A"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/archaeologists")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let (_, rows) = send(&app, "GET", "/archaeologists", None).await;
        assert_eq!(rows, json!([]));
    }

    #[tokio::test]
    async fn test_archaeologist_crud() {
        let (_dir, app) = test_app();

        let (status, body) = send(
            &app,
            "POST",
            "/archaeologists",
            Some(json!({"fullName": "Gertrude Bell", "salary": 72000.0})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["id"].as_i64().unwrap();

        let (status, row) = send(&app, "GET", &format!("/archaeologists/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            row,
            json!({
                "id": id,
                "fullName": "Gertrude Bell",
                "salary": 72000.0,
                "specialization": null,
                "qualification": null
            })
        );

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/archaeologists/{}", id),
            Some(json!({
                "fullName": "Gertrude Bell",
                "salary": 80000.0,
                "specialization": "Mesopotamia",
                "qualification": "Doctor"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["updated"], 1);

        let (_, row) = send(&app, "GET", &format!("/archaeologists/{}", id), None).await;
        assert_eq!(row["salary"], 80000.0);
        assert_eq!(row["specialization"], "Mesopotamia");

        let (status, body) = send(&app, "PUT", "/archaeologists/999", Some(json!({
            "fullName": "Nobody", "salary": 1, "specialization": "", "qualification": ""
        })))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["updated"], 0);

        let (status, body) = send(&app, "DELETE", "/archaeologists/999", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], 0);

        let (status, body) = send(&app, "DELETE", &format!("/archaeologists/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], 1);

        let (status, body) = send(&app, "GET", &format!("/archaeologists/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "404 Not Found");
    }

    #[tokio::test]
    async fn test_delete_archaeologist_with_findings_is_refused() {
        let (_dir, app) = test_app();
        let carter = add_archaeologist(&app, "Carter", 60000.0, "Egyptology").await;
        let mask = add_item(&app, "Mask", 10.0).await;
        add_finding(&app, carter, mask, "1922-11-04", "good").await;

        let (status, body) =
            send(&app, "DELETE", &format!("/archaeologists/{}", carter), None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["message"].as_str().unwrap().contains("FOREIGN KEY"));

        let (status, row) = send(&app, "GET", &format!("/archaeologists/{}", carter), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(row["fullName"], "Carter");

        let (_, details) = send(&app, "GET", "/findings/details", None).await;
        assert_eq!(details.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_client_error() {
        let (_dir, app) = test_app();
        let (status, _) = send(&app, "GET", "/archaeologists/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_filter_archaeologists() {
        let (_dir, app) = test_app();
        add_archaeologist(&app, "At threshold", 50000.0, "Egyptology").await;
        let above = add_archaeologist(&app, "Above", 61000.0, "Egyptology").await;
        add_archaeologist(&app, "Elsewhere", 99000.0, "Anthropology").await;

        let (status, rows) = send(
            &app,
            "GET",
            "/archaeologists/filter?minSalary=50000&specialization=Egyptology",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<i64> = rows
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![above]);

        // Default specialization is the empty string, which no row has.
        let (_, rows) = send(&app, "GET", "/archaeologists/filter", None).await;
        assert_eq!(rows, json!([]));

        let (status, _) = send(&app, "GET", "/archaeologists/filter?minSalary=lots", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_items_create_get_and_sort() {
        let (_dir, app) = test_app();

        let (status, _) = send(&app, "POST", "/items", Some(json!({"name": "Cup"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            "POST",
            "/items",
            Some(json!({
                "name": "Amphora",
                "cost": 1200.0,
                "era": "Ancient Rome",
                "priorOwner": "Unknown"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let amphora = body["id"].as_i64().unwrap();
        add_item(&app, "Coin", 40.0).await;
        add_item(&app, "Bowl", 300.0).await;

        let (_, row) = send(&app, "GET", &format!("/items/{}", amphora), None).await;
        assert_eq!(row["priorOwner"], "Unknown");
        let (status, _) = send(&app, "GET", "/items/404", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, rows) = send(&app, "GET", "/items/sorted?sortBy=cost&order=desc", None).await;
        assert_eq!(status, StatusCode::OK);
        let costs: Vec<f64> = rows
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["cost"].as_f64().unwrap())
            .collect();
        assert_eq!(costs, vec![1200.0, 300.0, 40.0]);

        let (_, rows) = send(&app, "GET", "/items/sorted", None).await;
        assert_eq!(rows[0]["name"], "Amphora");

        let (status, body) = send(&app, "GET", "/items/sorted?sortBy=bogus", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("bogus"));

        let (status, _) = send(&app, "GET", "/items/sorted?sortBy=name&order=sideways", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_finding_with_unknown_archaeologist_is_server_error() {
        let (_dir, app) = test_app();
        let what = add_item(&app, "Shard", 5.0).await;
        let (status, body) = send(
            &app,
            "POST",
            "/findings",
            Some(json!({"archaeologistId": 77, "artifactId": what})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["message"].as_str().unwrap().contains("FOREIGN KEY"));

        let (status, _) = send(&app, "POST", "/findings", Some(json!({"artifactId": what}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_findings_views() {
        let (_dir, app) = test_app();
        let carter = add_archaeologist(&app, "Carter", 60000.0, "Egyptology").await;
        let bell = add_archaeologist(&app, "Bell", 60000.0, "Mesopotamia").await;
        add_archaeologist(&app, "Idle", 60000.0, "None").await;
        let mask = add_item(&app, "Mask", 10.0).await;

        let old = add_finding(&app, carter, mask, "1922-11-04", "good").await;
        let recent_date = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        let recent = add_finding(&app, carter, mask, &recent_date, "poor").await;
        add_finding(&app, bell, mask, "1914-03-01", "average").await;

        let (status, details) = send(&app, "GET", "/findings/details", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(details.as_array().unwrap().len(), 3);
        assert_eq!(details[0]["archaeologistName"], "Carter");
        assert_eq!(details[0]["artifactName"], "Mask");
        assert_eq!(details[0]["date"], "1922-11-04");

        let (status, body) = send(&app, "PUT", "/findings/update-condition", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["updatedCount"], 2);

        let (_, row) = send(&app, "GET", &format!("/findings/{}", old), None).await;
        assert_eq!(row["condition"], "archived");
        let (_, row) = send(&app, "GET", &format!("/findings/{}", recent), None).await;
        assert_eq!(row["condition"], "poor");
        assert_eq!(row["type"], "whole");

        let (_, body) = send(&app, "PUT", "/findings/update-condition", None).await;
        assert_eq!(body["updatedCount"], 0);

        let (status, groups) = send(&app, "GET", "/findings/group-by-archaeologist", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            groups,
            json!([
                {"archaeologistId": carter, "name": "Carter", "count": 2},
                {"archaeologistId": bell, "name": "Bell", "count": 1}
            ])
        );

        let (_, all) = send(&app, "GET", "/findings", None).await;
        assert_eq!(all.as_array().unwrap().len(), 3);
    }
}
