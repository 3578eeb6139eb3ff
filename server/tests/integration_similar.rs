use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use server::{build_app, AppState};
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use tower::util::ServiceExt;

fn write_catalog(dir: &Path, items: &[(u32, &str)]) {
    let json: Vec<Value> = items
        .iter()
        .map(|&(id, text)| serde_json::json!({ "id": id, "text": text }))
        .collect();
    fs::write(dir.join("catalog.json"), serde_json::to_string(&json).unwrap()).unwrap();
}

fn built_state(dir: &Path) -> AppState {
    let state = AppState::new(dir.to_string_lossy().to_string());
    state.recommender.refresh(state.catalog.as_ref()).unwrap();
    state
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn similar_returns_ranked_neighbors() {
    let dir = tempdir().unwrap();
    write_catalog(
        dir.path(),
        &[
            (1, "blue widget alpha"),
            (2, "blue widget beta"),
            (3, "red gadget"),
            (4, "green gizmo"),
        ],
    );
    let app = build_app(built_state(dir.path()));

    let (status, json) = get(app, "/products/1/similar?k=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"].as_u64().unwrap(), 2);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results[0]["product_id"].as_u64().unwrap(), 2);
    assert_eq!(results[1]["product_id"].as_u64().unwrap(), 3);
    assert!(results[0]["score"].as_f64().unwrap() > results[1]["score"].as_f64().unwrap());
}

#[tokio::test]
async fn default_k_is_three() {
    let dir = tempdir().unwrap();
    write_catalog(dir.path(), &[(1, "a b"), (2, "b c"), (3, "c d"), (4, "d e"), (5, "e f")]);
    let app = build_app(built_state(dir.path()));

    let (status, json) = get(app, "/products/1/similar").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn unknown_product_is_404() {
    let dir = tempdir().unwrap();
    write_catalog(dir.path(), &[(1, "blue widget")]);
    let app = build_app(built_state(dir.path()));

    let (status, _) = get(app, "/products/99/similar").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unbuilt_model_is_503() {
    let dir = tempdir().unwrap();
    write_catalog(dir.path(), &[(1, "blue widget")]);
    let state = AppState::new(dir.path().to_string_lossy().to_string());
    let app = build_app(state);

    let (status, _) = get(app, "/products/1/similar").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn refresh_requires_admin_token_and_rebuilds() {
    let dir = tempdir().unwrap();
    write_catalog(dir.path(), &[(1, "blue widget"), (2, "blue gadget")]);
    let mut state = built_state(dir.path());
    state.admin_token = Some("secret".into());

    // Missing token is rejected.
    let req = Request::post("/admin/refresh").body(Body::empty()).unwrap();
    let resp = build_app(state.clone()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Grow the catalog, refresh with the token, and observe the new item.
    write_catalog(dir.path(), &[(1, "blue widget"), (2, "blue gadget"), (3, "blue trinket")]);
    let req = Request::post("/admin/refresh")
        .header("X-ADMIN-TOKEN", "secret")
        .body(Body::empty())
        .unwrap();
    let resp = build_app(state.clone()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (status, json) = get(build_app(state), "/products/1/similar?k=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"].as_array().unwrap().len(), 2);
}
