//! ユーザー API 統合テスト
//!
//! モックリポジトリでルーターを組み立て、HTTP の観測可能な契約を検証する:
//!
//! - 登録成功で 201、生成された `id` を含み、`password` キーは存在しない
//! - 重複登録で 409、エラーボディは `{"error": ...}` の一形式
//! - 不正な UUID パスパラメータで 400
//! - 未知のフィールドを含むボディはデコード段階で拒否（400）
//! - 空のストアの一覧は `[]`

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use kawaraban_api::{app_builder::build_router, handler::UserState};
use kawaraban_infra::{Argon2PasswordHasher, mock::MockUserRepository};
use pretty_assertions::assert_eq;
use serde_json::{Value as JsonValue, json};
use tower::ServiceExt;
use uuid::Uuid;

// --- テストヘルパー ---

/// モックリポジトリでルーターを構築する
fn test_app() -> Router {
    let state = Arc::new(UserState {
        users:           Arc::new(MockUserRepository::new()),
        password_hasher: Arc::new(Argon2PasswordHasher::new()),
    });

    build_router(state)
}

fn post_json(uri: &str, body: JsonValue) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn parse_body(response: axum::http::Response<Body>) -> JsonValue {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn register_payload() -> JsonValue {
    json!({
        "username": "alice",
        "email": "alice@example.com",
        "password": "secret"
    })
}

// --- 登録 ---

#[tokio::test]
async fn test_登録成功で201とユーザーが返る() {
    let app = test_app();

    let response = app
        .oneshot(post_json("/v1/api/users", register_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_body(response).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["is_active"], true);
    assert!(
        Uuid::parse_str(body["id"].as_str().unwrap()).is_ok(),
        "id が UUID であること: {body}"
    );
    assert!(body.get("created_at").is_some());
}

#[tokio::test]
async fn test_レスポンスにpasswordキーが存在しない() {
    let app = test_app();

    let response = app
        .oneshot(post_json("/v1/api/users", register_payload()))
        .await
        .unwrap();

    let body = parse_body(response).await;
    assert!(
        body.get("password").is_none(),
        "password キーが存在しないこと: {body}"
    );
}

#[tokio::test]
async fn test_同じメールアドレスの再登録は409() {
    let app = test_app();

    let first = app
        .clone()
        .oneshot(post_json("/v1/api/users", register_payload()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(post_json("/v1/api/users", register_payload()))
        .await
        .unwrap();

    assert_eq!(second.status(), StatusCode::CONFLICT);

    let body = parse_body(second).await;
    assert!(body["error"].is_string(), "error ボディであること: {body}");
}

#[tokio::test]
async fn test_同じユーザー名で別メールアドレスの再登録は409() {
    let app = test_app();

    app.clone()
        .oneshot(post_json("/v1/api/users", register_payload()))
        .await
        .unwrap();

    let response = app
        .oneshot(post_json(
            "/v1/api/users",
            json!({
                "username": "alice",
                "email": "alice2@example.com",
                "password": "secret"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_必須フィールド欠落は400() {
    let app = test_app();

    let response = app
        .oneshot(post_json(
            "/v1/api/users",
            json!({ "username": "alice", "email": "alice@example.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_body(response).await;
    assert!(body["error"].is_string(), "error ボディであること: {body}");
}

#[tokio::test]
async fn test_未知のフィールドは400() {
    let app = test_app();

    let response = app
        .oneshot(post_json(
            "/v1/api/users",
            json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "secret",
                "role": "admin"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_不正なメールアドレスは400() {
    let app = test_app();

    let response = app
        .oneshot(post_json(
            "/v1/api/users",
            json!({
                "username": "alice",
                "email": "not-an-email",
                "password": "secret"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// --- 参照 ---

#[tokio::test]
async fn test_空のストアの一覧は空配列() {
    let app = test_app();

    let response = app.oneshot(get("/v1/api/users")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_body(response).await, json!([]));
}

#[tokio::test]
async fn test_登録したユーザーをidで取得できる() {
    let app = test_app();

    let created = app
        .clone()
        .oneshot(post_json("/v1/api/users", register_payload()))
        .await
        .unwrap();
    let created = parse_body(created).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .oneshot(get(&format!("/v1/api/users/{id}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_不正なuuidのパスパラメータは400() {
    let app = test_app();

    let response = app.oneshot(get("/v1/api/users/not-a-uuid")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_body(response).await;
    assert!(body["error"].is_string(), "error ボディであること: {body}");
}

#[tokio::test]
async fn test_存在しないidは404() {
    let app = test_app();

    let response = app
        .oneshot(get(&format!("/v1/api/users/{}", Uuid::new_v4())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ユーザー名で取得できる() {
    let app = test_app();

    app.clone()
        .oneshot(post_json("/v1/api/users", register_payload()))
        .await
        .unwrap();

    let response = app
        .oneshot(get("/v1/api/users/by-username/alice"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_body(response).await["email"], "alice@example.com");
}

#[tokio::test]
async fn test_メールアドレスで検索できる() {
    let app = test_app();

    app.clone()
        .oneshot(post_json("/v1/api/users", register_payload()))
        .await
        .unwrap();

    let response = app
        .oneshot(get("/v1/api/users/by-email?email=alice@example.com"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_body(response).await["username"], "alice");
}

#[tokio::test]
async fn test_一覧は挿入順で返る() {
    let app = test_app();

    for (name, email) in [("alice", "alice@example.com"), ("bob", "bob@example.com")] {
        app.clone()
            .oneshot(post_json(
                "/v1/api/users",
                json!({ "username": name, "email": email, "password": "secret" }),
            ))
            .await
            .unwrap();
    }

    let response = app.oneshot(get("/v1/api/users")).await.unwrap();
    let body = parse_body(response).await;

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["alice", "bob"]);
}

// --- バナーとヘルスチェック ---

#[tokio::test]
async fn test_ルートはウェルカムバナーを返す() {
    let app = test_app();

    let response = app.oneshot(get("/v1/api/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"Welcome to the API");
}

#[tokio::test]
async fn test_ヘルスチェックはokを返す() {
    let app = test_app();

    let response = app.oneshot(get("/v1/api/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}
