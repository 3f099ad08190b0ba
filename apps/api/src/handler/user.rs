//! # ユーザーハンドラ
//!
//! ユーザー関連の API を提供する。
//!
//! ## エンドポイント
//!
//! - `GET /v1/api/users` - ユーザー一覧（挿入順）
//! - `GET /v1/api/users/{id}` - ID でユーザーを取得
//! - `GET /v1/api/users/by-username/{username}` - ユーザー名でユーザーを取得
//! - `GET /v1/api/users/by-email` - メールアドレスでユーザーを検索
//! - `POST /v1/api/users` - ユーザー登録
//!
//! リクエストの検証（必須・文字数・形式）は値オブジェクトの生成で行い、
//! 失敗した場合はストレージに触れずに 400 を返す。
//! レスポンスの `UserResponse` にパスワードのフィールドは存在しないため、
//! ハッシュも平文もワイヤに出ることはない。

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path,
        Query,
        State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use kawaraban_domain::{
    DomainError,
    password::{Password, PlainPassword},
    user::{Email, NewUser, User, UserId, Username},
};
use kawaraban_infra::{PasswordHasher, repository::UserRepository};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// ユーザー API の共有状態
///
/// リポジトリとパスワードハッシュ化はトレイトオブジェクトとして
/// 明示的に注入する。プロセス全体のグローバル状態は持たない。
pub struct UserState {
    pub users:           Arc<dyn UserRepository>,
    pub password_hasher: Arc<dyn PasswordHasher>,
}

// --- リクエスト/レスポンス型 ---

/// ユーザー登録リクエスト
///
/// 未知のフィールドはデコード段階で拒否する。
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterUserRequest {
    pub username: String,
    pub email:    String,
    pub password: String,
}

/// メールアドレス検索クエリパラメータ
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetUserByEmailQuery {
    pub email: String,
}

/// ユーザー情報レスポンス
///
/// パスワードのフィールドは持たない。
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id:         Uuid,
    pub username:   String,
    pub email:      String,
    pub created_at: DateTime<Utc>,
    pub is_active:  bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id:         *user.id().as_uuid(),
            username:   user.username().as_str().to_string(),
            email:      user.email().as_str().to_string(),
            created_at: user.created_at(),
            is_active:  user.is_active(),
        }
    }
}

// --- ハンドラ ---

/// ユーザー一覧を取得する
///
/// `GET /v1/api/users`
pub async fn list_users(
    State(state): State<Arc<UserState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.users.find_all().await?;

    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// ID でユーザーを取得する
///
/// `GET /v1/api/users/{id}`
///
/// パスパラメータが UUID としてパースできない場合は 400、
/// 該当するユーザーがいない場合は 404 を返す。
pub async fn get_user_by_id(
    State(state): State<Arc<UserState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Path(id) = id?;
    let user_id = UserId::from_uuid(id);

    let user = state
        .users
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            entity_type: "User",
            id:          user_id.to_string(),
        })?;

    Ok(Json(UserResponse::from(&user)))
}

/// ユーザー名でユーザーを取得する
///
/// `GET /v1/api/users/by-username/{username}`
pub async fn get_user_by_username(
    State(state): State<Arc<UserState>>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let username = Username::new(username)?;

    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            entity_type: "User",
            id:          username.to_string(),
        })?;

    Ok(Json(UserResponse::from(&user)))
}

/// メールアドレスでユーザーを検索する
///
/// `GET /v1/api/users/by-email?email=alice@example.com`
pub async fn get_user_by_email(
    State(state): State<Arc<UserState>>,
    query: Result<Query<GetUserByEmailQuery>, QueryRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Query(query) = query?;
    let email = Email::new(query.email)?;

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            entity_type: "User",
            id:          email.to_string(),
        })?;

    Ok(Json(UserResponse::from(&user)))
}

/// ユーザーを登録する
///
/// `POST /v1/api/users`
///
/// 成功時は 201 と登録されたユーザーを返す。
/// メールアドレス / ユーザー名が既存ユーザーと重複する場合は 409。
pub async fn register_user(
    State(state): State<Arc<UserState>>,
    payload: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let Json(payload) = payload?;

    // ストレージに触れる前に入力を検証する
    let username = Username::new(payload.username)?;
    let email = Email::new(payload.email)?;
    let plain = PlainPassword::new(payload.password)?;

    let hash = state.password_hasher.hash(&plain)?;
    let password = Password::new(plain, hash);

    let user = state
        .users
        .create(NewUser {
            username,
            email,
            password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}
