//! # API エラー定義
//!
//! API サーバーで発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## エラー種別と HTTP ステータスの対応
//!
//! | 種別 | HTTP ステータス |
//! |------|----------------|
//! | デコード / バリデーション失敗 | 400 Bad Request |
//! | エンティティ不在 | 404 Not Found |
//! | メールアドレス / ユーザー名の重複 | 409 Conflict |
//! | その他のストアエラー | 500 Internal Server Error |
//!
//! レスポンスボディは常に `{"error": "<メッセージ>"}`（[`ErrorBody`]）。
//! 500 のメッセージは固定値とし、内部情報を漏らさない（詳細はログに出力）。

use axum::{
   Json,
   extract::rejection::{JsonRejection, PathRejection, QueryRejection},
   http::StatusCode,
   response::{IntoResponse, Response},
};
use kawaraban_domain::DomainError;
use kawaraban_infra::{StoreError, StoreErrorKind};
use kawaraban_shared::ErrorBody;
use thiserror::Error;

/// API サーバーで発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
   /// 不正なリクエスト（デコード失敗・バリデーション失敗）
   #[error("不正なリクエスト: {0}")]
   BadRequest(String),

   /// リソースが見つからない
   #[error("{0}")]
   NotFound(String),

   /// ストアエラー（重複種別はここから 409 に変換される）
   #[error(transparent)]
   Store(#[from] StoreError),
}

impl From<DomainError> for ApiError {
   fn from(err: DomainError) -> Self {
      match err {
         DomainError::Validation(msg) => Self::BadRequest(msg),
         e @ DomainError::NotFound { .. } => Self::NotFound(e.to_string()),
      }
   }
}

// デコード失敗は axum の rejection からそのまま 400 に落とす。
// バリデーションと同じく、ストレージに到達する前に処理が終わる。

impl From<JsonRejection> for ApiError {
   fn from(rejection: JsonRejection) -> Self {
      Self::BadRequest(rejection.body_text())
   }
}

impl From<PathRejection> for ApiError {
   fn from(rejection: PathRejection) -> Self {
      Self::BadRequest(rejection.body_text())
   }
}

impl From<QueryRejection> for ApiError {
   fn from(rejection: QueryRejection) -> Self {
      Self::BadRequest(rejection.body_text())
   }
}

impl IntoResponse for ApiError {
   fn into_response(self) -> Response {
      let (status, message) = match &self {
         ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
         ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
         ApiError::Store(e) => match e.kind() {
            StoreErrorKind::DuplicateEmail | StoreErrorKind::DuplicateUsername => {
               (StatusCode::CONFLICT, e.to_string())
            }
            _ => {
               tracing::error!(error = %e, span_trace = %e.span_trace(), "ストアエラー");
               (
                  StatusCode::INTERNAL_SERVER_ERROR,
                  "内部エラーが発生しました".to_string(),
               )
            }
         },
      };

      (status, Json(ErrorBody::new(message))).into_response()
   }
}
