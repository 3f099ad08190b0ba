//! # ルートハンドラ
//!
//! API ルート（`GET /v1/api/`）のウェルカムバナーを返す。

/// ウェルカムバナーエンドポイント
pub async fn welcome() -> &'static str {
    "Welcome to the API"
}
