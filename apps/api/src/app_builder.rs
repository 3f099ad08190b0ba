//! # ルーター構築
//!
//! ルートテーブルとミドルウェアスタックを組み立てる。
//! エントリーポイントと統合テストの両方から使用する
//! （テストはモックリポジトリの [`UserState`] を渡す）。

use std::{sync::Arc, time::Duration};

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use kawaraban_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::handler::{
    UserState,
    get_user_by_email,
    get_user_by_id,
    get_user_by_username,
    health_check,
    list_users,
    register_user,
    welcome,
};

/// リクエストボディの上限（1 MiB）
const MAX_BODY_SIZE: usize = 1 << 20;

/// リクエスト全体の制限時間
///
/// クエリ単位の制限時間（5 秒）とは別に、遅いバックエンドが
/// リクエストタスクを握り続けないための上限。
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// アプリケーションのルーターを構築する
///
/// `/v1/api/users/{id}` と `/v1/api/users/by-username/{username}` は
/// 静的セグメント `by-username` により形が重ならないため、
/// ルーティングの優先順位は構造的に一意になる。
pub fn build_router(user_state: Arc<UserState>) -> Router {
    Router::new()
        .route("/v1/api/", get(welcome))
        .route("/v1/api/health", get(health_check))
        .route("/v1/api/users", get(list_users).post(register_user))
        .route(
            "/v1/api/users/by-username/{username}",
            get(get_user_by_username),
        )
        .route("/v1/api/users/by-email", get(get_user_by_email))
        .route("/v1/api/users/{id}", get(get_user_by_id))
        .with_state(user_state)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CatchPanicLayer::new())
        // Request ID レイヤー（レイヤー順序が重要: 下に書いたものが外側）
        // 1. SetRequestIdLayer（最外）: リクエスト受信時に UUID v7 を生成
        //    （またはクライアント提供値を使用）
        // 2. TraceLayer: カスタムスパンに request_id を含め、全ログに自動注入
        // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
