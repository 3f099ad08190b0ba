//! # ヘルスチェックハンドラ
//!
//! API サーバーの稼働状態を確認するためのエンドポイント。
//!
//! ## 用途
//!
//! - **ロードバランサー**: ターゲットグループのヘルスチェック
//! - **コンテナオーケストレーター**: liveness probe
//!
//! ## エンドポイント
//!
//! ```text
//! GET /v1/api/health
//! ```
//!
//! プロセスに到達できれば常に `200 OK`（ボディは `OK`）を返す。
//! データベースへの死活確認は行わない。

/// ヘルスチェックエンドポイント
pub async fn health_check() -> &'static str {
    "OK"
}
