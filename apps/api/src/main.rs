//! # Kawaraban API サーバー
//!
//! ユーザー登録・参照と投稿作成を提供する HTTP API。
//!
//! ## 起動の流れ
//!
//! 1. 環境変数の読み込み（.env ファイル）
//! 2. トレーシングの初期化
//! 3. アプリケーション設定の読み込み
//! 4. データベース接続プールの作成（失敗した場合は起動を中断）
//! 5. ルーターの構築
//! 6. HTTP サーバーの起動
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `ADDRESS` | No | リッスンアドレス（デフォルト: `0.0.0.0:8080`） |
//! | `DB_ADDRESS` | **Yes** | PostgreSQL 接続 URL |
//! | `DB_MAX_OPEN_CONNECTIONS` | No | 接続数の上限（デフォルト: 10） |
//! | `DB_MAX_IDLE_CONNECTIONS` | No | アイドル保持数（デフォルト: 10） |
//! | `DB_MAX_IDLE_TIME` | No | アイドル再生成までの秒数（デフォルト: 900） |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: pretty） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p kawaraban-api
//!
//! # 本番環境
//! DB_ADDRESS=postgres://... cargo run -p kawaraban-api --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use kawaraban_api::{app_builder::build_router, config::ApiConfig, handler::UserState};
use kawaraban_infra::{Argon2PasswordHasher, db, repository::PostgresUserRepository};
use kawaraban_shared::observability::{self, LogFormat};
use tokio::net::TcpListener;

/// API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   // 本番環境では .env ファイルは使用せず、環境変数を直接設定する
   dotenvy::dotenv().ok();

   // トレーシング初期化
   observability::init_tracing(LogFormat::from_env());

   // 設定読み込み
   let config = ApiConfig::from_env();

   tracing::info!("API サーバーを起動します: {}", config.address);

   // データベース接続プールを作成。到達できない場合は起動に対して致命的
   let pool = db::create_pool(&config.db.address, &config.db.pool)
      .await
      .expect("データベース接続に失敗しました");
   tracing::info!("データベース接続プールを確立しました");

   // 依存コンポーネントを初期化
   let user_state = Arc::new(UserState {
      users:           Arc::new(PostgresUserRepository::new(pool)),
      password_hasher: Arc::new(Argon2PasswordHasher::new()),
   });

   // ルーター構築
   let app = build_router(user_state);

   // サーバー起動
   let addr: SocketAddr = config
      .address
      .parse()
      .expect("ADDRESS のパースに失敗しました");

   let listener = TcpListener::bind(addr).await?;
   tracing::info!("API サーバーが起動しました: {}", addr);

   axum::serve(listener, app).await?;

   Ok(())
}
