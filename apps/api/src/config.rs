//! # API サーバー設定
//!
//! 環境変数から API サーバーの設定を読み込む。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|-----------|------|
//! | `ADDRESS` | No | `0.0.0.0:8080` | リッスンアドレス |
//! | `DB_ADDRESS` | **Yes** | - | PostgreSQL 接続 URL |
//! | `DB_MAX_OPEN_CONNECTIONS` | No | `10` | 同時に開く接続数の上限 |
//! | `DB_MAX_IDLE_CONNECTIONS` | No | `10` | アイドル状態で保持する接続数 |
//! | `DB_MAX_IDLE_TIME` | No | `900` | アイドル接続の再生成までの秒数 |

use std::{env, time::Duration};

use kawaraban_infra::db::PoolConfig;

/// API サーバーの設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// リッスンアドレス
    pub address: String,
    /// データベース設定
    pub db:      DbConfig,
}

/// データベース設定
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// PostgreSQL 接続 URL
    pub address: String,
    /// プールのチューニング設定
    pub pool:    PoolConfig,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self {
            address: env::var("ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            db:      DbConfig::from_env(),
        }
    }
}

impl DbConfig {
    /// 環境変数からデータベース設定を読み込む
    fn from_env() -> Self {
        let defaults = PoolConfig::default();

        Self {
            address: env::var("DB_ADDRESS")
                .expect("DB_ADDRESS が設定されていません（PostgreSQL の接続 URL を指定してください）"),
            pool:    PoolConfig {
                max_open_connections: env::var("DB_MAX_OPEN_CONNECTIONS")
                    .unwrap_or_else(|_| defaults.max_open_connections.to_string())
                    .parse()
                    .expect("DB_MAX_OPEN_CONNECTIONS は正の整数である必要があります"),
                max_idle_connections: env::var("DB_MAX_IDLE_CONNECTIONS")
                    .unwrap_or_else(|_| defaults.max_idle_connections.to_string())
                    .parse()
                    .expect("DB_MAX_IDLE_CONNECTIONS は正の整数である必要があります"),
                max_idle_time:        env::var("DB_MAX_IDLE_TIME")
                    .map(|v| {
                        Duration::from_secs(
                            v.parse()
                                .expect("DB_MAX_IDLE_TIME は秒数（正の整数）である必要があります"),
                        )
                    })
                    .unwrap_or(defaults.max_idle_time),
            },
        }
    }
}
