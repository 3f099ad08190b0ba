//! # Kawaraban インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とトランザクション
//! - **リポジトリ実装**: ユーザー・投稿の永続化操作
//! - **パスワードハッシュ**: Argon2id によるハッシュ化
//! - **ストアエラー**: 制約違反のドメインエラー種別への分類
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! インフラ層は `domain` に依存する。
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - ストアエラー定義と制約違反の分類
//! - [`password`] - パスワードハッシュ化
//! - [`repository`] - リポジトリ実装

pub mod db;
pub mod error;
pub mod password;
pub mod repository;

// テスト用モック（内部実装、ドキュメントからは隠す）
#[cfg(feature = "test-utils")]
#[doc(hidden)]
pub mod mock;

pub use error::{StoreError, StoreErrorKind};
pub use password::{Argon2PasswordHasher, PasswordHasher};
