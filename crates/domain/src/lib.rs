//! # Kawaraban ドメイン層
//!
//! ユーザーと投稿のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（[`user::User`], [`post::Post`]）
//! - **値オブジェクト**: 生成時にバリデーションを実行する不変オブジェクト
//!   （[`user::Username`], [`user::Email`], [`password::PlainPassword`]）
//! - **ドメインエラー**: 入力値の検証失敗や不在を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、外部サービス）には一切依存しない。
//! パスワードのハッシュ化はインフラ層の責務で、このクレートは
//! ハッシュ済みの値（[`password::PasswordHash`]）を受け取るだけである。

pub mod error;
pub mod password;
pub mod post;
pub mod user;

pub use error::DomainError;
