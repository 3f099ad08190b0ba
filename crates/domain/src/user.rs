//! # ユーザー
//!
//! ユーザーエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 要件 |
//! |---|------------|------|
//! | [`User`] | ユーザー | ユーザー名・メールアドレスは全ユーザーで一意 |
//! | [`Username`] | ユーザー名 | 必須、100 文字以内 |
//! | [`Email`] | メールアドレス | 必須、`local@domain` 形式、255 文字以内 |
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: UserId は UUID をラップし、型安全性を確保
//! - **不変性**: エンティティフィールドは不変、参照はメソッド経由
//! - **バリデーション**: 値オブジェクトの生成時に検証ロジックを実行
//!
//! 一意性の検証はドメインでは行えない（全ユーザーを知る必要がある）ため、
//! ストアの UNIQUE 制約に委ね、違反はインフラ層のエラー種別として表面化する。

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{DomainError, password::Password};

/// ユーザー名の最大文字数
const USERNAME_MAX_CHARS: usize = 100;

/// メールアドレスの最大文字数
const EMAIL_MAX_CHARS: usize = 255;

/// ユーザー ID（一意識別子）
///
/// UUID v7 を使用し、生成順にソート可能。
/// Newtype パターンで型安全性を確保。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct UserId(Uuid);

impl UserId {
    /// 新しいユーザー ID を生成する
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// 既存の UUID からユーザー ID を作成する
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 内部の UUID 参照を取得する
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// ユーザー名（値オブジェクト）
///
/// 前後の空白は除去して保持する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct Username(String);

impl Username {
    /// ユーザー名を作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列（空白のみを含む）ではない
    /// - 最大 100 文字
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(DomainError::Validation(
                "ユーザー名は必須です".to_string(),
            ));
        }

        if trimmed.chars().count() > USERNAME_MAX_CHARS {
            return Err(DomainError::Validation(format!(
                "ユーザー名は{USERNAME_MAX_CHARS}文字以内である必要があります"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// メールアドレス（値オブジェクト）
///
/// 生成時にバリデーションを実行し、不正な値の作成を防ぐ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `local@domain` の形式であること
    /// - 最大 255 文字
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        };

        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        }

        if value.chars().count() > EMAIL_MAX_CHARS {
            return Err(DomainError::Validation(format!(
                "メールアドレスは{EMAIL_MAX_CHARS}文字以内である必要があります"
            )));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ユーザーエンティティ
///
/// システムのユーザーを表現する。ID と作成日時はストアが採番するため、
/// エンティティはストレージ層の `create` が返す形でのみ生成される。
///
/// # 不変条件
///
/// - `username` と `email` は全ユーザーで一意（ストアの UNIQUE 制約）
/// - `password` が保持するのはハッシュのみ（参照経路では不在）
/// - `is_active` は作成時に true
#[derive(Debug, Clone)]
pub struct User {
    id:         UserId,
    username:   Username,
    email:      Email,
    password:   Option<Password>,
    created_at: DateTime<Utc>,
    is_active:  bool,
}

impl User {
    /// ストアの行からユーザーを復元する
    ///
    /// ストレージ層専用のコンストラクタ。参照経路ではパスワードハッシュを
    /// 読み戻さないため `password` は `None` を渡す。
    pub fn from_db(
        id: UserId,
        username: Username,
        email: Email,
        password: Option<Password>,
        created_at: DateTime<Utc>,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password,
            created_at,
            is_active,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> Option<&Password> {
        self.password.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

/// 新規ユーザー（作成入力）
///
/// ストレージ層の `create` に渡す入力値。ID と作成日時はストアが採番する。
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email:    Email,
    pub password: Password,
}
