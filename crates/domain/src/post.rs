//! # 投稿
//!
//! 投稿エンティティを定義する。
//!
//! 投稿はユーザーに所属し、自由形式のタグ集合（順序なし・文字列値）を持つ。
//! ID と作成・更新日時はストアが採番する。

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::UserId;

/// 投稿 ID（一意識別子）
///
/// ストア側（カラムデフォルト）で採番されるため、このクレートに
/// 生成コンストラクタはない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct PostId(Uuid);

impl PostId {
    /// 既存の UUID から投稿 ID を作成する
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 内部の UUID 参照を取得する
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

/// 投稿エンティティ
///
/// ストレージ層の `create` が返す形でのみ生成される。
/// 返却後は読み取り専用。
#[derive(Debug, Clone)]
pub struct Post {
    id:         PostId,
    title:      String,
    content:    String,
    user_id:    UserId,
    tags:       Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Post {
    /// ストアの行から投稿を復元する
    pub fn from_db(
        id: PostId,
        title: String,
        content: String,
        user_id: UserId,
        tags: Vec<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            content,
            user_id,
            tags,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &PostId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// 新規投稿（作成入力）
///
/// ストレージ層の `create` に渡す入力値。
/// ID と作成・更新日時はストアが採番する。
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title:   String,
    pub content: String,
    pub user_id: UserId,
    pub tags:    Vec<String>,
}
