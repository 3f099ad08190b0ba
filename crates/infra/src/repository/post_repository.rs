//! # PostRepository
//!
//! 投稿の永続化を担当するリポジトリ。
//!
//! 作成は単一文のため、トランザクションで包む必要はない。
//! ID と作成・更新日時はカラムデフォルトで採番し、`RETURNING` で読み戻す。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kawaraban_domain::post::{NewPost, Post, PostId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{db::with_query_timeout, error::StoreError};

/// 投稿リポジトリトレイト
#[async_trait]
pub trait PostRepository: Send + Sync {
   /// 投稿を作成する
   ///
   /// ストアが採番した ID・作成日時・更新日時を反映したエンティティを返す。
   /// タグ集合は `text[]` として永続化する。
   async fn create(&self, new_post: NewPost) -> Result<Post, StoreError>;
}

/// posts テーブルの採番結果行
#[derive(sqlx::FromRow)]
struct PostInsertRow {
   id:         Uuid,
   created_at: DateTime<Utc>,
   updated_at: DateTime<Utc>,
}

/// PostgreSQL 実装の PostRepository
#[derive(Debug, Clone)]
pub struct PostgresPostRepository {
   pool: PgPool,
}

impl PostgresPostRepository {
   /// 新しいリポジトリインスタンスを作成する
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
   async fn create(&self, new_post: NewPost) -> Result<Post, StoreError> {
      let row = with_query_timeout(
         "posts.insert",
         sqlx::query_as::<_, PostInsertRow>(
            r#"
            INSERT INTO posts (title, content, user_id, tags)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_at, updated_at
            "#,
         )
         .bind(&new_post.title)
         .bind(&new_post.content)
         .bind(new_post.user_id.as_uuid())
         .bind(&new_post.tags)
         .fetch_one(&self.pool),
      )
      .await?;

      Ok(Post::from_db(
         PostId::from_uuid(row.id),
         new_post.title,
         new_post.content,
         new_post.user_id,
         new_post.tags,
         row.created_at,
         row.updated_at,
      ))
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_リポジトリはsendとsyncを実装している() {
      fn assert_send_sync<T: Send + Sync>() {}
      assert_send_sync::<PostgresPostRepository>();
   }
}
