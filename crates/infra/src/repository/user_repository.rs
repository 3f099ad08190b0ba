//! # UserRepository
//!
//! ユーザー情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **一意性はストアに委譲**: username / email の UNIQUE 制約違反は
//!   [`StoreErrorKind`](crate::StoreErrorKind) の重複種別として表面化する
//! - **採番はストア側**: ID（UUID v7）は挿入時に生成し、作成日時は
//!   カラムデフォルトで採番して `RETURNING` で読み戻す
//! - **参照経路はハッシュを読まない**: SELECT にパスワード列を含めない

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kawaraban_domain::user::{Email, NewUser, User, UserId, Username};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
   db::{TxContext, with_query_timeout},
   error::StoreError,
};

/// ユーザーリポジトリトレイト
///
/// ユーザー情報の永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、HTTP 層から利用する。
#[async_trait]
pub trait UserRepository: Send + Sync {
   /// ユーザーを作成する
   ///
   /// 単一の INSERT をトランザクションで包み、ストアが採番した
   /// ID・作成日時を反映したエンティティを返す。
   ///
   /// # エラー
   ///
   /// - `DuplicateEmail`: メールアドレスの UNIQUE 制約違反
   /// - `DuplicateUsername`: ユーザー名の UNIQUE 制約違反
   /// - その他は不透明なストアエラー
   ///
   /// 1 回の呼び出しで挿入は最大 1 件。衝突時のリトライは行わない
   /// （呼び出し元が別の値で再送する）。
   async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;

   /// 全ユーザーを挿入順で取得する
   ///
   /// 空のストアでは空の Vec を返す（エラーではない）。
   async fn find_all(&self) -> Result<Vec<User>, StoreError>;

   /// ID でユーザーを検索する
   ///
   /// # 戻り値
   ///
   /// - `Ok(Some(user))`: ユーザーが見つかった場合
   /// - `Ok(None)`: ユーザーが見つからない場合
   /// - `Err(_)`: ストアエラー
   async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError>;

   /// ユーザー名でユーザーを検索する
   async fn find_by_username(&self, username: &Username) -> Result<Option<User>, StoreError>;

   /// メールアドレスでユーザーを検索する
   async fn find_by_email(&self, email: &Email) -> Result<Option<User>, StoreError>;
}

/// users テーブルの参照行
///
/// パスワード列は参照経路では読み戻さないため含まれない。
#[derive(sqlx::FromRow)]
struct UserRow {
   id:         Uuid,
   username:   String,
   email:      String,
   created_at: DateTime<Utc>,
   is_active:  bool,
}

impl UserRow {
   fn into_user(self) -> Result<User, StoreError> {
      Ok(User::from_db(
         UserId::from_uuid(self.id),
         Username::new(self.username).map_err(|e| StoreError::unexpected(e.to_string()))?,
         Email::new(self.email).map_err(|e| StoreError::unexpected(e.to_string()))?,
         None,
         self.created_at,
         self.is_active,
      ))
   }
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
   pool: PgPool,
}

impl PostgresUserRepository {
   /// 新しいリポジトリインスタンスを作成する
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
   async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
      let mut tx = TxContext::begin(&self.pool).await?;

      let id = UserId::new();
      let row = with_query_timeout(
         "users.insert",
         sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, password, email)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, created_at, is_active
            "#,
         )
         .bind(id.as_uuid())
         .bind(new_user.username.as_str())
         .bind(new_user.password.hash().as_str().as_bytes())
         .bind(new_user.email.as_str())
         .fetch_one(tx.conn()),
      )
      .await?; // 失敗時は tx のドロップでロールバックされる

      tx.commit().await?;

      Ok(User::from_db(
         UserId::from_uuid(row.id),
         new_user.username,
         new_user.email,
         Some(new_user.password),
         row.created_at,
         row.is_active,
      ))
   }

   async fn find_all(&self) -> Result<Vec<User>, StoreError> {
      let rows = with_query_timeout(
         "users.select_all",
         sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, created_at, is_active
            FROM users
            ORDER BY id
            "#,
         )
         .fetch_all(&self.pool),
      )
      .await?;

      rows.into_iter().map(UserRow::into_user).collect()
   }

   async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
      let row = with_query_timeout(
         "users.select_by_id",
         sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, created_at, is_active
            FROM users
            WHERE id = $1
            "#,
         )
         .bind(id.as_uuid())
         .fetch_optional(&self.pool),
      )
      .await?;

      let Some(row) = row else {
         return Ok(None);
      };

      Ok(Some(row.into_user()?))
   }

   async fn find_by_username(&self, username: &Username) -> Result<Option<User>, StoreError> {
      let row = with_query_timeout(
         "users.select_by_username",
         sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, created_at, is_active
            FROM users
            WHERE username = $1
            "#,
         )
         .bind(username.as_str())
         .fetch_optional(&self.pool),
      )
      .await?;

      let Some(row) = row else {
         return Ok(None);
      };

      Ok(Some(row.into_user()?))
   }

   async fn find_by_email(&self, email: &Email) -> Result<Option<User>, StoreError> {
      let row = with_query_timeout(
         "users.select_by_email",
         sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, created_at, is_active
            FROM users
            WHERE email = $1
            "#,
         )
         .bind(email.as_str())
         .fetch_optional(&self.pool),
      )
      .await?;

      let Some(row) = row else {
         return Ok(None);
      };

      Ok(Some(row.into_user()?))
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_リポジトリはsendとsyncを実装している() {
      fn assert_send_sync<T: Send + Sync>() {}
      assert_send_sync::<PostgresUserRepository>();
   }
}
