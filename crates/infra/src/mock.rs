//! # テスト用モックリポジトリ
//!
//! HTTP 層のテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! kawaraban-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! PostgreSQL 実装と同じ観測可能な挙動を再現する:
//! 重複はストアエラーの重複種別、検索はパスワードを含まないエンティティ、
//! 一覧は挿入順。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use kawaraban_domain::{
   post::{NewPost, Post, PostId},
   user::{Email, NewUser, User, UserId, Username},
};
use uuid::Uuid;

use crate::{
   error::StoreError,
   repository::{PostRepository, UserRepository},
};

// ===== MockUserRepository =====

#[derive(Clone, Default)]
pub struct MockUserRepository {
   users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
   pub fn new() -> Self {
      Self {
         users: Arc::new(Mutex::new(Vec::new())),
      }
   }
}

#[async_trait]
impl UserRepository for MockUserRepository {
   async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
      let mut users = self.users.lock().unwrap();

      // UNIQUE 制約の再現。実装同様、メールアドレスの制約を先に検査する
      if users.iter().any(|u| u.email() == &new_user.email) {
         return Err(StoreError::duplicate_email());
      }
      if users.iter().any(|u| u.username() == &new_user.username) {
         return Err(StoreError::duplicate_username());
      }

      let id = UserId::new();
      let created_at = chrono::Utc::now();
      let user = User::from_db(
         id,
         new_user.username,
         new_user.email,
         Some(new_user.password),
         created_at,
         true,
      );

      // 参照経路はパスワードを読み戻さないため、保存時点で取り除く
      users.push(User::from_db(
         id,
         user.username().clone(),
         user.email().clone(),
         None,
         created_at,
         true,
      ));

      Ok(user)
   }

   async fn find_all(&self) -> Result<Vec<User>, StoreError> {
      Ok(self.users.lock().unwrap().clone())
   }

   async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
      Ok(self
         .users
         .lock()
         .unwrap()
         .iter()
         .find(|u| u.id() == id)
         .cloned())
   }

   async fn find_by_username(&self, username: &Username) -> Result<Option<User>, StoreError> {
      Ok(self
         .users
         .lock()
         .unwrap()
         .iter()
         .find(|u| u.username() == username)
         .cloned())
   }

   async fn find_by_email(&self, email: &Email) -> Result<Option<User>, StoreError> {
      Ok(self
         .users
         .lock()
         .unwrap()
         .iter()
         .find(|u| u.email() == email)
         .cloned())
   }
}

// ===== MockPostRepository =====

#[derive(Clone, Default)]
pub struct MockPostRepository {
   posts: Arc<Mutex<Vec<Post>>>,
}

impl MockPostRepository {
   pub fn new() -> Self {
      Self {
         posts: Arc::new(Mutex::new(Vec::new())),
      }
   }

   /// 保存済みの投稿一覧を取得する（検証用）
   pub fn posts(&self) -> Vec<Post> {
      self.posts.lock().unwrap().clone()
   }
}

#[async_trait]
impl PostRepository for MockPostRepository {
   async fn create(&self, new_post: NewPost) -> Result<Post, StoreError> {
      let now = chrono::Utc::now();
      let post = Post::from_db(
         PostId::from_uuid(Uuid::new_v4()),
         new_post.title,
         new_post.content,
         new_post.user_id,
         new_post.tags,
         now,
         now,
      );

      self.posts.lock().unwrap().push(post.clone());
      Ok(post)
   }
}
