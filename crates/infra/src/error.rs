//! # ストアエラー定義
//!
//! データベースとの通信で発生するエラーを表現し、制約違反を
//! ドメインのエラー種別に分類する。
//!
//! ## 設計方針
//!
//! - **エラーの変換**: sqlx::Error をラップし、種別（[`StoreErrorKind`]）で分類
//! - **制約違反の分類**: ドライバが公開する制約識別子
//!   （`DatabaseError::constraint()`）で判定し、生のエラーメッセージへの
//!   部分一致は識別子が得られない場合の最終手段に限定する。
//!   分類は [`From<sqlx::Error>`] の一箇所に隔離する。
//! - **SpanTrace 自動捕捉**: `From` 実装や convenience constructor で
//!   エラー生成時の呼び出し経路を自動記録する
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`StoreError`]: エラー種別（[`StoreErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`StoreErrorKind`]: エラーの具体的な種別（Database, DuplicateEmail 等）

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// users テーブルのメールアドレス UNIQUE 制約名（PostgreSQL デフォルト命名）
const USERS_EMAIL_CONSTRAINT: &str = "users_email_key";

/// users テーブルのユーザー名 UNIQUE 制約名（PostgreSQL デフォルト命名）
const USERS_USERNAME_CONSTRAINT: &str = "users_username_key";

/// ストレージ層で発生するエラー
///
/// エラー種別（[`StoreErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
/// `From<sqlx::Error>` の変換や convenience constructor でエラーを生成すると、
/// その時点のスパン情報が自動的にキャプチャされる。
///
/// ## パターンマッチ
///
/// エラー種別に応じた処理には [`kind()`](StoreError::kind) を使用する:
///
/// ```ignore
/// match error.kind() {
///     StoreErrorKind::DuplicateEmail => { /* 409 Conflict */ }
///     _ => { /* その他 */ }
/// }
/// ```
#[derive(Display)]
#[display("{kind}")]
pub struct StoreError {
   kind:       StoreErrorKind,
   span_trace: SpanTrace,
}

/// ストレージ層エラーの種別
///
/// API 層でこのエラー種別に応じて適切な HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum StoreErrorKind {
   /// データベースエラー
   ///
   /// SQL クエリの実行失敗など、分類できない不透明な失敗。
   #[error("データベースエラー: {0}")]
   Database(#[source] sqlx::Error),

   /// 接続エラー
   ///
   /// 起動時にデータベースへ到達できない場合。プロセス起動に対して致命的。
   #[error("データベースに接続できません: {0}")]
   Connectivity(#[source] sqlx::Error),

   /// メールアドレスの重複
   ///
   /// `users_email_key` UNIQUE 制約違反。
   #[error("そのメールアドレスのユーザーは既に存在します")]
   DuplicateEmail,

   /// ユーザー名の重複
   ///
   /// `users_username_key` UNIQUE 制約違反。
   #[error("そのユーザー名のユーザーは既に存在します")]
   DuplicateUsername,

   /// クエリタイムアウト
   ///
   /// クエリ単位の制限時間（5 秒）を超過した場合。
   #[error("クエリがタイムアウトしました: {operation}")]
   Timeout {
      /// タイムアウトした操作名（例: "users.insert"）
      operation: &'static str,
   },

   /// 予期しないエラー
   ///
   /// 上記に分類できない予期しないエラー。
   #[error("予期しないエラー: {0}")]
   Unexpected(String),
}

// ===== StoreError のメソッド =====

impl StoreError {
   fn from_kind(kind: StoreErrorKind) -> Self {
      Self {
         kind,
         span_trace: SpanTrace::capture(),
      }
   }

   /// エラー種別を取得する
   pub fn kind(&self) -> &StoreErrorKind {
      &self.kind
   }

   /// SpanTrace を取得する
   pub fn span_trace(&self) -> &SpanTrace {
      &self.span_trace
   }

   // ===== Convenience constructors =====

   /// 接続エラーを生成する
   pub fn connectivity(source: sqlx::Error) -> Self {
      Self::from_kind(StoreErrorKind::Connectivity(source))
   }

   /// メールアドレス重複エラーを生成する
   pub fn duplicate_email() -> Self {
      Self::from_kind(StoreErrorKind::DuplicateEmail)
   }

   /// ユーザー名重複エラーを生成する
   pub fn duplicate_username() -> Self {
      Self::from_kind(StoreErrorKind::DuplicateUsername)
   }

   /// クエリタイムアウトエラーを生成する
   pub fn timeout(operation: &'static str) -> Self {
      Self::from_kind(StoreErrorKind::Timeout { operation })
   }

   /// 予期しないエラーを生成する
   pub fn unexpected(msg: impl Into<String>) -> Self {
      Self::from_kind(StoreErrorKind::Unexpected(msg.into()))
   }
}

// ===== トレイト実装 =====

impl fmt::Debug for StoreError {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("StoreError")
         .field("kind", &self.kind)
         .field("span_trace", &self.span_trace)
         .finish()
   }
}

impl std::error::Error for StoreError {
   fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
      self.kind.source()
   }
}

/// UNIQUE 制約違反をエラー種別に分類する
///
/// ドライバが公開する制約識別子を優先し、識別子が得られない場合のみ
/// エラーメッセージへの部分一致にフォールバックする。
/// 既知の制約に一致しない場合は `None`（不透明なエラーとして扱う）。
fn classify_unique_violation(constraint: Option<&str>, message: &str) -> Option<StoreErrorKind> {
   match constraint {
      Some(USERS_EMAIL_CONSTRAINT) => Some(StoreErrorKind::DuplicateEmail),
      Some(USERS_USERNAME_CONSTRAINT) => Some(StoreErrorKind::DuplicateUsername),
      Some(_) => None,
      // 最終手段: 制約識別子を公開しないドライバ向けのメッセージ一致
      None if message.contains(USERS_EMAIL_CONSTRAINT) => Some(StoreErrorKind::DuplicateEmail),
      None if message.contains(USERS_USERNAME_CONSTRAINT) => {
         Some(StoreErrorKind::DuplicateUsername)
      }
      None => None,
   }
}

// ===== From 実装（SpanTrace 自動キャプチャ + 制約違反の分類） =====

impl From<sqlx::Error> for StoreError {
   fn from(source: sqlx::Error) -> Self {
      let classified = match &source {
         sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            classify_unique_violation(db_err.constraint(), db_err.message())
         }
         _ => None,
      };

      let kind = match classified {
         Some(kind) => kind,
         None => StoreErrorKind::Database(source),
      };

      Self::from_kind(kind)
   }
}

#[cfg(test)]
mod tests {
   use tracing_subscriber::layer::SubscriberExt as _;

   use super::*;

   /// テスト用に ErrorLayer 付き subscriber を設定する
   fn with_error_layer(f: impl FnOnce()) {
      let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
      let _guard = tracing::subscriber::set_default(subscriber);
      f();
   }

   // ===== classify_unique_violation のテスト =====

   #[test]
   fn test_email制約の識別子でduplicate_emailに分類される() {
      let kind = classify_unique_violation(Some("users_email_key"), "");
      assert!(matches!(kind, Some(StoreErrorKind::DuplicateEmail)));
   }

   #[test]
   fn test_username制約の識別子でduplicate_usernameに分類される() {
      let kind = classify_unique_violation(Some("users_username_key"), "");
      assert!(matches!(kind, Some(StoreErrorKind::DuplicateUsername)));
   }

   #[test]
   fn test_未知の制約識別子はnoneを返す() {
      let kind = classify_unique_violation(Some("posts_pkey"), "");
      assert!(kind.is_none());
   }

   #[test]
   fn test_識別子がない場合はメッセージ一致にフォールバックする() {
      let message = r#"duplicate key value violates unique constraint "users_email_key""#;
      let kind = classify_unique_violation(None, message);
      assert!(matches!(kind, Some(StoreErrorKind::DuplicateEmail)));

      let message = r#"duplicate key value violates unique constraint "users_username_key""#;
      let kind = classify_unique_violation(None, message);
      assert!(matches!(kind, Some(StoreErrorKind::DuplicateUsername)));
   }

   #[test]
   fn test_識別子もメッセージ一致もない場合はnoneを返す() {
      let kind = classify_unique_violation(None, "connection reset by peer");
      assert!(kind.is_none());
   }

   // ===== From 実装のテスト =====

   #[test]
   fn test_from_sqlx_errorで不透明なエラーはdatabase種別になる() {
      let err: StoreError = sqlx::Error::RowNotFound.into();
      assert!(matches!(err.kind(), StoreErrorKind::Database(_)));
   }

   #[test]
   fn test_from_sqlx_errorでspan_traceがキャプチャされる() {
      with_error_layer(|| {
         let span = tracing::info_span!("test_repo", operation = "users.insert");
         let _enter = span.enter();

         let err: StoreError = sqlx::Error::RowNotFound.into();

         let trace_str = format!("{}", err.span_trace());
         assert!(
            trace_str.contains("test_repo"),
            "SpanTrace がスパン名を含むこと: {trace_str}",
         );
      });
   }

   // ===== Convenience constructor のテスト =====

   #[test]
   fn test_duplicate_emailコンストラクタ() {
      let err = StoreError::duplicate_email();
      assert!(matches!(err.kind(), StoreErrorKind::DuplicateEmail));
   }

   #[test]
   fn test_duplicate_usernameコンストラクタ() {
      let err = StoreError::duplicate_username();
      assert!(matches!(err.kind(), StoreErrorKind::DuplicateUsername));
   }

   #[test]
   fn test_timeoutコンストラクタが操作名を保持する() {
      let err = StoreError::timeout("users.insert");
      assert!(matches!(
         err.kind(),
         StoreErrorKind::Timeout { operation } if *operation == "users.insert"
      ));
   }

   // ===== Display / source のテスト =====

   #[test]
   fn test_displayがstore_error_kindのメッセージを出力する() {
      let err = StoreError::duplicate_email();
      assert_eq!(
         format!("{err}"),
         "そのメールアドレスのユーザーは既に存在します"
      );
   }

   #[test]
   fn test_sourceがstore_error_kindに委譲する() {
      use std::error::Error;

      let err: StoreError = sqlx::Error::RowNotFound.into();
      assert!(err.source().is_some());
   }
}
