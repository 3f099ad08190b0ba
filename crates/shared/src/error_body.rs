//! # エラーレスポンスボディ
//!
//! 全エンドポイントで共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - ワイヤ上の形は常に `{"error": "<メッセージ>"}` の一形式のみ
//! - `ErrorBody` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は api 側の責務（shared に axum 依存を入れない）
//! - スタックトレースや内部識別子はメッセージに含めない

use serde::{Deserialize, Serialize};

/// エラーレスポンスボディ
///
/// すべての失敗レスポンスで統一された形式。
/// HTTP ステータスコードと対で返され、`error` フィールドだけを持つ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
   pub error: String,
}

impl ErrorBody {
   /// エラーメッセージからボディを作成する
   pub fn new(message: impl Into<String>) -> Self {
      Self {
         error: message.into(),
      }
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_new_でメッセージが設定される() {
      let body = ErrorBody::new("ユーザーが見つかりません");

      assert_eq!(body.error, "ユーザーが見つかりません");
   }

   #[test]
   fn test_serializeでerrorフィールドのみのjsonになる() {
      let body = ErrorBody::new("boom");
      let json = serde_json::to_value(&body).unwrap();

      assert_eq!(json, serde_json::json!({ "error": "boom" }));
   }

   #[test]
   fn test_deserializeで復元できる() {
      let body: ErrorBody = serde_json::from_str(r#"{"error":"boom"}"#).unwrap();

      assert_eq!(body, ErrorBody::new("boom"));
   }
}
