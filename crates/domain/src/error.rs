//! # ドメイン層エラー定義
//!
//! 入力値の検証失敗やエンティティの不在を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//! | `NotFound` | 404 Not Found | エンティティが存在しない |
//!
//! 重複（メールアドレス / ユーザー名）はストレージの制約違反として検出される
//! ため、ドメインではなくインフラ層のエラー種別で表現する。

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// 値オブジェクトの生成時や検索結果の解釈時に発生する例外状態を表現する。
/// API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値が制約に違反している場合に使用する。
    ///
    /// # 例
    ///
    /// - 必須フィールドが未入力
    /// - 文字数制限の超過
    /// - 不正なフォーマット
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// エンティティが見つからない
    ///
    /// 指定された識別子のエンティティがストアに存在しない場合に使用する。
    /// `entity_type` にはエンティティの種類（"User" など）を指定する。
    #[error("{entity_type} が見つかりません: {id}")]
    NotFound {
        /// エンティティの種類
        entity_type: &'static str,
        /// 検索に使用した識別子
        id:          String,
    },
}
