//! # パスワード
//!
//! パスワード関連の値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`PlainPassword`] | 平文パスワード | 登録時の入力値（メモリ上にのみ存在） |
//! | [`PasswordHash`] | パスワードハッシュ | 永続化用のハッシュ値 |
//! | [`Password`] | パスワード | 平文（任意）とハッシュの組 |
//!
//! 永続化されるのはハッシュのみ。平文はハッシュ化の瞬間だけメモリ上に
//! 保持され、ストアにもレスポンスにも決して書き出されない。

use crate::DomainError;

/// 平文パスワードの最小文字数
const PASSWORD_MIN_CHARS: usize = 3;

/// 平文パスワードの最大文字数
const PASSWORD_MAX_CHARS: usize = 72;

/// 平文パスワード（登録時の入力値）
///
/// ユーザーが入力したパスワードをラップする。
///
/// # バリデーション
///
/// - 3 文字以上 72 文字以内
///
/// # セキュリティ
///
/// Debug 出力ではパスワードの値をマスクする。
#[derive(Clone)]
pub struct PlainPassword(String);

impl std::fmt::Debug for PlainPassword {
   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      f.debug_tuple("PlainPassword").field(&"[REDACTED]").finish()
   }
}

impl PlainPassword {
   /// 平文パスワードを作成する
   ///
   /// # エラー
   ///
   /// 文字数が範囲外の場合は `DomainError::Validation` を返す。
   pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
      let value = value.into();
      let chars = value.chars().count();

      if chars < PASSWORD_MIN_CHARS {
         return Err(DomainError::Validation(format!(
            "パスワードは{PASSWORD_MIN_CHARS}文字以上である必要があります"
         )));
      }

      if chars > PASSWORD_MAX_CHARS {
         return Err(DomainError::Validation(format!(
            "パスワードは{PASSWORD_MAX_CHARS}文字以内である必要があります"
         )));
      }

      Ok(Self(value))
   }

   /// 文字列参照を取得する
   pub fn as_str(&self) -> &str {
      &self.0
   }
}

/// パスワードハッシュ（永続化用）
///
/// Argon2id でハッシュ化されたパスワード文字列（PHC 形式）をラップする。
/// データベースに保存される形式。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
   /// ハッシュ文字列からインスタンスを作成する
   pub fn new(hash: impl Into<String>) -> Self {
      Self(hash.into())
   }

   /// 文字列参照を取得する
   pub fn as_str(&self) -> &str {
      &self.0
   }

   /// 所有権を持つ文字列に変換する
   pub fn into_string(self) -> String {
      self.0
   }
}

/// パスワード（平文とハッシュの組）
///
/// 登録経路では平文とハッシュの両方を持ち、参照経路ではストアから
/// ハッシュを読み戻さないため [`Password::from_hash`] すら経由せず、
/// エンティティ上は不在（`None`）となる。
#[derive(Debug, Clone)]
pub struct Password {
   text: Option<PlainPassword>,
   hash: PasswordHash,
}

impl Password {
   /// 平文とハッシュの組からパスワードを作成する
   ///
   /// 登録経路で使用する。平文はこのオブジェクトの生存期間中だけ
   /// メモリ上に保持される。
   pub fn new(text: PlainPassword, hash: PasswordHash) -> Self {
      Self {
         text: Some(text),
         hash,
      }
   }

   /// ハッシュのみからパスワードを作成する
   pub fn from_hash(hash: PasswordHash) -> Self {
      Self { text: None, hash }
   }

   /// 平文を取得する（存在する場合のみ）
   pub fn text(&self) -> Option<&PlainPassword> {
      self.text.as_ref()
   }

   /// ハッシュを取得する
   pub fn hash(&self) -> &PasswordHash {
      &self.hash
   }
}
