//! # パスワードハッシュ化
//!
//! Argon2id によるパスワードハッシュ化を提供する。
//!
//! 平文は [`PlainPassword`] としてハッシュ化の瞬間だけ受け取り、
//! 永続化されるのは PHC 形式のハッシュ文字列のみ。

use argon2::{
    Argon2,
    Params,
    PasswordHasher as _,
    password_hash::{SaltString, rand_core::OsRng},
};
use kawaraban_domain::password::{PasswordHash, PlainPassword};

use crate::StoreError;

/// パスワードハッシュ化を担当するトレイト
///
/// HTTP 層には具象実装を `Arc<dyn PasswordHasher>` として明示的に注入する。
pub trait PasswordHasher: Send + Sync {
    /// 平文パスワードをハッシュ化する
    ///
    /// # Errors
    ///
    /// ハッシュ化の内部処理に失敗した場合。
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, StoreError>;
}

/// Argon2id によるパスワードハッシュ化の実装
///
/// OWASP 推奨パラメータ（RFC 9106）を使用:
/// - Memory: 64 MB
/// - Iterations: 1
/// - Parallelism: 1
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        let params = Params::new(
            65536, // memory (KB) = 64 MB
            1,     // iterations
            1,     // parallelism
            None,  // output length (default: 32)
        )
        .expect("Argon2 パラメータが不正です");

        Self {
            argon2: Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params),
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, StoreError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_str().as_bytes(), &salt)
            .map_err(|e| StoreError::unexpected(format!("ハッシュ化に失敗しました: {e}")))?;

        Ok(PasswordHash::new(hash.to_string()))
    }
}
