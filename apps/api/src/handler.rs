//! # HTTP ハンドラ
//!
//! リクエストをストレージ操作に変換し、結果をレスポンスに変換する。

pub mod health;
pub mod root;
pub mod user;

pub use health::health_check;
pub use root::welcome;
pub use user::{
    UserState,
    get_user_by_email,
    get_user_by_id,
    get_user_by_username,
    list_users,
    register_user,
};
