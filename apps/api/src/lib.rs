//! # Kawaraban API ライブラリ
//!
//! ルーター構築・設定・ハンドラを公開する。
//! 統合テストがモックリポジトリでルーターを組み立てられるように、
//! エントリーポイント（`main.rs`）とは分離している。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
