//! 共通ユーティリティ

pub mod time;
