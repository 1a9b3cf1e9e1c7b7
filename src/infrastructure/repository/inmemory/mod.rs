//! InMemory store 実装
//!
//! ドメイン層が定義する store trait の具体的な実装。
//! HashMap / Vec をインメモリ DB として使用します。
//!
//! 各メソッドは単一の `tokio::sync::Mutex` の下で完結するため、
//! upsert / set-add / set-remove は呼び出し単位でアトミックです。
//!
//! ## 技術的負債
//!
//! 現在、ドメインモデルを直接ストレージとして使用しています。
//! ドキュメント DB (MongoDB 等) を実装する際は DB ドキュメント →
//! ドメインモデルの変換層が必要になります。

mod group;
mod identity;
mod message;

pub use group::InMemoryGroupStore;
pub use identity::InMemoryIdentityStore;
pub use message::InMemoryMessageStore;
