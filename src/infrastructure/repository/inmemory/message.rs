use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{GroupName, MessageStore, StoreError, StoredMessage};

/// インメモリ Message store 実装（追記専用）
#[derive(Default)]
pub struct InMemoryMessageStore {
    /// 追記順のメッセージログ
    messages: Mutex<Vec<StoredMessage>>,
}

impl InMemoryMessageStore {
    /// 新しい InMemoryMessageStore を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存済みメッセージ数を取得
    pub async fn count_messages(&self) -> usize {
        let messages = self.messages.lock().await;
        messages.len()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(&self, message: StoredMessage) -> Result<(), StoreError> {
        let mut messages = self.messages.lock().await;
        messages.push(message);
        Ok(())
    }

    async fn list_by_room(&self, room: &GroupName) -> Result<Vec<StoredMessage>, StoreError> {
        let messages = self.messages.lock().await;
        Ok(messages
            .iter()
            .filter(|m| &m.room == room)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageContent, Timestamp, UserName};

    fn message(room: &str, content: &str, at: i64) -> StoredMessage {
        StoredMessage::new(
            MessageContent::new(content.to_string()).unwrap(),
            UserName::new("alice".to_string()).unwrap(),
            GroupName::new(room.to_string()).unwrap(),
            false,
            Timestamp::new(at),
        )
    }

    #[tokio::test]
    async fn test_append_and_list_by_room() {
        // テスト項目: メッセージは追記順でルームごとに取得できる
        // given (前提条件):
        let store = InMemoryMessageStore::new();
        store.append(message("book-club", "first", 1)).await.unwrap();
        store.append(message("film-club", "other", 2)).await.unwrap();
        store.append(message("book-club", "second", 3)).await.unwrap();

        // when (操作):
        let room = GroupName::new("book-club".to_string()).unwrap();
        let listed = store.list_by_room(&room).await.unwrap();

        // then (期待する結果): book-club のメッセージのみ、追記順
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].content.as_str(), "first");
        assert_eq!(listed[1].content.as_str(), "second");
    }

    #[tokio::test]
    async fn test_list_by_room_empty() {
        // テスト項目: メッセージのないルームは空リストを返す
        // given (前提条件):
        let store = InMemoryMessageStore::new();

        // when (操作):
        let room = GroupName::new("book-club".to_string()).unwrap();
        let listed = store.list_by_room(&room).await.unwrap();

        // then (期待する結果):
        assert!(listed.is_empty());
    }
}
