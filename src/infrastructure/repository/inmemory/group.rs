use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Group, GroupName, GroupStore, StoreError, UserName};

/// インメモリ Group store 実装
#[derive(Default)]
pub struct InMemoryGroupStore {
    /// グループ名をキーとするレコード
    groups: Mutex<HashMap<String, Group>>,
}

impl InMemoryGroupStore {
    /// 新しい InMemoryGroupStore を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// グループ数を取得
    pub async fn count_groups(&self) -> usize {
        let groups = self.groups.lock().await;
        groups.len()
    }
}

#[async_trait]
impl GroupStore for InMemoryGroupStore {
    async fn create_group(&self, group: Group) -> Result<Group, StoreError> {
        let mut groups = self.groups.lock().await;
        let key = group.name.as_str().to_string();
        if groups.contains_key(&key) {
            return Err(StoreError::DuplicateGroup(key));
        }
        groups.insert(key, group.clone());
        Ok(group)
    }

    async fn find_group(&self, name: &GroupName) -> Result<Option<Group>, StoreError> {
        let groups = self.groups.lock().await;
        Ok(groups.get(name.as_str()).cloned())
    }

    async fn add_member(
        &self,
        group: &GroupName,
        member: &UserName,
    ) -> Result<(), StoreError> {
        let mut groups = self.groups.lock().await;
        // 存在しないグループへの追加は no-op（弱い参照整合性）
        if let Some(g) = groups.get_mut(group.as_str()) {
            g.insert_member(member.clone());
        }
        Ok(())
    }

    async fn remove_member(
        &self,
        group: &GroupName,
        member: &UserName,
    ) -> Result<(), StoreError> {
        let mut groups = self.groups.lock().await;
        if let Some(g) = groups.get_mut(group.as_str()) {
            g.remove_member(member);
        }
        Ok(())
    }
}
