use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Age, IdentityStore, StoreError, Timestamp, User, UserName};

/// インメモリ Identity store 実装
#[derive(Default)]
pub struct InMemoryIdentityStore {
    /// ユーザー名をキーとするレコード
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryIdentityStore {
    /// 新しい InMemoryIdentityStore を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録済みユーザー数を取得
    pub async fn count_users(&self) -> usize {
        let users = self.users.lock().await;
        users.len()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn upsert_user(
        &self,
        name: UserName,
        age: Age,
        now: Timestamp,
    ) -> Result<User, StoreError> {
        let mut users = self.users.lock().await;
        let user = users
            .entry(name.as_str().to_string())
            .and_modify(|u| {
                u.age = age;
                u.last_active = now;
            })
            .or_insert_with(|| User::new(name, age, now));
        Ok(user.clone())
    }

    async fn touch_last_active(
        &self,
        name: &UserName,
        now: Timestamp,
    ) -> Result<(), StoreError> {
        let mut users = self.users.lock().await;
        let user = users
            .get_mut(name.as_str())
            .ok_or_else(|| StoreError::UserNotFound(name.as_str().to_string()))?;
        user.last_active = now;
        Ok(())
    }

    async fn find_user(&self, name: &UserName) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().await;
        Ok(users.get(name.as_str()).cloned())
    }
}
