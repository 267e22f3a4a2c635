use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::RepositoryError;
use super::models::{ItemEntity, ItemFields, StoreEntity, UserEntity};
use super::repositories::{ItemRepository, StoreRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, UserEntity>,
    items: BTreeMap<i64, ItemEntity>,
    stores: BTreeMap<i64, StoreEntity>,
    next_user_id: i64,
    next_item_id: i64,
    next_store_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// 内存存储，未配置 DATABASE_URL 时使用
///
/// 每张表的 id 从 1 开始，与新建的 BIGSERIAL 一致
#[derive(Default)]
pub struct MemoryDatabase {
    tables: RwLock<Tables>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryDatabase {
    async fn create(&self, username: &str, password: &str) -> Result<UserEntity, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == username) {
            return Err(RepositoryError::Conflict);
        }

        let user = UserEntity {
            id: next_id(&mut tables.next_user_id),
            username: username.to_string(),
            password: password.to_string(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserEntity>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, RepositoryError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.tables.write().await.users.remove(&id).is_some())
    }
}

#[async_trait]
impl ItemRepository for MemoryDatabase {
    async fn find_by_name(&self, name: &str) -> Result<Option<ItemEntity>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.items.values().find(|i| i.name == name).cloned())
    }

    async fn find_all(&self) -> Result<Vec<ItemEntity>, RepositoryError> {
        Ok(self.tables.read().await.items.values().cloned().collect())
    }

    async fn find_by_store(&self, store_id: i64) -> Result<Vec<ItemEntity>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .items
            .values()
            .filter(|i| i.store_id == store_id)
            .cloned()
            .collect())
    }

    async fn create(&self, name: &str, fields: ItemFields) -> Result<ItemEntity, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.items.values().any(|i| i.name == name) {
            return Err(RepositoryError::Conflict);
        }

        let item = ItemEntity {
            id: next_id(&mut tables.next_item_id),
            name: name.to_string(),
            price: fields.price,
            store_id: fields.store_id,
        };
        tables.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn upsert(&self, name: &str, fields: ItemFields) -> Result<ItemEntity, RepositoryError> {
        let mut tables = self.tables.write().await;
        if let Some(item) = tables.items.values_mut().find(|i| i.name == name) {
            item.price = fields.price;
            return Ok(item.clone());
        }

        let item = ItemEntity {
            id: next_id(&mut tables.next_item_id),
            name: name.to_string(),
            price: fields.price,
            store_id: fields.store_id,
        };
        tables.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn delete(&self, name: &str) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        let id = tables.items.values().find(|i| i.name == name).map(|i| i.id);
        Ok(id.and_then(|id| tables.items.remove(&id)).is_some())
    }
}

#[async_trait]
impl StoreRepository for MemoryDatabase {
    async fn find_by_name(&self, name: &str) -> Result<Option<StoreEntity>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.stores.values().find(|s| s.name == name).cloned())
    }

    async fn find_all(&self) -> Result<Vec<StoreEntity>, RepositoryError> {
        Ok(self.tables.read().await.stores.values().cloned().collect())
    }

    async fn create(&self, name: &str) -> Result<StoreEntity, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.stores.values().any(|s| s.name == name) {
            return Err(RepositoryError::Conflict);
        }

        let store = StoreEntity {
            id: next_id(&mut tables.next_store_id),
            name: name.to_string(),
        };
        tables.stores.insert(store.id, store.clone());
        Ok(store)
    }

    async fn delete(&self, name: &str) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        let id = tables.stores.values().find(|s| s.name == name).map(|s| s.id);
        Ok(id.and_then(|id| tables.stores.remove(&id)).is_some())
    }
}
