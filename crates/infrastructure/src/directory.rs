//! 内存中的用户目录与房间目录
//!
//! 本地存储适配器的参考实现，用于单机部署和测试。

use std::collections::HashMap;

use application::{DirectoryError, RoomDirectory, UserDirectory};
use async_trait::async_trait;
use domain::{ContentUrl, FederatedRoom, FederatedUser, InternalId};
use tokio::sync::RwLock;

/// 按本地用户名索引的用户目录
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, FederatedUser>>,
    avatar_urls: RwLock<HashMap<InternalId, ContentUrl>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入或替换用户
    pub async fn insert(&self, user: FederatedUser) {
        self.users
            .write()
            .await
            .insert(user.username().to_owned(), user);
    }

    /// 最近一次写回的头像地址
    pub async fn avatar_url(&self, internal_id: &InternalId) -> Option<ContentUrl> {
        self.avatar_urls.read().await.get(internal_id).cloned()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_internal_username(
        &self,
        username: &str,
    ) -> Result<Option<FederatedUser>, DirectoryError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn find_by_internal_id(&self, id: &str) -> Result<Option<FederatedUser>, DirectoryError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|user| user.internal_id().is_some_and(|internal| internal.as_str() == id))
            .cloned())
    }

    async fn record_avatar_url(
        &self,
        internal_id: &InternalId,
        url: &ContentUrl,
    ) -> Result<(), DirectoryError> {
        self.avatar_urls
            .write()
            .await
            .insert(internal_id.clone(), url.clone());
        Ok(())
    }
}

/// 按内部 ID 索引的房间目录
#[derive(Default)]
pub struct InMemoryRoomDirectory {
    rooms: RwLock<HashMap<String, FederatedRoom>>,
}

impl InMemoryRoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, room: FederatedRoom) {
        self.rooms
            .write()
            .await
            .insert(room.internal_id().as_str().to_owned(), room);
    }
}

#[async_trait]
impl RoomDirectory for InMemoryRoomDirectory {
    async fn find_by_internal_id(&self, id: &str) -> Result<Option<FederatedRoom>, DirectoryError> {
        Ok(self.rooms.read().await.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{ExternalId, LocalUserRecord, RoomType};

    fn alice() -> FederatedUser {
        FederatedUser::with_internal_reference(
            ExternalId::parse("@alice:example.org").unwrap(),
            false,
            LocalUserRecord::new(InternalId::parse("u1").unwrap(), "alice", "Alice"),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn users_are_found_by_username_and_internal_id() {
        let directory = InMemoryUserDirectory::new();
        directory.insert(alice()).await;

        let by_name = directory.find_by_internal_username("alice").await.unwrap();
        let by_id = directory.find_by_internal_id("u1").await.unwrap();

        assert_eq!(by_name, Some(alice()));
        assert_eq!(by_id, Some(alice()));
        assert_eq!(directory.find_by_internal_username("bob").await.unwrap(), None);
        assert_eq!(directory.find_by_internal_id("u2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn recording_avatar_url_overwrites() {
        let directory = InMemoryUserDirectory::new();
        let id = InternalId::parse("u1").unwrap();

        directory
            .record_avatar_url(&id, &ContentUrl::parse("mxc://a/1").unwrap())
            .await
            .unwrap();
        directory
            .record_avatar_url(&id, &ContentUrl::parse("mxc://a/2").unwrap())
            .await
            .unwrap();

        assert_eq!(
            directory.avatar_url(&id).await,
            Some(ContentUrl::parse("mxc://a/2").unwrap())
        );
    }

    #[tokio::test]
    async fn rooms_are_found_by_internal_id() {
        let directory = InMemoryRoomDirectory::new();
        let room = FederatedRoom::new(
            ExternalId::parse("!general:example.org").unwrap(),
            InternalId::parse("GENERAL").unwrap(),
            Some(alice()),
            RoomType::Channel,
            "general",
        )
        .unwrap();
        directory.insert(room.clone()).await;

        assert_eq!(directory.find_by_internal_id("GENERAL").await.unwrap(), Some(room));
        assert_eq!(directory.find_by_internal_id("random").await.unwrap(), None);
    }
}
