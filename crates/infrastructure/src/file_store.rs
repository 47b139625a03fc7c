//! 内存中的头像文件存储

use std::collections::HashMap;

use application::{AvatarFileStore, FileStoreError};
use async_trait::async_trait;
use domain::{AvatarFile, AvatarFileMetadata, AvatarMetadata, InternalId};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct StoredAvatar {
    file: AvatarFile,
    metadata: AvatarFileMetadata,
}

#[derive(Default)]
pub struct InMemoryAvatarFileStore {
    avatars: RwLock<HashMap<InternalId, StoredAvatar>>,
}

impl InMemoryAvatarFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put(&self, user_id: InternalId, file: AvatarFile, metadata: AvatarFileMetadata) {
        self.avatars
            .write()
            .await
            .insert(user_id, StoredAvatar { file, metadata });
    }
}

#[async_trait]
impl AvatarFileStore for InMemoryAvatarFileStore {
    async fn get_buffer(&self, user_id: &InternalId) -> Result<Option<AvatarFile>, FileStoreError> {
        Ok(self
            .avatars
            .read()
            .await
            .get(user_id)
            .map(|stored| stored.file.clone()))
    }

    async fn get_metadata(
        &self,
        user_id: &InternalId,
    ) -> Result<Option<AvatarFileMetadata>, FileStoreError> {
        // 只交出完整的元数据
        Ok(self
            .avatars
            .read()
            .await
            .get(user_id)
            .map(|stored| stored.metadata.clone())
            .filter(|metadata| AvatarMetadata::from_stored(metadata).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn partial_metadata_is_reported_as_absent() {
        let store = InMemoryAvatarFileStore::new();
        let id = InternalId::parse("u1").unwrap();
        store
            .put(
                id.clone(),
                AvatarFile::new(vec![0x89, 0x50]),
                AvatarFileMetadata::new(Some("image/png".into()), None),
            )
            .await;

        assert_eq!(
            store.get_buffer(&id).await.unwrap(),
            Some(AvatarFile::new(vec![0x89, 0x50]))
        );
        assert_eq!(store.get_metadata(&id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn complete_metadata_is_returned() {
        let store = InMemoryAvatarFileStore::new();
        let id = InternalId::parse("u1").unwrap();
        let metadata = AvatarFileMetadata::new(Some("image/png".into()), Some("a.png".into()));
        store.put(id.clone(), AvatarFile::default(), metadata.clone()).await;

        assert_eq!(store.get_metadata(&id).await.unwrap(), Some(metadata));
        assert_eq!(
            store.get_buffer(&InternalId::parse("u2").unwrap()).await.unwrap(),
            None
        );
    }
}
