//! 联邦房间实体

use serde::{Deserialize, Serialize};

use crate::entities::federated_user::FederatedUser;
use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{ExternalId, InternalId, RoomType};

/// 联邦房间，本核心只读取不修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederatedRoom {
    external_id: ExternalId,
    internal_id: InternalId,
    owner: Option<FederatedUser>,
    room_type: RoomType,
    display_name: String,
}

impl FederatedRoom {
    pub fn new(
        external_id: ExternalId,
        internal_id: InternalId,
        owner: Option<FederatedUser>,
        room_type: RoomType,
        display_name: impl Into<String>,
    ) -> DomainResult<Self> {
        let display_name = display_name.into().trim().to_owned();
        if display_name.is_empty() {
            return Err(DomainError::validation_error(
                "room_display_name",
                "cannot be empty",
            ));
        }
        Ok(Self {
            external_id,
            internal_id,
            owner,
            room_type,
            display_name,
        })
    }

    pub fn external_id(&self) -> &ExternalId {
        &self.external_id
    }

    pub fn internal_id(&self) -> &InternalId {
        &self.internal_id
    }

    pub fn owner(&self) -> Option<&FederatedUser> {
        self.owner.as_ref()
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn can_be_federated(&self) -> bool {
        self.owner.is_some()
    }

    /// 引用房间创建者的桥接调用之前必须能解析出其外部 ID
    pub fn creator_external_id(&self) -> DomainResult<&ExternalId> {
        self.owner
            .as_ref()
            .map(FederatedUser::external_id)
            .ok_or_else(|| {
                DomainError::precondition(format!(
                    "room {} has no owner and cannot be federated",
                    self.internal_id
                ))
            })
    }
}
