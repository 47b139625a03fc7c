use std::sync::Arc;

use application::{
    BridgeError, FederationBridge, FederationEventHandler, UserFederationEventHandler,
    UserFederationSender, UserFederationSenderDependencies,
};
use config::FederationConfig;
use thiserror::Error;

use crate::{
    consumer::FederationEventConsumer,
    directory::{InMemoryRoomDirectory, InMemoryUserDirectory},
    event_bus::{EventReceiver, LocalEventBus},
    file_store::InMemoryAvatarFileStore,
    matrix::{MatrixBridge, MatrixBridgeConfig},
    retry::RetryConfig,
    settings::ConfiguredFederationSettings,
};

#[derive(Debug, Error)]
pub enum InfrastructureError {
    #[error("bridge error: {0}")]
    Bridge(#[from] BridgeError),
}

/// 组装好的基础设施组件
pub struct Infrastructure {
    pub user_directory: Arc<InMemoryUserDirectory>,
    pub room_directory: Arc<InMemoryRoomDirectory>,
    pub avatar_file_store: Arc<InMemoryAvatarFileStore>,
    pub settings: Arc<ConfiguredFederationSettings>,
    pub bridge: Arc<dyn FederationBridge>,
    pub event_bus: LocalEventBus,
    pub retry: RetryConfig,
    event_receiver: Option<EventReceiver>,
}

impl Infrastructure {
    /// 使用 Matrix 桥接构建
    pub fn build(config: &FederationConfig) -> Result<Self, InfrastructureError> {
        let bridge = MatrixBridge::new(MatrixBridgeConfig::from(&config.matrix))?;
        Ok(Self::with_bridge(config, Arc::new(bridge)))
    }

    /// 使用给定的桥接构建，其余组件按配置创建
    pub fn with_bridge(config: &FederationConfig, bridge: Arc<dyn FederationBridge>) -> Self {
        let (event_bus, event_receiver) = LocalEventBus::channel(config.intake.channel_capacity);
        Self {
            user_directory: Arc::new(InMemoryUserDirectory::new()),
            room_directory: Arc::new(InMemoryRoomDirectory::new()),
            avatar_file_store: Arc::new(InMemoryAvatarFileStore::new()),
            settings: Arc::new(ConfiguredFederationSettings::from_config(config)),
            bridge,
            event_bus,
            retry: RetryConfig::from(&config.intake),
            event_receiver: Some(event_receiver),
        }
    }

    /// 取出总线的接收端，只能取一次
    pub fn take_event_receiver(&mut self) -> Option<EventReceiver> {
        self.event_receiver.take()
    }

    pub fn sender(&self) -> Arc<UserFederationSender> {
        Arc::new(UserFederationSender::new(UserFederationSenderDependencies {
            user_directory: self.user_directory.clone(),
            room_directory: self.room_directory.clone(),
            avatar_file_store: self.avatar_file_store.clone(),
            settings: self.settings.clone(),
            bridge: self.bridge.clone(),
        }))
    }

    pub fn event_handler(&self) -> Arc<dyn FederationEventHandler> {
        Arc::new(UserFederationEventHandler::new(self.sender()))
    }

    pub fn consumer(&self) -> FederationEventConsumer {
        FederationEventConsumer::new(self.event_handler(), self.retry.clone())
    }
}
