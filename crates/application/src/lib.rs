//! 应用层实现。
//!
//! 定义联邦同步所依赖的端口（用户目录、房间目录、头像文件存储、联邦设置）
//! 与联邦桥接契约，并提供把内部事件映射到联邦网络的用例服务。

pub mod bridge;
pub mod directory;
pub mod error;
pub mod file_store;
pub mod intake;
pub mod pipeline;
pub mod services;
pub mod settings;

pub use bridge::{BridgeError, FederationBridge};
pub use directory::{DirectoryError, RoomDirectory, UserDirectory};
pub use error::ApplicationError;
pub use file_store::{AvatarFileStore, FileStoreError};
pub use intake::{FederationEventHandler, UserFederationEventHandler};
pub use pipeline::{PipelineOutcome, Step, StopReason};
pub use services::{UserFederationSender, UserFederationSenderDependencies};
pub use settings::FederationSettings;
