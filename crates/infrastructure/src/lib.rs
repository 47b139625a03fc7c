//! 基础设施层实现。
//!
//! 提供目录与文件存储的内存适配器、基于配置的联邦设置、Matrix 桥接、
//! 进程内事件总线与事件消费者，实现应用层定义的接口。

pub mod builder;
pub mod consumer;
pub mod directory;
pub mod event_bus;
pub mod file_store;
pub mod matrix;
pub mod retry;
pub mod settings;

pub use builder::{Infrastructure, InfrastructureError};
pub use consumer::FederationEventConsumer;
pub use directory::{InMemoryRoomDirectory, InMemoryUserDirectory};
pub use event_bus::{EventBusError, EventReceiver, LocalEventBus};
pub use file_store::InMemoryAvatarFileStore;
pub use matrix::{MatrixBridge, MatrixBridgeConfig};
pub use retry::{retry_async, Backoff, RetryConfig};
pub use settings::ConfiguredFederationSettings;
