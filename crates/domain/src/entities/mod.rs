//! 领域实体定义
//!
//! 联邦用户与联邦房间：本地实体、远端实体、或远端实体在本地的代理。

pub mod federated_room;
pub mod federated_user;

pub use federated_room::FederatedRoom;
pub use federated_user::{FederatedUser, LocalUserRecord, UserProfile};
