//! Matrix 桥接
//!
//! 以应用服务（Application Service）身份调用 homeserver 的 client-server API，
//! 通过 `user_id` 查询参数代表本地用户发起请求。

mod bridge;

pub use bridge::{MatrixBridge, MatrixBridgeConfig};
