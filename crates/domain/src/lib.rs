//! 联邦同步核心领域模型
//!
//! 包含联邦用户、联邦房间等实体，头像元数据等值对象，以及事件总线上的事件载荷。
//! 本层不做任何 I/O。

pub mod entities;
pub mod errors;
pub mod events;
pub mod value_objects;

// 重新导出常用类型
pub use entities::*;
pub use errors::*;
pub use events::*;
pub use value_objects::*;
