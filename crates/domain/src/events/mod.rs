//! 事件总线上的内部事件定义

pub mod federation_event;

// 重新导出事件类型
pub use federation_event::*;
