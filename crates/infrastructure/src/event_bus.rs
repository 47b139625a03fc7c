//! 进程内事件总线
//!
//! 基于有界的 `tokio::sync::mpsc`，只有一个消费者。通道满时 `publish` 等待，
//! 压力传回生产者，事件不会被丢弃。

use domain::{EventEnvelope, FederationEvent};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::trace;
use uuid::Uuid;

/// 总线的唯一接收端
pub type EventReceiver = mpsc::Receiver<EventEnvelope>;

#[derive(Debug, Error)]
pub enum EventBusError {
    #[error("failed to decode event: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("event bus closed")]
    Closed,
}

#[derive(Clone)]
pub struct LocalEventBus {
    sender: mpsc::Sender<EventEnvelope>,
}

impl LocalEventBus {
    /// 创建总线及其接收端；所有总线句柄释放后接收端读完剩余事件即结束
    pub fn channel(capacity: usize) -> (Self, EventReceiver) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }

    /// 发布事件，返回事件 id
    pub async fn publish(&self, event: FederationEvent) -> Result<Uuid, EventBusError> {
        self.publish_envelope(EventEnvelope::new(event)).await
    }

    /// 发布 `{"type": ..., "payload": ...}` 形式的 JSON 事件
    pub async fn publish_json(&self, raw: &str) -> Result<Uuid, EventBusError> {
        let event: FederationEvent = serde_json::from_str(raw)?;
        self.publish(event).await
    }

    pub async fn publish_envelope(&self, envelope: EventEnvelope) -> Result<Uuid, EventBusError> {
        let id = envelope.id;
        let topic = envelope.topic();
        self.sender
            .send(envelope)
            .await
            .map_err(|_| EventBusError::Closed)?;
        trace!(event_id = %id, topic, "event published");
        Ok(id)
    }
}
