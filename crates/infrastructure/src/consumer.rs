//! 联邦事件消费者
//!
//! 从 [`LocalEventBus`](crate::LocalEventBus) 的接收端读取事件并交给 [`FederationEventHandler`]。
//! 事件按接收顺序逐个处理，同一用户的输入状态不会乱序；基础设施错误按
//! [`RetryConfig`] 重试整个事件，最终失败只记录日志，不影响后续事件。

use std::sync::Arc;

use application::{ApplicationError, FederationEventHandler, PipelineOutcome};
use domain::EventEnvelope;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::event_bus::EventReceiver;
use crate::retry::{retry_async, RetryConfig};

#[derive(Clone)]
pub struct FederationEventConsumer {
    handler: Arc<dyn FederationEventHandler>,
    retry: RetryConfig,
}

impl FederationEventConsumer {
    pub fn new(handler: Arc<dyn FederationEventHandler>, retry: RetryConfig) -> Self {
        Self { handler, retry }
    }

    /// 处理单个事件，可重试的错误按配置重试
    pub async fn process(
        &self,
        envelope: &EventEnvelope,
    ) -> Result<PipelineOutcome, ApplicationError> {
        let handler = self.handler.as_ref();
        let event = &envelope.event;
        let result = retry_async(&self.retry, ApplicationError::is_retryable, move || {
            handler.handle_event(event)
        })
        .await;

        match &result {
            Ok(outcome) => debug!(
                event_id = %envelope.id,
                topic = envelope.topic(),
                delivered = outcome.is_delivered(),
                "event processed"
            ),
            Err(e) => error!(
                event_id = %envelope.id,
                topic = envelope.topic(),
                error = %e,
                "failed to process event"
            ),
        }
        result
    }

    /// 消费直到收到关闭信号或总线关闭
    pub async fn run(
        &self,
        mut receiver: EventReceiver,
        mut shutdown: watch::Receiver<bool>,
    ) {
        info!("federation event consumer started");

        while !*shutdown.borrow() {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                received = receiver.recv() => match received {
                    Some(envelope) => {
                        // 失败已在 process 中记录
                        let _ = self.process(&envelope).await;
                    }
                    None => break,
                },
            }
        }

        info!("federation event consumer stopped");
    }
}
