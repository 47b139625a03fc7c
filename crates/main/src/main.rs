//! 联邦同步服务入口
//!
//! 从标准输入逐行读取 JSON 事件（`{"type": ..., "payload": ...}`）发布到进程内总线，
//! 由消费者同步到 Matrix homeserver。输入结束或收到 Ctrl-C 时退出。

use anyhow::Context;
use config::FederationConfig;
use infrastructure::{EventBusError, Infrastructure, LocalEventBus};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = FederationConfig::load()?;

    // RUST_LOG 优先于配置文件
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .init();

    tracing::info!(config = %config.sanitize(), "configuration loaded");

    let mut infrastructure = Infrastructure::build(&config)?;
    let receiver = infrastructure
        .take_event_receiver()
        .context("event receiver already taken")?;
    let consumer = infrastructure.consumer();
    // 只保留读取任务持有的总线句柄，输入结束时通道随之关闭
    let bus = infrastructure.event_bus;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let consumer_task = tokio::spawn(async move { consumer.run(receiver, shutdown_rx).await });

    tokio::select! {
        result = read_events(bus) => result?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("received Ctrl-C, shutting down");
            let _ = shutdown_tx.send(true);
        }
    }

    // 总线关闭后消费者处理完剩余事件再退出
    consumer_task.await?;
    Ok(())
}

/// 读取标准输入直到结束；返回时总线随之关闭
async fn read_events(bus: LocalEventBus) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match bus.publish_json(line).await {
            Ok(event_id) => tracing::debug!(%event_id, "event published"),
            Err(EventBusError::Decode(e)) => {
                tracing::warn!(error = %e, "skipping undecodable event")
            }
            Err(e) => return Err(e.into()),
        }
    }
    tracing::info!("input closed, draining pending events");
    Ok(())
}
