use std::future::Future;
use std::time::Duration;

use config::IntakeConfig;
use tokio::time::sleep;

#[derive(Clone, Debug, PartialEq)]
pub enum Backoff {
    Exponential { base: Duration },
}

impl Backoff {
    pub fn exponential(base: Duration) -> Self {
        Backoff::Exponential { base }
    }

    fn delay_at(&self, attempt: u32) -> Duration {
        match self {
            Backoff::Exponential { base } => {
                let exp = std::cmp::min(attempt.saturating_sub(1), 20);
                let factor = 1u32 << exp;
                base.saturating_mul(factor)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RetryConfig {
    /// 包含首次尝试
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl From<&IntakeConfig> for RetryConfig {
    fn from(config: &IntakeConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            backoff: Backoff::exponential(Duration::from_millis(config.retry_base_delay_ms)),
        }
    }
}

/// 重试 `op`，直到成功、错误不可重试或次数用尽
pub async fn retry_async<F, Fut, T, E, R>(config: &RetryConfig, is_retryable: R, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
{
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match op().await {
            Ok(v) => return Ok(v),
            Err(e) => {
                if attempt >= config.max_attempts || !is_retryable(&e) {
                    return Err(e);
                }
                sleep(config.backoff.delay_at(attempt)).await;
            }
        }
    }
}
