//! Math typesetting capability and readiness coordination.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tokio::time::{sleep, timeout};

use crate::config::ViewerConfig;
use crate::error::TypesetError;

/// External math engine.
///
/// `typeset` must be idempotent: the viewer may submit the same markup more
/// than once (every flip re-typesets the revealed face).
#[async_trait]
pub trait Typesetter: Send + Sync {
    /// Resolves once the engine can accept work. Returns
    /// [`TypesetError::NotInitialized`] while the engine is still booting.
    async fn ready(&self) -> Result<(), TypesetError>;

    /// Typeset the math in `markup`, returning the rendered markup.
    async fn typeset(&self, markup: &str) -> Result<String, TypesetError>;
}

/// Used when the host page has no math engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTypesetter;

#[async_trait]
impl Typesetter for PassthroughTypesetter {
    async fn ready(&self) -> Result<(), TypesetError> {
        Ok(())
    }

    async fn typeset(&self, markup: &str) -> Result<String, TypesetError> {
        Ok(markup.to_string())
    }
}

/// Gates typeset requests on the engine's readiness signal.
///
/// Readiness is awaited once and remembered. While the engine reports
/// `NotInitialized` the wait is retried with capped exponential backoff,
/// up to `ready_attempts` times.
pub struct TypesetCoordinator {
    engine: Arc<dyn Typesetter>,
    ready: OnceCell<()>,
    config: ViewerConfig,
}

impl TypesetCoordinator {
    pub fn new(engine: Arc<dyn Typesetter>, config: ViewerConfig) -> Self {
        Self {
            engine,
            ready: OnceCell::new(),
            config,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready.initialized()
    }

    /// Wait until the engine can accept work.
    pub async fn await_ready(&self) -> Result<(), TypesetError> {
        self.ready
            .get_or_try_init(|| self.wait_for_engine())
            .await
            .map(|_| ())
    }

    /// Typeset `markup` once the engine is ready.
    pub async fn typeset(&self, markup: &str) -> Result<String, TypesetError> {
        self.await_ready().await?;
        timeout(self.config.typeset_timeout(), self.engine.typeset(markup))
            .await
            .map_err(|_| TypesetError::Timeout)?
    }

    async fn wait_for_engine(&self) -> Result<(), TypesetError> {
        let attempts = self.config.ready_attempts.max(1);
        for attempt in 0..attempts {
            match timeout(self.config.ready_timeout(), self.engine.ready()).await {
                Ok(Ok(())) => {
                    tracing::debug!(attempt, "Typesetting engine ready");
                    return Ok(());
                }
                Ok(Err(TypesetError::NotInitialized)) => {
                    if attempt + 1 < attempts {
                        let delay = self.config.ready_backoff(attempt);
                        tracing::debug!(attempt, ?delay, "Typesetting engine not initialized, retrying");
                        sleep(delay).await;
                    }
                }
                Ok(Err(e)) => return Err(e),
                Err(_) => return Err(TypesetError::Timeout),
            }
        }
        Err(TypesetError::NotInitialized)
    }
}
