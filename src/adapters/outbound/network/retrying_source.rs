use crate::bundle_graph::domain::{BundleName, BundleRef};
use crate::ports::outbound::{BundleDataSource, Collected};
use crate::shared::error::GraphError;
use crate::shared::Result;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

/// RetryingDataSource wraps a BundleDataSource and retries transient failures.
///
/// Decorator over any data source: each round trip gets up to
/// `max_attempts` tries with a linear back-off. Authentication rejections
/// and other non-transport errors are returned immediately.
pub struct RetryingDataSource<S: BundleDataSource> {
    inner: S,
    max_attempts: u32,
    base_delay: Duration,
}

impl<S: BundleDataSource> RetryingDataSource<S> {
    pub fn new(inner: S, max_attempts: u32) -> Self {
        Self {
            inner,
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_millis(100),
        }
    }

    /// Overrides the back-off step (mainly for tests)
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    async fn with_retry<T, F, Fut>(&self, what: &str, mut call: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.max_attempts && is_transient(&e) => {
                    tracing::debug!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "retrying {}",
                        what
                    );
                    tokio::time::sleep(self.base_delay * attempt).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn is_transient(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<GraphError>()
        .is_some_and(GraphError::is_transient)
}

#[async_trait]
impl<S: BundleDataSource> BundleDataSource for RetryingDataSource<S> {
    fn describe(&self) -> String {
        self.inner.describe()
    }

    async fn list_bundles(&self) -> Result<Collected<BundleRef>> {
        self.with_retry("bundle listing", || self.inner.list_bundles())
            .await
    }

    async fn imports_of(&self, bundle: &BundleRef) -> Result<Collected<BundleName>> {
        self.with_retry(bundle.name().as_str(), || self.inner.imports_of(bundle))
            .await
    }

    async fn finish(&self) -> Result<()> {
        self.inner.finish().await
    }
}
