use async_trait::async_trait;
use bundle_graph::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory BundleDataSource for testing
///
/// Serves a fixed bundle -> imports table. Raw noise lines are reported
/// as skipped entries of the listing, the way the scraping adapters do.
#[derive(Default, Clone)]
pub struct MockBundleDataSource {
    bundles: Vec<(String, Vec<String>)>,
    noise: Vec<String>,
    failing_bundle: Option<String>,
    queries: Arc<AtomicUsize>,
    finished: Arc<AtomicBool>,
}

impl MockBundleDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bundle(mut self, bundle: &str, imports: &[&str]) -> Self {
        self.bundles.push((
            bundle.to_string(),
            imports.iter().map(|i| i.to_string()).collect(),
        ));
        self
    }

    pub fn with_noise_line(mut self, line: &str) -> Self {
        self.noise.push(line.to_string());
        self
    }

    /// Queries for `bundle` fail with a transport error
    pub fn with_failure_on(mut self, bundle: &str) -> Self {
        self.failing_bundle = Some(bundle.to_string());
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn was_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BundleDataSource for MockBundleDataSource {
    fn describe(&self) -> String {
        "in-memory bundles".to_string()
    }

    async fn list_bundles(&self) -> Result<Collected<BundleRef>> {
        let mut collected = Collected::default();
        for (id, (bundle, _)) in self.bundles.iter().enumerate() {
            collected
                .items
                .push(BundleRef::new(BundleName::new(bundle.as_str())?, Some(id as u64)));
        }
        for line in &self.noise {
            collected.skipped.push(SkippedEntry {
                entry: line.clone(),
                reason: SkipReason::NoMatch {
                    expected: "a bundle listing line",
                },
            });
        }
        Ok(collected)
    }

    async fn imports_of(&self, bundle: &BundleRef) -> Result<Collected<BundleName>> {
        self.queries.fetch_add(1, Ordering::SeqCst);

        if self.failing_bundle.as_deref() == Some(bundle.name().as_str()) {
            return Err(GraphError::transport(
                format!("inspect {}", bundle.name()),
                "connection reset by peer",
            )
            .into());
        }

        let mut collected = Collected::default();
        if let Some((_, imports)) = self.bundles.iter().find(|(b, _)| b == bundle.name().as_str()) {
            for import in imports {
                collected.items.push(BundleName::new(import.as_str())?);
            }
        }
        Ok(collected)
    }

    async fn finish(&self) -> Result<()> {
        self.finished.store(true, Ordering::SeqCst);
        Ok(())
    }
}
