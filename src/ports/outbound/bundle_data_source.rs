use crate::bundle_graph::domain::{BundleName, BundleRef};
use crate::shared::Result;
use async_trait::async_trait;
use std::fmt;

/// Why a scraped entry was dropped during collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The entry does not have the expected shape
    NoMatch { expected: &'static str },
    /// The entry names a bundle outside the inspected namespace
    OutOfNamespace { name: String },
    /// The bundle carries an excluded suffix
    Excluded { name: String },
    /// A name was captured but is not a valid symbolic name
    InvalidName { name: String, details: String },
    /// A whole response body could not be decoded
    MalformedResponse { details: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoMatch { expected } => write!(f, "does not look like {}", expected),
            SkipReason::OutOfNamespace { name } => write!(f, "'{}' is outside the namespace", name),
            SkipReason::Excluded { name } => write!(f, "'{}' is excluded", name),
            SkipReason::InvalidName { name, details } => {
                write!(f, "invalid bundle name '{}': {}", name, details)
            }
            SkipReason::MalformedResponse { details } => {
                write!(f, "malformed response: {}", details)
            }
        }
    }
}

/// Result of parsing one scraped entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome<T> {
    Parsed(T),
    Skipped(SkipReason),
}

impl<T> ParseOutcome<T> {
    pub fn parsed(self) -> Option<T> {
        match self {
            ParseOutcome::Parsed(value) => Some(value),
            ParseOutcome::Skipped(_) => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ParseOutcome::Skipped(_))
    }
}

/// A scraped entry that did not make it into the result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub entry: String,
    pub reason: SkipReason,
}

/// Entries gathered from one data source response, plus what was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collected<T> {
    pub items: Vec<T>,
    pub skipped: Vec<SkippedEntry>,
}

impl<T> Default for Collected<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T> Collected<T> {
    /// Folds per-entry parse outcomes, keeping the first of any duplicates
    pub fn from_outcomes<I, E>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = (E, ParseOutcome<T>)>,
        E: Into<String>,
        T: PartialEq,
    {
        let mut collected = Self::default();
        for (entry, outcome) in outcomes {
            match outcome {
                ParseOutcome::Parsed(item) => {
                    if !collected.items.contains(&item) {
                        collected.items.push(item);
                    }
                }
                ParseOutcome::Skipped(reason) => collected.skipped.push(SkippedEntry {
                    entry: entry.into(),
                    reason,
                }),
            }
        }
        collected
    }

    /// A response that could not be decoded at all
    pub fn malformed(entry: impl Into<String>, details: impl fmt::Display) -> Self {
        Self {
            items: Vec::new(),
            skipped: vec![SkippedEntry {
                entry: entry.into(),
                reason: SkipReason::MalformedResponse {
                    details: details.to_string(),
                },
            }],
        }
    }
}

/// BundleDataSource port for acquiring dependency facts from a live server
///
/// Implementations scrape another system's human-oriented output. Entries
/// that cannot be parsed or fall outside the namespace are reported in
/// `Collected::skipped`; only transport-level problems become errors.
///
/// # Async Support
/// Implementations must be `Send + Sync` so per-bundle queries can be
/// issued concurrently.
#[async_trait]
pub trait BundleDataSource: Send + Sync {
    /// Human-readable description of where facts come from
    fn describe(&self) -> String;

    /// Lists every bundle of the inspected namespace
    ///
    /// # Errors
    /// Returns an error if the server cannot be reached or rejects the request
    async fn list_bundles(&self) -> Result<Collected<BundleRef>>;

    /// Lists the namespace bundles `bundle` imports packages from
    ///
    /// # Errors
    /// Returns an error if the server cannot be reached or rejects the request
    async fn imports_of(&self, bundle: &BundleRef) -> Result<Collected<BundleName>>;

    /// Releases any session held with the server
    async fn finish(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl<S: BundleDataSource + ?Sized> BundleDataSource for Box<S> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    async fn list_bundles(&self) -> Result<Collected<BundleRef>> {
        (**self).list_bundles().await
    }

    async fn imports_of(&self, bundle: &BundleRef) -> Result<Collected<BundleName>> {
        (**self).imports_of(bundle).await
    }

    async fn finish(&self) -> Result<()> {
        (**self).finish().await
    }
}
