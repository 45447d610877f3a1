use crate::shared::Result;
use std::borrow::Borrow;
use std::fmt;

/// Maximum length for bundle symbolic names (security limit)
const MAX_BUNDLE_NAME_LENGTH: usize = 255;

/// NewType wrapper for a bundle symbolic name with validation
///
/// The symbolic name is the graph key. Hashing and ordering follow the
/// underlying string so maps keyed by `BundleName` can be queried with `&str`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BundleName(String);

impl BundleName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();

        if name.is_empty() {
            anyhow::bail!("Bundle name cannot be empty");
        }

        if name.len() > MAX_BUNDLE_NAME_LENGTH {
            anyhow::bail!(
                "Bundle name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_BUNDLE_NAME_LENGTH
            );
        }

        // OSGi symbolic names are dotted tokens
        if !name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            anyhow::bail!(
                "Bundle name '{}' contains invalid characters. Only alphanumeric, hyphens, underscores and dots are allowed.",
                name
            );
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BundleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for BundleName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BundleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A bundle as reported by the live server
///
/// The numeric id is assigned by the server and only used to address
/// follow-up queries. It never participates in graph identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleRef {
    name: BundleName,
    id: Option<u64>,
}

impl BundleRef {
    pub fn new(name: BundleName, id: Option<u64>) -> Self {
        Self { name, id }
    }

    pub fn name(&self) -> &BundleName {
        &self.name
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }
}
