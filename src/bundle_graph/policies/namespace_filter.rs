use crate::shared::Result;

/// Decides which bundles belong to the inspected project
///
/// Listing entries must carry the namespace prefix and must not end with
/// an excluded suffix. Import targets only need the namespace prefix, so
/// an import of an excluded bundle still shows up as a dangling node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceFilter {
    namespace: String,
    excluded_suffixes: Vec<String>,
}

impl NamespaceFilter {
    pub fn new(namespace: impl Into<String>, excluded_suffixes: Vec<String>) -> Result<Self> {
        let namespace = namespace.into();
        if namespace.trim().is_empty() {
            anyhow::bail!("Namespace prefix cannot be empty");
        }

        let excluded_suffixes = excluded_suffixes
            .into_iter()
            .filter(|suffix| !suffix.is_empty())
            .collect();

        Ok(Self {
            namespace,
            excluded_suffixes,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn excluded_suffixes(&self) -> &[String] {
        &self.excluded_suffixes
    }

    pub fn in_namespace(&self, name: &str) -> bool {
        name.starts_with(&self.namespace)
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_str()))
    }

    /// Whether a listed bundle becomes a node of the graph
    pub fn accepts_bundle(&self, name: &str) -> bool {
        self.in_namespace(name) && !self.is_excluded(name)
    }
}
