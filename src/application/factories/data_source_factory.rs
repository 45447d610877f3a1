use crate::adapters::outbound::network::{
    ConsoleEndpoint, FelixConsoleClient, RetryingDataSource, ShellEndpoint, ShellSessionClient,
};
use crate::config::{RunConfig, SourceKind};
use crate::ports::outbound::BundleDataSource;
use crate::shared::Result;

/// Factory for creating the configured BundleDataSource
///
/// Every source comes wrapped in the retry decorator; `attempts == 1`
/// makes the decorator a pass-through.
pub struct DataSourceFactory;

impl DataSourceFactory {
    /// Creates a data source for the given run configuration
    ///
    /// # Errors
    /// Returns an error if the namespace is invalid or the HTTP client
    /// cannot be built
    pub fn create(config: &RunConfig) -> Result<Box<dyn BundleDataSource>> {
        let filter = config.namespace_filter()?;

        let source: Box<dyn BundleDataSource> = match config.source {
            SourceKind::Http => {
                let endpoint = ConsoleEndpoint {
                    base_url: config.http_base_url(),
                    username: config.username.clone(),
                    password: config.password.clone(),
                    timeout: config.timeout,
                };
                Box::new(RetryingDataSource::new(
                    FelixConsoleClient::new(endpoint, filter)?,
                    config.attempts,
                ))
            }
            SourceKind::Telnet => {
                let endpoint = ShellEndpoint {
                    address: config.shell_address(),
                    prompt: config.prompt.clone(),
                    timeout: config.timeout,
                };
                Box::new(RetryingDataSource::new(
                    ShellSessionClient::new(endpoint, filter),
                    config.attempts,
                ))
            }
        };

        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_http_source() {
        let source = DataSourceFactory::create(&RunConfig::default()).unwrap();
        assert!(source.describe().contains("http://localhost:8080"));
    }

    #[test]
    fn test_create_telnet_source() {
        let config = RunConfig {
            source: SourceKind::Telnet,
            host: "felix.internal".to_string(),
            ..RunConfig::default()
        };
        let source = DataSourceFactory::create(&config).unwrap();
        assert!(source.describe().contains("felix.internal:6666"));
    }

    #[test]
    fn test_create_rejects_empty_namespace() {
        let config = RunConfig {
            namespace: String::new(),
            ..RunConfig::default()
        };
        assert!(DataSourceFactory::create(&config).is_err());
    }
}
