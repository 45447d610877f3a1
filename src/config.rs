//! Configuration for bundle-graph runs.
//!
//! Provides YAML-based configuration through `bundle-graph.config.yml`
//! files and the resolved [`RunConfig`] handed to the adapters. Values are
//! layered: built-in defaults, then the config file, then CLI flags.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::bundle_graph::policies::NamespaceFilter;
use crate::shared::error::GraphError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "bundle-graph.config.yml";

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_HTTP_PORT: u16 = 8080;
const DEFAULT_SHELL_PORT: u16 = 6666;
const DEFAULT_NAMESPACE: &str = "org.sakaiproject.nakamura";
const DEFAULT_EXCLUDED_SUFFIX: &str = "uxloader";
const DEFAULT_PROMPT: &str = "-> ";
const DEFAULT_OUTPUT_DIR: &str = "graphviz";
const DEFAULT_STATS_FILE: &str = "stats.log";

/// Strategy used to collect dependency facts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Felix web console JSON endpoints
    Http,
    /// Felix remote shell over telnet
    Telnet,
}

/// What the renderer produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG images drawn by Graphviz `dot`
    Png,
    /// Graphviz DOT source files
    Dot,
}

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub source: Option<SourceKind>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub namespace: Option<String>,
    pub exclude_suffixes: Option<Vec<String>>,
    pub prompt: Option<String>,
    pub timeout_secs: Option<u64>,
    pub attempts: Option<u32>,
    pub concurrency: Option<usize>,
    pub output_dir: Option<PathBuf>,
    pub root_name: Option<String>,
    pub format: Option<ImageFormat>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.namespace.as_deref().is_some_and(|ns| ns.trim().is_empty()) {
        bail!(
            "Invalid config: namespace must not be empty.\n\n\
             💡 Hint: Use the common prefix of your project's bundles (e.g., \"org.sakaiproject.nakamura\")."
        );
    }
    if config.concurrency == Some(0) {
        bail!("Invalid config: concurrency must be at least 1.");
    }
    if config.attempts == Some(0) {
        bail!("Invalid config: attempts must be at least 1.");
    }
    if config.timeout_secs == Some(0) {
        bail!("Invalid config: timeout_secs must be at least 1.");
    }
    if config.prompt.as_deref().is_some_and(|p| p.trim().is_empty()) {
        bail!("Invalid config: prompt must not be blank.");
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Fully resolved settings of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub source: SourceKind,
    /// Host name, or a full base URL for the HTTP source
    pub host: String,
    /// Overrides the source's default port
    pub port: Option<u16>,
    pub username: String,
    pub password: String,
    pub namespace: String,
    pub excluded_suffixes: Vec<String>,
    pub prompt: String,
    pub timeout: Duration,
    pub attempts: u32,
    pub concurrency: usize,
    pub output_dir: PathBuf,
    /// Name of the full-graph image; defaults to the namespace
    pub root_name: Option<String>,
    pub format: ImageFormat,
    pub render_images: bool,
    pub stats_file: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Http,
            host: DEFAULT_HOST.to_string(),
            port: None,
            username: "admin".to_string(),
            password: "admin".to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            excluded_suffixes: vec![DEFAULT_EXCLUDED_SUFFIX.to_string()],
            prompt: DEFAULT_PROMPT.to_string(),
            timeout: Duration::from_secs(10),
            attempts: 3,
            concurrency: 8,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            root_name: None,
            format: ImageFormat::Png,
            render_images: true,
            stats_file: DEFAULT_STATS_FILE.to_string(),
        }
    }
}

impl RunConfig {
    /// Layers the values present in `file` over `self`
    pub fn merge_file(mut self, file: ConfigFile) -> Self {
        if let Some(source) = file.source {
            self.source = source;
        }
        if let Some(host) = file.host {
            self.host = host;
        }
        if file.port.is_some() {
            self.port = file.port;
        }
        if let Some(username) = file.username {
            self.username = username;
        }
        if let Some(password) = file.password {
            self.password = password;
        }
        if let Some(namespace) = file.namespace {
            self.namespace = namespace;
        }
        if let Some(suffixes) = file.exclude_suffixes {
            self.excluded_suffixes = suffixes;
        }
        if let Some(prompt) = file.prompt {
            self.prompt = prompt;
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(attempts) = file.attempts {
            self.attempts = attempts;
        }
        if let Some(concurrency) = file.concurrency {
            self.concurrency = concurrency;
        }
        if let Some(output_dir) = file.output_dir {
            self.output_dir = output_dir;
        }
        if file.root_name.is_some() {
            self.root_name = file.root_name;
        }
        if let Some(format) = file.format {
            self.format = format;
        }
        self
    }

    /// Checks values that CLI flags could have set to something unusable
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str, hint: &str| GraphError::InvalidConfiguration {
            message: message.to_string(),
            hint: hint.to_string(),
        };

        if self.namespace.trim().is_empty() {
            return Err(invalid(
                "namespace must not be empty",
                "Use the common prefix of your project's bundles",
            )
            .into());
        }
        if self.concurrency == 0 {
            return Err(invalid("concurrency must be at least 1", "Use --concurrency 1 for a sequential run").into());
        }
        if self.attempts == 0 {
            return Err(invalid("attempts must be at least 1", "Use --attempts 1 to disable retries").into());
        }
        if self.timeout.is_zero() {
            return Err(invalid("timeout must be at least 1 second", "Use --timeout 10").into());
        }
        if self.prompt.trim().is_empty() {
            return Err(invalid("prompt must not be blank", "The Felix remote shell prompt is \"-> \"").into());
        }
        if self.host_is_url() {
            if let Err(e) = reqwest::Url::parse(&self.host) {
                return Err(invalid(
                    &format!("host '{}' is not a valid URL: {}", self.host, e),
                    "Use a plain host name with --port, or a URL such as http://felix:8080",
                )
                .into());
            }
        }
        Ok(())
    }

    fn host_is_url(&self) -> bool {
        self.host.starts_with("http://") || self.host.starts_with("https://")
    }

    /// Base URL of the web console
    ///
    /// An explicit port replaces the one in a full URL host.
    pub fn http_base_url(&self) -> String {
        if !self.host_is_url() {
            return format!("http://{}:{}", self.host, self.port.unwrap_or(DEFAULT_HTTP_PORT));
        }
        match (reqwest::Url::parse(&self.host), self.port) {
            (Ok(mut url), Some(port)) => {
                if url.set_port(Some(port)).is_ok() {
                    url.as_str().trim_end_matches('/').to_string()
                } else {
                    self.host.trim_end_matches('/').to_string()
                }
            }
            _ => self.host.trim_end_matches('/').to_string(),
        }
    }

    /// `host:port` of the remote shell
    pub fn shell_address(&self) -> String {
        let host = self
            .host
            .trim_start_matches("http://")
            .trim_start_matches("https://")
            .split([':', '/'])
            .next()
            .unwrap_or(DEFAULT_HOST);
        format!("{}:{}", host, self.port.unwrap_or(DEFAULT_SHELL_PORT))
    }

    pub fn namespace_filter(&self) -> Result<NamespaceFilter> {
        NamespaceFilter::new(self.namespace.clone(), self.excluded_suffixes.clone())
    }

    pub fn root_name(&self) -> &str {
        self.root_name.as_deref().unwrap_or(&self.namespace)
    }
}
