use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{ImageFormat, RunConfig, SourceKind};

/// Reconstruct the bundle dependency graph of a running OSGi server
#[derive(Parser, Debug)]
#[command(name = "bundle-graph")]
#[command(version)]
#[command(
    about = "Reconstruct the bundle dependency graph of a running OSGi server",
    long_about = "Collects import relations from the Felix web console or remote shell, \
                  draws the full graph and a focus view per bundle, and writes fan-in / \
                  fan-out statistics."
)]
pub struct Args {
    /// Where dependency facts come from: http (web console) or telnet (remote shell)
    #[arg(short, long, value_enum)]
    pub source: Option<SourceKind>,

    /// Server host name, or the full console base URL for the http source
    #[arg(long)]
    pub host: Option<String>,

    /// Server port (default: 8080 for http, 6666 for telnet)
    #[arg(long)]
    pub port: Option<u16>,

    /// Web console user name
    #[arg(short, long)]
    pub user: Option<String>,

    /// Web console password
    #[arg(long)]
    pub password: Option<String>,

    /// Symbolic-name prefix of the project's bundles
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Drop bundles whose name ends with this suffix.
    /// Can be specified multiple times: -x uxloader -x testing
    #[arg(short = 'x', long = "exclude-suffix", value_name = "SUFFIX")]
    pub exclude_suffix: Vec<String>,

    /// Remote shell prompt (telnet source)
    #[arg(long)]
    pub prompt: Option<String>,

    /// Directory for images and the statistics file
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// File name (without extension) of the full-graph image
    #[arg(long, value_name = "NAME")]
    pub root_name: Option<String>,

    /// Image format: png (rendered with Graphviz) or dot (DOT source)
    #[arg(short, long, value_enum)]
    pub format: Option<ImageFormat>,

    /// Maximum number of concurrent queries and renders
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub concurrency: Option<u32>,

    /// Connect and read timeout in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Attempts per data source round trip before giving up
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub attempts: Option<u32>,

    /// Only write the statistics table
    #[arg(long)]
    pub no_images: bool,

    /// Path to config file (default: auto-discover bundle-graph.config.yml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Layers the flags that were given over `config`
    pub fn merge_into(self, mut config: RunConfig) -> RunConfig {
        if let Some(source) = self.source {
            config.source = source;
        }
        if let Some(host) = self.host {
            config.host = host;
        }
        if self.port.is_some() {
            config.port = self.port;
        }
        if let Some(user) = self.user {
            config.username = user;
        }
        if let Some(password) = self.password {
            config.password = password;
        }
        if let Some(namespace) = self.namespace {
            config.namespace = namespace;
        }
        if !self.exclude_suffix.is_empty() {
            config.excluded_suffixes = self.exclude_suffix;
        }
        if let Some(prompt) = self.prompt {
            config.prompt = prompt;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if self.root_name.is_some() {
            config.root_name = self.root_name;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency as usize;
        }
        if let Some(secs) = self.timeout {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(attempts) = self.attempts {
            config.attempts = attempts;
        }
        if self.no_images {
            config.render_images = false;
        }
        config
    }
}
