use super::parsers::{parse_listing_line, parse_requirement_line};
use crate::bundle_graph::domain::{BundleName, BundleRef};
use crate::bundle_graph::policies::NamespaceFilter;
use crate::ports::outbound::{BundleDataSource, Collected};
use crate::shared::error::GraphError;
use crate::shared::Result;
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::timeout;

const LIST_COMMAND: &str = "ps -s";
const EXIT_COMMAND: &str = "exit";

// Telnet protocol bytes
const IAC: u8 = 255;
const SB: u8 = 250;
const SE: u8 = 240;

/// Where and how to reach the remote shell
#[derive(Debug, Clone)]
pub struct ShellEndpoint {
    /// `host:port`
    pub address: String,
    /// Prompt the shell prints when it is ready for the next command
    pub prompt: String,
    pub timeout: Duration,
}

/// An open line-oriented shell connection
struct ShellSession {
    stream: TcpStream,
}

/// ShellSessionClient adapter for the Felix remote shell (telnet)
///
/// Implements the BundleDataSource port over a single session that is
/// opened lazily and shared by all queries; commands are serialized.
pub struct ShellSessionClient {
    endpoint: ShellEndpoint,
    filter: NamespaceFilter,
    session: Mutex<Option<ShellSession>>,
}

impl ShellSessionClient {
    pub fn new(endpoint: ShellEndpoint, filter: NamespaceFilter) -> Self {
        Self {
            endpoint,
            filter,
            session: Mutex::new(None),
        }
    }

    async fn connect(&self) -> Result<ShellSession> {
        let address = &self.endpoint.address;
        let stream = timeout(self.endpoint.timeout, TcpStream::connect(address))
            .await
            .map_err(|_| GraphError::transport(format!("connect to shell at {}", address), "timed out"))?
            .map_err(|e| GraphError::transport(format!("connect to shell at {}", address), e))?;

        let mut session = ShellSession { stream };
        // discard the banner
        self.read_until_prompt(&mut session, "read shell banner").await?;
        tracing::debug!(address = %address, "shell session opened");
        Ok(session)
    }

    /// Sends one command and returns the response lines before the next prompt
    async fn execute(&self, command: &str) -> Result<Vec<String>> {
        let mut guard = self.session.lock().await;
        let mut session = match guard.take() {
            Some(session) => session,
            None => self.connect().await?,
        };

        let operation = format!("run `{}` on {}", command, self.endpoint.address);
        let line = format!("{}\n", command);
        timeout(self.endpoint.timeout, session.stream.write_all(line.as_bytes()))
            .await
            .map_err(|_| GraphError::transport(&operation, "timed out"))?
            .map_err(|e| GraphError::transport(&operation, e))?;

        // on error the session is dropped: its state is unknown
        let output = self.read_until_prompt(&mut session, &operation).await?;
        *guard = Some(session);

        Ok(output
            .lines()
            .map(|line| line.trim_end_matches('\r').to_string())
            .filter(|line| line.trim() != command)
            .collect())
    }

    async fn read_until_prompt(&self, session: &mut ShellSession, operation: &str) -> Result<String> {
        let prompt = self.endpoint.prompt.trim_end();
        let mut raw = Vec::new();
        let mut chunk = [0u8; 4096];

        loop {
            let n = timeout(self.endpoint.timeout, session.stream.read(&mut chunk))
                .await
                .map_err(|_| GraphError::transport(operation, "timed out waiting for the shell prompt"))?
                .map_err(|e| GraphError::transport(operation, e))?;
            if n == 0 {
                return Err(GraphError::transport(operation, "shell closed the connection").into());
            }
            raw.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&strip_telnet_commands(&raw)).into_owned();
            let trimmed = text.trim_end();
            // the prompt must start a line; "-> " also occurs inside requirement lines
            if let Some(body) = trimmed.strip_suffix(prompt) {
                if body.is_empty() || body.ends_with('\n') {
                    return Ok(body.to_string());
                }
            }
        }
    }
}

/// Removes telnet negotiation sequences from a raw byte stream
fn strip_telnet_commands(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] != IAC {
            out.push(raw[i]);
            i += 1;
            continue;
        }
        match raw.get(i + 1).copied() {
            Some(IAC) => {
                out.push(IAC);
                i += 2;
            }
            Some(SB) => {
                // skip to IAC SE
                let mut j = i + 2;
                while j + 1 < raw.len() && !(raw[j] == IAC && raw[j + 1] == SE) {
                    j += 1;
                }
                i = j + 2;
            }
            // WILL / WONT / DO / DONT carry an option byte
            Some(251..=254) => i += 3,
            Some(_) => i += 2,
            None => i += 1,
        }
    }
    out
}

#[async_trait]
impl BundleDataSource for ShellSessionClient {
    fn describe(&self) -> String {
        format!("Felix remote shell at {}", self.endpoint.address)
    }

    async fn list_bundles(&self) -> Result<Collected<BundleRef>> {
        let lines = self.execute(LIST_COMMAND).await?;
        Ok(Collected::from_outcomes(
            lines
                .iter()
                .filter(|line| !line.trim().is_empty())
                .map(|line| (line.as_str(), parse_listing_line(line, &self.filter))),
        ))
    }

    async fn imports_of(&self, bundle: &BundleRef) -> Result<Collected<BundleName>> {
        let Some(id) = bundle.id() else {
            return Err(GraphError::Validation {
                message: format!(
                    "bundle {} has no numeric id; the shell addresses bundles by id",
                    bundle.name()
                ),
            }
            .into());
        };

        let lines = self
            .execute(&format!("inspect package requirement {}", id))
            .await?;
        Ok(Collected::from_outcomes(
            lines
                .iter()
                .filter(|line| !line.trim().is_empty())
                .map(|line| (line.as_str(), parse_requirement_line(line, &self.filter))),
        ))
    }

    async fn finish(&self) -> Result<()> {
        let mut guard = self.session.lock().await;
        if let Some(mut session) = guard.take() {
            let line = format!("{}\n", EXIT_COMMAND);
            // best effort: the shell may already have hung up
            let _ = timeout(self.endpoint.timeout, session.stream.write_all(line.as_bytes())).await;
            let _ = session.stream.shutdown().await;
            tracing::debug!(address = %self.endpoint.address, "shell session closed");
        }
        Ok(())
    }
}
