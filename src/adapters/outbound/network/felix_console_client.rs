use super::parsers::{parse_imported_package, parse_listing_entry};
use crate::bundle_graph::domain::{BundleName, BundleRef};
use crate::bundle_graph::policies::NamespaceFilter;
use crate::ports::outbound::{BundleDataSource, Collected};
use crate::shared::error::GraphError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

const BUNDLE_LIST_PATH: &str = "/system/console/bundles/.json";
const IMPORTED_PACKAGES_KEY: &str = "Imported Packages";

#[derive(Debug, Deserialize)]
struct BundleListResponse {
    #[serde(default)]
    data: Vec<ConsoleBundle>,
}

#[derive(Debug, Deserialize)]
struct ConsoleBundle {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default, rename = "symbolicName")]
    symbolic_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BundleDetailResponse {
    #[serde(default)]
    data: Vec<BundleDetail>,
}

#[derive(Debug, Deserialize)]
struct BundleDetail {
    #[serde(default)]
    props: Vec<BundleProperty>,
}

#[derive(Debug, Deserialize)]
struct BundleProperty {
    key: String,
    #[serde(default)]
    value: serde_json::Value,
}

/// Where and how to reach the Felix web console
#[derive(Debug, Clone)]
pub struct ConsoleEndpoint {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

/// FelixConsoleClient adapter for the web console's JSON endpoints
///
/// Implements the BundleDataSource port with authenticated GET requests:
/// one for the bundle list and one per bundle for its imported packages.
pub struct FelixConsoleClient {
    client: reqwest::Client,
    endpoint: ConsoleEndpoint,
    filter: NamespaceFilter,
}

impl FelixConsoleClient {
    pub fn new(endpoint: ConsoleEndpoint, filter: NamespaceFilter) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("bundle-graph/{}", version);
        let client = reqwest::Client::builder()
            .timeout(endpoint.timeout)
            .connect_timeout(endpoint.timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: ConsoleEndpoint {
                base_url: endpoint.base_url.trim_end_matches('/').to_string(),
                ..endpoint
            },
            filter,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint.base_url, path)
    }

    /// Per-bundle detail path, addressed by numeric id when the listing had one
    fn detail_path(bundle: &BundleRef) -> String {
        match bundle.id() {
            Some(id) => format!("/system/console/bundles/{}.json", id),
            None => format!(
                "/system/console/bundles/{}.json",
                urlencoding::encode(bundle.name().as_str())
            ),
        }
    }

    /// Issues an authenticated GET and returns the body text
    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .basic_auth(&self.endpoint.username, Some(&self.endpoint.password))
            .send()
            .await
            .map_err(|e| GraphError::transport(format!("GET {}", url), e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GraphError::AuthenticationRejected {
                url: url.to_string(),
            }
            .into());
        }
        if !status.is_success() {
            return Err(GraphError::transport(
                format!("GET {}", url),
                format!("console returned status code {}", status),
            )
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| GraphError::transport(format!("read response from {}", url), e))?;
        Ok(body)
    }

    fn parse_bundle_list(&self, body: &str) -> Collected<BundleRef> {
        let response: BundleListResponse = match serde_json::from_str(body) {
            Ok(response) => response,
            Err(e) => return Collected::malformed(BUNDLE_LIST_PATH, e),
        };

        Collected::from_outcomes(response.data.iter().map(|bundle| {
            let entry = bundle
                .symbolic_name
                .clone()
                .unwrap_or_else(|| format!("bundle #{}", bundle.id.unwrap_or_default()));
            (
                entry,
                parse_listing_entry(bundle.symbolic_name.as_deref(), bundle.id, &self.filter),
            )
        }))
    }

    fn parse_bundle_detail(&self, bundle: &BundleRef, body: &str) -> Collected<BundleName> {
        let response: BundleDetailResponse = match serde_json::from_str(body) {
            Ok(response) => response,
            Err(e) => return Collected::malformed(bundle.name().as_str(), e),
        };

        let Some(detail) = response.data.first() else {
            return Collected::malformed(bundle.name().as_str(), "response has no data entry");
        };

        let values: Vec<&str> = detail
            .props
            .iter()
            .find(|prop| prop.key == IMPORTED_PACKAGES_KEY)
            .and_then(|prop| prop.value.as_array())
            .map(|values| values.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default();

        Collected::from_outcomes(
            values
                .into_iter()
                .map(|value| (value, parse_imported_package(value, &self.filter))),
        )
    }
}

#[async_trait]
impl BundleDataSource for FelixConsoleClient {
    fn describe(&self) -> String {
        format!("Felix web console at {}", self.endpoint.base_url)
    }

    async fn list_bundles(&self) -> Result<Collected<BundleRef>> {
        let body = self.get_text(&self.url(BUNDLE_LIST_PATH)).await?;
        Ok(self.parse_bundle_list(&body))
    }

    async fn imports_of(&self, bundle: &BundleRef) -> Result<Collected<BundleName>> {
        let body = self.get_text(&self.url(&Self::detail_path(bundle))).await?;
        Ok(self.parse_bundle_detail(bundle, &body))
    }
}
