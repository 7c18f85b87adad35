use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use url::Url;

use crate::config::Credentials;
use crate::error::{JenkinsError, Result};

/// Jenkins HTTP API client.
///
/// Wraps a single base URL and optional basic-auth credentials. Every
/// operation is one synchronous round-trip against the JSON (or config.xml)
/// API; there are no retries, so transport and authentication failures
/// propagate to the caller.
pub struct JenkinsClient {
    client: Client,
    base_url: Url,
    credentials: Credentials,
}

impl JenkinsClient {
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("jenkins-tools/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| JenkinsError::Config(format!("Failed to create HTTP client: {e}")))?;

        let mut base_url = Url::parse(base_url)?;
        // Url::join replaces the last path segment unless the base ends in '/'.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    fn auth_request(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(username) = &self.credentials.username {
            request.basic_auth(username, self.credentials.password.as_deref())
        } else {
            request
        }
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(JenkinsError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn get(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;
        let response = self.auth_request(self.client.get(url)).send().await?;
        Self::check_status(response).await
    }

    async fn post(&self, path: &str) -> Result<()> {
        let url = self.base_url.join(path)?;
        let response = self.auth_request(self.client.post(url)).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Fetch the top-level job listing.
    ///
    /// Container jobs (folders, multibranch pipelines) carry a nested `jobs`
    /// collection in their listing entry.
    pub async fn list_jobs(&self) -> Result<Vec<JobEntry>> {
        let response = self.get("api/json?tree=jobs[name,jobs[name]]").await?;
        let listing: JobListing = response.json().await?;
        Ok(listing.jobs)
    }

    pub async fn job_info(&self, name: &str) -> Result<JobInfo> {
        let response = self.get(&format!("job/{name}/api/json")).await?;
        Ok(response.json().await?)
    }

    pub async fn build_info(&self, name: &str, number: u32) -> Result<BuildInfo> {
        let response = self.get(&format!("job/{name}/{number}/api/json")).await?;
        Ok(response.json().await?)
    }

    pub async fn enable_job(&self, name: &str) -> Result<()> {
        self.post(&format!("job/{name}/enable")).await
    }

    pub async fn disable_job(&self, name: &str) -> Result<()> {
        self.post(&format!("job/{name}/disable")).await
    }

    /// Fetch a job's full configuration document as an opaque XML blob.
    pub async fn job_config(&self, name: &str) -> Result<String> {
        let response = self.get(&format!("job/{name}/config.xml")).await?;
        Ok(response.text().await?)
    }

    /// Fetch the names of all worker nodes in the cluster.
    pub async fn list_nodes(&self) -> Result<Vec<String>> {
        let response = self
            .get("computer/api/json?tree=computer[displayName]")
            .await?;
        let listing: ComputerListing = response.json().await?;
        Ok(listing.computer.into_iter().map(|c| c.display_name).collect())
    }

    pub async fn node_info(&self, name: &str) -> Result<NodeInfo> {
        let response = self.get(&format!("computer/{name}/api/json")).await?;
        Ok(response.json().await?)
    }

    /// Take an online node offline. The underlying endpoint is a toggle, so
    /// callers must check the node is online first.
    pub async fn set_node_offline(&self, name: &str) -> Result<()> {
        self.post(&format!("computer/{name}/toggleOffline")).await
    }

    /// Bring a temporarily-offline node back online. Same toggle endpoint as
    /// [`set_node_offline`](Self::set_node_offline).
    pub async fn set_node_online(&self, name: &str) -> Result<()> {
        self.post(&format!("computer/{name}/toggleOffline")).await
    }

    pub async fn delete_node(&self, name: &str) -> Result<()> {
        self.post(&format!("computer/{name}/doDelete")).await
    }
}

/// Response from the top-level job listing.
#[derive(Deserialize)]
struct JobListing {
    jobs: Vec<JobEntry>,
}

/// One entry of the top-level job listing.
#[derive(Debug, Clone, Deserialize)]
pub struct JobEntry {
    pub name: String,
    /// Present only for container jobs (folders, multibranch pipelines).
    #[serde(default)]
    pub jobs: Option<Vec<NestedJobRef>>,
}

impl JobEntry {
    /// Whether this entry is a pipeline container holding nested jobs.
    pub fn is_container(&self) -> bool {
        self.jobs.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NestedJobRef {
    pub name: String,
}

/// Live per-job info.
#[derive(Debug, Clone, Deserialize)]
pub struct JobInfo {
    /// Absent for multibranch pipelines, which have no single buildable toggle.
    #[serde(default)]
    pub buildable: Option<bool>,
    #[serde(default, rename = "labelExpression")]
    pub label_expression: Option<String>,
    #[serde(default, rename = "lastBuild")]
    pub last_build: Option<BuildRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildRef {
    pub number: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildInfo {
    /// Build start time in milliseconds since the epoch.
    pub timestamp: i64,
}

/// Response from the node listing.
#[derive(Deserialize)]
struct ComputerListing {
    computer: Vec<ComputerRef>,
}

#[derive(Deserialize)]
struct ComputerRef {
    #[serde(rename = "displayName")]
    display_name: String,
}

/// Live per-node state.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeInfo {
    pub offline: bool,
    #[serde(rename = "temporarilyOffline")]
    pub temporarily_offline: bool,
    pub idle: bool,
}
