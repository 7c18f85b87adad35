use log::info;

use crate::client::{JenkinsClient, NodeInfo};
use crate::error::Result;

/// Bulk actions supported by the node manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeAction {
    List,
    Disable,
    Enable,
    Delete,
}

impl NodeAction {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "list" => Some(Self::List),
            "disable" => Some(Self::Disable),
            "enable" => Some(Self::Enable),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// Options for one node-manager invocation.
#[derive(Debug, Clone)]
pub struct NodeManagerOptions {
    pub prefix: String,
    pub action: String,
}

/// One worker node's live state.
#[derive(Debug, Clone)]
pub struct NodeSummary {
    pub name: String,
    pub is_online: bool,
    pub is_temporarily_offline: bool,
    pub is_idle: bool,
}

impl NodeSummary {
    fn from_info(name: &str, info: &NodeInfo) -> Self {
        Self {
            name: name.to_string(),
            is_online: !info.offline,
            is_temporarily_offline: info.temporarily_offline,
            is_idle: info.idle,
        }
    }
}

/// Literal case-sensitive name-prefix match, no wildcard semantics.
fn filter_nodes(names: Vec<String>, prefix: &str) -> Vec<String> {
    names
        .into_iter()
        .filter(|name| name.starts_with(prefix))
        .collect()
}

pub async fn fetch_nodes(client: &JenkinsClient, prefix: &str) -> Result<Vec<String>> {
    let names = client.list_nodes().await?;
    Ok(filter_nodes(names, prefix))
}

async fn node_summary(client: &JenkinsClient, name: &str) -> Result<NodeSummary> {
    let info = client.node_info(name).await?;
    Ok(NodeSummary::from_info(name, &info))
}

/// Take every online node offline; nodes already offline are left untouched.
pub async fn disable_nodes(client: &JenkinsClient, nodes: &[String]) -> Result<Vec<String>> {
    let mut disabled = Vec::new();
    for name in nodes {
        let summary = node_summary(client, name).await?;
        if summary.is_online {
            println!("Disabling {name}");
            client.set_node_offline(name).await?;
            disabled.push(name.clone());
        }
    }
    Ok(disabled)
}

/// Bring temporarily-offline nodes back online. Permanently offline nodes are
/// left untouched.
pub async fn enable_nodes(client: &JenkinsClient, nodes: &[String]) -> Result<Vec<String>> {
    let mut enabled = Vec::new();
    for name in nodes {
        let summary = node_summary(client, name).await?;
        if summary.is_temporarily_offline {
            println!("Enabling {name}");
            client.set_node_online(name).await?;
            enabled.push(name.clone());
        }
    }
    Ok(enabled)
}

/// Remove idle nodes from the cluster; busy nodes are skipped silently.
pub async fn delete_nodes(client: &JenkinsClient, nodes: &[String]) -> Result<Vec<String>> {
    let mut deleted = Vec::new();
    for name in nodes {
        let summary = node_summary(client, name).await?;
        if summary.is_idle {
            println!("Deleting {name}");
            client.delete_node(name).await?;
            deleted.push(name.clone());
        }
    }
    Ok(deleted)
}

/// Full node-manager pipeline: fetch the filtered node names, then dispatch.
/// All feedback is line-oriented progress text; there is no report file.
pub async fn manage(client: &JenkinsClient, options: &NodeManagerOptions) -> Result<()> {
    let nodes = fetch_nodes(client, &options.prefix).await?;
    info!("Found {} nodes matching prefix {}", nodes.len(), options.prefix);

    match NodeAction::parse(&options.action) {
        Some(NodeAction::List) => {
            for name in &nodes {
                println!("Found node: {name}");
            }
        }
        Some(NodeAction::Disable) => {
            disable_nodes(client, &nodes).await?;
        }
        Some(NodeAction::Enable) => {
            enable_nodes(client, &nodes).await?;
        }
        Some(NodeAction::Delete) => {
            delete_nodes(client, &nodes).await?;
        }
        None => println!("Unknown action {}", options.action),
    }
    Ok(())
}
