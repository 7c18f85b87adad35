use anyhow::Result;
use clap::Parser;
use log::info;

use crate::client::JenkinsClient;
use crate::config::Settings;
use crate::confirm::StdinConfirmer;
use crate::jobs::{self, JobManagerOptions};
use crate::nodes::{self, NodeManagerOptions};

#[derive(Parser)]
#[command(name = "job-manager")]
#[command(author, version, about = "Manage Jenkins jobs through the HTTP API", long_about = None)]
pub struct JobManagerCli {
    /// Jenkins server URL
    url: String,

    /// Job name prefix; `*` matches everything, anything else is a
    /// case-insensitive regular expression anchored at the name start
    #[arg(long, default_value = "*")]
    prefix: String,

    /// Action to apply: list, disable, enable or backup
    #[arg(long, default_value = "list")]
    action: String,

    /// Include pipeline container jobs in the candidate set
    #[arg(long)]
    include_pipelines: bool,

    /// Include disabled jobs in the listing
    #[arg(long)]
    include_disabled: bool,

    /// Write the YAML report to a file instead of standard output
    #[arg(long)]
    file_output: bool,
}

impl JobManagerCli {
    pub async fn execute(&self) -> Result<()> {
        info!("Managing jobs on {}", self.url);

        let settings = Settings::from_env();
        let client = JenkinsClient::new(&self.url, settings.credentials.clone())?;
        let options = JobManagerOptions {
            prefix: self.prefix.clone(),
            action: self.action.clone(),
            include_pipelines: self.include_pipelines,
            include_disabled: self.include_disabled,
            file_output: self.file_output,
        };

        jobs::manage(&client, &settings, &options, &StdinConfirmer).await?;
        Ok(())
    }
}

#[derive(Parser)]
#[command(name = "node-manager")]
#[command(author, version, about = "Manage Jenkins nodes through the HTTP API", long_about = None)]
pub struct NodeManagerCli {
    /// Jenkins server URL
    url: String,

    /// Node name prefix (literal, case-sensitive)
    prefix: String,

    /// Action to apply: list, disable, enable or delete
    #[arg(long, default_value = "list")]
    action: String,
}

impl NodeManagerCli {
    pub async fn execute(&self) -> Result<()> {
        info!("Managing nodes on {}", self.url);

        let settings = Settings::from_env();
        let client = JenkinsClient::new(&self.url, settings.credentials.clone())?;
        let options = NodeManagerOptions {
            prefix: self.prefix.clone(),
            action: self.action.clone(),
        };

        nodes::manage(&client, &options).await?;
        Ok(())
    }
}
