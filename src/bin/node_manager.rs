use anyhow::Result;
use clap::Parser;
use jenkins_tools::cli::NodeManagerCli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = NodeManagerCli::parse();
    info!("Starting Jenkins node manager");
    cli.execute().await?;

    Ok(())
}
