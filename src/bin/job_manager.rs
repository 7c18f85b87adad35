use anyhow::Result;
use clap::Parser;
use jenkins_tools::cli::JobManagerCli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = JobManagerCli::parse();
    info!("Starting Jenkins job manager");
    cli.execute().await?;

    Ok(())
}
