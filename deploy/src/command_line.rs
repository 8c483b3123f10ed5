use std::{io, path::PathBuf, time::Duration};

use anyhow::Result;
use clap::Parser;

use crate::{
    config::DeploymentRequest,
    contracts::ArtifactStore,
    deploy::{run, Deploy, DeployOptions},
};

/// Deploys the WANNABENFT contract from its Hardhat artifact.
#[derive(Debug, Parser)]
pub struct CommandLine {
    #[clap(short, long, env = "RPC_URL", default_value = "http://127.0.0.1:8545")]
    rpc: String,

    #[clap(long, env = "PRIVATE_KEY", hide_env_values = true)]
    sk: String,

    /// Hardhat artifacts directory.
    #[clap(short, long, default_value = "artifacts")]
    artifacts: PathBuf,

    /// JSON file with `contract` and `args` to deploy instead of the defaults.
    #[clap(short, long)]
    deployment: Option<PathBuf>,

    #[clap(short, long)]
    contract: Option<String>,

    /// Constructor argument, repeat in constructor order.
    #[clap(long = "arg")]
    args: Vec<String>,

    #[clap(long)]
    legacy: bool,

    #[clap(long, default_value_t = 1)]
    confirmations: usize,

    #[clap(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    poll_interval_ms: u64,
}

impl CommandLine {
    pub async fn execute(self) -> Result<()> {
        let request = self.request()?;
        let store = ArtifactStore::new(&self.artifacts);
        let deploy = Deploy::new(
            &self.rpc,
            &self.sk,
            DeployOptions {
                legacy: self.legacy,
                confirmations: self.confirmations,
                poll_interval: Duration::from_millis(self.poll_interval_ms),
            },
        )
        .await?;

        run(&store, &deploy, &request, &mut io::stdout()).await?;
        Ok(())
    }

    fn request(&self) -> Result<DeploymentRequest> {
        let request = match &self.deployment {
            Some(path) => DeploymentRequest::from_file(path)?,
            None => DeploymentRequest::default(),
        };
        Ok(request.with_overrides(self.contract.clone(), self.args.clone()))
    }
}
