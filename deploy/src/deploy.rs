use std::{io::Write, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use ethers::{
    abi::Token,
    contract::ContractFactory,
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::H160,
    utils::{hex, to_checksum},
};

use crate::{
    config::DeploymentRequest,
    contracts::{Artifact, ArtifactStore},
    utils::{contract_address, send_transaction, wait_for_receipt, Client},
};

#[derive(Debug, Clone)]
pub struct DeployOptions {
    pub legacy: bool,
    pub confirmations: usize,
    pub poll_interval: Duration,
}

/// Submits a creation transaction and resolves once it is confirmed.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DeployContract: Send + Sync {
    async fn deploy(&self, artifact: &Artifact, args: Vec<Token>) -> Result<H160>;
}

/// Resolves the contract factory, deploys it, waits for confirmation and only
/// then reports the address on `out`.
pub async fn run<D, W>(
    store: &ArtifactStore,
    deployer: &D,
    request: &DeploymentRequest,
    out: &mut W,
) -> Result<H160>
where
    D: DeployContract + ?Sized,
    W: Write,
{
    let artifact = store.contract_factory(&request.contract)?;
    let args = artifact.encode_constructor_args(&request.args)?;

    let address = deployer.deploy(&artifact, args).await?;

    writeln!(out, "Greeter deployed to: {}", to_checksum(&address, None))?;
    Ok(address)
}

pub struct Deploy {
    client: Arc<Client>,
    options: DeployOptions,
}

impl Deploy {
    pub async fn new(rpc: &str, sk: &str, options: DeployOptions) -> Result<Self> {
        let wallet = wallet_from_hex(sk)?;
        let provider = Provider::<Http>::try_from(rpc)?.interval(options.poll_interval);
        let chain_id = provider.get_chainid().await?.as_u64();
        log::info!("chain id:{}, deployer:{:?}", chain_id, wallet.address());

        let client = Arc::new(SignerMiddleware::new(
            provider,
            wallet.with_chain_id(chain_id),
        ));

        Ok(Self { client, options })
    }
}

#[async_trait::async_trait]
impl DeployContract for Deploy {
    async fn deploy(&self, artifact: &Artifact, args: Vec<Token>) -> Result<H160> {
        let mut deployer = ContractFactory::new(
            artifact.abi.clone(),
            artifact.bytecode.clone(),
            self.client.clone(),
        )
        .deploy_tokens(args)?;
        if self.options.legacy {
            deployer = deployer.legacy();
        }

        let transaction_hash = send_transaction(&self.client, deployer.tx).await?;
        let receipt = wait_for_receipt(
            &self.client,
            transaction_hash,
            self.options.confirmations,
            self.options.poll_interval,
        )
        .await?;

        contract_address(&receipt)
    }
}

fn wallet_from_hex(sk: &str) -> Result<LocalWallet> {
    let bytes = hex::decode(sk.strip_prefix("0x").unwrap_or(sk)).context("invalid private key")?;
    LocalWallet::from_bytes(&bytes).context("invalid private key")
}
