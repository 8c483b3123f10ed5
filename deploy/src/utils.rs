use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use ethers::{
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::LocalWallet,
    types::{transaction::eip2718::TypedTransaction, TransactionReceipt, H160, H256, U64},
};

pub type Client = SignerMiddleware<Provider<Http>, LocalWallet>;

pub async fn send_transaction(client: &Client, mut tx: TypedTransaction) -> Result<H256> {
    client.fill_transaction(&mut tx, None).await?;

    let transaction_hash = client.send_transaction(tx, None).await?.tx_hash();
    log::info!("transaction hash:{:?}", transaction_hash);
    Ok(transaction_hash)
}

/// Polls until the transaction is mined and buried under `confirmations` blocks.
pub async fn wait_for_receipt(
    client: &Client,
    transaction_hash: H256,
    confirmations: usize,
    interval: Duration,
) -> Result<TransactionReceipt> {
    loop {
        if let Some(receipt) = client.get_transaction_receipt(transaction_hash).await? {
            if let Some(mined_at) = receipt.block_number {
                let current = client.get_block_number().await?;
                if is_confirmed(mined_at, current, confirmations) {
                    log::info!("transaction mined in block {}", mined_at);
                    return Ok(receipt);
                }
                log::debug!("mined in block {}, current block {}", mined_at, current);
            }
        } else {
            log::debug!("transaction {:?} pending", transaction_hash);
        }
        tokio::time::sleep(interval).await;
    }
}

pub fn is_confirmed(mined_at: U64, current: U64, confirmations: usize) -> bool {
    if current < mined_at {
        return false;
    }
    (current - mined_at).as_u64() + 1 >= confirmations.max(1) as u64
}

pub fn contract_address(receipt: &TransactionReceipt) -> Result<H160> {
    if receipt.status == Some(U64::zero()) {
        bail!("deployment transaction {:?} reverted", receipt.transaction_hash);
    }
    receipt.contract_address.ok_or(anyhow!(
        "contract address not found in receipt of {:?}",
        receipt.transaction_hash
    ))
}
