//! Utilities for the deploy scripts.

use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use alloy::{
    contract::{CallBuilder, CallDecoder, RawCallBuilder},
    dyn_abi::{DynSolValue, JsonAbiExt},
    json_abi::JsonAbi,
    primitives::{Address, Bytes, FixedBytes, TxHash},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::{TransactionReceipt, TransactionRequest},
    transports::http::reqwest::Url,
};
use serde::Deserialize;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::{
    config::DeployedContracts,
    constants::{ARTIFACT_EXTENSION, RECEIPT_POLL_INTERVAL},
    errors::ScriptError,
    types::Wallet,
};

/// Sets up a provider without a signer attached, for reads and node RPCs
pub fn setup_provider(rpc_url: &str) -> Result<Wallet, ScriptError> {
    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    Ok(DynProvider::new(ProviderBuilder::new().connect_http(url)))
}

// ----------------
// | Transactions |
// ----------------

/// Send a transaction and wait for it to be mined, failing if it reverted
pub async fn send_tx<P: Provider, D: CallDecoder>(
    tx: CallBuilder<P, D>,
) -> Result<TransactionReceipt, ScriptError> {
    let pending_tx = tx
        .send()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    wait_for_receipt(pending_tx.provider(), *pending_tx.tx_hash()).await
}

/// Send a prepared transaction request and wait for it to be mined
pub async fn send_request(
    provider: &Wallet,
    tx: TransactionRequest,
) -> Result<TransactionReceipt, ScriptError> {
    let pending_tx = provider
        .send_transaction(tx)
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    wait_for_receipt(provider, *pending_tx.tx_hash()).await
}

/// Poll for the receipt of `tx_hash` until the transaction is mined
async fn wait_for_receipt<P: Provider>(
    provider: &P,
    tx_hash: TxHash,
) -> Result<TransactionReceipt, ScriptError> {
    debug!("Sent transaction {tx_hash:#x}, waiting for receipt");

    loop {
        let receipt = provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

        match receipt {
            Some(receipt) if !receipt.status() => {
                return Err(ScriptError::TransactionReverted(tx_hash))
            },
            Some(receipt) => return Ok(receipt),
            None => sleep(RECEIPT_POLL_INTERVAL).await,
        }
    }
}

/// One transaction of a fixed sequence, logged with `label` once mined
#[derive(Clone, Debug)]
pub struct Step {
    /// What the transaction does
    pub label: String,
    /// The transaction itself
    pub tx: TransactionRequest,
}

impl Step {
    /// A step sending `call`
    pub fn new<P: Provider, D: CallDecoder>(
        label: impl Into<String>,
        call: CallBuilder<P, D>,
    ) -> Self {
        Self { label: label.into(), tx: call.into_transaction_request() }
    }
}

/// Send each step in order, stopping at the first failure
pub async fn run_steps(provider: &Wallet, steps: Vec<Step>) -> Result<(), ScriptError> {
    for Step { label, tx } in steps {
        send_request(provider, tx).await?;
        info!("{label}");
    }

    Ok(())
}

/// Whether any code is deployed at the given address
pub async fn has_code(provider: &Wallet, address: Address) -> Result<bool, ScriptError> {
    let code = provider
        .get_code_at(address)
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    Ok(!code.is_empty())
}

// -------------
// | Artifacts |
// -------------

/// The parts of a Hardhat compilation artifact needed to deploy a contract
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// The name of the compiled contract
    pub contract_name: String,
    /// The contract ABI
    pub abi: JsonAbi,
    /// The creation bytecode
    pub bytecode: Bytes,
}

/// Find the artifact for the contract `name` anywhere under `dir`
pub fn find_artifact(dir: &Path, name: &str) -> Result<PathBuf, ScriptError> {
    let file_name = format!("{name}.{ARTIFACT_EXTENSION}");
    search_dir(dir, OsStr::new(&file_name))?.ok_or_else(|| {
        ScriptError::ArtifactParsing(format!(
            "no artifact for {name} under {}",
            dir.display()
        ))
    })
}

/// Depth-first search for a file named `file_name`, preferring shallower
/// matches
fn search_dir(dir: &Path, file_name: &OsStr) -> Result<Option<PathBuf>, ScriptError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {e}", dir.display())))?;

    let mut subdirs = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?
            .path();
        if path.is_dir() {
            subdirs.push(path);
        } else if path.file_name() == Some(file_name) {
            return Ok(Some(path));
        }
    }

    subdirs.sort();
    for subdir in subdirs {
        if let Some(path) = search_dir(&subdir, file_name)? {
            return Ok(Some(path));
        }
    }

    Ok(None)
}

/// Read and parse an artifact file
pub fn read_artifact(path: &Path) -> Result<Artifact, ScriptError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&contents)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {e}", path.display())))
}

/// The selectors of every function in the ABI of the contract `name`
pub fn function_selectors(
    artifacts_dir: &Path,
    name: &str,
) -> Result<Vec<FixedBytes<4>>, ScriptError> {
    let artifact = read_artifact(&find_artifact(artifacts_dir, name)?)?;
    Ok(artifact.abi.functions().map(|function| function.selector()).collect())
}

/// The creation code of the artifact with the ABI-encoded constructor
/// arguments appended
pub fn deploy_code(artifact: &Artifact, args: &[DynSolValue]) -> Result<Bytes, ScriptError> {
    let encoded_args = match &artifact.abi.constructor {
        Some(constructor) => constructor
            .abi_encode_input(args)
            .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?,
        None if args.is_empty() => Vec::new(),
        None => {
            return Err(ScriptError::CalldataConstruction(format!(
                "{} takes no constructor arguments, got {}",
                artifact.contract_name,
                args.len()
            )))
        }
    };

    let mut code = artifact.bytecode.to_vec();
    code.extend(encoded_args);
    Ok(code.into())
}

/// Deploy the contract `name` from its artifact under `artifacts_dir`,
/// returning the deployed address
pub async fn deploy_contract(
    provider: &Wallet,
    artifacts_dir: &Path,
    name: &str,
    args: &[DynSolValue],
) -> Result<Address, ScriptError> {
    let artifact = read_artifact(&find_artifact(artifacts_dir, name)?)?;
    let code = deploy_code(&artifact, args)?;

    let receipt = send_tx(RawCallBuilder::new_raw_deploy(provider.clone(), code))
        .await
        .map_err(|e| ScriptError::ContractDeployment(format!("{name}: {e}")))?;
    let address = receipt.contract_address.ok_or_else(|| {
        ScriptError::ContractDeployment(format!("{name}: receipt has no contract address"))
    })?;

    info!("{name} deployed at: {address:#x}");
    Ok(address)
}

// ---------------
// | Deployments |
// ---------------

/// Read the deployments file, treating a missing file as empty
pub fn read_deployments(path: &Path) -> Result<DeployedContracts, ScriptError> {
    if !path.exists() {
        return Ok(DeployedContracts::default());
    }

    let contents =
        fs::read_to_string(path).map_err(|e| ScriptError::ReadDeployments(e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| ScriptError::ReadDeployments(e.to_string()))
}

/// Write the deployments file, creating it if needed
pub fn write_deployments(path: &Path, contracts: &DeployedContracts) -> Result<(), ScriptError> {
    let contents = serde_json::to_string_pretty(contracts)
        .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
    fs::write(path, contents).map_err(|e| ScriptError::WriteDeployments(e.to_string()))
}
