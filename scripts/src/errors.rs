//! Definitions of errors that can occur during the execution of the deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use alloy_primitives::{Address, TxHash};

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug)]
pub enum ScriptError {
    /// The requested address is not among the available signers
    AccountNotFound(Address),
    /// A script needs an account that was not resolved at startup
    MissingAccount(&'static str),
    /// A contract was neither passed in nor recorded by an earlier script
    MissingContract(&'static str),
    /// Error initializing a signer or an RPC client
    ClientInitialization(String),
    /// Error reading or validating the config overrides
    Config(String),
    /// Error reading the deployments file
    ReadDeployments(String),
    /// Error writing the deployments file
    WriteDeployments(String),
    /// Error locating or parsing a compilation artifact
    ArtifactParsing(String),
    /// Error constructing calldata for a contract method or constructor
    CalldataConstruction(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// A transaction was mined but reverted
    TransactionReverted(TxHash),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::AccountNotFound(addr) => {
                write!(f, "could not find {addr:#x} among the signers")
            }
            ScriptError::MissingAccount(s) => write!(f, "account not available: {s}"),
            ScriptError::MissingContract(s) => {
                write!(f, "no address given or recorded for {s}")
            }
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {s}"),
            ScriptError::Config(s) => write!(f, "invalid config: {s}"),
            ScriptError::ReadDeployments(s) => write!(f, "error reading deployments: {s}"),
            ScriptError::WriteDeployments(s) => write!(f, "error writing deployments: {s}"),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {s}"),
            ScriptError::CalldataConstruction(s) => write!(f, "error constructing calldata: {s}"),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {s}"),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {s}")
            }
            ScriptError::TransactionReverted(hash) => {
                write!(f, "transaction {hash:#x} reverted")
            }
        }
    }
}

impl Error for ScriptError {}
