//! Signer management: collecting the local signers and resolving the
//! accounts a script acts as.

use std::str::FromStr;

use alloy::{
    primitives::Address,
    providers::{ext::AnvilApi, DynProvider, ProviderBuilder},
    signers::local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner},
    transports::http::reqwest::Url,
};
use tracing::{debug, info};

use crate::{errors::ScriptError, types::Wallet};

/// The local signers available to the scripts
#[derive(Clone, Default)]
pub struct SignerSet {
    /// The signers, in the order they were supplied
    signers: Vec<PrivateKeySigner>,
}

impl SignerSet {
    /// Parse a set of hex-encoded private keys
    pub fn from_keys<S: AsRef<str>>(keys: &[S]) -> Result<Self, ScriptError> {
        let signers = keys
            .iter()
            .map(|key| {
                PrivateKeySigner::from_str(key.as_ref())
                    .map_err(|e| ScriptError::ClientInitialization(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { signers })
    }

    /// Derive `count` signers from a BIP-39 mnemonic along `m/44'/60'/0'/0/i`
    pub fn from_mnemonic(phrase: &str, count: u32) -> Result<Self, ScriptError> {
        let signers = (0..count)
            .map(|index| {
                MnemonicBuilder::<English>::default()
                    .phrase(phrase)
                    .index(index)
                    .and_then(|builder| builder.build())
                    .map_err(|e| ScriptError::ClientInitialization(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { signers })
    }

    /// Append the signers of another set
    pub fn extend(&mut self, other: SignerSet) {
        self.signers.extend(other.signers);
    }

    /// The addresses of all signers
    pub fn addresses(&self) -> Vec<Address> {
        self.signers.iter().map(PrivateKeySigner::address).collect()
    }

    /// Whether the set holds no signers
    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }

    /// Find the signer for the given address
    pub fn find(&self, address: Address) -> Result<&PrivateKeySigner, ScriptError> {
        self.signers
            .iter()
            .find(|signer| signer.address() == address)
            .ok_or(ScriptError::AccountNotFound(address))
    }
}

/// An account able to send transactions, along with the provider it sends
/// them through
#[derive(Clone)]
pub struct Account {
    /// The address transactions are sent from
    address: Address,
    /// The provider used for calls made as this account
    provider: Wallet,
}

impl Account {
    /// An account backed by a local signer
    pub fn local(signer: PrivateKeySigner, rpc_url: &str) -> Result<Self, ScriptError> {
        let url = parse_url(rpc_url)?;
        let address = signer.address();
        let provider = ProviderBuilder::new().wallet(signer).connect_http(url);

        Ok(Self { address, provider: DynProvider::new(provider) })
    }

    /// An account the dev node signs for.
    ///
    /// Only works against nodes exposing `anvil_impersonateAccount`. Calls
    /// made as this account must carry an explicit `from`.
    pub async fn impersonated(address: Address, rpc_url: &str) -> Result<Self, ScriptError> {
        let url = parse_url(rpc_url)?;
        let provider = ProviderBuilder::new().connect_http(url);
        provider
            .anvil_impersonate_account(address)
            .await
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

        info!("Impersonating {address:#x}");
        Ok(Self { address, provider: DynProvider::new(provider) })
    }

    /// The account's address
    pub fn address(&self) -> Address {
        self.address
    }

    /// The provider to instantiate contracts with when acting as this account
    pub fn provider(&self) -> &Wallet {
        &self.provider
    }

    /// An account acting through an arbitrary provider
    #[cfg(test)]
    pub(crate) fn with_provider(address: Address, provider: Wallet) -> Self {
        Self { address, provider }
    }
}

/// Look up the account for `address` among the local signers, failing if
/// it is not one of them
pub fn get_account(
    signers: &SignerSet,
    address: Address,
    rpc_url: &str,
) -> Result<Account, ScriptError> {
    let signer = signers.find(address)?;
    Account::local(signer.clone(), rpc_url)
}

/// Resolve an auxiliary account: a local signer if one matches, otherwise
/// an impersonated account when impersonation is enabled.
///
/// Returns `None` when the account can be neither signed for nor
/// impersonated.
pub async fn resolve_account(
    signers: &SignerSet,
    address: Address,
    rpc_url: &str,
    impersonate: bool,
) -> Result<Option<Account>, ScriptError> {
    match signers.find(address) {
        Ok(signer) => Account::local(signer.clone(), rpc_url).map(Some),
        Err(_) if impersonate => Account::impersonated(address, rpc_url).await.map(Some),
        Err(_) => {
            debug!("No signer for {address:#x}, skipping");
            Ok(None)
        }
    }
}

/// Parse an RPC URL
fn parse_url(rpc_url: &str) -> Result<Url, ScriptError> {
    Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    /// The mnemonic dev nodes seed their accounts from
    const DEV_MNEMONIC: &str = "test test test test test test test test test test test junk";

    /// The private key of the first dev node account
    const DEV_KEY_0: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    const DEV_ADDRESS_0: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const DEV_ADDRESS_1: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");

    #[test]
    fn test_mnemonic_derivation() {
        let signers = SignerSet::from_mnemonic(DEV_MNEMONIC, 2).unwrap();
        assert_eq!(signers.addresses(), vec![DEV_ADDRESS_0, DEV_ADDRESS_1]);
    }

    #[test]
    fn test_keys_and_mnemonic_merge() {
        let mut signers = SignerSet::from_keys(&[DEV_KEY_0]).unwrap();
        signers.extend(SignerSet::from_mnemonic(DEV_MNEMONIC, 2).unwrap());

        assert_eq!(signers.addresses().len(), 3);
        assert!(signers.find(DEV_ADDRESS_1).is_ok());
    }

    #[test]
    fn test_invalid_key_rejected() {
        let res = SignerSet::from_keys(&["0xnotakey"]);
        assert!(matches!(res, Err(ScriptError::ClientInitialization(_))));
    }

    #[test]
    fn test_get_account() {
        let signers = SignerSet::from_keys(&[DEV_KEY_0]).unwrap();
        let account = get_account(&signers, DEV_ADDRESS_0, "http://127.0.0.1:8545").unwrap();

        assert_eq!(account.address(), DEV_ADDRESS_0);
    }

    #[test]
    fn test_get_account_missing() {
        let signers = SignerSet::from_keys(&[DEV_KEY_0]).unwrap();
        let res = get_account(&signers, DEV_ADDRESS_1, "http://127.0.0.1:8545");

        assert!(matches!(res, Err(ScriptError::AccountNotFound(addr)) if addr == DEV_ADDRESS_1));
    }

    #[test]
    fn test_bad_rpc_url() {
        let signers = SignerSet::from_keys(&[DEV_KEY_0]).unwrap();
        let res = get_account(&signers, DEV_ADDRESS_0, "not a url");

        assert!(matches!(res, Err(ScriptError::ClientInitialization(_))));
    }
}
