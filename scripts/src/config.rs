//! The configuration threaded through every script: well-known addresses,
//! the accounts acting on them, token amounts, epoch timing, and the
//! contracts deployed so far.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    accounts::{get_account, resolve_account, Account, SignerSet},
    constants::{
        token_amount, BASE_DELTA_TENTHS, EPOCH_DURATION_SECS, FORK_BALANCER_FACTORY, FORK_OWNER,
        FORK_SBTC, FORK_SCHF, FORK_SETH, FORK_SMART_POOL_FACTORY, FORK_SUSD, FORK_SUSD_WHALE,
        FORK_SXAG, FORK_SXAU, FORK_UNISWAP_FACTORY, FORK_UNISWAP_ROUTER, FORK_USDC, FORK_USERS,
        FORK_WETH, REIGN_SHARE_TOKENS, REIGN_TOTAL_TOKENS, REWARDS_TOKENS, RINKEBY_BTC_ORACLE,
        RINKEBY_OWNER, RINKEBY_UNISWAP_FACTORY, RINKEBY_UNISWAP_ROUTER, RINKEBY_USERS,
        RINKEBY_WETH_ORACLE, TEN_POW_18,
    },
    errors::ScriptError,
    types::Network,
    utils::{read_deployments, write_deployments},
};

#[cfg(test)]
use crate::{constants::DEFAULT_RPC_URL, types::Wallet};

// -------------
// | Addresses |
// -------------

/// Token contracts the protocol interacts with. Presets leave a token unset
/// when it has no deployment on that network.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenAddresses {
    pub usdc: Option<Address>,
    pub wbtc: Option<Address>,
    pub sbtc: Option<Address>,
    pub seth: Option<Address>,
    pub sxau: Option<Address>,
    pub sxag: Option<Address>,
    pub schf: Option<Address>,
    pub susd: Option<Address>,
    pub weth: Option<Address>,
}

impl TokenAddresses {
    /// The set tokens, paired with their symbols
    pub fn named(&self) -> Vec<(&'static str, Address)> {
        [
            ("USDC", self.usdc),
            ("WBTC", self.wbtc),
            ("sBTC", self.sbtc),
            ("sETH", self.seth),
            ("sXAU", self.sxau),
            ("sXAG", self.sxag),
            ("sCHF", self.schf),
            ("sUSD", self.susd),
            ("WETH", self.weth),
        ]
        .into_iter()
        .filter_map(|(name, addr)| addr.map(|addr| (name, addr)))
        .collect()
    }
}

/// Addresses that exist independently of this deployment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WellKnownAddresses {
    /// The account deploying and administering the protocol
    pub owner: Address,
    /// Token holders used by the scripts, in order
    pub users: Vec<Address>,
    /// A large sUSD holder used to fund the owner on forks
    pub susd_whale: Option<Address>,
    /// Token contracts
    pub tokens: TokenAddresses,
    /// The Balancer core pool factory
    pub balancer_factory: Option<Address>,
    /// The configurable rights pool factory
    pub smart_pool_factory: Option<Address>,
    /// The Uniswap V2 factory
    pub uniswap_factory: Address,
    /// The Uniswap V2 router
    pub uniswap_router: Address,
    /// The BTC price feed
    pub btc_oracle: Option<Address>,
    /// The ETH price feed
    pub weth_oracle: Option<Address>,
}

impl WellKnownAddresses {
    /// The addresses preset for the given network
    pub fn preset(network: Network) -> Self {
        match network {
            Network::Rinkeby => Self {
                owner: RINKEBY_OWNER,
                users: RINKEBY_USERS.to_vec(),
                susd_whale: None,
                tokens: TokenAddresses::default(),
                balancer_factory: None,
                smart_pool_factory: None,
                uniswap_factory: RINKEBY_UNISWAP_FACTORY,
                uniswap_router: RINKEBY_UNISWAP_ROUTER,
                btc_oracle: Some(RINKEBY_BTC_ORACLE),
                weth_oracle: Some(RINKEBY_WETH_ORACLE),
            },
            Network::MainnetFork => Self {
                owner: FORK_OWNER,
                users: FORK_USERS.to_vec(),
                susd_whale: Some(FORK_SUSD_WHALE),
                tokens: TokenAddresses {
                    usdc: Some(FORK_USDC),
                    wbtc: None,
                    sbtc: Some(FORK_SBTC),
                    seth: Some(FORK_SETH),
                    sxau: Some(FORK_SXAU),
                    sxag: Some(FORK_SXAG),
                    schf: Some(FORK_SCHF),
                    susd: Some(FORK_SUSD),
                    weth: Some(FORK_WETH),
                },
                balancer_factory: Some(FORK_BALANCER_FACTORY),
                smart_pool_factory: Some(FORK_SMART_POOL_FACTORY),
                uniswap_factory: FORK_UNISWAP_FACTORY,
                uniswap_router: FORK_UNISWAP_ROUTER,
                btc_oracle: None,
                weth_oracle: None,
            },
        }
    }
}

// -----------------------
// | Amounts and Epochs |
// -----------------------

/// Token amounts, in base units
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenAmounts {
    /// REIGN minted in total
    pub reign_total: U256,
    /// REIGN minted to the owner
    pub reign_to_owner: U256,
    /// REIGN minted to the rewards vault
    pub reign_to_rewards_vault: U256,
    /// REIGN minted to the first user
    pub reign_to_user1: U256,
    /// REIGN minted to the second user
    pub reign_to_user2: U256,
    /// The base delta of the basket balancer
    pub base_delta: U256,
    /// Rewards distributed over the program
    pub rewards: U256,
}

impl Default for TokenAmounts {
    fn default() -> Self {
        Self {
            reign_total: token_amount(REIGN_TOTAL_TOKENS),
            reign_to_owner: token_amount(REIGN_SHARE_TOKENS),
            reign_to_rewards_vault: token_amount(REIGN_SHARE_TOKENS),
            reign_to_user1: token_amount(REIGN_SHARE_TOKENS),
            reign_to_user2: token_amount(REIGN_SHARE_TOKENS),
            base_delta: U256::from(BASE_DELTA_TENTHS) * (TEN_POW_18 / U256::from(10)),
            rewards: token_amount(REWARDS_TOKENS),
        }
    }
}

impl TokenAmounts {
    /// Check that the REIGN shares add up to the total mint
    pub fn validate(&self) -> Result<(), ScriptError> {
        let shares = [
            self.reign_to_owner,
            self.reign_to_rewards_vault,
            self.reign_to_user1,
            self.reign_to_user2,
        ];
        let sum = shares
            .iter()
            .try_fold(U256::ZERO, |acc, share| acc.checked_add(*share))
            .ok_or_else(|| ScriptError::Config("REIGN shares overflow".to_string()))?;

        if sum != self.reign_total {
            return Err(ScriptError::Config(format!(
                "REIGN shares sum to {sum}, expected {}",
                self.reign_total
            )));
        }

        Ok(())
    }
}

/// Staking epoch timing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EpochParams {
    /// Start of the first epoch, in unix seconds
    pub start_ts: u64,
    /// Length of an epoch, in seconds
    pub duration: u64,
}

impl EpochParams {
    /// The first epoch starts at `now`
    pub fn starting_at(now: SystemTime) -> Result<Self, ScriptError> {
        let start_ts = now
            .duration_since(UNIX_EPOCH)
            .map_err(|e| ScriptError::Config(format!("system clock before unix epoch: {e}")))?
            .as_secs();

        Ok(Self { start_ts, duration: EPOCH_DURATION_SECS })
    }

    /// The first epoch starts now
    pub fn starting_now() -> Result<Self, ScriptError> {
        Self::starting_at(SystemTime::now())
    }
}

// ---------------------
// | Deployed Contracts |
// ---------------------

/// Declares the contracts the scripts record: one field of
/// [`DeployedContracts`] and one variant of [`ContractKey`] per entry. The
/// variant name is the key written to the deployments file.
macro_rules! deployed_contracts {
    ($($field:ident => $key:ident),* $(,)?) => {
        /// Contracts deployed (or reconfigured) by the scripts, recorded in
        /// the deployments file as they appear
        #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "PascalCase")]
        pub struct DeployedContracts {
            $(
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $field: Option<Address>,
            )*
            /// Entries written by other tools, kept as they are
            #[serde(flatten)]
            pub extra: BTreeMap<String, serde_json::Value>,
        }

        /// A slot of [`DeployedContracts`]
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum ContractKey {
            $($key,)*
        }

        impl ContractKey {
            /// The key the contract is recorded under
            pub fn name(self) -> &'static str {
                match self {
                    $(ContractKey::$key => stringify!($key),)*
                }
            }
        }

        impl DeployedContracts {
            /// The address recorded under `key`, if any
            pub fn get(&self, key: ContractKey) -> Option<Address> {
                match key {
                    $(ContractKey::$key => self.$field,)*
                }
            }

            fn slot_mut(&mut self, key: ContractKey) -> &mut Option<Address> {
                match key {
                    $(ContractKey::$key => &mut self.$field,)*
                }
            }
        }
    };
}

deployed_contracts! {
    diamond_cut_facet => DiamondCutFacet,
    diamond_loupe_facet => DiamondLoupeFacet,
    ownership_facet => OwnershipFacet,
    reign_facet => ReignFacet,
    epoch_clock_facet => EpochClockFacet,
    reign_diamond => ReignDiamond,
    reign_dao => ReignDao,
    rewards_distribution => RewardsDistribution,
    reign_token => ReignToken,
    sov_token => SovToken,
    sov_wrapper => SovWrapper,
    rewards_vault => RewardsVault,
    dev_vault => DevVault,
    treasury_sale_vault => TreasurySaleVault,
    vesting_router => VestingRouter,
    staking => Staking,
    gov_rewards => GovRewards,
    smart_pool => SmartPool,
    pool_router => PoolRouter,
    basket_balancer => BasketBalancer,
    wrapping_rewards => WrappingRewards,
    reign_lp_rewards => ReignLpRewards,
    reign_pair => ReignPair,
    sbtc_mock => SbtcMock,
    legacy_smart_pool => LegacySmartPool,
    legacy_reign_dao => LegacyReignDao,
}

impl DeployedContracts {
    /// Set the address recorded under `key`
    pub fn set(&mut self, key: ContractKey, address: Address) {
        *self.slot_mut(key) = Some(address);
    }
}

// -------------
// | Overrides |
// -------------

/// Values overriding a network preset, read from a JSON file.
///
/// Amounts are given in whole tokens.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ConfigOverrides {
    pub owner: Option<Address>,
    pub users: Option<Vec<Address>>,
    pub susd_whale: Option<Address>,
    pub usdc: Option<Address>,
    pub wbtc: Option<Address>,
    pub sbtc: Option<Address>,
    pub seth: Option<Address>,
    pub sxau: Option<Address>,
    pub sxag: Option<Address>,
    pub schf: Option<Address>,
    pub susd: Option<Address>,
    pub weth: Option<Address>,
    pub balancer_factory: Option<Address>,
    pub smart_pool_factory: Option<Address>,
    pub uniswap_factory: Option<Address>,
    pub uniswap_router: Option<Address>,
    pub reign_total_tokens: Option<u64>,
    pub reign_to_owner_tokens: Option<u64>,
    pub reign_to_rewards_vault_tokens: Option<u64>,
    pub reign_to_user1_tokens: Option<u64>,
    pub reign_to_user2_tokens: Option<u64>,
    pub rewards_tokens: Option<u64>,
    pub epoch_start_ts: Option<u64>,
    pub epoch_duration: Option<u64>,
}

impl ConfigOverrides {
    /// Read overrides from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ScriptError::Config(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&contents)
            .map_err(|e| ScriptError::Config(format!("{}: {e}", path.display())))
    }

    /// Apply the overridden addresses
    pub fn apply_addresses(&self, addresses: &mut WellKnownAddresses) {
        if let Some(owner) = self.owner {
            addresses.owner = owner;
        }
        if let Some(users) = &self.users {
            addresses.users = users.clone();
        }
        if let Some(factory) = self.uniswap_factory {
            addresses.uniswap_factory = factory;
        }
        if let Some(router) = self.uniswap_router {
            addresses.uniswap_router = router;
        }

        let tokens = &mut addresses.tokens;
        for (src, dst) in [
            (self.susd_whale, &mut addresses.susd_whale),
            (self.usdc, &mut tokens.usdc),
            (self.wbtc, &mut tokens.wbtc),
            (self.sbtc, &mut tokens.sbtc),
            (self.seth, &mut tokens.seth),
            (self.sxau, &mut tokens.sxau),
            (self.sxag, &mut tokens.sxag),
            (self.schf, &mut tokens.schf),
            (self.susd, &mut tokens.susd),
            (self.weth, &mut tokens.weth),
            (self.balancer_factory, &mut addresses.balancer_factory),
            (self.smart_pool_factory, &mut addresses.smart_pool_factory),
        ] {
            if src.is_some() {
                *dst = src;
            }
        }
    }

    /// Apply the overridden amounts
    pub fn apply_amounts(&self, amounts: &mut TokenAmounts) {
        for (src, dst) in [
            (self.reign_total_tokens, &mut amounts.reign_total),
            (self.reign_to_owner_tokens, &mut amounts.reign_to_owner),
            (self.reign_to_rewards_vault_tokens, &mut amounts.reign_to_rewards_vault),
            (self.reign_to_user1_tokens, &mut amounts.reign_to_user1),
            (self.reign_to_user2_tokens, &mut amounts.reign_to_user2),
            (self.rewards_tokens, &mut amounts.rewards),
        ] {
            if let Some(whole) = src {
                *dst = token_amount(whole);
            }
        }
    }

    /// Apply the overridden epoch timing
    pub fn apply_epoch(&self, epoch: &mut EpochParams) {
        if let Some(start_ts) = self.epoch_start_ts {
            epoch.start_ts = start_ts;
        }
        if let Some(duration) = self.epoch_duration {
            epoch.duration = duration;
        }
    }
}

// ----------------
// | DeployConfig |
// ----------------

/// Where the scripts read and write their files
#[derive(Clone, Debug)]
pub struct ScriptPaths {
    /// Directory holding the compiled contract artifacts
    pub artifacts_dir: PathBuf,
    /// The deployments file
    pub deployments_path: PathBuf,
}

/// Everything a script needs to run
pub struct DeployConfig {
    /// The network the presets were taken from
    pub network: Network,
    /// The RPC URL accounts connect to
    pub rpc_url: String,
    /// Addresses that exist independently of this deployment
    pub addresses: WellKnownAddresses,
    /// All local signers
    pub signers: SignerSet,
    /// The protocol owner
    pub owner: Account,
    /// The users that could be resolved, in the order of `addresses.users`
    pub users: Vec<Account>,
    /// The sUSD whale, if it could be resolved
    pub susd_whale: Option<Account>,
    /// Token amounts
    pub amounts: TokenAmounts,
    /// Staking epoch timing
    pub epoch: EpochParams,
    /// Contracts deployed so far
    pub contracts: DeployedContracts,
    /// File locations
    pub paths: ScriptPaths,
}

impl DeployConfig {
    /// Build the config for a run.
    ///
    /// The owner must be one of the local signers. Users and the whale are
    /// resolved locally first, then impersonated if `impersonate` is set.
    pub async fn new(
        network: Network,
        overrides: ConfigOverrides,
        signers: SignerSet,
        rpc_url: &str,
        impersonate: bool,
        paths: ScriptPaths,
    ) -> Result<Self, ScriptError> {
        let mut addresses = WellKnownAddresses::preset(network);
        overrides.apply_addresses(&mut addresses);

        let mut amounts = TokenAmounts::default();
        overrides.apply_amounts(&mut amounts);
        amounts.validate()?;

        let mut epoch = EpochParams::starting_now()?;
        overrides.apply_epoch(&mut epoch);

        let owner = get_account(&signers, addresses.owner, rpc_url)?;
        info!("Owner account: {:#x}", owner.address());

        let mut users = Vec::with_capacity(addresses.users.len());
        for user in &addresses.users {
            match resolve_account(&signers, *user, rpc_url, impersonate).await? {
                Some(account) => users.push(account),
                None => warn!("User {user:#x} unavailable"),
            }
        }

        let susd_whale = match addresses.susd_whale {
            Some(whale) => resolve_account(&signers, whale, rpc_url, impersonate).await?,
            None => None,
        };

        let contracts = read_deployments(&paths.deployments_path)?;

        Ok(Self {
            network,
            rpc_url: rpc_url.to_string(),
            addresses,
            signers,
            owner,
            users,
            susd_whale,
            amounts,
            epoch,
            contracts,
            paths,
        })
    }

    /// Record a deployed contract and persist the deployments file
    pub fn record(&mut self, key: ContractKey, address: Address) -> Result<(), ScriptError> {
        self.contracts.set(key, address);
        write_deployments(&self.paths.deployments_path, &self.contracts)
    }

    /// The address recorded under `key`, if any
    pub fn contract(&self, key: ContractKey) -> Option<Address> {
        self.contracts.get(key)
    }

    /// Pick the address a script acts on: the one given on the command
    /// line, else the one recorded under `key`, else `fallback`
    pub fn resolve(&self, arg: Option<Address>, key: ContractKey, fallback: Address) -> Address {
        arg.or_else(|| self.contract(key)).unwrap_or(fallback)
    }

    /// Like [`DeployConfig::resolve`], for contracts with no fixed address
    pub fn require(&self, arg: Option<Address>, key: ContractKey) -> Result<Address, ScriptError> {
        arg.or_else(|| self.contract(key)).ok_or(ScriptError::MissingContract(key.name()))
    }
}

#[cfg(test)]
impl DeployConfig {
    /// A mainnet fork config whose accounts all act through `provider`,
    /// keeping its files under `dir`
    pub(crate) fn with_provider(provider: Wallet, dir: &Path) -> Self {
        let addresses = WellKnownAddresses::preset(Network::MainnetFork);
        let users = addresses
            .users
            .iter()
            .map(|user| Account::with_provider(*user, provider.clone()))
            .collect();

        Self {
            network: Network::MainnetFork,
            rpc_url: DEFAULT_RPC_URL.to_string(),
            owner: Account::with_provider(addresses.owner, provider),
            users,
            susd_whale: None,
            signers: SignerSet::default(),
            amounts: TokenAmounts::default(),
            epoch: EpochParams { start_ts: 1_700_000_000, duration: EPOCH_DURATION_SECS },
            contracts: DeployedContracts::default(),
            paths: ScriptPaths {
                artifacts_dir: dir.join("artifacts"),
                deployments_path: dir.join("deployments.json"),
            },
            addresses,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use alloy::{primitives::address, providers::mock::Asserter};

    use super::*;
    use crate::{
        constants::{REIGN_DAO_ADDRESS, SMART_POOL_ADDRESS},
        test_helpers::{mock_provider, scratch_dir},
    };

    #[test]
    fn test_default_amounts_valid() {
        let amounts = TokenAmounts::default();
        amounts.validate().unwrap();

        assert_eq!(amounts.reign_total, U256::from(10).pow(U256::from(27)));
        assert_eq!(amounts.base_delta, U256::from(3) * TEN_POW_18);
        assert_eq!(amounts.rewards, U256::from(610_000) * TEN_POW_18);
    }

    #[test]
    fn test_mismatched_shares_rejected() {
        let overrides: ConfigOverrides =
            serde_json::from_str(r#"{ "reignToUser2Tokens": 1 }"#).unwrap();
        let mut amounts = TokenAmounts::default();
        overrides.apply_amounts(&mut amounts);

        assert!(matches!(amounts.validate(), Err(ScriptError::Config(_))));
    }

    #[test]
    fn test_rinkeby_preset() {
        let addresses = WellKnownAddresses::preset(Network::Rinkeby);

        assert_eq!(addresses.owner, RINKEBY_OWNER);
        assert_eq!(addresses.users.len(), 3);
        assert!(addresses.tokens.named().is_empty());
        assert!(addresses.susd_whale.is_none());
    }

    #[test]
    fn test_fork_preset_tokens() {
        let addresses = WellKnownAddresses::preset(Network::MainnetFork);
        let names: Vec<_> = addresses.tokens.named().into_iter().map(|(n, _)| n).collect();

        assert_eq!(names, vec!["USDC", "sBTC", "sETH", "sXAU", "sXAG", "sCHF", "sUSD", "WETH"]);
        assert_eq!(addresses.tokens.weth, Some(FORK_WETH));
    }

    #[test]
    fn test_overrides_applied() {
        let json = r#"{
            "owner": "0x70997970c51812dc3a010c7d01b50e0d17dc79c8",
            "wbtc": "0x2260fac5e5542a773aa44fbcfedf7c193bc2c599",
            "epochDuration": 1800,
            "epochStartTs": 1700000000
        }"#;
        let overrides: ConfigOverrides = serde_json::from_str(json).unwrap();

        let mut addresses = WellKnownAddresses::preset(Network::Rinkeby);
        overrides.apply_addresses(&mut addresses);
        let mut epoch = EpochParams::starting_now().unwrap();
        overrides.apply_epoch(&mut epoch);

        assert_eq!(addresses.owner, address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"));
        assert_eq!(
            addresses.tokens.wbtc,
            Some(address!("2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599"))
        );
        // Untouched fields keep their preset
        assert_eq!(addresses.uniswap_router, RINKEBY_UNISWAP_ROUTER);
        assert_eq!(epoch, EpochParams { start_ts: 1_700_000_000, duration: 1800 });
    }

    #[test]
    fn test_unknown_override_rejected() {
        let res = serde_json::from_str::<ConfigOverrides>(r#"{ "ownr": "0x00" }"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_epoch_starts_now() {
        let epoch = EpochParams::starting_now().unwrap();
        assert!(epoch.start_ts > 1_600_000_000);
        assert_eq!(epoch.duration, EPOCH_DURATION_SECS);
    }

    #[test]
    fn test_epoch_clock_before_unix_epoch() {
        let now = UNIX_EPOCH.checked_sub(Duration::from_secs(1)).unwrap();
        let res = EpochParams::starting_at(now);

        assert!(matches!(res, Err(ScriptError::Config(_))));
    }

    #[test]
    fn test_contract_key_names_match_file_keys() {
        let mut contracts = DeployedContracts::default();
        contracts.set(ContractKey::ReignDao, Address::ZERO);
        contracts.set(ContractKey::LegacySmartPool, Address::ZERO);

        let json = serde_json::to_value(&contracts).unwrap();
        assert!(json.get(ContractKey::ReignDao.name()).is_some());
        assert!(json.get(ContractKey::LegacySmartPool.name()).is_some());
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_address_resolution_order() {
        let dir = scratch_dir("resolution");
        let mut config = DeployConfig::with_provider(mock_provider(&Asserter::new()), &dir);
        let recorded = address!("1111111111111111111111111111111111111111");
        let given = address!("2222222222222222222222222222222222222222");

        // Nothing given or recorded
        assert_eq!(
            config.resolve(None, ContractKey::SmartPool, SMART_POOL_ADDRESS),
            SMART_POOL_ADDRESS
        );
        assert!(matches!(
            config.require(None, ContractKey::SmartPool),
            Err(ScriptError::MissingContract("SmartPool"))
        ));

        // A recorded address beats the fallback
        config.record(ContractKey::SmartPool, recorded).unwrap();
        assert_eq!(config.resolve(None, ContractKey::SmartPool, SMART_POOL_ADDRESS), recorded);
        assert_eq!(config.require(None, ContractKey::SmartPool).unwrap(), recorded);

        // An explicit argument beats both
        assert_eq!(
            config.resolve(Some(given), ContractKey::SmartPool, SMART_POOL_ADDRESS),
            given
        );
        assert_eq!(config.require(Some(given), ContractKey::SmartPool).unwrap(), given);

        // Other keys are unaffected
        assert_eq!(
            config.resolve(None, ContractKey::ReignDao, REIGN_DAO_ADDRESS),
            REIGN_DAO_ADDRESS
        );
    }
}
