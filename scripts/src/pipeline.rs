//! The chained deployment: each stage reads what the earlier ones recorded
//! in the deploy config and records what it deploys.
//!
//! Stages only act on contracts given on the command line or recorded by an
//! earlier stage. None of them fall back to a hardcoded address.

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, FixedBytes, B256, U256},
};
use tracing::info;

use crate::{
    cli::{
        ActivateArgs, CreateRewardsArgs, SetupSmartPoolArgs, SetupTokensArgs,
        TransferOwnershipArgs,
    },
    commands::{preflight, set_vault_allowance, transfer_ownership},
    config::{ContractKey, DeployConfig, EpochParams},
    constants::{
        token_amount, BASKET_BALANCER_ARTIFACT, BASKET_MAX_DELTA_TENTHS, FACET_CUT_ADD,
        GOV_REWARDS_ARTIFACT, POOL_ROUTER_ARTIFACT, POOL_ROUTER_FEE_FACTOR, REIGN_DAO_ARTIFACT,
        REIGN_DIAMOND_ARTIFACT, REIGN_FACET_ARTIFACTS, REIGN_TOKEN_ARTIFACT,
        REWARDS_DISTRIBUTION_ARTIFACT, REWARDS_VAULT_ARTIFACT, SMART_POOL_ADD_TOKEN_LOCK_BLOCKS,
        SMART_POOL_BALANCES, SMART_POOL_CAP_MULTIPLIER, SMART_POOL_INITIAL_SUPPLY_TOKENS,
        SMART_POOL_NAME, SMART_POOL_SWAP_FEE, SMART_POOL_SYMBOL, SMART_POOL_WEIGHT_CHANGE_BLOCKS,
        SMART_POOL_WEIGHT_TENTHS, SOV_TOKEN_ARTIFACT, SOV_WRAPPER_ARTIFACT, STAKING_ARTIFACT,
        TEN_POW_18, TEN_POW_8, VESTING_ROUTER_ARTIFACT, WRAPPING_REWARDS_ARTIFACT,
    },
    errors::ScriptError,
    solidity::{
        BasketBalancer, ConfigurableRightsPool, GovRewards, LibRewardsDistribution, ReignDAO,
        ReignFacet, ReignToken, SovWrapper, Staking, CRPFactory, ERC20,
    },
    types::Wallet,
    utils::{deploy_contract, function_selectors, run_steps, send_tx, Step},
};

/// The keys the Reign facets are recorded under, in cut order
const FACET_KEYS: [ContractKey; 5] = [
    ContractKey::DiamondCutFacet,
    ContractKey::DiamondLoupeFacet,
    ContractKey::OwnershipFacet,
    ContractKey::ReignFacet,
    ContractKey::EpochClockFacet,
];

/// Map a contract call error
fn interaction(e: alloy::contract::Error) -> ScriptError {
    ScriptError::ContractInteraction(e.to_string())
}

// -------
// | DAO |
// -------

/// A diamond cut adding every selector of `facet`
pub fn facet_cut(facet: Address, selectors: &[FixedBytes<4>]) -> DynSolValue {
    let selectors = selectors
        .iter()
        .map(|selector| DynSolValue::FixedBytes(B256::right_padding_from(selector.as_slice()), 4))
        .collect();

    DynSolValue::Tuple(vec![
        DynSolValue::Address(facet),
        DynSolValue::Uint(U256::from(FACET_CUT_ADD), 8),
        DynSolValue::Array(selectors),
    ])
}

/// Deploy the Reign facets, the diamond cut from them, and the DAO
pub async fn deploy_dao(config: &mut DeployConfig) -> Result<(), ScriptError> {
    info!("Deploying the Reign diamond");
    let provider = config.owner.provider().clone();
    let artifacts_dir = config.paths.artifacts_dir.clone();

    let mut cuts = Vec::with_capacity(REIGN_FACET_ARTIFACTS.len());
    for (name, key) in REIGN_FACET_ARTIFACTS.into_iter().zip(FACET_KEYS) {
        let selectors = function_selectors(&artifacts_dir, name)?;
        let facet = deploy_contract(&provider, &artifacts_dir, name, &[]).await?;
        config.record(key, facet)?;
        cuts.push(facet_cut(facet, &selectors));
    }

    let diamond_args = [DynSolValue::Array(cuts), DynSolValue::Address(config.owner.address())];
    let diamond =
        deploy_contract(&provider, &artifacts_dir, REIGN_DIAMOND_ARTIFACT, &diamond_args).await?;
    config.record(ContractKey::ReignDiamond, diamond)?;

    let dao = deploy_contract(&provider, &artifacts_dir, REIGN_DAO_ARTIFACT, &[]).await?;
    config.record(ContractKey::ReignDao, dao)
}

// ----------
// | Tokens |
// ----------

/// The REIGN allocation read from the rewards distribution library
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Allocation {
    pub team: U256,
    pub wrapping: U256,
    pub lp_rewards: U256,
    pub staking: U256,
    pub dev_fund: U256,
    pub treasury: U256,
    pub treasury_sale: U256,
}

impl Allocation {
    /// Read the allocation from the library deployed at `distribution`
    pub async fn fetch(provider: &Wallet, distribution: Address) -> Result<Self, ScriptError> {
        let lib = LibRewardsDistribution::new(distribution, provider.clone());

        Ok(Self {
            team: lib.TEAM().call().await.map_err(interaction)?,
            wrapping: lib.WRAPPING_TOKENS().call().await.map_err(interaction)?,
            lp_rewards: lib.LP_REWARDS_TOKENS().call().await.map_err(interaction)?,
            staking: lib.STAKING_TOKENS().call().await.map_err(interaction)?,
            dev_fund: lib.DEV_FUND().call().await.map_err(interaction)?,
            treasury: lib.TREASURY().call().await.map_err(interaction)?,
            treasury_sale: lib.TREASURY_SALE().call().await.map_err(interaction)?,
        })
    }

    /// The team allocation split over the owner and three users: half to the
    /// owner, a sixth to each user
    pub fn vesting_shares(&self) -> [U256; 4] {
        let sixth = self.team / U256::from(6);
        [self.team / U256::from(2), sixth, sixth, sixth]
    }
}

/// Deploy the tokens, the vaults, vesting, staking and gov rewards, then
/// mint the REIGN allocation
pub async fn setup_tokens(
    args: SetupTokensArgs,
    config: &mut DeployConfig,
) -> Result<(), ScriptError> {
    info!("Deploying tokens and vaults");
    let diamond = config.require(args.diamond, ContractKey::ReignDiamond)?;
    let dao = config.require(args.reign_dao, ContractKey::ReignDao)?;
    let owner = config.owner.address();
    let [user1, user2, user3] = match config.addresses.users.as_slice() {
        [user1, user2, user3, ..] => [*user1, *user2, *user3],
        _ => return Err(ScriptError::Config("vesting needs three users".to_string())),
    };

    let provider = config.owner.provider().clone();
    let artifacts_dir = config.paths.artifacts_dir.clone();

    let distribution =
        deploy_contract(&provider, &artifacts_dir, REWARDS_DISTRIBUTION_ARTIFACT, &[]).await?;
    config.record(ContractKey::RewardsDistribution, distribution)?;
    let allocation = Allocation::fetch(&provider, distribution).await?;

    let reign_token = deploy_contract(
        &provider,
        &artifacts_dir,
        REIGN_TOKEN_ARTIFACT,
        &[DynSolValue::Address(owner)],
    )
    .await?;
    config.record(ContractKey::ReignToken, reign_token)?;

    let sov_token = deploy_contract(
        &provider,
        &artifacts_dir,
        SOV_TOKEN_ARTIFACT,
        &[DynSolValue::Address(owner), DynSolValue::Address(Address::ZERO)],
    )
    .await?;
    config.record(ContractKey::SovToken, sov_token)?;

    let sov_wrapper = deploy_contract(&provider, &artifacts_dir, SOV_WRAPPER_ARTIFACT, &[]).await?;
    config.record(ContractKey::SovWrapper, sov_wrapper)?;

    let vault_args = [DynSolValue::Address(reign_token)];
    let mut vaults = [Address::ZERO; 3];
    let vault_keys =
        [ContractKey::RewardsVault, ContractKey::DevVault, ContractKey::TreasurySaleVault];
    for (vault, key) in vaults.iter_mut().zip(vault_keys) {
        *vault =
            deploy_contract(&provider, &artifacts_dir, REWARDS_VAULT_ARTIFACT, &vault_args).await?;
        config.record(key, *vault)?;
    }
    let [rewards_vault, dev_vault, treasury_sale_vault] = vaults;

    let beneficiaries = [owner, user1, user2, user3].map(DynSolValue::Address).to_vec();
    let shares = allocation.vesting_shares().map(|share| DynSolValue::Uint(share, 256)).to_vec();
    let vesting_router = deploy_contract(
        &provider,
        &artifacts_dir,
        VESTING_ROUTER_ARTIFACT,
        &[
            DynSolValue::Array(beneficiaries),
            DynSolValue::Array(shares),
            DynSolValue::Address(reign_token),
        ],
    )
    .await?;
    config.record(ContractKey::VestingRouter, vesting_router)?;

    let reign = ReignToken::new(reign_token, provider.clone());
    let mints = [
        ("VestingRouter", vesting_router, allocation.team),
        ("RewardsVault", rewards_vault, allocation.wrapping),
        ("RewardsVault", rewards_vault, allocation.lp_rewards),
        ("RewardsVault", rewards_vault, allocation.staking),
        ("DevVault", dev_vault, allocation.dev_fund),
        ("ReignDiamond", diamond, allocation.treasury),
        ("TreasurySaleVault", treasury_sale_vault, allocation.treasury_sale),
    ];
    let steps = mints
        .into_iter()
        .map(|(holder, to, amount)| {
            Step::new(
                format!("ReignToken minted: '{amount}' to addr '{to:#x}' ({holder})"),
                reign.mint(to, amount),
            )
        })
        .collect();
    run_steps(&provider, steps).await?;

    let staking = deploy_contract(&provider, &artifacts_dir, STAKING_ARTIFACT, &[]).await?;
    config.record(ContractKey::Staking, staking)?;

    let gov_rewards = deploy_contract(
        &provider,
        &artifacts_dir,
        GOV_REWARDS_ARTIFACT,
        &[
            DynSolValue::Address(reign_token),
            DynSolValue::Address(diamond),
            DynSolValue::Address(rewards_vault),
        ],
    )
    .await?;
    config.record(ContractKey::GovRewards, gov_rewards)?;

    set_vault_allowance(&provider, rewards_vault, gov_rewards, allocation.staking).await?;
    set_vault_allowance(&provider, dev_vault, dao, allocation.dev_fund).await?;
    set_vault_allowance(&provider, treasury_sale_vault, dao, allocation.treasury_sale).await
}

// --------------
// | Smart Pool |
// --------------

/// The synths the smart pool is created from, in pool order
fn pool_tokens(config: &DeployConfig) -> Result<[Address; 6], ScriptError> {
    let tokens = &config.addresses.tokens;
    let named = [
        ("sBTC", tokens.sbtc),
        ("sETH", tokens.seth),
        ("sCHF", tokens.schf),
        ("sUSD", tokens.susd),
        ("sXAU", tokens.sxau),
        ("sXAG", tokens.sxag),
    ];

    let mut pool_tokens = [Address::ZERO; 6];
    for (slot, (symbol, address)) in pool_tokens.iter_mut().zip(named) {
        *slot = address.ok_or_else(|| {
            ScriptError::Config(format!("no {symbol} address on {}", config.network))
        })?;
    }

    Ok(pool_tokens)
}

/// The parameters the smart pool is created with
pub fn pool_params(tokens: [Address; 6]) -> CRPFactory::PoolParams {
    let weight = U256::from(SMART_POOL_WEIGHT_TENTHS) * (TEN_POW_18 / U256::from(10));

    CRPFactory::PoolParams {
        poolTokenSymbol: SMART_POOL_SYMBOL.to_string(),
        poolTokenName: SMART_POOL_NAME.to_string(),
        constituentTokens: tokens.to_vec(),
        tokenBalances: SMART_POOL_BALANCES
            .iter()
            .map(|balance| U256::from(*balance) * TEN_POW_8)
            .collect(),
        tokenWeights: vec![weight; tokens.len()],
        swapFee: U256::from(SMART_POOL_SWAP_FEE),
    }
}

/// Create the smart pool, then deploy its router and the basket balancer
pub async fn setup_smart_pool(
    args: SetupSmartPoolArgs,
    config: &mut DeployConfig,
) -> Result<(), ScriptError> {
    info!("Setting up the smart pool");
    let diamond = config.require(args.diamond, ContractKey::ReignDiamond)?;
    let dao = config.require(args.reign_dao, ContractKey::ReignDao)?;
    let sov_wrapper = config.require(args.sov_wrapper, ContractKey::SovWrapper)?;
    let sov_token = config.require(args.sov_token, ContractKey::SovToken)?;

    let tokens = pool_tokens(config)?;
    let balancer_factory = config.addresses.balancer_factory.ok_or_else(|| {
        ScriptError::Config(format!("no Balancer factory on {}", config.network))
    })?;
    let smart_pool_factory = config.addresses.smart_pool_factory.ok_or_else(|| {
        ScriptError::Config(format!("no smart pool factory on {}", config.network))
    })?;

    let provider = config.owner.provider().clone();
    let artifacts_dir = config.paths.artifacts_dir.clone();

    // Create the pool
    let params = pool_params(tokens);
    let rights = CRPFactory::Rights {
        canPauseSwapping: true,
        canChangeSwapFee: true,
        canChangeWeights: true,
        canAddRemoveTokens: true,
        canWhitelistLPs: true,
        canChangeCap: true,
    };
    let factory = CRPFactory::new(smart_pool_factory, provider.clone());
    let smart_pool = factory
        .newCrp(balancer_factory, params.clone(), rights.clone())
        .call()
        .await
        .map_err(interaction)?;
    send_tx(factory.newCrp(balancer_factory, params.clone(), rights)).await?;
    info!("SmartPool connected at {smart_pool:#x}");
    config.record(ContractKey::SmartPool, smart_pool)?;

    let approvals = tokens
        .into_iter()
        .zip(params.tokenBalances)
        .map(|(token, balance)| {
            let token = ERC20::new(token, provider.clone());
            Step::new(
                format!("Approved {balance} of {:#x} for the smart pool", token.address()),
                token.approve(smart_pool, balance),
            )
        })
        .collect();
    run_steps(&provider, approvals).await?;

    let pool = ConfigurableRightsPool::new(smart_pool, provider.clone());
    send_tx(pool.createPool(
        token_amount(SMART_POOL_INITIAL_SUPPLY_TOKENS),
        U256::from(SMART_POOL_WEIGHT_CHANGE_BLOCKS),
        U256::from(SMART_POOL_ADD_TOKEN_LOCK_BLOCKS),
    ))
    .await?;
    info!("Smart pool initialized");

    let lp_supply = pool.totalSupply().call().await.map_err(interaction)?;
    let controller = pool.getController().call().await.map_err(interaction)?;
    info!("Initial LP supply: {}", lp_supply / TEN_POW_18);
    info!("Smart pool controlled by: {controller:#x}");

    // Route deposits through the pool router
    let router_args = [
        DynSolValue::Address(smart_pool),
        DynSolValue::Address(sov_wrapper),
        DynSolValue::Address(diamond),
        DynSolValue::Address(sov_token),
        DynSolValue::Uint(U256::from(POOL_ROUTER_FEE_FACTOR), 256),
    ];
    let pool_router =
        deploy_contract(&provider, &artifacts_dir, POOL_ROUTER_ARTIFACT, &router_args).await?;
    config.record(ContractKey::PoolRouter, pool_router)?;

    send_tx(pool.whitelistLiquidityProvider(pool_router)).await?;
    info!("PoolRouter whitelisted");

    let cap = lp_supply * U256::from(SMART_POOL_CAP_MULTIPLIER);
    send_tx(pool.setCap(cap)).await?;
    info!("Cap set at {} LP tokens", cap / TEN_POW_18);

    // Balance the basket
    let balancer_args = [
        DynSolValue::Address(diamond),
        DynSolValue::Address(dao),
        DynSolValue::Address(pool_router),
        DynSolValue::Uint(U256::from(BASKET_MAX_DELTA_TENTHS) * (TEN_POW_18 / U256::from(10)), 256),
    ];
    let basket_balancer =
        deploy_contract(&provider, &artifacts_dir, BASKET_BALANCER_ARTIFACT, &balancer_args)
            .await?;
    config.record(ContractKey::BasketBalancer, basket_balancer)?;

    let balancer = BasketBalancer::new(basket_balancer, provider);
    let tracked = balancer.getTokens().call().await.map_err(interaction)?;
    for token in tracked {
        let allocation = balancer.getTargetAllocation(token).call().await.map_err(interaction)?;
        info!("BasketBalancer weighting of {token:#x}: {allocation}");
    }

    Ok(())
}

// ------------
// | Activate |
// ------------

/// The contracts initialized on activation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Activation {
    pub diamond: Address,
    pub reign_dao: Address,
    pub reign_token: Address,
    pub staking: Address,
    pub sov_wrapper: Address,
    pub smart_pool: Address,
    pub pool_router: Address,
    pub basket_balancer: Address,
    pub gov_rewards: Address,
}

impl Activation {
    /// Resolve the contracts from the arguments and the records
    pub fn resolve(args: ActivateArgs, config: &DeployConfig) -> Result<Self, ScriptError> {
        Ok(Self {
            diamond: config.require(args.diamond, ContractKey::ReignDiamond)?,
            reign_dao: config.require(args.reign_dao, ContractKey::ReignDao)?,
            reign_token: config.require(args.reign_token, ContractKey::ReignToken)?,
            staking: config.require(args.staking, ContractKey::Staking)?,
            sov_wrapper: config.require(args.sov_wrapper, ContractKey::SovWrapper)?,
            smart_pool: config.require(args.smart_pool, ContractKey::SmartPool)?,
            pool_router: config.require(args.pool_router, ContractKey::PoolRouter)?,
            basket_balancer: config.require(args.basket_balancer, ContractKey::BasketBalancer)?,
            gov_rewards: config.require(args.gov_rewards, ContractKey::GovRewards)?,
        })
    }

    /// The initialization transactions, in the order they are sent
    pub fn steps(&self, provider: &Wallet, epoch: EpochParams) -> Vec<Step> {
        let reign_facet = ReignFacet::new(self.diamond, provider.clone());
        let dao = ReignDAO::new(self.reign_dao, provider.clone());
        let staking = Staking::new(self.staking, provider.clone());
        let sov_wrapper = SovWrapper::new(self.sov_wrapper, provider.clone());
        let gov_rewards = GovRewards::new(self.gov_rewards, provider.clone());

        vec![
            Step::new(
                format!("Reign initialized, epoch 1 starts at {}", epoch.start_ts),
                reign_facet.initReign(
                    self.reign_token,
                    U256::from(epoch.start_ts),
                    U256::from(epoch.duration),
                ),
            ),
            Step::new(
                format!("ReignDAO initialized at {:#x}", self.reign_dao),
                dao.initialize(self.diamond, self.basket_balancer, self.smart_pool),
            ),
            Step::new(
                format!("Staking initialized at {:#x}", self.staking),
                staking.initialize(self.diamond),
            ),
            Step::new(
                format!("SovWrapper initialized at {:#x}", self.sov_wrapper),
                sov_wrapper.initialize(
                    self.diamond,
                    self.reign_dao,
                    self.smart_pool,
                    self.pool_router,
                ),
            ),
            Step::new(
                format!("GovRewards initialized at {:#x}", self.gov_rewards),
                gov_rewards.initialize(),
            ),
        ]
    }
}

/// Initialize the diamond, the DAO, staking, the wrapper and gov rewards
pub async fn activate(args: ActivateArgs, config: &mut DeployConfig) -> Result<(), ScriptError> {
    info!("Activating contracts");
    let activation = Activation::resolve(args, config)?;
    let provider = config.owner.provider().clone();

    run_steps(&provider, activation.steps(&provider, config.epoch)).await
}

// -----------
// | Rewards |
// -----------

/// Deploy the wrapping rewards and fund the reward allowances from the REIGN
/// allocation
pub async fn create_rewards(
    args: CreateRewardsArgs,
    config: &mut DeployConfig,
) -> Result<(), ScriptError> {
    info!("Creating rewards");
    let reign_token = config.require(args.reign_token, ContractKey::ReignToken)?;
    let basket_balancer = config.require(args.basket_balancer, ContractKey::BasketBalancer)?;
    let sov_wrapper = config.require(args.sov_wrapper, ContractKey::SovWrapper)?;
    let rewards_vault = config.require(args.rewards_vault, ContractKey::RewardsVault)?;
    let diamond = config.require(args.diamond, ContractKey::ReignDiamond)?;
    let gov_rewards = config.require(args.gov_rewards, ContractKey::GovRewards)?;

    let provider = config.owner.provider().clone();
    let artifacts_dir = config.paths.artifacts_dir.clone();

    let recorded = args
        .rewards_distribution
        .or_else(|| config.contract(ContractKey::RewardsDistribution));
    let distribution = match recorded {
        Some(distribution) => distribution,
        None => {
            let distribution =
                deploy_contract(&provider, &artifacts_dir, REWARDS_DISTRIBUTION_ARTIFACT, &[])
                    .await?;
            config.record(ContractKey::RewardsDistribution, distribution)?;
            distribution
        },
    };
    let allocation = Allocation::fetch(&provider, distribution).await?;

    // The diamond collects the wrapping fees
    let wrapping_args = [
        DynSolValue::Address(reign_token),
        DynSolValue::Address(basket_balancer),
        DynSolValue::Address(sov_wrapper),
        DynSolValue::Address(rewards_vault),
        DynSolValue::Address(diamond),
    ];
    let wrapping_rewards =
        deploy_contract(&provider, &artifacts_dir, WRAPPING_REWARDS_ARTIFACT, &wrapping_args)
            .await?;
    config.record(ContractKey::WrappingRewards, wrapping_rewards)?;

    set_vault_allowance(&provider, rewards_vault, wrapping_rewards, allocation.wrapping).await?;
    set_vault_allowance(&provider, rewards_vault, gov_rewards, allocation.staking).await
}

// ------------
// | Pipeline |
// ------------

/// Run every stage in order on one config, from an empty chain to a DAO
/// owning the protocol
pub async fn deploy_all(config: &mut DeployConfig) -> Result<(), ScriptError> {
    preflight(config).await?;
    deploy_dao(config).await?;
    setup_tokens(SetupTokensArgs::default(), config).await?;
    setup_smart_pool(SetupSmartPoolArgs::default(), config).await?;
    activate(ActivateArgs::default(), config).await?;
    create_rewards(CreateRewardsArgs::default(), config).await?;
    transfer_ownership(TransferOwnershipArgs::default(), config).await?;

    info!("Deployment complete, DAO at {:#x}", config.contracts.reign_dao.unwrap_or_default());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use alloy::{
        primitives::{address, TxKind},
        providers::mock::Asserter,
        sol_types::SolCall,
    };

    use super::*;
    use crate::{
        test_helpers::{
            mock_provider, push_call_return, push_deployment, push_mined_tx, scratch_dir,
            selector_of,
        },
        utils::{deploy_code, Artifact},
    };

    /// A diamond artifact whose constructor takes the facet cuts and owner
    const DIAMOND_ARTIFACT_JSON: &str = r#"{
        "contractName": "ReignDiamond",
        "abi": [
            {
                "type": "constructor",
                "stateMutability": "payable",
                "inputs": [
                    {
                        "name": "_diamondCut",
                        "type": "tuple[]",
                        "internalType": "struct IDiamondCut.FacetCut[]",
                        "components": [
                            { "name": "facetAddress", "type": "address", "internalType": "address" },
                            { "name": "action", "type": "uint8", "internalType": "enum IDiamondCut.FacetCutAction" },
                            { "name": "functionSelectors", "type": "bytes4[]", "internalType": "bytes4[]" }
                        ]
                    },
                    { "name": "_owner", "type": "address", "internalType": "address" }
                ]
            }
        ],
        "bytecode": "0x6080604052"
    }"#;

    /// A wrapping rewards artifact with its five address constructor
    const WRAPPING_REWARDS_ARTIFACT_JSON: &str = r#"{
        "contractName": "WrappingRewards",
        "abi": [
            {
                "type": "constructor",
                "stateMutability": "nonpayable",
                "inputs": [
                    { "name": "_reignAddress", "type": "address", "internalType": "address" },
                    { "name": "_balancer", "type": "address", "internalType": "address" },
                    { "name": "_sovWrapper", "type": "address", "internalType": "address" },
                    { "name": "_rewardsVault", "type": "address", "internalType": "address" },
                    { "name": "_treasury", "type": "address", "internalType": "address" }
                ]
            }
        ],
        "bytecode": "0x6080604052"
    }"#;

    /// An artifact without a constructor exposing one function
    fn facet_artifact(name: &str, function: &str) -> String {
        format!(
            r#"{{
                "contractName": "{name}",
                "abi": [
                    {{
                        "type": "function",
                        "name": "{function}",
                        "stateMutability": "view",
                        "inputs": [],
                        "outputs": [{{ "name": "", "type": "uint256", "internalType": "uint256" }}]
                    }}
                ],
                "bytecode": "0x6080"
            }}"#
        )
    }

    /// A config answering from `asserter`, with its files under a fresh
    /// scratch directory
    fn mock_config(asserter: &Asserter, name: &str) -> DeployConfig {
        let dir = scratch_dir(name);
        let config = DeployConfig::with_provider(mock_provider(asserter), &dir);
        fs::create_dir_all(&config.paths.artifacts_dir).unwrap();
        config
    }

    fn write_artifact(config: &DeployConfig, name: &str, contents: &str) {
        fs::write(config.paths.artifacts_dir.join(format!("{name}.json")), contents).unwrap();
    }

    /// Queue the seven allocation reads, `1..=7` whole tokens each
    fn push_allocation(asserter: &Asserter) -> Allocation {
        let [team, wrapping, lp_rewards, staking, dev_fund, treasury, treasury_sale] =
            [1u64, 2, 3, 4, 5, 6, 7].map(token_amount);
        for amount in [team, wrapping, lp_rewards, staking, dev_fund, treasury, treasury_sale] {
            push_call_return(asserter, amount);
        }

        Allocation { team, wrapping, lp_rewards, staking, dev_fund, treasury, treasury_sale }
    }

    fn activation() -> Activation {
        Activation {
            diamond: address!("6000000000000000000000000000000000000001"),
            reign_dao: address!("6000000000000000000000000000000000000002"),
            reign_token: address!("6000000000000000000000000000000000000003"),
            staking: address!("6000000000000000000000000000000000000004"),
            sov_wrapper: address!("6000000000000000000000000000000000000005"),
            smart_pool: address!("6000000000000000000000000000000000000006"),
            pool_router: address!("6000000000000000000000000000000000000007"),
            basket_balancer: address!("6000000000000000000000000000000000000008"),
            gov_rewards: address!("6000000000000000000000000000000000000009"),
        }
    }

    #[test]
    fn test_facet_cut_encodes_for_diamond_constructor() {
        let artifact: Artifact = serde_json::from_str(DIAMOND_ARTIFACT_JSON).unwrap();
        let facet = address!("7000000000000000000000000000000000000001");
        let owner = address!("7000000000000000000000000000000000000002");
        let selectors: [FixedBytes<4>; 2] =
            [ERC20::balanceOfCall::SELECTOR.into(), ERC20::approveCall::SELECTOR.into()];

        let args = [
            DynSolValue::Array(vec![facet_cut(facet, &selectors)]),
            DynSolValue::Address(owner),
        ];
        let code = deploy_code(&artifact, &args).unwrap();

        // Two head words, the array length and offset, three tuple words,
        // then the selector array
        let bytecode_len = artifact.bytecode.len();
        assert_eq!(code.len(), bytecode_len + 32 * 10);
        assert_eq!(code[code.len() - 64..code.len() - 60], ERC20::balanceOfCall::SELECTOR);
        assert_eq!(code[code.len() - 32..code.len() - 28], ERC20::approveCall::SELECTOR);
        assert_eq!(&code[bytecode_len + 32 + 12..bytecode_len + 64], owner.as_slice());
    }

    #[test]
    fn test_pool_params() {
        let tokens = [1u8, 2, 3, 4, 5, 6].map(Address::repeat_byte);
        let params = pool_params(tokens);

        assert_eq!(params.poolTokenSymbol, "SOV-LP");
        assert_eq!(params.constituentTokens, tokens.to_vec());
        assert_eq!(params.tokenBalances[0], TEN_POW_8);
        assert_eq!(params.tokenBalances[3], U256::from(45_000) * TEN_POW_8);
        assert!(params.tokenWeights.iter().all(|w| *w == U256::from(3) * TEN_POW_18));
        assert_eq!(params.swapFee, U256::from(5) * U256::from(10).pow(U256::from(15)));
    }

    #[test]
    fn test_vesting_shares() {
        let allocation = Allocation {
            team: U256::from(600),
            wrapping: U256::ZERO,
            lp_rewards: U256::ZERO,
            staking: U256::ZERO,
            dev_fund: U256::ZERO,
            treasury: U256::ZERO,
            treasury_sale: U256::ZERO,
        };

        assert_eq!(allocation.vesting_shares(), [300, 100, 100, 100].map(U256::from));
    }

    #[test]
    fn test_activation_order() {
        let asserter = Asserter::new();
        let activation = activation();
        let epoch = EpochParams { start_ts: 1_700_000_000, duration: 604_800 };
        let steps = activation.steps(&mock_provider(&asserter), epoch);

        let calls: Vec<_> = steps
            .iter()
            .map(|step| (step.tx.to, selector_of(step.tx.input.input().unwrap())))
            .collect();
        assert_eq!(
            calls,
            vec![
                (Some(TxKind::Call(activation.diamond)), ReignFacet::initReignCall::SELECTOR),
                (Some(TxKind::Call(activation.reign_dao)), ReignDAO::initializeCall::SELECTOR),
                (Some(TxKind::Call(activation.staking)), Staking::initializeCall::SELECTOR),
                (Some(TxKind::Call(activation.sov_wrapper)), SovWrapper::initializeCall::SELECTOR),
                (Some(TxKind::Call(activation.gov_rewards)), GovRewards::initializeCall::SELECTOR),
            ]
        );

        let init_reign = ReignFacet::initReignCall::abi_decode(steps[0].tx.input.input().unwrap())
            .unwrap();
        assert_eq!(init_reign.reignToken, activation.reign_token);
        assert_eq!(init_reign.epoch1Start, U256::from(epoch.start_ts));
        assert_eq!(init_reign.epochDuration, U256::from(epoch.duration));
    }

    #[tokio::test]
    async fn test_activate_needs_recorded_contracts() {
        let asserter = Asserter::new();
        let mut config = mock_config(&asserter, "activate-missing");

        let res = activate(ActivateArgs::default(), &mut config).await;
        assert!(matches!(res, Err(ScriptError::MissingContract("ReignDiamond"))));
    }

    #[tokio::test]
    async fn test_activate_sends_every_step() {
        let asserter = Asserter::new();
        let mut config = mock_config(&asserter, "activate");
        let activation = activation();
        for (key, address) in [
            (ContractKey::ReignDiamond, activation.diamond),
            (ContractKey::ReignDao, activation.reign_dao),
            (ContractKey::ReignToken, activation.reign_token),
            (ContractKey::Staking, activation.staking),
            (ContractKey::SovWrapper, activation.sov_wrapper),
            (ContractKey::SmartPool, activation.smart_pool),
            (ContractKey::PoolRouter, activation.pool_router),
            (ContractKey::BasketBalancer, activation.basket_balancer),
            (ContractKey::GovRewards, activation.gov_rewards),
        ] {
            config.record(key, address).unwrap();
        }
        for index in 1..=5 {
            push_mined_tx(&asserter, index, true);
        }

        activate(ActivateArgs::default(), &mut config).await.unwrap();
    }

    #[tokio::test]
    async fn test_allocation_fetch() {
        let asserter = Asserter::new();
        let expected = push_allocation(&asserter);

        let distribution = address!("8000000000000000000000000000000000000001");
        let allocation = Allocation::fetch(&mock_provider(&asserter), distribution).await.unwrap();

        assert_eq!(allocation, expected);
    }

    #[tokio::test]
    async fn test_deploy_dao_records_facets_and_diamond() {
        let asserter = Asserter::new();
        let mut config = mock_config(&asserter, "deploy-dao");
        for (i, name) in REIGN_FACET_ARTIFACTS.iter().enumerate() {
            write_artifact(&config, name, &facet_artifact(name, &format!("facetFunction{i}")));
        }
        write_artifact(&config, REIGN_DIAMOND_ARTIFACT, DIAMOND_ARTIFACT_JSON);
        write_artifact(
            &config,
            REIGN_DAO_ARTIFACT,
            r#"{ "contractName": "ReignDAO", "abi": [], "bytecode": "0x6080" }"#,
        );

        let deployed: Vec<_> = (1..=7u8).map(Address::repeat_byte).collect();
        for (index, address) in (1..).zip(&deployed) {
            push_deployment(&asserter, index, *address);
        }

        deploy_dao(&mut config).await.unwrap();

        let facets: Vec<_> = FACET_KEYS.iter().map(|key| config.contract(*key).unwrap()).collect();
        assert_eq!(facets, deployed[..5]);
        assert_eq!(config.contracts.reign_diamond, Some(deployed[5]));
        assert_eq!(config.contracts.reign_dao, Some(deployed[6]));
    }

    #[tokio::test]
    async fn test_setup_tokens_needs_three_users() {
        let asserter = Asserter::new();
        let mut config = mock_config(&asserter, "setup-tokens-users");
        config.record(ContractKey::ReignDiamond, Address::repeat_byte(1)).unwrap();
        config.record(ContractKey::ReignDao, Address::repeat_byte(2)).unwrap();
        config.addresses.users.truncate(2);

        let res = setup_tokens(SetupTokensArgs::default(), &mut config).await;

        assert!(matches!(res, Err(ScriptError::Config(_))));
        assert_eq!(config.contracts.rewards_distribution, None);
    }

    #[tokio::test]
    async fn test_setup_smart_pool_needs_synths() {
        let asserter = Asserter::new();
        let mut config = mock_config(&asserter, "smart-pool-synths");
        for (key, byte) in [
            (ContractKey::ReignDiamond, 1),
            (ContractKey::ReignDao, 2),
            (ContractKey::SovWrapper, 3),
            (ContractKey::SovToken, 4),
        ] {
            config.record(key, Address::repeat_byte(byte)).unwrap();
        }
        config.addresses.tokens.sxag = None;

        let res = setup_smart_pool(SetupSmartPoolArgs::default(), &mut config).await;

        assert!(matches!(res, Err(ScriptError::Config(msg)) if msg.contains("sXAG")));
        assert_eq!(config.contracts.smart_pool, None);
    }

    #[tokio::test]
    async fn test_create_rewards_reuses_distribution() {
        let asserter = Asserter::new();
        let mut config = mock_config(&asserter, "create-rewards");
        write_artifact(&config, WRAPPING_REWARDS_ARTIFACT, WRAPPING_REWARDS_ARTIFACT_JSON);
        for (key, byte) in [
            (ContractKey::ReignToken, 1),
            (ContractKey::BasketBalancer, 2),
            (ContractKey::SovWrapper, 3),
            (ContractKey::RewardsVault, 4),
            (ContractKey::ReignDiamond, 5),
            (ContractKey::GovRewards, 6),
            (ContractKey::RewardsDistribution, 7),
        ] {
            config.record(key, Address::repeat_byte(byte)).unwrap();
        }

        let wrapping_rewards = address!("9000000000000000000000000000000000000001");
        push_allocation(&asserter);
        push_deployment(&asserter, 1, wrapping_rewards);
        push_mined_tx(&asserter, 2, true);
        push_mined_tx(&asserter, 3, true);

        create_rewards(CreateRewardsArgs::default(), &mut config).await.unwrap();

        assert_eq!(config.contracts.wrapping_rewards, Some(wrapping_rewards));
        assert_eq!(config.contracts.rewards_distribution, Some(Address::repeat_byte(7)));
    }
}
