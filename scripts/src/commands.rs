//! Implementations of the deploy scripts

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, U256},
};
use tracing::{info, warn};

use crate::{
    accounts::SignerSet,
    cli::{
        ApproveDepositArgs, BarnTransferOwnershipArgs, DeployGovRewardsArgs, DeployLpRewardsArgs,
        DeployWrappingRewardsArgs, DistributeReignArgs, FundOwnerArgs, InitEpochArgs,
        InitLpRewardsArgs, InitReignArgs, SetAllowanceArgs, SetPoolControllerArgs,
        TransferOwnershipArgs, TransferPoolOwnershipArgs,
    },
    config::{ContractKey, DeployConfig},
    constants::{
        token_amount, BARN_DIAMOND_ADDRESS, BARN_GOVERNANCE_ADDRESS, BASKET_BALANCER_ADDRESS,
        ERC20_MOCK_ARTIFACT, GOV_REWARDS_ARTIFACT, GOV_REWARDS_REIGN_TOKEN_ADDRESS,
        GOV_REWARDS_VAULT_ADDRESS, LEGACY_REIGN_DAO_ADDRESS, LEGACY_SMART_POOL_ADDRESS,
        LP_REWARDS_ARTIFACT, POOL_ROUTER_ADDRESS, REIGN_DAO_ADDRESS, REIGN_DIAMOND_ADDRESS,
        REIGN_LP_REWARDS_ADDRESS, REIGN_TOKEN_ADDRESS, REWARDS_VAULT_ADDRESS, SBTC_MOCK_ADDRESS,
        SMART_POOL_ADDRESS, SOV_LP_REWARDS_ADDRESS, SOV_WRAPPER_ADDRESS, STAKING_ADDRESS,
        TREASURY_ADDRESS, WRAPPING_REWARDS_ADDRESS, WRAPPING_REWARDS_ARTIFACT,
    },
    errors::ScriptError,
    solidity::{
        ConfigurableRightsPool, LPRewards, OwnershipFacet, PoolRouter, ReignFacet, ReignToken,
        RewardsVault, SovToken, Staking, UniswapV2Factory, UniswapV2Router, ERC20,
    },
    types::Wallet,
    utils::{deploy_contract, has_code, run_steps, send_tx, setup_provider, Step},
};

/// Log the addresses of the local signers
pub fn list_accounts(signers: &SignerSet) {
    for address in signers.addresses() {
        info!("{address:#x}");
    }
}

/// Check that the external contracts the scripts depend on are deployed
pub async fn preflight(config: &DeployConfig) -> Result<(), ScriptError> {
    info!("Preflight on {} via {}", config.network, config.rpc_url);
    let provider = &setup_provider(&config.rpc_url)?;

    let addresses = &config.addresses;
    let mut contracts = addresses.tokens.named();
    contracts.push(("UniswapV2Factory", addresses.uniswap_factory));
    contracts.push(("UniswapV2Router", addresses.uniswap_router));
    let optional = [
        ("BalancerFactory", addresses.balancer_factory),
        ("SmartPoolFactory", addresses.smart_pool_factory),
        ("BtcOracle", addresses.btc_oracle),
        ("WethOracle", addresses.weth_oracle),
    ];
    contracts.extend(optional.into_iter().filter_map(|(name, addr)| Some((name, addr?))));

    let mut missing = Vec::new();
    for (name, address) in contracts {
        if has_code(provider, address).await? {
            info!("{name} connected at: {address:#x}");
        } else {
            warn!("{name} has no code at {address:#x}");
            missing.push(name);
        }
    }

    if !missing.is_empty() {
        return Err(ScriptError::ContractInteraction(format!(
            "no code deployed for {}",
            missing.join(", ")
        )));
    }

    let router = UniswapV2Router::new(addresses.uniswap_router, provider.clone());
    let router_factory = router
        .factory()
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
    if router_factory != addresses.uniswap_factory {
        warn!(
            "UniswapV2Router points at factory {router_factory:#x}, expected {:#x}",
            addresses.uniswap_factory
        );
    }

    for user in &config.users {
        info!("User account: {:#x}", user.address());
    }

    let amounts = &config.amounts;
    info!(
        "REIGN total: {}, base delta: {}, rewards: {}",
        amounts.reign_total, amounts.base_delta, amounts.rewards
    );
    info!("Epoch 1 starts at {} and lasts {}s", config.epoch.start_ts, config.epoch.duration);

    Ok(())
}

/// Transfer sUSD from the impersonated whale to the owner
pub async fn fund_owner(args: FundOwnerArgs, config: &DeployConfig) -> Result<(), ScriptError> {
    let whale = config.susd_whale.as_ref().ok_or(ScriptError::MissingAccount("sUSD whale"))?;
    let susd = config
        .addresses
        .tokens
        .susd
        .ok_or_else(|| ScriptError::Config(format!("no sUSD address on {}", config.network)))?;
    let owner = config.owner.address();
    let amount = token_amount(args.amount);

    let token = ERC20::new(susd, whale.provider().clone());
    send_tx(token.transfer(owner, amount).from(whale.address())).await?;
    info!("Transferred {amount} sUSD from {:#x} to {owner:#x}", whale.address());

    let balance = ERC20::new(susd, config.owner.provider().clone())
        .balanceOf(owner)
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
    info!("Owner sUSD balance: {balance}");

    Ok(())
}

/// Deploy the mock token standing in for sBTC
pub async fn deploy_tokens(config: &mut DeployConfig) -> Result<(), ScriptError> {
    let provider = config.owner.provider().clone();
    let sbtc = deploy_contract(&provider, &config.paths.artifacts_dir, ERC20_MOCK_ARTIFACT, &[])
        .await?;

    config.record(ContractKey::SbtcMock, sbtc)
}

/// Mint the REIGN shares of the owner, the rewards vault and two users
pub async fn distribute_reign(
    args: DistributeReignArgs,
    config: &mut DeployConfig,
) -> Result<(), ScriptError> {
    let [user1, user2] = match config.addresses.users.as_slice() {
        [user1, user2, ..] => [*user1, *user2],
        _ => return Err(ScriptError::Config("distributing REIGN needs two users".to_string())),
    };
    let reign_token =
        config.resolve(args.reign_token, ContractKey::ReignToken, REIGN_TOKEN_ADDRESS);
    let rewards_vault =
        config.resolve(args.rewards_vault, ContractKey::RewardsVault, REWARDS_VAULT_ADDRESS);

    let amounts = &config.amounts;
    let shares = [
        ("owner", config.owner.address(), amounts.reign_to_owner),
        ("rewards vault", rewards_vault, amounts.reign_to_rewards_vault),
        ("user1", user1, amounts.reign_to_user1),
        ("user2", user2, amounts.reign_to_user2),
    ];

    let reign = ReignToken::new(reign_token, config.owner.provider().clone());
    for (holder, to, amount) in shares {
        send_tx(reign.mint(to, amount)).await?;
        info!("ReignToken minted: '{amount}' to addr '{to:#x}' ({holder})");
    }

    config.record(ContractKey::ReignToken, reign_token)?;
    config.record(ContractKey::RewardsVault, rewards_vault)
}

/// Initialize the Reign diamond with the configured epoch timing
pub async fn init_reign(args: InitReignArgs, config: &mut DeployConfig) -> Result<(), ScriptError> {
    let diamond = config.resolve(args.diamond, ContractKey::ReignDiamond, REIGN_DIAMOND_ADDRESS);
    let reign_token =
        config.resolve(args.reign_token, ContractKey::ReignToken, REIGN_TOKEN_ADDRESS);
    let epoch = config.epoch;
    info!("Calling initReign() at '{diamond:#x}'");

    let reign_facet = ReignFacet::new(diamond, config.owner.provider().clone());
    send_tx(reign_facet.initReign(
        reign_token,
        U256::from(epoch.start_ts),
        U256::from(epoch.duration),
    ))
    .await?;
    info!("Reign initialized, epoch 1 starts at {}", epoch.start_ts);

    config.record(ContractKey::ReignDiamond, diamond)
}

/// Initialize a staking epoch for the given tokens
pub async fn init_epoch(args: InitEpochArgs, config: &mut DeployConfig) -> Result<(), ScriptError> {
    let staking_address = config.resolve(args.staking, ContractKey::Staking, STAKING_ADDRESS);
    let staking = Staking::new(staking_address, config.owner.provider().clone());
    send_tx(staking.initEpochForTokens(args.tokens.clone(), args.epoch)).await?;

    for token in &args.tokens {
        info!("Epoch {} initialized for {token:#x}", args.epoch);
    }

    config.record(ContractKey::Staking, staking_address)
}

/// Set a rewards vault allowance
pub async fn set_allowance(
    args: SetAllowanceArgs,
    config: &DeployConfig,
) -> Result<(), ScriptError> {
    let rewards_vault =
        config.resolve(args.rewards_vault, ContractKey::RewardsVault, REWARDS_VAULT_ADDRESS);
    let spender =
        config.resolve(args.spender, ContractKey::WrappingRewards, WRAPPING_REWARDS_ADDRESS);

    set_vault_allowance(config.owner.provider(), rewards_vault, spender, token_amount(args.amount))
        .await
}

/// Let `spender` pull `amount` REIGN from a vault
pub(crate) async fn set_vault_allowance(
    provider: &Wallet,
    vault: Address,
    spender: Address,
    amount: U256,
) -> Result<(), ScriptError> {
    let vault = RewardsVault::new(vault, provider.clone());
    send_tx(vault.setAllowance(spender, amount)).await?;
    info!("Allowance set to : '{spender:#x}'");

    Ok(())
}

/// Deploy the governance rewards contract and let it draw on the vault.
///
/// Without arguments or records this targets the token and vault the
/// governance rewards were first deployed against.
pub async fn deploy_gov_rewards(
    args: DeployGovRewardsArgs,
    config: &mut DeployConfig,
) -> Result<(), ScriptError> {
    let [reign_token, diamond, rewards_vault] = gov_rewards_targets(&args, config);

    let provider = config.owner.provider().clone();
    let constructor_args = [
        DynSolValue::Address(reign_token),
        DynSolValue::Address(diamond),
        DynSolValue::Address(rewards_vault),
    ];

    let gov_rewards = deploy_contract(
        &provider,
        &config.paths.artifacts_dir,
        GOV_REWARDS_ARTIFACT,
        &constructor_args,
    )
    .await?;
    config.record(ContractKey::GovRewards, gov_rewards)?;

    set_vault_allowance(&provider, rewards_vault, gov_rewards, token_amount(args.allowance)).await
}

/// The REIGN token, diamond and rewards vault the governance rewards are
/// deployed against
fn gov_rewards_targets(args: &DeployGovRewardsArgs, config: &DeployConfig) -> [Address; 3] {
    [
        config.resolve(args.reign_token, ContractKey::ReignToken, GOV_REWARDS_REIGN_TOKEN_ADDRESS),
        config.resolve(args.diamond, ContractKey::ReignDiamond, REIGN_DIAMOND_ADDRESS),
        config.resolve(args.rewards_vault, ContractKey::RewardsVault, GOV_REWARDS_VAULT_ADDRESS),
    ]
}

/// Deploy the wrapping rewards contract and let it draw on the vault
pub async fn deploy_wrapping_rewards(
    args: DeployWrappingRewardsArgs,
    config: &mut DeployConfig,
) -> Result<(), ScriptError> {
    let reign_token =
        config.resolve(args.reign_token, ContractKey::ReignToken, REIGN_TOKEN_ADDRESS);
    let basket_balancer = config.resolve(
        args.basket_balancer,
        ContractKey::BasketBalancer,
        BASKET_BALANCER_ADDRESS,
    );
    let sov_wrapper =
        config.resolve(args.sov_wrapper, ContractKey::SovWrapper, SOV_WRAPPER_ADDRESS);
    let rewards_vault =
        config.resolve(args.rewards_vault, ContractKey::RewardsVault, REWARDS_VAULT_ADDRESS);
    let treasury = args.treasury.unwrap_or(TREASURY_ADDRESS);

    let provider = config.owner.provider().clone();
    let constructor_args = [
        DynSolValue::Address(reign_token),
        DynSolValue::Address(basket_balancer),
        DynSolValue::Address(sov_wrapper),
        DynSolValue::Address(rewards_vault),
        DynSolValue::Address(treasury),
    ];

    let wrapping_rewards = deploy_contract(
        &provider,
        &config.paths.artifacts_dir,
        WRAPPING_REWARDS_ARTIFACT,
        &constructor_args,
    )
    .await?;
    config.record(ContractKey::WrappingRewards, wrapping_rewards)?;

    set_vault_allowance(&provider, rewards_vault, wrapping_rewards, token_amount(args.allowance))
        .await
}

/// Create the REIGN pair on the Uniswap V2 factory and deploy LP rewards
/// for it
pub async fn deploy_lp_rewards(
    args: DeployLpRewardsArgs,
    config: &mut DeployConfig,
) -> Result<(), ScriptError> {
    let reign_token =
        config.resolve(args.reign_token, ContractKey::ReignToken, REIGN_TOKEN_ADDRESS);
    let paired_token = config.resolve(args.paired_token, ContractKey::SbtcMock, SBTC_MOCK_ADDRESS);
    let staking = config.resolve(args.staking, ContractKey::Staking, STAKING_ADDRESS);
    let rewards_vault =
        config.resolve(args.rewards_vault, ContractKey::RewardsVault, REWARDS_VAULT_ADDRESS);

    let provider = config.owner.provider().clone();
    let factory = UniswapV2Factory::new(config.addresses.uniswap_factory, provider.clone());
    info!("UniswapV2Factory connected at: {:#x}", config.addresses.uniswap_factory);

    let mut pair = get_pair(&factory, reign_token, paired_token).await?;
    if pair == Address::ZERO {
        send_tx(factory.createPair(reign_token, paired_token)).await?;
        pair = get_pair(&factory, reign_token, paired_token).await?;
    } else {
        warn!("Pair already exists, reusing it");
    }
    info!("REIGN pair at: {pair:#x}");
    config.record(ContractKey::ReignPair, pair)?;

    let constructor_args = [
        DynSolValue::Address(reign_token),
        DynSolValue::Address(pair),
        DynSolValue::Address(staking),
        DynSolValue::Address(rewards_vault),
        DynSolValue::Uint(token_amount(args.amount), 256),
    ];
    let lp_rewards = deploy_contract(
        &provider,
        &config.paths.artifacts_dir,
        LP_REWARDS_ARTIFACT,
        &constructor_args,
    )
    .await?;

    config.record(ContractKey::ReignLpRewards, lp_rewards)
}

/// Look up the pair for two tokens, zero if none exists
async fn get_pair(
    factory: &UniswapV2Factory::UniswapV2FactoryInstance<Wallet>,
    token_a: Address,
    token_b: Address,
) -> Result<Address, ScriptError> {
    factory
        .getPair(token_a, token_b)
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
}

/// Initialize each of the given LP rewards contracts, by default those of
/// the SoV and REIGN pairs
pub async fn init_lp_rewards(
    args: InitLpRewardsArgs,
    config: &DeployConfig,
) -> Result<(), ScriptError> {
    let lp_rewards = if args.lp_rewards.is_empty() {
        vec![
            SOV_LP_REWARDS_ADDRESS,
            config.resolve(None, ContractKey::ReignLpRewards, REIGN_LP_REWARDS_ADDRESS),
        ]
    } else {
        args.lp_rewards
    };

    for address in lp_rewards {
        let contract = LPRewards::new(address, config.owner.provider().clone());
        send_tx(contract.initialize()).await?;
        info!("LPRewards initialized at: {address:#x}");
    }

    Ok(())
}

/// Make the DAO the controller of the current smart pool
pub async fn set_pool_controller(
    args: SetPoolControllerArgs,
    config: &mut DeployConfig,
) -> Result<(), ScriptError> {
    let smart_pool = config.resolve(args.smart_pool, ContractKey::SmartPool, SMART_POOL_ADDRESS);
    let controller = config.resolve(args.controller, ContractKey::ReignDao, REIGN_DAO_ADDRESS);

    hand_over_pool(smart_pool, controller, config).await?;
    config.record(ContractKey::SmartPool, smart_pool)?;
    config.record(ContractKey::ReignDao, controller)
}

/// Make the first DAO the controller of the first smart pool. The handover
/// is recorded under the legacy keys so the current pool's records survive.
pub async fn transfer_pool_ownership(
    args: TransferPoolOwnershipArgs,
    config: &mut DeployConfig,
) -> Result<(), ScriptError> {
    let smart_pool =
        config.resolve(args.smart_pool, ContractKey::LegacySmartPool, LEGACY_SMART_POOL_ADDRESS);
    let controller =
        config.resolve(args.controller, ContractKey::LegacyReignDao, LEGACY_REIGN_DAO_ADDRESS);

    hand_over_pool(smart_pool, controller, config).await?;
    config.record(ContractKey::LegacySmartPool, smart_pool)?;
    config.record(ContractKey::LegacyReignDao, controller)
}

/// Call `setController` on a smart pool
async fn hand_over_pool(
    smart_pool: Address,
    controller: Address,
    config: &DeployConfig,
) -> Result<(), ScriptError> {
    let pool = ConfigurableRightsPool::new(smart_pool, config.owner.provider().clone());
    send_tx(pool.setController(controller)).await?;
    info!("Controller of {smart_pool:#x} set to : '{controller:#x}'");

    Ok(())
}

/// Approve the pool router to spend a token and deposit into the pool
pub async fn approve_deposit(
    args: ApproveDepositArgs,
    config: &DeployConfig,
) -> Result<(), ScriptError> {
    let router_address = config.resolve(args.router, ContractKey::PoolRouter, POOL_ROUTER_ADDRESS);
    let token_address = config.resolve(args.token, ContractKey::SbtcMock, SBTC_MOCK_ADDRESS);
    let provider = config.owner.provider().clone();

    let token = ERC20::new(token_address, provider.clone());
    let approve_amount = token_amount(args.approve_amount);
    send_tx(token.approve(router_address, approve_amount)).await?;
    info!("Approved {approve_amount} of {token_address:#x} for router {router_address:#x}");

    if let Some(user2) = config.addresses.users.get(1) {
        let balance = token
            .balanceOf(*user2)
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
        info!("Balance of user2 {user2:#x}: {balance}");
    }

    let router = PoolRouter::new(router_address, provider);
    let deposit_amount = token_amount(args.deposit_amount);
    send_tx(router.deposit(
        token_address,
        deposit_amount,
        U256::from(args.min_pool_amount_out),
        U256::from(args.liquidation_fee),
    ))
    .await?;
    info!("Deposited {deposit_amount} of {token_address:#x} through the router");

    Ok(())
}

/// Hand ownership of the barn diamond to governance
pub async fn barn_transfer_ownership(
    args: BarnTransferOwnershipArgs,
    config: &DeployConfig,
) -> Result<(), ScriptError> {
    let diamond_address = args.diamond.unwrap_or(BARN_DIAMOND_ADDRESS);
    let governance = args.governance.unwrap_or(BARN_GOVERNANCE_ADDRESS);

    let diamond = OwnershipFacet::new(diamond_address, config.owner.provider().clone());
    send_tx(diamond.transferOwnership(governance)).await?;

    let owner = diamond
        .owner()
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
    info!("Diamond {diamond_address:#x} now owned by {owner:#x}");

    if owner != governance {
        warn!("Expected owner {governance:#x}");
    }

    Ok(())
}

// ------------
// | Handover |
// ------------

/// The contracts handed over to the DAO
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Handover {
    /// The new owner of everything below
    pub dao: Address,
    /// The REIGN token
    pub reign_token: Address,
    /// The SoV token and the pool router allowed to mint it
    pub sov: Option<(Address, Address)>,
    /// The REIGN vaults, by name
    pub vaults: [(&'static str, Address); 3],
    /// The smart pool
    pub smart_pool: Address,
}

impl Handover {
    /// Resolve the handover targets from the arguments and the records
    pub fn resolve(
        args: TransferOwnershipArgs,
        config: &DeployConfig,
    ) -> Result<Self, ScriptError> {
        let sov_token = args.sov_token.or_else(|| config.contract(ContractKey::SovToken));
        let pool_router = args.pool_router.or_else(|| config.contract(ContractKey::PoolRouter));
        if sov_token.is_some() != pool_router.is_some() {
            warn!("SoV token and pool router must both be known, skipping the SoV handover");
        }

        Ok(Self {
            dao: config.resolve(args.reign_dao, ContractKey::ReignDao, REIGN_DAO_ADDRESS),
            reign_token: config.resolve(
                args.reign_token,
                ContractKey::ReignToken,
                REIGN_TOKEN_ADDRESS,
            ),
            sov: sov_token.zip(pool_router),
            vaults: [
                (
                    "RewardsVault",
                    config.resolve(
                        args.rewards_vault,
                        ContractKey::RewardsVault,
                        REWARDS_VAULT_ADDRESS,
                    ),
                ),
                ("DevVault", config.require(args.dev_vault, ContractKey::DevVault)?),
                (
                    "TreasurySaleVault",
                    config.require(args.treasury_sale_vault, ContractKey::TreasurySaleVault)?,
                ),
            ],
            smart_pool: config.resolve(args.smart_pool, ContractKey::SmartPool, SMART_POOL_ADDRESS),
        })
    }

    /// The handover transactions, in the order they are sent
    pub fn steps(&self, provider: &Wallet) -> Vec<Step> {
        let dao = self.dao;
        let mut steps = Vec::new();

        let sov = self.sov.map(|(token, router)| (SovToken::new(token, provider.clone()), router));
        if let Some((sov_token, router)) = &sov {
            steps.push(Step::new(
                format!("SovToken minter set: '{router:#x}'"),
                sov_token.setMinter(*router, true),
            ));
        }

        let reign = ReignToken::new(self.reign_token, provider.clone());
        steps.push(Step::new(format!("ReignToken owner set to: {dao:#x}"), reign.setOwner(dao)));

        if let Some((sov_token, _)) = &sov {
            steps.push(Step::new(
                format!("SovToken DAO set to: {dao:#x}"),
                sov_token.setReignDAO(dao),
            ));
        }

        for (name, address) in self.vaults {
            let vault = RewardsVault::new(address, provider.clone());
            steps.push(Step::new(
                format!("{name} ownership transferred to: {dao:#x}"),
                vault.transferOwnership(dao),
            ));
        }

        let pool = ConfigurableRightsPool::new(self.smart_pool, provider.clone());
        steps.push(Step::new(
            format!("Smart pool controller set to: {dao:#x}"),
            pool.setController(dao),
        ));

        steps
    }
}

/// Hand the tokens, the vaults and the smart pool over to the DAO
pub async fn transfer_ownership(
    args: TransferOwnershipArgs,
    config: &mut DeployConfig,
) -> Result<(), ScriptError> {
    let handover = Handover::resolve(args, config)?;
    let provider = config.owner.provider().clone();
    run_steps(&provider, handover.steps(&provider)).await?;

    config.record(ContractKey::ReignToken, handover.reign_token)?;
    config.record(ContractKey::SmartPool, handover.smart_pool)?;
    config.record(ContractKey::ReignDao, handover.dao)
}
