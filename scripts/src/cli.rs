//! Definitions of CLI arguments and commands for the deploy scripts
//!
//! Address arguments are optional. A script acts on the address given on
//! the command line, else the one recorded in the deployments file, else a
//! hardcoded fallback where one exists.

use std::path::PathBuf;

use alloy::primitives::Address;
use clap::{Args, Parser, Subcommand};

use crate::{
    commands::{
        approve_deposit, barn_transfer_ownership, deploy_gov_rewards, deploy_lp_rewards,
        deploy_tokens, deploy_wrapping_rewards, distribute_reign, fund_owner, init_epoch,
        init_lp_rewards, init_reign, preflight, set_allowance, set_pool_controller,
        transfer_ownership, transfer_pool_ownership,
    },
    config::DeployConfig,
    constants::{
        DEFAULT_ALLOWANCE_TOKENS, DEFAULT_ARTIFACTS_DIR, DEFAULT_DEPLOYMENTS_PATH,
        DEFAULT_DEPOSIT_TOKENS, DEFAULT_FUND_OWNER_TOKENS, DEFAULT_LIQUIDATION_FEE,
        DEFAULT_LP_REWARDS_TOKENS, DEFAULT_MIN_POOL_AMOUNT_OUT, DEFAULT_MNEMONIC_ACCOUNTS,
        DEFAULT_RPC_URL,
    },
    errors::ScriptError,
    pipeline::{activate, create_rewards, deploy_all, deploy_dao, setup_smart_pool, setup_tokens},
    types::Network,
};

/// Deployment and administration scripts for the SoV/Reign contracts
#[derive(Parser)]
pub struct Cli {
    /// Private keys of the local signers, comma separated
    #[arg(short, long, env = "PRIV_KEYS", value_delimiter = ',', hide_env_values = true)]
    pub priv_keys: Vec<String>,

    /// Mnemonic to derive local signers from
    #[arg(short, long, env = "MNEMONIC", hide_env_values = true)]
    pub mnemonic: Option<String>,

    /// Number of signers to derive from the mnemonic
    #[arg(long, default_value_t = DEFAULT_MNEMONIC_ACCOUNTS)]
    pub num_accounts: u32,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// The network whose address presets to use
    #[arg(short, long, value_enum, default_value_t = Network::Rinkeby)]
    pub network: Network,

    /// JSON file overriding preset addresses, amounts, and epoch timing
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the file recording deployed contracts
    #[arg(short, long, default_value = DEFAULT_DEPLOYMENTS_PATH)]
    pub deployments_path: PathBuf,

    /// Directory holding the compiled contract artifacts
    #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// Impersonate accounts that have no local signer. Dev nodes only.
    #[arg(long)]
    pub impersonate: bool,

    /// The script to run
    #[command(subcommand)]
    pub command: Command,
}

/// The top level commands
#[derive(Subcommand)]
pub enum Command {
    /// Print the addresses of the local signers
    Accounts,
    /// A script run against a resolved deploy config
    #[command(flatten)]
    Script(ScriptCommand),
}

/// The scripts that need a deploy config
#[derive(Subcommand)]
pub enum ScriptCommand {
    /// Connect to the external contracts and check they are deployed
    Preflight,
    /// Move sUSD from the whale to the owner
    FundOwner(FundOwnerArgs),
    /// Deploy a mock ERC20 standing in for sBTC
    DeployTokens,
    /// Mint the initial REIGN distribution
    DistributeReign(DistributeReignArgs),
    /// Initialize the Reign diamond
    InitReign(InitReignArgs),
    /// Initialize a staking epoch for a set of tokens
    InitEpoch(InitEpochArgs),
    /// Set a rewards vault allowance
    SetAllowance(SetAllowanceArgs),
    /// Deploy the governance rewards contract
    DeployGovRewards(DeployGovRewardsArgs),
    /// Deploy the wrapping rewards contract
    DeployWrappingRewards(DeployWrappingRewardsArgs),
    /// Create the REIGN pair and deploy its LP rewards contract
    DeployLpRewards(DeployLpRewardsArgs),
    /// Initialize LP rewards contracts
    InitLpRewards(InitLpRewardsArgs),
    /// Hand control of the smart pool to the DAO
    SetPoolController(SetPoolControllerArgs),
    /// Hand control of the first smart pool deployment to its DAO
    TransferPoolOwnership(TransferPoolOwnershipArgs),
    /// Approve the pool router and deposit through it
    ApproveDeposit(ApproveDepositArgs),
    /// Transfer ownership of the barn diamond to governance
    BarnTransferOwnership(BarnTransferOwnershipArgs),
    /// Transfer ownership of the protocol contracts to the DAO
    TransferOwnership(TransferOwnershipArgs),
    /// Deploy the diamond facets, the Reign diamond and the DAO
    DeployDao,
    /// Deploy the tokens, vaults and vesting, mint the REIGN allocations
    SetupTokens(SetupTokensArgs),
    /// Create the smart pool, its router and the basket balancer
    SetupSmartPool(SetupSmartPoolArgs),
    /// Initialize the diamond, the DAO, staking, the wrapper and gov rewards
    Activate(ActivateArgs),
    /// Deploy wrapping rewards and fund the reward allowances
    CreateRewards(CreateRewardsArgs),
    /// Run every deployment stage in order, from preflight to handover
    DeployAll,
}

impl ScriptCommand {
    /// Run the script for this command
    pub async fn run(self, config: &mut DeployConfig) -> Result<(), ScriptError> {
        match self {
            ScriptCommand::Preflight => preflight(config).await,
            ScriptCommand::FundOwner(args) => fund_owner(args, config).await,
            ScriptCommand::DeployTokens => deploy_tokens(config).await,
            ScriptCommand::DistributeReign(args) => distribute_reign(args, config).await,
            ScriptCommand::InitReign(args) => init_reign(args, config).await,
            ScriptCommand::InitEpoch(args) => init_epoch(args, config).await,
            ScriptCommand::SetAllowance(args) => set_allowance(args, config).await,
            ScriptCommand::DeployGovRewards(args) => deploy_gov_rewards(args, config).await,
            ScriptCommand::DeployWrappingRewards(args) => {
                deploy_wrapping_rewards(args, config).await
            },
            ScriptCommand::DeployLpRewards(args) => deploy_lp_rewards(args, config).await,
            ScriptCommand::InitLpRewards(args) => init_lp_rewards(args, config).await,
            ScriptCommand::SetPoolController(args) => set_pool_controller(args, config).await,
            ScriptCommand::TransferPoolOwnership(args) => {
                transfer_pool_ownership(args, config).await
            },
            ScriptCommand::ApproveDeposit(args) => approve_deposit(args, config).await,
            ScriptCommand::BarnTransferOwnership(args) => {
                barn_transfer_ownership(args, config).await
            },
            ScriptCommand::TransferOwnership(args) => transfer_ownership(args, config).await,
            ScriptCommand::DeployDao => deploy_dao(config).await,
            ScriptCommand::SetupTokens(args) => setup_tokens(args, config).await,
            ScriptCommand::SetupSmartPool(args) => setup_smart_pool(args, config).await,
            ScriptCommand::Activate(args) => activate(args, config).await,
            ScriptCommand::CreateRewards(args) => create_rewards(args, config).await,
            ScriptCommand::DeployAll => deploy_all(config).await,
        }
    }
}

/// Move sUSD from the whale to the owner. Needs the whale to be
/// impersonated.
#[derive(Args)]
pub struct FundOwnerArgs {
    /// Whole sUSD tokens to transfer
    #[arg(long, default_value_t = DEFAULT_FUND_OWNER_TOKENS)]
    pub amount: u64,
}

/// Mint the initial REIGN distribution to the owner, the rewards vault and
/// the first two users
#[derive(Args)]
pub struct DistributeReignArgs {
    /// The REIGN token
    #[arg(long)]
    pub reign_token: Option<Address>,

    /// The rewards vault
    #[arg(long)]
    pub rewards_vault: Option<Address>,
}

/// Initialize the Reign diamond with the first epoch's start and duration
#[derive(Args)]
pub struct InitReignArgs {
    /// The Reign diamond
    #[arg(long)]
    pub diamond: Option<Address>,

    /// The REIGN token
    #[arg(long)]
    pub reign_token: Option<Address>,
}

/// Initialize a staking epoch for a set of tokens
#[derive(Args)]
pub struct InitEpochArgs {
    /// The staking contract
    #[arg(long)]
    pub staking: Option<Address>,

    /// The tokens to initialize the epoch for
    #[arg(long, required = true, num_args = 1.., value_delimiter = ',')]
    pub tokens: Vec<Address>,

    /// The epoch to initialize
    #[arg(long, default_value_t = 0)]
    pub epoch: u128,
}

/// Let a rewards contract pull REIGN from the rewards vault
#[derive(Args)]
pub struct SetAllowanceArgs {
    /// The rewards vault
    #[arg(long)]
    pub rewards_vault: Option<Address>,

    /// The contract granted the allowance, the wrapping rewards by default
    #[arg(long)]
    pub spender: Option<Address>,

    /// Whole tokens to allow
    #[arg(long, default_value_t = DEFAULT_ALLOWANCE_TOKENS)]
    pub amount: u64,
}

/// Deploy the governance rewards contract and fund its allowance
#[derive(Args)]
pub struct DeployGovRewardsArgs {
    /// The REIGN token
    #[arg(long)]
    pub reign_token: Option<Address>,

    /// The Reign diamond
    #[arg(long)]
    pub diamond: Option<Address>,

    /// The rewards vault
    #[arg(long)]
    pub rewards_vault: Option<Address>,

    /// Whole tokens to allow the new contract
    #[arg(long, default_value_t = DEFAULT_ALLOWANCE_TOKENS)]
    pub allowance: u64,
}

/// Deploy the wrapping rewards contract and fund its allowance
#[derive(Args)]
pub struct DeployWrappingRewardsArgs {
    /// The REIGN token
    #[arg(long)]
    pub reign_token: Option<Address>,

    /// The basket balancer
    #[arg(long)]
    pub basket_balancer: Option<Address>,

    /// The SoV wrapper
    #[arg(long)]
    pub sov_wrapper: Option<Address>,

    /// The rewards vault
    #[arg(long)]
    pub rewards_vault: Option<Address>,

    /// The treasury
    #[arg(long)]
    pub treasury: Option<Address>,

    /// Whole tokens to allow the new contract
    #[arg(long, default_value_t = DEFAULT_ALLOWANCE_TOKENS)]
    pub allowance: u64,
}

/// Create the REIGN liquidity pair and deploy LP rewards for it
#[derive(Args)]
pub struct DeployLpRewardsArgs {
    /// The REIGN token
    #[arg(long)]
    pub reign_token: Option<Address>,

    /// The token REIGN is paired with, the sBTC mock by default
    #[arg(long)]
    pub paired_token: Option<Address>,

    /// The staking contract
    #[arg(long)]
    pub staking: Option<Address>,

    /// The rewards vault
    #[arg(long)]
    pub rewards_vault: Option<Address>,

    /// Whole tokens distributed by the new contract
    #[arg(long, default_value_t = DEFAULT_LP_REWARDS_TOKENS)]
    pub amount: u64,
}

/// Initialize LP rewards contracts
#[derive(Args)]
pub struct InitLpRewardsArgs {
    /// The LP rewards contracts to initialize. Defaults to the SoV pair's
    /// contract and the REIGN pair's.
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub lp_rewards: Vec<Address>,
}

/// Hand control of the smart pool to the DAO
#[derive(Args)]
pub struct SetPoolControllerArgs {
    /// The smart pool
    #[arg(long)]
    pub smart_pool: Option<Address>,

    /// The new controller
    #[arg(long)]
    pub controller: Option<Address>,
}

/// Hand ownership of the first smart pool deployment to its DAO. Recorded
/// under its own keys, apart from the current pool.
#[derive(Args)]
pub struct TransferPoolOwnershipArgs {
    /// The smart pool
    #[arg(long)]
    pub smart_pool: Option<Address>,

    /// The new controller
    #[arg(long)]
    pub controller: Option<Address>,
}

/// Approve the pool router to spend a token, then deposit it
#[derive(Args)]
pub struct ApproveDepositArgs {
    /// The pool router
    #[arg(long)]
    pub router: Option<Address>,

    /// The token deposited, the sBTC mock by default
    #[arg(long)]
    pub token: Option<Address>,

    /// Whole tokens to approve
    #[arg(long, default_value_t = DEFAULT_ALLOWANCE_TOKENS)]
    pub approve_amount: u64,

    /// Whole tokens to deposit
    #[arg(long, default_value_t = DEFAULT_DEPOSIT_TOKENS)]
    pub deposit_amount: u64,

    /// Minimum pool tokens to receive
    #[arg(long, default_value_t = DEFAULT_MIN_POOL_AMOUNT_OUT)]
    pub min_pool_amount_out: u64,

    /// Liquidation fee
    #[arg(long, default_value_t = DEFAULT_LIQUIDATION_FEE)]
    pub liquidation_fee: u64,
}

/// Transfer ownership of the barn diamond to governance
#[derive(Args)]
pub struct BarnTransferOwnershipArgs {
    /// The diamond
    #[arg(long)]
    pub diamond: Option<Address>,

    /// The new owner
    #[arg(long)]
    pub governance: Option<Address>,
}

/// Transfer ownership of the tokens, the vaults and the smart pool to the
/// DAO. The dev and treasury sale vaults have no fixed address and must be
/// given or recorded.
#[derive(Args, Default)]
pub struct TransferOwnershipArgs {
    /// The DAO taking ownership
    #[arg(long)]
    pub reign_dao: Option<Address>,

    /// The REIGN token
    #[arg(long)]
    pub reign_token: Option<Address>,

    /// The SoV token. With a pool router, the router is made a minter and
    /// the DAO is set on the token.
    #[arg(long)]
    pub sov_token: Option<Address>,

    /// The pool router minting SoV
    #[arg(long)]
    pub pool_router: Option<Address>,

    /// The rewards vault
    #[arg(long)]
    pub rewards_vault: Option<Address>,

    /// The development vault
    #[arg(long)]
    pub dev_vault: Option<Address>,

    /// The treasury sale vault
    #[arg(long)]
    pub treasury_sale_vault: Option<Address>,

    /// The smart pool
    #[arg(long)]
    pub smart_pool: Option<Address>,
}

/// Deploy the tokens, the vaults, vesting, staking and gov rewards, then mint
/// the REIGN allocations
#[derive(Args, Default)]
pub struct SetupTokensArgs {
    /// The Reign diamond
    #[arg(long)]
    pub diamond: Option<Address>,

    /// The Reign DAO
    #[arg(long)]
    pub reign_dao: Option<Address>,
}

/// Create the smart pool from the network's synths, then deploy its router
/// and the basket balancer
#[derive(Args, Default)]
pub struct SetupSmartPoolArgs {
    /// The Reign diamond
    #[arg(long)]
    pub diamond: Option<Address>,

    /// The Reign DAO
    #[arg(long)]
    pub reign_dao: Option<Address>,

    /// The SoV wrapper
    #[arg(long)]
    pub sov_wrapper: Option<Address>,

    /// The SoV token
    #[arg(long)]
    pub sov_token: Option<Address>,
}

/// Initialize the deployed contracts
#[derive(Args, Default)]
pub struct ActivateArgs {
    /// The Reign diamond
    #[arg(long)]
    pub diamond: Option<Address>,

    /// The Reign DAO
    #[arg(long)]
    pub reign_dao: Option<Address>,

    /// The REIGN token
    #[arg(long)]
    pub reign_token: Option<Address>,

    /// The staking contract
    #[arg(long)]
    pub staking: Option<Address>,

    /// The SoV wrapper
    #[arg(long)]
    pub sov_wrapper: Option<Address>,

    /// The smart pool
    #[arg(long)]
    pub smart_pool: Option<Address>,

    /// The pool router
    #[arg(long)]
    pub pool_router: Option<Address>,

    /// The basket balancer
    #[arg(long)]
    pub basket_balancer: Option<Address>,

    /// The governance rewards contract
    #[arg(long)]
    pub gov_rewards: Option<Address>,
}

/// Deploy the wrapping rewards and set the reward allowances from the REIGN
/// allocation
#[derive(Args, Default)]
pub struct CreateRewardsArgs {
    /// The REIGN token
    #[arg(long)]
    pub reign_token: Option<Address>,

    /// The basket balancer
    #[arg(long)]
    pub basket_balancer: Option<Address>,

    /// The SoV wrapper
    #[arg(long)]
    pub sov_wrapper: Option<Address>,

    /// The rewards vault
    #[arg(long)]
    pub rewards_vault: Option<Address>,

    /// The Reign diamond, which receives the wrapping fees
    #[arg(long)]
    pub diamond: Option<Address>,

    /// The governance rewards contract
    #[arg(long)]
    pub gov_rewards: Option<Address>,

    /// The allocation library. Deployed afresh when neither given nor
    /// recorded.
    #[arg(long)]
    pub rewards_distribution: Option<Address>,
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["sov-reign-scripts", "-p", "0x01,0x02", "init-lp-rewards"])
            .unwrap();

        assert_eq!(cli.priv_keys, vec!["0x01", "0x02"]);
        assert_eq!(cli.network, Network::Rinkeby);
        assert!(!cli.impersonate);

        let Command::Script(ScriptCommand::InitLpRewards(args)) = cli.command else {
            panic!("wrong command parsed");
        };
        assert!(args.lp_rewards.is_empty());
    }

    #[test]
    fn test_overridden_address() {
        let cli = Cli::try_parse_from([
            "sov-reign-scripts",
            "--network",
            "mainnet-fork",
            "--impersonate",
            "set-allowance",
            "--spender",
            "0x70997970c51812dc3a010c7d01b50e0d17dc79c8",
        ])
        .unwrap();

        assert_eq!(cli.network, Network::MainnetFork);
        assert!(cli.impersonate);

        let Command::Script(ScriptCommand::SetAllowance(args)) = cli.command else {
            panic!("wrong command parsed");
        };
        assert_eq!(args.spender, Some(address!("70997970C51812dc3A010C7d01b50e0d17dc79C8")));
        assert_eq!(args.rewards_vault, None);
        assert_eq!(args.amount, DEFAULT_ALLOWANCE_TOKENS);
    }

    #[test]
    fn test_invalid_address_rejected() {
        let res = Cli::try_parse_from([
            "sov-reign-scripts",
            "barn-transfer-ownership",
            "--governance",
            "0x1234",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn test_transfer_ownership_vaults_optional() {
        let cli = Cli::try_parse_from(["sov-reign-scripts", "transfer-ownership"]).unwrap();
        let Command::Script(ScriptCommand::TransferOwnership(args)) = cli.command else {
            panic!("wrong command parsed");
        };
        assert_eq!(args.dev_vault, None);

        let cli = Cli::try_parse_from([
            "sov-reign-scripts",
            "transfer-ownership",
            "--dev-vault",
            "0x86296a7080a4728545c763102c9e015694e6179b",
            "--treasury-sale-vault",
            "0x08188fc7d8f552d1d8f8d2743404e9e728425ae1",
        ])
        .unwrap();
        let Command::Script(ScriptCommand::TransferOwnership(args)) = cli.command else {
            panic!("wrong command parsed");
        };
        assert_eq!(args.dev_vault, Some(address!("86296a7080a4728545c763102c9e015694e6179b")));
    }

    #[test]
    fn test_accounts_is_top_level() {
        let cli = Cli::try_parse_from(["sov-reign-scripts", "accounts"]).unwrap();
        assert!(matches!(cli.command, Command::Accounts));
    }

    #[test]
    fn test_pipeline_commands_parse() {
        for name in [
            "deploy-dao",
            "setup-tokens",
            "setup-smart-pool",
            "activate",
            "create-rewards",
            "deploy-all",
        ] {
            let cli = Cli::try_parse_from(["sov-reign-scripts", name]).unwrap();
            assert!(matches!(cli.command, Command::Script(_)), "{name}");
        }
    }
}
