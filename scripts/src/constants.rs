//! Constants used in the deploy scripts

use std::time::Duration;

use alloy_primitives::{address, Address, U256};

// ------------
// | Defaults |
// ------------

/// The default RPC URL, a local dev node
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// The default path of the deployments file
pub const DEFAULT_DEPLOYMENTS_PATH: &str = "deployments.json";

/// The default directory holding the compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The number of accounts derived from a mnemonic unless told otherwise
pub const DEFAULT_MNEMONIC_ACCOUNTS: u32 = 10;

/// How long to wait between polls for a transaction receipt
pub const RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// The extension of a compilation artifact
pub const ARTIFACT_EXTENSION: &str = "json";

// -----------
// | Amounts |
// -----------

/// 10^18, the base unit multiplier of an 18-decimal token
pub const TEN_POW_18: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// 10^8, the base unit multiplier of the smart pool's initial balances
pub const TEN_POW_8: U256 = U256::from_limbs([100_000_000, 0, 0, 0]);

/// Whole tokens minted in total for REIGN
pub const REIGN_TOTAL_TOKENS: u64 = 1_000_000_000;

/// Whole REIGN tokens minted to each of the four initial holders
pub const REIGN_SHARE_TOKENS: u64 = 250_000_000;

/// Numerator of the base delta, in units of 10^17
pub const BASE_DELTA_TENTHS: u64 = 30;

/// Whole tokens distributed as rewards
pub const REWARDS_TOKENS: u64 = 610_000;

/// Whole tokens granted by the scripts setting a rewards vault allowance
pub const DEFAULT_ALLOWANCE_TOKENS: u64 = 100_000_000_000_000;

/// Whole tokens passed as the total reward of a new LP rewards contract
pub const DEFAULT_LP_REWARDS_TOKENS: u64 = 100_000_000_000;

/// Whole tokens deposited into the pool router by `approve-deposit`
pub const DEFAULT_DEPOSIT_TOKENS: u64 = 10;

/// Minimum pool tokens accepted for a router deposit
pub const DEFAULT_MIN_POOL_AMOUNT_OUT: u64 = 1;

/// Liquidation fee passed to a router deposit
pub const DEFAULT_LIQUIDATION_FEE: u64 = 10_000;

/// Whole sUSD moved from the whale to the owner by `fund-owner`
pub const DEFAULT_FUND_OWNER_TOKENS: u64 = 10_000_000;

/// Converts a whole-token amount into base units of an 18-decimal token
pub fn token_amount(whole: u64) -> U256 {
    U256::from(whole) * TEN_POW_18
}

// ---------
// | Epoch |
// ---------

/// The duration of a staking epoch, in seconds
pub const EPOCH_DURATION_SECS: u64 = 604_800;

// -----------------------------
// | Rinkeby Preset Addresses |
// -----------------------------

/// The protocol owner on rinkeby
pub const RINKEBY_OWNER: Address = address!("CDb2a435a65A5a90Da1dd2C1Fe78A2df70795F91");

/// Token holders used by the rinkeby scripts
pub const RINKEBY_USERS: [Address; 3] = [
    address!("A5E3C2047a28f0C8032B1A7e7074682B129445a7"),
    address!("5577bd667608bBB2537f3d45610B14b7286466a7"),
    address!("2A95300047E373EEEAa5Eea0be7dcE1418Ccf191"),
];

/// The Uniswap V2 factory on rinkeby
pub const RINKEBY_UNISWAP_FACTORY: Address =
    address!("5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f");

/// The Uniswap V2 router on rinkeby
pub const RINKEBY_UNISWAP_ROUTER: Address =
    address!("7a250d5630B4cF539739dF2C5dAcb4c659F2488D");

/// The Chainlink BTC price feed on rinkeby
pub const RINKEBY_BTC_ORACLE: Address = address!("ECe365B379E1dD183B20fc5f022230C044d51404");

/// The Chainlink ETH price feed on rinkeby
pub const RINKEBY_WETH_ORACLE: Address = address!("8A753747A1Fa494EC906cE90E9f37563A8AF630e");

// ----------------------------------
// | Mainnet Fork Preset Addresses |
// ----------------------------------

/// The protocol owner on a mainnet fork, the first dev node account
pub const FORK_OWNER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

/// Token holders impersonated on a mainnet fork
pub const FORK_USERS: [Address; 4] = [
    address!("4F868C1aa37fCf307ab38D215382e88FCA6275E2"),
    address!("E3DD3914aB28bB552d41B8dFE607355DE4c37A51"),
    address!("55FE002aefF02F77364de339a1292923A15844B8"),
    address!("16463c0fdB6BA9618909F5b120ea1581618C1b9E"),
];

/// A large sUSD holder on mainnet
pub const FORK_SUSD_WHALE: Address = address!("a5f7a39E55D7878bC5bd754eE5d6BD7a7662355b");

/// USDC on mainnet
pub const FORK_USDC: Address = address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");

/// sBTC on mainnet
pub const FORK_SBTC: Address = address!("fe18be6b3bd88a2d2a7f928d00292e7a9963cfc6");

/// sETH on mainnet
pub const FORK_SETH: Address = address!("5e74c9036fb86bd7ecdcb084a0673efc32ea31cb");

/// sXAU on mainnet
pub const FORK_SXAU: Address = address!("261efcdd24cea98652b9700800a13dfbca4103ff");

/// sXAG on mainnet
pub const FORK_SXAG: Address = address!("6a22e5e94388464181578aa7a6b869e00fe27846");

/// sCHF on mainnet
pub const FORK_SCHF: Address = address!("0f83287ff768d1c1e17a42f44d644d7f22e8ee1d");

/// sUSD on mainnet
pub const FORK_SUSD: Address = address!("57ab1ec28d129707052df4df418d58a2d46d5f51");

/// WETH on mainnet
pub const FORK_WETH: Address = address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");

/// The Balancer pool factory on mainnet
pub const FORK_BALANCER_FACTORY: Address = address!("9424B1412450D0f8Fc2255FAf6046b98213B76Bd");

/// The configurable rights pool factory on mainnet
pub const FORK_SMART_POOL_FACTORY: Address =
    address!("ed52D8E202401645eDAD1c0AA21e872498ce47D0");

/// The SushiSwap (Uniswap V2 compatible) factory on mainnet
pub const FORK_UNISWAP_FACTORY: Address = address!("c35DADB65012eC5796536bD9864eD8773aBc74C4");

/// The SushiSwap (Uniswap V2 compatible) router on mainnet
pub const FORK_UNISWAP_ROUTER: Address = address!("1b02dA8Cb0d097eB8D57A175b88c7D8b47997506");

// -----------------------------------------
// | Deployed Contracts (script fallbacks) |
// -----------------------------------------

/// The REIGN token
pub const REIGN_TOKEN_ADDRESS: Address = address!("64f8b3b0a2a16a2bdfa30568cb769ed5ba760fba");

/// The rewards vault holding REIGN for the reward contracts
pub const REWARDS_VAULT_ADDRESS: Address = address!("c8a44079501a6110edf7fe66ff2342f28459cf50");

/// The staking contract
pub const STAKING_ADDRESS: Address = address!("5Faf8C61A65670C9472E6ef909195a76104c6356");

/// The Reign diamond
pub const REIGN_DIAMOND_ADDRESS: Address = address!("c31cb4f82f178ea0377492144035c48de119a4f8");

/// The Reign DAO
pub const REIGN_DAO_ADDRESS: Address = address!("78500ee25f607ffc906cccd27077f15f76c01785");

/// The smart pool controlled by the DAO
pub const SMART_POOL_ADDRESS: Address = address!("9E850E0E1cdD1b452A694D27eB82Fa78F502C8C7");

/// The pool router
pub const POOL_ROUTER_ADDRESS: Address = address!("dd87fcefe89c598d835b412009f2f4f9209753cd");

/// The sBTC mock token
pub const SBTC_MOCK_ADDRESS: Address = address!("f65C93902eCC4c7979E92ED2cca01421e8021F77");

/// The basket balancer
pub const BASKET_BALANCER_ADDRESS: Address = address!("349884021b0df3d50c07a08edbe171789fd3c8bb");

/// The SoV wrapper
pub const SOV_WRAPPER_ADDRESS: Address = address!("bfa9ea3b1556687df2e9965ffef84f28911f8a8f");

/// The treasury receiving wrapping rewards fees
pub const TREASURY_ADDRESS: Address = address!("4a3e90b0e7ca0ac32588b956d581afd578da3579");

/// The wrapping rewards contract
pub const WRAPPING_REWARDS_ADDRESS: Address = address!("855dD13AbAb0e891952Fd973634cefBb1c5AAbAC");

/// The LP rewards contract for the SoV pair
pub const SOV_LP_REWARDS_ADDRESS: Address = address!("04F47aa96C1F2018E7CD6df7b07b55D1C57cDaf4");

/// The LP rewards contract for the REIGN pair
pub const REIGN_LP_REWARDS_ADDRESS: Address = address!("4cDF326F0cEcF20c1b759C60590839e92e1b4D29");

/// The first smart pool deployment, still owned by the owner account
pub const LEGACY_SMART_POOL_ADDRESS: Address = address!("1bD6Ad914a5b8D60F53D1574b76C83aF18943C88");

/// The DAO of the first deployment
pub const LEGACY_REIGN_DAO_ADDRESS: Address = address!("bce4682c61ab6e2509361d006cf0c07bd982a9b5");

/// The REIGN token the governance rewards were first deployed against
pub const GOV_REWARDS_REIGN_TOKEN_ADDRESS: Address =
    address!("08188fc7d8f552d1d8f8d2743404e9e728425ae1");

/// The rewards vault funding the first governance rewards deployment
pub const GOV_REWARDS_VAULT_ADDRESS: Address =
    address!("86296a7080a4728545c763102c9e015694e6179b");

/// The diamond of the barn deployment
pub const BARN_DIAMOND_ADDRESS: Address = address!("36afDAc28ec7b41065E88FF914d72AbE23702251");

/// The governance contract taking over the barn diamond
pub const BARN_GOVERNANCE_ADDRESS: Address = address!("C9aaC94a462816608D0e8F6d0Dd9D6474A19109f");

// ------------------
// | Artifact Names |
// ------------------

/// The mock ERC20 used as a stand-in for synthetic tokens
pub const ERC20_MOCK_ARTIFACT: &str = "ERC20Mock";

/// The governance rewards contract
pub const GOV_REWARDS_ARTIFACT: &str = "GovRewards";

/// The wrapping rewards contract
pub const WRAPPING_REWARDS_ARTIFACT: &str = "WrappingRewards";

/// The LP rewards contract
pub const LP_REWARDS_ARTIFACT: &str = "LPRewards";

/// The facets cut into the Reign diamond, in cut order
pub const REIGN_FACET_ARTIFACTS: [&str; 5] = [
    "DiamondCutFacet",
    "DiamondLoupeFacet",
    "OwnershipFacet",
    "ReignFacet",
    "EpochClockFacet",
];

/// The `FacetCutAction` adding functions to a diamond
pub const FACET_CUT_ADD: u8 = 0;

/// The Reign diamond
pub const REIGN_DIAMOND_ARTIFACT: &str = "ReignDiamond";

/// The Reign DAO
pub const REIGN_DAO_ARTIFACT: &str = "ReignDAO";

/// The library exposing the REIGN allocation constants
pub const REWARDS_DISTRIBUTION_ARTIFACT: &str = "LibRewardsDistribution";

/// The REIGN token
pub const REIGN_TOKEN_ARTIFACT: &str = "ReignToken";

/// The SoV token
pub const SOV_TOKEN_ARTIFACT: &str = "SovToken";

/// The SoV wrapper
pub const SOV_WRAPPER_ARTIFACT: &str = "SovWrapper";

/// The REIGN vaults: rewards, development and treasury sale
pub const REWARDS_VAULT_ARTIFACT: &str = "RewardsVault";

/// The team vesting router
pub const VESTING_ROUTER_ARTIFACT: &str = "VestingRouter";

/// The staking contract
pub const STAKING_ARTIFACT: &str = "Staking";

/// The pool router
pub const POOL_ROUTER_ARTIFACT: &str = "PoolRouter";

/// The basket balancer
pub const BASKET_BALANCER_ARTIFACT: &str = "BasketBalancer";

// --------------
// | Smart Pool |
// --------------

/// Symbol of the smart pool LP token
pub const SMART_POOL_SYMBOL: &str = "SOV-LP";

/// Name of the smart pool LP token
pub const SMART_POOL_NAME: &str = "Sovreign Pool LP";

/// Initial balances of the pool constituents, in units of 10^8: sBTC, sETH,
/// sCHF, sUSD, sXAU, sXAG
pub const SMART_POOL_BALANCES: [u64; 6] = [1, 15, 40_000, 45_000, 30, 150];

/// Denormalized weight of every constituent, in units of 10^17
pub const SMART_POOL_WEIGHT_TENTHS: u64 = 30;

/// Pool swap fee, 0.5%
pub const SMART_POOL_SWAP_FEE: u64 = 5_000_000_000_000_000;

/// Whole LP tokens minted when the pool is created
pub const SMART_POOL_INITIAL_SUPPLY_TOKENS: u64 = 10_000;

/// Blocks over which a weight change is spread, about two days
pub const SMART_POOL_WEIGHT_CHANGE_BLOCKS: u64 = 13_292;

/// Blocks a token addition stays locked, about 55 minutes
pub const SMART_POOL_ADD_TOKEN_LOCK_BLOCKS: u64 = 250;

/// The pool cap as a multiple of the initial LP supply
pub const SMART_POOL_CAP_MULTIPLIER: u64 = 10_000;

/// Fee factor the pool router applies to deposits, out of 100000
pub const POOL_ROUTER_FEE_FACTOR: u64 = 99_950;

/// Maximum delta of a basket balancer allocation vote, in units of 10^17
pub const BASKET_MAX_DELTA_TENTHS: u64 = 20;
