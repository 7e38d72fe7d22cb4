//! Definitions of the Solidity interfaces the scripts call into

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface ERC20 {
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
        function approve(address spender, uint256 amount) external returns (bool);
    }
}

sol! {
    #[sol(rpc)]
    interface ReignToken {
        function mint(address to, uint256 amount) external;
        function setOwner(address owner) external;
    }
}

sol! {
    #[sol(rpc)]
    interface SovToken {
        function setMinter(address minter, bool allowed) external;
        function setReignDAO(address reignDAO) external;
    }
}

sol! {
    #[sol(rpc)]
    interface RewardsVault {
        function setAllowance(address spender, uint256 amount) external;
        function transferOwnership(address newOwner) external;
    }
}

sol! {
    #[sol(rpc)]
    interface LibRewardsDistribution {
        function TEAM() external view returns (uint256);
        function WRAPPING_TOKENS() external view returns (uint256);
        function LP_REWARDS_TOKENS() external view returns (uint256);
        function STAKING_TOKENS() external view returns (uint256);
        function DEV_FUND() external view returns (uint256);
        function TREASURY() external view returns (uint256);
        function TREASURY_SALE() external view returns (uint256);
    }
}

sol! {
    #[sol(rpc)]
    interface LPRewards {
        function initialize() external;
    }
}

sol! {
    #[sol(rpc)]
    interface GovRewards {
        function initialize() external;
    }
}

sol! {
    #[sol(rpc)]
    interface ReignDAO {
        function initialize(address reignDiamond, address basketBalancer, address smartPool) external;
    }
}

sol! {
    #[sol(rpc)]
    interface SovWrapper {
        function initialize(address reignDiamond, address reignDAO, address smartPool, address poolRouter) external;
    }
}

sol! {
    #[sol(rpc)]
    interface CRPFactory {
        struct PoolParams {
            string poolTokenSymbol;
            string poolTokenName;
            address[] constituentTokens;
            uint256[] tokenBalances;
            uint256[] tokenWeights;
            uint256 swapFee;
        }

        struct Rights {
            bool canPauseSwapping;
            bool canChangeSwapFee;
            bool canChangeWeights;
            bool canAddRemoveTokens;
            bool canWhitelistLPs;
            bool canChangeCap;
        }

        function newCrp(address factoryAddress, PoolParams calldata poolParams, Rights calldata rights) external returns (address);
    }
}

sol! {
    #[sol(rpc)]
    interface ConfigurableRightsPool {
        function createPool(uint256 initialSupply, uint256 minimumWeightChangeBlockPeriod, uint256 addTokenTimeLockInBlocks) external;
        function whitelistLiquidityProvider(address provider) external;
        function setCap(uint256 newCap) external;
        function setController(address newOwner) external;
        function getController() external view returns (address);
        function totalSupply() external view returns (uint256);
    }
}

sol! {
    #[sol(rpc)]
    interface BasketBalancer {
        function getTokens() external view returns (address[] memory);
        function getTargetAllocation(address token) external view returns (uint256);
    }
}

sol! {
    #[sol(rpc)]
    interface PoolRouter {
        function deposit(address tokenIn, uint256 tokenAmountIn, uint256 minPoolAmountOut, uint256 liquidationFee) external;
    }
}

sol! {
    #[sol(rpc)]
    interface UniswapV2Factory {
        function createPair(address tokenA, address tokenB) external returns (address pair);
        function getPair(address tokenA, address tokenB) external view returns (address pair);
    }
}

sol! {
    #[sol(rpc)]
    interface UniswapV2Router {
        function factory() external view returns (address);
    }
}

sol! {
    #[sol(rpc)]
    interface OwnershipFacet {
        function transferOwnership(address newOwner) external;
        function owner() external view returns (address);
    }
}

sol! {
    #[sol(rpc)]
    interface ReignFacet {
        function initReign(address reignToken, uint256 epoch1Start, uint256 epochDuration) external;
    }
}

sol! {
    #[sol(rpc)]
    interface Staking {
        function initialize(address reignDiamond) external;
        function initEpochForTokens(address[] memory tokens, uint128 epochId) external;
    }
}
