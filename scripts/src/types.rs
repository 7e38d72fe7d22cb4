//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy::{network::Ethereum, providers::DynProvider};
use clap::ValueEnum;

/// The provider type every script sends transactions through
pub type Wallet = DynProvider<Ethereum>;

/// The networks the scripts carry address presets for
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Network {
    /// The rinkeby test network
    Rinkeby,
    /// A local dev node forked from mainnet
    MainnetFork,
}

impl Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Rinkeby => write!(f, "rinkeby"),
            Network::MainnetFork => write!(f, "mainnet-fork"),
        }
    }
}
