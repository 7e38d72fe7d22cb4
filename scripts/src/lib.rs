//! Scripts for deploying, initializing and handing over the SoV/Reign
//! contracts.

pub mod accounts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;
pub mod pipeline;
pub mod solidity;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_helpers;
