use clap::Parser;
use sov_reign_scripts::{
    accounts::SignerSet,
    cli::{Cli, Command},
    commands::list_accounts,
    config::{ConfigOverrides, DeployConfig, ScriptPaths},
    errors::ScriptError,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().pretty().with_env_filter(filter).init();

    if let Err(e) = run(cli).await {
        error!("{e}");
        std::process::exit(1);
    }
}

/// Resolve the signers and config, then run the requested script
async fn run(cli: Cli) -> Result<(), ScriptError> {
    let Cli {
        priv_keys,
        mnemonic,
        num_accounts,
        rpc_url,
        network,
        config,
        deployments_path,
        artifacts_dir,
        impersonate,
        command,
    } = cli;

    let mut signers = SignerSet::from_keys(&priv_keys)?;
    if let Some(phrase) = mnemonic {
        signers.extend(SignerSet::from_mnemonic(&phrase, num_accounts)?);
    }

    let script = match command {
        Command::Accounts => {
            list_accounts(&signers);
            return Ok(());
        },
        Command::Script(script) => script,
    };

    if signers.is_empty() {
        return Err(ScriptError::ClientInitialization(
            "no signers, pass private keys or a mnemonic".to_string(),
        ));
    }

    let overrides = match config {
        Some(path) => ConfigOverrides::from_file(&path)?,
        None => ConfigOverrides::default(),
    };
    let paths = ScriptPaths { artifacts_dir, deployments_path };

    let mut config =
        DeployConfig::new(network, overrides, signers, &rpc_url, impersonate, paths).await?;
    script.run(&mut config).await
}
