use clap::Args;
use color_eyre::eyre::Result;
use console::style;
use smokesignal_core::{Deployer, SigningKey, VerificationStatus};

use crate::artifact::FileSystemArtifactStore;
use crate::config::RunContext;
use crate::explorer::ExplorerVerifier;
use crate::output::ConsoleReporter;
use crate::rpc::ZkSyncChainClient;

#[derive(Args)]
pub struct DeployCommand {
    /// Private key used to sign the deployment transaction
    #[arg(long, env = "WALLET_PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,
}

impl DeployCommand {
    pub async fn run(self, ctx: RunContext) -> Result<()> {
        // Key and endpoint are validated before anything touches the network
        let signing_key = SigningKey::from_optional(self.private_key);
        let chain = ZkSyncChainClient::connect(&ctx.network.rpc_url, &signing_key)?;

        println!(
            "{} Connecting to {} as {}...",
            style("→").blue(),
            style(&ctx.network.rpc_url).cyan(),
            style(chain.address()).yellow()
        );
        let chain_id = chain.chain_id().await?;

        println!(
            "{} Deploying to {} (chain ID: {}, L1: {}, mode: {})",
            style("→").blue(),
            style(&ctx.network.rpc_url).cyan(),
            chain_id,
            ctx.network.eth_network,
            ctx.mode
        );

        let artifacts = FileSystemArtifactStore::new(&ctx.deploy.artifacts_dir);
        let verifier = ExplorerVerifier::for_network(&ctx.network, &ctx.deploy.source_path)?;

        let deployer = Deployer {
            signing_key: &signing_key,
            mode: &ctx.mode,
            network: &ctx.network,
            config: &ctx.deploy,
            artifacts: &artifacts,
            chain: &chain,
            verifier: &verifier,
        };

        let outcome = deployer.run(&mut ConsoleReporter).await?;

        println!();
        println!(
            "{} {} deployed at {} (tx {})",
            style("✓").green().bold(),
            style(&outcome.contract_name).cyan(),
            style(outcome.address).yellow(),
            outcome.tx_hash
        );
        if let VerificationStatus::Submitted(id) = outcome.verification {
            println!(
                "   Check verification with: {}",
                style(format!("smokesignal verify-status {}", id)).cyan()
            );
        }

        Ok(())
    }
}
