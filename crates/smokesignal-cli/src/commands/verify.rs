use alloy::primitives::Address;
use clap::Args;
use color_eyre::eyre::{eyre, Result};
use console::style;
use smokesignal_core::{ArtifactStore, VerificationId, VerificationRequest, VerificationService};

use crate::artifact::FileSystemArtifactStore;
use crate::config::RunContext;
use crate::explorer::ExplorerVerifier;

#[derive(Debug, Args)]
pub struct VerifyCommand {
    /// Address of the deployed contract
    address: Address,
}

impl VerifyCommand {
    pub async fn run(self, ctx: RunContext) -> Result<()> {
        if ctx.mode.is_test() {
            return Err(eyre!(
                "Verification is not available in test mode, contracts are deployed locally"
            ));
        }

        let artifacts = FileSystemArtifactStore::new(&ctx.deploy.artifacts_dir);
        let artifact = artifacts.load_artifact(&ctx.deploy.contract_name)?;

        let request = VerificationRequest::new(
            &ctx.deploy,
            self.address,
            ctx.deploy.constructor_args(),
            artifact.bytecode,
        );

        println!(
            "{} Verifying {} at {}...",
            style("→").blue(),
            style(&request.contract_name).cyan(),
            style(self.address).yellow()
        );

        let verifier = ExplorerVerifier::for_network(&ctx.network, &ctx.deploy.source_path)?;
        let id = verifier.verify(&request).await?;

        println!(
            "{} Verification request submitted with id {}",
            style("✓").green(),
            style(id).cyan()
        );

        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct VerifyStatusCommand {
    /// Verification request id returned by the explorer
    id: u64,
}

impl VerifyStatusCommand {
    pub async fn run(self, ctx: RunContext) -> Result<()> {
        let verifier = ExplorerVerifier::for_network(&ctx.network, &ctx.deploy.source_path)?;
        let state = verifier.status(VerificationId(self.id)).await?;

        let marker = match state.status.as_str() {
            "successful" => style("✓").green(),
            "failed" => style("⚠").yellow(),
            _ => style("ℹ").blue(),
        };
        println!("{} Verification {}: {}", marker, self.id, state.status);

        if let Some(error) = &state.error {
            println!("   Error: {}", style(error).red());
        }
        for error in &state.compilation_errors {
            println!("   {}", style(error).dim());
        }

        Ok(())
    }
}
