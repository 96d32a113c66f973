//! CLI commands for smokesignal

use clap::Subcommand;
use color_eyre::eyre::Result;

use crate::config::RunContext;

pub mod deploy;
pub mod network;
pub mod verify;

/// All available CLI commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the contract and submit it for verification
    Deploy(deploy::DeployCommand),

    /// Show the network endpoints selected for the current mode
    Network(network::NetworkCommand),

    /// Submit source verification for an already deployed contract
    Verify(verify::VerifyCommand),

    /// Check the state of a verification request
    VerifyStatus(verify::VerifyStatusCommand),
}

impl Command {
    /// Execute the command
    pub async fn run(self, ctx: RunContext) -> Result<()> {
        match self {
            Command::Deploy(cmd) => cmd.run(ctx).await,
            Command::Network(cmd) => cmd.run(ctx),
            Command::Verify(cmd) => cmd.run(ctx).await,
            Command::VerifyStatus(cmd) => cmd.run(ctx).await,
        }
    }
}
