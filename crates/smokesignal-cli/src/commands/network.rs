use clap::Args;
use color_eyre::eyre::Result;
use console::style;

use crate::config::RunContext;

#[derive(Debug, Args)]
pub struct NetworkCommand {}

impl NetworkCommand {
    pub fn run(self, ctx: RunContext) -> Result<()> {
        let network = &ctx.network;

        println!("{} Mode: {}", style("ℹ").blue(), style(&ctx.mode).cyan());
        println!("   RPC URL:     {}", style(&network.rpc_url).yellow());
        println!("   L1 network:  {}", style(&network.eth_network).yellow());
        println!("   zkSync:      {}", network.zksync);
        match &network.verify_url {
            Some(url) => println!("   Verify URL:  {}", style(url).yellow()),
            None => println!("   Verify URL:  {}", style("none (verification skipped)").dim()),
        }

        Ok(())
    }
}
