mod artifact;
mod commands;
mod config;
mod explorer;
mod output;
mod rpc;
mod zksync;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::filter::LevelFilter;

use commands::Command;
use config::Settings;

#[derive(Parser)]
#[command(name = "smokesignal")]
#[command(about = "Deploy and verify the SmokeSignal contract on zkSync")]
#[command(version)]
struct Cli {
    /// The verbosity level.
    #[arg(short, long, global = true, env = "SMOKESIGNAL_VERBOSITY", default_value_t = LevelFilter::WARN)]
    verbosity: LevelFilter,

    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Values from .env never override the real environment
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .with_writer(std::io::stderr)
        .init();

    let ctx = cli.settings.resolve()?;
    cli.command.run(ctx).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use smokesignal_core::NetworkTarget;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_verify_status() {
        let cli = Cli::try_parse_from(["smokesignal", "verify-status", "7", "--mode", "test"]).unwrap();

        assert!(matches!(cli.command, Command::VerifyStatus(_)));
        assert_eq!(cli.settings.mode.as_deref(), Some("test"));
    }

    #[test]
    fn test_parse_target() {
        let cli = Cli::try_parse_from(["smokesignal", "--target", "mainnet", "network"]).unwrap();
        assert_eq!(cli.settings.target, NetworkTarget::Mainnet);

        assert!(Cli::try_parse_from(["smokesignal", "--target", "goerli", "network"]).is_err());
    }

    #[test]
    fn test_parse_verify_address() {
        assert!(Cli::try_parse_from(["smokesignal", "verify", "0x1234"]).is_err());
        assert!(Cli::try_parse_from([
            "smokesignal",
            "verify",
            "0x1111111111111111111111111111111111111111"
        ])
        .is_ok());
    }
}
