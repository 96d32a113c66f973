pub mod args;
pub mod artifact;
pub mod bytecode;
pub mod config;
pub mod deploy;
pub mod error;
pub mod fee;
pub mod network;
pub mod signing;
pub mod verify;

pub use args::ConstructorArgs;
pub use artifact::ContractArtifact;
pub use bytecode::Bytecode;
pub use config::{CompilerSettings, DeployConfig};
pub use deploy::{
    ArtifactStore, ChainClient, DeployEvent, DeployedContract, Deployer, DeploymentOutcome,
    Reporter,
};
pub use error::{Error, Result};
pub use fee::format_fee;
pub use network::{NetworkConfig, NetworkTarget, RuntimeMode};
pub use signing::SigningKey;
pub use verify::{VerificationId, VerificationRequest, VerificationService, VerificationStatus};

/// Re-export alloy types for convenience
pub use alloy::primitives::{Address, TxHash, U256};
