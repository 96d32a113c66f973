use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("⛔️ Private key not detected! Set WALLET_PRIVATE_KEY or add it to the .env file")]
    MissingSigningKey,

    #[error("Could not find artifact for contract '{0}'. Make sure the contracts were compiled.")]
    ArtifactNotFound(String),

    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    #[error("Fee estimation failed: {0}")]
    FeeEstimation(String),

    #[error("Deployment failed: {0}")]
    Deployment(String),

    #[error("Verification failed: {0}")]
    Verification(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

pub type Result<T> = std::result::Result<T, Error>;
