//! Source verification against a block explorer

use std::fmt;

use alloy::primitives::Address;
use async_trait::async_trait;

use crate::args::ConstructorArgs;
use crate::bytecode::Bytecode;
use crate::config::{CompilerSettings, DeployConfig};
use crate::error::Result;

/// Identifier the explorer assigns to a verification request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationId(pub u64);

impl fmt::Display for VerificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything the explorer needs to match deployed bytecode with its source
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationRequest {
    pub address: Address,
    /// `path/Source.sol:ContractName`
    pub contract_name: String,
    pub constructor_args: ConstructorArgs,
    pub bytecode: Bytecode,
    pub compiler: CompilerSettings,
}

impl VerificationRequest {
    pub fn new(
        config: &DeployConfig,
        address: Address,
        constructor_args: ConstructorArgs,
        bytecode: Bytecode,
    ) -> Self {
        Self {
            address,
            contract_name: config.fully_qualified_name.clone(),
            constructor_args,
            bytecode,
            compiler: config.compiler_settings(),
        }
    }
}

/// Result of the best-effort verification step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    Submitted(VerificationId),
    Failed(String),
    /// Test mode, nothing was sent
    Skipped,
}

/// Block explorer verification service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VerificationService: Send + Sync {
    /// Submit a verification request
    async fn verify(&self, request: &VerificationRequest) -> Result<VerificationId>;
}
