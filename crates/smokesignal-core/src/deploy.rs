//! Deployment orchestration
//!
//! [`Deployer`] drives a single deployment through a fixed sequence:
//!
//! 1. check that a signing key is present
//! 2. load the contract artifact
//! 3. estimate the deployment fee
//! 4. submit the deployment transaction
//! 5. report the deployed address
//! 6. submit source verification, unless running in test mode
//!
//! Failures in steps 1-4 abort the run. Verification is best-effort: its
//! failure is reported and recorded in the outcome but the run still succeeds.
//!
//! # Traits
//!
//! The collaborators are traits so the sequence can be exercised with mocks:
//!
//! - [`ArtifactStore`] - loads compiled artifacts by contract name
//! - [`ChainClient`] - estimates fees and submits deployments
//! - [`VerificationService`] - submits source verification requests
//! - [`Reporter`] - receives operator-visible status events

use std::fmt;

use alloy::dyn_abi::JsonAbiExt;
use alloy::json_abi::JsonAbi;
use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use crate::args::ConstructorArgs;
use crate::artifact::ContractArtifact;
use crate::config::DeployConfig;
use crate::error::{Error, Result};
use crate::fee::format_fee;
use crate::network::{NetworkConfig, RuntimeMode};
use crate::signing::SigningKey;
use crate::verify::{VerificationId, VerificationRequest, VerificationService, VerificationStatus};

// =============================================================================
// Collaborators
// =============================================================================

/// Source of compiled contract artifacts
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactStore: Send + Sync {
    /// Load the artifact for a contract name
    fn load_artifact(&self, contract_name: &str) -> Result<ContractArtifact>;
}

/// Chain access needed for a deployment
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Estimate the cost of deploying `artifact`, in wei
    async fn estimate_deploy_fee(
        &self,
        artifact: &ContractArtifact,
        args: &ConstructorArgs,
    ) -> Result<U256>;

    /// Submit the deployment transaction and wait for the contract address
    async fn deploy(
        &self,
        artifact: &ContractArtifact,
        args: &ConstructorArgs,
    ) -> Result<DeployedContract>;
}

/// Handle to a freshly deployed contract
#[derive(Debug, Clone, PartialEq)]
pub struct DeployedContract {
    pub address: Address,
    pub abi: JsonAbi,
    pub tx_hash: TxHash,
}

impl DeployedContract {
    /// Encode constructor arguments through the contract's interface
    ///
    /// Contracts whose ABI declares no constructor get the plain parameter
    /// encoding.
    pub fn encode_deploy(&self, args: &ConstructorArgs) -> Result<String> {
        let Some(constructor) = &self.abi.constructor else {
            return Ok(args.to_hex());
        };

        let encoded = constructor.abi_encode_input(args.values()).map_err(|e| {
            Error::InvalidArtifact(format!(
                "Constructor arguments do not match the contract interface: {}",
                e
            ))
        })?;

        Ok(format!("0x{}", hex::encode(encoded)))
    }
}

// =============================================================================
// Reporting
// =============================================================================

/// Status event emitted while a deployment runs
#[derive(Debug, Clone, PartialEq)]
pub enum DeployEvent {
    Started { contract_name: String },
    FeeEstimated { fee: String },
    ConstructorArgs { encoded: String },
    Deployed { contract_name: String, address: Address },
    VerificationSubmitted { id: VerificationId },
    VerificationFailed { error: String },
    VerificationSkipped,
}

impl fmt::Display for DeployEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployEvent::Started { contract_name } => {
                write!(f, "Running deploy script for the {} contract", contract_name)
            }
            DeployEvent::FeeEstimated { fee } => {
                write!(f, "The deployment is estimated to cost {} ETH", fee)
            }
            DeployEvent::ConstructorArgs { encoded } => write!(f, "Constructor args:{}", encoded),
            DeployEvent::Deployed {
                contract_name,
                address,
            } => write!(f, "{} was deployed to {}", contract_name, address),
            DeployEvent::VerificationSubmitted { id } => {
                write!(f, "Verification request submitted with id {}", id)
            }
            DeployEvent::VerificationFailed { error } => {
                write!(f, "Contract verification failed: {}", error)
            }
            DeployEvent::VerificationSkipped => {
                write!(f, "Contract not verified, deployed locally.")
            }
        }
    }
}

/// Sink for operator-visible status events
pub trait Reporter {
    fn report(&mut self, event: &DeployEvent);
}

impl Reporter for Vec<DeployEvent> {
    fn report(&mut self, event: &DeployEvent) {
        self.push(event.clone());
    }
}

// =============================================================================
// Orchestrator
// =============================================================================

/// Summary of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentOutcome {
    pub contract_name: String,
    pub address: Address,
    pub tx_hash: TxHash,
    pub fee: U256,
    pub verification: VerificationStatus,
}

/// Runs one deployment against the given collaborators
pub struct Deployer<'a> {
    pub signing_key: &'a SigningKey,
    pub mode: &'a RuntimeMode,
    pub network: &'a NetworkConfig,
    pub config: &'a DeployConfig,
    pub artifacts: &'a dyn ArtifactStore,
    pub chain: &'a dyn ChainClient,
    pub verifier: &'a dyn VerificationService,
}

impl Deployer<'_> {
    /// Execute the deployment sequence once
    pub async fn run(&self, reporter: &mut dyn Reporter) -> Result<DeploymentOutcome> {
        self.signing_key.ensure_present()?;

        let contract_name = self.config.contract_name.clone();
        reporter.report(&DeployEvent::Started {
            contract_name: contract_name.clone(),
        });

        let artifact = self.artifacts.load_artifact(&contract_name)?;
        tracing::debug!(
            contract = %contract_name,
            bytecode_len = artifact.bytecode.len(),
            rpc_url = %self.network.rpc_url,
            "Loaded artifact"
        );

        let args = self.config.constructor_args();

        let fee = self.chain.estimate_deploy_fee(&artifact, &args).await?;
        reporter.report(&DeployEvent::FeeEstimated {
            fee: format_fee(fee),
        });

        let deployed = self.chain.deploy(&artifact, &args).await?;
        tracing::debug!(tx_hash = %deployed.tx_hash, "Deployment transaction mined");

        let encoded = deployed.encode_deploy(&args).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to plain constructor encoding");
            args.to_hex()
        });
        reporter.report(&DeployEvent::ConstructorArgs { encoded });
        reporter.report(&DeployEvent::Deployed {
            contract_name: contract_name.clone(),
            address: deployed.address,
        });

        let verification = self
            .verify(deployed.address, args, &artifact, reporter)
            .await;

        Ok(DeploymentOutcome {
            contract_name,
            address: deployed.address,
            tx_hash: deployed.tx_hash,
            fee,
            verification,
        })
    }

    /// Best-effort verification; never fails the run
    async fn verify(
        &self,
        address: Address,
        args: ConstructorArgs,
        artifact: &ContractArtifact,
        reporter: &mut dyn Reporter,
    ) -> VerificationStatus {
        if self.mode.is_test() {
            reporter.report(&DeployEvent::VerificationSkipped);
            return VerificationStatus::Skipped;
        }

        let request =
            VerificationRequest::new(self.config, address, args, artifact.bytecode.clone());

        match self.verifier.verify(&request).await {
            Ok(id) => {
                reporter.report(&DeployEvent::VerificationSubmitted { id });
                VerificationStatus::Submitted(id)
            }
            Err(e) => {
                tracing::warn!(error = %e, address = %address, "Verification request failed");
                let error = e.to_string();
                reporter.report(&DeployEvent::VerificationFailed {
                    error: error.clone(),
                });
                VerificationStatus::Failed(error)
            }
        }
    }
}
