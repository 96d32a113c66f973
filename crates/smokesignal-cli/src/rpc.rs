use alloy::network::{AnyNetwork, ReceiptResponse};
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use alloy::transports::http::reqwest::Url;
use alloy::transports::TransportResult;
use async_trait::async_trait;
use smokesignal_core::{
    ChainClient, ConstructorArgs, ContractArtifact, DeployedContract, Error, Result, SigningKey,
};

use crate::zksync::{DeployRequest, Eip712Fee};

/// Chain client signing zkSync EIP-712 deployments with a local private key
///
/// The provider uses alloy's `AnyNetwork` so that receipts of type `0x71`
/// transactions deserialize.
pub struct ZkSyncChainClient {
    provider: DynProvider<AnyNetwork>,
    signer: PrivateKeySigner,
}

impl ZkSyncChainClient {
    /// Validate the key and endpoint; no request is made here
    pub fn connect(rpc_url: &str, signing_key: &SigningKey) -> Result<Self> {
        signing_key.ensure_present()?;

        let signer: PrivateKeySigner = signing_key
            .expose()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid private key: {}", e)))?;

        let url: Url = rpc_url
            .parse()
            .map_err(|e| Error::Config(format!("Invalid RPC URL '{}': {}", rpc_url, e)))?;

        let provider = ProviderBuilder::new()
            .network::<AnyNetwork>()
            .connect_http(url)
            .erased();

        Ok(Self { provider, signer })
    }

    /// Deployer account address
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub async fn chain_id(&self) -> Result<u64> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| Error::Rpc(format!("Failed to fetch chain ID: {}", e)))
    }

    async fn estimate_fee(&self, request: &DeployRequest) -> TransportResult<Eip712Fee> {
        self.provider
            .raw_request("zks_estimateFee".into(), (request.fee_request(),))
            .await
    }
}

#[async_trait]
impl ChainClient for ZkSyncChainClient {
    async fn estimate_deploy_fee(
        &self,
        artifact: &ContractArtifact,
        args: &ConstructorArgs,
    ) -> Result<U256> {
        let request = DeployRequest::new(self.address(), artifact, args)?;

        let fee = self
            .estimate_fee(&request)
            .await
            .map_err(|e| Error::FeeEstimation(format!("zks_estimateFee failed: {}", e)))?;

        tracing::debug!(
            gas_limit = %fee.gas_limit,
            max_fee_per_gas = %fee.max_fee_per_gas,
            factory_deps = request.factory_deps.len(),
            "Estimated deployment cost"
        );

        Ok(fee.total())
    }

    async fn deploy(
        &self,
        artifact: &ContractArtifact,
        args: &ConstructorArgs,
    ) -> Result<DeployedContract> {
        let request = DeployRequest::new(self.address(), artifact, args)?;

        let fee = self
            .estimate_fee(&request)
            .await
            .map_err(|e| Error::Deployment(format!("Failed to estimate fee: {}", e)))?;

        let chain_id = self
            .provider
            .get_chain_id()
            .await
            .map_err(|e| Error::Deployment(format!("Failed to fetch chain ID: {}", e)))?;

        let nonce = self
            .provider
            .get_transaction_count(self.address())
            .await
            .map_err(|e| Error::Deployment(format!("Failed to fetch nonce: {}", e)))?;

        let hash = request.signing_hash(&fee, nonce, chain_id);
        let signature = self
            .signer
            .sign_hash_sync(&hash)
            .map_err(|e| Error::Deployment(format!("Failed to sign transaction: {}", e)))?;
        let raw = request.encode_signed(&fee, nonce, chain_id, &signature);

        let pending = self
            .provider
            .send_raw_transaction(&raw)
            .await
            .map_err(|e| Error::Deployment(format!("Failed to send deployment transaction: {}", e)))?;

        let tx_hash = *pending.tx_hash();
        tracing::debug!(%tx_hash, nonce, "Deployment transaction sent");

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| Error::Deployment(format!("Failed to get transaction receipt: {}", e)))?;

        if !receipt.status() {
            return Err(Error::Deployment(format!(
                "Deployment transaction {} reverted",
                tx_hash
            )));
        }

        let address = receipt.contract_address().ok_or_else(|| {
            Error::Deployment(format!(
                "Receipt for {} does not contain a contract address",
                tx_hash
            ))
        })?;

        Ok(DeployedContract {
            address,
            abi: artifact.abi.clone(),
            tx_hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // First default anvil account
    const TEST_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_connect_derives_address() {
        let client =
            ZkSyncChainClient::connect("http://localhost:3050", &SigningKey::new(TEST_KEY)).unwrap();

        assert_eq!(
            client.address().to_string(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
    }

    #[test]
    fn test_connect_without_key() {
        let result = ZkSyncChainClient::connect("http://localhost:3050", &SigningKey::default());
        assert!(matches!(result, Err(Error::MissingSigningKey)));
    }

    #[test]
    fn test_connect_invalid_key() {
        let result = ZkSyncChainClient::connect("http://localhost:3050", &SigningKey::new("0x1234"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_connect_invalid_url() {
        let result = ZkSyncChainClient::connect("not a url", &SigningKey::new(TEST_KEY));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_unresolved_dependencies_fail_before_rpc() {
        // Reaching the unused port 9 would surface as FeeEstimation instead
        let client =
            ZkSyncChainClient::connect("http://127.0.0.1:9", &SigningKey::new(TEST_KEY)).unwrap();
        let artifact = ContractArtifact::from_json(
            "Factory",
            r#"{"abi": [], "bytecode": "0xaa", "factoryDeps": {"0x0100abcd": "Child"}}"#,
        )
        .unwrap();

        let err = client
            .estimate_deploy_fee(&artifact, &ConstructorArgs::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidArtifact(_)));
    }
}
