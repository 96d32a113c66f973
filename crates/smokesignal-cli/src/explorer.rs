//! zkSync block explorer contract verification API
//!
//! Requests are posted to the network's `contract_verification` endpoint; the
//! response is the numeric id of the queued request, which can later be
//! queried at `<endpoint>/<id>`.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use smokesignal_core::{
    Error, NetworkConfig, Result, VerificationId, VerificationRequest, VerificationService,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const CODE_FORMAT: &str = "solidity-single-file";

/// JSON body accepted by the explorer
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerificationPayload {
    contract_address: String,
    contract_name: String,
    source_code: String,
    code_format: &'static str,
    compiler_zksolc_version: String,
    compiler_solc_version: String,
    optimization_used: bool,
    constructor_arguments: String,
}

impl VerificationPayload {
    fn new(request: &VerificationRequest, source_code: String) -> Self {
        Self {
            contract_address: request.address.to_string(),
            contract_name: request.contract_name.clone(),
            source_code,
            code_format: CODE_FORMAT,
            compiler_zksolc_version: request.compiler.zksolc_version.clone(),
            compiler_solc_version: request.compiler.solc_version.clone(),
            optimization_used: true,
            constructor_arguments: request.constructor_args.to_hex(),
        }
    }
}

/// State of a previously submitted verification request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationState {
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub compilation_errors: Vec<String>,
}

/// Verification service backed by the explorer HTTP API
pub struct ExplorerVerifier {
    client: reqwest::Client,
    verify_url: Option<Url>,
    source_path: PathBuf,
}

impl ExplorerVerifier {
    pub fn new(verify_url: Option<&str>, source_path: impl Into<PathBuf>) -> Result<Self> {
        let verify_url = verify_url
            .map(|url| {
                url.parse::<Url>().map_err(|e| {
                    Error::Config(format!("Invalid verification URL '{}': {}", url, e))
                })
            })
            .transpose()?;

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            verify_url,
            source_path: source_path.into(),
        })
    }

    /// Build a verifier for the resolved network
    pub fn for_network(network: &NetworkConfig, source_path: impl Into<PathBuf>) -> Result<Self> {
        Self::new(network.verify_url.as_deref(), source_path)
    }

    fn endpoint(&self) -> Result<&Url> {
        self.verify_url.as_ref().ok_or_else(|| {
            Error::Verification("No verification endpoint configured for this network".to_string())
        })
    }

    fn read_source(&self) -> Result<String> {
        std::fs::read_to_string(&self.source_path).map_err(|e| {
            Error::Verification(format!(
                "Could not read contract source {}: {}",
                self.source_path.display(),
                e
            ))
        })
    }

    /// Query the state of a verification request
    pub async fn status(&self, id: VerificationId) -> Result<VerificationState> {
        let url = format!("{}/{}", self.endpoint()?.as_str().trim_end_matches('/'), id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Rpc(format!("Verification status request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Rpc(format!(
                "Explorer returned {} for verification {}: {}",
                status, id, body
            )));
        }

        response
            .json::<VerificationState>()
            .await
            .map_err(|e| Error::Rpc(format!("Invalid verification status response: {}", e)))
    }
}

#[async_trait]
impl VerificationService for ExplorerVerifier {
    async fn verify(&self, request: &VerificationRequest) -> Result<VerificationId> {
        let endpoint = self.endpoint()?.clone();

        if request.bytecode.is_empty() {
            return Err(Error::Verification(format!(
                "No bytecode to verify for {}",
                request.contract_name
            )));
        }

        let payload = VerificationPayload::new(request, self.read_source()?);
        tracing::debug!(
            endpoint = %endpoint,
            contract = %payload.contract_name,
            bytecode_hash = %request.bytecode.hash(),
            "Submitting verification request"
        );

        let response = self
            .client
            .post(endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Verification(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Verification(format!(
                "Explorer returned {}: {}",
                status, body
            )));
        }

        let id = response
            .json::<u64>()
            .await
            .map_err(|e| Error::Verification(format!("Invalid verification response: {}", e)))?;

        Ok(VerificationId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smokesignal_core::{Bytecode, DeployConfig, RuntimeMode};

    fn request(bytecode: &str) -> VerificationRequest {
        let config = DeployConfig::default();
        VerificationRequest::new(
            &config,
            "0x1111111111111111111111111111111111111111".parse().unwrap(),
            config.constructor_args(),
            Bytecode::from_hex(bytecode).unwrap(),
        )
    }

    #[test]
    fn test_payload_fields() {
        let payload = VerificationPayload::new(&request("0x6080"), "contract C {}".to_string());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            json["contractAddress"],
            "0x1111111111111111111111111111111111111111"
        );
        assert_eq!(
            json["contractName"],
            "contracts/SmokeSignal.sol:SmokeSignal_zkSync"
        );
        assert_eq!(json["codeFormat"], "solidity-single-file");
        assert_eq!(json["compilerSolcVersion"], "0.8.17");
        assert_eq!(json["compilerZksolcVersion"], "latest");
        assert_eq!(json["optimizationUsed"], true);
        assert_eq!(
            json["constructorArguments"],
            "0x000000000000000000000000959192eb0f3d33531711e596a66a7ee574e18a79"
        );
        assert_eq!(json["sourceCode"], "contract C {}");
    }

    #[test]
    fn test_parse_verification_state() {
        let state: VerificationState = serde_json::from_str(
            r#"{"status": "failed", "error": "Bytecode mismatch", "compilationErrors": []}"#,
        )
        .unwrap();

        assert_eq!(state.status, "failed");
        assert_eq!(state.error.as_deref(), Some("Bytecode mismatch"));

        let state: VerificationState = serde_json::from_str(r#"{"status": "queued"}"#).unwrap();
        assert!(state.error.is_none());
        assert!(state.compilation_errors.is_empty());
    }

    #[test]
    fn test_invalid_verify_url() {
        assert!(ExplorerVerifier::new(Some("not a url"), "contracts/SmokeSignal.sol").is_err());
    }

    #[tokio::test]
    async fn test_verify_without_endpoint() {
        let network = NetworkConfig::for_mode(&RuntimeMode::Test);
        let verifier = ExplorerVerifier::for_network(&network, "contracts/SmokeSignal.sol").unwrap();

        let err = verifier.verify(&request("0x6080")).await.unwrap_err();
        assert!(matches!(err, Error::Verification(_)));
    }

    #[tokio::test]
    async fn test_verify_rejects_empty_bytecode() {
        let verifier = ExplorerVerifier::new(
            Some("http://127.0.0.1:9/contract_verification"),
            "contracts/SmokeSignal.sol",
        )
        .unwrap();

        let err = verifier.verify(&request("0x")).await.unwrap_err();
        assert!(err.to_string().contains("No bytecode"));
    }

    #[tokio::test]
    async fn test_verify_missing_source_file() {
        let verifier = ExplorerVerifier::new(
            Some("http://127.0.0.1:9/contract_verification"),
            "/nonexistent/SmokeSignal.sol",
        )
        .unwrap();

        let err = verifier.verify(&request("0x6080")).await.unwrap_err();
        assert!(err.to_string().contains("Could not read contract source"));
    }
}
