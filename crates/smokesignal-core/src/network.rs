//! Network configuration resolution
//!
//! The runtime mode is read once at process entry and mapped to a fixed set of
//! endpoints. Exactly the value `test` selects the local loopback network;
//! every other value, including a missing one, selects a public network.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Mode value that selects local loopback endpoints
pub const TEST_MODE: &str = "test";

/// Live mode values that are recognised without a warning
const KNOWN_LIVE_MODES: &[&str] = &["production", "development", "staging", "testnet", "mainnet"];

const LOCAL_L2_RPC_URL: &str = "http://localhost:3050";
const LOCAL_L1_RPC_URL: &str = "http://localhost:8545";

const TESTNET_RPC_URL: &str = "https://zksync2-testnet.zksync.dev";
const TESTNET_ETH_NETWORK: &str = "goerli";
const TESTNET_VERIFY_URL: &str = "https://zksync2-testnet-explorer.zksync.dev/contract_verification";

const MAINNET_RPC_URL: &str = "https://zksync-era.blockpi.network/v1/rpc/public";
const MAINNET_ETH_NETWORK: &str = "mainnet";
const MAINNET_VERIFY_URL: &str = "https://zksync2-mainnet-explorer.zksync.io/contract_verification";

/// Process-level mode distinguishing local test runs from public-network runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeMode {
    Test,
    /// Any value other than `test`, kept verbatim for diagnostics
    Live(Option<String>),
}

impl RuntimeMode {
    /// Interpret the raw mode value (e.g. `NODE_ENV`)
    ///
    /// The comparison is exact: `Test` or `test ` route to live behaviour.
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some(TEST_MODE) => RuntimeMode::Test,
            Some(other) => {
                if !KNOWN_LIVE_MODES.contains(&other) {
                    tracing::warn!(
                        mode = other,
                        "Unrecognised runtime mode, using public network endpoints"
                    );
                }
                RuntimeMode::Live(Some(other.to_string()))
            }
            None => RuntimeMode::Live(None),
        }
    }

    pub fn is_test(&self) -> bool {
        matches!(self, RuntimeMode::Test)
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeMode::Test => write!(f, "{}", TEST_MODE),
            RuntimeMode::Live(Some(raw)) => write!(f, "{}", raw),
            RuntimeMode::Live(None) => write!(f, "unset"),
        }
    }
}

/// Public network to use outside of test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkTarget {
    #[default]
    Testnet,
    Mainnet,
}

impl NetworkTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkTarget::Testnet => "testnet",
            NetworkTarget::Mainnet => "mainnet",
        }
    }
}

impl fmt::Display for NetworkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NetworkTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "testnet" => Ok(NetworkTarget::Testnet),
            "mainnet" => Ok(NetworkTarget::Mainnet),
            other => Err(Error::Config(format!(
                "Unknown network target '{}', expected 'testnet' or 'mainnet'",
                other
            ))),
        }
    }
}

/// Endpoint parameters for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// L2 JSON-RPC endpoint
    pub rpc_url: String,
    /// Underlying L1 network, either a name or an RPC URL
    pub eth_network: String,
    pub zksync: bool,
    /// Block explorer contract verification endpoint
    pub verify_url: Option<String>,
}

impl NetworkConfig {
    /// Resolve the configuration for a mode and the default public target
    pub fn for_mode(mode: &RuntimeMode) -> Self {
        Self::resolve(mode, NetworkTarget::default())
    }

    /// Resolve the configuration for a mode and public target
    ///
    /// In test mode the target is ignored.
    pub fn resolve(mode: &RuntimeMode, target: NetworkTarget) -> Self {
        if mode.is_test() {
            return Self {
                rpc_url: LOCAL_L2_RPC_URL.to_string(),
                eth_network: LOCAL_L1_RPC_URL.to_string(),
                zksync: true,
                verify_url: None,
            };
        }

        let (rpc_url, eth_network, verify_url) = match target {
            NetworkTarget::Testnet => (TESTNET_RPC_URL, TESTNET_ETH_NETWORK, TESTNET_VERIFY_URL),
            NetworkTarget::Mainnet => (MAINNET_RPC_URL, MAINNET_ETH_NETWORK, MAINNET_VERIFY_URL),
        };

        Self {
            rpc_url: rpc_url.to_string(),
            eth_network: eth_network.to_string(),
            zksync: true,
            verify_url: Some(verify_url.to_string()),
        }
    }
}
