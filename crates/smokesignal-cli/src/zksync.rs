//! zkSync EIP-712 deployment transactions
//!
//! Contracts are not deployed with a CREATE transaction on zkSync. Instead a
//! type `0x71` transaction calls `create` on the ContractDeployer system
//! contract with the bytecode hash, and the bytecode itself (plus every
//! contract it can deploy) travels in the transaction's `factoryDeps` field.

use alloy::primitives::{address, Address, Bytes, Signature, B256, U256};
use alloy::sol;
use alloy::sol_types::{eip712_domain, SolCall, SolStruct};
use alloy_rlp::{Encodable, Header};
use serde::{Deserialize, Serialize};
use smokesignal_core::{ConstructorArgs, ContractArtifact, Error, Result};

/// ContractDeployer system contract
pub const CONTRACT_DEPLOYER_ADDRESS: Address = address!("0000000000000000000000000000000000008006");

/// Transaction type of zkSync EIP-712 transactions
pub const EIP712_TX_TYPE: u8 = 0x71;

/// Gas per pubdata byte used when asking the node for a fee estimate
pub const DEFAULT_GAS_PER_PUBDATA: u64 = 50_000;

sol! {
    function create(bytes32 _salt, bytes32 _bytecodeHash, bytes _input) external payable returns (address);

    struct Transaction {
        uint256 txType;
        uint256 from;
        uint256 to;
        uint256 gasLimit;
        uint256 gasPerPubdataByteLimit;
        uint256 maxFeePerGas;
        uint256 maxPriorityFeePerGas;
        uint256 paymaster;
        uint256 nonce;
        uint256 value;
        bytes data;
        bytes32[] factoryDeps;
        bytes paymasterInput;
    }
}

/// Fee parameters returned by `zks_estimateFee`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Eip712Fee {
    #[serde(alias = "gasLimit")]
    pub gas_limit: U256,
    #[serde(alias = "gasPerPubdataLimit")]
    pub gas_per_pubdata_limit: U256,
    #[serde(alias = "maxFeePerGas")]
    pub max_fee_per_gas: U256,
    #[serde(alias = "maxPriorityFeePerGas")]
    pub max_priority_fee_per_gas: U256,
}

impl Eip712Fee {
    /// Upper bound of the deployment cost in wei
    pub fn total(&self) -> U256 {
        self.gas_limit.saturating_mul(self.max_fee_per_gas)
    }
}

/// Call request sent to `zks_estimateFee`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRequest {
    from: Address,
    to: Address,
    data: Bytes,
    #[serde(rename = "type")]
    tx_type: U256,
    eip712_meta: Eip712Meta,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Eip712Meta {
    gas_per_pubdata: U256,
    /// Raw bytecodes; the node expects arrays of bytes here, not hex strings
    factory_deps: Vec<Vec<u8>>,
}

/// Unsigned deployment of one contract through the ContractDeployer
#[derive(Debug, Clone, PartialEq)]
pub struct DeployRequest {
    pub from: Address,
    /// `create(salt, bytecodeHash, constructorArgs)` calldata
    pub calldata: Bytes,
    /// Dependency bytecodes followed by the contract's own bytecode
    pub factory_deps: Vec<Bytes>,
    factory_dep_hashes: Vec<B256>,
}

impl DeployRequest {
    pub fn new(from: Address, artifact: &ContractArtifact, args: &ConstructorArgs) -> Result<Self> {
        if !artifact.dependencies_resolved() {
            return Err(Error::InvalidArtifact(format!(
                "Factory dependencies of {} were not loaded",
                artifact.contract_name
            )));
        }

        let bytecode_hash = artifact.bytecode.zksync_hash()?;
        let calldata = createCall {
            _salt: B256::ZERO,
            _bytecodeHash: bytecode_hash,
            _input: Bytes::from(args.encode()),
        }
        .abi_encode();

        let mut factory_deps = Vec::new();
        let mut factory_dep_hashes = Vec::new();
        for bytecode in artifact
            .dependencies
            .iter()
            .chain(std::iter::once(&artifact.bytecode))
        {
            let hash = bytecode.zksync_hash()?;
            if factory_dep_hashes.contains(&hash) {
                continue;
            }
            factory_dep_hashes.push(hash);
            factory_deps.push(bytecode.to_bytes());
        }

        Ok(Self {
            from,
            calldata: Bytes::from(calldata),
            factory_deps,
            factory_dep_hashes,
        })
    }

    /// Request body for `zks_estimateFee`
    pub fn fee_request(&self) -> FeeRequest {
        FeeRequest {
            from: self.from,
            to: CONTRACT_DEPLOYER_ADDRESS,
            data: self.calldata.clone(),
            tx_type: U256::from(EIP712_TX_TYPE),
            eip712_meta: Eip712Meta {
                gas_per_pubdata: U256::from(DEFAULT_GAS_PER_PUBDATA),
                factory_deps: self.factory_deps.iter().map(|dep| dep.to_vec()).collect(),
            },
        }
    }

    fn typed_data(&self, fee: &Eip712Fee, nonce: u64) -> Transaction {
        Transaction {
            txType: U256::from(EIP712_TX_TYPE),
            from: U256::from_be_slice(self.from.as_slice()),
            to: U256::from_be_slice(CONTRACT_DEPLOYER_ADDRESS.as_slice()),
            gasLimit: fee.gas_limit,
            gasPerPubdataByteLimit: fee.gas_per_pubdata_limit,
            maxFeePerGas: fee.max_fee_per_gas,
            maxPriorityFeePerGas: fee.max_priority_fee_per_gas,
            paymaster: U256::ZERO,
            nonce: U256::from(nonce),
            value: U256::ZERO,
            data: self.calldata.clone(),
            factoryDeps: self.factory_dep_hashes.clone(),
            paymasterInput: Bytes::new(),
        }
    }

    /// EIP-712 digest the sender signs
    pub fn signing_hash(&self, fee: &Eip712Fee, nonce: u64, chain_id: u64) -> B256 {
        let domain = eip712_domain! {
            name: "zkSync",
            version: "2",
            chain_id: chain_id,
        };
        self.typed_data(fee, nonce).eip712_signing_hash(&domain)
    }

    /// Raw signed transaction for `eth_sendRawTransaction`
    pub fn encode_signed(
        &self,
        fee: &Eip712Fee,
        nonce: u64,
        chain_id: u64,
        signature: &Signature,
    ) -> Bytes {
        let mut payload = Vec::new();
        nonce.encode(&mut payload);
        fee.max_priority_fee_per_gas.encode(&mut payload);
        fee.max_fee_per_gas.encode(&mut payload);
        fee.gas_limit.encode(&mut payload);
        CONTRACT_DEPLOYER_ADDRESS.encode(&mut payload);
        U256::ZERO.encode(&mut payload);
        self.calldata.encode(&mut payload);
        u8::from(signature.v()).encode(&mut payload);
        signature.r().encode(&mut payload);
        signature.s().encode(&mut payload);
        chain_id.encode(&mut payload);
        self.from.encode(&mut payload);
        fee.gas_per_pubdata_limit.encode(&mut payload);
        self.factory_deps.encode(&mut payload);
        Bytes::copy_from_slice(&signature.as_bytes()).encode(&mut payload);
        // No paymaster
        Vec::<Bytes>::new().encode(&mut payload);

        let mut raw = vec![EIP712_TX_TYPE];
        Header {
            list: true,
            payload_length: payload.len(),
        }
        .encode(&mut raw);
        raw.extend_from_slice(&payload);
        Bytes::from(raw)
    }
}
