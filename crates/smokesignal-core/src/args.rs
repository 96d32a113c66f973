//! Constructor argument encoding

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::Address;

/// Ordered constructor arguments for a deployment
///
/// The same value is used for fee estimation, submission and verification so
/// all three see an identical encoding.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConstructorArgs(Vec<DynSolValue>);

impl ConstructorArgs {
    pub fn new(values: Vec<DynSolValue>) -> Self {
        Self(values)
    }

    /// Arguments for a contract taking a single donation-recipient address
    pub fn donation(recipient: Address) -> Self {
        Self(vec![DynSolValue::Address(recipient)])
    }

    pub fn values(&self) -> &[DynSolValue] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// ABI-encode the arguments as constructor parameters
    pub fn encode(&self) -> Vec<u8> {
        if self.0.is_empty() {
            return Vec::new();
        }
        DynSolValue::Tuple(self.0.clone()).abi_encode_params()
    }

    /// Encoded arguments as a 0x-prefixed hex string
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.encode()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, U256};

    #[test]
    fn test_encode_donation_address() {
        let args = ConstructorArgs::donation(address!("959192eb0F3D33531711E596A66A7ee574e18A79"));

        assert_eq!(
            args.to_hex(),
            "0x000000000000000000000000959192eb0f3d33531711e596a66a7ee574e18a79"
        );
    }

    #[test]
    fn test_encode_empty() {
        let args = ConstructorArgs::default();
        assert!(args.is_empty());
        assert!(args.encode().is_empty());
        assert_eq!(args.to_hex(), "0x");
    }

    #[test]
    fn test_encode_multiple_values() {
        let args = ConstructorArgs::new(vec![
            DynSolValue::Address(Address::ZERO),
            DynSolValue::Uint(U256::from(42), 256),
        ]);

        let encoded = args.encode();
        assert_eq!(encoded.len(), 64);
        assert_eq!(encoded[63], 42);
    }
}
