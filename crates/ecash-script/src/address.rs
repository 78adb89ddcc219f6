//! eCash cashaddr addresses.
//!
//! An address is a network prefix, a type (key hash or script hash) and a
//! 20-byte hash. Only 160-bit payloads are supported, which covers every
//! standard P2PKH and P2SH output.

use std::fmt;
use std::str::FromStr;

use ecash_primitives::ec::PublicKey;

use crate::cashaddr::{self, TYPE_P2PKH, TYPE_P2SH};
use crate::{Script, ScriptError};

/// Network an address belongs to, identified by its cashaddr prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Network {
    /// `ecash:`
    Mainnet,
    /// `ectest:`
    Testnet,
    /// `ecregtest:`
    Regtest,
}

impl Network {
    /// The cashaddr prefix, without the colon.
    pub fn prefix(&self) -> &'static str {
        match self {
            Network::Mainnet => "ecash",
            Network::Testnet => "ectest",
            Network::Regtest => "ecregtest",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "ecash" => Some(Network::Mainnet),
            "ectest" => Some(Network::Testnet),
            "ecregtest" => Some(Network::Regtest),
            _ => None,
        }
    }
}

/// What the address hash commits to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressType {
    /// Hash160 of a compressed public key.
    P2pkh,
    /// Hash160 of a redeem script.
    P2sh,
}

/// A decoded cashaddr address.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    pub network: Network,
    pub kind: AddressType,
    pub hash: [u8; 20],
}

impl Address {
    /// Parse a prefixed cashaddr string on any known eCash network.
    ///
    /// # Arguments
    /// * `addr` - e.g. `ecash:qpm2qsznhks23z7629mms6s4cwef74vcwva87rkuu2`.
    ///
    /// # Returns
    /// The address, or an error when the string is malformed, the checksum
    /// fails, the prefix is unknown, or the payload is not a 160-bit
    /// P2PKH / P2SH hash.
    pub fn from_cashaddr(addr: &str) -> Result<Self, ScriptError> {
        let (prefix, version, hash) = cashaddr::decode(addr)?;

        let network = Network::from_prefix(&prefix)
            .ok_or_else(|| ScriptError::UnsupportedAddress(format!("unknown prefix '{}'", prefix)))?;

        let kind = match version {
            TYPE_P2PKH => AddressType::P2pkh,
            TYPE_P2SH => AddressType::P2sh,
            other => {
                return Err(ScriptError::UnsupportedAddress(format!(
                    "version byte 0x{:02x}",
                    other
                )))
            }
        };

        let hash: [u8; 20] = hash
            .as_slice()
            .try_into()
            .map_err(|_| ScriptError::UnsupportedAddress(format!("{}-byte hash", hash.len())))?;

        Ok(Address { network, kind, hash })
    }

    /// Parse and require a specific network.
    pub fn parse_for_network(addr: &str, network: Network) -> Result<Self, ScriptError> {
        let parsed = Self::from_cashaddr(addr)?;
        if parsed.network != network {
            return Err(ScriptError::WrongNetwork {
                expected: network.prefix().to_string(),
                found: parsed.network.prefix().to_string(),
            });
        }
        Ok(parsed)
    }

    /// P2PKH address for a 20-byte key hash.
    pub fn from_public_key_hash(hash: &[u8; 20], network: Network) -> Self {
        Address {
            network,
            kind: AddressType::P2pkh,
            hash: *hash,
        }
    }

    /// P2PKH address of a public key, committing to its compressed form.
    pub fn from_public_key(pub_key: &PublicKey, network: Network) -> Self {
        Self::from_public_key_hash(&pub_key.hash160(), network)
    }

    /// Recover the address a standard locking script pays to.
    ///
    /// Returns `None` for anything other than P2PKH or P2SH.
    pub fn from_locking_script(script: &Script, network: Network) -> Option<Self> {
        if let Ok(hash) = script.public_key_hash() {
            return Some(Self::from_public_key_hash(&hash, network));
        }
        script.script_hash().map(|hash| Address {
            network,
            kind: AddressType::P2sh,
            hash,
        })
    }

    /// Lowercase cashaddr string with prefix.
    pub fn to_cashaddr(&self) -> String {
        let version = match self.kind {
            AddressType::P2pkh => TYPE_P2PKH,
            AddressType::P2sh => TYPE_P2SH,
        };
        cashaddr::encode(self.network.prefix(), version, &self.hash)
    }

    /// The output script paying to this address.
    pub fn locking_script(&self) -> Script {
        match self.kind {
            AddressType::P2pkh => Script::p2pkh(&self.hash),
            AddressType::P2sh => Script::p2sh(&self.hash),
        }
    }
}

impl FromStr for Address {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_cashaddr(s)
    }
}

impl fmt::Display for Address {
    /// Display the address as its cashaddr string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cashaddr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecash_primitives::ec::PrivateKey;

    const ADDR: &str = "ecash:qpm2qsznhks23z7629mms6s4cwef74vcwva87rkuu2";
    const HASH: &str = "76a04053bda0a88bda5177b86a15c3b29f559873";

    fn hash() -> [u8; 20] {
        let mut out = [0u8; 20];
        out.copy_from_slice(&hex::decode(HASH).expect("valid hex"));
        out
    }

    // -----------------------------------------------------------------------
    // from_cashaddr
    // -----------------------------------------------------------------------

    /// A known mainnet P2PKH address decodes to its key hash.
    #[test]
    fn test_from_cashaddr_mainnet_p2pkh() {
        let addr = Address::from_cashaddr(ADDR).expect("should parse");
        assert_eq!(addr.network, Network::Mainnet);
        assert_eq!(addr.kind, AddressType::P2pkh);
        assert_eq!(addr.hash, hash());
        assert_eq!(addr.to_string(), ADDR);
    }

    #[test]
    fn test_locking_script_of_p2pkh() {
        let addr: Address = ADDR.parse().unwrap();
        assert_eq!(
            addr.locking_script().to_hex(),
            format!("76a914{}88ac", HASH)
        );
    }

    /// P2SH addresses encode and decode with the script type bits.
    #[test]
    fn test_p2sh_roundtrip() {
        let addr = Address {
            network: Network::Mainnet,
            kind: AddressType::P2sh,
            hash: hash(),
        };
        let encoded = addr.to_cashaddr();
        assert!(encoded.starts_with("ecash:p"));
        let back = Address::from_cashaddr(&encoded).unwrap();
        assert_eq!(back, addr);
        assert_eq!(back.locking_script().to_hex(), format!("a914{}87", HASH));
    }

    #[test]
    fn test_other_networks_roundtrip() {
        for network in [Network::Testnet, Network::Regtest] {
            let addr = Address::from_public_key_hash(&hash(), network);
            let encoded = addr.to_cashaddr();
            assert!(encoded.starts_with(network.prefix()));
            assert_eq!(Address::from_cashaddr(&encoded).unwrap(), addr);
        }
    }

    // -----------------------------------------------------------------------
    // Error cases
    // -----------------------------------------------------------------------

    #[test]
    fn test_unknown_prefix_rejected() {
        let foreign = cashaddr::encode("bitcoincash", TYPE_P2PKH, &hash());
        assert!(matches!(
            Address::from_cashaddr(&foreign),
            Err(ScriptError::UnsupportedAddress(_))
        ));
    }

    #[test]
    fn test_unprefixed_rejected() {
        assert!(Address::from_cashaddr("qpm2qsznhks23z7629mms6s4cwef74vcwva87rkuu2").is_err());
    }

    #[test]
    fn test_wide_hash_rejected() {
        // Version byte 0x03 declares a 256-bit hash.
        let wide = cashaddr::encode("ecash", 0x03, &[0x22; 32]);
        assert!(matches!(
            Address::from_cashaddr(&wide),
            Err(ScriptError::UnsupportedAddress(_))
        ));
    }

    #[test]
    fn test_parse_for_network() {
        assert!(Address::parse_for_network(ADDR, Network::Mainnet).is_ok());
        assert_eq!(
            Address::parse_for_network(ADDR, Network::Testnet),
            Err(ScriptError::WrongNetwork {
                expected: "ectest".to_string(),
                found: "ecash".to_string(),
            })
        );
    }

    // -----------------------------------------------------------------------
    // Construction from keys and scripts
    // -----------------------------------------------------------------------

    #[test]
    fn test_from_public_key() {
        let mut one = [0u8; 32];
        one[31] = 1;
        let key = PrivateKey::from_bytes(&one).unwrap();
        let addr = Address::from_public_key(&key.pub_key(), Network::Mainnet);
        assert_eq!(hex::encode(addr.hash), "751e76e8199196d454941c45d1b3a323f1433bd6");
    }

    #[test]
    fn test_from_locking_script() {
        let p2pkh = Script::p2pkh(&hash());
        let addr = Address::from_locking_script(&p2pkh, Network::Mainnet).unwrap();
        assert_eq!(addr.to_cashaddr(), ADDR);

        let p2sh = Script::p2sh(&hash());
        assert_eq!(
            Address::from_locking_script(&p2sh, Network::Mainnet).map(|a| a.kind),
            Some(AddressType::P2sh)
        );

        assert!(Address::from_locking_script(&Script::from_bytes(&[0x6a]), Network::Mainnet).is_none());
    }
}
