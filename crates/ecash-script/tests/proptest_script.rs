use proptest::prelude::*;

use ecash_script::{Address, AddressType, Network, Script};

fn network() -> impl Strategy<Value = Network> {
    prop_oneof![
        Just(Network::Mainnet),
        Just(Network::Testnet),
        Just(Network::Regtest),
    ]
}

proptest! {
    #[test]
    fn cashaddr_survives_encode_and_case_change(
        hash in prop::array::uniform20(any::<u8>()),
        net in network(),
        p2sh in any::<bool>()
    ) {
        let kind = if p2sh { AddressType::P2sh } else { AddressType::P2pkh };
        let addr = Address { network: net, kind, hash };
        let encoded = addr.to_cashaddr();
        prop_assert_eq!(Address::from_cashaddr(&encoded).unwrap(), addr.clone());
        prop_assert_eq!(Address::from_cashaddr(&encoded.to_ascii_uppercase()).unwrap(), addr);
    }

    #[test]
    fn cashaddr_detects_single_character_substitution(
        hash in prop::array::uniform20(any::<u8>()),
        idx in any::<prop::sample::Index>(),
        replacement in prop::sample::select(b"qpzry9x8gf2tvdw0s3jn54khce6mua7l".to_vec())
    ) {
        let encoded = Address::from_public_key_hash(&hash, Network::Mainnet).to_cashaddr();
        let body_start = "ecash:".len();
        let i = body_start + idx.index(encoded.len() - body_start);
        let mut bytes = encoded.clone().into_bytes();
        prop_assume!(bytes[i] != replacement);
        bytes[i] = replacement;
        let tampered = String::from_utf8(bytes).unwrap();
        prop_assert!(Address::from_cashaddr(&tampered).is_err());
    }

    #[test]
    fn locking_script_maps_back_to_address(hash in prop::array::uniform20(any::<u8>()), net in network()) {
        let addr = Address::from_public_key_hash(&hash, net);
        let script: Script = addr.locking_script();
        prop_assert!(script.is_p2pkh());
        prop_assert_eq!(Address::from_locking_script(&script, net), Some(addr));
    }
}
