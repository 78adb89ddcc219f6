use proptest::prelude::*;

use ecash_slp::types::SLP_FUNGIBLE;
use ecash_slp::{
    build_send_script, parse_send_script, plain_utxos_by_value, select_token_utxos, Outpoint,
    PlainUtxo, TokenAnnotation, TokenError, TokenId, TokenProtocol, TokenType, TokenUtxo, Utxo,
};

const RMZ: [u8; 32] = [0x5a; 32];

/// Strategy for a wallet UTXO set: plain outputs, RMZ outputs, foreign
/// tokens and the odd mint baton.
fn arb_utxos() -> impl Strategy<Value = Vec<Utxo>> {
    let arb_utxo = (0u8..4, 0u64..10_000, 1u64..100_000).prop_map(|(kind, atoms, sats)| (kind, atoms, sats));
    prop::collection::vec(arb_utxo, 0..24).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (kind, atoms, sats))| {
                let outpoint = Outpoint { txid: format!("{:064x}", i), out_idx: i as u32 };
                let token = |id: [u8; 32], baton: bool| TokenAnnotation {
                    token_id: TokenId::from_bytes(id),
                    token_type: TokenType::SLP_FUNGIBLE,
                    atoms,
                    is_mint_baton: baton,
                };
                match kind {
                    0 => Utxo::Plain(PlainUtxo { outpoint, sats }),
                    1 => Utxo::Token(TokenUtxo { outpoint, sats: 546, token: token(RMZ, false) }),
                    2 => Utxo::Token(TokenUtxo { outpoint, sats: 546, token: token([0x01; 32], false) }),
                    _ => Utxo::Token(TokenUtxo { outpoint, sats: 546, token: token(RMZ, true) }),
                }
            })
            .collect()
    })
}

fn eligible_sum(utxos: &[Utxo]) -> u64 {
    utxos
        .iter()
        .filter_map(|u| match u {
            Utxo::Token(t) if t.token.token_id.as_bytes() == &RMZ && !t.token.is_mint_baton => Some(t.token.atoms),
            _ => None,
        })
        .sum()
}

proptest! {
    /// Selection covers the request, only picks eligible outputs, and drops
    /// nothing it did not need.
    #[test]
    fn selection_covers_request_minimally(utxos in arb_utxos(), requested in 1u64..50_000) {
        let token_id = TokenId::from_bytes(RMZ);
        match select_token_utxos(&utxos, &token_id, TokenProtocol::Slp, requested) {
            Ok(sel) => {
                let sum: u128 = sel.inputs.iter().map(|u| u128::from(u.token.atoms)).sum();
                prop_assert_eq!(sum, sel.total_atoms);
                prop_assert!(sel.total_atoms >= u128::from(requested));
                prop_assert_eq!(u128::from(sel.change_atoms), sel.total_atoms - u128::from(requested));
                for u in &sel.inputs {
                    prop_assert_eq!(u.token.token_id, token_id);
                    prop_assert!(!u.token.is_mint_baton);
                    prop_assert!(u.token.atoms > 0);
                }
                for w in sel.inputs.windows(2) {
                    prop_assert!(w[0].token.atoms >= w[1].token.atoms);
                }
                // Without the last pick the request would not be covered.
                let last = sel.inputs.last().map(|u| u.token.atoms).unwrap_or(0);
                prop_assert!(sel.total_atoms - u128::from(last) < u128::from(requested));
            }
            Err(TokenError::InsufficientTokenBalance { requested: r, available }) => {
                prop_assert_eq!(r, requested);
                prop_assert_eq!(available, eligible_sum(&utxos));
                prop_assert!(available < requested);
            }
            Err(e) => prop_assert!(false, "unexpected error: {e}"),
        }
    }

    /// Plain outputs come back complete and ordered by value.
    #[test]
    fn plain_utxos_sorted(utxos in arb_utxos()) {
        let plain = plain_utxos_by_value(&utxos);
        let expected = utxos.iter().filter(|u| matches!(u, Utxo::Plain(_))).count();
        prop_assert_eq!(plain.len(), expected);
        for w in plain.windows(2) {
            prop_assert!(w[0].sats >= w[1].sats);
        }
    }

    /// SEND scripts decode to exactly what was encoded.
    #[test]
    fn send_script_decodes(id in prop::array::uniform32(any::<u8>()), amounts in prop::collection::vec(any::<u64>(), 1..=19)) {
        let token_id = TokenId::from_bytes(id);
        let script = build_send_script(&token_id, SLP_FUNGIBLE, &amounts).expect("valid amount count");
        let send = parse_send_script(&script).expect("well-formed SEND");
        prop_assert_eq!(send.token_id, token_id);
        prop_assert_eq!(send.token_type, SLP_FUNGIBLE);
        prop_assert_eq!(send.amounts, amounts);
    }
}
