use proptest::prelude::*;

use ecash_payout::{FundsError, PayoutError, PayoutPlan, TransactionAssembler};
use ecash_primitives::ec::PrivateKey;
use ecash_script::Script;
use ecash_slp::{
    plain_utxos_by_value, select_token_utxos, Outpoint, PlainUtxo, TokenAnnotation, TokenId, TokenProtocol,
    TokenType, TokenUtxo, Utxo,
};
use ecash_transaction::template::p2pkh;
use ecash_transaction::FeePolicy;

const RMZ: [u8; 32] = [0x77; 32];

fn outpoint(n: usize) -> Outpoint {
    Outpoint { txid: format!("{:064x}", n + 1), out_idx: n as u32 }
}

/// Wallet with token outputs first, then plain outputs.
fn wallet(atoms: &[u64], sats: &[u64]) -> Vec<Utxo> {
    let tokens = atoms.iter().map(|a| (Some(*a), 546));
    let plain = sats.iter().map(|s| (None, *s));
    tokens
        .chain(plain)
        .enumerate()
        .map(|(i, (atoms, sats))| match atoms {
            Some(atoms) => Utxo::Token(TokenUtxo {
                outpoint: outpoint(i),
                sats,
                token: TokenAnnotation {
                    token_id: TokenId::from_bytes(RMZ),
                    token_type: TokenType::SLP_FUNGIBLE,
                    atoms,
                    is_mint_baton: false,
                },
            }),
            None => Utxo::Plain(PlainUtxo { outpoint: outpoint(i), sats }),
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// The loop uses the shortest prefix of the value-ordered plain UTXOs
    /// that funds the payout, makes one attempt per prefix length tried, and
    /// conserves value.
    #[test]
    fn fee_loop_bounded_and_minimal(
        atoms in prop::collection::vec(1u64..5_000, 1..4),
        sats in prop::collection::vec(1u64..3_000, 0..6),
    ) {
        let key = PrivateKey::from_bytes(&[0x19; 32]).unwrap();
        let wallet_script = p2pkh::lock_for_key(&key);
        let signer = p2pkh::unlock(key, None);
        let assembler = TransactionAssembler::new(&signer, wallet_script, FeePolicy::default());

        let utxos = wallet(&atoms, &sats);
        let token_id = TokenId::from_bytes(RMZ);
        let requested = atoms.iter().sum::<u64>().div_ceil(2);
        let selection = select_token_utxos(&utxos, &token_id, TokenProtocol::Slp, requested).unwrap();
        let plain = plain_utxos_by_value(&utxos);

        let recipient = Script::p2pkh(&[0x42; 20]);
        let plan = PayoutPlan {
            token_id: &token_id,
            token_type: 1,
            recipient: &recipient,
            amount_atoms: requested,
            selection: &selection,
        };

        match assembler.assemble(&plan, &plain) {
            Ok(payout) => {
                prop_assert!(payout.fee_inputs <= plain.len());
                prop_assert_eq!(payout.attempts, payout.fee_inputs + 1);
                prop_assert_eq!(payout.tx.input_count(), selection.inputs.len() + payout.fee_inputs);

                let inputs = payout.tx.total_input_satoshis().unwrap();
                let outputs = payout.tx.total_output_satoshis().unwrap();
                prop_assert_eq!(inputs - outputs, payout.fee_sats);

                let expected_in: u64 = selection.inputs.iter().map(|u| u.sats).sum::<u64>()
                    + plain[..payout.fee_inputs].iter().map(|u| u.sats).sum::<u64>();
                prop_assert_eq!(inputs, expected_in);

                if payout.fee_inputs > 0 {
                    let shorter = assembler.assemble(&plan, &plain[..payout.fee_inputs - 1]);
                    let shorter_is_short = matches!(
                        shorter,
                        Err(PayoutError::Funds(FundsError::InsufficientPlainValue { .. }))
                    );
                    prop_assert!(shorter_is_short);
                }
            }
            Err(PayoutError::Funds(FundsError::InsufficientPlainValue { .. })) => {}
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}
