use proptest::prelude::*;

use ecash_primitives::ec::PrivateKey;
use ecash_script::Script;
use ecash_transaction::builder::estimate_signed_size;
use ecash_transaction::template::p2pkh;
use ecash_transaction::{sign_with_fee, FeePolicy, Transaction, TransactionError, TransactionInput, TransactionOutput};

/// Strategy to generate a random transaction.
fn arb_transaction() -> impl Strategy<Value = Transaction> {
    let arb_input = (
        prop::array::uniform32(any::<u8>()),
        any::<u32>(),
        prop::collection::vec(any::<u8>(), 0..64),
        any::<u32>(),
    )
        .prop_map(|(hash, idx, script_bytes, seq)| {
            let mut input = TransactionInput::new();
            input.source_txid = hash;
            input.source_tx_out_index = idx;
            input.unlocking_script = if script_bytes.is_empty() {
                None
            } else {
                Some(Script::from_bytes(&script_bytes))
            };
            input.sequence_number = seq;
            input
        });

    let arb_output = (any::<u64>(), prop::collection::vec(any::<u8>(), 0..64))
        .prop_map(|(satoshis, script_bytes)| TransactionOutput::new(satoshis, Script::from_bytes(&script_bytes)));

    (
        any::<u32>(),
        prop::collection::vec(arb_input, 1..4),
        prop::collection::vec(arb_output, 1..4),
        any::<u32>(),
    )
        .prop_map(|(version, inputs, outputs, lock_time)| Transaction {
            version,
            inputs,
            outputs,
            lock_time,
        })
}

fn funded(inputs: &[u64], fixed: &[u64]) -> Transaction {
    let key = PrivateKey::from_bytes(&[0x33; 32]).unwrap();
    let wallet = p2pkh::lock_for_key(&key);
    let mut tx = Transaction::new();
    for (i, sats) in inputs.iter().enumerate() {
        let mut input = TransactionInput::new();
        input.source_txid = [0x44; 32];
        input.source_tx_out_index = i as u32;
        input.set_source_output(Some(TransactionOutput::new(*sats, wallet.clone())));
        tx.add_input(input);
    }
    for sats in fixed {
        tx.add_output(TransactionOutput::new(*sats, Script::p2pkh(&[0x55; 20])));
    }
    tx.add_output(TransactionOutput::change_slot(wallet));
    tx
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn transaction_bytes_roundtrip(tx in arb_transaction()) {
        let bytes = tx.to_bytes();
        let parsed = Transaction::from_bytes(&bytes).unwrap();
        prop_assert_eq!(parsed.to_bytes(), bytes);
    }

    /// Either the signer pays at least the estimated fee and conserves
    /// value, or it reports the exact shortfall.
    #[test]
    fn sign_with_fee_conserves_value(
        inputs in prop::collection::vec(546u64..20_000, 1..4),
        fixed in prop::collection::vec(546u64..5_000, 1..3)
    ) {
        let key = PrivateKey::from_bytes(&[0x33; 32]).unwrap();
        let unlocker = p2pkh::unlock(key, None);
        let policy = FeePolicy::default();
        let mut tx = funded(&inputs, &fixed);
        let min_fee = policy.fee_for_size(estimate_signed_size(&tx, &unlocker));
        let total_in: u64 = inputs.iter().sum();
        let total_fixed: u64 = fixed.iter().sum();

        match sign_with_fee(&mut tx, &unlocker, &policy) {
            Ok(fee) => {
                prop_assert_eq!(tx.total_input_satoshis().unwrap(), total_in);
                prop_assert_eq!(total_in - tx.total_output_satoshis().unwrap(), fee);
                prop_assert!(fee >= min_fee);
                prop_assert!(fee < min_fee + policy.dust_sats);
                prop_assert!(tx.outputs.iter().all(|o| o.satoshis >= policy.dust_sats));
            }
            Err(TransactionError::InsufficientInputValue { available, required }) => {
                prop_assert_eq!(available, total_in);
                prop_assert_eq!(required, total_fixed + min_fee);
                prop_assert!(available < required);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}
