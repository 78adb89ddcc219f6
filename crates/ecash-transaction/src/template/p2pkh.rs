//! Pay-to-Public-Key-Hash (P2PKH) template.
//!
//! Locking script: `OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG`.
//! Unlocking script: `<DER sig || sighash byte> <compressed pubkey>`.

use ecash_primitives::ec::PrivateKey;
use ecash_script::{Address, Script};

use crate::sighash::SIGHASH_ALL_FORKID;
use crate::template::UnlockingScriptTemplate;
use crate::transaction::Transaction;
use crate::TransactionError;

/// Worst-case P2PKH unlocking script length with a low-S signature:
/// 1 (push) + 71 (DER sig) + 1 (sighash byte) + 1 (push) + 33 (pubkey).
pub const P2PKH_UNLOCKING_SCRIPT_LEN: usize = 107;

/// P2PKH locking script for an address's key hash.
pub fn lock(address: &Address) -> Script {
    Script::p2pkh(&address.hash)
}

/// P2PKH locking script for a private key's own public key.
pub fn lock_for_key(private_key: &PrivateKey) -> Script {
    Script::p2pkh(&private_key.pub_key().hash160())
}

/// Create a P2PKH unlocker.
///
/// # Arguments
/// * `private_key` - The key that owns every input this unlocker signs.
/// * `sighash_flag` - Defaults to `SIGHASH_ALL_FORKID` (0x41).
pub fn unlock(private_key: PrivateKey, sighash_flag: Option<u32>) -> P2PKH {
    P2PKH {
        private_key,
        sighash_flag: sighash_flag.unwrap_or(SIGHASH_ALL_FORKID),
    }
}

/// P2PKH signing template holding a private key and sighash flag.
pub struct P2PKH {
    private_key: PrivateKey,
    sighash_flag: u32,
}

impl P2PKH {
    /// The P2PKH script this unlocker can spend.
    pub fn locking_script(&self) -> Script {
        lock_for_key(&self.private_key)
    }
}

impl UnlockingScriptTemplate for P2PKH {
    fn sign(&self, tx: &Transaction, input_index: usize) -> Result<Script, TransactionError> {
        let sig_hash = tx.calc_input_signature_hash(input_index, self.sighash_flag)?;
        let signature = self.private_key.sign(&sig_hash)?;

        let der_sig = signature.to_der();
        let mut sig_buf = Vec::with_capacity(der_sig.len() + 1);
        sig_buf.extend_from_slice(&der_sig);
        sig_buf.push(self.sighash_flag as u8);

        let mut script = Script::new();
        script.append_push_data(&sig_buf)?;
        script.append_push_data(&self.private_key.pub_key().to_compressed())?;
        Ok(script)
    }

    fn estimate_length(&self, _tx: &Transaction, _input_index: usize) -> usize {
        P2PKH_UNLOCKING_SCRIPT_LEN
    }
}
