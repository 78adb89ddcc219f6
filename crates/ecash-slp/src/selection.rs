//! Token UTXO selection.
//!
//! Greedy largest-first: eligible token outputs are ordered by atoms
//! descending and taken until the requested amount is covered. Ties keep
//! the order the indexer returned them in.

use crate::types::{PlainUtxo, TokenProtocol, TokenUtxo, Utxo};
use crate::{TokenError, TokenId};

/// Token inputs picked for a transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionResult {
    /// Selected outputs, largest first.
    pub inputs: Vec<TokenUtxo>,
    /// Atoms held by `inputs`; never less than the requested amount. Wider
    /// than a SEND amount since several inputs may sum past `u64::MAX`.
    pub total_atoms: u128,
    /// `total_atoms - requested`, returned to the wallet as token change.
    pub change_atoms: u64,
}

/// Pick token UTXOs covering `requested` atoms.
///
/// A UTXO is eligible when it carries `token_id` under `protocol`, is not a
/// mint baton and holds a non-zero amount.
///
/// # Returns
/// The selection, or `InsufficientTokenBalance` with the sum of every
/// eligible UTXO when they do not cover `requested`.
pub fn select_token_utxos(
    utxos: &[Utxo],
    token_id: &TokenId,
    protocol: TokenProtocol,
    requested: u64,
) -> Result<SelectionResult, TokenError> {
    let mut eligible: Vec<&TokenUtxo> = utxos
        .iter()
        .filter_map(|u| match u {
            Utxo::Token(t) => Some(t),
            Utxo::Plain(_) => None,
        })
        .filter(|t| {
            t.token.token_id == *token_id
                && t.token.token_type.protocol == protocol
                && !t.token.is_mint_baton
                && t.token.atoms > 0
        })
        .collect();
    // sort_by is stable
    eligible.sort_by(|a, b| b.token.atoms.cmp(&a.token.atoms));

    let target = u128::from(requested);
    let mut inputs = Vec::new();
    let mut total: u128 = 0;
    for utxo in &eligible {
        if total >= target && !inputs.is_empty() {
            break;
        }
        total += u128::from(utxo.token.atoms);
        inputs.push((*utxo).clone());
    }

    if inputs.is_empty() || total < target {
        // Short of a u64 request, so the sum fits.
        let available = u64::try_from(total).map_err(|_| TokenError::AtomsOverflow(total))?;
        return Err(TokenError::InsufficientTokenBalance { requested, available });
    }

    // The last pick alone exceeds the change, so it fits a SEND amount.
    let change = total - target;
    let change_atoms = u64::try_from(change).map_err(|_| TokenError::AtomsOverflow(change))?;

    Ok(SelectionResult {
        inputs,
        total_atoms: total,
        change_atoms,
    })
}

/// Plain UTXOs ordered by value, largest first. Ties keep input order.
pub fn plain_utxos_by_value(utxos: &[Utxo]) -> Vec<PlainUtxo> {
    let mut plain: Vec<PlainUtxo> = utxos
        .iter()
        .filter_map(|u| match u {
            Utxo::Plain(p) => Some(p.clone()),
            Utxo::Token(_) => None,
        })
        .collect();
    plain.sort_by(|a, b| b.sats.cmp(&a.sats));
    plain
}
