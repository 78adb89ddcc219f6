//! SLP SEND message.
//!
//! `OP_RETURN <"SLP\0"> <token_type> <"SEND"> <token_id> <amount>...`
//!
//! Amounts are 8-byte big-endian and map positionally to outputs 1..=N of
//! the transaction carrying the message at output 0.

use ecash_script::opcodes::OP_RETURN;
use ecash_script::Script;

use super::{MAX_SEND_OUTPUTS, SEND, SLP_LOKAD_ID};
use crate::{TokenError, TokenId};

/// A decoded SEND message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlpSend {
    /// Protocol type number.
    pub token_type: u8,
    /// The token being moved.
    pub token_id: TokenId,
    /// Atoms assigned to outputs 1, 2, ...
    pub amounts: Vec<u64>,
}

/// Build the 0-sat marker script for a token transfer.
///
/// # Arguments
/// * `token_id` - The token being moved.
/// * `token_type` - SLP type number (1 for fungible).
/// * `amounts` - Atoms per output, in output order starting at output 1.
///
/// # Returns
/// The `OP_RETURN` script, or `InvalidOutputCount` for zero or more than
/// 19 amounts.
pub fn build_send_script(
    token_id: &TokenId,
    token_type: u8,
    amounts: &[u64],
) -> Result<Script, TokenError> {
    if amounts.is_empty() || amounts.len() > MAX_SEND_OUTPUTS {
        return Err(TokenError::InvalidOutputCount(amounts.len()));
    }

    let mut script = Script::new();
    script.append_opcodes(&[OP_RETURN])?;
    script.append_push_data(SLP_LOKAD_ID)?;
    script.append_push_data(&[token_type])?;
    script.append_push_data(SEND)?;
    script.append_push_data(token_id.as_bytes())?;
    for amount in amounts {
        script.append_push_data(&amount.to_be_bytes())?;
    }
    Ok(script)
}

/// Decode a SEND marker script.
pub fn parse_send_script(script: &Script) -> Result<SlpSend, TokenError> {
    let invalid = |what: &str| TokenError::InvalidScript(what.to_string());

    let chunks = script.chunks()?;
    let (first, pushes) = chunks.split_first().ok_or_else(|| invalid("empty script"))?;
    if first.op != OP_RETURN || first.data.is_some() {
        return Err(invalid("missing OP_RETURN"));
    }
    if pushes.iter().any(|c| c.data.is_none()) {
        return Err(invalid("opcode after OP_RETURN"));
    }

    match pushes {
        [lokad, token_type, tx_type, token_id, amounts @ ..] => {
            if lokad.data() != SLP_LOKAD_ID {
                return Err(invalid("not an SLP message"));
            }
            let token_type = match token_type.data() {
                [t] => *t,
                _ => return Err(invalid("token type must be one byte")),
            };
            if tx_type.data() != SEND {
                return Err(invalid("not a SEND message"));
            }
            let token_id: [u8; 32] = token_id
                .data()
                .try_into()
                .map_err(|_| invalid("token id must be 32 bytes"))?;
            if amounts.is_empty() || amounts.len() > MAX_SEND_OUTPUTS {
                return Err(TokenError::InvalidOutputCount(amounts.len()));
            }
            let amounts = amounts
                .iter()
                .map(|c| {
                    <[u8; 8]>::try_from(c.data())
                        .map(u64::from_be_bytes)
                        .map_err(|_| invalid("amount must be 8 bytes"))
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(SlpSend {
                token_type,
                token_id: TokenId::from_bytes(token_id),
                amounts,
            })
        }
        _ => Err(invalid("too few pushes")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SLP_FUNGIBLE;

    fn token() -> TokenId {
        TokenId::from_bytes([0xab; 32])
    }

    #[test]
    fn test_build_send_layout() {
        let script = build_send_script(&token(), SLP_FUNGIBLE, &[1000, 100]).unwrap();
        let expected = format!(
            "6a04534c500001010453454e4420{}08{}08{}",
            "ab".repeat(32),
            "00000000000003e8",
            "0000000000000064"
        );
        assert_eq!(script.to_hex(), expected);
        assert!(script.is_data());
    }

    #[test]
    fn test_parse_send_roundtrip() {
        let script = build_send_script(&token(), SLP_FUNGIBLE, &[7]).unwrap();
        let parsed = parse_send_script(&script).unwrap();
        assert_eq!(
            parsed,
            SlpSend {
                token_type: SLP_FUNGIBLE,
                token_id: token(),
                amounts: vec![7],
            }
        );
    }

    #[test]
    fn test_output_count_bounds() {
        assert_eq!(
            build_send_script(&token(), SLP_FUNGIBLE, &[]),
            Err(TokenError::InvalidOutputCount(0))
        );
        assert!(build_send_script(&token(), SLP_FUNGIBLE, &[1; 19]).is_ok());
        assert_eq!(
            build_send_script(&token(), SLP_FUNGIBLE, &[1; 20]),
            Err(TokenError::InvalidOutputCount(20))
        );
    }

    #[test]
    fn test_parse_rejects_non_slp() {
        let p2pkh = Script::p2pkh(&[0u8; 20]);
        assert!(parse_send_script(&p2pkh).is_err());

        let mut other = Script::new();
        other.append_opcodes(&[OP_RETURN]).unwrap();
        other.append_push_data(b"ALP\0").unwrap();
        assert!(parse_send_script(&other).is_err());
    }
}
