//! Script chunk parsing and push encoding.
//!
//! A chunk is either a bare opcode or a data push carrying its bytes.
//! `OP_RETURN` is treated as an ordinary opcode so the pushes that follow
//! it in a token output stay individually addressable.

use crate::opcodes::*;
use crate::ScriptError;

/// A single parsed element of a script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptChunk {
    /// The opcode byte. For direct pushes (1-75 bytes), this is the length.
    pub op: u8,
    /// Pushed bytes, for push opcodes.
    pub data: Option<Vec<u8>>,
}

impl ScriptChunk {
    /// Pushed bytes, or an empty slice for non-push opcodes.
    pub fn data(&self) -> &[u8] {
        self.data.as_deref().unwrap_or(&[])
    }
}

fn take<'a>(bytes: &'a [u8], pos: usize, len: usize) -> Result<&'a [u8], ScriptError> {
    bytes
        .get(pos..pos.checked_add(len).ok_or(ScriptError::DataTooBig)?)
        .ok_or(ScriptError::DataTooSmall)
}

/// Decode raw script bytes into chunks.
///
/// # Arguments
/// * `bytes` - The raw script bytes.
///
/// # Returns
/// The parsed chunks, or `DataTooSmall` when a push runs past the end.
pub fn decode_script(bytes: &[u8]) -> Result<Vec<ScriptChunk>, ScriptError> {
    let mut chunks = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let op = bytes[pos];
        pos += 1;

        let len = match op {
            OP_DATA_1..=OP_DATA_75 => op as usize,
            OP_PUSHDATA1 => {
                let n = take(bytes, pos, 1)?[0] as usize;
                pos += 1;
                n
            }
            OP_PUSHDATA2 => {
                let n = take(bytes, pos, 2)?;
                pos += 2;
                u16::from_le_bytes([n[0], n[1]]) as usize
            }
            OP_PUSHDATA4 => {
                let n = take(bytes, pos, 4)?;
                pos += 4;
                u32::from_le_bytes([n[0], n[1], n[2], n[3]]) as usize
            }
            _ => {
                chunks.push(ScriptChunk { op, data: None });
                continue;
            }
        };

        let data = take(bytes, pos, len)?.to_vec();
        pos += len;
        chunks.push(ScriptChunk { op, data: Some(data) });
    }

    Ok(chunks)
}

/// The prefix bytes that precede a push of `data_len` bytes.
///
/// Uses the smallest encoding: a direct push up to 75 bytes, then
/// `OP_PUSHDATA1/2/4`.
pub fn push_data_prefix(data_len: usize) -> Result<Vec<u8>, ScriptError> {
    if data_len <= OP_DATA_75 as usize {
        Ok(vec![data_len as u8])
    } else if data_len <= 0xff {
        Ok(vec![OP_PUSHDATA1, data_len as u8])
    } else if data_len <= 0xffff {
        let mut buf = vec![OP_PUSHDATA2];
        buf.extend_from_slice(&(data_len as u16).to_le_bytes());
        Ok(buf)
    } else if data_len <= 0xffff_ffff {
        let mut buf = vec![OP_PUSHDATA4];
        buf.extend_from_slice(&(data_len as u32).to_le_bytes());
        Ok(buf)
    } else {
        Err(ScriptError::DataTooBig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_p2pkh() {
        let mut bytes = vec![OP_DUP, OP_HASH160, OP_DATA_20];
        bytes.extend_from_slice(&[0xab; 20]);
        bytes.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);

        let chunks = decode_script(&bytes).unwrap();
        assert_eq!(chunks.len(), 5);
        assert_eq!(chunks[0].op, OP_DUP);
        assert_eq!(chunks[2].data(), &[0xab; 20]);
        assert!(chunks[4].data.is_none());
    }

    #[test]
    fn test_op_return_does_not_swallow_pushes() {
        let bytes = [OP_RETURN, 0x04, b'S', b'L', b'P', 0x00, 0x01, 0x01];
        let chunks = decode_script(&bytes).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].op, OP_RETURN);
        assert_eq!(chunks[1].data(), b"SLP\0");
        assert_eq!(chunks[2].data(), &[0x01]);
    }

    #[test]
    fn test_decode_pushdata1() {
        let mut bytes = vec![OP_PUSHDATA1, 80];
        bytes.extend_from_slice(&[7u8; 80]);
        let chunks = decode_script(&bytes).unwrap();
        assert_eq!(chunks[0].op, OP_PUSHDATA1);
        assert_eq!(chunks[0].data().len(), 80);
    }

    #[test]
    fn test_decode_truncated() {
        assert_eq!(decode_script(&[OP_DATA_20, 0x00]), Err(ScriptError::DataTooSmall));
        assert_eq!(decode_script(&[OP_PUSHDATA2, 0x01]), Err(ScriptError::DataTooSmall));
    }

    #[test]
    fn test_push_prefix_boundaries() {
        assert_eq!(push_data_prefix(0).unwrap(), vec![0x00]);
        assert_eq!(push_data_prefix(75).unwrap(), vec![75]);
        assert_eq!(push_data_prefix(76).unwrap(), vec![OP_PUSHDATA1, 76]);
        assert_eq!(push_data_prefix(256).unwrap(), vec![OP_PUSHDATA2, 0x00, 0x01]);
        assert_eq!(
            push_data_prefix(0x1_0000).unwrap(),
            vec![OP_PUSHDATA4, 0x00, 0x00, 0x01, 0x00]
        );
    }
}
