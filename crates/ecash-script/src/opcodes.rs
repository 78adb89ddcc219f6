//! Script opcode constants.
//!
//! Only the opcodes this workspace emits or inspects are named here;
//! direct pushes of 1..=75 bytes use the length itself as the opcode.

pub const OP_0: u8 = 0x00;
pub const OP_FALSE: u8 = OP_0;

pub const OP_DATA_1: u8 = 0x01;
pub const OP_DATA_2: u8 = 0x02;
pub const OP_DATA_4: u8 = 0x04;
pub const OP_DATA_8: u8 = 0x08;
pub const OP_DATA_20: u8 = 0x14;
pub const OP_DATA_32: u8 = 0x20;
pub const OP_DATA_33: u8 = 0x21;
pub const OP_DATA_75: u8 = 0x4b;

pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;

pub const OP_1NEGATE: u8 = 0x4f;
pub const OP_1: u8 = 0x51;
pub const OP_TRUE: u8 = OP_1;
pub const OP_16: u8 = 0x60;

pub const OP_RETURN: u8 = 0x6a;
pub const OP_DUP: u8 = 0x76;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_CHECKSIG: u8 = 0xac;

/// True for any opcode that pushes bytes from the script itself
/// (`OP_DATA_1..=OP_PUSHDATA4`).
pub fn is_push_data_op(op: u8) -> bool {
    (OP_DATA_1..=OP_PUSHDATA4).contains(&op)
}

/// True for `OP_1NEGATE` and `OP_1..=OP_16`, which push a small integer
/// without any data bytes.
pub fn is_small_int_op(op: u8) -> bool {
    op == OP_0 || op == OP_1NEGATE || (OP_1..=OP_16).contains(&op)
}
