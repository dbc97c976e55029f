//! GF(2¹²⁸) doubling helpers for the OCB offset sequence.
//!
//! Blocks are 128-bit big-endian polynomials reduced by
//! x¹²⁸+x⁷+x²+x+1; shifting a set top bit out folds 0x87 into the low byte.

/// One 128-bit block.
pub type Block16 = [u8; 16];

/// Multiplies the block by α.
pub fn double(block: &Block16) -> Block16 {
    let mut out = [0u8; 16];
    let mut carry = 0u8;
    for (o, &b) in out.iter_mut().zip(block.iter()).rev() {
        *o = (b << 1) | carry;
        carry = b >> 7;
    }
    if carry != 0 {
        out[15] ^= 0x87;
    }
    out
}

/// Multiplies the block by α + 1.
pub fn triple(block: &Block16) -> Block16 {
    let mut out = double(block);
    for (o, b) in out.iter_mut().zip(block.iter()) {
        *o ^= b;
    }
    out
}
