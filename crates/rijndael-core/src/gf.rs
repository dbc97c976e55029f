//! GF(2⁸) arithmetic tables shared by the cipher and the key schedule.
//!
//! Everything here is computed at compile time: the multiplicative inverse
//! table, the S-box pair derived from it, and the row-multiplication tables
//! used by the combined MixColumns / InvMixColumns round transforms.

/// Multiplies two field elements modulo x⁸+x⁴+x³+x+1 by shift-and-xor.
pub(crate) const fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        let hi_bit_set = a & 0x80;
        a <<= 1;
        if hi_bit_set != 0 {
            a ^= 0x1b;
        }
        b >>= 1;
    }
    product
}

const fn build_inv() -> [u8; 256] {
    // inv[0] stays 0; it has no inverse and is never consulted.
    let mut table = [0u8; 256];
    let mut x = 1usize;
    while x < 256 {
        let mut y = 1usize;
        while y < 256 {
            if gf_mul(x as u8, y as u8) == 1 {
                table[x] = y as u8;
                break;
            }
            y += 1;
        }
        x += 1;
    }
    table
}

const fn affine(b: u8) -> u8 {
    b ^ b.rotate_left(1) ^ b.rotate_left(2) ^ b.rotate_left(3) ^ b.rotate_left(4) ^ 0x63
}

const fn build_sbox() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut x = 0usize;
    while x < 256 {
        table[x] = affine(INV[x]);
        x += 1;
    }
    table
}

const fn build_inv_sbox() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut x = 0usize;
    while x < 256 {
        table[SBOX[x] as usize] = x as u8;
        x += 1;
    }
    table
}

const fn build_lmul(factor: u8) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut x = 0usize;
    while x < 256 {
        table[x] = gf_mul(x as u8, factor);
        x += 1;
    }
    table
}

pub(crate) const INV: [u8; 256] = build_inv();
pub(crate) const SBOX: [u8; 256] = build_sbox();
pub(crate) const INV_SBOX: [u8; 256] = build_inv_sbox();

pub(crate) const LMUL2: [u8; 256] = build_lmul(2);
pub(crate) const LMUL3: [u8; 256] = build_lmul(3);
pub(crate) const LMUL9: [u8; 256] = build_lmul(9);
pub(crate) const LMUL11: [u8; 256] = build_lmul(11);
pub(crate) const LMUL13: [u8; 256] = build_lmul(13);
pub(crate) const LMUL14: [u8; 256] = build_lmul(14);

/// Looks up the Rijndael S-box.
#[inline]
pub fn sbox(byte: u8) -> u8 {
    SBOX[byte as usize]
}

/// Looks up the inverse Rijndael S-box.
#[inline]
pub fn inv_sbox(byte: u8) -> u8 {
    INV_SBOX[byte as usize]
}
