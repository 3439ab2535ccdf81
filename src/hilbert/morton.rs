//! 3D Morton (Z-order) codes via magic-number bit dilation.
//!
//! Bit `i` of `x`, `y` and `z` lands at bits `3i`, `3i + 1` and `3i + 2` of
//! the code. Each axis carries up to [`MAX_AXIS_BITS`] bits, so codes need
//! `u128`.

/// Widest coordinate (in bits) the dilation masks handle.
pub const MAX_AXIS_BITS: u32 = 42;

const AXIS_MASK: u128 = 0x3ff_ffff_ffff;

/// `(shift, mask)` pairs for spreading a 42-bit value over 126 bits.
const SPREAD_STEPS: [(u32, u128); 6] = [
    (64, 0x3ff0000000000000000ffffffff),
    (32, 0x3ff00000000ffff00000000ffff),
    (16, 0x30000ff0000ff0000ff0000ff0000ff),
    (8, 0x300f00f00f00f00f00f00f00f00f00f),
    (4, 0x30c30c30c30c30c30c30c30c30c30c3),
    (2, 0x9249249249249249249249249249249),
];

#[inline]
fn split_by_3(value: u64) -> u128 {
    SPREAD_STEPS
        .iter()
        .fold(value as u128 & AXIS_MASK, |acc, &(shift, mask)| {
            (acc | acc << shift) & mask
        })
}

#[inline]
fn compact_by_3(code: u128) -> u64 {
    let mut acc = code & SPREAD_STEPS[5].1;
    for i in (0..5).rev() {
        let shift = SPREAD_STEPS[i + 1].0;
        acc = (acc | acc >> shift) & SPREAD_STEPS[i].1;
    }
    ((acc | acc >> SPREAD_STEPS[0].0) & AXIS_MASK) as u64
}

/// Interleave three coordinates into one Morton code.
///
/// Only the low [`MAX_AXIS_BITS`] bits of each coordinate are used.
pub fn encode(x: u64, y: u64, z: u64) -> u128 {
    split_by_3(x) | split_by_3(y) << 1 | split_by_3(z) << 2
}

/// Split a Morton code back into `(x, y, z)`.
pub fn decode(code: u128) -> (u64, u64, u64) {
    (
        compact_by_3(code),
        compact_by_3(code >> 1),
        compact_by_3(code >> 2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_layout() {
        assert_eq!(encode(1, 0, 0), 0b001);
        assert_eq!(encode(0, 1, 0), 0b010);
        assert_eq!(encode(0, 0, 1), 0b100);
        assert_eq!(encode(0b10, 0, 0), 0b001_000);
        assert_eq!(encode(3, 3, 3), 0b111_111);
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode(0b110_101), (1, 2, 3));

        let max = (1u64 << MAX_AXIS_BITS) - 1;
        assert_eq!(decode(encode(max, 0, max)), (max, 0, max));
        assert_eq!(decode(encode(33554431, 123, 1 << 29)), (33554431, 123, 1 << 29));
    }

    #[test]
    fn test_high_bits_are_ignored() {
        assert_eq!(encode(1 << MAX_AXIS_BITS, 0, 0), 0);
    }
}
