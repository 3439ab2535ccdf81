//! Table-driven Morton <-> Hilbert transform for 3D (Skilling's method).
//!
//! The code is consumed one octant (3 bits) at a time from the most
//! significant end. Each table entry packs the output octant in its low 3
//! bits and the next transform state (a multiple of 8) in the rest.

use super::morton::{self, MAX_AXIS_BITS};
use crate::error::{Result, ZfxyError};

#[rustfmt::skip]
const MORTON_TO_HILBERT: [u8; 96] = [
    48, 33, 27, 34, 47, 78, 28, 77,
    66, 29, 51, 52, 65, 30, 72, 63,
    76, 95, 75, 24, 53, 54, 82, 81,
    18,  3, 17, 80, 61,  4, 62, 15,
     0, 59, 71, 60, 49, 50, 86, 85,
    84, 83,  5, 90, 79, 56,  6, 89,
    32, 23,  1, 94, 11, 12,  2, 93,
    42, 41, 13, 14, 35, 88, 36, 31,
    92, 37, 87, 38, 91, 74,  8, 73,
    46, 45,  9, 10,  7, 20, 64, 19,
    70, 25, 39, 16, 69, 26, 44, 43,
    22, 55, 21, 68, 57, 40, 58, 67,
];

#[rustfmt::skip]
const HILBERT_TO_MORTON: [u8; 96] = [
    48, 33, 35, 26, 30, 79, 77, 44,
    78, 68, 64, 50, 51, 25, 29, 63,
    27, 87, 86, 74, 72, 52, 53, 89,
    83, 18, 16,  1,  5, 60, 62, 15,
     0, 52, 53, 57, 59, 87, 86, 66,
    61, 95, 91, 81, 80,  2,  6, 76,
    32,  2,  6, 12, 13, 95, 91, 17,
    93, 41, 40, 36, 38, 10, 11, 31,
    14, 79, 77, 92, 88, 33, 35, 82,
    70, 10, 11, 23, 21, 41, 40,  4,
    19, 25, 29, 47, 46, 68, 64, 34,
    45, 60, 62, 71, 67, 18, 16, 49,
];

const OCTANT: u8 = 0b111;

fn transform(input: u128, bits: u32, table: &[u8; 96]) -> u128 {
    let mut state: u8 = 0;
    let mut out: u128 = 0;

    for level in (0..bits).rev() {
        let octant = ((input >> (3 * level)) & OCTANT as u128) as u8;
        state = table[(state | octant) as usize];
        out = (out << 3) | (state & OCTANT) as u128;
        state &= !OCTANT;
    }

    out
}

/// Reorder a Morton code of `bits` levels along the Hilbert curve.
pub fn morton_to_hilbert(code: u128, bits: u32) -> u128 {
    transform(code, bits, &MORTON_TO_HILBERT)
}

/// Inverse of [`morton_to_hilbert`].
pub fn hilbert_to_morton(index: u128, bits: u32) -> u128 {
    transform(index, bits, &HILBERT_TO_MORTON)
}

fn check_bits(bits: u32) -> Result<()> {
    if bits > MAX_AXIS_BITS {
        return Err(ZfxyError::InvalidArgument(format!(
            "Hilbert order {} exceeds {} bits per axis",
            bits, MAX_AXIS_BITS
        )));
    }
    Ok(())
}

/// Hilbert distance of `(x, y, z)` on a curve of order `bits`.
///
/// # Errors
///
/// `InvalidArgument` if `bits` exceeds [`MAX_AXIS_BITS`] or a coordinate
/// does not fit in `bits` bits.
///
/// # Examples
///
/// ```
/// use zfxy::hilbert::{decode_3d, encode_3d};
///
/// let index = encode_3d(5, 0, 7, 3).unwrap();
/// assert_eq!(decode_3d(index, 3).unwrap(), (5, 0, 7));
/// ```
pub fn encode_3d(x: u64, y: u64, z: u64, bits: u32) -> Result<u128> {
    check_bits(bits)?;
    let limit = 1u64 << bits;
    if x >= limit || y >= limit || z >= limit {
        return Err(ZfxyError::InvalidArgument(format!(
            "({}, {}, {}) does not fit a Hilbert curve of order {}",
            x, y, z, bits
        )));
    }
    Ok(morton_to_hilbert(morton::encode(x, y, z), bits))
}

/// Coordinates at Hilbert distance `index` on a curve of order `bits`.
///
/// # Errors
///
/// `InvalidArgument` if `bits` exceeds [`MAX_AXIS_BITS`] or `index` is past
/// the end of the curve.
pub fn decode_3d(index: u128, bits: u32) -> Result<(u64, u64, u64)> {
    check_bits(bits)?;
    if index >> (3 * bits) != 0 {
        return Err(ZfxyError::InvalidArgument(format!(
            "Hilbert distance {} is past the end of a curve of order {}",
            index, bits
        )));
    }
    Ok(morton::decode(hilbert_to_morton(index, bits)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_order_curve() {
        assert_eq!(encode_3d(0, 0, 0, 1).unwrap(), 0);
        assert_eq!(encode_3d(1, 1, 1, 1).unwrap(), 5);

        let walk: Vec<_> = (0..8).map(|h| decode_3d(h, 1).unwrap()).collect();
        assert_eq!(
            walk,
            vec![
                (0, 0, 0),
                (1, 0, 0),
                (1, 1, 0),
                (0, 1, 0),
                (0, 1, 1),
                (1, 1, 1),
                (1, 0, 1),
                (0, 0, 1),
            ]
        );
    }

    #[test]
    fn test_round_trip_fixtures() {
        let cases: [(u32, (u64, u64, u64)); 6] = [
            (1, (0, 0, 0)),
            (1, (1, 1, 1)),
            (2, (0, 0, 0)),
            (2, (3, 3, 3)),
            (25, (0, 0, 0)),
            (25, (33554431, 33554431, 33554431)),
        ];
        for (bits, (x, y, z)) in cases {
            let index = encode_3d(x, y, z, bits).unwrap();
            assert_eq!(decode_3d(index, bits).unwrap(), (x, y, z));
        }
    }

    #[test]
    fn test_consecutive_distances_are_adjacent() {
        let bits = 3;
        let mut previous = decode_3d(0, bits).unwrap();
        for h in 1..(1u128 << (3 * bits)) {
            let current = decode_3d(h, bits).unwrap();
            let step = previous.0.abs_diff(current.0)
                + previous.1.abs_diff(current.1)
                + previous.2.abs_diff(current.2);
            assert_eq!(step, 1, "distance {} is not adjacent to {}", h, h - 1);
            previous = current;
        }
    }

    #[test]
    fn test_order_zero() {
        assert_eq!(encode_3d(0, 0, 0, 0).unwrap(), 0);
        assert_eq!(decode_3d(0, 0).unwrap(), (0, 0, 0));
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(encode_3d(4, 0, 0, 2).is_err());
        assert!(encode_3d(0, 0, 0, MAX_AXIS_BITS + 1).is_err());
        assert!(decode_3d(64, 2).is_err());
        assert!(decode_3d(63, 2).is_ok());
    }
}
