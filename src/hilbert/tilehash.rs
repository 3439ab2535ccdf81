//! Hilbert tilehash: `H` followed by the base-8 digits of a tile's Hilbert
//! distance, each shifted up by one.

use super::curve::{decode_3d, encode_3d};
use crate::compute::validation::validate_zoom;
use crate::error::{Result, ZfxyError};
use crate::types::{MAX_ZOOM, ZfxyTile};

const PREFIX: char = 'H';

/// Offset that moves `f` into `[0, 2^z)` for the curve.
#[inline]
fn f_offset(z: u8) -> i64 {
    1i64 << (z - 1)
}

/// Hilbert distance of a tile.
///
/// `f` is shifted by `2^(z-1)` so the encodable layers are
/// `[-2^(z-1), 2^(z-1))`. The root is distance 0.
///
/// # Errors
///
/// `InvalidArgument` for an invalid address or an `f` outside that range.
pub fn index(tile: &ZfxyTile) -> Result<u128> {
    if !tile.is_valid() {
        return Err(ZfxyError::InvalidArgument(format!(
            "{} is not a valid tile address",
            tile
        )));
    }
    if tile.z == 0 {
        if tile.f != 0 {
            return Err(ZfxyError::InvalidArgument(format!(
                "{} has no Hilbert index: the root layer is f = 0",
                tile
            )));
        }
        return Ok(0);
    }

    let offset = f_offset(tile.z);
    let f = tile.f as i64 + offset;
    if !(0..2 * offset).contains(&f) {
        return Err(ZfxyError::InvalidArgument(format!(
            "{} has no Hilbert index: f must be in [{}, {})",
            tile, -offset, offset
        )));
    }

    encode_3d(tile.x as u64, tile.y as u64, f as u64, tile.z as u32)
}

/// The tile at Hilbert distance `distance` on the curve for zoom `z`.
pub fn tile_at(distance: u128, z: u8) -> Result<ZfxyTile> {
    validate_zoom(z)?;
    if z == 0 {
        if distance != 0 {
            return Err(ZfxyError::InvalidArgument(format!(
                "Hilbert distance {} is past the end of the zoom 0 curve",
                distance
            )));
        }
        return Ok(ZfxyTile::ROOT);
    }

    let (x, y, f) = decode_3d(distance, z as u32)?;
    Ok(ZfxyTile {
        z,
        f: (f as i64 - f_offset(z)) as i32,
        x: x as u32,
        y: y as u32,
    })
}

/// Encode a tile as a Hilbert tilehash.
///
/// # Examples
///
/// ```
/// use zfxy::{ZfxyTile, hilbert};
///
/// let tile = ZfxyTile::new(1, 0, 0, 0).unwrap();
/// assert_eq!(hilbert::encode(&tile).unwrap(), "H8");
/// ```
pub fn encode(tile: &ZfxyTile) -> Result<String> {
    let distance = index(tile)?;

    let mut out = String::with_capacity(tile.z as usize + 1);
    out.push(PREFIX);
    for level in (0..tile.z as u32).rev() {
        let digit = ((distance >> (3 * level)) & 0b111) as u8;
        out.push(char::from(b'1' + digit));
    }
    Ok(out)
}

/// Decode a Hilbert tilehash. The zoom is the number of digits.
///
/// # Errors
///
/// `ParseError` if the `H` prefix is missing, a digit is outside `1..=8`,
/// or there are more digits than [`MAX_ZOOM`].
pub fn decode(hash: &str) -> Result<ZfxyTile> {
    let digits = hash.strip_prefix(PREFIX).ok_or_else(|| {
        ZfxyError::ParseError(format!("Hilbert tilehash must start with 'H': '{}'", hash))
    })?;

    if digits.len() > MAX_ZOOM as usize {
        return Err(ZfxyError::ParseError(format!(
            "Hilbert tilehash '{}' is deeper than the maximum zoom {}",
            hash, MAX_ZOOM
        )));
    }

    let mut distance: u128 = 0;
    for c in digits.chars() {
        let digit = match c {
            '1'..='8' => c as u128 - '1' as u128,
            _ => {
                return Err(ZfxyError::ParseError(format!(
                    "invalid Hilbert tilehash digit '{}' in '{}'",
                    c, hash
                )));
            }
        };
        distance = (distance << 3) | digit;
    }

    tile_at(distance, digits.len() as u8)
        .map_err(|e| ZfxyError::ParseError(format!("'{}': {}", hash, e)))
}
