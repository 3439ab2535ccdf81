//! Tilehash: an octree path string for a tile address.
//!
//! Each digit `1..=8` is the 1-based position of the tile among its
//! parent's [`children`](ZfxyTile::children), from the root down, so a
//! tilehash prefix is always an ancestor. A leading `-` marks a negative
//! vertical index; the path itself is built from `|f|`.

use crate::error::{Result, ZfxyError};
use crate::types::{MAX_ZOOM, ZfxyTile, axis_len};

/// Marker for a negative vertical index.
const NEGATIVE_PREFIX: char = '-';

/// Encode a tile address as a tilehash.
///
/// # Errors
///
/// `InvalidArgument` if `|f| >= 2^z`: those layers lie outside the octree
/// below the root and have no path.
///
/// # Examples
///
/// ```
/// use zfxy::{ZfxyTile, tilehash};
///
/// let tile = ZfxyTile::new(1, -1, 0, 0).unwrap();
/// assert_eq!(tilehash::encode(&tile).unwrap(), "-5");
/// ```
pub fn encode(tile: &ZfxyTile) -> Result<String> {
    if !tile.is_valid() {
        return Err(ZfxyError::InvalidArgument(format!(
            "{} is not a valid tile address",
            tile
        )));
    }
    let magnitude = tile.f.unsigned_abs() as i64;
    if magnitude >= axis_len(tile.z) {
        return Err(ZfxyError::InvalidArgument(format!(
            "{} has no tilehash: |f| must be below 2^{}",
            tile, tile.z
        )));
    }

    let mut digits = Vec::with_capacity(tile.z as usize);
    let mut current = ZfxyTile {
        f: magnitude as i32,
        ..*tile
    };

    while current.z > 0 {
        let parent = current.parent()?;
        let position = parent
            .children()?
            .iter()
            .position(|child| *child == current)
            .ok_or_else(|| {
                ZfxyError::InvalidArgument(format!("{} is not a child of {}", current, parent))
            })?;
        digits.push(char::from(b'1' + position as u8));
        current = parent;
    }

    let mut out = String::with_capacity(digits.len() + 1);
    if tile.f < 0 {
        out.push(NEGATIVE_PREFIX);
    }
    out.extend(digits.iter().rev());
    Ok(out)
}

/// Decode a tilehash into a tile address.
///
/// The empty string is the root tile.
///
/// # Errors
///
/// `ParseError` for digits outside `1..=8`, a bare `-`, or a path deeper
/// than [`MAX_ZOOM`].
pub fn decode(hash: &str) -> Result<ZfxyTile> {
    let (negative, path) = match hash.strip_prefix(NEGATIVE_PREFIX) {
        Some(rest) => (true, rest),
        None => (false, hash),
    };

    if negative && path.is_empty() {
        return Err(ZfxyError::ParseError(
            "tilehash has a sign but no digits".to_string(),
        ));
    }
    if path.len() > MAX_ZOOM as usize {
        return Err(ZfxyError::ParseError(format!(
            "tilehash '{}' is deeper than the maximum zoom {}",
            hash, MAX_ZOOM
        )));
    }

    let mut current = ZfxyTile::ROOT;
    for c in path.chars() {
        let index = match c {
            '1'..='8' => c as usize - '1' as usize,
            _ => {
                return Err(ZfxyError::ParseError(format!(
                    "invalid tilehash digit '{}' in '{}'",
                    c, hash
                )));
            }
        };
        current = current.children()?[index];
    }

    if negative {
        current.f = -current.f;
    }
    Ok(current)
}
