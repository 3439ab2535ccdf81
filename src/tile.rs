//! Integer tile arithmetic: hierarchy, neighbors and wraparound.
//!
//! Everything here is exact integer math on `(z, f, x, y)`. Horizontal
//! coordinates wrap around the globe; the vertical index saturates at
//! `±2^z` because altitude is bounded, not cyclic.

use crate::error::{Result, ZfxyError};
use crate::types::{MAX_ZOOM, ZfxyTile, axis_len};
use std::str::FromStr;

/// Horizontal offsets for [`ZfxyTile::surrounding`], self first.
const SURROUNDING_OFFSETS: [(i64, i64); 9] = [
    (0, 0),
    (1, 0),
    (0, 1),
    (1, 1),
    (-1, 0),
    (0, -1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// Normalize an out-of-range address: `x`/`y` wrap modulo `2^z`, `f` is
/// clamped to `[-2^z, 2^z]`.
///
/// # Examples
///
/// ```
/// use zfxy::tile::wraparound;
///
/// let tile = wraparound(10, 2000, 1024, -1).unwrap();
/// assert_eq!((tile.f, tile.x, tile.y), (1024, 0, 1023));
/// ```
pub fn wraparound(z: u8, f: i64, x: i64, y: i64) -> Result<ZfxyTile> {
    if z > MAX_ZOOM {
        return Err(ZfxyError::InvalidArgument(format!(
            "zoom {} exceeds the maximum zoom {}",
            z, MAX_ZOOM
        )));
    }
    Ok(wrap(z, f, x, y))
}

/// [`wraparound`] for a zoom already known to be in range.
pub(crate) fn wrap(z: u8, f: i64, x: i64, y: i64) -> ZfxyTile {
    let n = axis_len(z);
    ZfxyTile {
        z,
        f: f.clamp(-n, n) as i32,
        x: x.rem_euclid(n) as u32,
        y: y.rem_euclid(n) as u32,
    }
}

impl ZfxyTile {
    /// The parent one zoom level up.
    pub fn parent(&self) -> Result<ZfxyTile> {
        self.parent_steps(1)
    }

    /// The ancestor `steps` levels up.
    ///
    /// `f` is shifted arithmetically, so negative layers stay negative.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an invalid address, `steps <= 0` or `steps > z`.
    pub fn parent_steps(&self, steps: i32) -> Result<ZfxyTile> {
        if !self.is_valid() {
            return Err(ZfxyError::InvalidArgument(format!(
                "{} is not a valid tile address",
                self
            )));
        }
        if steps <= 0 {
            return Err(ZfxyError::InvalidArgument(format!(
                "parent steps must be greater than 0, got {}",
                steps
            )));
        }
        if steps > self.z as i32 {
            return Err(ZfxyError::InvalidArgument(format!(
                "cannot go {} steps up from {}: it would go beyond the root tile",
                steps, self
            )));
        }

        Ok(ZfxyTile {
            z: self.z - steps as u8,
            f: self.f >> steps,
            x: self.x >> steps,
            y: self.y >> steps,
        })
    }

    /// The ancestor at an absolute zoom.
    pub fn parent_at(&self, zoom: u8) -> Result<ZfxyTile> {
        self.parent_steps(self.z as i32 - zoom as i32)
    }

    /// The eight tiles one level down.
    ///
    /// Child `i` takes bit `i >> 2` for `f`, bit `(i >> 1) & 1` for `x` and
    /// bit `i & 1` for `y`. Tilehash digits are positions in this order.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an invalid address or at [`MAX_ZOOM`].
    pub fn children(&self) -> Result<[ZfxyTile; 8]> {
        if !self.is_valid() {
            return Err(ZfxyError::InvalidArgument(format!(
                "{} is not a valid tile address",
                self
            )));
        }
        if self.z >= MAX_ZOOM {
            return Err(ZfxyError::InvalidArgument(format!(
                "{} is at the maximum zoom and has no children",
                self
            )));
        }

        Ok(std::array::from_fn(|i| {
            let i = i as u32;
            ZfxyTile {
                z: self.z + 1,
                f: self.f * 2 + (i >> 2) as i32,
                x: self.x * 2 + ((i >> 1) & 1),
                y: self.y * 2 + (i & 1),
            }
        }))
    }

    /// Self plus its eight horizontal neighbors at the same `z` and `f`,
    /// wrapped around the antimeridian and the poles.
    pub fn surrounding(&self) -> [ZfxyTile; 9] {
        SURROUNDING_OFFSETS.map(|(dx, dy)| self.moved(0, dx, dy))
    }

    /// The 26 neighbors in 3D.
    ///
    /// Order: the 8 horizontal neighbors at `f`, then the 9 tiles around
    /// `f + 1` (directly above first), then the 9 around `f - 1`.
    pub fn neighbors_3d(&self) -> Vec<ZfxyTile> {
        let mut out = Vec::with_capacity(26);
        out.extend(self.surrounding().into_iter().skip(1));
        out.extend(self.moved(1, 0, 0).surrounding());
        out.extend(self.moved(-1, 0, 0).surrounding());
        out
    }

    /// Translate by the given offsets and wrap the result.
    ///
    /// Any `i64` offset is accepted: `f` saturates and horizontal offsets
    /// are reduced modulo `2^z` before they are applied.
    pub fn moved(&self, df: i64, dx: i64, dy: i64) -> ZfxyTile {
        let n = axis_len(self.z);
        wrap(
            self.z,
            (self.f as i64).saturating_add(df),
            (self.x as i64).saturating_add(dx.rem_euclid(n)),
            (self.y as i64).saturating_add(dy.rem_euclid(n)),
        )
    }
}

/// Parses `/z/f/x/y`, `z/f/x/y`, `/z/x/y` or `z/x/y` (`f` defaults to 0).
impl FromStr for ZfxyTile {
    type Err = ZfxyError;

    fn from_str(s: &str) -> Result<Self> {
        let body = s.strip_prefix('/').unwrap_or(s);
        let segments: Vec<&str> = body.split('/').collect();

        let (z, f, x, y) = match segments.as_slice() {
            [z, f, x, y] => (*z, Some(*f), *x, *y),
            [z, x, y] => (*z, None, *x, *y),
            _ => {
                return Err(ZfxyError::ParseError(format!(
                    "expected /z/f/x/y or /z/x/y, got '{}'",
                    s
                )));
            }
        };

        let z: u8 = parse_unsigned(z, "z")?;
        let f: i32 = match f {
            Some(f) => match f.strip_prefix('-') {
                Some(magnitude) => -parse_unsigned::<i32>(magnitude, "f")?,
                None => parse_unsigned(f, "f")?,
            },
            None => 0,
        };
        let x: u32 = parse_unsigned(x, "x")?;
        let y: u32 = parse_unsigned(y, "y")?;

        ZfxyTile::new(z, f, x, y).map_err(|e| ZfxyError::ParseError(format!("'{}': {}", s, e)))
    }
}

fn parse_unsigned<T: FromStr>(segment: &str, name: &str) -> Result<T> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ZfxyError::ParseError(format!(
            "{} must be a decimal integer, got '{}'",
            name, segment
        )));
    }
    segment
        .parse()
        .map_err(|_| ZfxyError::ParseError(format!("{} is out of range: '{}'", name, segment)))
}
