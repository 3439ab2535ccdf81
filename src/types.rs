//! Core value types and configuration.
//!
//! A [`ZfxyTile`] addresses one voxel of the 3D tiling: `z` is the zoom,
//! `f` the signed vertical layer and `x`/`y` the usual slippy-map column
//! and row. Every type here is a plain immutable value; operations that
//! "move" a tile return a new one.
use crate::error::{Result, ZfxyError};
use geo::Point;
use serde::de::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Zoom at which one unit of `f` is (approximately) one meter.
pub const ZOOM_BASE: u8 = 25;

/// Deepest zoom any address may have.
///
/// Keeps `±2^z` inside `i32` for `f`, `2^z` inside `u32` for `x`/`y` and a
/// Hilbert distance of `3·z` bits inside `u128`.
pub const MAX_ZOOM: u8 = 30;

/// Zoom used for geographic input when none is given.
pub const DEFAULT_ZOOM: u8 = 25;

/// Number of tiles along one axis at `z` (`2^z`), saturating at
/// `i64::MAX` for zooms no address can have.
#[inline]
pub(crate) fn axis_len(z: u8) -> i64 {
    1i64.checked_shl(z as u32).unwrap_or(i64::MAX)
}

/// A tile address `(z, f, x, y)` in the 3D tiling.
///
/// Invariants: `z <= MAX_ZOOM`, `0 <= x, y < 2^z`, `-2^z <= f <= 2^z`.
/// Construct through [`ZfxyTile::new`] to have them checked.
///
/// # Examples
///
/// ```
/// use zfxy::ZfxyTile;
///
/// let tile = ZfxyTile::new(1, 0, 0, 0).unwrap();
/// assert_eq!(tile.to_string(), "/1/0/0/0");
/// assert!(ZfxyTile::new(1, 0, 2, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZfxyTile {
    pub z: u8,
    pub f: i32,
    pub x: u32,
    pub y: u32,
}

impl ZfxyTile {
    /// The single tile at zoom 0.
    pub const ROOT: ZfxyTile = ZfxyTile {
        z: 0,
        f: 0,
        x: 0,
        y: 0,
    };

    /// Create a tile address, checking the address invariants.
    pub fn new(z: u8, f: i32, x: u32, y: u32) -> Result<Self> {
        if z > MAX_ZOOM {
            return Err(ZfxyError::InvalidArgument(format!(
                "zoom {} exceeds the maximum zoom {}",
                z, MAX_ZOOM
            )));
        }

        let tile = Self { z, f, x, y };
        if !tile.is_valid() {
            return Err(ZfxyError::InvalidArgument(format!(
                "tile {} is out of range for zoom {}",
                tile, z
            )));
        }

        Ok(tile)
    }

    /// Whether the address satisfies the range invariants for its zoom.
    pub fn is_valid(&self) -> bool {
        if self.z > MAX_ZOOM {
            return false;
        }
        let n = axis_len(self.z);
        (self.x as i64) < n && (self.y as i64) < n && (-n..=n).contains(&(self.f as i64))
    }
}

impl Default for ZfxyTile {
    fn default() -> Self {
        Self::ROOT
    }
}

impl fmt::Display for ZfxyTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}/{}/{}", self.z, self.f, self.x, self.y)
    }
}

/// A geographic position with an optional altitude in meters.
///
/// `alt: None` means "ignore the vertical axis"; it projects to `f = 0`
/// and is not compared by [`Space::contains`](crate::Space::contains).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLatAlt {
    /// Longitude (x) and latitude (y) in degrees
    pub point: Point<f64>,
    /// Altitude above the reference geoid in meters
    pub alt: Option<f64>,
}

impl LngLatAlt {
    pub fn new(lng: f64, lat: f64, alt: f64) -> Self {
        Self {
            point: Point::new(lng, lat),
            alt: Some(alt),
        }
    }

    /// A position without altitude.
    pub fn from_lng_lat(lng: f64, lat: f64) -> Self {
        Self {
            point: Point::new(lng, lat),
            alt: None,
        }
    }

    pub fn lng(&self) -> f64 {
        self.point.x()
    }

    pub fn lat(&self) -> f64 {
        self.point.y()
    }
}

impl From<Point<f64>> for LngLatAlt {
    fn from(point: Point<f64>) -> Self {
        Self { point, alt: None }
    }
}

/// Defaults for the façade and coverage helpers.
///
/// # Example
///
/// ```rust
/// use zfxy::Config;
///
/// let config = Config::default();
/// assert_eq!(config.default_zoom, 25);
///
/// let json = r#"{ "default_zoom": 20 }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.default_zoom, 20);
/// assert_eq!(config.bounding_min_zoom, 25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Zoom for geographic input given without an explicit zoom
    #[serde(default = "Config::default_zoom")]
    pub default_zoom: u8,

    /// Finest zoom the smallest-covering-tile search may return
    #[serde(default = "Config::default_bounding_min_zoom")]
    pub bounding_min_zoom: u8,
}

impl Config {
    const fn default_zoom() -> u8 {
        DEFAULT_ZOOM
    }

    const fn default_bounding_min_zoom() -> u8 {
        DEFAULT_ZOOM
    }

    pub fn with_default_zoom(mut self, zoom: u8) -> Self {
        self.default_zoom = zoom;
        self
    }

    pub fn with_bounding_min_zoom(mut self, zoom: u8) -> Self {
        self.bounding_min_zoom = zoom;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.default_zoom > MAX_ZOOM {
            return Err(format!(
                "Default zoom must be at most {}, got {}",
                MAX_ZOOM, self.default_zoom
            ));
        }
        if self.bounding_min_zoom > MAX_ZOOM {
            return Err(format!(
                "Bounding min zoom must be at most {}, got {}",
                MAX_ZOOM, self.bounding_min_zoom
            ));
        }
        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_zoom: Self::default_zoom(),
            bounding_min_zoom: Self::default_bounding_min_zoom(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_invariants() {
        assert!(ZfxyTile::new(0, 0, 0, 0).is_ok());
        assert!(ZfxyTile::new(10, 1024, 1023, 1023).is_ok());
        assert!(ZfxyTile::new(10, -1024, 0, 0).is_ok());

        assert!(ZfxyTile::new(10, 1025, 0, 0).is_err());
        assert!(ZfxyTile::new(10, -1025, 0, 0).is_err());
        assert!(ZfxyTile::new(10, 0, 1024, 0).is_err());
        assert!(ZfxyTile::new(10, 0, 0, 1024).is_err());
        assert!(ZfxyTile::new(MAX_ZOOM + 1, 0, 0, 0).is_err());
    }

    #[test]
    fn test_tile_display() {
        let tile = ZfxyTile::new(25, -1, 29802274, 13208496).unwrap();
        assert_eq!(tile.to_string(), "/25/-1/29802274/13208496");
        assert_eq!(ZfxyTile::default(), ZfxyTile::ROOT);
    }

    #[test]
    fn test_lng_lat_alt() {
        let p = LngLatAlt::new(139.74, 35.72, 15.2);
        assert_eq!(p.lng(), 139.74);
        assert_eq!(p.lat(), 35.72);
        assert_eq!(p.alt, Some(15.2));

        let flat = LngLatAlt::from(Point::new(1.0, 2.0));
        assert_eq!(flat.alt, None);
    }

    #[test]
    fn test_config_json() {
        let config = Config::default().with_default_zoom(18);
        let json = config.to_json().unwrap();
        let parsed = Config::from_json(&json).unwrap();
        assert_eq!(parsed, config);

        assert!(Config::from_json(r#"{ "default_zoom": 31 }"#).is_err());
        assert!(Config::from_json("{}").is_ok());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_config_toml() {
        let config = Config::from_toml("bounding_min_zoom = 12").unwrap();
        assert_eq!(config.bounding_min_zoom, 12);
        assert_eq!(config.default_zoom, DEFAULT_ZOOM);
        assert!(Config::from_toml("default_zoom = 40").is_err());
    }
}
