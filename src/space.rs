//! `Space`: a tile address with human-facing accessors.
//!
//! ```rust
//! use zfxy::{LngLatAlt, Space};
//!
//! let space = Space::from_geo(&LngLatAlt::new(0.0, 0.0, 10.0), Some(25))?;
//! assert_eq!(space.zfxy_str(), "/25/10/16777216/16777216");
//! assert_eq!(space.tilehash()?, "4111111111111111111115151");
//!
//! let above = space.up(1);
//! assert_eq!(above.tile().f, 11);
//! # Ok::<(), zfxy::ZfxyError>(())
//! ```

use crate::compute::coverage;
use crate::compute::geojson::tile_to_geojson;
use crate::error::{Result, ZfxyError};
use crate::hilbert;
use crate::projection;
use crate::tilehash;
use crate::types::{Config, LngLatAlt, ZfxyTile};
use geo::{Geometry, Polygon};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One cell of the 3D tiling.
///
/// Movement and hierarchy return new values; a `Space` never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "ZfxyTile", into = "ZfxyTile")]
pub struct Space {
    tile: ZfxyTile,
}

impl Space {
    /// Wrap a tile address, checking its invariants.
    pub fn new(tile: ZfxyTile) -> Result<Self> {
        ZfxyTile::new(tile.z, tile.f, tile.x, tile.y).map(|tile| Self { tile })
    }

    /// The space containing a position, at `zoom` or
    /// [`DEFAULT_ZOOM`](crate::DEFAULT_ZOOM).
    pub fn from_geo(position: &LngLatAlt, zoom: Option<u8>) -> Result<Self> {
        Self::from_geo_with_config(position, zoom, &Config::default())
    }

    /// Like [`Space::from_geo`], with the fallback zoom taken from `config`.
    pub fn from_geo_with_config(
        position: &LngLatAlt,
        zoom: Option<u8>,
        config: &Config,
    ) -> Result<Self> {
        let zoom = zoom.unwrap_or(config.default_zoom);
        projection::forward(position, zoom).map(|tile| Self { tile })
    }

    /// Parse an address string, a tilehash or a Hilbert tilehash, tried in
    /// that order.
    ///
    /// ```rust
    /// use zfxy::Space;
    ///
    /// assert_eq!(Space::parse("/1/0/0/0")?, Space::parse("1")?);
    /// assert_eq!(Space::parse("H8")?.zfxy_str(), "/1/0/0/0");
    /// assert!(Space::parse("not a tile").is_err());
    /// # Ok::<(), zfxy::ZfxyError>(())
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        input
            .parse::<ZfxyTile>()
            .or_else(|_| tilehash::decode(input))
            .or_else(|_| hilbert::decode(input))
            .map(|tile| Self { tile })
            .map_err(|_| {
                ZfxyError::ParseError(format!(
                    "'{}' is not a tile address, tilehash or Hilbert tilehash",
                    input
                ))
            })
    }

    pub fn tile(&self) -> ZfxyTile {
        self.tile
    }

    pub fn zoom(&self) -> u8 {
        self.tile.z
    }

    /// Centre of the voxel, altitude included.
    pub fn center(&self) -> LngLatAlt {
        projection::center_alt(&self.tile)
    }

    /// Altitude of the bottom of the voxel, in meters.
    pub fn alt(&self) -> f64 {
        projection::floor_meters(&self.tile)
    }

    pub fn tilehash(&self) -> Result<String> {
        tilehash::encode(&self.tile)
    }

    pub fn hilbert_tilehash(&self) -> Result<String> {
        hilbert::encode(&self.tile)
    }

    /// The `/z/f/x/y` form.
    pub fn zfxy_str(&self) -> String {
        self.tile.to_string()
    }

    pub fn up(&self, by: i64) -> Self {
        self.move_by(by, 0, 0)
    }

    pub fn down(&self, by: i64) -> Self {
        self.move_by(by.saturating_neg(), 0, 0)
    }

    /// Towards larger `y`.
    pub fn north(&self, by: i64) -> Self {
        self.move_by(0, 0, by)
    }

    /// Towards smaller `y`.
    pub fn south(&self, by: i64) -> Self {
        self.move_by(0, 0, by.saturating_neg())
    }

    pub fn east(&self, by: i64) -> Self {
        self.move_by(0, by, 0)
    }

    pub fn west(&self, by: i64) -> Self {
        self.move_by(0, by.saturating_neg(), 0)
    }

    /// Translate and wrap: `x`/`y` wrap around the map, `f` saturates.
    pub fn move_by(&self, df: i64, dx: i64, dy: i64) -> Self {
        Self {
            tile: self.tile.moved(df, dx, dy),
        }
    }

    pub fn parent(&self) -> Result<Self> {
        self.tile.parent().map(|tile| Self { tile })
    }

    pub fn parent_at(&self, zoom: u8) -> Result<Self> {
        self.tile.parent_at(zoom).map(|tile| Self { tile })
    }

    pub fn children(&self) -> Result<Vec<Self>> {
        Ok(self
            .tile
            .children()?
            .into_iter()
            .map(|tile| Self { tile })
            .collect())
    }

    /// The 26 neighbors in 3D; see [`ZfxyTile::neighbors_3d`].
    pub fn surroundings(&self) -> Vec<Self> {
        self.tile
            .neighbors_3d()
            .into_iter()
            .map(|tile| Self { tile })
            .collect()
    }

    /// Footprint as a GeoJSON Polygon geometry.
    pub fn to_geojson(&self) -> geojson::Geometry {
        tile_to_geojson(&self.tile)
    }

    pub fn polygon(&self) -> Polygon {
        projection::tile_outline(&self.tile)
    }

    pub fn vertices_3d(&self) -> [[f64; 3]; 8] {
        projection::vertices_3d(&self.tile)
    }

    /// Whether a position falls inside this space.
    ///
    /// Without an altitude only the horizontal footprint is compared.
    ///
    /// # Errors
    ///
    /// Whatever [`projection::forward`] rejects: bad coordinates or an
    /// out-of-range altitude.
    pub fn contains(&self, position: &LngLatAlt) -> Result<bool> {
        let projected = projection::forward(position, self.tile.z)?;
        let same_column = projected.x == self.tile.x && projected.y == self.tile.y;
        Ok(match position.alt {
            Some(_) => same_column && projected.f == self.tile.f,
            None => same_column,
        })
    }

    /// The smallest space containing a geometry's bounding box, no deeper
    /// than `min_zoom` (default [`Config::bounding_min_zoom`]).
    pub fn bounding_space_for_geometry(geometry: &Geometry, min_zoom: Option<u8>) -> Result<Self> {
        Self::bounding_space_with_config(geometry, min_zoom, &Config::default())
    }

    pub fn bounding_space_with_config(
        geometry: &Geometry,
        min_zoom: Option<u8>,
        config: &Config,
    ) -> Result<Self> {
        let min_zoom = min_zoom.unwrap_or(config.bounding_min_zoom);
        coverage::bounding_tile(geometry, min_zoom).map(|tile| Self { tile })
    }

    /// Spaces at `zoom` that intersect a geometry, ordered by `x` then `y`.
    pub fn spaces_for_geometry(geometry: &Geometry, zoom: u8) -> Result<Vec<Self>> {
        Ok(coverage::covering_tiles(geometry, zoom)?
            .into_iter()
            .map(|tile| Self { tile })
            .collect())
    }
}

impl TryFrom<ZfxyTile> for Space {
    type Error = ZfxyError;

    fn try_from(tile: ZfxyTile) -> Result<Self> {
        Self::new(tile)
    }
}

impl From<Space> for ZfxyTile {
    fn from(space: Space) -> Self {
        space.tile
    }
}

impl FromStr for Space {
    type Err = ZfxyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tile, f)
    }
}
