//! Spatial ID codec for a 3D slippy-map tiling.
//!
//! A [`ZfxyTile`] is a voxel `(z, f, x, y)`: the usual Web-Mercator tile
//! `z/x/y` plus a signed vertical layer `f`. The crate converts between
//! tile addresses, geographic positions, tilehash and Hilbert tilehash
//! strings, and computes which tiles cover a geometry.
//!
//! ```rust
//! use zfxy::{LngLatAlt, ZfxyTile, hilbert, projection, tilehash};
//!
//! let tile = projection::forward(&LngLatAlt::new(0.0, 0.0, 10.0), 25)?;
//! assert_eq!(tile, ZfxyTile::new(25, 10, 16777216, 16777216)?);
//!
//! let hash = tilehash::encode(&tile)?;
//! assert_eq!(tilehash::decode(&hash)?, tile);
//!
//! let h = hilbert::encode(&tile)?;
//! assert_eq!(h, "H6757575757575757575756523");
//! # Ok::<(), zfxy::ZfxyError>(())
//! ```

pub mod compute;
pub mod error;
pub mod hilbert;
pub mod projection;
pub mod space;
pub mod tile;
pub mod tilehash;
pub mod types;

pub use error::{Result, ZfxyError};

pub use types::{Config, DEFAULT_ZOOM, LngLatAlt, MAX_ZOOM, ZOOM_BASE, ZfxyTile};

pub use space::Space;

pub use tile::wraparound;

pub use compute::coverage::{
    TileIntersects, bounding_tile, covering_tiles, covering_tiles_with, smallest_covering_tile,
};

pub use geo::{Geometry, Point, Polygon, Rect};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Result, Space, ZfxyError, ZfxyTile};

    pub use crate::{Config, LngLatAlt};

    pub use crate::{hilbert, projection, tilehash};

    pub use crate::{TileIntersects, covering_tiles, smallest_covering_tile};

    pub use geo::{Geometry, Point, Polygon, Rect};
}
