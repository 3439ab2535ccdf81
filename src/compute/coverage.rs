//! Polygon coverage: which tiles of a zoom level a geometry touches, and
//! the single smallest tile that contains a bounding box.
//!
//! Both searches work on tile coordinates sampled at zoom 32, so a bbox
//! corner at any target zoom is a plain right shift of its 32-bit
//! coordinate. The per-tile geometric test is injected through
//! [`TileIntersects`]; anything implementing `geo::Intersects<Polygon>`
//! gets it for free.

use crate::compute::validation::{validate_rect, validate_zoom};
use crate::error::{Result, ZfxyError};
use crate::projection::{point_to_tile, tile_outline};
use crate::types::ZfxyTile;
use geo::{BoundingRect, Geometry, Intersects, Polygon, Rect};

/// Zoom at which bbox corners are sampled.
pub const SAMPLE_ZOOM: u8 = 32;

/// Deepest zoom the bbox prefix search reports.
pub const BBOX_MAX_ZOOM: u8 = 28;

/// Whether a shape touches a tile's footprint.
pub trait TileIntersects {
    fn intersects_tile(&self, outline: &Polygon) -> bool;
}

impl<G> TileIntersects for G
where
    G: Intersects<Polygon<f64>>,
{
    fn intersects_tile(&self, outline: &Polygon) -> bool {
        self.intersects(outline)
    }
}

/// A corner in zoom-32 tile coordinates. Longitude 180 samples the last
/// column rather than wrapping to column 0.
fn sample_corner(lng: f64, lat: f64) -> (u64, u64) {
    let (x, y) = point_to_tile(lng, lat, SAMPLE_ZOOM);
    if lng >= 180.0 {
        ((1u64 << SAMPLE_ZOOM) - 1, y)
    } else {
        (x, y)
    }
}

/// Corners of a bbox in zoom-32 tile coordinates: `(min_corner, max_corner)`
/// where `min_corner` is the projection of `(min_lng, min_lat)`.
fn sample_corners(bbox: &Rect) -> ((u64, u64), (u64, u64)) {
    let min = sample_corner(bbox.min().x, bbox.min().y);
    let max = sample_corner(bbox.max().x, bbox.max().y);
    (min, max)
}

/// First zoom at which two zoom-32 tile coordinates stop sharing a parent,
/// capped at [`BBOX_MAX_ZOOM`].
pub fn bbox_zoom(a: (u64, u64), b: (u64, u64)) -> u8 {
    (0..BBOX_MAX_ZOOM)
        .find(|&z| {
            let mask = 1u64 << (SAMPLE_ZOOM - (z + 1));
            (a.0 & mask) != (b.0 & mask) || (a.1 & mask) != (b.1 & mask)
        })
        .unwrap_or(BBOX_MAX_ZOOM)
}

/// The smallest tile (at `f = 0`) containing a lng/lat bounding box, no
/// deeper than `min_zoom`.
///
/// # Errors
///
/// `InvalidArgument` if `min_zoom` exceeds [`MAX_ZOOM`](crate::MAX_ZOOM);
/// `InvalidInput` for corners outside lng/lat range.
///
/// # Examples
///
/// ```
/// use geo::{Rect, coord};
/// use zfxy::compute::coverage::smallest_covering_tile;
///
/// let bbox = Rect::new(coord! { x: 139.7404, y: 35.6737 }, coord! { x: 139.7427, y: 35.6760 });
/// let tile = smallest_covering_tile(&bbox, 8).unwrap();
/// assert_eq!((tile.z, tile.x, tile.y), (8, 227, 100));
/// ```
pub fn smallest_covering_tile(bbox: &Rect, min_zoom: u8) -> Result<ZfxyTile> {
    validate_zoom(min_zoom)?;
    validate_rect(bbox)?;

    let (min, max) = sample_corners(bbox);
    let z = bbox_zoom(min, max).min(min_zoom);
    log::debug!("Smallest covering tile for {:?} is at zoom {}", bbox, z);

    if z == 0 {
        return Ok(ZfxyTile::ROOT);
    }
    let shift = SAMPLE_ZOOM - z;
    Ok(ZfxyTile {
        z,
        f: 0,
        x: (min.0 >> shift) as u32,
        y: (min.1 >> shift) as u32,
    })
}

/// Tiles at `zoom` (all at `f = 0`) whose outline satisfies `shape`,
/// scanning the bbox column by column.
///
/// The scan covers one extra tile past the max corner on each axis;
/// candidates beyond the edge of the map are skipped. Results are ordered
/// by `x`, then `y`.
pub fn covering_tiles_with<S>(bbox: &Rect, zoom: u8, shape: &S) -> Result<Vec<ZfxyTile>>
where
    S: TileIntersects + ?Sized,
{
    validate_zoom(zoom)?;
    validate_rect(bbox)?;

    if zoom == 0 {
        return Ok(vec![ZfxyTile::ROOT]);
    }

    let (a, b) = sample_corners(bbox);
    let shift = SAMPLE_ZOOM - zoom;
    let last = (1u64 << zoom) - 1;

    let min_x = a.0.min(b.0) >> shift;
    let min_y = a.1.min(b.1) >> shift;
    let max_x = ((a.0.max(b.0) >> shift) + 1).min(last);
    let max_y = ((a.1.max(b.1) >> shift) + 1).min(last);

    log::debug!(
        "Scanning {}x{} candidate tiles at zoom {}",
        max_x - min_x + 1,
        max_y - min_y + 1,
        zoom
    );

    let mut tiles = Vec::new();
    for x in min_x..=max_x {
        for y in min_y..=max_y {
            let tile = ZfxyTile {
                z: zoom,
                f: 0,
                x: x as u32,
                y: y as u32,
            };
            if shape.intersects_tile(&tile_outline(&tile)) {
                tiles.push(tile);
            }
        }
    }

    log::debug!("{} tiles cover the geometry at zoom {}", tiles.len(), zoom);
    Ok(tiles)
}

fn geometry_bbox(geometry: &Geometry) -> Result<Rect> {
    geometry.bounding_rect().ok_or_else(|| {
        log::warn!("Rejecting empty geometry");
        ZfxyError::InvalidArgument("geometry is empty and has no bounding box".to_string())
    })
}

/// Tiles at `zoom` that intersect `geometry`.
///
/// # Errors
///
/// `UnsupportedGeometry` for a `GeometryCollection`; `InvalidArgument` for
/// an empty geometry or a zoom beyond [`MAX_ZOOM`](crate::MAX_ZOOM).
pub fn covering_tiles(geometry: &Geometry, zoom: u8) -> Result<Vec<ZfxyTile>> {
    if let Geometry::GeometryCollection(_) = geometry {
        log::warn!("Rejecting GeometryCollection for tile coverage");
        return Err(ZfxyError::UnsupportedGeometry(
            "GeometryCollection is not supported".to_string(),
        ));
    }

    let bbox = geometry_bbox(geometry)?;
    covering_tiles_with(&bbox, zoom, geometry)
}

/// [`smallest_covering_tile`] of a geometry's bounding box.
pub fn bounding_tile(geometry: &Geometry, min_zoom: u8) -> Result<ZfxyTile> {
    smallest_covering_tile(&geometry_bbox(geometry)?, min_zoom)
}
