//! Spherical Web-Mercator projection between geographic coordinates and
//! tile addresses.
//!
//! Horizontal math is the standard slippy-map projection. The vertical
//! index is linear in altitude: at zoom [`ZOOM_BASE`] one unit of `f` is
//! one meter, and every zoom level halves the layer height.

use crate::compute::validation::{validate_altitude, validate_geographic_point, validate_zoom};
use crate::error::Result;
use crate::types::{LngLatAlt, ZOOM_BASE, ZfxyTile};
use geo::{LineString, Point, Polygon};
use std::f64::consts::PI;

const DEG2RAD: f64 = PI / 180.0;
const RAD2DEG: f64 = 180.0 / PI;

/// `2^ZOOM_BASE`, the altitude span (in meters) of one layer at zoom 0.
const BASE_METERS: f64 = (1u64 << ZOOM_BASE) as f64;

#[inline]
fn pow2(z: i32) -> f64 {
    2f64.powi(z)
}

/// Fractional tile coordinates of a position at `zoom`.
///
/// `x` is wrapped into `[0, 2^zoom)`; `y` is left unclamped and is
/// infinite at the poles. `zoom` may exceed [`MAX_ZOOM`](crate::MAX_ZOOM):
/// the coverage engine samples at zoom 32.
pub fn point_to_tile_fraction(lng: f64, lat: f64, zoom: u8) -> (f64, f64) {
    let sin = (lat * DEG2RAD).sin();
    let z2 = pow2(zoom as i32);
    let mut x = z2 * (lng / 360.0 + 0.5);
    let y = z2 * (0.5 - 0.25 * ((1.0 + sin) / (1.0 - sin)).ln() / PI);

    x %= z2;
    if x < 0.0 {
        x += z2;
    }
    (x, y)
}

/// Integer tile coordinates of a position at `zoom`, both clamped into
/// `[0, 2^zoom)`.
pub fn point_to_tile(lng: f64, lat: f64, zoom: u8) -> (u64, u64) {
    let (x, y) = point_to_tile_fraction(lng, lat, zoom);
    let max = pow2(zoom as i32) - 1.0;
    let to_index = |v: f64| {
        if v.is_nan() {
            0
        } else {
            v.floor().clamp(0.0, max) as u64
        }
    };
    (to_index(x), to_index(y))
}

/// Project a position (and optional altitude) to the tile containing it.
///
/// A missing altitude is treated as 0 m.
///
/// # Errors
///
/// - `InvalidArgument` if `zoom` exceeds [`MAX_ZOOM`](crate::MAX_ZOOM)
/// - `InvalidInput` for non-finite or out-of-range coordinates
/// - `AltitudeOutOfRange` if `|alt| >= 2^25`
///
/// # Examples
///
/// ```
/// use zfxy::{LngLatAlt, ZfxyTile, projection::forward};
///
/// let tile = forward(&LngLatAlt::new(0.0, 0.0, 10.0), 25).unwrap();
/// assert_eq!(tile, ZfxyTile::new(25, 10, 16777216, 16777216).unwrap());
/// ```
pub fn forward(position: &LngLatAlt, zoom: u8) -> Result<ZfxyTile> {
    validate_zoom(zoom)?;
    validate_geographic_point(&position.point)?;

    let meters = position.alt.unwrap_or(0.0);
    validate_altitude(meters)?;

    let f = ((pow2(zoom as i32) * meters) / BASE_METERS).floor() as i32;
    let (x, y) = point_to_tile(position.lng(), position.lat(), zoom);

    Ok(ZfxyTile {
        z: zoom,
        f,
        x: x as u32,
        y: y as u32,
    })
}

/// Northwest corner of the (possibly one-past-the-end) tile column/row.
fn corner(x: f64, y: f64, z: i32) -> Point {
    let z2 = pow2(z);
    let n = PI - 2.0 * PI * y / z2;
    Point::new(
        x / z2 * 360.0 - 180.0,
        RAD2DEG * (0.5 * (n.exp() - (-n).exp())).atan(),
    )
}

/// The northwest corner of a tile, as `(lng, lat)`.
pub fn inverse(tile: &ZfxyTile) -> Point {
    corner(tile.x as f64, tile.y as f64, tile.z as i32)
}

/// The `[nw, se]` corners of a tile's footprint.
pub fn bbox(tile: &ZfxyTile) -> (Point, Point) {
    let z = tile.z as i32;
    let nw = corner(tile.x as f64, tile.y as f64, z);
    let se = corner(tile.x as f64 + 1.0, tile.y as f64 + 1.0, z);
    (nw, se)
}

/// The horizontal centre of a tile.
pub fn center(tile: &ZfxyTile) -> Point {
    corner(
        tile.x as f64 * 2.0 + 1.0,
        tile.y as f64 * 2.0 + 1.0,
        tile.z as i32 + 1,
    )
}

/// Altitude of the bottom of a tile's layer, in meters.
pub fn floor_meters(tile: &ZfxyTile) -> f64 {
    tile.f as f64 * BASE_METERS / pow2(tile.z as i32)
}

/// Altitude of the top of a tile's layer, in meters.
pub fn ceiling_meters(tile: &ZfxyTile) -> f64 {
    (tile.f as f64 + 1.0) * BASE_METERS / pow2(tile.z as i32)
}

/// The 3D centre of a tile: horizontal centre plus mid-layer altitude.
pub fn center_alt(tile: &ZfxyTile) -> LngLatAlt {
    LngLatAlt {
        point: center(tile),
        alt: Some(floor_meters(tile) + BASE_METERS / pow2(tile.z as i32 + 1)),
    }
}

/// Closed outline ring of a tile:
/// `nw -> (nw.lng, se.lat) -> se -> (se.lng, nw.lat) -> nw`.
pub fn tile_outline(tile: &ZfxyTile) -> Polygon {
    let (nw, se) = bbox(tile);
    let ring = LineString::from(vec![
        (nw.x(), nw.y()),
        (nw.x(), se.y()),
        (se.x(), se.y()),
        (se.x(), nw.y()),
        (nw.x(), nw.y()),
    ]);
    Polygon::new(ring, vec![])
}

/// The eight corners of a tile's voxel as `[lng, lat, alt]`: the four
/// outline corners at the floor altitude, then the same four at the
/// ceiling altitude.
pub fn vertices_3d(tile: &ZfxyTile) -> [[f64; 3]; 8] {
    let (nw, se) = bbox(tile);
    let corners = [
        (nw.x(), nw.y()),
        (nw.x(), se.y()),
        (se.x(), se.y()),
        (se.x(), nw.y()),
    ];
    let floor = floor_meters(tile);
    let ceiling = ceiling_meters(tile);

    std::array::from_fn(|i| {
        let (lng, lat) = corners[i % 4];
        let alt = if i < 4 { floor } else { ceiling };
        [lng, lat, alt]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ZfxyError;

    const EPS: f64 = 1e-9;

    fn tile(z: u8, f: i32, x: u32, y: u32) -> ZfxyTile {
        ZfxyTile::new(z, f, x, y).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_forward_equator() {
        let t = forward(&LngLatAlt::new(0.0, 0.0, 10.0), 25).unwrap();
        assert_eq!(t, tile(25, 10, 16777216, 16777216));

        let t = forward(&LngLatAlt::from_lng_lat(0.0, 0.0), 25).unwrap();
        assert_eq!(t.f, 0);
    }

    #[test]
    fn test_forward_negative_altitude() {
        let t = forward(&LngLatAlt::new(0.0, 0.0, -0.5), 25).unwrap();
        assert_eq!(t.f, -1);

        let t = forward(&LngLatAlt::new(0.0, 0.0, -100.0), 20).unwrap();
        assert_eq!(t.f, -4);
    }

    #[test]
    fn test_forward_errors() {
        assert!(matches!(
            forward(&LngLatAlt::new(0.0, 0.0, 33_554_432.0), 25),
            Err(ZfxyError::AltitudeOutOfRange(_))
        ));
        assert!(matches!(
            forward(&LngLatAlt::new(0.0, 0.0, -33_554_432.0), 25),
            Err(ZfxyError::AltitudeOutOfRange(_))
        ));
        assert!(matches!(
            forward(&LngLatAlt::new(0.0, 0.0, 0.0), 31),
            Err(ZfxyError::InvalidArgument(_))
        ));
        assert!(matches!(
            forward(&LngLatAlt::from_lng_lat(f64::NAN, 0.0), 10),
            Err(ZfxyError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_forward_wraps_and_clamps() {
        let east_edge = forward(&LngLatAlt::from_lng_lat(180.0, 0.0), 4).unwrap();
        assert_eq!(east_edge.x, 0);

        let pole = forward(&LngLatAlt::from_lng_lat(0.0, 90.0), 4).unwrap();
        assert_eq!(pole.y, 0);
        let pole = forward(&LngLatAlt::from_lng_lat(0.0, -90.0), 4).unwrap();
        assert_eq!(pole.y, 15);
    }

    #[test]
    fn test_inverse_is_northwest_corner() {
        let nw = inverse(&tile(1, 0, 0, 0));
        assert_close(nw.x(), -180.0);
        assert_close(nw.y(), 85.0511287798066);

        let nw = inverse(&tile(1, 0, 1, 1));
        assert_close(nw.x(), 0.0);
        assert_close(nw.y(), 0.0);
    }

    #[test]
    fn test_center() {
        let c = center_alt(&tile(1, 0, 0, 0));
        assert_close(c.lng(), -90.0);
        assert_close(c.lat(), 66.51326044311186);
        assert_eq!(c.alt, Some(8388608.0));
    }

    #[test]
    fn test_center_altitude() {
        assert_eq!(center_alt(&tile(25, 0, 16777216, 16777216)).alt, Some(0.5));
        assert_eq!(center_alt(&tile(25, 1, 16777216, 16777216)).alt, Some(1.5));
        assert_eq!(center_alt(&tile(20, 0, 524288, 524288)).alt, Some(16.0));
        assert_eq!(center_alt(&tile(20, 1, 524288, 524288)).alt, Some(48.0));
        assert_eq!(center_alt(&tile(20, 10, 524288, 524288)).alt, Some(336.0));
    }

    #[test]
    fn test_floor_and_ceiling() {
        let t = tile(22, 6, 3725284, 1651062);
        assert_eq!(floor_meters(&t), 48.0);
        assert_eq!(ceiling_meters(&t), 56.0);
        assert_eq!(floor_meters(&tile(25, -3, 0, 0)), -3.0);
    }

    #[test]
    fn test_outline() {
        let cases: [(ZfxyTile, [[f64; 2]; 5]); 2] = [
            (
                tile(1, 0, 0, 0),
                [
                    [-180.0, 85.0511287798066],
                    [-180.0, 0.0],
                    [0.0, 0.0],
                    [0.0, 85.0511287798066],
                    [-180.0, 85.0511287798066],
                ],
            ),
            (
                tile(25, 0, 29803304, 13212456),
                [
                    [139.75476264953613, 35.68595383239409],
                    [139.75476264953613, 35.68594511814803],
                    [139.7547733783722, 35.68594511814803],
                    [139.7547733783722, 35.68595383239409],
                    [139.75476264953613, 35.68595383239409],
                ],
            ),
        ];

        for (t, expected) in cases {
            let outline = tile_outline(&t);
            let coords: Vec<_> = outline.exterior().coords().collect();
            assert_eq!(coords.len(), 5);
            for (coord, [lng, lat]) in coords.iter().zip(expected) {
                assert_close(coord.x, lng);
                assert_close(coord.y, lat);
            }
        }
    }

    #[test]
    fn test_vertices_3d() {
        let vertices = vertices_3d(&tile(22, 6, 3725284, 1651062));
        assert_close(vertices[0][0], 139.74369049072266);
        assert_close(vertices[0][1], 35.720454780411565);
        assert_eq!(vertices[0][2], 48.0);
        assert_close(vertices[2][0], 139.74377632141113);
        assert_close(vertices[2][1], 35.7203850965781);
        assert_eq!(vertices[7][2], 56.0);
        assert_eq!(vertices[3][..2], vertices[7][..2]);
    }
}
