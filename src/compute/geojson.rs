//! GeoJSON conversion for tile footprints and input geometries.

use crate::error::{Result, ZfxyError};
use crate::projection::tile_outline;
use crate::types::ZfxyTile;
use geojson::{GeoJson, Geometry, Value};

/// A tile's footprint as a GeoJSON Polygon geometry.
pub fn tile_to_geojson(tile: &ZfxyTile) -> Geometry {
    let outline = tile_outline(tile);
    let ring: Vec<Vec<f64>> = outline
        .exterior()
        .coords()
        .map(|coord| vec![coord.x, coord.y])
        .collect();

    Geometry::new(Value::Polygon(vec![ring]))
}

/// A tile's footprint as a GeoJSON string.
pub fn tile_to_geojson_string(tile: &ZfxyTile) -> Result<String> {
    serde_json::to_string(&tile_to_geojson(tile)).map_err(|e| {
        ZfxyError::SerializationError(format!("Failed to serialize tile {}: {}", tile, e))
    })
}

/// Parses a GeoJSON geometry (bare, or the geometry of a Feature).
///
/// # Errors
///
/// `InvalidInput` for malformed GeoJSON, a Feature without geometry or a
/// FeatureCollection; `UnsupportedGeometry` for a GeometryCollection.
pub fn geometry_from_geojson(geojson: &str) -> Result<geo::Geometry> {
    let parsed: GeoJson = geojson
        .parse()
        .map_err(|e| ZfxyError::InvalidInput(format!("Failed to parse GeoJSON: {}", e)))?;

    let geometry = match parsed {
        GeoJson::Geometry(geometry) => geometry,
        GeoJson::Feature(feature) => feature.geometry.ok_or_else(|| {
            ZfxyError::InvalidInput("GeoJSON Feature has no geometry".to_string())
        })?,
        GeoJson::FeatureCollection(_) => {
            return Err(ZfxyError::InvalidInput(
                "expected a GeoJSON Geometry or Feature, got a FeatureCollection".to_string(),
            ));
        }
    };

    if let Value::GeometryCollection(_) = geometry.value {
        log::warn!("Rejecting GeoJSON GeometryCollection");
        return Err(ZfxyError::UnsupportedGeometry(
            "GeometryCollection is not supported".to_string(),
        ));
    }

    geo::Geometry::<f64>::try_from(geometry)
        .map_err(|e| ZfxyError::InvalidInput(format!("Invalid GeoJSON geometry: {}", e)))
}
