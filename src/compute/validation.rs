//! Validation for geographic input and zoom arguments.

use crate::error::{Result, ZfxyError};
use crate::types::{MAX_ZOOM, ZOOM_BASE};
use geo::{Point, Rect};

/// Largest absolute altitude (exclusive) the vertical index can express.
pub const ALTITUDE_LIMIT: f64 = (1u64 << ZOOM_BASE) as f64;

/// Validates a 2D point has valid longitude and latitude.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
///
/// # Examples
///
/// ```
/// use zfxy::compute::validation::validate_geographic_point;
/// use geo::Point;
///
/// let tokyo = Point::new(139.7671, 35.6812);
/// assert!(validate_geographic_point(&tokyo).is_ok());
///
/// let invalid = Point::new(200.0, 40.0);
/// assert!(validate_geographic_point(&invalid).is_err());
/// ```
pub fn validate_geographic_point(point: &Point) -> Result<()> {
    let (lng, lat) = (point.x(), point.y());

    if !lng.is_finite() || !lat.is_finite() {
        log::warn!("Rejecting non-finite coordinate ({}, {})", lng, lat);
        return Err(ZfxyError::InvalidInput(format!(
            "Coordinates must be finite, got: ({}, {})",
            lng, lat
        )));
    }

    if !(-180.0..=180.0).contains(&lng) {
        return Err(ZfxyError::InvalidInput(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            lng
        )));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(ZfxyError::InvalidInput(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            lat
        )));
    }

    Ok(())
}

/// Validates an altitude lies strictly inside `(-2^25, 2^25)` meters.
///
/// ```
/// use zfxy::compute::validation::validate_altitude;
///
/// assert!(validate_altitude(8848.0).is_ok());
/// assert!(validate_altitude(33_554_432.0).is_err());
/// ```
pub fn validate_altitude(alt: f64) -> Result<()> {
    if !alt.is_finite() {
        return Err(ZfxyError::InvalidInput(format!(
            "Altitude must be finite, got: {}",
            alt
        )));
    }

    if alt.abs() >= ALTITUDE_LIMIT {
        return Err(ZfxyError::AltitudeOutOfRange(alt));
    }

    Ok(())
}

/// Validates a zoom does not exceed [`MAX_ZOOM`].
pub fn validate_zoom(zoom: u8) -> Result<()> {
    if zoom > MAX_ZOOM {
        return Err(ZfxyError::InvalidArgument(format!(
            "zoom {} exceeds the maximum zoom {}",
            zoom, MAX_ZOOM
        )));
    }
    Ok(())
}

/// Validates both corners of a lng/lat bounding box.
pub fn validate_rect(rect: &Rect) -> Result<()> {
    validate_geographic_point(&Point::from(rect.min()))
        .map_err(|e| ZfxyError::InvalidInput(format!("Bounding box min corner: {}", e)))?;
    validate_geographic_point(&Point::from(rect.max()))
        .map_err(|e| ZfxyError::InvalidInput(format!("Bounding box max corner: {}", e)))?;
    Ok(())
}
