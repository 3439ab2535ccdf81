//! Geometry-facing computation layered on the codec core.
//!
//! - [`coverage`]: covering tiles and smallest covering tile
//! - [`geojson`]: GeoJSON in and out
//! - [`validation`]: coordinate, altitude and zoom checks

pub mod coverage;
pub mod geojson;
pub mod validation;
