//! One-way export of corridors for rendering and interchange.

use serde_json::{json, Value};

use crate::error::{CorridorError, Result};
use crate::geometry::{PointSequence, Region};

/// GeoJSON `Feature` with the region's exterior ring as a `Polygon`
/// geometry and empty properties.
///
/// # Errors
///
/// Returns `CorridorError::GeometryDegenerate` if the region is not a
/// single polygon without holes.
pub fn to_geojson(region: &Region) -> Result<Value> {
    let ring = region.simple_exterior().ok_or_else(|| {
        CorridorError::GeometryDegenerate(format!(
            "GeoJSON export needs a single simple polygon, region has {} parts",
            region.polygon_count()
        ))
    })?;
    let coordinates: Vec<[f64; 2]> = ring.iter().map(|p| [p.x, p.y]).collect();
    Ok(json!({
        "type": "Feature",
        "geometry": {
            "type": "Polygon",
            "coordinates": [coordinates],
        },
        "properties": {},
    }))
}

/// The route in the order map renderers expect, which is the reverse of
/// the input order.
#[must_use]
pub fn route_for_rendering(points: &PointSequence) -> PointSequence {
    points.reversed()
}
