//! Conversion of external point representations into a [`PointSequence`].
//!
//! Every accepted representation is an explicit [`RawInput`] variant;
//! anything that cannot be read as an ordered list of `(x, y)` pairs is
//! rejected with [`CorridorError::InvalidInput`].

use std::sync::LazyLock;

use geo::LineString;
use regex::Regex;
use serde_json::Value;
use tracing::trace;

use crate::error::{CorridorError, Result};
use crate::geometry::PointSequence;
use crate::math::Point2;

/// GeoJSON geometry types that can carry a route.
const ROUTE_GEOMETRIES: &str = "Point, MultiPoint or LineString geometry";

/// A raw, not yet validated route representation.
#[derive(Debug, Clone)]
pub enum RawInput {
    /// `[x, y]` pairs in route order.
    Pairs(Vec<[f64; 2]>),
    /// Interleaved `x0, y0, x1, y1, ...`.
    Flat(Vec<f64>),
    /// Free text: bracketed pairs, a GeoJSON document, or loose `x, y`
    /// number pairs, tried in that order.
    Text(String),
    /// A parsed GeoJSON geometry, feature or feature collection.
    GeoJson(Value),
    LineString(LineString<f64>),
}

impl RawInput {
    /// Parses the representation into a validated route.
    ///
    /// # Errors
    ///
    /// Returns `CorridorError::InvalidInput` when nothing usable is found
    /// or a coordinate is not finite, and `CorridorError::TypeMismatch` for
    /// GeoJSON geometries that cannot carry a route.
    pub fn into_points(self) -> Result<PointSequence> {
        match self {
            Self::Pairs(pairs) => {
                PointSequence::new(pairs.iter().map(|&[x, y]| Point2::new(x, y)).collect())
            }
            Self::Flat(values) => from_flat(&values),
            Self::Text(text) => from_text(&text),
            Self::GeoJson(value) => from_geojson(&value),
            Self::LineString(line) => PointSequence::try_from(&line),
        }
    }
}

impl TryFrom<RawInput> for PointSequence {
    type Error = CorridorError;

    fn try_from(raw: RawInput) -> Result<Self> {
        raw.into_points()
    }
}

impl From<Vec<[f64; 2]>> for RawInput {
    fn from(pairs: Vec<[f64; 2]>) -> Self {
        Self::Pairs(pairs)
    }
}

impl From<&str> for RawInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<Value> for RawInput {
    fn from(value: Value) -> Self {
        Self::GeoJson(value)
    }
}

impl From<LineString<f64>> for RawInput {
    fn from(line: LineString<f64>) -> Self {
        Self::LineString(line)
    }
}

fn from_flat(values: &[f64]) -> Result<PointSequence> {
    if values.len() % 2 != 0 {
        return Err(CorridorError::InvalidInput(format!(
            "flat coordinate list needs an even length, got {}",
            values.len()
        )));
    }
    PointSequence::new(
        values
            .chunks_exact(2)
            .map(|xy| Point2::new(xy[0], xy[1]))
            .collect(),
    )
}

// Literal patterns; compilation cannot fail.
#[allow(clippy::expect_used)]
static BRACKETED_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\s*(-?\d+\.?\d*)\s*,\s*(-?\d+\.?\d*)\s*\]").expect("invalid regex")
});

#[allow(clippy::expect_used)]
static LOOSE_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(-?\d+\.?\d*)\s*,?\s*(-?\d+\.?\d*)").expect("invalid regex"));

fn capture_pairs(re: &Regex, text: &str) -> Result<Vec<Point2>> {
    re.captures_iter(text)
        .map(|caps| {
            let x = number(&caps[1])?;
            let y = number(&caps[2])?;
            Ok(Point2::new(x, y))
        })
        .collect()
}

fn number(s: &str) -> Result<f64> {
    s.parse::<f64>()
        .map_err(|err| CorridorError::InvalidInput(format!("bad number '{s}': {err}")))
}

fn from_text(text: &str) -> Result<PointSequence> {
    let bracketed = capture_pairs(&BRACKETED_PAIR, text)?;
    if !bracketed.is_empty() {
        trace!(points = bracketed.len(), "parsed bracketed pairs");
        return PointSequence::new(bracketed);
    }

    if let Ok(value) = serde_json::from_str::<Value>(text) {
        if value.is_object() {
            return from_geojson(&value);
        }
    }

    let loose = capture_pairs(&LOOSE_PAIR, text)?;
    if loose.is_empty() {
        return Err(CorridorError::invalid("no coordinate pairs found in text"));
    }
    trace!(points = loose.len(), "parsed loose number pairs");
    PointSequence::new(loose)
}

fn from_geojson(value: &Value) -> Result<PointSequence> {
    let Some(object) = value.as_object() else {
        return Err(CorridorError::invalid("GeoJSON input must be an object"));
    };

    match object.get("type").and_then(Value::as_str) {
        Some("Feature") => {
            let geometry = object
                .get("geometry")
                .ok_or_else(|| CorridorError::invalid("feature without geometry"))?;
            from_geojson(geometry)
        }
        Some("FeatureCollection") => from_features(object.get("features")),
        Some("Point") => PointSequence::new(vec![coordinate(coordinates_of(value)?)?]),
        Some("MultiPoint" | "LineString") => PointSequence::new(coordinate_list(coordinates_of(value)?)?),
        Some(other) => Err(CorridorError::TypeMismatch {
            expected: ROUTE_GEOMETRIES,
            found: other.to_owned(),
        }),
        None if object.contains_key("coordinates") => {
            let coords = coordinates_of(value)?;
            match coords.as_array().and_then(|a| a.first()) {
                Some(Value::Array(_)) => PointSequence::new(coordinate_list(coords)?),
                _ => PointSequence::new(vec![coordinate(coords)?]),
            }
        }
        None if object.contains_key("features") => from_features(object.get("features")),
        None => Err(CorridorError::invalid(
            "GeoJSON object has neither coordinates nor features",
        )),
    }
}

/// Route from the point geometries of a feature list, one point each.
fn from_features(features: Option<&Value>) -> Result<PointSequence> {
    let features = features
        .and_then(Value::as_array)
        .ok_or_else(|| CorridorError::invalid("features must be an array"))?;
    let mut points = Vec::with_capacity(features.len());
    for feature in features {
        let Some(geometry) = feature.get("geometry") else {
            continue;
        };
        match geometry.get("type").and_then(Value::as_str) {
            Some("Point") | None => {}
            Some(other) => {
                return Err(CorridorError::TypeMismatch {
                    expected: "Point feature",
                    found: other.to_owned(),
                });
            }
        }
        if let Some(coords) = geometry.get("coordinates") {
            points.push(coordinate(coords)?);
        }
    }
    PointSequence::new(points)
}

fn coordinates_of(value: &Value) -> Result<&Value> {
    value
        .get("coordinates")
        .ok_or_else(|| CorridorError::invalid("geometry without coordinates"))
}

fn coordinate_list(value: &Value) -> Result<Vec<Point2>> {
    value
        .as_array()
        .ok_or_else(|| CorridorError::invalid("coordinates must be an array"))?
        .iter()
        .map(coordinate)
        .collect()
}

/// `[x, y]` or `[x, y, z]`; anything past `y` is ignored.
fn coordinate(value: &Value) -> Result<Point2> {
    let pair = value.as_array().filter(|a| a.len() >= 2).ok_or_else(|| {
        CorridorError::InvalidInput(format!("expected an [x, y] position, got {value}"))
    })?;
    let component = |v: &Value| {
        v.as_f64()
            .ok_or_else(|| CorridorError::InvalidInput(format!("non-numeric coordinate {v}")))
    };
    Ok(Point2::new(component(&pair[0])?, component(&pair[1])?))
}
