//! Geo-coordinate encode/decode over JSON arrays.
//!
//! Two element orderings exist in the wild: the native order (lat, lon,
//! [alt]) used by this application's own formats, and GeoJSON order (lon,
//! lat, [alt]). Both run through a single code path parameterized by
//! [`CoordinateOrder`] so they cannot drift apart.

use crate::error::DocumentError;
use crate::value::{number_or_null, possible_nan, JsonType};
use serde_json::Value;

/// Element ordering of a serialized coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateOrder {
    /// Native order: latitude first.
    LatLon,
    /// GeoJSON order: longitude first.
    LonLat,
}

/// A latitude/longitude coordinate with optional altitude; altitude is NaN
/// when unknown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: f64::NAN,
        }
    }

    pub fn with_altitude(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    pub fn has_altitude(&self) -> bool {
        !self.altitude.is_nan()
    }
}

/// Decode one coordinate from a 2- or 3-element array of numbers-or-nulls.
pub fn decode_point(
    value: &Value,
    altitude_required: bool,
    order: CoordinateOrder,
) -> Result<GeoPoint, DocumentError> {
    let Some(entries) = value.as_array() else {
        return Err(DocumentError::CoordinateNotArray);
    };

    let required = if altitude_required { 3 } else { 2 };
    if entries.len() != required {
        return Err(DocumentError::CoordinateArrayCount { required });
    }

    for entry in entries {
        let found = JsonType::of(entry);
        if found != JsonType::Double && found != JsonType::Null {
            return Err(DocumentError::CoordinateValueType { found });
        }
    }

    let (lat_index, lon_index) = match order {
        CoordinateOrder::LatLon => (0, 1),
        CoordinateOrder::LonLat => (1, 0),
    };

    let mut point = GeoPoint::new(
        possible_nan(&entries[lat_index]),
        possible_nan(&entries[lon_index]),
    );
    if altitude_required {
        point.altitude = possible_nan(&entries[2]);
    }

    Ok(point)
}

/// Encode one coordinate; altitude is appended only when requested, and a
/// NaN altitude encodes as `null`.
pub fn encode_point(point: &GeoPoint, write_altitude: bool, order: CoordinateOrder) -> Value {
    let mut entries = match order {
        CoordinateOrder::LatLon => vec![
            number_or_null(point.latitude),
            number_or_null(point.longitude),
        ],
        CoordinateOrder::LonLat => vec![
            number_or_null(point.longitude),
            number_or_null(point.latitude),
        ],
    };
    if write_altitude {
        entries.push(number_or_null(point.altitude));
    }

    Value::Array(entries)
}

/// Decode a sequence of coordinates atomically: any bad element discards
/// the whole result.
pub fn decode_points(
    value: &Value,
    altitude_required: bool,
    order: CoordinateOrder,
) -> Result<Vec<GeoPoint>, DocumentError> {
    let Some(entries) = value.as_array() else {
        return Err(DocumentError::CoordinateArrayNotArray);
    };

    let mut points = Vec::with_capacity(entries.len());
    for entry in entries {
        points.push(decode_point(entry, altitude_required, order)?);
    }

    Ok(points)
}

/// Encode a sequence of coordinates in the requested order.
pub fn encode_points(
    points: &[GeoPoint],
    write_altitude: bool,
    order: CoordinateOrder,
) -> Value {
    Value::Array(
        points
            .iter()
            .map(|point| encode_point(point, write_altitude, order))
            .collect(),
    )
}
