//! Simulated user position, decoded from the text of a location QR code.
//!
//! Two payload shapes are accepted:
//! - JSON: `{"latitude": 1.3, "longitude": 103.7, "level": 6}`
//! - CSV: `1.3,103.7[,6]`
//!
//! A missing, zero or unparseable level falls back to the floor currently
//! on screen.

use std::fmt;

use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UserLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub level: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocationParseError {
    /// The payload is neither a JSON object nor `lat,lng[,level]`.
    Malformed(String),
    /// Latitude or longitude is missing or not a number.
    InvalidCoordinates,
}

impl fmt::Display for LocationParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationParseError::Malformed(msg) => {
                write!(f, "Could not parse location payload: {msg}")
            }
            LocationParseError::InvalidCoordinates => {
                write!(f, "Invalid coordinates format in location payload")
            }
        }
    }
}

impl std::error::Error for LocationParseError {}

/// Decode a scanned payload. `current_floor` fills in a missing level.
pub fn parse_location_payload(
    text: &str,
    current_floor: i32,
) -> Result<UserLocation, LocationParseError> {
    let trimmed = text.trim();
    let (latitude, longitude, level) = if trimmed.starts_with('{') {
        parse_json(trimmed)?
    } else {
        parse_csv(trimmed)?
    };

    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        return Err(LocationParseError::InvalidCoordinates);
    };
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(LocationParseError::InvalidCoordinates);
    }

    Ok(UserLocation {
        latitude,
        longitude,
        level: level.filter(|&l| l != 0).unwrap_or(current_floor),
    })
}

type RawLocation = (Option<f64>, Option<f64>, Option<i32>);

fn parse_json(text: &str) -> Result<RawLocation, LocationParseError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| LocationParseError::Malformed(e.to_string()))?;
    let number = |key: &str| value.get(key).and_then(Value::as_f64);
    let level = value
        .get("level")
        .and_then(Value::as_i64)
        .and_then(|l| i32::try_from(l).ok());
    Ok((number("latitude"), number("longitude"), level))
}

fn parse_csv(text: &str) -> Result<RawLocation, LocationParseError> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() < 2 {
        return Err(LocationParseError::Malformed(format!(
            "expected `lat,lng[,level]`, got {:?}",
            text
        )));
    }
    let level = parts.get(2).and_then(|raw| raw.parse::<i32>().ok());
    Ok((parts[0].parse().ok(), parts[1].parse().ok(), level))
}
