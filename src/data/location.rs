use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ---------------------------------------------------------------------------
// GeoPoint – parsed "Vehicle Location" cell
// ---------------------------------------------------------------------------

/// A WGS84 coordinate parsed from a WKT `POINT (lon lat)` string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum LocationError {
    #[error("location is empty")]
    Empty,
    #[error("expected `POINT (lon lat)`, got {0:?}")]
    NotAPoint(String),
    #[error("coordinate {0:?} is not a finite number")]
    BadCoordinate(String),
}

impl FromStr for GeoPoint {
    type Err = LocationError;

    /// Accepts `POINT (-122.30839 47.610365)`. Whitespace around the
    /// parentheses is tolerated, a third (Z) coordinate is not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LocationError::Empty);
        }

        let inner = s
            .strip_prefix("POINT")
            .map(str::trim_start)
            .and_then(|rest| rest.strip_prefix('('))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| LocationError::NotAPoint(s.to_string()))?;

        let mut parts = inner.split_whitespace();
        let (Some(lon), Some(lat), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(LocationError::NotAPoint(s.to_string()));
        };

        Ok(GeoPoint {
            longitude: parse_coordinate(lon)?,
            latitude: parse_coordinate(lat)?,
        })
    }
}

fn parse_coordinate(tok: &str) -> Result<f64, LocationError> {
    tok.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LocationError::BadCoordinate(tok.to_string()))
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POINT ({} {})", self.longitude, self.latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_longitude_then_latitude() {
        let p: GeoPoint = "POINT (-122.30839 47.610365)".parse().unwrap();
        assert_eq!(p.longitude, -122.30839);
        assert_eq!(p.latitude, 47.610365);
    }

    #[test]
    fn tolerates_missing_space_and_padding() {
        let p: GeoPoint = "  POINT(-120.5 46.6)  ".parse().unwrap();
        assert_eq!(
            p,
            GeoPoint {
                longitude: -120.5,
                latitude: 46.6,
            }
        );
    }

    #[test]
    fn rejects_empty() {
        assert_eq!("".parse::<GeoPoint>(), Err(LocationError::Empty));
        assert_eq!("   ".parse::<GeoPoint>(), Err(LocationError::Empty));
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(matches!(
            "LINESTRING (1 2, 3 4)".parse::<GeoPoint>(),
            Err(LocationError::NotAPoint(_))
        ));
        assert!(matches!(
            "POINT (1 2 3)".parse::<GeoPoint>(),
            Err(LocationError::NotAPoint(_))
        ));
        assert!(matches!(
            "POINT (1)".parse::<GeoPoint>(),
            Err(LocationError::NotAPoint(_))
        ));
    }

    #[test]
    fn rejects_garbage_coordinates() {
        assert_eq!(
            "POINT (abc 47.6)".parse::<GeoPoint>(),
            Err(LocationError::BadCoordinate("abc".into()))
        );
        assert!(matches!(
            "POINT (NaN 47.6)".parse::<GeoPoint>(),
            Err(LocationError::BadCoordinate(_))
        ));
    }

    #[test]
    fn display_round_trips() {
        let p = GeoPoint {
            longitude: -122.5,
            latitude: 47.25,
        };
        assert_eq!(p.to_string().parse::<GeoPoint>(), Ok(p));
    }
}
