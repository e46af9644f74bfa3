//! Geographic radius filters (`GEOFILTER attribute lon lat radius unit`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FtSearchError, Result};
use crate::protocol::Arg;
use crate::serialize::ToArgs;

/// A geographical point with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    pub lat: f64,
    /// Longitude in degrees (-180 to 180)
    pub lon: f64,
}

impl GeoPoint {
    /// Create a new geographical point.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(FtSearchError::query(format!(
                "Invalid latitude: {lat} (must be between -90 and 90)"
            )));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(FtSearchError::query(format!(
                "Invalid longitude: {lon} (must be between -180 and 180)"
            )));
        }

        Ok(GeoPoint { lat, lon })
    }
}

/// Distance unit for a geo filter radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GeoUnit {
    Meters,
    #[default]
    Kilometers,
    Miles,
    Feet,
}

impl GeoUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeoUnit::Meters => "m",
            GeoUnit::Kilometers => "km",
            GeoUnit::Miles => "mi",
            GeoUnit::Feet => "ft",
        }
    }
}

impl fmt::Display for GeoUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Restricts results to documents within `radius` of `center`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoFilter {
    pub attribute: String,
    pub center: GeoPoint,
    pub radius: f64,
    pub unit: GeoUnit,
}

impl GeoFilter {
    pub fn new<S: Into<String>>(attribute: S, center: GeoPoint, radius: f64, unit: GeoUnit) -> Self {
        GeoFilter {
            attribute: attribute.into(),
            center,
            radius,
            unit,
        }
    }
}

impl ToArgs for GeoFilter {
    fn write_args(&self, args: &mut Vec<Arg>) {
        // longitude comes first on the wire
        args.push(Arg::from("GEOFILTER"));
        args.push(Arg::from(&self.attribute));
        args.push(Arg::from(self.center.lon));
        args.push(Arg::from(self.center.lat));
        args.push(Arg::from(self.radius));
        args.push(Arg::from(self.unit.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_validation() {
        assert!(GeoPoint::new(51.5, -0.12).is_ok());
        assert!(GeoPoint::new(91.0, 0.0).is_err());
        assert!(GeoPoint::new(0.0, 181.0).is_err());
    }

    #[test]
    fn test_geo_filter_serialization() -> Result<()> {
        let filter = GeoFilter::new("location", GeoPoint::new(51.5, -0.25)?, 10.0, GeoUnit::Miles);
        assert_eq!(
            filter.to_args(),
            vec!["GEOFILTER", "location", "-0.25", "51.5", "10", "mi"]
        );

        Ok(())
    }
}
