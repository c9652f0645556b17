//! Geographical points and areas.
//!
//! Coordinates are always ordered `(longitude, latitude)`, the GeoJSON order.
//! A [`GeoPoint`] serializes as the two-element array `[longitude, latitude]`
//! and refuses out-of-range values on construction and on deserialization, so
//! a swapped pair with a latitude beyond ±90 never reaches storage.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SentigeoError};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographical point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
}

impl GeoPoint {
    /// Create a new point, validating both axes.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self> {
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(SentigeoError::invalid_location(format!(
                "longitude {longitude} must be between -180 and 180"
            )));
        }
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(SentigeoError::invalid_location(format!(
                "latitude {latitude} must be between -90 and 90"
            )));
        }

        Ok(GeoPoint {
            longitude,
            latitude,
        })
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Calculate the Haversine distance to another point in kilometers.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let lat1_rad = self.latitude.to_radians();
        let lat2_rad = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

impl TryFrom<[f64; 2]> for GeoPoint {
    type Error = SentigeoError;

    fn try_from([longitude, latitude]: [f64; 2]) -> Result<Self> {
        GeoPoint::new(longitude, latitude)
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(point: GeoPoint) -> Self {
        [point.longitude, point.latitude]
    }
}

/// An axis-aligned area between two corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBoundingBox {
    /// South-west corner (minimum longitude and latitude)
    pub min: GeoPoint,
    /// North-east corner (maximum longitude and latitude)
    pub max: GeoPoint,
}

impl GeoBoundingBox {
    /// Create a new bounding box.
    pub fn new(min: GeoPoint, max: GeoPoint) -> Result<Self> {
        if min.longitude > max.longitude || min.latitude > max.latitude {
            return Err(SentigeoError::invalid_location(
                "bounding box minimum corner must be south-west of the maximum corner",
            ));
        }
        Ok(GeoBoundingBox { min, max })
    }

    /// Check if a point is within this bounding box (edges included).
    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.min.longitude..=self.max.longitude).contains(&point.longitude)
            && (self.min.latitude..=self.max.latitude).contains(&point.latitude)
    }

    /// Get the center point of this bounding box.
    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            longitude: (self.min.longitude + self.max.longitude) / 2.0,
            latitude: (self.min.latitude + self.max.latitude) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        assert!(GeoPoint::new(13.4, 52.5).is_ok());
        assert!(GeoPoint::new(180.0, -90.0).is_ok());
        assert!(GeoPoint::new(13.4, 152.5).is_err());
        assert!(GeoPoint::new(-181.0, 0.0).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_swapped_axes_rejected() {
        // (lat, lng) of Sydney passed as (lng, lat).
        assert!(GeoPoint::new(-33.87, 151.21).is_err());
    }

    #[test]
    fn test_serialization_order() {
        let point = GeoPoint::new(13.4, 52.5).unwrap();
        assert_eq!(serde_json::to_string(&point).unwrap(), "[13.4,52.5]");

        let parsed: GeoPoint = serde_json::from_str("[13.4,52.5]").unwrap();
        assert_eq!(parsed.longitude(), 13.4);
        assert_eq!(parsed.latitude(), 52.5);

        assert!(serde_json::from_str::<GeoPoint>("[13.4,152.5]").is_err());
    }

    #[test]
    fn test_distance() {
        let berlin = GeoPoint::new(13.405, 52.52).unwrap();
        let paris = GeoPoint::new(2.3522, 48.8566).unwrap();
        let distance = berlin.distance_to(&paris);
        assert!((distance - 878.0).abs() < 10.0, "got {distance}");
        assert_eq!(berlin.distance_to(&berlin), 0.0);
    }

    #[test]
    fn test_bounding_box() {
        let bbox = GeoBoundingBox::new(
            GeoPoint::new(-1.0, -1.0).unwrap(),
            GeoPoint::new(1.0, 1.0).unwrap(),
        )
        .unwrap();

        assert!(bbox.contains(&GeoPoint::new(0.5, -0.5).unwrap()));
        assert!(bbox.contains(&GeoPoint::new(1.0, 1.0).unwrap()));
        assert!(!bbox.contains(&GeoPoint::new(1.5, 0.0).unwrap()));
        assert_eq!(bbox.center(), GeoPoint::new(0.0, 0.0).unwrap());

        assert!(GeoBoundingBox::new(bbox.max, bbox.min).is_err());
    }
}
