use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bins::Located;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A position in degrees. No range checks are made anywhere in the crate.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        calculate_distance(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("expected `<latitude>,<longitude>`, got {0:?}")]
pub struct ParseGeoPointError(String);

/// Parses `"lat,lng"`, the form used on the command line.
impl FromStr for GeoPoint {
    type Err = ParseGeoPointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseGeoPointError(s.to_string());
        let (lat, lng) = s.split_once(',').ok_or_else(err)?;
        let latitude = lat.trim().parse().map_err(|_| err())?;
        let longitude = lng.trim().parse().map_err(|_| err())?;
        Ok(GeoPoint::new(latitude, longitude))
    }
}

/// Great-circle distance using the haversine formula.
/// Input lat/lon in degrees. Output in kilometers.
pub fn calculate_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Ray-casting containment test. The polygon is implicitly closed.
///
/// Rays are cast along the latitude axis: an edge counts as crossed when it
/// straddles the point's longitude and its crossing latitude lies above the
/// point's. Points exactly on an edge may land on either side.
pub fn is_point_in_geofence(point: &GeoPoint, polygon: &[GeoPoint]) -> bool {
    let (x, y) = (point.latitude, point.longitude);
    let mut inside = false;
    let mut j = match polygon.len() {
        0 => return false,
        n => n - 1,
    };
    for (i, vi) in polygon.iter().enumerate() {
        let vj = &polygon[j];
        let (xi, yi) = (vi.latitude, vi.longitude);
        let (xj, yj) = (vj.latitude, vj.longitude);
        let intersects = ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi);
        if intersects {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// The items whose location falls inside `polygon`, in input order.
pub fn bins_in_geofence<'a, T: Located>(items: &'a [T], polygon: &[GeoPoint]) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| is_point_in_geofence(&item.location(), polygon))
        .collect()
}
