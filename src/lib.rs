//! Geospatial helpers for a waste-collection dashboard: haversine distances,
//! greedy proximity clustering of bins, geofence containment and
//! nearest-neighbour collection routes.
//!
//! Everything here is a pure function of its arguments. Coordinates are never
//! validated; NaN or out-of-range input flows through the arithmetic.

pub mod bins;
pub mod cluster;
pub mod error;
pub mod geo;
pub mod load;
pub mod route;

pub use bins::{Bin, Located};
pub use cluster::{create_clusters, Cluster};
pub use error::{Error, Result};
pub use geo::{bins_in_geofence, calculate_distance, is_point_in_geofence, GeoPoint};
pub use route::{calculate_optimal_route, route_length_km};
