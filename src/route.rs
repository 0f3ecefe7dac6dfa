use ordered_float::OrderedFloat;
use tracing::debug;

use crate::bins::Located;
use crate::geo::GeoPoint;

/// Orders `items` by the nearest-neighbour heuristic, starting from `start`.
///
/// Each step picks the closest unvisited item to the current position, taking
/// the earliest one in input order on ties. `start` is only a reference point
/// and never appears in the result, which is always a permutation of `items`.
/// Items whose distance is NaN are visited after every comparable one.
pub fn calculate_optimal_route<'a, T: Located>(items: &'a [T], start: &GeoPoint) -> Vec<&'a T> {
    let mut unvisited: Vec<&T> = items.iter().collect();
    let mut route = Vec::with_capacity(items.len());
    let mut current = *start;

    while !unvisited.is_empty() {
        // min_by_key keeps the first of equal minima; OrderedFloat sorts NaN last
        let Some((idx, _)) = unvisited
            .iter()
            .enumerate()
            .min_by_key(|(_, item)| OrderedFloat(current.distance_km(&item.location())))
        else {
            break;
        };
        let next = unvisited.remove(idx);
        current = next.location();
        route.push(next);
    }

    debug!(stops = route.len(), "routed");
    route
}

/// Total length of driving `route` from `start`, in kilometers.
pub fn route_length_km<T: Located>(start: &GeoPoint, route: &[T]) -> f64 {
    let mut current = *start;
    let mut total = 0.0;
    for stop in route {
        let next = stop.location();
        total += current.distance_km(&next);
        current = next;
    }
    total
}
