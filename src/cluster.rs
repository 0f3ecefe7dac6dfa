use hashbrown::HashSet;
use tracing::debug;

use crate::bins::Located;
use crate::geo::GeoPoint;

/// A group of nearby items. `center` is the location of the seed that opened
/// the cluster, not a centroid.
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster<'a, T> {
    pub center: GeoPoint,
    pub members: Vec<&'a T>,
}

impl<T> Cluster<'_, T> {
    pub fn count(&self) -> usize {
        self.members.len()
    }
}

/// Greedy single-pass clustering.
///
/// Items are visited in input order. Each item not yet claimed seeds a new
/// cluster and pulls in every later unclaimed item within `radius_km` of it
/// (inclusive). Everything before the seed is already claimed, so this is the
/// same as scanning the whole list. O(n^2).
///
/// The seed is claimed before any distance check, so a seed whose location is
/// NaN (which never compares `<=` to anything) still gets a one-member cluster
/// rather than being dropped. Every item lands in exactly one cluster.
pub fn create_clusters<T: Located>(items: &[T], radius_km: f64) -> Vec<Cluster<'_, T>> {
    let mut claimed: HashSet<usize> = HashSet::with_capacity(items.len());
    let mut clusters = Vec::new();

    for (seed_idx, seed) in items.iter().enumerate() {
        if claimed.contains(&seed_idx) {
            continue;
        }
        claimed.insert(seed_idx);
        let center = seed.location();
        let mut members = vec![seed];
        for (idx, item) in items.iter().enumerate().skip(seed_idx + 1) {
            if claimed.contains(&idx) {
                continue;
            }
            if center.distance_km(&item.location()) <= radius_km {
                members.push(item);
                claimed.insert(idx);
            }
        }
        clusters.push(Cluster { center, members });
    }

    debug!(
        items = items.len(),
        clusters = clusters.len(),
        radius_km,
        "clustered"
    );
    clusters
}
