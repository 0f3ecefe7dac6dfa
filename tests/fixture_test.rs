use binroute::load::{read_bins_from_path, read_polygon_from_path, write_route};
use binroute::{
    bins_in_geofence, calculate_optimal_route, create_clusters, is_point_in_geofence,
    route_length_km, Bin, Cluster, GeoPoint,
};
use claims::assert_ok;

fn fixture_bins() -> Vec<Bin> {
    assert_ok!(read_bins_from_path("tests/fixtures/bins.csv"))
}

fn ids<'a>(bins: impl IntoIterator<Item = &'a Bin>) -> Vec<&'a str> {
    bins.into_iter().map(|b| b.id.as_str()).collect()
}

#[test]
fn clusters_berlin_neighbourhoods() {
    let bins = fixture_bins();
    assert_eq!(bins.len(), 9);

    let clusters = create_clusters(&bins, 0.5);
    let groups: Vec<Vec<&str>> = clusters.iter().map(|c| ids(c.members.iter().copied())).collect();
    assert_eq!(
        groups,
        vec![
            vec!["alex-01", "alex-02", "alex-03"],
            vec!["tier-01", "tier-02"],
            vec!["kreuz-01", "kreuz-02", "kreuz-03"],
            vec!["tempel-01"],
        ]
    );
    assert_eq!(clusters[2].center, GeoPoint::new(52.4990, 13.4180));
    assert_eq!(clusters.iter().map(Cluster::count).sum::<usize>(), bins.len());
}

#[test]
fn a_wide_radius_swallows_the_city() {
    let bins = fixture_bins();
    let clusters = create_clusters(&bins, 50.0);
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].count(), bins.len());
}

#[test]
fn zone_contains_only_central_bins() {
    let bins = fixture_bins();
    let polygon = assert_ok!(read_polygon_from_path("tests/fixtures/mitte.csv"));

    let inside = bins_in_geofence(&bins, &polygon);
    assert_eq!(
        ids(inside),
        vec!["alex-01", "alex-02", "alex-03", "tier-01", "tier-02"]
    );
    assert!(is_point_in_geofence(&GeoPoint::new(52.52, 13.40), &polygon));
    assert!(!is_point_in_geofence(&GeoPoint::new(48.14, 11.58), &polygon));
}

#[test]
fn route_from_the_southern_depot() {
    let bins = fixture_bins();
    let depot = GeoPoint::new(52.47, 13.40);

    let route = calculate_optimal_route(&bins, &depot);
    assert_eq!(
        ids(route.iter().copied()),
        vec![
            "tempel-01",
            "kreuz-03",
            "kreuz-01",
            "kreuz-02",
            "alex-03",
            "alex-01",
            "alex-02",
            "tier-02",
            "tier-01",
        ]
    );

    let total = route_length_km(&depot, &route);
    assert!(total > 5.0 && total < 10.0, "got {total}");

    let mut out = Vec::new();
    assert_ok!(write_route(&mut out, &depot, &route));
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), bins.len() + 1);
}
