use std::fs::File;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, Writer, WriterBuilder};
use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bins::{Bin, Located};
use crate::cluster::Cluster;
use crate::error::{Error, Result};
use crate::geo::GeoPoint;

#[derive(Debug, Deserialize)]
struct BinRow {
    id: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Serialize)]
struct ClusterRow<'a> {
    cluster: usize,
    center_latitude: f64,
    center_longitude: f64,
    bin_id: &'a str,
}

#[derive(Debug, Serialize)]
struct RouteRow<'a> {
    stop: usize,
    bin_id: &'a str,
    latitude: f64,
    longitude: f64,
    leg_km: f64,
}

#[derive(Debug, Serialize)]
struct IdRow<'a> {
    bin_id: &'a str,
}

/// Reads `id,latitude,longitude` rows. Extra columns are ignored; ids must be unique.
pub fn read_bins<R: io::Read>(reader: R) -> Result<Vec<Bin>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut seen: FnvHashSet<String> = FnvHashSet::default();
    let mut bins = Vec::new();
    for result in rdr.deserialize() {
        let row: BinRow = result?;
        if !seen.insert(row.id.clone()) {
            return Err(Error::DuplicateBinId(row.id));
        }
        bins.push(Bin::new(row.id, row.latitude, row.longitude));
    }
    debug!(bins = bins.len(), "read bins");
    Ok(bins)
}

pub fn read_bins_from_path(path: impl AsRef<Path>) -> Result<Vec<Bin>> {
    read_bins(File::open(path)?)
}

/// Reads `latitude,longitude` vertex rows in boundary order.
pub fn read_polygon<R: io::Read>(reader: R) -> Result<Vec<GeoPoint>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let polygon = rdr.deserialize().collect::<Result<Vec<GeoPoint>, _>>()?;
    debug!(vertices = polygon.len(), "read polygon");
    Ok(polygon)
}

pub fn read_polygon_from_path(path: impl AsRef<Path>) -> Result<Vec<GeoPoint>> {
    read_polygon(File::open(path)?)
}

const CLUSTER_HEADER: [&str; 4] = ["cluster", "center_latitude", "center_longitude", "bin_id"];
const ROUTE_HEADER: [&str; 5] = ["stop", "bin_id", "latitude", "longitude", "leg_km"];
const ID_HEADER: [&str; 1] = ["bin_id"];

/// A writer whose header row is already out, so empty outputs still carry one.
fn writer_with_header<W: io::Write>(writer: W, header: &[&str]) -> Result<Writer<W>> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(header)?;
    Ok(wtr)
}

/// One row per member: `cluster,center_latitude,center_longitude,bin_id`.
pub fn write_clusters<W: io::Write>(writer: W, clusters: &[Cluster<'_, Bin>]) -> Result<()> {
    let mut wtr = writer_with_header(writer, &CLUSTER_HEADER)?;
    for (idx, cluster) in clusters.iter().enumerate() {
        for bin in &cluster.members {
            wtr.serialize(ClusterRow {
                cluster: idx,
                center_latitude: cluster.center.latitude,
                center_longitude: cluster.center.longitude,
                bin_id: &bin.id,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// One row per stop, numbered from 1, with the distance from the previous stop.
pub fn write_route<W: io::Write>(writer: W, start: &GeoPoint, route: &[&Bin]) -> Result<()> {
    let mut wtr = writer_with_header(writer, &ROUTE_HEADER)?;
    let mut current = *start;
    for (idx, bin) in route.iter().enumerate() {
        let location = bin.location();
        wtr.serialize(RouteRow {
            stop: idx + 1,
            bin_id: &bin.id,
            latitude: location.latitude,
            longitude: location.longitude,
            leg_km: current.distance_km(&location),
        })?;
        current = location;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_bin_ids<W: io::Write>(writer: W, bins: &[&Bin]) -> Result<()> {
    let mut wtr = writer_with_header(writer, &ID_HEADER)?;
    for bin in bins {
        wtr.serialize(IdRow { bin_id: &bin.id })?;
    }
    wtr.flush()?;
    Ok(())
}
