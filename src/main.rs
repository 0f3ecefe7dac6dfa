use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use binroute::{geo, load, Bin, GeoPoint};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "binroute")]
#[command(about = "Cluster, geofence and route waste bins read from CSV.", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Great-circle distance between two points, in km
    Distance {
        /// Origin as `lat,lng`
        #[arg(long, allow_hyphen_values = true)]
        from: GeoPoint,

        /// Destination as `lat,lng`
        #[arg(long, allow_hyphen_values = true)]
        to: GeoPoint,
    },

    /// Group bins that lie within a radius of a seed bin
    Cluster {
        /// Bins CSV (id,latitude,longitude)
        #[arg(short, long)]
        bins: PathBuf,

        /// Cluster radius in km
        #[arg(short, long)]
        radius_km: f64,

        /// Output CSV (cluster, center, bin_id). If omitted, prints a summary to stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Order bins into a nearest-neighbour collection route
    Route {
        /// Bins CSV (id,latitude,longitude)
        #[arg(short, long)]
        bins: PathBuf,

        /// Depot or vehicle position as `lat,lng`
        #[arg(short, long, allow_hyphen_values = true)]
        start: GeoPoint,

        /// Output CSV (stop, bin_id, position, leg_km). If omitted, prints a summary to stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// List the bins inside a zone boundary
    Geofence {
        /// Bins CSV (id,latitude,longitude)
        #[arg(short, long)]
        bins: PathBuf,

        /// Boundary CSV (latitude,longitude), one vertex per row
        #[arg(short, long)]
        polygon: PathBuf,

        /// Output CSV (bin_id). If omitted, prints a summary to stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_bins(path: &Path) -> Result<Vec<Bin>> {
    load::read_bins_from_path(path).with_context(|| format!("reading bins from {}", path.display()))
}

fn create_out(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("creating CSV {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Distance { from, to } => {
            println!("{:.3}", from.distance_km(&to));
        }

        Command::Cluster {
            bins: bins_path,
            radius_km,
            out,
        } => {
            let bins = read_bins(&bins_path)?;
            let clusters = binroute::create_clusters(&bins, radius_km);
            info!(bins = bins.len(), clusters = clusters.len(), "clustered bins");

            if let Some(out_path) = out {
                load::write_clusters(create_out(&out_path)?, &clusters)
                    .with_context(|| format!("writing {}", out_path.display()))?;
                println!(
                    "Wrote {} clusters to {}",
                    clusters.len(),
                    out_path.display()
                );
            } else {
                println!("Bins: {}", bins.len());
                println!("Clusters within {} km: {}", radius_km, clusters.len());
                if let Some(largest) = clusters.iter().max_by_key(|c| c.count()) {
                    println!(
                        "Largest cluster: {} bins around {}",
                        largest.count(),
                        largest.center
                    );
                }
            }
        }

        Command::Route {
            bins: bins_path,
            start,
            out,
        } => {
            let bins = read_bins(&bins_path)?;
            let route = binroute::calculate_optimal_route(&bins, &start);
            let total_km = binroute::route_length_km(&start, &route);
            info!(stops = route.len(), total_km, "routed bins");

            if let Some(out_path) = out {
                load::write_route(create_out(&out_path)?, &start, &route)
                    .with_context(|| format!("writing {}", out_path.display()))?;
                println!("Wrote {} stops to {}", route.len(), out_path.display());
            } else {
                println!("Stops: {}", route.len());
                println!("Total distance (km): {:.2}", total_km);
                if let (Some(first), Some(last)) = (route.first(), route.last()) {
                    println!("First stop: {}, last stop: {}", first.id, last.id);
                }
            }
        }

        Command::Geofence {
            bins: bins_path,
            polygon: polygon_path,
            out,
        } => {
            let bins = read_bins(&bins_path)?;
            let polygon = load::read_polygon_from_path(&polygon_path)
                .with_context(|| format!("reading polygon from {}", polygon_path.display()))?;
            let inside = geo::bins_in_geofence(&bins, &polygon);
            info!(bins = bins.len(), inside = inside.len(), "filtered bins by zone");

            if let Some(out_path) = out {
                load::write_bin_ids(create_out(&out_path)?, &inside)
                    .with_context(|| format!("writing {}", out_path.display()))?;
                println!("Wrote {} bin ids to {}", inside.len(), out_path.display());
            } else {
                println!("Bins: {}", bins.len());
                println!("Inside zone ({} vertices): {}", polygon.len(), inside.len());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use claims::{assert_err, assert_ok};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn route_accepts_a_southern_hemisphere_start() {
        let cli = assert_ok!(Cli::try_parse_from([
            "binroute", "route", "-b", "x.csv", "--start", "-33.9,151.2",
        ]));
        assert!(!cli.verbose);
        match cli.command {
            Command::Route { bins, start, out } => {
                assert_eq!(bins, PathBuf::from("x.csv"));
                assert_eq!(start, GeoPoint::new(-33.9, 151.2));
                assert_eq!(out, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cluster_short_flags_and_global_verbose() {
        let cli = assert_ok!(Cli::try_parse_from([
            "binroute", "cluster", "-b", "bins.csv", "-r", "0.5", "-o", "out.csv", "-v",
        ]));
        assert!(cli.verbose);
        match cli.command {
            Command::Cluster {
                bins,
                radius_km,
                out,
            } => {
                assert_eq!(bins, PathBuf::from("bins.csv"));
                assert_eq!(radius_km, 0.5);
                assert_eq!(out, Some(PathBuf::from("out.csv")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn geofence_takes_a_polygon_file() {
        let cli = assert_ok!(Cli::try_parse_from([
            "binroute", "geofence", "-b", "bins.csv", "-p", "zone.csv",
        ]));
        match cli.command {
            Command::Geofence { bins, polygon, out } => {
                assert_eq!(bins, PathBuf::from("bins.csv"));
                assert_eq!(polygon, PathBuf::from("zone.csv"));
                assert_eq!(out, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn distance_parses_both_points() {
        let cli = assert_ok!(Cli::try_parse_from([
            "binroute", "distance", "--from", "52.52,13.405", "--to", "-0.5,-78.2",
        ]));
        match cli.command {
            Command::Distance { from, to } => {
                assert_eq!(from, GeoPoint::new(52.52, 13.405));
                assert_eq!(to, GeoPoint::new(-0.5, -78.2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn malformed_coordinates_are_a_usage_error() {
        assert_err!(Cli::try_parse_from([
            "binroute", "distance", "--from", "north,east", "--to", "0,0",
        ]));
        assert_err!(Cli::try_parse_from([
            "binroute", "route", "-b", "x.csv", "--start", "52.52",
        ]));
    }

    #[test]
    fn subcommand_is_required() {
        assert_err!(Cli::try_parse_from(["binroute"]));
    }
}
