//! Greedy geo marker clustering tool
//!
//! Reads vessel pings from CSV files, groups them into render-ready map
//! clusters around a camera position, and writes one row per cluster.

use chrono::{DateTime, Utc};
use clap::Parser;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::path::PathBuf;

mod cluster;


use cluster::{CameraState, MarkerCluster, Ping, PingList, TimeWindow, cluster_markers};

#[derive(Parser)]
#[command(name = "marker_cluster")]
#[command(about = "Greedy geo marker clustering tool", long_about = None)]
struct Args {
    /// Input CSV file with latitude,longitude,timestamp,registered columns
    #[arg(short, long, default_value = "pings.csv")]
    input: PathBuf,

    /// Output CSV file with one row per cluster (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Camera latitude in degrees
    #[arg(long, default_value_t = 0.0)]
    camera_lat: f64,

    /// Camera longitude in degrees
    #[arg(long, default_value_t = 0.0)]
    camera_lng: f64,

    /// Camera altitude, a zoom proxy (larger = more zoomed out)
    #[arg(short, long, default_value_t = 1.0)]
    altitude: f64,

    /// Keep only pings recorded at or after this RFC 3339 instant
    #[arg(long)]
    since: Option<DateTime<Utc>>,

    /// Keep only pings recorded at or before this RFC 3339 instant
    #[arg(long)]
    until: Option<DateTime<Utc>>,

    /// Show pings from unregistered vessels
    #[arg(long)]
    show_restricted: bool,

    /// Disable distance culling around the camera position
    #[arg(long)]
    no_culling: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    // Read pings and CSV records from file (read once, reuse for output)
    let (pings, csv_records, header) = match read_pings_and_csv(&args.input) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error reading CSV: {}", e);
            std::process::exit(1);
        }
    };

    if pings.is_empty() {
        eprintln!("No pings found in CSV file");
        std::process::exit(1);
    }

    let camera = CameraState {
        latitude: args.camera_lat,
        longitude: args.camera_lng,
        altitude: args.altitude,
    };
    let window = TimeWindow {
        start: args.since.unwrap_or(DateTime::<Utc>::MIN_UTC),
        end: args.until.unwrap_or(DateTime::<Utc>::MAX_UTC),
    };

    if args.debug {
        println!("Read {} pings from {:?}", pings.len(), args.input);
        println!(
            "Clustering at altitude {:.4}, camera ({:.4}, {:.4}), culling {}",
            args.altitude,
            args.camera_lat,
            args.camera_lng,
            if args.no_culling { "off" } else { "on" }
        );
    }

    let clusters = cluster_markers(
        &pings,
        &camera,
        &window,
        args.show_restricted,
        !args.no_culling,
    );

    if args.debug {
        let singletons = clusters.iter().filter(|c| c.member_count() == 1).count();
        println!("Found {} clusters", clusters.len());
        println!("Found {} singleton markers", singletons);
    }

    // Write clusters to output (stdout or file)
    match args.output {
        None => {
            if let Err(e) = write_clusters_to_stdout(&clusters) {
                eprintln!("Error writing to stdout: {}", e);
                std::process::exit(1);
            }
        }
        Some(output_file) => {
            if let Err(e) = write_clusters_to_csv(
                &output_file,
                &clusters,
                &pings,
                &csv_records,
                header.as_deref(),
            ) {
                eprintln!("Error writing CSV: {}", e);
                std::process::exit(1);
            }
            if args.debug {
                println!("Clusters written to {:?}", output_file);
            }
        }
    }
}

/// CSV records type alias for readability
type CsvRecords = Vec<Vec<String>>;

/// Reads pings and their raw CSV records from a file in a single pass
///
/// Expected format: `latitude,longitude,timestamp,registered[,payload...]`
/// (header row is optional, timestamps are RFC 3339). Rows that fail to
/// parse are skipped.
///
/// # Returns
///
/// A tuple `(pings, records, header)` where:
/// - `pings` are parsed pings for clustering
/// - `records` are the raw rows backing each ping, index-aligned with it,
///   so payload columns survive to the output
/// - `header` is the header row when the file has one
fn read_pings_and_csv(
    filename: &PathBuf,
) -> Result<(PingList, CsvRecords, Option<Vec<String>>), Box<dyn std::error::Error>> {
    let file = File::open(filename)?;
    let mut reader = ReaderBuilder::new().has_headers(false).from_reader(file);

    let mut rows: CsvRecords = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    if rows.is_empty() {
        return Ok((PingList::new(), Vec::new(), None));
    }

    // Determine if first row is header
    let has_header = rows[0][0].parse::<f64>().is_err();
    let header = if has_header { Some(rows[0].clone()) } else { None };
    let start_idx = usize::from(has_header);

    let mut pings = PingList::new();
    let mut records = Vec::new();

    for row in rows.into_iter().skip(start_idx) {
        if row.len() < 4 {
            continue;
        }

        let lat = row[0].parse::<f64>();
        let lng = row[1].parse::<f64>();
        let recorded_at = row[2].parse::<DateTime<Utc>>();
        let registered = parse_registered(&row[3]);
        if let (Ok(lat), Ok(lng), Ok(recorded_at), Some(registered)) =
            (lat, lng, recorded_at, registered)
        {
            pings.push(Ping {
                latitude: lat,
                longitude: lng,
                recorded_at,
                registered,
            });
            records.push(row);
        }
    }

    Ok((pings, records, header))
}

/// Parses the registered column, accepting `true`/`false` and `1`/`0`
fn parse_registered(s: &str) -> Option<bool> {
    match s.trim() {
        "1" => Some(true),
        "0" => Some(false),
        other => other.parse::<bool>().ok(),
    }
}

/// Finds the member whose coordinates the cluster reports as representative
///
/// Representative coordinates are copied verbatim from a member, so exact
/// comparison is safe here.
fn representative_member(cluster: &MarkerCluster, pings: &PingList) -> usize {
    cluster
        .members
        .iter()
        .copied()
        .find(|&i| pings[i].latitude == cluster.latitude && pings[i].longitude == cluster.longitude)
        .unwrap_or(cluster.members[0])
}

/// Writes one row per cluster to the output CSV
///
/// Columns: representative latitude/longitude, member count, registered
/// class, nearest internal distance, then the representative member's
/// payload columns (anything past the four parsed ones).
fn write_clusters_to_csv(
    output_file: &PathBuf,
    clusters: &[MarkerCluster],
    pings: &PingList,
    csv_records: &CsvRecords,
    header: Option<&[String]>,
) -> Result<(), Box<dyn std::error::Error>> {
    let out_file = File::create(output_file)?;
    let mut writer = WriterBuilder::new().from_writer(out_file);

    if let Some(header) = header {
        let mut out_header = vec![
            "latitude".to_string(),
            "longitude".to_string(),
            "member_count".to_string(),
            "registered".to_string(),
            "nearest_internal_km".to_string(),
        ];
        out_header.extend(header.iter().skip(4).cloned());
        writer.write_record(&out_header)?;
    }

    for cluster in clusters {
        let rep = representative_member(cluster, pings);
        let mut row = vec![
            cluster.latitude.to_string(),
            cluster.longitude.to_string(),
            cluster.member_count().to_string(),
            cluster.registered.to_string(),
            cluster.nearest_internal_km.to_string(),
        ];
        row.extend(csv_records[rep].iter().skip(4).cloned());
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes clusters to stdout as a simple list
///
/// Format: `latitude,longitude,member_count,registered,nearest_internal_km`
/// (one cluster per line)
fn write_clusters_to_stdout(
    clusters: &[MarkerCluster],
) -> Result<(), Box<dyn std::error::Error>> {
    for cluster in clusters {
        println!(
            "{},{},{},{},{}",
            cluster.latitude,
            cluster.longitude,
            cluster.member_count(),
            cluster.registered,
            cluster.nearest_internal_km
        );
    }
    Ok(())
}
