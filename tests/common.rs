#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;
use tramreport::db::initialize::open_ready;
use tramreport::db::queries::replace_snapshot;
use tramreport::models::event::Event;
use tramreport::models::stop::Stop;

/// Unreachable backend: commands that must not hit the network use it.
pub const DEAD_API: &str = "http://127.0.0.1:9/v1/";

/// Private config home so tests never read or write the user's files.
pub fn test_home(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_tramreport_home", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create test home");
    path
}

pub fn trs(home: &PathBuf) -> Command {
    let mut cmd = cargo_bin_cmd!("tramreport");
    cmd.env("TRAMREPORT_HOME", home);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_tramreport.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn stop(id: &str, name: &str, headsigns: &str) -> Stop {
    Stop {
        id: id.into(),
        name: name.into(),
        latitude: 52.40,
        longitude: 16.92,
        zone: "A".into(),
        route_type: "3".into(),
        headsigns: headsigns.into(),
    }
}

pub fn event(id: &str, stop_id: &str, kind: &str, ts: i64) -> Event {
    Event {
        id: id.into(),
        stop_id: stop_id.into(),
        kind: kind.into(),
        description: format!("report {id}"),
        timestamp: ts,
        created_by: Some("u1".into()),
        likes: 0,
        dislikes: 0,
    }
}

/// A small Poznań snapshot: two tram stops, one bus stop, one mixed, one
/// without headsigns; reports on the bus stop and on an unknown stop.
pub fn sample_stops() -> Vec<Stop> {
    vec![
        stop("1", "Rondo Kaponiera", "4,8"),
        stop("2", "Sobieskiego", "148"),
        stop("3", "Most Dworcowy", "2,174"),
        stop("4", "Zajezdnia", ""),
        stop("5", "Bałtyk", "13"),
    ]
}

pub fn sample_events() -> Vec<Event> {
    vec![
        event("e1", "2", "Awaria", 1_717_000_000_000),
        event("e2", "404", "Kontrola biletów", 1_717_000_100_000),
    ]
}

/// Write the sample snapshot into the store at `db_path`.
pub fn seed_snapshot(db_path: &str) {
    let mut pool = open_ready(db_path).expect("open store");
    replace_snapshot(&mut pool, &sample_stops(), &sample_events()).expect("seed snapshot");
}
