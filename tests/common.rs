#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDateTime;
use rbooking::ReservationRepository;
use rbooking::db::pool::DbPool;
use rbooking::models::Reservation;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub fn rbk() -> Command {
    let mut cmd = cargo_bin_cmd!("rbooking");
    cmd.env("RUST_LOG", "off");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rbooking.sqlite", name));
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

/// Initialize DB through the CLI (no config file written).
pub fn init_db(db_path: &str) {
    rbk()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Add a reservation through the CLI.
pub fn add_via_cli(db_path: &str, id: &str, datetime: &str, business: &str, party: u32) {
    rbk()
        .args([
            "--db",
            db_path,
            "add",
            "--id",
            id,
            "--datetime",
            datetime,
            "--business",
            business,
            "--party-size",
            &party.to_string(),
        ])
        .assert()
        .success();
}

pub fn dt(s: &str) -> NaiveDateTime {
    rbooking::utils::date::parse_datetime(s).expect("valid test datetime")
}

/// Repository over a fresh database file inside a temp dir.
/// Keep the `TempDir` alive for as long as the repository is used.
pub fn open_repo() -> (TempDir, ReservationRepository) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("reservations.sqlite");
    let pool = DbPool::new(&path.to_string_lossy()).expect("open db");
    let repo = ReservationRepository::with_pool(pool).expect("init repo");
    (dir, repo)
}

pub fn sample(id: &str, when: &str) -> Reservation {
    Reservation::new(id, dt(when), "Trattoria da Mario", 2)
}
