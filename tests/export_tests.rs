use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{add_via_cli, init_db, rbk, setup_test_db, temp_out};

fn seeded_db(name: &str) -> String {
    let db_path = setup_test_db(name);
    init_db(&db_path);
    add_via_cli(&db_path, "R-1", "2024-01-01T10:00", "Bistro", 2);
    add_via_cli(&db_path, "R-2", "2024-01-03T09:00", "Bistro", 4);
    rbk()
        .args(["--db", &db_path, "status", "R-1", "cancelled"])
        .assert()
        .success();
    db_path
}

#[test]
fn test_export_csv() {
    let db_path = seeded_db("export_csv");
    let out = temp_out("export_csv", "csv");

    rbk()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("CSV export completed: 2 reservation(s)"));

    let content = fs::read_to_string(&out).expect("read csv");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some(
            "reservation_id,datetime,business,party_size,customer_name,customer_email,contact_phone,table_number,notes,status"
        )
    );
    // newest first
    assert_eq!(lines.next(), Some("R-2,2024-01-03T09:00:00,Bistro,4,,,,,,confirmed"));
    assert_eq!(lines.next(), Some("R-1,2024-01-01T10:00:00,Bistro,2,,,,,,cancelled"));
}

#[test]
fn test_export_json_with_status_filter() {
    let db_path = seeded_db("export_json");
    let out = temp_out("export_json", "json");

    rbk()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out, "--status",
            "cancelled",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read json");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = parsed.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["reservation_id"], "R-1");
    assert_eq!(rows[0]["status"], "cancelled");
    assert_eq!(rows[0]["customer_name"], serde_json::Value::Null);
}

#[test]
fn test_export_force_overwrites() {
    let db_path = seeded_db("export_force");
    let out = temp_out("export_force", "json");
    fs::write(&out, "stale").unwrap();

    rbk()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out, "--force",
        ])
        .assert()
        .success();

    assert!(fs::read_to_string(&out).unwrap().contains("R-2"));
}

#[test]
fn test_export_refuses_overwrite_without_confirmation() {
    let db_path = seeded_db("export_no_force");
    let out = temp_out("export_no_force", "csv");
    fs::write(&out, "keep me").unwrap();

    rbk()
        .args(["--db", &db_path, "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("was not overwritten"));

    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");
}

#[test]
fn test_backup_compressed() {
    let db_path = seeded_db("backup_zip");
    let out = temp_out("backup_zip", "sqlite");
    let zip_path = out.replace(".sqlite", ".zip");
    fs::remove_file(&zip_path).ok();

    rbk()
        .args(["--db", &db_path, "backup", "--file", &out, "--compress"])
        .assert()
        .success()
        .stdout(contains("Compressed"));

    assert!(std::path::Path::new(&zip_path).exists());
    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_backup_logs_into_database_without_log_table() {
    let db_path = setup_test_db("backup_no_log");
    rusqlite::Connection::open(&db_path)
        .unwrap()
        .execute_batch(
            "CREATE TABLE reservations (
                reservation_id TEXT PRIMARY KEY,
                datetime TEXT NOT NULL,
                business TEXT NOT NULL,
                party_size INTEGER NOT NULL,
                customer_name TEXT,
                customer_email TEXT,
                contact_phone TEXT,
                table_number TEXT,
                notes TEXT,
                status TEXT NOT NULL DEFAULT 'confirmed'
             );",
        )
        .unwrap();
    let out = temp_out("backup_no_log", "sqlite");

    rbk()
        .args(["--db", &db_path, "backup", "--file", &out])
        .assert()
        .success()
        .stderr(contains("Failed to write internal log").not());

    let backups: i64 = rusqlite::Connection::open(&db_path)
        .unwrap()
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'backup'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(backups, 1);
}
