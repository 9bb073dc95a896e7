use chrono::{Duration, NaiveDate};
use rbooking::db::log::load_log;
use rbooking::db::queries::count_by_id;
use rbooking::errors::AppError;
use rbooking::models::{Insights, Reservation, ReservationUpdate, Status};

mod common;
use common::{dt, open_repo, sample};

fn count_rows(repo: &mut rbooking::ReservationRepository, id: &str) -> i64 {
    repo.pool()
        .with_conn(|conn| count_by_id(conn, id))
        .expect("count rows")
}

#[test]
fn add_then_list_returns_record_with_default_status() {
    let (_dir, mut repo) = open_repo();

    let r = Reservation::new("R-1", dt("2024-03-01T19:30"), "Trattoria da Mario", 4)
        .with_customer_name("Ada Lovelace")
        .with_customer_email("ada@example.com")
        .with_contact_phone("+39 333 1234567")
        .with_notes("window seat");

    repo.add(&r).unwrap();

    let all = repo.list_all().unwrap();
    assert_eq!(all, vec![r]);
    assert_eq!(all[0].status, Status::Confirmed);
    assert_eq!(all[0].table_number, None);
}

#[test]
fn add_keeps_explicit_status() {
    let (_dir, mut repo) = open_repo();

    let r = sample("R-1", "2024-03-01T19:30").with_status(Status::Cancelled);
    repo.add(&r).unwrap();

    assert_eq!(repo.get("R-1").unwrap(), Some(r));
}

#[test]
fn duplicate_identifier_is_rejected_and_store_unchanged() {
    let (_dir, mut repo) = open_repo();

    let first = sample("R-1", "2024-03-01T19:30");
    repo.add(&first).unwrap();

    let clash = Reservation::new("R-1", dt("2024-04-01T12:00"), "Other place", 9);
    let err = repo.add(&clash).unwrap_err();
    assert!(
        matches!(&err, AppError::DuplicateIdentifier(id) if id == "R-1"),
        "unexpected error: {err:?}"
    );

    assert_eq!(count_rows(&mut repo, "R-1"), 1);
    assert_eq!(repo.list_all().unwrap(), vec![first]);

    // the rolled back insert left no audit row behind
    let adds = repo
        .pool()
        .with_conn(|conn| load_log(conn))
        .unwrap()
        .into_iter()
        .filter(|e| e.operation == "add")
        .count();
    assert_eq!(adds, 1);
}

#[test]
fn empty_identifier_is_rejected() {
    let (_dir, mut repo) = open_repo();

    let err = repo.add(&sample("  ", "2024-03-01T19:30")).unwrap_err();
    assert!(matches!(err, AppError::InvalidField(f) if f == "reservation_id"));
    assert!(repo.list_all().unwrap().is_empty());
}

#[test]
fn update_status_changes_only_status() {
    let (_dir, mut repo) = open_repo();

    let r = sample("R-1", "2024-03-01T19:30").with_table_number("T4");
    repo.add(&r).unwrap();
    repo.add(&sample("R-2", "2024-03-02T19:30")).unwrap();

    assert!(repo.update_status("R-1", Status::Cancelled).unwrap());

    let stored = repo.get("R-1").unwrap().unwrap();
    assert_eq!(stored, r.with_status(Status::Cancelled));
    assert_eq!(
        repo.get("R-2").unwrap().unwrap().status,
        Status::Confirmed
    );
}

#[test]
fn update_status_can_restore_confirmed() {
    let (_dir, mut repo) = open_repo();
    repo.add(&sample("R-1", "2024-03-01T19:30")).unwrap();

    assert!(repo.update_status("R-1", Status::Cancelled).unwrap());
    assert!(repo.update_status("R-1", Status::Confirmed).unwrap());
    assert_eq!(repo.get("R-1").unwrap().unwrap().status, Status::Confirmed);
}

#[test]
fn update_status_on_unknown_id_returns_false() {
    let (_dir, mut repo) = open_repo();
    repo.add(&sample("R-1", "2024-03-01T19:30")).unwrap();
    let before = repo.list_all().unwrap();

    assert!(!repo.update_status("missing", Status::Cancelled).unwrap());
    assert_eq!(repo.list_all().unwrap(), before);
}

#[test]
fn update_reservation_forces_updated_status() {
    let (_dir, mut repo) = open_repo();

    let r = sample("R-1", "2024-03-01T19:30").with_customer_name("Ada");
    repo.add(&r).unwrap();

    let upd = ReservationUpdate::new().party_size(6);
    assert!(repo.update_reservation("R-1", &upd).unwrap());

    let stored = repo.get("R-1").unwrap().unwrap();
    assert_eq!(stored.party_size, 6);
    assert_eq!(stored.status, Status::Updated);
    assert_eq!(stored.customer_name.as_deref(), Some("Ada"));
    assert_eq!(stored.datetime, r.datetime);
    assert_eq!(stored.business, r.business);
}

#[test]
fn update_reservation_from_string_pairs() {
    let (_dir, mut repo) = open_repo();
    repo.add(&sample("R-1", "2024-03-01T19:30")).unwrap();

    let upd = ReservationUpdate::from_pairs([
        ("datetime", "2024-03-05 20:00"),
        ("table_number", "12"),
    ])
    .unwrap();
    assert!(repo.update_reservation("R-1", &upd).unwrap());

    let stored = repo.get("R-1").unwrap().unwrap();
    assert_eq!(stored.datetime, dt("2024-03-05T20:00"));
    assert_eq!(stored.table_number.as_deref(), Some("12"));
    assert_eq!(stored.status, Status::Updated);
}

#[test]
fn empty_update_returns_false_without_mutation() {
    let (_dir, mut repo) = open_repo();
    let r = sample("R-1", "2024-03-01T19:30");
    repo.add(&r).unwrap();

    assert!(!repo.update_reservation("R-1", &ReservationUpdate::new()).unwrap());
    assert_eq!(repo.get("R-1").unwrap(), Some(r));
}

#[test]
fn update_reservation_on_unknown_id_returns_false() {
    let (_dir, mut repo) = open_repo();
    repo.add(&sample("R-1", "2024-03-01T19:30")).unwrap();

    let upd = ReservationUpdate::new().notes("late arrival");
    assert!(!repo.update_reservation("nope", &upd).unwrap());
    assert_eq!(repo.get("R-1").unwrap().unwrap().status, Status::Confirmed);
}

#[test]
fn unknown_update_key_is_rejected_before_storage() {
    let (_dir, mut repo) = open_repo();
    let r = sample("R-1", "2024-03-01T19:30");
    repo.add(&r).unwrap();

    let err = ReservationUpdate::from_pairs([("party_size", "3"), ("colour", "red")]).unwrap_err();
    assert!(matches!(err, AppError::InvalidField(k) if k == "colour"));
    assert_eq!(repo.get("R-1").unwrap(), Some(r));
}

#[test]
fn list_all_orders_by_datetime_descending() {
    let (_dir, mut repo) = open_repo();

    repo.add(&sample("A", "2024-01-01T10:00")).unwrap();
    repo.add(&sample("B", "2024-01-03T09:00")).unwrap();
    repo.add(&sample("C", "2024-01-02T12:00")).unwrap();

    let ids: Vec<String> = repo
        .list_all()
        .unwrap()
        .into_iter()
        .map(|r| r.reservation_id)
        .collect();
    assert_eq!(ids, ["B", "C", "A"]);
}

#[test]
fn mixed_input_formats_still_sort_chronologically() {
    let (_dir, mut repo) = open_repo();

    repo.add(&sample("late", "2024-01-01 21:00")).unwrap();
    repo.add(&sample("early", "2024-01-01T09:05:30")).unwrap();

    let ids: Vec<String> = repo
        .list_all()
        .unwrap()
        .into_iter()
        .map(|r| r.reservation_id)
        .collect();
    assert_eq!(ids, ["late", "early"]);
}

#[test]
fn insights_count_by_status_and_day() {
    let (_dir, mut repo) = open_repo();
    let day = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

    repo.add(&sample("A", "2024-06-15T12:00")).unwrap();
    repo.add(&sample("B", "2024-06-10T20:00")).unwrap();
    // midnight of the next day is outside the range
    repo.add(&sample("C", "2024-06-16T00:00").with_status(Status::Cancelled))
        .unwrap();

    assert_eq!(
        repo.insights_on(day).unwrap(),
        Insights {
            total: 3,
            confirmed: 2,
            cancelled: 1,
            today_reservations: 1,
        }
    );
}

#[test]
fn insights_ignore_updated_rows_in_status_counts() {
    let (_dir, mut repo) = open_repo();
    repo.add(&sample("A", "2024-06-15T12:00")).unwrap();
    repo.update_reservation("A", &ReservationUpdate::new().party_size(3))
        .unwrap();

    let i = repo
        .insights_on(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        .unwrap();
    assert_eq!((i.total, i.confirmed, i.cancelled, i.today_reservations), (1, 0, 0, 1));
}

#[test]
fn insights_use_local_today() {
    let (_dir, mut repo) = open_repo();

    let now = chrono::Local::now().naive_local();
    let today_noon = now.date().and_hms_opt(12, 0, 0).unwrap();
    let last_week = today_noon - Duration::days(7);

    repo.add(&Reservation::new("T", today_noon, "Bistro", 2)).unwrap();
    repo.add(&Reservation::new("W", last_week, "Bistro", 2)).unwrap();

    let i = repo.insights().unwrap();
    assert_eq!(i.total, 2);
    assert_eq!(i.today_reservations, 1);
}

#[test]
fn insights_on_empty_store_are_zero() {
    let (_dir, mut repo) = open_repo();
    assert_eq!(repo.insights().unwrap(), Insights::default());
}

#[test]
fn writes_leave_an_audit_trail() {
    let (_dir, mut repo) = open_repo();
    repo.add(&sample("R-1", "2024-03-01T19:30")).unwrap();
    repo.update_status("R-1", Status::Cancelled).unwrap();
    repo.update_reservation("R-1", &ReservationUpdate::new().notes("moved"))
        .unwrap();
    // no-ops are not logged
    repo.update_status("missing", Status::Cancelled).unwrap();

    let ops: Vec<(String, String)> = repo
        .pool()
        .with_conn(|conn| load_log(conn))
        .unwrap()
        .into_iter()
        .filter(|e| e.operation != "migration_applied")
        .map(|e| (e.operation, e.target))
        .collect();

    assert_eq!(
        ops,
        [
            ("add".to_string(), "R-1".to_string()),
            ("status".to_string(), "R-1".to_string()),
            ("edit".to_string(), "R-1".to_string()),
        ]
    );
}
