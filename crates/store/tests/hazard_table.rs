#![forbid(unsafe_code)]

use hb_core::{HazardReport, HazardType, Severity, Status};
use hb_store::{HazardStore, StoreError};
use std::path::PathBuf;

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = base.join(format!("hb_store_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn report(reported_by: &str, reported_at_ms: i64) -> HazardReport {
    HazardReport::try_new(
        19.0760,
        72.8777,
        HazardType::Fire,
        Severity::Critical,
        Status::Active,
        reported_by,
        reported_at_ms,
    )
    .expect("valid report")
}

#[test]
fn missing_file_loads_as_empty_table() {
    let store = HazardStore::open(temp_dir("missing_file_loads_as_empty_table")).expect("open");
    let table = store.load().expect("cold start is not an error");
    assert!(table.is_empty());
}

#[test]
fn save_then_load_round_trips_every_field() {
    let store = HazardStore::open(temp_dir("save_then_load_round_trips_every_field")).expect("open");
    let table = vec![
        report("Worker A", 1_700_000_000_123),
        HazardReport::try_new(
            0.0,
            0.0,
            HazardType::ChemicalLeak,
            Severity::Low,
            Status::Resolved,
            "Safety Officer",
            1_700_000_050_000,
        )
        .expect("valid report"),
    ];

    store.save(&table).expect("save");
    let loaded = store.load().expect("load");
    assert_eq!(loaded, table);
}

#[test]
fn reporter_text_with_commas_and_quotes_round_trips() {
    let store =
        HazardStore::open(temp_dir("reporter_text_with_commas_and_quotes_round_trips")).expect("open");
    let table = vec![report("Shift lead, \"night crew\"", 1_700_000_000_000)];

    store.save(&table).expect("save");
    let loaded = store.load().expect("load");
    assert_eq!(loaded, table);
}

#[test]
fn second_save_fully_replaces_the_table() {
    let store = HazardStore::open(temp_dir("second_save_fully_replaces_the_table")).expect("open");
    store
        .save(&[report("Worker A", 1), report("Worker B", 2)])
        .expect("first save");
    store.save(&[report("Worker C", 3)]).expect("second save");

    let loaded = store.load().expect("load");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].reported_by, "Worker C");
}

#[test]
fn saved_file_has_the_fixed_header_and_column_order() {
    let store =
        HazardStore::open(temp_dir("saved_file_has_the_fixed_header_and_column_order")).expect("open");
    store.save(&[report("Worker A", 0)]).expect("save");

    let text = std::fs::read_to_string(store.data_path()).expect("read file");
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("lat,lon,hazard_type,severity,status,reported_by,timestamp")
    );
    assert_eq!(
        lines.next(),
        Some("19.076,72.8777,Fire,Critical,Active,Worker A,1970-01-01T00:00:00Z")
    );
}

#[test]
fn high_precision_coordinates_round_trip_exactly() {
    let store =
        HazardStore::open(temp_dir("high_precision_coordinates_round_trip_exactly")).expect("open");
    let table = vec![
        HazardReport::try_new(
            19.07600005,
            72.87770000000001,
            HazardType::Fire,
            Severity::Critical,
            Status::Active,
            "Worker A",
            1_700_000_000_000,
        )
        .expect("valid report"),
    ];

    store.save(&table).expect("save");
    let loaded = store.load().expect("load");
    assert_eq!(loaded, table);
    assert_eq!(loaded[0].latitude, 19.07600005);
}

#[test]
fn wrong_header_is_corrupt() {
    let dir = temp_dir("wrong_header_is_corrupt");
    std::fs::write(dir.join("hazards.csv"), "lat,lon,kind\n").expect("write fixture");

    let store = HazardStore::open(&dir).expect("open");
    match store.load().unwrap_err() {
        StoreError::Corrupt { line, message } => {
            assert_eq!(line, 1);
            assert!(message.contains("expected columns"), "message: {message}");
        }
        other => panic!("expected Corrupt, got {other:?}"),
    }
}

#[test]
fn wrong_field_count_is_corrupt_with_line_number() {
    let dir = temp_dir("wrong_field_count_is_corrupt_with_line_number");
    std::fs::write(
        dir.join("hazards.csv"),
        "lat,lon,hazard_type,severity,status,reported_by,timestamp\n\
         19.076000,72.877700,Fire,Critical,Active,Worker A,2024-01-01T00:00:00Z\n\
         19.076000,72.877700,Fire\n",
    )
    .expect("write fixture");

    let store = HazardStore::open(&dir).expect("open");
    match store.load().unwrap_err() {
        StoreError::Corrupt { line, message } => {
            assert_eq!(line, 3);
            assert_eq!(message, "expected 7 fields, found 3");
        }
        other => panic!("expected Corrupt, got {other:?}"),
    }
}

#[test]
fn unparseable_timestamp_is_corrupt() {
    let dir = temp_dir("unparseable_timestamp_is_corrupt");
    std::fs::write(
        dir.join("hazards.csv"),
        "lat,lon,hazard_type,severity,status,reported_by,timestamp\n\
         19.076000,72.877700,Fire,Critical,Active,Worker A,yesterday\n",
    )
    .expect("write fixture");

    let store = HazardStore::open(&dir).expect("open");
    match store.load().unwrap_err() {
        StoreError::Corrupt { line, message } => {
            assert_eq!(line, 2);
            assert_eq!(message, "unparseable timestamp: yesterday");
        }
        other => panic!("expected Corrupt, got {other:?}"),
    }
}

#[test]
fn unknown_enum_text_is_corrupt() {
    let dir = temp_dir("unknown_enum_text_is_corrupt");
    std::fs::write(
        dir.join("hazards.csv"),
        "lat,lon,hazard_type,severity,status,reported_by,timestamp\n\
         19.076000,72.877700,Fire,critical,Active,Worker A,2024-01-01T00:00:00Z\n",
    )
    .expect("write fixture");

    let store = HazardStore::open(&dir).expect("open");
    match store.load().unwrap_err() {
        StoreError::Corrupt { line, message } => {
            assert_eq!(line, 2);
            assert_eq!(message, "unknown severity: critical");
        }
        other => panic!("expected Corrupt, got {other:?}"),
    }
}

#[test]
fn out_of_range_coordinate_in_file_is_corrupt() {
    let dir = temp_dir("out_of_range_coordinate_in_file_is_corrupt");
    std::fs::write(
        dir.join("hazards.csv"),
        "lat,lon,hazard_type,severity,status,reported_by,timestamp\n\
         95.000000,72.877700,Fire,Critical,Active,Worker A,2024-01-01T00:00:00Z\n",
    )
    .expect("write fixture");

    let store = HazardStore::open(&dir).expect("open");
    match store.load().unwrap_err() {
        StoreError::Corrupt { line, message } => {
            assert_eq!(line, 2);
            assert_eq!(message, "latitude 95 is outside [-90, 90]");
        }
        other => panic!("expected Corrupt, got {other:?}"),
    }
}

#[test]
fn blank_line_between_rows_is_corrupt() {
    let dir = temp_dir("blank_line_between_rows_is_corrupt");
    std::fs::write(
        dir.join("hazards.csv"),
        "lat,lon,hazard_type,severity,status,reported_by,timestamp\n\
         19.076,72.8777,Fire,Critical,Active,Worker A,2024-01-01T00:00:00Z\n\
         \n\
         19.076,72.8777,Fire,Critical,Active,Worker B,2024-01-01T00:00:00Z\n",
    )
    .expect("write fixture");

    let store = HazardStore::open(&dir).expect("open");
    match store.load().unwrap_err() {
        StoreError::Corrupt { line, message } => {
            assert_eq!(line, 3);
            assert_eq!(message, "blank line");
        }
        other => panic!("expected Corrupt, got {other:?}"),
    }
}

#[test]
fn no_temp_file_is_left_behind_after_save() {
    let dir = temp_dir("no_temp_file_is_left_behind_after_save");
    let store = HazardStore::open(&dir).expect("open");
    store.save(&[report("Worker A", 0)]).expect("save");

    let names: Vec<String> = std::fs::read_dir(&dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["hazards.csv".to_string()]);
}
