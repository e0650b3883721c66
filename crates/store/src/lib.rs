#![forbid(unsafe_code)]

mod csv;
mod error;

pub use error::StoreError;

use csv::{CsvError, CsvRecord, push_field, split_records};
use hb_core::{HazardReport, HazardType, Severity, Status};
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

const DATA_FILE_NAME: &str = "hazards.csv";
const COLUMNS: [&str; 7] = [
    "lat",
    "lon",
    "hazard_type",
    "severity",
    "status",
    "reported_by",
    "timestamp",
];

/// File-backed store for the hazard-report table. One process, one
/// writer: overlapping `save` calls are last-writer-wins and nothing
/// here detects the race.
#[derive(Debug)]
pub struct HazardStore {
    data_path: PathBuf,
}

impl HazardStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;
        Ok(Self {
            data_path: storage_dir.join(DATA_FILE_NAME),
        })
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Reads the full table. A missing file is the expected cold-start
    /// state and yields an empty table; anything malformed in an existing
    /// file is `StoreError::Corrupt` with the offending line.
    pub fn load(&self) -> Result<Vec<HazardReport>, StoreError> {
        let text = match std::fs::read_to_string(&self.data_path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::Io(err)),
        };
        parse_table(&text)
    }

    /// Serializes the full table and replaces the file. The write goes to
    /// a temp file in the same directory first and lands via rename, so a
    /// concurrent `load` sees either the old table or the new one, never
    /// a partial write.
    pub fn save(&self, reports: &[HazardReport]) -> Result<(), StoreError> {
        let mut out = String::new();
        out.push_str(&COLUMNS.join(","));
        out.push('\n');
        for report in reports {
            write_record(&mut out, report);
        }

        let tmp_path = self.data_path.with_extension("csv.tmp");
        std::fs::write(&tmp_path, out.as_bytes())?;
        std::fs::rename(&tmp_path, &self.data_path)?;
        Ok(())
    }
}

fn parse_table(text: &str) -> Result<Vec<HazardReport>, StoreError> {
    let records = split_records(text).map_err(corrupt_csv)?;
    let mut rows = records.into_iter();

    let Some(header) = rows.next() else {
        return Err(StoreError::Corrupt {
            line: 1,
            message: "missing header row".to_string(),
        });
    };
    if header.fields != COLUMNS {
        return Err(StoreError::Corrupt {
            line: header.line,
            message: format!(
                "expected columns {}, found {}",
                COLUMNS.join(","),
                header.fields.join(",")
            ),
        });
    }

    let mut reports = Vec::new();
    for record in rows {
        reports.push(parse_row(&record)?);
    }
    Ok(reports)
}

fn parse_row(record: &CsvRecord) -> Result<HazardReport, StoreError> {
    let line = record.line;
    let fields = &record.fields;
    if fields.len() != COLUMNS.len() {
        return Err(StoreError::Corrupt {
            line,
            message: format!("expected {} fields, found {}", COLUMNS.len(), fields.len()),
        });
    }

    let latitude = parse_decimal(&fields[0], "latitude", line)?;
    let longitude = parse_decimal(&fields[1], "longitude", line)?;
    let hazard_type = HazardType::parse(&fields[2]).ok_or_else(|| StoreError::Corrupt {
        line,
        message: format!("unknown hazard type: {}", fields[2]),
    })?;
    let severity = Severity::parse(&fields[3]).ok_or_else(|| StoreError::Corrupt {
        line,
        message: format!("unknown severity: {}", fields[3]),
    })?;
    let status = Status::parse(&fields[4]).ok_or_else(|| StoreError::Corrupt {
        line,
        message: format!("unknown status: {}", fields[4]),
    })?;
    let reported_at_ms = parse_rfc3339_ms(&fields[6]).ok_or_else(|| StoreError::Corrupt {
        line,
        message: format!("unparseable timestamp: {}", fields[6]),
    })?;

    HazardReport::try_new(
        latitude,
        longitude,
        hazard_type,
        severity,
        status,
        fields[5].as_str(),
        reported_at_ms,
    )
    .map_err(|err| StoreError::Corrupt {
        line,
        message: err.to_string(),
    })
}

fn parse_decimal(text: &str, column: &str, line: usize) -> Result<f64, StoreError> {
    text.parse::<f64>().map_err(|_| StoreError::Corrupt {
        line,
        message: format!("{column} is not a number: {text}"),
    })
}

fn write_record(out: &mut String, report: &HazardReport) {
    // Default float formatting is the shortest text that parses back to
    // the same f64, so coordinates survive a save/load cycle exactly.
    push_field(out, &report.latitude.to_string());
    out.push(',');
    push_field(out, &report.longitude.to_string());
    out.push(',');
    push_field(out, report.hazard_type.as_str());
    out.push(',');
    push_field(out, report.severity.as_str());
    out.push(',');
    push_field(out, report.status.as_str());
    out.push(',');
    push_field(out, &report.reported_by);
    out.push(',');
    push_field(out, &ts_ms_to_rfc3339(report.reported_at_ms));
    out.push('\n');
}

fn corrupt_csv(err: CsvError) -> StoreError {
    StoreError::Corrupt {
        line: err.line,
        message: err.message.to_string(),
    }
}

pub fn ts_ms_to_rfc3339(ts_ms: i64) -> String {
    let nanos = (ts_ms as i128) * 1_000_000i128;
    let dt = OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or(OffsetDateTime::UNIX_EPOCH);
    dt.format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}

pub(crate) fn parse_rfc3339_ms(text: &str) -> Option<i64> {
    let dt = OffsetDateTime::parse(text, &Rfc3339).ok()?;
    let ms = dt.unix_timestamp_nanos() / 1_000_000i128;
    i64::try_from(ms).ok()
}
