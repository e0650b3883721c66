#![forbid(unsafe_code)]

mod state;

pub use state::DashboardState;

use hb_core::{HazardReport, ReportForm, ValidationError, summarize, validate};
use hb_store::{HazardStore, StoreError};
use serde::Deserialize;
use std::path::Path;
use time::OffsetDateTime;

/// A submission exactly as the form hands it over: enum fields still
/// text, coordinates optional because the inputs may be left blank.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ReportPayload {
    pub hazard_type: String,
    pub severity: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub reported_by: String,
}

impl ReportPayload {
    fn to_form(&self) -> ReportForm {
        ReportForm {
            hazard_type: self.hazard_type.clone(),
            severity: self.severity.clone(),
            latitude: self.lat,
            longitude: self.lon,
            reported_by: self.reported_by.clone(),
        }
    }
}

#[derive(Debug)]
pub enum SubmitError {
    Validation(ValidationError),
    Store(StoreError),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "validation: {err}"),
            Self::Store(err) => write!(f, "store: {err}"),
        }
    }
}

impl std::error::Error for SubmitError {}

impl From<ValidationError> for SubmitError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for SubmitError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Entry point for the Presentation Layer: `submit` on form submission,
/// `dashboard_state` on every render cycle.
///
/// The last-loaded table is cached here, in the caller-visible owner,
/// and dropped explicitly after every save; nothing else refreshes it.
/// With no locking on the backing file, two overlapping submits are
/// last-writer-wins.
#[derive(Debug)]
pub struct Dashboard {
    store: HazardStore,
    cached: Option<Vec<HazardReport>>,
}

impl Dashboard {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self {
            store: HazardStore::open(storage_dir)?,
            cached: None,
        })
    }

    /// Validates the payload, appends the record and persists the table.
    /// A validation failure returns before anything touches the file; the
    /// payload is only borrowed, so the form keeps its state for
    /// correction.
    pub fn submit(&mut self, payload: &ReportPayload) -> Result<(), SubmitError> {
        let report = validate(&payload.to_form(), now_ms())?;

        let mut table = self.table()?.to_vec();
        table.push(report);

        // Invalidate before the write: if the save fails midway the file
        // state is unknown and the next read must come from disk.
        self.cached = None;
        self.store.save(&table)?;
        Ok(())
    }

    /// Read path for rendering: the current table plus its summary.
    /// Idempotent between submits.
    pub fn dashboard_state(&mut self) -> Result<DashboardState, StoreError> {
        let reports = self.table()?.to_vec();
        let summary = summarize(&reports);
        Ok(DashboardState { reports, summary })
    }

    fn table(&mut self) -> Result<&[HazardReport], StoreError> {
        if self.cached.is_none() {
            self.cached = Some(self.store.load()?);
        }
        Ok(self.cached.as_deref().unwrap_or_default())
    }
}

fn now_ms() -> i64 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
    let ms = nanos / 1_000_000i128;
    if ms <= 0 {
        0
    } else if ms >= i64::MAX as i128 {
        i64::MAX
    } else {
        ms as i64
    }
}
