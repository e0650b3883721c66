#![forbid(unsafe_code)]

use crate::report::{HazardReport, HazardType, Severity, Status};
use std::collections::BTreeMap;

/// Aggregate counts over the current table, feeding the dashboard KPIs
/// and the per-type / per-severity charts. The maps hold only keys that
/// actually occur; iteration follows the enum declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_count: usize,
    pub active_count: usize,
    pub high_or_critical_count: usize,
    pub count_by_type: BTreeMap<HazardType, usize>,
    pub count_by_severity: BTreeMap<Severity, usize>,
}

/// Single pass over the table; an empty table yields all-zero counts and
/// empty maps.
pub fn summarize(reports: &[HazardReport]) -> Summary {
    let mut summary = Summary::default();
    for report in reports {
        summary.total_count += 1;
        if report.status == Status::Active {
            summary.active_count += 1;
        }
        if report.severity.is_high_or_critical() {
            summary.high_or_critical_count += 1;
        }
        *summary.count_by_type.entry(report.hazard_type).or_insert(0) += 1;
        *summary
            .count_by_severity
            .entry(report.severity)
            .or_insert(0) += 1;
    }
    summary
}
