#![forbid(unsafe_code)]

use hb_core::{HazardReport, Summary};
use hb_store::ts_ms_to_rfc3339;
use serde_json::{Value, json};

/// Everything one render cycle needs: the table and its summary.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardState {
    pub reports: Vec<HazardReport>,
    pub summary: Summary,
}

impl DashboardState {
    /// Table rows for display, most recent report first.
    pub fn recent_first(&self) -> Vec<&HazardReport> {
        let mut rows: Vec<&HazardReport> = self.reports.iter().collect();
        rows.sort_by(|a, b| b.reported_at_ms.cmp(&a.reported_at_ms));
        rows
    }

    /// JSON snapshot for the Presentation Layer: KPI counts, chart
    /// series in enum order, and display-ready table rows. This is the
    /// whole rendering contract; widgets, CSS and map tiles live on the
    /// other side of it.
    pub fn to_json(&self) -> Value {
        let by_type: Vec<Value> = self
            .summary
            .count_by_type
            .iter()
            .map(|(kind, count)| json!({ "label": kind.as_str(), "count": count }))
            .collect();
        let by_severity: Vec<Value> = self
            .summary
            .count_by_severity
            .iter()
            .map(|(severity, count)| json!({ "label": severity.as_str(), "count": count }))
            .collect();
        let rows: Vec<Value> = self
            .recent_first()
            .into_iter()
            .map(|report| {
                json!({
                    "lat": report.latitude,
                    "lon": report.longitude,
                    "hazard_type": report.hazard_type.as_str(),
                    "severity": report.severity.as_str(),
                    "status": report.status.as_str(),
                    "reported_by": report.reported_by,
                    "timestamp": ts_ms_to_rfc3339(report.reported_at_ms),
                    "highlight": report.severity.highlight().css_color(),
                    "marker_color": report.severity.marker_color(),
                })
            })
            .collect();

        json!({
            "kpis": {
                "total_reports": self.summary.total_count,
                "active_incidents": self.summary.active_count,
                "high_or_critical": self.summary.high_or_critical_count,
            },
            "by_type": by_type,
            "by_severity": by_severity,
            "rows": rows,
        })
    }
}
