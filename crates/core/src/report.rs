#![forbid(unsafe_code)]

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HazardType {
    Fire,
    ChemicalLeak,
    EquipmentFailure,
    StructuralRisk,
    Other,
}

impl HazardType {
    pub const ALL: [HazardType; 5] = [
        HazardType::Fire,
        HazardType::ChemicalLeak,
        HazardType::EquipmentFailure,
        HazardType::StructuralRisk,
        HazardType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HazardType::Fire => "Fire",
            HazardType::ChemicalLeak => "Chemical Leak",
            HazardType::EquipmentFailure => "Equipment Failure",
            HazardType::StructuralRisk => "Structural Risk",
            HazardType::Other => "Other",
        }
    }

    // Labels are exact and case-sensitive; they double as the on-disk text.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|severity| severity.as_str() == value)
    }

    pub fn is_high_or_critical(self) -> bool {
        self >= Severity::High
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Active,
    Resolved,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Resolved => "Resolved",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Active" => Some(Status::Active),
            "Resolved" => Some(Status::Resolved),
            _ => None,
        }
    }
}

/// One validated incident entry. Construction goes through
/// [`HazardReport::try_new`] or [`validate`]; there is no way to hold a
/// record with an out-of-range coordinate or a blank reporter.
#[derive(Clone, Debug, PartialEq)]
pub struct HazardReport {
    pub latitude: f64,
    pub longitude: f64,
    pub hazard_type: HazardType,
    pub severity: Severity,
    pub status: Status,
    pub reported_by: String,
    pub reported_at_ms: i64,
}

impl HazardReport {
    pub fn try_new(
        latitude: f64,
        longitude: f64,
        hazard_type: HazardType,
        severity: Severity,
        status: Status,
        reported_by: impl Into<String>,
        reported_at_ms: i64,
    ) -> Result<Self, ValidationError> {
        let reported_by = reported_by.into();
        let reported_by = reported_by.trim();
        if reported_by.is_empty() {
            return Err(ValidationError::MissingReporter);
        }
        check_latitude(latitude)?;
        check_longitude(longitude)?;
        Ok(Self {
            latitude,
            longitude,
            hazard_type,
            severity,
            status,
            reported_by: reported_by.to_string(),
            reported_at_ms,
        })
    }
}

/// A submission as it arrives from the form: enum fields still text,
/// coordinates optional because the form may leave them blank.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportForm {
    pub hazard_type: String,
    pub severity: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub reported_by: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ValidationError {
    MissingReporter,
    MissingLatitude,
    MissingLongitude,
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
    UnknownHazardType(String),
    UnknownSeverity(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingReporter => write!(f, "reported_by must not be empty"),
            Self::MissingLatitude => write!(f, "latitude is required"),
            Self::MissingLongitude => write!(f, "longitude is required"),
            Self::LatitudeOutOfRange(value) => {
                write!(f, "latitude {value} is outside [-90, 90]")
            }
            Self::LongitudeOutOfRange(value) => {
                write!(f, "longitude {value} is outside [-180, 180]")
            }
            Self::UnknownHazardType(value) => write!(f, "unknown hazard type: {value}"),
            Self::UnknownSeverity(value) => write!(f, "unknown severity: {value}"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Checks a submitted form against the field rules, in order, and returns
/// the first violation. On success the record is fully populated with
/// `status = Active` and the caller-supplied creation timestamp.
///
/// A coordinate of exactly 0.0 is a legitimate equatorial/prime-meridian
/// position; presence is tracked through `Option`, never through a
/// zero-is-missing check.
pub fn validate(form: &ReportForm, reported_at_ms: i64) -> Result<HazardReport, ValidationError> {
    let reported_by = form.reported_by.trim();
    if reported_by.is_empty() {
        return Err(ValidationError::MissingReporter);
    }

    let latitude = form.latitude.ok_or(ValidationError::MissingLatitude)?;
    check_latitude(latitude)?;
    let longitude = form.longitude.ok_or(ValidationError::MissingLongitude)?;
    check_longitude(longitude)?;

    let hazard_type = HazardType::parse(&form.hazard_type)
        .ok_or_else(|| ValidationError::UnknownHazardType(form.hazard_type.clone()))?;
    let severity = Severity::parse(&form.severity)
        .ok_or_else(|| ValidationError::UnknownSeverity(form.severity.clone()))?;

    HazardReport::try_new(
        latitude,
        longitude,
        hazard_type,
        severity,
        Status::Active,
        reported_by,
        reported_at_ms,
    )
}

fn check_latitude(value: f64) -> Result<(), ValidationError> {
    // `contains` is false for NaN, so non-finite input fails the same way.
    if !(-90.0..=90.0).contains(&value) {
        return Err(ValidationError::LatitudeOutOfRange(value));
    }
    Ok(())
}

fn check_longitude(value: f64) -> Result<(), ValidationError> {
    if !(-180.0..=180.0).contains(&value) {
        return Err(ValidationError::LongitudeOutOfRange(value));
    }
    Ok(())
}
