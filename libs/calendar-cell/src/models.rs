// libs/calendar-cell/src/models.rs
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ==============================================================================
// UPSTREAM APPOINTMENT RECORD
// ==============================================================================

/// Appointment as served by the clinic backend. Status stays raw and is only
/// interpreted through `services::status::map_status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub scheduled_start: DateTime<FixedOffset>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub scheduled_end: DateTime<FixedOffset>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub doctor_full_name: Option<String>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub patient_full_name: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default, rename = "symptomsOns")]
    pub symptoms_onset: Option<String>,
    #[serde(default, rename = "symptomsSever")]
    pub symptoms_severity: Option<String>,
    #[serde(default)]
    pub current_medication: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Appointment {
    pub fn has_valid_window(&self) -> bool {
        self.scheduled_start < self.scheduled_end
    }

    /// Full name wins over the short name when both are present.
    pub fn doctor_display_name(&self) -> Option<&str> {
        non_blank(&self.doctor_full_name).or_else(|| non_blank(&self.doctor_name))
    }

    pub fn patient_display_name(&self) -> Option<&str> {
        non_blank(&self.patient_full_name).or_else(|| non_blank(&self.patient_name))
    }

    /// Clinical free text in display order, blank fields skipped.
    pub fn clinical_fields(&self) -> Vec<ClinicalField> {
        [
            ("Reason", &self.reason),
            ("Symptom onset", &self.symptoms_onset),
            ("Symptom severity", &self.symptoms_severity),
            ("Current medication", &self.current_medication),
            ("Notes", &self.notes),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            non_blank(value).map(|_| ClinicalField {
                label: label.to_string(),
                // displayed verbatim, only blank-checked
                value: value.clone().unwrap_or_default(),
            })
        })
        .collect()
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Accepts RFC 3339 and offset-less `YYYY-MM-DDTHH:MM[:SS[.fff]]`, the latter read as UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| DateTime::<FixedOffset>::from(Utc.from_utc_datetime(&naive)))
}

// ==============================================================================
// UI STATUS TAXONOMY
// ==============================================================================

/// Single status taxonomy shared by every calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiStatus {
    Upcoming,
    InProcess,
    Pending,
    Cancelled,
    Completed,
}

impl UiStatus {
    /// Filter bucket for this status; in-process visits count as upcoming.
    pub fn filter_category(&self) -> FilterKind {
        match self {
            UiStatus::Upcoming | UiStatus::InProcess => FilterKind::Upcoming,
            UiStatus::Pending => FilterKind::Pending,
            UiStatus::Cancelled => FilterKind::Cancelled,
            UiStatus::Completed => FilterKind::Completed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UiStatus::Upcoming => "Upcoming",
            UiStatus::InProcess => "In process",
            UiStatus::Pending => "Pending",
            UiStatus::Cancelled => "Cancelled",
            UiStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for UiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ==============================================================================
// VIEW MODES AND NAVIGATION
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Month,
    Week,
    Day,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(ViewMode::Month),
            "week" => Ok(ViewMode::Week),
            "day" => Ok(ViewMode::Day),
            other => Err(format!("unknown view mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavDirection {
    Previous,
    Next,
    Today,
}

// ==============================================================================
// FILTERS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Upcoming,
    Pending,
    Cancelled,
    Completed,
}

impl FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upcoming" => Ok(FilterKind::Upcoming),
            "pending" => Ok(FilterKind::Pending),
            "cancelled" => Ok(FilterKind::Cancelled),
            "completed" => Ok(FilterKind::Completed),
            other => Err(format!("unknown filter: {}", other)),
        }
    }
}

/// Status filter flags. All false means "show all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default)]
    pub upcoming: bool,
    #[serde(default)]
    pub pending: bool,
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default)]
    pub completed: bool,
}

// ==============================================================================
// DERIVED VIEW MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalField {
    pub label: String,
    pub value: String,
}

/// UI-only projection of an appointment in calendar local time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub status: UiStatus,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub time_label: String,
    pub doctor_name: String,
    pub patient_name: String,
    pub clinical: Vec<ClinicalField>,
    pub detail_route: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub role: String,
    pub name: String,
}

/// Contents of the event detail dialog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub time_label: String,
    pub status: UiStatus,
    pub status_label: String,
    pub participants: Vec<Participant>,
    pub clinical: Vec<ClinicalField>,
    pub detail_route: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub is_today: bool,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarGrid {
    pub view: ViewMode,
    pub weeks: Vec<Vec<DayCell>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Network,
    Data,
}

/// Dismissible banner shown above the grid when loading failed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarNotice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RangeBounds {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarView {
    pub date: NaiveDate,
    pub view: ViewMode,
    pub today: NaiveDate,
    pub range: RangeBounds,
    pub filters: Filters,
    pub total_events: usize,
    pub grid: CalendarGrid,
    pub notice: Option<CalendarNotice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum DialogState {
    #[default]
    Closed,
    Open { event_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "id": 42,
            "scheduledStart": "2025-10-14T03:00:00",
            "scheduledEnd": "2025-10-14T03:30:00Z",
            "status": "scheduled",
            "doctorName": "Ng",
            "doctorFullName": "  ",
            "patientFullName": "Sam Okafor",
            "symptomsOns": "Two days ago",
            "notes": ""
        })
    }

    #[test]
    fn test_appointment_decoding_tolerates_wire_variants() {
        let appt: Appointment = serde_json::from_value(sample()).unwrap();

        assert_eq!(appt.id, "42");
        assert!(appt.has_valid_window());
        assert_eq!(appt.doctor_display_name(), Some("Ng"));
        assert_eq!(appt.patient_display_name(), Some("Sam Okafor"));
        assert_eq!(appt.symptoms_onset.as_deref(), Some("Two days ago"));
    }

    #[test]
    fn test_clinical_fields_skip_blank_values() {
        let appt: Appointment = serde_json::from_value(sample()).unwrap();
        let fields = appt.clinical_fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].label, "Symptom onset");
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2025-10-14T03:00").is_some());
        assert!(parse_timestamp("2025-10-14T03:00:00.250").is_some());
        assert!(parse_timestamp("2025-10-14T03:00:00+02:00").is_some());
        assert!(parse_timestamp("14/10/2025").is_none());
    }

    #[test]
    fn test_in_process_filters_as_upcoming() {
        assert_eq!(UiStatus::InProcess.filter_category(), FilterKind::Upcoming);
        assert_eq!(UiStatus::Cancelled.filter_category(), FilterKind::Cancelled);
    }
}
