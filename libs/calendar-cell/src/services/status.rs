// libs/calendar-cell/src/services/status.rs
use crate::models::UiStatus;

/// Maps a raw backend status to the UI taxonomy. Total: unknown, empty and
/// missing statuses all read as pending.
pub fn map_status(raw: Option<&str>) -> UiStatus {
    let normalized = raw.map(|s| s.trim().to_ascii_uppercase()).unwrap_or_default();

    match normalized.as_str() {
        "SCHEDULED" => UiStatus::Upcoming,
        "IN_PROCESS" => UiStatus::InProcess,
        "CANCELED" | "CANCELLED" => UiStatus::Cancelled,
        "COMPLETED" => UiStatus::Completed,
        _ => UiStatus::Pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses_any_case() {
        let cases = [
            ("SCHEDULED", UiStatus::Upcoming),
            ("scheduled", UiStatus::Upcoming),
            ("  Scheduled\t", UiStatus::Upcoming),
            ("IN_PROCESS", UiStatus::InProcess),
            ("in_process", UiStatus::InProcess),
            ("CANCELED", UiStatus::Cancelled),
            ("cancelled", UiStatus::Cancelled),
            ("Completed ", UiStatus::Completed),
        ];

        for (raw, expected) in cases {
            assert_eq!(map_status(Some(raw)), expected, "status {:?}", raw);
        }
    }

    #[test]
    fn test_unknown_statuses_are_pending() {
        for raw in ["", "   ", "PENDING", "no_show", "IN PROCESS", "scheduledd"] {
            assert_eq!(map_status(Some(raw)), UiStatus::Pending, "status {:?}", raw);
        }
        assert_eq!(map_status(None), UiStatus::Pending);
    }
}
