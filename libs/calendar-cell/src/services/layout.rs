// libs/calendar-cell/src/services/layout.rs
use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{CalendarGrid, DayCell, Event, ViewMode};
use crate::services::range::DateRange;

/// Buckets events by the calendar day of their start. End times never affect placement.
fn bucket_by_start_day(events: Vec<Event>) -> BTreeMap<NaiveDate, Vec<Event>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<Event>> = BTreeMap::new();
    for event in events {
        buckets.entry(event.start.date()).or_default().push(event);
    }
    for day_events in buckets.values_mut() {
        day_events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
    }
    buckets
}

impl CalendarGrid {
    pub fn build(range: &DateRange, view: ViewMode, events: Vec<Event>, today: NaiveDate) -> Self {
        let mut buckets = bucket_by_start_day(events);

        let cells: Vec<DayCell> = range
            .grid_days()
            .map(|date| DayCell {
                date,
                in_current_month: range.contains_day(date),
                is_today: date == today,
                events: buckets.remove(&date).unwrap_or_default(),
            })
            .collect();

        let weeks = cells.chunks(7).map(|week| week.to_vec()).collect();

        Self { view, weeks }
    }

    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flatten()
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.cells().find(|c| c.date == date)
    }

    pub fn event_count(&self) -> usize {
        self.cells().map(|c| c.events.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crate::models::UiStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, day: NaiveDate, hour: u32) -> Event {
        let start = day.and_hms_opt(hour, 0, 0).unwrap();
        Event {
            id: id.to_string(),
            title: id.to_string(),
            status: UiStatus::Upcoming,
            start,
            end: start + Duration::minutes(30),
            time_label: String::new(),
            doctor_name: String::new(),
            patient_name: String::new(),
            clinical: Vec::new(),
            detail_route: String::new(),
        }
    }

    #[test]
    fn test_month_grid_shape() {
        // October 2025 starts on a Wednesday and ends on a Friday.
        let range = DateRange::for_view(date(2025, 10, 14), ViewMode::Month).unwrap();
        let grid = CalendarGrid::build(&range, ViewMode::Month, Vec::new(), date(2025, 10, 18));

        assert_eq!(grid.weeks.len(), 5);
        assert!(grid.weeks.iter().all(|w| w.len() == 7));
        assert_eq!(grid.weeks[0][0].date, date(2025, 9, 29));
        assert!(!grid.weeks[0][0].in_current_month);
        assert_eq!(grid.weeks[4][6].date, date(2025, 11, 2));
        assert!(grid.cell(date(2025, 10, 18)).unwrap().is_today);
        assert_eq!(grid.cells().filter(|c| c.is_today).count(), 1);
    }

    #[test]
    fn test_month_grid_six_rows() {
        // March 2025 begins on a Saturday and spans six Monday-first rows.
        let range = DateRange::for_view(date(2025, 3, 1), ViewMode::Month).unwrap();
        let grid = CalendarGrid::build(&range, ViewMode::Month, Vec::new(), date(2025, 10, 18));
        assert_eq!(grid.weeks.len(), 6);
    }

    #[test]
    fn test_events_sorted_within_cell() {
        let range = DateRange::for_view(date(2025, 10, 14), ViewMode::Week).unwrap();
        let day = date(2025, 10, 15);
        let events = vec![event("late", day, 15), event("b", day, 9), event("a", day, 9)];

        let grid = CalendarGrid::build(&range, ViewMode::Week, events, date(2025, 10, 18));
        let ids: Vec<&str> = grid.cell(day).unwrap().events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "late"]);
        assert_eq!(grid.weeks.len(), 1);
        assert_eq!(grid.event_count(), 3);
    }

    #[test]
    fn test_events_outside_grid_are_dropped() {
        let range = DateRange::for_view(date(2025, 10, 14), ViewMode::Day).unwrap();
        let events = vec![event("other-day", date(2025, 10, 15), 9)];
        let grid = CalendarGrid::build(&range, ViewMode::Day, events, date(2025, 10, 18));
        assert_eq!(grid.event_count(), 0);
        assert_eq!(grid.cells().count(), 1);
    }
}
