// libs/calendar-cell/src/services/range.rs
use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Months, NaiveDate, NaiveDateTime, NaiveTime,
    SecondsFormat, TimeZone, Utc,
};

use crate::models::{NavDirection, RangeBounds, ViewMode};

/// Inclusive calendar window in local time. The same value drives the upstream
/// fetch and grid placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    grid_first: NaiveDate,
    grid_last: NaiveDate,
}

fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

// 23:59:59.999 of the given day
fn end_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| start_of_day(day))
}

/// Monday of the week containing `day`, if representable.
pub fn week_start(day: NaiveDate) -> Option<NaiveDate> {
    // Sunday is day 6 of the week that began on the previous Monday.
    day.checked_sub_signed(Duration::days(day.weekday().num_days_from_monday() as i64))
}

fn week_end(day: NaiveDate) -> Option<NaiveDate> {
    week_start(day)?.checked_add_signed(Duration::days(6))
}

pub fn month_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = day.with_day(1).unwrap_or(day);
    let last = (28..=31).rev().find_map(|d| first.with_day(d)).unwrap_or(day);
    (first, last)
}

// inclusive, and yields `last` even when it is NaiveDate::MAX
fn days_between(first: NaiveDate, last: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(first).filter(|d| *d <= last), move |d| {
        d.succ_opt().filter(|next| *next <= last)
    })
}

impl DateRange {
    /// `None` when the window or its grid would leave chrono's date range.
    pub fn for_view(reference: NaiveDate, view: ViewMode) -> Option<Self> {
        let (first, last, grid_first, grid_last) = match view {
            ViewMode::Month => {
                let (first, last) = month_bounds(reference);
                (first, last, week_start(first)?, week_end(last)?)
            }
            ViewMode::Week => {
                let monday = week_start(reference)?;
                let sunday = monday.checked_add_signed(Duration::days(6))?;
                (monday, sunday, monday, sunday)
            }
            ViewMode::Day => (reference, reference, reference, reference),
        };

        Some(Self {
            start: start_of_day(first),
            end: end_of_day(last),
            grid_first,
            grid_last,
        })
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.end.date()
    }

    pub fn contains_day(&self, day: NaiveDate) -> bool {
        day >= self.first_day() && day <= self.last_day()
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        days_between(self.first_day(), self.last_day())
    }

    /// Days the grid shows: whole Monday..Sunday weeks for month view,
    /// exactly the range otherwise.
    pub fn grid_days(&self) -> impl Iterator<Item = NaiveDate> {
        days_between(self.grid_first, self.grid_last)
    }

    pub fn to_utc(&self, offset: FixedOffset) -> (DateTime<Utc>, DateTime<Utc>) {
        let convert = |local: NaiveDateTime| {
            offset
                .from_local_datetime(&local)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|| Utc.from_utc_datetime(&local))
        };
        (convert(self.start), convert(self.end))
    }

    /// ISO-8601 pair sent upstream as `startDate` / `endDate`.
    pub fn to_iso_pair(&self, offset: FixedOffset) -> (String, String) {
        let (start, end) = self.to_utc(offset);
        (
            start.to_rfc3339_opts(SecondsFormat::Millis, true),
            end.to_rfc3339_opts(SecondsFormat::Millis, true),
        )
    }

    pub fn bounds(&self) -> RangeBounds {
        RangeBounds {
            start: self.start,
            end: self.end,
        }
    }
}

impl ViewMode {
    /// Moves the reference date by one period of this view. Month steps clamp
    /// to the target month's last day. `None` past chrono's date range.
    pub fn step(&self, reference: NaiveDate, direction: NavDirection, today: NaiveDate) -> Option<NaiveDate> {
        match (self, direction) {
            (_, NavDirection::Today) => Some(today),
            (ViewMode::Month, NavDirection::Next) => reference.checked_add_months(Months::new(1)),
            (ViewMode::Month, NavDirection::Previous) => reference.checked_sub_months(Months::new(1)),
            (ViewMode::Week, NavDirection::Next) => reference.checked_add_signed(Duration::days(7)),
            (ViewMode::Week, NavDirection::Previous) => reference.checked_sub_signed(Duration::days(7)),
            (ViewMode::Day, NavDirection::Next) => reference.succ_opt(),
            (ViewMode::Day, NavDirection::Previous) => reference.pred_opt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, ms: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_milli_opt(h, min, s, ms).unwrap()
    }

    #[test]
    fn test_month_range() {
        let range = DateRange::for_view(date(2025, 10, 14), ViewMode::Month).unwrap();
        assert_eq!(range.start, at(2025, 10, 1, 0, 0, 0, 0));
        assert_eq!(range.end, at(2025, 10, 31, 23, 59, 59, 999));
    }

    #[test]
    fn test_month_range_handles_february_and_december() {
        let feb = DateRange::for_view(date(2024, 2, 10), ViewMode::Month).unwrap();
        assert_eq!(feb.last_day(), date(2024, 2, 29));

        let dec = DateRange::for_view(date(2025, 12, 31), ViewMode::Month).unwrap();
        assert_eq!(dec.first_day(), date(2025, 12, 1));
        assert_eq!(dec.last_day(), date(2025, 12, 31));
    }

    #[test]
    fn test_week_range_starts_monday() {
        let range = DateRange::for_view(date(2025, 10, 14), ViewMode::Week).unwrap();
        assert_eq!(range.start, at(2025, 10, 13, 0, 0, 0, 0));
        assert_eq!(range.end, at(2025, 10, 19, 23, 59, 59, 999));
    }

    #[test]
    fn test_sunday_belongs_to_previous_monday() {
        let range = DateRange::for_view(date(2025, 10, 19), ViewMode::Week).unwrap();
        assert_eq!(range.first_day(), date(2025, 10, 13));

        let monday = DateRange::for_view(date(2025, 10, 13), ViewMode::Week).unwrap();
        assert_eq!(monday.first_day(), date(2025, 10, 13));
    }

    #[test]
    fn test_day_range_and_days() {
        let range = DateRange::for_view(date(2025, 10, 14), ViewMode::Day).unwrap();
        assert_eq!(range.start, at(2025, 10, 14, 0, 0, 0, 0));
        assert_eq!(range.end, at(2025, 10, 14, 23, 59, 59, 999));
        assert_eq!(range.days().collect::<Vec<_>>(), vec![date(2025, 10, 14)]);

        let week = DateRange::for_view(date(2025, 10, 14), ViewMode::Week).unwrap();
        assert_eq!(week.days().count(), 7);
    }

    #[test]
    fn test_iso_pair_applies_offset() {
        let range = DateRange::for_view(date(2025, 10, 14), ViewMode::Day).unwrap();

        let (start, end) = range.to_iso_pair(FixedOffset::east_opt(0).unwrap());
        assert_eq!(start, "2025-10-14T00:00:00.000Z");
        assert_eq!(end, "2025-10-14T23:59:59.999Z");

        let (start, _) = range.to_iso_pair(FixedOffset::east_opt(2 * 3600).unwrap());
        assert_eq!(start, "2025-10-13T22:00:00.000Z");
    }

    #[test]
    fn test_step_navigation() {
        let today = date(2025, 10, 18);
        assert_eq!(ViewMode::Month.step(date(2025, 1, 31), NavDirection::Next, today), Some(date(2025, 2, 28)));
        assert_eq!(ViewMode::Month.step(date(2025, 1, 15), NavDirection::Previous, today), Some(date(2024, 12, 15)));
        assert_eq!(ViewMode::Week.step(date(2025, 10, 14), NavDirection::Next, today), Some(date(2025, 10, 21)));
        assert_eq!(ViewMode::Day.step(date(2025, 10, 1), NavDirection::Previous, today), Some(date(2025, 9, 30)));
        assert_eq!(ViewMode::Day.step(date(2020, 1, 1), NavDirection::Today, today), Some(today));
        assert_eq!(ViewMode::Day.step(NaiveDate::MAX, NavDirection::Next, today), None);
    }

    #[test]
    fn test_ranges_at_chrono_limits_do_not_overflow() {
        for view in [ViewMode::Month, ViewMode::Week, ViewMode::Day] {
            for reference in [NaiveDate::MIN, NaiveDate::MAX] {
                if let Some(range) = DateRange::for_view(reference, view) {
                    assert!(range.contains_day(reference), "{:?} at {}", view, reference);
                    assert!(range.grid_days().count() >= 1);
                }
            }
        }

        let last_day = DateRange::for_view(NaiveDate::MAX, ViewMode::Day).unwrap();
        assert_eq!(last_day.days().collect::<Vec<_>>(), vec![NaiveDate::MAX]);
        assert_eq!(last_day.end.time(), NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap());

        // a week running past the last representable day cannot be built
        if NaiveDate::MAX.weekday() != chrono::Weekday::Sun {
            assert!(DateRange::for_view(NaiveDate::MAX, ViewMode::Week).is_none());
            assert!(DateRange::for_view(NaiveDate::MAX, ViewMode::Month).is_none());
        }
    }
}
