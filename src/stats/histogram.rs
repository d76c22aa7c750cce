use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone};

use crate::models::Task;

/// Number of calendar days covered by [`completions_by_day`].
pub const WINDOW_DAYS: usize = 14;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCount {
    pub date: NaiveDate,
    /// Short display label, e.g. `16 Oct`.
    pub label: String,
    pub count: usize,
}

/// Completions per calendar day for the [`WINDOW_DAYS`] days ending on the
/// day of `now`, oldest first. Day boundaries are taken in `now`'s time zone.
pub fn completions_by_day<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>) -> Vec<DayCount> {
    let tz = now.timezone();
    let today = now.date_naive();

    (0..WINDOW_DAYS as i64)
        .rev()
        .map(|days_back| {
            let date = today - Duration::days(days_back);
            let (start, end) = day_bounds_ms(&tz, date);
            let count = tasks
                .iter()
                .filter_map(Task::completed_at)
                .filter(|at| (start..=end).contains(at))
                .count();
            DayCount {
                date,
                label: date.format("%-d %b").to_string(),
                count,
            }
        })
        .collect()
}

/// First and last millisecond of `date` in `tz`, inclusive. Each day ends
/// where the next one starts, so no instant falls in two windows.
fn day_bounds_ms<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> (i64, i64) {
    let start = day_start_ms(tz, date);
    let end = day_start_ms(tz, date + Duration::days(1)) - 1;
    (start, end)
}

/// Quarter hours scanned past midnight when it falls in a DST gap.
const GAP_SEARCH_STEPS: i64 = 16;

/// Earliest instant whose local date is `date`. If midnight was skipped by
/// a DST change the day starts when the clock resumes.
fn day_start_ms<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::default());
    (0..=GAP_SEARCH_STEPS)
        .find_map(|step| {
            tz.from_local_datetime(&(midnight + Duration::minutes(step * 15)))
                .earliest()
        })
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight).timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Completion, Priority};
    use chrono::{FixedOffset, LocalResult, NaiveDateTime, Utc};

    /// UTC-4 until 2024-09-08 04:00 UTC, then UTC-3. Local clocks jump
    /// from 00:00 straight to 01:00 on the 8th.
    #[derive(Debug, Clone, Copy)]
    struct SkipsMidnight;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn offset_hours(h: i32) -> FixedOffset {
        FixedOffset::west_opt(h * 3600).unwrap()
    }

    impl TimeZone for SkipsMidnight {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            SkipsMidnight
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_time(NaiveTime::default()))
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            if *local < at(8, 0) {
                LocalResult::Single(offset_hours(4))
            } else if *local < at(8, 1) {
                LocalResult::None
            } else {
                LocalResult::Single(offset_hours(3))
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_time(NaiveTime::default()))
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < at(8, 4) {
                offset_hours(4)
            } else {
                offset_hours(3)
            }
        }
    }

    fn completed_at(id: i64, at: i64) -> Task {
        Task {
            id,
            text: "t".into(),
            priority: Priority::Medium,
            assigned_to: "a".into(),
            created_at: at - 1_000,
            completion: Completion::Completed { at },
        }
    }

    fn pending(id: i64) -> Task {
        Task {
            id,
            text: "t".into(),
            priority: Priority::Medium,
            assigned_to: "a".into(),
            created_at: 0,
            completion: Completion::Pending,
        }
    }

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_always_fourteen_days_oldest_first() {
        let now = utc("2024-03-20T12:00:00Z");
        let days = completions_by_day(&[], &now);
        assert_eq!(days.len(), WINDOW_DAYS);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());
        assert_eq!(days[13].date, NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
        assert_eq!(days[13].label, "20 Mar");
        assert!(days.iter().all(|d| d.count == 0));
    }

    #[test]
    fn test_day_boundaries_inclusive() {
        let now = utc("2024-03-20T12:00:00Z");
        let tasks = vec![
            completed_at(1, utc("2024-03-20T00:00:00Z").timestamp_millis()),
            completed_at(2, utc("2024-03-19T23:59:59.999Z").timestamp_millis()),
            completed_at(3, utc("2024-03-07T00:00:00Z").timestamp_millis()),
        ];
        let days = completions_by_day(&tasks, &now);
        assert_eq!(days[13].count, 1);
        assert_eq!(days[12].count, 1);
        assert_eq!(days[0].count, 1);
    }

    #[test]
    fn test_window_excludes_outside_completions() {
        let now = utc("2024-03-20T12:00:00Z");
        let tasks = vec![
            completed_at(1, utc("2024-03-06T23:59:59.999Z").timestamp_millis()),
            completed_at(2, utc("2024-03-21T00:00:00Z").timestamp_millis()),
            completed_at(3, utc("2024-03-10T08:00:00Z").timestamp_millis()),
            completed_at(4, utc("2024-03-10T18:30:00Z").timestamp_millis()),
            completed_at(5, utc("2024-03-15T09:00:00Z").timestamp_millis()),
            pending(6),
        ];
        let days = completions_by_day(&tasks, &now);
        let total: usize = days.iter().map(|d| d.count).sum();
        assert_eq!(total, 3);
        assert_eq!(days[3].count, 2);
    }

    #[test]
    fn test_unsorted_input() {
        let now = utc("2024-03-20T12:00:00Z");
        let tasks = vec![
            completed_at(1, utc("2024-03-18T10:00:00Z").timestamp_millis()),
            completed_at(2, utc("2024-03-08T10:00:00Z").timestamp_millis()),
            completed_at(3, utc("2024-03-18T01:00:00Z").timestamp_millis()),
        ];
        let days = completions_by_day(&tasks, &now);
        assert_eq!(days[11].count, 2);
        assert_eq!(days[1].count, 1);
    }

    #[test]
    fn test_uses_time_zone_of_now() {
        // 22:30 UTC on the 19th is 00:30 on the 20th at UTC+2.
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = utc("2024-03-20T10:00:00Z").with_timezone(&plus_two);
        let tasks = vec![completed_at(1, utc("2024-03-19T22:30:00Z").timestamp_millis())];

        let days = completions_by_day(&tasks, &now);
        assert_eq!(days[13].count, 1);
        assert_eq!(days[12].count, 0);
    }

    #[test]
    fn test_day_starting_in_dst_gap_does_not_overlap() {
        let now = SkipsMidnight.from_local_datetime(&at(9, 12)).unwrap();
        let tasks = vec![
            // 23:59:59.999 on the 7th, local UTC-4.
            completed_at(1, 1_725_767_999_999),
            // 01:00 on the 8th, first instant after the jump.
            completed_at(2, 1_725_768_000_000),
        ];

        let days = completions_by_day(&tasks, &now);
        assert_eq!(days[12].date, NaiveDate::from_ymd_opt(2024, 9, 8).unwrap());
        assert_eq!(days[11].count, 1);
        assert_eq!(days[12].count, 1);
        assert_eq!(days.iter().map(|d| d.count).sum::<usize>(), 2);
    }
}
