#[cfg(test)]
mod tests {
    use crate::error::CalendarError;
    use crate::week::{format_display_date, parse_timezone, WeekCalendar, WeekWindow};
    use chrono::{Datelike, NaiveDate, TimeZone, Utc, Weekday};
    use chrono_tz::Tz;
    use stationcal_common::models::Booking;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking(id: &str, start: &str, end: &str) -> Booking {
        Booking {
            id: id.to_string(),
            pickup_return_station_id: "station-1".to_string(),
            customer_name: "Jane Doe".to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
        }
    }

    #[test]
    fn test_week_window_runs_monday_to_sunday() {
        // 2025-07-10 is a Thursday
        let window = WeekWindow::containing(date(2025, 7, 10));

        assert_eq!(window.first(), date(2025, 7, 7));
        assert_eq!(window.last(), date(2025, 7, 13));
        assert_eq!(window.first().weekday(), Weekday::Mon);
        assert_eq!(window.last().weekday(), Weekday::Sun);

        let days: Vec<NaiveDate> = window.iter().collect();
        assert_eq!(days.len(), 7);
        for pair in days.windows(2) {
            assert_eq!(pair[1], pair[0].succ_opt().unwrap());
        }
        assert_eq!(window[3], date(2025, 7, 10));
    }

    #[test]
    fn test_week_window_on_monday_and_sunday() {
        let from_monday = WeekWindow::containing(date(2025, 7, 7));
        let from_sunday = WeekWindow::containing(date(2025, 7, 13));
        assert_eq!(from_monday, from_sunday);
        assert!(from_monday.contains(date(2025, 7, 7)));
        assert!(from_monday.contains(date(2025, 7, 13)));
        assert!(!from_monday.contains(date(2025, 7, 14)));
        assert!(!from_monday.contains(date(2025, 7, 6)));
    }

    #[test]
    fn test_week_window_across_year_boundary() {
        // 2025-01-01 is a Wednesday
        let window = WeekWindow::containing(date(2025, 1, 1));
        assert_eq!(window.first(), date(2024, 12, 30));
        assert_eq!(window.last(), date(2025, 1, 5));
    }

    #[test]
    fn test_next_and_previous_week() {
        let mut calendar = WeekCalendar::anchored_at(date(2025, 7, 10), Tz::UTC);

        let next = calendar.next_week();
        assert_eq!(next.first(), date(2025, 7, 14));
        assert_eq!(calendar.anchor(), date(2025, 7, 17));

        calendar.previous_week();
        let previous = calendar.previous_week();
        assert_eq!(previous.first(), date(2025, 6, 30));
        assert_eq!(previous.last(), date(2025, 7, 6));
    }

    #[test]
    fn test_navigation_round_trip_does_not_drift() {
        let mut calendar = WeekCalendar::anchored_at(date(2025, 7, 10), Tz::UTC);
        let start = calendar.current_week();

        for _ in 0..10 {
            calendar.next_week();
        }
        for _ in 0..10 {
            calendar.previous_week();
        }

        assert_eq!(calendar.current_week(), start);
        assert_eq!(calendar.anchor(), date(2025, 7, 10));
    }

    fn assert_complete_week(window: &WeekWindow) {
        assert_eq!(window.first().weekday(), Weekday::Mon);
        for pair in window.days().windows(2) {
            assert_eq!(pair[0].succ_opt(), Some(pair[1]));
        }
    }

    #[test]
    fn test_weeks_at_the_ends_of_the_date_range_stay_complete() {
        let last = WeekWindow::containing(NaiveDate::MAX);
        assert_complete_week(&last);
        assert!(last.last() <= NaiveDate::MAX);
        assert!(NaiveDate::MAX.signed_duration_since(last.last()).num_days() < 7);

        let first = WeekWindow::containing(NaiveDate::MIN);
        assert_complete_week(&first);
        assert!(first.first() >= NaiveDate::MIN);
        assert!(first.first().signed_duration_since(NaiveDate::MIN).num_days() < 7);
    }

    #[test]
    fn test_try_containing() {
        assert_eq!(
            WeekWindow::try_containing(date(2025, 7, 10)),
            Some(WeekWindow::containing(date(2025, 7, 10)))
        );
        if NaiveDate::MAX.weekday() != Weekday::Sun {
            assert!(WeekWindow::try_containing(NaiveDate::MAX).is_none());
        }
        if NaiveDate::MIN.weekday() != Weekday::Mon {
            assert!(WeekWindow::try_containing(NaiveDate::MIN).is_none());
        }
    }

    #[test]
    fn test_next_week_at_max_date_stays_put() {
        let mut calendar = WeekCalendar::anchored_at(NaiveDate::MAX, Tz::UTC);
        calendar.next_week();
        assert_eq!(calendar.anchor(), NaiveDate::MAX);
    }

    #[test]
    fn test_go_to_date() {
        let mut calendar = WeekCalendar::anchored_at(date(2025, 7, 10), Tz::UTC);
        let window = calendar.go_to(date(2025, 12, 24));
        assert_eq!(window.first(), date(2025, 12, 22));
        assert_eq!(calendar.anchor(), date(2025, 12, 24));
    }

    #[test]
    fn test_format_display_date() {
        assert_eq!(format_display_date(date(2025, 7, 10)), "Thu 10 Jul 2025");
        assert_eq!(
            WeekCalendar::format_display_date(date(2025, 1, 5)),
            "Sun 05 Jan 2025"
        );
    }

    #[test]
    fn test_jump_with_no_bookings_keeps_anchor() {
        let mut calendar = WeekCalendar::anchored_at(date(2025, 7, 10), Tz::UTC);
        let now = Utc.with_ymd_and_hms(2025, 7, 10, 12, 0, 0).unwrap();

        let window = calendar.jump_to_nearest_booking_date_from(&[], now);

        assert_eq!(calendar.anchor(), date(2025, 7, 10));
        assert_eq!(window.first(), date(2025, 7, 7));
    }

    #[test]
    fn test_jump_to_nearest_boundary() {
        let mut calendar = WeekCalendar::anchored_at(date(2025, 1, 1), Tz::UTC);
        let now = Utc.with_ymd_and_hms(2025, 7, 10, 12, 0, 0).unwrap();
        let bookings = vec![
            booking("far", "2025-03-01T10:00:00Z", "2025-03-05T10:00:00Z"),
            // End is two days after now, start is five days before
            booking("near", "2025-07-05T12:00:00Z", "2025-07-12T12:00:00Z"),
            booking("later", "2025-08-01T10:00:00Z", "2025-08-02T10:00:00Z"),
        ];

        let window = calendar.jump_to_nearest_booking_date_from(&bookings, now);

        assert_eq!(calendar.anchor(), date(2025, 7, 12));
        assert_eq!(window.first(), date(2025, 7, 7));
    }

    #[test]
    fn test_jump_tie_prefers_first_candidate() {
        let mut calendar = WeekCalendar::anchored_at(date(2025, 1, 1), Tz::UTC);
        let now = Utc.with_ymd_and_hms(2025, 7, 10, 12, 0, 0).unwrap();
        let bookings = vec![
            booking("before", "2025-07-01T12:00:00Z", "2025-07-03T12:00:00Z"),
            booking("after", "2025-07-17T12:00:00Z", "2025-07-20T12:00:00Z"),
        ];

        calendar.jump_to_nearest_booking_date_from(&bookings, now);

        assert_eq!(calendar.anchor(), date(2025, 7, 3));
    }

    #[test]
    fn test_jump_skips_unparseable_dates() {
        let mut calendar = WeekCalendar::anchored_at(date(2025, 1, 1), Tz::UTC);
        let now = Utc.with_ymd_and_hms(2025, 7, 10, 12, 0, 0).unwrap();
        let bookings = vec![
            booking("broken", "not-a-date", "also-not-a-date"),
            booking("half", "garbage", "2025-09-01T08:00:00Z"),
        ];

        calendar.jump_to_nearest_booking_date_from(&bookings, now);

        assert_eq!(calendar.anchor(), date(2025, 9, 1));
    }

    #[test]
    fn test_jump_uses_calendar_timezone() {
        // 23:30 UTC on the 12th is already the 13th in Zurich (UTC+2 in summer)
        let tz: Tz = "Europe/Zurich".parse().unwrap();
        let mut calendar = WeekCalendar::anchored_at(date(2025, 1, 1), tz);
        let now = Utc.with_ymd_and_hms(2025, 7, 12, 20, 0, 0).unwrap();
        let bookings = vec![booking(
            "late",
            "2025-07-12T23:30:00Z",
            "2025-07-20T10:00:00Z",
        )];

        let window = calendar.jump_to_nearest_booking_date_from(&bookings, now);

        assert_eq!(calendar.anchor(), date(2025, 7, 13));
        assert_eq!(window.last(), date(2025, 7, 13));
    }

    #[test]
    fn test_start_of_day_in_timezone() {
        let tz: Tz = "Europe/Zurich".parse().unwrap();
        let calendar = WeekCalendar::anchored_at(date(2025, 7, 10), tz);

        let start = calendar.start_of_day(date(2025, 7, 15)).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 7, 14, 22, 0, 0).unwrap());

        let utc_calendar = WeekCalendar::anchored_at(date(2025, 7, 10), Tz::UTC);
        let start = utc_calendar.start_of_day(date(2025, 7, 15)).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 7, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_start_of_day_when_midnight_is_skipped() {
        // Chile moves clocks from 00:00 to 01:00 on 7 Sep 2025
        let tz: Tz = "America/Santiago".parse().unwrap();
        let calendar = WeekCalendar::anchored_at(date(2025, 9, 7), tz);

        let start = calendar.start_of_day(date(2025, 9, 7)).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 9, 7, 4, 0, 0).unwrap());
        assert_eq!(
            start.with_timezone(&tz).naive_local(),
            date(2025, 9, 7).and_hms_opt(1, 0, 0).unwrap()
        );

        let next = calendar.start_of_day(date(2025, 9, 8)).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 9, 8, 3, 0, 0).unwrap());
    }

    #[test]
    fn test_is_today() {
        let calendar = WeekCalendar::new(Tz::UTC);
        let today = Utc::now().date_naive();
        // Guard against the test straddling midnight
        if calendar.today() == today {
            assert!(calendar.is_today(today));
            assert!(!calendar.is_today(today.pred_opt().unwrap()));
        }
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Europe/Zurich").unwrap(), Tz::Europe__Zurich);
        assert_eq!(
            parse_timezone("Mars/Olympus_Mons"),
            Err(CalendarError::InvalidTimezone("Mars/Olympus_Mons".to_string()))
        );
    }

    #[test]
    fn test_from_config() {
        let config = stationcal_config::CalendarConfig {
            timezone: "Asia/Tokyo".to_string(),
        };
        let calendar = WeekCalendar::from_config(&config).unwrap();
        assert_eq!(calendar.timezone(), Tz::Asia__Tokyo);

        let bad = stationcal_config::CalendarConfig {
            timezone: "Nowhere".to_string(),
        };
        assert!(WeekCalendar::from_config(&bad).is_err());
    }
}
