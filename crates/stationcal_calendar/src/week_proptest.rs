#[cfg(test)]
mod tests {
    use crate::week::{WeekCalendar, WeekWindow};
    use chrono::{Datelike, Days, NaiveDate, Weekday};
    use chrono_tz::Tz;
    use proptest::prelude::*;

    // Dates between 1970 and roughly 2100, far from chrono's range limits
    fn arb_date() -> impl Strategy<Value = NaiveDate> {
        (0u64..47_000).prop_map(|offset| {
            NaiveDate::from_ymd_opt(1970, 1, 1)
                .unwrap()
                .checked_add_days(Days::new(offset))
                .unwrap()
        })
    }

    proptest! {
        // Every window starts on Monday, ends on Sunday and holds consecutive days
        #[test]
        fn test_window_shape(date in arb_date()) {
            let window = WeekWindow::containing(date);

            prop_assert_eq!(window.first().weekday(), Weekday::Mon);
            prop_assert_eq!(window.last().weekday(), Weekday::Sun);
            prop_assert!(window.contains(date));
            for (i, day) in window.iter().enumerate() {
                prop_assert_eq!(day, window.first() + Days::new(i as u64));
            }
        }

        // Every day of a window maps back to the same window
        #[test]
        fn test_window_is_stable_within_week(date in arb_date()) {
            let window = WeekWindow::containing(date);
            for day in window {
                prop_assert_eq!(WeekWindow::containing(day), window);
            }
        }

        // Moving forward n weeks and back n weeks restores the window
        #[test]
        fn test_navigation_round_trip(date in arb_date(), weeks in 0usize..60) {
            let mut calendar = WeekCalendar::anchored_at(date, Tz::UTC);
            let start = calendar.current_week();

            for _ in 0..weeks {
                let before = calendar.current_week();
                let after = calendar.next_week();
                prop_assert_eq!(after.first(), before.first() + Days::new(7));
            }
            for _ in 0..weeks {
                calendar.previous_week();
            }

            prop_assert_eq!(calendar.current_week(), start);
        }
    }
}
