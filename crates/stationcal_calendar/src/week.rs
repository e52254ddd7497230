use chrono::{DateTime, Datelike, Days, Duration, LocalResult, NaiveDate, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use stationcal_common::models::Booking;
use stationcal_config::CalendarConfig;
use tracing::{debug, info, warn};

use crate::classify::BookingClassifier;
use crate::error::CalendarError;

/// Seven consecutive calendar days, Monday through Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WeekWindow {
    days: [NaiveDate; 7],
}

impl WeekWindow {
    /// The Monday-start week containing `date`.
    ///
    /// chrono's date range does not start on a Monday or end on a Sunday.
    /// Dates in those partial weeks at either end map to the nearest
    /// complete week instead, so every window holds seven consecutive days.
    pub fn containing(date: NaiveDate) -> Self {
        let toward_epoch = |d: &NaiveDate| {
            if d.year() > 0 {
                d.pred_opt()
            } else {
                d.succ_opt()
            }
        };
        std::iter::successors(Some(date), toward_epoch)
            .find_map(Self::try_containing)
            .unwrap_or_else(|| {
                // Unreachable: a complete week lies within six days of any date
                warn!("No complete week near {}", date);
                Self { days: [date; 7] }
            })
    }

    /// The Monday-start week containing `date`, or `None` when that week runs
    /// past either end of chrono's date range.
    pub fn try_containing(date: NaiveDate) -> Option<Self> {
        let offset = u64::from(date.weekday().num_days_from_monday());
        let monday = date.checked_sub_days(Days::new(offset))?;
        let sunday = monday.checked_add_days(Days::new(6))?;
        let mut days = [monday; 7];
        for (day, next) in days.iter_mut().zip(monday.iter_days()) {
            *day = next;
        }
        debug_assert_eq!(days[6], sunday);
        Some(Self { days })
    }

    pub fn days(&self) -> &[NaiveDate; 7] {
        &self.days
    }

    /// The Monday of the week.
    pub fn first(&self) -> NaiveDate {
        self.days[0]
    }

    /// The Sunday of the week.
    pub fn last(&self) -> NaiveDate {
        self.days[6]
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first() <= date && date <= self.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().copied()
    }
}

impl std::ops::Index<usize> for WeekWindow {
    type Output = NaiveDate;

    fn index(&self, index: usize) -> &NaiveDate {
        &self.days[index]
    }
}

impl IntoIterator for WeekWindow {
    type Item = NaiveDate;
    type IntoIter = std::array::IntoIter<NaiveDate, 7>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.into_iter()
    }
}

/// Parses an IANA time zone name such as `Europe/Zurich`.
pub fn parse_timezone(name: &str) -> Result<Tz, CalendarError> {
    name.parse::<Tz>()
        .map_err(|_| CalendarError::InvalidTimezone(name.to_string()))
}

/// Formats a day as `Thu 10 Jul 2025`.
///
/// chrono's English month and weekday names do not depend on the process
/// locale, so the output is stable.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%a %d %b %Y").to_string()
}

/// Week navigation around a single anchor date.
///
/// Every window is derived from the anchor on demand; navigation moves the
/// anchor by whole weeks, so repeated back-and-forth never drifts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekCalendar {
    anchor: NaiveDate,
    tz: Tz,
}

impl WeekCalendar {
    /// A calendar anchored on today's date in `tz`.
    pub fn new(tz: Tz) -> Self {
        Self::anchored_at(Utc::now().with_timezone(&tz).date_naive(), tz)
    }

    pub fn anchored_at(anchor: NaiveDate, tz: Tz) -> Self {
        Self { anchor, tz }
    }

    pub fn from_config(config: &CalendarConfig) -> Result<Self, CalendarError> {
        Ok(Self::new(parse_timezone(&config.timezone)?))
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// A classifier that maps instants to days in this calendar's time zone.
    pub fn classifier(&self) -> BookingClassifier {
        BookingClassifier::new(self.tz)
    }

    pub fn current_week(&self) -> WeekWindow {
        WeekWindow::containing(self.anchor)
    }

    pub fn next_week(&mut self) -> WeekWindow {
        match self.anchor.checked_add_days(Days::new(7)) {
            Some(anchor) => self.anchor = anchor,
            None => warn!("Cannot move past {}, staying on current week", self.anchor),
        }
        debug!("Moved to week of {}", self.anchor);
        self.current_week()
    }

    pub fn previous_week(&mut self) -> WeekWindow {
        match self.anchor.checked_sub_days(Days::new(7)) {
            Some(anchor) => self.anchor = anchor,
            None => warn!("Cannot move before {}, staying on current week", self.anchor),
        }
        debug!("Moved to week of {}", self.anchor);
        self.current_week()
    }

    /// Sets the anchor to `date` and returns its week.
    pub fn go_to(&mut self, date: NaiveDate) -> WeekWindow {
        self.anchor = date;
        self.current_week()
    }

    /// Jumps to the week of the booking boundary closest to now.
    pub fn jump_to_nearest_booking_date(&mut self, bookings: &[Booking]) -> WeekWindow {
        self.jump_to_nearest_booking_date_from(bookings, Utc::now())
    }

    /// Jumps to the week of the booking boundary closest to `now`.
    ///
    /// Start and end of every booking are candidates, visited in booking
    /// order; on equal distance the first candidate wins. Boundaries that do
    /// not parse are skipped. Without any candidate the anchor is unchanged.
    pub fn jump_to_nearest_booking_date_from(
        &mut self,
        bookings: &[Booking],
        now: DateTime<Utc>,
    ) -> WeekWindow {
        let mut closest: Option<(DateTime<Utc>, u64)> = None;

        for booking in bookings {
            for boundary in [booking.start(), booking.end()] {
                let instant = match boundary {
                    Ok(instant) => instant,
                    Err(e) => {
                        warn!("Skipping boundary of booking {}: {}", booking.id, e);
                        continue;
                    }
                };
                let distance = now
                    .signed_duration_since(instant)
                    .num_milliseconds()
                    .unsigned_abs();
                if closest.map_or(true, |(_, best)| distance < best) {
                    closest = Some((instant, distance));
                }
            }
        }

        if let Some((instant, _)) = closest {
            self.anchor = instant.with_timezone(&self.tz).date_naive();
            info!("Jumped to nearest booking date {}", self.anchor);
        }
        self.current_week()
    }

    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }

    pub fn is_today(&self, date: NaiveDate) -> bool {
        date == self.today()
    }

    /// The instant at which `date` begins in the calendar time zone.
    ///
    /// Used to turn a drop target day into the timestamp stored on a booking.
    /// When a DST change skips local midnight, the day begins at the first
    /// local instant after the gap.
    pub fn start_of_day(&self, date: NaiveDate) -> Result<DateTime<Utc>, CalendarError> {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or(CalendarError::NonexistentLocalTime(date))?;
        match self.tz.from_local_datetime(&midnight) {
            LocalResult::Single(local) | LocalResult::Ambiguous(local, _) => {
                Ok(local.with_timezone(&Utc))
            }
            LocalResult::None => {
                // Reading midnight with the offset in force before the gap
                // lands on the transition itself.
                let day_before = midnight
                    .checked_sub_signed(Duration::days(1))
                    .ok_or(CalendarError::NonexistentLocalTime(date))?;
                let offset = self.tz.offset_from_utc_datetime(&day_before).fix();
                let utc = midnight
                    .checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))
                    .ok_or(CalendarError::NonexistentLocalTime(date))?;
                debug!("Local midnight of {} skipped, day starts at {}Z", date, utc);
                Ok(Utc.from_utc_datetime(&utc))
            }
        }
    }

    pub fn format_display_date(date: NaiveDate) -> String {
        format_display_date(date)
    }
}
