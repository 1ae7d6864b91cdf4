//! Paged calendar engine: day generation, month & week paging, and
//! selection state for calendar UIs.
//!
//! A [`Calendar`] normalizes the construction options once and hands
//! out view facades sharing that configuration: [`MonthlyCalendar`]
//! pages by month (optionally padding boundary weeks with neighboring
//! days), [`WeeklyCalendar`] pages by week.  Both cache their pages,
//! materialize missing ones lazily as navigation reaches them, and
//! carry single-date, multi-date, and range selection with hover
//! previews across all cached pages.
//!
//! ```
//! use calkit::{Calendar, CalendarOptions, MonthlyOptions};
//!
//! let calendar = Calendar::new(CalendarOptions {
//!     start_on: Some("2024-06-15".into()),
//!     ..CalendarOptions::default()
//! });
//! let mut monthly = calendar.monthly(MonthlyOptions::default());
//! assert_eq!(monthly.current_month(), time::Month::June);
//! monthly.next_page();
//! assert_eq!(monthly.current_month(), time::Month::July);
//! ```
mod config;
mod day;
mod generate;
mod month;
mod monthly;
mod pager;
mod select;
mod week;
mod weekdays;
mod weekly;

pub use crate::config::{CalendarOptions, DateInput, DateParseError, DisabledDates};
pub use crate::day::{
    index_to_month, index_to_year, month_year_index, CalendarDay, DayExtension, DayFactory,
};
pub use crate::month::MonthPage;
pub use crate::monthly::{MonthlyCalendar, MonthlyOptions};
pub use crate::select::{HoverOptions, SelectRangeOptions};
pub use crate::week::WeekPage;
pub use crate::weekdays::{Locale, WeekdayFormat};
pub use crate::weekly::{WeeklyCalendar, WeeklyOptions};

use crate::config::CalendarConfig;
use std::rc::Rc;

/// Shared entry point for the month and week views.
///
/// Construction never fails: malformed options are logged and degrade
/// to their documented defaults.
#[derive(Clone, Debug)]
pub struct Calendar {
    config: Rc<CalendarConfig>,
}

impl Calendar {
    pub fn new(options: CalendarOptions) -> Calendar {
        Calendar {
            config: Rc::new(CalendarConfig::normalize(options)),
        }
    }

    pub fn monthly(&self, opts: MonthlyOptions) -> MonthlyCalendar {
        MonthlyCalendar::new(self.config.clone(), opts)
    }

    pub fn weekly(&self, opts: WeeklyOptions) -> WeeklyCalendar {
        WeeklyCalendar::new(self.config.clone(), opts)
    }

    /// Seven weekday labels, starting at the configured first day of
    /// the week.
    pub fn weekdays(&self, format: WeekdayFormat) -> Vec<String> {
        weekdays::weekday_labels(&self.config, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Month;

    #[test]
    fn test_facades_share_configuration() {
        let calendar = Calendar::new(CalendarOptions {
            start_on: Some(date!(2024 - 06 - 15).into()),
            first_day_of_week: 1,
            ..CalendarOptions::default()
        });
        let monthly = calendar.monthly(MonthlyOptions::default());
        let weekly = calendar.weekly(WeeklyOptions::default());
        assert_eq!(monthly.current_month(), Month::June);
        // Monday-first week containing June 15th.
        assert_eq!(
            weekly
                .current_page()
                .expect("current page should exist")
                .days()[0]
                .date(),
            date!(2024 - 06 - 10)
        );
        assert_eq!(
            calendar.weekdays(WeekdayFormat::Narrow),
            ["M", "T", "W", "T", "F", "S", "S"]
        );
    }

    #[test]
    fn test_string_options_parse() {
        let calendar = Calendar::new(CalendarOptions {
            start_on: Some("2024-02-29".into()),
            ..CalendarOptions::default()
        });
        let monthly = calendar.monthly(MonthlyOptions::default());
        assert_eq!(monthly.current_month(), Month::February);
        assert_eq!(monthly.current_year(), 2024);
    }
}
