use crate::config::CalendarConfig;
use crate::day::CalendarDay;
use std::rc::Rc;
use time::{Date, Duration};

/// Produces contiguous runs of [`CalendarDay`] entities, seeded with
/// the normalized configuration so disablement and pre-selection flags
/// are applied at generation time.
#[derive(Clone, Debug)]
pub(crate) struct SequenceGenerator {
    config: Rc<CalendarConfig>,
}

impl SequenceGenerator {
    pub(crate) fn new(config: Rc<CalendarConfig>) -> SequenceGenerator {
        SequenceGenerator { config }
    }

    /// Every date from `from` through `to` inclusive, ascending.
    ///
    /// A reversed range is not an error: the `from` day is always
    /// emitted, so the minimum output is a single-day sequence.
    pub(crate) fn generate(&self, from: Date, to: Date) -> Vec<CalendarDay> {
        std::iter::successors(Some(from), |&date| {
            (date < to).then(|| date.next_day()).flatten()
        })
        .map(|date| self.make(date))
        .collect()
    }

    fn make(&self, date: Date) -> CalendarDay {
        let day = self.config.factory.make(date);
        day.set_disabled(self.config.is_disabled(date));
        day.set_selected(self.config.is_pre_selected(date));
        day
    }

    pub(crate) fn config(&self) -> &CalendarConfig {
        &self.config
    }
}

/// Force-disable every day outside the inclusive `[min, max]` window.
pub(crate) fn disable_extended_dates(
    days: &[CalendarDay],
    min: Option<Date>,
    max: Option<Date>,
) {
    for day in days {
        let below = min.is_some_and(|m| day.date() < m);
        let above = max.is_some_and(|m| day.date() > m);
        if below || above {
            day.set_disabled(true);
        }
    }
}

/// The days strictly between two dates, by sequence position within
/// `days` rather than by chronological comparison.  The lower position
/// is always treated as the range start; endpoints are excluded.
/// Either endpoint missing from `days` yields an empty slice.
pub(crate) fn between_days(days: &[CalendarDay], first: Date, second: Date) -> &[CalendarDay] {
    let a = days.iter().position(|day| day.date() == first);
    let b = days.iter().position(|day| day.date() == second);
    if let (Some(a), Some(b)) = (a, b) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        &days[lo + 1..hi]
    } else {
        &[]
    }
}

pub(crate) fn start_of_month(date: Date) -> Date {
    date.replace_day(1).unwrap_or(date)
}

pub(crate) fn end_of_month(date: Date) -> Date {
    date.replace_day(date.month().length(date.year()))
        .unwrap_or(date)
}

/// Days since the start of the week containing `date`, where weeks
/// begin at the `first_day_of_week` offset (0 = Sunday).
pub(crate) fn days_into_week(date: Date, first_day_of_week: u8) -> u8 {
    (date.weekday().number_days_from_sunday() + 7 - first_day_of_week) % 7
}

pub(crate) fn start_of_week(date: Date, first_day_of_week: u8) -> Date {
    date.checked_sub(Duration::days(i64::from(days_into_week(date, first_day_of_week))))
        .unwrap_or(date)
}

pub(crate) fn end_of_week(date: Date, first_day_of_week: u8) -> Date {
    let offset = 6 - days_into_week(date, first_day_of_week);
    date.checked_add(Duration::days(i64::from(offset)))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CalendarOptions, DisabledDates};
    use time::macros::date;

    fn generator(opts: CalendarOptions) -> SequenceGenerator {
        SequenceGenerator::new(Rc::new(CalendarConfig::normalize(opts)))
    }

    #[test]
    fn test_generate_inclusive_run() {
        let days = generator(CalendarOptions::default())
            .generate(date!(2024 - 06 - 01), date!(2024 - 07 - 10));
        assert_eq!(days.len(), 40);
        assert!(days.windows(2).all(|w| w[0].date().next_day() == Some(w[1].date())));
        assert!(days
            .windows(2)
            .all(|w| w[0].month_year_index() <= w[1].month_year_index()));
    }

    #[test]
    fn test_generate_single_day() {
        let days = generator(CalendarOptions::default())
            .generate(date!(2024 - 06 - 15), date!(2024 - 06 - 15));
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date(), date!(2024 - 06 - 15));
    }

    #[test]
    fn test_generate_reversed_range_collapses_to_one_day() {
        let days = generator(CalendarOptions::default())
            .generate(date!(2024 - 06 - 15), date!(2024 - 06 - 01));
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date(), date!(2024 - 06 - 15));
    }

    #[test]
    fn test_generate_applies_disabled_and_pre_selection() {
        let days = generator(CalendarOptions {
            disabled: DisabledDates::List(vec![date!(2024 - 06 - 02).into()]),
            pre_selection: vec![date!(2024 - 06 - 03).into()],
            ..CalendarOptions::default()
        })
        .generate(date!(2024 - 06 - 01), date!(2024 - 06 - 04));
        let flags: Vec<(bool, bool)> = days
            .iter()
            .map(|day| (day.disabled(), day.is_selected()))
            .collect();
        assert_eq!(
            flags,
            [(false, false), (true, false), (false, true), (false, false)]
        );
    }

    #[test]
    fn test_disable_extended_dates() {
        let days = generator(CalendarOptions::default())
            .generate(date!(2024 - 06 - 01), date!(2024 - 06 - 10));
        disable_extended_dates(&days, Some(date!(2024 - 06 - 03)), Some(date!(2024 - 06 - 08)));
        let disabled: Vec<bool> = days.iter().map(CalendarDay::disabled).collect();
        assert_eq!(
            disabled,
            [true, true, false, false, false, false, false, false, true, true]
        );
    }

    #[test]
    fn test_between_days_excludes_endpoints() {
        let days = generator(CalendarOptions::default())
            .generate(date!(2024 - 06 - 01), date!(2024 - 06 - 10));
        let between = between_days(&days, date!(2024 - 06 - 03), date!(2024 - 06 - 07));
        let dates = between.iter().map(CalendarDay::date).collect::<Vec<_>>();
        assert_eq!(
            dates,
            vec![date!(2024 - 06 - 04), date!(2024 - 06 - 05), date!(2024 - 06 - 06)]
        );
        // Order of the endpoints does not matter:
        assert_eq!(
            between_days(&days, date!(2024 - 06 - 07), date!(2024 - 06 - 03)),
            between
        );
        assert!(between_days(&days, date!(2024 - 06 - 03), date!(2024 - 07 - 01)).is_empty());
    }

    #[test]
    fn test_week_bounds() {
        // 2024-06-15 is a Saturday.
        assert_eq!(start_of_week(date!(2024 - 06 - 15), 0), date!(2024 - 06 - 09));
        assert_eq!(end_of_week(date!(2024 - 06 - 15), 0), date!(2024 - 06 - 15));
        assert_eq!(start_of_week(date!(2024 - 06 - 15), 1), date!(2024 - 06 - 10));
        assert_eq!(end_of_week(date!(2024 - 06 - 15), 1), date!(2024 - 06 - 16));
        assert_eq!(start_of_week(date!(2024 - 06 - 09), 0), date!(2024 - 06 - 09));
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(start_of_month(date!(2024 - 02 - 15)), date!(2024 - 02 - 01));
        assert_eq!(end_of_month(date!(2024 - 02 - 15)), date!(2024 - 02 - 29));
        assert_eq!(end_of_month(date!(2023 - 02 - 15)), date!(2023 - 02 - 28));
    }
}
