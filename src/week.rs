use crate::day::CalendarDay;
use crate::generate::{start_of_week, SequenceGenerator};
use crate::pager::Page;
use time::{Date, Duration, Month};

const DAYS_IN_WEEK: usize = 7;

/// One week page.  `week_number` counts from the week containing
/// January 1st, with weeks starting on the configured first day of the
/// week; `index` is the `week_year * 100 + week_number` composite.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WeekPage {
    index: i32,
    week_number: u8,
    month: Month,
    year: i32,
    days: Vec<CalendarDay>,
}

impl WeekPage {
    fn from_days(days: Vec<CalendarDay>, first_day_of_week: u8) -> Option<WeekPage> {
        let first = days.first()?;
        let (week_year, week_number) = week_of_year(first.date(), first_day_of_week);
        Some(WeekPage {
            index: week_year * 100 + i32::from(week_number),
            week_number,
            month: first.date().month(),
            year: first.date().year(),
            days,
        })
    }

    /// Semantic page key (`week_year * 100 + week_number`).
    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn week_number(&self) -> u8 {
        self.week_number
    }

    /// Calendar month and year of the week's first day.
    pub fn month(&self) -> Month {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }
}

impl Page for WeekPage {
    fn index(&self) -> i32 {
        self.index
    }

    fn days(&self) -> &[CalendarDay] {
        &self.days
    }
}

/// Week-numbering year and week number of the week containing `date`.
/// Week 1 is the week containing January 1st of the week-numbering
/// year.
pub(crate) fn week_of_year(date: Date, first_day_of_week: u8) -> (i32, u8) {
    let week_start = start_of_week(date, first_day_of_week);
    for week_year in [date.year() + 1, date.year(), date.year() - 1] {
        let Some(year_start) = start_of_week_year(week_year, first_day_of_week) else {
            continue;
        };
        if week_start >= year_start {
            let weeks = (week_start - year_start).whole_days() / 7;
            let week_number = u8::try_from(weeks + 1).unwrap_or(1);
            return (week_year, week_number);
        }
    }
    (date.year(), 1)
}

/// Start of week 1 of the given week-numbering year.
fn start_of_week_year(week_year: i32, first_day_of_week: u8) -> Option<Date> {
    let jan1 = Date::from_calendar_date(week_year, Month::January, 1).ok()?;
    Some(start_of_week(jan1, first_day_of_week))
}

/// Partition a sorted day run into week pages.  A leading partial week
/// (days before the first week-start boundary) forms its own page.
pub(crate) fn wrap_by_week(days: Vec<CalendarDay>, gen: &SequenceGenerator) -> Vec<WeekPage> {
    let first_day_of_week = gen.config().first_day_of_week;
    let mut pages = Vec::new();
    let mut chunk: Vec<CalendarDay> = Vec::new();
    for day in days {
        let at_boundary = day.date().weekday().number_days_from_sunday() == first_day_of_week;
        if at_boundary && !chunk.is_empty() {
            pages.extend(WeekPage::from_days(std::mem::take(&mut chunk), first_day_of_week));
        }
        chunk.push(day);
        if chunk.len() == DAYS_IN_WEEK {
            pages.extend(WeekPage::from_days(std::mem::take(&mut chunk), first_day_of_week));
        }
    }
    if !chunk.is_empty() {
        pages.extend(WeekPage::from_days(chunk, first_day_of_week));
    }
    pages
}

/// Materialize the week page for `(week_year, week_number)` on demand.
/// `None` only at the edge of representable time.
pub(crate) fn generate_week(
    week_year: i32,
    week_number: u8,
    gen: &SequenceGenerator,
) -> Option<WeekPage> {
    let first_day_of_week = gen.config().first_day_of_week;
    let year_start = start_of_week_year(week_year, first_day_of_week)?;
    let from = year_start
        .checked_add(Duration::weeks(i64::from(week_number).checked_sub(1)?))
        .filter(|_| week_number >= 1)?;
    let to = from.checked_add(Duration::days(6))?;
    WeekPage::from_days(gen.generate(from, to), first_day_of_week)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CalendarConfig, CalendarOptions};
    use std::rc::Rc;
    use time::macros::date;

    fn generator(first_day_of_week: u8) -> SequenceGenerator {
        SequenceGenerator::new(Rc::new(CalendarConfig::normalize(CalendarOptions {
            first_day_of_week,
            ..CalendarOptions::default()
        })))
    }

    #[test]
    fn test_week_of_year_january() {
        // 2024-01-01 is a Monday.
        assert_eq!(week_of_year(date!(2024 - 01 - 01), 0), (2024, 1));
        assert_eq!(week_of_year(date!(2024 - 01 - 07), 0), (2024, 2));
        assert_eq!(week_of_year(date!(2024 - 01 - 07), 1), (2024, 1));
        assert_eq!(week_of_year(date!(2024 - 01 - 08), 1), (2024, 2));
    }

    #[test]
    fn test_week_of_year_at_year_boundary() {
        // 2024-12-29 is a Sunday, in the same Sunday-first week as
        // 2025-01-01.
        assert_eq!(week_of_year(date!(2024 - 12 - 29), 0), (2025, 1));
        assert_eq!(week_of_year(date!(2024 - 12 - 28), 0), (2024, 52));
    }

    #[test]
    fn test_wrap_by_week_chunks_of_seven() {
        let gen = generator(0);
        // 2024-06-02 is a Sunday.
        let days = gen.generate(date!(2024 - 06 - 02), date!(2024 - 06 - 22));
        let pages = wrap_by_week(days, &gen);
        assert_eq!(pages.len(), 3);
        assert!(pages.iter().all(|page| page.days().len() == 7));
        assert_eq!(pages[0].days()[0].date(), date!(2024 - 06 - 02));
        assert_eq!(pages[1].days()[0].date(), date!(2024 - 06 - 09));
        assert_eq!(pages[0].index() + 1, pages[1].index());
    }

    #[test]
    fn test_wrap_by_week_leading_partial_week() {
        let gen = generator(0);
        // Start mid-week: Wednesday through the following Saturday.
        let days = gen.generate(date!(2024 - 06 - 05), date!(2024 - 06 - 15));
        let pages = wrap_by_week(days, &gen);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].days().len(), 4);
        assert_eq!(pages[1].days().len(), 7);
    }

    #[test]
    fn test_generate_week_round_trips_index() {
        let gen = generator(1);
        let days = gen.generate(date!(2024 - 06 - 10), date!(2024 - 06 - 16));
        let pages = wrap_by_week(days, &gen);
        let page = &pages[0];
        let regenerated = generate_week(page.index() / 100, u8::try_from(page.index() % 100).unwrap_or(0), &gen)
            .expect("week generation should succeed");
        assert_eq!(regenerated.index(), page.index());
        assert_eq!(regenerated.days()[0].date(), date!(2024 - 06 - 10));
        assert_eq!(regenerated.week_number(), page.week_number());
    }

    #[test]
    fn test_week_page_metadata() {
        let gen = generator(0);
        let days = gen.generate(date!(2024 - 06 - 02), date!(2024 - 06 - 08));
        let pages = wrap_by_week(days, &gen);
        let page = &pages[0];
        assert_eq!(page.year(), 2024);
        assert_eq!(page.month(), Month::June);
        assert_eq!(page.index(), 2024 * 100 + i32::from(page.week_number()));
    }
}
