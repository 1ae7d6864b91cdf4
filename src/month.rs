use crate::day::{index_to_month, index_to_year, CalendarDay};
use crate::generate::{end_of_month, end_of_week, start_of_week, SequenceGenerator};
use crate::pager::Page;
use time::{Date, Duration, Month};

/// Days that would pad a boundary week can overlap the neighboring
/// page by more than one week, so duplicate trimming looks this far
/// into the neighbor.
const DEDUPE_WINDOW: usize = 14;

const DAYS_IN_WEEK: usize = 7;

/// One month page: the month's days, optionally padded with
/// other-month days so every rendered week spans seven entries.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MonthPage {
    index: i32,
    days: Vec<CalendarDay>,
}

impl MonthPage {
    fn from_days(days: Vec<CalendarDay>) -> Option<MonthPage> {
        let rep = days.iter().find(|day| !day.other_month()).or_else(|| days.first())?;
        Some(MonthPage {
            index: rep.month_year_index(),
            days,
        })
    }

    /// Semantic page key (`year * 12 + month0`).
    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn year(&self) -> i32 {
        index_to_year(self.index)
    }

    pub fn month(&self) -> Month {
        index_to_month(self.index)
    }

    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }
}

impl Page for MonthPage {
    fn index(&self) -> i32 {
        self.index
    }

    fn days(&self) -> &[CalendarDay] {
        &self.days
    }
}

/// Partition a sorted day run into month pages keyed by
/// month-year-index.  With `other_month_days`, each page's boundary
/// weeks are padded using the previously built page as leading context.
pub(crate) fn wrap_by_month(
    days: Vec<CalendarDay>,
    other_month_days: bool,
    fixed_weeks: bool,
    gen: &SequenceGenerator,
) -> Vec<MonthPage> {
    let mut pages: Vec<MonthPage> = Vec::new();
    let mut iter = days.into_iter().peekable();
    while let Some(first) = iter.next() {
        let index = first.month_year_index();
        let mut month_days = vec![first];
        while let Some(day) = iter.next_if(|day| day.month_year_index() == index) {
            month_days.push(day);
        }
        if other_month_days {
            let before = pages.last().map(|page| page.days.as_slice()).unwrap_or(&[]);
            pad_other_month_days(&mut month_days, before, &[], fixed_weeks, gen);
        }
        if let Some(page) = MonthPage::from_days(month_days) {
            pages.push(page);
        }
    }
    pages
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct GenerateMonthOptions<'a> {
    pub(crate) other_month_days: bool,
    pub(crate) fixed_weeks: bool,
    pub(crate) before_days: &'a [CalendarDay],
    pub(crate) after_days: &'a [CalendarDay],
}

/// Materialize a single month page on demand, given whatever neighbor
/// days are already cached.  `None` only at the edge of representable
/// time.
pub(crate) fn generate_month(
    index: i32,
    opts: GenerateMonthOptions<'_>,
    gen: &SequenceGenerator,
) -> Option<MonthPage> {
    let first = Date::from_calendar_date(index_to_year(index), index_to_month(index), 1).ok()?;
    let mut days = gen.generate(first, end_of_month(first));
    if opts.other_month_days {
        pad_other_month_days(
            &mut days,
            opts.before_days,
            opts.after_days,
            opts.fixed_weeks,
            gen,
        );
    }
    MonthPage::from_days(days)
}

fn pad_other_month_days(
    days: &mut Vec<CalendarDay>,
    before: &[CalendarDay],
    after: &[CalendarDay],
    fixed_weeks: bool,
    gen: &SequenceGenerator,
) {
    if days.is_empty() {
        return;
    }
    complete_week_before(days, before, gen);
    complete_week_after(days, after, fixed_weeks, gen);
}

/// Pad the page's first partial week back to the week start.  When the
/// preceding page is available its trailing days are duplicated as
/// shadows (and the overlap trimmed); otherwise fresh other-month days
/// are generated.
fn complete_week_before(days: &mut Vec<CalendarDay>, previous: &[CalendarDay], gen: &SequenceGenerator) {
    let mut lead: Vec<CalendarDay>;
    if previous.is_empty() {
        let Some(first) = days.first() else {
            return;
        };
        let to = first.date();
        lead = gen.generate(start_of_week(to, gen.config().first_day_of_week), to);
        lead.pop();
        for day in &lead {
            day.set_other_month(true);
        }
    } else {
        let Some(first) = days.first() else {
            return;
        };
        let current_index = first.month_year_index();
        let window = &previous[previous.len().saturating_sub(DEDUPE_WINDOW)..];
        let duplicated = window
            .iter()
            .filter(|day| day.month_year_index() == current_index)
            .count();
        if duplicated == 0 {
            return;
        }
        days.drain(..duplicated.min(days.len()));
        let take = if duplicated > DAYS_IN_WEEK {
            2 * DAYS_IN_WEEK
        } else {
            DAYS_IN_WEEK
        };
        let tail = &previous[previous.len().saturating_sub(take)..];
        lead = tail.iter().map(CalendarDay::shadow).collect();
        // The instance rendered in its home page stays canonical; the
        // other one is flagged as the copy.
        for day in tail {
            day.set_copied(day.other_month());
        }
        for copy in &lead {
            copy.set_other_month(!copy.other_month());
            copy.set_copied(copy.other_month());
        }
    }
    lead.append(days);
    *days = lead;
}

/// Pad the page's last partial week out to the week end, plus extra
/// synthetic weeks when `fixed_weeks` wants every page six weeks tall.
fn complete_week_after(
    days: &mut Vec<CalendarDay>,
    following: &[CalendarDay],
    fixed_weeks: bool,
    gen: &SequenceGenerator,
) {
    let mut tail: Vec<CalendarDay>;
    if following.is_empty() {
        let Some(last) = days.last() else {
            return;
        };
        let from = last.date();
        let mut to = end_of_week(from, gen.config().first_day_of_week);
        if fixed_weeks && days.len() < 36 {
            if let Some(extra) = 6usize.checked_sub(days.len().div_ceil(DAYS_IN_WEEK)) {
                let weeks = i64::try_from(extra).unwrap_or(0);
                to = to.checked_add(Duration::weeks(weeks)).unwrap_or(to);
            }
        }
        tail = gen.generate(from, to);
        tail.drain(..1);
        for day in &tail {
            day.set_other_month(true);
        }
    } else {
        let full_weeks = days.len() / DAYS_IN_WEEK + usize::from(!fixed_weeks);
        let needed = DAYS_IN_WEEK * 6usize.saturating_sub(full_weeks);
        let next = &following[..needed.min(following.len())];
        tail = next.iter().map(CalendarDay::shadow).collect();
        for day in next {
            day.set_copied(day.other_month());
        }
        for copy in &tail {
            copy.set_other_month(!copy.other_month());
            copy.set_copied(copy.other_month());
        }
        if let Some(last) = days.last() {
            let current_index = last.month_year_index();
            let window = &following[..DEDUPE_WINDOW.min(following.len())];
            let duplicated = window
                .iter()
                .filter(|day| day.month_year_index() == current_index)
                .count();
            days.truncate(days.len().saturating_sub(duplicated));
        }
    }
    days.append(&mut tail);
}
