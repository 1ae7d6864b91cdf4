use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use time::{Date, Month, Weekday::*};

/// Hook for enriching freshly built [`CalendarDay`] values, e.g. by
/// attaching a custom payload or pre-setting flag cells.
pub type DayExtension = Rc<dyn Fn(CalendarDay) -> CalendarDay>;

/// Composite month key: `year * 12 + month0`, where `month0` is the
/// zero-based month.  Used for page bucketing and month comparisons
/// without constructing dates.
pub fn month_year_index(date: Date) -> i32 {
    date.year() * 12 + i32::from(u8::from(date.month())) - 1
}

pub fn index_to_year(index: i32) -> i32 {
    index.div_euclid(12)
}

pub fn index_to_month(index: i32) -> Month {
    let month0 = u8::try_from(index.rem_euclid(12)).unwrap_or(0);
    Month::try_from(month0 + 1).unwrap_or(Month::January)
}

/// Flag cells shared between a canonical day and all of its shadow
/// copies, so a mutation made through one page is visible from the
/// neighboring page rendering the same date.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct DayFlags {
    pub(crate) disabled: Cell<bool>,
    pub(crate) selected: Cell<bool>,
    pub(crate) between: Cell<bool>,
    pub(crate) hovered: Cell<bool>,
}

// Per-page markers: not shared with shadow copies, which carry the
// opposite `other_month` value to their canonical twin.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct PageMarks {
    other_month: Cell<bool>,
    copied: Cell<bool>,
}

/// One calendar date as rendered within some page.
///
/// Cloning yields another handle onto the same logical entity: the flag
/// cells and page markers stay shared.  [`CalendarDay::shadow`] is the
/// only way to get an independent duplicate, used by the month-padding
/// algorithm for boundary weeks.
#[derive(Clone)]
pub struct CalendarDay {
    date: Date,
    is_today: bool,
    is_weekend: bool,
    month_year_index: i32,
    marks: Rc<PageMarks>,
    flags: Rc<DayFlags>,
    custom: Option<Rc<dyn Any>>,
}

impl CalendarDay {
    fn new(date: Date, today: Date) -> CalendarDay {
        CalendarDay {
            date,
            is_today: date == today,
            is_weekend: matches!(date.weekday(), Saturday | Sunday),
            month_year_index: month_year_index(date),
            marks: Rc::new(PageMarks::default()),
            flags: Rc::new(DayFlags::default()),
            custom: None,
        }
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn is_today(&self) -> bool {
        self.is_today
    }

    pub fn is_weekend(&self) -> bool {
        self.is_weekend
    }

    pub fn month_year_index(&self) -> i32 {
        self.month_year_index
    }

    /// Stable string key of the form `year-month-day`.
    pub fn day_id(&self) -> String {
        format!(
            "{}-{}-{}",
            self.date.year(),
            u8::from(self.date.month()),
            self.date.day()
        )
    }

    pub fn other_month(&self) -> bool {
        self.marks.other_month.get()
    }

    pub(crate) fn set_other_month(&self, other_month: bool) {
        self.marks.other_month.set(other_month);
    }

    /// True for shadow duplicates created while padding a page's
    /// boundary weeks.  Shadow days are excluded from all selection
    /// logic so a date spanning two pages is never counted twice.
    pub fn is_copied(&self) -> bool {
        self.marks.copied.get()
    }

    pub(crate) fn set_copied(&self, copied: bool) {
        self.marks.copied.set(copied);
    }

    pub fn disabled(&self) -> bool {
        self.flags.disabled.get()
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.flags.disabled.set(disabled);
    }

    pub fn is_selected(&self) -> bool {
        self.flags.selected.get()
    }

    pub fn set_selected(&self, selected: bool) {
        self.flags.selected.set(selected);
    }

    pub fn is_between(&self) -> bool {
        self.flags.between.get()
    }

    pub fn set_between(&self, between: bool) {
        self.flags.between.set(between);
    }

    pub fn is_hovered(&self) -> bool {
        self.flags.hovered.get()
    }

    pub fn set_hovered(&self, hovered: bool) {
        self.flags.hovered.set(hovered);
    }

    /// Payload attached by a [`DayExtension`] hook, if any.
    pub fn custom(&self) -> Option<&Rc<dyn Any>> {
        self.custom.as_ref()
    }

    pub fn with_custom(mut self, custom: Rc<dyn Any>) -> CalendarDay {
        self.custom = Some(custom);
        self
    }

    /// Duplicate this day for boundary padding.  The flag cells stay
    /// shared with the canonical instance; the page markers are fresh,
    /// with `copied` set.
    pub(crate) fn shadow(&self) -> CalendarDay {
        CalendarDay {
            marks: Rc::new(PageMarks {
                other_month: Cell::new(self.other_month()),
                copied: Cell::new(true),
            }),
            ..self.clone()
        }
    }
}

impl fmt::Debug for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarDay")
            .field("date", &self.date)
            .field("is_today", &self.is_today)
            .field("is_weekend", &self.is_weekend)
            .field("month_year_index", &self.month_year_index)
            .field("other_month", &self.other_month())
            .field("copied", &self.is_copied())
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl PartialEq for CalendarDay {
    fn eq(&self, other: &CalendarDay) -> bool {
        self.date == other.date
            && self.is_today == other.is_today
            && self.is_weekend == other.is_weekend
            && self.marks == other.marks
            && self.flags == other.flags
    }
}

impl Eq for CalendarDay {}

/// Builds [`CalendarDay`] entities, running the caller-supplied
/// extension hook when one is configured.  "Today" is sampled once when
/// the factory is created, not per day.
#[derive(Clone)]
pub struct DayFactory {
    today: Date,
    extend: Option<DayExtension>,
}

impl DayFactory {
    pub(crate) fn new(today: Date, extend: Option<DayExtension>) -> DayFactory {
        DayFactory { today, extend }
    }

    pub fn make(&self, date: Date) -> CalendarDay {
        let day = CalendarDay::new(date, self.today);
        if let Some(f) = self.extend.as_ref() {
            f(day)
        } else {
            day
        }
    }
}

impl fmt::Debug for DayFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DayFactory")
            .field("today", &self.today)
            .field("extend", &self.extend.as_ref().map(|_| "..."))
            .finish()
    }
}
