use crate::config::CalendarConfig;
use crate::day::CalendarDay;
use crate::generate::{disable_extended_dates, end_of_week, start_of_week, SequenceGenerator};
use crate::pager::{Jump, Pager};
use crate::select::{HoverOptions, SelectRangeOptions, Selector};
use crate::week::{generate_week, week_of_year, wrap_by_week, WeekPage};
use std::rc::Rc;
use time::{Date, Duration, Month};

/// Week-view behavior switches.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WeeklyOptions {
    /// Allow paging past the cached window in either direction.
    pub infinite: bool,
}

/// A paged week calendar with selection state.
///
/// Pages are keyed by the `week_year * 100 + week_number` composite, so
/// keys are ordered chronologically but not contiguous across year
/// boundaries; navigation therefore steps by date rather than by key.
#[derive(Debug)]
pub struct WeeklyCalendar {
    gen: SequenceGenerator,
    pager: Pager<WeekPage>,
    selector: Selector,
}

impl WeeklyCalendar {
    pub(crate) fn new(config: Rc<CalendarConfig>, opts: WeeklyOptions) -> WeeklyCalendar {
        let gen = SequenceGenerator::new(config.clone());
        let first_day_of_week = config.first_day_of_week;
        let from = start_of_week(config.start_on, first_day_of_week);
        let to = end_of_week(config.max_date.unwrap_or(config.start_on), first_day_of_week);
        let pages = wrap_by_week(gen.generate(from, to), &gen);
        let (week_year, week_number) = week_of_year(config.start_on, first_day_of_week);
        let current = week_year * 100 + i32::from(week_number);
        let mut calendar = WeeklyCalendar {
            gen,
            pager: Pager::new(pages, current, opts.infinite),
            selector: Selector::new(None),
        };
        calendar.refresh();
        let days = calendar.pager.days();
        calendar.selector.init(&days);
        calendar.selector.resync(&days);
        calendar
    }

    /// Semantic index of the displayed week
    /// (`week_year * 100 + week_number`).
    pub fn current_index(&self) -> i32 {
        self.pager.current_index()
    }

    pub fn current_week_number(&self) -> u8 {
        u8::try_from(self.pager.current_index().rem_euclid(100)).unwrap_or(0)
    }

    /// Calendar month of the displayed week's first day, when the page
    /// is materialized.
    pub fn current_month(&self) -> Option<Month> {
        self.pager.current().map(WeekPage::month)
    }

    pub fn current_year(&self) -> Option<i32> {
        self.pager.current().map(WeekPage::year)
    }

    pub fn current_page(&self) -> Option<&WeekPage> {
        self.pager.current()
    }

    /// Cached pages in chronological order.
    pub fn pages(&self) -> impl Iterator<Item = &WeekPage> {
        self.pager.pages()
    }

    pub fn page_count(&self) -> usize {
        self.pager.len()
    }

    /// Every cached day, in display order.
    pub fn days(&self) -> Vec<CalendarDay> {
        self.pager.days()
    }

    pub fn prev_page_enabled(&self) -> bool {
        self.pager.prev_enabled()
    }

    pub fn next_page_enabled(&self) -> bool {
        self.pager.next_enabled()
    }

    pub fn next_page(&mut self) {
        self.step(1);
    }

    pub fn prev_page(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, weeks: i64) {
        let Some(first) = self
            .pager
            .current()
            .and_then(|page| page.days().first().map(CalendarDay::date))
        else {
            return;
        };
        if let Some(target) = first.checked_add(Duration::weeks(weeks)) {
            self.jump_to(target);
        }
    }

    /// Display the week containing `date`, materializing its page if
    /// needed.
    pub fn jump_to(&mut self, date: Date) {
        let first_day_of_week = self.gen.config().first_day_of_week;
        let (week_year, week_number) = week_of_year(date, first_day_of_week);
        let target = week_year * 100 + i32::from(week_number);
        let gen = &self.gen;
        let outcome = self
            .pager
            .jump_to(target, |_| generate_week(week_year, week_number, gen));
        if outcome == Jump::Generated {
            self.refresh();
            self.selector.resync(&self.pager.days());
        }
    }

    /// Re-apply the min/max disablement window over every cached day.
    fn refresh(&self) {
        let days = self.pager.days();
        let config = self.gen.config();
        disable_extended_dates(&days, config.min_date, config.max_date);
    }

    pub fn select_single(&mut self, date: Date) {
        let days = self.pager.days();
        self.selector.select_single(&days, date);
    }

    pub fn select_range(&mut self, date: Date, opts: SelectRangeOptions) {
        let days = self.pager.days();
        self.selector.select_range(&days, date, opts);
    }

    pub fn select_multiple(&mut self, date: Date) {
        let days = self.pager.days();
        self.selector.select_multiple(&days, date);
    }

    pub fn hover(&self, date: Date, opts: HoverOptions) {
        self.selector.hover_multiple(&self.pager.days(), date, opts);
    }

    pub fn reset_hover(&self) {
        self.selector.reset_hover(&self.pager.days());
    }

    pub fn reset_selection(&mut self) {
        let days = self.pager.days();
        self.selector.reset_selection(&days);
    }

    /// Selected dates in click order.
    pub fn selection(&self) -> &[Date] {
        self.selector.selection()
    }

    pub fn selected_days(&self) -> Vec<CalendarDay> {
        self.selector.selected_days(&self.pager.days())
    }

    pub fn hovered_days(&self) -> Vec<CalendarDay> {
        self.selector.hovered_days(&self.pager.days())
    }

    pub fn between_days(&self) -> Vec<CalendarDay> {
        self.selector.between_dates(&self.pager.days())
    }
}
