use crate::config::CalendarConfig;
use crate::day::{month_year_index, CalendarDay};
use crate::generate::{disable_extended_dates, end_of_month, start_of_month, SequenceGenerator};
use crate::month::{generate_month, wrap_by_month, GenerateMonthOptions, MonthPage};
use crate::pager::{Jump, Page, Pager};
use crate::select::{HoverOptions, SelectRangeOptions, Selector};
use std::rc::Rc;
use time::{Date, Month};

/// Month-view behavior switches.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MonthlyOptions {
    /// Allow paging past the cached window in either direction.
    pub infinite: bool,
    /// Pad boundary weeks with other-month days so every rendered week
    /// has seven entries.
    pub full_weeks: bool,
    /// Pad every page out to six weeks regardless of month length.
    pub fixed_weeks: bool,
}

impl Default for MonthlyOptions {
    fn default() -> MonthlyOptions {
        MonthlyOptions {
            infinite: true,
            full_weeks: true,
            fixed_weeks: false,
        }
    }
}

/// A paged month calendar with selection state.
///
/// Pages are cached by month-year index and materialized lazily as
/// navigation reaches them.  All selection operations work over the
/// flattened day list of every cached page, so a range can span pages.
#[derive(Debug)]
pub struct MonthlyCalendar {
    gen: SequenceGenerator,
    pager: Pager<MonthPage>,
    selector: Selector,
    opts: MonthlyOptions,
}

impl MonthlyCalendar {
    pub(crate) fn new(config: Rc<CalendarConfig>, opts: MonthlyOptions) -> MonthlyCalendar {
        let gen = SequenceGenerator::new(config.clone());
        let from = start_of_month(config.start_on);
        let to = end_of_month(config.max_date.unwrap_or(config.start_on));
        let days = gen.generate(from, to);
        let pages = wrap_by_month(days, opts.full_weeks, opts.fixed_weeks, &gen);
        let pager = Pager::new(pages, month_year_index(config.start_on), opts.infinite);
        let pre_selected = config
            .pre_selection
            .iter()
            .filter_map(|&date| gen.generate(date, date).into_iter().next())
            .collect();
        let mut calendar = MonthlyCalendar {
            gen,
            pager,
            selector: Selector::new(Some(pre_selected)),
            opts,
        };
        // Months holding a pre-selected date must exist up front so the
        // selection is visible without navigating there first.
        let pre_indices: Vec<i32> = calendar
            .gen
            .config()
            .pre_selection
            .iter()
            .map(|&date| month_year_index(date))
            .collect();
        for index in pre_indices {
            calendar.materialize(index);
        }
        calendar.refresh();
        let days = calendar.pager.days();
        calendar.selector.init(&days);
        calendar.selector.resync(&days);
        calendar
    }

    /// Semantic index of the displayed month (`year * 12 + month0`).
    pub fn current_index(&self) -> i32 {
        self.pager.current_index()
    }

    pub fn current_month(&self) -> Month {
        crate::day::index_to_month(self.pager.current_index())
    }

    pub fn current_year(&self) -> i32 {
        crate::day::index_to_year(self.pager.current_index())
    }

    pub fn current_page(&self) -> Option<&MonthPage> {
        self.pager.current()
    }

    /// Cached pages in chronological order.
    pub fn pages(&self) -> impl Iterator<Item = &MonthPage> {
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
        self.jump_to_index(self.pager.current_index() + 1);
    }

    pub fn prev_page(&mut self) {
        self.jump_to_index(self.pager.current_index() - 1);
    }

    /// Display the given month, materializing its page if needed.
    pub fn jump_to(&mut self, year: i32, month: Month) {
        let month0 = i32::from(u8::from(month)) - 1;
        self.jump_to_index(year * 12 + month0);
    }

    fn jump_to_index(&mut self, target: i32) {
        let gen = &self.gen;
        let opts = self.opts;
        let outcome = self.pager.jump_to(target, |pages| {
            let before = pages.get(&(target - 1)).map(Page::days).unwrap_or(&[]);
            let after = pages.get(&(target + 1)).map(Page::days).unwrap_or(&[]);
            generate_month(
                target,
                GenerateMonthOptions {
                    other_month_days: opts.full_weeks,
                    fixed_weeks: opts.fixed_weeks,
                    before_days: before,
                    after_days: after,
                },
                gen,
            )
        });
        if outcome == Jump::Generated {
            self.refresh();
            self.selector.resync(&self.pager.days());
        }
    }

    /// Materialize a page without moving the current-page pointer.
    fn materialize(&mut self, target: i32) {
        let gen = &self.gen;
        let opts = self.opts;
        self.pager.ensure(target, |pages| {
            let before = pages.get(&(target - 1)).map(Page::days).unwrap_or(&[]);
            let after = pages.get(&(target + 1)).map(Page::days).unwrap_or(&[]);
            generate_month(
                target,
                GenerateMonthOptions {
                    other_month_days: opts.full_weeks,
                    fixed_weeks: opts.fixed_weeks,
                    before_days: before,
                    after_days: after,
                },
                gen,
            )
        });
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
