use crate::day::CalendarDay;
use crate::generate::between_days;
use log::debug;
use time::Date;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SelectRangeOptions {
    /// Reject the click if the resulting span would cross a disabled
    /// day or overlap another pending range.
    pub strict: bool,
    /// Allow more than one range (more than two selected dates).
    pub multiple: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct HoverOptions {
    /// Reject the preview if the prospective span crosses a disabled,
    /// selected, or between-flagged day.
    pub strict: bool,
}

/// Selection, range, and hover state over a flattened day list.
///
/// The ordered `selection` date list is the source of truth; every
/// mutating operation ends with a resynchronization pass that rewrites
/// the `selected`/`between` flags on the days, so derived state is
/// consistent by the time the call returns.  Shadow (copied) days are
/// excluded from all selection logic.
#[derive(Clone, Debug, Default)]
pub(crate) struct Selector {
    selection: Vec<Date>,
    range_markers: Vec<Date>,
    pre_selected: Option<Vec<CalendarDay>>,
}

impl Selector {
    pub(crate) fn new(pre_selected: Option<Vec<CalendarDay>>) -> Selector {
        Selector {
            selection: Vec::new(),
            range_markers: Vec::new(),
            pre_selected,
        }
    }

    /// Seed the selection and marker lists from the initially-selected
    /// days (generator pre-selection flags plus the tracked
    /// pre-selection list).
    pub(crate) fn init(&mut self, days: &[CalendarDay]) {
        self.selection = self
            .selected_days(days)
            .iter()
            .map(CalendarDay::date)
            .collect();
        self.range_markers.clone_from(&self.selection);
    }

    pub(crate) fn selection(&self) -> &[Date] {
        &self.selection
    }

    /// Canonical (non-shadow) days only.
    fn pure_days(days: &[CalendarDay]) -> Vec<CalendarDay> {
        days.iter().filter(|day| !day.is_copied()).cloned().collect()
    }

    /// Selected canonical days merged with the tracked pre-selection
    /// list, deduplicated by date (the pre-selection entry wins).
    pub(crate) fn selected_days(&self, days: &[CalendarDay]) -> Vec<CalendarDay> {
        let mut selected: Vec<CalendarDay> = days
            .iter()
            .filter(|day| !day.is_copied() && day.is_selected())
            .cloned()
            .collect();
        for pre in self.pre_selected.as_deref().unwrap_or(&[]) {
            if let Some(slot) = selected.iter_mut().find(|day| day.date() == pre.date()) {
                *slot = pre.clone();
            } else {
                selected.push(pre.clone());
            }
        }
        selected
    }

    pub(crate) fn hovered_days(&self, days: &[CalendarDay]) -> Vec<CalendarDay> {
        days.iter()
            .filter(|day| !day.is_copied() && day.is_hovered())
            .cloned()
            .collect()
    }

    pub(crate) fn between_dates(&self, days: &[CalendarDay]) -> Vec<CalendarDay> {
        days.iter()
            .filter(|day| !day.is_copied() && day.is_between())
            .cloned()
            .collect()
    }

    /// Rewrite every day's `selected` flag from the selection list,
    /// then recompute the between-flags by replaying the range markers
    /// pairwise.  Only complete pairs produce between-flagged days.
    pub(crate) fn resync(&self, days: &[CalendarDay]) {
        for day in days {
            day.set_selected(self.selection.contains(&day.date()));
            day.set_between(false);
        }
        let pure = Self::pure_days(days);
        let selected = self.selected_days(days);
        let matched: Vec<Date> = self
            .range_markers
            .iter()
            .filter(|marker| selected.iter().any(|day| day.date() == **marker))
            .copied()
            .collect();
        for pair in matched.chunks_exact(2) {
            if let [first, second] = pair {
                for day in between_days(&pure, *first, *second) {
                    day.set_between(true);
                }
            }
        }
    }

    fn is_selected(&self, date: Date) -> bool {
        self.selection.contains(&date)
    }

    /// Toggle `date` in the selection list and, when `update_pre` is
    /// set, mirror the toggle in the tracked pre-selection list so the
    /// date stays selected even if its page is later regenerated.
    fn toggle(&mut self, date: Date, update_pre: bool, days: &[CalendarDay]) {
        if let Some(pos) = self.selection.iter().position(|&d| d == date) {
            self.selection.remove(pos);
        } else {
            self.selection.push(date);
        }
        if !update_pre {
            return;
        }
        if let Some(pre) = self.pre_selected.as_mut() {
            if let Some(pos) = pre.iter().position(|day| day.date() == date) {
                pre.remove(pos);
            } else if let Some(day) = days.iter().find(|day| day.date() == date) {
                pre.push(day.clone());
            }
        }
    }

    /// Deselect the previous head of the selection, then toggle the
    /// clicked date.  Net effect: at most one selected date at a time,
    /// and re-clicking the selected date keeps it selected.  The head
    /// is removed by date even when its page has since been dropped
    /// from the cache, so the at-most-one invariant survives a
    /// window reset.
    pub(crate) fn select_single(&mut self, days: &[CalendarDay], date: Date) {
        if let Some(&head) = self.selection.first() {
            self.toggle(head, true, days);
        }
        self.toggle(date, true, days);
        self.resync(days);
    }

    /// Toggle the clicked date as a range endpoint and record it in
    /// the marker list.  Strict validation runs before any mutation; a
    /// rejected click leaves all state untouched.
    pub(crate) fn select_range(
        &mut self,
        days: &[CalendarDay],
        date: Date,
        opts: SelectRangeOptions,
    ) {
        if opts.strict && !self.range_valid(days, date) {
            debug!("strict range select of {date} rejected");
            return;
        }
        if !opts.multiple && self.selection.len() >= 2 && !self.is_selected(date) {
            self.reset_selection(days);
        }
        self.toggle(date, false, days);
        self.range_markers.push(date);
        self.resync(days);
    }

    /// Would clicking `date` as a range endpoint produce a span that
    /// crosses a disabled day or overlaps a committed range?
    fn range_valid(&self, days: &[CalendarDay], clicked: Date) -> bool {
        let pure = Self::pure_days(days);
        let selected = self.selected_days(days);
        let matched: Vec<Date> = self
            .range_markers
            .iter()
            .filter(|marker| selected.iter().any(|day| day.date() == **marker))
            .copied()
            .collect();
        let mut i = 0;
        while i < matched.len() {
            let first = matched[i];
            let second = matched.get(i + 1).copied().unwrap_or(clicked);
            i += 2;
            if first != clicked && second != clicked {
                continue;
            }
            let blocked = between_days(&pure, first, second)
                .iter()
                .any(|day| day.disabled() || day.is_between());
            if blocked {
                return false;
            }
        }
        true
    }

    /// Unconditional toggle; no pairing, no cap.
    pub(crate) fn select_multiple(&mut self, days: &[CalendarDay], date: Date) {
        self.toggle(date, true, days);
        self.resync(days);
    }

    /// Preview the span between the most recent selection and the
    /// hovered date.  Only active while a range is waiting for its
    /// second endpoint (odd number of selected dates).
    pub(crate) fn hover_multiple(&self, days: &[CalendarDay], date: Date, opts: HoverOptions) {
        if self.selected_days(days).len() % 2 == 0 {
            return;
        }
        for day in days {
            day.set_hovered(false);
        }
        let Some(&anchor) = self.selection.last() else {
            return;
        };
        let Some(anchor_day) = days.iter().find(|day| day.date() == anchor) else {
            return;
        };
        let Some(hovered_day) = days.iter().find(|day| day.date() == date) else {
            return;
        };
        let pure = Self::pure_days(days);
        let mut span = vec![hovered_day.clone(), anchor_day.clone()];
        span.extend(between_days(&pure, anchor, date).iter().cloned());
        let blocked = span.iter().any(|day| {
            (day.disabled() || day.is_selected() || day.is_between()) && day.date() != anchor
        });
        if opts.strict && blocked {
            debug!("strict hover preview of {date} rejected");
            return;
        }
        for day in &span {
            day.set_hovered(true);
        }
    }

    pub(crate) fn reset_hover(&self, days: &[CalendarDay]) {
        for day in days {
            day.set_hovered(false);
        }
    }

    /// Clear the selection list, the marker list, the pre-selection
    /// list, and every day's selection-related flags.
    pub(crate) fn reset_selection(&mut self, days: &[CalendarDay]) {
        self.selection.clear();
        self.range_markers.clear();
        if let Some(pre) = self.pre_selected.as_mut() {
            for day in pre.iter() {
                day.set_selected(false);
            }
            pre.clear();
        }
        for day in days {
            day.set_selected(false);
            day.set_between(false);
            day.set_hovered(false);
        }
    }
}
