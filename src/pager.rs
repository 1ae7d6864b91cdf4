use crate::day::CalendarDay;
use log::debug;
use std::collections::BTreeMap;

/// A navigable page of days with a stable semantic index.
pub(crate) trait Page {
    fn index(&self) -> i32;
    fn days(&self) -> &[CalendarDay];
}

/// Outcome of a navigation request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Jump {
    /// Already on the requested page.
    Noop,
    /// Moved to an already-cached page.
    Moved,
    /// A missing page was generated (and the pointer moved, for
    /// `jump_to`).
    Generated,
}

/// Cache of materialized pages keyed by semantic index, plus the
/// current-page pointer.  Pages are generated lazily on first visit; in
/// bounded (non-infinite) mode a jump far outside the cached window
/// resets the cache to just the new page.
#[derive(Clone, Debug)]
pub(crate) struct Pager<P> {
    pages: BTreeMap<i32, P>,
    current: i32,
    infinite: bool,
}

impl<P: Page> Pager<P> {
    pub(crate) fn new(pages: Vec<P>, current: i32, infinite: bool) -> Pager<P> {
        let mut map = BTreeMap::new();
        for page in pages {
            // Never two pages with the same semantic index.
            map.entry(page.index()).or_insert(page);
        }
        Pager {
            pages: map,
            current,
            infinite,
        }
    }

    /// Semantic index of the current page.
    pub(crate) fn current_index(&self) -> i32 {
        self.current
    }

    pub(crate) fn current(&self) -> Option<&P> {
        self.pages.get(&self.current)
    }

    pub(crate) fn get(&self, index: i32) -> Option<&P> {
        self.pages.get(&index)
    }

    /// Pages in display order (ascending semantic index).
    pub(crate) fn pages(&self) -> impl Iterator<Item = &P> {
        self.pages.values()
    }

    /// The flattened day list, in display order.
    pub(crate) fn days(&self) -> Vec<CalendarDay> {
        self.pages
            .values()
            .flat_map(|page| page.days().iter().cloned())
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.pages.len()
    }

    pub(crate) fn prev_enabled(&self) -> bool {
        self.infinite || self.pages.keys().next().is_some_and(|&first| first < self.current)
    }

    pub(crate) fn next_enabled(&self) -> bool {
        self.infinite
            || self
                .pages
                .keys()
                .next_back()
                .is_some_and(|&last| last > self.current)
    }

    /// Move the pointer to the page with semantic index `target`,
    /// generating it if missing.  The generator sees the current cache
    /// (for neighbor-day context) and may decline at the edge of
    /// representable time, in which case nothing changes.
    pub(crate) fn jump_to<F>(&mut self, target: i32, generate: F) -> Jump
    where
        F: FnOnce(&BTreeMap<i32, P>) -> Option<P>,
    {
        if target == self.current && self.pages.contains_key(&target) {
            return Jump::Noop;
        }
        if self.pages.contains_key(&target) {
            self.current = target;
            return Jump::Moved;
        }
        let Some(page) = generate(&self.pages) else {
            debug!("page {target} could not be generated");
            return Jump::Noop;
        };
        if !self.infinite && !self.window_adjacent(target) {
            debug!("bounded jump to {target} outside the cached window; resetting cache");
            self.pages.clear();
        }
        let key = page.index();
        self.pages.entry(key).or_insert(page);
        self.current = key;
        Jump::Generated
    }

    /// Ensure a page exists for `target` without moving the pointer.
    pub(crate) fn ensure<F>(&mut self, target: i32, generate: F) -> Jump
    where
        F: FnOnce(&BTreeMap<i32, P>) -> Option<P>,
    {
        if target == self.current || self.pages.contains_key(&target) {
            return Jump::Noop;
        }
        let Some(page) = generate(&self.pages) else {
            return Jump::Noop;
        };
        self.pages.entry(page.index()).or_insert(page);
        Jump::Generated
    }

    fn window_adjacent(&self, target: i32) -> bool {
        let first = self.pages.keys().next().copied();
        let last = self.pages.keys().next_back().copied();
        if let (Some(first), Some(last)) = (first, last) {
            target == first - 1 || target == last + 1
        } else {
            true
        }
    }
}
