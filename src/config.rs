use crate::day::{DayExtension, DayFactory};
use crate::weekdays::Locale;
use log::warn;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// A date given either directly or as a `YYYY-MM-DD` string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DateInput {
    Date(Date),
    Text(String),
}

impl DateInput {
    fn resolve(&self) -> Result<Date, DateParseError> {
        match self {
            DateInput::Date(date) => Ok(*date),
            DateInput::Text(s) => Date::parse(s, &YMD_FMT).map_err(|source| DateParseError {
                input: s.clone(),
                source,
            }),
        }
    }
}

impl From<Date> for DateInput {
    fn from(date: Date) -> DateInput {
        DateInput::Date(date)
    }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> DateInput {
        DateInput::Text(s.to_owned())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> DateInput {
        DateInput::Text(s)
    }
}

#[derive(Debug, Error)]
#[error("invalid calendar date {input:?}")]
pub struct DateParseError {
    input: String,
    source: time::error::Parse,
}

/// Per-day disablement: an explicit date list or a predicate.
#[derive(Clone, Default)]
pub enum DisabledDates {
    #[default]
    None,
    List(Vec<DateInput>),
    Predicate(Rc<dyn Fn(Date) -> bool>),
}

impl fmt::Debug for DisabledDates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisabledDates::None => f.write_str("None"),
            DisabledDates::List(dates) => f.debug_tuple("List").field(dates).finish(),
            DisabledDates::Predicate(_) => f.write_str("Predicate(...)"),
        }
    }
}

/// Raw construction options.  Every field is optional; malformed values
/// degrade to the documented defaults instead of failing construction.
#[derive(Clone, Default)]
pub struct CalendarOptions {
    /// Anchor date for the initial page.  Defaults to `min_date`, or
    /// the current date if no lower bound is set.
    pub start_on: Option<DateInput>,
    /// Inclusive lower bound; days before it are forced disabled.
    pub min_date: Option<DateInput>,
    /// Inclusive upper bound; days after it are forced disabled.
    pub max_date: Option<DateInput>,
    pub disabled: DisabledDates,
    /// Week-start offset, `0` (Sunday) through `6` (Saturday).
    pub first_day_of_week: u8,
    /// Weekday name table for label formatting.
    pub locale: Option<Locale>,
    /// Initially selected dates.
    pub pre_selection: Vec<DateInput>,
    /// Entity-shape customization hook.
    pub factory: Option<DayExtension>,
}

impl fmt::Debug for CalendarOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarOptions")
            .field("start_on", &self.start_on)
            .field("min_date", &self.min_date)
            .field("max_date", &self.max_date)
            .field("disabled", &self.disabled)
            .field("first_day_of_week", &self.first_day_of_week)
            .field("locale", &self.locale)
            .field("pre_selection", &self.pre_selection)
            .field("factory", &self.factory.as_ref().map(|_| "..."))
            .finish()
    }
}

pub(crate) enum DisabledSet {
    Dates(Vec<Date>),
    Predicate(Rc<dyn Fn(Date) -> bool>),
}

impl fmt::Debug for DisabledSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisabledSet::Dates(dates) => f.debug_tuple("Dates").field(dates).finish(),
            DisabledSet::Predicate(_) => f.write_str("Predicate(...)"),
        }
    }
}

/// Normalized configuration, immutable after construction.  Shared by
/// every facade built from the same [`crate::Calendar`].
#[derive(Debug)]
pub(crate) struct CalendarConfig {
    pub(crate) start_on: Date,
    pub(crate) min_date: Option<Date>,
    pub(crate) max_date: Option<Date>,
    pub(crate) disabled: DisabledSet,
    pub(crate) first_day_of_week: u8,
    pub(crate) locale: Locale,
    pub(crate) pre_selection: Vec<Date>,
    pub(crate) factory: DayFactory,
}

impl CalendarConfig {
    pub(crate) fn normalize(opts: CalendarOptions) -> CalendarConfig {
        let today = OffsetDateTime::now_local()
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
            .date();
        let min_date = opts.min_date.and_then(resolve_optional);
        let max_date = opts.max_date.and_then(resolve_optional);
        let start_on = opts
            .start_on
            .and_then(resolve_optional)
            .or(min_date)
            .unwrap_or(today);
        let disabled = match opts.disabled {
            DisabledDates::None => DisabledSet::Dates(Vec::new()),
            DisabledDates::List(inputs) => {
                DisabledSet::Dates(inputs.iter().filter_map(resolve_ref).collect())
            }
            DisabledDates::Predicate(f) => DisabledSet::Predicate(f),
        };
        let first_day_of_week = if opts.first_day_of_week > 6 {
            warn!(
                "first_day_of_week {} out of range, falling back to Sunday",
                opts.first_day_of_week
            );
            0
        } else {
            opts.first_day_of_week
        };
        let pre_selection = opts.pre_selection.iter().filter_map(resolve_ref).collect();
        CalendarConfig {
            start_on,
            min_date,
            max_date,
            disabled,
            first_day_of_week,
            locale: opts.locale.unwrap_or_default(),
            pre_selection,
            factory: DayFactory::new(today, opts.factory),
        }
    }

    pub(crate) fn is_disabled(&self, date: Date) -> bool {
        match &self.disabled {
            DisabledSet::Dates(dates) => dates.contains(&date),
            DisabledSet::Predicate(f) => f(date),
        }
    }

    pub(crate) fn is_pre_selected(&self, date: Date) -> bool {
        self.pre_selection.contains(&date)
    }
}

fn resolve_optional(input: DateInput) -> Option<Date> {
    resolve_ref(&input)
}

fn resolve_ref(input: &DateInput) -> Option<Date> {
    match input.resolve() {
        Ok(date) => Some(date),
        Err(e) => {
            warn!("ignoring unparseable date option: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_date_input_parsing() {
        let input = DateInput::from("2024-06-15");
        assert_eq!(input.resolve().ok(), Some(date!(2024 - 06 - 15)));
        let bad = DateInput::from("June 15th");
        assert!(bad.resolve().is_err());
    }

    #[test]
    fn test_start_on_defaults_to_min_date() {
        let config = CalendarConfig::normalize(CalendarOptions {
            min_date: Some(date!(2024 - 03 - 01).into()),
            ..CalendarOptions::default()
        });
        assert_eq!(config.start_on, date!(2024 - 03 - 01));
    }

    #[test]
    fn test_unparseable_options_degrade() {
        let config = CalendarConfig::normalize(CalendarOptions {
            start_on: Some("not a date".into()),
            max_date: Some("2024-13-40".into()),
            first_day_of_week: 9,
            pre_selection: vec!["2024-06-15".into(), "bogus".into()],
            ..CalendarOptions::default()
        });
        assert_eq!(config.max_date, None);
        assert_eq!(config.first_day_of_week, 0);
        assert_eq!(config.pre_selection, vec![date!(2024 - 06 - 15)]);
    }

    #[test]
    fn test_disabled_list_and_predicate() {
        let config = CalendarConfig::normalize(CalendarOptions {
            disabled: DisabledDates::List(vec![date!(2024 - 06 - 15).into()]),
            ..CalendarOptions::default()
        });
        assert!(config.is_disabled(date!(2024 - 06 - 15)));
        assert!(!config.is_disabled(date!(2024 - 06 - 16)));

        let config = CalendarConfig::normalize(CalendarOptions {
            disabled: DisabledDates::Predicate(Rc::new(|d: Date| {
                d.weekday() == time::Weekday::Monday
            })),
            ..CalendarOptions::default()
        });
        assert!(config.is_disabled(date!(2024 - 06 - 17)));
        assert!(!config.is_disabled(date!(2024 - 06 - 18)));
    }
}
