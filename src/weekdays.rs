use crate::config::CalendarConfig;

/// Weekday label token, mirroring the `i*` family of date format
/// tokens: from the ISO day number (`i`) up to the short name
/// (`iiiiii`).  The default is the one-letter narrow form.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum WeekdayFormat {
    /// ISO day number, `"1"` (Monday) through `"7"` (Sunday).
    IsoNumber,
    /// Ordinal day number, `"1st"` through `"7th"`.
    Ordinal,
    /// Zero-padded day number, `"01"` through `"07"`.
    TwoDigit,
    /// Abbreviated name, e.g. `"Mon"`.
    Abbreviated,
    /// Full name, e.g. `"Monday"`.
    Wide,
    /// One-letter name, e.g. `"M"`.
    #[default]
    Narrow,
    /// Two-letter name, e.g. `"Mo"`.
    Short,
}

/// Weekday name table used for label formatting.  Names are stored
/// Monday-first; the narrow, short, and abbreviated forms are prefixes
/// of the wide form.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Locale {
    wide: [String; 7],
}

impl Locale {
    /// A locale from seven full weekday names, Monday first.
    pub fn new(wide: [String; 7]) -> Locale {
        Locale { wide }
    }

    fn label(&self, iso_index: usize, format: WeekdayFormat) -> String {
        let name = &self.wide[iso_index];
        let number = iso_index + 1;
        match format {
            WeekdayFormat::IsoNumber => number.to_string(),
            WeekdayFormat::Ordinal => format!("{number}{}", ordinal_suffix(number)),
            WeekdayFormat::TwoDigit => format!("{number:02}"),
            WeekdayFormat::Abbreviated => prefix(name, 3),
            WeekdayFormat::Wide => name.clone(),
            WeekdayFormat::Narrow => prefix(name, 1),
            WeekdayFormat::Short => prefix(name, 2),
        }
    }
}

impl Default for Locale {
    fn default() -> Locale {
        Locale::new(
            [
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
                "Sunday",
            ]
            .map(String::from),
        )
    }
}

/// Seven weekday labels rotated so the first entry is the configured
/// first day of the week.
pub(crate) fn weekday_labels(config: &CalendarConfig, format: WeekdayFormat) -> Vec<String> {
    // Base order is Sunday-first (ISO index 6, 0, 1, ...), rotated left
    // by the first-day-of-week offset.
    (0..7)
        .map(|i| {
            let offset = usize::from((i + config.first_day_of_week) % 7);
            let iso_index = (offset + 6) % 7;
            config.locale.label(iso_index, format)
        })
        .collect()
}

fn prefix(name: &str, chars: usize) -> String {
    name.chars().take(chars).collect()
}

fn ordinal_suffix(number: usize) -> &'static str {
    match number {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
