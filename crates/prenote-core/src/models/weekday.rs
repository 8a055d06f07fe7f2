//! Weekday vocabulary shared by rule extraction and record queries.

use chrono::Weekday;

const NAMES: [(Weekday, &str); 7] = [
    (Weekday::Mon, "MONDAY"),
    (Weekday::Tue, "TUESDAY"),
    (Weekday::Wed, "WEDNESDAY"),
    (Weekday::Thu, "THURSDAY"),
    (Weekday::Fri, "FRIDAY"),
    (Weekday::Sat, "SATURDAY"),
    (Weekday::Sun, "SUNDAY"),
];

/// An inclusive run of weekdays. `end` may precede `start` (e.g. FRI-MON).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySpan {
    pub start: Weekday,
    pub end: Weekday,
}

impl DaySpan {
    pub const WEEKDAYS: DaySpan = DaySpan {
        start: Weekday::Mon,
        end: Weekday::Fri,
    };

    pub const WEEKEND: DaySpan = DaySpan {
        start: Weekday::Sat,
        end: Weekday::Sun,
    };

    pub fn new(start: Weekday, end: Weekday) -> Self {
        Self { start, end }
    }

    pub fn single(day: Weekday) -> Self {
        Self { start: day, end: day }
    }

    /// Check whether `day` falls inside the span.
    pub fn contains(&self, day: Weekday) -> bool {
        let start = day_index(self.start);
        let end = day_index(self.end);
        let day = day_index(day);

        if start <= end {
            (start..=end).contains(&day)
        } else {
            day >= start || day <= end
        }
    }

    /// Short label such as `Mon-Fri` or `Sat`.
    pub fn label(&self) -> String {
        if self.start == self.end {
            format!("{}", self.start)
        } else {
            format!("{}-{}", self.start, self.end)
        }
    }
}

/// 0 = Monday .. 6 = Sunday.
pub fn day_index(day: Weekday) -> u8 {
    day.num_days_from_monday() as u8
}

/// Inverse of [`day_index`].
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    NAMES.get(index as usize).map(|(day, _)| *day)
}

/// Parse a single day token: `MON`, `Tues`, `THURSDAY`, `Saturdays`.
pub fn parse_weekday(token: &str) -> Option<Weekday> {
    let token = token.trim().trim_end_matches('.').to_uppercase();
    if token.len() < 3 || !token.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let by_prefix = |token: &str| {
        NAMES
            .iter()
            .find_map(|(day, name)| name.starts_with(token).then_some(*day))
    };

    // Plurals: `MONDAYS`, `WEDS`, `SATS`.
    by_prefix(token.as_str()).or_else(|| match token.strip_suffix('S') {
        Some(singular) if singular.len() >= 3 => by_prefix(singular),
        _ => None,
    })
}

/// Resolve a day expression to a span.
///
/// Handles single days, ranges (`MON-FRI`, `MON TO FRI`), lists of
/// consecutive days (`SAT, SUN`, `FRI/SAT/SUN`), and the named groups
/// `WEEKDAY(S)`, `WORKING DAYS` and `WEEKEND(S)`. A list with gaps
/// (`MON, WED and FRI`) has no single span and resolves to `None`.
pub fn resolve_day_span(token: &str) -> Option<DaySpan> {
    let upper = token
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase();

    if upper.is_empty() {
        return None;
    }
    if upper.contains("WEEKDAY") || upper.contains("WORKING DAY") || upper.contains("WORKDAY") {
        return Some(DaySpan::WEEKDAYS);
    }
    if upper.contains("WEEKEND") {
        return Some(DaySpan::WEEKEND);
    }

    for separator in ["-", "\u{2013}", " TO "] {
        if let Some((from, to)) = upper.split_once(separator) {
            if let (Some(start), Some(end)) = (parse_weekday(from), parse_weekday(to)) {
                return Some(DaySpan::new(start, end));
            }
        }
    }

    let days: Vec<Weekday> = upper
        .split([',', '/', '&', '+'])
        .flat_map(|part| part.split(" AND "))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_weekday)
        .collect::<Option<Vec<_>>>()?;

    if !days.windows(2).all(|pair| pair[1] == pair[0].succ()) {
        return None;
    }

    match (days.first(), days.last()) {
        (Some(first), Some(last)) => Some(DaySpan::new(*first, *last)),
        _ => None,
    }
}
