use std::{fmt, sync::LazyLock};

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use super::clock::{Clock, SystemClock};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]*)\]|YYYY|YY|MMMM|MMM|MM|M|DD|Do|D|dddd|ddd")
        .expect("date pattern token regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    pub input: String,
    pub message: String,
}

impl PatternError {
    fn new(input: &str, message: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': {}", self.input, self.message)
    }
}

impl std::error::Error for PatternError {}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Year4,
    Year2,
    MonthLong,
    MonthShort,
    Month2,
    Month,
    Day2,
    DayOrdinal,
    Day,
    WeekdayLong,
    WeekdayShort,
}

/// A date format such as `YYYY-MM-DD`, used both to parse model strings
/// and to format selected dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    source: String,
    tokens: Vec<Token>,
}

impl Default for DatePattern {
    fn default() -> Self {
        Self::new(DatePattern::DEFAULT)
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl DatePattern {
    pub const DEFAULT: &'static str = "YYYY-MM-DD";

    pub fn new(pattern: &str) -> Self {
        let mut tokens = Vec::new();
        let mut last = 0;
        for caps in TOKEN.captures_iter(pattern) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if whole.start() > last {
                tokens.push(Token::Literal(pattern[last..whole.start()].to_string()));
            }
            let token = match whole.as_str() {
                "YYYY" => Token::Year4,
                "YY" => Token::Year2,
                "MMMM" => Token::MonthLong,
                "MMM" => Token::MonthShort,
                "MM" => Token::Month2,
                "M" => Token::Month,
                "DD" => Token::Day2,
                "Do" => Token::DayOrdinal,
                "D" => Token::Day,
                "dddd" => Token::WeekdayLong,
                "ddd" => Token::WeekdayShort,
                _ => Token::Literal(
                    caps.get(1)
                        .map(|inner| inner.as_str().to_string())
                        .unwrap_or_default(),
                ),
            };
            tokens.push(token);
            last = whole.end();
        }
        if last < pattern.len() {
            tokens.push(Token::Literal(pattern[last..].to_string()));
        }
        Self {
            source: pattern.to_string(),
            tokens,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn format(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Year4 => out.push_str(&format!("{:04}", date.year())),
                Token::Year2 => out.push_str(&format!("{:02}", date.year().rem_euclid(100))),
                Token::MonthLong => out.push_str(MONTH_NAMES[date.month0() as usize]),
                Token::MonthShort => out.push_str(&MONTH_NAMES[date.month0() as usize][..3]),
                Token::Month2 => out.push_str(&format!("{:02}", date.month())),
                Token::Month => out.push_str(&date.month().to_string()),
                Token::Day2 => out.push_str(&format!("{:02}", date.day())),
                Token::DayOrdinal => {
                    out.push_str(&date.day().to_string());
                    out.push_str(ordinal_suffix(date.day()));
                }
                Token::Day => out.push_str(&date.day().to_string()),
                Token::WeekdayLong => {
                    out.push_str(DAY_NAMES[date.weekday().num_days_from_sunday() as usize])
                }
                Token::WeekdayShort => {
                    out.push_str(&DAY_NAMES[date.weekday().num_days_from_sunday() as usize][..3])
                }
            }
        }
        out
    }

    /// Parses `input`; the whole string must match. A pattern without a year
    /// token resolves to the current year.
    pub fn parse(&self, input: &str) -> Result<NaiveDate, PatternError> {
        self.parse_in_year(input, SystemClock.today().year())
    }

    /// Like [`parse`](Self::parse), with `default_year` used when the pattern
    /// carries no year token.
    pub fn parse_in_year(&self, input: &str, default_year: i32) -> Result<NaiveDate, PatternError> {
        let mut rest = input;
        let mut year = None;
        let mut month = 1;
        let mut day = 1;

        for (index, token) in self.tokens.iter().enumerate() {
            match token {
                Token::Literal(text) => {
                    rest = rest
                        .strip_prefix(text.as_str())
                        .ok_or_else(|| PatternError::new(input, format!("expected '{text}'")))?;
                }
                Token::Year4 => {
                    // Years past 9999 only when no number follows directly.
                    let max = if self.numeric_at(index + 1) { 4 } else { 6 };
                    let (value, tail) = take_digits(rest, 4, max)
                        .ok_or_else(|| PatternError::new(input, "expected a 4-digit year"))?;
                    year = Some(value as i32);
                    rest = tail;
                }
                Token::Year2 => {
                    let (value, tail) = take_digits(rest, 2, 2)
                        .ok_or_else(|| PatternError::new(input, "expected a 2-digit year"))?;
                    let century = if value > 68 { 1900 } else { 2000 };
                    year = Some(century + value as i32);
                    rest = tail;
                }
                Token::MonthLong | Token::MonthShort => {
                    let long = matches!(token, Token::MonthLong);
                    let (index, tail) = take_name(rest, &MONTH_NAMES, long)
                        .ok_or_else(|| PatternError::new(input, "expected a month name"))?;
                    month = index as u32 + 1;
                    rest = tail;
                }
                Token::Month2 | Token::Month => {
                    let (value, tail) = take_digits(rest, 1, 2)
                        .ok_or_else(|| PatternError::new(input, "expected a month number"))?;
                    month = value;
                    rest = tail;
                }
                Token::Day2 | Token::Day => {
                    let (value, tail) = take_digits(rest, 1, 2)
                        .ok_or_else(|| PatternError::new(input, "expected a day number"))?;
                    day = value;
                    rest = tail;
                }
                Token::DayOrdinal => {
                    let (value, tail) = take_digits(rest, 1, 2)
                        .ok_or_else(|| PatternError::new(input, "expected a day number"))?;
                    day = value;
                    rest = ["st", "nd", "rd", "th"]
                        .iter()
                        .find_map(|suffix| tail.strip_prefix(suffix))
                        .ok_or_else(|| PatternError::new(input, "expected an ordinal suffix"))?;
                }
                Token::WeekdayLong | Token::WeekdayShort => {
                    let long = matches!(token, Token::WeekdayLong);
                    let (_, tail) = take_name(rest, &DAY_NAMES, long)
                        .ok_or_else(|| PatternError::new(input, "expected a weekday name"))?;
                    rest = tail;
                }
            }
        }

        if !rest.is_empty() {
            return Err(PatternError::new(input, format!("unexpected trailing '{rest}'")));
        }
        NaiveDate::from_ymd_opt(year.unwrap_or(default_year), month, day)
            .ok_or_else(|| PatternError::new(input, "no such calendar date"))
    }

    fn numeric_at(&self, index: usize) -> bool {
        matches!(
            self.tokens.get(index),
            Some(
                Token::Year4
                    | Token::Year2
                    | Token::Month2
                    | Token::Month
                    | Token::Day2
                    | Token::DayOrdinal
                    | Token::Day
            )
        )
    }
}

fn take_digits(input: &str, min: usize, max: usize) -> Option<(u32, &str)> {
    let len = input
        .bytes()
        .take(max)
        .take_while(u8::is_ascii_digit)
        .count();
    if len < min {
        return None;
    }
    let value = input[..len].parse().ok()?;
    Some((value, &input[len..]))
}

fn take_name<'a>(input: &'a str, names: &[&str], long: bool) -> Option<(usize, &'a str)> {
    names.iter().enumerate().find_map(|(index, name)| {
        let candidate = if long { name } else { &name[..3] };
        let head = input.get(..candidate.len())?;
        head.eq_ignore_ascii_case(candidate)
            .then(|| (index, &input[candidate.len()..]))
    })
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
