use chrono::{Datelike, Duration, Local, Month, Months, NaiveDate};
use derive_more::Display;
use nom::{
    bytes::complete::take_while_m_n,
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res, opt, recognize},
    sequence::{pair, preceded, tuple},
    IResult,
};
use num_traits::FromPrimitive;
use std::ops::{Add, Sub};
use std::str::FromStr;

use super::error::{Error, ErrorKind, Result};

pub fn days_of_month(month: &Month, year: i32) -> u32 {
    match month {
        Month::February => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

fn parse_year(input: &str) -> IResult<&str, i32> {
    map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
        s.parse::<i32>()
    })(input)
}

fn parse_two_digits(input: &str) -> IResult<&str, u32> {
    map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_digit()),
        |s: &str| s.parse::<u32>(),
    )(input)
}

fn parse_year_month(input: &str) -> IResult<&str, (i32, u32)> {
    tuple((parse_year, preceded(char('-'), parse_two_digits)))(input)
}

fn parse_year_month_day(input: &str) -> IResult<&str, (i32, u32, u32)> {
    let (input, (year, month)) = parse_year_month(input)?;
    let (input, day) = preceded(char('-'), parse_two_digits)(input)?;
    Ok((input, (year, month, day)))
}

/// Parses a `YYYY-MM-DD` string into a calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let (_, (year, month, day)) = all_consuming(parse_year_month_day)(input)
        .map_err(|_| Error::new(ErrorKind::DateKeyParse, input))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| Error::new(ErrorKind::DateKeyParse, input))
}

/// Canonical `YYYY-MM-DD` identifier of a calendar day.
///
/// The year keeps its natural width, month and day are zero-padded to two
/// digits. Two dates are equal exactly when their keys are equal.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash)]
pub struct DateKey(String);

impl DateKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_date(&self) -> Result<NaiveDate> {
        parse_date(&self.0)
    }
}

impl From<&NaiveDate> for DateKey {
    fn from(date: &NaiveDate) -> Self {
        DateKey(format!(
            "{}-{:02}-{:02}",
            date.year(),
            date.month(),
            date.day()
        ))
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey::from(&date)
    }
}

impl FromStr for DateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_date(s).map(DateKey::from)
    }
}

/// A reference month, stored as its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthIndex {
    first: NaiveDate,
}

impl MonthIndex {
    pub fn new(index: Month, year: i32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, index.number_from_month(), 1).map(|first| MonthIndex { first })
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn month(&self) -> Month {
        Month::from_u32(self.first.month()).unwrap_or(Month::January)
    }

    pub fn number_from_month(&self) -> u32 {
        self.first.month()
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn num_days(&self) -> u32 {
        days_of_month(&self.month(), self.year())
    }

    /// The date of day `day_num` (1-based) in this month, if it exists.
    pub fn day(&self, day_num: u32) -> Option<NaiveDate> {
        self.first.with_day(day_num)
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.number_from_month()
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (1..=self.num_days()).filter_map(move |day_num| self.day(day_num))
    }

    /// Moves by `months`, rolling over year boundaries in both directions.
    /// Saturates at the representable date range.
    pub fn shift(&self, months: i32) -> Self {
        let delta = Months::new(months.unsigned_abs());
        let shifted = if months >= 0 {
            self.first.checked_add_months(delta)
        } else {
            self.first.checked_sub_months(delta)
        };

        shifted.map_or(*self, |first| MonthIndex { first })
    }

    pub fn next(&self) -> Self {
        self.shift(1)
    }

    pub fn prev(&self) -> Self {
        self.shift(-1)
    }
}

impl Default for MonthIndex {
    fn default() -> Self {
        MonthIndex::from(Local::now().date_naive())
    }
}

impl From<NaiveDate> for MonthIndex {
    fn from(date: NaiveDate) -> Self {
        MonthIndex {
            first: date - Duration::days(date.day0() as i64),
        }
    }
}

impl From<&NaiveDate> for MonthIndex {
    fn from(date: &NaiveDate) -> Self {
        MonthIndex::from(*date)
    }
}

impl FromStr for MonthIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (_, (year, month)) = all_consuming(parse_year_month)(s)
            .map_err(|_| Error::new(ErrorKind::MonthParse, s))?;

        Month::from_u32(month)
            .and_then(|month| MonthIndex::new(month, year))
            .ok_or_else(|| Error::new(ErrorKind::MonthParse, s))
    }
}

impl Add<i32> for MonthIndex {
    type Output = MonthIndex;
    fn add(self, rhs: i32) -> Self::Output {
        self.shift(rhs)
    }
}

impl Sub<i32> for MonthIndex {
    type Output = MonthIndex;
    fn sub(self, rhs: i32) -> Self::Output {
        self.shift(-rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32) -> MonthIndex {
        MonthIndex::new(Month::from_u32(m).unwrap(), y).unwrap()
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_of_month(&Month::January, 2023), 31);
        assert_eq!(days_of_month(&Month::February, 2023), 28);
        assert_eq!(days_of_month(&Month::February, 2024), 29);
        assert_eq!(days_of_month(&Month::February, 1900), 28);
        assert_eq!(days_of_month(&Month::February, 2000), 29);
        assert_eq!(days_of_month(&Month::April, 2024), 30);
        assert_eq!(days_of_month(&Month::December, 2024), 31);
    }

    #[test]
    fn date_key_is_zero_padded() {
        assert_eq!(DateKey::from(date(2024, 3, 5)).as_str(), "2024-03-05");
        assert_eq!(DateKey::from(date(2024, 11, 25)).to_string(), "2024-11-25");
        assert_eq!(DateKey::from(date(987, 1, 1)).as_str(), "987-01-01");
    }

    #[test]
    fn date_key_round_trips() {
        let mut day = date(2023, 12, 1);
        while day < date(2025, 3, 1) {
            let key = DateKey::from(day);
            assert_eq!(key.to_date().unwrap(), day);
            assert_eq!(key.as_str().parse::<DateKey>().unwrap(), key);
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn date_key_keeps_unusual_years() {
        for (day, text) in &[
            (date(-5, 1, 1), "-5-01-01"),
            (date(-1000, 12, 31), "-1000-12-31"),
            (date(0, 2, 29), "0-02-29"),
            (date(10000, 12, 31), "10000-12-31"),
            (date(123456, 7, 8), "123456-07-08"),
        ] {
            let key = DateKey::from(day);
            assert_eq!(key.as_str(), *text);
            assert_eq!(key.to_date().unwrap(), *day);
            assert_eq!(text.parse::<DateKey>().unwrap(), key);
        }
    }

    #[test]
    fn date_key_distinguishes_days() {
        assert_ne!(
            DateKey::from(date(2024, 1, 11)),
            DateKey::from(date(2024, 11, 1))
        );
    }

    #[test]
    fn invalid_date_keys_are_rejected() {
        for input in &["2024-3-05", "2024-02-30", "2024-13-01", "2024/03/05", "", "2024-03-05x"] {
            let err = input.parse::<DateKey>().unwrap_err();
            assert!(matches!(err.kind, ErrorKind::DateKeyParse), "{}", input);
        }
    }

    #[test]
    fn month_index_normalizes_to_first_day() {
        let m = MonthIndex::from(date(2024, 2, 17));
        assert_eq!(m.first_day(), date(2024, 2, 1));
        assert_eq!(m.month(), Month::February);
        assert_eq!(m.num_days(), 29);
        assert!(m.contains(&date(2024, 2, 29)));
        assert!(!m.contains(&date(2023, 2, 1)));
        assert_eq!(m.days().count(), 29);
    }

    #[test]
    fn month_index_rolls_over_years() {
        assert_eq!(month(2024, 12).next(), month(2025, 1));
        assert_eq!(month(2024, 1).prev(), month(2023, 12));
        assert_eq!(month(2024, 5) + 12, month(2025, 5));
        assert_eq!(month(2024, 5) - 17, month(2022, 12));
        assert_eq!(month(2024, 12) + 0, month(2024, 12));
    }

    #[test]
    fn month_index_orders_chronologically() {
        assert!(month(2023, 12) < month(2024, 1));
        assert!(month(2024, 2) > month(2024, 1));
    }

    #[test]
    fn month_index_from_str() {
        assert_eq!("2024-02".parse::<MonthIndex>().unwrap(), month(2024, 2));
        assert!("2024-00".parse::<MonthIndex>().is_err());
        assert!("2024".parse::<MonthIndex>().is_err());
    }
}
