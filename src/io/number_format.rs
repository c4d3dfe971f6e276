//! Locale-aware amount parsing and formatting
//!
//! Source tables print amounts the way their locale does (`1 500,00` in the
//! French/Russian convention), and the text report prints them back the same
//! way. All conversions go through [`NumberLocale`].

use clap::ValueEnum;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

// `\s` is Unicode-aware and also covers no-break spaces used as group separators.
static SPACE_COMMA_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d[\d\s]*,\d{2}$").expect("valid amount regex"));
static COMMA_POINT_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d[\d\s,]*\.\d{2}$").expect("valid amount regex"));
static PLAIN_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d[\d\s]*\.\d{2}$").expect("valid amount regex"));

// Accepted numbers: consistent groups of three (or no grouping), optional fraction.
static SPACE_COMMA_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:\d{1,3}(?:\s\d{3})+|\d+)(?:,\d+)?$").expect("valid number regex")
});
static COMMA_POINT_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?$").expect("valid number regex")
});
static PLAIN_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(?:\.\d+)?$").expect("valid number regex"));

/// Number convention used for amounts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberLocale {
    /// Space-grouped thousands, comma decimals: `1 500,00`
    #[default]
    #[value(alias = "ru")]
    #[serde(alias = "ru")]
    Fr,

    /// Comma-grouped thousands, point decimals: `1,500.00`
    En,

    /// No grouping, point decimals: `1500.00`
    Plain,
}

impl NumberLocale {
    /// Separator placed between groups of three integer digits
    pub fn thousands_separator(self) -> Option<char> {
        match self {
            NumberLocale::Fr => Some(' '),
            NumberLocale::En => Some(','),
            NumberLocale::Plain => None,
        }
    }

    /// Separator between integer and fraction digits
    pub fn decimal_separator(self) -> char {
        match self {
            NumberLocale::Fr => ',',
            NumberLocale::En | NumberLocale::Plain => '.',
        }
    }

    /// Whether `text` has the shape of an amount with two fraction digits
    pub fn looks_like_amount(self, text: &str) -> bool {
        let shape: &Regex = match self {
            NumberLocale::Fr => &SPACE_COMMA_AMOUNT,
            NumberLocale::En => &COMMA_POINT_AMOUNT,
            NumberLocale::Plain => &PLAIN_AMOUNT,
        };
        shape.is_match(text.trim())
    }

    /// Parse a localized amount
    ///
    /// The text must be a number in this locale: digits grouped by three
    /// with the locale's separator (or not grouped at all), and an optional
    /// fraction after the decimal separator. Group separators are then
    /// dropped and the decimal separator normalized before parsing.
    /// Returns `None` for anything else.
    pub fn parse_amount(self, text: &str) -> Option<Decimal> {
        let number: &Regex = match self {
            NumberLocale::Fr => &SPACE_COMMA_NUMBER,
            NumberLocale::En => &COMMA_POINT_NUMBER,
            NumberLocale::Plain => &PLAIN_NUMBER,
        };
        if !number.is_match(text.trim()) {
            return None;
        }

        let thousands = self.thousands_separator();
        let decimal = self.decimal_separator();

        let normalized: String = text
            .chars()
            .filter(|c| !c.is_whitespace() && Some(*c) != thousands)
            .map(|c| if c == decimal { '.' } else { c })
            .collect();

        if normalized.is_empty() {
            return None;
        }
        Decimal::from_str(&normalized).ok()
    }

    /// Format an amount with grouped thousands and two fraction digits
    pub fn format_amount(self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let digits = format!("{:.2}", rounded.abs());
        let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        format!(
            "{}{}{}{}",
            sign,
            group_digits(integer, self.thousands_separator()),
            self.decimal_separator(),
            fraction
        )
    }

    /// Format a percentage with two fraction digits and no grouping
    pub fn format_percent(self, percent: Decimal) -> String {
        let rounded = percent.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.2}", rounded).replace('.', &self.decimal_separator().to_string())
    }
}

fn group_digits(integer: &str, separator: Option<char>) -> String {
    let Some(separator) = separator else {
        return integer.to_string();
    };

    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::grouped(NumberLocale::Fr, "1 500,00", Some(Decimal::new(150000, 2)))]
    #[case::no_break_space(NumberLocale::Fr, "12\u{a0}345\u{202f}678,50", Some(Decimal::new(1234567850, 2)))]
    #[case::no_fraction(NumberLocale::Fr, "700", Some(Decimal::new(700, 0)))]
    #[case::english(NumberLocale::En, "1,234,567.89", Some(Decimal::new(123456789, 2)))]
    #[case::plain(NumberLocale::Plain, " 2500.10 ", Some(Decimal::new(250010, 2)))]
    #[case::garbage(NumberLocale::Fr, "n/a", None)]
    #[case::empty(NumberLocale::Fr, "   ", None)]
    #[case::wrong_locale(NumberLocale::Plain, "1,50", None)]
    #[case::english_comma_decimal(NumberLocale::En, "1,50", None)]
    #[case::english_bad_grouping(NumberLocale::En, "1,5000.00", None)]
    #[case::underscore(NumberLocale::Fr, "1_000,00", None)]
    #[case::fr_bad_grouping(NumberLocale::Fr, "15 00,00", None)]
    #[case::negative(NumberLocale::Fr, "-5,00", Some(Decimal::new(-500, 2)))]
    fn test_parse_amount(
        #[case] locale: NumberLocale,
        #[case] text: &str,
        #[case] expected: Option<Decimal>,
    ) {
        assert_eq!(locale.parse_amount(text), expected);
    }

    #[rstest]
    #[case::fr_amount(NumberLocale::Fr, "1 500,00", true)]
    #[case::fr_no_break(NumberLocale::Fr, "2\u{a0}000,00", true)]
    #[case::fr_date(NumberLocale::Fr, "01/03/2024 10:00:00", false)]
    #[case::fr_text(NumberLocale::Fr, "Consumer", false)]
    #[case::fr_one_fraction_digit(NumberLocale::Fr, "15,5", false)]
    #[case::en_amount(NumberLocale::En, "1,500.00", true)]
    #[case::plain_amount(NumberLocale::Plain, "1500.00", true)]
    #[case::plain_grouped_comma(NumberLocale::Plain, "1,500.00", false)]
    fn test_looks_like_amount(
        #[case] locale: NumberLocale,
        #[case] text: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(locale.looks_like_amount(text), expected);
    }

    #[rstest]
    #[case::fr_small(NumberLocale::Fr, Decimal::new(150, 0), "150,00")]
    #[case::fr_thousands(NumberLocale::Fr, Decimal::new(1500, 0), "1 500,00")]
    #[case::fr_millions(NumberLocale::Fr, Decimal::new(123456789, 2), "1 234 567,89")]
    #[case::fr_zero(NumberLocale::Fr, Decimal::ZERO, "0,00")]
    #[case::fr_rounding(NumberLocale::Fr, Decimal::new(10005, 3), "10,01")]
    #[case::fr_negative(NumberLocale::Fr, Decimal::new(-250000, 2), "-2 500,00")]
    #[case::en(NumberLocale::En, Decimal::new(1234567, 0), "1,234,567.00")]
    #[case::plain(NumberLocale::Plain, Decimal::new(1234567, 0), "1234567.00")]
    fn test_format_amount(
        #[case] locale: NumberLocale,
        #[case] amount: Decimal,
        #[case] expected: &str,
    ) {
        assert_eq!(locale.format_amount(amount), expected);
    }

    #[rstest]
    #[case::fr(NumberLocale::Fr, Decimal::new(3333, 2), "33,33")]
    #[case::fr_whole(NumberLocale::Fr, Decimal::new(100, 0), "100,00")]
    #[case::en(NumberLocale::En, Decimal::new(6667, 2), "66.67")]
    fn test_format_percent(
        #[case] locale: NumberLocale,
        #[case] percent: Decimal,
        #[case] expected: &str,
    ) {
        assert_eq!(locale.format_percent(percent), expected);
    }
}
