//! Cleaning and masking of the values typed into a receipt form.

use crate::latin::strip_diacritics;
use crate::ReceiptError;
use chrono::{Datelike, Local};
use std::fmt;
use std::str::FromStr;

/// Drops commas, full stops and whitespace typed at the end of a value. The
/// receipt text supplies its own punctuation after every field.
pub fn strip_trailing_punctuation(value: &str) -> String {
    value
        .trim_end_matches(|ch: char| ch == ',' || ch == '.' || ch.is_whitespace())
        .trim()
        .to_string()
}

/// Upper case, keeping accents (`conceição` -> `CONCEIÇÃO`)
pub fn to_upper_pt(value: &str) -> String {
    value.to_uppercase()
}

/// Masks up to 11 digits of `input` as a CPF, `000.000.000-00`. Partial input
/// is masked as far as it goes; anything that is not a digit is ignored.
pub fn format_cpf(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(char::is_ascii_digit).take(11).collect();
    let mut masked = String::with_capacity(14);
    for (i, digit) in digits.iter().enumerate() {
        match i {
            3 | 6 => masked.push('.'),
            9 => masked.push('-'),
            _ => {}
        }
        masked.push(*digit);
    }
    masked
}

/// Reads the digits of `input` as cents and formats them as a Brazilian
/// amount, `1.234,56`. `None` when there are no digits at all.
pub fn format_amount(input: &str) -> Option<String> {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }

    let digits = digits.trim_start_matches('0');
    let padded = format!("{digits:0>3}");
    let (units, cents) = padded.split_at(padded.len() - 2);

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    Some(format!("{grouped},{cents}"))
}

/// Months as they are written on a receipt
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Month {
    Janeiro,
    Fevereiro,
    Marco,
    Abril,
    Maio,
    Junho,
    Julho,
    Agosto,
    Setembro,
    Outubro,
    Novembro,
    Dezembro,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Janeiro,
        Month::Fevereiro,
        Month::Marco,
        Month::Abril,
        Month::Maio,
        Month::Junho,
        Month::Julho,
        Month::Agosto,
        Month::Setembro,
        Month::Outubro,
        Month::Novembro,
        Month::Dezembro,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Month::Janeiro => "JANEIRO",
            Month::Fevereiro => "FEVEREIRO",
            Month::Marco => "MARÇO",
            Month::Abril => "ABRIL",
            Month::Maio => "MAIO",
            Month::Junho => "JUNHO",
            Month::Julho => "JULHO",
            Month::Agosto => "AGOSTO",
            Month::Setembro => "SETEMBRO",
            Month::Outubro => "OUTUBRO",
            Month::Novembro => "NOVEMBRO",
            Month::Dezembro => "DEZEMBRO",
        }
    }

    /// 1-based month number
    pub fn number(&self) -> u32 {
        Month::ALL
            .iter()
            .position(|month| month == self)
            .map(|i| i as u32 + 1)
            .unwrap_or(1)
    }

    pub fn from_number(number: u32) -> Option<Month> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        Month::ALL.get(index).copied()
    }

    pub fn days_in(&self, year: i32) -> u8 {
        match self {
            Month::Abril | Month::Junho | Month::Setembro | Month::Novembro => 30,
            Month::Fevereiro if is_leap_year(year) => 29,
            Month::Fevereiro => 28,
            _ => 31,
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = ReceiptError;

    /// Accepts month names in any case, with or without accents
    fn from_str(s: &str) -> Result<Month, ReceiptError> {
        let wanted = strip_diacritics(&to_upper_pt(s.trim()));
        Month::ALL
            .into_iter()
            .find(|month| strip_diacritics(month.name()) == wanted)
            .ok_or_else(|| ReceiptError::InvalidMonth(s.to_string()))
    }
}

/// The date a receipt is issued on
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReceiptDate {
    day: u8,
    month: Month,
    year: i32,
}

impl ReceiptDate {
    /// Fails when `day` does not exist in that month of that year
    pub fn new(day: u8, month: Month, year: i32) -> Result<ReceiptDate, ReceiptError> {
        if day == 0 || day > month.days_in(year) {
            return Err(ReceiptError::InvalidDate {
                day,
                month: month.name().to_string(),
                year,
            });
        }
        Ok(ReceiptDate { day, month, year })
    }

    /// Today, on this machine's clock
    pub fn today() -> ReceiptDate {
        let today = Local::now().date_naive();
        ReceiptDate {
            day: today.day() as u8,
            month: Month::from_number(today.month()).unwrap_or(Month::Janeiro),
            year: today.year(),
        }
    }

    /// Day of the month, from 1
    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// `5 de MARÇO de 2025`
    pub fn long_form(&self) -> String {
        format!("{} de {} de {}", self.day, self.month, self.year)
    }
}
