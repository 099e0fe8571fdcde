//! pt-BR presentation strings for currency amounts and due dates.
//!
//! The engine's contract is exact decimals; these helpers produce the
//! `R$ 1.500,50` / `dd/mm/aaaa` strings the tracking screen displays.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::RoundingStrategy;
use rust_decimal_macros::dec;

use crate::types::Money;

/// Format an amount as Brazilian Real: thousands separated by `.`, cents by
/// `,`. Values round to cents, midpoint away from zero.
pub fn format_currency_brl(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let total_cents = (rounded.abs() * dec!(100))
        .round()
        .to_i128()
        .unwrap_or(0);
    let units = total_cents / 100;
    let cents = total_cents % 100;

    let body = format!("R$ {},{:02}", group_thousands(units), cents);
    if rounded.is_sign_negative() && total_cents != 0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// Format a due date as `dd/mm/aaaa`.
pub fn format_date_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn group_thousands(value: i128) -> String {
    let digits = value.to_string();
    let mut groups: Vec<&str> = Vec::new();
    let mut end = digits.len();
    while end > 3 {
        groups.push(&digits[end - 3..end]);
        end -= 3;
    }
    groups.push(&digits[..end]);
    groups.reverse();
    groups.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_currency_grouping_and_cents() {
        assert_eq!(format_currency_brl(dec!(1500.50)), "R$ 1.500,50");
        assert_eq!(format_currency_brl(dec!(0)), "R$ 0,00");
        assert_eq!(format_currency_brl(dec!(9.99)), "R$ 9,99");
        assert_eq!(format_currency_brl(dec!(31400)), "R$ 31.400,00");
        assert_eq!(format_currency_brl(dec!(1234567.891)), "R$ 1.234.567,89");
    }

    #[test]
    fn test_format_currency_negative_amounts() {
        assert_eq!(format_currency_brl(dec!(-434.89)), "-R$ 434,89");
        // A residue that rounds to zero loses its sign.
        assert_eq!(format_currency_brl(dec!(-0.001)), "R$ 0,00");
    }

    #[test]
    fn test_format_date_br() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 10).unwrap();
        assert_eq!(format_date_br(date), "10/10/2026");
    }
}
