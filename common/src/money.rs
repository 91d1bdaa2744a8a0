//! [`Money`]-related definitions.

use std::str::FromStr;

use derive_more::{AsRef, Display};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Amount of money in some currency.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Money {
    /// Amount of this [`Money`].
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    /// [`CurrencyCode`] of this amount.
    pub currency: CurrencyCode,
}

impl Money {
    /// Formats this [`Money`] with the provided currency `symbol` and number of
    /// `decimal_places`, like `$ 1,234.50`.
    #[must_use]
    pub fn format_with(&self, symbol: &str, decimal_places: u32) -> String {
        let rounded = self.amount.round_dp_with_strategy(
            decimal_places,
            RoundingStrategy::MidpointAwayFromZero,
        );
        let text = format!("{:.*}", decimal_places as usize, rounded.abs());
        let (int, frac) = text.split_once('.').unwrap_or((&text, ""));

        let mut grouped = String::with_capacity(int.len() + int.len() / 3);
        for (i, c) in int.chars().enumerate() {
            if i > 0 && (int.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        if frac.is_empty() {
            format!("{sign}{symbol} {grouped}")
        } else {
            format!("{sign}{symbol} {grouped}.{frac}")
        }
    }
}

/// ISO-like three-letter code of a currency (`USD`, `EUR`, `PEN`).
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a new [`CurrencyCode`] if the given `code` is valid.
    ///
    /// Lowercase letters are accepted and uppercased.
    #[must_use]
    pub fn new(code: impl AsRef<str>) -> Option<Self> {
        let code = code.as_ref();
        Self::check(code).then(|| Self(code.to_ascii_uppercase()))
    }

    /// Returns this [`CurrencyCode`] as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether the given `code` is a valid [`CurrencyCode`].
    fn check(code: &str) -> bool {
        code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
    }
}

impl FromStr for CurrencyCode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `CurrencyCode`")
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{CurrencyCode, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    #[test]
    fn parses_currency_codes() {
        assert_eq!(CurrencyCode::from_str("pen").unwrap(), code("PEN"));
        assert_eq!(code("usd").as_str(), "USD");

        assert!(CurrencyCode::from_str("US").is_err());
        assert!(CurrencyCode::from_str("U$D").is_err());
        assert!(CurrencyCode::from_str("EURO").is_err());
    }

    #[test]
    fn formats_with_symbol() {
        let money = |a| Money {
            amount: decimal(a),
            currency: code("USD"),
        };

        assert_eq!(money("1234567.5").format_with("$", 2), "$ 1,234,567.50");
        assert_eq!(money("999").format_with("$", 0), "$ 999");
        assert_eq!(money("-1000.005").format_with("S/", 2), "-S/ 1,000.01");
        assert_eq!(money("0.001").format_with("$", 2), "$ 0.00");
    }
}
