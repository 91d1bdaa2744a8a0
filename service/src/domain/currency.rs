//! [`Currency`] definitions.

use common::{CurrencyCode, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    active_by_default, define_id, Activatable, Editable, FieldErrors, Labels,
    Resource, Validate,
};

/// Currency accepted by the platform, with its exchange rate to the base one.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    /// ID of this [`Currency`].
    pub id: Id,

    /// [`CurrencyCode`] of this [`Currency`].
    pub code: CurrencyCode,

    /// Name of this [`Currency`].
    pub name: String,

    /// Symbol of this [`Currency`] (`$`, `S/`).
    pub symbol: String,

    /// Rate of this [`Currency`] relative to the base one.
    #[serde(with = "rust_decimal::serde::float")]
    pub exchange_rate: Decimal,

    /// Indicator whether this [`Currency`] is the base one.
    #[serde(default)]
    pub is_base: bool,

    /// Indicator whether this [`Currency`] is active.
    #[serde(default = "active_by_default")]
    pub is_active: bool,

    /// Number of decimal places amounts in this [`Currency`] are shown with.
    #[serde(default = "Draft::default_decimal_places")]
    pub decimal_places: u8,

    /// Display format of amounts in this [`Currency`].
    #[serde(default)]
    pub format: Option<String>,
}

define_id! {
    #[doc = "ID of a [`Currency`]."]
}

impl Currency {
    /// Formats the provided `amount` with the symbol and the decimal places of
    /// this [`Currency`].
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        Money {
            amount,
            currency: self.code.clone(),
        }
        .format_with(&self.symbol, u32::from(self.decimal_places))
    }
}

impl Resource for Currency {
    type Id = Id;

    const PATH: &'static str = "currencies";
    const LABELS: Labels = Labels {
        plural: "monedas",
        singular: "la moneda",
    };

    fn id(&self) -> Id {
        self.id
    }
}

impl Editable for Currency {
    type Draft = Draft;
}

impl Activatable for Currency {
    const ACTIVE_FIELD: &'static str = "isActive";

    fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Data of a [`Currency`] to be created or updated.
///
/// The `code` is kept as entered, so it can be validated.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Three-letter code of the [`Currency`].
    pub code: String,

    /// Name of the [`Currency`].
    pub name: String,

    /// Symbol of the [`Currency`].
    pub symbol: String,

    /// Rate of the [`Currency`] relative to the base one.
    #[serde(with = "rust_decimal::serde::float")]
    pub exchange_rate: Decimal,

    /// Indicator whether the [`Currency`] is the base one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_base: Option<bool>,

    /// Indicator whether the [`Currency`] is active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    /// Number of decimal places of the [`Currency`].
    pub decimal_places: u8,

    /// Display format of the [`Currency`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Draft {
    /// Maximum number of decimal places of a [`Currency`].
    pub const MAX_DECIMAL_PLACES: u8 = 8;

    /// Returns the number of decimal places used when none is reported.
    const fn default_decimal_places() -> u8 {
        2
    }
}

impl From<&Currency> for Draft {
    fn from(c: &Currency) -> Self {
        Self {
            code: c.code.to_string(),
            name: c.name.clone(),
            symbol: c.symbol.clone(),
            exchange_rate: c.exchange_rate,
            is_base: Some(c.is_base),
            is_active: Some(c.is_active),
            decimal_places: c.decimal_places,
            format: c.format.clone(),
        }
    }
}

impl Validate for Draft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        _ = errors
            .required("code", &self.code)
            .check(
                "code",
                CurrencyCode::new(&self.code).is_some(),
                "El código debe tener 3 letras",
            )
            .required("name", &self.name)
            .required("symbol", &self.symbol)
            .check(
                "exchangeRate",
                self.exchange_rate > Decimal::ZERO,
                "La tasa de cambio debe ser mayor que 0",
            )
            .check(
                "decimalPlaces",
                self.decimal_places <= Self::MAX_DECIMAL_PLACES,
                "Los decimales deben estar entre 0 y 8",
            );
        errors.into_result()
    }
}

/// Marker of a [`Currency`] becoming the base one.
#[derive(Clone, Copy, Debug)]
pub struct SetBase;

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::{Currency, Draft};
    use crate::domain::Validate as _;

    fn usd() -> Draft {
        Draft {
            code: "USD".into(),
            name: "Dólar Estadounidense".into(),
            symbol: "$".into(),
            exchange_rate: Decimal::ONE,
            is_base: None,
            is_active: None,
            decimal_places: 2,
            format: None,
        }
    }

    #[test]
    fn serializes_draft_as_submitted() {
        assert_eq!(
            serde_json::to_value(usd()).unwrap(),
            serde_json::json!({
                "code": "USD",
                "name": "Dólar Estadounidense",
                "symbol": "$",
                "exchangeRate": 1.0,
                "decimalPlaces": 2,
            }),
        );
    }

    #[test]
    fn validates_ranges() {
        assert!(usd().validate().is_ok());

        let mut draft = usd();
        draft.code = "US".into();
        draft.exchange_rate = Decimal::ZERO;
        draft.decimal_places = 9;
        let errors = draft.validate().unwrap_err();
        assert!(errors.get("code").is_some());
        assert!(errors.get("exchangeRate").is_some());
        assert!(errors.get("decimalPlaces").is_some());
    }

    #[test]
    fn formats_amounts() {
        let pen: Currency = serde_json::from_value(serde_json::json!({
            "id": 2,
            "code": "PEN",
            "name": "Sol",
            "symbol": "S/",
            "exchangeRate": 0.2667,
        }))
        .unwrap();
        let usd: Currency = serde_json::from_value(serde_json::json!({
            "id": 1,
            "code": "USD",
            "name": "Dólar",
            "symbol": "$",
            "exchangeRate": 1,
            "isBase": true,
        }))
        .unwrap();

        assert!(pen.is_active);
        assert_eq!(pen.decimal_places, 2);
        assert_eq!(pen.format("1500.5".parse().unwrap()), "S/ 1,500.50");
        assert_eq!(usd.format("-0.5".parse().unwrap()), "-$ 0.50");
    }
}
