//! Condominium [`Fee`] definitions.

use common::{datetime::Date, CurrencyCode, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    condominium, define_id, Editable, FieldErrors, Labels, Resource, Validate,
};

/// Recurring (or extraordinary) fee charged to the units of a [`Condominium`].
///
/// [`Condominium`]: super::Condominium
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    /// ID of this [`Fee`].
    pub id: Id,

    /// ID of the [`Condominium`] charging this [`Fee`].
    ///
    /// [`Condominium`]: super::Condominium
    pub condominium_id: condominium::Id,

    /// Name of this [`Fee`] (`"Mantenimiento marzo"`).
    pub name: String,

    /// Amount charged per unit.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    /// [`CurrencyCode`] of the `amount`.
    pub currency: CurrencyCode,

    /// [`Date`] this [`Fee`] is due.
    #[serde(default, with = "common::datetime::serde::date_option")]
    pub due_date: Option<Date>,
}

define_id! {
    #[doc = "ID of a condominium [`Fee`]."]
}

impl Fee {
    /// Returns the [`Money`] charged by this [`Fee`].
    #[must_use]
    pub fn money(&self) -> Money {
        Money {
            amount: self.amount,
            currency: self.currency.clone(),
        }
    }
}

impl Resource for Fee {
    type Id = Id;

    const PATH: &'static str = "condominium-fees";
    const LABELS: Labels = Labels {
        plural: "cuotas",
        singular: "la cuota",
    };

    fn id(&self) -> Id {
        self.id
    }
}

impl Editable for Fee {
    type Draft = Draft;
}

/// Data of a [`Fee`] to be created or updated.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// ID of the [`Condominium`] charging the [`Fee`].
    ///
    /// [`Condominium`]: super::Condominium
    pub condominium_id: condominium::Id,

    /// Name of the [`Fee`].
    pub name: String,

    /// Amount charged per unit.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    /// [`CurrencyCode`] of the `amount`.
    pub currency: CurrencyCode,

    /// [`Date`] the [`Fee`] is due.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "common::datetime::serde::date_option"
    )]
    pub due_date: Option<Date>,
}

impl Validate for Draft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        _ = errors.required("name", &self.name).check(
            "amount",
            self.amount >= Decimal::ZERO,
            "El monto no puede ser negativo",
        );
        errors.into_result()
    }
}
