//! Condominium fee [`Payment`] definitions.

use common::{unit, DateTimeOf};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    condominium::{fee, unit as condo_unit},
    define_id, Editable, FieldErrors, Labels, Resource, Validate,
};

/// Payment of a condominium [`Fee`] by a [`Unit`].
///
/// [`Fee`]: super::Fee
/// [`Unit`]: super::Unit
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// ID of this [`Payment`].
    pub id: Id,

    /// ID of the paid [`Fee`].
    ///
    /// [`Fee`]: super::Fee
    pub fee_id: fee::Id,

    /// ID of the paying [`Unit`].
    ///
    /// [`Unit`]: super::Unit
    #[serde(default)]
    pub unit_id: Option<condo_unit::Id>,

    /// Paid amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    /// [`DateTime`] this [`Payment`] was made.
    ///
    /// [`DateTime`]: common::DateTime
    #[serde(default)]
    pub paid_at: Option<PaymentDateTime>,
}

define_id! {
    #[doc = "ID of a condominium fee [`Payment`]."]
}

/// [`DateTime`] of a [`Payment`] being made.
///
/// [`DateTime`]: common::DateTime
pub type PaymentDateTime = DateTimeOf<(Payment, unit::Payment)>;

impl Resource for Payment {
    type Id = Id;

    const PATH: &'static str = "condominium-fee-payments";
    const LABELS: Labels = Labels {
        plural: "pagos de cuotas",
        singular: "el pago de cuota",
    };

    fn id(&self) -> Id {
        self.id
    }
}

impl Editable for Payment {
    type Draft = Draft;
}

/// Data of a [`Payment`] to be registered or updated.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// ID of the paid [`Fee`].
    ///
    /// [`Fee`]: super::Fee
    pub fee_id: fee::Id,

    /// ID of the paying [`Unit`].
    ///
    /// [`Unit`]: super::Unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<condo_unit::Id>,

    /// Paid amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    /// [`DateTime`] the [`Payment`] was made.
    ///
    /// [`DateTime`]: common::DateTime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<PaymentDateTime>,
}

impl Validate for Draft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        _ = errors.check(
            "amount",
            self.amount > Decimal::ZERO,
            "El monto debe ser mayor que 0",
        );
        errors.into_result()
    }
}
