//! Expense [`Payment`] definitions.

use common::{unit, DateTimeOf};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    define_id, financial::expense, Editable, FieldErrors, Labels, Resource,
    Validate,
};

/// Payment (possibly partial) of an [`Expense`].
///
/// [`Expense`]: super::Expense
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// ID of this [`Payment`].
    pub id: Id,

    /// ID of the paid [`Expense`].
    ///
    /// [`Expense`]: super::Expense
    pub expense_id: expense::Id,

    /// Paid amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    /// [`DateTime`] this [`Payment`] was made.
    ///
    /// [`DateTime`]: common::DateTime
    #[serde(default)]
    pub paid_at: Option<PaymentDateTime>,

    /// Payment method (`"TRANSFER"`, `"CASH"`).
    #[serde(default)]
    pub method: Option<String>,
}

define_id! {
    #[doc = "ID of an expense [`Payment`]."]
}

/// [`DateTime`] of a [`Payment`] being made.
///
/// [`DateTime`]: common::DateTime
pub type PaymentDateTime = DateTimeOf<(Payment, unit::Payment)>;

impl Resource for Payment {
    type Id = Id;

    const PATH: &'static str = "financial/payments";
    const LABELS: Labels = Labels {
        plural: "pagos",
        singular: "el pago",
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
    /// ID of the paid [`Expense`].
    ///
    /// [`Expense`]: super::Expense
    pub expense_id: expense::Id,

    /// Paid amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    /// [`DateTime`] the [`Payment`] was made.
    ///
    /// [`DateTime`]: common::DateTime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<PaymentDateTime>,

    /// Payment method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
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
