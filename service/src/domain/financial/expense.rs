//! [`Expense`] definitions.

use common::{datetime::Date, define_kind, CurrencyCode, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    define_id,
    financial::{category, provider},
    Editable, FieldErrors, Labels, Resource, Validate,
};

/// Expense of an agency, optionally billed by a [`Provider`].
///
/// [`Provider`]: super::Provider
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// ID of this [`Expense`].
    pub id: Id,

    /// Description of this [`Expense`].
    pub description: String,

    /// Amount of this [`Expense`].
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    /// [`CurrencyCode`] of the `amount`.
    pub currency: CurrencyCode,

    /// [`Status`] of this [`Expense`].
    pub status: Status,

    /// ID of the [`Provider`] billing this [`Expense`].
    ///
    /// [`Provider`]: super::Provider
    #[serde(default)]
    pub provider_id: Option<provider::Id>,

    /// ID of the [`Category`] of this [`Expense`].
    ///
    /// [`Category`]: super::Category
    #[serde(default)]
    pub category_id: Option<category::Id>,

    /// [`Date`] this [`Expense`] is due.
    #[serde(default, with = "common::datetime::serde::date_option")]
    pub due_date: Option<Date>,

    /// Sum of the [`Payment`]s made, as computed by the backend.
    ///
    /// [`Payment`]: super::Payment
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_paid: Option<Decimal>,

    /// Amount still to be paid, as computed by the backend.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub balance: Option<Decimal>,
}

define_id! {
    #[doc = "ID of an [`Expense`]."]
}

define_kind! {
    #[doc = "Status of an [`Expense`]."]
    enum Status {
        #[doc = "Nothing paid yet."]
        Pending = "Pendiente",

        #[doc = "Paid in part."]
        PartiallyPaid = "Pago parcial",

        #[doc = "Fully paid."]
        Paid = "Pagado",

        #[doc = "Not paid in time."]
        Overdue = "Vencido",

        #[doc = "Won't be paid."]
        Cancelled = "Anulado",
    }
}

impl Expense {
    /// Returns the [`Money`] of this [`Expense`].
    #[must_use]
    pub fn money(&self) -> Money {
        Money {
            amount: self.amount,
            currency: self.currency.clone(),
        }
    }
}

impl Resource for Expense {
    type Id = Id;

    const PATH: &'static str = "financial/expenses";
    const LABELS: Labels = Labels {
        plural: "gastos",
        singular: "el gasto",
    };

    fn id(&self) -> Id {
        self.id
    }
}

impl Editable for Expense {
    type Draft = Draft;
}

/// Data of an [`Expense`] to be created or updated.
///
/// `totalPaid` and `balance` are derived by the backend and never submitted.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Description of the [`Expense`].
    pub description: String,

    /// Amount of the [`Expense`].
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    /// [`CurrencyCode`] of the `amount`.
    pub currency: CurrencyCode,

    /// [`Status`] of the [`Expense`].
    pub status: Status,

    /// ID of the [`Provider`] billing the [`Expense`].
    ///
    /// [`Provider`]: super::Provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<provider::Id>,

    /// ID of the [`Category`] of the [`Expense`].
    ///
    /// [`Category`]: super::Category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<category::Id>,

    /// [`Date`] the [`Expense`] is due.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "common::datetime::serde::date_option"
    )]
    pub due_date: Option<Date>,
}

impl From<&Expense> for Draft {
    fn from(e: &Expense) -> Self {
        Self {
            description: e.description.clone(),
            amount: e.amount,
            currency: e.currency.clone(),
            status: e.status,
            provider_id: e.provider_id,
            category_id: e.category_id,
            due_date: e.due_date,
        }
    }
}

impl Validate for Draft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        _ = errors.required("description", &self.description).check(
            "amount",
            self.amount >= Decimal::ZERO,
            "El monto no puede ser negativo",
        );
        errors.into_result()
    }
}

#[cfg(test)]
mod spec {
    use super::{Expense, Status};

    #[test]
    fn decodes_derived_totals() {
        let expense: Expense = serde_json::from_value(serde_json::json!({
            "id": 4,
            "description": "Pintura de fachada",
            "amount": 1200.5,
            "currency": "PEN",
            "status": "PARTIALLY_PAID",
            "dueDate": "2025-04-30T00:00:00",
            "totalPaid": 200,
            "balance": 1000.5,
        }))
        .unwrap();

        assert_eq!(expense.status, Status::PartiallyPaid);
        assert_eq!(expense.status.label(), "Pago parcial");
        assert_eq!(
            expense.due_date.map(common::datetime::format_date).as_deref(),
            Some("2025-04-30"),
        );
        assert_eq!(expense.balance, Some("1000.5".parse().unwrap()));
        assert_eq!(expense.money().format_with("S/", 2), "S/ 1,200.50");
    }
}
