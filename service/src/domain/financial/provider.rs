//! [`Provider`] definitions.

use serde::{Deserialize, Serialize};

use crate::domain::{
    active_by_default, define_id, Activatable, Editable, FieldErrors, Labels,
    Resource, Validate,
};

/// Supplier billing [`Expense`]s.
///
/// [`Expense`]: super::Expense
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    /// ID of this [`Provider`].
    pub id: Id,

    /// Name of this [`Provider`].
    pub name: String,

    /// Tax identification number of this [`Provider`] (RUC).
    #[serde(default)]
    pub tax_id: Option<String>,

    /// Contact email of this [`Provider`].
    #[serde(default)]
    pub email: Option<String>,

    /// Contact phone of this [`Provider`].
    #[serde(default)]
    pub phone: Option<String>,

    /// Indicator whether this [`Provider`] is active.
    #[serde(default = "active_by_default")]
    pub active: bool,
}

define_id! {
    #[doc = "ID of a [`Provider`]."]
}

impl Resource for Provider {
    type Id = Id;

    const PATH: &'static str = "financial/providers";
    const LABELS: Labels = Labels {
        plural: "proveedores",
        singular: "el proveedor",
    };

    fn id(&self) -> Id {
        self.id
    }
}

impl Editable for Provider {
    type Draft = Draft;
}

impl Activatable for Provider {
    fn is_active(&self) -> bool {
        self.active
    }
}

/// Data of a [`Provider`] to be created or updated.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Name of the [`Provider`].
    pub name: String,

    /// Tax identification number of the [`Provider`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,

    /// Contact email of the [`Provider`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Contact phone of the [`Provider`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Indicator whether the [`Provider`] is active.
    pub active: bool,
}

impl Validate for Draft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        _ = errors
            .required("name", &self.name)
            .email("email", self.email.as_deref())
            .phone("phone", self.phone.as_deref());
        errors.into_result()
    }
}
