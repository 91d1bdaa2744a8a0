//! [`Condominium`] definitions.

pub mod fee;
pub mod payment;
pub mod unit;

use serde::{Deserialize, Serialize};

use super::{define_id, Editable, FieldErrors, Labels, Resource, Validate};

pub use self::{fee::Fee, payment::Payment, unit::Unit};

/// Residential condominium administered on the platform.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Condominium {
    /// ID of this [`Condominium`].
    pub id: Id,

    /// Name of this [`Condominium`].
    pub name: String,

    /// Postal address of this [`Condominium`].
    #[serde(default)]
    pub address: Option<String>,

    /// Total number of [`Unit`]s in this [`Condominium`].
    #[serde(default)]
    pub total_units: Option<u32>,

    /// Free-form description of this [`Condominium`].
    #[serde(default)]
    pub description: Option<String>,
}

define_id! {
    #[doc = "ID of a [`Condominium`]."]
}

impl Resource for Condominium {
    type Id = Id;

    const PATH: &'static str = "condominiums";
    const LABELS: Labels = Labels {
        plural: "condominios",
        singular: "el condominio",
    };

    fn id(&self) -> Id {
        self.id
    }
}

impl Editable for Condominium {
    type Draft = Draft;
}

/// Data of a [`Condominium`] to be created or updated.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Name of the [`Condominium`].
    pub name: String,

    /// Postal address of the [`Condominium`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Total number of [`Unit`]s in the [`Condominium`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_units: Option<u32>,

    /// Free-form description of the [`Condominium`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Condominium> for Draft {
    fn from(c: &Condominium) -> Self {
        Self {
            name: c.name.clone(),
            address: c.address.clone(),
            total_units: c.total_units,
            description: c.description.clone(),
        }
    }
}

impl Validate for Draft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        _ = errors.required("name", &self.name);
        errors.into_result()
    }
}
