//! Condominium [`Unit`] definitions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    condominium, define_id, Editable, FieldErrors, Labels, Resource, Validate,
};

/// Apartment (or any other private unit) of a [`Condominium`].
///
/// [`Condominium`]: super::Condominium
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    /// ID of this [`Unit`].
    pub id: Id,

    /// ID of the [`Condominium`] this [`Unit`] belongs to.
    ///
    /// [`Condominium`]: super::Condominium
    pub condominium_id: condominium::Id,

    /// Number of this [`Unit`] within its [`Condominium`] (`"101-A"`).
    ///
    /// [`Condominium`]: super::Condominium
    pub number: String,

    /// Floor this [`Unit`] is located at.
    #[serde(default)]
    pub floor: Option<i32>,

    /// Area of this [`Unit`] in square meters.
    #[serde(
        default,
        rename = "areaM2",
        with = "rust_decimal::serde::float_option"
    )]
    pub area_m2: Option<Decimal>,

    /// Name of this [`Unit`] owner.
    #[serde(default)]
    pub owner_name: Option<String>,
}

define_id! {
    #[doc = "ID of a condominium [`Unit`]."]
}

impl Resource for Unit {
    type Id = Id;

    const PATH: &'static str = "condominium-units";
    const LABELS: Labels = Labels {
        plural: "unidades",
        singular: "la unidad",
    };

    fn id(&self) -> Id {
        self.id
    }
}

impl Editable for Unit {
    type Draft = Draft;
}

/// Data of a [`Unit`] to be created or updated.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// ID of the [`Condominium`] the [`Unit`] belongs to.
    ///
    /// [`Condominium`]: super::Condominium
    pub condominium_id: condominium::Id,

    /// Number of the [`Unit`].
    pub number: String,

    /// Floor the [`Unit`] is located at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,

    /// Area of the [`Unit`] in square meters.
    #[serde(
        default,
        rename = "areaM2",
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub area_m2: Option<Decimal>,

    /// Name of the [`Unit`] owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
}

impl Validate for Draft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        _ = errors.required("number", &self.number).check(
            "areaM2",
            self.area_m2.map_or(true, |a| a > Decimal::ZERO),
            "El área debe ser mayor que 0",
        );
        errors.into_result()
    }
}
