//! [`Property`] definitions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{define_id, Labels, Resource};

/// Property listed for sale or rent.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// Listing title of this [`Property`].
    pub title: String,

    /// Postal address of this [`Property`].
    #[serde(default)]
    pub address: Option<String>,

    /// Listed price of this [`Property`].
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,

    /// URL of this [`Property`] main image.
    #[serde(default)]
    pub image_url: Option<String>,
}

define_id! {
    #[doc = "ID of a [`Property`]."]
}

impl Resource for Property {
    type Id = Id;

    const PATH: &'static str = "properties";
    const LABELS: Labels = Labels {
        plural: "propiedades",
        singular: "la propiedad",
    };

    fn id(&self) -> Id {
        self.id
    }
}
