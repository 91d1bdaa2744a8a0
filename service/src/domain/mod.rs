//! Domain definitions.

pub mod agency;
pub mod agent;
pub mod appointment;
pub mod condominium;
pub mod currency;
pub mod facility;
pub mod financial;
pub mod partner;
pub mod property;
pub mod upload;
pub mod user;
pub mod validation;

use std::{fmt, hash::Hash, str::FromStr};

use common::pagination::Paging;
use serde::{de::DeserializeOwned, Serialize};

pub use self::{
    agency::Agency,
    agent::Agent,
    appointment::Appointment,
    condominium::Condominium,
    currency::Currency,
    facility::NearbyFacility,
    partner::Partner,
    property::Property,
    user::User,
    validation::{FieldErrors, Validate},
};

/// Entity owned by the backend and exposed through REST endpoints.
pub trait Resource: Clone + fmt::Debug + Serialize + DeserializeOwned {
    /// Type of this [`Resource`] identifier.
    type Id: Copy
        + fmt::Debug
        + fmt::Display
        + Eq
        + FromStr
        + Hash
        + Serialize
        + DeserializeOwned;

    /// Path of this [`Resource`] collection, relative to the `/api/` prefix.
    const PATH: &'static str;

    /// Human-readable [`Labels`] of this [`Resource`].
    const LABELS: Labels;

    /// [`Paging`] convention of this [`Resource`] collection.
    const PAGING: Paging = Paging::ZERO_BASED;

    /// Returns the identifier of this [`Resource`].
    fn id(&self) -> Self::Id;
}

/// [`Resource`] which can be created and updated by a client.
pub trait Editable: Resource {
    /// Data submitted to create or update this [`Resource`].
    type Draft: Clone + fmt::Debug + Serialize + Validate;
}

/// [`Resource`] carrying an "active" flag toggled by a dedicated endpoint.
pub trait Activatable: Resource {
    /// Name of the JSON field holding the flag.
    const ACTIVE_FIELD: &'static str = "active";

    /// Indicates whether this [`Resource`] is active.
    fn is_active(&self) -> bool;
}

/// Marker of an [`Activatable`] resource flipping its "active" flag.
#[derive(Clone, Copy, Debug)]
pub struct ToggleActive;

/// Human-readable (Spanish) names of a [`Resource`], used to compose the
/// messages shown to users.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Labels {
    /// Plural form, without an article (`"agencias"`).
    pub plural: &'static str,

    /// Singular form, with a definite article (`"la agencia"`).
    pub singular: &'static str,
}

impl Labels {
    /// Returns the singular form preceded by the `de` preposition, contracting
    /// `de el` into `del`.
    #[must_use]
    pub fn of_singular(&self) -> String {
        match self.singular.strip_prefix("el ") {
            Some(rest) => format!("del {rest}"),
            None => format!("de {}", self.singular),
        }
    }
}

/// Defines a numeric identifier type of a [`Resource`].
macro_rules! define_id {
    ($(#[doc = $doc:literal])*) => {
        $(#[doc = $doc])*
        #[derive(
            Clone,
            Copy,
            Debug,
            ::serde::Deserialize,
            ::derive_more::Display,
            Eq,
            ::derive_more::From,
            ::derive_more::FromStr,
            Hash,
            ::derive_more::Into,
            Ord,
            PartialEq,
            PartialOrd,
            ::serde::Serialize,
        )]
        #[serde(transparent)]
        pub struct Id(i64);

        impl Id {
            /// Returns the raw numeric value of this [`Id`].
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }
    };
}
pub(crate) use define_id;

/// Default value of "active" flags missing in backend responses.
pub(crate) const fn active_by_default() -> bool {
    true
}
