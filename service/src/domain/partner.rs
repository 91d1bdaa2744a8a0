//! [`Partner`] definitions.

use common::define_kind;
use serde::{Deserialize, Serialize};

use super::{
    active_by_default, define_id, Activatable, Editable, FieldErrors, Labels,
    Resource, Validate,
};

/// Individual or company collaborating with the agencies (lawyers,
/// appraisers, brokers).
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    /// ID of this [`Partner`].
    pub id: Id,

    /// [`Kind`] of this [`Partner`].
    pub kind: Kind,

    /// Full name (or business name) of this [`Partner`].
    pub name: String,

    /// Contact email of this [`Partner`].
    #[serde(default)]
    pub email: Option<String>,

    /// Contact phone of this [`Partner`].
    #[serde(default)]
    pub phone: Option<String>,

    /// Specializations of this [`Partner`].
    #[serde(default)]
    pub specializations: Vec<String>,

    /// Territories covered by this [`Partner`].
    #[serde(default)]
    pub territories: Vec<String>,

    /// Languages spoken by this [`Partner`].
    #[serde(default)]
    pub languages: Vec<String>,

    /// URL of this [`Partner`] photo.
    #[serde(default)]
    pub photo_url: Option<String>,

    /// Indicator whether this [`Partner`] is active.
    #[serde(default = "active_by_default")]
    pub active: bool,
}

define_id! {
    #[doc = "ID of a [`Partner`]."]
}

define_kind! {
    #[doc = "Kind of a [`Partner`]."]
    enum Kind {
        #[doc = "Natural person."]
        Individual = "Persona natural",

        #[doc = "Legal entity."]
        Company = "Empresa",
    }
}

impl Resource for Partner {
    type Id = Id;

    const PATH: &'static str = "partners";
    const LABELS: Labels = Labels {
        plural: "socios",
        singular: "el socio",
    };

    fn id(&self) -> Id {
        self.id
    }
}

impl Editable for Partner {
    type Draft = Draft;
}

impl Activatable for Partner {
    fn is_active(&self) -> bool {
        self.active
    }
}

/// Data of a [`Partner`] to be created or updated.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// [`Kind`] of the [`Partner`].
    pub kind: Kind,

    /// Full name (or business name) of the [`Partner`].
    pub name: String,

    /// Contact email of the [`Partner`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Contact phone of the [`Partner`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Specializations of the [`Partner`].
    pub specializations: Vec<String>,

    /// Territories covered by the [`Partner`].
    pub territories: Vec<String>,

    /// Languages spoken by the [`Partner`].
    pub languages: Vec<String>,

    /// URL of the [`Partner`] photo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,

    /// Indicator whether the [`Partner`] is active.
    pub active: bool,
}

impl Draft {
    /// Splits a comma-separated free-text list (as typed into a form) into
    /// trimmed non-empty entries.
    #[must_use]
    pub fn split_list(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }
}

impl From<&Partner> for Draft {
    fn from(p: &Partner) -> Self {
        Self {
            kind: p.kind,
            name: p.name.clone(),
            email: p.email.clone(),
            phone: p.phone.clone(),
            specializations: p.specializations.clone(),
            territories: p.territories.clone(),
            languages: p.languages.clone(),
            photo_url: p.photo_url.clone(),
            active: p.active,
        }
    }
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

#[cfg(test)]
mod spec {
    use super::{Draft, Kind, Partner};

    #[test]
    fn splits_free_text_lists() {
        assert_eq!(
            Draft::split_list(" tasaciones, ,legal ,"),
            vec!["tasaciones".to_owned(), "legal".to_owned()],
        );
        assert!(Draft::split_list("").is_empty());
    }

    #[test]
    fn decodes_missing_lists() {
        let partner: Partner = serde_json::from_value(serde_json::json!({
            "id": 9,
            "kind": "COMPANY",
            "name": "Tasaciones SAC",
        }))
        .unwrap();

        assert_eq!(partner.kind, Kind::Company);
        assert!(partner.languages.is_empty());
        assert!(partner.active);
    }
}
