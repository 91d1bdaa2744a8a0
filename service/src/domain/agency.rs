//! [`Agency`] definitions.

use common::pagination::Paging;
use serde::{Deserialize, Serialize};

use super::{
    active_by_default, define_id, Activatable, Editable, FieldErrors, Labels,
    Resource, Validate,
};

/// Real estate agency.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Agency {
    /// ID of this [`Agency`].
    pub id: Id,

    /// Name of this [`Agency`].
    pub name: String,

    /// Postal address of this [`Agency`].
    #[serde(default)]
    pub address: Option<String>,

    /// Contact phone of this [`Agency`].
    #[serde(default)]
    pub phone: Option<String>,

    /// Contact email of this [`Agency`].
    #[serde(default)]
    pub email: Option<String>,

    /// Website URL of this [`Agency`].
    #[serde(default)]
    pub website: Option<String>,

    /// URL of this [`Agency`] logo image.
    #[serde(default)]
    pub logo_url: Option<String>,

    /// Free-form description of this [`Agency`].
    #[serde(default)]
    pub description: Option<String>,

    /// Indicator whether this [`Agency`] is active.
    #[serde(default = "active_by_default")]
    pub active: bool,
}

define_id! {
    #[doc = "ID of an [`Agency`]."]
}

impl Resource for Agency {
    type Id = Id;

    const PATH: &'static str = "agencies";
    const LABELS: Labels = Labels {
        plural: "agencias",
        singular: "la agencia",
    };
    const PAGING: Paging = Paging::ONE_BASED;

    fn id(&self) -> Id {
        self.id
    }
}

impl Editable for Agency {
    type Draft = Draft;
}

impl Activatable for Agency {
    fn is_active(&self) -> bool {
        self.active
    }
}

/// Data of an [`Agency`] to be created or updated.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Name of the [`Agency`].
    pub name: String,

    /// Postal address of the [`Agency`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Contact phone of the [`Agency`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Contact email of the [`Agency`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Website URL of the [`Agency`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// URL of the [`Agency`] logo, as returned by a logo upload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    /// Free-form description of the [`Agency`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Indicator whether the [`Agency`] is active.
    pub active: bool,
}

impl From<&Agency> for Draft {
    fn from(agency: &Agency) -> Self {
        Self {
            name: agency.name.clone(),
            address: agency.address.clone(),
            phone: agency.phone.clone(),
            email: agency.email.clone(),
            website: agency.website.clone(),
            logo_url: agency.logo_url.clone(),
            description: agency.description.clone(),
            active: agency.active,
        }
    }
}

impl Validate for Draft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        _ = errors
            .required("name", &self.name)
            .email("email", self.email.as_deref())
            .url("website", self.website.as_deref())
            .phone("phone", self.phone.as_deref());
        errors.into_result()
    }
}

/// Aggregated statistics of all the [`Agency`]s.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Total number of [`Agency`]s.
    #[serde(default)]
    pub total: u64,

    /// Number of active [`Agency`]s.
    #[serde(default)]
    pub active: u64,

    /// Number of inactive [`Agency`]s.
    #[serde(default)]
    pub inactive: u64,
}

#[cfg(test)]
mod spec {
    use super::{Agency, Draft};
    use crate::domain::Validate as _;

    #[test]
    fn decodes_partial_agency() {
        let agency: Agency = serde_json::from_str(
            r#"{"id": 7, "name": "Casa Sur", "logoUrl": null}"#,
        )
        .unwrap();

        assert_eq!(agency.id.get(), 7);
        assert_eq!(agency.name, "Casa Sur");
        assert!(agency.logo_url.is_none());
        assert!(agency.active);
    }

    #[test]
    fn validates_draft() {
        let mut draft = Draft {
            name: "Casa Sur".into(),
            website: Some("casasur.pe".into()),
            ..Draft::default()
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.get("website"), Some("URL inválida"));

        draft.website = Some("https://casasur.pe".into());
        assert!(draft.validate().is_ok());

        draft.name = String::new();
        assert!(draft.validate().unwrap_err().get("name").is_some());
    }

    #[test]
    fn serializes_only_present_fields() {
        let draft = Draft {
            name: "Casa Sur".into(),
            active: true,
            ..Draft::default()
        };

        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            serde_json::json!({"name": "Casa Sur", "active": true}),
        );
    }
}
