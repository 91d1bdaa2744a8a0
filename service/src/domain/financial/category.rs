//! [`Category`] definitions.

use serde::{Deserialize, Serialize};

use crate::domain::{
    define_id, Editable, FieldErrors, Labels, Resource, Validate,
};

/// Category grouping [`Expense`]s.
///
/// [`Expense`]: super::Expense
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// ID of this [`Category`].
    pub id: Id,

    /// Name of this [`Category`].
    pub name: String,

    /// Free-form description of this [`Category`].
    #[serde(default)]
    pub description: Option<String>,
}

define_id! {
    #[doc = "ID of a [`Category`]."]
}

impl Resource for Category {
    type Id = Id;

    const PATH: &'static str = "financial/categories";
    const LABELS: Labels = Labels {
        plural: "categorías",
        singular: "la categoría",
    };

    fn id(&self) -> Id {
        self.id
    }
}

impl Editable for Category {
    type Draft = Draft;
}

/// Data of a [`Category`] to be created or updated.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Name of the [`Category`].
    pub name: String,

    /// Free-form description of the [`Category`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Validate for Draft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        _ = errors.required("name", &self.name);
        errors.into_result()
    }
}
