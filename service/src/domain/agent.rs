//! [`Agent`] definitions.

use serde::{Deserialize, Serialize};

use super::{define_id, Labels, Resource};

/// Real estate agent attending [`Appointment`]s.
///
/// [`Appointment`]: super::Appointment
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// ID of this [`Agent`].
    pub id: Id,

    /// Full name of this [`Agent`].
    pub name: String,

    /// Contact email of this [`Agent`].
    #[serde(default)]
    pub email: Option<String>,

    /// Contact phone of this [`Agent`].
    #[serde(default)]
    pub phone: Option<String>,

    /// URL of this [`Agent`] photo.
    #[serde(default)]
    pub photo_url: Option<String>,
}

define_id! {
    #[doc = "ID of an [`Agent`]."]
}

impl Resource for Agent {
    type Id = Id;

    const PATH: &'static str = "agents";
    const LABELS: Labels = Labels {
        plural: "agentes",
        singular: "el agente",
    };

    fn id(&self) -> Id {
        self.id
    }
}
