//! [`Appointment`] definitions.

use common::{datetime::Date, unit, DateTimeOf};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[cfg(doc)]
use common::DateTime;

use super::{
    agent, define_id, property, Editable, FieldErrors, Labels, Resource,
    Validate,
};

/// Visit of a [`Property`] by a client, attended by an [`Agent`].
///
/// [`Agent`]: super::Agent
/// [`Property`]: super::Property
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// ID of this [`Appointment`].
    pub id: Id,

    /// Short title of this [`Appointment`].
    pub title: String,

    /// Free-form description of this [`Appointment`].
    #[serde(default)]
    pub description: Option<String>,

    /// [`DateTime`] when this [`Appointment`] starts.
    pub appointment_date: ScheduleDateTime,

    /// Duration of this [`Appointment`] in minutes.
    pub duration_minutes: u16,

    /// ID of the visited [`Property`].
    ///
    /// [`Property`]: super::Property
    pub property_id: property::Id,

    /// ID of the attending [`Agent`].
    ///
    /// [`Agent`]: super::Agent
    pub agent_id: agent::Id,

    /// Name of the client.
    pub client_name: String,

    /// Email of the client.
    pub client_email: String,

    /// Phone of the client.
    #[serde(default)]
    pub client_phone: Option<String>,

    /// Additional notes of the client.
    #[serde(default)]
    pub notes: Option<String>,

    /// [`Status`] of this [`Appointment`].
    #[serde(default)]
    pub status: Status,
}

define_id! {
    #[doc = "ID of an [`Appointment`]."]
}

impl Resource for Appointment {
    type Id = Id;

    const PATH: &'static str = "appointments";
    const LABELS: Labels = Labels {
        plural: "citas",
        singular: "la cita",
    };

    fn id(&self) -> Id {
        self.id
    }
}

impl Editable for Appointment {
    type Draft = Draft;
}

/// [`DateTime`] when an [`Appointment`] (or a [`Slot`]) starts.
pub type ScheduleDateTime = DateTimeOf<(Appointment, unit::Schedule)>;

/// Status of an [`Appointment`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    EnumString,
    Eq,
    Hash,
    PartialEq,
    Serialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Status {
    /// Requested, not yet confirmed by the agency.
    #[default]
    Pending,

    /// Confirmed by the agency.
    Confirmed,

    /// Cancelled by any side.
    Cancelled,

    /// Took place.
    Completed,

    /// Any other status reported by the backend.
    #[serde(other)]
    #[strum(disabled)]
    Unknown,
}

impl Status {
    /// Returns a human-readable label of this [`Status`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::Confirmed => "Confirmada",
            Self::Cancelled => "Cancelada",
            Self::Completed => "Completada",
            Self::Unknown => "Desconocido",
        }
    }
}

/// Data of an [`Appointment`] to be created or updated.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Short title of the [`Appointment`].
    pub title: String,

    /// Free-form description of the [`Appointment`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// [`DateTime`] when the [`Appointment`] starts.
    pub appointment_date: ScheduleDateTime,

    /// Duration of the [`Appointment`] in minutes.
    pub duration_minutes: u16,

    /// ID of the visited [`Property`].
    ///
    /// [`Property`]: super::Property
    pub property_id: property::Id,

    /// ID of the attending [`Agent`].
    ///
    /// [`Agent`]: super::Agent
    pub agent_id: agent::Id,

    /// Name of the client.
    pub client_name: String,

    /// Email of the client.
    pub client_email: String,

    /// Phone of the client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_phone: Option<String>,

    /// Additional notes of the client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// [`Status`] of the [`Appointment`].
    pub status: Status,
}

impl Draft {
    /// Default duration of an [`Appointment`] in minutes.
    pub const DEFAULT_DURATION: u16 = 60;

    /// Allowed range of an [`Appointment`] duration in minutes.
    pub const DURATION_RANGE: std::ops::RangeInclusive<u16> = 15..=480;
}

impl From<&Appointment> for Draft {
    fn from(a: &Appointment) -> Self {
        Self {
            title: a.title.clone(),
            description: a.description.clone(),
            appointment_date: a.appointment_date,
            duration_minutes: a.duration_minutes,
            property_id: a.property_id,
            agent_id: a.agent_id,
            client_name: a.client_name.clone(),
            client_email: a.client_email.clone(),
            client_phone: a.client_phone.clone(),
            notes: a.notes.clone(),
            status: a.status,
        }
    }
}

impl Validate for Draft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        _ = errors
            .required("title", &self.title)
            .check(
                "durationMinutes",
                Self::DURATION_RANGE.contains(&self.duration_minutes),
                "La duración debe estar entre 15 y 480 minutos",
            )
            .required("clientName", &self.client_name)
            .required("clientEmail", &self.client_email)
            .email("clientEmail", Some(&self.client_email))
            .phone("clientPhone", self.client_phone.as_deref());
        errors.into_result()
    }
}

/// Time slot of an [`Agent`] on some day.
///
/// [`Agent`]: super::Agent
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// [`DateTime`] when this [`Slot`] starts.
    pub start_time: ScheduleDateTime,

    /// [`DateTime`] when this [`Slot`] ends.
    pub end_time: ScheduleDateTime,

    /// Indicator whether this [`Slot`] can still be booked.
    #[serde(default = "super::active_by_default")]
    pub available: bool,
}

impl Slot {
    /// Returns the duration of this [`Slot`] in whole minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time.unix_timestamp() - self.start_time.unix_timestamp()) / 60
    }
}

/// Selector of the [`Slot`]s of an [`Agent`] on a [`Date`].
///
/// [`Agent`]: super::Agent
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SlotQuery {
    /// ID of the [`Agent`].
    ///
    /// [`Agent`]: super::Agent
    pub agent_id: agent::Id,

    /// [`Date`] to list the [`Slot`]s of.
    pub date: Date,
}
