//! [`Backend`]-related implementations.

#[cfg(any(test, feature = "mock"))]
pub mod mock;
#[cfg(feature = "rest")]
pub mod rest;

use derive_more::{Display, Error as StdError, From};

use crate::domain::{user::session::Token, Labels};

#[cfg(any(test, feature = "mock"))]
pub use self::mock::Mock;
#[cfg(feature = "rest")]
pub use self::rest::Rest;

/// Backend operation.
pub use common::Handler as Backend;

/// [`Backend`] whose requests can be authorized with a session [`Token`].
pub trait Authorize {
    /// Returns a copy of this [`Backend`] authorizing its requests with the
    /// provided [`Token`].
    #[must_use]
    fn authorized(&self, token: Token) -> Self;

    /// Returns a copy of this [`Backend`] performing anonymous requests.
    #[must_use]
    fn anonymous(&self) -> Self;
}

/// [`Backend`] error.
#[derive(Debug, Display, StdError)]
#[display("{operation} failed: {kind}")]
pub struct Error {
    /// [`Operation`] that failed.
    operation: Operation,

    /// [`ErrorKind`] of this [`Error`].
    #[error(source)]
    kind: ErrorKind,
}

impl Error {
    /// Creates a new [`Error`] of the provided [`Operation`].
    #[must_use]
    pub fn new(operation: Operation, kind: impl Into<ErrorKind>) -> Self {
        Self {
            operation,
            kind: kind.into(),
        }
    }

    /// Returns the [`Operation`] that failed.
    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Returns the [`ErrorKind`] of this [`Error`].
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Indicates whether the backend rejected the session credentials.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.kind, ErrorKind::Unauthorized)
    }

    /// Returns the human-readable message describing this [`Error`] to a
    /// user.
    #[must_use]
    pub fn message(&self) -> String {
        self.operation.message()
    }
}

/// Kind of a [`Backend`] [`Error`].
#[derive(Debug, Display, From, StdError)]
pub enum ErrorKind {
    /// Request couldn't be performed or its response couldn't be read.
    #[cfg(feature = "rest")]
    #[display("transport failure: {_0}")]
    Transport(reqwest::Error),

    /// Backend responded with a non-2xx status.
    #[display("unexpected `{_0}` status")]
    #[from(ignore)]
    Status(#[error(not(source))] u16),

    /// Backend rejected the session credentials (`401` status).
    #[display("unauthorized")]
    #[from(ignore)]
    Unauthorized,

    /// Response body doesn't match the expected shape.
    #[display("malformed response: {_0}")]
    Decode(serde_json::Error),
}

impl ErrorKind {
    /// Creates a new [`ErrorKind`] out of a non-2xx HTTP `status`.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        if status == 401 {
            Self::Unauthorized
        } else {
            Self::Status(status)
        }
    }
}

/// Operation performed upon a [`Backend`], identifying the failed one in an
/// [`Error`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[display("{action} of {}", labels.plural)]
pub struct Operation {
    /// Performed [`Action`].
    pub action: Action,

    /// [`Labels`] of the involved resource.
    pub labels: Labels,
}

impl Operation {
    /// Creates a new [`Operation`] performing the `action` upon the resource
    /// with the provided [`Labels`].
    #[must_use]
    pub const fn new(action: Action, labels: Labels) -> Self {
        Self { action, labels }
    }

    /// Returns the human-readable message shown to a user when this
    /// [`Operation`] fails.
    #[must_use]
    pub fn message(&self) -> String {
        use Action as A;

        let Labels { plural, singular } = self.labels;
        match self.action {
            A::List => format!("Error al obtener {plural}"),
            A::Get => format!("Error al obtener {singular}"),
            A::Create => format!("Error al crear {singular}"),
            A::Update => format!("Error al actualizar {singular}"),
            A::Delete => format!("Error al eliminar {singular}"),
            A::ToggleActive => {
                format!("Error al cambiar el estado {}", self.labels.of_singular())
            }
            A::SetBase => "Error al establecer la moneda base".to_owned(),
            A::Nearby => "Error al buscar instalaciones cercanas".to_owned(),
            A::AvailableSlots => {
                "Error al obtener los horarios disponibles".to_owned()
            }
            A::Stats => format!("Error al obtener estadísticas de {plural}"),
            A::Login => "Error al iniciar sesión".to_owned(),
            A::ChangePassword => "Error al cambiar la contraseña".to_owned(),
            A::Upload => "Error al subir la imagen".to_owned(),
            A::DeleteFile => "Error al eliminar la imagen".to_owned(),
        }
    }
}

/// Action of an [`Operation`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Action {
    /// Listing a collection (possibly a page of it).
    #[display("listing")]
    List,

    /// Fetching a single resource.
    #[display("fetching")]
    Get,

    /// Creating a resource.
    #[display("creating")]
    Create,

    /// Updating a resource.
    #[display("updating")]
    Update,

    /// Deleting a resource.
    #[display("deleting")]
    Delete,

    /// Toggling the "active" flag of a resource.
    #[display("toggling")]
    ToggleActive,

    /// Making a currency the base one.
    #[display("setting base")]
    SetBase,

    /// Searching facilities nearby.
    #[display("searching nearby")]
    Nearby,

    /// Listing the available slots of an agent.
    #[display("listing available slots")]
    AvailableSlots,

    /// Fetching aggregated statistics.
    #[display("fetching stats")]
    Stats,

    /// Logging in.
    #[display("logging in")]
    Login,

    /// Changing a password.
    #[display("changing password")]
    ChangePassword,

    /// Uploading a file.
    #[display("uploading")]
    Upload,

    /// Deleting an uploaded file.
    #[display("deleting file")]
    DeleteFile,
}
