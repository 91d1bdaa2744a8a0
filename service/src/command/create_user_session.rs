//! [`Command`] for creating a [`Session`].

use common::operations::{By, Insert};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{
        user::session::{Credentials, Session},
        Validate as _,
    },
    infra::{backend, Backend},
    Service,
};

use super::Command;

pub use super::create_resource::ExecutionError;

/// [`Command`] for creating a [`Session`] by [`User`] credentials.
#[derive(Clone, Debug)]
pub struct CreateUserSession(pub Credentials);

impl From<Credentials> for CreateUserSession {
    fn from(credentials: Credentials) -> Self {
        Self(credentials)
    }
}

impl<Bk> Command<CreateUserSession> for Service<Bk>
where
    Bk: Backend<
        Insert<By<Session, Credentials>>,
        Ok = Session,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(email = %cmd.0.email))]
    async fn execute(
        &self,
        cmd: CreateUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUserSession(credentials) = cmd;
        credentials
            .validate()
            .map_err(|e| tracerr::new!(E::Invalid(e)))?;

        let session = self
            .backend()
            .execute(Insert(By::new(credentials)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        match session.expires_at() {
            Some(at) => log::info!(user = %session.user.id, "logged in until {at}"),
            None => log::info!(user = %session.user.id, "logged in"),
        }
        Ok(session)
    }
}
