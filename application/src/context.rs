//! [`Context`]-related definitions.

use service::{
    command::{Command as _, CreateUserSession},
    domain::{
        user::{session::Credentials, Session},
        User,
    },
    infra::backend::Authorize as _,
};
use tracing as log;

use crate::{define_error, session::Store, AsError, Backend, Error, Service};

/// Application context, owning the current [`Session`] for the lifetime of a
/// CLI invocation.
#[derive(Debug)]
pub struct Context<St> {
    /// Anonymous [`Service`] instance.
    service: Service,

    /// [`Store`] persisting the current [`Session`].
    store: St,

    /// Current [`Session`], if logged in.
    session: Option<Session>,
}

impl<St: Store> Context<St> {
    /// Creates a new [`Context`], restoring the [`Session`] kept in the
    /// provided [`Store`].
    ///
    /// An expired [`Session`] is dropped from the [`Store`].
    ///
    /// # Errors
    ///
    /// If the [`Store`] is not accessible.
    pub fn hydrate(service: Service, store: St) -> Result<Self, Error> {
        let mut session = store.load().map_err(AsError::into_error)?;
        if session.as_ref().is_some_and(Session::is_expired) {
            log::info!("stored session has expired");
            store.clear().map_err(AsError::into_error)?;
            session = None;
        }
        Ok(Self {
            service,
            store,
            session,
        })
    }

    /// Returns the current [`Session`], if logged in.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Returns the current [`Session`].
    ///
    /// # Errors
    ///
    /// If not logged in.
    pub fn require_session(&self) -> Result<&Session, Error> {
        self.session
            .as_ref()
            .ok_or_else(|| SessionError::LoginRequired.into())
    }

    /// Returns a [`Service`] performing requests on behalf of the current
    /// [`Session`], if any.
    #[must_use]
    pub fn service(&self) -> Service {
        let backend: &Backend = self.service.backend();
        match &self.session {
            Some(s) => self.service.with_backend(backend.authorized(s.token.clone())),
            None => self.service.with_backend(backend.anonymous()),
        }
    }

    /// Logs in with the provided [`Credentials`], storing the new [`Session`].
    ///
    /// # Errors
    ///
    /// If the [`Credentials`] are rejected or the [`Session`] cannot be
    /// stored.
    pub async fn login(
        &mut self,
        credentials: Credentials,
    ) -> Result<&Session, Error> {
        let session = self
            .service
            .with_backend(self.service.backend().anonymous())
            .execute(CreateUserSession::from(credentials))
            .await
            .map_err(AsError::into_error)?;
        self.store.save(&session).map_err(AsError::into_error)?;
        Ok(self.session.insert(session))
    }

    /// Replaces the [`User`] profile of the current [`Session`] with the
    /// provided one, storing the change.
    ///
    /// # Errors
    ///
    /// If not logged in or the [`Store`] is not accessible.
    pub fn refresh_user(&mut self, user: User) -> Result<(), Error> {
        let session = self
            .session
            .as_mut()
            .ok_or(SessionError::LoginRequired)?;
        session.user = user;
        self.store.save(session).map_err(AsError::into_error)
    }

    /// Logs out, dropping the current [`Session`] (if any).
    ///
    /// # Errors
    ///
    /// If the [`Store`] is not accessible.
    pub fn logout(&mut self) -> Result<(), Error> {
        self.session = None;
        self.store.clear().map_err(AsError::into_error)
    }

    /// Helper method returning a [`Result::map_err()`] closure, which drops
    /// the current [`Session`] once the backend rejects its credentials.
    pub fn error(&mut self) -> impl FnOnce(Error) -> Error + '_ {
        move |err| {
            if err.is_unauthorized() && self.session.is_some() {
                log::warn!("session credentials are rejected, logging out");
                if let Err(e) = self.logout() {
                    log::error!("failed to drop the session: {e}");
                }
                return Error {
                    message: format!(
                        "{}. {}",
                        err.message,
                        SessionError::Expired,
                    ),
                    ..err
                };
            }
            err
        }
    }
}

define_error! {
    enum SessionError {
        #[code = "LOGIN_REQUIRED"]
        #[message = "Debe iniciar sesión (proptech login)"]
        LoginRequired,

        #[code = "SESSION_EXPIRED"]
        #[message = "La sesión ha expirado, inicie sesión nuevamente"]
        Expired,
    }
}
