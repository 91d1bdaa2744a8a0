//! [`Command`] for creating a new [`Resource`].

use common::operations::{By, Insert};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Resource;
use crate::{
    domain::{Editable, FieldErrors, Validate as _},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Resource`].
#[derive(Clone, Debug)]
pub struct CreateResource<R: Editable> {
    /// Submitted data of the new [`Resource`].
    pub draft: R::Draft,
}

impl<R: Editable> CreateResource<R> {
    /// Creates a new [`CreateResource`] [`Command`] out of the provided
    /// `draft`.
    #[must_use]
    pub fn new(draft: R::Draft) -> Self {
        Self { draft }
    }
}

impl<Bk, R> Command<CreateResource<R>> for Service<Bk>
where
    R: Editable,
    Bk: Backend<
        Insert<By<R, R::Draft>>,
        Ok = R,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = R;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(resource = R::PATH))]
    async fn execute(
        &self,
        cmd: CreateResource<R>,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateResource { draft } = cmd;
        draft.validate().map_err(|e| tracerr::new!(E::Invalid(e)))?;

        self.backend()
            .execute(Insert(By::new(draft)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of submitting a form to a [`Backend`].
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),

    /// Submitted form is invalid, so nothing has been sent.
    #[display("Invalid form: {_0}")]
    Invalid(FieldErrors),
}
