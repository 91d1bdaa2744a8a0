//! [`Command`] for toggling the "active" flag of an [`Activatable`] resource.

use common::operations::{By, Patch};
use tracerr::Traced;

use crate::{
    domain::{Activatable, ToggleActive},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for toggling the "active" flag of an [`Activatable`] resource.
#[derive(Clone, Copy, Debug)]
pub struct ToggleResourceActive<R: Activatable> {
    /// ID of the resource to toggle.
    pub id: R::Id,
}

impl<R: Activatable> ToggleResourceActive<R> {
    /// Creates a new [`ToggleResourceActive`] [`Command`] for the resource
    /// with the provided `id`.
    #[must_use]
    pub fn new(id: R::Id) -> Self {
        Self { id }
    }
}

impl<Bk, R> Command<ToggleResourceActive<R>> for Service<Bk>
where
    R: Activatable,
    Bk: Backend<
        Patch<By<R, (R::Id, ToggleActive)>>,
        Ok = R,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = R;
    type Err = Traced<backend::Error>;

    #[tracing::instrument(skip_all, fields(resource = R::PATH, id = %cmd.id))]
    async fn execute(
        &self,
        cmd: ToggleResourceActive<R>,
    ) -> Result<Self::Ok, Self::Err> {
        self.backend()
            .execute(Patch(By::new((cmd.id, ToggleActive))))
            .await
            .map_err(tracerr::wrap!())
    }
}
