//! [`Command`] for deleting a [`Resource`] once the deletion is confirmed.
//!
//! A deletion starts as a [`Pending`] one, which must be explicitly
//! [confirmed] before [`DeleteResource`] accepts it, or [cancelled] without
//! touching the [`Backend`].
//!
//! [cancelled]: Pending::cancel
//! [confirmed]: Pending::confirm

use std::marker::PhantomData;

use common::operations::{By, Delete};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::Resource,
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// Deletion of a [`Resource`] awaiting a confirmation.
#[derive(Debug)]
#[must_use = "a pending deletion must be either confirmed or cancelled"]
pub struct Pending<R: Resource> {
    /// ID of the [`Resource`] to delete.
    id: R::Id,

    /// Type of the [`Resource`] to delete.
    _resource: PhantomData<R>,
}

impl<R: Resource> Pending<R> {
    /// Requests a deletion of the [`Resource`] with the provided `id`.
    pub fn new(id: R::Id) -> Self {
        Self {
            id,
            _resource: PhantomData,
        }
    }

    /// Returns the ID of the [`Resource`] to delete.
    #[must_use]
    pub fn id(&self) -> R::Id {
        self.id
    }

    /// Confirms this [`Pending`] deletion.
    pub fn confirm(self) -> Confirmed<R> {
        Confirmed(self)
    }

    /// Cancels this [`Pending`] deletion.
    pub fn cancel(self) {
        log::debug!(resource = R::PATH, id = %self.id, "deletion cancelled");
    }
}

/// Confirmed deletion of a [`Resource`].
///
/// Can only be obtained via [`Pending::confirm()`].
#[derive(Debug)]
pub struct Confirmed<R: Resource>(Pending<R>);

impl<R: Resource> Confirmed<R> {
    /// Returns the ID of the [`Resource`] to delete.
    #[must_use]
    pub fn id(&self) -> R::Id {
        self.0.id
    }
}

/// [`Command`] for deleting a [`Resource`].
#[derive(Debug)]
pub struct DeleteResource<R: Resource>(pub Confirmed<R>);

impl<R: Resource> From<Confirmed<R>> for DeleteResource<R> {
    fn from(confirmed: Confirmed<R>) -> Self {
        Self(confirmed)
    }
}

impl<Bk, R> Command<DeleteResource<R>> for Service<Bk>
where
    R: Resource,
    Bk: Backend<Delete<By<R, R::Id>>, Ok = (), Err = Traced<backend::Error>>,
{
    type Ok = ();
    type Err = Traced<backend::Error>;

    #[tracing::instrument(skip_all, fields(resource = R::PATH, id = %cmd.0.id()))]
    async fn execute(
        &self,
        cmd: DeleteResource<R>,
    ) -> Result<Self::Ok, Self::Err> {
        self.backend()
            .execute(Delete(By::new(cmd.0.id())))
            .await
            .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{condominium, Condominium},
        infra::Mock,
        Command as _, Config, Service,
    };

    use super::{DeleteResource, Pending};

    fn seeded() -> Mock {
        let mock = Mock::new();
        _ = mock.seed([serde_json::from_value::<Condominium>(
            serde_json::json!({"id": 42, "name": "Las Palmeras"}),
        )
        .unwrap()]);
        mock
    }

    #[tokio::test]
    async fn cancelled_deletion_sends_nothing() {
        let mock = seeded();

        Pending::<Condominium>::new(condominium::Id::from(42)).cancel();

        assert!(mock.calls().is_empty());
        assert_eq!(mock.items::<Condominium>().len(), 1);
    }

    #[tokio::test]
    async fn confirmed_deletion_sends_single_delete() {
        let mock = seeded();
        let svc = Service::new(Config::default(), mock.clone());

        let pending = Pending::<Condominium>::new(42.into());
        svc.execute(DeleteResource::from(pending.confirm()))
            .await
            .unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "DELETE");
        assert_eq!(calls[0].path, "/api/condominiums/42");
        assert!(mock.items::<Condominium>().is_empty());
    }

    #[tokio::test]
    async fn reports_failure_in_spanish() {
        let mock = seeded();
        _ = mock.fail("DELETE", "/api/condominiums/42", 500);
        let svc = Service::new(Config::default(), mock.clone());

        let err = svc
            .execute(DeleteResource::from(
                Pending::<Condominium>::new(42.into()).confirm(),
            ))
            .await
            .unwrap_err();

        assert_eq!(err.as_ref().message(), "Error al eliminar el condominio");
    }
}
