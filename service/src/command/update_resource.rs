//! [`Command`] for updating an existing [`Resource`].

use common::operations::{By, Update};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Resource;
use crate::{
    domain::{Editable, Validate as _},
    infra::{backend, Backend},
    Service,
};

use super::Command;

pub use super::create_resource::ExecutionError;

/// [`Command`] for updating an existing [`Resource`].
#[derive(Clone, Debug)]
pub struct UpdateResource<R: Editable> {
    /// ID of the [`Resource`] to update.
    pub id: R::Id,

    /// Submitted data replacing the [`Resource`] one.
    pub draft: R::Draft,
}

impl<R: Editable> UpdateResource<R> {
    /// Creates a new [`UpdateResource`] [`Command`] replacing the data of the
    /// [`Resource`] with the provided `id`.
    #[must_use]
    pub fn new(id: R::Id, draft: R::Draft) -> Self {
        Self { id, draft }
    }
}

impl<Bk, R> Command<UpdateResource<R>> for Service<Bk>
where
    R: Editable,
    Bk: Backend<
        Update<By<R, (R::Id, R::Draft)>>,
        Ok = R,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = R;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(resource = R::PATH, id = %cmd.id))]
    async fn execute(
        &self,
        cmd: UpdateResource<R>,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateResource { id, draft } = cmd;
        draft.validate().map_err(|e| tracerr::new!(E::Invalid(e)))?;

        self.backend()
            .execute(Update(By::new((id, draft))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{agency, Agency},
        infra::Mock,
        Command as _, Config, Service,
    };

    use super::{ExecutionError, UpdateResource};

    fn agency() -> Agency {
        serde_json::from_value(serde_json::json!({
            "id": 3, "name": "Casa Sur", "email": "info@casasur.pe",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn puts_whole_draft() {
        let mock = Mock::new();
        _ = mock.seed([agency()]);
        let svc = Service::new(Config::default(), mock.clone());

        let mut draft = agency::Draft::from(&agency());
        draft.name = "Casa Norte".into();
        let updated = svc
            .execute(UpdateResource::<Agency>::new(3.into(), draft))
            .await
            .unwrap();

        assert_eq!(updated.name, "Casa Norte");
        assert_eq!(updated.email.as_deref(), Some("info@casasur.pe"));
        assert_eq!(mock.count("PUT", "/api/agencies/3"), 1);
    }

    #[tokio::test]
    async fn rejects_malformed_email_locally() {
        let mock = Mock::new();
        _ = mock.seed([agency()]);
        let svc = Service::new(Config::default(), mock.clone());

        let mut draft = agency::Draft::from(&agency());
        draft.email = Some("not-an-email".into());
        let err = svc
            .execute(UpdateResource::<Agency>::new(3.into(), draft))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Invalid(e) if e.get("email").is_some()));
        assert!(mock.calls().is_empty());
    }
}
