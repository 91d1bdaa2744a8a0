//! [`Command`] for changing a [`User`]'s password.

use common::operations::{By, Update};
use tracerr::Traced;

use crate::{
    domain::{
        user::{self, PasswordChange, PasswordForm},
        User,
    },
    infra::{backend, Backend},
    Service,
};

use super::Command;

pub use super::create_resource::ExecutionError;

/// [`Command`] for changing a [`User`]'s password.
#[derive(Clone, Debug)]
pub struct ChangeUserPassword {
    /// ID of the [`User`] whose password is changed.
    pub user_id: user::Id,

    /// Filled [`PasswordForm`].
    pub form: PasswordForm,
}

impl<Bk> Command<ChangeUserPassword> for Service<Bk>
where
    Bk: Backend<
        Update<By<User, (user::Id, PasswordChange)>>,
        Ok = (),
        Err = Traced<backend::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(user = %cmd.user_id))]
    async fn execute(
        &self,
        cmd: ChangeUserPassword,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ChangeUserPassword { user_id, form } = cmd;
        let change = form
            .into_change()
            .map_err(|e| tracerr::new!(E::Invalid(e)))?;

        self.backend()
            .execute(Update(By::new((user_id, change))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}
