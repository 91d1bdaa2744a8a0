//! [`Command`] for deleting an uploaded image.

use common::operations::{By, Delete};
use tracerr::Traced;

use crate::{
    domain::upload::{FileUrl, Target},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for deleting an uploaded image of a [`Target`].
#[derive(Clone, Debug)]
pub struct DeleteImage {
    /// [`Target`] owning the image.
    pub target: Target,

    /// [`FileUrl`] of the image.
    pub url: FileUrl,
}

impl<Bk> Command<DeleteImage> for Service<Bk>
where
    Bk: Backend<
        Delete<By<FileUrl, (Target, FileUrl)>>,
        Ok = (),
        Err = Traced<backend::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<backend::Error>;

    #[tracing::instrument(skip_all, fields(target = %cmd.target, url = %cmd.url))]
    async fn execute(&self, cmd: DeleteImage) -> Result<Self::Ok, Self::Err> {
        let DeleteImage { target, url } = cmd;
        self.backend()
            .execute(Delete(By::new((target, url))))
            .await
            .map_err(tracerr::wrap!())
    }
}
