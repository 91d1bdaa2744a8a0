//! [`Query`] collection related to [`Agency`]s.

use common::{
    operations::{By, Select},
    pagination::{Arguments, Page},
};
use tracerr::Traced;

use crate::{
    domain::{agency, Agency},
    infra::{backend, Backend},
    Query, Service,
};

/// [`Query`] of a [`Page`] of [`Agency`]s along with their [`agency::Stats`].
#[derive(Clone, Copy, Debug)]
pub struct Overview(pub Arguments);

/// Output of the [`Overview`] [`Query`].
#[derive(Clone, Debug, PartialEq)]
pub struct Output {
    /// Requested [`Page`] of [`Agency`]s.
    pub page: Page<Agency>,

    /// [`agency::Stats`] of all the [`Agency`]s.
    pub stats: agency::Stats,
}

impl<Bk> Query<Overview> for Service<Bk>
where
    Bk: Backend<
            Select<By<Page<Agency>, Arguments>>,
            Ok = Page<Agency>,
            Err = Traced<backend::Error>,
        > + Backend<
            Select<By<agency::Stats, ()>>,
            Ok = agency::Stats,
            Err = Traced<backend::Error>,
        >,
{
    type Ok = Output;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Overview(args): Overview,
    ) -> Result<Self::Ok, Self::Err> {
        let (page, stats) = futures::try_join!(
            self.backend()
                .execute(Select(By::<Page<Agency>, _>::new(args))),
            self.backend().execute(Select(By::<agency::Stats, _>::new(()))),
        )
        .map_err(tracerr::wrap!())?;

        Ok(Output { page, stats })
    }
}
