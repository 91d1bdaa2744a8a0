//! [`Command`] for making a [`Currency`] the base one.

use common::operations::{By, Patch};
use tracerr::Traced;

use crate::{
    domain::{
        currency::{self, SetBase},
        Currency,
    },
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for making a [`Currency`] the base one.
///
/// Uniqueness of the base [`Currency`] is maintained by the backend.
#[derive(Clone, Copy, Debug)]
pub struct SetBaseCurrency {
    /// ID of the [`Currency`] to become the base one.
    pub id: currency::Id,
}

impl<Bk> Command<SetBaseCurrency> for Service<Bk>
where
    Bk: Backend<
        Patch<By<Currency, (currency::Id, SetBase)>>,
        Ok = Currency,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = Currency;
    type Err = Traced<backend::Error>;

    #[tracing::instrument(skip(self))]
    async fn execute(
        &self,
        cmd: SetBaseCurrency,
    ) -> Result<Self::Ok, Self::Err> {
        self.backend()
            .execute(Patch(By::new((cmd.id, SetBase))))
            .await
            .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use crate::{domain::Currency, infra::Mock, Command as _, Config, Service};

    use super::SetBaseCurrency;

    #[tokio::test]
    async fn delegates_uniqueness_to_backend() {
        let mock = Mock::new();
        _ = mock.seed(["USD", "PEN"].into_iter().zip(1..).map(|(code, id)| {
            serde_json::from_value::<Currency>(serde_json::json!({
                "id": id, "code": code, "name": code, "symbol": "$",
                "exchangeRate": 1.0, "isBase": code == "USD",
            }))
            .unwrap()
        }));
        let svc = Service::new(Config::default(), mock.clone());

        let base = svc
            .execute(SetBaseCurrency { id: 2.into() })
            .await
            .unwrap();

        assert!(base.is_base);
        assert_eq!(
            mock.items::<Currency>()
                .iter()
                .filter(|c| c.is_base)
                .count(),
            1,
        );
        assert_eq!(mock.calls().len(), 1);
    }
}
