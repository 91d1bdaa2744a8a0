//! [`Query`] collection related to [`Condominium`]s.

use std::collections::HashMap;

use common::operations::{By, Select};
use rust_decimal::Decimal;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Condominium;
use crate::{
    domain::condominium::{self, Fee, Payment},
    infra::{backend, Backend},
    Query, Service,
};

/// [`Query`] of the [`Fee`]s charged by a [`Condominium`], each one with its
/// [`Payment`]s.
#[derive(Clone, Copy, Debug)]
pub struct Payments {
    /// ID of the [`Condominium`].
    pub condominium_id: condominium::Id,
}

/// [`Fee`] along with its [`Payment`]s.
#[derive(Clone, Debug, PartialEq)]
pub struct FeePayments {
    /// Charged [`Fee`].
    pub fee: Fee,

    /// [`Payment`]s of the `fee`.
    pub payments: Vec<Payment>,
}

impl FeePayments {
    /// Returns the total amount paid for the [`Fee`].
    #[must_use]
    pub fn paid(&self) -> Decimal {
        self.payments.iter().map(|p| p.amount).sum()
    }
}

impl<Bk> Query<Payments> for Service<Bk>
where
    Bk: Backend<
            Select<By<Vec<Fee>, ()>>,
            Ok = Vec<Fee>,
            Err = Traced<backend::Error>,
        > + Backend<
            Select<By<Vec<Payment>, ()>>,
            Ok = Vec<Payment>,
            Err = Traced<backend::Error>,
        >,
{
    type Ok = Vec<FeePayments>;
    type Err = Traced<backend::Error>;

    #[tracing::instrument(
        skip_all,
        fields(condominium = %query.condominium_id),
    )]
    async fn execute(&self, query: Payments) -> Result<Self::Ok, Self::Err> {
        let (fees, payments) = futures::try_join!(
            self.backend().execute(Select(By::<Vec<Fee>, _>::new(()))),
            self.backend().execute(Select(By::<Vec<Payment>, _>::new(()))),
        )
        .map_err(tracerr::wrap!())?;

        let mut by_fee = HashMap::<_, Vec<_>>::new();
        for p in payments {
            by_fee.entry(p.fee_id).or_default().push(p);
        }

        Ok(fees
            .into_iter()
            .filter(|f| f.condominium_id == query.condominium_id)
            .map(|fee| FeePayments {
                payments: by_fee.remove(&fee.id).unwrap_or_default(),
                fee,
            })
            .collect())
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::{
        domain::condominium::{Fee, Payment},
        infra::Mock,
        Config, Query as _, Service,
    };

    use super::Payments;

    fn fee(id: i64, condominium_id: i64) -> Fee {
        serde_json::from_value(json!({
            "id": id,
            "condominiumId": condominium_id,
            "name": format!("Mantenimiento {id}"),
            "amount": 150.0,
            "currency": "PEN",
        }))
        .unwrap()
    }

    fn payment(id: i64, fee_id: i64, amount: f64) -> Payment {
        serde_json::from_value(json!({
            "id": id,
            "feeId": fee_id,
            "amount": amount,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn groups_payments_by_fee() {
        let mock = Mock::new();
        _ = mock
            .seed([fee(1, 7), fee(2, 8), fee(3, 7)])
            .seed([
                payment(10, 1, 100.0),
                payment(11, 2, 150.0),
                payment(12, 1, 50.0),
            ]);
        let svc = Service::new(Config::default(), mock);

        let grouped = svc
            .execute(Payments {
                condominium_id: 7.into(),
            })
            .await
            .unwrap();

        assert_eq!(
            grouped.iter().map(|g| g.fee.id.get()).collect::<Vec<_>>(),
            [1, 3],
        );
        assert_eq!(
            grouped[0].payments.iter().map(|p| p.id.get()).collect::<Vec<_>>(),
            [10, 12],
        );
        assert_eq!(grouped[0].paid(), Decimal::from(150));
        assert!(grouped[1].payments.is_empty());
    }
}
