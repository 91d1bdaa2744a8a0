//! [`Query`] collection related to [`NearbyFacility`]s.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{facility::Vicinity, NearbyFacility},
    infra::{backend, Backend},
    Query, Service,
};

/// [`Query`] of the [`NearbyFacility`]s within a [`Vicinity`], nearest first.
#[derive(Clone, Copy, Debug)]
pub struct Nearby(pub Vicinity);

impl<Bk> Query<Nearby> for Service<Bk>
where
    Bk: Backend<
        Select<By<Vec<NearbyFacility>, Vicinity>>,
        Ok = Vec<NearbyFacility>,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = Vec<NearbyFacility>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Nearby(vicinity): Nearby,
    ) -> Result<Self::Ok, Self::Err> {
        let mut found = self
            .backend()
            .execute(Select(By::new(vicinity)))
            .await
            .map_err(tracerr::wrap!())?;
        found.sort_by(|a, b| {
            a.distance_km
                .unwrap_or(f64::INFINITY)
                .total_cmp(&b.distance_km.unwrap_or(f64::INFINITY))
        });
        Ok(found)
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::facility::Vicinity, infra::Mock, Config, Query as _, Service,
    };

    use super::Nearby;

    #[tokio::test]
    async fn passes_center_and_radius() {
        let mock = Mock::new();
        _ = mock.respond(
            "GET",
            "/api/nearby-facilities/nearby",
            serde_json::json!([
                {"id": 1, "name": "Parque Kennedy", "type": "PARK", "distanceKm": 2.5},
                {"id": 2, "name": "Clínica Ricardo Palma", "type": "CLINIC", "distanceKm": 0.8},
            ]),
        );
        let svc = Service::new(Config::default(), mock.clone());

        let found = svc
            .execute(Nearby(Vicinity::new(-12.12, -77.03, 3.0).unwrap()))
            .await
            .unwrap();

        assert_eq!(found.iter().map(|f| f.id.get()).collect::<Vec<_>>(), [2, 1]);
        let call = mock.calls().pop().unwrap();
        assert_eq!(
            call.query,
            [("latitude", "-12.12"), ("longitude", "-77.03"), ("radius", "3")]
                .map(|(k, v)| (k.to_owned(), v.to_owned())),
        );
    }
}
