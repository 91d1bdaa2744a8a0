//! [`Query`] collection backing the booking of [`Appointment`]s.
//!
//! When [`Config::demo_fallback`] is enabled, failures of these queries are
//! replaced with the built-in sample data of [`infra::demo`].
//!
//! [`Appointment`]: crate::domain::Appointment
//! [`Config::demo_fallback`]: crate::Config::demo_fallback

use common::operations::{By, Select};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        appointment::{Slot, SlotQuery},
        Agent, Property,
    },
    infra::{self, backend, Backend},
    Query, Service,
};

/// [`Query`] of all the [`Agent`]s to book a visit with.
#[derive(Clone, Copy, Debug)]
pub struct Agents;

/// [`Query`] of all the [`Property`]s to book a visit of.
#[derive(Clone, Copy, Debug)]
pub struct Properties;

/// [`Query`] of the [`Slot`]s of an [`Agent`] on some day.
#[derive(Clone, Copy, Debug)]
pub struct AvailableSlots(pub SlotQuery);

impl<Bk> Service<Bk> {
    /// Returns the sample data produced by `demo` instead of the provided
    /// failed `result`, if [`Config::demo_fallback`] is enabled.
    ///
    /// Rejected credentials are never replaced, so the session can be dropped.
    ///
    /// [`Config::demo_fallback`]: crate::Config::demo_fallback
    fn or_demo<T>(
        &self,
        result: Result<T, Traced<backend::Error>>,
        demo: impl FnOnce() -> T,
    ) -> Result<T, Traced<backend::Error>> {
        match result {
            Err(e)
                if self.config().demo_fallback
                    && !e.as_ref().is_unauthorized() =>
            {
                log::warn!("{e}, falling back to sample data");
                Ok(demo())
            }
            res => res.map_err(tracerr::wrap!()),
        }
    }
}

impl<Bk> Query<Agents> for Service<Bk>
where
    Bk: Backend<
        Select<By<Vec<Agent>, ()>>,
        Ok = Vec<Agent>,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = Vec<Agent>;
    type Err = Traced<backend::Error>;

    async fn execute(&self, _: Agents) -> Result<Self::Ok, Self::Err> {
        let res = self.backend().execute(Select(By::new(()))).await;
        self.or_demo(res, infra::demo::agents)
    }
}

impl<Bk> Query<Properties> for Service<Bk>
where
    Bk: Backend<
        Select<By<Vec<Property>, ()>>,
        Ok = Vec<Property>,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = Vec<Property>;
    type Err = Traced<backend::Error>;

    async fn execute(&self, _: Properties) -> Result<Self::Ok, Self::Err> {
        let res = self.backend().execute(Select(By::new(()))).await;
        self.or_demo(res, infra::demo::properties)
    }
}

impl<Bk> Query<AvailableSlots> for Service<Bk>
where
    Bk: Backend<
        Select<By<Vec<Slot>, SlotQuery>>,
        Ok = Vec<Slot>,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = Vec<Slot>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        AvailableSlots(query): AvailableSlots,
    ) -> Result<Self::Ok, Self::Err> {
        let res = self.backend().execute(Select(By::new(query))).await;
        self.or_demo(res, || infra::demo::slots(query.date))
    }
}

#[cfg(test)]
mod spec {
    use common::datetime::parse_date;

    use crate::{
        domain::appointment::SlotQuery, infra::Mock, Config, Query as _,
        Service,
    };

    use super::{Agents, AvailableSlots, Properties};

    fn service(demo_fallback: bool) -> (Service<Mock>, Mock) {
        let mock = Mock::new();
        _ = mock
            .fail("GET", "/api/agents", 500)
            .fail("GET", "/api/properties", 500)
            .fail("GET", "/api/appointments/available-slots", 503);
        let conf = Config {
            demo_fallback,
            ..Config::default()
        };
        (Service::new(conf, mock.clone()), mock)
    }

    fn slots_of_day() -> AvailableSlots {
        AvailableSlots(SlotQuery {
            agent_id: 1.into(),
            date: parse_date("2025-03-10").unwrap(),
        })
    }

    #[tokio::test]
    async fn surfaces_failures_by_default() {
        let (svc, _) = service(false);

        let err = svc.execute(Agents).await.unwrap_err();
        assert_eq!(err.as_ref().message(), "Error al obtener agentes");

        assert!(svc.execute(Properties).await.is_err());

        let err = svc.execute(slots_of_day()).await.unwrap_err();
        assert_eq!(
            err.as_ref().message(),
            "Error al obtener los horarios disponibles",
        );
    }

    #[tokio::test]
    async fn falls_back_to_sample_data() {
        let (svc, mock) = service(true);

        assert_eq!(svc.execute(Agents).await.unwrap().len(), 3);
        assert_eq!(svc.execute(Properties).await.unwrap().len(), 3);
        let slots = svc.execute(slots_of_day()).await.unwrap();
        assert!(slots.iter().any(|s| !s.available));

        assert_eq!(mock.count("GET", "/api/agents"), 1);
        let call = mock.calls().pop().unwrap();
        assert_eq!(
            call.query,
            [("agentId", "1"), ("date", "2025-03-10")]
                .map(|(k, v)| (k.to_owned(), v.to_owned())),
        );
    }

    #[tokio::test]
    async fn keeps_rejected_credentials() {
        let (svc, mock) = service(true);
        _ = mock
            .fail("GET", "/api/agents", 401)
            .fail("GET", "/api/appointments/available-slots", 401);

        let err = svc.execute(Agents).await.unwrap_err();
        assert!(err.as_ref().is_unauthorized());
        let err = svc.execute(slots_of_day()).await.unwrap_err();
        assert!(err.as_ref().is_unauthorized());

        assert_eq!(svc.execute(Properties).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn prefers_backend_data() {
        let (svc, mock) = service(true);
        _ = mock.recover("GET", "/api/appointments/available-slots").respond(
            "GET",
            "/api/appointments/available-slots",
            serde_json::json!([{
                "startTime": "2025-03-10T15:00:00",
                "endTime": "2025-03-10T15:30:00",
            }]),
        );

        let slots = svc.execute(slots_of_day()).await.unwrap();

        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].duration_minutes(), 30);
    }
}
