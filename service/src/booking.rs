//! Multi-step booking of an [`Appointment`].

use common::datetime::Date;
use derive_more::{Display, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    command::{CreateResource, ExecutionError},
    domain::{
        appointment::{self, Slot, SlotQuery},
        Agent, Appointment, FieldErrors, Property, Validate,
    },
    infra::backend,
    query::appointment::AvailableSlots,
    Command, Query,
};

/// Step of a booking [`Wizard`], in order.
#[derive(Clone, Copy, Debug, Display, Eq, Ord, PartialEq, PartialOrd)]
pub enum Step {
    /// Choosing the [`Property`] to visit.
    SelectProperty,

    /// Choosing the [`Agent`] attending the visit.
    SelectAgent,

    /// Choosing the date and the [`Slot`] of the visit.
    SelectDateTime,

    /// Filling in the contacts of the client.
    EnterClientInfo,

    /// [`Appointment`] has been created.
    Submitted,
}

impl Step {
    /// Returns the preceding [`Step`], if any.
    ///
    /// [`Step::Submitted`] is terminal and has none.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        match self {
            Self::SelectProperty | Self::Submitted => None,
            Self::SelectAgent => Some(Self::SelectProperty),
            Self::SelectDateTime => Some(Self::SelectAgent),
            Self::EnterClientInfo => Some(Self::SelectDateTime),
        }
    }
}

/// Contacts of a client booking an [`Appointment`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ClientInfo {
    /// Name of the client.
    pub name: String,

    /// Email of the client.
    pub email: String,

    /// Phone of the client.
    pub phone: Option<String>,

    /// Additional notes of the client.
    pub notes: Option<String>,
}

impl Validate for ClientInfo {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        _ = errors
            .required("clientName", &self.name)
            .required("clientEmail", &self.email)
            .email("clientEmail", Some(&self.email))
            .phone("clientPhone", self.phone.as_deref());
        errors.into_result()
    }
}

/// Booking wizard guiding a client through the [`Step`]s of booking an
/// [`Appointment`].
///
/// Each transition is valid on a single [`Step`] only. Going back clears
/// every selection made on the returned-to [`Step`] and the following ones.
#[derive(Clone, Debug)]
pub struct Wizard {
    /// Current [`Step`].
    step: Step,

    /// Selected [`Property`].
    property: Option<Property>,

    /// Selected [`Agent`].
    agent: Option<Agent>,

    /// Selected [`Date`].
    date: Option<Date>,

    /// [`Slot`]s of the selected [`Agent`] on the selected [`Date`].
    slots: Vec<Slot>,

    /// Selected [`Slot`].
    slot: Option<Slot>,

    /// Entered [`ClientInfo`].
    client: ClientInfo,

    /// Message of the last submission failure.
    failure: Option<String>,

    /// Created [`Appointment`].
    appointment: Option<Appointment>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    /// Starts a new [`Wizard`] on the [`Step::SelectProperty`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: Step::SelectProperty,
            property: None,
            agent: None,
            date: None,
            slots: vec![],
            slot: None,
            client: ClientInfo::default(),
            failure: None,
            appointment: None,
        }
    }

    /// Returns the current [`Step`].
    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    /// Returns the selected [`Property`], if any.
    #[must_use]
    pub fn property(&self) -> Option<&Property> {
        self.property.as_ref()
    }

    /// Returns the selected [`Agent`], if any.
    #[must_use]
    pub fn agent(&self) -> Option<&Agent> {
        self.agent.as_ref()
    }

    /// Returns the selected [`Date`], if any.
    #[must_use]
    pub fn date(&self) -> Option<Date> {
        self.date
    }

    /// Returns the loaded [`Slot`]s of the selected [`Date`].
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Returns the selected [`Slot`], if any.
    #[must_use]
    pub fn slot(&self) -> Option<&Slot> {
        self.slot.as_ref()
    }

    /// Returns the entered [`ClientInfo`].
    #[must_use]
    pub fn client(&self) -> &ClientInfo {
        &self.client
    }

    /// Returns the message of the last submission failure, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Returns the created [`Appointment`], once [`Step::Submitted`].
    #[must_use]
    pub fn appointment(&self) -> Option<&Appointment> {
        self.appointment.as_ref()
    }

    /// Selects the [`Property`] to visit.
    ///
    /// # Errors
    ///
    /// If not on the [`Step::SelectProperty`].
    pub fn select_property(
        &mut self,
        property: Property,
    ) -> Result<(), Error> {
        self.expect(Step::SelectProperty)?;
        self.property = Some(property);
        self.step = Step::SelectAgent;
        Ok(())
    }

    /// Selects the [`Agent`] attending the visit.
    ///
    /// # Errors
    ///
    /// If not on the [`Step::SelectAgent`].
    pub fn select_agent(&mut self, agent: Agent) -> Result<(), Error> {
        self.expect(Step::SelectAgent)?;
        self.agent = Some(agent);
        self.step = Step::SelectDateTime;
        Ok(())
    }

    /// Chooses the [`Date`] of the visit, (re)loading its [`Slot`]s.
    ///
    /// Any previously selected [`Slot`] is dropped.
    ///
    /// # Errors
    ///
    /// If not on the [`Step::SelectDateTime`], or the [`Slot`]s cannot be
    /// loaded. No [`Slot`]s remain loaded in the latter case.
    pub async fn choose_date<S>(
        &mut self,
        svc: &S,
        date: Date,
    ) -> Result<&[Slot], Traced<Error>>
    where
        S: Query<AvailableSlots, Ok = Vec<Slot>, Err = Traced<backend::Error>>,
    {
        self.expect(Step::SelectDateTime)
            .map_err(|e| tracerr::new!(e))?;
        let agent_id = self
            .agent
            .as_ref()
            .map(|a| a.id)
            .ok_or_else(|| tracerr::new!(Error::WrongStep(self.step)))?;

        self.date = Some(date);
        self.slot = None;
        self.slots.clear();
        self.slots = svc
            .execute(AvailableSlots(SlotQuery { agent_id, date }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> Error))?;
        Ok(&self.slots)
    }

    /// Selects one of the loaded available [`Slot`]s.
    ///
    /// # Errors
    ///
    /// If not on the [`Step::SelectDateTime`], or the [`Slot`] is not among
    /// the loaded available ones.
    pub fn select_slot(&mut self, slot: Slot) -> Result<(), Error> {
        self.expect(Step::SelectDateTime)?;
        if !self.slots.iter().any(|s| *s == slot && s.available) {
            return Err(Error::UnavailableSlot);
        }
        self.slot = Some(slot);
        self.step = Step::EnterClientInfo;
        Ok(())
    }

    /// Enters the [`ClientInfo`].
    ///
    /// # Errors
    ///
    /// If not on the [`Step::EnterClientInfo`].
    pub fn enter_client(&mut self, client: ClientInfo) -> Result<(), Error> {
        self.expect(Step::EnterClientInfo)?;
        self.client = client;
        Ok(())
    }

    /// Goes back to the previous [`Step`], clearing the selections made on
    /// it and on the following ones.
    ///
    /// Returns `false` if there is no previous [`Step`].
    pub fn back(&mut self) -> bool {
        let Some(previous) = self.step.previous() else {
            return false;
        };
        match previous {
            Step::SelectProperty => {
                self.property = None;
                self.agent = None;
                self.clear_schedule();
            }
            Step::SelectAgent => {
                self.agent = None;
                self.clear_schedule();
            }
            Step::SelectDateTime => self.clear_schedule(),
            Step::EnterClientInfo | Step::Submitted => {}
        }
        self.failure = None;
        self.step = previous;
        true
    }

    /// Submits the booking, creating the [`Appointment`].
    ///
    /// On success the [`Wizard`] reaches the [`Step::Submitted`], otherwise
    /// it stays on the [`Step::EnterClientInfo`] remembering the failure.
    ///
    /// # Errors
    ///
    /// If not on the [`Step::EnterClientInfo`], the [`ClientInfo`] is
    /// invalid, or the [`Appointment`] cannot be created.
    pub async fn submit<S>(
        &mut self,
        svc: &S,
    ) -> Result<&Appointment, Traced<Error>>
    where
        S: Command<
            CreateResource<Appointment>,
            Ok = Appointment,
            Err = Traced<ExecutionError>,
        >,
    {
        self.expect(Step::EnterClientInfo)
            .map_err(|e| tracerr::new!(e))?;
        let draft = self.draft().map_err(|e| tracerr::new!(e))?;

        let created = svc
            .execute(CreateResource::new(draft))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> Error));
        match created {
            Ok(created) => {
                log::info!(id = %created.id, "appointment booked");
                self.failure = None;
                self.step = Step::Submitted;
                Ok(self.appointment.insert(created))
            }
            Err(e) => {
                self.failure = Some(e.as_ref().message());
                Err(e)
            }
        }
    }

    /// Builds an [`appointment::Draft`] out of the current selections.
    fn draft(&mut self) -> Result<appointment::Draft, Error> {
        if let Err(e) = self.client.validate() {
            self.failure = Some(Error::Invalid(e.clone()).message());
            return Err(Error::Invalid(e));
        }
        let (Some(property), Some(agent), Some(slot)) =
            (&self.property, &self.agent, &self.slot)
        else {
            return Err(Error::WrongStep(self.step));
        };
        let duration_minutes = u16::try_from(slot.duration_minutes())
            .ok()
            .filter(|m| appointment::Draft::DURATION_RANGE.contains(m))
            .unwrap_or(appointment::Draft::DEFAULT_DURATION);

        Ok(appointment::Draft {
            title: format!("Visita: {}", property.title),
            description: None,
            appointment_date: slot.start_time,
            duration_minutes,
            property_id: property.id,
            agent_id: agent.id,
            client_name: self.client.name.trim().to_owned(),
            client_email: self.client.email.trim().to_owned(),
            client_phone: self.client.phone.clone(),
            notes: self.client.notes.clone(),
            status: appointment::Status::Pending,
        })
    }

    /// Ensures the [`Wizard`] is on the provided [`Step`].
    fn expect(&self, step: Step) -> Result<(), Error> {
        if self.step == step {
            Ok(())
        } else {
            Err(Error::WrongStep(self.step))
        }
    }

    /// Clears the selected [`Date`], its [`Slot`]s and everything entered
    /// after them.
    fn clear_schedule(&mut self) {
        self.date = None;
        self.slots.clear();
        self.slot = None;
        self.client = ClientInfo::default();
    }
}

/// Error of a [`Wizard`] transition.
#[derive(Debug, Display, derive_more::Error, From)]
pub enum Error {
    /// Transition is not allowed on the current [`Step`].
    #[display("not allowed on the `{_0}` step")]
    #[from(ignore)]
    WrongStep(#[error(not(source))] Step),

    /// Selected [`Slot`] is not available.
    #[display("slot is not available")]
    #[from(ignore)]
    UnavailableSlot,

    /// [`ClientInfo`] is invalid.
    #[display("invalid client info: {_0}")]
    Invalid(FieldErrors),

    /// [`Backend`] error.
    ///
    /// [`Backend`]: crate::infra::Backend
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),
}

impl Error {
    /// Returns the human-readable message describing this [`Error`] to a
    /// user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::WrongStep(_) => "Paso no disponible".to_owned(),
            Self::UnavailableSlot => "El horario no está disponible".to_owned(),
            Self::Invalid(_) => "Revise los datos del cliente".to_owned(),
            Self::Backend(e) => e.message(),
        }
    }
}

impl From<ExecutionError> for Error {
    fn from(e: ExecutionError) -> Self {
        match e {
            ExecutionError::Backend(e) => Self::Backend(e),
            ExecutionError::Invalid(e) => Self::Invalid(e),
        }
    }
}

#[cfg(test)]
mod spec {
    use common::datetime::{parse_date, Date};
    use serde_json::json;

    use crate::{
        domain::{Appointment, FieldErrors},
        infra::{demo, Mock},
        Config, Service,
    };

    use super::{ClientInfo, Error, Step, Wizard};

    const SLOTS: &str = "/api/appointments/available-slots";

    fn day() -> Date {
        parse_date("2025-03-10").unwrap()
    }

    fn service() -> (Service<Mock>, Mock) {
        let mock = Mock::new();
        _ = mock.respond(
            "GET",
            SLOTS,
            json!([
                {"startTime": "2025-03-10T09:00:00",
                 "endTime": "2025-03-10T10:00:00",
                 "available": false},
                {"startTime": "2025-03-10T10:00:00",
                 "endTime": "2025-03-10T11:00:00"},
            ]),
        );
        (Service::new(Config::default(), mock.clone()), mock)
    }

    fn client() -> ClientInfo {
        ClientInfo {
            name: "Lucía Torres".into(),
            email: "lucia@correo.pe".into(),
            ..ClientInfo::default()
        }
    }

    async fn at_client_info(svc: &Service<Mock>) -> Wizard {
        let mut w = Wizard::new();
        w.select_property(demo::properties().remove(0)).unwrap();
        w.select_agent(demo::agents().remove(1)).unwrap();
        let slot = w.choose_date(svc, day()).await.unwrap()[1];
        w.select_slot(slot).unwrap();
        w
    }

    #[tokio::test]
    async fn books_appointment() {
        let (svc, mock) = service();
        let mut w = at_client_info(&svc).await;
        assert_eq!(w.step(), Step::EnterClientInfo);

        w.enter_client(client()).unwrap();
        let booked = w.submit(&svc).await.unwrap().clone();

        assert_eq!(w.step(), Step::Submitted);
        assert_eq!(booked.agent_id.get(), 2);
        assert_eq!(booked.appointment_date.hour_minute(), (10, 0));
        assert_eq!(booked.duration_minutes, 60);
        assert_eq!(mock.items::<Appointment>(), [booked]);
        assert!(!w.back());
    }

    #[tokio::test]
    async fn rejects_out_of_order_transitions() {
        let (svc, mock) = service();
        let mut w = Wizard::new();

        assert!(matches!(
            w.select_agent(demo::agents().remove(0)),
            Err(Error::WrongStep(Step::SelectProperty)),
        ));
        assert!(w.choose_date(&svc, day()).await.is_err());
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn refuses_unavailable_slot() {
        let (svc, _) = service();
        let mut w = Wizard::new();
        w.select_property(demo::properties().remove(0)).unwrap();
        w.select_agent(demo::agents().remove(0)).unwrap();

        let busy = w.choose_date(&svc, day()).await.unwrap()[0];

        assert!(matches!(w.select_slot(busy), Err(Error::UnavailableSlot)));
        assert_eq!(w.step(), Step::SelectDateTime);
    }

    #[tokio::test]
    async fn going_back_clears_downstream_selections() {
        let (svc, _) = service();
        let mut w = at_client_info(&svc).await;
        w.enter_client(client()).unwrap();

        assert!(w.back());
        assert_eq!(w.step(), Step::SelectDateTime);
        assert!(w.date().is_none());
        assert!(w.slots().is_empty());
        assert!(w.slot().is_none());
        assert_eq!(w.client(), &ClientInfo::default());
        assert!(w.agent().is_some());

        assert!(w.back());
        assert!(w.back());
        assert_eq!(w.step(), Step::SelectProperty);
        assert!(w.property().is_none());
        assert!(w.agent().is_none());
        assert!(!w.back());
    }

    #[tokio::test]
    async fn new_date_reloads_slots() {
        let (svc, mock) = service();
        let mut w = at_client_info(&svc).await;
        assert!(w.back());

        _ = w.choose_date(&svc, day().next_day().unwrap()).await.unwrap();

        assert_eq!(mock.count("GET", SLOTS), 2);
        assert_eq!(
            mock.calls().pop().unwrap().query[1],
            ("date".to_owned(), "2025-03-11".to_owned()),
        );
        assert!(w.slot().is_none());
    }

    #[tokio::test]
    async fn validates_client_before_submitting() {
        let (svc, mock) = service();
        let mut w = at_client_info(&svc).await;
        mock.clear_calls();

        w.enter_client(ClientInfo {
            email: "lucia".into(),
            ..client()
        })
        .unwrap();
        let err = w.submit(&svc).await.unwrap_err();

        let Error::Invalid(errors) = err.as_ref() else {
            panic!("expected validation error, found: {err}");
        };
        assert_eq!(
            errors.get("clientEmail"),
            Some(FieldErrors::INVALID_EMAIL),
        );
        assert_eq!(w.step(), Step::EnterClientInfo);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn requires_client_name_and_email() {
        let (svc, mock) = service();
        let mut w = at_client_info(&svc).await;
        mock.clear_calls();

        for (client, field) in [
            (
                ClientInfo {
                    name: String::new(),
                    ..client()
                },
                "clientName",
            ),
            (
                ClientInfo {
                    email: String::new(),
                    ..client()
                },
                "clientEmail",
            ),
        ] {
            w.enter_client(client).unwrap();
            let err = w.submit(&svc).await.unwrap_err();

            let Error::Invalid(errors) = err.as_ref() else {
                panic!("expected validation error, found: {err}");
            };
            assert_eq!(errors.get(field), Some(FieldErrors::REQUIRED));
            assert_eq!(w.step(), Step::EnterClientInfo);
        }
        assert!(mock.calls().is_empty());
        assert!(mock.items::<Appointment>().is_empty());
    }

    #[tokio::test]
    async fn stays_on_last_step_when_submission_fails() {
        let (svc, mock) = service();
        let mut w = at_client_info(&svc).await;
        w.enter_client(client()).unwrap();
        _ = mock.fail("POST", "/api/appointments", 500);

        assert!(w.submit(&svc).await.is_err());
        assert_eq!(w.step(), Step::EnterClientInfo);
        assert_eq!(w.failure(), Some("Error al crear la cita"));

        _ = mock.recover("POST", "/api/appointments");
        _ = w.submit(&svc).await.unwrap();
        assert_eq!(w.step(), Step::Submitted);
        assert!(w.failure().is_none());
    }
}
