//! In-memory recording [`Backend`] implementation.
//!
//! [`Mock`] mimics the REST endpoints closely enough to drive the whole
//! service layer without a network: resources are stored as JSON values keyed
//! by their collection path, and every request is recorded as a [`Call`] to
//! be asserted on.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use common::{
    datetime::format_date,
    operations::{By, Delete, Insert, Patch, Select, Update, Upload},
    pagination::{self, Page},
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Map, Value};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        agency,
        appointment::{Slot, SlotQuery},
        currency::{self, SetBase},
        facility::Vicinity,
        upload::{Cropped, FileUrl, Target},
        user::{
            self,
            session::{Credentials, Token},
            PasswordChange, Session,
        },
        Activatable, Agency, Appointment, Currency, Editable, NearbyFacility,
        Resource, ToggleActive, User,
    },
    infra::{
        backend::{Action, Authorize, Error, ErrorKind, Operation},
        Backend,
    },
};

/// Request recorded by a [`Mock`].
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    /// HTTP method of the request.
    pub method: &'static str,

    /// Path of the request, including the `/api/` prefix.
    pub path: String,

    /// Query parameters of the request.
    pub query: Vec<(String, String)>,

    /// JSON body of the request, if any.
    pub body: Option<Value>,

    /// Bearer token the request was authorized with, if any.
    pub token: Option<String>,
}

/// In-memory [`Backend`] recording the performed requests.
///
/// Clones share the same state.
#[derive(Clone, Debug, Default)]
pub struct Mock {
    /// Shared [`State`] of this [`Mock`].
    state: Arc<Mutex<State>>,

    /// Bearer [`Token`] attached to every recorded [`Call`], if any.
    token: Option<Token>,
}

/// State of a [`Mock`].
#[derive(Debug, Default)]
struct State {
    /// Stored resources, keyed by their collection path.
    collections: HashMap<&'static str, Vec<Value>>,

    /// Last assigned resource ID.
    last_id: i64,

    /// Recorded requests.
    calls: Vec<Call>,

    /// Statuses to respond with instead of succeeding, keyed by method and
    /// path.
    failures: HashMap<(&'static str, String), u16>,

    /// Canned bodies of non-collection endpoints, keyed by method and path.
    responses: HashMap<(&'static str, String), Value>,
}

impl Mock {
    /// Creates a new empty [`Mock`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the provided [`Resource`]s in their collection.
    ///
    /// # Panics
    ///
    /// If a [`Resource`] cannot be represented as JSON.
    pub fn seed<R: Resource>(&self, items: impl IntoIterator<Item = R>) -> &Self {
        let mut state = self.state();
        for item in items {
            let value = serde_json::to_value(&item)
                .expect("`Resource` must be representable as JSON");
            if let Some(id) = value.get("id").and_then(Value::as_i64) {
                state.last_id = state.last_id.max(id);
            }
            state.collections.entry(R::PATH).or_default().push(value);
        }
        self
    }

    /// Makes the endpoint with the provided `method` and `path` (including
    /// the `/api/` prefix, excluding the query) respond with the provided
    /// body.
    ///
    /// # Panics
    ///
    /// If the `body` cannot be represented as JSON.
    pub fn respond(
        &self,
        method: &'static str,
        path: impl Into<String>,
        body: impl Serialize,
    ) -> &Self {
        let body = serde_json::to_value(body)
            .expect("response body must be representable as JSON");
        _ = self.state().responses.insert((method, path.into()), body);
        self
    }

    /// Makes the endpoint with the provided `method` and `path` (including
    /// the `/api/` prefix, excluding the query) fail with the provided HTTP
    /// `status`, until [`Mock::recover()`] is called.
    pub fn fail(
        &self,
        method: &'static str,
        path: impl Into<String>,
        status: u16,
    ) -> &Self {
        _ = self.state().failures.insert((method, path.into()), status);
        self
    }

    /// Makes the endpoint with the provided `method` and `path` succeed again
    /// after a [`Mock::fail()`].
    pub fn recover(&self, method: &'static str, path: &str) -> &Self {
        _ = self.state().failures.remove(&(method, path.to_owned()));
        self
    }

    /// Returns all the [`Call`]s recorded so far.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    /// Returns the number of recorded [`Call`]s with the provided `method`
    /// and `path`.
    #[must_use]
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }

    /// Forgets all the [`Call`]s recorded so far.
    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    /// Returns the [`Resource`]s currently stored in their collection.
    ///
    /// # Panics
    ///
    /// If a stored value doesn't represent the [`Resource`].
    #[must_use]
    pub fn items<R: Resource>(&self) -> Vec<R> {
        self.state()
            .collections
            .get(R::PATH)
            .into_iter()
            .flatten()
            .map(|v| {
                serde_json::from_value(v.clone())
                    .expect("stored value must represent the `Resource`")
            })
            .collect()
    }

    /// Locks the shared [`State`] of this [`Mock`].
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records the request of the provided [`Operation`], failing it if a
    /// failure has been configured for it.
    fn record(
        &self,
        operation: Operation,
        method: &'static str,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<MutexGuard<'_, State>, Traced<Error>> {
        let path = api(path);
        log::debug!(method, path = %path, "{operation}");

        let mut state = self.state();
        state.calls.push(Call {
            method,
            path: path.clone(),
            query,
            body,
            token: self.token.as_ref().map(ToString::to_string),
        });
        if let Some(status) = state.failures.get(&(method, path)).copied() {
            log::warn!(status, "{operation} failed");
            return Err(tracerr::new!(Error::new(
                operation,
                ErrorKind::from_status(status),
            )));
        }
        Ok(state)
    }
}

impl Authorize for Mock {
    fn authorized(&self, token: Token) -> Self {
        Self {
            state: Arc::clone(&self.state),
            token: Some(token),
        }
    }

    fn anonymous(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            token: None,
        }
    }
}

impl State {
    /// Returns the canned response of the provided endpoint, if any.
    fn response(&self, method: &'static str, path: &str) -> Option<Value> {
        self.responses.get(&(method, api(path))).cloned()
    }

    /// Returns the mutable stored value of the [`Resource`] with the provided
    /// ID.
    fn find_mut<R: Resource>(&mut self, id: R::Id) -> Option<&mut Value> {
        let id = serde_json::to_value(id).ok()?;
        self.collections
            .get_mut(R::PATH)?
            .iter_mut()
            .find(|v| v.get("id") == Some(&id))
    }
}

/// Prepends the `/api/` prefix to the provided `path`.
fn api(path: &str) -> String {
    format!("/api/{}", path.trim_start_matches('/'))
}

/// Converts pagination [`Arguments`] into recorded query parameters.
///
/// [`Arguments`]: pagination::Arguments
fn query_of(pairs: impl IntoIterator<Item = (&'static str, String)>) -> Vec<(String, String)> {
    pairs.into_iter().map(|(k, v)| (k.to_owned(), v)).collect()
}

/// Decodes the provided stored `value` as a response of an [`Operation`].
fn decode<T: DeserializeOwned>(
    operation: Operation,
    value: Value,
) -> Result<T, Traced<Error>> {
    serde_json::from_value(value)
        .map_err(|e| tracerr::new!(Error::new(operation, e)))
}

/// Encodes the provided request `body`.
fn encode(
    operation: Operation,
    body: &impl Serialize,
) -> Result<Value, Traced<Error>> {
    serde_json::to_value(body)
        .map_err(|e| tracerr::new!(Error::new(operation, e)))
}

/// Returns an [`Error`] of a missing resource.
fn not_found(operation: Operation) -> Traced<Error> {
    tracerr::new!(Error::new(operation, ErrorKind::from_status(404)))
}

impl<R: Resource> Backend<Select<By<Vec<R>, ()>>> for Mock {
    type Ok = Vec<R>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<R>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let op = Operation::new(Action::List, R::LABELS);
        let state = self.record(op, "GET", R::PATH, vec![], None)?;
        let all = state.collections.get(R::PATH).cloned().unwrap_or_default();
        decode(op, Value::Array(all))
    }
}

impl<R: Resource> Backend<Select<By<Page<R>, pagination::Arguments>>>
    for Mock
{
    type Ok = Page<R>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Page<R>, pagination::Arguments>>,
    ) -> Result<Self::Ok, Self::Err> {
        let args = by.into_inner();
        let op = Operation::new(Action::List, R::LABELS);
        let state = self.record(
            op,
            "GET",
            R::PATH,
            query_of(args.query(R::PAGING)),
            None,
        )?;
        let all = state.collections.get(R::PATH).cloned().unwrap_or_default();
        let all: Vec<R> = decode(op, Value::Array(all))?;
        Ok(Page::slice(args, all))
    }
}

impl<R: Resource> Backend<Select<By<Option<R>, R::Id>>> for Mock {
    type Ok = Option<R>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<R>, R::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let op = Operation::new(Action::Get, R::LABELS);
        let path = format!("{}/{id}", R::PATH);
        let mut state = self.record(op, "GET", &path, vec![], None)?;
        state
            .find_mut::<R>(id)
            .map(|v| decode(op, v.clone()))
            .transpose()
    }
}

impl<R: Editable> Backend<Insert<By<R, R::Draft>>> for Mock {
    type Ok = R;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert(by): Insert<By<R, R::Draft>>,
    ) -> Result<Self::Ok, Self::Err> {
        let op = Operation::new(Action::Create, R::LABELS);
        let body = encode(op, by.inner())?;
        let mut state =
            self.record(op, "POST", R::PATH, vec![], Some(body.clone()))?;

        let mut created = Map::new();
        if let Value::Object(fields) = body {
            created = fields;
        }
        state.last_id += 1;
        _ = created.insert("id".to_owned(), state.last_id.into());
        let created = Value::Object(created);

        let resource = decode(op, created.clone())?;
        state.collections.entry(R::PATH).or_default().push(created);
        Ok(resource)
    }
}

impl<R: Editable> Backend<Update<By<R, (R::Id, R::Draft)>>> for Mock {
    type Ok = R;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Update(by): Update<By<R, (R::Id, R::Draft)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (id, draft) = by.into_inner();
        let op = Operation::new(Action::Update, R::LABELS);
        let body = encode(op, &draft)?;
        let path = format!("{}/{id}", R::PATH);
        let mut state =
            self.record(op, "PUT", &path, vec![], Some(body.clone()))?;

        let stored = state.find_mut::<R>(id).ok_or_else(|| not_found(op))?;
        if let (Value::Object(stored), Value::Object(fields)) = (&mut *stored, body)
        {
            stored.extend(fields);
        }
        decode(op, stored.clone())
    }
}

impl<R: Resource> Backend<Delete<By<R, R::Id>>> for Mock {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<R, R::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let op = Operation::new(Action::Delete, R::LABELS);
        let path = format!("{}/{id}", R::PATH);
        let mut state = self.record(op, "DELETE", &path, vec![], None)?;

        let id = encode(op, &id)?;
        let items = state.collections.entry(R::PATH).or_default();
        let before = items.len();
        items.retain(|v| v.get("id") != Some(&id));
        if items.len() == before {
            return Err(not_found(op));
        }
        Ok(())
    }
}

impl<R: Activatable> Backend<Patch<By<R, (R::Id, ToggleActive)>>> for Mock {
    type Ok = R;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Patch(by): Patch<By<R, (R::Id, ToggleActive)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (id, _) = by.into_inner();
        let op = Operation::new(Action::ToggleActive, R::LABELS);
        let path = format!("{}/{id}/toggle-active", R::PATH);
        let mut state = self.record(op, "PATCH", &path, vec![], None)?;

        let stored = state.find_mut::<R>(id).ok_or_else(|| not_found(op))?;
        if let Value::Object(fields) = &mut *stored {
            let active = fields
                .get(R::ACTIVE_FIELD)
                .and_then(Value::as_bool)
                .unwrap_or(true);
            _ = fields.insert(R::ACTIVE_FIELD.to_owned(), (!active).into());
        }
        decode(op, stored.clone())
    }
}

impl Backend<Patch<By<Currency, (currency::Id, SetBase)>>> for Mock {
    type Ok = Currency;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Patch(by): Patch<By<Currency, (currency::Id, SetBase)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (id, _) = by.into_inner();
        let op = Operation::new(Action::SetBase, Currency::LABELS);
        let path = format!("{}/{id}/set-base", Currency::PATH);
        let mut state = self.record(op, "PATCH", &path, vec![], None)?;

        if state.find_mut::<Currency>(id).is_none() {
            return Err(not_found(op));
        }
        let id = encode(op, &id)?;
        let mut base = None;
        for stored in state.collections.entry(Currency::PATH).or_default() {
            let is_base = stored.get("id") == Some(&id);
            if let Value::Object(fields) = &mut *stored {
                _ = fields.insert("isBase".to_owned(), is_base.into());
            }
            if is_base {
                base = Some(stored.clone());
            }
        }
        decode(op, base.ok_or_else(|| not_found(op))?)
    }
}

impl Backend<Select<By<agency::Stats, ()>>> for Mock {
    type Ok = agency::Stats;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        _: Select<By<agency::Stats, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let op = Operation::new(Action::Stats, Agency::LABELS);
        let path = format!("{}/stats", Agency::PATH);
        let state = self.record(op, "GET", &path, vec![], None)?;
        if let Some(body) = state.response("GET", &path) {
            return decode(op, body);
        }

        let all = state.collections.get(Agency::PATH).cloned().unwrap_or_default();
        let all: Vec<Agency> = decode(op, Value::Array(all))?;
        let active = all.iter().filter(|a| a.active).count() as u64;
        Ok(agency::Stats {
            total: all.len() as u64,
            active,
            inactive: all.len() as u64 - active,
        })
    }
}

impl Backend<Select<By<Vec<NearbyFacility>, Vicinity>>> for Mock {
    type Ok = Vec<NearbyFacility>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<NearbyFacility>, Vicinity>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Vicinity {
            latitude,
            longitude,
            radius_km,
        } = by.into_inner();
        let op = Operation::new(Action::Nearby, NearbyFacility::LABELS);
        let path = format!("{}/nearby", NearbyFacility::PATH);
        let state = self.record(
            op,
            "GET",
            &path,
            query_of([
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("radius", radius_km.to_string()),
            ]),
            None,
        )?;
        let body = state.response("GET", &path).unwrap_or_else(|| {
            Value::Array(
                state
                    .collections
                    .get(NearbyFacility::PATH)
                    .cloned()
                    .unwrap_or_default(),
            )
        });
        decode(op, body)
    }
}

impl Backend<Select<By<Vec<Slot>, SlotQuery>>> for Mock {
    type Ok = Vec<Slot>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Slot>, SlotQuery>>,
    ) -> Result<Self::Ok, Self::Err> {
        let SlotQuery { agent_id, date } = by.into_inner();
        let op = Operation::new(Action::AvailableSlots, Appointment::LABELS);
        let path = format!("{}/available-slots", Appointment::PATH);
        let state = self.record(
            op,
            "GET",
            &path,
            query_of([
                ("agentId", agent_id.to_string()),
                ("date", format_date(date)),
            ]),
            None,
        )?;
        decode(op, state.response("GET", &path).unwrap_or(json!([])))
    }
}

impl Backend<Insert<By<Session, Credentials>>> for Mock {
    type Ok = Session;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert(by): Insert<By<Session, Credentials>>,
    ) -> Result<Self::Ok, Self::Err> {
        let op = Operation::new(Action::Login, User::LABELS);
        let body = encode(op, by.inner())?;
        let state = self
            .anonymous()
            .record(op, "POST", "auth/login", vec![], Some(body))?
            .response("POST", "auth/login");
        decode(
            op,
            state.ok_or_else(|| {
                tracerr::new!(Error::new(op, ErrorKind::Unauthorized))
            })?,
        )
    }
}

impl Backend<Update<By<User, (user::Id, PasswordChange)>>> for Mock {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Update(by): Update<By<User, (user::Id, PasswordChange)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (id, change) = by.into_inner();
        let op = Operation::new(Action::ChangePassword, User::LABELS);
        let path = format!("{}/{id}/change-password", User::PATH);
        let body = encode(op, &change)?;
        drop(self.record(op, "PUT", &path, vec![], Some(body))?);
        Ok(())
    }
}

impl Backend<Upload<By<FileUrl, (Target, Cropped, Option<FileUrl>)>>>
    for Mock
{
    type Ok = FileUrl;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Upload(by): Upload<By<FileUrl, (Target, Cropped, Option<FileUrl>)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (target, image, previous) = by.into_inner();
        let op = Operation::new(Action::Upload, target.labels());
        let path = target.upload_path();
        let body = json!({
            "file": image.name(),
            "size": image.len(),
            "previousUrl": previous,
        });
        let state = self.record(op, "POST", &path, vec![], Some(body))?;
        match state.response("POST", &path) {
            Some(body) => decode(op, body["fileUrl"].clone()),
            None => Ok(FileUrl::from(format!("/uploads/{}", image.name()))),
        }
    }
}

impl Backend<Delete<By<FileUrl, (Target, FileUrl)>>> for Mock {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<FileUrl, (Target, FileUrl)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (target, url) = by.into_inner();
        let op = Operation::new(Action::DeleteFile, target.labels());
        let query = match target {
            Target::AgencyLogo => vec![("fileUrl".to_owned(), String::from(url))],
            Target::UserPhoto(_) => vec![],
        };
        drop(self.record(op, "DELETE", &target.delete_path(), query, None)?);
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{By, Delete, Insert, Patch, Select},
        pagination::{Arguments, Page},
    };

    use super::Mock;
    use crate::{
        domain::{agency, Agency, ToggleActive},
        infra::Backend as _,
    };

    fn agency(id: i64, name: &str, active: bool) -> Agency {
        serde_json::from_value(serde_json::json!({
            "id": id, "name": name, "active": active,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn stores_created_resources() {
        let mock = Mock::new();
        _ = mock.seed([agency(4, "Norte", true)]);

        let created: Agency = mock
            .execute(Insert(By::<Agency, _>::new(agency::Draft {
                name: "Sur".into(),
                active: true,
                ..agency::Draft::default()
            })))
            .await
            .unwrap();

        assert_eq!(created.id.get(), 5);
        assert_eq!(mock.items::<Agency>().len(), 2);
        assert_eq!(mock.count("POST", "/api/agencies"), 1);
    }

    #[tokio::test]
    async fn pages_with_resource_convention() {
        let mock = Mock::new();
        _ = mock.seed((1..=12).map(|i| agency(i, "A", true)));

        let page: Page<Agency> = mock
            .execute(Select(By::<Page<Agency>, _>::new(
                Arguments::new(1, 5).unwrap(),
            )))
            .await
            .unwrap();

        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total_pages, 3);
        let call = mock.calls().pop().unwrap();
        assert_eq!(
            call.query,
            vec![
                ("page".to_owned(), "2".to_owned()),
                ("limit".to_owned(), "5".to_owned()),
            ],
        );
    }

    #[tokio::test]
    async fn toggles_and_deletes() {
        let mock = Mock::new();
        _ = mock.seed([agency(1, "A", true)]);

        let toggled: Agency = mock
            .execute(Patch(By::<Agency, _>::new((
                agency::Id::from(1),
                ToggleActive,
            ))))
            .await
            .unwrap();
        assert!(!toggled.active);

        mock.execute(Delete(By::<Agency, _>::new(agency::Id::from(1))))
            .await
            .unwrap();
        assert!(mock.items::<Agency>().is_empty());

        let err = mock
            .execute(Delete(By::<Agency, _>::new(agency::Id::from(1))))
            .await
            .unwrap_err();
        assert_eq!(err.as_ref().message(), "Error al eliminar la agencia");
    }

    #[tokio::test]
    async fn fails_configured_endpoints() {
        let mock = Mock::new();
        _ = mock.fail("GET", "/api/agencies", 401);

        let err = mock
            .execute(Select(By::<Vec<Agency>, _>::new(())))
            .await
            .unwrap_err();
        assert!(err.as_ref().is_unauthorized());

        _ = mock.recover("GET", "/api/agencies");
        let all = mock
            .execute(Select(By::<Vec<Agency>, _>::new(())))
            .await
            .unwrap();
        assert!(all.is_empty());
        assert_eq!(mock.count("GET", "/api/agencies"), 2);
    }
}
