//! Client-side state of a paginated [`Resource`] collection.
//!
//! Every page change and mutation takes `&mut self`, so there is at most one
//! request in flight per [`ResourceList`], and a response always belongs to
//! the latest request made.

use common::pagination::{Arguments, Page, Pager};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Resource;
use crate::{
    command::{
        delete_resource::Confirmed, CreateResource, DeleteResource,
        ExecutionError, UpdateResource,
    },
    domain::Editable,
    infra::backend,
    query::resource::List,
    read::{self, Listable, Sort},
    Command, Query,
};

/// Loaded page of a [`Listable`] collection along with its filter and
/// sorting.
#[derive(Clone, Debug)]
pub struct ResourceList<R: Listable> {
    /// Currently loaded [`Page`].
    page: Page<R>,

    /// Position within the collection.
    pager: Pager,

    /// Filter applied to the loaded items.
    filter: R::Filter,

    /// Sorting applied to the loaded items, if any.
    sort: Option<Sort<R::SortKey>>,
}

impl<R: Listable> ResourceList<R> {
    /// Creates a new empty [`ResourceList`] with pages of the provided
    /// `size`.
    ///
    /// Nothing is loaded until [`ResourceList::load()`] is called.
    #[must_use]
    pub fn new(size: usize) -> Self {
        let pager = Pager::new(size);
        Self {
            page: Page::new(pager.arguments(), vec![], 0, None),
            pager,
            filter: R::Filter::default(),
            sort: None,
        }
    }

    /// Returns the currently loaded [`Page`].
    #[must_use]
    pub fn page(&self) -> &Page<R> {
        &self.page
    }

    /// Returns the [`Pager`] of this [`ResourceList`].
    #[must_use]
    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Returns the filter applied to the loaded items.
    #[must_use]
    pub fn filter(&self) -> &R::Filter {
        &self.filter
    }

    /// Replaces the filter applied to the loaded items.
    ///
    /// Filtering happens on the client, so nothing is requested.
    pub fn set_filter(&mut self, filter: R::Filter) {
        self.filter = filter;
    }

    /// Replaces the sorting applied to the loaded items.
    pub fn set_sort(&mut self, sort: Option<Sort<R::SortKey>>) {
        self.sort = sort;
    }

    /// Returns the loaded items passing the filter, sorted as requested.
    #[must_use]
    pub fn view(&self) -> Vec<&R> {
        read::view(&self.page.items, &self.filter, self.sort)
    }

    /// (Re)loads the current page.
    ///
    /// # Errors
    ///
    /// If the page cannot be fetched. The loaded items are left intact then.
    pub async fn load<S>(&mut self, svc: &S) -> Result<(), Traced<backend::Error>>
    where
        S: Query<List<R>, Ok = Page<R>, Err = Traced<backend::Error>>,
    {
        self.fetch(svc, self.pager.arguments())
            .await
            .map_err(tracerr::wrap!())
    }

    /// Loads the page with the provided zero-based `number`.
    ///
    /// Returns `false` without requesting anything if there is no such page.
    ///
    /// # Errors
    ///
    /// If the page cannot be fetched.
    pub async fn go_to_page<S>(
        &mut self,
        svc: &S,
        number: usize,
    ) -> Result<bool, Traced<backend::Error>>
    where
        S: Query<List<R>, Ok = Page<R>, Err = Traced<backend::Error>>,
    {
        self.move_to(svc, self.pager.go_to(number)).await
    }

    /// Requests the page with the provided zero-based `number` directly, with
    /// no page loaded beforehand.
    ///
    /// Returns `false` and keeps the current [`Page`] if the collection turns
    /// out to have no such page.
    ///
    /// # Errors
    ///
    /// If the page fails to load.
    pub async fn open_page<S>(
        &mut self,
        svc: &S,
        number: usize,
    ) -> Result<bool, Traced<backend::Error>>
    where
        S: Query<List<R>, Ok = Page<R>, Err = Traced<backend::Error>>,
    {
        let args = Arguments {
            page: number,
            size: self.pager.size(),
        };
        let page = svc
            .execute(List::<R>::by(args))
            .await
            .map_err(tracerr::wrap!())?;
        if number > 0 && number >= page.total_pages {
            return Ok(false);
        }
        self.pager.sync(&page);
        self.page = page;
        Ok(true)
    }

    /// Loads the next page.
    ///
    /// Returns `false` without requesting anything on the last page.
    ///
    /// # Errors
    ///
    /// If the page cannot be fetched.
    pub async fn next_page<S>(
        &mut self,
        svc: &S,
    ) -> Result<bool, Traced<backend::Error>>
    where
        S: Query<List<R>, Ok = Page<R>, Err = Traced<backend::Error>>,
    {
        self.move_to(svc, self.pager.next()).await
    }

    /// Loads the previous page.
    ///
    /// Returns `false` without requesting anything on the first page.
    ///
    /// # Errors
    ///
    /// If the page cannot be fetched.
    pub async fn previous_page<S>(
        &mut self,
        svc: &S,
    ) -> Result<bool, Traced<backend::Error>>
    where
        S: Query<List<R>, Ok = Page<R>, Err = Traced<backend::Error>>,
    {
        self.move_to(svc, self.pager.previous()).await
    }

    /// Creates a new [`Resource`] out of the provided `draft`, adding it to
    /// the loaded items and then reloading the current page.
    ///
    /// # Errors
    ///
    /// If the `draft` is invalid or the [`Resource`] cannot be created.
    pub async fn create<S>(
        &mut self,
        svc: &S,
        draft: R::Draft,
    ) -> Result<R, Traced<ExecutionError>>
    where
        R: Editable,
        S: Command<CreateResource<R>, Ok = R, Err = Traced<ExecutionError>>
            + Query<List<R>, Ok = Page<R>, Err = Traced<backend::Error>>,
    {
        let created = svc
            .execute(CreateResource::new(draft))
            .await
            .map_err(tracerr::wrap!())?;

        self.page.items.push(created.clone());
        self.page.total += 1;
        self.confirm(svc, self.pager.arguments()).await;

        Ok(created)
    }

    /// Updates the [`Resource`] with the provided `id`, replacing it among
    /// the loaded items and then reloading the current page.
    ///
    /// # Errors
    ///
    /// If the `draft` is invalid or the [`Resource`] cannot be updated.
    pub async fn update<S>(
        &mut self,
        svc: &S,
        id: R::Id,
        draft: R::Draft,
    ) -> Result<R, Traced<ExecutionError>>
    where
        R: Editable,
        S: Command<UpdateResource<R>, Ok = R, Err = Traced<ExecutionError>>
            + Query<List<R>, Ok = Page<R>, Err = Traced<backend::Error>>,
    {
        let updated = svc
            .execute(UpdateResource::new(id, draft))
            .await
            .map_err(tracerr::wrap!())?;

        if let Some(item) = self.page.items.iter_mut().find(|i| i.id() == id) {
            *item = updated.clone();
        }
        self.confirm(svc, self.pager.arguments()).await;

        Ok(updated)
    }

    /// Deletes the [`Resource`] of the provided [`Confirmed`] deletion,
    /// removing it from the loaded items and then reloading the current
    /// page.
    ///
    /// Steps back to the previous page if the current one becomes empty.
    ///
    /// # Errors
    ///
    /// If the [`Resource`] cannot be deleted.
    pub async fn delete<S>(
        &mut self,
        svc: &S,
        deletion: Confirmed<R>,
    ) -> Result<(), Traced<backend::Error>>
    where
        S: Command<DeleteResource<R>, Ok = (), Err = Traced<backend::Error>>
            + Query<List<R>, Ok = Page<R>, Err = Traced<backend::Error>>,
    {
        let id = deletion.id();
        svc.execute(DeleteResource::from(deletion))
            .await
            .map_err(tracerr::wrap!())?;

        let before = self.page.items.len();
        self.page.items.retain(|i| i.id() != id);
        self.page.total -= (before - self.page.items.len()).min(self.page.total);
        let current = self.pager.arguments();
        let args = if self.page.is_empty() {
            self.pager.previous().unwrap_or(current)
        } else {
            current
        };
        self.confirm(svc, args).await;

        Ok(())
    }

    /// Loads the page of the provided [`Arguments`], if any.
    async fn move_to<S>(
        &mut self,
        svc: &S,
        args: Option<Arguments>,
    ) -> Result<bool, Traced<backend::Error>>
    where
        S: Query<List<R>, Ok = Page<R>, Err = Traced<backend::Error>>,
    {
        let Some(args) = args else {
            return Ok(false);
        };
        self.fetch(svc, args).await.map_err(tracerr::wrap!())?;
        Ok(true)
    }

    /// Fetches the page of the provided [`Arguments`], replacing the loaded
    /// one.
    async fn fetch<S>(
        &mut self,
        svc: &S,
        args: Arguments,
    ) -> Result<(), Traced<backend::Error>>
    where
        S: Query<List<R>, Ok = Page<R>, Err = Traced<backend::Error>>,
    {
        let page = svc
            .execute(List::<R>::by(args))
            .await
            .map_err(tracerr::wrap!())?;
        self.pager.sync(&page);
        self.page = page;
        Ok(())
    }

    /// Reloads the page of the provided [`Arguments`] after a successful
    /// mutation.
    ///
    /// A failure keeps the optimistically updated items.
    async fn confirm<S>(&mut self, svc: &S, args: Arguments)
    where
        S: Query<List<R>, Ok = Page<R>, Err = Traced<backend::Error>>,
    {
        if let Err(e) = self.fetch(svc, args).await {
            log::warn!(resource = R::PATH, "failed to reload page: {e}");
        }
    }
}

#[cfg(test)]
mod spec {
    use common::filter::{Choice, Direction, Search};

    use crate::{
        command::{delete_resource::Pending, ExecutionError},
        domain::{agency, currency, Agency, Currency},
        infra::Mock,
        read::{
            agency::{Filter, SortKey},
            Sort,
        },
        Config, Service,
    };

    use super::ResourceList;

    fn agency(id: i64, name: &str, active: bool) -> Agency {
        serde_json::from_value(serde_json::json!({
            "id": id, "name": name, "active": active,
        }))
        .unwrap()
    }

    fn draft(name: &str) -> agency::Draft {
        agency::Draft {
            name: name.into(),
            ..agency::Draft::default()
        }
    }

    fn seeded(count: i64) -> (Service<Mock>, Mock) {
        let mock = Mock::new();
        _ = mock.seed((1..=count).map(|id| agency(id, &format!("A{id}"), true)));
        (Service::new(Config::default(), mock.clone()), mock)
    }

    fn ids(list: &ResourceList<Agency>) -> Vec<i64> {
        list.page().items.iter().map(|a| a.id.get()).collect()
    }

    #[tokio::test]
    async fn navigates_pages() {
        let (svc, mock) = seeded(5);
        let mut list = ResourceList::<Agency>::new(2);

        list.load(&svc).await.unwrap();
        assert_eq!(ids(&list), [1, 2]);
        assert!(!list.pager().has_previous());
        assert!(!list.previous_page(&svc).await.unwrap());

        assert!(list.next_page(&svc).await.unwrap());
        assert!(list.next_page(&svc).await.unwrap());
        assert_eq!(ids(&list), [5]);
        assert!(!list.pager().has_next());
        assert!(!list.next_page(&svc).await.unwrap());

        assert!(!list.go_to_page(&svc, 7).await.unwrap());
        assert!(list.go_to_page(&svc, 1).await.unwrap());
        assert_eq!(ids(&list), [3, 4]);

        assert_eq!(mock.count("GET", "/api/agencies"), 4);
    }

    #[tokio::test]
    async fn keeps_page_on_failed_load() {
        let (svc, mock) = seeded(3);
        let mut list = ResourceList::<Agency>::new(10);
        list.load(&svc).await.unwrap();

        _ = mock.fail("GET", "/api/agencies", 500);
        let err = list.load(&svc).await.unwrap_err();

        assert_eq!(err.as_ref().message(), "Error al obtener agencias");
        assert_eq!(ids(&list), [1, 2, 3]);
    }

    #[tokio::test]
    async fn filters_and_sorts_loaded_items() {
        let mock = Mock::new();
        _ = mock.seed([
            agency(1, "Sol", true),
            agency(2, "Luna", false),
            agency(3, "Lucero", true),
        ]);
        let svc = Service::new(Config::default(), mock.clone());
        let mut list = ResourceList::<Agency>::new(10);
        list.load(&svc).await.unwrap();
        mock.clear_calls();

        list.set_filter(Filter {
            search: Search::new("lu"),
            active: Choice::All,
        });
        list.set_sort(Some(Sort {
            key: SortKey::Name,
            direction: Direction::Ascending,
        }));

        assert_eq!(
            list.view().iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
            ["Lucero", "Luna"],
        );
        list.set_filter(Filter {
            search: Search::default(),
            active: Choice::Only(true),
        });
        assert_eq!(list.view().len(), 2);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn creates_with_single_confirmatory_fetch() {
        let (svc, mock) = seeded(2);
        let mut list = ResourceList::<Agency>::new(10);
        list.load(&svc).await.unwrap();
        mock.clear_calls();

        let created = list.create(&svc, draft("Nueva")).await.unwrap();

        assert_eq!(created.id.get(), 3);
        assert_eq!(ids(&list), [1, 2, 3]);
        assert_eq!(list.page().total, 3);
        assert_eq!(mock.count("POST", "/api/agencies"), 1);
        assert_eq!(mock.count("GET", "/api/agencies"), 1);
    }

    #[tokio::test]
    async fn opens_requested_page_with_single_fetch() {
        let (svc, mock) = seeded(5);
        let mut list = ResourceList::<Agency>::new(2);

        assert!(list.open_page(&svc, 1).await.unwrap());
        assert_eq!(ids(&list), [3, 4]);
        assert_eq!(list.pager().current(), 1);
        assert_eq!(mock.count("GET", "/api/agencies"), 1);

        mock.clear_calls();
        assert!(!list.open_page(&svc, 3).await.unwrap());
        assert_eq!(ids(&list), [3, 4]);
        assert_eq!(list.pager().current(), 1);
        assert_eq!(mock.count("GET", "/api/agencies"), 1);
    }

    #[tokio::test]
    async fn opens_first_page_of_empty_collection() {
        let mock = Mock::new();
        let svc = Service::new(Config::default(), mock.clone());
        let mut list = ResourceList::<Agency>::new(10);

        assert!(list.open_page(&svc, 0).await.unwrap());
        assert!(list.page().is_empty());
        assert!(!list.open_page(&svc, 1).await.unwrap());
    }

    #[tokio::test]
    async fn creates_currency_with_single_post_and_fetch() {
        let mock = Mock::new();
        let svc = Service::new(Config::default(), mock.clone());
        let mut list = ResourceList::<Currency>::new(10);
        list.load(&svc).await.unwrap();
        mock.clear_calls();

        let created = list
            .create(
                &svc,
                currency::Draft {
                    code: "USD".into(),
                    name: "Dólar Estadounidense".into(),
                    symbol: "$".into(),
                    exchange_rate: 1.into(),
                    is_base: None,
                    is_active: None,
                    decimal_places: 2,
                    format: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(created.code.to_string(), "USD");
        assert_eq!(list.page().items.len(), 1);
        let posts = mock
            .calls()
            .into_iter()
            .filter(|c| c.method == "POST")
            .collect::<Vec<_>>();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].path, "/api/currencies");
        assert_eq!(
            posts[0].body,
            Some(serde_json::json!({
                "code": "USD",
                "name": "Dólar Estadounidense",
                "symbol": "$",
                "exchangeRate": 1.0,
                "decimalPlaces": 2,
            })),
        );
        assert_eq!(mock.count("GET", "/api/currencies"), 1);
        assert_eq!(mock.calls().len(), 2);
    }

    #[tokio::test]
    async fn keeps_optimistic_state_when_reload_fails() {
        let (svc, mock) = seeded(2);
        let mut list = ResourceList::<Agency>::new(10);
        list.load(&svc).await.unwrap();
        _ = mock.fail("GET", "/api/agencies", 502);

        let updated = list
            .update(&svc, 2.into(), draft("Renombrada"))
            .await
            .unwrap();

        assert_eq!(updated.name, "Renombrada");
        assert_eq!(list.page().items[1].name, "Renombrada");
    }

    #[tokio::test]
    async fn rejects_invalid_draft_without_requests() {
        let (svc, mock) = seeded(1);
        let mut list = ResourceList::<Agency>::new(10);
        list.load(&svc).await.unwrap();
        mock.clear_calls();

        let err = list.create(&svc, draft(" ")).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Invalid(_)));
        assert_eq!(ids(&list), [1]);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn steps_back_when_page_empties() {
        let (svc, mock) = seeded(3);
        let mut list = ResourceList::<Agency>::new(2);
        list.load(&svc).await.unwrap();
        assert!(list.next_page(&svc).await.unwrap());
        mock.clear_calls();

        list.delete(&svc, Pending::new(3.into()).confirm())
            .await
            .unwrap();

        assert_eq!(list.pager().current(), 0);
        assert_eq!(ids(&list), [1, 2]);
        assert_eq!(mock.count("DELETE", "/api/agencies/3"), 1);
        assert_eq!(mock.count("GET", "/api/agencies"), 1);
    }
}
