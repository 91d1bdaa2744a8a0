//! [`Query`] collection of any [`Resource`].

use common::{
    operations::By,
    pagination::{Arguments, Page},
};

use crate::domain::Resource;
#[cfg(doc)]
use crate::Query;

use super::BackendQuery;

/// Queries all the [`Resource`]s of a collection.
pub type All<R> = BackendQuery<By<Vec<R>, ()>>;

/// Queries a [`Page`] of a [`Resource`]s collection.
pub type List<R> = BackendQuery<By<Page<R>, Arguments>>;

/// Queries a [`Resource`] by its ID.
pub type ById<R> = BackendQuery<By<Option<R>, <R as Resource>::Id>>;
