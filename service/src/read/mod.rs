//! Read definitions: filtering and sorting of loaded collections.

pub mod agency;
pub mod appointment;
pub mod currency;
pub mod expense;
pub mod facility;
pub mod named;
pub mod partner;

use std::fmt;

use common::filter::{self, Direction};

use crate::domain::Resource;

/// [`Resource`] whose loaded collection can be filtered and sorted on the
/// client.
pub trait Listable: Resource {
    /// Filter of a collection of this [`Listable`].
    ///
    /// [`Default`] one passes every item.
    type Filter: filter::Filter<Self> + Clone + fmt::Debug + Default;

    /// Key to sort a collection of this [`Listable`] by.
    type SortKey: Copy + fmt::Debug + Default + Eq;

    /// Sorts the provided `items` by the `key` in the given [`Direction`].
    fn sort(items: &mut [&Self], key: Self::SortKey, direction: Direction);
}

/// Sorting of a [`Listable`] collection.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Sort<K> {
    /// Key to sort by.
    pub key: K,

    /// [`Direction`] to sort in.
    pub direction: Direction,
}

/// Returns the items passing the provided `filter`, sorted as specified.
///
/// Without a [`Sort`] the original order is preserved.
pub fn view<'i, R: Listable>(
    items: &'i [R],
    filter: &R::Filter,
    sort: Option<Sort<R::SortKey>>,
) -> Vec<&'i R> {
    let mut view = filter::apply(items, filter);
    if let Some(Sort { key, direction }) = sort {
        R::sort(&mut view, key, direction);
    }
    view
}
