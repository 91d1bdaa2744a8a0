//! Read definitions of resources searched by their names only.

use common::filter::{self, Direction, Search};

use crate::{
    domain::{
        financial::{Category, Provider},
        Agent, Condominium, Property,
    },
    read::Listable,
};

/// Resource having a name and, optionally, other searchable texts.
pub trait Named {
    /// Returns the name of this [`Named`] resource.
    fn name(&self) -> &str;

    /// Returns other searchable texts of this [`Named`] resource.
    fn details(&self) -> Vec<&str> {
        vec![]
    }
}

/// Filter of [`Named`] resources.
#[derive(Clone, Debug, Default)]
pub struct Filter {
    /// [`Search`] over the name and details.
    pub search: Search,
}

impl<R: Named> filter::Filter<R> for Filter {
    fn matches(&self, item: &R) -> bool {
        self.search
            .matches_any([item.name()].into_iter().chain(item.details()))
    }
}

/// Key to sort [`Named`] resources by.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortKey {
    /// Name, ignoring case.
    #[default]
    Name,
}

/// Implements [`Listable`] for the provided [`Named`] resources.
macro_rules! impl_listable {
    ($($ty:ty),* $(,)?) => {$(
        impl Listable for $ty {
            type Filter = Filter;
            type SortKey = SortKey;

            fn sort(items: &mut [&Self], key: SortKey, direction: Direction) {
                match key {
                    SortKey::Name => filter::sort_by_key(items, direction, |i| {
                        i.name().to_lowercase()
                    }),
                }
            }
        }
    )*};
}

impl_listable!(Agent, Category, Condominium, Property, Provider);

impl Named for Agent {
    fn name(&self) -> &str {
        &self.name
    }

    fn details(&self) -> Vec<&str> {
        [self.email.as_deref(), self.phone.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }
}

impl Named for Category {
    fn name(&self) -> &str {
        &self.name
    }

    fn details(&self) -> Vec<&str> {
        self.description.as_deref().into_iter().collect()
    }
}

impl Named for Condominium {
    fn name(&self) -> &str {
        &self.name
    }

    fn details(&self) -> Vec<&str> {
        [self.address.as_deref(), self.description.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }
}

impl Named for Property {
    fn name(&self) -> &str {
        &self.title
    }

    fn details(&self) -> Vec<&str> {
        self.address.as_deref().into_iter().collect()
    }
}

impl Named for Provider {
    fn name(&self) -> &str {
        &self.name
    }

    fn details(&self) -> Vec<&str> {
        [self.tax_id.as_deref(), self.email.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }
}
