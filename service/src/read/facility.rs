//! [`NearbyFacility`] read definitions.

pub use self::list::{Filter, SortKey};

pub mod list {
    //! [`NearbyFacility`] list definitions.

    use common::{
        define_pagination,
        filter::{self, Choice, Direction, Search},
    };

    use crate::{
        domain::{facility::Type, NearbyFacility},
        read::Listable,
    };

    define_pagination!(NearbyFacility);

    /// Filter of [`NearbyFacility`]s.
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`Search`] over name, address and description.
        pub search: Search,

        /// Required [`Type`].
        pub kind: Choice<Type>,

        /// Required "active" flag.
        pub active: Choice<bool>,
    }

    impl filter::Filter<NearbyFacility> for Filter {
        fn matches(&self, f: &NearbyFacility) -> bool {
            self.kind.matches(&f.kind)
                && self.active.matches(&f.active)
                && self.search.matches_any(
                    [
                        Some(f.name.as_str()),
                        f.address.as_deref(),
                        f.description.as_deref(),
                    ]
                    .into_iter()
                    .flatten(),
                )
        }
    }

    /// Key to sort [`NearbyFacility`]s by.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub enum SortKey {
        /// Name, ignoring case.
        #[default]
        Name,

        /// Distance, unknown ones last (in ascending direction).
        Distance,

        /// [`Type`].
        Kind,
    }

    impl Listable for NearbyFacility {
        type Filter = Filter;
        type SortKey = SortKey;

        fn sort(items: &mut [&Self], key: SortKey, direction: Direction) {
            match key {
                SortKey::Name => filter::sort_by_key(items, direction, |f| {
                    f.name.to_lowercase()
                }),
                SortKey::Distance => {
                    items.sort_by(|a, b| {
                        let (a, b) = (
                            a.distance_km.unwrap_or(f64::INFINITY),
                            b.distance_km.unwrap_or(f64::INFINITY),
                        );
                        direction.apply(a.total_cmp(&b))
                    });
                }
                SortKey::Kind => {
                    filter::sort_by_key(items, direction, |f| f.kind);
                }
            }
        }
    }
}
