//! [`Agency`] read definitions.

pub use self::list::{Filter, SortKey};

pub mod list {
    //! [`Agency`] list definitions.

    use common::{
        define_pagination,
        filter::{self, Choice, Direction, Search},
    };

    use crate::{domain::Agency, read::Listable};

    define_pagination!(Agency);

    /// Filter of [`Agency`]s.
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`Search`] over name, email, address and phone.
        pub search: Search,

        /// Required "active" flag.
        pub active: Choice<bool>,
    }

    impl filter::Filter<Agency> for Filter {
        fn matches(&self, a: &Agency) -> bool {
            self.active.matches(&a.active)
                && self.search.matches_any(
                    [
                        Some(a.name.as_str()),
                        a.email.as_deref(),
                        a.address.as_deref(),
                        a.phone.as_deref(),
                    ]
                    .into_iter()
                    .flatten(),
                )
        }
    }

    /// Key to sort [`Agency`]s by.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub enum SortKey {
        /// Name, ignoring case.
        #[default]
        Name,

        /// Active ones first (in ascending direction).
        Active,
    }

    impl Listable for Agency {
        type Filter = Filter;
        type SortKey = SortKey;

        fn sort(items: &mut [&Self], key: SortKey, direction: Direction) {
            match key {
                SortKey::Name => {
                    filter::sort_by_key(items, direction, |a| {
                        a.name.to_lowercase()
                    });
                }
                SortKey::Active => {
                    filter::sort_by_key(items, direction, |a| !a.active);
                }
            }
        }
    }
}
