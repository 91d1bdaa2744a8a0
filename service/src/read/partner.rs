//! [`Partner`] read definitions.

pub use self::list::{Filter, SortKey};

pub mod list {
    //! [`Partner`] list definitions.

    use common::{
        define_pagination,
        filter::{self, Choice, Direction, Search},
    };

    use crate::{
        domain::{partner::Kind, Partner},
        read::Listable,
    };

    define_pagination!(Partner);

    /// Filter of [`Partner`]s.
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`Search`] over name and email.
        pub search: Search,

        /// Required [`Kind`].
        pub kind: Choice<Kind>,

        /// Required "active" flag.
        pub active: Choice<bool>,
    }

    impl filter::Filter<Partner> for Filter {
        fn matches(&self, p: &Partner) -> bool {
            self.kind.matches(&p.kind)
                && self.active.matches(&p.active)
                && self.search.matches_any(
                    [Some(p.name.as_str()), p.email.as_deref()]
                        .into_iter()
                        .flatten(),
                )
        }
    }

    /// Key to sort [`Partner`]s by.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub enum SortKey {
        /// Name, ignoring case.
        #[default]
        Name,

        /// [`Kind`].
        Kind,
    }

    impl Listable for Partner {
        type Filter = Filter;
        type SortKey = SortKey;

        fn sort(items: &mut [&Self], key: SortKey, direction: Direction) {
            match key {
                SortKey::Name => filter::sort_by_key(items, direction, |p| {
                    p.name.to_lowercase()
                }),
                SortKey::Kind => {
                    filter::sort_by_key(items, direction, |p| p.kind);
                }
            }
        }
    }
}
