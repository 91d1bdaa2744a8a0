//! [`Currency`] read definitions.

pub use self::list::{Filter, SortKey};

pub mod list {
    //! [`Currency`] list definitions.

    use common::{
        define_pagination,
        filter::{self, Choice, Direction, Search},
    };

    use crate::{domain::Currency, read::Listable};

    define_pagination!(Currency);

    /// Filter of [`Currency`]s.
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`Search`] over code, name and symbol.
        pub search: Search,

        /// Required "active" flag.
        pub active: Choice<bool>,

        /// Required "base" flag.
        pub base: Choice<bool>,
    }

    impl filter::Filter<Currency> for Filter {
        fn matches(&self, c: &Currency) -> bool {
            self.active.matches(&c.is_active)
                && self.base.matches(&c.is_base)
                && self.search.matches_any([
                    c.code.as_str(),
                    c.name.as_str(),
                    c.symbol.as_str(),
                ])
        }
    }

    /// Key to sort [`Currency`]s by.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub enum SortKey {
        /// Base one first, then by code.
        #[default]
        BaseThenCode,

        /// Code.
        Code,

        /// Name, ignoring case.
        Name,
    }

    impl Listable for Currency {
        type Filter = Filter;
        type SortKey = SortKey;

        fn sort(items: &mut [&Self], key: SortKey, direction: Direction) {
            match key {
                SortKey::BaseThenCode => filter::sort_by_key(
                    items,
                    direction,
                    |c| (!c.is_base, c.code.clone()),
                ),
                SortKey::Code => {
                    filter::sort_by_key(items, direction, |c| c.code.clone());
                }
                SortKey::Name => filter::sort_by_key(items, direction, |c| {
                    c.name.to_lowercase()
                }),
            }
        }
    }
}
