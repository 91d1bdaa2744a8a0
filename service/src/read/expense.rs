//! [`Expense`] read definitions.

pub use self::list::{Filter, SortKey};

pub mod list {
    //! [`Expense`] list definitions.

    use common::{
        define_pagination,
        filter::{self, Choice, Direction, Search},
    };

    use crate::{
        domain::financial::{expense::Status, Expense},
        read::Listable,
    };

    define_pagination!(Expense);

    /// Filter of [`Expense`]s.
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`Search`] over description.
        pub search: Search,

        /// Required [`Status`].
        pub status: Choice<Status>,
    }

    impl filter::Filter<Expense> for Filter {
        fn matches(&self, e: &Expense) -> bool {
            self.status.matches(&e.status)
                && self.search.matches_any([e.description.as_str()])
        }
    }

    /// Key to sort [`Expense`]s by.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub enum SortKey {
        /// Due date, undated ones first (in ascending direction).
        #[default]
        DueDate,

        /// Amount.
        Amount,
    }

    impl Listable for Expense {
        type Filter = Filter;
        type SortKey = SortKey;

        fn sort(items: &mut [&Self], key: SortKey, direction: Direction) {
            match key {
                SortKey::DueDate => {
                    filter::sort_by_key(items, direction, |e| e.due_date);
                }
                SortKey::Amount => {
                    filter::sort_by_key(items, direction, |e| e.amount);
                }
            }
        }
    }
}
