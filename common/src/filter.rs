//! Client-side filtering of in-memory collections.

use std::cmp::Ordering;

/// Predicate selecting items of a collection.
pub trait Filter<T: ?Sized> {
    /// Checks whether the provided `item` passes this [`Filter`].
    fn matches(&self, item: &T) -> bool;
}

impl<T: ?Sized, F> Filter<T> for F
where
    F: Fn(&T) -> bool,
{
    fn matches(&self, item: &T) -> bool {
        self(item)
    }
}

/// Returns the items passing the provided [`Filter`], preserving their order.
pub fn apply<'i, T, F>(
    items: impl IntoIterator<Item = &'i T>,
    filter: &F,
) -> Vec<&'i T>
where
    T: 'i,
    F: Filter<T> + ?Sized,
{
    items.into_iter().filter(|i| filter.matches(i)).collect()
}

/// Free-text search term.
///
/// Matches an item when any of its searchable fields contains the term,
/// ignoring case. An empty (or blank) term matches everything.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Search(Option<String>);

impl Search {
    /// Creates a new [`Search`] for the provided `term`.
    #[must_use]
    pub fn new(term: impl AsRef<str>) -> Self {
        let term = term.as_ref().trim();
        Self((!term.is_empty()).then(|| term.to_lowercase()))
    }

    /// Returns the normalized term of this [`Search`], if any.
    #[must_use]
    pub fn term(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Checks whether any of the provided `fields` contains this [`Search`]
    /// term.
    pub fn matches_any<'f>(
        &self,
        fields: impl IntoIterator<Item = &'f str>,
    ) -> bool {
        let Some(term) = &self.0 else {
            return true;
        };
        fields
            .into_iter()
            .any(|f| f.to_lowercase().contains(term.as_str()))
    }
}

impl From<&str> for Search {
    fn from(term: &str) -> Self {
        Self::new(term)
    }
}

impl From<Option<String>> for Search {
    fn from(term: Option<String>) -> Self {
        term.map(Self::new).unwrap_or_default()
    }
}

/// Categorical filter choosing either all values or an exact one.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Choice<T> {
    /// Any value passes.
    All,

    /// Only the exact value passes.
    Only(T),
}

impl<T: PartialEq> Choice<T> {
    /// Checks whether the provided `value` passes this [`Choice`].
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }

    /// Checks whether the provided optional `value` passes this [`Choice`].
    ///
    /// A missing value passes [`Choice::All`] only.
    pub fn matches_opt(&self, value: Option<&T>) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => value == Some(expected),
        }
    }
}

// `T` is not required to implement `Default`.
impl<T> Default for Choice<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T> From<Option<T>> for Choice<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::All, Self::Only)
    }
}

/// Direction of sorting.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Direction {
    /// Smallest first.
    #[default]
    Ascending,

    /// Largest first.
    Descending,
}

impl Direction {
    /// Applies this [`Direction`] to the provided [`Ordering`].
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Sorts the provided items by the key extracted with `key` in the given
/// [`Direction`].
///
/// Sorting is stable, so equal items keep their relative order.
pub fn sort_by_key<T, K: Ord>(
    items: &mut [T],
    direction: Direction,
    mut key: impl FnMut(&T) -> K,
) {
    items.sort_by(|a, b| direction.apply(key(a).cmp(&key(b))));
}

#[cfg(test)]
mod spec {
    use super::{apply, sort_by_key, Choice, Direction, Filter as _, Search};

    #[derive(Debug, PartialEq)]
    struct Item {
        name: &'static str,
        kind: u8,
        active: bool,
    }

    const ITEMS: &[Item] = &[
        Item { name: "Casa Azul", kind: 1, active: true },
        Item { name: "casa roja", kind: 2, active: false },
        Item { name: "Oficina", kind: 1, active: false },
        Item { name: "Bodega CASA", kind: 1, active: true },
    ];

    #[test]
    fn search_is_case_insensitive_substring() {
        let search = Search::new("  CASA ");

        assert_eq!(search.term(), Some("casa"));
        assert!(search.matches_any(["Casa Azul"]));
        assert!(search.matches_any(["x", "la bodega casa"]));
        assert!(!search.matches_any(["Oficina"]));
        assert!(!search.matches_any([]));
    }

    #[test]
    fn blank_search_matches_everything() {
        assert!(Search::new("").matches_any(["anything"]));
        assert!(Search::new("   ").matches_any([]));
        assert!(Search::default().matches_any(["anything"]));
    }

    #[test]
    fn choice_is_exact_match() {
        assert!(Choice::All.matches(&3));
        assert!(Choice::Only(3).matches(&3));
        assert!(!Choice::Only(3).matches(&4));
        assert!(Choice::<u8>::All.matches_opt(None));
        assert!(!Choice::Only(3).matches_opt(None));
        assert_eq!(Choice::from(Some(true)), Choice::Only(true));
    }

    #[test]
    fn filters_compose_as_intersection_in_any_order() {
        let search = Search::new("casa");
        let kind = Choice::Only(1);
        let active = Choice::Only(true);

        let by_search = |i: &Item| search.matches_any([i.name]);
        let by_kind = |i: &Item| kind.matches(&i.kind);
        let by_active = |i: &Item| active.matches(&i.active);

        let forward = apply(
            apply(apply(ITEMS, &by_search), &by_kind).into_iter(),
            &by_active,
        );
        let backward = apply(
            apply(apply(ITEMS, &by_active), &by_kind).into_iter(),
            &by_search,
        );
        let combined = apply(ITEMS, &|i: &Item| {
            by_search.matches(i) && by_kind.matches(i) && by_active.matches(i)
        });

        assert_eq!(forward, backward);
        assert_eq!(forward, combined);
        assert_eq!(
            forward.iter().map(|i| i.name).collect::<Vec<_>>(),
            ["Casa Azul", "Bodega CASA"],
        );
    }

    #[test]
    fn sorts_in_both_directions() {
        let mut names = vec!["b", "c", "a"];

        sort_by_key(&mut names, Direction::Ascending, |n| *n);
        assert_eq!(names, ["a", "b", "c"]);

        sort_by_key(&mut names, Direction::Descending, |n| *n);
        assert_eq!(names, ["c", "b", "a"]);
    }
}
