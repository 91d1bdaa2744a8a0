//! Abstractions for offset pagination.

/// Index of the first page a backend endpoint expects.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Base {
    /// Pages are numbered from `0`.
    Zero,

    /// Pages are numbered from `1`.
    One,
}

/// Convention a backend endpoint uses for its pagination query parameters.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Paging {
    /// [`Base`] of page numbers.
    pub base: Base,

    /// Name of the query parameter carrying the page size.
    pub size_param: &'static str,
}

impl Paging {
    /// Zero-based pages with a `size` parameter.
    pub const ZERO_BASED: Self = Self {
        base: Base::Zero,
        size_param: "size",
    };

    /// One-based pages with a `limit` parameter.
    pub const ONE_BASED: Self = Self {
        base: Base::One,
        size_param: "limit",
    };
}

/// Pagination arguments.
///
/// Pages are always numbered from `0` here, the [`Paging`] convention is only
/// applied when rendering query parameters.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Arguments {
    /// Zero-based number of the requested page.
    pub page: usize,

    /// Number of items per page.
    pub size: usize,
}

impl Arguments {
    /// Default number of items per page.
    pub const DEFAULT_SIZE: usize = 10;

    /// Creates new [`Arguments`].
    ///
    /// [`None`] is returned if `size` is zero.
    #[must_use]
    pub fn new(page: usize, size: usize) -> Option<Self> {
        (size > 0).then_some(Self { page, size })
    }

    /// Creates new [`Arguments`] requesting the first page.
    ///
    /// Zero `size` is replaced with [`Arguments::DEFAULT_SIZE`].
    #[must_use]
    pub fn first(size: usize) -> Self {
        Self {
            page: 0,
            size: if size == 0 { Self::DEFAULT_SIZE } else { size },
        }
    }

    /// Returns the number of items preceding the requested page.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }

    /// Renders these [`Arguments`] as query parameters following the provided
    /// [`Paging`] convention.
    #[must_use]
    pub fn query(&self, paging: Paging) -> [(&'static str, String); 2] {
        let page = match paging.base {
            Base::Zero => self.page,
            Base::One => self.page + 1,
        };
        [
            ("page", page.to_string()),
            (paging.size_param, self.size.to_string()),
        ]
    }
}

impl Default for Arguments {
    fn default() -> Self {
        Self::first(Self::DEFAULT_SIZE)
    }
}

/// Returns the number of pages needed for `total` items of `size` per page.
#[must_use]
pub fn total_pages(total: usize, size: usize) -> usize {
    if size == 0 {
        0
    } else {
        total.div_ceil(size)
    }
}

/// A page of items.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<T> {
    /// Items on this [`Page`].
    pub items: Vec<T>,

    /// Zero-based number of this [`Page`].
    pub number: usize,

    /// Requested number of items per [`Page`].
    pub size: usize,

    /// Total number of items across all pages.
    pub total: usize,

    /// Total number of pages.
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Creates a new [`Page`] for the provided [`Arguments`].
    ///
    /// The `total_pages` reported by a backend takes precedence over the one
    /// derived from `total`.
    #[must_use]
    pub fn new(
        args: Arguments,
        items: Vec<T>,
        total: usize,
        total_pages: Option<usize>,
    ) -> Self {
        Self {
            items,
            number: args.page,
            size: args.size,
            total,
            total_pages: total_pages
                .unwrap_or_else(|| self::total_pages(total, args.size)),
        }
    }

    /// Creates a new [`Page`] by slicing the whole collection of items.
    #[must_use]
    pub fn slice(args: Arguments, all: Vec<T>) -> Self {
        let total = all.len();
        let items = all
            .into_iter()
            .skip(args.offset())
            .take(args.size)
            .collect();
        Self::new(args, items, total, None)
    }

    /// Indicates whether this [`Page`] has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the [`Pager`] positioned at this [`Page`].
    #[must_use]
    pub fn pager(&self) -> Pager {
        Pager {
            current: self.number,
            size: self.size,
            total_pages: self.total_pages,
        }
    }
}

/// Position of a client within a paginated collection.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Pager {
    /// Zero-based number of the current page.
    current: usize,

    /// Number of items per page.
    size: usize,

    /// Total number of pages, as last reported.
    total_pages: usize,
}

impl Pager {
    /// Creates a new [`Pager`] positioned at the first page.
    #[must_use]
    pub fn new(size: usize) -> Self {
        let Arguments { page, size } = Arguments::first(size);
        Self {
            current: page,
            size,
            total_pages: 0,
        }
    }

    /// Returns the zero-based number of the current page.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Returns the number of items per page.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the total number of pages.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Indicates whether the "previous" control is enabled.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    /// Indicates whether the "next" control is enabled.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current + 1 < self.total_pages
    }

    /// Returns [`Arguments`] for the current page.
    #[must_use]
    pub fn arguments(&self) -> Arguments {
        Arguments {
            page: self.current,
            size: self.size,
        }
    }

    /// Returns [`Arguments`] for the previous page, if there is one.
    #[must_use]
    pub fn previous(&self) -> Option<Arguments> {
        self.has_previous().then(|| Arguments {
            page: self.current - 1,
            size: self.size,
        })
    }

    /// Returns [`Arguments`] for the next page, if there is one.
    #[must_use]
    pub fn next(&self) -> Option<Arguments> {
        self.has_next().then(|| Arguments {
            page: self.current + 1,
            size: self.size,
        })
    }

    /// Returns [`Arguments`] for the provided page, if it exists.
    ///
    /// The first page always exists, even for an empty collection.
    #[must_use]
    pub fn go_to(&self, page: usize) -> Option<Arguments> {
        (page == 0 || page < self.total_pages).then_some(Arguments {
            page,
            size: self.size,
        })
    }

    /// Repositions this [`Pager`] at the provided [`Page`].
    pub fn sync<T>(&mut self, page: &Page<T>) {
        *self = page.pager();
    }
}

pub mod serde {
    //! Module providing decoding of [`Page`]s from backend responses.

    use serde::Deserialize;

    use super::{Arguments, Page};

    /// Body of a backend response to a paginated request.
    #[derive(Clone, Debug, Deserialize)]
    #[serde(untagged)]
    pub enum Body<T> {
        /// Paginated envelope.
        Paged(Paged<T>),

        /// Bare array of all the items, ignoring the pagination.
        Bare(Vec<T>),
    }

    /// Paginated envelope of a backend response.
    #[derive(Clone, Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Paged<T> {
        /// Items of the page.
        #[serde(alias = "data", alias = "items")]
        pub content: Vec<T>,

        /// Total number of items, if reported.
        #[serde(alias = "totalElements", default)]
        pub total: Option<usize>,

        /// Total number of pages, if reported.
        #[serde(default)]
        pub total_pages: Option<usize>,
    }

    impl<T> Body<T> {
        /// Converts this [`Body`] into a [`Page`] requested by the provided
        /// [`Arguments`].
        #[must_use]
        pub fn into_page(self, args: Arguments) -> Page<T> {
            match self {
                Self::Paged(Paged {
                    content,
                    total,
                    total_pages,
                }) => {
                    let total = total.unwrap_or(args.offset() + content.len());
                    Page::new(args, content, total, total_pages)
                }
                Self::Bare(all) => Page::slice(args, all),
            }
        }
    }
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty) => {
        #[doc = "A [`Page`] of nodes."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments;

        #[doc = "Position within a paginated list."]
        pub type Pager = $crate::pagination::Pager;
    };
}
