//! List-response pagination.
//!
//! Builds the [`PageResult`] envelope returned by every list endpoint from a
//! slice of records the data source already fetched, the total number of
//! matching records, and the requested `skip`/`take` window. Counting and
//! slicing stay with the repository; this module validates the window,
//! derives page metadata and optionally reshapes each record.
//!
//! Each transform mode has its own entry point:
//!
//! - [`paginate`] passes items through unchanged.
//! - [`paginate_with_projection`] converts each item into a response type
//!   through its `TryFrom` impl. Only the fields that type declares can reach
//!   the output.
//! - [`paginate_with_mapper`] applies a fallible closure to each item.
//!
//! ```
//! use domain::pagination::paginate;
//!
//! let page = paginate(vec!["a", "b"], 50, 20, 10).unwrap();
//! assert_eq!(page.current_page, 3);
//! assert_eq!(page.total_pages, 5);
//! assert!(page.has_next_page && page.has_previous_page);
//! ```

use std::convert::Infallible;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_PAGE_SKIP, DEFAULT_PAGE_TAKE};

/// Errors raised while building a page.
///
/// `E` is the error type of the per-item transform. It defaults to
/// [`Infallible`] for identity pagination.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError<E = Infallible> {
    /// A window or count argument is out of range
    #[error("{argument} must be {requirement}")]
    InvalidArgument {
        argument: &'static str,
        requirement: &'static str,
    },

    /// Transforming one of the items failed, so no page was produced
    #[error(transparent)]
    Transform(E),
}

impl<E> PaginationError<E> {
    fn invalid(argument: &'static str, requirement: &'static str) -> Self {
        PaginationError::InvalidArgument {
            argument,
            requirement,
        }
    }

    /// Whether the error came from argument validation rather than a transform
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, PaginationError::InvalidArgument { .. })
    }
}

/// Requested page window as sent by a caller.
///
/// Signed on purpose: values arrive from query strings and service callers
/// unchecked, and negative values must be reported rather than wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Number of records to skip
    pub skip: i64,
    /// Page size
    pub take: i64,
}

impl PageRequest {
    pub fn new(skip: i64, take: i64) -> Self {
        Self { skip, take }
    }

    /// Validate the window and return its unsigned form.
    pub fn window(&self) -> Result<PageWindow, PaginationError> {
        PageWindow::new(self.skip, self.take)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: DEFAULT_PAGE_SKIP,
            take: DEFAULT_PAGE_TAKE,
        }
    }
}

/// A validated window: `take` is strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    skip: u64,
    take: u64,
}

impl PageWindow {
    fn new<E>(skip: i64, take: i64) -> Result<Self, PaginationError<E>> {
        if take <= 0 {
            return Err(PaginationError::invalid("take", "greater than 0"));
        }
        if skip < 0 {
            return Err(PaginationError::invalid("skip", "non-negative"));
        }

        Ok(Self {
            skip: skip as u64,
            take: take as u64,
        })
    }

    /// Offset to hand to the data source
    pub fn skip(&self) -> u64 {
        self.skip
    }

    /// Limit to hand to the data source
    pub fn take(&self) -> u64 {
        self.take
    }

    /// 1-based page number. Not clamped to the number of pages.
    pub fn current_page(&self) -> u64 {
        self.skip / self.take + 1
    }
}

/// Page metadata derived from a window and a total count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub total_items: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub items_per_page: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PageMeta {
    pub fn new(total_items: u64, window: PageWindow) -> Self {
        // An empty result set still has one (empty) page.
        let total_pages = if total_items == 0 {
            1
        } else {
            total_items.div_ceil(window.take)
        };
        let current_page = window.current_page();

        Self {
            total_items,
            total_pages,
            current_page,
            items_per_page: window.take,
            has_next_page: current_page < total_pages,
            has_previous_page: current_page > 1,
        }
    }
}

/// Paginated response envelope.
///
/// `items_per_page` always echoes the requested page size, so a short last
/// page still reports the full `take`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
    feature = "openapi",
    derive(utoipa::ToSchema),
    aliases(UserPage = PageResult<crate::user::UserResponse>)
)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    /// Items on the current page, in data source order
    pub data: Vec<T>,
    /// Records matching the query across all pages
    pub total_items: u64,
    /// Number of pages, at least 1
    pub total_pages: u64,
    /// 1-based page number derived from skip and take
    pub current_page: u64,
    /// Requested page size
    pub items_per_page: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl<T> PageResult<T> {
    fn from_parts(data: Vec<T>, meta: PageMeta) -> Self {
        Self {
            data,
            total_items: meta.total_items,
            total_pages: meta.total_pages,
            current_page: meta.current_page,
            items_per_page: meta.items_per_page,
            has_next_page: meta.has_next_page,
            has_previous_page: meta.has_previous_page,
        }
    }

    /// True when `skip` pointed past the last record.
    pub fn is_past_end(&self) -> bool {
        self.current_page > self.total_pages
    }
}

/// Build a page, passing items through unchanged.
pub fn paginate<T>(
    items: Vec<T>,
    total_items: i64,
    skip: i64,
    take: i64,
) -> Result<PageResult<T>, PaginationError> {
    paginate_with_mapper(items, total_items, skip, take, Ok)
}

/// Build a page, projecting each item into the response type `P`.
///
/// The projection is `P`'s `TryFrom<T>` impl; every `From` conversion
/// qualifies and cannot fail.
pub fn paginate_with_projection<P, T>(
    items: Vec<T>,
    total_items: i64,
    skip: i64,
    take: i64,
) -> Result<PageResult<P>, PaginationError<P::Error>>
where
    P: TryFrom<T>,
{
    paginate_with_mapper(items, total_items, skip, take, <P as TryFrom<T>>::try_from)
}

/// Build a page, mapping each item through `mapper` in order.
///
/// Arguments are validated before `mapper` is called. The first mapper
/// error aborts the whole page and is returned as-is inside
/// [`PaginationError::Transform`].
pub fn paginate_with_mapper<T, U, E, F>(
    items: Vec<T>,
    total_items: i64,
    skip: i64,
    take: i64,
    mapper: F,
) -> Result<PageResult<U>, PaginationError<E>>
where
    F: FnMut(T) -> Result<U, E>,
{
    let window = PageWindow::new(skip, take)?;
    if total_items < 0 {
        return Err(PaginationError::invalid("totalItems", "non-negative"));
    }
    let meta = PageMeta::new(total_items as u64, window);

    let data = items
        .into_iter()
        .map(mapper)
        .collect::<Result<Vec<_>, _>>()
        .map_err(PaginationError::Transform)?;

    Ok(PageResult::from_parts(data, meta))
}
