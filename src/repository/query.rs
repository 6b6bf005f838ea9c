use std::fmt;

use crate::pagination::PageRequest;
use crate::repository::filter::{Filter, and_maybe};
use crate::repository::sort::Sort;

/// Filter, ordering and window applied to a read over table `T`.
pub struct ListQuery<T> {
    filter: Option<Filter<T>>,
    sort: Sort<T>,
    pagination: Option<PageRequest>,
    limit: Option<usize>,
}

impl<T> Default for ListQuery<T> {
    fn default() -> Self {
        Self {
            filter: None,
            sort: Sort::default(),
            pagination: None,
            limit: None,
        }
    }
}

impl<T> Clone for ListQuery<T> {
    fn clone(&self) -> Self {
        Self {
            filter: self.filter.clone(),
            sort: self.sort.clone(),
            pagination: self.pagination,
            limit: self.limit,
        }
    }
}

impl<T> fmt::Debug for ListQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListQuery")
            .field("filter", &self.filter)
            .field("sort", &self.sort)
            .field("pagination", &self.pagination)
            .field("limit", &self.limit)
            .finish()
    }
}

impl<T: 'static> ListQuery<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a predicate; repeated calls are combined with AND.
    pub fn filter(mut self, filter: Filter<T>) -> Self {
        self.filter = Some(and_maybe(self.filter.take(), filter));
        self
    }

    pub fn sort(mut self, sort: Sort<T>) -> Self {
        self.sort = sort;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(PageRequest::new(page, per_page));
        self
    }

    /// Caps the number of rows. With a page window set, the cap applies
    /// inside that page.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filter_ref(&self) -> Option<&Filter<T>> {
        self.filter.as_ref()
    }

    pub fn sort_ref(&self) -> &Sort<T> {
        &self.sort
    }

    pub fn pagination(&self) -> Option<PageRequest> {
        self.pagination
    }

    /// `(limit, offset)` to apply to the SQL query, if any. Values beyond
    /// `i64::MAX` saturate so a far-away page stays past the end.
    pub fn window(&self) -> Option<(i64, i64)> {
        let (limit, offset) = match (self.pagination, self.limit) {
            (Some(page), Some(limit)) => (page.per_page().min(limit), page.offset()),
            (Some(page), None) => (page.per_page(), page.offset()),
            (None, Some(limit)) => (limit, 0),
            (None, None) => return None,
        };
        Some((to_sql_count(limit), to_sql_count(offset)))
    }

    /// Same filter and ordering with the window replaced by `request`.
    pub(crate) fn with_page(&self, request: PageRequest) -> Self {
        Self {
            filter: self.filter.clone(),
            sort: self.sort.clone(),
            pagination: Some(request),
            limit: None,
        }
    }
}

fn to_sql_count(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
