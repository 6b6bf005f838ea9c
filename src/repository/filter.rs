//! Composable row predicates.
//!
//! A [`Filter`] stores a factory for a boxed Diesel expression instead of the
//! expression itself. Boxed expressions are consumed by the query builder, and
//! a paginated read needs the same predicate twice (count and page).

use std::fmt;
use std::sync::Arc;

use diesel::dsl::not;
use diesel::expression::BoxableExpression;
use diesel::prelude::*;
use diesel::sql_types::Bool;
use diesel::sqlite::Sqlite;

/// Boxed boolean expression over the rows of table `T`.
pub type BoxedPredicate<T> = Box<dyn BoxableExpression<T, Sqlite, SqlType = Bool>>;

type PredicateFactory<T> = Arc<dyn Fn() -> BoxedPredicate<T> + Send + Sync>;

/// Boolean predicate over the rows of table `T`.
pub struct Filter<T> {
    build: PredicateFactory<T>,
}

impl<T> Clone for Filter<T> {
    fn clone(&self) -> Self {
        Self {
            build: Arc::clone(&self.build),
        }
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter").finish_non_exhaustive()
    }
}

impl<T: 'static> Filter<T> {
    /// Wraps a closure producing a Diesel expression, e.g.
    /// `Filter::new(|| clients::hub_id.eq(1))`.
    pub fn new<F, P>(build: F) -> Self
    where
        F: Fn() -> P + Send + Sync + 'static,
        P: BoxableExpression<T, Sqlite, SqlType = Bool> + 'static,
    {
        Self {
            build: Arc::new(move || -> BoxedPredicate<T> { Box::new(build()) }),
        }
    }

    /// Builds a fresh boxed expression for one query.
    pub fn build(&self) -> BoxedPredicate<T> {
        (self.build)()
    }

    /// Both predicates must hold.
    pub fn and(self, other: Filter<T>) -> Self {
        let (lhs, rhs) = (self.build, other.build);
        Self {
            build: Arc::new(move || -> BoxedPredicate<T> { Box::new(lhs().and(rhs())) }),
        }
    }

    /// At least one predicate must hold.
    pub fn or(self, other: Filter<T>) -> Self {
        let (lhs, rhs) = (self.build, other.build);
        Self {
            build: Arc::new(move || -> BoxedPredicate<T> { Box::new(lhs().or(rhs())) }),
        }
    }

    /// Negates the predicate.
    pub fn not(self) -> Self {
        let inner = self.build;
        Self {
            build: Arc::new(move || -> BoxedPredicate<T> { Box::new(not(inner())) }),
        }
    }

    /// Conjunction of every filter; `None` when the iterator is empty, which
    /// callers treat as "match every row".
    pub fn all<I>(filters: I) -> Option<Self>
    where
        I: IntoIterator<Item = Filter<T>>,
    {
        filters.into_iter().reduce(Filter::and)
    }

    /// Disjunction of every filter; `None` when the iterator is empty.
    pub fn any<I>(filters: I) -> Option<Self>
    where
        I: IntoIterator<Item = Filter<T>>,
    {
        filters.into_iter().reduce(Filter::or)
    }
}

/// Combines an optional filter with another one using AND.
pub fn and_maybe<T: 'static>(current: Option<Filter<T>>, next: Filter<T>) -> Filter<T> {
    match current {
        Some(current) => current.and(next),
        None => next,
    }
}
