//! Sort specifications: ordered `(key, direction)` pairs.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use diesel::dsl::{Asc, Desc};
use diesel::expression::BoxableExpression;
use diesel::expression::expression_types::NotSelectable;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};

/// Boxed `ORDER BY` term over table `T`.
pub type BoxedOrder<T> = Box<dyn BoxableExpression<T, Sqlite, SqlType = NotSelectable>>;

type OrderFactory<T> = Arc<dyn Fn() -> BoxedOrder<T> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction: {other}")),
        }
    }
}

/// Ordered list of sort keys over table `T`. Empty means "primary key order".
pub struct Sort<T> {
    keys: Vec<OrderFactory<T>>,
}

impl<T> Default for Sort<T> {
    fn default() -> Self {
        Self { keys: Vec::new() }
    }
}

impl<T> Clone for Sort<T> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
        }
    }
}

impl<T> fmt::Debug for Sort<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sort")
            .field("keys", &self.keys.len())
            .finish()
    }
}

impl<T: 'static> Sort<T> {
    pub fn by<C>(column: C, direction: SortDirection) -> Self
    where
        C: ExpressionMethods + Copy + Send + Sync + 'static,
        Asc<C>: BoxableExpression<T, Sqlite, SqlType = NotSelectable> + 'static,
        Desc<C>: BoxableExpression<T, Sqlite, SqlType = NotSelectable> + 'static,
    {
        Self::default().then_by(column, direction)
    }

    pub fn asc<C>(column: C) -> Self
    where
        C: ExpressionMethods + Copy + Send + Sync + 'static,
        Asc<C>: BoxableExpression<T, Sqlite, SqlType = NotSelectable> + 'static,
        Desc<C>: BoxableExpression<T, Sqlite, SqlType = NotSelectable> + 'static,
    {
        Self::by(column, SortDirection::Asc)
    }

    pub fn desc<C>(column: C) -> Self
    where
        C: ExpressionMethods + Copy + Send + Sync + 'static,
        Asc<C>: BoxableExpression<T, Sqlite, SqlType = NotSelectable> + 'static,
        Desc<C>: BoxableExpression<T, Sqlite, SqlType = NotSelectable> + 'static,
    {
        Self::by(column, SortDirection::Desc)
    }

    /// Appends a secondary key used when earlier keys compare equal.
    pub fn then_by<C>(mut self, column: C, direction: SortDirection) -> Self
    where
        C: ExpressionMethods + Copy + Send + Sync + 'static,
        Asc<C>: BoxableExpression<T, Sqlite, SqlType = NotSelectable> + 'static,
        Desc<C>: BoxableExpression<T, Sqlite, SqlType = NotSelectable> + 'static,
    {
        let key: OrderFactory<T> = match direction {
            SortDirection::Asc => Arc::new(move || -> BoxedOrder<T> { Box::new(column.asc()) }),
            SortDirection::Desc => Arc::new(move || -> BoxedOrder<T> { Box::new(column.desc()) }),
        };
        self.keys.push(key);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Builds the `ORDER BY` terms in priority order.
    pub fn build(&self) -> Vec<BoxedOrder<T>> {
        self.keys.iter().map(|key| key()).collect()
    }
}
