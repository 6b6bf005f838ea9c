//! Generic repository over Diesel-mapped entities.
//!
//! [`Repository`] implements [`EntityReader`] and [`EntityWriter`] for every
//! [`Entity`]. Services depend on the traits so they can be exercised against
//! mocks (see the `test-mocks` feature).

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::db::{DbConnection, DbPool, get_connection};
use crate::pagination::{PageRequest, Paginated};
use crate::projection::{project, project_all};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod entity;
pub mod errors;
pub mod filter;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod query;
pub mod sort;

pub use entity::Entity;
pub use filter::Filter;
pub use query::ListQuery;
pub use sort::{Sort, SortDirection};

/// Table type of entity `E`.
pub type TableOf<E> = <E as Entity>::Table;

pub trait EntityReader<E: Entity> {
    fn get_by_id(&self, id: E::Id) -> RepositoryResult<Option<E>>;

    /// First row in sort order, `None` when nothing matches. A page window
    /// on `query` selects the first row of that page.
    fn first(&self, query: ListQuery<TableOf<E>>) -> RepositoryResult<Option<E>>;

    fn list(&self, query: ListQuery<TableOf<E>>) -> RepositoryResult<Vec<E>>;

    /// Number of rows matching `filter`, or every row when `None`.
    fn count(&self, filter: Option<Filter<TableOf<E>>>) -> RepositoryResult<usize>;

    fn exists(&self, filter: Option<Filter<TableOf<E>>>) -> RepositoryResult<bool>;

    /// Loads one page. The window set on `query` is replaced by `page`.
    fn paginate(
        &self,
        query: ListQuery<TableOf<E>>,
        page: PageRequest,
    ) -> RepositoryResult<Paginated<E>>;
}

pub trait EntityWriter<E: Entity> {
    fn create(&self, new: &E::New) -> RepositoryResult<E>;
    fn create_many(&self, rows: &[E::New]) -> RepositoryResult<usize>;
    fn update(&self, id: E::Id, changes: &E::Changes) -> RepositoryResult<E>;
    fn update_where(
        &self,
        filter: Filter<TableOf<E>>,
        changes: &E::Changes,
    ) -> RepositoryResult<usize>;
    fn delete(&self, id: E::Id) -> RepositoryResult<()>;
    fn delete_where(&self, filter: Filter<TableOf<E>>) -> RepositoryResult<usize>;
}

/// Diesel-backed repository for entity `E`.
pub struct Repository<E> {
    pool: DbPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

impl<E: Entity> EntityReader<E> for Repository<E> {
    fn get_by_id(&self, id: E::Id) -> RepositoryResult<Option<E>> {
        let mut conn = self.conn()?;
        Ok(E::find(&mut conn, id)?)
    }

    fn first(&self, query: ListQuery<TableOf<E>>) -> RepositoryResult<Option<E>> {
        let mut conn = self.conn()?;
        let items = E::load(&mut conn, &query.limit(1))?;
        Ok(items.into_iter().next())
    }

    fn list(&self, query: ListQuery<TableOf<E>>) -> RepositoryResult<Vec<E>> {
        let mut conn = self.conn()?;
        Ok(E::load(&mut conn, &query)?)
    }

    fn count(&self, filter: Option<Filter<TableOf<E>>>) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let total = E::count(&mut conn, filter.as_ref())?;
        Ok(total as usize)
    }

    fn exists(&self, filter: Option<Filter<TableOf<E>>>) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;
        Ok(E::exists(&mut conn, filter.as_ref())?)
    }

    fn paginate(
        &self,
        query: ListQuery<TableOf<E>>,
        page: PageRequest,
    ) -> RepositoryResult<Paginated<E>> {
        let mut conn = self.conn()?;

        let total = E::count(&mut conn, query.filter_ref())? as usize;
        let items = E::load(&mut conn, &query.with_page(page))?;

        log::debug!(
            "Loaded {} page {}/{} ({} of {} rows)",
            E::NAME,
            page.page(),
            page.total_pages(total),
            items.len(),
            total
        );

        Ok(Paginated::new(items, page, total))
    }
}

impl<E: Entity> EntityWriter<E> for Repository<E> {
    fn create(&self, new: &E::New) -> RepositoryResult<E> {
        let mut conn = self.conn()?;
        Ok(E::insert(&mut conn, new)?)
    }

    fn create_many(&self, rows: &[E::New]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        Ok(E::insert_many(&mut conn, rows)?)
    }

    fn update(&self, id: E::Id, changes: &E::Changes) -> RepositoryResult<E> {
        let mut conn = self.conn()?;
        Ok(E::update(&mut conn, id, changes)?)
    }

    fn update_where(
        &self,
        filter: Filter<TableOf<E>>,
        changes: &E::Changes,
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        Ok(E::update_where(&mut conn, &filter, changes)?)
    }

    fn delete(&self, id: E::Id) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        match E::delete(&mut conn, id)? {
            0 => Err(RepositoryError::NotFound),
            _ => Ok(()),
        }
    }

    fn delete_where(&self, filter: Filter<TableOf<E>>) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        Ok(E::delete_where(&mut conn, &filter)?)
    }
}

/// Reads projected onto another type by matching field names.
pub trait ProjectionExt<E>: EntityReader<E>
where
    E: Entity + Serialize,
{
    fn get_by_id_as<P: DeserializeOwned>(&self, id: E::Id) -> RepositoryResult<Option<P>> {
        match self.get_by_id(id)? {
            Some(entity) => Ok(Some(project(&entity)?)),
            None => Ok(None),
        }
    }

    fn list_as<P: DeserializeOwned>(&self, query: ListQuery<TableOf<E>>) -> RepositoryResult<Vec<P>> {
        let items = self.list(query)?;
        Ok(project_all(&items)?)
    }

    fn paginate_as<P: DeserializeOwned>(
        &self,
        query: ListQuery<TableOf<E>>,
        page: PageRequest,
    ) -> RepositoryResult<Paginated<P>> {
        self.paginate(query, page)?
            .try_map(|entity| project(&entity).map_err(RepositoryError::from))
    }
}

impl<E, R> ProjectionExt<E> for R
where
    E: Entity + Serialize,
    R: EntityReader<E> + ?Sized,
{
}
