//! The contract between a Diesel model and [`crate::repository::Repository`].

use diesel::QueryResult;
use diesel::sqlite::SqliteConnection;

use crate::repository::filter::Filter;
use crate::repository::query::ListQuery;

/// A mapped table row.
///
/// Every method forwards straight to Diesel's query builder for the entity's
/// table. Implementations are normally generated with [`diesel_entity!`].
///
/// [`diesel_entity!`]: crate::diesel_entity
pub trait Entity: Sized + Send + 'static {
    /// Diesel table the entity is stored in.
    type Table: 'static;
    /// Primary key value.
    type Id: Copy + Send + std::fmt::Debug + 'static;
    /// Insertable form.
    type New: Send;
    /// Changeset used by updates.
    type Changes: Send;

    /// Human readable name used in log lines.
    const NAME: &'static str;

    fn load(conn: &mut SqliteConnection, query: &ListQuery<Self::Table>) -> QueryResult<Vec<Self>>;

    fn count(conn: &mut SqliteConnection, filter: Option<&Filter<Self::Table>>)
    -> QueryResult<i64>;

    /// Whether at least one row matches, reading no more than one key.
    fn exists(conn: &mut SqliteConnection, filter: Option<&Filter<Self::Table>>)
    -> QueryResult<bool>;

    fn find(conn: &mut SqliteConnection, id: Self::Id) -> QueryResult<Option<Self>>;

    fn insert(conn: &mut SqliteConnection, new: &Self::New) -> QueryResult<Self>;

    fn insert_many(conn: &mut SqliteConnection, rows: &[Self::New]) -> QueryResult<usize>;

    fn update(conn: &mut SqliteConnection, id: Self::Id, changes: &Self::Changes)
    -> QueryResult<Self>;

    fn update_where(
        conn: &mut SqliteConnection,
        filter: &Filter<Self::Table>,
        changes: &Self::Changes,
    ) -> QueryResult<usize>;

    fn delete(conn: &mut SqliteConnection, id: Self::Id) -> QueryResult<usize>;

    fn delete_where(conn: &mut SqliteConnection, filter: &Filter<Self::Table>)
    -> QueryResult<usize>;
}

/// Implements [`Entity`] for a `Queryable` model.
///
/// ```ignore
/// diesel_entity! {
///     Client {
///         table: clients,
///         primary_key: id => i32,
///         new: NewClient,
///         changes: UpdateClient,
///     }
/// }
/// ```
///
/// `table` must name a Diesel `table!` module that is in scope at the call
/// site. Rows are ordered by the query's sort keys and then by the primary
/// key ascending.
#[macro_export]
macro_rules! diesel_entity {
    (
        $entity:ident {
            table: $table:ident,
            primary_key: $pk:ident => $id:ty,
            new: $new:ty,
            changes: $changes:ty $(,)?
        }
    ) => {
        impl $crate::repository::Entity for $entity {
            type Table = $table::table;
            type Id = $id;
            type New = $new;
            type Changes = $changes;

            const NAME: &'static str = stringify!($table);

            fn load(
                conn: &mut ::diesel::sqlite::SqliteConnection,
                query: &$crate::repository::ListQuery<$table::table>,
            ) -> ::diesel::QueryResult<Vec<Self>> {
                use ::diesel::prelude::*;

                let mut items = $table::table.into_boxed::<::diesel::sqlite::Sqlite>();
                if let Some(filter) = query.filter_ref() {
                    items = items.filter(filter.build());
                }
                for order in query.sort_ref().build() {
                    items = items.then_order_by(order);
                }
                items = items.then_order_by($table::$pk.asc());
                if let Some((limit, offset)) = query.window() {
                    items = items.limit(limit).offset(offset);
                }
                items.load::<$entity>(conn)
            }

            fn count(
                conn: &mut ::diesel::sqlite::SqliteConnection,
                filter: Option<&$crate::repository::Filter<$table::table>>,
            ) -> ::diesel::QueryResult<i64> {
                use ::diesel::prelude::*;

                let mut items = $table::table.into_boxed::<::diesel::sqlite::Sqlite>();
                if let Some(filter) = filter {
                    items = items.filter(filter.build());
                }
                items.count().get_result::<i64>(conn)
            }

            fn exists(
                conn: &mut ::diesel::sqlite::SqliteConnection,
                filter: Option<&$crate::repository::Filter<$table::table>>,
            ) -> ::diesel::QueryResult<bool> {
                use ::diesel::prelude::*;

                let mut items = $table::table
                    .select($table::$pk)
                    .into_boxed::<::diesel::sqlite::Sqlite>();
                if let Some(filter) = filter {
                    items = items.filter(filter.build());
                }
                let found = items.first::<$id>(conn).optional()?;
                Ok(found.is_some())
            }

            fn find(
                conn: &mut ::diesel::sqlite::SqliteConnection,
                id: $id,
            ) -> ::diesel::QueryResult<Option<Self>> {
                use ::diesel::prelude::*;

                $table::table
                    .find(id)
                    .first::<$entity>(conn)
                    .optional()
            }

            fn insert(
                conn: &mut ::diesel::sqlite::SqliteConnection,
                new: &$new,
            ) -> ::diesel::QueryResult<Self> {
                use ::diesel::prelude::*;

                ::diesel::insert_into($table::table)
                    .values(new)
                    .get_result::<$entity>(conn)
            }

            fn insert_many(
                conn: &mut ::diesel::sqlite::SqliteConnection,
                rows: &[$new],
            ) -> ::diesel::QueryResult<usize> {
                use ::diesel::prelude::*;

                if rows.is_empty() {
                    return Ok(0);
                }
                ::diesel::insert_into($table::table)
                    .values(rows)
                    .execute(conn)
            }

            fn update(
                conn: &mut ::diesel::sqlite::SqliteConnection,
                id: $id,
                changes: &$changes,
            ) -> ::diesel::QueryResult<Self> {
                use ::diesel::prelude::*;

                ::diesel::update($table::table.find(id))
                    .set(changes)
                    .get_result::<$entity>(conn)
            }

            fn update_where(
                conn: &mut ::diesel::sqlite::SqliteConnection,
                filter: &$crate::repository::Filter<$table::table>,
                changes: &$changes,
            ) -> ::diesel::QueryResult<usize> {
                use ::diesel::prelude::*;

                ::diesel::update($table::table.filter(filter.build()))
                    .set(changes)
                    .execute(conn)
            }

            fn delete(
                conn: &mut ::diesel::sqlite::SqliteConnection,
                id: $id,
            ) -> ::diesel::QueryResult<usize> {
                use ::diesel::prelude::*;

                ::diesel::delete($table::table.find(id)).execute(conn)
            }

            fn delete_where(
                conn: &mut ::diesel::sqlite::SqliteConnection,
                filter: &$crate::repository::Filter<$table::table>,
            ) -> ::diesel::QueryResult<usize> {
                use ::diesel::prelude::*;

                ::diesel::delete($table::table.filter(filter.build())).execute(conn)
            }
        }
    };
}
