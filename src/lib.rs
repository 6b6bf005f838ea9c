//! Generic Diesel repository with predicate composition, sorting, pagination
//! and field-name projection.
//!
//! Models register themselves with [`diesel_entity!`] and are then served by
//! [`repository::Repository`]:
//!
//! ```ignore
//! let repo: Repository<Client> = Repository::new(pool);
//! let page = repo.paginate(
//!     ListQuery::new()
//!         .filter(Filter::new(|| clients::hub_id.eq(1)))
//!         .sort(Sort::asc(clients::name)),
//!     PageRequest::new(2, 20),
//! )?;
//! ```

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod projection;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "data")]
pub mod services;
