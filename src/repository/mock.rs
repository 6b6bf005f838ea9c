//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::models::client::{Client, NewClient, UpdateClient};
use crate::pagination::{PageRequest, Paginated};
use crate::repository::errors::RepositoryResult;
use crate::repository::{EntityReader, EntityWriter, Filter, ListQuery};
use crate::schema::clients;

mock! {
    pub ClientRepository {}

    impl EntityReader<Client> for ClientRepository {
        fn get_by_id(&self, id: i32) -> RepositoryResult<Option<Client>>;
        fn first(&self, query: ListQuery<clients::table>) -> RepositoryResult<Option<Client>>;
        fn list(&self, query: ListQuery<clients::table>) -> RepositoryResult<Vec<Client>>;
        fn count(&self, filter: Option<Filter<clients::table>>) -> RepositoryResult<usize>;
        fn exists(&self, filter: Option<Filter<clients::table>>) -> RepositoryResult<bool>;
        fn paginate(
            &self,
            query: ListQuery<clients::table>,
            page: PageRequest,
        ) -> RepositoryResult<Paginated<Client>>;
    }

    impl EntityWriter<Client> for ClientRepository {
        fn create(&self, new: &NewClient) -> RepositoryResult<Client>;
        fn create_many(&self, rows: &[NewClient]) -> RepositoryResult<usize>;
        fn update(&self, id: i32, changes: &UpdateClient) -> RepositoryResult<Client>;
        fn update_where(
            &self,
            filter: Filter<clients::table>,
            changes: &UpdateClient,
        ) -> RepositoryResult<usize>;
        fn delete(&self, id: i32) -> RepositoryResult<()>;
        fn delete_where(&self, filter: Filter<clients::table>) -> RepositoryResult<usize>;
    }
}
