use diesel::prelude::*;
use validator::Validate;

use crate::dto::client::ClientSummary;
use crate::models::client::{Client, NewClient};
use crate::pagination::{PageRequest, Paginated};
use crate::repository::{
    EntityReader, EntityWriter, Filter, ListQuery, ProjectionExt, Sort, SortDirection,
};
use crate::schema::clients;
use crate::services::{ServiceError, ServiceResult};

/// Parameters accepted by [`list_clients`].
#[derive(Debug, Clone, Default)]
pub struct ClientsQuery {
    pub hub_id: i32,
    /// Optional free-form search matched against name and email.
    pub search: Option<String>,
    pub page: Option<usize>,
    pub per_page: usize,
    /// Name ordering; ascending when omitted.
    pub direction: Option<SortDirection>,
}

/// Clients of one hub whose name or email contains `term`.
pub fn hub_filter(hub_id: i32, term: Option<&str>) -> Filter<clients::table> {
    let hub = Filter::new(move || clients::hub_id.eq(hub_id));

    let term = term.map(str::trim).filter(|s| !s.is_empty());
    match term {
        Some(term) => {
            let pattern = format!("%{term}%");
            let by_email = pattern.clone();
            let name = Filter::new(move || clients::name.like(pattern.clone()));
            let email = Filter::new(move || clients::email.like(by_email.clone()));
            hub.and(name.or(email))
        }
        None => hub,
    }
}

/// Returns one page of client summaries.
pub fn list_clients<R>(repo: &R, params: ClientsQuery) -> ServiceResult<Paginated<ClientSummary>>
where
    R: EntityReader<Client> + ?Sized,
{
    let query = ListQuery::new()
        .filter(hub_filter(params.hub_id, params.search.as_deref()))
        .sort(Sort::by(clients::name, params.direction.unwrap_or_default()));

    let page = PageRequest::new(params.page.unwrap_or(1), params.per_page);

    let clients = ProjectionExt::<Client>::paginate_as(repo, query, page).map_err(|err| {
        log::error!("Failed to list clients: {err}");
        ServiceError::from(err)
    })?;

    Ok(clients)
}

/// Loads a single client scoped to a hub.
pub fn show_client<R>(repo: &R, hub_id: i32, client_id: i32) -> ServiceResult<Client>
where
    R: EntityReader<Client> + ?Sized,
{
    match repo.get_by_id(client_id)? {
        Some(client) if client.hub_id == hub_id => Ok(client),
        _ => Err(ServiceError::NotFound),
    }
}

/// Validates and persists a new client.
pub fn add_client<R>(repo: &R, new_client: NewClient) -> ServiceResult<Client>
where
    R: EntityWriter<Client> + ?Sized,
{
    if let Err(err) = new_client.validate() {
        log::error!("Failed to validate client: {err}");
        return Err(ServiceError::Form(err.to_string()));
    }

    repo.create(&new_client).map_err(|err| {
        log::error!("Failed to add a client: {err}");
        ServiceError::from(err)
    })
}

/// Validates every row before inserting them in one batch.
pub fn import_clients<R>(repo: &R, new_clients: &[NewClient]) -> ServiceResult<usize>
where
    R: EntityWriter<Client> + ?Sized,
{
    for client in new_clients {
        if let Err(err) = client.validate() {
            log::error!("Rejected client {}: {err}", client.email);
            return Err(ServiceError::Form(err.to_string()));
        }
    }

    Ok(repo.create_many(new_clients)?)
}
