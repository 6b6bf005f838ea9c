use diesel::prelude::*;
use pushkind_repository::dto::client::ClientSummary;
use pushkind_repository::models::client::{Client, NewClient, UpdateClient};
use pushkind_repository::models::manager::{Manager, NewManager, UpdateManager};
use pushkind_repository::pagination::PageRequest;
use pushkind_repository::repository::errors::RepositoryError;
use pushkind_repository::repository::{
    EntityReader, EntityWriter, Filter, ListQuery, ProjectionExt, Repository, Sort,
    SortDirection,
};
use pushkind_repository::schema::clients;
use pushkind_repository::services::clients::{ClientsQuery, list_clients};

mod common;

fn hub(hub_id: i32) -> Filter<clients::table> {
    Filter::new(move || clients::hub_id.eq(hub_id))
}

fn named(name: &'static str) -> Filter<clients::table> {
    Filter::new(move || clients::name.eq(name))
}

fn seed_numbered(repo: &Repository<Client>, hub_id: i32, count: usize) {
    let rows = (1..=count)
        .map(|n| {
            NewClient::new(
                hub_id,
                &format!("Client {n:03}"),
                &format!("client{n}@hub{hub_id}.example.com"),
                None,
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(repo.create_many(&rows).unwrap(), count);
}

#[test]
fn test_client_repository_crud() {
    let test_db = common::TestDb::new("test_client_repository_crud.db");
    let repo: Repository<Client> = Repository::new(test_db.pool());

    let alice = repo
        .create(&NewClient::new(1, "Alice", "alice@example.com", Some("111")))
        .unwrap();
    assert!(alice.id > 0);
    assert_eq!(alice.phone.as_deref(), Some("111"));

    let fetched = repo.get_by_id(alice.id).unwrap().unwrap();
    assert_eq!(fetched, alice);

    let updated = repo
        .update(alice.id, &UpdateClient::new().name("Alicia"))
        .unwrap();
    assert_eq!(updated.name, "Alicia");
    assert_eq!(updated.email, "alice@example.com");
    assert_eq!(repo.get_by_id(alice.id).unwrap().unwrap().name, "Alicia");

    repo.delete(alice.id).unwrap();
    assert!(repo.get_by_id(alice.id).unwrap().is_none());
    assert!(matches!(
        repo.delete(alice.id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_update_missing_row_is_not_found() {
    let test_db = common::TestDb::new("test_update_missing_row.db");
    let repo: Repository<Client> = Repository::new(test_db.pool());

    let result = repo.update(42, &UpdateClient::new().name("Ghost"));
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[test]
fn test_duplicate_key_is_conflict() {
    let test_db = common::TestDb::new("test_duplicate_key_is_conflict.db");
    let repo: Repository<Client> = Repository::new(test_db.pool());

    repo.create(&NewClient::new(1, "Bob", "bob@example.com", None))
        .unwrap();
    let duplicate = repo.create(&NewClient::new(1, "Robert", "BOB@example.com", None));
    assert!(matches!(duplicate, Err(RepositoryError::Conflict(_))));

    // Same email in another hub is allowed.
    repo.create(&NewClient::new(2, "Bob", "bob@example.com", None))
        .unwrap();
    assert_eq!(repo.count(None).unwrap(), 2);
}

#[test]
fn test_count_matches_filtered_cardinality() {
    let test_db = common::TestDb::new("test_count_matches_filtered_cardinality.db");
    let repo: Repository<Client> = Repository::new(test_db.pool());
    seed_numbered(&repo, 1, 7);
    seed_numbered(&repo, 2, 3);

    assert_eq!(repo.count(None).unwrap(), 10);
    assert_eq!(repo.count(Some(hub(1))).unwrap(), 7);

    let listed = repo.list(ListQuery::new().filter(hub(2))).unwrap();
    assert_eq!(listed.len(), repo.count(Some(hub(2))).unwrap());
    assert!(listed.iter().all(|client| client.hub_id == 2));

    assert!(repo.exists(Some(hub(2))).unwrap());
    assert!(!repo.exists(Some(hub(3))).unwrap());
}

#[test]
fn test_pagination_partitions_fixture() {
    let test_db = common::TestDb::new("test_pagination_partitions_fixture.db");
    let repo: Repository<Client> = Repository::new(test_db.pool());
    seed_numbered(&repo, 1, 100);

    let query = ListQuery::new()
        .filter(hub(1))
        .sort(Sort::asc(clients::name));

    let mut seen = Vec::new();
    for page_number in 1..=10 {
        let page = repo
            .paginate(query.clone(), PageRequest::new(page_number, 10))
            .unwrap();
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total_items, 100);
        assert_eq!(page.total_pages, 10);
        assert_eq!(page.has_previous, page_number > 1);
        assert_eq!(page.has_next, page_number < 10);
        seen.extend(page.items.into_iter().map(|client| client.name));
    }

    let expected = (1..=100)
        .map(|n| format!("Client {n:03}"))
        .collect::<Vec<_>>();
    assert_eq!(seen, expected);

    let past_end = repo.paginate(query, PageRequest::new(11, 10)).unwrap();
    assert!(past_end.items.is_empty());
    assert!(!past_end.has_next);
    assert!(past_end.has_previous);
}

#[test]
fn test_pagination_clamps_request() {
    let test_db = common::TestDb::new("test_pagination_clamps_request.db");
    let repo: Repository<Client> = Repository::new(test_db.pool());
    seed_numbered(&repo, 1, 25);

    let page = repo
        .paginate(ListQuery::new(), PageRequest::new(0, 0))
        .unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.per_page, 20);
    assert_eq!(page.items.len(), 20);
    assert_eq!(page.total_pages, 2);
}

#[test]
fn test_pagination_far_past_the_end() {
    let test_db = common::TestDb::new("test_pagination_far_past_the_end.db");
    let repo: Repository<Client> = Repository::new(test_db.pool());
    seed_numbered(&repo, 1, 5);

    let listed = repo
        .list(ListQuery::new().paginate(usize::MAX / 2, 10))
        .unwrap();
    assert!(listed.is_empty());

    let page = repo
        .paginate(ListQuery::new(), PageRequest::new(usize::MAX, 2))
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_items, 5);
    assert_eq!(page.total_pages, 3);
    assert!(!page.has_next);

    let third = repo
        .paginate(ListQuery::new(), PageRequest::new(3, 2))
        .unwrap();
    assert_eq!(third.items.len(), 1);

    let two_past = repo
        .paginate(ListQuery::new(), PageRequest::new(5, 2))
        .unwrap();
    assert!(two_past.items.is_empty());

    let unbounded = repo.list(ListQuery::new().limit(usize::MAX)).unwrap();
    assert_eq!(unbounded.len(), 5);
}

#[test]
fn test_sort_direction_and_first() {
    let test_db = common::TestDb::new("test_sort_direction_and_first.db");
    let repo: Repository<Client> = Repository::new(test_db.pool());
    seed_numbered(&repo, 1, 5);

    let descending = repo
        .list(ListQuery::new().sort(Sort::by(clients::name, SortDirection::Desc)))
        .unwrap();
    let names = descending
        .iter()
        .map(|client| client.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            "Client 005",
            "Client 004",
            "Client 003",
            "Client 002",
            "Client 001"
        ]
    );

    let first = repo
        .first(ListQuery::new().sort(Sort::desc(clients::name)))
        .unwrap()
        .unwrap();
    assert_eq!(first.name, "Client 005");

    let none = repo.first(ListQuery::new().filter(hub(9))).unwrap();
    assert!(none.is_none());

    let limited = repo.list(ListQuery::new().limit(2)).unwrap();
    assert_eq!(limited.len(), 2);

    let first_of_page = repo
        .first(ListQuery::new().sort(Sort::asc(clients::name)).paginate(2, 2))
        .unwrap()
        .unwrap();
    assert_eq!(first_of_page.name, "Client 003");

    let capped = repo
        .list(ListQuery::new().sort(Sort::asc(clients::name)).paginate(1, 4).limit(1))
        .unwrap();
    assert_eq!(capped.len(), 1);
    assert_eq!(capped[0].name, "Client 001");
}

#[test]
fn test_combined_predicates() {
    let test_db = common::TestDb::new("test_combined_predicates.db");
    let repo: Repository<Client> = Repository::new(test_db.pool());
    let rows = [
        NewClient::new(1, "Ann", "ann@example.com", None),
        NewClient::new(1, "Ben", "ben@example.com", None),
        NewClient::new(1, "Cid", "cid@example.com", None),
        NewClient::new(2, "Ann", "ann@example.com", None),
    ];
    repo.create_many(&rows).unwrap();

    let ann_or_ben = named("Ann").or(named("Ben"));
    assert_eq!(repo.count(Some(ann_or_ben.clone())).unwrap(), 3);
    assert_eq!(repo.count(Some(hub(1).and(ann_or_ben))).unwrap(), 2);
    assert_eq!(repo.count(Some(hub(1).not())).unwrap(), 1);

    let any = Filter::any([named("Cid"), hub(2)]).unwrap();
    assert_eq!(repo.count(Some(any)).unwrap(), 2);

    let all = Filter::all([hub(1), named("Ann")]).unwrap();
    let found = repo.list(ListQuery::new().filter(all)).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].hub_id, 1);
}

#[test]
fn test_batch_update_and_delete() {
    let test_db = common::TestDb::new("test_batch_update_and_delete.db");
    let repo: Repository<Client> = Repository::new(test_db.pool());
    seed_numbered(&repo, 1, 4);
    seed_numbered(&repo, 2, 6);

    let changed = repo
        .update_where(hub(2), &UpdateClient::new().phone("555"))
        .unwrap();
    assert_eq!(changed, 6);
    let hub_two = repo.list(ListQuery::new().filter(hub(2))).unwrap();
    assert!(hub_two.iter().all(|c| c.phone.as_deref() == Some("555")));
    let hub_one = repo.list(ListQuery::new().filter(hub(1))).unwrap();
    assert!(hub_one.iter().all(|c| c.phone.is_none()));

    assert_eq!(repo.delete_where(hub(2)).unwrap(), 6);
    assert_eq!(repo.count(None).unwrap(), 4);
    assert_eq!(repo.delete_where(hub(2)).unwrap(), 0);
    assert_eq!(repo.create_many(&[]).unwrap(), 0);
}

#[test]
fn test_projection_reads() {
    let test_db = common::TestDb::new("test_projection_reads.db");
    let repo: Repository<Client> = Repository::new(test_db.pool());
    let dana = repo
        .create(&NewClient::new(1, "Dana", "dana@example.com", Some("777")))
        .unwrap();

    let summary: ClientSummary = repo.get_by_id_as(dana.id).unwrap().unwrap();
    assert_eq!(
        summary,
        ClientSummary {
            id: dana.id,
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            phone: Some("777".to_string()),
        }
    );

    let missing: Option<ClientSummary> = repo.get_by_id_as(dana.id + 1).unwrap();
    assert!(missing.is_none());

    let listed: Vec<ClientSummary> = repo.list_as(ListQuery::new()).unwrap();
    assert_eq!(listed.len(), 1);

    let page = repo
        .paginate_as::<ClientSummary>(ListQuery::new(), PageRequest::new(1, 5))
        .unwrap();
    assert_eq!(page.items[0].name, "Dana");
    assert_eq!(page.total_items, 1);
}

#[test]
fn test_client_service_search() {
    let test_db = common::TestDb::new("test_client_service_search.db");
    let repo: Repository<Client> = Repository::new(test_db.pool());
    let rows = [
        NewClient::new(1, "Zoe", "zoe@example.com", None),
        NewClient::new(1, "Yan", "yan@shop.example.com", None),
        NewClient::new(1, "Xena", "xena@shop.example.com", None),
        NewClient::new(2, "Will", "will@shop.example.com", None),
    ];
    repo.create_many(&rows).unwrap();

    let page = list_clients(
        &repo,
        ClientsQuery {
            hub_id: 1,
            search: Some(" shop ".to_string()),
            per_page: 10,
            ..ClientsQuery::default()
        },
    )
    .unwrap();
    let names = page
        .items
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Xena", "Yan"]);

    let by_name = list_clients(
        &repo,
        ClientsQuery {
            hub_id: 1,
            search: Some("zo".to_string()),
            ..ClientsQuery::default()
        },
    )
    .unwrap();
    assert_eq!(by_name.total_items, 1);
    assert_eq!(by_name.items[0].email, "zoe@example.com");
}

#[test]
fn test_manager_repository_crud() {
    let test_db = common::TestDb::new("test_manager_repository_crud.db");
    let repo: Repository<Manager> = Repository::new(test_db.pool());

    let manager = repo
        .create(&NewManager::new(1, "Manager", "M@Example.com"))
        .unwrap();
    assert_eq!(manager.email, "m@example.com");

    let updated = repo
        .update(
            manager.id,
            &UpdateManager {
                name: "Updated".to_string(),
            },
        )
        .unwrap();
    assert_eq!(updated.id, manager.id);
    assert_eq!(updated.name, "Updated");

    let duplicate = repo.create(&NewManager::new(1, "Other", "m@example.com"));
    assert!(matches!(duplicate, Err(RepositoryError::Conflict(_))));

    assert_eq!(repo.count(None).unwrap(), 1);
    repo.delete(manager.id).unwrap();
    assert!(!repo.exists(None).unwrap());
}
