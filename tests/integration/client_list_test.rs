//! Rows returned by `ClientRepository::list` and `find_by_id`.

use rust_decimal::Decimal;

use billhub_core::types::{ClientId, CompanyId};
use billhub_database::ClientListParams;
use billhub_database::repositories::ClientRepository;
use billhub_entity::client::RecordStatus;

use crate::helpers::{Seeded, TestDb};

fn params() -> ClientListParams {
    ClientListParams {
        per_page: Some(100),
        ..ClientListParams::default()
    }
}

async fn names(repo: &ClientRepository, company: CompanyId, params: &ClientListParams) -> Vec<String> {
    let page = repo.list(company, params).await.expect("list clients");
    page.items
        .into_iter()
        .map(|row| row.name.unwrap_or_default())
        .collect()
}

#[tokio::test]
async fn test_status_combinations_select_matching_rows() {
    let Some(db) = TestDb::connect().await else {
        return;
    };
    let company = db.company(Some(1), Some(840)).await;
    db.client(company, "active", Decimal::ZERO, Seeded::Active).await;
    db.client(company, "archived", Decimal::ZERO, Seeded::Archived).await;
    db.client(company, "deleted", Decimal::ZERO, Seeded::Deleted).await;
    let repo = db.repository();

    let cases: [(&str, &[&str]); 9] = [
        ("active", &["active"]),
        ("archived", &["archived"]),
        ("deleted", &["deleted"]),
        ("active,deleted", &["active", "deleted"]),
        ("active,archived", &["active", "archived"]),
        ("archived,deleted", &["archived", "deleted"]),
        ("active,archived,deleted", &["active", "archived", "deleted"]),
        ("bogus", &[]),
        ("", &["active", "archived", "deleted"]),
    ];
    for (status, expected) in cases {
        let params = ClientListParams {
            status: Some(status.to_string()),
            ..params()
        };
        assert_eq!(names(&repo, company, &params).await, expected, "status {status:?}");
    }
}

#[tokio::test]
async fn test_listed_rows_classify_as_their_seeded_status() {
    let Some(db) = TestDb::connect().await else {
        return;
    };
    let company = db.company(None, None).await;
    db.client(company, "a", Decimal::ZERO, Seeded::Active).await;
    db.client(company, "b", Decimal::ZERO, Seeded::Archived).await;
    db.client(company, "c", Decimal::ZERO, Seeded::Deleted).await;

    let page = db.repository().list(company, &params()).await.expect("list clients");
    let statuses: Vec<RecordStatus> = page.items.iter().map(|row| row.status()).collect();
    assert_eq!(
        statuses,
        [RecordStatus::Active, RecordStatus::Archived, RecordStatus::Deleted]
    );
}

#[tokio::test]
async fn test_listing_is_scoped_to_tenant_and_live_primary_contact() {
    let Some(db) = TestDb::connect().await else {
        return;
    };
    let company = db.company(None, None).await;
    let other = db.company(None, None).await;

    db.client(company, "mine", Decimal::ZERO, Seeded::Active).await;
    db.client(other, "theirs", Decimal::ZERO, Seeded::Active).await;

    let secondary_only = db
        .bare_client(company, "secondary only", Decimal::ZERO, Seeded::Active)
        .await;
    db.contact(company, secondary_only, Some("Sam"), None, false, false)
        .await;

    let lapsed = db
        .bare_client(company, "lapsed primary", Decimal::ZERO, Seeded::Active)
        .await;
    db.contact(company, lapsed, Some("Old"), None, true, true).await;

    let replaced = db
        .bare_client(company, "replaced primary", Decimal::ZERO, Seeded::Active)
        .await;
    db.contact(company, replaced, Some("Old"), None, true, true).await;
    db.contact(company, replaced, Some("New"), None, true, false).await;

    let repo = db.repository();
    assert_eq!(
        names(&repo, company, &params()).await,
        ["mine", "replaced primary"]
    );

    let page = repo.list(company, &params()).await.expect("list clients");
    assert_eq!(page.total_items, 2);
    let replaced_row = page
        .items
        .iter()
        .find(|row| row.id == replaced)
        .expect("replaced primary listed");
    assert_eq!(replaced_row.first_name.as_deref(), Some("New"));
}

#[tokio::test]
async fn test_find_by_id_decodes_projection() {
    let Some(db) = TestDb::connect().await else {
        return;
    };
    let company = db.company(Some(978), Some(250)).await;
    let client = db
        .bare_client(company, "Analytical Engines", Decimal::new(123_456, 2), Seeded::Active)
        .await;
    db.set_client_country(client, 826).await;
    db.contact(company, client, Some("Ada"), None, true, false).await;

    let repo = db.repository();
    let row = repo
        .find_by_id(company, client)
        .await
        .expect("find client")
        .expect("client row");

    assert_eq!(row.id, client);
    assert_eq!(row.currency_id, Some(978));
    assert_eq!(row.country_id, Some(826));
    assert_eq!(row.contact, "Ada ");
    assert_eq!(row.balance, Decimal::new(123_456, 2));
    assert_eq!(row.id_number.as_deref(), Some("ID-Analytical Engines"));
    assert_eq!(row.email.as_deref(), Some("ada@example.com"));
    assert_eq!(row.created_at, row.client_created_at);
    assert_eq!(row.status(), RecordStatus::Active);
    assert_eq!(row.display_name(), "Analytical Engines");

    let other = db.company(None, None).await;
    assert!(repo.find_by_id(other, client).await.expect("find client").is_none());
    assert!(
        repo.find_by_id(company, ClientId(i64::MAX))
            .await
            .expect("find client")
            .is_none()
    );
}

#[tokio::test]
async fn test_search_matches_like_metacharacters_literally() {
    let Some(db) = TestDb::connect().await else {
        return;
    };
    let company = db.company(None, None).await;
    db.client(company, "50% off", Decimal::ZERO, Seeded::Active).await;
    db.client(company, "500 offers", Decimal::ZERO, Seeded::Active).await;
    db.client(company, "a_b", Decimal::ZERO, Seeded::Active).await;
    db.client(company, "axb", Decimal::ZERO, Seeded::Active).await;
    let repo = db.repository();

    for (filter, expected) in [("50%", "50% off"), ("a_b", "a_b"), ("50% OFF", "50% off")] {
        let params = ClientListParams {
            filter: Some(filter.to_string()),
            ..params()
        };
        assert_eq!(names(&repo, company, &params).await, [expected], "filter {filter:?}");
    }
}

#[tokio::test]
async fn test_balance_filters_and_pagination() {
    let Some(db) = TestDb::connect().await else {
        return;
    };
    let company = db.company(None, None).await;
    for (name, cents) in [("a", 500), ("b", 1_000), ("c", 5_000), ("d", 7_000), ("e", 12_000)] {
        db.client(company, name, Decimal::new(cents, 2), Seeded::Active).await;
    }
    let repo = db.repository();

    let over_ten = ClientListParams {
        balance: Some("gt:10".to_string()),
        ..params()
    };
    assert_eq!(names(&repo, company, &over_ten).await, ["c", "d", "e"]);

    let ranged = ClientListParams {
        between_balance: Some("10:70".to_string()),
        sort: Some("balance|desc".to_string()),
        ..params()
    };
    assert_eq!(names(&repo, company, &ranged).await, ["d", "c", "b"]);

    let second_page = ClientListParams {
        page: Some(2),
        per_page: Some(2),
        ..ClientListParams::default()
    };
    let page = repo.list(company, &second_page).await.expect("list clients");
    assert_eq!(page.total_items, 5);
    assert_eq!(page.total_pages, 3);
    assert!(page.has_next && page.has_previous);
    let listed: Vec<_> = page.items.iter().map(|row| row.name.as_deref()).collect();
    assert_eq!(listed, [Some("c"), Some("d")]);
}
