//! Listing, filtering, searching, and sorting over the customer service.

use customer_registry_core::CustomerStatus;
use customer_registry_integration_tests::{connected_service, draft};
use customer_registry_service::store::{SortKey, SortOrder};
use customer_registry_service::{CustomerDraft, ListOptions};

#[tokio::test]
async fn test_list_paginates_fifteen_records() {
    let service = connected_service().await;
    for i in 0..15 {
        let resp = service
            .create(&draft("Customer", "Number", &format!("customer{i}@test.com")))
            .await;
        assert!(resp.is_success());
    }

    let page_one = service.list(&ListOptions::default()).await;
    assert!(page_one.is_success());
    assert_eq!(page_one.message.as_deref(), Some("Retrieved 10 customers"));
    let pagination = page_one.pagination.expect("pagination block");
    assert_eq!(pagination.current_page, 1);
    assert_eq!(pagination.total_pages, 2);
    assert_eq!(pagination.total_count, 15);
    assert!(pagination.has_next_page);
    assert!(!pagination.has_prev_page);

    let page_two = service
        .list(&ListOptions {
            page: 2,
            ..ListOptions::default()
        })
        .await;
    assert_eq!(page_two.message.as_deref(), Some("Retrieved 5 customers"));
    assert_eq!(page_two.data.as_ref().map(Vec::len), Some(5));
    let pagination = page_two.pagination.expect("pagination block");
    assert_eq!(pagination.current_page, 2);
    assert_eq!(pagination.total_pages, 2);
    assert!(!pagination.has_next_page);
    assert!(pagination.has_prev_page);
}

#[tokio::test]
async fn test_list_clamps_page_and_limit() {
    let service = connected_service().await;
    service
        .create(&draft("John", "Doe", "john@test.com"))
        .await
        .into_data()
        .expect("created customer");

    let resp = service
        .list(&ListOptions {
            page: 0,
            limit: 0,
            ..ListOptions::default()
        })
        .await;
    assert!(resp.is_success());
    let pagination = resp.pagination.expect("pagination block");
    assert_eq!(pagination.current_page, 1);
    assert_eq!(pagination.total_count, 1);
}

#[tokio::test]
async fn test_list_filters_by_status() {
    let service = connected_service().await;
    service
        .create(&draft("Active", "One", "active@test.com"))
        .await
        .into_data()
        .expect("created customer");
    let parked = service
        .create(&draft("Parked", "Two", "parked@test.com"))
        .await
        .into_data()
        .expect("created customer");
    service
        .update(
            &parked.id.to_string(),
            &CustomerDraft {
                status: Some("suspended".to_owned()),
                ..CustomerDraft::default()
            },
        )
        .await
        .into_data()
        .expect("updated customer");

    let resp = service
        .list(&ListOptions {
            status: Some(CustomerStatus::Suspended),
            ..ListOptions::default()
        })
        .await;
    let customers = resp.data.expect("customer page");
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].status, CustomerStatus::Suspended);
    assert_eq!(resp.pagination.expect("pagination block").total_count, 1);
}

#[tokio::test]
async fn test_sort_by_first_name_both_directions() {
    let service = connected_service().await;
    for (first, email) in [
        ("Charlie", "charlie@test.com"),
        ("Alice", "alice@test.com"),
        ("Bob", "bob@test.com"),
    ] {
        service
            .create(&draft(first, "Doe", email))
            .await
            .into_data()
            .expect("created customer");
    }

    let asc = service
        .list(&ListOptions {
            sort_by: SortKey::FirstName,
            sort_order: SortOrder::Asc,
            ..ListOptions::default()
        })
        .await
        .into_data()
        .expect("customer page");
    let names: Vec<&str> = asc.iter().map(|c| c.first_name.as_str()).collect();
    assert_eq!(names, ["Alice", "Bob", "Charlie"]);

    let desc = service
        .list(&ListOptions {
            sort_by: SortKey::FirstName,
            sort_order: SortOrder::Desc,
            ..ListOptions::default()
        })
        .await
        .into_data()
        .expect("customer page");
    let names: Vec<&str> = desc.iter().map(|c| c.first_name.as_str()).collect();
    assert_eq!(names, ["Charlie", "Bob", "Alice"]);
}

#[tokio::test]
async fn test_search_matches_names_and_email() {
    let service = connected_service().await;
    for (first, last, email) in [
        ("Johnny", "Walker", "jw@test.com"),
        ("Alice", "Smith", "a@johnsmith.com"),
        ("Bob", "Brown", "bob@test.com"),
    ] {
        service
            .create(&draft(first, last, email))
            .await
            .into_data()
            .expect("created customer");
    }

    let resp = service.search("john", &ListOptions::default()).await;
    assert!(resp.is_success());
    let hits = resp.data.expect("search page");
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|c| c.first_name != "Bob"));

    // search is case-insensitive
    let resp = service.search("JOHN", &ListOptions::default()).await;
    assert_eq!(resp.data.map(|page| page.len()), Some(2));
}

#[tokio::test]
async fn test_search_rejects_blank_term() {
    let service = connected_service().await;

    let resp = service.search("   ", &ListOptions::default()).await;
    let error = resp.error.expect("failure body");
    assert_eq!(error.code, "VALIDATION_ERROR");
    let details = error.details.expect("field details");
    assert_eq!(details[0].message, "Search term is required");
}

#[tokio::test]
async fn test_list_by_status_messages() {
    let service = connected_service().await;
    let customer = service
        .create(&draft("Parked", "One", "parked@test.com"))
        .await
        .into_data()
        .expect("created customer");
    service
        .update(
            &customer.id.to_string(),
            &CustomerDraft {
                status: Some("suspended".to_owned()),
                ..CustomerDraft::default()
            },
        )
        .await
        .into_data()
        .expect("updated customer");

    let resp = service.list_by_status("suspended", &ListOptions::default()).await;
    assert!(resp.is_success());
    assert_eq!(resp.message.as_deref(), Some("Retrieved 1 suspended customers"));
    assert_eq!(resp.data.map(|page| page.len()), Some(1));

    let empty = service.list_by_status("inactive", &ListOptions::default()).await;
    assert_eq!(empty.message.as_deref(), Some("Retrieved 0 inactive customers"));
}

#[tokio::test]
async fn test_list_by_status_rejects_unknown_status() {
    let service = connected_service().await;

    let resp = service.list_by_status("archived", &ListOptions::default()).await;
    let error = resp.error.expect("failure body");
    assert_eq!(error.code, "VALIDATION_ERROR");
    let details = error.details.expect("field details");
    assert_eq!(
        details[0].message,
        "Invalid status. Must be one of: active, inactive, suspended"
    );
}
