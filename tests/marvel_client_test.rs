//! MarvelClient tests against an in-process HTTP stub

mod common;

use std::net::SocketAddr;

use common::stub::{Mode, heroes, record, spawn_stub};
use herodex::catalog::auth::Credentials;
use herodex::catalog::{CatalogProvider, CharacterId, DisplayPolicy, MarvelClient};
use herodex::HerodexError;

const PUBLIC_KEY: &str = "test-public";
const PRIVATE_KEY: &str = "test-private";

fn credentials() -> Credentials {
    Credentials::new(PUBLIC_KEY, PRIVATE_KEY)
}

fn client(addr: SocketAddr, policy: DisplayPolicy) -> MarvelClient {
    MarvelClient::new(&format!("http://{addr}/v1/public"), credentials(), policy).unwrap()
}

// ============================================================================
// Signing
// ============================================================================

#[tokio::test]
async fn test_requests_are_signed() {
    let (stub, addr) = spawn_stub(heroes(5)).await;
    client(addr, DisplayPolicy::Strict)
        .fetch_page(5, 0)
        .await
        .unwrap();

    let queries = stub.queries.lock().clone();
    assert_eq!(queries.len(), 1);
    let query = &queries[0];
    let ts = query.get("ts").expect("ts sent");
    assert_eq!(query.get("apikey").map(String::as_str), Some(PUBLIC_KEY));
    assert_eq!(query.get("hash"), Some(&credentials().sign(ts).hash));
    assert!(!query.values().any(|v| v == PRIVATE_KEY));
}

// ============================================================================
// Page windows
// ============================================================================

#[tokio::test]
async fn test_fetch_page_decodes_records() {
    let (_stub, addr) = spawn_stub(heroes(25)).await;
    let page = client(addr, DisplayPolicy::Strict)
        .fetch_page(10, 0)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total, 25);
    assert_eq!(page.items[0].name, "Hero 1");
    assert_eq!(page.items[0].comics.available, 2);
    assert_eq!(page.items[0].urls[0].kind, "detail");
    assert!(page.items[0].thumbnail_url().is_some());
}

#[tokio::test]
async fn test_fetch_page_over_fetches_past_filtered_records() {
    // Odd ids have art, even ids do not
    let records = (1..=30)
        .map(|id| record(id, &format!("Hero {id}"), id % 2 == 1))
        .collect();
    let (stub, addr) = spawn_stub(records).await;
    let page = client(addr, DisplayPolicy::Strict)
        .with_batch_size(10)
        .fetch_page(10, 0)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 10);
    assert!(page.items.iter().all(|c| c.id.0 % 2 == 1));
    assert_eq!(page.next_offset, 20);
    assert!(!page.exhausted);

    let offsets: Vec<String> = stub
        .queries
        .lock()
        .iter()
        .map(|q| q["offset"].clone())
        .collect();
    assert_eq!(offsets, vec!["0", "10"]);
    assert!(stub.queries.lock().iter().all(|q| q["limit"] == "10"));
}

#[tokio::test]
async fn test_last_window_is_exhausted() {
    let (_stub, addr) = spawn_stub(heroes(25)).await;
    let page = client(addr, DisplayPolicy::Strict)
        .fetch_page(10, 20)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 5);
    assert_eq!(page.next_offset, 25);
    assert!(page.exhausted);
}

#[tokio::test]
async fn test_window_past_the_end_is_empty() {
    let (_stub, addr) = spawn_stub(heroes(5)).await;
    let page = client(addr, DisplayPolicy::Strict)
        .fetch_page(10, 40)
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert!(page.exhausted);
}

#[tokio::test]
async fn test_any_policy_keeps_unusable_art() {
    let records = (1..=4)
        .map(|id| record(id, &format!("Hero {id}"), false))
        .collect();
    let (stub, addr) = spawn_stub(records).await;
    let page = client(addr, DisplayPolicy::Any)
        .fetch_page(3, 0)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 3);
    assert_eq!(stub.queries.lock()[0]["limit"], "3");
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_search_uses_name_prefix_only() {
    let mut records = heroes(3);
    records.push(record(1009351, "Hulk", true));
    records.push(record(1009352, "Hulkling", false));
    let (stub, addr) = spawn_stub(records).await;

    let results = client(addr, DisplayPolicy::Strict)
        .search_by_name_prefix("  Hulk ")
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, CharacterId(1009351));
    let query = stub.queries.lock()[0].clone();
    assert_eq!(query["nameStartsWith"], "Hulk");
    assert!(!query.contains_key("offset"));
}

#[tokio::test]
async fn test_search_is_capped() {
    let (_stub, addr) = spawn_stub(heroes(20)).await;
    let results = client(addr, DisplayPolicy::Strict)
        .with_search_limit(4)
        .search_by_name_prefix("Hero")
        .await
        .unwrap();
    assert_eq!(results.len(), 4);
}

#[tokio::test]
async fn test_blank_search_sends_nothing() {
    let (stub, addr) = spawn_stub(heroes(3)).await;
    let results = client(addr, DisplayPolicy::Strict)
        .search_by_name_prefix("   ")
        .await
        .unwrap();
    assert!(results.is_empty());
    assert!(stub.queries.lock().is_empty());
}

// ============================================================================
// Single character
// ============================================================================

#[tokio::test]
async fn test_fetch_character() {
    let (_stub, addr) = spawn_stub(heroes(3)).await;
    let character = client(addr, DisplayPolicy::Strict)
        .fetch_character(CharacterId(2))
        .await
        .unwrap();
    assert_eq!(character.name, "Hero 2");
    assert_eq!(character.modified.as_deref(), Some("2014-04-29T14:18:17-0400"));
}

#[tokio::test]
async fn test_fetch_missing_character() {
    let (_stub, addr) = spawn_stub(heroes(3)).await;
    let result = client(addr, DisplayPolicy::Strict)
        .fetch_character(CharacterId(99))
        .await;
    assert!(matches!(result, Err(HerodexError::CharacterNotFound(99))));
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_server_error_is_reported() {
    let (stub, addr) = spawn_stub(heroes(3)).await;
    *stub.mode.lock() = Mode::ServerError;

    let result = client(addr, DisplayPolicy::Strict).fetch_page(10, 0).await;
    match result {
        Err(HerodexError::Api(message)) => {
            assert!(message.contains("500"));
            assert!(message.contains("Something broke"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_carries_retry_after() {
    let (stub, addr) = spawn_stub(heroes(3)).await;
    *stub.mode.lock() = Mode::RateLimited;

    let result = client(addr, DisplayPolicy::Strict)
        .search_by_name_prefix("Hero")
        .await;
    assert!(matches!(result, Err(HerodexError::RateLimited(30))));
}

#[tokio::test]
async fn test_unreachable_catalog_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = client(addr, DisplayPolicy::Strict).fetch_page(10, 0).await;
    assert!(matches!(result, Err(HerodexError::Http(_))));
}
