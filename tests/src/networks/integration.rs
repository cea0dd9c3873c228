#![cfg(test)]
use bamctl_common::error::{BamError, ErrorKind};
use bamctl_common::network::model::{Network, ReconciliationResult, ReconciliationStatus};
use bamctl_core::BamApi;

use crate::support::{self, FakeCatalog};

const BLOCKS: &str = "10.0.0.0/8 192.0.2.0/23";

fn catalog_with_blocks() -> FakeCatalog {
    let fake = FakeCatalog::seeded();
    fake.add_block("10.0.0.0/8", 1);
    fake.add_block("192.0.2.0/23", 7);
    fake
}

#[tokio::test]
async fn test_create_then_repeat_is_idempotent() {
    let fake = catalog_with_blocks();
    let api: BamApi = support::connect(&fake, BLOCKS).await;

    let first: ReconciliationResult = api.networks().create("192.0.2.0/24", true).await.unwrap();
    assert_eq!(first.status, ReconciliationStatus::Created);
    assert_eq!(first.block_id, Some(7));
    assert_eq!(first.network.range.to_string(), "192.0.2.0/24");

    let second: ReconciliationResult = api.networks().create("192.0.2.0/24", true).await.unwrap();
    assert_eq!(second.status, ReconciliationStatus::AlreadyExists);
    assert_eq!(second.network.id, first.network.id);
    assert_eq!(second.block_id, Some(7));

    assert_eq!(fake.count_calls("POST blocks/"), 1);
    assert!(fake.calls().contains(&"GET blocks 192.0.2.0/23".to_string()));
}

#[tokio::test]
async fn test_create_canonicalizes_host_bits() {
    let fake = catalog_with_blocks();
    let api: BamApi = support::connect(&fake, BLOCKS).await;

    let result = api.networks().create("10.20.30.40/16", true).await.unwrap();
    assert!(result.created());
    assert_eq!(result.network.range.to_string(), "10.20.0.0/16");
    assert_eq!(result.block_id, Some(1));
}

#[tokio::test]
async fn test_existing_network_without_exist_ok_is_conflict() {
    let fake = catalog_with_blocks();
    fake.add_network("192.0.2.0/24", 42, 7);
    let api: BamApi = support::connect(&fake, BLOCKS).await;

    let err: BamError = api.networks().create("192.0.2.0/24", false).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(fake.count_calls("POST blocks/"), 0);
}

#[tokio::test]
async fn test_existing_network_degrades_when_detail_fails() {
    let fake = catalog_with_blocks();
    fake.add_network("192.0.2.0/24", 42, 7);
    fake.state().fail_network_detail = true;
    let api: BamApi = support::connect(&fake, BLOCKS).await;

    let result = api.networks().create("192.0.2.0/24", true).await.unwrap();
    assert_eq!(result.status, ReconciliationStatus::AlreadyExists);
    assert_eq!(result.network.id, 42);
    assert_eq!(result.network.name, None);
    assert_eq!(result.block_id, Some(7));
}

#[tokio::test]
async fn test_create_without_blocks_is_validation() {
    let fake = catalog_with_blocks();
    let api: BamApi = support::connect(&fake, "").await;

    let err: BamError = api.networks().create("192.0.2.0/24", true).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("BAM_BLOCKS"));
}

#[tokio::test]
async fn test_create_outside_every_block_fails_before_block_lookup() {
    let fake = catalog_with_blocks();
    let api: BamApi = support::connect(&fake, "10.0.0.0/8").await;

    let err: BamError = api.networks().create("203.0.113.0/24", true).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("203.0.113.0/24"));
    assert_eq!(fake.count_calls("GET blocks"), 0);
}

#[tokio::test]
async fn test_selected_block_missing_in_catalog() {
    let fake = FakeCatalog::seeded();
    let api: BamApi = support::connect(&fake, BLOCKS).await;

    let err: BamError = api.networks().create("192.0.2.0/24", true).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(fake.count_calls("POST blocks/"), 0);
}

#[tokio::test]
async fn test_get_network_details() {
    let fake = catalog_with_blocks();
    fake.add_network("192.0.2.0/24", 42, 7);
    let api: BamApi = support::connect(&fake, BLOCKS).await;

    let network: Network = api.networks().get("192.0.2.77/24").await.unwrap().unwrap();
    assert_eq!(network.id, 42);
    assert_eq!(network.name.as_deref(), Some("net-42"));
    assert_eq!(network.usage_counter("unassigned"), Some(254));

    assert!(api.networks().get("198.51.100.0/24").await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_network() {
    let fake = catalog_with_blocks();
    fake.add_network("192.0.2.0/24", 42, 7);
    let api: BamApi = support::connect(&fake, BLOCKS).await;

    assert!(api.networks().delete("192.0.2.0/24", false).await.unwrap());
    assert!(!api.networks().delete("192.0.2.0/24", true).await.unwrap());

    let err: BamError = api.networks().delete("192.0.2.0/24", false).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(fake.count_calls("DELETE networks/42"), 1);
}

#[tokio::test]
async fn test_invalid_cidr_is_validation() {
    let fake = catalog_with_blocks();
    let api: BamApi = support::connect(&fake, BLOCKS).await;

    let err: BamError = api.networks().get("192.0.2.300/24").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_connect_validates_before_login() {
    let fake = FakeCatalog::seeded();
    let mut settings = support::settings("");
    settings.password.clear();

    let err: BamError = BamApi::connect(settings, Box::new(fake.clone())).await.err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn test_connect_unknown_configuration() {
    let fake = FakeCatalog::seeded();
    let mut settings = support::settings("");
    settings.configuration = "lab".to_string();

    let err: BamError = BamApi::connect(settings, Box::new(fake.clone())).await.err().unwrap();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "Configuration 'lab' not found");
}

#[tokio::test]
async fn test_close_logs_out() {
    let fake = FakeCatalog::seeded();
    let api: BamApi = support::connect(&fake, "").await;
    api.close().await;
    assert_eq!(fake.calls().last().map(String::as_str), Some("LOGOUT"));
}
