#![cfg(test)]
use bamctl_common::config::Settings;
use bamctl_common::dns::name::OwnerName;
use bamctl_common::dns::record::RecordKind;
use bamctl_common::error::{BamError, ErrorKind};
use bamctl_common::network::range;
use bamctl_core::BamApi;
use bamctl_core::catalog::Catalog;
use bamctl_core::catalog::http::BlueCatClient;
use bamctl_core::catalog::resources::{NetworkDraft, NetworkResource, RawResource, RecordDraft};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;

const CREDENTIAL: &str = "YXBpOnNlY3JldA==";

fn settings_for(host: String) -> Settings {
    Settings {
        host,
        user: "api".to_string(),
        password: "secret".to_string(),
        configuration: "default".to_string(),
        ..Default::default()
    }
}

async fn login_mock(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/api/v2/sessions")
        .match_header("authorization", Matcher::Missing)
        .match_header("x-bcn-change-control-comment", Matcher::Missing)
        .match_body(Matcher::PartialJson(json!({ "username": "api", "password": "secret" })))
        .with_status(201)
        .with_header("content-type", "application/hal+json")
        .with_body(json!({ "basicAuthenticationCredentials": CREDENTIAL }).to_string())
        .create_async()
        .await
}

async fn logged_in_client(server: &mut ServerGuard) -> BlueCatClient {
    let _login = login_mock(server).await;
    let client = BlueCatClient::new(&settings_for(server.url())).unwrap();
    client.login().await.unwrap();
    client
}

#[tokio::test]
async fn test_open_logs_in_and_resolves_configuration() {
    let mut server = Server::new_async().await;
    let login = login_mock(&mut server).await;
    let configurations = server
        .mock("GET", "/api/v2/configurations")
        .match_query(Matcher::UrlEncoded("filter".into(), "name:'default'".into()))
        .match_header("authorization", format!("Basic {CREDENTIAL}").as_str())
        .match_header("accept", "application/hal+json")
        .with_status(200)
        .with_body(json!({ "count": 1, "data": [{ "id": 1, "name": "default" }] }).to_string())
        .create_async()
        .await;

    let api: BamApi = BamApi::open(settings_for(server.url())).await.unwrap();
    assert_eq!(api.configuration_name(), "default");

    login.assert_async().await;
    configurations.assert_async().await;
}

#[tokio::test]
async fn test_open_rejects_incomplete_settings_before_any_request() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/api/v2/sessions")
        .expect(0)
        .create_async()
        .await;

    let mut settings: Settings = settings_for(server.url());
    settings.password.clear();

    let err: BamError = BamApi::open(settings).await.err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Validation);
    login.assert_async().await;
}

#[tokio::test]
async fn test_login_without_credentials_in_response() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/api/v2/sessions")
        .with_status(201)
        .with_body("{}")
        .create_async()
        .await;

    let client = BlueCatClient::new(&settings_for(server.url())).unwrap();
    let err: BamError = client.login().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
}

#[tokio::test]
async fn test_create_network_sends_change_comment() {
    let mut server = Server::new_async().await;
    let client: BlueCatClient = logged_in_client(&mut server).await;

    let create = server
        .mock("POST", "/api/v2/blocks/7/networks")
        .match_header("x-bcn-change-control-comment", "change by bamctl")
        .match_header("authorization", format!("Basic {CREDENTIAL}").as_str())
        .match_body(Matcher::Json(json!({ "type": "IPv4Network", "range": "192.0.2.0/24" })))
        .with_status(201)
        .with_body(json!({ "id": 55, "type": "IPv4Network", "range": "192.0.2.0/24" }).to_string())
        .create_async()
        .await;

    let draft = NetworkDraft::for_range(&range::canonicalize("192.0.2.0/24").unwrap());
    let created: NetworkResource = client.create_network(7, &draft).await.unwrap();

    assert_eq!(created.id, 55);
    create.assert_async().await;
}

#[tokio::test]
async fn test_lookup_filters_and_bare_array_payload() {
    let mut server = Server::new_async().await;
    let client: BlueCatClient = logged_in_client(&mut server).await;

    let networks = server
        .mock("GET", "/api/v2/networks")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded(
                "filter".into(),
                "configuration.name:'default' and range:'10.1.0.0/16'".into(),
            ),
            Matcher::UrlEncoded("limit".into(), "2".into()),
        ]))
        .match_header("x-bcn-change-control-comment", Matcher::Missing)
        .with_status(200)
        .with_body(
            json!([{
                "id": 9, "type": "IPv4Network", "range": "10.1.0.0/16",
                "_links": { "up": { "href": "/api/v2/blocks/3" } }
            }])
            .to_string(),
        )
        .create_async()
        .await;

    let range = range::canonicalize("10.1.0.0/16").unwrap();
    let found: Vec<NetworkResource> = client.networks("default", &range).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].parent_block_id(), Some(3));
    networks.assert_async().await;
}

#[tokio::test]
async fn test_not_found_carries_details() {
    let mut server = Server::new_async().await;
    let client: BlueCatClient = logged_in_client(&mut server).await;

    let _m = server
        .mock("GET", "/api/v2/networks/99")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(json!({ "status": 404, "code": "ObjectNotFound", "message": "Network 99 was not found" }).to_string())
        .create_async()
        .await;

    let err: BamError = client.network(99).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("failed with 404: Network 99 was not found"));

    let details = err.details().unwrap();
    assert_eq!(details.status, Some(404));
    assert_eq!(details.code.as_deref(), Some("ObjectNotFound"));
    assert_eq!(details.method.as_deref(), Some("GET"));
}

#[tokio::test]
async fn test_duplicate_code_is_conflict() {
    let mut server = Server::new_async().await;
    let client: BlueCatClient = logged_in_client(&mut server).await;

    let _m = server
        .mock("POST", "/api/v2/blocks/7/networks")
        .with_status(400)
        .with_body(json!({ "code": "ObjectAlreadyExists", "message": "Duplicate network" }).to_string())
        .create_async()
        .await;

    let draft = NetworkDraft::for_range(&range::canonicalize("192.0.2.0/24").unwrap());
    let err: BamError = client.create_network(7, &draft).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn test_unreachable_host_is_transport() {
    let client = BlueCatClient::new(&settings_for("http://127.0.0.1:1".to_string())).unwrap();
    let err: BamError = client.login().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.to_string().starts_with("POST http://127.0.0.1:1/api/v2/sessions failed"));
}

#[tokio::test]
async fn test_create_record_returns_id() {
    let mut server = Server::new_async().await;
    let client: BlueCatClient = logged_in_client(&mut server).await;

    let create = server
        .mock("POST", "/api/v2/zones/500/resourceRecords")
        .match_body(Matcher::PartialJson(json!({
            "type": "GenericRecord",
            "recordType": "TXT",
            "absoluteName": "txt.example.com"
        })))
        .with_status(201)
        .with_body(json!({ "id": 4242, "type": "GenericRecord" }).to_string())
        .create_async()
        .await;

    let owner = OwnerName {
        fqdn: "txt.example.com".to_string(),
        label: "txt".to_string(),
    };
    let draft = RecordDraft::new(RecordKind::Txt, &owner, "hello", 3600, false).unwrap();

    assert_eq!(client.create_record(500, &draft).await.unwrap(), 4242);
    create.assert_async().await;
}

#[tokio::test]
async fn test_replace_record_with_empty_response() {
    let mut server = Server::new_async().await;
    let client: BlueCatClient = logged_in_client(&mut server).await;

    let replace = server
        .mock("PUT", "/api/v2/resourceRecords/10")
        .match_header("x-bcn-change-control-comment", "change by bamctl")
        .match_body(Matcher::PartialJson(json!({ "id": 10, "ttl": 60 })))
        .with_status(200)
        .create_async()
        .await;

    let mut body = RawResource::new();
    body.insert("id".to_string(), json!(10));
    body.insert("ttl".to_string(), json!(60));

    let stored: RawResource = client.replace_record(10, &body).await.unwrap();
    assert!(stored.is_empty());
    replace.assert_async().await;
}

#[tokio::test]
async fn test_logout_drops_credential() {
    let mut server = Server::new_async().await;
    let client: BlueCatClient = logged_in_client(&mut server).await;
    client.logout().await.unwrap();

    let anonymous = server
        .mock("GET", "/api/v2/resourceRecords/10")
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .with_body(json!({ "code": "Unauthorized", "message": "Authentication required" }).to_string())
        .create_async()
        .await;

    let err: BamError = client.record(10).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    anonymous.assert_async().await;
}
