//! # REST v2 Adapter
//!
//! [`BlueCatClient`] implements [`Catalog`] over HTTP.
//!
//! Requests are plain JSON exchanges under `<host>/api/v2`. The session
//! credential obtained at login is attached to every later request, and every
//! mutation carries the configured change-control comment.

use std::net::IpAddr;

use async_trait::async_trait;
use bamctl_common::config::Settings;
use bamctl_common::error::{BamError, ErrorDetails, Result};
use bamctl_common::network::range::AddressRange;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::sync::RwLock;
use tracing::debug;

use super::Catalog;
use super::resources::{
    AddressResource, BlockResource, Configuration, NetworkDraft, NetworkResource, RawResource,
    RecordAddress, RecordDraft, ResourceRecord, View, ZoneResource,
};

const API_PREFIX: &str = "/api/v2";
const CHANGE_COMMENT_HEADER: &str = "x-bcn-change-control-comment";

const BLOCK_FIELDS: &str = "id,type,range";
const NETWORK_LOOKUP_FIELDS: &str = "id,type,range,_links";
const NETWORK_DETAIL_FIELDS: &str =
    "id,type,range,name,gateway,defaultView,location,usage,userDefinedFields,_links";
const ADDRESS_FIELDS: &str = "id,type,address,name";
const ZONE_RECORD_FIELDS: &str = "id,type,name,absoluteName,ttl,recordType,rdata";
const REVERSE_RECORD_FIELDS: &str = "id,type,recordType,name,absoluteName,rdata,ttl,reverseRecord";
const RECORD_ADDRESS_FIELDS: &str = "id,type,address";

type Query<'a> = &'a [(&'a str, String)];

pub struct BlueCatClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
    change_comment: String,
    /// `Basic ...` header value once logged in.
    credential: RwLock<Option<String>>,
}

impl BlueCatClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/hal+json"));

        let http: reqwest::Client = reqwest::Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(!settings.verify_tls)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| BamError::api(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url(&settings.host),
            username: settings.user.clone(),
            password: settings.password.clone(),
            change_comment: settings.change_comment.clone(),
            credential: RwLock::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Performs one exchange and turns any non-2xx answer into a [`BamError`].
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: Query<'_>,
        body: Option<Value>,
    ) -> Result<(String, Response)> {
        let url: String = self.url(path);
        debug!("HTTP {method} {url} {query:?}");

        let mut request = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(credential) = self.credential.read().await.as_deref() {
            request = request.header(AUTHORIZATION, credential);
        }
        if method != Method::GET && path != "sessions" {
            request = request.header(CHANGE_COMMENT_HEADER, self.change_comment.as_str());
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response: Response = request.send().await.map_err(|e| BamError::Transport {
            method: method.to_string(),
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let status: u16 = response.status().as_u16();
        debug!("HTTP {method} {url} -> {status}");

        if !response.status().is_success() {
            let text: String = response.text().await.unwrap_or_default();
            return Err(remote_error(method.as_str(), &url, status, &text));
        }

        Ok((url, response))
    }

    /// Sends a request and decodes the whole body as `T`.
    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Query<'_>,
        body: Option<Value>,
    ) -> Result<T> {
        let value: Value = self.fetch_value(method.clone(), path, query, body).await?;
        serde_json::from_value(value)
            .map_err(|e| BamError::api(format!("Unexpected response from {method} {}: {e}", self.url(path))))
    }

    /// Sends a request and returns its JSON body; an empty body reads as `null`.
    async fn fetch_value(&self, method: Method, path: &str, query: Query<'_>, body: Option<Value>) -> Result<Value> {
        let (url, response) = self.send(method.clone(), path, query, body).await?;
        let text: String = response.text().await.map_err(|e| BamError::Transport {
            method: method.to_string(),
            url: url.clone(),
            reason: e.to_string(),
        })?;

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| BamError::api(format!("Unexpected response from {method} {url}: {e}")))
    }

    /// GET of a collection endpoint.
    async fn list<T: DeserializeOwned>(&self, path: &str, query: Query<'_>) -> Result<Vec<T>> {
        let payload: Value = self.fetch_value(Method::GET, path, query, None).await?;
        serde_json::from_value(Value::Array(extract_collection(payload)))
            .map_err(|e| BamError::api(format!("Unexpected collection from GET {}: {e}", self.url(path))))
    }

    async fn remove(&self, path: &str) -> Result<()> {
        self.send(Method::DELETE, path, &[], None).await.map(|_| ())
    }
}

#[async_trait]
impl Catalog for BlueCatClient {
    async fn login(&self) -> Result<()> {
        let body: Value = json!({ "username": self.username, "password": self.password });
        let session: Value = self.fetch_value(Method::POST, "sessions", &[], Some(body)).await?;

        let basic: &str = session
            .get("basicAuthenticationCredentials")
            .and_then(Value::as_str)
            .filter(|basic| !basic.is_empty())
            .ok_or_else(|| BamError::api("Login response missing basicAuthenticationCredentials"))?;

        *self.credential.write().await = Some(format!("Basic {basic}"));
        debug!("Logged in to {} as {}", self.base_url, self.username);
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        self.credential.write().await.take();
        Ok(())
    }

    async fn configurations(&self, name: &str) -> Result<Vec<Configuration>> {
        self.list("configurations", &[("filter", format!("name:'{name}'"))])
            .await
    }

    async fn views(&self, configuration: &str, name: &str) -> Result<Vec<View>> {
        let filter: String = format!("configuration.name:'{configuration}' and name:'{name}'");
        self.list("views", &[("filter", filter)]).await
    }

    async fn zones(&self, view_id: i64, absolute_name: &str) -> Result<Vec<ZoneResource>> {
        let filter: String = format!("view.id:{view_id} and absoluteName:'{absolute_name}'");
        self.list("zones", &[("filter", filter)]).await
    }

    async fn blocks(&self, configuration: &str, range: &AddressRange) -> Result<Vec<BlockResource>> {
        let query = [
            ("filter", format!("configuration.name:'{configuration}' and range:'{range}'")),
            ("limit", "2".to_string()),
            ("fields", BLOCK_FIELDS.to_string()),
        ];
        self.list("blocks", &query).await
    }

    async fn networks(&self, configuration: &str, range: &AddressRange) -> Result<Vec<NetworkResource>> {
        let query = [
            ("filter", format!("configuration.name:'{configuration}' and range:'{range}'")),
            ("limit", "2".to_string()),
            ("fields", NETWORK_LOOKUP_FIELDS.to_string()),
        ];
        self.list("networks", &query).await
    }

    async fn network(&self, id: i64) -> Result<NetworkResource> {
        let query = [("fields", NETWORK_DETAIL_FIELDS.to_string())];
        self.fetch(Method::GET, &format!("networks/{id}"), &query, None)
            .await
    }

    async fn create_network(&self, block_id: i64, draft: &NetworkDraft) -> Result<NetworkResource> {
        let body: Value = json!(draft);
        self.fetch(Method::POST, &format!("blocks/{block_id}/networks"), &[], Some(body))
            .await
    }

    async fn delete_network(&self, id: i64) -> Result<()> {
        self.remove(&format!("networks/{id}")).await
    }

    async fn addresses(&self, configuration: &str, addr: IpAddr) -> Result<Vec<AddressResource>> {
        let query = [
            ("filter", format!("address:'{addr}' and configuration.name:'{configuration}'")),
            ("limit", "5".to_string()),
            ("fields", ADDRESS_FIELDS.to_string()),
        ];
        self.list("addresses", &query).await
    }

    async fn address_records(&self, address_id: i64) -> Result<Vec<ResourceRecord>> {
        let query = [("fields", REVERSE_RECORD_FIELDS.to_string())];
        self.list(&format!("addresses/{address_id}/resourceRecords"), &query)
            .await
    }

    async fn zone_records(&self, zone_id: i64) -> Result<Vec<ResourceRecord>> {
        let query = [("fields", ZONE_RECORD_FIELDS.to_string())];
        self.list(&format!("zones/{zone_id}/resourceRecords"), &query)
            .await
    }

    async fn record_addresses(&self, record_id: i64) -> Result<Vec<RecordAddress>> {
        let query = [("fields", RECORD_ADDRESS_FIELDS.to_string())];
        self.list(&format!("resourceRecords/{record_id}/addresses"), &query)
            .await
    }

    async fn create_record(&self, zone_id: i64, draft: &RecordDraft) -> Result<i64> {
        let path: String = format!("zones/{zone_id}/resourceRecords");
        let created: Value = self
            .fetch_value(Method::POST, &path, &[], Some(json!(draft)))
            .await?;

        created
            .get("id")
            .and_then(Value::as_i64)
            .ok_or_else(|| BamError::api(format!("Create resourceRecord returned unexpected payload: {created}")))
    }

    async fn record(&self, id: i64) -> Result<RawResource> {
        self.fetch(Method::GET, &format!("resourceRecords/{id}"), &[], None)
            .await
    }

    async fn replace_record(&self, id: i64, body: &RawResource) -> Result<RawResource> {
        let path: String = format!("resourceRecords/{id}");
        let stored: Value = self
            .fetch_value(Method::PUT, &path, &[], Some(Value::Object(body.clone())))
            .await?;

        Ok(match stored {
            Value::Object(map) => map,
            _ => RawResource::new(),
        })
    }

    async fn delete_record(&self, id: i64) -> Result<()> {
        self.remove(&format!("resourceRecords/{id}")).await
    }
}

/// `https://` is assumed when the host has no scheme.
pub fn base_url(host: &str) -> String {
    let host: &str = host.trim();
    let with_scheme: String = if host.starts_with("http") {
        host.to_string()
    } else {
        format!("https://{host}")
    };
    format!("{}{API_PREFIX}", with_scheme.trim_end_matches('/'))
}

/// Accepts both a `{"data": [...]}` envelope and a bare array.
pub fn extract_collection(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Builds the error for a non-2xx response from its status and body.
pub fn remote_error(method: &str, url: &str, status: u16, body: &str) -> BamError {
    let mut details = ErrorDetails {
        status: Some(status),
        url: Some(url.to_string()),
        method: Some(method.to_string()),
        ..Default::default()
    };

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => {
            let field = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
            details.code = field("code");
            details.reason = field("reason");
            details.message = field("message");
            details.detail = match map.get("detail") {
                Some(detail) if !detail.is_null() => Some(detail.clone()),
                _ => Some(Value::Object(map.clone())),
            };
        }
        Ok(other) => details.detail = Some(other),
        Err(_) => {
            let text: &str = body.trim();
            details.detail = (!text.is_empty()).then(|| Value::String(text.to_string()));
        }
    }

    let summary: String = match (&details.message, &details.detail) {
        (Some(message), _) => message.clone(),
        (None, Some(Value::String(text))) => text.clone(),
        (None, Some(other)) => other.to_string(),
        (None, None) => "no details".to_string(),
    };

    BamError::remote(format!("{method} {url} failed with {status}: {summary}"), details)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
