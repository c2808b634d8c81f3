//! Common test utilities and fixtures.

use kc_admin_client::AdminClient;
use kc_user_roles::UserRolesResource;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const REALM: &str = "myrealm";
pub const USER: &str = "u1";
pub const TOKEN: &str = "test-token";

/// A mocked Admin API and a resource talking to it.
pub struct TestEnv {
    /// Mock server standing in for Keycloak.
    pub server: MockServer,
    /// Resource under test.
    pub resource: UserRolesResource<AdminClient>,
}

impl TestEnv {
    /// Starts a mock server with user `u1` in realm `myrealm`.
    pub async fn new() -> anyhow::Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("kc_user_roles=debug,kc_admin_client=debug")
            .with_test_writer()
            .try_init();

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(user_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": USER,
                "username": "alice",
                "enabled": true,
                "email": "alice@example.com"
            })))
            .mount(&server)
            .await;

        let client = AdminClient::with_token(&server.uri(), TOKEN)?;
        Ok(Self {
            server,
            resource: UserRolesResource::new(client),
        })
    }

    /// Makes `role` resolvable through `roles-by-id`.
    pub async fn role(&self, role: Value) {
        let id = role["id"].as_str().unwrap_or_default().to_string();
        Mock::given(method("GET"))
            .and(path(format!("/admin/realms/{REALM}/roles-by-id/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(role))
            .mount(&self.server)
            .await;
    }

    /// Serves `mappings` for the first `times` role-mapping reads.
    pub async fn mappings_once(&self, mappings: Value, times: u64) {
        Mock::given(method("GET"))
            .and(path(format!("{}/role-mappings", user_path())))
            .respond_with(ResponseTemplate::new(200).set_body_json(mappings))
            .up_to_n_times(times)
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Serves `mappings` for every role-mapping read not claimed by
    /// [`mappings_once`](Self::mappings_once).
    pub async fn mappings(&self, mappings: Value) {
        Mock::given(method("GET"))
            .and(path(format!("{}/role-mappings", user_path())))
            .respond_with(ResponseTemplate::new(200).set_body_json(mappings))
            .mount(&self.server)
            .await;
    }

    /// Accepts `verb` on `endpoint` exactly `expected` times.
    pub async fn expect_mutation(&self, verb: &str, endpoint: String, expected: u64) {
        Mock::given(method(verb))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(204))
            .expect(expected)
            .mount(&self.server)
            .await;
    }

    /// Requests received so far that changed role mappings.
    pub async fn mutations(&self) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.method.as_str() == "POST" || r.method.as_str() == "DELETE")
            .collect()
    }
}

pub fn user_path() -> String {
    format!("/admin/realms/{REALM}/users/{USER}")
}

pub fn realm_mapping_path() -> String {
    format!("{}/role-mappings/realm", user_path())
}

pub fn client_mapping_path(client_id: &str) -> String {
    format!("{}/role-mappings/clients/{client_id}", user_path())
}

pub fn realm_role(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("{id}-name"),
        "composite": false,
        "clientRole": false,
        "containerId": REALM
    })
}

pub fn client_role(id: &str, client_id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("{id}-name"),
        "composite": false,
        "clientRole": true,
        "containerId": client_id
    })
}

/// Builds a role-mappings body from realm roles and `(client_id, roles)` pairs.
pub fn mappings(realm: Vec<Value>, clients: Vec<(&str, Vec<Value>)>) -> Value {
    let mut body = json!({});
    if !realm.is_empty() {
        body["realmMappings"] = Value::Array(realm);
    }
    if !clients.is_empty() {
        let mut client_mappings = serde_json::Map::new();
        for (client_id, roles) in clients {
            client_mappings.insert(
                format!("{client_id}-public"),
                json!({ "id": client_id, "client": format!("{client_id}-public"), "mappings": roles }),
            );
        }
        body["clientMappings"] = Value::Object(client_mappings);
    }
    body
}

/// Role ids carried in a mutation request body.
pub fn body_ids(request: &Request) -> Vec<String> {
    serde_json::from_slice::<Vec<Value>>(&request.body)
        .unwrap_or_default()
        .iter()
        .filter_map(|role| role["id"].as_str().map(str::to_string))
        .collect()
}
