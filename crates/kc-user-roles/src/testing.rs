//! In-memory admin API used by the reconciler tests.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use kc_admin_client::{AdminError, AdminResult, KeycloakAdmin};
use kc_model::{ClientMappings, Role, User, UserRoleMappings};
use parking_lot::Mutex;

/// A recorded admin call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetUser(String),
    GetRoleMappings(String),
    GetRole(String),
    AddRealm(Vec<String>),
    RemoveRealm(Vec<String>),
    AddClient(String, Vec<String>),
    RemoveClient(String, Vec<String>),
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::AddRealm(_) | Self::RemoveRealm(_) | Self::AddClient(..) | Self::RemoveClient(..)
        )
    }
}

/// A single realm with a role catalogue and per-user assignments.
pub struct FakeAdmin {
    realm: String,
    roles: HashMap<String, Role>,
    assigned: Mutex<HashMap<String, BTreeSet<String>>>,
    calls: Mutex<Vec<Call>>,
    failing_client: Option<String>,
}

impl FakeAdmin {
    pub fn new(realm: &str) -> Self {
        Self {
            realm: realm.to_string(),
            roles: HashMap::new(),
            assigned: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            failing_client: None,
        }
    }

    pub fn with_realm_role(mut self, id: &str) -> Self {
        let role = Role::new_realm_role(id, format!("{id}-name"));
        self.roles.insert(id.to_string(), role);
        self
    }

    pub fn with_client_role(mut self, client_id: &str, id: &str) -> Self {
        let role = Role::new_client_role(id, client_id, format!("{id}-name"));
        self.roles.insert(id.to_string(), role);
        self
    }

    pub fn with_user(self, user_id: &str, role_ids: &[&str]) -> Self {
        self.assigned.lock().insert(
            user_id.to_string(),
            role_ids.iter().map(|id| (*id).to_string()).collect(),
        );
        self
    }

    /// Makes every mutation against this client fail with a 500.
    pub fn failing_on_client(mut self, client_id: &str) -> Self {
        self.failing_client = Some(client_id.to_string());
        self
    }

    pub fn assigned(&self, user_id: &str) -> BTreeSet<String> {
        self.assigned.lock().get(user_id).cloned().unwrap_or_default()
    }

    /// Grants a role outside of the reconciler.
    pub fn assign(&self, user_id: &str, role_id: &str) {
        self.assigned
            .lock()
            .entry(user_id.to_string())
            .or_default()
            .insert(role_id.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }

    fn check_realm(&self, realm_id: &str) -> AdminResult<()> {
        if realm_id == self.realm {
            Ok(())
        } else {
            Err(AdminError::not_found("Realm", realm_id))
        }
    }

    fn check_user(&self, user_id: &str) -> AdminResult<()> {
        if self.assigned.lock().contains_key(user_id) {
            Ok(())
        } else {
            Err(AdminError::not_found("User", user_id))
        }
    }

    fn check_client(&self, client_id: &str) -> AdminResult<()> {
        if self.failing_client.as_deref() == Some(client_id) {
            Err(AdminError::Api {
                status: 500,
                message: "boom".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn update(&self, user_id: &str, roles: &[Role], grant: bool) {
        let mut assigned = self.assigned.lock();
        let set = assigned.entry(user_id.to_string()).or_default();
        for role in roles {
            if grant {
                set.insert(role.id.clone());
            } else {
                set.remove(&role.id);
            }
        }
    }
}

fn role_ids(roles: &[Role]) -> Vec<String> {
    roles.iter().map(|r| r.id.clone()).collect()
}

#[async_trait]
impl KeycloakAdmin for FakeAdmin {
    async fn get_user(&self, realm_id: &str, user_id: &str) -> AdminResult<User> {
        self.record(Call::GetUser(user_id.to_string()));
        self.check_realm(realm_id)?;
        self.check_user(user_id)?;
        Ok(User::new(realm_id, user_id, user_id))
    }

    async fn get_user_role_mappings(
        &self,
        realm_id: &str,
        user_id: &str,
    ) -> AdminResult<UserRoleMappings> {
        self.record(Call::GetRoleMappings(user_id.to_string()));
        self.check_realm(realm_id)?;
        self.check_user(user_id)?;

        let mut mappings = UserRoleMappings::default();
        let mut clients: BTreeMap<String, ClientMappings> = BTreeMap::new();

        for id in self.assigned(user_id) {
            let Some(role) = self.roles.get(&id) else {
                continue;
            };
            match role.container_id.as_deref() {
                Some(client_id) if role.client_role => {
                    clients
                        .entry(format!("{client_id}-public"))
                        .or_insert_with(|| ClientMappings {
                            id: client_id.to_string(),
                            client: format!("{client_id}-public"),
                            mappings: Vec::new(),
                        })
                        .mappings
                        .push(role.clone());
                }
                _ => mappings.realm_mappings.push(role.clone()),
            }
        }

        mappings.client_mappings = clients;
        Ok(mappings)
    }

    async fn get_role_by_id(&self, realm_id: &str, role_id: &str) -> AdminResult<Role> {
        self.record(Call::GetRole(role_id.to_string()));
        self.check_realm(realm_id)?;
        self.roles
            .get(role_id)
            .cloned()
            .ok_or_else(|| AdminError::not_found("Role", role_id))
    }

    async fn add_realm_roles_to_user(
        &self,
        realm_id: &str,
        user_id: &str,
        roles: &[Role],
    ) -> AdminResult<()> {
        self.record(Call::AddRealm(role_ids(roles)));
        self.check_realm(realm_id)?;
        self.update(user_id, roles, true);
        Ok(())
    }

    async fn remove_realm_roles_from_user(
        &self,
        realm_id: &str,
        user_id: &str,
        roles: &[Role],
    ) -> AdminResult<()> {
        self.record(Call::RemoveRealm(role_ids(roles)));
        self.check_realm(realm_id)?;
        self.update(user_id, roles, false);
        Ok(())
    }

    async fn add_client_roles_to_user(
        &self,
        realm_id: &str,
        user_id: &str,
        client_id: &str,
        roles: &[Role],
    ) -> AdminResult<()> {
        self.record(Call::AddClient(client_id.to_string(), role_ids(roles)));
        self.check_realm(realm_id)?;
        self.check_client(client_id)?;
        self.update(user_id, roles, true);
        Ok(())
    }

    async fn remove_client_roles_from_user(
        &self,
        realm_id: &str,
        user_id: &str,
        client_id: &str,
        roles: &[Role],
    ) -> AdminResult<()> {
        self.record(Call::RemoveClient(client_id.to_string(), role_ids(roles)));
        self.check_realm(realm_id)?;
        self.check_client(client_id)?;
        self.update(user_id, roles, false);
        Ok(())
    }
}
