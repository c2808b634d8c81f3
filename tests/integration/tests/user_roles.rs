//! User role lifecycle integration tests.

use kc_user_roles::{UserRolesError, UserRolesState};
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{
    body_ids, client_mapping_path, client_role, mappings, realm_mapping_path, realm_role,
    TestEnv, REALM, USER,
};

/// Tests that create grants the missing roles, revokes the extra ones and
/// reads the converged set back.
#[tokio::test]
async fn test_create_converges_realm_and_client_roles() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.role(realm_role("r-new")).await;
    env.role(client_role("x-new", "c1")).await;

    env.mappings_once(
        mappings(
            vec![realm_role("r-old")],
            vec![("c1", vec![client_role("x-old", "c1")])],
        ),
        1,
    )
    .await;
    env.mappings(mappings(
        vec![realm_role("r-new")],
        vec![("c1", vec![client_role("x-new", "c1")])],
    ))
    .await;

    env.expect_mutation("POST", realm_mapping_path(), 1).await;
    env.expect_mutation("POST", client_mapping_path("c1"), 1).await;
    env.expect_mutation("DELETE", realm_mapping_path(), 1).await;
    env.expect_mutation("DELETE", client_mapping_path("c1"), 1).await;

    let mut state = UserRolesState::new(REALM, USER, ["r-new", "x-new"]);
    let report = env.resource.create(&mut state).await?;

    assert_eq!(report.added, 2);
    assert_eq!(report.removed, 2);
    assert_eq!(report.calls, 4);
    assert_eq!(state.id.as_deref(), Some("myrealm/u1"));
    assert!(state.role_ids.contains("r-new"));
    assert!(state.role_ids.contains("x-new"));
    assert_eq!(state.role_ids.len(), 2);

    let sent: Vec<(String, Vec<String>)> = env
        .mutations()
        .await
        .iter()
        .map(|r| (r.method.to_string(), body_ids(r)))
        .collect();
    assert_eq!(
        sent,
        vec![
            ("POST".to_string(), vec!["r-new".to_string()]),
            ("POST".to_string(), vec!["x-new".to_string()]),
            ("DELETE".to_string(), vec!["r-old".to_string()]),
            ("DELETE".to_string(), vec!["x-old".to_string()]),
        ]
    );

    Ok(())
}

/// Tests that a user already holding exactly the declared roles sees no
/// mutation.
#[tokio::test]
async fn test_update_without_changes_issues_no_mutation() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.role(realm_role("r1")).await;
    env.role(client_role("x1", "c1")).await;
    env.mappings(mappings(
        vec![realm_role("r1")],
        vec![("c1", vec![client_role("x1", "c1")])],
    ))
    .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&env.server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&env.server)
        .await;

    let mut state = UserRolesState::new(REALM, USER, ["r1", "x1"]);
    state.id = Some("myrealm/u1".to_string());
    let report = env.resource.update(&mut state).await?;

    assert!(report.is_noop());
    assert_eq!(state.id.as_deref(), Some("myrealm/u1"));
    assert_eq!(state.role_ids.len(), 2);

    Ok(())
}

/// Tests that delete revokes every declared role without reading the
/// current mappings.
#[tokio::test]
async fn test_delete_revokes_declared_roles_only() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.role(realm_role("r1")).await;
    env.role(client_role("x1", "c1")).await;

    Mock::given(method("GET"))
        .and(path_regex(r"/role-mappings$"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&env.server)
        .await;
    env.expect_mutation("DELETE", realm_mapping_path(), 1).await;
    env.expect_mutation("DELETE", client_mapping_path("c1"), 1).await;

    let state = UserRolesState::new(REALM, USER, ["r1", "x1"]);
    let calls = env.resource.delete(&state).await?;

    assert_eq!(calls, 2);
    Ok(())
}

/// Tests that delete fails before any mutation when the user is gone.
#[tokio::test]
async fn test_delete_of_missing_user_is_not_found() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.role(realm_role("r1")).await;
    env.expect_mutation("DELETE", realm_mapping_path(), 0).await;

    let state = UserRolesState::new(REALM, "ghost", ["r1"]);
    Mock::given(method("GET"))
        .and(path_regex(r"/users/ghost$"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&env.server)
        .await;

    let err = env.resource.delete(&state).await.unwrap_err();

    assert!(err.is_not_found());
    assert!(env.mutations().await.is_empty());
    Ok(())
}

/// Tests that an unresolvable role aborts before any mutation.
#[tokio::test]
async fn test_unknown_role_aborts_without_mutation() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.role(realm_role("r1")).await;
    env.mappings(mappings(vec![realm_role("r-old")], vec![])).await;

    let mut state = UserRolesState::new(REALM, USER, ["r1", "missing"]);
    let err = env.resource.create(&mut state).await.unwrap_err();

    assert!(err.is_not_found());
    assert!(state.id.is_none());
    assert!(env.mutations().await.is_empty());
    Ok(())
}

/// Tests that a failing grant stops the remaining calls.
#[tokio::test]
async fn test_server_error_fails_fast() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.role(realm_role("r1")).await;
    env.mappings(mappings(vec![realm_role("r-old")], vec![]))
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&env.server)
        .await;
    env.expect_mutation("DELETE", realm_mapping_path(), 0).await;

    let mut state = UserRolesState::new(REALM, USER, ["r1"]);
    let err = env.resource.create(&mut state).await.unwrap_err();

    assert!(matches!(
        err,
        UserRolesError::Admin(kc_admin_client::AdminError::Api { status: 500, .. })
    ));
    Ok(())
}

/// Tests that import followed by read captures every assigned role.
#[tokio::test]
async fn test_import_then_read() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.mappings(mappings(
        vec![realm_role("r1"), realm_role("default-roles-myrealm")],
        vec![("c1", vec![client_role("x1", "c1")])],
    ))
    .await;

    let mut state = env.resource.import("myrealm/u1")?;
    assert!(state.role_ids.is_empty());

    env.resource.read(&mut state).await?;

    assert_eq!(state.id.as_deref(), Some("myrealm/u1"));
    assert_eq!(state.realm_id, REALM);
    assert_eq!(state.user_id, USER);
    assert_eq!(state.role_ids.len(), 3);
    assert!(state.role_ids.contains("default-roles-myrealm"));

    assert!(matches!(
        env.resource.import("myrealm"),
        Err(UserRolesError::InvalidImportId { .. })
    ));
    Ok(())
}
