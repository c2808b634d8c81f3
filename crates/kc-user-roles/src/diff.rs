//! Declared-versus-assigned role diff.

use std::collections::HashSet;

use kc_model::RoleMapping;

/// Roles to grant and roles to revoke so that assigned matches declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDiff {
    /// Declared roles not yet assigned.
    pub to_add: RoleMapping,
    /// Assigned roles that are not declared.
    pub to_remove: RoleMapping,
}

impl RoleDiff {
    /// Checks if nothing needs to change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Splits declared and assigned roles into what to add and what to remove.
///
/// For every scope present on both sides, roles whose id appears on both
/// sides are dropped from both. Scopes present on only one side are copied
/// as-is. A scope emptied this way stays in the result with an empty list.
#[must_use]
pub fn diff(desired: &RoleMapping, remote: &RoleMapping) -> RoleDiff {
    RoleDiff {
        to_add: subtract(desired, remote),
        to_remove: subtract(remote, desired),
    }
}

/// Returns `left` without the roles that share scope and id with `right`.
fn subtract(left: &RoleMapping, right: &RoleMapping) -> RoleMapping {
    let mut result = RoleMapping::new();

    for (scope, roles) in left {
        let remaining = match right.get(scope) {
            Some(other) => {
                let other_ids: HashSet<&str> = other.iter().map(|r| r.id.as_str()).collect();
                roles
                    .iter()
                    .filter(|role| !other_ids.contains(role.id.as_str()))
                    .cloned()
                    .collect()
            }
            None => roles.clone(),
        };
        result.insert(scope.clone(), remaining);
    }

    result
}
