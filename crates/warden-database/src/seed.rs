//! Default permission catalogue shared by the SQL seed migration and
//! [`MemoryStore::seeded`](crate::MemoryStore::seeded).

/// Name of the role that is granted every default permission.
pub const ADMIN_ROLE: &str = "admin";

/// Description of the default admin role.
pub const ADMIN_ROLE_DESCRIPTION: &str = "Full system access";

/// `(name, resource, action)` for each built-in permission.
pub const DEFAULT_PERMISSIONS: &[(&str, &str, &str)] = &[
    ("users:read", "users", "read"),
    ("users:create", "users", "create"),
    ("users:update", "users", "update"),
    ("users:delete", "users", "delete"),
    ("roles:read", "roles", "read"),
    ("roles:create", "roles", "create"),
    ("roles:update", "roles", "update"),
    ("roles:delete", "roles", "delete"),
    ("roles:assign-permission", "roles", "assign-permission"),
    ("permissions:read", "permissions", "read"),
    ("permissions:create", "permissions", "create"),
    ("permissions:update", "permissions", "update"),
    ("permissions:delete", "permissions", "delete"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_follow_resource_action_convention() {
        assert_eq!(DEFAULT_PERMISSIONS.len(), 13);
        for (name, resource, action) in DEFAULT_PERMISSIONS {
            assert_eq!(*name, format!("{resource}:{action}"));
        }
    }
}
