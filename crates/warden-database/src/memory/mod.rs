//! In-memory repository implementations using a Tokio mutex.
//!
//! Suitable for tests and single-process runs without PostgreSQL. The
//! store enforces the same uniqueness constraints, cascades, and
//! conditional revoke semantics as the SQL schema.

mod permission;
mod refresh_token;
mod role;
mod user;

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use warden_entity::permission::Permission;
use warden_entity::role::{Role, RoleDetail};
use warden_entity::token::RefreshToken;
use warden_entity::user::User;

use crate::seed::{ADMIN_ROLE, ADMIN_ROLE_DESCRIPTION, DEFAULT_PERMISSIONS};

/// Every table, guarded together so multi-table cascades stay atomic.
#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    roles: HashMap<Uuid, Role>,
    permissions: HashMap<Uuid, Permission>,
    /// `(role_id, permission_id)` grants.
    role_permissions: BTreeSet<(Uuid, Uuid)>,
    refresh_tokens: HashMap<Uuid, RefreshToken>,
}

impl Tables {
    fn role_detail(&self, role_id: Uuid) -> Option<RoleDetail> {
        let role = self.roles.get(&role_id)?.clone();
        let mut permissions: Vec<Permission> = self
            .role_permissions
            .range((role_id, Uuid::nil())..=(role_id, Uuid::from_u128(u128::MAX)))
            .filter_map(|(_, permission_id)| self.permissions.get(permission_id).cloned())
            .collect();
        permissions.sort_by(|a, b| a.name.cmp(&b.name));
        Some(RoleDetail { role, permissions })
    }
}

/// Shared in-memory store implementing every repository trait.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the default permissions and the `admin`
    /// role granted all of them, mirroring the seed migrations.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let mut tables = Tables::default();

        let admin = Role {
            id: Uuid::new_v4(),
            name: ADMIN_ROLE.to_string(),
            description: Some(ADMIN_ROLE_DESCRIPTION.to_string()),
            created_at: now,
            updated_at: now,
        };

        for (name, resource, action) in DEFAULT_PERMISSIONS {
            let permission = Permission {
                id: Uuid::new_v4(),
                name: (*name).to_string(),
                description: None,
                resource: (*resource).to_string(),
                action: (*action).to_string(),
                created_at: now,
                updated_at: now,
            };
            tables.role_permissions.insert((admin.id, permission.id));
            tables.permissions.insert(permission.id, permission);
        }
        tables.roles.insert(admin.id, admin);

        Self {
            tables: Arc::new(Mutex::new(tables)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::RoleRepository;

    #[tokio::test]
    async fn test_seeded_admin_holds_every_permission() {
        let store = MemoryStore::seeded();
        let admin = store.find_by_name(ADMIN_ROLE).await.unwrap().unwrap();
        let detail = store.find_detail(admin.id).await.unwrap().unwrap();

        assert_eq!(detail.permissions.len(), DEFAULT_PERMISSIONS.len());
        assert!(detail.permission_names().contains("roles:assign-permission"));
    }
}
