use rolekeeper_domain::{
    Permission, PermissionId, Role, RoleId, StoreId, StoreRef, UserId, UserRef,
};
use rolekeeper_infrastructure::InMemoryRoleAdminBackend;
use tracing::info;

const DEV_SEED_PERMISSIONS: [(i64, &str); 6] = [
    (1, "sales.read"),
    (2, "sales.refund"),
    (3, "inventory.read"),
    (4, "inventory.adjust"),
    (5, "reports.view"),
    (6, "users.manage"),
];

const DEV_SEED_ROLES: [(i64, &str, &[i64]); 3] = [
    (1, "Administrator", &[1, 2, 3, 4, 5, 6]),
    (2, "Store Manager", &[1, 2, 3, 4, 5]),
    (3, "Cashier", &[1, 3]),
];

const DEV_SEED_USERS: [(i64, &str); 3] = [
    (1, "Avery Admin"),
    (2, "Morgan Manager"),
    (3, "Casey Cashier"),
];

const DEV_SEED_STORES: [(i64, &str); 3] = [
    (1, "Head Office"),
    (2, "Downtown"),
    (3, "Harbor"),
];

/// Fills the in-memory backend with a small demo directory.
pub async fn run(backend: &InMemoryRoleAdminBackend) {
    for (id, name) in DEV_SEED_PERMISSIONS {
        backend
            .seed_permission(Permission::new(PermissionId::new(id), name))
            .await;
    }

    for (id, name, permission_ids) in DEV_SEED_ROLES {
        backend
            .seed_role(Role::new(
                RoleId::new(id),
                name,
                permission_ids.iter().copied().map(PermissionId::new),
            ))
            .await;
    }

    for (id, name) in DEV_SEED_USERS {
        backend.seed_user(UserRef::new(UserId::new(id), name)).await;
    }

    for (id, name) in DEV_SEED_STORES {
        backend
            .seed_store(StoreRef::new(StoreId::new(id), name))
            .await;
    }

    info!(
        permissions = DEV_SEED_PERMISSIONS.len(),
        roles = DEV_SEED_ROLES.len(),
        users = DEV_SEED_USERS.len(),
        stores = DEV_SEED_STORES.len(),
        "seeded development directory"
    );
}
