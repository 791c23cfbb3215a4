//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_role_admin_backend;

pub use in_memory_role_admin_backend::InMemoryRoleAdminBackend;
