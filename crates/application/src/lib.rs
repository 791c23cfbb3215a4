//! Application services and ports.

#![forbid(unsafe_code)]

mod role_admin_ports;
mod role_admin_service;
mod submission_form;

pub use role_admin_ports::{
    AssignmentRecord, DirectoryRepository, RoleAdminGateway, SubmissionError,
    SubmissionErrorKind,
};
pub use role_admin_service::RoleAdminService;
pub use submission_form::{
    AssignmentAction, CreateRoleAction, FormAction, FormOutcome, FormSettings,
    HierarchyLinkAction, PermissionAssignmentAction, PermissionAssignmentOutcome,
    StoreHierarchyLinkAction, SubmissionForm,
};
