//! Role management and role-permission assignment.

pub mod service;

pub use service::RoleService;
