//! # warden-service
//!
//! Administrative service layer for Warden. Each service manages one
//! RBAC resource through the repository traits.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references. Permission checks happen at
//! the boundary before a service method is invoked; services receive the
//! [`RequestContext`] to attribute changes to the acting user.

pub mod bootstrap;
pub mod context;
pub mod permission;
pub mod role;
pub mod user;

pub use context::RequestContext;
pub use permission::PermissionService;
pub use role::RoleService;
pub use user::AdminUserService;
