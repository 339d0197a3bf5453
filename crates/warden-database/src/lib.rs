//! # warden-database
//!
//! PostgreSQL connection management, embedded migrations, and the
//! repository traits the auth core consumes. Every trait has a
//! PostgreSQL implementation and an in-memory one ([`MemoryStore`]).

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod seed;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use repositories::{
    PermissionRepository, Repositories, RefreshTokenRepository, RoleRepository, UserRepository,
};
