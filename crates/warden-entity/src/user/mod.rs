//! User domain entities.

pub mod model;
pub mod profile;

pub use model::{CreateUser, UpdateUser, User, UserWithRole};
pub use profile::UserProfile;
