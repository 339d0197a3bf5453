//! Role-based access control.

pub mod evaluator;
pub mod policies;
pub mod principal;

pub use evaluator::PermissionEvaluator;
pub use policies::Operation;
pub use principal::Principal;
