//! # warden-core
//!
//! Core crate for Warden. Contains the unified error system, configuration
//! schemas, and the traits shared by the persistence and auth layers.
//!
//! This crate has **no** internal dependencies on other Warden crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
pub use traits::{Clock, ManualClock, SystemClock};
