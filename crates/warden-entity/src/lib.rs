//! # warden-entity
//!
//! Domain entity models for Warden. Every struct in this crate represents
//! a database table row or a read view assembled from several rows.
//! Row entities derive `sqlx::FromRow`.

pub mod nullable;
pub mod permission;
pub mod role;
pub mod token;
pub mod user;
