//! Refresh token ledger rows and issued token pairs.

pub mod model;
pub mod pair;

pub use model::{NewRefreshToken, RefreshToken};
pub use pair::TokenPair;
