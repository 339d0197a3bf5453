//! Token pair issuance and the refresh token ledger.

pub mod issuer;
pub mod ledger;

pub use issuer::TokenIssuer;
pub use ledger::RefreshTokenLedger;
