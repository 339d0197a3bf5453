//! Request context carrying the authenticated principal.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use warden_auth::Principal;

/// Context for the current authenticated request.
///
/// Built by the boundary once the access token is verified and the
/// principal's current permissions are resolved.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated caller.
    pub principal: Principal,
    /// IP address of the request origin.
    pub ip_address: String,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(principal: Principal, ip_address: String, user_agent: Option<String>) -> Self {
        Self {
            principal,
            ip_address,
            user_agent,
            request_time: Utc::now(),
        }
    }

    /// The acting user's ID.
    pub fn user_id(&self) -> Uuid {
        self.principal.user_id
    }
}
