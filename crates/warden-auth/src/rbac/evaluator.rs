//! Permission evaluation.

use std::collections::HashSet;

use warden_core::error::AppError;

use super::policies::Operation;
use super::principal::Principal;

/// Pure allow/deny decisions over permission-name sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionEvaluator;

impl PermissionEvaluator {
    /// Creates an evaluator.
    pub fn new() -> Self {
        Self
    }

    /// Allows when `required` is empty, otherwise only when every required
    /// name is in `granted`.
    pub fn authorize<I, S>(&self, required: I, granted: &HashSet<String>) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        required
            .into_iter()
            .all(|name| granted.contains(name.as_ref()))
    }

    /// Checks `operation` against an optional caller.
    ///
    /// A missing principal is denied for every operation that requires
    /// one, which makes "unauthenticated" and "under-privileged" look the
    /// same to the caller.
    pub fn guard(&self, operation: Operation, principal: Option<&Principal>) -> Result<(), AppError> {
        let allowed = match principal {
            Some(p) => self.authorize(operation.required_permissions(), &p.permissions),
            None => !operation.requires_principal(),
        };

        if allowed {
            Ok(())
        } else {
            Err(AppError::permission_denied())
        }
    }
}
