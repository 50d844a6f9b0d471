//! Admin identity check.
//!
//! Identity lives outside the rental engine. The engine only asks one question,
//! "is this caller an admin", through [`AdminCheck`]; the web layer or CLI
//! supplies whatever credential it has.

use crate::errors::{Error, Result};

/// Answers whether a credential belongs to an administrator.
pub trait AdminCheck: Send + Sync {
    /// Returns true if `credential` grants admin rights.
    fn is_admin(&self, credential: Option<&str>) -> bool;
}

/// Admin check against a single shared token.
///
/// With no token configured nobody is an admin.
#[derive(Debug, Clone, Default)]
pub struct TokenAdminCheck {
    token: Option<String>,
}

impl TokenAdminCheck {
    /// Creates a check for `token`.
    #[must_use]
    pub const fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

impl AdminCheck for TokenAdminCheck {
    fn is_admin(&self, credential: Option<&str>) -> bool {
        match (&self.token, credential) {
            (Some(expected), Some(given)) => constant_time_eq(expected.as_bytes(), given.as_bytes()),
            _ => false,
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Fails with [`Error::Unauthorized`] unless `credential` is an admin's.
pub fn require_admin(check: &dyn AdminCheck, credential: Option<&str>) -> Result<()> {
    if check.is_admin(credential) {
        Ok(())
    } else {
        Err(Error::Unauthorized)
    }
}
