//! Identity port: who, if anyone, is authenticated to the remote store.

use crate::domain::models::Identity;

pub trait IdentityProvider: Send + Sync {
    /// The authenticated identity, or `None` for an anonymous local user.
    fn authenticated_identity(&self) -> Option<Identity>;
}

/// Identity fixed at startup, typically from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    identity: Option<Identity>,
}

impl StaticIdentity {
    pub fn new(identity: Option<Identity>) -> Self {
        Self { identity }
    }

    pub fn anonymous() -> Self {
        Self { identity: None }
    }
}

impl IdentityProvider for StaticIdentity {
    fn authenticated_identity(&self) -> Option<Identity> {
        self.identity.clone()
    }
}
