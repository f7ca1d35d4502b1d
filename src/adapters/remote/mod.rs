//! Remote progress store over HTTP.

pub mod http_store;

pub use http_store::HttpRemoteStore;

use std::sync::Arc;

use crate::domain::models::{Identity, RemoteConfig};
use crate::domain::ports::{NullRemoteStore, RemoteStore, StaticIdentity};

/// Identity configured for remote sync, if any.
pub fn configured_identity(config: &RemoteConfig) -> StaticIdentity {
    if !config.enabled {
        return StaticIdentity::anonymous();
    }
    let identity = config.identity_id.as_ref().filter(|id| !id.trim().is_empty()).map(|id| Identity {
        id: id.clone(),
        display_name: config.display_name.clone().unwrap_or_else(|| id.clone()),
    });
    StaticIdentity::new(identity)
}

/// The remote store selected by configuration.
pub fn build_remote_store(config: &RemoteConfig) -> anyhow::Result<Arc<dyn RemoteStore>> {
    match (&config.base_url, config.enabled) {
        (Some(_), true) => Ok(Arc::new(HttpRemoteStore::from_config(config)?)),
        _ => Ok(Arc::new(NullRemoteStore::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::IdentityProvider;

    #[test]
    fn test_disabled_remote_is_anonymous() {
        let config = RemoteConfig {
            identity_id: Some("u-1".to_string()),
            ..RemoteConfig::default()
        };
        assert!(configured_identity(&config).authenticated_identity().is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let config = RemoteConfig {
            enabled: true,
            base_url: Some("http://localhost:1".to_string()),
            identity_id: Some("u-1".to_string()),
            ..RemoteConfig::default()
        };
        let identity = configured_identity(&config).authenticated_identity().unwrap();
        assert_eq!(identity.display_name, "u-1");
    }
}
