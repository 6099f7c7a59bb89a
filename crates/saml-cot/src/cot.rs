//! Circle of trust registry
//!
//! Maps IdP entity identifiers to their descriptors. A process-wide instance
//! is available through [`CircleOfTrust::global`]; independent instances can
//! be created for tests or embedding.

use crate::idp::IdentityProvider;
use crate::sp::ServiceProvider;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// Trusted IdPs plus this application's SP record.
///
/// Safe for concurrent readers; writers are expected only during startup.
#[derive(Debug, Default)]
pub struct CircleOfTrust {
    sp: RwLock<Option<Arc<ServiceProvider>>>,
    idps: RwLock<HashMap<String, Arc<IdentityProvider>>>,
}

/// Serializable snapshot of the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CotSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sp_entity_id: Option<String>,
    pub idp_entity_ids: Vec<String>,
}

impl CircleOfTrust {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry, created on first use and never torn down
    pub fn global() -> &'static CircleOfTrust {
        static GLOBAL: OnceLock<CircleOfTrust> = OnceLock::new();
        GLOBAL.get_or_init(CircleOfTrust::new)
    }

    pub fn set_sp(&self, sp: ServiceProvider) {
        info!(entity_id = %sp.entity_id, "Service Provider registered");
        *self.sp.write() = Some(Arc::new(sp));
    }

    pub fn sp(&self) -> Option<Arc<ServiceProvider>> {
        self.sp.read().clone()
    }

    /// Register an IdP, silently replacing any entry with the same entity id.
    ///
    /// Returns the replaced entry.
    pub fn add_idp(
        &self,
        entity_id: impl Into<String>,
        idp: IdentityProvider,
    ) -> Option<Arc<IdentityProvider>> {
        let entity_id = entity_id.into();
        let mut idps = self.idps.write();
        let previous = idps.insert(entity_id.clone(), Arc::new(idp));

        if previous.is_some() {
            debug!(entity_id = %entity_id, "Replaced existing IdP entry");
        }

        previous
    }

    pub fn idp(&self, entity_id: &str) -> Option<Arc<IdentityProvider>> {
        self.idps.read().get(entity_id).cloned()
    }

    pub fn contains_idp(&self, entity_id: &str) -> bool {
        self.idps.read().contains_key(entity_id)
    }

    pub fn remove_idp(&self, entity_id: &str) -> bool {
        let removed = self.idps.write().remove(entity_id).is_some();
        if removed {
            info!(entity_id = %entity_id, "IdP removed from circle of trust");
        }
        removed
    }

    /// Registered IdP entity ids, sorted
    pub fn idp_entity_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.idps.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn idp_count(&self) -> usize {
        self.idps.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.idps.read().is_empty()
    }

    pub fn summary(&self) -> CotSummary {
        CotSummary {
            sp_entity_id: self.sp().map(|sp| sp.entity_id.clone()),
            idp_entity_ids: self.idp_entity_ids(),
        }
    }
}
