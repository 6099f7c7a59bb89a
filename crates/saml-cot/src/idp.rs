//! Identity Provider descriptor held by the circle of trust

use crate::metadata::{EntityDescriptor, Endpoint, IdpSsoDescriptor};
use chrono::{DateTime, Utc};

/// A trusted Identity Provider, built from its metadata.
///
/// Immutable once created; the registry hands it out behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProvider {
    descriptor: EntityDescriptor,
}

impl IdentityProvider {
    #[must_use]
    pub fn new(descriptor: EntityDescriptor) -> Self {
        Self { descriptor }
    }

    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.descriptor.entity_id
    }

    #[must_use]
    pub fn descriptor(&self) -> &EntityDescriptor {
        &self.descriptor
    }

    /// The `IDPSSODescriptor` role, if the metadata declares one
    #[must_use]
    pub fn sso_role(&self) -> Option<&IdpSsoDescriptor> {
        self.descriptor.idp_sso.as_ref()
    }

    /// DER certificates usable for verifying this IdP's signatures
    pub fn signing_certificates(&self) -> impl Iterator<Item = &[u8]> {
        self.sso_role()
            .into_iter()
            .flat_map(|role| role.key_descriptors.iter())
            .filter(|key| key.usage.can_sign())
            .flat_map(|key| key.certificates.iter().map(Vec::as_slice))
    }

    /// First `SingleSignOnService` endpoint for the given binding
    #[must_use]
    pub fn single_sign_on_service(&self, binding: &str) -> Option<&Endpoint> {
        self.sso_role()?
            .single_sign_on_services
            .iter()
            .find(|endpoint| endpoint.binding == binding)
    }

    /// Whether the metadata's `validUntil` lies before `now`
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.descriptor
            .valid_until
            .is_some_and(|valid_until| valid_until < now)
    }
}

impl From<EntityDescriptor> for IdentityProvider {
    fn from(descriptor: EntityDescriptor) -> Self {
        Self::new(descriptor)
    }
}
