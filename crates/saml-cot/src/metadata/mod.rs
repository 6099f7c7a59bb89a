//! SAML 2.0 metadata model
//!
//! Only the parts of an `md:EntityDescriptor` the circle of trust needs are
//! modelled: the entity identifier, validity, and the first IdP SSO role with
//! its keys and endpoints. The source document text is kept alongside.

mod parser;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// SAML 2.0 metadata namespace
pub const SAML_METADATA_NS: &str = "urn:oasis:names:tc:SAML:2.0:metadata";

/// XML digital signature namespace (`ds:KeyInfo`, `ds:X509Certificate`)
pub const XMLDSIG_NS: &str = "http://www.w3.org/2000/09/xmldsig#";

/// SAML 2.0 HTTP-Redirect binding URI
pub const BINDING_HTTP_REDIRECT: &str = "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect";

/// SAML 2.0 HTTP-POST binding URI
pub const BINDING_HTTP_POST: &str = "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST";

/// Default cap on metadata document size (1 MiB)
pub const DEFAULT_MAX_METADATA_BYTES: u64 = 1024 * 1024;

/// Parsed `md:EntityDescriptor`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    pub entity_id: String,
    pub valid_until: Option<DateTime<Utc>>,
    pub cache_duration: Option<String>,
    pub idp_sso: Option<IdpSsoDescriptor>,
    pub has_sp_role: bool,
    pub raw_xml: String,
}

/// `md:IDPSSODescriptor` role
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdpSsoDescriptor {
    pub protocol_support: Vec<String>,
    pub want_authn_requests_signed: bool,
    pub key_descriptors: Vec<KeyDescriptor>,
    pub name_id_formats: Vec<String>,
    pub single_sign_on_services: Vec<Endpoint>,
    pub single_logout_services: Vec<Endpoint>,
}

/// `md:KeyDescriptor` with its decoded certificates (DER)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDescriptor {
    pub usage: KeyUsage,
    pub certificates: Vec<Vec<u8>>,
}

/// Value of the `use` attribute on `md:KeyDescriptor`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyUsage {
    Signing,
    Encryption,
    /// No `use` attribute: the key serves both purposes
    Unspecified,
}

impl KeyUsage {
    fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("signing") => Self::Signing,
            Some("encryption") => Self::Encryption,
            _ => Self::Unspecified,
        }
    }

    /// Whether a key with this usage may verify signatures
    #[must_use]
    pub fn can_sign(self) -> bool {
        matches!(self, Self::Signing | Self::Unspecified)
    }
}

/// Protocol endpoint (`SingleSignOnService`, `SingleLogoutService`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub binding: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_location: Option<String>,
}
