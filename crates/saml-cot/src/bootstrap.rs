//! One-time initialization of the metadata parsing stack
//!
//! Runs a self-check by parsing a built-in IdP document. The outcome is
//! memoized for the life of the process.

use crate::error::BootstrapError;
use crate::metadata::{EntityDescriptor, BINDING_HTTP_REDIRECT};
use std::sync::OnceLock;
use tracing::debug;

const SELF_CHECK_ENTITY_ID: &str = "urn:saml-cot:bootstrap";

const SELF_CHECK_METADATA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata"
    xmlns:ds="http://www.w3.org/2000/09/xmldsig#"
    entityID="urn:saml-cot:bootstrap">
    <md:IDPSSODescriptor protocolSupportEnumeration="urn:oasis:names:tc:SAML:2.0:protocol">
        <md:KeyDescriptor use="signing">
            <ds:KeyInfo><ds:X509Data><ds:X509Certificate>Ym9vdHN0cmFw</ds:X509Certificate></ds:X509Data></ds:KeyInfo>
        </md:KeyDescriptor>
        <md:SingleSignOnService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect"
            Location="https://localhost/sso"/>
    </md:IDPSSODescriptor>
</md:EntityDescriptor>"#;

/// Initialize the metadata stack. Subsequent calls return the first result.
pub fn initialize() -> Result<(), BootstrapError> {
    static RESULT: OnceLock<Result<(), BootstrapError>> = OnceLock::new();
    RESULT.get_or_init(self_check).clone()
}

fn self_check() -> Result<(), BootstrapError> {
    let descriptor = EntityDescriptor::parse(SELF_CHECK_METADATA)
        .map_err(|e| BootstrapError(e.to_string()))?;

    if descriptor.entity_id != SELF_CHECK_ENTITY_ID {
        return Err(BootstrapError(format!(
            "self-check parsed unexpected entityID {}",
            descriptor.entity_id
        )));
    }

    let role = descriptor
        .idp_sso
        .ok_or_else(|| BootstrapError("self-check lost the IDPSSODescriptor".to_string()))?;

    let sso_ok = role
        .single_sign_on_services
        .iter()
        .any(|endpoint| endpoint.binding == BINDING_HTTP_REDIRECT);
    let key_ok = role.key_descriptors.first().is_some_and(|key| {
        key.certificates.first().map(Vec::as_slice) == Some(b"bootstrap".as_slice())
    });

    if !sso_ok || !key_ok {
        return Err(BootstrapError(
            "self-check metadata was not fully extracted".to_string(),
        ));
    }

    debug!("SAML metadata stack initialized");
    Ok(())
}
