//! `EntityDescriptor` parsing

use super::{
    EntityDescriptor, Endpoint, IdpSsoDescriptor, KeyDescriptor, KeyUsage, SAML_METADATA_NS,
    XMLDSIG_NS,
};
use crate::error::{CotError, CotResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Reader};
use std::io::Read;

/// Namespace of an element, reduced to the ones metadata parsing cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ns {
    Metadata,
    DSig,
    Other,
}

impl Ns {
    fn classify(resolved: &ResolveResult<'_>) -> Self {
        match resolved {
            ResolveResult::Bound(Namespace(ns)) if *ns == SAML_METADATA_NS.as_bytes() => {
                Self::Metadata
            }
            ResolveResult::Bound(Namespace(ns)) if *ns == XMLDSIG_NS.as_bytes() => Self::DSig,
            _ => Self::Other,
        }
    }
}

/// Element whose text content is being collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Certificate,
    NameIdFormat,
}

impl EntityDescriptor {
    /// Parse a metadata document whose root is `md:EntityDescriptor`.
    pub fn parse(xml: &str) -> CotResult<Self> {
        let mut state = ParseState::default();
        let mut reader = NsReader::from_str(xml);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_resolved_event() {
                Ok((ns, Event::Start(e))) => {
                    let ns = Ns::classify(&ns);
                    state.start(ns, &e)?;
                }
                Ok((ns, Event::Empty(e))) => {
                    let ns = Ns::classify(&ns);
                    state.start(ns, &e)?;
                    state.end(ns, e.local_name().as_ref())?;
                }
                Ok((ns, Event::End(e))) => {
                    let ns = Ns::classify(&ns);
                    state.end(ns, e.local_name().as_ref())?;
                }
                Ok((_, Event::Text(t))) => {
                    if state.root_closed && !t.iter().all(u8::is_ascii_whitespace) {
                        return Err(CotError::MalformedXml(
                            "content after the root element".to_string(),
                        ));
                    }
                    if state.capture.is_some() {
                        let text = t
                            .unescape()
                            .map_err(|e| CotError::MalformedXml(e.to_string()))?;
                        state.text.push_str(&text);
                    }
                }
                Ok((_, Event::CData(c))) => {
                    if state.root_closed {
                        return Err(CotError::MalformedXml(
                            "content after the root element".to_string(),
                        ));
                    }
                    if state.capture.is_some() {
                        let text = std::str::from_utf8(&c)
                            .map_err(|e| CotError::MalformedXml(e.to_string()))?;
                        state.text.push_str(text);
                    }
                }
                Ok((_, Event::Eof)) => break,
                Err(e) => return Err(CotError::MalformedXml(e.to_string())),
                Ok(_) => {}
            }
        }

        state.finish(xml)
    }

    /// Read and parse a metadata document, rejecting input larger than
    /// `max_bytes`.
    ///
    /// The bytes are decoded with the encoding named by the BOM or the XML
    /// declaration, UTF-8 otherwise.
    pub fn from_reader<R: Read>(reader: R, max_bytes: u64) -> CotResult<Self> {
        let mut buf = Vec::new();
        reader
            .take(max_bytes.saturating_add(1))
            .read_to_end(&mut buf)?;

        if buf.len() as u64 > max_bytes {
            return Err(CotError::MetadataTooLarge { limit: max_bytes });
        }

        let xml = decode_document(&buf)?;
        Self::parse(&xml)
    }
}

#[derive(Default)]
struct ParseState {
    depth: usize,
    root_closed: bool,
    entity_id: Option<String>,
    valid_until: Option<DateTime<Utc>>,
    cache_duration: Option<String>,
    has_sp_role: bool,
    idp_sso: Option<IdpSsoDescriptor>,
    // IDPSSODescriptor currently open (only the first one is kept)
    current_idp: Option<IdpSsoDescriptor>,
    current_key: Option<KeyDescriptor>,
    capture: Option<Capture>,
    text: String,
}

impl ParseState {
    fn start(&mut self, ns: Ns, e: &BytesStart<'_>) -> CotResult<()> {
        if self.root_closed {
            return Err(CotError::MalformedXml(
                "content after the root element".to_string(),
            ));
        }

        let local = e.local_name();
        let name = std::str::from_utf8(local.as_ref()).unwrap_or("");

        if self.depth == 0 {
            if ns != Ns::Metadata || name != "EntityDescriptor" {
                return Err(CotError::WrongRootElement(
                    String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                ));
            }
            self.root(e)?;
            self.depth += 1;
            return Ok(());
        }
        self.depth += 1;

        match (ns, name) {
            (Ns::Metadata, "IDPSSODescriptor") if self.depth == 2 && self.idp_sso.is_none() => {
                self.current_idp = Some(IdpSsoDescriptor {
                    protocol_support: attribute(e, "protocolSupportEnumeration")?
                        .map(|v| v.split_whitespace().map(str::to_string).collect())
                        .unwrap_or_default(),
                    want_authn_requests_signed: attribute(e, "WantAuthnRequestsSigned")?
                        .is_some_and(|v| v == "true" || v == "1"),
                    ..IdpSsoDescriptor::default()
                });
            }
            (Ns::Metadata, "SPSSODescriptor") if self.depth == 2 => {
                self.has_sp_role = true;
            }
            _ if self.current_idp.is_none() => {}
            (Ns::Metadata, "KeyDescriptor") => {
                self.current_key = Some(KeyDescriptor {
                    usage: KeyUsage::from_attr(attribute(e, "use")?.as_deref()),
                    certificates: Vec::new(),
                });
            }
            (Ns::DSig, "X509Certificate") if self.current_key.is_some() => {
                self.begin_capture(Capture::Certificate);
            }
            (Ns::Metadata, "NameIDFormat") => {
                self.begin_capture(Capture::NameIdFormat);
            }
            (Ns::Metadata, "SingleSignOnService" | "SingleLogoutService") => {
                let endpoint = endpoint(e)?;
                if let Some(idp) = self.current_idp.as_mut() {
                    if name == "SingleSignOnService" {
                        idp.single_sign_on_services.push(endpoint);
                    } else {
                        idp.single_logout_services.push(endpoint);
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn end(&mut self, ns: Ns, local: &[u8]) -> CotResult<()> {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.root_closed = true;
        }

        match (ns, local) {
            (Ns::DSig, b"X509Certificate") if self.capture == Some(Capture::Certificate) => {
                let der = decode_certificate(&self.take_capture())?;
                if let Some(key) = self.current_key.as_mut() {
                    key.certificates.push(der);
                }
            }
            (Ns::Metadata, b"NameIDFormat") if self.capture == Some(Capture::NameIdFormat) => {
                let format = self.take_capture().trim().to_string();
                if let Some(idp) = self.current_idp.as_mut() {
                    if !format.is_empty() {
                        idp.name_id_formats.push(format);
                    }
                }
            }
            (Ns::Metadata, b"KeyDescriptor") => {
                if let (Some(key), Some(idp)) = (self.current_key.take(), self.current_idp.as_mut())
                {
                    idp.key_descriptors.push(key);
                }
            }
            (Ns::Metadata, b"IDPSSODescriptor") if self.depth == 1 => {
                if let Some(idp) = self.current_idp.take() {
                    self.idp_sso = Some(idp);
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn root(&mut self, e: &BytesStart<'_>) -> CotResult<()> {
        self.entity_id = attribute(e, "entityID")?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        if let Some(raw) = attribute(e, "validUntil")? {
            self.valid_until = Some(parse_date_time(&raw)?);
        }
        self.cache_duration = attribute(e, "cacheDuration")?;

        Ok(())
    }

    fn begin_capture(&mut self, capture: Capture) {
        self.capture = Some(capture);
        self.text.clear();
    }

    fn take_capture(&mut self) -> String {
        self.capture = None;
        std::mem::take(&mut self.text)
    }

    fn finish(self, xml: &str) -> CotResult<EntityDescriptor> {
        if !self.root_closed {
            return if self.depth == 0 {
                Err(CotError::EmptyDocument)
            } else {
                Err(CotError::MalformedXml(
                    "unexpected end of document".to_string(),
                ))
            };
        }

        let entity_id = self.entity_id.ok_or(CotError::MissingEntityId)?;

        Ok(EntityDescriptor {
            entity_id,
            valid_until: self.valid_until,
            cache_duration: self.cache_duration,
            idp_sso: self.idp_sso,
            has_sp_role: self.has_sp_role,
            raw_xml: xml.to_string(),
        })
    }
}

/// Decode raw metadata bytes to text.
///
/// Only the first event is read: that is where quick-xml picks up a BOM or an
/// `encoding` pseudo-attribute.
fn decode_document(bytes: &[u8]) -> CotResult<String> {
    let mut reader = Reader::from_reader(bytes);
    let mut scratch = Vec::new();
    reader
        .read_event_into(&mut scratch)
        .map_err(|e| CotError::MalformedXml(e.to_string()))?;

    let decoder = reader.decoder();
    let text = decoder.decode(bytes).map_err(|e| {
        CotError::MalformedXml(format!(
            "metadata is not valid {}: {e}",
            decoder.encoding().name()
        ))
    })?;

    Ok(text.trim_start_matches('\u{feff}').to_string())
}

/// Look up an unqualified attribute by local name
fn attribute(e: &BytesStart<'_>, name: &str) -> CotResult<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| CotError::MalformedXml(err.to_string()))?;
        if attr.key.prefix().is_none() && attr.key.local_name().as_ref() == name.as_bytes() {
            // Equivalent of `Attribute::unescape_value`, which quick-xml hides
            // behind the `encoding` feature; the parsed text is always UTF-8.
            let raw = std::str::from_utf8(&attr.value)
                .map_err(|err| CotError::MalformedXml(err.to_string()))?;
            let value = quick_xml::escape::unescape(raw)
                .map_err(|err| CotError::MalformedXml(err.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn endpoint(e: &BytesStart<'_>) -> CotResult<Endpoint> {
    let binding = attribute(e, "Binding")?;
    let location = attribute(e, "Location")?;

    match (binding, location) {
        (Some(binding), Some(location)) => Ok(Endpoint {
            binding,
            location,
            response_location: attribute(e, "ResponseLocation")?,
        }),
        _ => Err(CotError::MalformedXml(format!(
            "{} requires Binding and Location attributes",
            String::from_utf8_lossy(e.name().as_ref())
        ))),
    }
}

fn decode_certificate(text: &str) -> CotResult<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(CotError::InvalidCertificate("empty certificate".to_string()));
    }

    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| CotError::InvalidCertificate(e.to_string()))
}

/// xs:dateTime; a value without a zone designator is taken as UTC
fn parse_date_time(raw: &str) -> CotResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| CotError::InvalidValidUntil(format!("{raw}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{BINDING_HTTP_POST, BINDING_HTTP_REDIRECT};

    // "hello" / "world" stand in for DER bytes
    const IDP_METADATA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata"
    xmlns:ds="http://www.w3.org/2000/09/xmldsig#"
    entityID="https://idp.example.org/saml"
    validUntil="2040-01-01T00:00:00Z"
    cacheDuration="PT6H">
    <md:IDPSSODescriptor WantAuthnRequestsSigned="true"
        protocolSupportEnumeration="urn:oasis:names:tc:SAML:2.0:protocol">
        <md:KeyDescriptor use="signing">
            <ds:KeyInfo>
                <ds:X509Data>
                    <ds:X509Certificate>
                        aGVs
                        bG8=
                    </ds:X509Certificate>
                </ds:X509Data>
            </ds:KeyInfo>
        </md:KeyDescriptor>
        <md:KeyDescriptor use="encryption">
            <ds:KeyInfo>
                <ds:X509Data>
                    <ds:X509Certificate>d29ybGQ=</ds:X509Certificate>
                </ds:X509Data>
            </ds:KeyInfo>
        </md:KeyDescriptor>
        <md:SingleLogoutService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect"
            Location="https://idp.example.org/saml/slo"
            ResponseLocation="https://idp.example.org/saml/slo/response"/>
        <md:NameIDFormat>urn:oasis:names:tc:SAML:1.1:nameid-format:emailAddress</md:NameIDFormat>
        <md:NameIDFormat>urn:oasis:names:tc:SAML:2.0:nameid-format:persistent</md:NameIDFormat>
        <md:SingleSignOnService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect"
            Location="https://idp.example.org/saml/sso/redirect"/>
        <md:SingleSignOnService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST"
            Location="https://idp.example.org/saml/sso/post"/>
    </md:IDPSSODescriptor>
</md:EntityDescriptor>"#;

    #[test]
    fn test_parse_idp_metadata() {
        let descriptor = EntityDescriptor::parse(IDP_METADATA).unwrap();

        assert_eq!(descriptor.entity_id, "https://idp.example.org/saml");
        assert_eq!(descriptor.cache_duration.as_deref(), Some("PT6H"));
        assert_eq!(
            descriptor.valid_until.unwrap().to_rfc3339(),
            "2040-01-01T00:00:00+00:00"
        );
        assert!(!descriptor.has_sp_role);
        assert_eq!(descriptor.raw_xml, IDP_METADATA);

        let idp = descriptor.idp_sso.unwrap();
        assert!(idp.want_authn_requests_signed);
        assert_eq!(
            idp.protocol_support,
            vec!["urn:oasis:names:tc:SAML:2.0:protocol".to_string()]
        );
        assert_eq!(idp.name_id_formats.len(), 2);
        assert_eq!(idp.single_sign_on_services.len(), 2);
        assert_eq!(idp.single_sign_on_services[0].binding, BINDING_HTTP_REDIRECT);
        assert_eq!(idp.single_sign_on_services[1].binding, BINDING_HTTP_POST);
        assert_eq!(
            idp.single_logout_services[0].response_location.as_deref(),
            Some("https://idp.example.org/saml/slo/response")
        );

        assert_eq!(idp.key_descriptors.len(), 2);
        assert_eq!(idp.key_descriptors[0].usage, KeyUsage::Signing);
        assert_eq!(idp.key_descriptors[0].certificates, vec![b"hello".to_vec()]);
        assert_eq!(idp.key_descriptors[1].usage, KeyUsage::Encryption);
        assert_eq!(idp.key_descriptors[1].certificates, vec![b"world".to_vec()]);
    }

    #[test]
    fn test_parse_default_namespace() {
        let xml = r#"<EntityDescriptor xmlns="urn:oasis:names:tc:SAML:2.0:metadata"
            entityID="urn:idp:default-ns">
            <IDPSSODescriptor protocolSupportEnumeration="urn:oasis:names:tc:SAML:2.0:protocol">
                <SingleSignOnService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST"
                    Location="https://idp.example.net/sso"/>
            </IDPSSODescriptor>
        </EntityDescriptor>"#;

        let descriptor = EntityDescriptor::parse(xml).unwrap();
        assert_eq!(descriptor.entity_id, "urn:idp:default-ns");
        let idp = descriptor.idp_sso.unwrap();
        assert!(!idp.want_authn_requests_signed);
        assert_eq!(idp.single_sign_on_services[0].location, "https://idp.example.net/sso");
    }

    #[test]
    fn test_parse_sp_only_metadata() {
        let xml = r#"<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata"
            entityID="https://sp.example.com">
            <md:SPSSODescriptor protocolSupportEnumeration="urn:oasis:names:tc:SAML:2.0:protocol"/>
        </md:EntityDescriptor>"#;

        let descriptor = EntityDescriptor::parse(xml).unwrap();
        assert!(descriptor.has_sp_role);
        assert!(descriptor.idp_sso.is_none());
    }

    #[test]
    fn test_entities_descriptor_root_rejected() {
        let xml = r#"<md:EntitiesDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata">
            <md:EntityDescriptor entityID="https://idp.example.org"/>
        </md:EntitiesDescriptor>"#;

        let err = EntityDescriptor::parse(xml).unwrap_err();
        assert!(matches!(err, CotError::WrongRootElement(ref name) if name == "md:EntitiesDescriptor"));
    }

    #[test]
    fn test_root_in_wrong_namespace_rejected() {
        let xml = r#"<EntityDescriptor xmlns="urn:example:not-saml" entityID="x"/>"#;
        let err = EntityDescriptor::parse(xml).unwrap_err();
        assert!(matches!(err, CotError::WrongRootElement(_)));

        let xml = r#"<EntityDescriptor entityID="x"/>"#;
        let err = EntityDescriptor::parse(xml).unwrap_err();
        assert!(matches!(err, CotError::WrongRootElement(_)));
    }

    #[test]
    fn test_missing_entity_id() {
        let xml = r#"<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata"/>"#;
        let err = EntityDescriptor::parse(xml).unwrap_err();
        assert!(matches!(err, CotError::MissingEntityId));

        let xml = r#"<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata" entityID="  "/>"#;
        let err = EntityDescriptor::parse(xml).unwrap_err();
        assert!(matches!(err, CotError::MissingEntityId));
    }

    #[test]
    fn test_malformed_xml() {
        let xml = r#"<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata" entityID="x">
            <md:IDPSSODescriptor>
        </md:EntityDescriptor>"#;
        let err = EntityDescriptor::parse(xml).unwrap_err();
        assert!(matches!(err, CotError::MalformedXml(_)));
    }

    #[test]
    fn test_truncated_document() {
        let xml = r#"<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata" entityID="x">"#;
        let err = EntityDescriptor::parse(xml).unwrap_err();
        assert!(matches!(err, CotError::MalformedXml(_)));
    }

    #[test]
    fn test_trailing_content_rejected() {
        let root = r#"<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata" entityID="urn:idp"/>"#;

        let err = EntityDescriptor::parse(&format!("{root}garbage text")).unwrap_err();
        assert!(err.to_string().contains("content after the root element"));

        let err = EntityDescriptor::parse(&format!("{root}<![CDATA[x]]>")).unwrap_err();
        assert!(matches!(err, CotError::MalformedXml(_)));

        let descriptor = EntityDescriptor::parse(&format!("{root}\n  <!-- trailing comment -->\n")).unwrap();
        assert_eq!(descriptor.entity_id, "urn:idp");
    }

    #[test]
    fn test_empty_document() {
        let err = EntityDescriptor::parse("").unwrap_err();
        assert!(matches!(err, CotError::EmptyDocument));

        let err = EntityDescriptor::parse("not xml at all").unwrap_err();
        assert!(matches!(err, CotError::EmptyDocument));
    }

    #[test]
    fn test_invalid_certificate() {
        let xml = r#"<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata"
            xmlns:ds="http://www.w3.org/2000/09/xmldsig#" entityID="x">
            <md:IDPSSODescriptor protocolSupportEnumeration="urn:oasis:names:tc:SAML:2.0:protocol">
                <md:KeyDescriptor>
                    <ds:KeyInfo><ds:X509Data>
                        <ds:X509Certificate>!!not-base64!!</ds:X509Certificate>
                    </ds:X509Data></ds:KeyInfo>
                </md:KeyDescriptor>
            </md:IDPSSODescriptor>
        </md:EntityDescriptor>"#;
        let err = EntityDescriptor::parse(xml).unwrap_err();
        assert!(matches!(err, CotError::InvalidCertificate(_)));
    }

    #[test]
    fn test_valid_until_formats() {
        let xml = r#"<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata"
            entityID="x" validUntil="2035-06-01T12:00:00"/>"#;
        let descriptor = EntityDescriptor::parse(xml).unwrap();
        assert_eq!(
            descriptor.valid_until.unwrap().to_rfc3339(),
            "2035-06-01T12:00:00+00:00"
        );

        let xml = r#"<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata"
            entityID="x" validUntil="next tuesday"/>"#;
        let err = EntityDescriptor::parse(xml).unwrap_err();
        assert!(matches!(err, CotError::InvalidValidUntil(_)));
    }

    #[test]
    fn test_endpoint_requires_location() {
        let xml = r#"<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata" entityID="x">
            <md:IDPSSODescriptor protocolSupportEnumeration="urn:oasis:names:tc:SAML:2.0:protocol">
                <md:SingleSignOnService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST"/>
            </md:IDPSSODescriptor>
        </md:EntityDescriptor>"#;
        let err = EntityDescriptor::parse(xml).unwrap_err();
        assert!(err.to_string().contains("Binding and Location"));
    }

    #[test]
    fn test_from_reader_size_cap() {
        let err = EntityDescriptor::from_reader(IDP_METADATA.as_bytes(), 64).unwrap_err();
        assert!(matches!(err, CotError::MetadataTooLarge { limit: 64 }));

        let limit = IDP_METADATA.len() as u64;
        let descriptor = EntityDescriptor::from_reader(IDP_METADATA.as_bytes(), limit).unwrap();
        assert_eq!(descriptor.entity_id, "https://idp.example.org/saml");
    }

    #[test]
    fn test_from_reader_honours_declared_encoding() {
        let mut bytes = br#"<?xml version="1.0" encoding="ISO-8859-1"?>
<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata" entityID="urn:idp:latin1">
    <md:Organization>
        <md:OrganizationName xml:lang="fr">Caf"#
            .to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(
            br#"</md:OrganizationName>
    </md:Organization>
</md:EntityDescriptor>"#,
        );

        let descriptor = EntityDescriptor::from_reader(bytes.as_slice(), 4096).unwrap();
        assert_eq!(descriptor.entity_id, "urn:idp:latin1");
        assert!(descriptor.raw_xml.contains("Caf\u{e9}"));
    }

    #[test]
    fn test_from_reader_strips_utf8_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(
            br#"<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata" entityID="urn:idp:bom"/>"#,
        );

        let descriptor = EntityDescriptor::from_reader(bytes.as_slice(), 4096).unwrap();
        assert_eq!(descriptor.entity_id, "urn:idp:bom");
        assert!(descriptor.raw_xml.starts_with('<'));
    }

    #[test]
    fn test_from_reader_rejects_non_utf8() {
        let bytes: &[u8] = &[0x3c, 0xff, 0xfe, 0x3e];
        let err = EntityDescriptor::from_reader(bytes, 1024).unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }
}
