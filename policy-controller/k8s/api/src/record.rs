//! Untyped configuration records.
//!
//! A store hands out records whose payload may be any resource kind. Consumers check the kind
//! with [`is_kind`] before reading the payload with [`parse_spec`].

use kube::{core::DynamicObject, Resource};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// A configuration entry whose spec is polymorphic over resource kinds.
pub type ConfigRecord = DynamicObject;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("record has no spec")]
    MissingSpec,

    #[error("failed to decode spec: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Indicates whether the record's type metadata names the resource type `T`.
///
/// Records without type metadata are never of a known kind.
pub fn is_kind<T>(record: &ConfigRecord) -> bool
where
    T: Resource,
    T::DynamicType: Default,
{
    let Some(types) = record.types.as_ref() else {
        return false;
    };

    let dt = Default::default();
    let group = match types.api_version.split_once('/') {
        Some((group, _version)) => group,
        // Core resources carry only a version.
        None => "",
    };
    group.eq_ignore_ascii_case(&T::group(&dt)) && types.kind.eq_ignore_ascii_case(&T::kind(&dt))
}

/// Returns the kind named by the record's type metadata, if any.
pub fn kind(record: &ConfigRecord) -> Option<&str> {
    record.types.as_ref().map(|t| t.kind.as_str())
}

/// Decodes the record's `spec` field.
pub fn parse_spec<T: DeserializeOwned>(record: &ConfigRecord) -> Result<T, ParseError> {
    let spec = record.data.get("spec").ok_or(ParseError::MissingSpec)?;
    Ok(T::deserialize(spec)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{OidcPolicy, OidcPolicySpec, PortSelector, TargetSelector};
    use kube::core::{ApiResource, TypeMeta};
    use std::num::NonZeroU16;

    fn record(api_version: &str, kind: &str, data: serde_json::Value) -> ConfigRecord {
        let mut obj = DynamicObject::new("reviews-sso", &ApiResource::erase::<OidcPolicy>(&()))
            .within("bookinfo")
            .data(data);
        obj.types = Some(TypeMeta {
            api_version: api_version.to_string(),
            kind: kind.to_string(),
        });
        obj
    }

    #[test]
    fn matches_group_and_kind() {
        let rec = record(
            "authentication.sso.io/v1alpha1",
            "OidcPolicy",
            serde_json::json!({}),
        );
        assert!(is_kind::<OidcPolicy>(&rec));
        assert_eq!(kind(&rec), Some("OidcPolicy"));

        let rec = record(
            "authentication.sso.io/v1alpha1",
            "oidcpolicy",
            serde_json::json!({}),
        );
        assert!(is_kind::<OidcPolicy>(&rec), "kinds are case-insensitive");
    }

    #[test]
    fn rejects_other_kinds() {
        let rec = record(
            "policy.linkerd.io/v1alpha1",
            "HTTPLocalRateLimitPolicy",
            serde_json::json!({}),
        );
        assert!(!is_kind::<OidcPolicy>(&rec));

        let rec = record("policy.sso.io/v1alpha1", "OidcPolicy", serde_json::json!({}));
        assert!(!is_kind::<OidcPolicy>(&rec), "group must match");

        let rec = record("v1", "OidcPolicy", serde_json::json!({}));
        assert!(!is_kind::<OidcPolicy>(&rec), "core group must not match");

        let mut rec = record(
            "authentication.sso.io/v1alpha1",
            "OidcPolicy",
            serde_json::json!({}),
        );
        rec.types = None;
        assert!(!is_kind::<OidcPolicy>(&rec));
        assert_eq!(kind(&rec), None);
    }

    #[test]
    fn parses_spec() {
        let rec = record(
            "authentication.sso.io/v1alpha1",
            "OidcPolicy",
            serde_json::json!({
                "spec": {
                    "targets": [{ "name": "reviews", "ports": [9080] }],
                    "issuer": "https://idp.example.com",
                    "jwksUri": "https://idp.example.com/jwks",
                },
            }),
        );
        let spec = parse_spec::<OidcPolicySpec>(&rec).expect("spec must parse");
        assert_eq!(
            spec,
            OidcPolicySpec {
                targets: Some(vec![TargetSelector {
                    name: "reviews".to_string(),
                    ports: Some(vec![PortSelector::Number(NonZeroU16::new(9080).unwrap())]),
                }]),
                issuer: "https://idp.example.com".to_string(),
                jwks_uri: Some("https://idp.example.com/jwks".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn missing_or_malformed_spec() {
        let rec = record(
            "authentication.sso.io/v1alpha1",
            "OidcPolicy",
            serde_json::json!({ "status": {} }),
        );
        assert!(matches!(
            parse_spec::<OidcPolicySpec>(&rec),
            Err(ParseError::MissingSpec)
        ));

        let rec = record(
            "authentication.sso.io/v1alpha1",
            "OidcPolicy",
            serde_json::json!({ "spec": { "requestsPerSecond": 10 } }),
        );
        assert!(matches!(
            parse_spec::<OidcPolicySpec>(&rec),
            Err(ParseError::Decode(_))
        ));
    }
}
