use super::TargetSelector;

/// Describes how requests to a set of destinations are authenticated against an OpenID Connect
/// provider.
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    kube::CustomResource,
    serde::Deserialize,
    serde::Serialize,
    schemars::JsonSchema,
)]
#[kube(
    group = "authentication.sso.io",
    version = "v1alpha1",
    kind = "OidcPolicy",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct OidcPolicySpec {
    /// Destinations this policy binds to. A policy without targets may only apply
    /// namespace-wide.
    pub targets: Option<Vec<TargetSelector>>,

    pub issuer: String,
    pub jwks_uri: Option<String>,
    pub audiences: Option<Vec<String>>,
    pub client_id: Option<String>,
    pub scopes: Option<Vec<String>>,
}

impl OidcPolicySpec {
    pub fn targets(&self) -> &[TargetSelector] {
        self.targets.as_deref().unwrap_or_default()
    }
}
