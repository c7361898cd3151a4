//! SSO Policy Core
//!
//! Resolves the OpenID Connect policy that applies to traffic bound for a destination, i.e. a
//! service and one of its ports. Policies are owned by a [`ConfigStore`]; the resolver only reads
//! them, checks that the store handed back an `OidcPolicy` record, and returns its spec.
//!
//! ```text
//! (Service, Port) -> [ ConfigStore ] -> ConfigRecord -> [ PolicyResolver ] -> OidcPolicySpec
//! ```

#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod destination;
mod resolve;
mod store;


pub use self::{
    destination::{normalize_hostname, Port, Service},
    resolve::{resolve_oidc_policy, PolicyResolver, SchemaViolation},
    store::ConfigStore,
};
pub use sso_policy_controller_k8s_api::{
    policy::{OidcPolicy, OidcPolicySpec, PortSelector, TargetSelector},
    ConfigRecord,
};
