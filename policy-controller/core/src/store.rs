use crate::{Port, Service};
use sso_policy_controller_k8s_api::ConfigRecord;
use std::sync::Arc;

/// Models the configuration store that owns policy bindings.
///
/// Lookups are reads: implementations must not mutate state on behalf of a caller, and must be
/// `Sync` if a resolver is shared across threads.
pub trait ConfigStore {
    /// Returns the OIDC policy record bound to the destination, if any.
    ///
    /// Records returned from this lookup are expected to be of the `OidcPolicy` kind.
    fn oidc_policy_by_destination(&self, service: &Service, port: &Port) -> Option<ConfigRecord>;
}

impl<S: ConfigStore + ?Sized> ConfigStore for &S {
    #[inline]
    fn oidc_policy_by_destination(&self, service: &Service, port: &Port) -> Option<ConfigRecord> {
        (**self).oidc_policy_by_destination(service, port)
    }
}

impl<S: ConfigStore + ?Sized> ConfigStore for Arc<S> {
    #[inline]
    fn oidc_policy_by_destination(&self, service: &Service, port: &Port) -> Option<ConfigRecord> {
        (**self).oidc_policy_by_destination(service, port)
    }
}

impl<S: ConfigStore + ?Sized> ConfigStore for Box<S> {
    #[inline]
    fn oidc_policy_by_destination(&self, service: &Service, port: &Port) -> Option<ConfigRecord> {
        (**self).oidc_policy_by_destination(service, port)
    }
}
