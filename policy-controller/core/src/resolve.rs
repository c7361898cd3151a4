use crate::{ConfigStore, Port, Service};
use sso_policy_controller_k8s_api::{
    policy::{OidcPolicy, OidcPolicySpec},
    record, ConfigRecord, ParseError, ResourceExt,
};
use thiserror::Error;
use tracing::{dispatcher, Dispatch};

/// Resolves the OIDC policy bound to a destination.
///
/// Diagnostics are emitted through the resolver's own [`Dispatch`] rather than the thread's
/// default subscriber.
#[derive(Clone, Debug)]
pub struct PolicyResolver<S> {
    store: S,
    dispatch: Dispatch,
}

/// Indicates that the store returned a record for an OIDC lookup that is not a readable
/// `OidcPolicy`.
///
/// This is never a caller error: the store's contents are corrupt and the record must not be
/// treated as if no policy were configured.
#[derive(Debug, Error)]
pub enum SchemaViolation {
    #[error("{namespace}/{name} is a {kind} record, not an OidcPolicy")]
    UnexpectedKind {
        namespace: String,
        name: String,
        kind: String,
    },

    #[error("{namespace}/{name} has an invalid OidcPolicy spec: {source}")]
    InvalidSpec {
        namespace: String,
        name: String,
        #[source]
        source: ParseError,
    },
}

/// Resolves the OIDC policy bound to `service` and `port`, logging through the default
/// subscriber.
pub fn resolve_oidc_policy<S: ConfigStore>(
    store: S,
    service: &Service,
    port: &Port,
) -> Result<Option<OidcPolicySpec>, SchemaViolation> {
    PolicyResolver::new(store).resolve(service, port)
}

// === impl PolicyResolver ===

impl<S: ConfigStore> PolicyResolver<S> {
    /// Creates a resolver that logs to the dispatcher that is current at construction.
    pub fn new(store: S) -> Self {
        let dispatch = dispatcher::get_default(Dispatch::clone);
        Self::with_dispatch(store, dispatch)
    }

    pub fn with_dispatch(store: S, dispatch: Dispatch) -> Self {
        Self { store, dispatch }
    }

    /// Looks up the destination's policy record and reads it as an `OidcPolicy`.
    ///
    /// Returns `Ok(None)` when no policy is bound to the destination.
    pub fn resolve(
        &self,
        service: &Service,
        port: &Port,
    ) -> Result<Option<OidcPolicySpec>, SchemaViolation> {
        let Some(record) = self.store.oidc_policy_by_destination(service, port) else {
            return Ok(None);
        };

        let policy = match read_policy(&record) {
            Ok(policy) => policy,
            Err(error) => {
                dispatcher::with_default(&self.dispatch, || {
                    tracing::error!(%error, %service, %port, "sso - invalid policy record");
                });
                return Err(error);
            }
        };

        dispatcher::with_default(&self.dispatch, || {
            tracing::info!(
                ns = %record.namespace().unwrap_or_default(),
                name = %record.name_any(),
                %service,
                %port,
                ?policy,
                "sso - returning policy"
            );
        });

        Ok(Some(policy))
    }
}

fn read_policy(record: &ConfigRecord) -> Result<OidcPolicySpec, SchemaViolation> {
    let namespace = record.namespace().unwrap_or_default();
    let name = record.name_any();

    if !record::is_kind::<OidcPolicy>(record) {
        return Err(SchemaViolation::UnexpectedKind {
            namespace,
            name,
            kind: record::kind(record).unwrap_or("untyped").to_string(),
        });
    }

    record::parse_spec(record).map_err(|source| SchemaViolation::InvalidSpec {
        namespace,
        name,
        source,
    })
}
