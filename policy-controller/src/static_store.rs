//! A read-only set of policy records loaded from a file.
//!
//! Policies bind to destinations the same way the mesh binds authentication policies:
//!
//! - A policy whose targets name the service--and, if the target lists ports, one of the
//!   destination's ports--applies to that service.
//! - A policy named `default` without targets applies to every service in its namespace.
//!
//! Service-level bindings take precedence over namespace-level bindings. When several policies
//! bind at the same level, the first in file order wins.

use serde::Deserialize;
use sso_policy_controller_core::{
    normalize_hostname, ConfigRecord, ConfigStore, OidcPolicy, OidcPolicySpec, Port, Service,
    TargetSelector,
};
use sso_policy_controller_k8s_api::{record, ResourceExt};
use std::{fs, io, path::Path};
use thiserror::Error;
use tracing::warn;

const DEFAULT_POLICY_NAME: &str = "default";

#[derive(Clone, Debug)]
pub(crate) struct StaticStore {
    records: Vec<ConfigRecord>,
    cluster_domain: String,
}

#[derive(Debug, Error)]
pub(crate) enum LoadError {
    #[error("failed to read records: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse records: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Binding {
    Namespace,
    Service,
}

// === impl StaticStore ===

impl StaticStore {
    pub(crate) fn load(path: &Path, cluster_domain: String) -> Result<Self, LoadError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml(&yaml, cluster_domain)
    }

    pub(crate) fn from_yaml(yaml: &str, cluster_domain: String) -> Result<Self, LoadError> {
        let mut records = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            let value = serde_yaml::Value::deserialize(doc)?;
            // Empty documents, e.g. a trailing `---`.
            if value.is_null() {
                continue;
            }
            records.push(serde_yaml::from_value(value)?);
        }

        Ok(Self {
            records,
            cluster_domain,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    fn binding(
        &self,
        ns: &str,
        name: &str,
        spec: &OidcPolicySpec,
        service: &Service,
        port: &Port,
    ) -> Option<Binding> {
        let targets = spec.targets();
        if targets.is_empty() {
            return (name == DEFAULT_POLICY_NAME).then_some(Binding::Namespace);
        }

        targets
            .iter()
            .any(|t| self.targets_service(t, ns, service) && targets_port(t, port))
            .then_some(Binding::Service)
    }

    fn targets_service(&self, target: &TargetSelector, ns: &str, service: &Service) -> bool {
        let name = normalize_hostname(&target.name);
        if name.contains('.') {
            return name == service.hostname;
        }

        let fqdn = format!("{}.{}.svc.{}", name, ns, self.cluster_domain);
        normalize_hostname(&fqdn) == service.hostname
    }
}

fn targets_port(target: &TargetSelector, port: &Port) -> bool {
    let ports = target.ports();
    ports.is_empty() || ports.iter().any(|p| port.matches(p))
}

impl ConfigStore for StaticStore {
    fn oidc_policy_by_destination(&self, service: &Service, port: &Port) -> Option<ConfigRecord> {
        // Callers may build a `Service` without `Service::new`.
        let service = &Service::new(&service.hostname);
        let ns = service.namespace()?;

        let mut bound: Option<(Binding, &ConfigRecord)> = None;
        for rec in &self.records {
            let in_ns = rec
                .metadata
                .namespace
                .as_deref()
                .is_some_and(|rns| rns.eq_ignore_ascii_case(ns));
            if !in_ns || !record::is_kind::<OidcPolicy>(rec) {
                continue;
            }

            let name = rec.name_any();
            let spec = match record::parse_spec::<OidcPolicySpec>(rec) {
                Ok(spec) => spec,
                Err(error) => {
                    warn!(%error, %ns, %name, "Skipping unreadable policy");
                    continue;
                }
            };

            let Some(binding) = self.binding(ns, &name, &spec, service, port) else {
                continue;
            };
            if bound.map_or(true, |(b, _)| binding > b) {
                bound = Some((binding, rec));
            }
            if binding == Binding::Service {
                break;
            }
        }

        bound.map(|(_, rec)| rec.clone())
    }
}
