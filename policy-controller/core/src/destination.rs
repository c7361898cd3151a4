use sso_policy_controller_k8s_api::policy::PortSelector;
use std::{fmt, num::NonZeroU16};

/// A network-addressable destination, identified by its fully-qualified hostname
/// (e.g. `reviews.bookinfo.svc.cluster.local`).
///
/// Hostnames built with [`Service::new`] are lower-cased and have an absolute name's trailing
/// dot removed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Service {
    pub hostname: String,
}

/// A port exposed by a [`Service`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Port {
    pub name: Option<String>,
    pub port: NonZeroU16,
}

// === impl Service ===

impl Service {
    pub fn new(hostname: impl AsRef<str>) -> Self {
        Self {
            hostname: normalize_hostname(hostname.as_ref()),
        }
    }

    /// The service's short name.
    pub fn name(&self) -> &str {
        self.hostname
            .split_once('.')
            .map_or(&*self.hostname, |(name, _)| name)
    }

    /// The namespace encoded in the hostname, if the hostname is qualified.
    pub fn namespace(&self) -> Option<&str> {
        let mut labels = self.hostname.split('.');
        labels.next()?;
        labels.next().filter(|ns| !ns.is_empty())
    }
}

/// Lower-cases a DNS name and strips the trailing dot of an absolute name.
pub fn normalize_hostname(hostname: &str) -> String {
    hostname
        .strip_suffix('.')
        .unwrap_or(hostname)
        .to_ascii_lowercase()
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.hostname, f)
    }
}

// === impl Port ===

impl Port {
    pub fn new(port: NonZeroU16) -> Self {
        Self { name: None, port }
    }

    pub fn named(name: impl Into<String>, port: NonZeroU16) -> Self {
        Self {
            name: Some(name.into()),
            port,
        }
    }

    pub fn matches(&self, selector: &PortSelector) -> bool {
        match selector {
            PortSelector::Number(n) => *n == self.port,
            PortSelector::Name(n) => self.name.as_deref() == Some(n.as_str()),
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name.as_deref() {
            Some(name) => write!(f, "{}/{}", name, self.port),
            None => fmt::Display::fmt(&self.port, f),
        }
    }
}
