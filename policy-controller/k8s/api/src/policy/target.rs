use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::{fmt, num::NonZeroU16};

/// Selects a service, and optionally a subset of its ports.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TargetSelector {
    /// Either a short service name, resolved in the policy's namespace, or a fully-qualified
    /// hostname.
    pub name: String,
    pub ports: Option<Vec<PortSelector>>,
}

/// References a service port by number or name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum PortSelector {
    Number(NonZeroU16),
    Name(String),
}

impl TargetSelector {
    pub fn ports(&self) -> &[PortSelector] {
        self.ports.as_deref().unwrap_or_default()
    }
}

impl fmt::Display for PortSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortSelector::Number(n) => fmt::Display::fmt(n, f),
            PortSelector::Name(n) => fmt::Display::fmt(n, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbered_and_named_ports() {
        let target: TargetSelector = serde_json::from_value(serde_json::json!({
            "name": "reviews",
            "ports": [9080, "http-web"],
        }))
        .unwrap();
        assert_eq!(
            target.ports(),
            [
                PortSelector::Number(NonZeroU16::new(9080).unwrap()),
                PortSelector::Name("http-web".to_string()),
            ]
        );
    }

    #[test]
    fn zero_is_not_a_port_number() {
        let port: PortSelector = serde_json::from_value(serde_json::json!("0")).unwrap();
        assert_eq!(port, PortSelector::Name("0".to_string()));
        assert!(serde_json::from_value::<PortSelector>(serde_json::json!(0)).is_err());
    }
}
