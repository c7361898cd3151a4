pub mod oidc_policy;
pub mod target;

pub use self::{
    oidc_policy::{OidcPolicy, OidcPolicySpec},
    target::{PortSelector, TargetSelector},
};
