#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod policy;
pub mod record;

pub use self::record::{ConfigRecord, ParseError};
pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
pub use kube::{
    core::{DynamicObject, TypeMeta},
    Resource, ResourceExt,
};
