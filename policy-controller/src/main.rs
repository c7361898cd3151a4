#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod static_store;

use self::static_store::StaticStore;
use anyhow::{Context, Result};
use clap::Parser;
use sso_policy_controller_core::{Port, PolicyResolver, Service};
use std::{num::NonZeroU16, path::PathBuf};
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[clap(
    name = "sso-policy",
    version,
    about = "Resolves the OIDC policy bound to a service port"
)]
struct Args {
    #[clap(long, default_value = "sso=info,warn", env = "SSO_POLICY_LOG")]
    log_level: kubert::LogFilter,

    #[clap(long, default_value = "plain")]
    log_format: kubert::LogFormat,

    /// A YAML file of policy resources, one per document.
    #[clap(long, env = "SSO_POLICY_RECORDS")]
    records: PathBuf,

    /// The cluster's DNS domain, used to qualify short service names in policy targets.
    #[clap(long, default_value = "cluster.local")]
    cluster_domain: String,

    /// The destination service's fully-qualified hostname.
    #[clap(long)]
    service: String,

    #[clap(long)]
    port: NonZeroU16,

    #[clap(long)]
    port_name: Option<String>,
}

fn main() -> Result<()> {
    let Args {
        log_level,
        log_format,
        records,
        cluster_domain,
        service,
        port,
        port_name,
    } = Args::parse();

    log_format.try_init(log_level)?;

    let store = StaticStore::load(&records, cluster_domain)
        .with_context(|| format!("failed to load {}", records.display()))?;
    debug!(records = store.len(), "Loaded policy records");

    let service = Service::new(service);
    let port = Port {
        name: port_name,
        port,
    };
    match PolicyResolver::new(&store).resolve(&service, &port)? {
        Some(policy) => println!("{}", serde_json::to_string_pretty(&policy)?),
        None => {
            info!(%service, %port, "No policy bound");
            println!("no policy");
        }
    }

    Ok(())
}
