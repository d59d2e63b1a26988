//! Point-in-time registry reports for observability surfaces.
//!
//! Reports are plain serializable data; they never hold layer or instance
//! references and are safe to ship across a diagnostics boundary.

use crate::{registry::Registry, value::Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

///
/// RegistryReport
/// Live snapshot of every declared chain and delegation rule.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RegistryReport {
    pub hosts: Vec<HostSnapshot>,
}

///
/// HostSnapshot
/// Per-host-type configuration breakdown.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct HostSnapshot {
    /// Host type path (e.g. `app::models::Post`).
    pub path: String,

    /// Declared layer names in application order.
    pub layers: Vec<String>,

    /// Delegation rules, most recently declared first.
    pub delegations: Vec<DelegationSnapshot>,
}

///
/// DelegationSnapshot
/// One delegation rule, flattened for reporting.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DelegationSnapshot {
    pub relations: Vec<String>,
    pub prefix: bool,
    pub allow_nil: bool,
    pub nil_fallback: Value,
}

impl Registry {
    /// Build a point-in-time report over every host type with declarations.
    /// Hosts are emitted in path order.
    #[must_use]
    pub fn report(&self) -> RegistryReport {
        let mut paths: BTreeSet<&'static str> = self.chains.keys().copied().collect();
        paths.extend(self.delegations.keys().copied());

        let hosts = paths
            .into_iter()
            .map(|path| HostSnapshot {
                path: path.to_string(),
                layers: self
                    .chains
                    .get(path)
                    .map(|chain| chain.layer_names().into_iter().map(String::from).collect())
                    .unwrap_or_default(),
                delegations: self
                    .delegations
                    .get(path)
                    .map(|rules| {
                        rules
                            .iter()
                            .map(|rule| DelegationSnapshot {
                                relations: rule.relations.clone(),
                                prefix: rule.prefix,
                                allow_nil: rule.allow_nil,
                                nil_fallback: rule.nil_fallback.clone(),
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect();

        RegistryReport { hosts }
    }
}
