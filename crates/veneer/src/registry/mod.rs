//! The two registries at the heart of the crate.
//!
//! A [`Registry`] records, per host type, an ordered decorator chain and an
//! ordered delegation rule list. Declarations happen during a configuration
//! phase; `decorate` and resolved forwarders consume the recorded state at
//! use time. Both lists share the same ordering policy: the most recent
//! declaration runs (or wins) first.

mod chain;
mod delegation;


pub use chain::DecoratorChain;
pub use delegation::{DelegateOptions, DelegationRule, DelegationRules, Forwarder, Forwarders};

use crate::{
    error::ComposeError,
    traits::{Decorated, Layer, Model, Path},
    value::Value,
};
use std::{collections::BTreeMap, sync::Arc};

///
/// Registry
///
/// Explicit per-host-type configuration store, keyed by [`Path::PATH`].
/// Declarations copy the affected list, so chains and rule lists already
/// handed out stay valid snapshots; later declarations are visible only to
/// later reads.
///

#[derive(Clone, Debug, Default)]
pub struct Registry {
    pub(crate) chains: BTreeMap<&'static str, DecoratorChain>,
    pub(crate) delegations: BTreeMap<&'static str, DelegationRules>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            chains: BTreeMap::new(),
            delegations: BTreeMap::new(),
        }
    }

    // ------------------------------------------------------------------
    // Decorator chain registry
    // ------------------------------------------------------------------

    /// Declare decorator layers for host type `H`.
    ///
    /// The declared layers, in their given order, are applied *before* every
    /// previously declared layer: after `declare_decorators([A, B])` followed
    /// by `declare_decorators([C, D])` the chain is `[C, D, A, B]`.
    /// Duplicates are allowed and apply more than once.
    pub fn declare_decorators<H: Path>(&mut self, layers: Vec<Arc<dyn Layer>>) {
        let next = self
            .chains
            .get(H::PATH)
            .cloned()
            .unwrap_or_default()
            .prepend(layers);

        self.chains.insert(H::PATH, next);
    }

    /// Current decorator chain for `H`, empty if never declared.
    #[must_use]
    pub fn decorator_chain<H: Path>(&self) -> DecoratorChain {
        self.chains.get(H::PATH).cloned().unwrap_or_default()
    }

    /// Fold `H`'s decorator chain over an instance.
    ///
    /// The first chain element wraps the raw instance, each later element
    /// wraps the previous wrapper; the outermost wrapper is returned. An
    /// empty chain leaves the instance's surface untouched. Layer failures
    /// propagate unchanged.
    #[must_use]
    pub fn decorate<H: Path>(&self, instance: Arc<dyn Model>) -> Box<dyn Decorated> {
        self.decorate_path(H::PATH, instance)
    }

    /// [`Self::decorate`] for a runtime path, used when the concrete type of
    /// a related instance is only known dynamically.
    #[must_use]
    pub fn decorate_path(&self, path: &str, instance: Arc<dyn Model>) -> Box<dyn Decorated> {
        let mut wrapped: Box<dyn Decorated> = Box::new(BaseModel(instance));

        if let Some(chain) = self.chains.get(path) {
            for layer in chain.iter() {
                wrapped = layer.wrap(wrapped);
            }
        }

        wrapped
    }

    // ------------------------------------------------------------------
    // Delegation registry
    // ------------------------------------------------------------------

    /// Declare a delegation rule for host type `H`.
    ///
    /// Relation names are not validated here; the relation loader reports
    /// undeclared associations at call time.
    pub fn declare_delegation<H: Path>(&mut self, relations: Vec<String>, options: DelegateOptions) {
        let next = self
            .delegations
            .get(H::PATH)
            .cloned()
            .unwrap_or_default()
            .prepend(DelegationRule::new(relations, options));

        self.delegations.insert(H::PATH, next);
    }

    /// Current delegation rules for `H`, most recently declared first.
    #[must_use]
    pub fn delegation_rules<H: Path>(&self) -> DelegationRules {
        self.delegations.get(H::PATH).cloned().unwrap_or_default()
    }

    /// Relation names across all of `H`'s rules, flattened in rule order.
    #[must_use]
    pub fn delegated_relations<H: Path>(&self) -> Vec<String> {
        self.delegation_rules::<H>()
            .iter()
            .flat_map(|rule| rule.relations.iter().cloned())
            .collect()
    }

    /// Generate forwarding accessors for every (rule, relation, method)
    /// combination declared on `H`.
    ///
    /// `methods` is the decorated method surface of the related instances,
    /// supplied by the caller. Name collisions resolve by recency: rules are
    /// generated oldest first so a newer rule's accessor overwrites an older
    /// one's.
    #[must_use]
    pub fn resolve_forwarders<H: Path>(&self, methods: &[&str]) -> Forwarders {
        let mut forwarders = Forwarders::default();

        let Some(rules) = self.delegations.get(H::PATH) else {
            return forwarders;
        };

        for rule in rules.iter().rev() {
            for relation in &rule.relations {
                for method in methods {
                    forwarders.insert(
                        rule.accessor_name(relation, method),
                        Forwarder::new(
                            H::PATH,
                            relation.clone(),
                            (*method).to_string(),
                            rule.allow_nil,
                            rule.nil_fallback.clone(),
                        ),
                    );
                }
            }
        }

        forwarders
    }
}

///
/// BaseModel
///
/// Innermost decoration step: presents the raw instance's own surface.
/// With an empty chain this is all `decorate` returns, which keeps the
/// empty-chain identity property.
///

struct BaseModel(Arc<dyn Model>);

impl Decorated for BaseModel {
    fn method_names(&self) -> Vec<&'static str> {
        self.0.method_names()
    }

    fn invoke(&self, method: &str) -> Result<Value, ComposeError> {
        self.0.invoke(method)
    }
}
