use crate::{error::ComposeError, registry::Registry, traits::Model, value::Value};
use derive_more::Deref;
use std::collections::BTreeMap;

///
/// DelegateOptions
///
/// Naming and nil policy for one delegation declaration.
/// Defaults mirror the declarative surface: prefixed accessors, tolerated
/// nil relations, empty-text fallback.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegateOptions {
    pub prefix: bool,
    pub allow_nil: bool,
    pub nil_fallback: Value,
}

impl DelegateOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            prefix: true,
            allow_nil: true,
            nil_fallback: Value::empty_text(),
        }
    }

    /// Name generated accessors `{method}` instead of `{relation}_{method}`.
    #[must_use]
    pub fn without_prefix(mut self) -> Self {
        self.prefix = false;
        self
    }

    /// Raise `MissingRelation` when the related instance is absent.
    #[must_use]
    pub fn deny_nil(mut self) -> Self {
        self.allow_nil = false;
        self
    }

    /// Value returned when the relation is absent and nil is tolerated.
    #[must_use]
    pub fn nil_fallback(mut self, fallback: impl Into<Value>) -> Self {
        self.nil_fallback = fallback.into();
        self
    }
}

impl Default for DelegateOptions {
    fn default() -> Self {
        Self::new()
    }
}

///
/// DelegationRule
///
/// One delegation declaration: which relations forward their decorated
/// methods, and under what naming and nil policy. Immutable once read.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegationRule {
    pub relations: Vec<String>,
    pub prefix: bool,
    pub allow_nil: bool,
    pub nil_fallback: Value,
}

impl DelegationRule {
    pub(crate) fn new(relations: Vec<String>, options: DelegateOptions) -> Self {
        Self {
            relations,
            prefix: options.prefix,
            allow_nil: options.allow_nil,
            nil_fallback: options.nil_fallback,
        }
    }

    /// Accessor name this rule generates for one (relation, method) pair.
    #[must_use]
    pub fn accessor_name(&self, relation: &str, method: &str) -> String {
        if self.prefix {
            format!("{relation}_{method}")
        } else {
            method.to_string()
        }
    }
}

///
/// DelegationRules
///
/// Rule list for one host type, most recently declared rule first.
///

#[derive(Clone, Debug, Default, Deref)]
pub struct DelegationRules(Vec<DelegationRule>);

impl DelegationRules {
    /// Create an empty rule list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Build the successor list with `rule` ahead of existing rules.
    pub(crate) fn prepend(&self, rule: DelegationRule) -> Self {
        let mut next = Vec::with_capacity(self.0.len() + 1);
        next.push(rule);
        next.extend(self.0.iter().cloned());

        Self(next)
    }

    /// Return an iterator over the rules, most recently declared first.
    pub fn iter(&self) -> std::slice::Iter<'_, DelegationRule> {
        self.0.iter()
    }
}

///
/// Forwarder
///
/// One generated forwarding accessor. Stateless: every call re-resolves the
/// relation and re-decorates the related instance with its own chain.
///

#[derive(Clone, Debug)]
pub struct Forwarder {
    host: &'static str,
    relation: String,
    method: String,
    allow_nil: bool,
    nil_fallback: Value,
}

impl Forwarder {
    pub(crate) fn new(
        host: &'static str,
        relation: String,
        method: String,
        allow_nil: bool,
        nil_fallback: Value,
    ) -> Self {
        Self {
            host,
            relation,
            method,
            allow_nil,
            nil_fallback,
        }
    }

    #[must_use]
    pub const fn host(&self) -> &'static str {
        self.host
    }

    #[must_use]
    pub fn relation(&self) -> &str {
        &self.relation
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Resolve the relation on `host`, decorate the related instance, and
    /// invoke the decorated method.
    ///
    /// Loader errors propagate unchanged. An absent relation yields the nil
    /// fallback when tolerated, `MissingRelation` otherwise.
    pub fn call(&self, registry: &Registry, host: &dyn Model) -> Result<Value, ComposeError> {
        match host.relation(&self.relation)? {
            Some(related) => {
                let path = related.model_path();

                registry.decorate_path(path, related).invoke(&self.method)
            }
            None if self.allow_nil => Ok(self.nil_fallback.clone()),
            None => Err(ComposeError::MissingRelation {
                relation: self.relation.clone(),
                host: self.host,
            }),
        }
    }
}

///
/// Forwarders
///
/// Accessor-name map produced by one resolution pass. Name collisions are
/// settled at generation time; the map itself never deduplicates.
///

#[derive(Clone, Debug, Default)]
pub struct Forwarders(BTreeMap<String, Forwarder>);

impl Forwarders {
    pub(crate) fn insert(&mut self, name: String, forwarder: Forwarder) {
        self.0.insert(name, forwarder);
    }

    /// Return the forwarder registered under `accessor`, if any.
    #[must_use]
    pub fn get(&self, accessor: &str) -> Option<&Forwarder> {
        self.0.get(accessor)
    }

    /// Accessor names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Return an iterator over (accessor name, forwarder) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Forwarder)> {
        self.0.iter().map(|(name, fwd)| (name.as_str(), fwd))
    }

    /// Return the number of generated accessors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if resolution generated no accessors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Invoke an accessor by name against `host`.
    pub fn call(
        &self,
        registry: &Registry,
        host: &dyn Model,
        accessor: &str,
    ) -> Result<Value, ComposeError> {
        let forwarder = self
            .get(accessor)
            .ok_or_else(|| ComposeError::UnknownAccessor {
                accessor: accessor.to_string(),
            })?;

        forwarder.call(registry, host)
    }
}
