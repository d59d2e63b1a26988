use crate::traits::Layer;
use derive_more::Deref;
use std::{fmt, sync::Arc};

///
/// DecoratorChain
///
/// Ordered decorator layers for one host type, stored in application order:
/// the first element wraps the raw instance, the last produces the outermost
/// wrapper. Chains are snapshots; a declaration builds a fresh chain rather
/// than mutating one already handed out.
///

#[derive(Clone, Default, Deref)]
pub struct DecoratorChain(Vec<Arc<dyn Layer>>);

impl DecoratorChain {
    /// Create an empty chain.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Build the successor chain for one declaration: the declared layers,
    /// in their given order, ahead of every previously declared layer.
    pub(crate) fn prepend(&self, layers: Vec<Arc<dyn Layer>>) -> Self {
        let mut next = layers;
        next.extend(self.0.iter().cloned());

        Self(next)
    }

    /// Return the number of layers in the chain.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no layers have been declared.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return an iterator over the layers in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<dyn Layer>> {
        self.0.iter()
    }

    /// Layer names in application order, for diagnostics and tests.
    #[must_use]
    pub fn layer_names(&self) -> Vec<&'static str> {
        self.0.iter().map(|layer| layer.layer_name()).collect()
    }
}

impl fmt::Debug for DecoratorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.layer_names()).finish()
    }
}
