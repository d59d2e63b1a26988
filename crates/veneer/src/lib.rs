//! Declarative decorator composition and relation delegation for data-model
//! types, exported via the `prelude`.
//!
//! Two independent registries attach configuration to a host type: an
//! ordered decorator chain consumed by `decorate`, and a delegation rule
//! list consumed by `resolve_forwarders`. Both follow the same policy: the
//! most recent declaration runs first.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod error;
pub mod registry;
pub mod snapshot;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, snapshots, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        registry::{DelegateOptions, Registry},
        traits::{Decorated, Layer, Model, Path},
        value::Value,
    };
}
