use crate::{error::ComposeError, value::Value};
use std::sync::Arc;

// ============================================================================
// FOUNDATIONAL KINDS
// ============================================================================
//
// These traits define *what a type is* to the registry,
// not what data it contains.
//

///
/// Path
/// Fully-qualified host-type path, used as the registry key.
///

pub trait Path {
    const PATH: &'static str;
}

// impl_path
#[macro_export]
macro_rules! impl_path {
    ( $( $type:ty => $path:expr ),* $(,)? ) => {
        $(
            impl $crate::traits::Path for $type {
                const PATH: &'static str = $path;
            }
        )*
    };
}

// ============================================================================
// DECORATION SURFACES
// ============================================================================

///
/// Decorated
///
/// The method surface a wrapped object exposes. Every decoration step
/// (including the raw instance at the bottom of the stack) presents this
/// contract; layers forward methods they do not handle to their inner object.
///

pub trait Decorated {
    /// Names of the methods this object answers to, outermost additions
    /// first. Duplicates are the implementor's concern.
    fn method_names(&self) -> Vec<&'static str>;

    /// Invoke a method by name.
    ///
    /// A name no layer handles must fall through to
    /// [`ComposeError::UnknownMethod`].
    fn invoke(&self, method: &str) -> Result<Value, ComposeError>;
}

///
/// Layer
///
/// One decorator layer. `wrap` receives the current decoration stack and
/// returns a new outermost object; failures inside `wrap` are the layer's
/// own and propagate unchanged.
///

pub trait Layer: 'static {
    /// Stable layer name, used for diagnostics and chain snapshots.
    fn layer_name(&self) -> &'static str;

    fn wrap(&self, inner: Box<dyn Decorated>) -> Box<dyn Decorated>;
}

// ============================================================================
// MODEL INSTANCES
// ============================================================================

///
/// Model
///
/// A host or related instance: the raw method surface plus the to-one
/// relation loader supplied by the collaborating persistence layer.
///

pub trait Model: Decorated {
    /// Runtime mirror of [`Path::PATH`], for dispatch on dynamically loaded
    /// related instances.
    fn model_path(&self) -> &'static str;

    /// Resolve a to-one relation to at most one related instance.
    ///
    /// Loaders raise [`ComposeError::UndeclaredAssociation`] for relation
    /// names the host type does not declare; this crate propagates that
    /// error without translation.
    fn relation(&self, name: &str) -> Result<Option<Arc<dyn Model>>, ComposeError>;
}
