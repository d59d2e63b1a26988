use thiserror::Error as ThisError;

///
/// ComposeError
///
/// Structured failures for the decoration and delegation surfaces.
/// Relation loaders construct `UndeclaredAssociation`; everything else is
/// raised by this crate and surfaced to the caller unchanged.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ComposeError {
    #[error("missing relation '{relation}' on {host}")]
    MissingRelation {
        relation: String,
        host: &'static str,
    },

    #[error("undeclared association '{relation}' on {host}")]
    UndeclaredAssociation {
        relation: String,
        host: &'static str,
    },

    #[error("unknown decorated method: {method}")]
    UnknownMethod { method: String },

    #[error("unknown forwarding accessor: {accessor}")]
    UnknownAccessor { accessor: String },
}

impl ComposeError {
    /// Construct the error a relation loader should raise for a relation
    /// name the host type does not declare.
    pub fn undeclared(relation: impl Into<String>, host: &'static str) -> Self {
        Self::UndeclaredAssociation {
            relation: relation.into(),
            host,
        }
    }

    /// Construct the fall-through error for a method no layer handles.
    pub fn unknown_method(method: impl Into<String>) -> Self {
        Self::UnknownMethod {
            method: method.into(),
        }
    }
}
