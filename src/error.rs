//! Error type for the annotation engine.
//!
//! Every variant describes a caller contract violation (InvalidArgument
//! class). Failures of the external [TaxonomyResolver](crate::lineage::TaxonomyResolver)
//! are modelled separately by [ResolveError](crate::lineage::ResolveError)
//! and never surface here.

use crate::model::NodeIndex;

// =#========================================================================#=
// ANNOTATION ERROR
// =#========================================================================#=
/// Errors raised when an engine operation receives invalid input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnnotationError {
    /// Generic invalid argument, e.g. an empty string handed to color derivation
    #[error("Invalid argument - {0}")]
    InvalidArgument(String),

    /// Tree has no root set and can thus not be traversed
    #[error("Tree has no root")]
    MissingRoot,

    /// Node index does not exist in the tree's arena
    #[error("Node {0} is not part of the tree")]
    UnknownNode(NodeIndex),

    /// Node is reachable twice from the root or would get a second parent
    #[error("Malformed tree structure at node {0}")]
    MalformedTree(NodeIndex),

    /// Text could not be parsed as `#rrggbb` color
    #[error("Invalid color '{0}' - expected #rrggbb")]
    InvalidColor(String),

    /// Annotation reference not of the form `source:value`
    #[error("Invalid annotation reference '{0}' - expected source:value")]
    InvalidAnnotationRef(String),
}

impl AnnotationError {
    /// Convenience constructor for [AnnotationError::InvalidArgument].
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        AnnotationError::InvalidArgument(msg.into())
    }

    /// Returns `true` for every variant: all engine errors are caller
    /// contract violations.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            AnnotationError::InvalidArgument(_)
                | AnnotationError::MissingRoot
                | AnnotationError::UnknownNode(_)
                | AnnotationError::MalformedTree(_)
                | AnnotationError::InvalidColor(_)
                | AnnotationError::InvalidAnnotationRef(_)
        )
    }
}
