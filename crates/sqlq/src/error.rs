//! Error types for sqlq

use thiserror::Error;

/// Result type alias for rendering operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised while rendering a [`Query`](crate::Query).
///
/// Building never fails; a malformed node stays inert until a renderer walks
/// it. Every variant carries the path of the offending node, e.g.
/// `where[1].or[0]` or `left_join[0].on[2]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Node shape cannot be rendered (empty fragment, empty group, ...)
    #[error("Malformed condition at {path}: {reason}")]
    Malformed { path: String, reason: String },

    /// Raw fragment whose `?` count differs from its parameter count
    #[error(
        "Placeholder mismatch at {path}: {placeholders} placeholder(s) but {params} parameter(s)"
    )]
    PlaceholderMismatch {
        path: String,
        placeholders: usize,
        params: usize,
    },

    /// Node kind the active renderer does not handle
    #[error("Unsupported condition at {path}: {renderer} renderer cannot render raw fragments with parameters")]
    Unsupported {
        path: String,
        renderer: &'static str,
    },
}

impl QueryError {
    /// Create a malformed-node error
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Path of the node that failed to render
    pub fn path(&self) -> &str {
        match self {
            Self::Malformed { path, .. }
            | Self::PlaceholderMismatch { path, .. }
            | Self::Unsupported { path, .. } => path,
        }
    }

    /// Check if this is a malformed-node error
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }

    /// Check if this is a placeholder/parameter count mismatch
    pub fn is_placeholder_mismatch(&self) -> bool {
        matches!(self, Self::PlaceholderMismatch { .. })
    }

    /// Check if this is an unsupported-node error
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}
