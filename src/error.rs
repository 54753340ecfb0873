// ⚠️ Merge Errors
// Every failure of a single merge call is returned to the caller as a value

use thiserror::Error;

/// Which level of the localized tree a lookup was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Category,
    Subcategory,
    Difficulty,
    Item,
    Checklist,
    Form,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Category => "category",
            NodeKind::Subcategory => "subcategory",
            NodeKind::Difficulty => "difficulty",
            NodeKind::Item => "item",
            NodeKind::Checklist => "checklist",
            NodeKind::Form => "form",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// Row count or row kind disagrees with the schema node
    #[error("shape mismatch for {node} {id:?}: {detail}")]
    ShapeMismatch {
        node: NodeKind,
        id: String,
        detail: String,
    },

    /// A required ancestor is not in the registry for this locale
    #[error("no {kind} {id:?} ({locale})")]
    NotFound {
        kind: NodeKind,
        id: String,
        locale: String,
    },

    /// Schema input named a node kind the dispatcher does not know
    #[error("invalid component: {0:?}")]
    UnsupportedVariant(String),
}

impl MergeError {
    pub fn shape(node: NodeKind, id: impl Into<String>, detail: impl Into<String>) -> Self {
        MergeError::ShapeMismatch {
            node,
            id: id.into(),
            detail: detail.into(),
        }
    }

    pub fn not_found(kind: NodeKind, id: impl Into<String>, locale: impl Into<String>) -> Self {
        MergeError::NotFound {
            kind,
            id: id.into(),
            locale: locale.into(),
        }
    }

    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, MergeError::ShapeMismatch { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, MergeError::NotFound { .. })
    }
}

pub type MergeResult<T = ()> = Result<T, MergeError>;
