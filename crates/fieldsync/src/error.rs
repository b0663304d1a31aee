//! Controller errors.

use fieldsync_core::{ComponentId, TagError};
use fieldsync_widgets::SceneError;
use std::fmt;
use thiserror::Error;

/// Controller operation, used to label rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Stage batches of components
    InitStage,
    /// Place one component
    PlaceComponent,
    /// Add a connection
    Connect,
    /// Remove a connection
    Disconnect,
    /// Remove a component
    RemoveComponent,
    /// Drag a component
    DragComponent,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InitStage => "init_stage",
            Self::PlaceComponent => "place_component",
            Self::Connect => "connect",
            Self::Disconnect => "disconnect",
            Self::RemoveComponent => "remove_component",
            Self::DragComponent => "drag_component",
        };
        f.write_str(name)
    }
}

/// Why a controller operation did nothing.
///
/// Whatever the variant, neither the scene nor the logic layer was changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    /// An argument names a component that is not on the field.
    #[error("component {0} is not on the field")]
    MissingComponent(ComponentId),

    /// The logic layer has no spec for this kind.
    #[error("no component specification for '{0}'")]
    UnknownKind(String),

    /// The logic layer refused the proposal.
    #[error("{op} rejected: {info}")]
    Rejected {
        /// Refused operation
        op: Operation,
        /// Reason given by the logic layer
        info: String,
    },

    /// A component spec carries conflicting capability tags.
    #[error(transparent)]
    Tags(#[from] TagError),

    /// The component may not be dragged.
    #[error("component {0} is not draggable")]
    NotDraggable(ComponentId),

    /// The scene refused the mutation.
    #[error(transparent)]
    Scene(#[from] SceneError),
}

impl ControlError {
    /// Whether the logic layer refused the operation.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
