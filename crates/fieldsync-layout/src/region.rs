//! Play-field regions.

use fieldsync_core::{Capability, Rect};
use serde::{Deserialize, Serialize};

/// Axis along which a region spreads its components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spread {
    /// Vertical column centred horizontally (clients, endpoints)
    Column,
    /// Horizontal row centred vertically (processors)
    Row,
}

/// One zone of the play field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Zone rectangle: left boundary, top boundary, width, height
    pub rect: Rect,
    /// Spread axis
    pub spread: Spread,
    /// Whether staging more components re-lays out those already placed
    #[serde(default = "default_relayout")]
    pub relayout_existing: bool,
}

const fn default_relayout() -> bool {
    true
}

impl Region {
    /// A column region that re-lays out existing components.
    #[must_use]
    pub const fn column(rect: Rect) -> Self {
        Self {
            rect,
            spread: Spread::Column,
            relayout_existing: true,
        }
    }

    /// A row region that leaves existing components where they are.
    #[must_use]
    pub const fn row(rect: Rect) -> Self {
        Self {
            rect,
            spread: Spread::Row,
            relayout_existing: false,
        }
    }

    /// Override the re-layout policy.
    #[must_use]
    pub const fn relayout_existing(mut self, relayout: bool) -> Self {
        self.relayout_existing = relayout;
        self
    }
}

/// The three zones of the canvas plus an optional movement boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayField {
    /// Client column (left)
    pub client_space: Region,
    /// Processor row (middle)
    pub component_space: Region,
    /// Endpoint column (right)
    pub endpoint_space: Region,
    /// Containment applied to every component placed on the field
    #[serde(default)]
    pub bounds: Option<Rect>,
}

impl PlayField {
    /// Split a `width` x `height` canvas: 15% client column on the left, 15%
    /// endpoint column on the right, processors in between.
    #[must_use]
    pub fn split(width: f32, height: f32) -> Self {
        let side = width * 0.15;
        Self {
            client_space: Region::column(Rect::new(0.0, 0.0, side, height)),
            component_space: Region::row(Rect::new(side, 0.0, width - 2.0 * side, height)),
            endpoint_space: Region::column(Rect::new(width - side, 0.0, side, height)),
            bounds: Some(Rect::new(0.0, 0.0, width, height)),
        }
    }

    /// Region that hosts components of a capability.
    #[must_use]
    pub const fn region_for(&self, capability: Capability) -> &Region {
        match capability {
            Capability::Client => &self.client_space,
            Capability::Processor => &self.component_space,
            Capability::Endpoint => &self.endpoint_space,
        }
    }
}

impl Default for PlayField {
    fn default() -> Self {
        Self::split(1280.0, 720.0)
    }
}
