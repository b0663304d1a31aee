//! Directed edges between components.

use fieldsync_core::{Canvas, Color, ComponentId, Point};
use serde::{Deserialize, Serialize};

use crate::component::InterfaceComponent;

/// Scene-local handle of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(pub u64);

impl ConnectionId {
    /// Create a new connection handle.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// How connections are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectionDisplay {
    /// Line width
    pub width: f32,
    /// Line colour
    pub color: Color,
    /// Opacity applied on top of the colour's alpha
    pub opacity: f32,
}

impl ConnectionDisplay {
    /// Effective stroke colour.
    #[must_use]
    pub fn stroke(&self) -> Color {
        self.color.with_alpha(self.color.a * self.opacity)
    }
}

impl Default for ConnectionDisplay {
    fn default() -> Self {
        Self {
            width: 4.0,
            color: Color::rgb8(52, 149, 235),
            opacity: 0.8,
        }
    }
}

/// Something that follows component movement.
pub trait MoveListener {
    /// `mover` now sits at `position`.
    fn moved(&mut self, position: Point, mover: ComponentId);
}

/// A drawable edge from `source` to `dest`.
///
/// Only the anchor points are stored; angle and length are derived from
/// them on demand, so repeated moves cannot accumulate error.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceConnection {
    id: ConnectionId,
    source: ComponentId,
    dest: ComponentId,
    source_anchor: Point,
    dest_anchor: Point,
    display: ConnectionDisplay,
}

impl InterfaceConnection {
    /// Connect `source` to `dest` at their current positions.
    #[must_use]
    pub fn new(
        id: ConnectionId,
        source: &InterfaceComponent,
        dest: &InterfaceComponent,
        display: ConnectionDisplay,
    ) -> Self {
        Self {
            id,
            source: source.id(),
            dest: dest.id(),
            source_anchor: source.position(),
            dest_anchor: dest.position(),
            display,
        }
    }

    /// Handle.
    #[must_use]
    pub const fn id(&self) -> ConnectionId {
        self.id
    }

    /// Source component id.
    #[must_use]
    pub const fn source(&self) -> ComponentId {
        self.source
    }

    /// Destination component id.
    #[must_use]
    pub const fn dest(&self) -> ComponentId {
        self.dest
    }

    /// `(source, dest)` pair.
    #[must_use]
    pub const fn pair(&self) -> (ComponentId, ComponentId) {
        (self.source, self.dest)
    }

    /// Whether `id` is either end.
    #[must_use]
    pub fn is_incident(&self, id: ComponentId) -> bool {
        self.source == id || self.dest == id
    }

    /// Source anchor.
    #[must_use]
    pub const fn source_anchor(&self) -> Point {
        self.source_anchor
    }

    /// Destination anchor.
    #[must_use]
    pub const fn dest_anchor(&self) -> Point {
        self.dest_anchor
    }

    /// Rotation in degrees from source towards dest.
    #[must_use]
    pub fn angle(&self) -> f32 {
        self.source_anchor.angle_to(&self.dest_anchor)
    }

    /// Rendered length.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.source_anchor.distance(&self.dest_anchor)
    }

    /// Display parameters.
    #[must_use]
    pub const fn display(&self) -> &ConnectionDisplay {
        &self.display
    }

    /// Paint the edge.
    pub fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.draw_line(
            self.source_anchor,
            self.dest_anchor,
            self.display.stroke(),
            self.display.width,
        );
    }
}

impl MoveListener for InterfaceConnection {
    fn moved(&mut self, position: Point, mover: ComponentId) {
        if mover == self.source {
            self.source_anchor = position;
        }
        if mover == self.dest {
            self.dest_anchor = position;
        }
    }
}
