//! Bounding boxes with optional containment.

use fieldsync_core::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Which point of the box a component's position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundOrigin {
    /// Position is the box centre
    #[default]
    Center,
    /// Position is the top-left corner
    TopLeft,
}

/// Box occupied by a component, optionally confined to a boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRect {
    center: Point,
    size: Size,
    origin: BoundOrigin,
    containment: Option<Rect>,
}

impl BoundingRect {
    /// Create a box of `size` whose `origin` point sits at `position`.
    #[must_use]
    pub fn new(position: Point, size: Size, origin: BoundOrigin) -> Self {
        Self {
            center: Self::center_for(position, size, origin),
            size,
            origin,
            containment: None,
        }
    }

    /// Create a box centred on `center`.
    #[must_use]
    pub fn centered(center: Point, size: Size) -> Self {
        Self::new(center, size, BoundOrigin::Center)
    }

    fn center_for(position: Point, size: Size, origin: BoundOrigin) -> Point {
        match origin {
            BoundOrigin::Center => position,
            BoundOrigin::TopLeft => position.offset(size.width / 2.0, size.height / 2.0),
        }
    }

    /// The box as a rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::centered(self.center, self.size)
    }

    /// Box centre.
    #[must_use]
    pub const fn center(&self) -> Point {
        self.center
    }

    /// Box size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Origin kind.
    #[must_use]
    pub const fn origin(&self) -> BoundOrigin {
        self.origin
    }

    /// Position of the origin point.
    #[must_use]
    pub fn position(&self) -> Point {
        match self.origin {
            BoundOrigin::Center => self.center,
            BoundOrigin::TopLeft => self.rect().origin(),
        }
    }

    /// Current containment boundary.
    #[must_use]
    pub const fn containment(&self) -> Option<Rect> {
        self.containment
    }

    /// Check if a point falls inside the box.
    #[must_use]
    pub fn contains_point(&self, point: &Point) -> bool {
        self.rect().contains_point(point)
    }

    /// Confine subsequent moves to `boundary`. The current position is left
    /// alone until the next move.
    pub fn set_containment(&mut self, boundary: Rect) {
        self.containment = Some(boundary);
    }

    /// Put the origin point exactly at `position`, ignoring containment.
    pub fn set_position(&mut self, position: Point) -> Point {
        self.center = Self::center_for(position, self.size, self.origin);
        self.position()
    }

    /// Move the origin point to `target`, clamped into the containment.
    ///
    /// Returns the resolved position of the origin point.
    pub fn move_to(&mut self, target: Point) -> Point {
        let center = Self::center_for(target, self.size, self.origin);
        self.center = match self.containment {
            Some(boundary) => boundary.clamp_center(center, self.size),
            None => center,
        };
        self.position()
    }
}
