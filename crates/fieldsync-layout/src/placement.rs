//! Evenly spaced placement of staged components.
//!
//! A region spreads its components along one axis. The spacer is the
//! region's extent on that axis divided by `total + 1`, so nothing touches
//! the region edge. When more components arrive, every component of the
//! kind is re-laid out with the new spacer: existing ones first, in their
//! original order, then the new ones.

use fieldsync_core::{ComponentId, IdGenerator, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::region::Spread;

/// Request to stage `quantity` components of kind `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementBatch {
    /// Component kind, as known to the logic layer
    pub name: String,
    /// Number of units
    pub quantity: usize,
}

impl PlacementBatch {
    /// Create a batch.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: usize) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }

    /// Sum of quantities over several batches.
    #[must_use]
    pub fn total(batches: &[Self]) -> usize {
        batches.iter().map(|batch| batch.quantity).sum()
    }
}

/// What occupies a computed position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// A component already on the field, moved to a new anchor
    Existing(ComponentId),
    /// A freshly identified unit of a batch
    New {
        /// Newly generated id
        id: ComponentId,
        /// Component kind
        name: String,
    },
}

impl Slot {
    /// Id of the occupant.
    #[must_use]
    pub const fn id(&self) -> ComponentId {
        match self {
            Self::Existing(id) | Self::New { id, .. } => *id,
        }
    }
}

/// A slot and its anchor position.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Occupant
    pub slot: Slot,
    /// Anchor (component centre)
    pub position: Point,
}

/// Computes anchors for staged components.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementEngine;

impl PlacementEngine {
    /// Create a placement engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Spacer vector `(dx, dy)` for `total` components in `region`.
    ///
    /// Callers must not ask for `total == 0`; the divisor is `total + 1`
    /// regardless, so the result is still finite.
    #[must_use]
    pub fn spacer(region: Rect, spread: Spread, total: usize) -> (f32, f32) {
        let slots = (total + 1) as f32;
        match spread {
            Spread::Column => (0.0, region.height / slots),
            Spread::Row => (region.width / slots, 0.0),
        }
    }

    /// First anchor for a spacer.
    #[must_use]
    pub fn first_anchor(region: Rect, spread: Spread, spacer: (f32, f32)) -> Point {
        match spread {
            Spread::Column => Point::new(region.center().x, region.y + spacer.1),
            Spread::Row => Point::new(region.x + spacer.0, region.center().y),
        }
    }

    /// Lay out `existing` components followed by every unit of `batches`.
    ///
    /// Returns an empty list, without touching `ids`, when the batches hold
    /// no units. Existing components come first so later stages interleave
    /// without overlap.
    pub fn layout(
        &self,
        region: Rect,
        spread: Spread,
        existing: &[ComponentId],
        batches: &[PlacementBatch],
        ids: &mut dyn IdGenerator,
    ) -> Vec<Placement> {
        let added = PlacementBatch::total(batches);
        if added == 0 {
            return Vec::new();
        }

        let spacer = Self::spacer(region, spread, existing.len() + added);
        let mut anchor = Self::first_anchor(region, spread, spacer);
        let mut placements = Vec::with_capacity(existing.len() + added);

        for id in existing {
            placements.push(Placement {
                slot: Slot::Existing(*id),
                position: anchor,
            });
            anchor = anchor.offset(spacer.0, spacer.1);
        }

        for batch in batches {
            for _ in 0..batch.quantity {
                placements.push(Placement {
                    slot: Slot::New {
                        id: ids.new_id(),
                        name: batch.name.clone(),
                    },
                    position: anchor,
                });
                anchor = anchor.offset(spacer.0, spacer.1);
            }
        }

        placements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldsync_core::SequentialIds;

    #[test]
    fn test_spacer_column() {
        let region = Rect::new(0.0, 0.0, 100.0, 300.0);
        assert_eq!(PlacementEngine::spacer(region, Spread::Column, 5), (0.0, 50.0));
    }

    #[test]
    fn test_spacer_row() {
        let region = Rect::new(100.0, 0.0, 400.0, 300.0);
        assert_eq!(PlacementEngine::spacer(region, Spread::Row, 3), (100.0, 0.0));
    }

    #[test]
    fn test_layout_column_interleaves_existing() {
        let region = Rect::new(10.0, 20.0, 100.0, 300.0);
        let mut seed = SequentialIds::starting_at(100);
        let existing = [seed.new_id(), seed.new_id()];
        let mut ids = SequentialIds::new();

        let placements = PlacementEngine::new().layout(
            region,
            Spread::Column,
            &existing,
            &[PlacementBatch::new("laptop", 3)],
            &mut ids,
        );

        let ys: Vec<f32> = placements.iter().map(|p| p.position.y - region.y).collect();
        assert_eq!(ys, vec![50.0, 100.0, 150.0, 200.0, 250.0]);
        assert!(placements.iter().all(|p| p.position.x == 60.0));
        assert_eq!(placements[0].slot, Slot::Existing(existing[0]));
        assert_eq!(placements[1].slot, Slot::Existing(existing[1]));
        assert!(matches!(&placements[2].slot, Slot::New { name, .. } if name == "laptop"));
    }

    #[test]
    fn test_layout_row() {
        let region = Rect::new(100.0, 0.0, 300.0, 200.0);
        let mut ids = SequentialIds::new();
        let placements = PlacementEngine::new().layout(
            region,
            Spread::Row,
            &[],
            &[PlacementBatch::new("router", 1), PlacementBatch::new("cache", 1)],
            &mut ids,
        );

        assert_eq!(placements.len(), 2);
        assert_eq!(placements[0].position, Point::new(200.0, 100.0));
        assert_eq!(placements[1].position, Point::new(300.0, 100.0));
        assert!(matches!(&placements[1].slot, Slot::New { name, .. } if name == "cache"));
    }

    #[test]
    fn test_layout_zero_quantity_short_circuits() {
        let mut ids = SequentialIds::new();
        let existing = [ComponentId::new()];
        let placements = PlacementEngine::new().layout(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Spread::Column,
            &existing,
            &[PlacementBatch::new("laptop", 0)],
            &mut ids,
        );
        assert!(placements.is_empty());
        // No ids consumed
        assert_eq!(ids.new_id(), SequentialIds::new().new_id());
    }

    #[test]
    fn test_layout_generates_fresh_ids() {
        let mut ids = SequentialIds::new();
        let placements = PlacementEngine::new().layout(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Spread::Column,
            &[],
            &[PlacementBatch::new("phone", 4)],
            &mut ids,
        );
        let mut seen: Vec<ComponentId> = placements.iter().map(|p| p.slot.id()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_batch_total() {
        let batches = [PlacementBatch::new("a", 2), PlacementBatch::new("b", 0)];
        assert_eq!(PlacementBatch::total(&batches), 2);
        assert_eq!(PlacementBatch::total(&[]), 0);
    }
}
