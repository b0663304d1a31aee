#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
//! Placement layout engine for fieldsync.
//!
//! Staged components are spread evenly across three play-field regions:
//!
//! - **Client column**: left side, spread vertically
//! - **Processor row**: middle, spread horizontally
//! - **Endpoint column**: right side, spread vertically
//!
//! See [`PlacementEngine::layout`] for the spacing rule.

mod placement;
mod region;

pub use placement::{Placement, PlacementBatch, PlacementEngine, Slot};
pub use region::{PlayField, Region, Spread};
