//! Visual layer for fieldsync.
//!
//! - [`InterfaceComponent`]: a drawable node carrying a [`ComponentId`](fieldsync_core::ComponentId)
//! - [`InterfaceConnection`]: a drawable directed edge following its ends
//! - [`Scene`]: the registry the synchronization controller writes into

mod bounding;
mod component;
mod connection;
mod scene;

pub use bounding::{BoundOrigin, BoundingRect};
pub use component::{ComponentStyle, InterfaceComponent};
pub use connection::{ConnectionDisplay, ConnectionId, InterfaceConnection, MoveListener};
pub use scene::{Scene, SceneError, SceneNode};
