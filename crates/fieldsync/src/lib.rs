//! fieldsync: keeps a visual node-and-edge canvas consistent with a
//! validating logic graph.
//!
//! The [`FieldControls`] controller owns the [`Scene`] and routes every
//! structural change through a [`LogicLayer`] before it is drawn.
//!
//! ```
//! use fieldsync::{FieldControls, GraphLogic, Point, TagSet, CLIENT_TAG};
//!
//! let logic = GraphLogic::new()
//!     .with_spec("laptop", TagSet::new().with(CLIENT_TAG))
//!     .with_spec("router", TagSet::new().with("ROUTER"));
//! let mut controls = FieldControls::new(logic);
//!
//! let laptop = controls.place_component("laptop", Point::new(100.0, 100.0)).unwrap();
//! let router = controls.place_component("router", Point::new(300.0, 100.0)).unwrap();
//! controls.connect(laptop, router).unwrap();
//!
//! // Clients cannot receive connections, so nothing is drawn.
//! assert!(controls.connect(router, laptop).is_err());
//! assert_eq!(controls.scene().connection_count(), 1);
//! assert!(controls.in_sync());
//! ```

#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]

mod config;
mod controls;
mod error;
mod graph_logic;
mod logic;

pub use fieldsync_core::*;
pub use fieldsync_layout as layout;
pub use fieldsync_widgets as widgets;

pub use config::{ConfigError, ConnectionConfig, FieldConfig};
pub use controls::{ControlResult, FieldControls};
pub use error::{ControlError, Operation};
pub use fieldsync_layout::{PlacementBatch, PlayField, Region, Spread};
pub use fieldsync_widgets::{ConnectionId, InterfaceComponent, InterfaceConnection, Scene};
pub use graph_logic::GraphLogic;
pub use logic::{ComponentSpec, LogicLayer, LogicResponse, Rejection};
