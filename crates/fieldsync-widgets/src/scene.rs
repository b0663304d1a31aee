//! Registry of everything drawn on the play field.
//!
//! The scene stores components in placement order and connections by
//! handle. Components refer to their connections through handles only;
//! destroying a connection prunes the handle from both ends.

use fieldsync_core::{Canvas, Capability, ComponentId, Point};
use log::{trace, warn};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use thiserror::Error;

use crate::component::{ComponentStyle, InterfaceComponent};
use crate::connection::{ConnectionDisplay, ConnectionId, InterfaceConnection, MoveListener};

/// Errors raised by scene mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// No component with this id is registered.
    #[error("component {0} is not in the scene")]
    UnknownComponent(ComponentId),
    /// A component with this id is already registered.
    #[error("component {0} is already in the scene")]
    DuplicateComponent(ComponentId),
    /// A move was issued while another move was still notifying listeners.
    #[error("cannot move {requested} while {moving} is being moved")]
    Reentrant {
        /// Component whose move is in progress
        moving: ComponentId,
        /// Component whose move was refused
        requested: ComponentId,
    },
}

/// Entry of the draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneNode {
    /// A component
    Component(ComponentId),
    /// A connection
    Connection(ConnectionId),
}

/// Components, connections and their draw order.
#[derive(Debug, Default)]
pub struct Scene {
    components: HashMap<ComponentId, InterfaceComponent>,
    placement_order: Vec<ComponentId>,
    connections: BTreeMap<ConnectionId, InterfaceConnection>,
    draw_order: Vec<SceneNode>,
    next_connection: u64,
    moving: Option<ComponentId>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Components ===

    /// Register a component on top of the draw order.
    pub fn add_component(&mut self, component: InterfaceComponent) -> Result<ComponentId, SceneError> {
        let id = component.id();
        if self.components.contains_key(&id) {
            return Err(SceneError::DuplicateComponent(id));
        }
        self.components.insert(id, component);
        self.placement_order.push(id);
        self.draw_order.push(SceneNode::Component(id));
        trace!("scene: added component {id}");
        Ok(id)
    }

    /// Look up a component.
    #[must_use]
    pub fn component(&self, id: ComponentId) -> Option<&InterfaceComponent> {
        self.components.get(&id)
    }

    /// Whether a component is registered.
    #[must_use]
    pub fn contains(&self, id: ComponentId) -> bool {
        self.components.contains_key(&id)
    }

    /// Components in placement order.
    pub fn components(&self) -> impl Iterator<Item = &InterfaceComponent> {
        self.placement_order
            .iter()
            .filter_map(|id| self.components.get(id))
    }

    /// Number of components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Ids of components with `capability`, in placement order.
    #[must_use]
    pub fn ids_with_capability(&self, capability: Capability) -> Vec<ComponentId> {
        self.components()
            .filter(|component| component.capability() == capability)
            .map(InterfaceComponent::id)
            .collect()
    }

    /// Remove a component and any connection still attached to it.
    pub fn destroy_component(&mut self, id: ComponentId) -> Option<InterfaceComponent> {
        for handle in self.connections_incident(id) {
            self.destroy_connection(handle);
        }
        let component = self.components.remove(&id)?;
        self.placement_order.retain(|placed| *placed != id);
        self.draw_order
            .retain(|node| *node != SceneNode::Component(id));
        trace!("scene: destroyed component {id}");
        Some(component)
    }

    /// Move a component and re-anchor its connections.
    ///
    /// The target is clamped into the component's containment. Listeners
    /// are notified synchronously in registration order and stale handles
    /// are skipped.
    pub fn move_component(&mut self, id: ComponentId, target: Point) -> Result<Point, SceneError> {
        self.reposition(id, |component| component.move_to(target))
    }

    /// Put a component exactly at `position` and re-anchor its connections.
    ///
    /// Containment is not applied; used for layout anchors.
    pub fn relocate_component(&mut self, id: ComponentId, position: Point) -> Result<Point, SceneError> {
        self.reposition(id, |component| component.set_position(position))
    }

    // Listeners only ever get `&mut InterfaceConnection`, and every public
    // entry point takes `&mut self`, so a listener cannot reach the scene
    // to start another move. `moving` records that invariant while the
    // notifications run, and a nested call is refused rather than
    // interleaved.
    fn reposition<F>(&mut self, id: ComponentId, place: F) -> Result<Point, SceneError>
    where
        F: FnOnce(&mut InterfaceComponent) -> Point,
    {
        if let Some(moving) = self.moving {
            warn!("scene: refused re-entrant move of {id} during move of {moving}");
            return Err(SceneError::Reentrant {
                moving,
                requested: id,
            });
        }

        let component = self
            .components
            .get_mut(&id)
            .ok_or(SceneError::UnknownComponent(id))?;
        let resolved = place(component);
        let listeners = component.connection_listeners().to_vec();

        self.moving = Some(id);
        for handle in listeners {
            match self.connections.get_mut(&handle) {
                Some(connection) => connection.moved(resolved, id),
                None => trace!("scene: skipping stale connection {handle:?} of {id}"),
            }
        }
        self.moving = None;

        Ok(resolved)
    }

    /// Topmost component under `point` accepted by `filter`.
    pub fn topmost_at<F>(&self, point: Point, filter: F) -> Option<&InterfaceComponent>
    where
        F: Fn(&InterfaceComponent) -> bool,
    {
        self.draw_order.iter().rev().find_map(|node| match node {
            SceneNode::Component(id) => self
                .components
                .get(id)
                .filter(|component| component.bounding_box().contains_point(&point))
                .filter(|component| filter(*component)),
            SceneNode::Connection(_) => None,
        })
    }

    // === Connections ===

    /// Create a connection anchored at both components' current positions.
    pub fn add_connection(
        &mut self,
        source: ComponentId,
        dest: ComponentId,
        display: ConnectionDisplay,
    ) -> Result<ConnectionId, SceneError> {
        let src = self
            .components
            .get(&source)
            .ok_or(SceneError::UnknownComponent(source))?;
        let dst = self
            .components
            .get(&dest)
            .ok_or(SceneError::UnknownComponent(dest))?;

        self.next_connection += 1;
        let handle = ConnectionId::new(self.next_connection);
        let connection = InterfaceConnection::new(handle, src, dst, display);
        self.connections.insert(handle, connection);
        self.draw_order.push(SceneNode::Connection(handle));

        for end in [source, dest] {
            if let Some(component) = self.components.get_mut(&end) {
                component.add_connection_listener(handle);
            }
        }
        trace!("scene: connected {source} -> {dest} as {handle:?}");
        Ok(handle)
    }

    /// Look up a connection.
    #[must_use]
    pub fn connection(&self, handle: ConnectionId) -> Option<&InterfaceConnection> {
        self.connections.get(&handle)
    }

    /// All connections in creation order.
    pub fn connections(&self) -> impl Iterator<Item = &InterfaceConnection> {
        self.connections.values()
    }

    /// Number of connections.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Handles of connections with `id` at either end, in creation order.
    #[must_use]
    pub fn connections_incident(&self, id: ComponentId) -> Vec<ConnectionId> {
        self.connections
            .values()
            .filter(|connection| connection.is_incident(id))
            .map(InterfaceConnection::id)
            .collect()
    }

    /// Set of `(source, dest)` pairs currently drawn.
    #[must_use]
    pub fn connection_pairs(&self) -> BTreeSet<(ComponentId, ComponentId)> {
        self.connections
            .values()
            .map(InterfaceConnection::pair)
            .collect()
    }

    /// Resolve a connection's ends to components.
    #[must_use]
    pub fn endpoints(
        &self,
        handle: ConnectionId,
    ) -> Option<(&InterfaceComponent, &InterfaceComponent)> {
        let connection = self.connections.get(&handle)?;
        Some((
            self.components.get(&connection.source())?,
            self.components.get(&connection.dest())?,
        ))
    }

    /// Remove a connection and unregister it from both ends.
    pub fn destroy_connection(&mut self, handle: ConnectionId) -> Option<InterfaceConnection> {
        let connection = self.connections.remove(&handle)?;
        for end in [connection.source(), connection.dest()] {
            if let Some(component) = self.components.get_mut(&end) {
                component.remove_connection_listener(handle);
            }
        }
        self.draw_order
            .retain(|node| *node != SceneNode::Connection(handle));
        trace!("scene: destroyed connection {handle:?}");
        Some(connection)
    }

    // === Drawing ===

    /// Move a node to the top of the draw and pick order.
    pub fn readd(&mut self, node: SceneNode) {
        if let Some(index) = self.draw_order.iter().position(|n| *n == node) {
            let node = self.draw_order.remove(index);
            self.draw_order.push(node);
        }
    }

    /// Draw order, bottom first.
    #[must_use]
    pub fn draw_order(&self) -> &[SceneNode] {
        &self.draw_order
    }

    /// Paint every node in draw order.
    pub fn paint(&self, canvas: &mut dyn Canvas, style: &ComponentStyle) {
        for node in &self.draw_order {
            match node {
                SceneNode::Component(id) => {
                    if let Some(component) = self.components.get(id) {
                        component.paint(canvas, style);
                    }
                }
                SceneNode::Connection(handle) => {
                    if let Some(connection) = self.connections.get(handle) {
                        connection.paint(canvas);
                    }
                }
            }
        }
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.components.clear();
        self.placement_order.clear();
        self.connections.clear();
        self.draw_order.clear();
    }
}
