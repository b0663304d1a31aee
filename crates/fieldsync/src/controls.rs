//! The synchronization controller.
//!
//! [`FieldControls`] is the only writer of the scene. Each structural
//! operation runs the same three steps:
//!
//! 1. check its arguments against the scene,
//! 2. propose the change to the logic layer,
//! 3. mutate the scene only if the proposal was accepted.
//!
//! A failure in step 1 or 2 leaves both sides exactly as they were.

use fieldsync_core::{
    Capability, ComponentId, IdGenerator, Interaction, Point, TagSet, UuidGenerator,
};
use fieldsync_layout::{Placement, PlacementBatch, PlacementEngine, Slot};
use fieldsync_widgets::{
    BoundingRect, ConnectionId, InterfaceComponent, Scene, SceneNode,
};
use log::{debug, info, trace, warn};
use std::collections::{BTreeMap, BTreeSet};

use crate::config::{ConfigError, FieldConfig};
use crate::error::{ControlError, Operation};
use crate::logic::{LogicLayer, Rejection};

/// Result type for controller operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Keeps the scene in step with a logic layer.
pub struct FieldControls<L: LogicLayer> {
    logic: L,
    scene: Scene,
    config: FieldConfig,
    engine: PlacementEngine,
    ids: Box<dyn IdGenerator>,
}

impl<L: LogicLayer> FieldControls<L> {
    /// Create a controller with the default configuration.
    pub fn new(logic: L) -> Self {
        Self::assemble(logic, FieldConfig::default())
    }

    /// Create a controller with an explicit configuration.
    ///
    /// The configuration is validated first; degenerate regions or bounds
    /// would otherwise break clamping on the first drag.
    pub fn with_config(logic: L, config: FieldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::assemble(logic, config))
    }

    fn assemble(logic: L, config: FieldConfig) -> Self {
        Self {
            logic,
            scene: Scene::new(),
            config,
            engine: PlacementEngine::new(),
            ids: Box::new(UuidGenerator),
        }
    }

    /// Use a different id source.
    #[must_use]
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// The bound logic layer.
    pub const fn logic(&self) -> &L {
        &self.logic
    }

    /// The scene, read-only.
    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The active configuration.
    pub const fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Swap in a new logic layer and clear the field.
    ///
    /// Returns the previous logic layer.
    pub fn load_logic(&mut self, logic: L) -> L {
        debug!(
            "controls: loading new logic, clearing {} components",
            self.scene.component_count()
        );
        self.scene.clear();
        std::mem::replace(&mut self.logic, logic)
    }

    /// Release the logic layer.
    pub fn into_logic(self) -> L {
        self.logic
    }

    /// Whether scene and logic hold the same components and edges.
    pub fn in_sync(&self) -> bool {
        let components: BTreeSet<ComponentId> =
            self.scene.components().map(InterfaceComponent::id).collect();
        self.scene.connection_pairs() == self.logic.connections()
            && self.logic.components() == components
    }

    // === Staging ===

    /// Stage batches of clients, processors and endpoints.
    ///
    /// Each kind with at least one unit is spread over its play-field
    /// region. Regions that re-lay out move the components already there
    /// to make room. Layout anchors are used exactly, for new and existing
    /// components alike; containment only applies to later drags. The logic layer sees the whole id to kind mapping
    /// before anything is drawn; if it refuses, nothing is created or
    /// moved.
    ///
    /// Returns the new ids in placement order.
    pub fn init_stage(
        &mut self,
        clients: &[PlacementBatch],
        processors: &[PlacementBatch],
        endpoints: &[PlacementBatch],
    ) -> ControlResult<Vec<ComponentId>> {
        let result = self.try_init_stage(clients, processors, endpoints);
        report(Operation::InitStage, result)
    }

    fn try_init_stage(
        &mut self,
        clients: &[PlacementBatch],
        processors: &[PlacementBatch],
        endpoints: &[PlacementBatch],
    ) -> ControlResult<Vec<ComponentId>> {
        let kinds = [
            (Capability::Client, clients),
            (Capability::Processor, processors),
            (Capability::Endpoint, endpoints),
        ];

        let mut specs: BTreeMap<&str, TagSet> = BTreeMap::new();
        for batch in kinds.iter().flat_map(|(_, batches)| batches.iter()) {
            if batch.quantity == 0 || specs.contains_key(batch.name.as_str()) {
                continue;
            }
            let spec = self.spec_for(&batch.name)?;
            specs.insert(batch.name.as_str(), spec);
        }

        let mut moves = Vec::new();
        let mut staged = Vec::new();
        let mut mapping = BTreeMap::new();
        for (capability, batches) in kinds {
            if PlacementBatch::total(batches) == 0 {
                continue;
            }
            for Placement { slot, position } in self.layout(capability, batches) {
                match slot {
                    Slot::Existing(id) => moves.push((id, position)),
                    Slot::New { id, name } => {
                        let tags = specs.get(name.as_str()).cloned().unwrap_or_default();
                        let interaction = Interaction::NONE
                            .selectable(true)
                            .draggable(capability != Capability::Client);
                        staged.push(self.build(&name, id, tags, position, interaction)?);
                        mapping.insert(id, name);
                    }
                }
            }
        }

        self.logic
            .init_stage(&mapping)
            .map_err(|rejection| rejected(Operation::InitStage, rejection))?;

        for (id, position) in moves {
            if let Err(err) = self.scene.relocate_component(id, position) {
                warn!("controls: skipping re-layout of {id}: {err}");
            }
        }
        let mut created = Vec::with_capacity(staged.len());
        for component in staged {
            match self.scene.add_component(component) {
                Ok(id) => created.push(id),
                Err(err) => warn!("controls: staged component not drawn: {err}"),
            }
        }
        trace!("controls: staged {} components", created.len());
        Ok(created)
    }

    fn layout(&mut self, capability: Capability, batches: &[PlacementBatch]) -> Vec<Placement> {
        let region = *self.config.play_field.region_for(capability);
        let existing = if region.relayout_existing {
            self.scene.ids_with_capability(capability)
        } else {
            Vec::new()
        };
        self.engine.layout(
            region.rect,
            region.spread,
            &existing,
            batches,
            self.ids.as_mut(),
        )
    }

    // === Placement ===

    /// Place one component of kind `name` centred on `position`.
    ///
    /// User-placed components can be dragged, selected and removed.
    pub fn place_component(&mut self, name: &str, position: Point) -> ControlResult<ComponentId> {
        let result = self.try_place_component(name, position);
        report(Operation::PlaceComponent, result)
    }

    fn try_place_component(&mut self, name: &str, position: Point) -> ControlResult<ComponentId> {
        let tags = self.spec_for(name)?;
        let id = self.ids.new_id();
        let component = self.build(name, id, tags, position, Interaction::FULL)?;

        self.logic
            .add_component(name, id)
            .map_err(|rejection| rejected(Operation::PlaceComponent, rejection))?;

        let id = self.scene.add_component(component)?;
        trace!("controls: placed {name} as {id}");
        Ok(id)
    }

    // === Connections ===

    /// Connect `source` to `dest`.
    ///
    /// Both components are raised to the top of the draw order so the new
    /// line does not cover them.
    pub fn connect(&mut self, source: ComponentId, dest: ComponentId) -> ControlResult<ConnectionId> {
        let result = self.try_connect(source, dest);
        report(Operation::Connect, result)
    }

    fn try_connect(&mut self, source: ComponentId, dest: ComponentId) -> ControlResult<ConnectionId> {
        self.require(source)?;
        self.require(dest)?;

        self.logic
            .add_connection(source, dest)
            .map_err(|rejection| rejected(Operation::Connect, rejection))?;

        let display = self.config.connection_display();
        let handle = self.scene.add_connection(source, dest, display)?;
        self.scene.readd(SceneNode::Component(source));
        self.scene.readd(SceneNode::Component(dest));
        trace!("controls: connected {source} -> {dest}");
        Ok(handle)
    }

    /// Remove the connection from `source` to `dest`.
    ///
    /// Only edges in that direction are affected. Returns how many visual
    /// connections were destroyed.
    pub fn disconnect(&mut self, source: ComponentId, dest: ComponentId) -> ControlResult<usize> {
        let result = self.try_disconnect(source, dest);
        report(Operation::Disconnect, result)
    }

    fn try_disconnect(&mut self, source: ComponentId, dest: ComponentId) -> ControlResult<usize> {
        self.require(source)?;
        self.require(dest)?;

        self.logic
            .remove_connection(source, dest)
            .map_err(|rejection| rejected(Operation::Disconnect, rejection))?;

        let doomed: Vec<ConnectionId> = self
            .scene
            .connections_incident(source)
            .into_iter()
            .filter(|handle| {
                self.scene
                    .connection(*handle)
                    .is_some_and(|connection| connection.pair() == (source, dest))
            })
            .collect();
        for handle in &doomed {
            self.scene.destroy_connection(*handle);
        }
        trace!("controls: disconnected {source} -> {dest}");
        Ok(doomed.len())
    }

    // === Removal ===

    /// Remove a component and every connection touching it.
    ///
    /// Returns how many connections went with it.
    pub fn remove_component(&mut self, id: ComponentId) -> ControlResult<usize> {
        let result = self.try_remove_component(id);
        report(Operation::RemoveComponent, result)
    }

    fn try_remove_component(&mut self, id: ComponentId) -> ControlResult<usize> {
        self.require(id)?;

        self.logic
            .remove_component(id)
            .map_err(|rejection| rejected(Operation::RemoveComponent, rejection))?;

        let incident = self.scene.connections_incident(id);
        for handle in &incident {
            self.scene.destroy_connection(*handle);
        }
        self.scene.destroy_component(id);
        trace!("controls: removed {id} and {} connections", incident.len());
        Ok(incident.len())
    }

    // === Interaction ===

    /// Drag a component towards `target`.
    ///
    /// Returns where it ended up after containment.
    pub fn drag_component(&mut self, id: ComponentId, target: Point) -> ControlResult<Point> {
        let result = self.try_drag_component(id, target);
        report(Operation::DragComponent, result)
    }

    fn try_drag_component(&mut self, id: ComponentId, target: Point) -> ControlResult<Point> {
        let component = self.require(id)?;
        if !component.interaction().draggable {
            return Err(ControlError::NotDraggable(id));
        }
        Ok(self.scene.move_component(id, target)?)
    }

    /// Topmost selectable component under `point`.
    pub fn select_at(&self, point: Point) -> Option<ComponentId> {
        self.scene
            .topmost_at(point, |component| component.interaction().selectable)
            .map(InterfaceComponent::id)
    }

    // === Helpers ===

    fn require(&self, id: ComponentId) -> ControlResult<&InterfaceComponent> {
        self.scene
            .component(id)
            .ok_or(ControlError::MissingComponent(id))
    }

    fn spec_for(&self, name: &str) -> ControlResult<TagSet> {
        self.logic
            .component_specs(name)
            .map(|spec| spec.tags)
            .ok_or_else(|| ControlError::UnknownKind(name.to_string()))
    }

    fn build(
        &self,
        name: &str,
        id: ComponentId,
        tags: TagSet,
        position: Point,
        interaction: Interaction,
    ) -> ControlResult<InterfaceComponent> {
        let bounds = BoundingRect::centered(position, self.config.component_size);
        let mut component = InterfaceComponent::new(name, id, tags, bounds)?.with_interaction(interaction);
        if let Some(boundary) = self.config.play_field.bounds {
            component.set_containment(boundary);
        }
        Ok(component)
    }
}

fn rejected(op: Operation, rejection: Rejection) -> ControlError {
    ControlError::Rejected {
        op,
        info: rejection.info,
    }
}

/// Log a failed operation at the controller boundary.
fn report<T>(op: Operation, result: ControlResult<T>) -> ControlResult<T> {
    if let Err(err) = &result {
        match err {
            ControlError::Rejected { .. } => info!("controls: {err}"),
            ControlError::MissingComponent(_)
            | ControlError::UnknownKind(_)
            | ControlError::NotDraggable(_) => debug!("controls: {op} skipped: {err}"),
            ControlError::Tags(_) | ControlError::Scene(_) => warn!("controls: {op} failed: {err}"),
        }
    }
    result
}

impl<L: LogicLayer + std::fmt::Debug> std::fmt::Debug for FieldControls<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldControls")
            .field("logic", &self.logic)
            .field("scene", &self.scene)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
