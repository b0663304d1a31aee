//! Test harness for fieldsync controllers.

use fieldsync::{
    ComponentId, ConnectionId, FieldConfig, FieldControls, LogicLayer, PlacementBatch, Point,
    RecordingCanvas, Scene, SequentialIds,
};
use fieldsync::widgets::ComponentStyle;

use crate::scripted::ScriptedLogic;

/// Drives a [`FieldControls`] and checks that scene and logic agree.
///
/// Ids are sequential so failures are reproducible. Action helpers panic
/// when the controller refuses; use [`Harness::controls_mut`] to test
/// refusals.
pub struct Harness<L: LogicLayer = ScriptedLogic> {
    controls: FieldControls<L>,
}

impl Harness<ScriptedLogic> {
    /// Harness over [`ScriptedLogic::network`].
    pub fn network() -> Self {
        Self::new(ScriptedLogic::network())
    }
}

impl<L: LogicLayer> Harness<L> {
    /// Create a harness with the default configuration.
    pub fn new(logic: L) -> Self {
        Self::with_config(logic, FieldConfig::default())
    }

    /// Create a harness with an explicit configuration, panicking if it
    /// does not validate.
    pub fn with_config(logic: L, config: FieldConfig) -> Self {
        match FieldControls::with_config(logic, config) {
            Ok(controls) => Self {
                controls: controls.with_id_generator(SequentialIds::new()),
            },
            Err(err) => panic!("Expected a valid configuration: {err}"),
        }
    }

    /// The controller.
    pub const fn controls(&self) -> &FieldControls<L> {
        &self.controls
    }

    /// The controller, mutably.
    pub fn controls_mut(&mut self) -> &mut FieldControls<L> {
        &mut self.controls
    }

    /// The scene.
    pub const fn scene(&self) -> &Scene {
        self.controls.scene()
    }

    /// The logic layer.
    pub const fn logic(&self) -> &L {
        self.controls.logic()
    }

    // === Actions ===

    /// Place a component, panicking if refused.
    pub fn place(&mut self, name: &str, x: f32, y: f32) -> ComponentId {
        match self.controls.place_component(name, Point::new(x, y)) {
            Ok(id) => id,
            Err(err) => panic!("Expected '{name}' to be placed: {err}"),
        }
    }

    /// Stage single-kind batches, panicking if refused.
    pub fn stage(
        &mut self,
        clients: &[(&str, usize)],
        processors: &[(&str, usize)],
        endpoints: &[(&str, usize)],
    ) -> Vec<ComponentId> {
        match self
            .controls
            .init_stage(&batches(clients), &batches(processors), &batches(endpoints))
        {
            Ok(ids) => ids,
            Err(err) => panic!("Expected stage to be accepted: {err}"),
        }
    }

    /// Connect two components, panicking if refused.
    pub fn connect(&mut self, source: ComponentId, dest: ComponentId) -> ConnectionId {
        match self.controls.connect(source, dest) {
            Ok(handle) => handle,
            Err(err) => panic!("Expected {source} -> {dest} to connect: {err}"),
        }
    }

    /// Drag a component, returning where it landed.
    pub fn drag(&mut self, id: ComponentId, x: f32, y: f32) -> Point {
        match self.controls.drag_component(id, Point::new(x, y)) {
            Ok(position) => position,
            Err(err) => panic!("Expected {id} to be dragged: {err}"),
        }
    }

    /// Paint the scene into a recording canvas.
    pub fn paint(&self) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new();
        self.scene().paint(&mut canvas, &ComponentStyle::default());
        canvas
    }

    // === Assertions ===

    /// Assert that scene and logic hold the same components and edges.
    pub fn assert_in_sync(&self) -> &Self {
        assert_eq!(
            self.scene().connection_pairs(),
            self.logic().connections(),
            "Expected drawn connections to match logic connections"
        );
        assert!(
            self.controls.in_sync(),
            "Expected drawn components to match logic components"
        );
        self
    }

    /// Assert that every connection resolves both ends and every listener
    /// handle resolves to an incident connection.
    pub fn assert_no_orphans(&self) -> &Self {
        let scene = self.scene();
        for connection in scene.connections() {
            assert!(
                scene.endpoints(connection.id()).is_some(),
                "Expected both ends of {:?} to be on the field",
                connection.id()
            );
        }
        for component in scene.components() {
            for handle in component.connection_listeners() {
                let incident = scene
                    .connection(*handle)
                    .is_some_and(|connection| connection.is_incident(component.id()));
                assert!(
                    incident,
                    "Expected listener {handle:?} of {} to be a live incident connection",
                    component.id()
                );
            }
        }
        self
    }

    /// Assert component and connection counts.
    pub fn assert_counts(&self, components: usize, connections: usize) -> &Self {
        assert_eq!(
            (self.scene().component_count(), self.scene().connection_count()),
            (components, connections),
            "Expected (components, connections)"
        );
        self
    }

    /// Assert a component's position.
    pub fn assert_at(&self, id: ComponentId, x: f32, y: f32) -> &Self {
        let position = self
            .scene()
            .component(id)
            .map(fieldsync::InterfaceComponent::position);
        assert_eq!(
            position,
            Some(Point::new(x, y)),
            "Expected {id} at ({x}, {y})"
        );
        self
    }

    /// Assert that `source -> dest` is drawn.
    pub fn assert_connected(&self, source: ComponentId, dest: ComponentId) -> &Self {
        assert!(
            self.scene().connection_pairs().contains(&(source, dest)),
            "Expected {source} -> {dest} to be drawn"
        );
        self
    }
}

fn batches(pairs: &[(&str, usize)]) -> Vec<PlacementBatch> {
    pairs
        .iter()
        .map(|(name, quantity)| PlacementBatch::new(*name, *quantity))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_actions_and_assertions() {
        let mut harness = Harness::network();
        let router = harness.place("router", 100.0, 100.0);
        let server = harness.place("server", 300.0, 100.0);
        harness.connect(router, server);

        harness
            .assert_counts(2, 1)
            .assert_connected(router, server)
            .assert_at(router, 100.0, 100.0)
            .assert_in_sync()
            .assert_no_orphans();
    }

    #[test]
    #[should_panic(expected = "Expected 'toaster' to be placed")]
    fn test_place_unknown_panics() {
        Harness::network().place("toaster", 0.0, 0.0);
    }

    #[test]
    fn test_paint_covers_every_node() {
        let mut harness = Harness::network();
        let a = harness.place("laptop", 50.0, 50.0);
        let b = harness.place("router", 200.0, 50.0);
        harness.connect(a, b);
        // Two components (fill, stroke, label) and one line
        assert_eq!(harness.paint().command_count(), 7);
    }
}
