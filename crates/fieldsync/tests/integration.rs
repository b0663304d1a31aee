//! Integration tests for the synchronization controller.

use fieldsync::{
    ControlError, FieldConfig, FieldControls, GraphLogic, LogicLayer, Operation, PlacementBatch,
    PlayField, Point, SequentialIds, TagSet, CLIENT_TAG, ENDPOINT_TAG,
};
use proptest::prelude::*;

const KINDS: [&str; 4] = ["laptop", "router", "cache", "server"];

fn logic() -> GraphLogic {
    GraphLogic::new()
        .with_spec("laptop", TagSet::new().with(CLIENT_TAG))
        .with_spec("router", TagSet::new().with("ROUTER"))
        .with_spec("cache", TagSet::new().with("CACHE"))
        .with_spec("server", TagSet::new().with(ENDPOINT_TAG))
        .with_spec("processor_A", TagSet::new().with("COMPUTE").with("FAST"))
}

fn controls() -> FieldControls<GraphLogic> {
    FieldControls::new(logic()).with_id_generator(SequentialIds::new())
}

fn assert_no_orphans(controls: &FieldControls<GraphLogic>) {
    let scene = controls.scene();
    for connection in scene.connections() {
        assert!(scene.endpoints(connection.id()).is_some());
    }
    for component in scene.components() {
        for handle in component.connection_listeners() {
            let connection = scene.connection(*handle).expect("listener resolves");
            assert!(connection.is_incident(component.id()));
        }
    }
}

#[test]
fn test_processor_a_placed_where_asked() {
    let mut controls = controls();
    let id = controls
        .place_component("processor_A", Point::new(10.0, 20.0))
        .unwrap();

    let component = controls.scene().component(id).unwrap();
    assert_eq!(component.position(), Point::new(10.0, 20.0));
    assert_eq!(component.tags(), &TagSet::new().with("COMPUTE").with("FAST"));
    assert!(component.is_processor());
    assert!(controls.logic().components().contains(&id));
}

#[test]
fn test_connect_disconnect_disconnect() {
    let mut controls = controls();
    let router = controls.place_component("router", Point::new(100.0, 100.0)).unwrap();
    let server = controls.place_component("server", Point::new(300.0, 100.0)).unwrap();

    controls.connect(router, server).unwrap();
    assert_eq!(controls.disconnect(router, server).unwrap(), 1);

    let err = controls.disconnect(router, server).unwrap_err();
    assert!(matches!(
        err,
        ControlError::Rejected {
            op: Operation::Disconnect,
            ..
        }
    ));
    assert_eq!(controls.scene().connection_count(), 0);
    assert_eq!(controls.scene().component_count(), 2);
    assert!(controls.in_sync());
}

#[test]
fn test_cascade_delete_leaves_no_orphans() {
    let mut controls = controls();
    let hub = controls.place_component("router", Point::new(400.0, 300.0)).unwrap();
    let mut others = Vec::new();
    for i in 0..3 {
        let client = controls
            .place_component("laptop", Point::new(50.0, 100.0 + 100.0 * i as f32))
            .unwrap();
        controls.connect(client, hub).unwrap();
        others.push(client);
    }
    for i in 0..2 {
        let server = controls
            .place_component("server", Point::new(900.0, 100.0 + 100.0 * i as f32))
            .unwrap();
        controls.connect(hub, server).unwrap();
        others.push(server);
    }
    assert_eq!(controls.scene().connection_count(), 5);

    assert_eq!(controls.remove_component(hub).unwrap(), 5);
    assert_eq!(controls.scene().connection_count(), 0);
    for id in others {
        let component = controls.scene().component(id).unwrap();
        assert!(component.connection_listeners().is_empty());
    }
    assert_no_orphans(&controls);
    assert!(controls.in_sync());
}

#[test]
fn test_rejections_change_nothing() {
    let mut controls = controls();
    let laptop = controls.place_component("laptop", Point::new(50.0, 50.0)).unwrap();
    let server = controls.place_component("server", Point::new(500.0, 50.0)).unwrap();
    controls.connect(laptop, server).unwrap();
    let components = controls.scene().component_count();
    let connections = controls.scene().connection_count();
    let order = controls.scene().draw_order().to_vec();

    assert!(controls.connect(laptop, server).unwrap_err().is_rejection());
    assert!(controls.connect(server, laptop).unwrap_err().is_rejection());
    assert!(controls.connect(laptop, laptop).unwrap_err().is_rejection());
    assert!(controls.disconnect(server, laptop).unwrap_err().is_rejection());

    assert_eq!(controls.scene().component_count(), components);
    assert_eq!(controls.scene().connection_count(), connections);
    assert_eq!(controls.scene().draw_order(), order.as_slice());
    assert!(controls.in_sync());
}

#[test]
fn test_staged_clients_are_relaid_out_evenly() {
    let config = FieldConfig {
        play_field: PlayField::split(1000.0, 300.0),
        ..FieldConfig::default()
    };
    let mut controls =
        FieldControls::with_config(logic(), config)
            .unwrap()
            .with_id_generator(SequentialIds::new());

    controls
        .init_stage(&[PlacementBatch::new("laptop", 2)], &[], &[])
        .unwrap();
    controls
        .init_stage(&[PlacementBatch::new("laptop", 3)], &[], &[])
        .unwrap();

    let ys: Vec<f32> = controls
        .scene()
        .components()
        .map(|component| component.position().y)
        .collect();
    assert_eq!(ys, vec![50.0, 100.0, 150.0, 200.0, 250.0]);
    assert!(controls
        .scene()
        .components()
        .all(|component| component.position().x == 75.0));
}

#[test]
fn test_staged_processors_stay_put() {
    let mut controls = controls();
    let first = controls
        .init_stage(&[], &[PlacementBatch::new("router", 1)], &[])
        .unwrap();
    let before = controls.scene().component(first[0]).unwrap().position();

    controls
        .init_stage(&[], &[PlacementBatch::new("cache", 2)], &[])
        .unwrap();
    assert_eq!(controls.scene().component(first[0]).unwrap().position(), before);
    assert_eq!(controls.scene().component_count(), 3);
}

#[test]
fn test_connections_follow_dragged_components() {
    let mut controls = controls();
    let router = controls.place_component("router", Point::new(100.0, 100.0)).unwrap();
    let server = controls.place_component("server", Point::new(300.0, 100.0)).unwrap();
    let handle = controls.connect(router, server).unwrap();

    controls.drag_component(router, Point::new(300.0, 300.0)).unwrap();
    let connection = controls.scene().connection(handle).unwrap();
    assert_eq!(connection.source_anchor(), Point::new(300.0, 300.0));
    assert!((connection.angle() + 90.0).abs() < 0.001);
    assert!((connection.length() - 200.0).abs() < 0.001);
}

#[derive(Debug, Clone)]
enum Op {
    Place(usize, f32, f32),
    Stage(usize, usize, usize),
    Connect(usize, usize),
    Disconnect(usize, usize),
    Remove(usize),
    Drag(usize, f32, f32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..KINDS.len(), 0.0f32..1280.0, 0.0f32..720.0).prop_map(|(k, x, y)| Op::Place(k, x, y)),
        (0usize..3, 0usize..3, 0usize..3).prop_map(|(c, p, e)| Op::Stage(c, p, e)),
        (0usize..32, 0usize..32).prop_map(|(a, b)| Op::Connect(a, b)),
        (0usize..32, 0usize..32).prop_map(|(a, b)| Op::Disconnect(a, b)),
        (0usize..32).prop_map(Op::Remove),
        (0usize..32, -100.0f32..1400.0, -100.0f32..800.0).prop_map(|(i, x, y)| Op::Drag(i, x, y)),
    ]
}

proptest! {
    #[test]
    fn prop_scene_and_logic_stay_in_sync(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut controls = controls();

        for op in ops {
            let ids: Vec<_> = controls.scene().components().map(|c| c.id()).collect();
            let pick = |i: usize| ids.get(i % ids.len().max(1)).copied();
            let before = (controls.scene().component_count(), controls.scene().connection_count());

            let outcome = match op {
                Op::Place(kind, x, y) => controls.place_component(KINDS[kind], Point::new(x, y)).map(|_| ()),
                Op::Stage(c, p, e) => controls
                    .init_stage(
                        &[PlacementBatch::new("laptop", c)],
                        &[PlacementBatch::new("router", p)],
                        &[PlacementBatch::new("server", e)],
                    )
                    .map(|_| ()),
                Op::Connect(a, b) => match (pick(a), pick(b)) {
                    (Some(a), Some(b)) => controls.connect(a, b).map(|_| ()),
                    _ => Ok(()),
                },
                Op::Disconnect(a, b) => match (pick(a), pick(b)) {
                    (Some(a), Some(b)) => controls.disconnect(a, b).map(|_| ()),
                    _ => Ok(()),
                },
                Op::Remove(i) => match pick(i) {
                    Some(id) => controls.remove_component(id).map(|_| ()),
                    None => Ok(()),
                },
                Op::Drag(i, x, y) => match pick(i) {
                    Some(id) => controls.drag_component(id, Point::new(x, y)).map(|_| ()),
                    None => Ok(()),
                },
            };

            if outcome.is_err() {
                let after = (controls.scene().component_count(), controls.scene().connection_count());
                prop_assert_eq!(before, after);
            }
            prop_assert!(controls.in_sync());
            prop_assert_eq!(controls.scene().connection_pairs(), controls.logic().connections());
        }
        assert_no_orphans(&controls);
    }
}
