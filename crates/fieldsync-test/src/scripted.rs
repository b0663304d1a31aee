//! A logic layer whose answers can be scripted.

use fieldsync::{
    ComponentId, ComponentSpec, GraphLogic, LogicLayer, LogicResponse, Rejection, TagSet,
    CLIENT_TAG, ENDPOINT_TAG,
};
use log::debug;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::rc::Rc;

/// A proposal received by [`ScriptedLogic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicCall {
    /// `init_stage` with its mapping
    InitStage(BTreeMap<ComponentId, String>),
    /// `add_component`
    AddComponent {
        /// Kind name
        name: String,
        /// Proposed id
        id: ComponentId,
    },
    /// `remove_component`
    RemoveComponent(ComponentId),
    /// `add_connection`
    AddConnection(ComponentId, ComponentId),
    /// `remove_connection`
    RemoveConnection(ComponentId, ComponentId),
}

#[derive(Debug, Default)]
struct Script {
    calls: Vec<LogicCall>,
    rejections: VecDeque<Rejection>,
}

/// Shared handle onto a [`ScriptedLogic`]'s script.
///
/// The controller owns its logic layer, so tests keep one of these to
/// queue rejections and read the call log mid-scenario.
#[derive(Debug, Clone, Default)]
pub struct ScriptHandle(Rc<RefCell<Script>>);

impl ScriptHandle {
    /// Refuse the next proposal with `info`.
    pub fn reject_next(&self, info: impl Into<String>) -> &Self {
        self.0.borrow_mut().rejections.push_back(Rejection::new(info));
        self
    }

    /// Proposals received so far.
    pub fn calls(&self) -> Vec<LogicCall> {
        self.0.borrow().calls.clone()
    }

    /// Forget recorded proposals.
    pub fn clear_calls(&self) {
        self.0.borrow_mut().calls.clear();
    }

    /// Number of queued rejections not yet used.
    pub fn pending_rejections(&self) -> usize {
        self.0.borrow().rejections.len()
    }
}

/// [`GraphLogic`] plus a call log and queued rejections.
///
/// Queued rejections are consumed one per proposal, in order, before the
/// wrapped graph is consulted. Spec lookups and queries are never refused.
#[derive(Debug, Default)]
pub struct ScriptedLogic {
    graph: GraphLogic,
    script: ScriptHandle,
}

impl ScriptedLogic {
    /// Wrap a graph.
    pub fn new(graph: GraphLogic) -> Self {
        Self {
            graph,
            script: ScriptHandle::default(),
        }
    }

    /// A small network catalogue: `laptop` and `phone` clients, `router`,
    /// `cache` and `processor_A` processors, `server` and `database`
    /// endpoints.
    pub fn network() -> Self {
        Self::new(
            GraphLogic::new()
                .with_spec("laptop", TagSet::new().with(CLIENT_TAG))
                .with_spec("phone", TagSet::new().with(CLIENT_TAG))
                .with_spec("router", TagSet::new().with("ROUTER"))
                .with_spec("cache", TagSet::new().with("CACHE"))
                .with_spec("processor_A", TagSet::new().with("COMPUTE"))
                .with_spec("server", TagSet::new().with(ENDPOINT_TAG))
                .with_spec("database", TagSet::new().with(ENDPOINT_TAG).with("STORAGE")),
        )
    }

    /// A handle sharing this logic's script.
    pub fn handle(&self) -> ScriptHandle {
        self.script.clone()
    }

    /// The wrapped graph.
    pub const fn graph(&self) -> &GraphLogic {
        &self.graph
    }

    fn propose(&mut self, call: LogicCall) -> Option<Rejection> {
        let mut script = self.script.0.borrow_mut();
        let scripted = script.rejections.pop_front();
        if let Some(rejection) = &scripted {
            debug!("scripted logic: rejecting {call:?}: {rejection}");
        }
        script.calls.push(call);
        scripted
    }
}

impl LogicLayer for ScriptedLogic {
    fn component_specs(&self, name: &str) -> Option<ComponentSpec> {
        self.graph.component_specs(name)
    }

    fn init_stage(&mut self, placed: &BTreeMap<ComponentId, String>) -> LogicResponse {
        match self.propose(LogicCall::InitStage(placed.clone())) {
            Some(rejection) => Err(rejection),
            None => self.graph.init_stage(placed),
        }
    }

    fn add_component(&mut self, name: &str, id: ComponentId) -> LogicResponse {
        let call = LogicCall::AddComponent {
            name: name.to_string(),
            id,
        };
        match self.propose(call) {
            Some(rejection) => Err(rejection),
            None => self.graph.add_component(name, id),
        }
    }

    fn remove_component(&mut self, id: ComponentId) -> LogicResponse {
        match self.propose(LogicCall::RemoveComponent(id)) {
            Some(rejection) => Err(rejection),
            None => self.graph.remove_component(id),
        }
    }

    fn add_connection(&mut self, source: ComponentId, dest: ComponentId) -> LogicResponse {
        match self.propose(LogicCall::AddConnection(source, dest)) {
            Some(rejection) => Err(rejection),
            None => self.graph.add_connection(source, dest),
        }
    }

    fn remove_connection(&mut self, source: ComponentId, dest: ComponentId) -> LogicResponse {
        match self.propose(LogicCall::RemoveConnection(source, dest)) {
            Some(rejection) => Err(rejection),
            None => self.graph.remove_connection(source, dest),
        }
    }

    fn connections(&self) -> BTreeSet<(ComponentId, ComponentId)> {
        self.graph.connections()
    }

    fn components(&self) -> BTreeSet<ComponentId> {
        self.graph.components()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_consumed_in_order() {
        let mut logic = ScriptedLogic::network();
        logic.handle().reject_next("first").reject_next("second");
        let id = ComponentId::new();

        assert_eq!(logic.add_component("router", id).unwrap_err().info, "first");
        assert_eq!(logic.add_component("router", id).unwrap_err().info, "second");
        logic.add_component("router", id).unwrap();
        assert_eq!(logic.handle().calls().len(), 3);
        assert_eq!(logic.handle().pending_rejections(), 0);
        assert_eq!(logic.graph().component_count(), 1);
    }

    #[test]
    fn test_calls_are_recorded() {
        let mut logic = ScriptedLogic::network();
        let handle = logic.handle();
        let (a, b) = (ComponentId::new(), ComponentId::new());
        logic.add_component("router", a).unwrap();
        logic.add_component("server", b).unwrap();
        logic.add_connection(a, b).unwrap();
        logic.remove_connection(a, b).unwrap();

        assert_eq!(
            handle.calls().last(),
            Some(&LogicCall::RemoveConnection(a, b))
        );
        handle.clear_calls();
        assert!(handle.calls().is_empty());
    }

    #[test]
    fn test_network_catalogue() {
        let logic = ScriptedLogic::network();
        assert!(logic.component_specs("laptop").unwrap().tags.contains(CLIENT_TAG));
        assert!(logic.component_specs("database").unwrap().tags.contains(ENDPOINT_TAG));
        assert!(logic.component_specs("toaster").is_none());
    }
}
