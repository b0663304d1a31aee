//! In-memory reference logic layer.

use fieldsync_core::{Capability, ComponentId, TagSet};
use std::collections::{BTreeMap, BTreeSet};

use crate::logic::{ComponentSpec, LogicLayer, LogicResponse, Rejection};

/// A directed graph with a catalogue of component kinds.
///
/// Edges may not leave an endpoint, enter a client, or loop back onto
/// their source.
#[derive(Debug, Clone, Default)]
pub struct GraphLogic {
    specs: BTreeMap<String, ComponentSpec>,
    nodes: BTreeMap<ComponentId, String>,
    edges: BTreeSet<(ComponentId, ComponentId)>,
}

impl GraphLogic {
    /// Create an empty graph with no known kinds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component kind.
    #[must_use]
    pub fn with_spec(mut self, name: impl Into<String>, tags: TagSet) -> Self {
        self.register_spec(name, tags);
        self
    }

    /// Register or replace a component kind.
    pub fn register_spec(&mut self, name: impl Into<String>, tags: TagSet) {
        self.specs.insert(name.into(), ComponentSpec::new(tags));
    }

    /// Kind of a held component.
    #[must_use]
    pub fn kind_of(&self, id: ComponentId) -> Option<&str> {
        self.nodes.get(&id).map(String::as_str)
    }

    /// Number of held components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of held edges.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.edges.len()
    }

    fn capability(&self, id: ComponentId) -> Result<Capability, Rejection> {
        let kind = self
            .nodes
            .get(&id)
            .ok_or_else(|| Rejection::new(format!("unknown component {id}")))?;
        let spec = self
            .specs
            .get(kind)
            .ok_or_else(|| Rejection::new(format!("unknown component kind '{kind}'")))?;
        Capability::from_tags(&spec.tags).map_err(|err| Rejection::new(err.to_string()))
    }

    fn check_new(&self, name: &str, id: ComponentId) -> LogicResponse {
        if !self.specs.contains_key(name) {
            return Err(Rejection::new(format!("unknown component kind '{name}'")));
        }
        if self.nodes.contains_key(&id) {
            return Err(Rejection::new(format!("component {id} already exists")));
        }
        Ok(())
    }
}

impl LogicLayer for GraphLogic {
    fn component_specs(&self, name: &str) -> Option<ComponentSpec> {
        self.specs.get(name).cloned()
    }

    fn init_stage(&mut self, placed: &BTreeMap<ComponentId, String>) -> LogicResponse {
        for (id, name) in placed {
            self.check_new(name, *id)?;
        }
        for (id, name) in placed {
            self.nodes.insert(*id, name.clone());
        }
        Ok(())
    }

    fn add_component(&mut self, name: &str, id: ComponentId) -> LogicResponse {
        self.check_new(name, id)?;
        self.nodes.insert(id, name.to_owned());
        Ok(())
    }

    fn remove_component(&mut self, id: ComponentId) -> LogicResponse {
        if self.nodes.remove(&id).is_none() {
            return Err(Rejection::new(format!("unknown component {id}")));
        }
        self.edges
            .retain(|(source, dest)| *source != id && *dest != id);
        Ok(())
    }

    fn add_connection(&mut self, source: ComponentId, dest: ComponentId) -> LogicResponse {
        let from = self.capability(source)?;
        let to = self.capability(dest)?;
        if source == dest {
            return Err(Rejection::new("a component cannot connect to itself"));
        }
        if from == Capability::Endpoint {
            return Err(Rejection::new("endpoints cannot originate connections"));
        }
        if to == Capability::Client {
            return Err(Rejection::new("clients cannot receive connections"));
        }
        if !self.edges.insert((source, dest)) {
            return Err(Rejection::new("connection already exists"));
        }
        Ok(())
    }

    fn remove_connection(&mut self, source: ComponentId, dest: ComponentId) -> LogicResponse {
        if self.edges.remove(&(source, dest)) {
            Ok(())
        } else {
            Err(Rejection::new("no such connection"))
        }
    }

    fn connections(&self) -> BTreeSet<(ComponentId, ComponentId)> {
        self.edges.clone()
    }

    fn components(&self) -> BTreeSet<ComponentId> {
        self.nodes.keys().copied().collect()
    }
}
