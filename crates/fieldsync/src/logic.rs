//! The validating graph the visual layer follows.
//!
//! Every structural change is proposed to a [`LogicLayer`] first. Only when
//! it answers `Ok(())` does the controller touch the scene.

use fieldsync_core::{ComponentId, TagSet};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// A refused proposal, with the reason supplied by the logic layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{info}")]
pub struct Rejection {
    /// Human-readable reason
    pub info: String,
}

impl Rejection {
    /// Create a rejection.
    #[must_use]
    pub fn new(info: impl Into<String>) -> Self {
        Self { info: info.into() }
    }
}

/// Outcome of a proposal.
pub type LogicResponse = Result<(), Rejection>;

/// What the logic layer knows about a component kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentSpec {
    /// Capability tags copied onto every visual entity of this kind
    pub tags: TagSet,
}

impl ComponentSpec {
    /// Create a spec from its tags.
    #[must_use]
    pub const fn new(tags: TagSet) -> Self {
        Self { tags }
    }
}

/// Authoritative graph store and validator.
///
/// Implementations apply a proposal when they accept it; a rejected
/// proposal must leave the logic state unchanged.
pub trait LogicLayer {
    /// Spec of a component kind, or `None` if the kind is unknown.
    fn component_specs(&self, name: &str) -> Option<ComponentSpec>;

    /// Stage a batch of components (id to kind name) in one step.
    fn init_stage(&mut self, placed: &BTreeMap<ComponentId, String>) -> LogicResponse;

    /// Add one component of kind `name` under `id`.
    fn add_component(&mut self, name: &str, id: ComponentId) -> LogicResponse;

    /// Remove a component together with its edges.
    fn remove_component(&mut self, id: ComponentId) -> LogicResponse;

    /// Add the directed edge `source -> dest`.
    fn add_connection(&mut self, source: ComponentId, dest: ComponentId) -> LogicResponse;

    /// Remove the directed edge `source -> dest`.
    fn remove_connection(&mut self, source: ComponentId, dest: ComponentId) -> LogicResponse;

    /// Every edge currently held.
    fn connections(&self) -> BTreeSet<(ComponentId, ComponentId)>;

    /// Every component currently held.
    fn components(&self) -> BTreeSet<ComponentId>;
}

impl<L: LogicLayer + ?Sized> LogicLayer for Box<L> {
    fn component_specs(&self, name: &str) -> Option<ComponentSpec> {
        (**self).component_specs(name)
    }

    fn init_stage(&mut self, placed: &BTreeMap<ComponentId, String>) -> LogicResponse {
        (**self).init_stage(placed)
    }

    fn add_component(&mut self, name: &str, id: ComponentId) -> LogicResponse {
        (**self).add_component(name, id)
    }

    fn remove_component(&mut self, id: ComponentId) -> LogicResponse {
        (**self).remove_component(id)
    }

    fn add_connection(&mut self, source: ComponentId, dest: ComponentId) -> LogicResponse {
        (**self).add_connection(source, dest)
    }

    fn remove_connection(&mut self, source: ComponentId, dest: ComponentId) -> LogicResponse {
        (**self).remove_connection(source, dest)
    }

    fn connections(&self) -> BTreeSet<(ComponentId, ComponentId)> {
        (**self).connections()
    }

    fn components(&self) -> BTreeSet<ComponentId> {
        (**self).components()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_displays_info() {
        let rejection = Rejection::new("edge already exists");
        assert_eq!(rejection.to_string(), "edge already exists");
        assert_eq!(rejection.info, "edge already exists");
    }

    #[test]
    fn test_component_spec_default_has_no_tags() {
        assert!(ComponentSpec::default().tags.is_empty());
    }
}
