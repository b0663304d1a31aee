//! Component identifiers.
//!
//! A [`ComponentId`] is the only key shared between the visual scene and
//! the logic layer. Both sides store their own representation of a
//! component and correlate them through this id.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Globally unique identifier of a placed component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentId(Uuid);

impl ComponentId {
    /// Create a new id with a fresh random UUID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ComponentId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for ComponentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ComponentId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Source of fresh component ids.
pub trait IdGenerator {
    /// Produce an id never returned before by this generator.
    fn new_id(&mut self) -> ComponentId;
}

/// Random v4 UUIDs. The default generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn new_id(&mut self) -> ComponentId {
        ComponentId::new()
    }
}

/// Deterministic ids for tests: `Uuid::from_u128(start)`, `start + 1`, ...
#[derive(Debug, Clone, Copy)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    /// Start counting at 1.
    #[must_use]
    pub const fn new() -> Self {
        Self::starting_at(1)
    }

    /// Start counting at `start`.
    #[must_use]
    pub const fn starting_at(start: u128) -> Self {
        Self { next: start }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn new_id(&mut self) -> ComponentId {
        let id = ComponentId::from_uuid(Uuid::from_u128(self.next));
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_component_id_display_roundtrip() {
        let id = ComponentId::new();
        let parsed: ComponentId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_component_id_parse_invalid() {
        assert!("not-a-uuid".parse::<ComponentId>().is_err());
    }

    #[test]
    fn test_uuid_generator_unique() {
        let mut ids = UuidGenerator;
        let generated: HashSet<_> = (0..100_000).map(|_| ids.new_id()).collect();
        assert_eq!(generated.len(), 100_000);
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::starting_at(7);
        assert_eq!(ids.new_id().as_uuid(), Uuid::from_u128(7));
        assert_eq!(ids.new_id().as_uuid(), Uuid::from_u128(8));
    }
}
