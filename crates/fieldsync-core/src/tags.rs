//! Capability tags and interaction flags.
//!
//! Tags come from the logic layer's component specification and decide what
//! a component *is*. Interaction flags are a separate, purely visual concern
//! deciding what the user may *do* with it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Tag marking a traffic source.
pub const CLIENT_TAG: &str = "CLIENT";
/// Tag marking a traffic sink.
pub const ENDPOINT_TAG: &str = "ENDPOINT";

/// Set of capability tags reported by the logic layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    /// Create an empty tag set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag.
    #[must_use]
    pub fn with(mut self, tag: impl Into<String>) -> Self {
        self.0.insert(tag.into());
        self
    }

    /// Check for a tag.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// Iterate tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Error deriving a capability from tags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// Both `CLIENT` and `ENDPOINT` were present.
    #[error("tags mark a component as both CLIENT and ENDPOINT")]
    ConflictingCapabilities,
}

/// What a component is, derived from its tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Produces traffic; lives in the client column
    Client,
    /// Transforms traffic; lives in the processor row
    Processor,
    /// Consumes traffic; lives in the endpoint column
    Endpoint,
}

impl Capability {
    /// Derive the capability: `CLIENT`, `ENDPOINT`, or neither (processor).
    ///
    /// # Errors
    ///
    /// Returns [`TagError::ConflictingCapabilities`] when both marker tags
    /// are present.
    pub fn from_tags(tags: &TagSet) -> Result<Self, TagError> {
        match (tags.contains(CLIENT_TAG), tags.contains(ENDPOINT_TAG)) {
            (true, true) => Err(TagError::ConflictingCapabilities),
            (true, false) => Ok(Self::Client),
            (false, true) => Ok(Self::Endpoint),
            (false, false) => Ok(Self::Processor),
        }
    }
}

/// What the user may do with a component on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Interaction {
    /// Can be dragged around the field
    pub draggable: bool,
    /// Can be picked by selection
    pub selectable: bool,
    /// Can be removed by the user
    pub removable: bool,
}

impl Interaction {
    /// No interaction at all.
    pub const NONE: Self = Self {
        draggable: false,
        selectable: false,
        removable: false,
    };

    /// Everything allowed; used for user-placed components.
    pub const FULL: Self = Self {
        draggable: true,
        selectable: true,
        removable: true,
    };

    /// Set draggable.
    #[must_use]
    pub const fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Set selectable.
    #[must_use]
    pub const fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }
}
