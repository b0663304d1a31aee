//! Core types for fieldsync.
//!
//! This crate provides the foundational types shared by the visual scene and
//! the synchronization controller:
//! - Identifiers: [`ComponentId`], [`IdGenerator`]
//! - Capability tags and interaction flags: [`TagSet`], [`Capability`], [`Interaction`]
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Drawing: [`Color`], [`Canvas`], [`RecordingCanvas`]

mod canvas;
mod color;
mod geometry;
mod id;
mod tags;

pub use canvas::{Canvas, DrawCommand, RecordingCanvas, TextStyle};
pub use color::{Color, ColorParseError};
pub use geometry::{Point, Rect, Size};
pub use id::{ComponentId, IdGenerator, SequentialIds, UuidGenerator};
pub use tags::{Capability, Interaction, TagError, TagSet, CLIENT_TAG, ENDPOINT_TAG};
