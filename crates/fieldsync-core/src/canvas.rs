//! Drawing surface abstraction and a recording implementation.
//!
//! The scene engine that actually rasterises the play field implements
//! [`Canvas`]; tests and headless runs use [`RecordingCanvas`] and inspect
//! the emitted [`DrawCommand`]s.

use crate::{Color, Point, Rect};
use serde::{Deserialize, Serialize};

/// Text style for labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 14.0,
            color: Color::BLACK,
        }
    }
}

/// Drawing surface used by components and connections.
pub trait Canvas {
    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke a rectangle outline.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);

    /// Draw a line segment.
    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32);

    /// Draw text anchored at `position`.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);
}

/// A single recorded drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Filled rectangle
    FillRect {
        /// Bounds
        bounds: Rect,
        /// Fill color
        color: Color,
    },
    /// Rectangle outline
    StrokeRect {
        /// Bounds
        bounds: Rect,
        /// Stroke color
        color: Color,
        /// Stroke width
        width: f32,
    },
    /// Line segment
    Line {
        /// Start point
        from: Point,
        /// End point
        to: Point,
        /// Stroke color
        color: Color,
        /// Stroke width
        width: f32,
    },
    /// Text label
    Text {
        /// Label content
        content: String,
        /// Anchor position
        position: Point,
        /// Style
        style: TextStyle,
    },
}

/// Canvas that records draw commands instead of rendering.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            bounds: rect,
            color,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.commands.push(DrawCommand::StrokeRect {
            bounds: rect,
            color,
            width,
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: *style,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_canvas_records_in_order() {
        let mut canvas = RecordingCanvas::new();
        canvas.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        canvas.draw_line(Point::ORIGIN, Point::new(5.0, 5.0), Color::BLACK, 2.0);
        canvas.draw_text("hi", Point::ORIGIN, &TextStyle::default());

        assert_eq!(canvas.command_count(), 3);
        assert!(matches!(canvas.commands()[0], DrawCommand::FillRect { .. }));
        assert!(matches!(canvas.commands()[1], DrawCommand::Line { width, .. } if width == 2.0));
        assert!(
            matches!(&canvas.commands()[2], DrawCommand::Text { content, .. } if content == "hi")
        );
    }

    #[test]
    fn test_recording_canvas_starts_empty() {
        let mut canvas = RecordingCanvas::new();
        assert!(canvas.is_empty());
        canvas.stroke_rect(Rect::default(), Color::BLACK, 1.0);
        assert!(!canvas.is_empty());
    }
}
