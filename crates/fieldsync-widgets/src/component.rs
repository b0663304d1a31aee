//! Visual representation of a placed component.

use fieldsync_core::{
    Canvas, Capability, Color, ComponentId, Interaction, Point, Rect, TagError, TagSet, TextStyle,
};
use std::any::Any;

use crate::bounding::BoundingRect;
use crate::connection::ConnectionId;

/// Colours and label style used when painting a component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentStyle {
    /// Box fill
    pub fill: Color,
    /// Box outline
    pub outline: Color,
    /// Outline width
    pub outline_width: f32,
    /// Name label
    pub label: TextStyle,
}

impl Default for ComponentStyle {
    fn default() -> Self {
        Self {
            fill: Color::WHITE,
            outline: Color::BLACK,
            outline_width: 1.0,
            label: TextStyle::default(),
        }
    }
}

/// A drawable node on the play field.
///
/// The id links this node to its counterpart in the logic layer. The list of
/// connection handles is the set of listeners notified when the node moves;
/// handles are not owning, so a destroyed connection simply stops resolving.
#[derive(Debug, Clone)]
pub struct InterfaceComponent {
    id: ComponentId,
    name: String,
    tags: TagSet,
    capability: Capability,
    interaction: Interaction,
    bounds: BoundingRect,
    listeners: Vec<ConnectionId>,
}

impl InterfaceComponent {
    /// Create a component with no interaction flags.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::ConflictingCapabilities`] if `tags` contains both
    /// `CLIENT` and `ENDPOINT`.
    pub fn new(
        name: impl Into<String>,
        id: ComponentId,
        tags: TagSet,
        bounds: BoundingRect,
    ) -> Result<Self, TagError> {
        let capability = Capability::from_tags(&tags)?;
        Ok(Self {
            id,
            name: name.into(),
            tags,
            capability,
            interaction: Interaction::NONE,
            bounds,
            listeners: Vec::new(),
        })
    }

    /// Set interaction flags.
    #[must_use]
    pub const fn with_interaction(mut self, interaction: Interaction) -> Self {
        self.interaction = interaction;
        self
    }

    /// Correlation id.
    #[must_use]
    pub const fn id(&self) -> ComponentId {
        self.id
    }

    /// Display name (the component kind).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capability tags as reported by the logic layer.
    #[must_use]
    pub const fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Derived capability.
    #[must_use]
    pub const fn capability(&self) -> Capability {
        self.capability
    }

    /// Whether this is a client.
    #[must_use]
    pub fn is_client(&self) -> bool {
        self.capability == Capability::Client
    }

    /// Whether this is an endpoint.
    #[must_use]
    pub fn is_endpoint(&self) -> bool {
        self.capability == Capability::Endpoint
    }

    /// Whether this is a processor (neither client nor endpoint).
    #[must_use]
    pub fn is_processor(&self) -> bool {
        self.capability == Capability::Processor
    }

    /// Interaction flags.
    #[must_use]
    pub const fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// True iff `other` is an `InterfaceComponent` with the same id.
    #[must_use]
    pub fn equals(&self, other: &dyn Any) -> bool {
        other
            .downcast_ref::<Self>()
            .is_some_and(|component| component.id == self.id)
    }

    /// Owned bounding box.
    #[must_use]
    pub const fn bounding_box(&self) -> &BoundingRect {
        &self.bounds
    }

    /// Current position of the origin point.
    #[must_use]
    pub fn position(&self) -> Point {
        self.bounds.position()
    }

    /// Restrict later moves to `boundary`.
    pub fn set_containment(&mut self, boundary: Rect) {
        self.bounds.set_containment(boundary);
    }

    /// Move towards `target`, returning the clamped position.
    ///
    /// Connection listeners are notified by the owning scene, which knows
    /// how to resolve the handles.
    pub fn move_to(&mut self, target: Point) -> Point {
        self.bounds.move_to(target)
    }

    /// Jump to `position` without clamping.
    pub fn set_position(&mut self, position: Point) -> Point {
        self.bounds.set_position(position)
    }

    /// Register a connection to be notified when this component moves.
    ///
    /// Registering the same handle twice is a no-op.
    pub fn add_connection_listener(&mut self, connection: ConnectionId) {
        if !self.listeners.contains(&connection) {
            self.listeners.push(connection);
        }
    }

    /// Unregister a connection.
    pub fn remove_connection_listener(&mut self, connection: ConnectionId) {
        self.listeners.retain(|handle| *handle != connection);
    }

    /// Registered connection handles in registration order.
    #[must_use]
    pub fn connection_listeners(&self) -> &[ConnectionId] {
        &self.listeners
    }

    /// Paint the box and its name label.
    pub fn paint(&self, canvas: &mut dyn Canvas, style: &ComponentStyle) {
        let rect = self.bounds.rect();
        canvas.fill_rect(rect, style.fill);
        canvas.stroke_rect(rect, style.outline, style.outline_width);
        canvas.draw_text(&self.name, rect.center(), &style.label);
    }
}

impl PartialEq for InterfaceComponent {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for InterfaceComponent {}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldsync_core::{DrawCommand, RecordingCanvas, Size, CLIENT_TAG, ENDPOINT_TAG};

    fn component(tags: TagSet) -> InterfaceComponent {
        InterfaceComponent::new(
            "router",
            ComponentId::new(),
            tags,
            BoundingRect::centered(Point::new(10.0, 20.0), Size::new(32.0, 32.0)),
        )
        .unwrap()
    }

    #[test]
    fn test_capability_accessors() {
        let client = component(TagSet::new().with(CLIENT_TAG));
        assert!(client.is_client() && !client.is_endpoint() && !client.is_processor());

        let endpoint = component(TagSet::new().with(ENDPOINT_TAG));
        assert!(endpoint.is_endpoint() && !endpoint.is_client());

        let processor = component(TagSet::new().with("cache"));
        assert!(processor.is_processor());
    }

    #[test]
    fn test_conflicting_tags_rejected() {
        let result = InterfaceComponent::new(
            "bad",
            ComponentId::new(),
            TagSet::new().with(CLIENT_TAG).with(ENDPOINT_TAG),
            BoundingRect::centered(Point::ORIGIN, Size::new(1.0, 1.0)),
        );
        assert_eq!(result.unwrap_err(), TagError::ConflictingCapabilities);
    }

    #[test]
    fn test_equals_by_id_and_type() {
        let a = component(TagSet::new());
        let mut same = a.clone();
        same.move_to(Point::new(99.0, 99.0));
        let other = component(TagSet::new());

        assert!(a.equals(&same));
        assert!(!a.equals(&other));
        assert!(!a.equals(&"router"));
        assert!(!a.equals(&a.id()));
        assert_eq!(a, same);
    }

    #[test]
    fn test_listener_registration_order_and_dedupe() {
        let mut c = component(TagSet::new());
        c.add_connection_listener(ConnectionId(3));
        c.add_connection_listener(ConnectionId(1));
        c.add_connection_listener(ConnectionId(3));
        assert_eq!(c.connection_listeners(), &[ConnectionId(3), ConnectionId(1)]);

        c.remove_connection_listener(ConnectionId(3));
        assert_eq!(c.connection_listeners(), &[ConnectionId(1)]);
    }

    #[test]
    fn test_paint_emits_box_and_label() {
        let c = component(TagSet::new());
        let mut canvas = RecordingCanvas::new();
        c.paint(&mut canvas, &ComponentStyle::default());

        assert_eq!(canvas.command_count(), 3);
        assert!(
            matches!(&canvas.commands()[2], DrawCommand::Text { content, position, .. }
                if content == "router" && *position == Point::new(10.0, 20.0))
        );
    }
}
