//! Movable canvas elements.

mod group;
mod widget;

pub use group::Group;
pub use widget::Widget;

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Allocate a fresh id, unique within the process.
    pub fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};

        static ID_COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stored position of an element, relative to the container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pos {
    /// Left of the anchor.
    pub x: f64,
    /// Top of the anchor.
    pub y: f64,
    /// Left relative to the owning group's anchor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_x: Option<f64>,
    /// Top relative to the owning group's anchor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Pos {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Set the size.
    pub fn with_size(mut self, size: Size) -> Self {
        self.width = Some(size.width);
        self.height = Some(size.height);
        self
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Size, if both dimensions are known.
    pub fn size(&self) -> Option<Size> {
        Some(Size::new(self.width?, self.height?))
    }
}

/// Common trait for everything that can be dragged around the container.
pub trait Moveable {
    /// Get the unique identifier.
    fn id(&self) -> ElementId;

    fn pos(&self) -> &Pos;

    fn pos_mut(&mut self) -> &mut Pos;

    /// Cached screen rectangle, if a snapshot was taken.
    fn rect_cache(&self) -> Option<Rect>;

    /// Replace the cached screen rectangle.
    fn set_rect_cache(&mut self, rect: Option<Rect>);

    /// Screen rectangle derived from the stored position, for a container
    /// whose top-left corner sits at `container_origin`.
    fn layout_rect(&self, container_origin: Point) -> Option<Rect> {
        let size = self.pos().size()?;
        let origin = container_origin + self.pos().point().to_vec2();
        Some(Rect::from_origin_size(origin, size))
    }

    /// Cached rectangle if present, otherwise the layout rectangle.
    fn screen_rect(&self, container_origin: Point) -> Option<Rect> {
        self.rect_cache().or_else(|| self.layout_rect(container_origin))
    }
}

/// Write a new position. Only finite values are applied; `None` leaves
/// that axis untouched.
pub fn update_element_pos<M: Moveable + ?Sized>(element: &mut M, x: Option<f64>, y: Option<f64>) {
    let pos = element.pos_mut();
    if let Some(x) = x.filter(|v| v.is_finite()) {
        pos.x = x;
    }
    if let Some(y) = y.filter(|v| v.is_finite()) {
        pos.y = y;
    }
}

/// Enum wrapper for all element kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MoveableElement {
    Widget(Widget),
    Group(Group),
}

impl MoveableElement {
    pub fn as_widget(&self) -> Option<&Widget> {
        match self {
            MoveableElement::Widget(w) => Some(w),
            MoveableElement::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            MoveableElement::Group(g) => Some(g),
            MoveableElement::Widget(_) => None,
        }
    }
}

impl Moveable for MoveableElement {
    fn id(&self) -> ElementId {
        match self {
            MoveableElement::Widget(w) => w.id(),
            MoveableElement::Group(g) => g.id(),
        }
    }

    fn pos(&self) -> &Pos {
        match self {
            MoveableElement::Widget(w) => w.pos(),
            MoveableElement::Group(g) => g.pos(),
        }
    }

    fn pos_mut(&mut self) -> &mut Pos {
        match self {
            MoveableElement::Widget(w) => w.pos_mut(),
            MoveableElement::Group(g) => g.pos_mut(),
        }
    }

    fn rect_cache(&self) -> Option<Rect> {
        match self {
            MoveableElement::Widget(w) => w.rect_cache(),
            MoveableElement::Group(g) => g.rect_cache(),
        }
    }

    fn set_rect_cache(&mut self, rect: Option<Rect>) {
        match self {
            MoveableElement::Widget(w) => w.set_rect_cache(rect),
            MoveableElement::Group(g) => g.set_rect_cache(rect),
        }
    }

    fn layout_rect(&self, container_origin: Point) -> Option<Rect> {
        match self {
            MoveableElement::Widget(w) => w.layout_rect(container_origin),
            MoveableElement::Group(g) => g.layout_rect(container_origin),
        }
    }
}

impl From<Widget> for MoveableElement {
    fn from(widget: Widget) -> Self {
        MoveableElement::Widget(widget)
    }
}

impl From<Group> for MoveableElement {
    fn from(group: Group) -> Self {
        MoveableElement::Group(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_ids_are_unique() {
        let a = ElementId::next();
        let b = ElementId::next();
        assert_ne!(a, b);
        assert_eq!(format!("{}", ElementId(7)), "#7");
    }

    #[test]
    fn test_update_element_pos_x_only() {
        let mut widget = Widget::new("box1", Pos::new(1.0, 2.0));
        let y_before = widget.pos().y.to_bits();
        update_element_pos(&mut widget, Some(10.0), None);
        assert_eq!(widget.pos().x, 10.0);
        assert_eq!(widget.pos().y.to_bits(), y_before);
    }

    #[test]
    fn test_update_element_pos_both() {
        let mut element: MoveableElement = Widget::new("box1", Pos::new(1.0, 2.0)).into();
        update_element_pos(&mut element, Some(-4.0), Some(0.0));
        assert_eq!(element.pos().point(), Point::new(-4.0, 0.0));
    }

    #[test]
    fn test_update_element_pos_ignores_non_finite() {
        let mut widget = Widget::new("box1", Pos::new(1.0, 2.0));
        update_element_pos(&mut widget, Some(f64::NAN), Some(f64::INFINITY));
        assert_eq!(widget.pos().point(), Point::new(1.0, 2.0));
    }

    #[test]
    fn test_layout_rect_needs_size() {
        let widget = Widget::new("box1", Pos::new(10.0, 20.0));
        assert!(widget.layout_rect(Point::ZERO).is_none());

        let widget = Widget::new("box1", Pos::new(10.0, 20.0).with_size(Size::new(30.0, 40.0)));
        let rect = widget.layout_rect(Point::new(5.0, 5.0)).unwrap();
        assert_eq!(rect, Rect::new(15.0, 25.0, 45.0, 65.0));
    }

    #[test]
    fn test_screen_rect_prefers_cache() {
        let mut widget = Widget::new("box1", Pos::new(0.0, 0.0).with_size(Size::new(10.0, 10.0)));
        let cached = Rect::new(1.0, 1.0, 2.0, 2.0);
        widget.set_rect_cache(Some(cached));
        assert_eq!(widget.screen_rect(Point::ZERO), Some(cached));
        widget.set_rect_cache(None);
        assert_eq!(widget.screen_rect(Point::ZERO), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_element_serde_tag() {
        let element: MoveableElement =
            Widget::with_id(ElementId(3), "box1", Pos::new(1.0, 2.0)).into();
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["kind"], "widget");
        assert_eq!(json["materialId"], "box1");
        assert_eq!(json["pos"], serde_json::json!({"x": 1.0, "y": 2.0}));
    }
}
