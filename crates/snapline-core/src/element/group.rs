//! Group element that moves several widgets as one unit.

use super::{ElementId, Moveable, Pos, Widget};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A group of widgets that is dragged as a single element.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub(crate) id: ElementId,
    pub pos: Pos,
    /// Member widgets in insertion order. Only `push_widget` adds to it, so
    /// every member carries its offset from the anchor.
    widgets: Vec<Widget>,
    #[serde(skip)]
    rect_cache: Option<Rect>,
}

impl Group {
    /// Create a new group anchored at `pos`.
    pub fn new(pos: Pos, widgets: Vec<Widget>) -> Self {
        Self::with_id(ElementId::next(), pos, widgets)
    }

    /// Create a new group with a specific ID.
    pub fn with_id(id: ElementId, pos: Pos, widgets: Vec<Widget>) -> Self {
        let mut group = Self {
            id,
            pos,
            widgets: Vec::with_capacity(widgets.len()),
            rect_cache: None,
        };
        for widget in widgets {
            group.push_widget(widget);
        }
        group
    }

    /// Add a widget, recording its offset from the group anchor.
    pub fn push_widget(&mut self, mut widget: Widget) {
        widget.pos.relative_x = Some(widget.pos.x - self.pos.x);
        widget.pos.relative_y = Some(widget.pos.y - self.pos.y);
        self.widgets.push(widget);
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Dissolve this group and return its widgets.
    pub fn ungroup(self) -> Vec<Widget> {
        self.widgets
    }

    /// Find a member widget by ID.
    pub fn find_widget(&self, id: ElementId) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    /// Screen rectangle of a member, placed from the group anchor when its
    /// relative offset is known.
    pub fn member_rect(&self, widget: &Widget, container_origin: Point) -> Option<Rect> {
        let size = widget.pos.size()?;
        let x = widget.pos.relative_x.map_or(widget.pos.x, |rx| self.pos.x + rx);
        let y = widget.pos.relative_y.map_or(widget.pos.y, |ry| self.pos.y + ry);
        Some(Rect::from_origin_size(container_origin + Vec2::new(x, y), size))
    }

    /// Union of the members' screen rectangles.
    pub fn bounds(&self, container_origin: Point) -> Option<Rect> {
        self.widgets
            .iter()
            .filter_map(|w| self.member_rect(w, container_origin))
            .reduce(|acc, r| acc.union(r))
    }
}

impl Moveable for Group {
    fn id(&self) -> ElementId {
        self.id
    }

    fn pos(&self) -> &Pos {
        &self.pos
    }

    fn pos_mut(&mut self) -> &mut Pos {
        &mut self.pos
    }

    fn rect_cache(&self) -> Option<Rect> {
        self.rect_cache
    }

    fn set_rect_cache(&mut self, rect: Option<Rect>) {
        self.rect_cache = rect;
    }

    fn layout_rect(&self, container_origin: Point) -> Option<Rect> {
        // An explicit size wins; otherwise the group wraps its members.
        match self.pos.size() {
            Some(size) => {
                let origin = container_origin + self.pos.point().to_vec2();
                Some(Rect::from_origin_size(origin, size))
            }
            None => self.bounds(container_origin),
        }
    }
}
