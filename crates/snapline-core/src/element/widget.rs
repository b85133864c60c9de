//! Leaf element rendered from a material template.

use super::{ElementId, Moveable, Pos};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// A single element instantiated from a material.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub(crate) id: ElementId,
    pub pos: Pos,
    /// Id of the material template this widget renders.
    pub material_id: String,
    #[serde(skip)]
    rect_cache: Option<Rect>,
}

impl Widget {
    /// Create a new widget.
    pub fn new(material_id: impl Into<String>, pos: Pos) -> Self {
        Self::with_id(ElementId::next(), material_id, pos)
    }

    /// Create a widget with a specific ID.
    pub fn with_id(id: ElementId, material_id: impl Into<String>, pos: Pos) -> Self {
        Self {
            id,
            pos,
            material_id: material_id.into(),
            rect_cache: None,
        }
    }
}

impl Moveable for Widget {
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
}
