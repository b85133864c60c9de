//! Canvas holding the container surface and its elements.

use crate::element::{ElementId, Group, Moveable, MoveableElement, Pos, Widget};
use crate::material::MaterialRegistry;
use crate::snap::{GeometryProvider, SnapError, SnapResult};
use kurbo::{Point, Rect};
use thiserror::Error;
use uuid::Uuid;

/// Canvas errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    #[error("Material not registered: {0}")]
    UnknownMaterial(String),
    #[error("Element not found: {0}")]
    UnknownElement(ElementId),
    #[error("Element already on canvas: {0}")]
    DuplicateElement(ElementId),
    #[error("Element has no measurable rectangle: {0}")]
    Unmeasured(ElementId),
}

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// A container surface with the elements placed in it.
///
/// Element positions are relative to the container's top-left corner;
/// rectangles handed out through [`GeometryProvider`] are in screen space.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Unique canvas identifier.
    pub id: String,
    container: Rect,
    /// Elements in insertion order (back to front).
    elements: Vec<MoveableElement>,
    materials: MaterialRegistry,
}

impl Canvas {
    /// Create an empty canvas with the built-in materials.
    pub fn new(container: Rect) -> Self {
        Self::with_materials(container, MaterialRegistry::default())
    }

    /// Create an empty canvas with a custom material registry.
    pub fn with_materials(container: Rect, materials: MaterialRegistry) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            container,
            elements: Vec::new(),
            materials,
        }
    }

    pub fn container(&self) -> Rect {
        self.container
    }

    /// Move or resize the container. Engines bound to the old rectangle
    /// must be re-bound.
    pub fn set_container(&mut self, container: Rect) {
        self.container = container;
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn materials_mut(&mut self) -> &mut MaterialRegistry {
        &mut self.materials
    }

    /// Place a widget of a registered material at a container-relative point.
    pub fn add_widget(&mut self, material_id: &str, at: Point) -> CanvasResult<ElementId> {
        let material = self
            .materials
            .get(material_id)
            .ok_or_else(|| CanvasError::UnknownMaterial(material_id.to_string()))?;
        let pos = Pos::new(at.x, at.y).with_size(material.default_size);
        self.insert(Widget::new(material_id, pos).into())
    }

    /// Place a group of widgets.
    pub fn add_group(&mut self, pos: Pos, widgets: Vec<Widget>) -> CanvasResult<ElementId> {
        self.insert(Group::new(pos, widgets).into())
    }

    /// Insert an existing element.
    pub fn insert(&mut self, element: MoveableElement) -> CanvasResult<ElementId> {
        let id = element.id();
        if self.get(id).is_some() {
            return Err(CanvasError::DuplicateElement(id));
        }
        self.elements.push(element);
        Ok(id)
    }

    pub fn get(&self, id: ElementId) -> Option<&MoveableElement> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut MoveableElement> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Elements in insertion order.
    pub fn elements(&self) -> &[MoveableElement] {
        &self.elements
    }

    pub fn ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(|e| e.id()).collect()
    }

    /// Every element id except `id`, in insertion order.
    pub fn others(&self, id: ElementId) -> Vec<ElementId> {
        self.elements
            .iter()
            .map(|e| e.id())
            .filter(|&other| other != id)
            .collect()
    }

    /// Snapshot an element's current layout rectangle into its cache.
    pub fn cache_rect(&mut self, id: ElementId) -> CanvasResult<Rect> {
        let origin = self.container.origin();
        let element = self.get_mut(id).ok_or(CanvasError::UnknownElement(id))?;
        let rect = element.layout_rect(origin).ok_or(CanvasError::Unmeasured(id))?;
        element.set_rect_cache(Some(rect));
        Ok(rect)
    }

    /// Snapshot every measurable element. Returns how many were cached.
    pub fn cache_all_rects(&mut self) -> usize {
        let origin = self.container.origin();
        let mut cached = 0;
        for element in &mut self.elements {
            match element.layout_rect(origin) {
                Some(rect) => {
                    element.set_rect_cache(Some(rect));
                    cached += 1;
                }
                None => log::warn!("Skipping rect cache for unmeasurable element {}", element.id()),
            }
        }
        cached
    }

    /// Drop an element's cached rectangle so the next lookup re-measures it.
    pub fn invalidate_rect(&mut self, id: ElementId) -> CanvasResult<()> {
        let element = self.get_mut(id).ok_or(CanvasError::UnknownElement(id))?;
        element.set_rect_cache(None);
        Ok(())
    }
}

impl GeometryProvider for Canvas {
    fn rect_of(&self, id: ElementId) -> SnapResult<Rect> {
        let element = self.get(id).ok_or(SnapError::UnknownElement(id))?;
        element
            .screen_rect(self.container.origin())
            .ok_or(SnapError::UnmeasuredElement(id))
    }

    fn container_rect(&self) -> Rect {
        self.container
    }
}
