//! Drag sessions: apply pointer moves to an element and snap it to guides.

use crate::canvas::Canvas;
use crate::element::{ElementId, Moveable};
use crate::lines::DisplayLines;
use crate::snap::{AlignmentEngine, AxisLines, SnapError, SnapResult};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// One pointer move during a drag, in container-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveData {
    /// Unsnapped anchor position requested by the pointer.
    pub new_x: f64,
    pub new_y: f64,
    /// Movement since the previous event.
    pub delta_x: f64,
    pub delta_y: f64,
}

impl MoveData {
    pub fn new(new_x: f64, new_y: f64, delta_x: f64, delta_y: f64) -> Self {
        Self {
            new_x,
            new_y,
            delta_x,
            delta_y,
        }
    }
}

/// Outcome of one drag move: where the element landed and which guides to show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragFrame {
    pub element: ElementId,
    /// Final anchor position after snapping.
    pub x: f64,
    pub y: f64,
    /// Whether the X coordinate was snapped.
    pub snapped_x: bool,
    /// Whether the Y coordinate was snapped.
    pub snapped_y: bool,
    pub horizontal: DisplayLines,
    pub vertical: DisplayLines,
}

impl DragFrame {
    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Tracks the element being dragged and turns moves into snapped positions.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    dragging: Option<ElementId>,
    /// Position the element had when the drag started.
    start: Option<Point>,
    /// Also align against the container's edges and centers.
    pub snap_to_container: bool,
}

impl DragSession {
    /// Create an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable container guides.
    pub fn with_container_guides(mut self, enabled: bool) -> Self {
        self.snap_to_container = enabled;
        self
    }

    /// Start dragging an element.
    pub fn begin(&mut self, canvas: &Canvas, id: ElementId) -> SnapResult<()> {
        let element = canvas.get(id).ok_or(SnapError::UnknownElement(id))?;
        self.dragging = Some(id);
        self.start = Some(element.pos().point());
        log::debug!("Drag started on {} in canvas {}", id, canvas.id);
        Ok(())
    }

    /// Element currently being dragged.
    pub fn dragging(&self) -> Option<ElementId> {
        self.dragging
    }

    pub fn is_active(&self) -> bool {
        self.dragging.is_some()
    }

    /// Position of the dragged element when the drag began.
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// Apply a move. Returns `None` when no drag is in progress.
    ///
    /// The element first takes the unsnapped position, then each axis with a
    /// guide line snaps to the closest one. The move delta does not filter
    /// guides. On error the element keeps the position it had before the move.
    pub fn on_move(
        &mut self,
        canvas: &mut Canvas,
        engine: &AlignmentEngine,
        data: MoveData,
    ) -> SnapResult<Option<DragFrame>> {
        let Some(id) = self.dragging else {
            return Ok(None);
        };

        let element = canvas.get_mut(id).ok_or(SnapError::UnknownElement(id))?;
        let previous = (*element.pos(), element.rect_cache());
        engine.update_element_pos(element, Some(data.new_x), Some(data.new_y));
        // The old snapshot no longer matches the element.
        element.set_rect_cache(None);

        let others = canvas.others(id);
        let result = if self.snap_to_container {
            engine.get_lines_with_container(&*canvas, id, &others)
        } else {
            engine.get_lines(&*canvas, id, &others)
        };

        let element = canvas.get_mut(id).ok_or(SnapError::UnknownElement(id))?;
        let lines = match result {
            Ok(lines) => lines,
            Err(e) => {
                let (pos, cache) = previous;
                *element.pos_mut() = pos;
                element.set_rect_cache(cache);
                log::warn!("Move of {} rejected: {}", id, e);
                return Err(e);
            }
        };

        let (snap_x, snap_y) = lines.snap_target();
        engine.update_element_pos(element, snap_x, snap_y);
        let pos = *element.pos();

        log::debug!(
            "Moved {} to ({}, {}), requested ({}, {})",
            id,
            pos.x,
            pos.y,
            data.new_x,
            data.new_y
        );

        let AxisLines { horizontal, vertical } = lines;
        Ok(Some(DragFrame {
            element: id,
            x: pos.x,
            y: pos.y,
            snapped_x: snap_x.is_some(),
            snapped_y: snap_y.is_some(),
            horizontal,
            vertical,
        }))
    }

    /// Finish the drag. Returns the element that was being dragged.
    pub fn end(&mut self) -> Option<ElementId> {
        self.start = None;
        self.dragging.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::element::{Pos, Widget};
    use crate::material::BOX_MATERIAL_ID;
    use crate::ori::Ori;
    use kurbo::{Rect, Size};

    fn setup() -> (Canvas, AlignmentEngine, ElementId, ElementId) {
        let mut canvas = Canvas::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        let a = canvas.add_widget(BOX_MATERIAL_ID, Point::new(100.0, 100.0)).unwrap();
        let b = canvas.add_widget(BOX_MATERIAL_ID, Point::new(300.0, 98.0)).unwrap();
        let engine = AlignmentEngine::bind(&canvas, Config::new().with_line_threshold(5.0));
        (canvas, engine, a, b)
    }

    #[test]
    fn test_move_without_session() {
        let (mut canvas, engine, _, _) = setup();
        let mut session = DragSession::new();
        let frame = session
            .on_move(&mut canvas, &engine, MoveData::new(0.0, 0.0, 0.0, 0.0))
            .unwrap();
        assert!(frame.is_none());
    }

    #[test]
    fn test_move_snaps_to_neighbour() {
        let (mut canvas, engine, a, _) = setup();
        let mut session = DragSession::new();
        session.begin(&canvas, a).unwrap();
        assert_eq!(session.start(), Some(Point::new(100.0, 100.0)));

        let frame = session
            .on_move(&mut canvas, &engine, MoveData::new(120.0, 101.0, 20.0, 1.0))
            .unwrap()
            .unwrap();

        assert_eq!(frame.element, a);
        assert_eq!((frame.x, frame.y), (120.0, 98.0));
        assert!(!frame.snapped_x);
        assert!(frame.snapped_y);
        assert!(frame.is_snapped());
        assert_eq!(frame.horizontal.get(Ori::Top).unwrap().top, Some(98.0));
        assert!(frame.vertical.is_empty());

        let pos = canvas.get(a).unwrap().pos();
        assert_eq!(pos.point(), Point::new(120.0, 98.0));
    }

    #[test]
    fn test_move_out_of_range_keeps_pointer_position() {
        let (mut canvas, engine, a, _) = setup();
        let mut session = DragSession::new();
        session.begin(&canvas, a).unwrap();

        let frame = session
            .on_move(&mut canvas, &engine, MoveData::new(150.0, 400.0, 50.0, 300.0))
            .unwrap()
            .unwrap();
        assert!(!frame.is_snapped());
        assert_eq!((frame.x, frame.y), (150.0, 400.0));
    }

    #[test]
    fn test_move_discards_stale_cache() {
        let (mut canvas, engine, a, _) = setup();
        canvas.cache_all_rects();
        let mut session = DragSession::new();
        session.begin(&canvas, a).unwrap();

        let frame = session
            .on_move(&mut canvas, &engine, MoveData::new(300.0, 400.0, 200.0, 300.0))
            .unwrap()
            .unwrap();
        // Left edges coincide at 300 once the dragged rect is re-measured.
        assert_eq!(frame.vertical.get(Ori::Left).unwrap().left, Some(300.0));
        assert_eq!(frame.x, 300.0);
    }

    #[test]
    fn test_container_guides() {
        let (mut canvas, engine, a, _) = setup();
        let mut session = DragSession::new().with_container_guides(true);
        session.begin(&canvas, a).unwrap();

        let frame = session
            .on_move(&mut canvas, &engine, MoveData::new(4.0, 400.0, -96.0, 300.0))
            .unwrap()
            .unwrap();
        assert_eq!(frame.x, 0.0);
        assert_eq!(frame.vertical.get(Ori::Left).unwrap().left, Some(0.0));
    }

    #[test]
    fn test_drag_group() {
        let (mut canvas, engine, _, b) = setup();
        let members = vec![
            Widget::new(BOX_MATERIAL_ID, Pos::new(0.0, 300.0).with_size(Size::new(40.0, 40.0))),
            Widget::new(BOX_MATERIAL_ID, Pos::new(60.0, 300.0).with_size(Size::new(40.0, 40.0))),
        ];
        let g = canvas.add_group(Pos::new(0.0, 300.0), members).unwrap();
        let mut session = DragSession::new();
        session.begin(&canvas, g).unwrap();

        // Group right edge lands 3px short of b's left edge.
        let frame = session
            .on_move(&mut canvas, &engine, MoveData::new(197.0, 450.0, 197.0, 150.0))
            .unwrap()
            .unwrap();
        assert_eq!(frame.x, 200.0);
        assert_eq!(frame.vertical.get(Ori::Right).unwrap().left, Some(300.0));
        assert!(canvas.others(g).contains(&b));
    }

    #[test]
    fn test_empty_group_does_not_block_drag() {
        let (mut canvas, engine, a, _) = setup();
        canvas.add_group(Pos::new(500.0, 500.0), Vec::new()).unwrap();
        let mut session = DragSession::new().with_container_guides(true);
        session.begin(&canvas, a).unwrap();

        let frame = session
            .on_move(&mut canvas, &engine, MoveData::new(120.0, 101.0, 20.0, 1.0))
            .unwrap()
            .unwrap();
        assert_eq!((frame.x, frame.y), (120.0, 98.0));
        assert_eq!(canvas.get(a).unwrap().pos().point(), Point::new(120.0, 98.0));
    }

    #[test]
    fn test_failed_move_restores_position() {
        let (mut canvas, engine, _, _) = setup();
        let empty = canvas.add_group(Pos::new(500.0, 500.0), Vec::new()).unwrap();
        let mut session = DragSession::new();
        session.begin(&canvas, empty).unwrap();

        let result = session.on_move(&mut canvas, &engine, MoveData::new(120.0, 101.0, 0.0, 0.0));
        assert_eq!(result, Err(SnapError::UnmeasuredElement(empty)));
        assert_eq!(canvas.get(empty).unwrap().pos().point(), Point::new(500.0, 500.0));
        assert!(session.is_active());
    }

    #[test]
    fn test_begin_unknown_and_end() {
        let (canvas, _, a, _) = setup();
        let mut session = DragSession::new();
        let missing = ElementId(u64::MAX);
        assert_eq!(session.begin(&canvas, missing), Err(SnapError::UnknownElement(missing)));
        assert!(!session.is_active());

        session.begin(&canvas, a).unwrap();
        assert_eq!(session.dragging(), Some(a));
        assert_eq!(session.end(), Some(a));
        assert!(!session.is_active());
        assert!(session.start().is_none());
    }
}
