//! Alignment guide lines between a dragged element and its neighbours.
//!
//! The engine compares every orientation of the dragged rectangle against the
//! orientations of the same axis group on each reference rectangle, keeps the
//! lines that fall within the configured threshold, and reduces them to one
//! snap coordinate per axis.

use crate::config::Config;
use crate::element::{ElementId, Moveable, update_element_pos};
use crate::lines::{DisplayLines, LineInfo};
use crate::ori::{AXES, Axis};
use kurbo::Rect;
use thiserror::Error;

/// Errors from element-level snapping operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapError {
    #[error("Element not found: {0}")]
    UnknownElement(ElementId),
    #[error("Element has no measurable rectangle: {0}")]
    UnmeasuredElement(ElementId),
}

/// Result type for snapping operations.
pub type SnapResult<T> = Result<T, SnapError>;

/// Source of screen rectangles for elements and their container.
///
/// Implementations may measure live or return snapshots refreshed by the caller.
pub trait GeometryProvider {
    /// Current screen rectangle of an element.
    fn rect_of(&self, id: ElementId) -> SnapResult<Rect>;

    /// Current screen rectangle of the container.
    fn container_rect(&self) -> Rect;
}

/// Guide lines for one drag frame, split by axis group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisLines {
    /// Lines compared along the vertical extent (`top`, `xCenter`, `bottom`).
    pub horizontal: DisplayLines,
    /// Lines compared along the horizontal extent (`left`, `yCenter`, `right`).
    pub vertical: DisplayLines,
}

impl AxisLines {
    pub fn lines(&self, axis: Axis) -> &DisplayLines {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    fn lines_mut(&mut self, axis: Axis) -> &mut DisplayLines {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }

    /// Fold `other` in, keeping the closer line per orientation.
    pub fn merge_closer(&mut self, other: AxisLines) {
        for line in other.horizontal.iter().chain(other.vertical.iter()) {
            self.lines_mut(line.ori.axis()).insert_closer(*line);
        }
    }

    /// Snapped `(x, y)` anchor coordinates, `None` on an axis without lines.
    pub fn snap_target(&self) -> (Option<f64>, Option<f64>) {
        (
            self.vertical.min_offset_source_pos(),
            self.horizontal.min_offset_source_pos(),
        )
    }
}

/// Computes alignment lines within one container.
///
/// The container rectangle is a snapshot taken by [`AlignmentEngine::set_container`];
/// if the container later moves or resizes, lines are offset by the stale origin
/// until the container is bound again.
#[derive(Debug, Clone)]
pub struct AlignmentEngine {
    container: Rect,
    config: Config,
}

impl AlignmentEngine {
    /// Create an engine bound to a container rectangle.
    pub fn new(container: Rect, config: Config) -> Self {
        Self { container, config }
    }

    /// Create an engine bound to the provider's current container rectangle.
    pub fn bind<G: GeometryProvider + ?Sized>(geometry: &G, config: Config) -> Self {
        Self::new(geometry.container_rect(), config)
    }

    /// Replace both the container and the config.
    pub fn set(&mut self, container: Rect, config: Config) {
        self.set_container(container);
        self.set_config(config);
    }

    /// Bind a new container rectangle.
    pub fn set_container(&mut self, container: Rect) {
        log::info!("Alignment container bound to {:?}", container);
        self.container = container;
    }

    /// Re-read the container rectangle from the provider.
    pub fn refresh_container<G: GeometryProvider + ?Sized>(&mut self, geometry: &G) {
        self.set_container(geometry.container_rect());
    }

    /// Replace the config. Applies to the next computation.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    pub fn container(&self) -> Rect {
        self.container
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Lines between one dragged rectangle and one reference rectangle.
    ///
    /// For each source orientation the entry kept is the last reference
    /// orientation that qualified, not necessarily the closest one.
    /// [`AlignmentEngine::lines_for_rects`] performs the closest-wins reduction.
    pub fn get_single_element_lines(&self, source: Rect, target: Rect) -> DisplayLines {
        let mut lines = DisplayLines::new();
        for axis in AXES {
            let container_offset = axis.origin(self.container);
            for &to in axis.oris() {
                let target_line = to.line_pos(target);
                for &so in axis.oris() {
                    let offset = target_line - so.line_pos(source);
                    if !self.config.accepts(offset.abs()) {
                        continue;
                    }
                    let line_pos = target_line - container_offset;
                    let source_pos = line_pos - so.anchor_offset(source);
                    lines.insert(LineInfo::new(so, line_pos, offset, source_pos));
                }
            }
        }
        lines
    }

    /// Closest line per orientation between a dragged rectangle and every
    /// reference. Ties keep the earlier reference.
    pub fn lines_for_rects(&self, source: Rect, others: &[Rect]) -> AxisLines {
        others.iter().fold(AxisLines::default(), |mut acc, &other| {
            for line in &self.get_single_element_lines(source, other) {
                acc.lines_mut(line.ori.axis()).insert_closer(*line);
            }
            acc
        })
    }

    /// Read the dragged rectangle and every reference rectangle once.
    ///
    /// The dragged element must be measurable. References that are known but
    /// not measurable (an empty group, say) are skipped.
    fn measure<G: GeometryProvider + ?Sized>(
        geometry: &G,
        source: ElementId,
        others: &[ElementId],
    ) -> SnapResult<(Rect, Vec<Rect>)> {
        let source_rect = geometry.rect_of(source)?;
        let mut other_rects = Vec::with_capacity(others.len());
        for &id in others {
            match geometry.rect_of(id) {
                Ok(rect) => other_rects.push(rect),
                Err(SnapError::UnmeasuredElement(_)) => {
                    log::warn!("Skipping unmeasurable reference {}", id);
                }
                Err(e) => return Err(e),
            }
        }
        Ok((source_rect, other_rects))
    }

    /// Closest line per orientation between a dragged element and references,
    /// measured through `geometry`.
    ///
    /// Every rectangle is read before any line is computed so the whole frame
    /// uses snapshots from the same instant.
    pub fn get_lines<G: GeometryProvider + ?Sized>(
        &self,
        geometry: &G,
        source: ElementId,
        others: &[ElementId],
    ) -> SnapResult<AxisLines> {
        let (source_rect, other_rects) = Self::measure(geometry, source, others)?;
        let lines = self.lines_for_rects(source_rect, &other_rects);
        log::debug!(
            "{} against {} references: {} horizontal, {} vertical lines",
            source,
            other_rects.len(),
            lines.horizontal.len(),
            lines.vertical.len()
        );
        Ok(lines)
    }

    /// Like [`AlignmentEngine::get_lines`], with the bound container's own
    /// edges and centers as a final reference. Element lines win ties.
    pub fn get_lines_with_container<G: GeometryProvider + ?Sized>(
        &self,
        geometry: &G,
        source: ElementId,
        others: &[ElementId],
    ) -> SnapResult<AxisLines> {
        let (source_rect, mut rects) = Self::measure(geometry, source, others)?;
        rects.push(self.container);
        let lines = self.lines_for_rects(source_rect, &rects);
        log::debug!(
            "{} against {} references and the container: {} horizontal, {} vertical lines",
            source,
            rects.len() - 1,
            lines.horizontal.len(),
            lines.vertical.len()
        );
        Ok(lines)
    }

    /// Snap coordinate for one axis: the `source_pos` of the closest line.
    pub fn get_min_offset_source_pos(&self, lines: &DisplayLines) -> Option<f64> {
        lines.min_offset_source_pos()
    }

    /// Commit a position. See [`update_element_pos`].
    pub fn update_element_pos<M: Moveable + ?Sized>(
        &self,
        element: &mut M,
        x: Option<f64>,
        y: Option<f64>,
    ) {
        update_element_pos(element, x, y);
    }
}
