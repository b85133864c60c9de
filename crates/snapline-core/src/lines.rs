//! Guide line records and per-orientation line sets.

use crate::ori::{Axis, Ori};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A guide line found between a dragged rectangle and one reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineInfo {
    /// Orientation of the dragged element that aligns with the line.
    pub ori: Ori,
    /// Container-relative position of a horizontal guide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    /// Container-relative position of a vertical guide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    /// Reference line minus dragged line, in screen units.
    pub offset: f64,
    pub abs_offset: f64,
    /// Anchor coordinate that puts `ori` exactly on the line.
    pub source_pos: f64,
}

impl LineInfo {
    /// Create a line record. `line_pos` lands in `top` or `left` depending
    /// on the orientation's axis.
    pub fn new(ori: Ori, line_pos: f64, offset: f64, source_pos: f64) -> Self {
        let (top, left) = match ori.axis() {
            Axis::Horizontal => (Some(line_pos), None),
            Axis::Vertical => (None, Some(line_pos)),
        };
        Self {
            ori,
            top,
            left,
            offset,
            abs_offset: offset.abs(),
            source_pos,
        }
    }

    /// Container-relative position of the guide, whichever axis it is on.
    pub fn line_pos(&self) -> f64 {
        self.top.or(self.left).unwrap_or(f64::NAN)
    }
}

/// At most one [`LineInfo`] per orientation.
///
/// Entries keep the order in which their orientation was first inserted;
/// replacing an entry keeps its slot. Tie-breaking in
/// [`DisplayLines::min_offset_source_pos`] depends on this order.
///
/// Serialized as a map keyed by orientation, in entry order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayLines {
    lines: Vec<LineInfo>,
}

impl DisplayLines {
    /// Create an empty line set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a line, replacing any existing line for the same orientation.
    pub fn insert(&mut self, line: LineInfo) {
        match self.lines.iter_mut().find(|l| l.ori == line.ori) {
            Some(slot) => *slot = line,
            None => self.lines.push(line),
        }
    }

    /// Insert a line unless an existing line for its orientation is at least as close.
    pub fn insert_closer(&mut self, line: LineInfo) {
        match self.lines.iter_mut().find(|l| l.ori == line.ori) {
            Some(slot) => {
                if line.abs_offset < slot.abs_offset {
                    *slot = line;
                }
            }
            None => self.lines.push(line),
        }
    }

    /// Get the line for an orientation.
    pub fn get(&self, ori: Ori) -> Option<&LineInfo> {
        self.lines.iter().find(|l| l.ori == ori)
    }

    /// Check if a line exists for an orientation.
    pub fn contains(&self, ori: Ori) -> bool {
        self.get(ori).is_some()
    }

    /// Lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineInfo> {
        self.lines.iter()
    }

    /// Lines in insertion order, as an owned list.
    pub fn values(&self) -> Vec<LineInfo> {
        self.lines.clone()
    }

    /// Orientations present, in insertion order.
    pub fn oris(&self) -> impl Iterator<Item = Ori> + '_ {
        self.lines.iter().map(|l| l.ori)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines belonging to one axis group, in insertion order.
    pub fn on_axis(&self, axis: Axis) -> DisplayLines {
        DisplayLines {
            lines: self
                .lines
                .iter()
                .filter(|l| l.ori.axis() == axis)
                .copied()
                .collect(),
        }
    }

    /// Anchor coordinate of the closest line.
    ///
    /// Ties go to the earliest entry. Returns `None` when the set is empty.
    pub fn min_offset_source_pos(&self) -> Option<f64> {
        self.closest().map(|l| l.source_pos)
    }

    /// The line with the smallest absolute offset, earliest entry on ties.
    pub fn closest(&self) -> Option<&LineInfo> {
        let mut iter = self.lines.iter();
        let first = iter.next()?;
        Some(iter.fold(first, |min, line| {
            if line.abs_offset < min.abs_offset { line } else { min }
        }))
    }
}

impl<'a> IntoIterator for &'a DisplayLines {
    type Item = &'a LineInfo;
    type IntoIter = std::slice::Iter<'a, LineInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl Serialize for DisplayLines {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.lines.iter().map(|line| (line.ori, line)))
    }
}

struct DisplayLinesVisitor;

impl<'de> Visitor<'de> for DisplayLinesVisitor {
    type Value = DisplayLines;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map from orientation to line")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<DisplayLines, A::Error> {
        let mut lines = DisplayLines::new();
        while let Some((ori, line)) = map.next_entry::<Ori, LineInfo>()? {
            if line.ori != ori {
                return Err(de::Error::custom(format!(
                    "line for {:?} stored under {:?}",
                    line.ori, ori
                )));
            }
            // Repeated keys collapse to the last value.
            lines.insert(line);
        }
        Ok(lines)
    }
}

impl<'de> Deserialize<'de> for DisplayLines {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DisplayLinesVisitor)
    }
}
