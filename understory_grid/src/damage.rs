// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damage summary returned by [`Grid::perform_layout`](crate::Grid::perform_layout).

use alloc::vec::Vec;
use kurbo::Rect;

use crate::types::CellId;

/// What a layout pass changed.
///
/// A pass on a clean grid, or one that moved nothing, yields an empty summary.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Damage {
    /// Visible cells whose rectangle changed, in grid order.
    pub changed: Vec<CellId>,
    /// Old and new rectangles of changed cells, plus the last rectangles of cells
    /// removed or hidden since the previous pass. Empty rectangles are skipped.
    pub dirty_rects: Vec<Rect>,
}

impl Damage {
    /// True if the pass moved nothing and nothing was removed or hidden.
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.dirty_rects.is_empty()
    }

    /// Union of all dirty rectangles. Returns `None` if empty.
    pub fn union_rect(&self) -> Option<Rect> {
        let mut it = self.dirty_rects.iter().copied();
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }

    pub(crate) fn push_rect(&mut self, rect: Rect) {
        if rect.width() > 0.0 && rect.height() > 0.0 {
            self.dirty_rects.push(rect);
        }
    }
}
