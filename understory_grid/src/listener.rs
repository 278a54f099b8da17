// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator traits: layout notification and applying rectangles to visual elements.

use alloc::collections::BTreeMap;
use kurbo::{Affine, Rect};

use crate::cell::unit_to_rect;
use crate::types::CellId;

/// Notified after every completed layout pass.
///
/// A [`Grid`](crate::Grid) only holds a [`Weak`](alloc::rc::Weak) reference to its listener and never
/// keeps it alive. A listener that has been dropped is silently forgotten on the next pass.
/// Implementors needing mutable state should use interior mutability.
pub trait LayoutListener {
    /// Called once after a layout pass has assigned rectangles to all visible cells.
    fn layout_changed(&self);
}

/// Something on screen that mirrors one cell.
pub trait VisualElement {
    /// Move and resize the element to `rect` (origin bottom-left, `y0` is the bottom edge).
    fn apply_rect(&mut self, rect: Rect);
}

/// Treat an `Affine` as a unit-square node transform: scale to the rect, then translate.
impl VisualElement for Affine {
    fn apply_rect(&mut self, rect: Rect) {
        *self = unit_to_rect(rect);
    }
}

impl VisualElement for Rect {
    fn apply_rect(&mut self, rect: Rect) {
        *self = rect;
    }
}

/// Resolve the [`VisualElement`] that mirrors a cell.
///
/// Used by [`Grid::apply_rects`](crate::Grid::apply_rects). Cells without an element are skipped.
pub trait ElementLookup {
    /// Element type receiving rectangles.
    type Element: VisualElement + ?Sized;

    /// The element bound to `id`, if any.
    fn element_mut(&mut self, id: CellId) -> Option<&mut Self::Element>;
}

impl<V: VisualElement> ElementLookup for BTreeMap<CellId, V> {
    type Element = V;

    fn element_mut(&mut self, id: CellId) -> Option<&mut V> {
        self.get_mut(&id)
    }
}
