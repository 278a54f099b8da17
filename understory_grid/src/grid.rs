// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid container: cell storage, configuration, dirty tracking, and layout passes.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use kurbo::{Insets, Rect, Size};
use tracing::{debug, trace};

use crate::cell::Cell;
use crate::config::GridConfig;
use crate::damage::Damage;
use crate::layout;
use crate::listener::{ElementLookup, LayoutListener, VisualElement};
use crate::types::{CellId, FixedAxis, GridPosition};

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

/// An ordered collection of cells arranged into a fixed number of rows or columns.
///
/// Insertion order decides grid position: with [`FixedAxis::Columns`] the first
/// `axis_count` visible cells form the top row, left to right; with [`FixedAxis::Rows`]
/// they form the left column, top to bottom. Hidden cells are skipped and take no space.
///
/// Every change marks the grid dirty. Nothing is recomputed until
/// [`Grid::perform_layout`] runs, so many changes can be batched into one pass.
pub struct Grid {
    slots: Vec<Option<Slot>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    order: Vec<CellId>,
    config: GridConfig,
    dirty: bool,
    column_widths: Vec<f64>,
    row_heights: Vec<f64>,
    // Rects of placed cells that were removed or hidden since the last pass.
    vacated: Vec<Rect>,
    listener: Option<Weak<dyn LayoutListener>>,
}

impl core::fmt::Debug for Grid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Grid")
            .field("cells", &self.order.len())
            .field("free_list", &self.free_list.len())
            .field("config", &self.config)
            .field("dirty", &self.dirty)
            .field("column_widths", &self.column_widths)
            .field("row_heights", &self.row_heights)
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    cell: Cell,
    // The cell is on screen at its current rect.
    placed: bool,
}

impl Grid {
    /// Create an empty single-column grid.
    pub fn new() -> Self {
        Self::with_config(GridConfig::default())
    }

    /// Create an empty grid with `axis_count` columns or rows (at least one).
    pub fn with_axis(axis_count: usize, fixed_axis: FixedAxis) -> Self {
        Self::with_config(GridConfig::new(axis_count, fixed_axis))
    }

    /// Create an empty grid from a full config.
    ///
    /// An axis count below one is raised to one. Negative or non-finite spacing, and non-finite
    /// padding or size, fall back to the [`GridConfig::default`] values.
    pub fn with_config(config: GridConfig) -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            order: Vec::new(),
            config: config.sanitized(&GridConfig::default()),
            dirty: false,
            column_widths: Vec::new(),
            row_heights: Vec::new(),
            vacated: Vec::new(),
            listener: None,
        }
    }

    // --- listener ---

    /// Register the listener notified after each completed pass, replacing any previous one.
    ///
    /// Only a weak reference is kept.
    pub fn set_layout_listener<L: LayoutListener + 'static>(&mut self, listener: &Rc<L>) {
        let weak: Weak<dyn LayoutListener> = Rc::<L>::downgrade(listener);
        self.listener = Some(weak);
    }

    /// Forget the current listener, if any.
    pub fn clear_layout_listener(&mut self) {
        self.listener = None;
    }

    // --- cells ---

    /// Append a cell at the end of the grid.
    pub fn insert(&mut self, cell: Cell) -> CellId {
        let id = self.allocate(cell);
        self.order.push(id);
        self.mark_dirty();
        id
    }

    /// Insert a cell at position `index` in grid order, shifting later cells.
    ///
    /// An `index` past the end appends.
    pub fn insert_at(&mut self, index: usize, cell: Cell) -> CellId {
        let id = self.allocate(cell);
        self.order.insert(index.min(self.order.len()), id);
        self.mark_dirty();
        id
    }

    /// Remove a cell from the grid and hand it back.
    ///
    /// Returns `None` (and changes nothing) if `id` is not a member.
    pub fn remove(&mut self, id: CellId) -> Option<Cell> {
        if !self.contains(id) {
            return None;
        }
        self.order.retain(|c| *c != id);
        let slot = self.slots[id.idx()].take()?;
        self.free_list.push(id.idx());
        if slot.placed {
            self.vacated.push(slot.cell.rect());
        }
        self.mark_dirty();
        Some(slot.cell)
    }

    /// Returns true if `id` refers to a cell in this grid.
    pub fn contains(&self, id: CellId) -> bool {
        self.slot(id).is_some()
    }

    /// Number of cells, visible or not.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of visible cells.
    pub fn visible_len(&self) -> usize {
        self.visible_ids().count()
    }

    /// Iterate all cells in grid order.
    pub fn cells(&self) -> impl Iterator<Item = (CellId, &Cell)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.slot(*id).map(|s| (*id, &s.cell)))
    }

    /// Access a cell.
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.slot(id).map(|s| &s.cell)
    }

    /// Change a cell in place and mark the grid dirty.
    ///
    /// Returns false (without calling `f`) if `id` is not a member.
    pub fn update_cell(&mut self, id: CellId, f: impl FnOnce(&mut Cell)) -> bool {
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        f(&mut slot.cell);
        let vacated = (slot.placed && !slot.cell.is_visible()).then(|| {
            slot.placed = false;
            slot.cell.rect()
        });
        self.vacated.extend(vacated);
        self.mark_dirty();
        true
    }

    /// Show or hide a cell. Does nothing if the visibility is unchanged.
    pub fn set_cell_visible(&mut self, id: CellId, visible: bool) {
        if self.cell(id).is_some_and(|c| c.is_visible() != visible) {
            self.update_cell(id, |c| c.set_visible(visible));
        }
    }

    // --- configuration ---

    /// Current configuration.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Replace the whole configuration.
    ///
    /// An axis count below one is raised to one. Invalid spacing, padding, or size values keep
    /// their current setting, as the individual setters do.
    pub fn set_config(&mut self, config: GridConfig) {
        self.reconfigure(|c| *c = config.sanitized(c));
    }

    /// Number of fixed tracks along the fixed axis.
    pub fn axis_count(&self) -> usize {
        self.config.axis_count
    }

    /// Set the number of tracks for `axis`.
    ///
    /// Ignored if `count` is zero or if `axis` is not the grid's current fixed axis, so a
    /// column count never leaks into a fixed-by-rows grid.
    pub fn set_axis_count(&mut self, axis: FixedAxis, count: usize) {
        if count < 1 {
            debug!(count, "ignoring grid axis count below one");
            return;
        }
        if axis != self.config.fixed_axis {
            debug!(
                ?axis,
                fixed_axis = ?self.config.fixed_axis,
                "ignoring axis count for the free axis"
            );
            return;
        }
        self.reconfigure(|c| c.axis_count = count);
    }

    /// Set the number of columns; only applies when fixed by columns.
    pub fn set_num_columns(&mut self, columns: usize) {
        self.set_axis_count(FixedAxis::Columns, columns);
    }

    /// Set the number of rows; only applies when fixed by rows.
    pub fn set_num_rows(&mut self, rows: usize) {
        self.set_axis_count(FixedAxis::Rows, rows);
    }

    /// Which axis the axis count fixes.
    pub fn fixed_axis(&self) -> FixedAxis {
        self.config.fixed_axis
    }

    /// Switch which axis the axis count fixes. The count itself is kept.
    pub fn set_fixed_axis(&mut self, axis: FixedAxis) {
        self.reconfigure(|c| c.fixed_axis = axis);
    }

    /// True if the axis count is the number of columns.
    pub fn is_fixed_by_columns(&self) -> bool {
        self.config.fixed_axis == FixedAxis::Columns
    }

    /// Boolean form of [`Grid::set_fixed_axis`].
    pub fn set_fixed_by_columns(&mut self, fixed_by_columns: bool) {
        self.set_fixed_axis(if fixed_by_columns {
            FixedAxis::Columns
        } else {
            FixedAxis::Rows
        });
    }

    /// Set the gap between columns and between rows.
    pub fn set_spacing(&mut self, horizontal: f64, vertical: f64) {
        self.set_horizontal_spacing(horizontal);
        self.set_vertical_spacing(vertical);
    }

    /// Set the gap between columns. Negative or non-finite values are ignored.
    pub fn set_horizontal_spacing(&mut self, spacing: f64) {
        if valid_spacing(spacing) {
            self.reconfigure(|c| c.horizontal_spacing = spacing);
        }
    }

    /// Set the gap between rows. Negative or non-finite values are ignored.
    pub fn set_vertical_spacing(&mut self, spacing: f64) {
        if valid_spacing(spacing) {
            self.reconfigure(|c| c.vertical_spacing = spacing);
        }
    }

    /// Gap between columns.
    pub fn horizontal_spacing(&self) -> f64 {
        self.config.horizontal_spacing
    }

    /// Gap between rows.
    pub fn vertical_spacing(&self) -> f64 {
        self.config.vertical_spacing
    }

    /// Set the padding taken from inside the grid's size.
    ///
    /// `x0` is left, `x1` right, `y0` top, and `y1` bottom. Non-finite insets are ignored.
    pub fn set_padding(&mut self, padding: Insets) {
        if !padding.is_finite() {
            debug!(?padding, "ignoring non-finite grid padding");
            return;
        }
        self.reconfigure(|c| c.padding = padding);
    }

    /// Current padding.
    pub fn padding(&self) -> Insets {
        self.config.padding
    }

    /// Choose whether cells are packed with the widest width and/or the tallest height.
    pub fn set_pack_uniform(&mut self, width: bool, height: bool) {
        self.reconfigure(|c| {
            c.pack_uniform_width = width;
            c.pack_uniform_height = height;
        });
    }

    /// Pack every non-fixed cell with the widest natural width.
    pub fn set_pack_uniform_width(&mut self, pack: bool) {
        self.reconfigure(|c| c.pack_uniform_width = pack);
    }

    /// Pack every non-fixed cell with the tallest natural height.
    pub fn set_pack_uniform_height(&mut self, pack: bool) {
        self.reconfigure(|c| c.pack_uniform_height = pack);
    }

    /// True if packing with uniform width.
    pub fn pack_uniform_width(&self) -> bool {
        self.config.pack_uniform_width
    }

    /// True if packing with uniform height.
    pub fn pack_uniform_height(&self) -> bool {
        self.config.pack_uniform_height
    }

    /// Set the outer size the grid lays out into. Non-finite sizes are ignored.
    pub fn set_size(&mut self, size: Size) {
        if !size.is_finite() {
            debug!(?size, "ignoring non-finite grid size");
            return;
        }
        self.reconfigure(|c| c.size = size);
    }

    /// Outer size of the grid.
    pub fn size(&self) -> Size {
        self.config.size
    }

    // --- grid addressing ---

    /// Number of columns for the current visible cells.
    pub fn num_columns(&self) -> usize {
        self.config.dimensions(self.visible_len()).0
    }

    /// Number of rows for the current visible cells.
    pub fn num_rows(&self) -> usize {
        self.config.dimensions(self.visible_len()).1
    }

    /// Row and column of a visible cell. Hidden cells and non-members have none.
    pub fn position_of(&self, id: CellId) -> Option<GridPosition> {
        let ordinal = self.visible_ids().position(|c| c == id)?;
        Some(
            self.config
                .fixed_axis
                .locate(ordinal, self.config.axis_count),
        )
    }

    /// The visible cell at `row` and `column`, if any.
    pub fn cell_at(&self, row: usize, column: usize) -> Option<CellId> {
        let ordinal = self
            .config
            .fixed_axis
            .ordinal(GridPosition::new(row, column), self.config.axis_count)?;
        self.visible_ids().nth(ordinal)
    }

    /// Size the grid would need to show every visible cell at its natural size.
    ///
    /// Columns take their widest cell and rows their tallest, plus spacing and padding.
    pub fn preferred_size(&self) -> Size {
        let cells = self.visible_cells();
        layout::preferred_size(&self.config, &cells)
    }

    // --- layout ---

    /// Request a layout pass on the next [`Grid::perform_layout`]. Idempotent.
    pub fn mark_dirty(&mut self) {
        if !self.dirty {
            trace!("grid layout marked dirty");
        }
        self.dirty = true;
    }

    /// True between a change and the next completed pass.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Run the layout pass if the grid is dirty and return what changed.
    ///
    /// On a clean grid this does nothing and returns empty damage. With no visible cells
    /// the column and row caches are cleared and no listener is notified. Otherwise every
    /// visible cell gets its rectangle, the caches are refreshed, and the listener is
    /// notified exactly once.
    pub fn perform_layout(&mut self) -> Damage {
        if !self.dirty {
            return Damage::default();
        }
        let mut damage = Damage::default();
        for rect in core::mem::take(&mut self.vacated) {
            damage.push_rect(rect);
        }

        let visible: Vec<CellId> = self.visible_ids().collect();
        if visible.is_empty() {
            self.column_widths.clear();
            self.row_heights.clear();
            self.dirty = false;
            return damage;
        }

        let solution = {
            let cells = self.visible_cells();
            layout::solve(&self.config, &cells)
        };
        debug_assert_eq!(solution.rects.len(), visible.len(), "one rect per visible cell");

        for (id, rect) in visible.into_iter().zip(solution.rects) {
            let Some(slot) = self.slot_mut(id) else {
                continue;
            };
            let old = slot.cell.rect();
            if !slot.placed || old != rect {
                if slot.placed {
                    damage.push_rect(old);
                }
                damage.push_rect(rect);
                damage.changed.push(id);
            }
            slot.cell.set_position(rect);
            slot.placed = true;
        }
        self.column_widths = solution.column_widths;
        self.row_heights = solution.row_heights;
        self.dirty = false;
        trace!(changed = damage.changed.len(), "grid layout pass complete");

        self.notify_listener();
        damage
    }

    /// Resolved width of `column` from the last pass, or `0.0` if there is no such column.
    pub fn column_width(&self, column: usize) -> f64 {
        self.column_widths.get(column).copied().unwrap_or(0.0)
    }

    /// Resolved height of `row` from the last pass, or `0.0` if there is no such row.
    pub fn row_height(&self, row: usize) -> f64 {
        self.row_heights.get(row).copied().unwrap_or(0.0)
    }

    /// Resolved column widths from the last pass, left to right.
    pub fn column_widths(&self) -> &[f64] {
        &self.column_widths
    }

    /// Resolved row heights from the last pass, top to bottom.
    pub fn row_heights(&self) -> &[f64] {
        &self.row_heights
    }

    /// Last rectangle assigned to a cell. `y0` is the bottom edge.
    pub fn cell_rect(&self, id: CellId) -> Option<Rect> {
        self.cell(id).map(Cell::rect)
    }

    /// Push the rectangle of every placed, visible cell to its element.
    ///
    /// Cells that `lookup` has no element for are skipped.
    pub fn apply_rects<L: ElementLookup + ?Sized>(&self, lookup: &mut L) {
        for id in &self.order {
            let Some(slot) = self.slot(*id) else {
                continue;
            };
            if !slot.placed || !slot.cell.is_visible() {
                continue;
            }
            if let Some(element) = lookup.element_mut(*id) {
                element.apply_rect(slot.cell.rect());
            }
        }
    }

    // --- internals ---

    fn allocate(&mut self, cell: Cell) -> CellId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(Slot::new(generation, cell));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(Slot::new(generation, cell)));
            self.generations.push(generation);
            (self.slots.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "CellId uses 32-bit indices by design."
        )]
        CellId::new(idx as u32, generation)
    }

    fn slot(&self, id: CellId) -> Option<&Slot> {
        self.slots
            .get(id.idx())?
            .as_ref()
            .filter(|s| s.generation == id.generation())
    }

    fn slot_mut(&mut self, id: CellId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.idx())?
            .as_mut()
            .filter(|s| s.generation == id.generation())
    }

    fn visible_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.cells()
            .filter(|(_, cell)| cell.is_visible())
            .map(|(id, _)| id)
    }

    fn visible_cells(&self) -> Vec<&Cell> {
        self.cells()
            .map(|(_, cell)| cell)
            .filter(|cell| cell.is_visible())
            .collect()
    }

    /// Apply a config change, marking the grid dirty only if something changed.
    fn reconfigure(&mut self, f: impl FnOnce(&mut GridConfig)) {
        let before = self.config;
        f(&mut self.config);
        if self.config != before {
            self.mark_dirty();
        }
    }

    fn notify_listener(&mut self) {
        let Some(weak) = self.listener.as_ref() else {
            return;
        };
        match weak.upgrade() {
            Some(listener) => listener.layout_changed(),
            None => {
                trace!("grid layout listener was dropped; forgetting it");
                self.listener = None;
            }
        }
    }
}

impl Slot {
    fn new(generation: u32, cell: Cell) -> Self {
        Self {
            generation,
            cell,
            placed: false,
        }
    }
}

fn valid_spacing(spacing: f64) -> bool {
    let valid = spacing.is_finite() && spacing >= 0.0;
    if !valid {
        debug!(spacing, "ignoring invalid grid spacing");
    }
    valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellOptions;
    use alloc::collections::BTreeMap;
    use alloc::format;
    use alloc::vec;
    use core::cell::Cell as Counter;
    use kurbo::Affine;

    #[derive(Default)]
    struct CountingListener {
        calls: Counter<u32>,
    }

    impl LayoutListener for CountingListener {
        fn layout_changed(&self) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    fn grid(columns: usize, width: f64, height: f64) -> Grid {
        let mut grid = Grid::with_axis(columns, FixedAxis::Columns);
        grid.set_size(Size::new(width, height));
        grid
    }

    #[test]
    fn four_default_cells_in_two_columns() {
        let mut grid = grid(2, 100.0, 60.0);
        let ids: Vec<CellId> = (0..4).map(|_| grid.insert(Cell::new())).collect();
        let damage = grid.perform_layout();
        assert_eq!(damage.changed, ids);

        let rects: Vec<Rect> = ids.iter().map(|id| grid.cell_rect(*id).unwrap()).collect();
        assert_eq!(rects[0], Rect::new(0.0, 30.0, 50.0, 60.0));
        assert_eq!(rects[1], Rect::new(50.0, 30.0, 100.0, 60.0));
        assert_eq!(rects[2], Rect::new(0.0, 0.0, 50.0, 30.0));
        assert_eq!(rects[3], Rect::new(50.0, 0.0, 100.0, 30.0));
        assert_eq!(grid.num_columns(), 2);
        assert_eq!(grid.num_rows(), 2);
    }

    #[test]
    fn mixed_fixed_and_stretch_columns() {
        let mut grid = grid(2, 100.0, 10.0);
        grid.insert(Cell::new().with_fixed_width(20.0));
        grid.insert(Cell::new());
        let _ = grid.perform_layout();
        assert_eq!(grid.column_width(0), 20.0);
        assert_eq!(grid.column_width(1), 80.0);
    }

    #[test]
    fn second_pass_is_a_noop() {
        let mut grid = grid(2, 100.0, 60.0);
        let a = grid.insert(Cell::new());
        grid.insert(Cell::new());
        let listener = Rc::new(CountingListener::default());
        grid.set_layout_listener(&listener);

        let first = grid.perform_layout();
        assert!(!first.is_empty());
        assert!(!grid.is_dirty());
        let rect = grid.cell_rect(a);

        let second = grid.perform_layout();
        assert!(second.is_empty(), "clean grid must not relayout");
        assert_eq!(grid.cell_rect(a), rect);
        assert_eq!(listener.calls.get(), 1);

        // A forced pass with no changes reports no damage but still notifies.
        grid.mark_dirty();
        grid.mark_dirty();
        let third = grid.perform_layout();
        assert!(third.is_empty());
        assert_eq!(listener.calls.get(), 2);
    }

    #[test]
    fn empty_grid_clears_caches() {
        let mut grid = grid(2, 100.0, 60.0);
        let a = grid.insert(Cell::new());
        let _ = grid.perform_layout();
        assert_eq!(grid.column_widths().len(), 2);

        let listener = Rc::new(CountingListener::default());
        grid.set_layout_listener(&listener);
        grid.set_cell_visible(a, false);
        let damage = grid.perform_layout();
        assert!(grid.column_widths().is_empty());
        assert!(grid.row_heights().is_empty());
        assert!(!grid.is_dirty());
        assert_eq!(listener.calls.get(), 0, "no pass ran");
        assert_eq!(damage.dirty_rects, vec![Rect::new(0.0, 0.0, 100.0, 60.0)]);
        assert_eq!(grid.column_width(0), 0.0);
    }

    #[test]
    fn queries_before_layout_return_zero() {
        let mut grid = grid(3, 90.0, 30.0);
        grid.insert(Cell::new());
        assert_eq!(grid.column_width(0), 0.0);
        assert_eq!(grid.row_height(0), 0.0);
        let _ = grid.perform_layout();
        assert_eq!(grid.column_width(3), 0.0);
        assert_eq!(grid.row_height(1), 0.0);
    }

    #[test]
    fn hidden_cells_take_no_space() {
        let mut grid = grid(2, 100.0, 60.0);
        let a = grid.insert(Cell::new());
        let hidden = grid.insert(Cell::new().with_visible(false));
        let c = grid.insert(Cell::new());
        let _ = grid.perform_layout();

        assert_eq!(grid.num_rows(), 1, "two visible cells fit one row");
        assert_eq!(grid.position_of(c), Some(GridPosition::new(0, 1)));
        assert_eq!(grid.position_of(hidden), None);
        assert_eq!(grid.cell_rect(a), Some(Rect::new(0.0, 0.0, 50.0, 60.0)));
        assert_eq!(grid.cell_rect(c), Some(Rect::new(50.0, 0.0, 100.0, 60.0)));
        // Never laid out: still the initial unit rect.
        assert_eq!(grid.cell_rect(hidden), Some(Rect::new(0.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn axis_count_only_applies_to_fixed_axis() {
        let mut grid = Grid::with_axis(2, FixedAxis::Columns);
        let _ = grid.perform_layout();

        grid.set_num_rows(4);
        grid.set_num_columns(0);
        assert_eq!(grid.axis_count(), 2);
        assert!(!grid.is_dirty(), "ignored input must not dirty the grid");

        grid.set_num_columns(3);
        assert_eq!(grid.axis_count(), 3);
        assert!(grid.is_dirty());

        let _ = grid.perform_layout();
        grid.set_fixed_by_columns(false);
        assert!(grid.is_dirty());
        assert_eq!(grid.fixed_axis(), FixedAxis::Rows);
        assert_eq!(grid.axis_count(), 3, "mode switch keeps the count");
        grid.set_num_rows(5);
        assert_eq!(grid.axis_count(), 5);
    }

    #[test]
    fn unchanged_settings_stay_clean() {
        let mut grid = grid(2, 100.0, 60.0);
        grid.set_spacing(2.0, 3.0);
        grid.set_padding(Insets::uniform(1.0));
        let _ = grid.perform_layout();

        grid.set_spacing(2.0, 3.0);
        grid.set_padding(Insets::uniform(1.0));
        grid.set_size(Size::new(100.0, 60.0));
        grid.set_pack_uniform(false, false);
        grid.set_fixed_by_columns(true);
        assert!(!grid.is_dirty());

        grid.set_horizontal_spacing(-1.0);
        grid.set_vertical_spacing(f64::NAN);
        grid.set_size(Size::new(f64::INFINITY, 1.0));
        assert!(!grid.is_dirty());
        assert_eq!(grid.horizontal_spacing(), 2.0);
        assert_eq!(grid.vertical_spacing(), 3.0);
        assert_eq!(grid.size(), Size::new(100.0, 60.0));
    }

    #[test]
    fn whole_config_is_sanitized() {
        let invalid = GridConfig {
            axis_count: 0,
            horizontal_spacing: -1.0,
            vertical_spacing: f64::NAN,
            padding: Insets::uniform(f64::NAN),
            size: Size::new(f64::INFINITY, 1.0),
            ..Default::default()
        };
        let fresh = Grid::with_config(invalid);
        assert_eq!(*fresh.config(), GridConfig::default());

        let mut grid = grid(2, 100.0, 60.0);
        grid.set_spacing(2.0, 3.0);
        let _ = grid.perform_layout();
        grid.set_config(GridConfig {
            pack_uniform_width: true,
            ..invalid
        });
        assert!(grid.is_dirty());
        assert_eq!(grid.axis_count(), 1);
        assert!(grid.pack_uniform_width());
        assert_eq!(grid.horizontal_spacing(), 2.0);
        assert_eq!(grid.vertical_spacing(), 3.0);
        assert_eq!(grid.padding(), Insets::ZERO);
        assert_eq!(grid.size(), Size::new(100.0, 60.0));
    }

    #[test]
    fn remove_returns_cell_and_reports_damage() {
        let mut grid = grid(1, 10.0, 20.0);
        let a = grid.insert(Cell::new());
        let b = grid.insert(Cell::new());
        let _ = grid.perform_layout();
        let old_a = grid.cell_rect(a).unwrap();

        let removed = grid.remove(a).expect("member");
        assert_eq!(removed.rect(), old_a, "cell outlives removal with its rect");
        assert!(!grid.contains(a));
        assert!(grid.remove(a).is_none(), "stale id is a no-op");

        let damage = grid.perform_layout();
        assert_eq!(damage.changed, vec![b]);
        assert!(damage.dirty_rects.contains(&old_a));
        assert_eq!(grid.cell_rect(b), Some(Rect::new(0.0, 0.0, 10.0, 20.0)));
    }

    #[test]
    fn stale_ids_do_not_alias_reused_slots() {
        let mut grid = Grid::new();
        let a = grid.insert(Cell::new());
        grid.remove(a);
        let b = grid.insert(Cell::new());
        assert_eq!(a.idx(), b.idx(), "slot reused");
        assert!(b.generation() > a.generation());
        assert!(grid.cell(a).is_none());
        assert!(!grid.update_cell(a, |c| c.set_fixed_width(3.0)));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn insert_at_reorders_grid() {
        let mut grid = grid(2, 100.0, 10.0);
        let a = grid.insert(Cell::new());
        let b = grid.insert(Cell::new());
        let first = grid.insert_at(0, Cell::new());
        let last = grid.insert_at(99, Cell::new());
        let order: Vec<CellId> = grid.cells().map(|(id, _)| id).collect();
        assert_eq!(order, vec![first, a, b, last]);
        assert_eq!(grid.cell_at(0, 0), Some(first));
        assert_eq!(grid.cell_at(1, 1), Some(last));
        assert_eq!(grid.cell_at(0, 2), None, "column past axis count");
        assert_eq!(grid.cell_at(2, 0), None);
    }

    #[test]
    fn fixed_by_rows_addressing() {
        let mut grid = Grid::with_axis(2, FixedAxis::Rows);
        let ids: Vec<CellId> = (0..3).map(|_| grid.insert(Cell::new())).collect();
        assert_eq!(grid.num_rows(), 2);
        assert_eq!(grid.num_columns(), 2);
        assert_eq!(grid.position_of(ids[1]), Some(GridPosition::new(1, 0)));
        assert_eq!(grid.position_of(ids[2]), Some(GridPosition::new(0, 1)));
        assert_eq!(grid.cell_at(0, 1), Some(ids[2]));
        assert_eq!(grid.cell_at(1, 1), None);
    }

    #[test]
    fn huge_addresses_are_empty() {
        let mut grid = Grid::with_axis(2, FixedAxis::Columns);
        grid.insert(Cell::new());
        assert_eq!(grid.cell_at(usize::MAX, 0), None);
        assert_eq!(grid.cell_at(usize::MAX / 2, 1), None);

        grid.set_fixed_axis(FixedAxis::Rows);
        assert_eq!(grid.cell_at(0, usize::MAX / 2 + 1), None);
        assert_eq!(grid.cell_at(0, usize::MAX), None);
    }

    #[test]
    fn update_cell_marks_dirty_and_relayouts() {
        let mut grid = grid(2, 100.0, 10.0);
        let a = grid.insert(Cell::new());
        let b = grid.insert(Cell::new());
        let _ = grid.perform_layout();

        assert!(grid.update_cell(a, |c| c.set_fixed_width(30.0)));
        assert!(grid.is_dirty());
        let damage = grid.perform_layout();
        assert_eq!(damage.changed, vec![a, b]);
        assert_eq!(grid.column_widths(), &[30.0, 70.0]);
    }

    #[test]
    fn stretch_disqualified_by_one_cell() {
        let mut grid = grid(2, 100.0, 20.0);
        grid.insert(Cell::new());
        grid.insert(Cell::new());
        grid.insert(Cell::new().with_options(CellOptions::FILL - CellOptions::STRETCH_COLUMN));
        grid.insert(Cell::new());
        let _ = grid.perform_layout();
        assert_eq!(grid.column_widths(), &[1.0, 99.0]);
    }

    #[test]
    fn dropped_listener_is_tolerated() {
        let mut grid = grid(1, 10.0, 10.0);
        grid.insert(Cell::new());
        let listener = Rc::new(CountingListener::default());
        grid.set_layout_listener(&listener);
        drop(listener);
        let damage = grid.perform_layout();
        assert_eq!(damage.changed.len(), 1);
        assert!(format!("{grid:?}").contains("has_listener: false"));
    }

    #[test]
    fn preferred_size_ignores_hidden_cells() {
        let mut grid = Grid::with_axis(2, FixedAxis::Columns);
        grid.set_spacing(1.0, 1.0);
        grid.insert(Cell::new().with_default_size(Size::new(10.0, 4.0)));
        grid.insert(Cell::new().with_default_size(Size::new(50.0, 50.0)).with_visible(false));
        grid.insert(Cell::new().with_default_size(Size::new(6.0, 2.0)));
        assert_eq!(grid.preferred_size(), Size::new(17.0, 4.0));
    }

    #[test]
    fn apply_rects_to_elements() {
        let mut grid = grid(2, 100.0, 60.0);
        let a = grid.insert(Cell::new());
        let b = grid.insert(Cell::new());
        let unbound = grid.insert(Cell::new());
        let _ = grid.perform_layout();

        let mut elements: BTreeMap<CellId, Affine> = BTreeMap::new();
        elements.insert(a, Affine::IDENTITY);
        elements.insert(b, Affine::IDENTITY);
        grid.apply_rects(&mut elements);

        assert_eq!(elements[&a], grid.cell(a).unwrap().transform());
        assert_eq!(elements[&b], grid.cell(b).unwrap().transform());
        assert!(!elements.contains_key(&unbound));
    }
}
