// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single grid entry: sizing policy plus the last rectangle the grid assigned to it.

use kurbo::{Affine, Rect, Size};

use crate::types::CellOptions;

/// One rectangular entry of a [`Grid`](crate::Grid).
///
/// A cell only holds data. Its rectangle is written by [`Grid::perform_layout`](crate::Grid::perform_layout)
/// and can be read back here or through [`Grid::cell_rect`](crate::Grid::cell_rect).
///
/// Units are whatever the caller uses (pixels, percentages, ...); nothing here interprets them.
/// The coordinate system has its origin at the bottom-left with y growing upward, so
/// [`Rect::y0`] is the bottom edge of the cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    options: CellOptions,
    requested: Size,
    default_size: Size,
    visible: bool,
    rect: Rect,
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

impl Cell {
    /// Create a visible cell that fills and stretches in both directions, with a 1x1 natural size.
    pub const fn new() -> Self {
        Self {
            options: CellOptions::FILL,
            requested: Size::new(1.0, 1.0),
            default_size: Size::new(1.0, 1.0),
            visible: true,
            rect: Rect::new(0.0, 0.0, 1.0, 1.0),
        }
    }

    /// Builder form of [`Cell::set_options`].
    #[must_use]
    pub fn with_options(mut self, options: CellOptions) -> Self {
        self.options = options;
        self
    }

    /// Builder form of [`Cell::set_default_size`].
    #[must_use]
    pub fn with_default_size(mut self, size: Size) -> Self {
        self.default_size = size;
        self
    }

    /// Builder form of [`Cell::set_fixed_width`].
    #[must_use]
    pub fn with_fixed_width(mut self, width: f64) -> Self {
        self.set_fixed_width(width);
        self
    }

    /// Builder form of [`Cell::set_fixed_height`].
    #[must_use]
    pub fn with_fixed_height(mut self, height: f64) -> Self {
        self.set_fixed_height(height);
        self
    }

    /// Builder form of [`Cell::set_visible`].
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Current sizing options.
    pub fn options(&self) -> CellOptions {
        self.options
    }

    /// Replace all sizing options.
    pub fn set_options(&mut self, options: CellOptions) {
        self.options = options;
    }

    /// Turn on the given option(s), leaving the others untouched.
    pub fn set_option(&mut self, option: CellOptions) {
        self.options.insert(option);
    }

    /// Turn off the given option(s), leaving the others untouched.
    pub fn unset_option(&mut self, option: CellOptions) {
        self.options.remove(option);
    }

    /// True if every bit of `option` is set.
    pub fn test_option(&self, option: CellOptions) -> bool {
        self.options.contains(option)
    }

    /// True if [`CellOptions::FIXED_WIDTH`] is set.
    pub fn fixed_width(&self) -> bool {
        self.test_option(CellOptions::FIXED_WIDTH)
    }

    /// True if [`CellOptions::FIXED_HEIGHT`] is set.
    pub fn fixed_height(&self) -> bool {
        self.test_option(CellOptions::FIXED_HEIGHT)
    }

    /// True if [`CellOptions::FILL_X`] is set.
    pub fn fill_x(&self) -> bool {
        self.test_option(CellOptions::FILL_X)
    }

    /// True if [`CellOptions::FILL_Y`] is set.
    pub fn fill_y(&self) -> bool {
        self.test_option(CellOptions::FILL_Y)
    }

    /// True if [`CellOptions::STRETCH_COLUMN`] is set.
    pub fn stretch_column(&self) -> bool {
        self.test_option(CellOptions::STRETCH_COLUMN)
    }

    /// True if [`CellOptions::STRETCH_ROW`] is set.
    pub fn stretch_row(&self) -> bool {
        self.test_option(CellOptions::STRETCH_ROW)
    }

    /// Request a fixed width and turn on [`CellOptions::FIXED_WIDTH`].
    ///
    /// Once fixed, neither fill, stretch, nor uniform packing change the cell's width.
    pub fn set_fixed_width(&mut self, width: f64) {
        self.requested.width = width;
        self.set_option(CellOptions::FIXED_WIDTH);
    }

    /// Request a fixed height and turn on [`CellOptions::FIXED_HEIGHT`].
    pub fn set_fixed_height(&mut self, height: f64) {
        self.requested.height = height;
        self.set_option(CellOptions::FIXED_HEIGHT);
    }

    /// The size last passed to [`Cell::set_fixed_width`] / [`Cell::set_fixed_height`].
    ///
    /// Only meaningful on an axis whose fixed flag is set.
    pub fn requested_size(&self) -> Size {
        self.requested
    }

    /// The natural size used for proportional stretching and for cells that neither fill nor are fixed.
    pub fn default_size(&self) -> Size {
        self.default_size
    }

    /// Change the natural size. Both dimensions default to `1.0`.
    pub fn set_default_size(&mut self, size: Size) {
        self.default_size = size;
    }

    /// Effective natural size: the requested size on fixed axes, the default size otherwise.
    pub fn natural_size(&self) -> Size {
        Size::new(
            if self.fixed_width() {
                self.requested.width
            } else {
                self.default_size.width
            },
            if self.fixed_height() {
                self.requested.height
            } else {
                self.default_size.height
            },
        )
    }

    /// Whether the cell participates in layout.
    ///
    /// Hidden cells take no space in the grid and keep whatever rectangle they had.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the cell.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// The last rectangle assigned by a grid. `y0` is the bottom edge.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Left edge of the last assigned rectangle.
    pub fn x(&self) -> f64 {
        self.rect.x0
    }

    /// Bottom edge of the last assigned rectangle.
    pub fn y(&self) -> f64 {
        self.rect.y0
    }

    /// Width of the last assigned rectangle.
    pub fn width(&self) -> f64 {
        self.rect.width()
    }

    /// Height of the last assigned rectangle.
    pub fn height(&self) -> f64 {
        self.rect.height()
    }

    /// Transform mapping the unit square onto [`Cell::rect`].
    ///
    /// Content modeled in a `0..1` box can be placed into the cell with this transform.
    pub fn transform(&self) -> Affine {
        unit_to_rect(self.rect)
    }

    pub(crate) fn set_position(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

/// Scale by the rect size, then translate to its origin.
pub(crate) fn unit_to_rect(rect: Rect) -> Affine {
    Affine::translate((rect.x0, rect.y0)) * Affine::scale_non_uniform(rect.width(), rect.height())
}
