// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid-wide configuration.

use kurbo::{Insets, Size};

use crate::types::FixedAxis;

/// Grid-wide layout settings.
///
/// All fields are plain data; use [`Grid::with_config`](crate::Grid::with_config) to build a grid
/// from a config and the `Grid::set_*` methods to change one setting at a time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    /// Number of columns (with [`FixedAxis::Columns`]) or rows (with [`FixedAxis::Rows`]).
    ///
    /// Values below `1` are raised to `1` when the config is applied.
    pub axis_count: usize,
    /// Which axis `axis_count` fixes.
    pub fixed_axis: FixedAxis,
    /// Gap between consecutive columns.
    pub horizontal_spacing: f64,
    /// Gap between consecutive rows.
    pub vertical_spacing: f64,
    /// Inset taken from inside [`GridConfig::size`] (box model).
    ///
    /// `x0` is the left inset, `x1` the right, `y0` the top, and `y1` the bottom.
    pub padding: Insets,
    /// Every non-fixed cell uses the widest natural width among visible cells.
    pub pack_uniform_width: bool,
    /// Every non-fixed cell uses the tallest natural height among visible cells.
    pub pack_uniform_height: bool,
    /// Outer size the grid lays out into.
    pub size: Size,
}

impl Default for GridConfig {
    /// A single column, no spacing, no padding, and a 1x1 container.
    fn default() -> Self {
        Self {
            axis_count: 1,
            fixed_axis: FixedAxis::Columns,
            horizontal_spacing: 0.0,
            vertical_spacing: 0.0,
            padding: Insets::ZERO,
            pack_uniform_width: false,
            pack_uniform_height: false,
            size: Size::new(1.0, 1.0),
        }
    }
}

impl GridConfig {
    /// Config with `axis_count` tracks fixed along `fixed_axis`, everything else default.
    pub fn new(axis_count: usize, fixed_axis: FixedAxis) -> Self {
        Self {
            axis_count: axis_count.max(1),
            fixed_axis,
            ..Default::default()
        }
    }

    /// Number of columns and rows needed to place `cells` cells.
    ///
    /// The fixed axis always reports `axis_count`, even when there are fewer cells.
    pub fn dimensions(&self, cells: usize) -> (usize, usize) {
        let free = cells.div_ceil(self.axis_count);
        match self.fixed_axis {
            FixedAxis::Columns => (self.axis_count, free),
            FixedAxis::Rows => (free, self.axis_count),
        }
    }

    /// Width left for columns once left and right padding are taken out.
    pub(crate) fn interior_width(&self) -> f64 {
        self.size.width - self.padding.x0 - self.padding.x1
    }

    /// Height left for rows once top and bottom padding are taken out.
    pub(crate) fn interior_height(&self) -> f64 {
        self.size.height - self.padding.y0 - self.padding.y1
    }

    /// Same config with an axis count of at least one, and every invalid spacing, padding,
    /// or size replaced by the matching field of `fallback`.
    ///
    /// Spacing must be finite and non-negative; padding and size must be finite.
    pub(crate) fn sanitized(mut self, fallback: &Self) -> Self {
        self.axis_count = self.axis_count.max(1);
        if !(self.horizontal_spacing.is_finite() && self.horizontal_spacing >= 0.0) {
            self.horizontal_spacing = fallback.horizontal_spacing;
        }
        if !(self.vertical_spacing.is_finite() && self.vertical_spacing >= 0.0) {
            self.vertical_spacing = fallback.vertical_spacing;
        }
        if !self.padding.is_finite() {
            self.padding = fallback.padding;
        }
        if !self.size.is_finite() {
            self.size = fallback.size;
        }
        self
    }
}
