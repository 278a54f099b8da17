// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The grid solver: turns a config and the visible cells into one rectangle per cell.
//!
//! The solver runs in six steps:
//!
//! 1. Classify every cell into its row and column. Each track keeps the largest natural size
//!    of its cells and whether *all* of its cells ask to stretch.
//! 2. Reserve the natural size of every non-stretching track, plus spacing, from the interior
//!    (container size minus padding).
//! 3. Hand the remaining width to stretching columns in proportion to their natural width.
//! 4. Same for rows and height.
//! 5. Accumulate column edges left to right from the left padding, and row edges top to bottom
//!    from the top padding. The origin is bottom-left, so rows walk downward in y.
//! 6. Size each cell: fixed, else fill the track, else the uniform size, else its natural size.
//!    A cell that does not fill sits at the left and bottom of its track.

use alloc::vec;
use alloc::vec::Vec;
use kurbo::{Rect, Size};
use tracing::trace;

use crate::cell::Cell;
use crate::config::GridConfig;

/// Result of one solve.
#[derive(Clone, Debug, Default)]
pub(crate) struct Solution {
    /// One rectangle per input cell, same order.
    pub(crate) rects: Vec<Rect>,
    /// Resolved width of every column.
    pub(crate) column_widths: Vec<f64>,
    /// Resolved height of every row, top to bottom.
    pub(crate) row_heights: Vec<f64>,
}

/// Per-row or per-column bookkeeping from the classify step.
#[derive(Clone, Copy, Debug)]
struct Track {
    natural: f64,
    occupied: bool,
    stretch: bool,
}

impl Track {
    const EMPTY: Self = Self {
        natural: 0.0,
        occupied: false,
        stretch: true,
    };

    fn absorb(&mut self, natural: f64, stretch: bool) {
        self.natural = self.natural.max(natural);
        // One non-stretching cell disqualifies the whole track.
        self.stretch &= stretch;
        self.occupied = true;
    }

    fn stretches(&self) -> bool {
        self.occupied && self.stretch
    }
}

/// Output of the classify step, shared by [`solve`] and [`preferred_size`].
struct Classified {
    columns: Vec<Track>,
    rows: Vec<Track>,
    uniform: Size,
}

/// Largest natural size among `cells`, per axis.
fn uniform_size(cells: &[&Cell]) -> Size {
    cells.iter().fold(Size::ZERO, |acc, cell| {
        let natural = cell.natural_size();
        Size::new(acc.width.max(natural.width), acc.height.max(natural.height))
    })
}

/// Size a cell claims in its tracks before any stretching.
fn packed_size(cell: &Cell, config: &GridConfig, uniform: Size) -> Size {
    let width = if cell.fixed_width() {
        cell.requested_size().width
    } else if config.pack_uniform_width {
        uniform.width
    } else {
        cell.default_size().width
    };
    let height = if cell.fixed_height() {
        cell.requested_size().height
    } else if config.pack_uniform_height {
        uniform.height
    } else {
        cell.default_size().height
    };
    Size::new(width, height)
}

fn classify(config: &GridConfig, cells: &[&Cell]) -> Classified {
    let (num_columns, num_rows) = config.dimensions(cells.len());
    let uniform = uniform_size(cells);
    let mut columns = vec![Track::EMPTY; num_columns];
    let mut rows = vec![Track::EMPTY; num_rows];
    for (ordinal, cell) in cells.iter().enumerate() {
        let pos = config.fixed_axis.locate(ordinal, config.axis_count);
        let size = packed_size(cell, config, uniform);
        // A fixed size is never overridden, so it cannot take part in stretching.
        columns[pos.column].absorb(size.width, cell.stretch_column() && !cell.fixed_width());
        rows[pos.row].absorb(size.height, cell.stretch_row() && !cell.fixed_height());
    }
    Classified {
        columns,
        rows,
        uniform,
    }
}

/// Natural size of non-stretching tracks plus the gaps between all tracks.
fn reserved(tracks: &[Track], spacing: f64) -> f64 {
    let fixed: f64 = tracks
        .iter()
        .filter(|t| !t.stretches())
        .map(|t| t.natural)
        .sum();
    fixed + gaps(tracks.len(), spacing)
}

fn gaps(count: usize, spacing: f64) -> f64 {
    count.saturating_sub(1) as f64 * spacing
}

/// Resolve every track's size, sharing `remaining` among the stretching ones.
///
/// Shares are proportional to natural size. If every stretching track has a natural size of
/// zero, they split `remaining` equally instead. Overflowing layouts leave nothing to share.
fn distribute(tracks: &[Track], remaining: f64) -> Vec<f64> {
    let remaining = remaining.max(0.0);
    let (count, weight) = tracks
        .iter()
        .filter(|t| t.stretches())
        .fold((0_usize, 0.0), |(n, w), t| (n + 1, w + t.natural));
    tracks
        .iter()
        .map(|t| {
            if !t.stretches() {
                t.natural
            } else if weight > 0.0 {
                remaining * (t.natural / weight)
            } else {
                // `t` stretches, so `count >= 1`.
                remaining / count as f64
            }
        })
        .collect()
}

/// Leading edge of every track, walking from `start` in `direction` (`1.0` or `-1.0`).
fn edges(start: f64, sizes: &[f64], spacing: f64, direction: f64) -> Vec<f64> {
    let mut current = start;
    sizes
        .iter()
        .map(|size| {
            let edge = current;
            current += direction * (size + spacing);
            edge
        })
        .collect()
}

/// Lay out `cells`, which must be the visible cells in grid order.
///
/// The ordinal of each cell in the slice decides its row and column.
pub(crate) fn solve(config: &GridConfig, cells: &[&Cell]) -> Solution {
    if cells.is_empty() {
        return Solution::default();
    }
    let Classified {
        columns,
        rows,
        uniform,
    } = classify(config, cells);

    let remaining_width =
        config.interior_width() - reserved(&columns, config.horizontal_spacing);
    let remaining_height =
        config.interior_height() - reserved(&rows, config.vertical_spacing);
    let column_widths = distribute(&columns, remaining_width);
    let row_heights = distribute(&rows, remaining_height);
    trace!(
        num_columns = columns.len(),
        num_rows = rows.len(),
        remaining_width,
        remaining_height,
        "resolved grid tracks"
    );

    let lefts = edges(
        config.padding.x0,
        &column_widths,
        config.horizontal_spacing,
        1.0,
    );
    let tops = edges(
        config.size.height - config.padding.y0,
        &row_heights,
        config.vertical_spacing,
        -1.0,
    );

    let rects = cells
        .iter()
        .enumerate()
        .map(|(ordinal, cell)| {
            let pos = config.fixed_axis.locate(ordinal, config.axis_count);
            let column_width = column_widths[pos.column];
            let row_height = row_heights[pos.row];
            let x = lefts[pos.column];
            let bottom = tops[pos.row] - row_height;

            let width = if cell.fixed_width() {
                cell.requested_size().width
            } else if cell.fill_x() {
                column_width
            } else if config.pack_uniform_width {
                uniform.width
            } else {
                cell.default_size().width
            };
            let height = if cell.fixed_height() {
                cell.requested_size().height
            } else if cell.fill_y() {
                row_height
            } else if config.pack_uniform_height {
                uniform.height
            } else {
                cell.default_size().height
            };
            Rect::new(x, bottom, x + width, bottom + height)
        })
        .collect();

    Solution {
        rects,
        column_widths,
        row_heights,
    }
}

/// Size needed to show every cell at its natural size, including spacing and padding.
pub(crate) fn preferred_size(config: &GridConfig, cells: &[&Cell]) -> Size {
    let Classified { columns, rows, .. } = classify(config, cells);
    let width: f64 = columns.iter().map(|t| t.natural).sum::<f64>()
        + gaps(columns.len(), config.horizontal_spacing);
    let height: f64 =
        rows.iter().map(|t| t.natural).sum::<f64>() + gaps(rows.len(), config.vertical_spacing);
    Size::new(
        width + config.padding.x0 + config.padding.x1,
        height + config.padding.y0 + config.padding.y1,
    )
}
