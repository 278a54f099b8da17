// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_grid --heading-base-level=0

//! Understory Grid: a Kurbo-native grid layout.
//!
//! Understory Grid arranges rectangular cells into a grid with a fixed number of columns
//! (cells wrap into new rows) or a fixed number of rows (cells wrap into new columns).
//!
//! - Each cell can have a fixed size, fill its row/column, or take part in stretching.
//! - Rows and columns stretch into leftover space in proportion to their natural size.
//! - Spacing between tracks and box-model padding are honored.
//! - Changes are batched: mutators mark the grid dirty and [`Grid::perform_layout`] runs one pass,
//!   returning coarse [`Damage`].
//!
//! ## Not a scene graph
//!
//! This crate only computes rectangles. Drawing them, hit testing, or animating between layouts
//! is up to the caller. A [`VisualElement`] receives a cell's rectangle, and
//! [`Grid::apply_rects`] pushes every rectangle to the elements found through an [`ElementLookup`].
//! A [`LayoutListener`] hears about each completed pass.
//!
//! ## Coordinates
//!
//! The origin is at the bottom-left and y grows upward. Row `0` is the top row, so the first
//! cell sits in the top-left corner. A cell's [`Rect`](kurbo::Rect) has its bottom edge in `y0`.
//! Units are never interpreted: pixels, percentages, or anything linear work.
//!
//! ## Sizing rules
//!
//! A cell's *natural size* is its requested size on axes marked fixed, and its default size
//! (`1.0` unless set) otherwise. With uniform packing, every non-fixed cell uses the largest
//! natural size among visible cells instead.
//!
//! A column stretches only if *every* visible cell in it has [`CellOptions::STRETCH_COLUMN`]
//! and none of them has a fixed width; rows likewise. Non-stretching columns keep the width of
//! their widest cell. Stretching columns share what is left of the interior width in proportion
//! to their natural width, or equally when that width is zero.
//!
//! A cell then takes its fixed width, else the full column width with
//! [`CellOptions::FILL_X`], else the uniform width, else its natural width. Heights follow the
//! same rules.
//!
//! ## API overview
//!
//! - [`Grid`]: owns cells, configuration, and the layout caches.
//! - [`Cell`]: per-cell sizing policy and last assigned rectangle.
//! - [`CellOptions`]: fill, stretch, and fixed flags.
//! - [`CellId`]: generational handle of a cell in a grid.
//! - [`GridConfig`]: grid-wide settings.
//! - [`Damage`]: what a pass changed.
//!
//! # Example
//!
//! ```rust
//! use understory_grid::{Cell, FixedAxis, Grid};
//! use kurbo::{Rect, Size};
//!
//! // Two columns in a 100x60 container.
//! let mut grid = Grid::with_axis(2, FixedAxis::Columns);
//! grid.set_size(Size::new(100.0, 60.0));
//!
//! let ids: Vec<_> = (0..4).map(|_| grid.insert(Cell::new())).collect();
//! let damage = grid.perform_layout();
//! assert_eq!(damage.changed.len(), 4);
//!
//! // Cell 0 is top-left; y grows upward.
//! assert_eq!(grid.cell_rect(ids[0]), Some(Rect::new(0.0, 30.0, 50.0, 60.0)));
//! assert_eq!(grid.cell_rect(ids[3]), Some(Rect::new(50.0, 0.0, 100.0, 30.0)));
//!
//! // Nothing changed, nothing to do.
//! assert!(grid.perform_layout().is_empty());
//! ```
//!
//! ### Fixed and stretching columns
//!
//! ```rust
//! use understory_grid::{Cell, FixedAxis, Grid};
//! use kurbo::{Insets, Size};
//!
//! let mut grid = Grid::with_axis(3, FixedAxis::Columns);
//! grid.set_size(Size::new(120.0, 20.0));
//! grid.set_spacing(5.0, 0.0);
//! grid.set_padding(Insets::uniform_xy(5.0, 0.0));
//!
//! grid.insert(Cell::new().with_fixed_width(20.0));
//! grid.insert(Cell::new().with_default_size(Size::new(1.0, 1.0)));
//! grid.insert(Cell::new().with_default_size(Size::new(3.0, 1.0)));
//! let _ = grid.perform_layout();
//!
//! // 120 - 10 padding - 10 spacing - 20 fixed = 80 left, shared 1:3.
//! assert_eq!(grid.column_widths(), &[20.0, 20.0, 60.0]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cell;
mod config;
mod damage;
mod grid;
mod layout;
mod listener;
mod types;

pub use cell::Cell;
pub use config::GridConfig;
pub use damage::Damage;
pub use grid::Grid;
pub use listener::{ElementLookup, LayoutListener, VisualElement};
pub use types::{CellId, CellOptions, FixedAxis, GridPosition};
