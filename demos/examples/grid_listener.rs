// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout listener and visual elements.
//!
//! Bind each cell to a unit-square transform, hide a cell, and let a listener
//! count completed passes.
//!
//! Run:
//! - `cargo run -p understory_grid_demos --example grid_listener`

use std::cell::Cell as Counter;
use std::collections::BTreeMap;
use std::rc::Rc;

use kurbo::{Affine, Point, Size};
use tracing_subscriber::EnvFilter;
use understory_grid::{Cell, CellId, FixedAxis, Grid, LayoutListener};

#[derive(Default)]
struct Repaint {
    passes: Counter<u32>,
}

impl LayoutListener for Repaint {
    fn layout_changed(&self) {
        self.passes.set(self.passes.get() + 1);
        tracing::info!(pass = self.passes.get(), "repaint requested");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Two rows; cells wrap into new columns.
    let mut grid = Grid::with_axis(2, FixedAxis::Rows);
    grid.set_size(Size::new(90.0, 40.0));
    let repaint = Rc::new(Repaint::default());
    grid.set_layout_listener(&repaint);

    let mut nodes: BTreeMap<CellId, Affine> = BTreeMap::new();
    for _ in 0..5 {
        let id = grid.insert(Cell::new());
        nodes.insert(id, Affine::IDENTITY);
    }

    let _ = grid.perform_layout();
    grid.apply_rects(&mut nodes);
    for (id, tf) in &nodes {
        println!(
            "{:?} at {:?}: unit square origin -> {:?}",
            id,
            grid.position_of(*id),
            *tf * Point::ZERO
        );
    }

    // Hiding the second cell compacts the grid back to two full columns.
    let hidden = grid.cells().nth(1).map(|(id, _)| id);
    if let Some(id) = hidden {
        grid.set_cell_visible(id, false);
    }
    let damage = grid.perform_layout();
    println!(
        "after hide: {} columns, {} changed, {} passes",
        grid.num_columns(),
        damage.changed.len(),
        repaint.passes.get()
    );
    assert_eq!(grid.num_columns(), 2);
    assert_eq!(repaint.passes.get(), 2);
}
