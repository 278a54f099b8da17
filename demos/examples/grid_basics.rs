// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid basics.
//!
//! Build a two-column grid, lay it out, resize it, and print the damage.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_grid_demos --example grid_basics`

use kurbo::{Insets, Size};
use tracing_subscriber::EnvFilter;
use understory_grid::{Cell, CellOptions, FixedAxis, Grid};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut grid = Grid::with_axis(2, FixedAxis::Columns);
    grid.set_size(Size::new(200.0, 120.0));
    grid.set_spacing(4.0, 4.0);
    grid.set_padding(Insets::uniform(8.0));

    // A fixed-width label column and a stretching value column.
    let mut rows = Vec::new();
    for _ in 0..3 {
        let label = grid.insert(
            Cell::new()
                .with_options(CellOptions::FILL_Y | CellOptions::STRETCH_ROW)
                .with_fixed_width(60.0),
        );
        let value = grid.insert(Cell::new());
        rows.push((label, value));
    }

    let damage = grid.perform_layout();
    println!("first pass changed {} cells", damage.changed.len());
    for (row, (label, value)) in rows.iter().enumerate() {
        println!(
            "row {row}: label {:?} value {:?}",
            grid.cell_rect(*label),
            grid.cell_rect(*value)
        );
    }
    println!(
        "columns {:?} rows {:?} preferred {:?}",
        grid.column_widths(),
        grid.row_heights(),
        grid.preferred_size()
    );

    // Widen the grid: only the value column moves.
    grid.set_size(Size::new(300.0, 120.0));
    let damage = grid.perform_layout();
    println!(
        "resize changed {} cells, union {:?}",
        damage.changed.len(),
        damage.union_rect()
    );
    assert_eq!(damage.changed.len(), 3, "only value cells widen");
}
