// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Insets, Size};
use understory_grid::{Cell, CellOptions, FixedAxis, Grid};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // xorshift64*
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        (x.wrapping_mul(0x2545_F491_4F6C_DD1D) >> 32) as u32
    }

    fn next_f64(&mut self, lo: f64, hi: f64) -> f64 {
        let t = self.next_u32() as f64 / u32::MAX as f64;
        lo + (hi - lo) * t
    }
}

/// `n` cells with a mix of fixed, filling, and stretching policies.
fn gen_cells(n: usize, seed: u64) -> Vec<Cell> {
    let mut rng = Rng::new(seed);
    (0..n)
        .map(|i| {
            let natural = Size::new(rng.next_f64(1.0, 40.0), rng.next_f64(1.0, 20.0));
            let cell = Cell::new().with_default_size(natural);
            match i % 5 {
                0 => cell.with_fixed_width(rng.next_f64(10.0, 30.0)),
                1 => cell.with_options(CellOptions::FILL_X | CellOptions::FILL_Y),
                2 => cell.with_visible(i % 3 != 0),
                _ => cell,
            }
        })
        .collect()
}

fn build_grid(cells: &[Cell], axis_count: usize) -> Grid {
    let mut grid = Grid::with_axis(axis_count, FixedAxis::Columns);
    grid.set_size(Size::new(1920.0, 1080.0));
    grid.set_spacing(2.0, 2.0);
    grid.set_padding(Insets::uniform(4.0));
    for cell in cells {
        grid.insert(cell.clone());
    }
    grid
}

fn bench_full_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_full_layout");
    for &(n, columns) in &[(16_usize, 4_usize), (256, 16), (4096, 64)] {
        let cells = gen_cells(n, 0xC0FFEE);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("cells_{n}_cols_{columns}"), |b| {
            b.iter_batched(
                || build_grid(&cells, columns),
                |mut grid| black_box(grid.perform_layout()),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_resize");
    for &(n, columns) in &[(256_usize, 16_usize), (4096, 64)] {
        let cells = gen_cells(n, 0xBADC0DE);
        let mut grid = build_grid(&cells, columns);
        let _ = grid.perform_layout();
        let mut toggle = false;
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("cells_{n}_cols_{columns}"), |b| {
            b.iter(|| {
                toggle = !toggle;
                let width = if toggle { 1280.0 } else { 1920.0 };
                grid.set_size(Size::new(width, 1080.0));
                black_box(grid.perform_layout())
            });
        });
    }
    group.finish();
}

fn bench_clean_noop(c: &mut Criterion) {
    let cells = gen_cells(4096, 7);
    let mut grid = build_grid(&cells, 64);
    let _ = grid.perform_layout();
    c.bench_function("grid_clean_noop", |b| {
        b.iter(|| black_box(grid.perform_layout()));
    });
}

criterion_group!(benches, bench_full_layout, bench_resize, bench_clean_noop);
criterion_main!(benches);
