// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the grid: cell identifiers, sizing options, and grid addressing.

/// Identifier for a cell owned by a [`Grid`](crate::Grid).
///
/// This is a small, copyable handle that stays stable while the cell is in the grid
/// and becomes invalid once the cell is removed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `CellId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `CellId`.
///
/// Stale `CellId`s never alias a different live cell because the generation must match.
/// Every grid operation taking a `CellId` treats a stale id as "not a member":
/// mutators do nothing and queries return `None`.
///
/// The ordering is by slot then generation. It carries no layout meaning and exists so ids
/// can key ordered maps (see [`ElementLookup`](crate::ElementLookup)).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) u32, pub(crate) u32);

impl CellId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Sizing policy of a single cell.
    ///
    /// Fill flags act on the cell itself, while stretch flags act on the whole row or column:
    /// a column only stretches when every visible cell in it sets [`CellOptions::STRETCH_COLUMN`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CellOptions: u8 {
        /// Width of the cell expands to the full width of its column.
        const FILL_X         = 0b0000_0001;
        /// Height of the cell expands to the full height of its row.
        const FILL_Y         = 0b0000_0010;
        /// Column takes a share of leftover width, if all of its cells agree.
        const STRETCH_COLUMN = 0b0000_0100;
        /// Row takes a share of leftover height, if all of its cells agree.
        const STRETCH_ROW    = 0b0000_1000;
        /// Fill and stretch in both directions.
        const FILL = Self::FILL_X.bits()
            | Self::FILL_Y.bits()
            | Self::STRETCH_COLUMN.bits()
            | Self::STRETCH_ROW.bits();
        /// Cell uses its requested width, ignoring fill, stretch, and uniform packing.
        const FIXED_WIDTH    = 0b0001_0000;
        /// Cell uses its requested height, ignoring fill, stretch, and uniform packing.
        const FIXED_HEIGHT   = 0b0010_0000;
    }
}

impl Default for CellOptions {
    fn default() -> Self {
        Self::FILL
    }
}

/// Which axis has a user-fixed number of tracks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FixedAxis {
    /// The axis count is the number of columns; cells fill a row left to right, then wrap
    /// to a new row below.
    #[default]
    Columns,
    /// The axis count is the number of rows; cells fill a column top to bottom, then wrap
    /// to a new column on the right.
    Rows,
}

impl FixedAxis {
    /// Row and column of the cell at `ordinal` in a grid with `axis_count` fixed tracks.
    pub(crate) const fn locate(self, ordinal: usize, axis_count: usize) -> GridPosition {
        let major = ordinal / axis_count;
        let minor = ordinal % axis_count;
        match self {
            Self::Columns => GridPosition {
                row: major,
                column: minor,
            },
            Self::Rows => GridPosition {
                row: minor,
                column: major,
            },
        }
    }

    /// Inverse of [`FixedAxis::locate`], without bounds checks on the free axis.
    ///
    /// Returns `None` if the position is past the fixed axis or its ordinal overflows.
    pub(crate) fn ordinal(self, pos: GridPosition, axis_count: usize) -> Option<usize> {
        let (major, minor) = match self {
            Self::Columns => (pos.row, pos.column),
            Self::Rows => (pos.column, pos.row),
        };
        if minor >= axis_count {
            return None;
        }
        major.checked_mul(axis_count)?.checked_add(minor)
    }
}

/// Row and column of a cell. Row `0` is the topmost row and column `0` the leftmost column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridPosition {
    /// Zero-based row, counted from the top.
    pub row: usize,
    /// Zero-based column, counted from the left.
    pub column: usize,
}

impl GridPosition {
    /// Create a position from a row and column.
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}
