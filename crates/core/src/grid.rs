//! Grid sampling and marching-squares cell classification.
//!
//! The field predicate is sampled on a square lattice of spacing `gap`.
//! [`classify`] turns the samples into a sparse table of 4-bit corner masks,
//! one per cell touching at least one inside sample. Cells are keyed by
//! `(column, row)` lattice indices; the cell `(c, r)` is anchored at
//! `(c * gap, r * gap)` and spans one `gap` to the right and downward.
//!
//! Classification samples from `gap` onward, never at 0, so column 0 and
//! row 0 of the lattice never contribute corners. [`sample_points`] is the
//! debug variant and does start at 0.

use std::collections::BTreeMap;

use glam::DVec2;

use crate::error::MetaballError;
use crate::geometry::Bounds;

/// Four corner flags of one grid cell. Only the low four bits are used.
///
/// Corners are named in screen orientation (y grows downward) relative to
/// the cell anchor `(x, y)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellMask(u8);

impl CellMask {
    pub const EMPTY: CellMask = CellMask(0);
    pub const FULL: CellMask = CellMask(0b1111);

    /// Corner `(x + gap, y + gap)`.
    pub const BOTTOM_RIGHT: u8 = 0b0001;
    /// Corner `(x, y + gap)`.
    pub const BOTTOM_LEFT: u8 = 0b0010;
    /// Corner `(x + gap, y)`.
    pub const TOP_RIGHT: u8 = 0b0100;
    /// Corner `(x, y)`.
    pub const TOP_LEFT: u8 = 0b1000;

    /// Builds a mask from raw bits, discarding everything above bit 3.
    pub fn from_bits(bits: u8) -> Self {
        CellMask(bits & 0b1111)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// `true` if every bit of `corner` is set.
    pub fn contains(self, corner: u8) -> bool {
        self.0 & corner == corner
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn insert(&mut self, corner: u8) {
        self.0 |= corner;
    }
}

/// Sparse `(column, row) -> mask` table produced by [`classify`].
///
/// Absent cells have every corner outside. Iteration is column-major:
/// ascending column, then ascending row.
#[derive(Debug, Clone, PartialEq)]
pub struct CellTable {
    gap: f64,
    cells: BTreeMap<(usize, usize), CellMask>,
}

impl CellTable {
    fn new(gap: f64) -> Self {
        Self {
            gap,
            cells: BTreeMap::new(),
        }
    }

    /// Lattice spacing the table was classified with.
    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Number of materialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Mask of cell `(col, row)`; [`CellMask::EMPTY`] when absent.
    pub fn get(&self, col: usize, row: usize) -> CellMask {
        self.cells.get(&(col, row)).copied().unwrap_or_default()
    }

    /// Whether cell `(col, row)` was materialized.
    pub fn contains(&self, col: usize, row: usize) -> bool {
        self.cells.contains_key(&(col, row))
    }

    /// World-space anchor (top-left corner) of cell `(col, row)`.
    pub fn anchor(&self, col: usize, row: usize) -> DVec2 {
        DVec2::new(col as f64 * self.gap, row as f64 * self.gap)
    }

    /// Iterates `((col, row), mask)` over every materialized cell.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), CellMask)> + '_ {
        self.cells.iter().map(|(&key, &mask)| (key, mask))
    }

    fn mark(&mut self, col: usize, row: usize, corner: u8) {
        self.cells.entry((col, row)).or_default().insert(corner);
    }
}

fn check_gap(gap: f64) -> Result<(), MetaballError> {
    if !gap.is_finite() || gap <= 0.0 {
        return Err(MetaballError::InvalidGrid { gap });
    }
    Ok(())
}

/// Lattice indices and coordinates `i * gap < limit`, starting at index `first`.
fn lattice(first: usize, gap: f64, limit: f64) -> impl Iterator<Item = (usize, f64)> {
    (first..)
        .map(move |i| (i, i as f64 * gap))
        .take_while(move |&(_, v)| v < limit)
}

/// Samples `inside` on the lattice and builds the sparse cell table.
///
/// Every lattice point `(x, y)` with `gap <= x < width` and
/// `gap <= y < height` is evaluated once. An inside point sets its corner
/// bit in each of the four cells sharing it.
///
/// Returns `MetaballError::InvalidGrid` for a non-finite or non-positive
/// `gap`, and `MetaballError::InvalidDimensions` for unusable bounds.
pub fn classify<F>(inside: F, gap: f64, width: f64, height: f64) -> Result<CellTable, MetaballError>
where
    F: Fn(f64, f64) -> bool,
{
    check_gap(gap)?;
    Bounds::new(width, height)?;

    let mut table = CellTable::new(gap);
    for (col, x) in lattice(1, gap, width) {
        for (row, y) in lattice(1, gap, height) {
            if !inside(x, y) {
                continue;
            }
            table.mark(col - 1, row - 1, CellMask::BOTTOM_RIGHT);
            table.mark(col - 1, row, CellMask::TOP_RIGHT);
            table.mark(col, row - 1, CellMask::BOTTOM_LEFT);
            table.mark(col, row, CellMask::TOP_LEFT);
        }
    }
    Ok(table)
}

/// Dense inside/outside samples of the full lattice, including row and
/// column 0. Stored column-major.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMap {
    gap: f64,
    columns: usize,
    rows: usize,
    inside: Vec<bool>,
}

impl PointMap {
    pub fn gap(&self) -> f64 {
        self.gap
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Sample at lattice index `(col, row)`, or `None` outside the lattice.
    pub fn get(&self, col: usize, row: usize) -> Option<bool> {
        if col >= self.columns || row >= self.rows {
            return None;
        }
        Some(self.inside[col * self.rows + row])
    }

    /// Number of inside samples.
    pub fn count_inside(&self) -> usize {
        self.inside.iter().filter(|&&v| v).count()
    }

    /// Iterates `(position, inside)` column by column.
    pub fn iter(&self) -> impl Iterator<Item = (DVec2, bool)> + '_ {
        self.inside.iter().enumerate().map(|(i, &v)| {
            let col = i / self.rows;
            let row = i % self.rows;
            (DVec2::new(col as f64 * self.gap, row as f64 * self.gap), v)
        })
    }
}

/// Evaluates `inside` at every lattice point of `[0, width) x [0, height)`.
///
/// Same validation as [`classify`].
pub fn sample_points<F>(inside: F, gap: f64, width: f64, height: f64) -> Result<PointMap, MetaballError>
where
    F: Fn(f64, f64) -> bool,
{
    check_gap(gap)?;
    Bounds::new(width, height)?;

    let rows = lattice(0, gap, height).count();
    let mut columns = 0;
    let mut samples = Vec::new();
    for (_, x) in lattice(0, gap, width) {
        columns += 1;
        samples.extend(lattice(0, gap, height).map(|(_, y)| inside(x, y)));
    }
    Ok(PointMap {
        gap,
        columns,
        rows,
        inside: samples,
    })
}
