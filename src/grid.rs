//! Field representation: the bounded grid a puzzle is packed into.
//!
//! The interior is `dims.x * dims.y * dims.z` cells. Storage adds one guard
//! layer on the high side of every axis, and any coordinate outside storage
//! also reads as [`Cell::Guard`], so neighbourhood lookups never go out of
//! range.

use std::fmt;
use std::str::FromStr;

use crate::config::MAX_CELLS;
use crate::error::{Result, SolverError};
use crate::pieces::Coord;

/// Interior size of a field along each axis.
///
/// The search fills `x` slices one after another, so `x` is normally the
/// longest axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dims {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Dims {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Number of interior cells.
    pub const fn cell_count(&self) -> usize {
        self.x * self.y * self.z
    }

    /// Whether `(x, y, z)` lies inside the interior.
    #[inline]
    pub fn contains(&self, (x, y, z): Coord) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.x
            && (y as usize) < self.y
            && (z as usize) < self.z
    }

    fn validate(self) -> Result<Self> {
        if self.x == 0 || self.y == 0 || self.z == 0 {
            return Err(SolverError::InvalidDimensions(format!(
                "every axis must be at least 1, got {self}"
            )));
        }
        if [self.x, self.y, self.z].iter().any(|&axis| i32::try_from(axis).is_err()) {
            return Err(SolverError::InvalidDimensions(format!(
                "axis out of range in {self}"
            )));
        }
        let cells = self.x.checked_mul(self.y).and_then(|xy| xy.checked_mul(self.z));
        match cells {
            Some(cells) if cells <= MAX_CELLS => Ok(self),
            _ => Err(SolverError::InvalidDimensions(format!(
                "{self} has more than {MAX_CELLS} cells"
            ))),
        }
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}

impl FromStr for Dims {
    type Err = SolverError;

    /// Parses `"XxYxZ"`, e.g. `"6x5x5"`.
    fn from_str(s: &str) -> Result<Self> {
        let axes = s
            .split('x')
            .map(|axis| axis.trim().parse::<usize>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| SolverError::InvalidDimensions(format!("{s:?}: {e}")))?;

        match axes[..] {
            [x, y, z] => Self::new(x, y, z).validate(),
            _ => Err(SolverError::InvalidDimensions(format!(
                "{s:?}: expected three axes like 6x5x5"
            ))),
        }
    }
}

/// Contents of one field cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Border cell; never part of a solution.
    Guard,
    /// Covered by the piece with this index.
    Occupied(u8),
}

impl Cell {
    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Index of the covering piece, if any.
    #[inline]
    pub fn piece(self) -> Option<usize> {
        match self {
            Self::Occupied(piece) => Some(piece as usize),
            Self::Empty | Self::Guard => None,
        }
    }
}

/// A packing in progress: cell contents plus the set of used pieces.
#[derive(Debug, PartialEq, Eq)]
pub struct Field {
    dims: Dims,
    cells: Vec<Cell>,
    used: u64,
}

impl Field {
    /// An empty interior surrounded by guards.
    pub fn fresh(dims: Dims) -> Self {
        let (sx, sy, sz) = (dims.x + 1, dims.y + 1, dims.z + 1);
        let mut cells = Vec::with_capacity(sx * sy * sz);
        for x in 0..sx {
            for y in 0..sy {
                for z in 0..sz {
                    let guard = x == dims.x || y == dims.y || z == dims.z;
                    cells.push(if guard { Cell::Guard } else { Cell::Empty });
                }
            }
        }
        Self {
            dims,
            cells,
            used: 0,
        }
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    fn index(&self, (x, y, z): Coord) -> Option<usize> {
        let (sy, sz) = (self.dims.y + 1, self.dims.z + 1);
        if x < 0 || y < 0 || z < 0 {
            return None;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        if x > self.dims.x || y >= sy || z >= sz {
            return None;
        }
        Some((x * sy + y) * sz + z)
    }

    /// Contents of `coord`; anything outside storage is a guard.
    #[inline]
    pub fn cell(&self, coord: Coord) -> Cell {
        self.index(coord)
            .map_or(Cell::Guard, |index| self.cells[index])
    }

    #[inline]
    pub fn is_empty_at(&self, coord: Coord) -> bool {
        self.cell(coord).is_empty()
    }

    /// Writes a cell. Coordinates outside storage are ignored.
    #[inline]
    pub(crate) fn set(&mut self, coord: Coord, cell: Cell) {
        if let Some(index) = self.index(coord) {
            self.cells[index] = cell;
        }
    }

    #[inline]
    pub fn is_used(&self, piece: usize) -> bool {
        self.used & (1 << piece) != 0
    }

    #[inline]
    pub(crate) fn mark_used(&mut self, piece: usize) {
        self.used |= 1 << piece;
    }

    /// Number of pieces placed so far.
    #[inline]
    pub fn placed_count(&self) -> usize {
        self.used.count_ones() as usize
    }

    /// Interior cells still empty.
    pub fn empty_count(&self) -> usize {
        self.interior()
            .filter(|&coord| self.is_empty_at(coord))
            .count()
    }

    /// Interior coordinates, `x` slowest.
    pub fn interior(&self) -> impl Iterator<Item = Coord> {
        let Dims { x, y, z } = self.dims;
        (0..x as i32).flat_map(move |cx| {
            (0..y as i32).flat_map(move |cy| (0..z as i32).map(move |cz| (cx, cy, cz)))
        })
    }

    /// Occupancy word around `anchor`: bit `i` is set when
    /// `anchor + offsets[i]` is not empty.
    #[inline]
    pub fn fit_word(&self, (ax, ay, az): Coord, offsets: &[Coord]) -> u32 {
        offsets
            .iter()
            .enumerate()
            .fold(0u32, |word, (bit, &(dx, dy, dz))| {
                if self.is_empty_at((ax + dx, ay + dy, az + dz)) {
                    word
                } else {
                    word | (1 << bit)
                }
            })
    }
}

impl Clone for Field {
    fn clone(&self) -> Self {
        Self {
            dims: self.dims,
            cells: self.cells.clone(),
            used: self.used,
        }
    }

    // stage copies reuse the destination buffer
    fn clone_from(&mut self, source: &Self) {
        self.dims = source.dims;
        self.cells.clone_from(&source.cells);
        self.used = source.used;
    }
}

/// Order in which the search visits cells.
///
/// `x` slowest, then `y`, then `z`; `z` runs downwards on odd `y` rows so
/// consecutive cells stay adjacent.
#[derive(Debug, Clone)]
pub struct Traversal {
    order: Vec<Coord>,
}

impl Traversal {
    pub fn new(dims: Dims) -> Self {
        let mut order = Vec::with_capacity(dims.cell_count());
        for x in 0..dims.x as i32 {
            for y in 0..dims.y as i32 {
                let z_top = dims.z as i32 - 1;
                for step in 0..dims.z as i32 {
                    let z = if y % 2 == 1 { z_top - step } else { step };
                    order.push((x, y, z));
                }
            }
        }
        Self { order }
    }

    /// First cursor at or after `from` whose cell is empty in `field`,
    /// with that cell.
    #[inline]
    pub fn next_empty(&self, field: &Field, from: usize) -> Option<(usize, Coord)> {
        self.order
            .iter()
            .enumerate()
            .skip(from)
            .find(|&(_, &coord)| field.is_empty_at(coord))
            .map(|(cursor, &coord)| (cursor, coord))
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.order.iter().copied()
    }
}
