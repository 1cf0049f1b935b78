//! Text rendering of fields, pieces and solutions.

use crate::catalog::PieceCatalog;
use crate::geometry::extent;
use crate::grid::{Cell, Dims, Field};
use crate::pieces::Coord;
use crate::placement::Placement;
use crate::solver::{Solution, SolutionSink};

const SYMBOLS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Side a box is looked at from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Front,
    /// Walked around the box: `z` runs the other way.
    Back,
}

/// Single-character label for a piece index.
pub fn piece_symbol(piece: usize) -> char {
    SYMBOLS.get(piece).map_or('?', |&b| char::from(b))
}

fn cell_symbol(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::Guard => '+',
        Cell::Occupied(piece) => piece_symbol(piece as usize),
    }
}

/// Draws the `x` slices of a box side by side, `y` rows top down.
fn render_slices(dims: Dims, view: View, mut symbol: impl FnMut(Coord) -> char) -> String {
    let labels: Vec<String> = (0..dims.x).map(|x| format!("x={x}")).collect();
    let width = labels.iter().map(String::len).fold(dims.z, usize::max);
    let mut lines = Vec::with_capacity(dims.y + 1);

    let header: Vec<String> = labels
        .iter()
        .map(|label| format!("{label:<width$}"))
        .collect();
    lines.push(header.join("  "));

    for y in (0..dims.y as i32).rev() {
        let row: Vec<String> = (0..dims.x as i32)
            .map(|x| {
                (0..dims.z as i32)
                    .map(|step| match view {
                        View::Front => step,
                        View::Back => dims.z as i32 - 1 - step,
                    })
                    .map(|z| symbol((x, y, z)))
                    .collect::<String>()
            })
            .map(|slice| format!("{slice:<width$}"))
            .collect();
        lines.push(row.join("  "));
    }

    let mut output = String::new();
    for line in lines {
        output.push_str(line.trim_end());
        output.push('\n');
    }
    output
}

/// Layered view of a box: one block per `x` slice.
pub fn format_layers(field: &Field, view: View) -> String {
    render_slices(field.dims(), view, |coord| cell_symbol(field.cell(coord)))
}

/// Board view for flat fields: one line per row, highest row first.
pub fn format_planar(field: &Field) -> String {
    let dims = field.dims();
    let mut output = String::with_capacity((dims.y + 1) * dims.x);
    for row in (0..dims.x as i32).rev() {
        output.extend((0..dims.y as i32).map(|col| cell_symbol(field.cell((row, col, 0)))));
        output.push('\n');
    }
    output
}

/// Block drawing of a flat field where cells of one piece run together.
///
/// Each cell is a 4x2 block of `#`; a `#` joint connects it to a neighbour
/// of the same piece, `:` and `----` connect neighbouring empty cells.
pub fn format_fancy(field: &Field) -> String {
    let dims = field.dims();
    let cols = dims.y as i32;
    let at = |row: i32, col: i32| field.cell((row, col, 0));
    let mut output = String::new();

    for row in (0..dims.x as i32).rev() {
        let mut line = String::new();
        for col in 0..cols {
            line.push_str(if at(row, col).is_empty() { "    " } else { "####" });
            if col + 1 < cols {
                line.push(match (at(row, col), at(row, col + 1)) {
                    (a, b) if a != b => ' ',
                    (Cell::Empty, _) => ':',
                    _ => '#',
                });
            }
        }
        let line = line.trim_end();
        for _ in 0..2 {
            output.push_str(line);
            output.push('\n');
        }

        if row > 0 {
            let joints: Vec<&str> = (0..cols)
                .map(|col| match (at(row, col), at(row - 1, col)) {
                    (a, b) if a != b => "    ",
                    (Cell::Empty, _) => "----",
                    _ => "####",
                })
                .collect();
            output.push_str(joints.join(" ").trim_end());
            output.push('\n');
        }
    }
    output
}

/// Layered view of a single orientation, `#` for its cells.
pub fn format_orientation(cells: &[Coord]) -> String {
    let (ex, ey, ez) = extent(cells);
    let dims = Dims::new(ex as usize, ey as usize, ez as usize);
    render_slices(dims, View::Front, |coord| {
        if cells.contains(&coord) {
            '#'
        } else {
            '.'
        }
    })
}

/// Orders a solution's placements for building it by hand: pieces farthest
/// from a viewer at the front top of the box come first.
pub fn assembly_order(field: &Field, placements: &[Placement]) -> Vec<Placement> {
    let distance = |piece: usize| {
        field
            .interior()
            .filter(|&coord| field.cell(coord).piece() == Some(piece))
            .map(|(x, y, z)| 200 - x - 3 * y + z)
            .min()
            .unwrap_or(i32::MAX)
    };

    let mut ordered = placements.to_vec();
    ordered.sort_by_cached_key(|placement| std::cmp::Reverse(distance(placement.piece)));
    ordered
}

/// Step-by-step build instructions: each piece as it looks on its own, then
/// the box so far with earlier pieces drawn as `+`.
pub fn format_assembly(catalog: &PieceCatalog, field: &Field, placements: &[Placement]) -> String {
    let mut output = String::new();
    let mut built: Vec<(usize, Vec<Coord>)> = Vec::with_capacity(placements.len());

    for placement in assembly_order(field, placements) {
        let cells: Vec<Coord> = placement
            .cells(catalog)
            .map(Iterator::collect)
            .unwrap_or_default();
        let shape = &catalog.orientations(placement.piece)[placement.orientation];

        output.push_str(&format!("\npiece {}\n", piece_symbol(placement.piece)));
        output.push_str(&format_orientation(shape.cells()));
        output.push('\n');

        built.push((placement.piece, cells));
        output.push_str(&render_slices(field.dims(), View::Front, |coord| {
            match built.iter().find(|(_, cells)| cells.contains(&coord)) {
                Some(&(piece, _)) if piece == placement.piece => piece_symbol(piece),
                Some(_) => '+',
                None => '.',
            }
        }));
    }
    output
}

/// Sink that writes each solution to the log at debug level.
#[derive(Debug, Clone, Copy)]
pub struct LogSink {
    render: fn(&Field) -> String,
}

impl LogSink {
    /// Logs flat fields as a board.
    pub fn planar() -> Self {
        Self {
            render: format_planar,
        }
    }

    /// Logs boxes slice by slice.
    pub fn layered() -> Self {
        Self {
            render: |field| format_layers(field, View::Front),
        }
    }
}

impl SolutionSink for LogSink {
    fn report(&mut self, solution: &Solution<'_>) {
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "solution {}:\n{}",
                solution.index,
                (self.render)(solution.field)
            );
        }
    }
}
