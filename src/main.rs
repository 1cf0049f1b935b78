//! Pentomino Solver
//!
//! Tiles a 6x10 rectangle with the twelve pentominoes (counting every
//! tiling) and packs a 6x5x5 box with pentacubes (stopping at the first
//! packing). Solutions can be printed as text or opened in an interactive
//! 3D viewer.

mod visualization;

use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};

use pentominoes::catalog::{PLANAR_FIT_OFFSETS, SPATIAL_FIT_OFFSETS};
use pentominoes::config::EXPECTED_PLANAR_SOLUTIONS;
use pentominoes::geometry::Symmetry;
use pentominoes::pieces::{BOX_PIECES, HEXOMINOES, PLANAR_PIECES};
use pentominoes::placement::Placement;
use pentominoes::report::{self, View};
use pentominoes::{
    Dims, Field, PieceCatalog, Solution, Solver, BOX_PUZZLE, HEXOMINO_BOX_PUZZLE, PLANAR_PUZZLE,
};

/// Solves pentomino tiling and packing puzzles.
#[derive(Parser)]
#[command(name = "pentominoes")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Enumerate tilings of the 6x10 rectangle.
    Planar {
        /// Stop after this many tilings.
        #[arg(long, default_value_t = PLANAR_PUZZLE.policy.max_solutions.unwrap_or(usize::MAX))]
        max_solutions: usize,
        /// Draw every tiling.
        #[arg(long)]
        show: bool,
        /// Open the tilings in the 3D viewer.
        #[arg(long)]
        view: bool,
    },
    /// Pack the box until the first solution.
    Box {
        /// Box size as XxYxZ; the search fills X slices in order.
        #[arg(long, default_value = "6x5x5")]
        size: Dims,
        /// Also offer the 29 hexominoes.
        #[arg(long)]
        hexominoes: bool,
        /// Print step-by-step assembly instructions.
        #[arg(long)]
        show: bool,
        /// Open the packing in the 3D viewer.
        #[arg(long)]
        view: bool,
    },
    /// Print every piece of a set.
    Pieces {
        #[arg(value_enum, default_value_t = PieceSet::Box)]
        set: PieceSet,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PieceSet {
    Planar,
    Box,
    Hexominoes,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        None => run_benchmarks(),
        Some(Command::Planar {
            max_solutions,
            show,
            view,
        }) => run_planar(max_solutions, show, view),
        Some(Command::Box {
            size,
            hexominoes,
            show,
            view,
        }) => run_box(size, hexominoes, show, view),
        Some(Command::Pieces { set }) => {
            print!("{}", describe_pieces(set)?);
            Ok(())
        }
    }
}

/// Runs both benchmarks and reports their results and timings.
fn run_benchmarks() -> anyhow::Result<()> {
    let start = Instant::now();
    let solutions = pentominoes::run_solve_2d().context("planar search failed")?;
    println!(
        "{}: {solutions} solutions in {:.2?}",
        PLANAR_PUZZLE.name,
        start.elapsed()
    );

    let start = Instant::now();
    let placements = pentominoes::run_solve_3d().context("box search failed")?;
    println!(
        "{}: solved after {placements} placements in {:.2?}",
        BOX_PUZZLE.name,
        start.elapsed()
    );

    if solutions != EXPECTED_PLANAR_SOLUTIONS {
        bail!(
            "malfunction: planar search found {solutions} solutions, \
             expected {EXPECTED_PLANAR_SOLUTIONS}"
        );
    }
    Ok(())
}

fn run_planar(max_solutions: usize, show: bool, view: bool) -> anyhow::Result<()> {
    let policy = PLANAR_PUZZLE.policy.with_max_solutions(Some(max_solutions));
    let puzzle = PLANAR_PUZZLE.with_policy(policy);
    let mut kept: Vec<Field> = Vec::new();

    let start = Instant::now();
    let stats = puzzle.solve(|solution: &Solution<'_>| {
        if show {
            println!(
                "\nSolution {}:\n{}",
                solution.index,
                report::format_fancy(solution.field)
            );
        }
        if view {
            kept.push(solution.field.clone());
        }
    })?;
    println!(
        "{}: {} solutions, {} placements ({} one piece short) in {:.2?}",
        puzzle.name,
        stats.solutions,
        stats.placements,
        stats.near_complete,
        start.elapsed()
    );

    if view {
        println!("Controls: Left/Right navigate, Up/Down explode, R reset");
        visualization::display(kept);
    }
    Ok(())
}

fn run_box(size: Dims, hexominoes: bool, show: bool, view: bool) -> anyhow::Result<()> {
    let base = if hexominoes { HEXOMINO_BOX_PUZZLE } else { BOX_PUZZLE };
    let puzzle = base.with_dims(size);
    let catalog = PieceCatalog::for_puzzle(&puzzle)?;
    let mut found: Option<(Field, Vec<Placement>)> = None;

    let start = Instant::now();
    let mut solver = Solver::new(&catalog, puzzle.dims, puzzle.policy, |solution: &Solution<'_>| {
        found = Some((solution.field.clone(), solution.placements.to_vec()));
    });
    let stats = solver.run()?;
    drop(solver);
    println!(
        "{} in {}: {} placements, {} backjumps in {:.2?}",
        puzzle.name,
        puzzle.dims,
        stats.placements,
        stats.backjumps,
        start.elapsed()
    );

    let Some((field, placements)) = found else {
        println!("No solution found");
        return Ok(());
    };

    println!("\nFront:\n{}", report::format_layers(&field, View::Front));
    println!("Back:\n{}", report::format_layers(&field, View::Back));
    if show {
        print!("{}", report::format_assembly(&catalog, &field, &placements));
    }
    if view {
        println!("Controls: Left/Right navigate, Up/Down explode, R reset");
        visualization::display(vec![field]);
    }
    Ok(())
}

/// Text listing of a piece set, first orientation of each piece.
fn describe_pieces(set: PieceSet) -> anyhow::Result<String> {
    let (pieces, symmetry) = match set {
        PieceSet::Planar => (PLANAR_PIECES, Symmetry::Planar),
        PieceSet::Box => (BOX_PIECES, Symmetry::Spatial),
        PieceSet::Hexominoes => (HEXOMINOES, Symmetry::Spatial),
    };
    let offsets = match symmetry {
        Symmetry::Planar => PLANAR_FIT_OFFSETS,
        Symmetry::Spatial => SPATIAL_FIT_OFFSETS,
    };
    let catalog = PieceCatalog::build(pieces, symmetry, offsets)?;

    let mut output = String::new();
    for piece in 0..catalog.len() {
        let orientations = catalog.orientations(piece);
        output.push_str(&format!(
            "Piece {} ({} orientations):\n",
            report::piece_symbol(piece),
            orientations.len()
        ));
        if let Some(first) = orientations.first() {
            output.push_str(&report::format_orientation(first.cells()));
        }
        output.push('\n');
    }
    Ok(output)
}
