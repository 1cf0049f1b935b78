//! 3D visualization of packings using kiss3d.

use kiss3d::prelude::*;
use rustc_hash::FxHashMap;

use pentominoes::Field;

/// Returns the display color for a piece index.
///
/// Hues step by the golden angle so neighbouring indices stay distinct for
/// any number of pieces.
fn piece_color(piece_index: usize) -> Color {
    const GOLDEN_ANGLE: f32 = 0.381_966;
    let hue = (piece_index as f32 * GOLDEN_ANGLE).fract() * 6.0;
    let falling = 1.0 - hue.fract();
    let rising = hue.fract();
    // saturated, slightly lightened
    let (r, g, b) = match hue as u32 {
        0 => (1.0, rising, 0.0),
        1 => (falling, 1.0, 0.0),
        2 => (0.0, 1.0, rising),
        3 => (0.0, falling, 1.0),
        4 => (rising, 0.0, 1.0),
        _ => (1.0, 0.0, falling),
    };
    Color::new(0.2 + 0.8 * r, 0.2 + 0.8 * g, 0.2 + 0.8 * b, 1.0)
}

/// Represents a rendered cube in the 3D scene.
struct RenderedCube {
    node: SceneNode3d,
    /// The cube's position when not exploded.
    base_position: Vec3,
    piece_index: usize,
}

/// Builds the 3D scene for one packing.
///
/// Field `x` maps to world X, `y` to Y and `z` to Z, with the field
/// centered on the origin.
///
/// Returns the rendered cubes and each piece's centroid for the explosion
/// animation.
fn build_scene(scene: &mut SceneNode3d, field: &Field) -> (Vec<RenderedCube>, FxHashMap<usize, Vec3>) {
    /// Size of each rendered cube (slightly smaller than 1.0 for visible gaps).
    const CUBE_SIZE: f32 = 0.9;

    let dims = field.dims();
    let center = field_center(field);

    let mut sums: FxHashMap<usize, (Vec3, f32)> = FxHashMap::default();
    let mut rendered_cubes = Vec::with_capacity(dims.cell_count());

    for (x, y, z) in field.interior() {
        let Some(piece_index) = field.cell((x, y, z)).piece() else {
            continue;
        };
        let position = Vec3::new(x as f32, y as f32, z as f32);
        let entry = sums.entry(piece_index).or_insert((Vec3::ZERO, 0.0));
        entry.0 += position;
        entry.1 += 1.0;

        let base_position = position - center;
        let node = scene
            .add_cube(CUBE_SIZE, CUBE_SIZE, CUBE_SIZE)
            .set_color(piece_color(piece_index))
            .set_position(base_position);
        rendered_cubes.push(RenderedCube {
            node,
            base_position,
            piece_index,
        });
    }

    let piece_centroids = sums
        .into_iter()
        .map(|(piece, (sum, count))| (piece, sum / count))
        .collect();

    (rendered_cubes, piece_centroids)
}

fn field_center(field: &Field) -> Vec3 {
    let dims = field.dims();
    Vec3::new(
        (dims.x as f32 - 1.0) / 2.0,
        (dims.y as f32 - 1.0) / 2.0,
        (dims.z as f32 - 1.0) / 2.0,
    )
}

/// Displays packings in an interactive 3D viewer.
pub fn display(fields: Vec<Field>) {
    pollster::block_on(display_async(fields));
}

async fn display_async(fields: Vec<Field>) {
    if fields.is_empty() {
        println!("No solutions to display");
        return;
    }

    let num_solutions = fields.len();
    let mut current_solution_index = 0;

    let mut window = Window::new(&format!(
        "Solution 1/{} - [Left/Right] navigate, [Up/Down] explode, [R] reset",
        num_solutions
    ))
    .await;

    let largest_axis = fields[0].dims().x.max(fields[0].dims().y).max(fields[0].dims().z);
    let mut camera = OrbitCamera3d::default();
    camera.set_dist(largest_axis as f32 * 2.5);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(10.0, 10.0, 10.0));

    let (mut rendered_cubes, mut piece_centroids) =
        build_scene(&mut scene, &fields[current_solution_index]);
    let mut center = field_center(&fields[current_solution_index]);

    // how much to expand pieces outward (0.0 = compact, higher = more exploded)
    let mut explosion_amount: f32 = 0.0;
    const EXPLOSION_SPEED: f32 = 0.05;
    let mut needs_rebuild = false;

    loop {
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                if action == Action::Press {
                    match key {
                        Key::Up => explosion_amount += EXPLOSION_SPEED,
                        Key::Down => {
                            explosion_amount = (explosion_amount - EXPLOSION_SPEED).max(0.0)
                        }
                        Key::R => explosion_amount = 0.0,
                        Key::Right => {
                            current_solution_index = (current_solution_index + 1) % num_solutions;
                            needs_rebuild = true;
                        }
                        Key::Left => {
                            current_solution_index = current_solution_index
                                .checked_sub(1)
                                .unwrap_or(num_solutions - 1);
                            needs_rebuild = true;
                        }
                        _ => {}
                    }
                }
            }
        }

        if needs_rebuild {
            for mut cube in rendered_cubes.drain(..) {
                cube.node.remove();
            }
            let field = &fields[current_solution_index];
            (rendered_cubes, piece_centroids) = build_scene(&mut scene, field);
            center = field_center(field);
            window.set_title(&format!(
                "Solution {}/{} - [Left/Right] navigate, [Up/Down] explode, [R] reset",
                current_solution_index + 1,
                num_solutions
            ));
            needs_rebuild = false;
        }

        for cube in &mut rendered_cubes {
            let Some(&centroid) = piece_centroids.get(&cube.piece_index) else {
                continue;
            };
            let explosion_direction = (centroid - center).normalize_or_zero();
            cube.node.set_position(
                cube.base_position + explosion_direction * explosion_amount * 2.0,
            );
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
