//! Collision probe
//!
//! Runs a handful of scripted scenes through the collision system and then a
//! randomized sweep checking that overlap results do not depend on argument
//! order. Pass a `.toml` or `.ron` file to override the default configuration:
//!
//! ```text
//! RUST_LOG=info collision_probe probe.toml
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shape_collision::prelude::*;

/// Shapes generated per sweep
const SWEEP_SHAPES: usize = 64;

/// Fixed seed so sweep failures can be replayed
const SWEEP_SEED: u64 = 0x5eed_c011;

#[derive(thiserror::Error, Debug)]
enum ProbeError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("collision: {0}")]
    Collision(#[from] CollisionError),

    #[error("{0} of {1} shape pairs disagreed when swapped")]
    Asymmetric(usize, usize),
}

fn main() {
    shape_collision::foundation::logging::init();

    if let Err(e) = run() {
        log::error!("Probe failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ProbeError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            CollisionConfig::load_from_file(&path)?
        }
        None => CollisionConfig::default(),
    };
    log::info!("Using {:?}", config);

    let system = CollisionSystem::new(config);
    run_scenes(&system)?;
    run_symmetry_sweep(&system)?;

    log::info!("All probes passed");
    Ok(())
}

struct Scene {
    name: &'static str,
    a: Shape,
    b: Shape,
}

fn scenes() -> Vec<Scene> {
    let square = Polygon::new(
        Vec2::new(0.0, 0.0),
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ],
    );

    vec![
        Scene {
            name: "touching circles",
            a: Circle::new(Vec2::new(0.0, 0.0), 5.0).into(),
            b: Circle::new(Vec2::new(8.0, 0.0), 3.0).into(),
        },
        Scene {
            name: "separated rectangles",
            a: Rectangle::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0)).into(),
            b: Rectangle::new(Vec2::new(11.0, 0.0), Vec2::new(5.0, 5.0)).into(),
        },
        Scene {
            name: "point on square edge",
            a: Shape::Point(Vec2::new(10.0, 5.0)),
            b: square.clone().into(),
        },
        Scene {
            name: "diamond against square",
            a: square.into(),
            b: Polygon::regular(Vec2::new(17.0, 5.0), 7.0, 4, 0.0).into(),
        },
        Scene {
            name: "line through circle",
            a: Line::new(Vec2::new(-10.0, 0.0), Vec2::new(10.0, 0.0)).into(),
            b: Circle::new(Vec2::new(0.0, 2.0), 3.0).into(),
        },
    ]
}

fn run_scenes(system: &CollisionSystem) -> Result<(), ProbeError> {
    for scene in scenes() {
        let hit = system.overlaps(&scene.a, &scene.b)?;
        log::info!(
            "{:<24} {} vs {}: {}",
            scene.name,
            scene.a.shape_kind(),
            scene.b.shape_kind(),
            if hit { "overlap" } else { "clear" }
        );
    }

    let targets: [Shape; 3] = [
        Circle::new(Vec2::new(30.0, 0.0), 4.0).into(),
        Rectangle::new(Vec2::new(10.0, -2.0), Vec2::new(4.0, 4.0)).into(),
        Line::new(Vec2::new(50.0, -5.0), Vec2::new(50.0, 5.0)).into(),
    ];
    let refs: Vec<&dyn CollisionShape> = targets.iter().map(|t| t as &dyn CollisionShape).collect();

    for hit in system.raycast_all(Vec2::zeros(), 0.0, &refs)? {
        log::info!(
            "ray hit {} at ({:.2}, {:.2}), distance {:.2}, surface {:.1} degrees",
            targets[hit.target].shape_kind(),
            hit.hit.position.x,
            hit.hit.position.y,
            hit.hit.distance,
            hit.hit.angle
        );
    }

    Ok(())
}

fn random_shape(rng: &mut StdRng) -> Shape {
    let position = Vec2::new(rng.gen_range(-40.0..40.0), rng.gen_range(-40.0..40.0));

    match rng.gen_range(0..5) {
        0 => Shape::Point(position),
        1 => {
            let heading: f32 = rng.gen_range(0.0..360.0);
            let length: f32 = rng.gen_range(1.0..30.0);
            let end = position + Vec2::new(heading.to_radians().cos(), heading.to_radians().sin()) * length;
            Line::new(position, end).into()
        }
        2 => Circle::new(position, rng.gen_range(0.5..15.0)).into(),
        3 => Rectangle::new(position, Vec2::new(rng.gen_range(1.0..20.0), rng.gen_range(1.0..20.0))).into(),
        _ => Polygon::regular(
            position,
            rng.gen_range(1.0..15.0),
            rng.gen_range(3..=8),
            rng.gen_range(0.0..360.0),
        )
        .into(),
    }
}

fn run_symmetry_sweep(system: &CollisionSystem) -> Result<(), ProbeError> {
    let mut rng = StdRng::seed_from_u64(SWEEP_SEED);
    let shapes: Vec<Shape> = (0..SWEEP_SHAPES).map(|_| random_shape(&mut rng)).collect();

    let mut pairs = 0;
    let mut overlapping = 0;
    let mut mismatches = 0;
    for (i, a) in shapes.iter().enumerate() {
        for b in &shapes[i + 1..] {
            let forward = system.overlaps(a, b)?;
            let backward = system.overlaps(b, a)?;
            pairs += 1;
            if forward {
                overlapping += 1;
            }
            if forward != backward {
                mismatches += 1;
                log::warn!("{:?} vs {:?}: {} one way, {} the other", a, b, forward, backward);
            }
        }
    }

    log::info!("Sweep: {} pairs, {} overlapping, {} asymmetric", pairs, overlapping, mismatches);
    if mismatches > 0 {
        return Err(ProbeError::Asymmetric(mismatches, pairs));
    }
    Ok(())
}
