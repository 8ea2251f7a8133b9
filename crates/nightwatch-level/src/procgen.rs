//! Seeded layout generator.
//!
//! Scatters pillars on a grid, lays rectangular patrol loops for the guards,
//! and puts the player spawn and the exit at opposite corners. The same seed
//! and parameters always give the same layout.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use nightwatch_core::constants::DEFAULT_GOAL_RADIUS;

use crate::layout::{GoalZone, GuardSpawn, LevelLayout, PlayerSpawn};
use crate::obstacles::Obstacle;

/// Distance from the walls for spawns and the exit.
const CORNER_INSET: f32 = 1.5;

/// Pillars never land this close to the player spawn or the exit.
const CLEARANCE: f32 = 2.5;

/// Guard loops are re-rolled if centered closer than this to the player.
const GUARD_SPAWN_CLEARANCE: f32 = 6.0;

const MAX_GUARD_ATTEMPTS: usize = 16;

#[derive(Debug, Clone)]
pub struct GenParams {
    /// Extent along X (meters).
    pub width: f32,
    /// Extent along Z (meters).
    pub depth: f32,
    pub guards: usize,
    /// Grid pitch of candidate pillar sites.
    pub pillar_spacing: f32,
    /// Probability that a site gets a pillar.
    pub pillar_chance: f64,
    pub pillar_height: f32,
    /// Half extents range of the rectangular patrol loops.
    pub loop_half_extent: (f32, f32),
}

impl Default for GenParams {
    fn default() -> Self {
        Self {
            width: 24.0,
            depth: 24.0,
            guards: 3,
            pillar_spacing: 4.0,
            pillar_chance: 0.35,
            pillar_height: 2.0,
            loop_half_extent: (1.5, 3.5),
        }
    }
}

/// Generate a layout for `seed`.
pub fn generate(seed: u64, params: &GenParams) -> LevelLayout {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let player_spawn = Vec3::new(CORNER_INSET, 0.0, CORNER_INSET);
    let goal_center = Vec3::new(
        (params.width - CORNER_INSET).max(CORNER_INSET),
        0.0,
        (params.depth - CORNER_INSET).max(CORNER_INSET),
    );

    let obstacles = scatter_pillars(&mut rng, params, &[player_spawn, goal_center]);
    let guards = (0..params.guards)
        .map(|_| lay_patrol_loop(&mut rng, params, player_spawn))
        .collect();

    LevelLayout {
        name: format!("generated-{seed}"),
        obstacles,
        player: PlayerSpawn {
            position: player_spawn,
            yaw_deg: 45.0,
            config: Default::default(),
        },
        guards,
        goal: Some(GoalZone {
            center: goal_center,
            radius: DEFAULT_GOAL_RADIUS,
        }),
    }
}

fn scatter_pillars(rng: &mut ChaCha8Rng, params: &GenParams, keep_clear: &[Vec3]) -> Vec<Obstacle> {
    let mut pillars = Vec::new();
    if params.pillar_spacing <= 0.0 {
        return pillars;
    }

    let cols = (params.width / params.pillar_spacing).floor() as usize;
    let rows = (params.depth / params.pillar_spacing).floor() as usize;
    let max_half = (params.pillar_spacing * 0.25).max(0.3);

    for row in 0..rows {
        for col in 0..cols {
            let center = Vec3::new(
                (col as f32 + 0.5) * params.pillar_spacing,
                0.0,
                (row as f32 + 0.5) * params.pillar_spacing,
            );
            // Roll for every site so the sequence does not depend on clearance.
            let roll: f64 = rng.gen();
            let half = rng.gen_range(0.3..=max_half);
            if roll >= params.pillar_chance {
                continue;
            }
            if keep_clear.iter().any(|p| p.distance(center) < CLEARANCE + half) {
                continue;
            }
            pillars.push(Obstacle::pillar(center, half, params.pillar_height));
        }
    }
    pillars
}

fn lay_patrol_loop(rng: &mut ChaCha8Rng, params: &GenParams, player: Vec3) -> GuardSpawn {
    let (lo, hi) = params.loop_half_extent;
    let (lo, hi) = (lo.min(hi), hi.max(lo));

    let mut center = Vec3::ZERO;
    let mut half_x = lo;
    let mut half_z = lo;
    for _ in 0..MAX_GUARD_ATTEMPTS {
        half_x = rng.gen_range(lo..=hi);
        half_z = rng.gen_range(lo..=hi);
        center = Vec3::new(
            random_within(rng, params.width, half_x + CORNER_INSET),
            0.0,
            random_within(rng, params.depth, half_z + CORNER_INSET),
        );
        if center.distance(player) >= GUARD_SPAWN_CLEARANCE {
            break;
        }
    }

    // Clockwise seen from above.
    let waypoints = vec![
        center + Vec3::new(-half_x, 0.0, -half_z),
        center + Vec3::new(-half_x, 0.0, half_z),
        center + Vec3::new(half_x, 0.0, half_z),
        center + Vec3::new(half_x, 0.0, -half_z),
    ];

    GuardSpawn {
        position: waypoints[0],
        yaw_deg: rng.gen_range(0.0..360.0),
        waypoints,
        navigator: Default::default(),
        perception: Default::default(),
        controller: Default::default(),
    }
}

/// Uniform coordinate in `[margin, extent - margin]`, or the middle when the
/// extent is too small.
fn random_within(rng: &mut ChaCha8Rng, extent: f32, margin: f32) -> f32 {
    let (lo, hi) = (margin, extent - margin);
    if hi <= lo {
        return extent * 0.5;
    }
    rng.gen_range(lo..=hi)
}
