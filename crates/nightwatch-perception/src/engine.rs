//! Per-agent perception engine.
//!
//! Each tick, in order:
//! 1. cast the visibility fan (presentation),
//! 2. test sight against the target with a direct ray,
//! 3. test hearing (only if sight failed),
//! 4. ease the displayed tint toward the requested attention color.
//!
//! `confirmed_target` and `suspected_target` are rebuilt from false every
//! tick. Only `last_known_position` carries over between ticks.

use glam::Vec3;

use nightwatch_core::config::PerceptionConfig;
use nightwatch_core::constants::TINT_EASE_RATE;
use nightwatch_core::error::ConfigResult;
use nightwatch_core::types::Color;

use crate::query::{LayerMask, SpatialQuery};
use crate::view_cone::{cast_fan, ConeRay, FanSpec};

/// Hits closer than this to the target distance count as the target itself.
const SIGHT_HIT_TOLERANCE: f32 = 1e-4;

/// Target state sampled for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSample {
    pub position: Vec3,
    /// Target is in a fast, noisy movement mode.
    pub loud: bool,
}

/// Everything perception needs for one tick.
#[derive(Debug, Clone, Copy)]
pub struct PerceptionInput {
    /// Eye position of the agent.
    pub position: Vec3,
    /// Agent facing direction (need not be normalized).
    pub facing: Vec3,
    /// `None` when the target collaborator had no data this tick.
    pub target: Option<TargetSample>,
}

/// Signals read by the state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PerceptionReadout {
    pub confirmed_target: bool,
    pub suspected_target: bool,
    pub last_known_position: Option<Vec3>,
}

#[derive(Debug, Clone)]
pub struct PerceptionEngine {
    config: PerceptionConfig,
    fov_half_angle: f32,
    /// cos(fov_half_angle), compared against normalized dot products.
    view_threshold: f32,
    layers: LayerMask,
    cone: Vec<ConeRay>,
    confirmed_target: bool,
    suspected_target: bool,
    last_known_position: Option<Vec3>,
    attention_color: Color,
    displayed_tint: Color,
}

impl PerceptionEngine {
    /// Build an engine from validated configuration.
    pub fn new(config: PerceptionConfig) -> ConfigResult<Self> {
        config.validate()?;
        let fov_half_angle = config.fov_half_angle();
        Ok(Self {
            fov_half_angle,
            view_threshold: fov_half_angle.cos(),
            layers: LayerMask(config.obstacle_mask),
            cone: Vec::with_capacity(config.ray_count),
            confirmed_target: false,
            suspected_target: false,
            last_known_position: None,
            attention_color: Color::default(),
            displayed_tint: Color::default(),
            config,
        })
    }

    /// Start with `color` both requested and displayed.
    pub fn with_attention_color(mut self, color: Color) -> Self {
        self.attention_color = color;
        self.displayed_tint = color;
        self
    }

    pub fn config(&self) -> &PerceptionConfig {
        &self.config
    }

    pub fn view_threshold(&self) -> f32 {
        self.view_threshold
    }

    /// Rays from the latest `compute_visibility`, left edge first.
    pub fn cone(&self) -> &[ConeRay] {
        &self.cone
    }

    pub fn confirmed_target(&self) -> bool {
        self.confirmed_target
    }

    pub fn suspected_target(&self) -> bool {
        self.suspected_target
    }

    pub fn last_known_position(&self) -> Option<Vec3> {
        self.last_known_position
    }

    /// Requested attention color.
    pub fn attention_color(&self) -> Color {
        self.attention_color
    }

    /// Tint currently shown on the view cone.
    pub fn displayed_tint(&self) -> Color {
        self.displayed_tint
    }

    pub fn readout(&self) -> PerceptionReadout {
        PerceptionReadout {
            confirmed_target: self.confirmed_target,
            suspected_target: self.suspected_target,
            last_known_position: self.last_known_position,
        }
    }

    /// Run the full perception pass for one tick.
    pub fn update(&mut self, input: &PerceptionInput, query: &dyn SpatialQuery, dt: f32) {
        self.compute_visibility(input.position, input.facing, query);
        self.test_sight(
            input.position,
            input.facing,
            input.target.map(|t| t.position),
            query,
        );
        self.test_hearing(input.position, input.target);
        self.ease_tint(dt);
    }

    /// Recast the visibility fan from `origin` along `facing`.
    pub fn compute_visibility(&mut self, origin: Vec3, facing: Vec3, query: &dyn SpatialQuery) {
        let fan = FanSpec {
            origin,
            facing,
            fov_half_angle: self.fov_half_angle,
            view_range: self.config.view_range,
            ray_count: self.config.ray_count,
            layers: self.layers,
        };
        if let Err(err) = cast_fan(&fan, query, &mut self.cone) {
            // Unreachable with a validated config.
            log::warn!("view cone not cast: {err}");
            self.cone.clear();
        }
    }

    /// Sight test. Sets `confirmed_target` and, on success, the last known position.
    ///
    /// The target is seen iff it is within view range, inside the cone
    /// (`dot >= cos(half_angle)`, inclusive) and a direct ray reaches it
    /// unobstructed. Degenerate vectors and failed queries are "not seen".
    pub fn test_sight(
        &mut self,
        origin: Vec3,
        facing: Vec3,
        target_position: Option<Vec3>,
        query: &dyn SpatialQuery,
    ) -> bool {
        self.confirmed_target = false;

        let Some(target) = target_position else {
            return false;
        };

        let to_target = target - origin;
        let distance = to_target.length();
        if !distance.is_finite() || distance <= f32::EPSILON {
            return false;
        }
        if distance > self.config.view_range {
            return false;
        }

        let forward = facing.normalize_or_zero();
        if forward == Vec3::ZERO {
            return false;
        }
        let direction = to_target / distance;
        if forward.dot(direction) < self.view_threshold {
            return false;
        }

        match query.raycast(origin, direction, distance, self.layers) {
            Ok(Some(hit)) if hit + SIGHT_HIT_TOLERANCE < distance => return false,
            Ok(_) => {}
            Err(err) => {
                log::trace!("sight ray failed: {err}");
                return false;
            }
        }

        self.confirmed_target = true;
        self.last_known_position = Some(target);
        true
    }

    /// Hearing test. Sets `suspected_target`; a successful hearing check also
    /// records the target position.
    pub fn test_hearing(&mut self, origin: Vec3, target: Option<TargetSample>) -> bool {
        self.suspected_target = false;

        // Sight subsumes hearing.
        if self.confirmed_target {
            self.suspected_target = true;
            return true;
        }

        let Some(target) = target else {
            return false;
        };

        let distance = (target.position - origin).length();
        if !distance.is_finite() || distance > self.config.hearing_range {
            return false;
        }
        if !target.loud {
            return false;
        }

        self.last_known_position = Some(target.position);
        self.suspected_target = true;
        true
    }

    pub fn set_attention_color(&mut self, color: Color) {
        self.attention_color = color;
    }

    /// Ease the displayed tint toward the attention color.
    pub fn ease_tint(&mut self, dt: f32) {
        self.displayed_tint = self
            .displayed_tint
            .lerp(self.attention_color, dt * TINT_EASE_RATE);
    }
}
