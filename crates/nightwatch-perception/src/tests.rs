#[cfg(test)]
mod tests {
    use glam::Vec3;

    use nightwatch_core::config::PerceptionConfig;
    use nightwatch_core::error::ConfigError;
    use nightwatch_core::types::Color;

    use crate::engine::{PerceptionEngine, PerceptionInput, TargetSample};
    use crate::query::{LayerMask, OpenSpace, QueryFailure, SpatialQuery};
    use crate::view_cone::{cast_fan, FanSpec, RayStatus};

    /// Round pillars on the obstacle layer.
    struct Pillars(Vec<(Vec3, f32)>);

    impl SpatialQuery for Pillars {
        fn raycast(
            &self,
            origin: Vec3,
            direction: Vec3,
            max_distance: f32,
            layers: LayerMask,
        ) -> Result<Option<f32>, QueryFailure> {
            let dir = direction.normalize_or_zero();
            if dir == Vec3::ZERO {
                return Err(QueryFailure::DegenerateRay);
            }
            if !layers.intersects(LayerMask::OBSTACLE) {
                return Ok(None);
            }
            let mut nearest: Option<f32> = None;
            for &(center, radius) in &self.0 {
                let oc = origin - center;
                let b = oc.dot(dir);
                let c = oc.length_squared() - radius * radius;
                let disc = b * b - c;
                if disc < 0.0 {
                    continue;
                }
                let t = if c <= 0.0 { 0.0 } else { -b - disc.sqrt() };
                if t >= 0.0 && t <= max_distance {
                    nearest = Some(nearest.map_or(t, |n: f32| n.min(t)));
                }
            }
            Ok(nearest)
        }
    }

    struct Broken;

    impl SpatialQuery for Broken {
        fn raycast(&self, _: Vec3, _: Vec3, _: f32, _: LayerMask) -> Result<Option<f32>, QueryFailure> {
            Err(QueryFailure::Unavailable)
        }
    }

    fn make_engine() -> PerceptionEngine {
        PerceptionEngine::new(PerceptionConfig {
            view_range: 6.0,
            fov_half_angle_deg: 45.0,
            hearing_range: 4.0,
            ray_count: 9,
            ..Default::default()
        })
        .unwrap()
    }

    fn input(target: Vec3, loud: bool) -> PerceptionInput {
        PerceptionInput {
            position: Vec3::ZERO,
            facing: Vec3::Z,
            target: Some(TargetSample {
                position: target,
                loud,
            }),
        }
    }

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_threshold_is_cosine_of_half_angle() {
        for deg in [1.0_f32, 30.0, 45.0, 90.0, 135.0, 180.0] {
            let engine = PerceptionEngine::new(PerceptionConfig {
                fov_half_angle_deg: deg,
                ..Default::default()
            })
            .unwrap();
            assert_eq!(engine.view_threshold(), deg.to_radians().cos());
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = PerceptionEngine::new(PerceptionConfig {
            ray_count: 1,
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidRayCount(1));
    }

    #[test]
    fn test_sees_target_ahead() {
        let mut engine = make_engine();
        let target = Vec3::new(0.5, 0.0, 4.0);
        engine.update(&input(target, false), &OpenSpace, DT);
        assert!(engine.confirmed_target());
        assert!(engine.suspected_target(), "Confirmed implies suspected");
        assert_eq!(engine.last_known_position(), Some(target));
    }

    #[test]
    fn test_target_beyond_view_range_not_seen() {
        let mut engine = make_engine();
        engine.update(&input(Vec3::new(0.0, 0.0, 6.5), false), &OpenSpace, DT);
        assert!(!engine.confirmed_target());
        assert!(!engine.suspected_target(), "Quiet target out of hearing range");
        assert_eq!(engine.last_known_position(), None);

        // Exactly at range is inside.
        engine.update(&input(Vec3::new(0.0, 0.0, 6.0), false), &OpenSpace, DT);
        assert!(engine.confirmed_target());
    }

    #[test]
    fn test_target_outside_cone_not_seen() {
        let mut engine = make_engine();
        // 60 degrees off-axis with a 45 degree half-angle
        let off_axis = Vec3::new(60f32.to_radians().sin(), 0.0, 60f32.to_radians().cos()) * 3.0;
        engine.update(&input(off_axis, false), &OpenSpace, DT);
        assert!(!engine.confirmed_target());

        let behind = Vec3::new(0.0, 0.0, -2.0);
        engine.update(&input(behind, false), &OpenSpace, DT);
        assert!(!engine.confirmed_target());
    }

    #[test]
    fn test_cone_boundary_is_inclusive() {
        let mut engine = PerceptionEngine::new(PerceptionConfig {
            fov_half_angle_deg: 90.0,
            ..Default::default()
        })
        .unwrap();
        // Exactly perpendicular: dot = 0, threshold = cos(90deg) <= 0
        engine.update(&input(Vec3::new(3.0, 0.0, 0.0), false), &OpenSpace, DT);
        assert!(
            engine.confirmed_target(),
            "Target on the cone edge must be visible (threshold {})",
            engine.view_threshold()
        );
    }

    #[test]
    fn test_full_circle_sees_behind() {
        let mut engine = PerceptionEngine::new(PerceptionConfig {
            fov_half_angle_deg: 180.0,
            ..Default::default()
        })
        .unwrap();
        engine.update(&input(Vec3::new(0.0, 0.0, -3.0), false), &OpenSpace, DT);
        assert!(engine.confirmed_target());
    }

    #[test]
    fn test_obstacle_blocks_sight() {
        let mut engine = make_engine();
        let wall = Pillars(vec![(Vec3::new(0.0, 0.0, 2.0), 0.5)]);
        engine.update(&input(Vec3::new(0.0, 0.0, 4.0), false), &wall, DT);
        assert!(!engine.confirmed_target(), "Pillar between agent and target");

        let behind_target = Pillars(vec![(Vec3::new(0.0, 0.0, 5.0), 0.5)]);
        engine.update(&input(Vec3::new(0.0, 0.0, 4.0), false), &behind_target, DT);
        assert!(engine.confirmed_target(), "Pillar behind the target does not block");
    }

    #[test]
    fn test_degenerate_vectors_not_visible() {
        let mut engine = make_engine();
        engine.update(&input(Vec3::ZERO, true), &OpenSpace, DT);
        assert!(!engine.confirmed_target(), "Target on top of agent");

        let zero_facing = PerceptionInput {
            position: Vec3::ZERO,
            facing: Vec3::ZERO,
            target: Some(TargetSample {
                position: Vec3::new(0.0, 0.0, 2.0),
                loud: false,
            }),
        };
        engine.update(&zero_facing, &OpenSpace, DT);
        assert!(!engine.confirmed_target(), "Zero facing");
        assert!(engine.cone().iter().all(|r| r.status == RayStatus::Unknown));
        assert!(engine.cone().iter().all(|r| r.distance.is_finite()));
    }

    #[test]
    fn test_query_failure_is_negative() {
        let mut engine = make_engine();
        engine.update(&input(Vec3::new(0.0, 0.0, 3.0), false), &Broken, DT);
        assert!(!engine.confirmed_target());
        assert!(!engine.suspected_target());
        assert_eq!(engine.cone().len(), 9);
        assert!(engine.cone().iter().all(|r| r.status == RayStatus::Unknown));
    }

    #[test]
    fn test_missing_target_sample() {
        let mut engine = make_engine();
        engine.update(&input(Vec3::new(0.0, 0.0, 3.0), false), &OpenSpace, DT);
        assert!(engine.confirmed_target());

        let no_target = PerceptionInput {
            position: Vec3::ZERO,
            facing: Vec3::Z,
            target: None,
        };
        engine.update(&no_target, &OpenSpace, DT);
        assert!(!engine.confirmed_target());
        assert!(!engine.suspected_target());
        assert_eq!(
            engine.last_known_position(),
            Some(Vec3::new(0.0, 0.0, 3.0)),
            "Last known position is sticky"
        );
    }

    #[test]
    fn test_hearing_loud_target_outside_cone() {
        let mut engine = make_engine();
        let behind = Vec3::new(0.0, 0.0, -3.0);
        engine.update(&input(behind, true), &OpenSpace, DT);
        assert!(!engine.confirmed_target());
        assert!(engine.suspected_target());
        assert_eq!(engine.last_known_position(), Some(behind));
    }

    #[test]
    fn test_hearing_requires_loud_and_range() {
        let mut engine = make_engine();
        engine.update(&input(Vec3::new(0.0, 0.0, -3.0), false), &OpenSpace, DT);
        assert!(!engine.suspected_target(), "Quiet target is not heard");
        assert_eq!(engine.last_known_position(), None);

        engine.update(&input(Vec3::new(0.0, 0.0, -4.5), true), &OpenSpace, DT);
        assert!(!engine.suspected_target(), "Loud target beyond hearing range");
        assert_eq!(engine.last_known_position(), None);
    }

    #[test]
    fn test_hearing_ignores_walls() {
        let mut engine = make_engine();
        let wall = Pillars(vec![(Vec3::new(0.0, 0.0, -1.5), 0.5)]);
        engine.update(&input(Vec3::new(0.0, 0.0, -3.0), true), &wall, DT);
        assert!(engine.suspected_target());
    }

    #[test]
    fn test_signals_not_sticky() {
        let mut engine = make_engine();
        let seen_at = Vec3::new(0.0, 0.0, 3.0);
        engine.update(&input(seen_at, false), &OpenSpace, DT);
        assert!(engine.confirmed_target());

        let wall = Pillars(vec![(Vec3::new(0.0, 0.0, 1.5), 0.5)]);
        engine.update(&input(Vec3::new(0.0, 0.0, 3.2), false), &wall, DT);
        assert!(!engine.confirmed_target());
        assert!(!engine.suspected_target());
        assert_eq!(engine.last_known_position(), Some(seen_at));
    }

    #[test]
    fn test_confirmed_implies_suspected_everywhere() {
        let mut engine = make_engine();
        let wall = Pillars(vec![(Vec3::new(1.0, 0.0, 2.0), 0.4)]);
        for ix in -8..=8 {
            for iz in -8..=8 {
                let target = Vec3::new(ix as f32 * 0.75, 0.0, iz as f32 * 0.75);
                for loud in [false, true] {
                    engine.update(&input(target, loud), &wall, DT);
                    if engine.confirmed_target() {
                        assert!(engine.suspected_target(), "Violated at {target:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_fan_angles_and_clipping() {
        let wall = Pillars(vec![(Vec3::new(0.0, 0.0, 3.0), 0.5)]);
        let fan = FanSpec {
            origin: Vec3::ZERO,
            facing: Vec3::Z,
            fov_half_angle: 45f32.to_radians(),
            view_range: 6.0,
            ray_count: 5,
            layers: LayerMask::OBSTACLE,
        };
        let mut rays = Vec::new();
        cast_fan(&fan, &wall, &mut rays).unwrap();

        assert_eq!(rays.len(), 5);
        assert!((rays[0].local_angle + 45f32.to_radians()).abs() < 1e-6, "First ray is the left edge");
        assert!((rays[4].local_angle - 45f32.to_radians()).abs() < 1e-6, "Last ray is the right edge");
        assert!(rays[2].local_angle.abs() < 1e-6);

        assert_eq!(rays[2].status, RayStatus::Blocked);
        assert!((rays[2].distance - 2.5).abs() < 1e-4, "Center ray stops at pillar: {}", rays[2].distance);
        assert_eq!(rays[0].status, RayStatus::Clear);
        assert_eq!(rays[0].distance, 6.0);

        // Right-edge ray points toward +X.
        assert!(rays[4].direction.x > 0.0);
        let tip = rays[2].local_endpoint();
        assert!((tip - Vec3::new(0.0, 0.0, 2.5)).length() < 1e-4);
    }

    #[test]
    fn test_fan_follows_facing() {
        let fan = FanSpec {
            origin: Vec3::ZERO,
            facing: Vec3::new(-2.0, 0.0, 0.0),
            fov_half_angle: 30f32.to_radians(),
            view_range: 5.0,
            ray_count: 3,
            layers: LayerMask::OBSTACLE,
        };
        let mut rays = Vec::new();
        cast_fan(&fan, &OpenSpace, &mut rays).unwrap();
        assert!((rays[1].direction - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_fan_rejects_single_ray() {
        let fan = FanSpec {
            origin: Vec3::ZERO,
            facing: Vec3::Z,
            fov_half_angle: 1.0,
            view_range: 5.0,
            ray_count: 1,
            layers: LayerMask::OBSTACLE,
        };
        let mut rays = Vec::new();
        assert_eq!(
            cast_fan(&fan, &OpenSpace, &mut rays),
            Err(ConfigError::InvalidRayCount(1))
        );
    }

    #[test]
    fn test_layer_filter_ignored_geometry() {
        let mut engine = PerceptionEngine::new(PerceptionConfig {
            obstacle_mask: 0b10,
            ..Default::default()
        })
        .unwrap();
        let wall = Pillars(vec![(Vec3::new(0.0, 0.0, 2.0), 0.5)]);
        engine.update(&input(Vec3::new(0.0, 0.0, 4.0), false), &wall, DT);
        assert!(engine.confirmed_target(), "Pillars are not on layer 2");
    }

    #[test]
    fn test_tint_eases_toward_attention_color() {
        let start = Color::rgba(0.0, 0.0, 0.0, 1.0);
        let goal = Color::rgba(1.0, 0.0, 0.0, 1.0);
        let mut engine = make_engine().with_attention_color(start);
        engine.set_attention_color(goal);
        assert_eq!(engine.attention_color(), goal);
        assert_eq!(engine.displayed_tint(), start, "Setter does not snap the tint");

        engine.ease_tint(DT);
        let first = engine.displayed_tint().r;
        assert!(first > 0.0 && first < 1.0);

        for _ in 0..120 {
            engine.ease_tint(DT);
        }
        assert!(engine.displayed_tint().r > 0.99);
        assert!(engine.displayed_tint().r <= 1.0);
    }
}
