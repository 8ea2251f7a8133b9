#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::config::*;
    use crate::constants::*;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::{AgentEvent, LevelEvent};
    use crate::types::*;

    #[test]
    fn test_default_configs_are_valid() {
        assert!(PerceptionConfig::default().validate().is_ok());
        assert!(ControllerConfig::default().validate().is_ok());
        assert!(NavigatorConfig::default().validate().is_ok());
        assert!(PlayerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_ray_count_below_two_rejected() {
        for count in [0, 1] {
            let config = PerceptionConfig {
                ray_count: count,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::InvalidRayCount(count)));
        }
        let two = PerceptionConfig {
            ray_count: 2,
            ..Default::default()
        };
        assert!(two.validate().is_ok(), "Two rays span both cone edges");
    }

    #[test]
    fn test_negative_ranges_rejected() {
        let config = PerceptionConfig {
            view_range: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeRange {
                name: "view_range",
                ..
            })
        ));

        let config = PerceptionConfig {
            hearing_range: -0.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeRange {
                name: "hearing_range",
                ..
            })
        ));

        let zero = PerceptionConfig {
            view_range: 0.0,
            hearing_range: 0.0,
            ..Default::default()
        };
        assert!(zero.validate().is_ok(), "Zero ranges are allowed");
    }

    #[test]
    fn test_non_finite_range_rejected() {
        let config = PerceptionConfig {
            view_range: f32::NAN,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite { name: "view_range" })
        );
    }

    #[test]
    fn test_fov_bounds() {
        let at = |deg: f32| PerceptionConfig {
            fov_half_angle_deg: deg,
            ..Default::default()
        };
        assert_eq!(at(0.0).validate(), Err(ConfigError::InvalidFov(0.0)));
        assert_eq!(at(-10.0).validate(), Err(ConfigError::InvalidFov(-10.0)));
        assert_eq!(at(180.5).validate(), Err(ConfigError::InvalidFov(180.5)));
        assert!(at(180.0).validate().is_ok());
        assert!(at(0.01).validate().is_ok());
    }

    #[test]
    fn test_controller_speed_floor_bounds() {
        let config = ControllerConfig {
            min_speed_factor: 1.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidSpeedFloor(1.5)));

        let config = ControllerConfig {
            alert_time: -2.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_backfills_defaults() {
        let config: PerceptionConfig = serde_json::from_str(r#"{ "view_range": 9.0 }"#).unwrap();
        assert_eq!(config.view_range, 9.0);
        assert_eq!(config.ray_count, DEFAULT_RAY_COUNT);
        assert_eq!(config.fov_half_angle_deg, DEFAULT_FOV_HALF_ANGLE_DEG);
        assert_eq!(config.obstacle_mask, OBSTACLE_LAYER);

        let controller: ControllerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(controller, ControllerConfig::default());
    }

    #[test]
    fn test_color_lerp_clamps() {
        let a = Color::rgba(0.0, 0.0, 0.0, 0.0);
        let b = Color::rgba(1.0, 0.5, 0.0, 1.0);
        let mid = a.lerp(b, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert!((mid.g - 0.25).abs() < 1e-6);
        assert_eq!(a.lerp(b, 2.0), b, "t above 1 must not overshoot");
        assert_eq!(a.lerp(b, -1.0), a);
    }

    #[test]
    fn test_pose_forward_and_yaw() {
        let pose = Pose::default();
        assert!((pose.forward() - Vec3::Z).length() < 1e-6);

        let right = Pose::from_yaw(Vec3::ZERO, std::f32::consts::FRAC_PI_2);
        assert!(
            (right.forward() - Vec3::X).length() < 1e-5,
            "Positive yaw turns +Z toward +X, got {:?}",
            right.forward()
        );
        assert!((right.yaw() - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_look_rotation() {
        let rot = look_rotation(Vec3::new(-3.0, 0.0, 0.0)).unwrap();
        assert!((rot * Vec3::Z - Vec3::NEG_X).length() < 1e-5);

        let up = look_rotation(Vec3::new(0.0, 1.0, 1.0)).unwrap();
        assert!((up * Vec3::Z - Vec3::new(0.0, 1.0, 1.0).normalize()).length() < 1e-5);

        assert!(look_rotation(Vec3::ZERO).is_none());
        assert!(look_rotation(Vec3::Y).is_none());
    }

    #[test]
    fn test_sim_time_one_second() {
        let mut time = SimTime::default();
        for _ in 0..TICK_RATE {
            time.advance();
        }
        assert_eq!(time.tick, TICK_RATE as u64);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_running_is_loud() {
        assert!(MovementMode::Running.is_loud());
        assert!(!MovementMode::Walking.is_loud());
    }

    #[test]
    fn test_level_event_json_shape() {
        let event = LevelEvent::Guard {
            guard: 2,
            event: AgentEvent::StateChanged {
                from: BehaviorState::Patrol,
                to: BehaviorState::Alert,
            },
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"Guard""#), "{json}");
        assert!(json.contains(r#""to":"Alert""#), "{json}");
        let back: LevelEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
