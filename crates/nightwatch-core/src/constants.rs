//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Perception ---

/// Default sight range (meters).
pub const DEFAULT_VIEW_RANGE: f32 = 6.0;

/// Default half-angle of the view cone (degrees).
pub const DEFAULT_FOV_HALF_ANGLE_DEG: f32 = 45.0;

/// Default hearing radius (meters).
pub const DEFAULT_HEARING_RANGE: f32 = 4.0;

/// Default number of rays in the visibility fan.
pub const DEFAULT_RAY_COUNT: usize = 20;

/// Minimum rays needed to span a cone (both edges).
pub const MIN_RAY_COUNT: usize = 2;

/// Layer bit used by blocking level geometry.
pub const OBSTACLE_LAYER: u32 = 1 << 0;

/// Rate at which the displayed view cone tint eases toward its target (per second).
pub const TINT_EASE_RATE: f32 = 5.0;

// --- Patrol controller ---

/// Default hold time in Alert before investigating (seconds).
pub const DEFAULT_ALERT_TIME: f32 = 2.0;

/// Default wait time at the investigated location (seconds).
pub const DEFAULT_INVESTIGATE_TIME: f32 = 3.0;

/// Leftover wait time treated as expired (seconds). Absorbs f32 drift from
/// summing a fixed timestep.
pub const TIMER_EPSILON: f32 = 1e-5;

/// Speed fraction kept while facing away from the steering direction.
pub const DEFAULT_MIN_SPEED_FACTOR: f32 = 0.1;

/// Angular frequency of the capture head swing (radians per second).
pub const CAPTURE_SWING_RATE: f32 = 5.0;

/// Amplitude of the capture head swing (degrees).
pub const CAPTURE_SWING_AMPLITUDE_DEG: f32 = 20.0;

/// Per-tick interpolation factor toward the capture orientation.
pub const CAPTURE_TURN_BLEND: f32 = 0.1;

// --- Navigation ---

/// Default drone cruise speed (m/s).
pub const DEFAULT_AGENT_SPEED: f32 = 3.5;

/// Default arrival tolerance (meters).
pub const DEFAULT_STOPPING_DISTANCE: f32 = 0.5;

/// Default turn rate (degrees per second).
pub const DEFAULT_ANGULAR_SPEED: f32 = 120.0;

// --- Player ---

/// Default walking speed (m/s).
pub const DEFAULT_WALK_SPEED: f32 = 2.0;

/// Default running speed (m/s).
pub const DEFAULT_RUN_SPEED: f32 = 4.5;

/// Default player turn rate (degrees per second).
pub const DEFAULT_TURN_SPEED: f32 = 720.0;

/// Guard-to-player distance that counts as contact (meters).
pub const CONTACT_RADIUS: f32 = 0.6;

// --- Level ---

/// Height of guard sensors and the player's sampled position above the floor (meters).
pub const EYE_HEIGHT: f32 = 1.0;

/// Default radius of the exit zone (meters).
pub const DEFAULT_GOAL_RADIUS: f32 = 1.0;
