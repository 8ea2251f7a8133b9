//! Patrol behavior finite state machine.
//!
//! One controller per agent. Each tick reads the perception signals, runs the
//! active state's update, and issues movement commands to the navigator.
//! Transitions depend only on "do I see it", "did I just hear it", and the
//! wait timer.

use glam::Vec3;

use nightwatch_core::config::ControllerConfig;
use nightwatch_core::constants::TIMER_EPSILON;
use nightwatch_core::enums::{AudioCue, BehaviorState};
use nightwatch_core::error::{check_non_negative, ConfigError, ConfigResult};
use nightwatch_core::events::AgentEvent;
use nightwatch_core::types::{Color, Pose};
use nightwatch_perception::PerceptionReadout;

use crate::collaborators::{AttentionHint, GameFlow, Navigator};
use crate::motion::{capture_rotation, planar_distance, shaped_speed};

/// Input to the controller for a single tick.
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    pub dt: f32,
    /// Level time, drives the capture swing.
    pub elapsed_secs: f32,
    pub perception: PerceptionReadout,
    /// Live target position, `None` if the target could not be sampled.
    pub target_position: Option<Vec3>,
}

#[derive(Debug, Clone)]
pub struct PatrolController {
    config: ControllerConfig,
    state: BehaviorState,
    waypoints: Vec<Vec3>,
    current_waypoint: usize,
    /// Seconds left in Alert/Investigate. Stored clamped at zero.
    wait_timer: f32,
    base_speed: f32,
    motor_running: bool,
}

impl PatrolController {
    /// Build a controller starting in Patrol toward the waypoint nearest `start`.
    pub fn new(
        config: ControllerConfig,
        waypoints: Vec<Vec3>,
        start: Vec3,
        base_speed: f32,
    ) -> ConfigResult<Self> {
        config.validate()?;
        check_non_negative("base_speed", base_speed)?;
        if waypoints.is_empty() {
            return Err(ConfigError::NoWaypoints);
        }
        if waypoints.iter().any(|w| !w.is_finite()) {
            return Err(ConfigError::NonFinite { name: "waypoint" });
        }

        let current_waypoint = nearest_waypoint(&waypoints, start);
        Ok(Self {
            config,
            state: BehaviorState::Patrol,
            waypoints,
            current_waypoint,
            wait_timer: 0.0,
            base_speed,
            motor_running: false,
        })
    }

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    pub fn current_waypoint(&self) -> usize {
        self.current_waypoint
    }

    pub fn wait_timer(&self) -> f32 {
        self.wait_timer
    }

    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// View cone tint for a freshly spawned agent.
    pub fn initial_color(&self) -> Color {
        self.config.normal_color
    }

    /// Advance the controller by one tick.
    ///
    /// Outside a playable phase the agent is halted and timers hold their
    /// values. The capture facing animation keeps running regardless.
    pub fn tick(
        &mut self,
        input: &TickInput,
        pose: &mut Pose,
        nav: &mut dyn Navigator,
        hint: &mut dyn AttentionHint,
        flow: &dyn GameFlow,
        events: &mut Vec<AgentEvent>,
    ) {
        if !flow.can_play() {
            self.set_speed(nav, 0.0, events);
            if self.state == BehaviorState::Capture {
                self.update_capture(input, pose, nav, hint);
            }
            return;
        }

        match self.state {
            BehaviorState::Patrol => self.update_patrol(input, pose, nav, hint, events),
            BehaviorState::Alert => self.update_alert(input, pose, nav, hint, events),
            BehaviorState::Investigate => self.update_investigate(input, pose, nav, events),
            BehaviorState::Pursuit => self.update_pursuit(input, nav, events),
            BehaviorState::Capture => self.update_capture(input, pose, nav, hint),
        }

        let speed = shaped_speed(
            self.base_speed,
            nav.steering_direction(),
            pose.forward(),
            self.config.min_speed_factor,
        );
        self.set_speed(nav, speed, events);
    }

    /// External contact with the target. Enters Capture and notifies the game
    /// flow exactly once. Ignored outside a playable phase.
    pub fn on_target_contact(&mut self, flow: &mut dyn GameFlow, events: &mut Vec<AgentEvent>) -> bool {
        if !flow.can_play() || self.state == BehaviorState::Capture {
            return false;
        }
        self.tint(self.config.pursuit_color, events);
        self.transition(BehaviorState::Capture, events);
        events.push(AgentEvent::TargetCaptured);
        flow.on_target_captured();
        true
    }

    fn update_patrol(
        &mut self,
        input: &TickInput,
        pose: &Pose,
        nav: &mut dyn Navigator,
        hint: &mut dyn AttentionHint,
        events: &mut Vec<AgentEvent>,
    ) {
        // Any detection, heard or seen, first puts the agent on alert.
        if input.perception.suspected_target {
            self.wait_timer = self.config.alert_time;
            hint.set_visible(true);
            self.transition(BehaviorState::Alert, events);
            return;
        }

        let waypoint = self.waypoints[self.current_waypoint];
        nav.set_destination(waypoint);

        if planar_distance(pose.position, waypoint) <= nav.stopping_distance() {
            self.current_waypoint = (self.current_waypoint + 1) % self.waypoints.len();
            nav.set_destination(self.waypoints[self.current_waypoint]);
        }
    }

    fn update_alert(
        &mut self,
        input: &TickInput,
        pose: &Pose,
        nav: &mut dyn Navigator,
        hint: &mut dyn AttentionHint,
        events: &mut Vec<AgentEvent>,
    ) {
        if input.perception.confirmed_target {
            nav.resume();
            hint.set_visible(false);
            self.enter_pursuit(events);
            return;
        }

        // Hold still and show the marker so the player gets a chance to run.
        nav.stop();
        hint.set_visible(true);
        hint.update_marker(pose.position);

        if self.count_down(input.dt) {
            nav.resume();
            hint.set_visible(false);
            self.tint(self.config.suspect_color, events);
            self.wait_timer = self.config.investigate_time;
            self.transition(BehaviorState::Investigate, events);
        }
    }

    fn update_investigate(
        &mut self,
        input: &TickInput,
        pose: &Pose,
        nav: &mut dyn Navigator,
        events: &mut Vec<AgentEvent>,
    ) {
        if input.perception.confirmed_target {
            self.enter_pursuit(events);
            return;
        }

        // Without a recorded position there is nowhere to go; wait in place.
        let arrived = match input.perception.last_known_position {
            Some(spot) => {
                nav.set_destination(spot);
                planar_distance(pose.position, spot) <= nav.stopping_distance()
            }
            None => true,
        };

        if arrived && self.count_down(input.dt) {
            self.tint(self.config.normal_color, events);
            self.transition(BehaviorState::Patrol, events);
            nav.set_destination(self.waypoints[self.current_waypoint]);
        }
    }

    fn update_pursuit(&mut self, input: &TickInput, nav: &mut dyn Navigator, events: &mut Vec<AgentEvent>) {
        if input.perception.confirmed_target {
            if let Some(target) = input.target_position {
                nav.set_destination(target);
            }
            return;
        }

        // Lost sight: go look where the target was last seen.
        self.tint(self.config.suspect_color, events);
        self.wait_timer = self.config.investigate_time;
        self.transition(BehaviorState::Investigate, events);
    }

    fn update_capture(
        &mut self,
        input: &TickInput,
        pose: &mut Pose,
        nav: &mut dyn Navigator,
        hint: &mut dyn AttentionHint,
    ) {
        nav.stop();
        hint.set_visible(false);

        let Some(target) = input.target_position else {
            return;
        };
        if let Some(rotation) = capture_rotation(pose.rotation, pose.position, target, input.elapsed_secs) {
            pose.rotation = rotation;
        }
    }

    fn enter_pursuit(&mut self, events: &mut Vec<AgentEvent>) {
        self.tint(self.config.pursuit_color, events);
        events.push(AgentEvent::Cue {
            cue: AudioCue::Pursuit,
        });
        self.transition(BehaviorState::Pursuit, events);
    }

    /// Decrement the wait timer by `dt`. True once it has run out.
    fn count_down(&mut self, dt: f32) -> bool {
        self.wait_timer = (self.wait_timer - dt).max(0.0);
        if self.wait_timer <= TIMER_EPSILON {
            self.wait_timer = 0.0;
        }
        self.wait_timer <= 0.0
    }

    fn tint(&self, color: Color, events: &mut Vec<AgentEvent>) {
        events.push(AgentEvent::TintChanged { color });
    }

    fn transition(&mut self, to: BehaviorState, events: &mut Vec<AgentEvent>) {
        let from = self.state;
        self.state = to;
        log::debug!("patrol agent {from:?} -> {to:?}");
        events.push(AgentEvent::StateChanged { from, to });
    }

    fn set_speed(&mut self, nav: &mut dyn Navigator, speed: f32, events: &mut Vec<AgentEvent>) {
        nav.set_speed(speed);
        let running = speed > 0.0;
        if running != self.motor_running {
            self.motor_running = running;
            let cue = if running {
                AudioCue::DroneMoveStart
            } else {
                AudioCue::DroneMoveStop
            };
            events.push(AgentEvent::Cue { cue });
        }
    }
}

/// Index of the waypoint closest to `from`. Ties keep the earliest.
pub fn nearest_waypoint(waypoints: &[Vec3], from: Vec3) -> usize {
    let mut best = 0;
    let mut best_distance = f32::INFINITY;
    for (i, waypoint) in waypoints.iter().enumerate() {
        let distance = from.distance(*waypoint);
        if distance < best_distance {
            best_distance = distance;
            best = i;
        }
    }
    best
}
