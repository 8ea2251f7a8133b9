//! Gameplay flow: the Tutorial / InGame / GameOver phase machine.

use nightwatch_ai::GameFlow;
use nightwatch_core::enums::{GameOutcome, GamePhase};
use nightwatch_core::events::LevelEvent;

#[derive(Debug, Clone, Default)]
pub struct FlowState {
    phase: GamePhase,
    outcome: Option<GameOutcome>,
    /// A guard reported a capture this tick; applied by `take_capture`.
    capture_pending: bool,
}

impl FlowState {
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Leave the tutorial. No effect in any other phase.
    pub fn start(&mut self, events: &mut Vec<LevelEvent>) {
        if self.phase == GamePhase::Tutorial {
            self.enter(GamePhase::InGame, events);
        }
    }

    /// Back to a fresh InGame from any phase.
    pub fn restart(&mut self, events: &mut Vec<LevelEvent>) {
        self.outcome = None;
        self.capture_pending = false;
        self.enter(GamePhase::InGame, events);
    }

    /// End the level with `outcome`. Only the first ending counts.
    pub fn finish(&mut self, outcome: GameOutcome, events: &mut Vec<LevelEvent>) {
        if self.phase != GamePhase::InGame {
            return;
        }
        self.outcome = Some(outcome);
        self.enter(GamePhase::GameOver, events);
        events.push(LevelEvent::Ended { outcome });
    }

    /// Turn a reported capture into the Caught ending.
    pub fn take_capture(&mut self, events: &mut Vec<LevelEvent>) -> bool {
        if !std::mem::take(&mut self.capture_pending) {
            return false;
        }
        self.finish(GameOutcome::Caught, events);
        true
    }

    fn enter(&mut self, phase: GamePhase, events: &mut Vec<LevelEvent>) {
        log::info!("game phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        events.push(LevelEvent::PhaseChanged { phase });
    }
}

impl GameFlow for FlowState {
    /// Play stops as soon as a capture is reported, so a second guard touching
    /// the player in the same tick is ignored.
    fn can_play(&self) -> bool {
        self.phase == GamePhase::InGame && !self.capture_pending
    }

    fn on_target_captured(&mut self) {
        if self.phase == GamePhase::InGame {
            self.capture_pending = true;
        }
    }
}
