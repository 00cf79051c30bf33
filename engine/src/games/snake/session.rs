use std::time::Duration;

use crate::config::Validate;
use crate::games::{RandomSource, SessionRng};
use crate::{log, log_warn};
use super::clock::{PausableClock, TickGate};
use super::game_state::GameState;
use super::settings::GameConfig;
use super::signals::{GameSignal, TickReport};
use super::tick::{Transition, run_tick};
use super::types::{Direction, Phase};

pub struct SnakeSession {
    config: GameConfig,
    initial_config: GameConfig,
    state: GameState,
    rng: Box<dyn RandomSource + Send>,
    clock: PausableClock,
    gate: TickGate,
    level_declined: bool,
    pending_signals: Vec<GameSignal>,
}

impl SnakeSession {
    pub fn new(config: GameConfig, mut rng: Box<dyn RandomSource + Send>) -> Result<Self, String> {
        config.validate()?;
        let state = GameState::new(&config, rng.as_mut());
        Ok(Self {
            initial_config: config.clone(),
            config,
            state,
            rng,
            clock: PausableClock::new(),
            gate: TickGate::new(),
            level_declined: false,
            pending_signals: Vec::new(),
        })
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, String> {
        Self::new(config, Box::new(SessionRng::new(seed)))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn sim_time(&self) -> Duration {
        self.clock.now()
    }

    pub fn is_finished(&self) -> bool {
        match self.state.phase {
            Phase::Over => true,
            Phase::LevelComplete => self.level_declined,
            _ => false,
        }
    }

    pub fn take_signals(&mut self) -> Vec<GameSignal> {
        std::mem::take(&mut self.pending_signals)
    }

    pub fn set_direction(&mut self, requested: Direction) -> bool {
        self.state.set_direction(requested)
    }

    pub fn set_speed(&mut self, speed_ms: u64) -> Result<(), String> {
        GameConfig::validate_speed(speed_ms)?;
        self.config.speed_ms = speed_ms;
        log!("Speed set to {}ms", speed_ms);
        Ok(())
    }

    pub fn set_food_count(&mut self, food_count: usize) -> Result<(), String> {
        self.config.validate_food_count(food_count)?;
        self.config.food_count = food_count;
        log!("Food count set to {}", food_count);
        Ok(())
    }

    pub fn toggle_infinite_mode(&mut self) -> bool {
        self.config.infinite_mode = !self.config.infinite_mode;
        log!("Infinite mode {}", if self.config.infinite_mode { "on" } else { "off" });
        self.config.infinite_mode
    }

    pub fn start(&mut self) -> bool {
        if self.state.phase != Phase::NotStarted {
            return false;
        }
        self.gate.reset();
        self.set_phase(Phase::Running);
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state.phase != Phase::Running {
            return false;
        }
        self.clock.pause();
        self.set_phase(Phase::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state.phase != Phase::Paused {
            return false;
        }
        self.clock.resume();
        self.set_phase(Phase::Running);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            _ => false,
        }
    }

    pub fn revive(&mut self) -> bool {
        if !self.state.revive() {
            return false;
        }
        self.pending_signals.push(GameSignal::Revived {
            revives_left: self.state.revive_count,
        });
        self.set_phase(Phase::Running);
        true
    }

    pub fn forfeit(&mut self) -> bool {
        if self.state.phase != Phase::AwaitingRevive {
            return false;
        }
        self.finish_game();
        true
    }

    pub fn continue_level(&mut self) -> bool {
        if self.state.phase != Phase::LevelComplete || self.level_declined {
            return false;
        }
        let mut state = GameState::new(&self.config, self.rng.as_mut());
        state.phase = Phase::LevelComplete;
        self.state = state;
        self.gate.reset();
        self.set_phase(Phase::Running);
        true
    }

    pub fn end_session(&mut self) -> bool {
        if self.state.phase != Phase::LevelComplete || self.level_declined {
            return false;
        }
        self.level_declined = true;
        log!("Session ended after level complete, score {}", self.state.score);
        true
    }

    pub fn reset(&mut self) {
        let from = self.state.phase;
        self.state = GameState::new(&self.config, self.rng.as_mut());
        self.clock = PausableClock::new();
        self.gate.reset();
        self.level_declined = false;
        if from != Phase::NotStarted {
            self.pending_signals.push(GameSignal::PhaseChanged {
                from,
                to: Phase::NotStarted,
            });
        }
        log!("Game reset");
    }

    pub fn restart(&mut self) {
        self.config = self.initial_config.clone();
        self.reset();
    }

    /// Frame callback. Runs at most one tick, only while `Running` and only
    /// once the configured interval has passed on the simulation clock.
    pub fn on_frame(&mut self, raw_now: Duration) -> Option<TickReport> {
        let now = self.clock.observe(raw_now);
        if self.state.phase != Phase::Running {
            return None;
        }
        if !self.gate.should_tick(now, self.config.tick_interval()) {
            return None;
        }
        Some(self.tick(now))
    }

    pub fn tick(&mut self, now: Duration) -> TickReport {
        let mut resolution = run_tick(&mut self.state, &self.config, now, self.rng.as_mut());

        match resolution.transition {
            Some(Transition::OfferRevive) => {
                self.pending_signals.push(GameSignal::ReviveOffered {
                    revives_left: self.state.revive_count,
                });
                self.set_phase(Phase::AwaitingRevive);
            }
            Some(Transition::GameOver) => self.finish_game(),
            Some(Transition::LevelComplete) => {
                self.pending_signals.push(GameSignal::LevelComplete {
                    final_score: self.state.score,
                });
                self.set_phase(Phase::LevelComplete);
                log!("Level complete, score {}", self.state.score);
            }
            None => {}
        }

        resolution.signals.append(&mut self.pending_signals);
        TickReport {
            tick: self.state.tick,
            signals: resolution.signals,
            snapshot: self.state.clone(),
        }
    }

    fn finish_game(&mut self) {
        self.pending_signals.push(GameSignal::GameOver {
            final_score: self.state.score,
        });
        self.set_phase(Phase::Over);
        log!("Game over, final score {}", self.state.score);
    }

    fn set_phase(&mut self, to: Phase) {
        let from = self.state.phase;
        if from == to {
            log_warn!("Phase {:?} set twice", to);
            return;
        }
        self.state.phase = to;
        self.pending_signals.push(GameSignal::PhaseChanged { from, to });
        log!("Phase {:?} -> {:?}", from, to);
    }
}
