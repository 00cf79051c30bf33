use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};

use crate::games::GameBroadcaster;
use crate::{log, log_warn};
use super::clock::TimeSource;
use super::session::SnakeSession;
use super::types::{Direction, Phase};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    SetDirection(Direction),
    SetSpeed(u64),
    SetFoodCount(usize),
    ToggleInfiniteMode,
    Start,
    Pause,
    Resume,
    TogglePause,
    Revive,
    Forfeit,
    ContinueLevel,
    EndSession,
    Reset,
    Restart,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub ticks: u64,
    pub score: i32,
    pub health: u32,
    pub phase: Phase,
    pub player_len: usize,
    pub npc_len: usize,
}

impl SessionSummary {
    fn from_session(session: &SnakeSession) -> Self {
        let state = session.state();
        Self {
            ticks: state.tick,
            score: state.score,
            health: state.health,
            phase: state.phase,
            player_len: state.player.snake.len(),
            npc_len: state.npc.snake.len(),
        }
    }
}

pub struct DriverSettings {
    pub frame_interval: Duration,
    pub max_ticks: Option<u64>,
}

pub struct SessionDriver;

impl SessionDriver {
    /// Owns the session on the current task: a fixed-rate frame loop plus a
    /// command channel. Stops on `Quit`, a closed channel, a finished game,
    /// or after `max_ticks` ticks.
    pub async fn run<B, T>(
        mut session: SnakeSession,
        mut commands: mpsc::UnboundedReceiver<SessionCommand>,
        broadcaster: B,
        time: T,
        settings: DriverSettings,
    ) -> SessionSummary
    where
        B: GameBroadcaster,
        T: TimeSource + Send,
    {
        let mut frames = interval(settings.frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = frames.tick() => {
                    if let Some(report) = session.on_frame(time.now()) {
                        let tick = report.tick;
                        broadcaster.broadcast_tick(report).await;
                        if settings.max_ticks.is_some_and(|max| tick >= max) {
                            log!("Tick limit {} reached", tick);
                            break;
                        }
                    }
                }
                command = commands.recv() => {
                    let Some(command) = command else {
                        log_warn!("Command channel closed, stopping session");
                        break;
                    };
                    if command == SessionCommand::Quit {
                        log!("Quit requested");
                        break;
                    }
                    Self::apply(&mut session, command);
                    for signal in session.take_signals() {
                        broadcaster.broadcast_signal(signal).await;
                    }
                }
            }

            if session.is_finished() {
                break;
            }
        }

        SessionSummary::from_session(&session)
    }

    pub fn apply(session: &mut SnakeSession, command: SessionCommand) -> bool {
        match command {
            SessionCommand::SetDirection(direction) => session.set_direction(direction),
            SessionCommand::SetSpeed(speed_ms) => Self::report(session.set_speed(speed_ms)),
            SessionCommand::SetFoodCount(count) => Self::report(session.set_food_count(count)),
            SessionCommand::ToggleInfiniteMode => {
                session.toggle_infinite_mode();
                true
            }
            SessionCommand::Start => session.start(),
            SessionCommand::Pause => session.pause(),
            SessionCommand::Resume => session.resume(),
            SessionCommand::TogglePause => session.toggle_pause(),
            SessionCommand::Revive => session.revive(),
            SessionCommand::Forfeit => session.forfeit(),
            SessionCommand::ContinueLevel => session.continue_level(),
            SessionCommand::EndSession => session.end_session(),
            SessionCommand::Reset => {
                session.reset();
                true
            }
            SessionCommand::Restart => {
                session.restart();
                true
            }
            SessionCommand::Quit => false,
        }
    }

    fn report(result: Result<(), String>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                log_warn!("Config change rejected: {}", e);
                false
            }
        }
    }
}
