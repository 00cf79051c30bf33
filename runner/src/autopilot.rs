use snake_duel_engine::games::snake::{
    AgentKind, BotController, Direction, GameConfig, GameSignal, GameState, Phase, SessionCommand, TickReport,
};
use snake_duel_engine::{log, log_debug};
use tokio::sync::mpsc;

use crate::broadcaster::SessionEvent;
use crate::config::RunnerConfig;

/// Plays the player side headlessly: steers toward food the way the NPC does
/// and answers revive offers and level-complete prompts from the runner config.
pub struct Autopilot {
    game: GameConfig,
    auto_revive: bool,
    continue_after_level: bool,
}

impl Autopilot {
    pub fn new(game: GameConfig, runner: &RunnerConfig) -> Self {
        Self {
            game,
            auto_revive: runner.auto_revive,
            continue_after_level: runner.continue_after_level,
        }
    }

    pub async fn run(
        self,
        mut events: mpsc::UnboundedReceiver<SessionEvent>,
        commands: mpsc::UnboundedSender<SessionCommand>,
    ) {
        while let Some(event) = events.recv().await {
            for command in self.react(&event) {
                if commands.send(command).is_err() {
                    return;
                }
            }
        }
    }

    pub fn react(&self, event: &SessionEvent) -> Vec<SessionCommand> {
        match event {
            SessionEvent::Tick(report) => self.on_tick(report),
            SessionEvent::Signal(signal) => {
                Self::log_signal(signal);
                Vec::new()
            }
        }
    }

    fn on_tick(&self, report: &TickReport) -> Vec<SessionCommand> {
        let mut commands = Vec::new();
        for signal in &report.signals {
            Self::log_signal(signal);
            match signal {
                GameSignal::ReviveOffered { revives_left } => {
                    if self.auto_revive && *revives_left > 0 {
                        commands.push(SessionCommand::Revive);
                    } else {
                        commands.push(SessionCommand::Forfeit);
                    }
                }
                GameSignal::LevelComplete { .. } => {
                    if self.continue_after_level {
                        commands.push(SessionCommand::ContinueLevel);
                    } else {
                        commands.push(SessionCommand::EndSession);
                    }
                }
                _ => {}
            }
        }

        if report.snapshot.phase == Phase::Running {
            commands.push(SessionCommand::SetDirection(self.steer(&report.snapshot)));
        }
        commands
    }

    /// Greedy like the NPC, but never turns back into its own neck.
    fn steer(&self, state: &GameState) -> Direction {
        let player = state.agent(AgentKind::Player);
        let current = player.direction;
        let preferred = BotController::calculate_move(player, &state.active_foods);
        if !preferred.is_opposite(&current) {
            return preferred;
        }
        let Some(head) = player.head() else {
            return current;
        };

        let grid = self.game.grid();
        current
            .perpendicular()
            .into_iter()
            .chain([current])
            .find(|dir| {
                let next = head.step(*dir);
                let next = if self.game.infinite_mode { grid.wrap(next) } else { next };
                grid.in_bounds(next) && !player.snake.contains(next)
            })
            .unwrap_or(current)
    }

    fn log_signal(signal: &GameSignal) {
        match signal {
            GameSignal::FloatingText(text) => log!("{} at ({}, {})", text.text, text.cell_x, text.cell_y),
            GameSignal::ReviveOffered { revives_left } => log!("Revive offered, {} left", revives_left),
            GameSignal::Revived { revives_left } => log!("Revived, {} left", revives_left),
            GameSignal::GameOver { final_score } => log!("Game over, final score {}", final_score),
            GameSignal::LevelComplete { final_score } => log!("Level complete, score {}", final_score),
            GameSignal::PhaseChanged { from, to } => log!("Phase {:?} -> {:?}", from, to),
            other => log_debug!("{:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_duel_engine::games::SessionRng;
    use snake_duel_engine::games::snake::{Cell, SnakeSession};

    fn autopilot(auto_revive: bool, continue_after_level: bool) -> Autopilot {
        let runner = RunnerConfig {
            auto_revive,
            continue_after_level,
            ..RunnerConfig::default()
        };
        Autopilot::new(GameConfig::default(), &runner)
    }

    fn report(signals: Vec<GameSignal>, phase: Phase) -> TickReport {
        let session = SnakeSession::new(GameConfig::default(), Box::new(SessionRng::new(3))).unwrap();
        let mut snapshot = session.state().clone();
        snapshot.phase = phase;
        TickReport {
            tick: 1,
            signals,
            snapshot,
        }
    }

    #[test]
    fn test_revive_offer_is_accepted_when_enabled() {
        let event = SessionEvent::Tick(report(vec![GameSignal::ReviveOffered { revives_left: 2 }], Phase::AwaitingRevive));
        assert_eq!(autopilot(true, false).react(&event), vec![SessionCommand::Revive]);
    }

    #[test]
    fn test_revive_offer_without_revives_forfeits() {
        let event = SessionEvent::Tick(report(vec![GameSignal::ReviveOffered { revives_left: 0 }], Phase::AwaitingRevive));
        assert_eq!(autopilot(true, false).react(&event), vec![SessionCommand::Forfeit]);
    }

    #[test]
    fn test_level_complete_follows_config() {
        let signals = vec![GameSignal::LevelComplete { final_score: 900 }];
        let event = SessionEvent::Tick(report(signals, Phase::LevelComplete));
        assert_eq!(autopilot(true, true).react(&event), vec![SessionCommand::ContinueLevel]);
        assert_eq!(autopilot(true, false).react(&event), vec![SessionCommand::EndSession]);
    }

    #[test]
    fn test_running_tick_steers_without_reversing() {
        let event = SessionEvent::Tick(report(Vec::new(), Phase::Running));
        let commands = autopilot(true, false).react(&event);
        assert_eq!(commands.len(), 1);
        let SessionCommand::SetDirection(direction) = commands[0] else {
            panic!("expected a steering command");
        };
        assert_ne!(direction, Direction::Left);
    }

    #[test]
    fn test_food_behind_sidesteps_instead_of_reversing() {
        let mut tick = report(Vec::new(), Phase::Running);
        let head = tick.snapshot.player.head().unwrap();
        tick.snapshot.active_foods.truncate(1);
        tick.snapshot.active_foods[0].cell = Cell::new(head.x - 4, head.y);

        let commands = autopilot(true, false).react(&SessionEvent::Tick(tick));
        let SessionCommand::SetDirection(direction) = commands[0] else {
            panic!("expected a steering command");
        };
        assert!(direction == Direction::Up || direction == Direction::Down);
    }

    #[test]
    fn test_standalone_signal_sends_nothing() {
        let event = SessionEvent::Signal(GameSignal::FoodRefilled { count: 3 });
        assert!(autopilot(true, false).react(&event).is_empty());
    }
}
