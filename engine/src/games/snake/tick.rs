use std::time::Duration;

use crate::games::RandomSource;
use crate::{log, log_debug};
use super::agent::Agent;
use super::bot_controller::BotController;
use super::collision::{CollisionResolver, Intent, Intents, NpcMove, Outcome};
use super::food::FoodManager;
use super::game_state::GameState;
use super::grid::Grid;
use super::settings::{GameConfig, INFINITE_LEVEL_LENGTH};
use super::signals::{
    COLOR_DRAW, COLOR_GAIN, COLOR_LOSS, CollisionKind, FloatingText, GameSignal,
};
use super::types::{AgentKind, Cell, Direction, InfiniteRule};

pub const SCORE_HEAD_TO_HEAD_WIN: i32 = 50;
pub const SCORE_HEAD_TO_HEAD_LOSS: i32 = -30;
pub const SCORE_HEAD_TO_HEAD_TIE: i32 = 10;
pub const SCORE_BODY_STRIKE: i32 = 20;
pub const SCORE_BITTEN: i32 = -15;
pub const SCORE_FOOD: i32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    OfferRevive,
    GameOver,
    LevelComplete,
}

#[derive(Debug, Default)]
pub struct TickResolution {
    pub signals: Vec<GameSignal>,
    pub transition: Option<Transition>,
}

impl TickResolution {
    fn score(&mut self, state: &mut GameState, delta: i32) {
        state.score += delta;
        self.signals.push(GameSignal::ScoreChanged {
            delta,
            total: state.score,
        });
    }

    fn float(&mut self, text: &str, cell: Cell, color: &str) {
        self.signals
            .push(GameSignal::FloatingText(FloatingText::new(text, cell, color)));
    }
}

pub fn run_tick(
    state: &mut GameState,
    config: &GameConfig,
    now: Duration,
    rng: &mut dyn RandomSource,
) -> TickResolution {
    let grid = config.grid();
    let mut resolution = TickResolution::default();
    state.tick += 1;

    state.player.direction = state.next_direction;
    let intents = Intents {
        player: player_intent(state, config, &grid, now),
        npc: npc_intent(state, config, &grid, now),
    };
    log_debug!(
        "tick {}: player -> {:?}, npc -> {:?}",
        state.tick,
        intents.player,
        intents.npc
    );

    let outcome = CollisionResolver::classify(state, &intents, &grid, !config.infinite_mode);
    match outcome {
        Outcome::HeadToHead { winner } => {
            let cell = intents.player.map(|i| i.head).unwrap_or_default();
            head_to_head(state, winner, cell, now, &mut resolution);
        }
        Outcome::BodyStrike {
            player_bites_at,
            npc_bites_at,
        } => {
            body_strike(state, &intents, player_bites_at, npc_bites_at, now, &mut resolution);
        }
        Outcome::NpcHitWall => {
            resolution.signals.push(GameSignal::Collision(CollisionKind::Boundary {
                agent: AgentKind::Npc,
            }));
            state.npc.direction = BotController::random_heading(rng);
        }
        Outcome::PlayerHitWall => {
            resolution.signals.push(GameSignal::Collision(CollisionKind::Boundary {
                agent: AgentKind::Player,
            }));
            let damage = config.wall_damage().min(state.health);
            state.health -= damage;
            resolution.signals.push(GameSignal::HealthChanged {
                delta: -(damage as i32),
                total: state.health,
            });
            resolution.transition = Some(if state.health == 0 {
                Transition::OfferRevive
            } else {
                player_failure(state)
            });
        }
        Outcome::PlayerHitSelf => {
            resolution.signals.push(GameSignal::Collision(CollisionKind::SelfCollision {
                agent: AgentKind::Player,
            }));
            resolution.transition = Some(player_failure(state));
        }
        Outcome::Advance { npc } => {
            advance(state, config, &grid, &intents, npc, rng, &mut resolution);
        }
    }

    if resolution.transition.is_none() && state.player.is_eliminated() {
        log!("Player snake eliminated at tick {}", state.tick);
        resolution.transition = Some(player_failure(state));
    }

    resolution
}

fn player_failure(state: &GameState) -> Transition {
    if state.revive_count > 0 {
        Transition::OfferRevive
    } else {
        Transition::GameOver
    }
}

fn player_intent(state: &mut GameState, config: &GameConfig, grid: &Grid, now: Duration) -> Option<Intent> {
    let head = state.player.head()?;
    if !state.player.collision.try_recover(now) {
        return Some(Intent::holding(head));
    }
    let (head, direction) = step_head(&state.player, head, config, grid);
    if direction != state.player.direction {
        state.player.direction = direction;
        state.next_direction = direction;
    }
    Some(Intent::moving(head))
}

fn npc_intent(state: &mut GameState, config: &GameConfig, grid: &Grid, now: Duration) -> Option<Intent> {
    let head = state.npc.head()?;
    if !state.npc.collision.try_recover(now) {
        return Some(Intent::holding(head));
    }
    state.npc.direction = BotController::calculate_move(&state.npc, &state.active_foods);
    let (head, direction) = step_head(&state.npc, head, config, grid);
    state.npc.direction = direction;
    Some(Intent::moving(head))
}

fn step_head(agent: &Agent, head: Cell, config: &GameConfig, grid: &Grid) -> (Cell, Direction) {
    let direction = agent.direction;
    let next = head.step(direction);
    if !config.infinite_mode || grid.in_bounds(next) {
        return (next, direction);
    }
    match config.infinite_rule {
        InfiniteRule::Wrap => (grid.wrap(next), direction),
        InfiniteRule::Deflect => {
            let deflected = deflect(direction, head, grid);
            (head.step(deflected), deflected)
        }
    }
}

/// Turns 90 degrees off the struck wall: side walls send the snake down
/// (up from the bottom row), top and bottom walls send it right (left from
/// the last column).
pub fn deflect(direction: Direction, head: Cell, grid: &Grid) -> Direction {
    if direction.is_horizontal() {
        if head.y >= grid.height - 1 {
            Direction::Up
        } else {
            Direction::Down
        }
    } else if head.x >= grid.width - 1 {
        Direction::Left
    } else {
        Direction::Right
    }
}

fn head_to_head(
    state: &mut GameState,
    winner: Option<AgentKind>,
    cell: Cell,
    now: Duration,
    resolution: &mut TickResolution,
) {
    resolution
        .signals
        .push(GameSignal::Collision(CollisionKind::HeadToHead { winner }));

    match winner {
        Some(AgentKind::Player) => {
            state.player.snake.absorb(&mut state.npc.snake);
            state.npc.collision.stun(now);
            resolution.score(state, SCORE_HEAD_TO_HEAD_WIN);
            resolution.float("Perfect clash! +50", cell, COLOR_GAIN);
            log!("Head-to-head won, player length {}", state.player.snake.len());
        }
        Some(AgentKind::Npc) => {
            state.npc.snake.absorb(&mut state.player.snake);
            state.player.collision.stun(now);
            resolution.score(state, SCORE_HEAD_TO_HEAD_LOSS);
            resolution.float("Clash lost! -30", cell, COLOR_LOSS);
            log!("Head-to-head lost, npc length {}", state.npc.snake.len());
        }
        None => {
            state.player.collision.stun(now);
            state.npc.collision.stun(now);
            resolution.score(state, SCORE_HEAD_TO_HEAD_TIE);
            resolution.float("Evenly matched! +10", cell, COLOR_DRAW);
            log!("Head-to-head tie at {}", cell);
        }
    }
}

fn body_strike(
    state: &mut GameState,
    intents: &Intents,
    player_bites_at: Option<usize>,
    npc_bites_at: Option<usize>,
    now: Duration,
    resolution: &mut TickResolution,
) {
    // Cut both bodies before either grows so simultaneous strikes use pre-tick bodies.
    let npc_tail = player_bites_at.map(|index| state.npc.snake.bite_off(index));
    let player_tail = npc_bites_at.map(|index| state.player.snake.bite_off(index));

    if let (Some(index), Some(tail)) = (player_bites_at, npc_tail) {
        let cell = intents.player.map(|i| i.head).unwrap_or_default();
        resolution.signals.push(GameSignal::Collision(CollisionKind::BodyStrike {
            attacker: AgentKind::Player,
            index,
        }));
        state.player.snake.append_segments(tail);
        state.npc.collision.stun(now);
        resolution.score(state, SCORE_BODY_STRIKE);
        resolution.float("Flank strike! +20", cell, COLOR_GAIN);
        log!("Player bit the npc at segment {}", index);
    }

    if let (Some(index), Some(tail)) = (npc_bites_at, player_tail) {
        let cell = intents.npc.map(|i| i.head).unwrap_or_default();
        resolution.signals.push(GameSignal::Collision(CollisionKind::BodyStrike {
            attacker: AgentKind::Npc,
            index,
        }));
        state.npc.snake.append_segments(tail);
        state.player.collision.stun(now);
        resolution.score(state, SCORE_BITTEN);
        resolution.float("Ambushed! -15", cell, COLOR_LOSS);
        log!("Npc bit the player at segment {}", index);
    }
}

fn advance(
    state: &mut GameState,
    config: &GameConfig,
    grid: &Grid,
    intents: &Intents,
    npc_move: NpcMove,
    rng: &mut dyn RandomSource,
    resolution: &mut TickResolution,
) {
    if npc_move == NpcMove::RecoverFromSelf {
        resolution.signals.push(GameSignal::Collision(CollisionKind::SelfCollision {
            agent: AgentKind::Npc,
        }));
        state.npc.direction = BotController::random_heading(rng);
    }

    if let Some(intent) = intents.player.filter(|i| i.moving) {
        commit_move(state, AgentKind::Player, intent.head, resolution);
    }
    if npc_move == NpcMove::Step
        && let Some(intent) = intents.npc
    {
        commit_move(state, AgentKind::Npc, intent.head, resolution);
    }

    if config.infinite_mode && state.player.snake.len() >= INFINITE_LEVEL_LENGTH {
        resolution.transition = Some(Transition::LevelComplete);
        return;
    }

    if state.active_foods.is_empty() {
        if !config.infinite_mode && state.npc.is_eliminated() {
            resolution.transition = Some(Transition::LevelComplete);
            return;
        }
        let occupied = state.occupied_cells();
        state.active_foods = FoodManager::refill(grid, config.food_count, &occupied, rng);
        resolution.signals.push(GameSignal::FoodRefilled {
            count: state.active_foods.len(),
        });
    }
}

fn commit_move(state: &mut GameState, kind: AgentKind, head: Cell, resolution: &mut TickResolution) {
    let eaten = state
        .food_index_at(head)
        .map(|index| state.active_foods.remove(index));

    let agent = match kind {
        AgentKind::Player => &mut state.player,
        AgentKind::Npc => &mut state.npc,
    };
    agent.snake.advance(head, eaten.map(|food| food.hue));

    if let Some(food) = eaten {
        resolution.signals.push(GameSignal::FoodEaten {
            by: kind,
            cell: food.cell,
            hue: food.hue,
        });
        if kind == AgentKind::Player {
            resolution.score(state, SCORE_FOOD);
        }
    }
}
