use std::collections::HashSet;

use crate::games::RandomSource;
use super::agent::Agent;
use super::food::{Food, FoodManager};
use super::grid::Grid;
use super::settings::{GameConfig, NPC_START_LENGTH};
use super::entity::Snake;
use super::types::{AgentKind, Cell, Direction, Phase};

pub const PLAYER_SPAWN: Cell = Cell::new(10, 10);
pub const START_HEALTH: u32 = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub player: Agent,
    pub npc: Agent,
    pub next_direction: Direction,
    pub active_foods: Vec<Food>,
    pub score: i32,
    pub health: u32,
    pub revive_count: u32,
    pub phase: Phase,
    pub tick: u64,
}

impl GameState {
    pub fn new(config: &GameConfig, rng: &mut dyn RandomSource) -> Self {
        let grid = config.grid();
        let stun_duration = config.stun_duration();

        let player = Agent::new(
            AgentKind::Player,
            Snake::from_cells([PLAYER_SPAWN]),
            Direction::Right,
            stun_duration,
        );
        let npc = Agent::new(
            AgentKind::Npc,
            Self::npc_spawn(&grid),
            Direction::Left,
            stun_duration,
        );

        let mut state = Self {
            player,
            npc,
            next_direction: Direction::Right,
            active_foods: Vec::new(),
            score: 0,
            health: START_HEALTH,
            revive_count: config.revive_count,
            phase: Phase::NotStarted,
            tick: 0,
        };
        let occupied = state.occupied_cells();
        state.active_foods = FoodManager::refill(&grid, config.food_count, &occupied, rng);
        state
    }

    fn npc_spawn(grid: &Grid) -> Snake {
        let y = PLAYER_SPAWN.y.min(grid.height - 1);
        let head_x = grid.width - NPC_START_LENGTH as i32;
        Snake::from_cells((0..NPC_START_LENGTH as i32).map(|i| Cell::new(head_x + i, y)))
    }

    pub fn agent(&self, kind: AgentKind) -> &Agent {
        match kind {
            AgentKind::Player => &self.player,
            AgentKind::Npc => &self.npc,
        }
    }

    pub fn occupied_cells(&self) -> HashSet<Cell> {
        self.player
            .snake
            .cells()
            .chain(self.npc.snake.cells())
            .chain(self.active_foods.iter().map(|food| food.cell))
            .collect()
    }

    pub fn food_index_at(&self, cell: Cell) -> Option<usize> {
        self.active_foods.iter().position(|food| food.cell == cell)
    }

    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if requested.is_opposite(&self.player.direction) {
            return false;
        }
        self.next_direction = requested;
        true
    }

    pub fn revive(&mut self) -> bool {
        if self.phase != Phase::AwaitingRevive || self.revive_count == 0 {
            return false;
        }
        self.revive_count -= 1;
        self.player.snake = Snake::from_cells([PLAYER_SPAWN]);
        self.player.collision.clear();
        self.next_direction = self.player.direction;
        self.health = START_HEALTH;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::SessionRng;

    fn create_state() -> GameState {
        let mut rng = SessionRng::new(42);
        GameState::new(&GameConfig::default(), &mut rng)
    }

    #[test]
    fn test_new_state_layout() {
        let state = create_state();
        assert_eq!(state.player.snake.cells().collect::<Vec<_>>(), vec![PLAYER_SPAWN]);
        assert_eq!(
            state.npc.snake.cells().collect::<Vec<_>>(),
            vec![Cell::new(27, 10), Cell::new(28, 10), Cell::new(29, 10)]
        );
        assert_eq!(state.npc.direction, Direction::Left);
        assert_eq!(state.health, START_HEALTH);
        assert_eq!(state.revive_count, 3);
        assert_eq!(state.phase, Phase::NotStarted);
    }

    #[test]
    fn test_new_state_foods_are_distinct_and_free() {
        let state = create_state();
        assert_eq!(state.active_foods.len(), 10);
        let cells: HashSet<Cell> = state.active_foods.iter().map(|f| f.cell).collect();
        assert_eq!(cells.len(), 10);
        assert!(!state.player.snake.cells().any(|c| cells.contains(&c)));
        assert!(!state.npc.snake.cells().any(|c| cells.contains(&c)));
    }

    #[test]
    fn test_opposite_direction_is_rejected() {
        let mut state = create_state();
        assert_eq!(state.player.direction, Direction::Right);
        assert!(!state.set_direction(Direction::Left));
        assert_eq!(state.next_direction, Direction::Right);
        assert!(state.set_direction(Direction::Up));
        assert_eq!(state.next_direction, Direction::Up);
        // Still compared against the committed heading, not the buffered one.
        assert!(!state.set_direction(Direction::Left));
        assert_eq!(state.next_direction, Direction::Up);
    }

    #[test]
    fn test_revive_only_while_awaiting() {
        let mut state = create_state();
        state.phase = Phase::Running;
        assert!(!state.revive());

        state.phase = Phase::AwaitingRevive;
        state.health = 0;
        state.player.snake = Snake::from_cells([Cell::new(3, 3), Cell::new(2, 3)]);
        assert!(state.revive());
        assert_eq!(state.revive_count, 2);
        assert_eq!(state.health, START_HEALTH);
        assert_eq!(state.player.snake.cells().collect::<Vec<_>>(), vec![PLAYER_SPAWN]);

        state.revive_count = 0;
        assert!(!state.revive());
    }
}
