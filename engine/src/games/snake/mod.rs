mod agent;
mod bot_controller;
mod clock;
mod collision;
mod driver;
mod entity;
mod food;
mod game_state;
mod grid;
mod session;
mod settings;
mod signals;
mod tick;
mod types;

pub use agent::{Agent, CollisionState};
pub use bot_controller::BotController;
pub use clock::{ManualTime, MonotonicTime, PausableClock, TickGate, TimeSource};
pub use collision::{CollisionResolver, Intent, Intents, NpcMove, Outcome};
pub use driver::{DriverSettings, SessionCommand, SessionDriver, SessionSummary};
pub use entity::Snake;
pub use food::{Food, FoodError, FoodManager};
pub use game_state::{GameState, PLAYER_SPAWN, START_HEALTH};
pub use grid::Grid;
pub use session::SnakeSession;
pub use settings::{GameConfig, INFINITE_LEVEL_LENGTH, MIN_GRID_HEIGHT, MIN_GRID_WIDTH, NPC_START_LENGTH};
pub use signals::{COLOR_DRAW, COLOR_GAIN, COLOR_LOSS, CollisionKind, FloatingText, GameSignal, TickReport};
pub use tick::{
    SCORE_BITTEN, SCORE_BODY_STRIKE, SCORE_FOOD, SCORE_HEAD_TO_HEAD_LOSS, SCORE_HEAD_TO_HEAD_TIE,
    SCORE_HEAD_TO_HEAD_WIN, TickResolution, Transition, deflect, run_tick,
};
pub use types::{AgentKind, Cell, Direction, Hue, InfiniteRule, Phase, Segment};
