use super::game_state::GameState;
use super::types::{AgentKind, Cell, Hue, Phase};

pub const COLOR_GAIN: &str = "#00ff00";
pub const COLOR_LOSS: &str = "#ff0000";
pub const COLOR_DRAW: &str = "#ffff00";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloatingText {
    pub text: String,
    pub cell_x: i32,
    pub cell_y: i32,
    pub color: String,
}

impl FloatingText {
    pub fn new(text: &str, cell: Cell, color: &str) -> Self {
        Self {
            text: text.to_string(),
            cell_x: cell.x,
            cell_y: cell.y,
            color: color.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionKind {
    HeadToHead { winner: Option<AgentKind> },
    BodyStrike { attacker: AgentKind, index: usize },
    Boundary { agent: AgentKind },
    SelfCollision { agent: AgentKind },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameSignal {
    ScoreChanged { delta: i32, total: i32 },
    HealthChanged { delta: i32, total: u32 },
    FloatingText(FloatingText),
    Collision(CollisionKind),
    FoodEaten { by: AgentKind, cell: Cell, hue: Hue },
    FoodRefilled { count: usize },
    ReviveOffered { revives_left: u32 },
    Revived { revives_left: u32 },
    GameOver { final_score: i32 },
    LevelComplete { final_score: i32 },
    PhaseChanged { from: Phase, to: Phase },
}

#[derive(Clone, Debug)]
pub struct TickReport {
    pub tick: u64,
    pub signals: Vec<GameSignal>,
    pub snapshot: GameState,
}
