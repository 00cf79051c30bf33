use super::game_state::GameState;
use super::grid::Grid;
use super::types::{AgentKind, Cell};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Intent {
    pub head: Cell,
    pub moving: bool,
}

impl Intent {
    pub fn moving(head: Cell) -> Self {
        Self { head, moving: true }
    }

    pub fn holding(head: Cell) -> Self {
        Self { head, moving: false }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Intents {
    pub player: Option<Intent>,
    pub npc: Option<Intent>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NpcMove {
    Step,
    Hold,
    RecoverFromSelf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    HeadToHead { winner: Option<AgentKind> },
    BodyStrike {
        player_bites_at: Option<usize>,
        npc_bites_at: Option<usize>,
    },
    NpcHitWall,
    PlayerHitWall,
    PlayerHitSelf,
    Advance { npc: NpcMove },
}

pub struct CollisionResolver;

impl CollisionResolver {
    /// Runs the guards in order and returns the first that matches.
    /// `bounded` is false in infinite mode, where intents are already on the grid.
    pub fn classify(state: &GameState, intents: &Intents, grid: &Grid, bounded: bool) -> Outcome {
        let player = intents.player.filter(|intent| intent.moving);
        let npc = intents.npc.filter(|intent| intent.moving);

        if let Some(outcome) = Self::head_to_head(state, player, npc) {
            return outcome;
        }
        if let Some(outcome) = Self::body_strike(state, player, npc) {
            return outcome;
        }

        let out_of_bounds = |intent: Intent| bounded && !grid.in_bounds(intent.head);

        if npc.is_some_and(out_of_bounds) {
            return Outcome::NpcHitWall;
        }
        if player.is_some_and(out_of_bounds) {
            return Outcome::PlayerHitWall;
        }

        let npc_move = match npc {
            None => NpcMove::Hold,
            Some(intent) if state.npc.snake.contains(intent.head) => NpcMove::RecoverFromSelf,
            Some(_) => NpcMove::Step,
        };

        if player.is_some_and(|intent| state.player.snake.contains(intent.head)) {
            return Outcome::PlayerHitSelf;
        }

        Outcome::Advance { npc: npc_move }
    }

    fn head_to_head(state: &GameState, player: Option<Intent>, npc: Option<Intent>) -> Option<Outcome> {
        let (player, npc) = (player?, npc?);
        if player.head != npc.head {
            return None;
        }

        let player_len = state.player.snake.len();
        let npc_len = state.npc.snake.len();
        let winner = if player_len > npc_len {
            Some(AgentKind::Player)
        } else if npc_len > player_len {
            Some(AgentKind::Npc)
        } else {
            None
        };
        Some(Outcome::HeadToHead { winner })
    }

    fn body_strike(state: &GameState, player: Option<Intent>, npc: Option<Intent>) -> Option<Outcome> {
        let player_bites_at = player.and_then(|intent| state.npc.snake.body_index_of(intent.head));
        let npc_bites_at = npc.and_then(|intent| state.player.snake.body_index_of(intent.head));

        if player_bites_at.is_none() && npc_bites_at.is_none() {
            return None;
        }
        Some(Outcome::BodyStrike {
            player_bites_at,
            npc_bites_at,
        })
    }
}
