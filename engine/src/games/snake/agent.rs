use std::time::Duration;

use super::entity::Snake;
use super::types::{AgentKind, Cell, Direction};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionState {
    pub stunned: bool,
    pub stun_since: Duration,
    pub stun_duration: Duration,
}

impl CollisionState {
    pub fn new(stun_duration: Duration) -> Self {
        Self {
            stunned: false,
            stun_since: Duration::ZERO,
            stun_duration,
        }
    }

    pub fn stun(&mut self, now: Duration) {
        self.stunned = true;
        self.stun_since = now;
    }

    pub fn clear(&mut self) {
        self.stunned = false;
    }

    pub fn has_expired(&self, now: Duration) -> bool {
        now.saturating_sub(self.stun_since) >= self.stun_duration
    }

    pub fn try_recover(&mut self, now: Duration) -> bool {
        if self.stunned && self.has_expired(now) {
            self.stunned = false;
        }
        !self.stunned
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Agent {
    pub kind: AgentKind,
    pub snake: Snake,
    pub direction: Direction,
    pub collision: CollisionState,
}

impl Agent {
    pub fn new(kind: AgentKind, snake: Snake, direction: Direction, stun_duration: Duration) -> Self {
        Self {
            kind,
            snake,
            direction,
            collision: CollisionState::new(stun_duration),
        }
    }

    pub fn is_stunned(&self) -> bool {
        self.collision.stunned
    }

    pub fn is_eliminated(&self) -> bool {
        self.snake.is_eliminated()
    }

    pub fn head(&self) -> Option<Cell> {
        self.snake.head()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stun_holds_until_duration_elapses() {
        let t0 = Duration::from_millis(5_000);
        let mut state = CollisionState::new(Duration::from_millis(1_000));
        state.stun(t0);

        for offset in [0, 1, 500, 999] {
            assert!(!state.try_recover(t0 + Duration::from_millis(offset)));
            assert!(state.stunned);
        }

        assert!(state.try_recover(t0 + Duration::from_millis(1_000)));
        assert!(!state.stunned);
    }

    #[test]
    fn test_unstunned_agent_may_move() {
        let mut state = CollisionState::new(Duration::from_millis(1_000));
        assert!(state.try_recover(Duration::ZERO));
    }
}
