use crate::games::RandomSource;
use super::agent::Agent;
use super::food::Food;
use super::types::{Cell, Direction};

pub struct BotController;

impl BotController {
    /// Greedy step toward the nearest food. May point back into the neck;
    /// the tick treats that as a self-collision and recovers.
    pub fn calculate_move(npc: &Agent, foods: &[Food]) -> Direction {
        let Some(head) = npc.head() else {
            return npc.direction;
        };
        Self::find_nearest_food(head, foods)
            .and_then(|target| Self::greedy_direction(head, target.cell))
            .unwrap_or(npc.direction)
    }

    pub fn find_nearest_food(from: Cell, foods: &[Food]) -> Option<&Food> {
        foods.iter().min_by_key(|food| from.manhattan_distance(food.cell))
    }

    pub fn greedy_direction(from: Cell, to: Cell) -> Option<Direction> {
        if from.x < to.x {
            Some(Direction::Right)
        } else if from.x > to.x {
            Some(Direction::Left)
        } else if from.y < to.y {
            Some(Direction::Down)
        } else if from.y > to.y {
            Some(Direction::Up)
        } else {
            None
        }
    }

    pub fn random_heading(rng: &mut dyn RandomSource) -> Direction {
        Direction::ALL[rng.next_index(Direction::ALL.len())]
    }
}
