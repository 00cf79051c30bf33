use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::grid::Grid;
use super::types::InfiniteRule;

pub const INFINITE_LEVEL_LENGTH: usize = 100;
pub const NPC_START_LENGTH: usize = 3;
pub const MIN_GRID_WIDTH: i32 = 16;
pub const MIN_GRID_HEIGHT: i32 = 12;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    pub speed_ms: u64,
    pub food_count: usize,
    pub infinite_mode: bool,
    pub infinite_rule: InfiniteRule,
    pub revive_count: u32,
    pub theme: String,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub cell_size: u32,
    pub stun_duration_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            speed_ms: 100,
            food_count: 10,
            infinite_mode: false,
            infinite_rule: InfiniteRule::Wrap,
            revive_count: 3,
            theme: "default".to_string(),
            canvas_width: 600,
            canvas_height: 400,
            cell_size: Grid::DEFAULT_CELL_SIZE,
            stun_duration_ms: 1000,
        }
    }
}

impl GameConfig {
    pub fn grid(&self) -> Grid {
        Grid::from_canvas(self.canvas_width, self.canvas_height, self.cell_size)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    pub fn stun_duration(&self) -> Duration {
        Duration::from_millis(self.stun_duration_ms)
    }

    /// Health lost per wall hit. Faster speeds hurt more: 150ms and slower
    /// cost 5, 100ms and slower cost 10, anything faster costs 20.
    pub fn wall_damage(&self) -> u32 {
        match self.speed_ms {
            150.. => 5,
            100..=149 => 10,
            _ => 20,
        }
    }

    pub fn validate_speed(speed_ms: u64) -> Result<(), String> {
        if !(50..=1000).contains(&speed_ms) {
            return Err("speed_ms must be between 50 and 1000".to_string());
        }
        Ok(())
    }

    pub fn validate_food_count(&self, food_count: usize) -> Result<(), String> {
        if !(1..=50).contains(&food_count) {
            return Err("food_count must be between 1 and 50".to_string());
        }
        let cells = self.grid().cell_count();
        if food_count + INFINITE_LEVEL_LENGTH + NPC_START_LENGTH >= cells {
            return Err(format!(
                "grid of {} cells is too small for {} foods and full-length snakes",
                cells, food_count
            ));
        }
        Ok(())
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        Self::validate_speed(self.speed_ms)?;
        if self.cell_size == 0 {
            return Err("cell_size must be greater than 0".to_string());
        }
        if self.canvas_width % self.cell_size != 0 || self.canvas_height % self.cell_size != 0 {
            return Err("cell_size must divide both canvas dimensions".to_string());
        }
        let grid = self.grid();
        if grid.width < MIN_GRID_WIDTH || grid.height < MIN_GRID_HEIGHT {
            return Err(format!(
                "grid must be at least {}x{} cells, got {}x{}",
                MIN_GRID_WIDTH, MIN_GRID_HEIGHT, grid.width, grid.height
            ));
        }
        if self.stun_duration_ms == 0 {
            return Err("stun_duration_ms must be at least 1".to_string());
        }
        self.validate_food_count(self.food_count)?;
        Ok(())
    }
}
