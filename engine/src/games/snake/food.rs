use std::collections::HashSet;
use std::fmt;

use crate::games::RandomSource;
use crate::{log_debug, log_warn};
use super::grid::Grid;
use super::types::{Cell, Hue};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Food {
    pub cell: Cell,
    pub hue: Hue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoodError {
    NoFreeCell,
}

impl fmt::Display for FoodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoodError::NoFreeCell => f.write_str("no free cell left for food"),
        }
    }
}

impl std::error::Error for FoodError {}

pub struct FoodManager;

impl FoodManager {
    /// Rejection-samples a cell outside `occupied`. Fails up front when the
    /// grid has no free cell, so the sampling loop always terminates.
    pub fn generate_food(
        grid: &Grid,
        occupied: &HashSet<Cell>,
        rng: &mut dyn RandomSource,
    ) -> Result<Food, FoodError> {
        let taken = occupied.iter().filter(|cell| grid.in_bounds(**cell)).count();
        if taken >= grid.cell_count() {
            return Err(FoodError::NoFreeCell);
        }

        loop {
            let cell = Cell::new(
                rng.next_index(grid.width as usize) as i32,
                rng.next_index(grid.height as usize) as i32,
            );
            if !occupied.contains(&cell) {
                let hue = Hue::new(rng.next_index(360) as u16);
                return Ok(Food { cell, hue });
            }
        }
    }

    pub fn refill(
        grid: &Grid,
        count: usize,
        occupied: &HashSet<Cell>,
        rng: &mut dyn RandomSource,
    ) -> Vec<Food> {
        let mut taken = occupied.clone();
        let mut foods = Vec::with_capacity(count);

        for _ in 0..count {
            match Self::generate_food(grid, &taken, rng) {
                Ok(food) => {
                    taken.insert(food.cell);
                    foods.push(food);
                }
                Err(e) => {
                    log_warn!("Food refill stopped after {} of {}: {}", foods.len(), count, e);
                    break;
                }
            }
        }

        log_debug!("Refilled {} foods", foods.len());
        foods
    }
}
