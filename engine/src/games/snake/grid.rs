use super::types::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub const DEFAULT_CELL_SIZE: u32 = 20;

    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn from_canvas(canvas_width: u32, canvas_height: u32, cell_size: u32) -> Self {
        Self {
            width: (canvas_width / cell_size) as i32,
            height: (canvas_height / cell_size) as i32,
        }
    }

    pub fn cell_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    pub fn wrap(&self, cell: Cell) -> Cell {
        Cell::new(cell.x.rem_euclid(self.width), cell.y.rem_euclid(self.height))
    }
}
