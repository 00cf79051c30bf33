use std::collections::VecDeque;

use super::types::{Cell, Hue, Segment};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snake {
    pub body: VecDeque<Segment>,
}

impl Snake {
    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        Self {
            body: cells.into_iter().map(Segment::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn is_eliminated(&self) -> bool {
        self.body.is_empty()
    }

    pub fn head(&self) -> Option<Cell> {
        self.body.front().map(|segment| segment.cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().map(|segment| segment.cell)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells().any(|c| c == cell)
    }

    pub fn body_index_of(&self, cell: Cell) -> Option<usize> {
        self.cells()
            .enumerate()
            .skip(1)
            .find(|(_, c)| *c == cell)
            .map(|(index, _)| index)
    }

    pub fn advance(&mut self, head: Cell, grown_color: Option<Hue>) {
        self.body.push_front(Segment::new(head));
        match grown_color {
            Some(color) => {
                if let Some(tail) = self.body.back_mut() {
                    tail.color = Some(color);
                }
            }
            None => {
                self.body.pop_back();
            }
        }
    }

    pub fn absorb(&mut self, other: &mut Snake) {
        self.body.append(&mut other.body);
    }

    pub fn bite_off(&mut self, index: usize) -> VecDeque<Segment> {
        if index >= self.body.len() {
            return VecDeque::new();
        }
        self.body.split_off(index)
    }

    pub fn append_segments(&mut self, mut segments: VecDeque<Segment>) {
        self.body.append(&mut segments);
    }
}
