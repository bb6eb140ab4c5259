//! Arena: the persistent board of placed cells, collision, merge and row sweep.

use crate::piece::{Cell, EMPTY, Matrix};
use std::collections::VecDeque;

/// Offset of a matrix's top-left corner in arena coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Fixed-size grid of cells. y=0 is top; dimensions never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arena {
    width: usize,
    height: usize,
    /// rows[y][x] = cell. rows[0] is top.
    rows: VecDeque<Vec<Cell>>,
}

impl Arena {
    pub fn new(width: usize, height: usize) -> Self {
        let rows = (0..height).map(|_| vec![EMPTY; width]).collect();
        Self {
            width,
            height,
            rows,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at signed coordinates; `None` when off the board.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if let Some(slot) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *slot = cell;
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(|&c| c == EMPTY)
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.rows.iter_mut().for_each(|row| row.fill(EMPTY));
    }

    /// True if any occupied cell of `matrix` at `pos` lands off the board
    /// or on a filled cell.
    pub fn collide(&self, matrix: &Matrix, pos: Position) -> bool {
        matrix.occupied().any(|(x, y, _)| {
            self.get(pos.x + x as i32, pos.y + y as i32)
                .is_none_or(|cell| cell != EMPTY)
        })
    }

    /// Copy the occupied cells of `matrix` at `pos` into the arena.
    /// Callers merge only at non-colliding positions; off-board cells are dropped.
    pub fn merge(&mut self, matrix: &Matrix, pos: Position) {
        for (x, y, value) in matrix.occupied() {
            let (ax, ay) = (pos.x + x as i32, pos.y + y as i32);
            if let (Ok(ax), Ok(ay)) = (usize::try_from(ax), usize::try_from(ay)) {
                self.set(ax, ay, value);
            }
        }
    }

    /// Remove every full row, scanning bottom-up, and push an empty row on top
    /// for each one. Row 0 is never tested. Returns the number of rows removed.
    pub fn sweep(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.height.saturating_sub(1);
        while y > 0 {
            if self.rows[y].iter().all(|&c| c != EMPTY) {
                if let Some(mut row) = self.rows.remove(y) {
                    row.fill(EMPTY);
                    self.rows.push_front(row);
                }
                cleared += 1;
                // Rows above shifted down into y; test it again.
                continue;
            }
            y -= 1;
        }
        cleared
    }
}
