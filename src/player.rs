//! Active piece: matrix + position, horizontal moves and kicked rotation.

use crate::arena::{Arena, Position};
use crate::piece::{Matrix, PieceKind, Rotation, create_piece};

/// Horizontal move direction (-1 / +1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn dx(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// The single falling piece. Owned by the game state, never by the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub kind: PieceKind,
    pub matrix: Matrix,
    pub pos: Position,
}

impl Player {
    /// Piece of `kind` at the top row, horizontally centred in an arena of `arena_width`.
    pub fn spawn(kind: PieceKind, arena_width: usize) -> Self {
        let matrix = create_piece(kind);
        let x = (arena_width / 2) as i32 - (matrix.width() / 2) as i32;
        Self {
            kind,
            matrix,
            pos: Position::new(x, 0),
        }
    }

    #[inline]
    pub fn collides(&self, arena: &Arena) -> bool {
        arena.collide(&self.matrix, self.pos)
    }

    /// Shift one column; reverted if blocked. Returns whether the piece moved.
    pub fn shift(&mut self, arena: &Arena, dir: Direction) -> bool {
        self.pos.x += dir.dx();
        if self.collides(arena) {
            self.pos.x -= dir.dx();
            return false;
        }
        true
    }

    /// Rotate in place, then kick sideways by +1, -2, +3, -4, ... (cumulative)
    /// until clear. Once the next offset exceeds the matrix width the rotation
    /// and x are restored. Returns whether the rotation stuck.
    pub fn rotate(&mut self, arena: &Arena, rotation: Rotation) -> bool {
        let start_x = self.pos.x;
        let mut offset: i32 = 1;
        self.matrix.rotate(rotation);
        while self.collides(arena) {
            self.pos.x += offset;
            offset = -(offset + offset.signum());
            if offset > self.matrix.width() as i32 {
                self.matrix.rotate(rotation.inverse());
                self.pos.x = start_x;
                return false;
            }
        }
        true
    }

    /// Move down one row; reverted if blocked. Returns whether the piece moved.
    pub fn fall(&mut self, arena: &Arena) -> bool {
        self.pos.y += 1;
        if self.collides(arena) {
            self.pos.y -= 1;
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(arena: &mut Arena, x: usize) {
        for y in 0..arena.height() {
            arena.set(x, y, 1);
        }
    }

    #[test]
    fn spawn_centres_piece() {
        assert_eq!(Player::spawn(PieceKind::O, 12).pos, Position::new(5, 0));
        assert_eq!(Player::spawn(PieceKind::T, 12).pos, Position::new(5, 0));
        assert_eq!(Player::spawn(PieceKind::I, 12).pos, Position::new(4, 0));
        assert_eq!(Player::spawn(PieceKind::I, 11).pos, Position::new(3, 0));
    }

    #[test]
    fn shift_moves_until_wall() {
        let arena = Arena::new(12, 20);
        let mut p = Player::spawn(PieceKind::O, 12);
        for _ in 0..5 {
            assert!(p.shift(&arena, Direction::Left));
        }
        assert_eq!(p.pos.x, 0);
        assert!(!p.shift(&arena, Direction::Left));
        assert_eq!(p.pos.x, 0);
        for _ in 0..10 {
            assert!(p.shift(&arena, Direction::Right));
        }
        assert!(!p.shift(&arena, Direction::Right));
        assert_eq!(p.pos.x, 10);
        assert!(!p.collides(&arena));
    }

    #[test]
    fn shift_is_blocked_by_stack() {
        let mut arena = Arena::new(12, 20);
        arena.set(7, 1, 2);
        let mut p = Player::spawn(PieceKind::O, 12);
        assert!(!p.shift(&arena, Direction::Right));
        assert_eq!(p.pos, Position::new(5, 0));
    }

    #[test]
    fn rotate_round_trip_without_kick() {
        let arena = Arena::new(12, 20);
        for kind in PieceKind::ALL {
            for rot in [Rotation::Clockwise, Rotation::CounterClockwise] {
                let mut p = Player::spawn(kind, 12);
                p.pos.y = 5;
                let before = p.clone();
                assert!(p.rotate(&arena, rot));
                assert_eq!(p.pos, before.pos);
                assert!(p.rotate(&arena, rot.inverse()));
                assert_eq!(p, before);
            }
        }
    }

    #[test]
    fn rotate_kicks_off_left_wall() {
        let arena = Arena::new(12, 20);
        let mut p = Player::spawn(PieceKind::T, 12);
        p.pos = Position::new(0, 5);
        // Standing T uses matrix columns 1..=2, so it can sit at x=-1.
        assert!(p.rotate(&arena, Rotation::Clockwise));
        assert!(p.shift(&arena, Direction::Left));
        assert_eq!(p.pos.x, -1);
        // Flat T needs column 0 on the board: kicked +1.
        assert!(p.rotate(&arena, Rotation::CounterClockwise));
        assert_eq!(p.pos.x, 0);
        assert!(!p.collides(&arena));
    }

    #[test]
    fn rotate_kicks_off_right_wall() {
        let arena = Arena::new(12, 20);
        let mut p = Player::spawn(PieceKind::I, 12);
        // Vertical I lives in matrix column 1, here arena column 10.
        p.pos = Position::new(9, 5);
        assert!(p.rotate(&arena, Rotation::Clockwise));
        assert_eq!(p.pos.x, 8);
        assert!(!p.collides(&arena));
    }

    #[test]
    fn rotate_gives_up_in_last_column() {
        let arena = Arena::new(12, 20);
        let mut p = Player::spawn(PieceKind::I, 12);
        p.pos = Position::new(10, 5);
        let before = p.clone();
        // Kicks tried: +1, -1, +2; the next offset exceeds the width.
        assert!(!p.rotate(&arena, Rotation::Clockwise));
        assert_eq!(p, before);
    }

    #[test]
    fn rotate_reverts_when_no_room() {
        let mut arena = Arena::new(12, 20);
        // Vertical I in a one-column shaft.
        wall(&mut arena, 4);
        wall(&mut arena, 6);
        let mut p = Player::spawn(PieceKind::I, 12);
        p.pos = Position::new(4, 10);
        assert!(!p.collides(&arena));
        let before = p.clone();
        assert!(!p.rotate(&arena, Rotation::Clockwise));
        assert_eq!(p, before);
        assert!(!p.rotate(&arena, Rotation::CounterClockwise));
        assert_eq!(p, before);
    }

    #[test]
    fn fall_stops_on_floor() {
        let arena = Arena::new(12, 20);
        let mut p = Player::spawn(PieceKind::O, 12);
        while p.fall(&arena) {}
        assert_eq!(p.pos.y, 18);
    }
}
